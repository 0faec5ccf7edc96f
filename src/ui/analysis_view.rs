use std::path::PathBuf;

use egui::{RichText, TextEdit, Ui};
use log::error;
use serde::Serialize;

use prepvista::devices::MediaDevices;
use prepvista::export;
use prepvista::files::SelectedFile;
use prepvista::panels::format_clock;
use prepvista::panels::resume::{ResumePanel, ResumeStage};
use prepvista::panels::video::{VideoPanel, VideoSource, VideoStage};

use super::{
    PALETTE_GREEN, PALETTE_RED, PALETTE_SLATE, PALETTE_YELLOW, bullet_list, card, error_label,
    metric_bar, page_header, score_color,
};

const VIDEO_EXTENSIONS: [&str; 6] = ["mp4", "m4v", "webm", "mov", "mkv", "avi"];

fn pick_file(filter_name: &str, extensions: &[&str]) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter(filter_name, extensions)
        .pick_file()
}

fn save_result<T: Serialize>(value: &T, file_name: &str, notice: &mut Option<String>) {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("JSON", &["json"])
        .set_file_name(file_name)
        .save_file()
    else {
        return;
    };
    *notice = Some(match export::write_pretty_json(&path, value) {
        Ok(()) => format!("Saved {}", path.display()),
        Err(e) => {
            error!("Could not save result: {e}");
            e.to_string()
        }
    });
}

fn load_selected(path: PathBuf, notice: &mut Option<String>) -> Option<SelectedFile> {
    SelectedFile::from_path(&path)
        .map_err(|e| {
            error!("{e}");
            *notice = Some(e.to_string());
        })
        .ok()
}

pub(crate) fn resume_view(ui: &mut Ui, panel: &mut ResumePanel, notice: &mut Option<String>) {
    page_header(
        ui,
        "Resume Analysis",
        "Upload your resume to get an ATS score and improvement suggestions",
    );

    match panel.stage() {
        ResumeStage::NoFile | ResumeStage::FileSelected => {
            card(ui, |ui| {
                ui.label(RichText::new("Upload Resume").size(18.).strong());
                match panel.selected_file() {
                    None => {
                        ui.label(RichText::new("PDF files up to 10MB").color(PALETTE_SLATE));
                        if ui.button("📂 Choose File").clicked()
                            && let Some(path) = pick_file("PDF", &["pdf"])
                            && let Some(file) = load_selected(path, notice)
                        {
                            let _ = panel.select_file(file);
                        }
                    }
                    Some(file) => {
                        let description = format!("📄 {} ({:.2} MB)", file.name, file.size_mb());
                        ui.horizontal(|ui| {
                            ui.label(description);
                            if ui.small_button("Remove").clicked() {
                                panel.remove_file();
                            }
                        });
                    }
                }
                if let Some(message) = panel.last_error() {
                    error_label(ui, message);
                }
            });

            card(ui, |ui| {
                ui.label(RichText::new("Job Description (optional)").strong());
                ui.add(
                    TextEdit::multiline(&mut panel.job_description)
                        .hint_text("Paste the job description to tailor the analysis")
                        .desired_rows(5),
                );
            });

            if ui
                .add_enabled(panel.can_analyze(), egui::Button::new("Analyze Resume"))
                .clicked()
                && let Err(e) = panel.analyze()
            {
                *notice = Some(e.to_string());
            }
        }
        ResumeStage::Analyzing => {
            card(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Analyzing your resume...");
                });
            });
        }
        ResumeStage::Result => {
            let Some(report) = panel.report().cloned() else {
                return;
            };
            card(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("{}", report.ats_score))
                            .size(48.)
                            .strong()
                            .color(score_color(report.ats_score)),
                    );
                    ui.vertical(|ui| {
                        ui.label(RichText::new("ATS Score").strong());
                        ui.label(format!("Overall rating: {}", report.overall_rating.letter()));
                    });
                });
                ui.add(egui::ProgressBar::new(f32::from(report.ats_score) / 100.));
            });
            ui.columns(3, |columns| {
                card(&mut columns[0], |ui| {
                    ui.label(RichText::new("Strengths").strong().color(PALETTE_GREEN));
                    bullet_list(ui, &report.strengths, "✔", PALETTE_GREEN);
                });
                card(&mut columns[1], |ui| {
                    ui.label(RichText::new("Areas to Improve").strong().color(PALETTE_RED));
                    bullet_list(ui, &report.weaknesses, "✖", PALETTE_RED);
                });
                card(&mut columns[2], |ui| {
                    ui.label(RichText::new("Suggestions").strong().color(PALETTE_YELLOW));
                    bullet_list(ui, &report.suggestions, "💡", PALETTE_YELLOW);
                });
            });
            ui.horizontal(|ui| {
                if ui.button("Analyze New Resume").clicked() {
                    panel.start_over();
                }
                if ui.button("💾 Save Report").clicked() {
                    save_result(&report, "resume-report.json", notice);
                }
            });
        }
    }
}

pub(crate) fn video_view(
    ui: &mut Ui,
    panel: &mut VideoPanel,
    devices: &mut dyn MediaDevices,
    notice: &mut Option<String>,
) {
    page_header(
        ui,
        "Video Practice",
        "Record or upload an answer and get feedback on your delivery",
    );

    card(ui, |ui| {
        let (_, prompt) = panel.current_prompt();
        ui.label(RichText::new(panel.prompt_label()).color(PALETTE_SLATE));
        ui.label(RichText::new(prompt).size(18.).strong());
        ui.horizontal(|ui| {
            if ui.button("◀ Previous").clicked() {
                panel.previous_prompt();
            }
            if ui.button("Next ▶").clicked() {
                panel.next_prompt();
            }
        });
    });

    match panel.stage() {
        VideoStage::Idle => {
            card(ui, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("⏺ Start Recording").clicked() {
                        let _ = panel.start_recording(devices);
                    }
                    if ui.button("📂 Upload Video").clicked()
                        && let Some(path) = pick_file("Video", &VIDEO_EXTENSIONS)
                        && let Some(file) = load_selected(path, notice)
                    {
                        let _ = panel.upload(file);
                    }
                });
                if let Some(message) = panel.last_error() {
                    error_label(ui, message);
                }
            });
        }
        VideoStage::Recording => {
            let elapsed = panel.recording_elapsed().unwrap_or_default();
            let max = panel.max_recording_s();
            card(ui, |ui| {
                ui.label(
                    RichText::new(format!(
                        "● Recording  {} / {}",
                        format_clock(elapsed),
                        format_clock(max)
                    ))
                    .color(PALETTE_RED)
                    .strong(),
                );
                ui.add(egui::ProgressBar::new(elapsed as f32 / max.max(1) as f32));
                if ui.button("⏹ Stop Recording").clicked() {
                    panel.stop_recording(devices);
                }
            });
        }
        VideoStage::Recorded => {
            card(ui, |ui| {
                match panel.source() {
                    Some(VideoSource::Recording { duration_s }) => {
                        ui.label(format!("Recorded take, {}", format_clock(*duration_s)));
                    }
                    Some(VideoSource::Upload(file)) => {
                        ui.label(format!("🎥 {} ({:.2} MB)", file.name, file.size_mb()));
                    }
                    None => {}
                }
                ui.horizontal(|ui| {
                    if ui.button("Analyze Video").clicked()
                        && let Err(e) = panel.analyze()
                    {
                        *notice = Some(e.to_string());
                    }
                    if ui.button("Re-record").clicked() {
                        panel.discard_take();
                    }
                });
            });
        }
        VideoStage::Analyzing => {
            card(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Analyzing your video...");
                });
            });
        }
        VideoStage::Result => {
            let Some(report) = panel.report().cloned() else {
                return;
            };
            card(ui, |ui| {
                ui.label(
                    RichText::new(format!("Overall score {}", report.overall_score))
                        .size(24.)
                        .strong()
                        .color(score_color(report.overall_score)),
                );
                metric_bar(ui, "Eye Contact", f64::from(report.eye_contact_percentage));
                metric_bar(ui, "Posture", f64::from(report.posture_score));
                metric_bar(ui, "Speech Quality", f64::from(report.speech_quality));
                metric_bar(ui, "Confidence", f64::from(report.confidence));
                ui.add_space(6.);
                ui.label(format!("Gestures: {}", report.gesture_analysis));
                ui.label(format!("Emotion: {}", report.emotional_analysis));
            });
            ui.columns(2, |columns| {
                card(&mut columns[0], |ui| {
                    ui.label(RichText::new("Strengths").strong().color(PALETTE_GREEN));
                    bullet_list(ui, &report.strengths, "✔", PALETTE_GREEN);
                });
                card(&mut columns[1], |ui| {
                    ui.label(RichText::new("Improvements").strong().color(PALETTE_YELLOW));
                    bullet_list(ui, &report.improvements, "➜", PALETTE_YELLOW);
                });
            });
            ui.horizontal(|ui| {
                if ui.button("New Recording").clicked() {
                    panel.start_over(devices);
                }
                if ui.button("💾 Save Report").clicked() {
                    save_result(&report, "video-report.json", notice);
                }
            });
        }
    }
}
