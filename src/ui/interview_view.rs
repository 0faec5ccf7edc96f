use egui::{RichText, Ui};

use prepvista::devices::MediaDevices;
use prepvista::panels::format_clock;
use prepvista::panels::interview::{
    DURATION_OPTIONS_MIN, InterviewPanel, InterviewStage, InterviewType, MAX_DIFFICULTY,
    MIN_DIFFICULTY,
};

use super::{
    PALETTE_GREEN, PALETTE_RED, PALETTE_SLATE, bullet_list, card, error_label, metric_bar,
    page_header, score_color,
};

pub(crate) fn interview_view(
    ui: &mut Ui,
    panel: &mut InterviewPanel,
    devices: &mut dyn MediaDevices,
    notice: &mut Option<String>,
) {
    page_header(
        ui,
        "Live Interview",
        "Practice with timed questions and live feedback",
    );

    match panel.stage() {
        InterviewStage::Setup => setup_view(ui, panel, devices),
        InterviewStage::Active => active_view(ui, panel, devices),
        InterviewStage::Complete => {
            let Some(summary) = panel.summary().cloned() else {
                return;
            };
            card(ui, |ui| {
                ui.label(RichText::new("Interview Complete").size(20.).strong());
                ui.label(
                    RichText::new(format!("Overall score {}", summary.overall_score))
                        .size(32.)
                        .strong()
                        .color(score_color(summary.overall_score)),
                );
                ui.label(format!(
                    "{} · {} minutes · {} questions answered",
                    summary.interview_type, summary.duration_minutes, summary.questions_answered
                ));
                ui.add_space(6.);
                metric_bar(ui, "Eye Contact", f64::from(summary.average_eye_contact));
                metric_bar(ui, "Posture", f64::from(summary.average_posture));
                metric_bar(ui, "Confidence", f64::from(summary.average_confidence));
                metric_bar(ui, "Speech Pace", f64::from(summary.average_speech_pace));
            });
            card(ui, |ui| {
                ui.label(RichText::new("Feedback").strong());
                bullet_list(ui, &summary.feedback, "•", PALETTE_SLATE);
            });
            if ui.button("New Interview").clicked() {
                panel.new_interview(devices);
                *notice = None;
            }
        }
    }
}

fn setup_view(ui: &mut Ui, panel: &mut InterviewPanel, devices: &mut dyn MediaDevices) {
    card(ui, |ui| {
        ui.label(RichText::new("Interview Type").strong());
        for kind in InterviewType::ALL {
            ui.radio_value(
                &mut panel.setup.interview_type,
                kind,
                format!("{kind}  ({})", kind.description()),
            );
        }
    });

    card(ui, |ui| {
        ui.label(RichText::new("Settings").strong());
        ui.add(
            egui::Slider::new(&mut panel.setup.difficulty, MIN_DIFFICULTY..=MAX_DIFFICULTY)
                .text("Difficulty"),
        );
        ui.horizontal(|ui| {
            ui.label("Duration");
            for minutes in DURATION_OPTIONS_MIN {
                ui.selectable_value(
                    &mut panel.setup.duration_minutes,
                    minutes,
                    format!("{minutes} min"),
                );
            }
        });
        ui.checkbox(&mut panel.setup.video_on, "Camera on");
        ui.checkbox(&mut panel.setup.audio_on, "Microphone on");
    });

    if ui.button("▶ Start Interview").clicked() {
        let _ = panel.start(devices);
    }
    if let Some(message) = panel.last_error() {
        error_label(ui, message);
    }
}

fn active_view(ui: &mut Ui, panel: &mut InterviewPanel, devices: &mut dyn MediaDevices) {
    let Some(session) = panel.session() else {
        return;
    };
    let remaining = session.time_remaining_s;
    let index = session.current_question;
    let total = session.questions().len();
    let question = session.question();
    let metrics = session.metrics;

    ui.horizontal(|ui| {
        ui.label(
            RichText::new(format!("⏱ {}", format_clock(remaining)))
                .size(22.)
                .strong()
                .color(if remaining < 60 { PALETTE_RED } else { PALETTE_GREEN }),
        );
        ui.separator();
        let camera = if panel.setup.video_on { "📷 on" } else { "📷 off" };
        let microphone = if panel.setup.audio_on { "🎤 on" } else { "🎤 off" };
        if ui.button(camera).clicked() {
            panel.toggle_video();
        }
        if ui.button(microphone).clicked() {
            panel.toggle_audio();
        }
    });

    ui.columns(2, |columns| {
        card(&mut columns[0], |ui| {
            ui.label(
                RichText::new(format!("Question {} of {}", index + 1, total)).color(PALETTE_SLATE),
            );
            ui.label(RichText::new(question).size(18.).strong());
            ui.add_space(8.);
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(index + 1 < total, egui::Button::new("Next Question"))
                    .clicked()
                {
                    panel.next_question();
                }
                if ui.button("End Interview").clicked() {
                    panel.end(devices);
                }
            });
        });
        card(&mut columns[1], |ui| {
            ui.label(RichText::new("Live Feedback").strong());
            metric_bar(ui, "Eye Contact", metrics.eye_contact);
            metric_bar(ui, "Posture", metrics.posture);
            metric_bar(ui, "Confidence", metrics.confidence);
            metric_bar(ui, "Speech Pace", metrics.speech_pace);
        });
    });
}
