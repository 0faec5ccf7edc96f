use egui::{Color32, RichText, Ui};
use egui_dropdown::DropDownBox;
use egui_extras::{Column, TableBuilder};
use egui_plot::{Legend, Line, PlotPoints, Points};
use itertools::Itertools;
use log::error;

use prepvista::navigation::SectionId;
use prepvista::panels::Filtered;
use prepvista::panels::dashboard::DashboardPanel;
use prepvista::panels::help::{HelpCategory, HelpPanel, SUPPORT_EMAIL, TUTORIALS, TutorialKind};
use prepvista::panels::library::{
    CATALOGUE_TOTAL, Category, Difficulty, LibraryPanel, Question, QuestionType,
};
use prepvista::panels::reports::{MONTHLY_PROGRESS, Period, ReportKind, ReportsPanel, SKILLS};

use super::{
    PALETTE_BLUE, PALETTE_GREEN, PALETTE_INK, PALETTE_RED, PALETTE_SLATE, PALETTE_YELLOW, card,
    metric_bar, page_header, score_color,
};

fn stat_card(ui: &mut Ui, title: &str, value: String, change: &str) {
    card(ui, |ui| {
        ui.label(RichText::new(title).color(PALETTE_SLATE));
        ui.label(RichText::new(value).size(26.).strong().color(PALETTE_INK));
        ui.label(RichText::new(change).small().color(PALETTE_GREEN));
    });
}

fn difficulty_color(difficulty: Difficulty) -> Color32 {
    match difficulty {
        Difficulty::Easy => PALETTE_GREEN,
        Difficulty::Medium => PALETTE_YELLOW,
        Difficulty::Hard => PALETTE_RED,
    }
}

fn empty_state(ui: &mut Ui, message: &str) {
    ui.add_space(20.);
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(message).color(PALETTE_SLATE));
    });
    ui.add_space(20.);
}

/// Returns the section to open when one of the shortcut buttons is used.
pub(crate) fn dashboard_view(ui: &mut Ui, panel: &mut DashboardPanel) -> Option<SectionId> {
    let mut goto = None;
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(RichText::new(panel.greeting()).size(26.).strong().color(PALETTE_INK));
            ui.label(RichText::new("Ready to ace your next interview?").color(PALETTE_SLATE));
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("🎯 Start Practice").clicked() {
                goto = Some(SectionId::Video);
            }
            if ui.button("📅 Schedule Interview").clicked() {
                goto = Some(SectionId::Interview);
            }
        });
    });
    ui.add_space(12.);

    let stats = panel.stats;
    ui.columns(4, |columns| {
        stat_card(
            &mut columns[0],
            "Resume Score",
            format!("{}%", stats.resume_score),
            "+12% vs last month",
        );
        stat_card(
            &mut columns[1],
            "Practice Sessions",
            stats.interview_count.to_string(),
            "+25% this week",
        );
        stat_card(
            &mut columns[2],
            "Success Rate",
            format!("{}%", stats.success_rate),
            "+8% improvement",
        );
        stat_card(
            &mut columns[3],
            "Total Sessions",
            stats.total_sessions.to_string(),
            &format!("+{}% this month", stats.improvement),
        );
    });

    ui.columns(2, |columns| {
        card(&mut columns[0], |ui| {
            ui.label(RichText::new("Your Progress").size(18.).strong());
            ui.label(
                RichText::new(format!("Resume Score {}%", stats.resume_score))
                    .color(score_color(stats.resume_score)),
            );
            for (label, value) in panel.skill_bars() {
                metric_bar(ui, label, f64::from(value));
            }
        });
        card(&mut columns[1], |ui| {
            ui.label(RichText::new("Recent Activity").size(18.).strong());
            for activity in panel.recent_activity() {
                ui.horizontal(|ui| {
                    ui.label(activity.kind.icon());
                    ui.vertical(|ui| {
                        ui.label(activity.action);
                        ui.label(RichText::new(activity.when).small().color(PALETTE_SLATE));
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(format!("{}%", activity.score))
                                .strong()
                                .color(score_color(activity.score)),
                        );
                    });
                });
            }
        });
    });

    card(ui, |ui| {
        ui.label(RichText::new("Upcoming Interviews").size(18.).strong());
        for interview in panel.upcoming() {
            ui.horizontal(|ui| {
                ui.label(RichText::new(interview.company).strong());
                ui.label(interview.position);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("{} · {}", interview.date, interview.time));
                });
            });
        }
    });
    goto
}

fn question_tags(ui: &mut Ui, question: &Question) {
    ui.horizontal_wrapped(|ui| {
        ui.label(RichText::new(question.category.to_string()).small().color(PALETTE_BLUE));
        ui.label(
            RichText::new(question.difficulty.to_string())
                .small()
                .color(difficulty_color(question.difficulty)),
        );
        ui.label(RichText::new(question.kind.to_string()).small().color(PALETTE_SLATE));
        ui.label(RichText::new(format!("⏱ {}", question.time_to_answer)).small());
    });
}

pub(crate) fn library_view(ui: &mut Ui, panel: &mut LibraryPanel) {
    if panel.selected().is_some() {
        question_detail(ui, panel);
        return;
    }

    page_header(
        ui,
        "Question Library",
        "Browse interview questions with tips and sample answers",
    );

    let tags = panel.all_tags().into_iter().map(String::from).collect_vec();
    card(ui, |ui| {
        ui.horizontal(|ui| {
            ui.label("🔍");
            ui.add(
                DropDownBox::from_iter(
                    tags,
                    "library_search",
                    &mut panel.filter.query,
                    |ui, text| ui.selectable_label(false, text),
                )
                .filter_by_input(true),
            );
        });

        ui.horizontal_wrapped(|ui| {
            ui.selectable_value(
                &mut panel.filter.category,
                None,
                format!("All Categories ({CATALOGUE_TOTAL})"),
            );
            for category in Category::ALL {
                ui.selectable_value(
                    &mut panel.filter.category,
                    Some(category),
                    format!("{} ({})", category.label(), category.catalogue_count()),
                );
            }
        });

        ui.horizontal(|ui| {
            egui::ComboBox::from_id_salt("difficulty_filter")
                .selected_text(
                    panel
                        .filter
                        .difficulty
                        .map_or("All Levels".to_string(), |d| d.to_string()),
                )
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut panel.filter.difficulty, None, "All Levels");
                    for difficulty in Difficulty::ALL {
                        ui.selectable_value(
                            &mut panel.filter.difficulty,
                            Some(difficulty),
                            difficulty.to_string(),
                        );
                    }
                });
            egui::ComboBox::from_id_salt("type_filter")
                .selected_text(
                    panel
                        .filter
                        .kind
                        .map_or("All Types".to_string(), |k| k.to_string()),
                )
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut panel.filter.kind, None, "All Types");
                    for kind in QuestionType::ALL {
                        ui.selectable_value(&mut panel.filter.kind, Some(kind), kind.to_string());
                    }
                });
            ui.checkbox(&mut panel.filter.bookmarked_only, "Bookmarked only");
        });
    });

    let mut toggle = None;
    let mut open = None;
    let filtered = panel.filtered();
    ui.label(RichText::new(format!("Showing {} questions", filtered.len())).color(PALETTE_SLATE));
    match &filtered {
        Filtered::Empty => empty_state(ui, "No questions match your filters"),
        Filtered::Matches(questions) => {
            for question in questions {
                card(ui, |ui| {
                    ui.horizontal(|ui| {
                        let star = if question.bookmarked { "★" } else { "☆" };
                        if ui.button(star).clicked() {
                            toggle = Some(question.id);
                        }
                        ui.label(RichText::new(&question.text).strong());
                    });
                    question_tags(ui, question);
                    if ui.link("View details").clicked() {
                        open = Some(question.id);
                    }
                });
            }
        }
    }

    if let Some(id) = toggle {
        panel.toggle_bookmark(id);
    }
    if let Some(id) = open {
        panel.select(id);
    }
}

fn question_detail(ui: &mut Ui, panel: &mut LibraryPanel) {
    let Some(question) = panel.selected().cloned() else {
        return;
    };
    let related = panel
        .related()
        .into_iter()
        .map(|q| (q.id, q.text.clone(), q.difficulty))
        .collect_vec();

    ui.horizontal(|ui| {
        if ui.button("← Back to Library").clicked() {
            panel.back_to_library();
        }
        let label = if question.bookmarked { "★ Bookmarked" } else { "☆ Bookmark" };
        if ui.button(label).clicked() {
            panel.toggle_bookmark(question.id);
        }
    });
    ui.add_space(8.);

    card(ui, |ui| {
        ui.label(RichText::new(&question.text).size(22.).strong());
        question_tags(ui, &question);
    });
    card(ui, |ui| {
        ui.label(RichText::new("Tips & Strategy").strong().color(PALETTE_BLUE));
        ui.label(&question.tips);
    });
    card(ui, |ui| {
        ui.label(RichText::new("Sample Answer").strong());
        ui.label(&question.sample_answer);
        ui.label(
            RichText::new(
                "This is a sample answer. Personalize it with your own experiences and examples.",
            )
            .small()
            .color(PALETTE_SLATE),
        );
    });
    card(ui, |ui| {
        ui.label(RichText::new("Related Tags").strong());
        ui.label(question.tags.iter().map(|t| format!("#{t}")).join("  "));
    });

    card(ui, |ui| {
        ui.label(RichText::new("Related Questions").strong());
        if related.is_empty() {
            ui.label(RichText::new("No related questions").color(PALETTE_SLATE));
        }
        for (id, text, difficulty) in related {
            ui.horizontal(|ui| {
                if ui.link(text).clicked() {
                    panel.select(id);
                }
                ui.label(
                    RichText::new(difficulty.to_string())
                        .small()
                        .color(difficulty_color(difficulty)),
                );
            });
        }
    });
}

pub(crate) fn help_view(ui: &mut Ui, panel: &mut HelpPanel) {
    page_header(
        ui,
        "Help & Support",
        "Find answers to common questions and get help with PrepVista",
    );

    let mut query = panel.query().to_string();
    if ui
        .add(egui::TextEdit::singleline(&mut query).hint_text("Search for help..."))
        .changed()
    {
        panel.set_query(&query);
    }

    ui.horizontal_wrapped(|ui| {
        for category in HelpCategory::ALL {
            if ui
                .selectable_label(panel.category() == category, category.label())
                .clicked()
            {
                panel.set_category(category);
            }
        }
    });

    let mut toggled = None;
    card(ui, |ui| {
        ui.label(RichText::new(panel.category().label()).size(18.).strong());
        match panel.filtered() {
            Filtered::Empty => empty_state(ui, "No results found. Try a different search term."),
            Filtered::Matches(faqs) => {
                for (index, faq) in faqs.iter().enumerate() {
                    let open = panel.expanded() == Some(index);
                    let marker = if open { "▼" } else { "▶" };
                    if ui
                        .selectable_label(open, format!("{marker} {}", faq.question))
                        .clicked()
                    {
                        toggled = Some(index);
                    }
                    if open {
                        ui.label(RichText::new(faq.answer).color(PALETTE_SLATE));
                    }
                }
            }
        }
    });
    if let Some(index) = toggled {
        panel.toggle(index);
    }

    ui.columns(2, |columns| {
        card(&mut columns[0], |ui| {
            ui.label(RichText::new("Tutorials").size(18.).strong());
            for tutorial in TUTORIALS {
                let icon = match tutorial.kind {
                    TutorialKind::Video => "🎬",
                    TutorialKind::Article => "📖",
                };
                ui.horizontal(|ui| {
                    ui.label(icon);
                    ui.vertical(|ui| {
                        ui.label(RichText::new(tutorial.title).strong());
                        ui.label(
                            RichText::new(format!("{} · {}", tutorial.description, tutorial.duration))
                                .small()
                                .color(PALETTE_SLATE),
                        );
                    });
                });
            }
        });
        card(&mut columns[1], |ui| {
            ui.label(RichText::new("Contact Support").size(18.).strong());
            ui.label("Can't find what you're looking for?");
            ui.hyperlink_to(SUPPORT_EMAIL, format!("mailto:{SUPPORT_EMAIL}"));
        });
    });
}

pub(crate) fn reports_view(ui: &mut Ui, panel: &mut ReportsPanel, notice: &mut Option<String>) {
    page_header(
        ui,
        "Reports & Analytics",
        "Track your interview preparation progress and performance",
    );

    ui.horizontal(|ui| {
        egui::ComboBox::from_id_salt("report_period")
            .selected_text(panel.period.label())
            .show_ui(ui, |ui| {
                for period in Period::ALL {
                    ui.selectable_value(&mut panel.period, period, period.label());
                }
            });
        if ui.button("⬇ Export Data").clicked()
            && let Some(path) = rfd::FileDialog::new()
                .add_filter("JSON lines", &["jsonl"])
                .set_file_name("reports.jsonl")
                .save_file()
        {
            *notice = Some(match panel.export(&path) {
                Ok(count) => format!("Exported {count} reports to {}", path.display()),
                Err(e) => {
                    error!("Export failed: {e}");
                    e.to_string()
                }
            });
        }
    });
    ui.add_space(8.);

    let overview = panel.overview;
    ui.columns(4, |columns| {
        stat_card(
            &mut columns[0],
            "Total Sessions",
            overview.total_sessions.to_string(),
            "",
        );
        stat_card(
            &mut columns[1],
            "Average Score",
            format!("{}%", overview.average_score),
            "",
        );
        stat_card(
            &mut columns[2],
            "Improvement",
            format!("+{}%", overview.improvement),
            "",
        );
        stat_card(
            &mut columns[3],
            "Time Spent",
            format!("{:.1}h", overview.hours_spent),
            "",
        );
    });

    card(ui, |ui| {
        ui.label(RichText::new("Progress Over Time").size(18.).strong());
        let scores = MONTHLY_PROGRESS
            .iter()
            .enumerate()
            .map(|(i, (_, score))| [i as f64, f64::from(*score)])
            .collect_vec();
        egui_plot::Plot::new("monthly_progress")
            .height(200.)
            .legend(Legend::default())
            .include_y(0.)
            .include_y(100.)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .x_axis_formatter(|mark, _range| {
                if mark.value.fract() != 0. {
                    return String::new();
                }
                MONTHLY_PROGRESS
                    .get(mark.value as usize)
                    .map(|(month, _)| month.to_string())
                    .unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new("Average score", PlotPoints::new(scores.clone())).color(PALETTE_BLUE),
                );
                plot_ui.points(
                    Points::new("Months", PlotPoints::new(scores))
                        .color(PALETTE_INK)
                        .radius(4.),
                );
            });
    });

    ui.columns(2, |columns| {
        card(&mut columns[0], |ui| {
            ui.label(RichText::new("Skills Breakdown").size(18.).strong());
            for (skill, score) in SKILLS {
                metric_bar(ui, skill, f64::from(score));
            }
        });
        card(&mut columns[1], |ui| {
            ui.label(RichText::new("Recent Reports").size(18.).strong());
            ui.horizontal(|ui| {
                ui.selectable_value(&mut panel.kind_filter, None, "All");
                for kind in ReportKind::ALL {
                    ui.selectable_value(&mut panel.kind_filter, Some(kind), kind.to_string());
                }
            });
            match panel.filtered() {
                Filtered::Empty => empty_state(ui, "No reports of this type yet"),
                Filtered::Matches(reports) => {
                    TableBuilder::new(ui)
                        .striped(true)
                        .column(Column::auto())
                        .column(Column::remainder())
                        .column(Column::auto())
                        .column(Column::auto())
                        .header(20., |mut header| {
                            header.col(|_| {});
                            header.col(|ui| {
                                ui.strong("Report");
                            });
                            header.col(|ui| {
                                ui.strong("Date");
                            });
                            header.col(|ui| {
                                ui.strong("Score");
                            });
                        })
                        .body(|mut body| {
                            for report in &reports {
                                body.row(22., |mut row| {
                                    row.col(|ui| {
                                        ui.label(report.kind.icon());
                                    });
                                    row.col(|ui| {
                                        ui.label(&report.title);
                                    });
                                    row.col(|ui| {
                                        ui.label(&report.date);
                                    });
                                    row.col(|ui| {
                                        ui.label(
                                            RichText::new(format!("{}%", report.score))
                                                .strong()
                                                .color(score_color(report.score)),
                                        );
                                    });
                                });
                            }
                        });
                }
            }
        });
    });
}
