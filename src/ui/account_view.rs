use egui::{RichText, TextEdit, Ui};
use log::error;

use prepvista::devices::MediaDevices;
use prepvista::panels::profile::{ProfileField, ProfilePanel};
use prepvista::panels::settings::{Language, ProfileVisibility, SettingsPanel, SettingsTab, Theme};

use super::{PALETTE_BLUE, PALETTE_GREEN, PALETTE_SLATE, card, error_label, page_header};

const PROFILE_FIELDS: [(ProfileField, &str); 6] = [
    (ProfileField::Name, "Full Name"),
    (ProfileField::Email, "Email"),
    (ProfileField::University, "University"),
    (ProfileField::Course, "Course/Major"),
    (ProfileField::GraduationYear, "Graduation Year"),
    (ProfileField::Location, "Location"),
];

fn profile_field_value(panel: &ProfilePanel, field: ProfileField) -> String {
    let shown = panel.shown();
    match field {
        ProfileField::Name => shown.name.clone(),
        ProfileField::Email => shown.email.clone(),
        ProfileField::University => shown.university.clone(),
        ProfileField::Course => shown.course.clone(),
        ProfileField::GraduationYear => shown.graduation_year.clone(),
        ProfileField::Location => shown.location.clone(),
        ProfileField::Bio => shown.bio.clone(),
        ProfileField::Skills => shown.skills.join(", "),
    }
}

pub(crate) fn profile_view(ui: &mut Ui, panel: &mut ProfilePanel, notice: &mut Option<String>) {
    ui.horizontal(|ui| {
        ui.vertical(|ui| page_header(ui, "Profile", "Manage your personal information"));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if panel.is_editing() {
                if ui.button("Cancel").clicked() {
                    panel.cancel_edit();
                }
                if ui.button("💾 Save").clicked() {
                    match panel.save() {
                        Ok(outcome) => *notice = Some(outcome.message().to_string()),
                        Err(e) => error!("{e}"),
                    }
                }
            } else if ui.button("✏ Edit Profile").clicked() {
                panel.begin_edit();
            }
        });
    });

    let editing = panel.is_editing();
    card(ui, |ui| {
        ui.label(RichText::new("Personal Information").size(18.).strong());
        egui::Grid::new("profile_fields")
            .num_columns(2)
            .spacing([16., 6.])
            .show(ui, |ui| {
                for (field, label) in PROFILE_FIELDS {
                    ui.label(RichText::new(label).color(PALETTE_SLATE));
                    let mut value = profile_field_value(panel, field);
                    if editing {
                        if ui.text_edit_singleline(&mut value).changed() {
                            panel.set_field(field, &value);
                        }
                    } else {
                        ui.label(value);
                    }
                    ui.end_row();
                }
            });

        ui.add_space(6.);
        ui.label(RichText::new("Bio").color(PALETTE_SLATE));
        let mut bio = profile_field_value(panel, ProfileField::Bio);
        if editing {
            if ui
                .add(TextEdit::multiline(&mut bio).desired_rows(3))
                .changed()
            {
                panel.set_field(ProfileField::Bio, &bio);
            }
        } else {
            ui.label(bio);
        }
    });

    card(ui, |ui| {
        ui.label(RichText::new("Skills").size(18.).strong());
        let mut skills = profile_field_value(panel, ProfileField::Skills);
        if editing {
            if ui
                .add(TextEdit::singleline(&mut skills).hint_text("Comma separated"))
                .changed()
            {
                panel.set_field(ProfileField::Skills, &skills);
            }
        } else {
            ui.horizontal_wrapped(|ui| {
                for skill in &panel.shown().skills {
                    ui.label(RichText::new(skill).color(PALETTE_BLUE));
                }
            });
        }
    });

    let shown = panel.shown();
    ui.columns(2, |columns| {
        card(&mut columns[0], |ui| {
            ui.label(RichText::new("Experience").size(18.).strong());
            for experience in &shown.experience {
                ui.label(RichText::new(&experience.title).strong());
                ui.label(
                    RichText::new(format!("{} · {}", experience.company, experience.duration))
                        .color(PALETTE_SLATE),
                );
                ui.label(&experience.description);
                ui.add_space(6.);
            }
        });
        card(&mut columns[1], |ui| {
            ui.label(RichText::new("Achievements").size(18.).strong());
            for achievement in &shown.achievements {
                ui.label(format!("🏆 {achievement}"));
            }
        });
    });
}

pub(crate) fn settings_view(
    ui: &mut Ui,
    panel: &mut SettingsPanel,
    devices: &mut dyn MediaDevices,
    notice: &mut Option<String>,
) {
    page_header(ui, "Settings", "Manage your account and preferences");

    ui.horizontal(|ui| {
        for tab in SettingsTab::ALL {
            ui.selectable_value(&mut panel.tab, tab, tab.label());
        }
    });
    ui.separator();

    card(ui, |ui| match panel.tab {
        SettingsTab::Account => account_tab(ui, panel, notice),
        SettingsTab::Notifications => {
            let draft = &mut panel.draft;
            ui.checkbox(&mut draft.email_notifications, "Email notifications");
            ui.checkbox(&mut draft.practice_reminders, "Practice reminders");
            ui.checkbox(&mut draft.weekly_reports, "Weekly progress reports");
            ui.checkbox(&mut draft.marketing_emails, "Marketing emails");
        }
        SettingsTab::Privacy => {
            let draft = &mut panel.draft;
            egui::ComboBox::from_label("Profile visibility")
                .selected_text(draft.profile_visibility.label())
                .show_ui(ui, |ui| {
                    for visibility in ProfileVisibility::ALL {
                        ui.selectable_value(
                            &mut draft.profile_visibility,
                            visibility,
                            visibility.label(),
                        );
                    }
                });
            ui.checkbox(&mut draft.data_sharing, "Share anonymised data to improve PrepVista");
            ui.checkbox(&mut draft.analytics_tracking, "Analytics tracking");
        }
        SettingsTab::Appearance => {
            let draft = &mut panel.draft;
            ui.horizontal(|ui| {
                ui.label("Theme");
                for theme in Theme::ALL {
                    ui.radio_value(&mut draft.theme, theme, theme.label());
                }
            });
            egui::ComboBox::from_label("Language")
                .selected_text(draft.language.label())
                .show_ui(ui, |ui| {
                    for language in Language::ALL {
                        ui.selectable_value(&mut draft.language, language, language.label());
                    }
                });
        }
        SettingsTab::Devices => {
            {
                let draft = &mut panel.draft;
                ui.checkbox(&mut draft.camera_permission, "Allow camera access");
                ui.checkbox(&mut draft.microphone_permission, "Allow microphone access");
                ui.checkbox(&mut draft.auto_record, "Start recording automatically");
            }
            ui.add_space(6.);
            if ui.button("🎥 Test Camera & Microphone").clicked()
                && let Err(e) = panel.test_devices(devices)
            {
                error!("Device check failed: {e}");
            }
            match panel.device_check() {
                Some(Ok(())) => {
                    ui.label(
                        RichText::new("✔ Camera and microphone are working").color(PALETTE_GREEN),
                    );
                }
                Some(Err(message)) => error_label(ui, message),
                None => {}
            }
        }
    });

    ui.horizontal(|ui| {
        if ui
            .add_enabled(panel.is_dirty(), egui::Button::new("💾 Save Changes"))
            .clicked()
        {
            *notice = Some(panel.save().message().to_string());
        }
        if ui
            .add_enabled(panel.is_dirty(), egui::Button::new("Cancel"))
            .clicked()
        {
            panel.discard();
        }
    });
}

fn account_tab(ui: &mut Ui, panel: &mut SettingsPanel, notice: &mut Option<String>) {
    let draft = &mut panel.draft;
    egui::Grid::new("account_fields")
        .num_columns(2)
        .spacing([16., 6.])
        .show(ui, |ui| {
            ui.label("Full Name");
            ui.text_edit_singleline(&mut draft.name);
            ui.end_row();
            ui.label("Email");
            ui.text_edit_singleline(&mut draft.email);
            ui.end_row();
        });

    ui.add_space(8.);
    ui.label(RichText::new("Change Password").strong());
    for (value, hint) in [
        (&mut draft.current_password, "Current password"),
        (&mut draft.new_password, "New password"),
        (&mut draft.confirm_password, "Confirm new password"),
    ] {
        ui.add(TextEdit::singleline(value).hint_text(hint).password(true));
    }

    if ui.button("Update Password").clicked()
        && let Ok(outcome) = panel.update_password()
    {
        *notice = Some(outcome.message().to_string());
    }
    match panel.password_status() {
        Some(Ok(())) => {
            ui.label(RichText::new("✔ Password updated").color(PALETTE_GREEN));
        }
        Some(Err(message)) => error_label(ui, message),
        None => {}
    }

    ui.add_space(8.);
    ui.label(RichText::new("Your Data").strong());
    ui.horizontal(|ui| {
        let mut outcome = None;
        if ui.button("⬇ Download My Data").clicked() {
            outcome = Some(panel.download_data());
        }
        if ui.button("🗑 Clear Practice Data").clicked() {
            outcome = Some(panel.clear_data());
        }
        if ui.button("⚠ Delete Account").clicked() {
            outcome = Some(panel.delete_account());
        }
        if let Some(outcome) = outcome {
            *notice = Some(outcome.message().to_string());
        }
    });
    ui.label(
        RichText::new("Nothing is stored on a server, so these actions have no effect")
            .small()
            .color(PALETTE_SLATE),
    );
}
