use egui::{Align, Layout, RichText};

use prepvista::navigation::SectionId;
use prepvista::panels::Panel;

use super::{
    PALETTE_INK, PALETTE_SLATE, PALETTE_WHITE, PrepVistaApp, account_view, analysis_view,
    catalog_view, interview_view,
};

const SIDEBAR_WIDTH: f32 = 210.;
const SIDEBAR_COLLAPSED_WIDTH: f32 = 52.;

impl PrepVistaApp {
    pub(crate) fn layout_view(&mut self, ctx: &egui::Context) {
        let mut sign_out = false;
        let collapsed = &mut self.app_config.sidebar_collapsed;
        let notice = &mut self.notice;
        let Some((workspace, app_ctx)) = self.shell.workspace_mut() else {
            return;
        };

        egui::TopBottomPanel::top("navbar")
            .min_height(44.)
            .show(ctx, |ui| {
                ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                    if ui.button(if *collapsed { "☰" } else { "✖" }).clicked() {
                        *collapsed = !*collapsed;
                    }
                    ui.label(
                        RichText::new(" P ")
                            .strong()
                            .color(PALETTE_WHITE)
                            .background_color(PALETTE_INK),
                    );
                    ui.label(RichText::new("PrepVista").size(20.).strong().color(PALETTE_INK));

                    if let Some(message) = notice.as_deref() {
                        ui.separator();
                        ui.label(RichText::new(message).color(PALETTE_SLATE));
                        if ui.small_button("✖").clicked() {
                            *notice = None;
                        }
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button("Sign out").clicked() {
                            sign_out = true;
                        }
                        let user = workspace.user();
                        ui.vertical(|ui| {
                            ui.label(RichText::new(&user.name).strong());
                            if let Some(university) = &user.university {
                                ui.label(RichText::new(university).small().color(PALETTE_SLATE));
                            }
                        });
                    });
                });
            });

        egui::SidePanel::left("sidebar")
            .resizable(false)
            .exact_width(if *collapsed {
                SIDEBAR_COLLAPSED_WIDTH
            } else {
                SIDEBAR_WIDTH
            })
            .show(ctx, |ui| {
                ui.add_space(8.);
                for section in SectionId::ALL {
                    let text = if *collapsed {
                        section.icon().to_string()
                    } else {
                        format!("{}  {}", section.icon(), section.label())
                    };
                    let active = workspace.active_section() == section;
                    let response = ui
                        .add_sized(
                            [ui.available_width(), 30.],
                            egui::Button::selectable(active, RichText::new(text).size(15.)),
                        )
                        .on_hover_text(section.label());
                    if response.clicked() {
                        workspace.navigate(section, app_ctx);
                    }
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let devices = app_ctx.devices.as_mut();
                    let goto = match workspace.panel_mut() {
                        Panel::Dashboard(panel) => catalog_view::dashboard_view(ui, panel),
                        Panel::Resume(panel) => {
                            analysis_view::resume_view(ui, panel, notice);
                            None
                        }
                        Panel::Video(panel) => {
                            analysis_view::video_view(ui, panel, devices, notice);
                            None
                        }
                        Panel::Interview(panel) => {
                            interview_view::interview_view(ui, panel, devices, notice);
                            None
                        }
                        Panel::Reports(panel) => {
                            catalog_view::reports_view(ui, panel, notice);
                            None
                        }
                        Panel::Library(panel) => {
                            catalog_view::library_view(ui, panel);
                            None
                        }
                        Panel::Help(panel) => {
                            catalog_view::help_view(ui, panel);
                            None
                        }
                        Panel::Profile(panel) => {
                            account_view::profile_view(ui, panel, notice);
                            None
                        }
                        Panel::Settings(panel) => {
                            account_view::settings_view(ui, panel, devices, notice);
                            None
                        }
                    };
                    if let Some(section) = goto {
                        workspace.navigate(section, app_ctx);
                    }
                });
        });

        if sign_out {
            self.shell.sign_out();
            self.auth_form = Default::default();
        }
    }
}
