mod account_view;
mod analysis_view;
mod auth_view;
mod catalog_view;
mod interview_view;
mod layout;

use std::time::{Duration, Instant};

use egui::{Color32, RichText, Ui, Visuals, style::Widgets};
use log::error;

use prepvista::Shell;
use prepvista::config::AppConfig;
use prepvista::panels::ScoreBand;

use auth_view::AuthForm;

pub(crate) const PALETTE_INK: Color32 = Color32::from_rgb(17, 24, 39);
pub(crate) const PALETTE_SLATE: Color32 = Color32::from_rgb(75, 85, 99);
pub(crate) const PALETTE_MIST: Color32 = Color32::from_rgb(243, 244, 246);
pub(crate) const PALETTE_WHITE: Color32 = Color32::from_rgb(255, 255, 255);
pub(crate) const PALETTE_GREEN: Color32 = Color32::from_rgb(22, 163, 74);
pub(crate) const PALETTE_YELLOW: Color32 = Color32::from_rgb(202, 138, 4);
pub(crate) const PALETTE_RED: Color32 = Color32::from_rgb(220, 38, 38);
pub(crate) const PALETTE_BLUE: Color32 = Color32::from_rgb(37, 99, 235);

// timers only need to be sampled a few times a second
const REPAINT_INTERVAL_MS: u64 = 100;

pub struct PrepVistaApp {
    shell: Shell,
    app_config: AppConfig,
    auth_form: AuthForm,
    notice: Option<String>,
    last_frame: Instant,
}

impl PrepVistaApp {
    pub fn new(shell: Shell, app_config: AppConfig, cc: &eframe::CreationContext<'_>) -> Self {
        let default_visuals = Visuals {
            dark_mode: false,
            hyperlink_color: PALETTE_BLUE,
            faint_bg_color: PALETTE_MIST,
            extreme_bg_color: PALETTE_WHITE,
            panel_fill: PALETTE_WHITE,
            window_fill: PALETTE_WHITE,
            button_frame: true,
            widgets: Widgets::light(),
            striped: true,
            ..Visuals::light()
        };
        cc.egui_ctx.set_visuals(default_visuals);

        Self {
            shell,
            app_config,
            auth_form: AuthForm::default(),
            notice: None,
            last_frame: Instant::now(),
        }
    }
}

impl eframe::App for PrepVistaApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.shell.shutdown();
        if let Err(e) = self.app_config.save() {
            error!("Error while saving config file: {}", e);
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.shell.advance(elapsed);

        if let Some(rect) = ctx.input(|i| i.viewport().inner_rect) {
            self.app_config.window_size.width = rect.width();
            self.app_config.window_size.height = rect.height();
        }

        if self.shell.is_authenticated() {
            self.layout_view(ctx);
        } else {
            self.auth_view(ctx);
        }

        ctx.request_repaint_after(Duration::from_millis(REPAINT_INTERVAL_MS));
    }
}

pub(crate) fn score_color(score: u8) -> Color32 {
    match ScoreBand::from_score(score) {
        ScoreBand::Good => PALETTE_GREEN,
        ScoreBand::Fair => PALETTE_YELLOW,
        ScoreBand::Poor => PALETTE_RED,
    }
}

pub(crate) fn page_header(ui: &mut Ui, title: &str, subtitle: &str) {
    ui.label(RichText::new(title).size(26.).strong().color(PALETTE_INK));
    ui.label(RichText::new(subtitle).color(PALETTE_SLATE));
    ui.add_space(12.);
}

pub(crate) fn card<R>(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> R {
    egui::Frame::group(ui.style())
        .fill(PALETTE_WHITE)
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui)
        })
        .inner
}

pub(crate) fn bullet_list(ui: &mut Ui, items: &[String], marker: &str, color: Color32) {
    for item in items {
        ui.horizontal_wrapped(|ui| {
            ui.label(RichText::new(marker).color(color));
            ui.label(item);
        });
    }
}

/// Label, value and a 0..=100 bar on one row.
pub(crate) fn metric_bar(ui: &mut Ui, label: &str, value: f64) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(format!("{value:.0}%"));
        });
    });
    ui.add(
        egui::ProgressBar::new((value / 100.).clamp(0., 1.) as f32)
            .fill(score_color(value.round().clamp(0., 100.) as u8)),
    );
}

pub(crate) fn error_label(ui: &mut Ui, message: &str) {
    ui.label(RichText::new(format!("⚠ {message}")).color(PALETTE_RED));
}
