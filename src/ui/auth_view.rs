use egui::{Align, Layout, RichText, TextEdit};

use prepvista::session::{AuthMode, SignUpRequest};

use super::{PALETTE_INK, PALETTE_SLATE, PrepVistaApp, card};

const FORM_WIDTH: f32 = 360.;

#[derive(Default)]
pub(crate) struct AuthForm {
    email: String,
    password: String,
    signup: SignUpRequest,
    show_password: bool,
    accept_terms: bool,
}

impl PrepVistaApp {
    pub(crate) fn auth_view(&mut self, ctx: &egui::Context) {
        let auth = &mut self.shell.auth;
        let form = &mut self.auth_form;
        let pending = auth.is_pending();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.with_layout(Layout::top_down(Align::Center), |ui| {
                ui.add_space(60.);
                ui.set_max_width(FORM_WIDTH);
                ui.label(RichText::new("PrepVista").size(32.).strong().color(PALETTE_INK));

                card(ui, |ui| match auth.mode() {
                    AuthMode::Login => {
                        ui.label(RichText::new("Welcome back").size(20.).strong());
                        ui.label(RichText::new("Sign in to continue practising").color(PALETTE_SLATE));
                        ui.add_space(8.);
                        ui.add(TextEdit::singleline(&mut form.email).hint_text("Email Address"));
                        ui.add(
                            TextEdit::singleline(&mut form.password)
                                .hint_text("Password")
                                .password(!form.show_password),
                        );
                        ui.checkbox(&mut form.show_password, "Show password");
                        ui.add_space(8.);

                        let label = if pending { "Signing in..." } else { "Sign In" };
                        if ui.add_enabled(!pending, egui::Button::new(label)).clicked() {
                            auth.submit_login(&form.email, &form.password);
                        }
                        if pending {
                            ui.spinner();
                        }
                        ui.separator();
                        ui.horizontal(|ui| {
                            ui.label("Don't have an account?");
                            if ui.link("Sign up").clicked() {
                                auth.switch_mode(AuthMode::SignUp);
                            }
                        });
                    }
                    AuthMode::SignUp => {
                        ui.label(RichText::new("Create your account").size(20.).strong());
                        ui.add_space(8.);
                        let request = &mut form.signup;
                        ui.add(TextEdit::singleline(&mut request.name).hint_text("Full Name"));
                        ui.add(TextEdit::singleline(&mut request.email).hint_text("Email Address"));
                        ui.add(TextEdit::singleline(&mut request.university).hint_text("University"));
                        ui.add(TextEdit::singleline(&mut request.course).hint_text("Course/Major"));
                        ui.add(
                            TextEdit::singleline(&mut request.password)
                                .hint_text("Password")
                                .password(!form.show_password),
                        );
                        ui.checkbox(&mut form.show_password, "Show password");
                        ui.checkbox(
                            &mut form.accept_terms,
                            "I agree to the Terms of Service and Privacy Policy",
                        );
                        ui.add_space(8.);

                        let label = if pending { "Creating account..." } else { "Create Account" };
                        if ui
                            .add_enabled(form.accept_terms && !pending, egui::Button::new(label))
                            .clicked()
                        {
                            auth.submit_signup(form.signup.clone(), form.accept_terms);
                        }
                        if pending {
                            ui.spinner();
                        }
                        ui.separator();
                        ui.horizontal(|ui| {
                            ui.label("Already have an account?");
                            if ui.link("Sign in").clicked() {
                                auth.switch_mode(AuthMode::Login);
                            }
                        });
                    }
                });
            });
        });
    }
}
