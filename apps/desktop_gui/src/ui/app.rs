//! Application shell: drains backend events into the session state and picks the view for its phase.

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::Language;

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{
        events::UiEvent,
        orchestration::{reset_reading, start_reading},
        reducer::{Phase, SessionState},
    },
    ui::{
        artwork_card::ArtworkCard, birth_form::BirthForm, profile_card, results, theme,
        zodiac_chart,
    },
};

const CONTENT_WIDTH: f32 = 960.0;
const CHART_SIZE: f32 = 400.0;

pub struct OracleApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    language: Language,
    state: SessionState,
    form: BirthForm,
    artwork: ArtworkCard,
    status: String,
    tick: u64,
}

impl OracleApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        language: Language,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            language,
            state: SessionState::default(),
            form: BirthForm::default(),
            artwork: ArtworkCard::default(),
            status: "Starting backend worker...".to_string(),
            tick: 0,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => {
                    if err.is_retryable() {
                        tracing::warn!(context = ?err.context(), category = ?err.category(), "{}", err.message());
                    } else {
                        tracing::error!(context = ?err.context(), category = ?err.category(), "{}", err.message());
                    }
                    self.status = err.status_line();
                }
                UiEvent::AnalysisCompleted { session, report } => {
                    if self.state.complete(session, report) {
                        self.status = "The stars have spoken".to_string();
                    }
                }
                UiEvent::AnalysisFailed { session, message } => {
                    if !self.state.fail(session, message) {
                        tracing::debug!(%session, current = ?self.state.current_session(), "dropped stale failure");
                    }
                }
            }
        }
    }

    fn reset(&mut self) {
        reset_reading(&mut self.state, &self.cmd_tx, &mut self.status);
        self.artwork.clear();
        self.form.clear();
    }

    fn show_header(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.small(
                egui::RichText::new("CELESTIAL INTELLIGENCE ENGINE")
                    .color(theme::ACCENT),
            );
            ui.label(egui::RichText::new("Star Oracle").size(48.0).strong());
            ui.label(
                egui::RichText::new(
                    "We read the language of the heavens to chart your spiritual path.",
                )
                .color(theme::MUTED_TEXT),
            );
            ui.add_space(24.0);
        });
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.set_width(ui.available_width().min(520.0));
            if let Some(user) = self.form.show(ui) {
                start_reading(
                    &mut self.state,
                    &self.cmd_tx,
                    user,
                    self.language,
                    &mut self.status,
                );
            }
        });
    }

    fn show_loading(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.add(egui::Spinner::new().size(64.0));
            ui.add_space(16.0);
            ui.heading("Reading the celestial tablets...");
            ui.label(
                egui::RichText::new("Linking your birth date to the movement of the planets")
                    .color(theme::MUTED_TEXT),
            );
        });
    }

    fn show_error(&mut self, ui: &mut egui::Ui, message: &str) {
        let mut try_again = false;
        ui.vertical_centered(|ui| {
            ui.set_width(ui.available_width().min(460.0));
            ui.add_space(40.0);
            egui::Frame::NONE
                .fill(theme::ERROR_FILL)
                .corner_radius(14.0)
                .stroke(egui::Stroke::new(1.0, theme::ERROR_STROKE))
                .inner_margin(egui::Margin::symmetric(20, 18))
                .show(ui, |ui| {
                    ui.label(egui::RichText::new("⚠").size(28.0).color(theme::ERROR_STROKE));
                    ui.label(egui::RichText::new(message).size(16.0));
                    ui.add_space(10.0);
                    try_again = ui.button("Try again").clicked();
                });
        });
        if try_again {
            self.reset();
        }
    }

    fn show_reading(&mut self, ui: &mut egui::Ui) {
        let (Some(user), Some(sign), Some(prediction)) = (
            self.state.user().cloned(),
            self.state.sign(),
            self.state.prediction().cloned(),
        ) else {
            return;
        };

        ui.vertical_centered(|ui| {
            if ui.button("✨ Read another soul").clicked() {
                self.reset();
            }
        });
        if self.state.phase() != Phase::Success {
            return;
        }
        ui.add_space(12.0);

        let image = self.state.zodiac_image().map(str::to_string);
        let mut artwork_shown = false;
        ui.columns(2, |columns| {
            profile_card::show(&mut columns[0], sign, self.language);
            if let Some(url) = &image {
                artwork_shown = self.artwork.show(&mut columns[1], url, sign, self.language);
            }
            if !artwork_shown {
                zodiac_chart::show(&mut columns[1], Some(sign), self.language, CHART_SIZE);
            }
        });

        ui.add_space(12.0);
        results::show_prediction(ui, &user.name, &prediction);
        ui.add_space(12.0);
        results::show_natal(ui, &self.state.natal_paragraphs());

        if artwork_shown {
            ui.add_space(12.0);
            ui.vertical_centered(|ui| {
                ui.set_width(CHART_SIZE + 60.0);
                zodiac_chart::show(ui, Some(sign), self.language, CHART_SIZE);
            });
        }
    }

    fn show_status_line(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_line").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.small("Status:");
                ui.small(egui::RichText::new(&self.status).weak());
            });
        });
    }
}

impl eframe::App for OracleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.tick = self.tick.wrapping_add(1);
        if self.tick == 1 {
            theme::apply(ctx);
        }

        self.process_ui_events();
        self.show_status_line(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(CONTENT_WIDTH);
                    self.show_header(ui);
                    match self.state.phase() {
                        Phase::Idle => self.show_form(ui),
                        Phase::Loading => self.show_loading(ui),
                        Phase::Failed => {
                            let message = self.state.error().unwrap_or_default().to_string();
                            self.show_error(ui, &message);
                        }
                        Phase::Success => self.show_reading(ui),
                    }
                });
            });
        });

        if self.state.is_loading() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }
}
