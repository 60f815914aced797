//! Birth data entry form.

use eframe::egui;
use shared::domain::UserInfo;

use crate::ui::theme;

/// Raw text buffers for the form. Nothing is parsed until submit.
#[derive(Debug, Default, Clone)]
pub struct BirthForm {
    pub name: String,
    pub birth_date: String,
    pub birth_time: String,
    pub birth_location: String,
    validation: Option<String>,
}

impl BirthForm {
    /// Emits a `UserInfo` only when name and date are present and every given field parses.
    pub fn try_submit(&mut self) -> Option<UserInfo> {
        match UserInfo::from_form(
            &self.name,
            &self.birth_date,
            &self.birth_time,
            &self.birth_location,
        ) {
            Ok(user) => {
                self.validation = None;
                Some(user)
            }
            Err(err) => {
                tracing::debug!(field = err.field(), "form rejected: {err}");
                self.validation = Some(capitalize(&err.to_string()));
                None
            }
        }
    }

    pub fn validation(&self) -> Option<&str> {
        self.validation.as_deref()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Draws the form and returns a user when it was submitted successfully.
    pub fn show(&mut self, ui: &mut egui::Ui) -> Option<UserInfo> {
        let mut submitted = None;
        theme::card_frame().show(ui, |ui| {
            ui.style_mut().spacing.item_spacing = egui::vec2(10.0, 10.0);
            ui.heading("Your birth chart");
            ui.weak("The stars need a name and a date. Time and place sharpen the reading.");
            ui.add_space(6.0);

            let mut enter_pressed = false;
            for (label, hint, buffer) in [
                ("Name", "What should the stars call you?", &mut self.name),
                ("Birth date", "YYYY-MM-DD", &mut self.birth_date),
                ("Birth time (optional)", "HH:MM", &mut self.birth_time),
                ("Birth place (optional)", "City", &mut self.birth_location),
            ] {
                ui.label(egui::RichText::new(label).strong());
                let response = ui.add(
                    egui::TextEdit::singleline(buffer)
                        .hint_text(hint)
                        .desired_width(f32::INFINITY),
                );
                enter_pressed |= response.lost_focus()
                    && ui.input(|input| input.key_pressed(egui::Key::Enter));
            }

            if let Some(message) = &self.validation {
                ui.colored_label(theme::ERROR_STROKE, message);
            }

            ui.add_space(6.0);
            let button = egui::Button::new(egui::RichText::new("Reveal my stars").strong().size(16.0))
                .fill(theme::ACCENT)
                .min_size(egui::vec2(ui.available_width(), 40.0));
            if ui.add(button).clicked() || enter_pressed {
                submitted = self.try_submit();
            }
        });
        submitted
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
