//! Sign profile: symbol, dates, element, ruler and compatible signs.

use eframe::egui;
use shared::domain::{Language, ZodiacSign};

use crate::ui::theme;

/// `(label, value)` rows shown under the sign heading.
pub fn profile_facts(sign: ZodiacSign) -> Vec<(&'static str, String)> {
    let data = sign.data();
    let lucky_numbers = data
        .lucky_numbers
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(" · ");
    vec![
        ("Element", data.element.label().to_string()),
        ("Ruler", data.ruler.to_string()),
        ("Modality", data.modality.label().to_string()),
        ("Lucky numbers", lucky_numbers),
        ("Lucky color", data.lucky_color.to_string()),
    ]
}

/// Date span shown under the sign name, taken from the metadata table.
pub fn date_label(sign: ZodiacSign) -> &'static str {
    sign.data().date_range
}

pub fn show(ui: &mut egui::Ui, sign: ZodiacSign, language: Language) {
    let data = sign.data();
    theme::card_frame().show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(data.symbol).size(64.0));
            ui.vertical(|ui| {
                ui.small(
                    egui::RichText::new("SUN SIGN")
                        .strong()
                        .color(theme::ACCENT),
                );
                ui.label(egui::RichText::new(sign.name(language)).size(36.0).strong());
                ui.label(egui::RichText::new(date_label(sign)).color(theme::MUTED_TEXT));
            });
        });
        ui.add_space(10.0);

        egui::Grid::new(("profile-facts", sign))
            .num_columns(2)
            .spacing(egui::vec2(16.0, 6.0))
            .show(ui, |ui| {
                for (label, value) in profile_facts(sign) {
                    ui.label(egui::RichText::new(label).color(theme::MUTED_TEXT));
                    ui.label(egui::RichText::new(value).strong());
                    ui.end_row();
                }
            });
        ui.add_space(10.0);

        ui.label(
            egui::RichText::new(format!("\u{201c}{}\u{201d}", data.description))
                .italics()
                .size(15.0),
        );
        ui.add_space(10.0);
        ui.separator();
        ui.small(egui::RichText::new("Kindred spirits").strong().color(theme::MUTED_TEXT));
        ui.horizontal_wrapped(|ui| {
            for other in data.compatibility {
                ui.label(
                    egui::RichText::new(format!("{} {}", other.symbol(), other.name(language)))
                        .background_color(theme::BACKGROUND),
                );
            }
        });
    });
}
