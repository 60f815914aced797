//! Horoscope and natal analysis sections of a finished reading.

use eframe::egui;
use shared::protocol::HoroscopePrediction;

use crate::ui::theme;

pub fn greeting(name: &str) -> String {
    format!("Your stars today, {name}")
}

/// Secondary sections in display order.
pub fn life_sections(prediction: &HoroscopePrediction) -> [(&'static str, &str); 3] {
    [
        ("In love", prediction.love.as_str()),
        ("Money and work", prediction.career.as_str()),
        ("Health", prediction.health.as_str()),
    ]
}

pub fn show_prediction(ui: &mut egui::Ui, name: &str, prediction: &HoroscopePrediction) {
    theme::card_frame().show(ui, |ui| {
        ui.heading(greeting(name));
        ui.add_space(6.0);
        ui.label(egui::RichText::new(&prediction.daily).size(16.0));
        ui.add_space(10.0);
        egui::Frame::NONE
            .fill(theme::BACKGROUND)
            .corner_radius(10.0)
            .stroke(egui::Stroke::new(1.0, theme::STAR.gamma_multiply(0.4)))
            .inner_margin(egui::Margin::symmetric(14, 12))
            .show(ui, |ui| {
                ui.label(egui::RichText::new("Wisdom of the stars").strong().color(theme::STAR));
                ui.label(egui::RichText::new(&prediction.astrological_advice).italics());
            });
    });

    ui.add_space(8.0);
    ui.columns(3, |columns| {
        for (column, (title, body)) in columns.iter_mut().zip(life_sections(prediction)) {
            theme::card_frame().show(column, |ui| {
                ui.label(egui::RichText::new(title).strong().size(17.0));
                ui.label(egui::RichText::new(body).color(theme::MUTED_TEXT));
            });
        }
    });
}

pub fn show_natal(ui: &mut egui::Ui, paragraphs: &[&str]) {
    theme::card_frame().show(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.small(egui::RichText::new("SECRET ARCHIVES").color(theme::ACCENT));
            ui.heading("Your deep natal map");
        });
        ui.add_space(8.0);
        for paragraph in paragraphs {
            ui.label(egui::RichText::new(*paragraph).size(15.0));
            ui.add_space(6.0);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greets_by_name_and_orders_sections() {
        assert_eq!(greeting("Lina"), "Your stars today, Lina");
        let prediction = HoroscopePrediction {
            daily: "d".into(),
            love: "l".into(),
            career: "c".into(),
            health: "h".into(),
            astrological_advice: "a".into(),
        };
        let bodies: Vec<_> = life_sections(&prediction).iter().map(|(_, body)| *body).collect();
        assert_eq!(bodies, ["l", "c", "h"]);
    }
}
