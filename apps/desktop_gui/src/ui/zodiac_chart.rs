//! Symbolic zodiac wheel with the user's sign highlighted.

use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Pos2, Shape, Stroke};
use shared::domain::{Language, ZodiacSign};

use crate::ui::theme;

const SEGMENT_ANGLE: f32 = TAU / 12.0;
/// Radial depth of the label band, as a fraction of the wheel radius.
const BAND_FRACTION: f32 = 0.25;
const STAR_POINTS: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct WheelSegment {
    pub sign: ZodiacSign,
    /// Screen angle (radians, y down) where the segment begins.
    pub start_angle: f32,
    /// Divider from the inner edge of the label band to the rim.
    pub divider: (Pos2, Pos2),
    pub label_anchor: Pos2,
    pub highlighted: bool,
}

fn polar(center: Pos2, angle: f32, radius: f32) -> Pos2 {
    center + egui::vec2(angle.cos(), angle.sin()) * radius
}

/// Twelve segments in wheel order, Aries starting at the top and running clockwise.
pub fn wheel_layout(current: Option<ZodiacSign>, center: Pos2, radius: f32) -> Vec<WheelSegment> {
    let band = radius * BAND_FRACTION;
    ZodiacSign::ALL
        .iter()
        .enumerate()
        .map(|(index, &sign)| {
            let start_angle = index as f32 * SEGMENT_ANGLE - FRAC_PI_2;
            WheelSegment {
                sign,
                start_angle,
                divider: (
                    polar(center, start_angle, radius - band),
                    polar(center, start_angle, radius),
                ),
                label_anchor: polar(center, start_angle + SEGMENT_ANGLE / 2.0, radius - band / 2.0),
                highlighted: current == Some(sign),
            }
        })
        .collect()
}

/// Eight-point star outline alternating between the outer and inner radius.
pub fn center_star(center: Pos2, outer: f32, inner: f32) -> Vec<Pos2> {
    (0..STAR_POINTS)
        .map(|i| {
            let angle = i as f32 * TAU / STAR_POINTS as f32;
            polar(center, angle, if i % 2 == 0 { outer } else { inner })
        })
        .collect()
}

pub fn show(ui: &mut egui::Ui, current: Option<ZodiacSign>, language: Language, size: f32) {
    theme::card_frame().show(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new("The sky at the moment of your birth")
                    .size(18.0)
                    .color(theme::MUTED_TEXT),
            );
            let (response, painter) =
                ui.allocate_painter(egui::vec2(size, size), egui::Sense::hover());
            paint_wheel(&painter, response.rect, current, language);
            ui.small(
                egui::RichText::new("A symbolic rendering of the signs, not an ephemeris.")
                    .italics()
                    .color(theme::MUTED_TEXT),
            );
        });
    });
}

fn paint_wheel(
    painter: &egui::Painter,
    rect: egui::Rect,
    current: Option<ZodiacSign>,
    language: Language,
) {
    let center = rect.center();
    let radius = rect.width().min(rect.height()) / 2.0 - 8.0;
    let inner = radius * (1.0 - BAND_FRACTION);

    painter.circle_stroke(center, radius, Stroke::new(2.0, theme::CARD_STROKE));
    painter.circle_stroke(center, inner, Stroke::new(1.0, theme::CARD_STROKE));

    for segment in wheel_layout(current, center, radius) {
        painter.line_segment(
            [segment.divider.0, segment.divider.1],
            Stroke::new(1.0, theme::ACCENT.gamma_multiply(0.4)),
        );
        let (color, size) = if segment.highlighted {
            (theme::HIGHLIGHT, 13.0)
        } else {
            (theme::MUTED_TEXT, 10.0)
        };
        painter.text(
            segment.label_anchor,
            egui::Align2::CENTER_CENTER,
            segment.sign.name(language),
            egui::FontId::proportional(size),
            color,
        );
    }

    let star = center_star(center, radius * 0.19, radius * 0.095);
    for (i, point) in star.iter().enumerate() {
        let next = star[(i + 1) % star.len()];
        painter.add(Shape::convex_polygon(
            vec![center, *point, next],
            theme::STAR,
            Stroke::NONE,
        ));
    }
    painter.add(Shape::closed_line(star, Stroke::new(1.0, theme::STAR)));
}
