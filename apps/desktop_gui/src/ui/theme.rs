//! Night-sky palette and the shared card frame.

use eframe::egui;

pub const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(12, 10, 29);
pub const CARD_FILL: egui::Color32 = egui::Color32::from_rgb(26, 22, 48);
pub const CARD_STROKE: egui::Color32 = egui::Color32::from_rgb(60, 48, 96);
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(147, 51, 234);
pub const HIGHLIGHT: egui::Color32 = egui::Color32::from_rgb(244, 114, 182);
pub const MUTED_TEXT: egui::Color32 = egui::Color32::from_rgb(148, 163, 184);
pub const STAR: egui::Color32 = egui::Color32::from_rgb(253, 224, 71);
pub const ERROR_FILL: egui::Color32 = egui::Color32::from_rgb(69, 10, 10);
pub const ERROR_STROKE: egui::Color32 = egui::Color32::from_rgb(239, 68, 68);

pub fn card_frame() -> egui::Frame {
    egui::Frame::NONE
        .fill(CARD_FILL)
        .corner_radius(14.0)
        .stroke(egui::Stroke::new(1.0, CARD_STROKE))
        .inner_margin(egui::Margin::symmetric(20, 18))
}

pub fn apply(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = BACKGROUND;
    visuals.window_fill = CARD_FILL;
    visuals.selection.bg_fill = ACCENT;
    visuals.hyperlink_color = HIGHLIGHT;
    ctx.set_visuals(visuals);
}

const FALLBACK_FONT: &str = "arabic-fallback";

/// System fonts with Arabic coverage, tried in order. egui's bundled fonts have none.
const FALLBACK_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/noto/NotoNaskhArabic-Regular.ttf",
    "/usr/share/fonts/noto/NotoNaskhArabic-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSansArabic-Regular.ttf",
    "/usr/share/fonts/noto/NotoSansArabic-Regular.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/GeezaPro.ttc",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Default font set with the first readable candidate appended to both families.
pub fn fallback_fonts(
    candidates: &[&str],
    read: impl Fn(&str) -> Option<Vec<u8>>,
) -> Option<egui::FontDefinitions> {
    let (path, data) = candidates
        .iter()
        .find_map(|&path| read(path).map(|data| (path, data)))?;

    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert(FALLBACK_FONT.to_owned(), egui::FontData::from_owned(data).into());
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        if let Some(names) = fonts.families.get_mut(&family) {
            names.push(FALLBACK_FONT.to_owned());
        }
    }
    tracing::info!(path, "loaded fallback font for Arabic glyphs");
    Some(fonts)
}

/// Installs a system font that covers Arabic sign names. Returns `false` when none was found.
pub fn install_fonts(ctx: &egui::Context) -> bool {
    match fallback_fonts(FALLBACK_FONT_PATHS, |path| std::fs::read(path).ok()) {
        Some(fonts) => {
            ctx.set_fonts(fonts);
            true
        }
        None => {
            tracing::warn!("no system font with Arabic glyphs found, Arabic text will not render");
            false
        }
    }
}
