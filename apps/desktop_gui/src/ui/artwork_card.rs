//! Generated artwork card. Decoded textures are cached per data URL.

use client_core::{decode_data_url, image::DataUrlError};
use eframe::egui;
use shared::domain::{Language, ZodiacSign};

use crate::ui::theme;

const MAX_ARTWORK_EDGE: u32 = 768;

#[derive(Debug)]
pub enum ArtworkError {
    DataUrl(DataUrlError),
    Image(image::ImageError),
}

impl std::fmt::Display for ArtworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtworkError::DataUrl(err) => write!(f, "artwork payload: {err}"),
            ArtworkError::Image(err) => write!(f, "artwork image: {err}"),
        }
    }
}

pub fn caption(sign: ZodiacSign, language: Language) -> String {
    match language {
        Language::English => format!("In praise of {}", sign.name(language)),
        Language::Arabic => format!("تمجيد برج {}", sign.name(language)),
    }
}

/// Decodes a `data:` URL into pixels, scaled down so the longest edge fits the card.
pub fn decode_artwork(url: &str) -> Result<egui::ColorImage, ArtworkError> {
    let payload = decode_data_url(url).map_err(ArtworkError::DataUrl)?;
    let decoded = image::load_from_memory(&payload.bytes).map_err(ArtworkError::Image)?;
    let decoded = if decoded.width().max(decoded.height()) > MAX_ARTWORK_EDGE {
        decoded.resize(
            MAX_ARTWORK_EDGE,
            MAX_ARTWORK_EDGE,
            image::imageops::FilterType::Triangle,
        )
    } else {
        decoded
    };
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

enum CachedArtwork {
    Ready(egui::TextureHandle),
    Failed,
}

#[derive(Default)]
pub struct ArtworkCard {
    cache: Option<(String, CachedArtwork)>,
}

impl ArtworkCard {
    fn texture(&mut self, ctx: &egui::Context, url: &str) -> Option<egui::TextureHandle> {
        let stale = !matches!(&self.cache, Some((cached, _)) if cached == url);
        if stale {
            let entry = match decode_artwork(url) {
                Ok(pixels) => CachedArtwork::Ready(ctx.load_texture(
                    "zodiac-artwork",
                    pixels,
                    egui::TextureOptions::LINEAR,
                )),
                Err(err) => {
                    tracing::warn!("falling back to the chart: {err}");
                    CachedArtwork::Failed
                }
            };
            self.cache = Some((url.to_string(), entry));
        }
        match self.cache.as_ref() {
            Some((_, CachedArtwork::Ready(texture))) => Some(texture.clone()),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.cache = None;
    }

    /// Draws the artwork. Returns `false` when it could not be decoded so the caller can show the chart.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        url: &str,
        sign: ZodiacSign,
        language: Language,
    ) -> bool {
        let Some(texture) = self.texture(ui.ctx(), url) else {
            return false;
        };
        theme::card_frame().show(ui, |ui| {
            ui.vertical_centered(|ui| {
                let edge = ui.available_width().min(520.0);
                ui.add(egui::Image::new(&texture).fit_to_exact_size(egui::vec2(edge, edge)));
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new(caption(sign, language))
                        .size(24.0)
                        .color(theme::HIGHLIGHT),
                );
                ui.small(
                    egui::RichText::new("An artistic vision inspired by the stars at your birth")
                        .italics()
                        .color(theme::MUTED_TEXT),
                );
            });
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use std::io::Cursor;

    fn png_data_url(width: u32, height: u32) -> String {
        let pixels = image::RgbaImage::from_pixel(width, height, image::Rgba([147, 51, 234, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(pixels)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .expect("encode png");
        format!("data:image/png;base64,{}", STANDARD.encode(bytes))
    }

    #[test]
    fn decodes_png_data_url_into_pixels() {
        let image = decode_artwork(&png_data_url(4, 2)).expect("decoded");
        assert_eq!(image.size, [4, 2]);
        assert_eq!(image.pixels[0], egui::Color32::from_rgb(147, 51, 234));
    }

    #[test]
    fn large_artwork_is_scaled_to_fit() {
        let image = decode_artwork(&png_data_url(1024, 512)).expect("decoded");
        assert_eq!(image.size, [768, 384]);
    }

    #[test]
    fn undecodable_payloads_are_errors() {
        assert!(matches!(
            decode_artwork("https://example.com/leo.png"),
            Err(ArtworkError::DataUrl(_))
        ));
        let garbage = format!("data:image/png;base64,{}", STANDARD.encode(b"not an image"));
        assert!(matches!(
            decode_artwork(&garbage),
            Err(ArtworkError::Image(_))
        ));
    }

    #[test]
    fn caption_names_the_sign() {
        assert_eq!(caption(ZodiacSign::Leo, Language::English), "In praise of Leo");
        assert!(caption(ZodiacSign::Leo, Language::Arabic).contains(ZodiacSign::Leo.arabic_name()));
    }
}
