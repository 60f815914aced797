use serde::{Deserialize, Serialize};

use crate::domain::ZodiacSign;

/// Wire field names of the structured horoscope, in schema order.
pub const PREDICTION_FIELDS: [&str; 5] = ["daily", "love", "career", "health", "astrologicalAdvice"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoroscopePrediction {
    pub daily: String,
    pub love: String,
    pub career: String,
    pub health: String,
    pub astrological_advice: String,
}

impl HoroscopePrediction {
    /// Returns the wire name of the first blank field, if any.
    pub fn first_empty_field(&self) -> Option<&'static str> {
        [
            &self.daily,
            &self.love,
            &self.career,
            &self.health,
            &self.astrological_advice,
        ]
        .into_iter()
        .zip(PREDICTION_FIELDS)
        .find(|(value, _)| value.trim().is_empty())
        .map(|(_, field)| field)
    }
}

/// Merged outcome of one successful analysis cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub sign: ZodiacSign,
    pub prediction: HoroscopePrediction,
    pub natal_analysis: String,
    /// `data:` URL of the generated artwork, absent when generation degraded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zodiac_image: Option<String>,
}

/// Splits generated prose into display paragraphs: one per line break, trimmed, blank lines dropped.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

impl AnalysisReport {
    pub fn natal_paragraphs(&self) -> Vec<&str> {
        split_paragraphs(&self.natal_analysis)
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
