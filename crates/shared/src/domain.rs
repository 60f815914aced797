use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";
pub const BIRTH_TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    /// Traditional wheel order, starting at the vernal equinox.
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    pub fn english_name(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }

    pub fn arabic_name(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "الحمل",
            ZodiacSign::Taurus => "الثور",
            ZodiacSign::Gemini => "الجوزاء",
            ZodiacSign::Cancer => "السرطان",
            ZodiacSign::Leo => "الأسد",
            ZodiacSign::Virgo => "العذراء",
            ZodiacSign::Libra => "الميزان",
            ZodiacSign::Scorpio => "العقرب",
            ZodiacSign::Sagittarius => "القوس",
            ZodiacSign::Capricorn => "الجدي",
            ZodiacSign::Aquarius => "الدلو",
            ZodiacSign::Pisces => "الحوت",
        }
    }

    pub fn name(self, language: Language) -> &'static str {
        match language {
            Language::English => self.english_name(),
            Language::Arabic => self.arabic_name(),
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.english_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl Element {
    pub fn label(self) -> &'static str {
        match self {
            Element::Fire => "Fire",
            Element::Earth => "Earth",
            Element::Air => "Air",
            Element::Water => "Water",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    Cardinal,
    Fixed,
    Mutable,
}

impl Modality {
    pub fn label(self) -> &'static str {
        match self {
            Modality::Cardinal => "Cardinal",
            Modality::Fixed => "Fixed",
            Modality::Mutable => "Mutable",
        }
    }
}

/// Language used for prompts, sign names and the user-facing error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    English,
    Arabic,
}

impl Language {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Some(Language::English),
            "ar" | "arabic" => Some(Language::Arabic),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Arabic => "ar",
        }
    }

    pub fn unknown_placeholder(self) -> &'static str {
        match self {
            Language::English => "unknown",
            Language::Arabic => "غير معروفة",
        }
    }

    /// The single generic message shown when an analysis cycle fails.
    pub fn connection_error_message(self) -> &'static str {
        match self {
            Language::English => {
                "The constellations cannot be reached right now. Please try again in a moment."
            }
            Language::Arabic => "تعذر الاتصال بالمجموعة النجمية حالياً. يرجى المحاولة بعد قليل.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    pub birth_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_location: Option<String>,
}

impl UserInfo {
    pub fn new(
        name: impl Into<String>,
        birth_date: NaiveDate,
        birth_time: Option<NaiveTime>,
        birth_location: Option<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let birth_location = birth_location
            .map(|location| location.trim().to_string())
            .filter(|location| !location.is_empty());

        Ok(Self {
            name,
            birth_date,
            birth_time,
            birth_location,
        })
    }

    /// Builds a `UserInfo` from raw form strings. Empty time/location mean "not given".
    pub fn from_form(
        name: &str,
        birth_date: &str,
        birth_time: &str,
        birth_location: &str,
    ) -> Result<Self, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let birth_date = parse_birth_date(birth_date)?;
        let birth_time = if birth_time.trim().is_empty() {
            None
        } else {
            Some(parse_birth_time(birth_time)?)
        };
        Self::new(
            name,
            birth_date,
            birth_time,
            Some(birth_location.to_string()),
        )
    }

    pub fn birth_date_label(&self) -> String {
        self.birth_date.format(BIRTH_DATE_FORMAT).to_string()
    }

    pub fn birth_time_label(&self) -> Option<String> {
        self.birth_time
            .map(|time| time.format(BIRTH_TIME_FORMAT).to_string())
    }
}

pub fn parse_birth_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::EmptyBirthDate);
    }
    NaiveDate::parse_from_str(raw, BIRTH_DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidBirthDate(raw.to_string()))
}

pub fn parse_birth_time(raw: &str) -> Result<NaiveTime, ValidationError> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, BIRTH_TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| ValidationError::InvalidBirthTime(raw.to_string()))
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
