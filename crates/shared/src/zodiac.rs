//! Static zodiac metadata and the birth-date to sign resolver.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::{Element, Modality, ZodiacSign};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Calendar position without a year. Orders by month, then day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    pub const fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.month(), date.day())
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let month = MONTH_ABBREVIATIONS
            .get(self.month.saturating_sub(1) as usize)
            .copied()
            .unwrap_or("???");
        write!(f, "{month} {}", self.day)
    }
}

/// Inclusive range of days assigned to one sign. `start > end` wraps the new year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignRange {
    pub sign: ZodiacSign,
    pub start: MonthDay,
    pub end: MonthDay,
}

impl SignRange {
    const fn new(sign: ZodiacSign, start: (u32, u32), end: (u32, u32)) -> Self {
        Self {
            sign,
            start: MonthDay::new(start.0, start.1),
            end: MonthDay::new(end.0, end.1),
        }
    }

    pub fn contains(&self, day: MonthDay) -> bool {
        if self.start <= self.end {
            self.start <= day && day <= self.end
        } else {
            day >= self.start || day <= self.end
        }
    }

    pub fn label(&self) -> String {
        format!("{} - {}", self.start, self.end)
    }
}

/// Sign boundaries ordered by start date. Together they cover every day of a
/// leap year exactly once; Capricorn wraps across the new year.
pub const SIGN_RANGES: [SignRange; 12] = [
    SignRange::new(ZodiacSign::Aquarius, (1, 20), (2, 18)),
    SignRange::new(ZodiacSign::Pisces, (2, 19), (3, 20)),
    SignRange::new(ZodiacSign::Aries, (3, 21), (4, 19)),
    SignRange::new(ZodiacSign::Taurus, (4, 20), (5, 20)),
    SignRange::new(ZodiacSign::Gemini, (5, 21), (6, 20)),
    SignRange::new(ZodiacSign::Cancer, (6, 21), (7, 22)),
    SignRange::new(ZodiacSign::Leo, (7, 23), (8, 22)),
    SignRange::new(ZodiacSign::Virgo, (8, 23), (9, 22)),
    SignRange::new(ZodiacSign::Libra, (9, 23), (10, 22)),
    SignRange::new(ZodiacSign::Scorpio, (10, 23), (11, 21)),
    SignRange::new(ZodiacSign::Sagittarius, (11, 22), (12, 21)),
    SignRange::new(ZodiacSign::Capricorn, (12, 22), (1, 19)),
];

/// Maps a birth date to its sun sign.
///
/// Picks the range whose start most recently passed. Days before the first
/// start of the year (Jan 1-19) belong to the range that wraps from December.
/// Feb 29 falls after Aquarius ends on Feb 18 and therefore resolves to Pisces.
pub fn resolve_sign(date: NaiveDate) -> ZodiacSign {
    let day = MonthDay::of(date);
    let wrapping = &SIGN_RANGES[SIGN_RANGES.len() - 1];
    SIGN_RANGES
        .iter()
        .rev()
        .find(|range| range.start <= day)
        .unwrap_or(wrapping)
        .sign
}

pub fn sign_range(sign: ZodiacSign) -> &'static SignRange {
    let index = SIGN_RANGES
        .iter()
        .position(|range| range.sign == sign)
        .unwrap_or_default();
    &SIGN_RANGES[index]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZodiacData {
    pub sign: ZodiacSign,
    pub element: Element,
    pub modality: Modality,
    pub ruler: &'static str,
    pub symbol: &'static str,
    pub date_range: &'static str,
    pub description: &'static str,
    pub lucky_numbers: &'static [u8],
    pub lucky_color: &'static str,
    pub compatibility: &'static [ZodiacSign],
}

/// One record per sign, indexed by `ZodiacSign as usize`.
pub static ZODIAC_TABLE: [ZodiacData; 12] = [
    ZodiacData {
        sign: ZodiacSign::Aries,
        element: Element::Fire,
        modality: Modality::Cardinal,
        ruler: "Mars",
        symbol: "♈",
        date_range: "Mar 21 - Apr 19",
        description: "Brave, confident and enthusiastic. Aries is the natural leader of the zodiac.",
        lucky_numbers: &[1, 8, 17],
        lucky_color: "Red",
        compatibility: &[ZodiacSign::Leo, ZodiacSign::Sagittarius],
    },
    ZodiacData {
        sign: ZodiacSign::Taurus,
        element: Element::Earth,
        modality: Modality::Fixed,
        ruler: "Venus",
        symbol: "♉",
        date_range: "Apr 20 - May 20",
        description: "Reliable, patient and practical. Taurus values beauty and material comfort.",
        lucky_numbers: &[2, 6, 9],
        lucky_color: "Green",
        compatibility: &[ZodiacSign::Virgo, ZodiacSign::Capricorn],
    },
    ZodiacData {
        sign: ZodiacSign::Gemini,
        element: Element::Air,
        modality: Modality::Mutable,
        ruler: "Mercury",
        symbol: "♊",
        date_range: "May 21 - Jun 20",
        description: "Gentle, curious and quick to learn. Gemini is known for a dual nature and social intelligence.",
        lucky_numbers: &[5, 7, 14],
        lucky_color: "Yellow",
        compatibility: &[ZodiacSign::Libra, ZodiacSign::Aquarius],
    },
    ZodiacData {
        sign: ZodiacSign::Cancer,
        element: Element::Water,
        modality: Modality::Cardinal,
        ruler: "Moon",
        symbol: "♋",
        date_range: "Jun 21 - Jul 22",
        description: "Emotional, intuitive and devoted to stability. Cancer is deeply bound to family and home.",
        lucky_numbers: &[2, 3, 15],
        lucky_color: "Silver",
        compatibility: &[ZodiacSign::Scorpio, ZodiacSign::Pisces],
    },
    ZodiacData {
        sign: ZodiacSign::Leo,
        element: Element::Fire,
        modality: Modality::Fixed,
        ruler: "Sun",
        symbol: "♌",
        date_range: "Jul 23 - Aug 22",
        description: "Generous, confident and creative. Leo loves to be the center of attention.",
        lucky_numbers: &[1, 4, 10],
        lucky_color: "Gold",
        compatibility: &[ZodiacSign::Aries, ZodiacSign::Sagittarius],
    },
    ZodiacData {
        sign: ZodiacSign::Virgo,
        element: Element::Earth,
        modality: Modality::Mutable,
        ruler: "Mercury",
        symbol: "♍",
        date_range: "Aug 23 - Sep 22",
        description: "Analytical, practical and hardworking. Virgo always strives for perfection and order.",
        lucky_numbers: &[5, 22, 38],
        lucky_color: "Brown",
        compatibility: &[ZodiacSign::Taurus, ZodiacSign::Capricorn],
    },
    ZodiacData {
        sign: ZodiacSign::Libra,
        element: Element::Air,
        modality: Modality::Cardinal,
        ruler: "Venus",
        symbol: "♎",
        date_range: "Sep 23 - Oct 22",
        description: "Diplomatic, fair and sociable. Libra is always searching for balance and harmony.",
        lucky_numbers: &[4, 6, 13],
        lucky_color: "Pink",
        compatibility: &[ZodiacSign::Gemini, ZodiacSign::Aquarius],
    },
    ZodiacData {
        sign: ZodiacSign::Scorpio,
        element: Element::Water,
        modality: Modality::Fixed,
        ruler: "Pluto",
        symbol: "♏",
        date_range: "Oct 23 - Nov 21",
        description: "Brave, passionate and honest. Scorpio is marked by mystery and a strong magnetism.",
        lucky_numbers: &[8, 11, 18],
        lucky_color: "Black",
        compatibility: &[ZodiacSign::Cancer, ZodiacSign::Pisces],
    },
    ZodiacData {
        sign: ZodiacSign::Sagittarius,
        element: Element::Fire,
        modality: Modality::Mutable,
        ruler: "Jupiter",
        symbol: "♐",
        date_range: "Nov 22 - Dec 21",
        description: "Optimistic, freedom-loving and philosophical. Sagittarius always seeks to explore the world.",
        lucky_numbers: &[3, 7, 9],
        lucky_color: "Purple",
        compatibility: &[ZodiacSign::Aries, ZodiacSign::Leo],
    },
    ZodiacData {
        sign: ZodiacSign::Capricorn,
        element: Element::Earth,
        modality: Modality::Cardinal,
        ruler: "Saturn",
        symbol: "♑",
        date_range: "Dec 22 - Jan 19",
        description: "Responsible, disciplined and practical. Capricorn is highly ambitious and plans the future carefully.",
        lucky_numbers: &[4, 8, 13],
        lucky_color: "Dark gray",
        compatibility: &[ZodiacSign::Taurus, ZodiacSign::Virgo],
    },
    ZodiacData {
        sign: ZodiacSign::Aquarius,
        element: Element::Air,
        modality: Modality::Fixed,
        ruler: "Uranus",
        symbol: "♒",
        date_range: "Jan 20 - Feb 18",
        description: "Progressive, original and independent. Aquarius cares about humanity and inventive ideas.",
        lucky_numbers: &[4, 7, 11],
        lucky_color: "Sky blue",
        compatibility: &[ZodiacSign::Gemini, ZodiacSign::Libra],
    },
    ZodiacData {
        sign: ZodiacSign::Pisces,
        element: Element::Water,
        modality: Modality::Mutable,
        ruler: "Neptune",
        symbol: "♓",
        date_range: "Feb 19 - Mar 20",
        description: "Compassionate, artistic and intuitive. Pisces lives in a world of imagination and spirituality.",
        lucky_numbers: &[3, 9, 21],
        lucky_color: "Navy",
        compatibility: &[ZodiacSign::Cancer, ZodiacSign::Scorpio],
    },
];

impl ZodiacSign {
    pub fn data(self) -> &'static ZodiacData {
        &ZODIAC_TABLE[self as usize]
    }

    pub fn from_birth_date(date: NaiveDate) -> Self {
        resolve_sign(date)
    }

    pub fn symbol(self) -> &'static str {
        self.data().symbol
    }
}

#[cfg(test)]
#[path = "tests/zodiac_tests.rs"]
mod tests;
