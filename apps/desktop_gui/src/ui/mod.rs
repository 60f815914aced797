//! UI layer for the desktop app: app shell, form, chart, artwork and result cards.

pub mod app;
pub mod artwork_card;
pub mod birth_form;
pub mod profile_card;
pub mod results;
pub mod theme;
pub mod zodiac_chart;

pub use app::OracleApp;
