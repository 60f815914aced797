use async_trait::async_trait;
use shared::{
    domain::{UserInfo, ZodiacSign},
    protocol::HoroscopePrediction,
};

pub mod config;
pub mod error;
pub mod fanout;
pub mod gemini;
pub mod image;
pub mod prompts;

pub use error::GenerationError;
pub use fanout::{
    cancel_pair, run_analysis, AnalysisError, CallKind, CallPolicy, CancelHandle, CancelSignal,
    FanoutPolicy,
};
pub use gemini::GeminiClient;
pub use image::{decode_data_url, ZodiacImage};

/// The three request shapes of the external content-generation service.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn horoscope(
        &self,
        user: &UserInfo,
        sign: ZodiacSign,
    ) -> Result<HoroscopePrediction, GenerationError>;

    async fn natal_analysis(
        &self,
        user: &UserInfo,
        sign: ZodiacSign,
    ) -> Result<String, GenerationError>;

    /// `Ok(None)` when the response carried no inline image.
    async fn zodiac_image(&self, sign: ZodiacSign) -> Result<Option<ZodiacImage>, GenerationError>;
}
