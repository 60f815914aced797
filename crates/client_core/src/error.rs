use thiserror::Error;

/// Failure of a single call to the content-generation service.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no API key configured; set GEMINI_API_KEY or api_key in oracle.toml")]
    MissingApiKey,
    #[error("failed to reach generation service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("generation service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("generation service returned no candidates")]
    NoCandidates,
    #[error("generation service returned an empty response")]
    EmptyResponse,
    #[error("malformed horoscope payload: {0}")]
    MalformedPrediction(#[source] serde_json::Error),
    #[error("horoscope field '{0}' is empty")]
    EmptyField(&'static str),
}
