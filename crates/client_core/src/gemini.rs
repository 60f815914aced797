//! Gemini `generateContent` REST client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shared::{
    domain::{Language, UserInfo, ZodiacSign},
    protocol::{HoroscopePrediction, PREDICTION_FIELDS},
};
use tracing::debug;

use crate::{
    config::Settings, error::GenerationError, image::ZodiacImage, prompts, ContentGenerator,
};

const API_KEY_HEADER: &str = "x-goog-api-key";
const NATAL_TEMPERATURE: f32 = 0.8;
const NATAL_TOP_K: u32 = 40;
const IMAGE_ASPECT_RATIO: &str = "1:1";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [RequestContent<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl<'a> GenerateContentRequest<'a> {
    fn prompt(text: &'a str, generation_config: Option<GenerationConfig>) -> Self {
        Self {
            contents: [RequestContent {
                role: "user",
                parts: [RequestPart { text }],
            }],
            generation_config,
        }
    }
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: bool,
    #[serde(default)]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: Option<String>,
    data: String,
}

impl GenerateContentResponse {
    fn first_candidate_parts(&self) -> Result<&[ResponsePart], GenerationError> {
        let candidate = self
            .candidates
            .first()
            .ok_or(GenerationError::NoCandidates)?;
        Ok(candidate
            .content
            .as_ref()
            .map(|content| content.parts.as_slice())
            .unwrap_or_default())
    }

    /// Concatenated answer text of the first candidate, skipping thought parts.
    fn text(&self) -> Result<String, GenerationError> {
        let text: String = self
            .first_candidate_parts()?
            .iter()
            .filter(|part| !part.thought)
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(text)
    }

    fn first_inline_image(&self) -> Result<Option<ZodiacImage>, GenerationError> {
        Ok(self
            .first_candidate_parts()?
            .iter()
            .find_map(|part| part.inline_data.as_ref())
            .map(|inline| ZodiacImage::new(inline.mime_type.as_deref(), inline.data.clone())))
    }
}

fn prediction_schema() -> Value {
    let properties: serde_json::Map<String, Value> = PREDICTION_FIELDS
        .iter()
        .zip([
            "Daily general horoscope",
            "Love and relationships",
            "Career and finance",
            "Health and wellbeing",
            "Specific astrological advice",
        ])
        .map(|(field, description)| {
            (
                field.to_string(),
                json!({ "type": "STRING", "description": description }),
            )
        })
        .collect();
    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": PREDICTION_FIELDS,
    })
}

pub(crate) fn parse_prediction(text: &str) -> Result<HoroscopePrediction, GenerationError> {
    let prediction: HoroscopePrediction =
        serde_json::from_str(text.trim()).map_err(GenerationError::MalformedPrediction)?;
    if let Some(field) = prediction.first_empty_field() {
        return Err(GenerationError::EmptyField(field));
    }
    Ok(prediction)
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    api_base_url: String,
    horoscope_model: String,
    natal_model: String,
    image_model: String,
    language: Language,
}

impl GeminiClient {
    pub fn from_settings(settings: &Settings) -> Result<Self, GenerationError> {
        let api_key = settings
            .api_key
            .clone()
            .ok_or(GenerationError::MissingApiKey)?;
        Ok(Self {
            http: Client::new(),
            api_key,
            api_base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            horoscope_model: settings.horoscope_model.clone(),
            natal_model: settings.natal_model.clone(),
            image_model: settings.image_model.clone(),
            language: settings.language,
        })
    }

    pub fn language(&self) -> Language {
        self.language
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest<'_>,
    ) -> Result<GenerateContentResponse, GenerationError> {
        debug!(model, "sending generateContent request");
        let response = self
            .http
            .post(format!("{}/models/{model}:generateContent", self.api_base_url))
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status { status, body });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    async fn horoscope(
        &self,
        user: &UserInfo,
        sign: ZodiacSign,
    ) -> Result<HoroscopePrediction, GenerationError> {
        let prompt = prompts::horoscope_prompt(user, sign, self.language);
        let request = GenerateContentRequest::prompt(
            &prompt,
            Some(GenerationConfig {
                response_mime_type: Some("application/json"),
                response_schema: Some(prediction_schema()),
                ..GenerationConfig::default()
            }),
        );
        let response = self.generate(&self.horoscope_model, &request).await?;
        parse_prediction(&response.text()?)
    }

    async fn natal_analysis(
        &self,
        user: &UserInfo,
        sign: ZodiacSign,
    ) -> Result<String, GenerationError> {
        let prompt = prompts::natal_prompt(user, sign, self.language);
        let request = GenerateContentRequest::prompt(
            &prompt,
            Some(GenerationConfig {
                temperature: Some(NATAL_TEMPERATURE),
                top_k: Some(NATAL_TOP_K),
                ..GenerationConfig::default()
            }),
        );
        self.generate(&self.natal_model, &request).await?.text()
    }

    async fn zodiac_image(&self, sign: ZodiacSign) -> Result<Option<ZodiacImage>, GenerationError> {
        let prompt = prompts::image_prompt(sign);
        let request = GenerateContentRequest::prompt(
            &prompt,
            Some(GenerationConfig {
                image_config: Some(ImageConfig {
                    aspect_ratio: IMAGE_ASPECT_RATIO,
                }),
                ..GenerationConfig::default()
            }),
        );
        self.generate(&self.image_model, &request)
            .await?
            .first_inline_image()
    }
}

#[cfg(test)]
#[path = "tests/gemini_tests.rs"]
mod tests;
