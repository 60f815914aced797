use super::*;

use std::{collections::HashMap, sync::Arc};

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use chrono::NaiveDate;
use tokio::{net::TcpListener, sync::Mutex};

use crate::config::{DEFAULT_HOROSCOPE_MODEL, DEFAULT_IMAGE_MODEL, DEFAULT_NATAL_MODEL};

const TEST_KEY: &str = "test-api-key";

#[derive(Debug, Clone)]
struct RecordedRequest {
    call: String,
    api_key: Option<String>,
    body: Value,
}

#[derive(Clone, Default)]
struct FakeGeminiState {
    responses: Arc<Mutex<HashMap<String, (StatusCode, Value)>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeGeminiState {
    async fn respond(&self, model: &str, status: StatusCode, body: Value) {
        self.responses
            .lock()
            .await
            .insert(format!("{model}:generateContent"), (status, body));
    }

    async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }
}

async fn handle_generate(
    State(state): State<FakeGeminiState>,
    Path(call): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.requests.lock().await.push(RecordedRequest {
        call: call.clone(),
        api_key: headers
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body,
    });
    let responses = state.responses.lock().await;
    match responses.get(&call) {
        Some((status, body)) => (*status, Json(body.clone())),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": { "message": "unknown model" } })),
        ),
    }
}

async fn spawn_fake_gemini() -> Result<(String, FakeGeminiState)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = FakeGeminiState::default();
    let app = Router::new()
        .route("/v1beta/models/:call", post(handle_generate))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}/v1beta/"), state))
}

fn client_for(base_url: &str) -> GeminiClient {
    let settings = Settings {
        api_key: Some(TEST_KEY.into()),
        api_base_url: base_url.into(),
        ..Settings::default()
    };
    GeminiClient::from_settings(&settings).expect("client")
}

fn lina() -> UserInfo {
    UserInfo::new(
        "Lina",
        NaiveDate::from_ymd_opt(1990, 8, 10).expect("date"),
        None,
        Some("Beirut".into()),
    )
    .expect("user")
}

fn text_response(parts: Value) -> Value {
    json!({ "candidates": [{ "content": { "role": "model", "parts": parts } }] })
}

fn prediction_json() -> Value {
    json!({
        "daily": "Stars align over your morning.",
        "love": "A message arrives.",
        "career": "Sign the contract.",
        "health": "Drink water.",
        "astrologicalAdvice": "Wait for the full moon."
    })
}

#[test]
fn missing_api_key_is_rejected_at_construction() {
    let err = GeminiClient::from_settings(&Settings::default()).expect_err("no key");
    assert!(matches!(err, GenerationError::MissingApiKey));
}

#[test]
fn schema_requires_all_five_fields() {
    let schema = prediction_schema();
    assert_eq!(schema["type"], "OBJECT");
    assert_eq!(schema["required"], json!(PREDICTION_FIELDS));
    for field in PREDICTION_FIELDS {
        assert_eq!(schema["properties"][field]["type"], "STRING", "{field}");
    }
}

#[test]
fn parse_prediction_rejects_blank_fields() {
    let mut value = prediction_json();
    value["health"] = json!("   ");
    let err = parse_prediction(&value.to_string()).expect_err("blank health");
    assert!(matches!(err, GenerationError::EmptyField("health")));
}

#[tokio::test]
async fn horoscope_request_is_schema_constrained_and_parsed() {
    let (base_url, server) = spawn_fake_gemini().await.expect("spawn server");
    server
        .respond(
            DEFAULT_HOROSCOPE_MODEL,
            StatusCode::OK,
            text_response(json!([{ "text": prediction_json().to_string() }])),
        )
        .await;

    let prediction = client_for(&base_url)
        .horoscope(&lina(), ZodiacSign::Leo)
        .await
        .expect("prediction");
    assert_eq!(prediction.astrological_advice, "Wait for the full moon.");
    assert_eq!(prediction.daily, "Stars align over your morning.");

    let requests = server.requests().await;
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.call, "gemini-3-flash-preview:generateContent");
    assert_eq!(request.api_key.as_deref(), Some(TEST_KEY));
    let config = &request.body["generationConfig"];
    assert_eq!(config["responseMimeType"], "application/json");
    assert_eq!(config["responseSchema"]["required"], json!(PREDICTION_FIELDS));
    let prompt = request.body["contents"][0]["parts"][0]["text"]
        .as_str()
        .expect("prompt text");
    assert!(prompt.contains("Lina"));
    assert!(prompt.contains("1990-08-10"));
    assert!(prompt.contains("Leo"));
}

#[tokio::test]
async fn horoscope_with_missing_field_is_malformed() {
    let (base_url, server) = spawn_fake_gemini().await.expect("spawn server");
    let mut partial = prediction_json();
    partial
        .as_object_mut()
        .expect("object")
        .remove("astrologicalAdvice");
    server
        .respond(
            DEFAULT_HOROSCOPE_MODEL,
            StatusCode::OK,
            text_response(json!([{ "text": partial.to_string() }])),
        )
        .await;

    let err = client_for(&base_url)
        .horoscope(&lina(), ZodiacSign::Leo)
        .await
        .expect_err("missing field");
    assert!(matches!(err, GenerationError::MalformedPrediction(_)));
}

#[tokio::test]
async fn horoscope_with_non_json_text_is_malformed() {
    let (base_url, server) = spawn_fake_gemini().await.expect("spawn server");
    server
        .respond(
            DEFAULT_HOROSCOPE_MODEL,
            StatusCode::OK,
            text_response(json!([{ "text": "the stars are silent" }])),
        )
        .await;

    let err = client_for(&base_url)
        .horoscope(&lina(), ZodiacSign::Leo)
        .await
        .expect_err("not json");
    assert!(matches!(err, GenerationError::MalformedPrediction(_)));
}

#[tokio::test]
async fn natal_analysis_sends_sampling_config_and_joins_text_parts() {
    let (base_url, server) = spawn_fake_gemini().await.expect("spawn server");
    server
        .respond(
            DEFAULT_NATAL_MODEL,
            StatusCode::OK,
            text_response(json!([
                { "text": "internal reasoning", "thought": true },
                { "text": "Your sun in Leo shines.\n\n" },
                { "text": "Your moon is quiet." }
            ])),
        )
        .await;

    let text = client_for(&base_url)
        .natal_analysis(&lina(), ZodiacSign::Leo)
        .await
        .expect("natal text");
    assert_eq!(text, "Your sun in Leo shines.\n\nYour moon is quiet.");

    let requests = server.requests().await;
    let config = &requests[0].body["generationConfig"];
    assert_eq!(config["topK"], 40);
    assert!((config["temperature"].as_f64().expect("temperature") - 0.8).abs() < 1e-6);
    assert!(config.get("responseSchema").is_none());
    let prompt = requests[0].body["contents"][0]["parts"][0]["text"]
        .as_str()
        .expect("prompt text");
    assert!(prompt.contains("at unknown in Beirut"));
}

#[tokio::test]
async fn empty_natal_text_is_an_error() {
    let (base_url, server) = spawn_fake_gemini().await.expect("spawn server");
    server
        .respond(
            DEFAULT_NATAL_MODEL,
            StatusCode::OK,
            text_response(json!([{ "text": "  " }])),
        )
        .await;

    let err = client_for(&base_url)
        .natal_analysis(&lina(), ZodiacSign::Leo)
        .await
        .expect_err("empty text");
    assert!(matches!(err, GenerationError::EmptyResponse));
}

#[tokio::test]
async fn image_call_returns_first_inline_payload_as_data_url() {
    let (base_url, server) = spawn_fake_gemini().await.expect("spawn server");
    server
        .respond(
            DEFAULT_IMAGE_MODEL,
            StatusCode::OK,
            text_response(json!([
                { "text": "Here is your artwork." },
                { "inlineData": { "mimeType": "image/jpeg", "data": "/9j/AAA=" } },
                { "inlineData": { "mimeType": "image/png", "data": "iVBORw==" } }
            ])),
        )
        .await;

    let image = client_for(&base_url)
        .zodiac_image(ZodiacSign::Pisces)
        .await
        .expect("image call")
        .expect("inline image");
    assert_eq!(image.data_url(), "data:image/jpeg;base64,/9j/AAA=");

    let requests = server.requests().await;
    assert_eq!(requests[0].call, "gemini-2.5-flash-image:generateContent");
    assert_eq!(
        requests[0].body["generationConfig"]["imageConfig"]["aspectRatio"],
        "1:1"
    );
}

#[tokio::test]
async fn image_call_without_inline_data_returns_none() {
    let (base_url, server) = spawn_fake_gemini().await.expect("spawn server");
    server
        .respond(
            DEFAULT_IMAGE_MODEL,
            StatusCode::OK,
            text_response(json!([{ "text": "I cannot draw that." }])),
        )
        .await;

    let image = client_for(&base_url)
        .zodiac_image(ZodiacSign::Pisces)
        .await
        .expect("image call");
    assert_eq!(image, None);
}

#[tokio::test]
async fn empty_candidate_list_is_reported() {
    let (base_url, server) = spawn_fake_gemini().await.expect("spawn server");
    server
        .respond(DEFAULT_IMAGE_MODEL, StatusCode::OK, json!({ "candidates": [] }))
        .await;

    let err = client_for(&base_url)
        .zodiac_image(ZodiacSign::Aries)
        .await
        .expect_err("no candidates");
    assert!(matches!(err, GenerationError::NoCandidates));
}

#[tokio::test]
async fn error_status_carries_response_body() {
    let (base_url, server) = spawn_fake_gemini().await.expect("spawn server");
    server
        .respond(
            DEFAULT_NATAL_MODEL,
            StatusCode::TOO_MANY_REQUESTS,
            json!({ "error": { "message": "quota exhausted" } }),
        )
        .await;

    let err = client_for(&base_url)
        .natal_analysis(&lina(), ZodiacSign::Leo)
        .await
        .expect_err("quota");
    match err {
        GenerationError::Status { status, body } => {
            assert_eq!(status, reqwest::StatusCode::TOO_MANY_REQUESTS);
            assert!(body.contains("quota exhausted"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn full_fanout_against_fake_service() {
    let (base_url, server) = spawn_fake_gemini().await.expect("spawn server");
    server
        .respond(
            DEFAULT_HOROSCOPE_MODEL,
            StatusCode::OK,
            text_response(json!([{ "text": prediction_json().to_string() }])),
        )
        .await;
    server
        .respond(
            DEFAULT_NATAL_MODEL,
            StatusCode::OK,
            text_response(json!([{ "text": "A generous heart." }])),
        )
        .await;
    server
        .respond(
            DEFAULT_IMAGE_MODEL,
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": { "message": "image backend down" } }),
        )
        .await;

    let client = client_for(&base_url);
    let (_handle, signal) = crate::fanout::cancel_pair();
    let report = crate::fanout::run_analysis(
        &client,
        &lina(),
        ZodiacSign::Leo,
        crate::fanout::FanoutPolicy::default(),
        signal,
    )
    .await
    .expect("report");
    assert_eq!(report.natal_analysis, "A generous heart.");
    assert_eq!(report.zodiac_image, None);
    assert_eq!(server.requests().await.len(), 3);
}
