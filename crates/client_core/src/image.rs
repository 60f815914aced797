use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Inline image payload returned by the generation service, still base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZodiacImage {
    pub mime_type: String,
    pub data_b64: String,
}

impl ZodiacImage {
    pub fn new(mime_type: Option<&str>, data_b64: impl Into<String>) -> Self {
        let mime_type = mime_type
            .map(str::trim)
            .filter(|mime| !mime.is_empty())
            .unwrap_or(DEFAULT_IMAGE_MIME);
        Self {
            mime_type: mime_type.to_string(),
            data_b64: data_b64.into(),
        }
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data_b64)
    }
}

#[derive(Debug, Error)]
pub enum DataUrlError {
    #[error("not a data URL")]
    MissingScheme,
    #[error("data URL is not base64-encoded")]
    NotBase64,
    #[error("invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedDataUrl {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

pub fn decode_data_url(url: &str) -> Result<DecodedDataUrl, DataUrlError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or(DataUrlError::MissingScheme)?;
    let (meta, payload) = rest.split_once(',').ok_or(DataUrlError::NotBase64)?;
    let mime_type = meta
        .strip_suffix(";base64")
        .ok_or(DataUrlError::NotBase64)?;
    let bytes = STANDARD.decode(payload.trim())?;
    Ok(DecodedDataUrl {
        mime_type: if mime_type.is_empty() {
            DEFAULT_IMAGE_MIME.to_string()
        } else {
            mime_type.to_string()
        },
        bytes,
    })
}
