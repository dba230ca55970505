//! The unit of work sent to the external model.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// File contents encoded for inline submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    data: String,
    media_type: String,
}

impl EncodedPayload {
    /// Encode raw bytes with the standard base64 alphabet.
    pub fn from_bytes(bytes: &[u8], media_type: impl Into<String>) -> Self {
        Self {
            data: STANDARD.encode(bytes),
            media_type: media_type.into(),
        }
    }

    /// Base64 text.
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }
}

/// One ordered element of a model request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text(String),
    InlineData(EncodedPayload),
}

/// Prompt plus at most one payload, in submission order.
///
/// Built once and never mutated; providers only borrow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRequest {
    parts: Vec<Part>,
}

impl ModelRequest {
    pub fn new(prompt: impl Into<String>, payload: Option<EncodedPayload>) -> Self {
        let mut parts = vec![Part::Text(prompt.into())];
        if let Some(payload) = payload {
            parts.push(Part::InlineData(payload));
        }
        Self { parts }
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// The leading text part.
    pub fn prompt(&self) -> &str {
        self.parts
            .iter()
            .find_map(|part| match part {
                Part::Text(text) => Some(text.as_str()),
                Part::InlineData(_) => None,
            })
            .unwrap_or_default()
    }

    pub fn payload(&self) -> Option<&EncodedPayload> {
        self.parts.iter().find_map(|part| match part {
            Part::InlineData(payload) => Some(payload),
            Part::Text(_) => None,
        })
    }
}
