/// Request and response bodies for the `generateContent` endpoint
///
/// Only the fields this application reads or writes are modelled. Unknown
/// response fields are ignored; unknown part kinds land in `Part::Other`.
use serde::{Deserialize, Serialize};

/// Inline binary data tagged with its media type
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    #[serde(alias = "mime_type", default)]
    pub mime_type: String,
    /// Base64 text
    pub data: String,
}

/// One segment of a content block
///
/// Variant order matters for deserialization: an image part is tried
/// first, then text, and anything else is kept verbatim.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Part {
    InlineData {
        #[serde(rename = "inlineData", alias = "inline_data")]
        inline_data: Blob,
    },
    Text {
        text: String,
    },
    Other(serde_json::Value),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<Modality>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Modality {
    Image,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// A single-turn request: one image followed by one instruction,
    /// answered with image output only
    pub fn image_edit(base64: &str, media_type: &str, instruction: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: Blob {
                            mime_type: media_type.to_string(),
                            data: base64.to_string(),
                        },
                    },
                    Part::Text {
                        text: instruction.to_string(),
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec![Modality::Image],
            },
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Candidate {
    #[serde(default)]
    pub content: Content,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// First image-bearing segment of the first candidate
    pub fn first_inline_image(&self) -> Option<&Blob> {
        self.candidates
            .first()?
            .content
            .parts
            .iter()
            .find_map(|part| match part {
                Part::InlineData { inline_data } => Some(inline_data),
                Part::Text { .. } | Part::Other(_) => None,
            })
    }
}
