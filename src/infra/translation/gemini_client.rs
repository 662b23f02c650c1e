// =============================================================================
// GEMINI TRANSLATOR - Google AI Studio API Integration
// =============================================================================
//
// Implements the `Translator` trait against Google's Gemini API
// (https://ai.google.dev/gemini-api/docs).
//
// **API shape notes:**
// - Authentication: the API key is passed as a query parameter (`?key=...`),
//   not a Bearer token.
// - Request format: `contents[]` with nested `parts`; generation options sit
//   in a separate `generationConfig` field.
// - JSON mode: `responseMimeType: "application/json"` plus a `responseSchema`
//   pins the model to the four-field bilingual structure.
// - Response format: content is at `candidates[0].content.parts[0].text`.
//
// **Failure policy:** transport errors and empty candidates are hard errors
// (the submission aborts, nothing persists). A response that arrives but
// does not parse as the expected JSON degrades to a source-language-only
// structure rather than failing the submission.

use crate::core::board::{Bilingual, Language};
use crate::core::translation::{BilingualPost, TranslationError, Translator};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Default model. Fast and cheap enough for per-submission translation.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";

// =============================================================================
// GEMINI API DATA STRUCTURES
// =============================================================================

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    /// OpenAPI-style schema; built once with `json!` since we never read it
    /// back.
    response_schema: serde_json::Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct Candidate {
    content: Option<Content>,
}

/// The four-field structure the model is asked to emit.
#[derive(Debug, Deserialize)]
struct BilingualPayload {
    #[serde(rename = "titleKR")]
    title_kr: String,
    #[serde(rename = "titleCN")]
    title_cn: String,
    #[serde(rename = "descKR")]
    desc_kr: String,
    #[serde(rename = "descCN")]
    desc_cn: String,
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiTranslator {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiTranslator {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
        }
    }

    fn prompt(title: &str, description: &str, source: Language) -> String {
        let target = match source {
            Language::Korean => "Chinese",
            Language::Chinese => "Korean",
        };
        format!(
            "As a professional editor for a Yanji local classifieds portal, \
             create a bilingual version of this post. Translate into {target} \
             where needed and keep the tone suitable for a job and trade portal.\n\
             Original Title: {title}\n\
             Original Description: {description}\n\
             Output JSON with the fields titleKR, titleCN, descKR, descCN."
        )
    }

    fn response_schema() -> serde_json::Value {
        serde_json::json!({
            "type": "OBJECT",
            "properties": {
                "titleKR": { "type": "STRING" },
                "titleCN": { "type": "STRING" },
                "descKR": { "type": "STRING" },
                "descCN": { "type": "STRING" }
            },
            "required": ["titleKR", "titleCN", "descKR", "descCN"]
        })
    }
}

#[async_trait]
impl Translator for GeminiTranslator {
    async fn bilingual_post(
        &self,
        title: &str,
        description: &str,
        source: Language,
    ) -> Result<BilingualPost, TranslationError> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_API_BASE, self.model, self.api_key
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(Self::prompt(title, description, source)),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: Self::response_schema(),
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| TranslationError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TranslationError::Request(format!(
                "Gemini returned HTTP {}",
                response.status()
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::Request(e.to_string()))?;

        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or(TranslationError::Empty)?;

        // Malformed JSON degrades to a source-only structure instead of
        // failing the submission outright.
        match serde_json::from_str::<BilingualPayload>(&text) {
            Ok(payload) => Ok(BilingualPost {
                title: Bilingual {
                    kr: payload.title_kr,
                    cn: payload.title_cn,
                },
                description: Bilingual {
                    kr: payload.desc_kr,
                    cn: payload.desc_cn,
                },
            }),
            Err(err) => {
                tracing::warn!("Gemini response was not valid bilingual JSON: {}", err);
                Ok(BilingualPost::from_source(title, description, source))
            }
        }
    }
}
