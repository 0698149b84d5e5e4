//! Gemini client — the single point of entry for all generative-service
//! calls.
//!
//! ARCHITECTURAL RULE: no other module may touch the network. The rest of
//! the crate consumes the service through the `GenerativeService` trait so
//! the orchestration layer can be exercised with stubs.
//!
//! Models are hardcoded — do not make configurable to prevent drift.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub mod prompts;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// Model used for subject classification and plan generation.
pub const TEXT_MODEL: &str = "gemini-2.5-flash";
/// Model used for portrait generation.
pub const IMAGE_MODEL: &str = "gemini-2.5-flash-image";
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum AiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("service returned no candidates")]
    EmptyResponse,

    #[error("no image produced")]
    NoImage,
}

/// The three operations the application consumes from the generative
/// service. One best-effort attempt per call; retrying is always an explicit
/// user action upstream.
#[async_trait]
pub trait GenerativeService: Send + Sync {
    /// Free-text description of the photo subject.
    async fn classify_subject(&self, image: &[u8], mime_type: &str) -> Result<String, AiError>;

    /// Reimagines the photo subject per `prompt`. The returned parts may
    /// hold inline image data, refusal text, or both.
    async fn generate_image(
        &self,
        image: &[u8],
        mime_type: &str,
        prompt: &str,
    ) -> Result<Vec<ResponsePart>, AiError>;

    /// Structured-output call constrained to `schema`. Returns the raw JSON
    /// text of the first candidate.
    async fn generate_plan(&self, prompt: &str, schema: Value) -> Result<String, AiError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    /// Base64-encoded payload, as carried on the wire.
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

/// One part of a response candidate: text, inline image data, or neither.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
    #[serde(rename = "inlineData")]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorWrapper {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    status: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The production Gemini client.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    async fn send(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AiError> {
        let url = format!("{GEMINI_API_BASE}/{model}:generateContent?key={}", self.api_key);

        let response = self.client.post(url).json(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorWrapper>(&body)
                .map(|w| {
                    let status_text = w.error.status.unwrap_or_default();
                    let msg = w.error.message.unwrap_or_else(|| body.clone());
                    if status_text.is_empty() {
                        msg
                    } else {
                        format!("{status_text}: {msg}")
                    }
                })
                .unwrap_or(body);
            return Err(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        Ok(parsed)
    }

    fn inline_part(image: &[u8], mime_type: &str) -> Part {
        Part::InlineData {
            inline_data: InlineData {
                mime_type: mime_type.to_string(),
                data: BASE64_STANDARD.encode(image),
            },
        }
    }
}

#[async_trait]
impl GenerativeService for GeminiClient {
    async fn classify_subject(&self, image: &[u8], mime_type: &str) -> Result<String, AiError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![
                    Self::inline_part(image, mime_type),
                    Part::Text {
                        text: prompts::CLASSIFY_SUBJECT_PROMPT.to_string(),
                    },
                ],
            }],
            generation_config: None,
        };

        let response = self.send(TEXT_MODEL, &request).await?;
        let text = first_candidate_text(response)?;
        debug!("classifier replied: {}", text.trim());
        Ok(text.trim().to_string())
    }

    async fn generate_image(
        &self,
        image: &[u8],
        mime_type: &str,
        prompt: &str,
    ) -> Result<Vec<ResponsePart>, AiError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![
                    Self::inline_part(image, mime_type),
                    Part::Text {
                        text: prompt.to_string(),
                    },
                ],
            }],
            generation_config: None,
        };

        let response = self.send(IMAGE_MODEL, &request).await?;
        first_candidate_parts(response)
    }

    async fn generate_plan(&self, prompt: &str, schema: Value) -> Result<String, AiError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part::Text {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            }),
        };

        let response = self.send(TEXT_MODEL, &request).await?;
        first_candidate_text(response)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Response helpers
// ────────────────────────────────────────────────────────────────────────────

/// All parts of the first candidate.
fn first_candidate_parts(response: GenerateContentResponse) -> Result<Vec<ResponsePart>, AiError> {
    response
        .candidates
        .and_then(|mut candidates| {
            if candidates.is_empty() {
                None
            } else {
                Some(candidates.remove(0))
            }
        })
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts)
        .ok_or(AiError::EmptyResponse)
}

/// Joined text of the first candidate's text parts.
fn first_candidate_text(response: GenerateContentResponse) -> Result<String, AiError> {
    let parts = first_candidate_parts(response)?;
    let text: String = parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect::<Vec<_>>()
        .join("");
    if text.trim().is_empty() {
        return Err(AiError::EmptyResponse);
    }
    Ok(text)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from service output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
