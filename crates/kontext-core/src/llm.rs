use crate::config::Config;
use crate::error::ExtractError;
use crate::prompts;
use crate::types::{PromptField, PromptParts};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Turns a casual edit description into structured prompt fields.
#[async_trait]
pub trait PartsExtractor: Send + Sync {
    async fn extract(&self, raw_input: &str) -> Result<PromptParts, ExtractError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent {
    role: String,
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}

/// Extractor backed by the Gemini `generateContent` endpoint with a JSON response schema.
pub struct GeminiExtractor {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiExtractor {
    pub fn new(config: &Config) -> Result<Self, ExtractError> {
        // No request timeout: the call runs until the transport gives up.
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ExtractError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    async fn call_gemini(&self, prompt: String) -> Result<String, ExtractError> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user".to_string(),
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: prompts::response_schema(),
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ExtractError::Transport(e.to_string()))?;

        let status = response.status();
        log::debug!("Gemini responded with status {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| ExtractError::Transport(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(service_error(status, &body));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| ExtractError::MalformedResponse(e.to_string()))?;

        answer_text(parsed).ok_or(ExtractError::EmptyResponse)
    }
}

#[async_trait]
impl PartsExtractor for GeminiExtractor {
    async fn extract(&self, raw_input: &str) -> Result<PromptParts, ExtractError> {
        if raw_input.trim().is_empty() {
            return Err(ExtractError::EmptyInput);
        }

        log::info!(
            "Requesting prompt parts from {} ({} chars of input)",
            self.model,
            raw_input.chars().count()
        );

        let result = self
            .call_gemini(prompts::extraction_prompt(raw_input))
            .await
            .and_then(|text| parse_parts(&text));

        if let Err(e) = &result {
            log::error!("Error calling Gemini API: {:?}", e);
        }
        result
    }
}

/// Concatenated text parts of the first candidate.
fn answer_text(response: GenerateContentResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let texts: Vec<String> = content.parts.into_iter().filter_map(|p| p.text).collect();
    if texts.is_empty() {
        None
    } else {
        Some(texts.concat())
    }
}

fn service_error(status: reqwest::StatusCode, body: &str) -> ExtractError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error.message)
        .ok()
        .filter(|m| !m.trim().is_empty())
        .or_else(|| Some(body.trim().to_string()).filter(|b| !b.is_empty()))
        .or_else(|| status.canonical_reason().map(str::to_string));

    match message {
        Some(message) => ExtractError::Service {
            status: status.as_u16(),
            message,
        },
        None => ExtractError::Unknown,
    }
}

/// Map the model's JSON answer onto `PromptParts`; missing or non-string fields become empty.
pub fn parse_parts(text: &str) -> Result<PromptParts, ExtractError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ExtractError::MalformedResponse(e.to_string()))?;

    let object = value.as_object().ok_or_else(|| {
        ExtractError::MalformedResponse(format!(
            "expected a JSON object, got: {}",
            text.chars().take(200).collect::<String>()
        ))
    })?;

    let mut parts = PromptParts::default();
    for field in PromptField::ALL {
        if let Some(value) = object.get(field.as_str()).and_then(Value::as_str) {
            parts.set(field, value);
        }
    }
    Ok(parts)
}
