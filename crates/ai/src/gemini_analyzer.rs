//! Gemini implementation of the portfolio analyzer.
//!
//! Sends the user's notes and screenshots to `models/{model}:generateContent`
//! with a JSON response schema and parses the first candidate into an
//! [`EntryAnalysis`].

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

use wealthjournal_core::journal::{
    split_data_url, AnalysisOutcome, AnalysisRequest, EntryAnalysis, PortfolioAnalyzerTrait,
};

use crate::config::{AnalyzerConfig, API_KEY_ENV};
use crate::error::AiError;
use crate::prompt_template::{build_prompt, SYSTEM_INSTRUCTION};
use crate::schema::response_schema;

const API_KEY_HEADER: &str = "x-goog-api-key";
/// Used when an image arrives without a data URL prefix.
const FALLBACK_IMAGE_MIME: &str = "image/png";

// ─────────────────────────────────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub system_instruction: Content,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    fn inline(mime_type: &str, data: &str) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.to_string(),
                data: data.to_string(),
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

// ─────────────────────────────────────────────────────────────────────────
// Request building and response parsing
// ─────────────────────────────────────────────────────────────────────────

/// Builds the request body: images first, in order, then the prompt.
pub fn build_request(request: &AnalysisRequest) -> GenerateContentRequest {
    let mut parts: Vec<Part> = request
        .images
        .iter()
        .map(|image| {
            let (mime, data) = split_data_url(image);
            Part::inline(mime.unwrap_or(FALLBACK_IMAGE_MIME), data)
        })
        .collect();
    parts.push(Part::text(build_prompt(&request.text)));

    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts,
        }],
        system_instruction: Content {
            role: None,
            parts: vec![Part::text(SYSTEM_INSTRUCTION)],
        },
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: response_schema(),
        },
    }
}

/// Extracts the analysis from the first candidate.
///
/// Any missing or mistyped required field fails the whole response.
pub fn parse_response(response: GenerateContentResponse) -> Result<EntryAnalysis, AiError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        if let Some(reason) = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
        {
            return Err(AiError::Blocked(reason));
        }
        return Err(AiError::EmptyResponse);
    }

    serde_json::from_str::<EntryAnalysis>(text.trim())
        .map_err(|e| AiError::InvalidResponse(e.to_string()))
}

// ─────────────────────────────────────────────────────────────────────────
// Analyzer
// ─────────────────────────────────────────────────────────────────────────

/// Portfolio analyzer backed by the Gemini `generateContent` API.
#[derive(Debug, Clone)]
pub struct GeminiAnalyzer {
    client: reqwest::Client,
    config: AnalyzerConfig,
    api_key: HeaderValue,
}

impl GeminiAnalyzer {
    /// Creates an analyzer.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::MissingApiKey`] when the configuration carries no
    /// credential, or [`AiError::Internal`] if the HTTP client cannot be built.
    pub fn new(config: AnalyzerConfig) -> Result<Self, AiError> {
        let key = config
            .api_key
            .as_deref()
            .ok_or_else(|| AiError::MissingApiKey(API_KEY_ENV.to_string()))?;
        let mut api_key = HeaderValue::from_str(key)
            .map_err(|e| AiError::internal(format!("Invalid API key format: {}", e)))?;
        api_key.set_sensitive(true);

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AiError::internal(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(API_KEY_HEADER, self.api_key.clone());
        headers
    }

    async fn generate(&self, request: &AnalysisRequest) -> Result<EntryAnalysis, AiError> {
        let body = build_request(request);
        let url = self.endpoint();
        debug!("[Gemini] POST {}", url);

        let response = self
            .client
            .post(&url)
            .headers(self.headers())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorResponse>(&text)
                .map(|err| err.error.message)
                .unwrap_or_else(|_| text.chars().take(200).collect());
            return Err(AiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|e| AiError::InvalidResponse(format!("Unexpected envelope: {}", e)))?;
        parse_response(parsed)
    }

    fn transport_error(&self, err: reqwest::Error) -> AiError {
        if err.is_timeout() {
            AiError::Timeout(self.config.timeout)
        } else {
            AiError::Http(err.to_string())
        }
    }
}

#[async_trait]
impl PortfolioAnalyzerTrait for GeminiAnalyzer {
    async fn analyze(&self, request: AnalysisRequest) -> AnalysisOutcome {
        info!(
            "Analyzing portfolio with {} ({} image(s))",
            self.config.model,
            request.images.len()
        );
        let started = Instant::now();

        match self.generate(&request).await {
            Ok(analysis) => {
                info!(
                    "Analysis '{}' completed in {} ms",
                    analysis.title,
                    started.elapsed().as_millis()
                );
                Ok(analysis)
            }
            Err(err) => {
                warn!("Gemini analysis failed [{}]: {}", err.code(), err);
                Err(err.into())
            }
        }
    }
}
