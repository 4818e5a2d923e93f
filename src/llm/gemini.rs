//! Gemini generateContent API client
//!
//! Implements the LlmClient trait against Google's Gemini REST API. Each
//! call sends the full conversation history; no state is kept between
//! calls and no request is ever retried.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{CompletionRequest, CompletionResponse, LlmClient, LlmError, Message, TokenUsage, ToolDefinition};
use crate::config::LlmConfig;

/// Gemini API client
pub struct GeminiClient {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
}

impl GeminiClient {
    /// Create a new client from configuration
    ///
    /// The API key is read from the environment variable named in the
    /// config. A missing key is not an error here: it surfaces as an
    /// authentication failure on the first request.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        debug!(model = %config.model, "GeminiClient::from_config: called");
        let api_key = config.get_api_key();

        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(LlmError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            api_key,
            base_url: config.base_url.clone(),
            http,
        })
    }

    /// Build the request body for the generateContent endpoint
    fn build_request_body<'a>(&self, request: &'a CompletionRequest) -> GeminiRequest<'a> {
        debug!(%self.model, message_count = %request.messages.len(), "build_request_body: called");
        let tools = if request.tools.is_empty() {
            debug!("build_request_body: no tools");
            Vec::new()
        } else {
            debug!(tool_count = %request.tools.len(), "build_request_body: adding tool declarations");
            vec![GeminiTool {
                function_declarations: &request.tools,
            }]
        };

        GeminiRequest {
            system_instruction: GeminiSystemInstruction {
                parts: vec![GeminiTextPart {
                    text: &request.system_prompt,
                }],
            },
            contents: &request.messages,
            tools,
        }
    }

    /// Parse the Gemini API response
    ///
    /// Only the first candidate is consulted; the service may return more
    /// but the rest are dropped.
    fn parse_response(&self, api_response: GeminiResponse) -> Result<CompletionResponse, LlmError> {
        debug!(candidate_count = %api_response.candidates.len(), "parse_response: called");
        let candidate = api_response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("no candidates in response".to_string()))?;

        let usage = api_response
            .usage_metadata
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_token_count,
                response_tokens: u.candidates_token_count,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            message: candidate.content,
            usage,
        })
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        debug!(%self.model, "complete: called");
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);
        let body = self.build_request_body(&request);

        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", self.api_key.clone())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(LlmError::Network)?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            debug!(%status, "complete: API error");
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError { status, message: text });
        }

        debug!("complete: success");
        let api_response: GeminiResponse = response.json().await.map_err(LlmError::Network)?;
        self.parse_response(api_response)
    }
}

// Gemini API request types

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    system_instruction: GeminiSystemInstruction<'a>,
    contents: &'a [Message],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<GeminiTool<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiSystemInstruction<'a> {
    parts: Vec<GeminiTextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiTextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GeminiTool<'a> {
    function_declarations: &'a [ToolDefinition],
}

// Gemini API response types

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,

    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<GeminiUsage>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Message,
}

#[derive(Debug, Deserialize)]
struct GeminiUsage {
    #[serde(rename = "promptTokenCount", default)]
    prompt_token_count: u64,

    #[serde(rename = "candidatesTokenCount", default)]
    candidates_token_count: u64,
}
