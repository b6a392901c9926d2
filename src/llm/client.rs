//! Chat-completions client for answer generation and image analysis

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::errors::VtaError;
use crate::llm::ImageAnalyzer;
use crate::llm::LanguageModel;

/// Output-token ceiling for image descriptions.
const VISION_MAX_TOKENS: u32 = 500;

/// Client for an OpenAI-compatible chat-completions API
pub struct LlmClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    vision_model: String,
    vision_instruction: String,
}

impl LlmClient {
    /// Create a new LLM client
    ///
    /// # Errors
    /// - HTTP client build errors (invalid configuration)
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.llm.timeout_secs))
            .build()
            .map_err(|e| VtaError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.llm.endpoint.trim_end_matches('/').to_string(),
            api_key: config.llm.api_key.clone(),
            model: config.llm.model.clone(),
            vision_model: config.llm.vision_model.clone(),
            vision_instruction: format!(
                "Analyze this image in the context of a {} course.",
                config.course_name()
            ),
        })
    }
}

#[async_trait]
impl LanguageModel for LlmClient {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String> {
        #[derive(Serialize)]
        struct ChatRequest<'a> {
            model: &'a str,
            messages: Vec<ChatMessage<'a>>,
            temperature: f32,
            max_tokens: u32,
        }

        #[derive(Serialize)]
        struct ChatMessage<'a> {
            role: &'a str,
            content: &'a str,
        }

        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<Choice>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: ChoiceMessage,
        }

        #[derive(Deserialize)]
        struct ChoiceMessage {
            content: Option<String>,
        }

        let url = format!("{}/chat/completions", self.endpoint);
        debug!("Calling chat completions API: model={}", self.model);

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature,
            max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| VtaError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(VtaError::LlmError(format!(
                "Chat API error ({status}): {error_text}"
            )));
        }

        let result: ChatResponse = response
            .json()
            .await
            .map_err(|e| VtaError::LlmError(format!("Failed to parse response: {e}")))?;

        result
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or_else(|| VtaError::LlmError("No choices in response".to_string()))
    }
}

#[async_trait]
impl ImageAnalyzer for LlmClient {
    async fn describe(&self, encoded_image: &str) -> Result<String> {
        #[derive(Serialize)]
        struct VisionRequest<'a> {
            model: &'a str,
            messages: Vec<VisionMessage<'a>>,
            max_tokens: u32,
        }

        #[derive(Serialize)]
        struct VisionMessage<'a> {
            role: &'a str,
            content: Vec<ContentPart<'a>>,
        }

        #[derive(Serialize)]
        #[serde(tag = "type")]
        enum ContentPart<'a> {
            #[serde(rename = "text")]
            Text { text: &'a str },
            #[serde(rename = "image_url")]
            ImageUrl { image_url: ImageUrl },
        }

        #[derive(Serialize)]
        struct ImageUrl {
            url: String,
        }

        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<Choice>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: ChoiceMessage,
        }

        #[derive(Deserialize)]
        struct ChoiceMessage {
            content: Option<String>,
        }

        let url = format!("{}/chat/completions", self.endpoint);
        debug!(
            "Calling chat completions API for image analysis: model={}",
            self.vision_model
        );

        let request = VisionRequest {
            model: &self.vision_model,
            messages: vec![VisionMessage {
                role: "user",
                content: vec![
                    ContentPart::Text {
                        text: &self.vision_instruction,
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: format!("data:image/jpeg;base64,{encoded_image}"),
                        },
                    },
                ],
            }],
            max_tokens: VISION_MAX_TOKENS,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| VtaError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(VtaError::LlmError(format!(
                "Vision API error ({status}): {error_text}"
            )));
        }

        let result: ChatResponse = response
            .json()
            .await
            .map_err(|e| VtaError::LlmError(format!("Failed to parse response: {e}")))?;

        result
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or_else(|| VtaError::LlmError("No choices in response".to_string()))
    }
}
