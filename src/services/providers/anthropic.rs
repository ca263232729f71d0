/// Anthropic Messages API binding for `TextUnderstandingService`
///
/// Every call runs at temperature 0 with a system instruction asking for JSON
/// only. The first text block of the reply is parsed as JSON after stripping an
/// optional markdown code fence.
use crate::{
    error::{AppError, AppResult},
    services::providers::{strip_code_fence, TextUnderstandingService},
};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const SYSTEM_PROMPT: &str = "You are a specialized JSON generator. \
Always respond with a single valid, parseable JSON value and nothing else.";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Clone)]
pub struct AnthropicClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicClient {
    pub fn new(api_key: String, api_url: String, model: String, max_tokens: u32) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            model,
            max_tokens,
        }
    }

    /// Pulls the JSON payload out of a Messages API response
    fn parse_response(response: MessagesResponse) -> AppResult<serde_json::Value> {
        let text = response
            .content
            .into_iter()
            .find(|block| block.block_type == "text")
            .and_then(|block| block.text)
            .ok_or_else(|| {
                AppError::Extraction("response contained no text block".to_string())
            })?;

        let payload = strip_code_fence(&text);
        serde_json::from_str(payload).map_err(|e| {
            tracing::debug!(response = %text, "Unparseable model output");
            AppError::Extraction(format!("model output is not valid JSON: {}", e))
        })
    }
}

#[async_trait::async_trait]
impl TextUnderstandingService for AnthropicClient {
    async fn analyze(&self, prompt: &str) -> AppResult<serde_json::Value> {
        let url = format!("{}/v1/messages", self.api_url);
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            temperature: 0.0,
            system: SYSTEM_PROMPT,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .http_client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Anthropic API returned status {}: {}",
                status, body
            )));
        }

        let messages: MessagesResponse = response.json().await?;
        let value = Self::parse_response(messages)?;

        tracing::info!(
            model = %self.model,
            provider = self.name(),
            "Text analysis completed"
        );

        Ok(value)
    }

    fn name(&self) -> &'static str {
        "anthropic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with_text(text: &str) -> MessagesResponse {
        MessagesResponse {
            content: vec![ContentBlock {
                block_type: "text".to_string(),
                text: Some(text.to_string()),
            }],
        }
    }

    #[test]
    fn test_parse_response_plain_json() {
        let value = AnthropicClient::parse_response(response_with_text(
            r#"{"mainTopics": ["rust"], "specificConcepts": [], "relatedTerms": []}"#,
        ))
        .unwrap();
        assert_eq!(value["mainTopics"][0], "rust");
    }

    #[test]
    fn test_parse_response_fenced_json() {
        let value =
            AnthropicClient::parse_response(response_with_text("```json\n[7, 3]\n```")).unwrap();
        assert_eq!(value, serde_json::json!([7, 3]));
    }

    #[test]
    fn test_parse_response_prose_is_extraction_failure() {
        let result = AnthropicClient::parse_response(response_with_text(
            "Sure! Here are the keywords you asked for.",
        ));
        assert!(matches!(result, Err(AppError::Extraction(_))));
    }

    #[test]
    fn test_parse_response_without_text_block() {
        let response = MessagesResponse {
            content: vec![ContentBlock {
                block_type: "tool_use".to_string(),
                text: None,
            }],
        };
        let result = AnthropicClient::parse_response(response);
        assert!(matches!(result, Err(AppError::Extraction(_))));
    }

    #[test]
    fn test_messages_response_deserialization() {
        let json = r#"{
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "content": [{"type": "text", "text": "{\"ok\": true}"}],
            "stop_reason": "end_turn"
        }"#;

        let response: MessagesResponse = serde_json::from_str(json).unwrap();
        let value = AnthropicClient::parse_response(response).unwrap();
        assert_eq!(value["ok"], true);
    }
}
