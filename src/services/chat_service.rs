use serde_json::{json, Value};

use crate::config::ChatConfig;
use crate::error::AppError;
use crate::models::{ChatMessage, IncomingMessage};

/// Stateless translator in front of the external completion API: normalize
/// the client's conversation history, forward it with fixed sampling
/// parameters, hand the upstream JSON back verbatim.
pub struct ChatRelay {
    client: reqwest::Client,
    config: ChatConfig,
}

impl ChatRelay {
    pub fn new(config: ChatConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::Upstream {
                message: "cannot build HTTP client".to_string(),
                details: e.to_string(),
            })?;

        Ok(Self { client, config })
    }

    /// Normalize a history into the canonical `{role, content}` shape,
    /// tolerating both incoming field-naming conventions. An empty history
    /// or a turn without any content is rejected.
    pub fn normalize(history: &[IncomingMessage]) -> Result<Vec<ChatMessage>, AppError> {
        if history.is_empty() {
            return Err(AppError::Validation(
                "messages must be a non-empty array".to_string(),
            ));
        }

        history
            .iter()
            .map(|msg| {
                let role = match (&msg.role, &msg.sender) {
                    (Some(role), _) => role.clone(),
                    (None, Some(sender)) if sender == "user" => "user".to_string(),
                    (None, _) => "assistant".to_string(),
                };

                let content = msg
                    .content
                    .clone()
                    .or_else(|| msg.text.clone())
                    .ok_or_else(|| {
                        AppError::Validation("message entry has no content".to_string())
                    })?;

                Ok(ChatMessage { role, content })
            })
            .collect()
    }

    /// Forward the history to the completion endpoint and return its JSON
    /// body untouched. No retry, no rate limiting.
    pub async fn forward(&self, history: &[IncomingMessage]) -> Result<Value, AppError> {
        let messages = Self::normalize(history)?;
        log::info!("relaying {} chat turns upstream", messages.len());

        let body = json!({
            "model": self.config.model,
            "messages": messages,
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
            "stream": false,
            "do_sample": true,
        });

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Upstream {
                message: "completion API request failed".to_string(),
                details: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            log::error!("completion API returned {}: {}", status, details);
            return Err(AppError::Upstream {
                message: format!("completion API returned status {}", status),
                details,
            });
        }

        response.json::<Value>().await.map_err(|e| AppError::Upstream {
            message: "completion API returned malformed JSON".to_string(),
            details: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(
        role: Option<&str>,
        sender: Option<&str>,
        content: Option<&str>,
        text: Option<&str>,
    ) -> IncomingMessage {
        IncomingMessage {
            role: role.map(String::from),
            sender: sender.map(String::from),
            content: content.map(String::from),
            text: text.map(String::from),
        }
    }

    #[test]
    fn test_normalize_role_content_convention() {
        let history = vec![turn(Some("user"), None, Some("hello"), None)];
        let out = ChatRelay::normalize(&history).unwrap();
        assert_eq!(
            out,
            vec![ChatMessage {
                role: "user".to_string(),
                content: "hello".to_string()
            }]
        );
    }

    #[test]
    fn test_normalize_sender_text_convention() {
        let history = vec![
            turn(None, Some("user"), None, Some("hi")),
            turn(None, Some("ai"), None, Some("hello there")),
        ];
        let out = ChatRelay::normalize(&history).unwrap();
        assert_eq!(out[0].role, "user");
        assert_eq!(out[1].role, "assistant");
        assert_eq!(out[1].content, "hello there");
    }

    #[test]
    fn test_normalize_prefers_explicit_role() {
        let history = vec![turn(Some("assistant"), Some("user"), Some("mixed"), None)];
        let out = ChatRelay::normalize(&history).unwrap();
        assert_eq!(out[0].role, "assistant");
    }

    #[test]
    fn test_normalize_rejects_empty_history() {
        let result = ChatRelay::normalize(&[]);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_normalize_rejects_contentless_turn() {
        let history = vec![turn(Some("user"), None, None, None)];
        let result = ChatRelay::normalize(&history);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
