use std::time::Instant;

use async_trait::async_trait;
use jiaofu_config::VendorSettings;
use jiaofu_core::{JiaofuError, OcrProvider, OcrRequest, OcrResponse};
use jiaofu_logging::redact_sensitive_data;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::prompt::OCR_SYSTEM_PROMPT;

/// Volcengine Ark chat-completion provider configured for OCR.
///
/// Any OpenAI-compatible `/chat/completions` endpoint that accepts
/// `image_url` content parts works.
pub struct ArkProvider {
    client: Client,
    settings: VendorSettings,
}

impl ArkProvider {
    pub fn new(settings: VendorSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.effective_api_base().trim_end_matches('/')
        )
    }

    fn check_settings(&self) -> Result<(), JiaofuError> {
        if self.settings.api_key.trim().is_empty() {
            return Err(JiaofuError::Configuration("API key is required".into()));
        }
        if self.settings.model.trim().is_empty() {
            return Err(JiaofuError::Configuration("Model name is required".into()));
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: MessageContent<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(&'a str),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[async_trait]
impl OcrProvider for ArkProvider {
    fn name(&self) -> &str {
        "ark"
    }

    async fn recognize(&self, request: &OcrRequest) -> Result<OcrResponse, JiaofuError> {
        self.check_settings()?;
        let start = Instant::now();

        let body = ChatRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(OCR_SYSTEM_PROMPT),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Parts(vec![ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: &request.image_data,
                        },
                    }]),
                },
            ],
        };

        debug!(model = %self.settings.model, "Sending OCR request to Ark");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                JiaofuError::Upstream(format!("failed to create chat completion: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(JiaofuError::Upstream(format!(
                "vendor returned {status}: {}",
                redact_sensitive_data(&error_body)
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| JiaofuError::Upstream(format!("failed to parse vendor response: {e}")))?;

        let text = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(JiaofuError::EmptyResponse)?;

        let latency_ms = start.elapsed().as_millis() as u64;
        debug!(latency_ms, chars = text.chars().count(), "Ark OCR completed");

        Ok(OcrResponse {
            text,
            provider: "ark".to_string(),
            model: self.settings.model.clone(),
            latency_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn settings(base: &str) -> VendorSettings {
        VendorSettings {
            api_key: "ak-test".into(),
            api_base: format!("{base}/api/v3/"),
            model: "doubao-vision".into(),
        }
    }

    fn request() -> OcrRequest {
        OcrRequest {
            image_data: "http://x/y.png".into(),
        }
    }

    #[tokio::test]
    async fn returns_first_choice_verbatim() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v3/chat/completions")
            .match_header("authorization", "Bearer ak-test")
            .match_body(Matcher::AllOf(vec![
                Matcher::PartialJson(json!({ "model": "doubao-vision" })),
                Matcher::Regex(r#""role":"system""#.to_string()),
                Matcher::Regex(r#""type":"image_url","image_url":\{"url":"http://x/y\.png"\}"#.to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices":[{"message":{"role":"assistant","content":"  hello\n$x^2$"}},
                               {"message":{"role":"assistant","content":"second"}}]}"#,
            )
            .create_async()
            .await;

        let provider = ArkProvider::new(settings(&server.url()));
        let response = provider.recognize(&request()).await.unwrap();

        assert_eq!(response.text, "  hello\n$x^2$");
        assert_eq!(response.model, "doubao-vision");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn zero_choices_is_empty_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v3/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let provider = ArkProvider::new(settings(&server.url()));
        let err = provider.recognize(&request()).await.unwrap_err();
        assert!(matches!(err, JiaofuError::EmptyResponse));
    }

    #[tokio::test]
    async fn vendor_error_is_upstream() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v3/chat/completions")
            .with_status(503)
            .with_body("overloaded")
            .create_async()
            .await;

        let provider = ArkProvider::new(settings(&server.url()));
        let err = provider.recognize(&request()).await.unwrap_err();
        match err {
            JiaofuError::Upstream(msg) => assert!(msg.contains("503")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_credentials_fail_before_network() {
        let provider = ArkProvider::new(VendorSettings {
            api_key: String::new(),
            api_base: "http://127.0.0.1:9".into(),
            model: "m".into(),
        });
        let err = provider.recognize(&request()).await.unwrap_err();
        assert!(matches!(err, JiaofuError::Configuration(_)));

        let provider = ArkProvider::new(VendorSettings {
            api_key: "k".into(),
            api_base: String::new(),
            model: String::new(),
        });
        let err = provider.recognize(&request()).await.unwrap_err();
        assert!(matches!(err, JiaofuError::Configuration(_)));
    }

    #[test]
    fn empty_base_uses_vendor_default() {
        let provider = ArkProvider::new(VendorSettings {
            api_key: "k".into(),
            api_base: String::new(),
            model: "m".into(),
        });
        assert_eq!(
            provider.endpoint(),
            "https://ark.cn-beijing.volces.com/api/v3/chat/completions"
        );
    }
}
