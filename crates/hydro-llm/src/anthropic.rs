use std::time::Duration;

use async_trait::async_trait;
use hydro_core::{HydroError, Result};
use reqwest::Client;
use tracing::debug;

use crate::provider::{GenerationProvider, GenerationRequest, GenerationResponse, Usage};

/// Anthropic Claude API provider.
pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl AnthropicProvider {
    /// Build a provider with the given API key and request timeout.
    /// The timeout is enforced here at the collaborator boundary; the
    /// pipeline itself never sets one.
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HydroError::Provider(format!("failed to build http client: {e}")))?;
        Ok(Self {
            client,
            api_key,
            base_url: "https://api.anthropic.com/v1".into(),
        })
    }

    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    fn build_request_body(&self, request: &GenerationRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": &request.model,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
            "messages": [{
                "role": "user",
                "content": &request.prompt,
            }],
        });
        if let Some(ref system) = request.system {
            body["system"] = serde_json::json!(system);
        }
        body
    }
}

#[async_trait]
impl GenerationProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn complete(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        let body = self.build_request_body(request);
        debug!(model = %request.model, "sending Anthropic API request");

        let resp = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    HydroError::CollaboratorUnavailable(format!("request timed out: {e}"))
                } else if e.is_connect() {
                    HydroError::CollaboratorUnavailable(format!("connection failed: {e}"))
                } else {
                    HydroError::Provider(e.to_string())
                }
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            if status.as_u16() == 429 {
                return Err(HydroError::RateLimited {
                    retry_after_secs: 30,
                });
            }
            return Err(HydroError::Provider(format!("HTTP {status}: {text}")));
        }

        let data: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| HydroError::Provider(e.to_string()))?;

        // Join all text blocks in the content array.
        let text = data["content"]
            .as_array()
            .map(|blocks| {
                blocks
                    .iter()
                    .filter_map(|b| {
                        if b["type"] == "text" {
                            b["text"].as_str().map(|s| s.to_string())
                        } else {
                            None
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let usage_data = &data["usage"];
        let usage = Usage {
            input_tokens: usage_data["input_tokens"].as_u64().unwrap_or(0) as u32,
            output_tokens: usage_data["output_tokens"].as_u64().unwrap_or(0) as u32,
        };

        Ok(GenerationResponse { text, usage })
    }

    async fn health_check(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(HydroError::CollaboratorUnavailable(
                "no Anthropic API key configured".into(),
            ));
        }
        Ok(())
    }
}
