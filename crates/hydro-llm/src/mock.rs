//! Mock generation provider for deterministic testing.
//!
//! Returns pre-configured responses without making any HTTP calls.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::provider::{GenerationProvider, GenerationRequest, GenerationResponse, Usage};
use hydro_core::{HydroError, Result};

/// A mock generation provider that returns pre-configured responses.
///
/// # Example
/// ```
/// use hydro_llm::MockProvider;
/// let provider = MockProvider::new("test")
///     .with_response("{\"schedule\": []}");
/// ```
pub struct MockProvider {
    responses: Arc<Mutex<Vec<MockResponse>>>,
    /// Track all requests received (for assertions in tests).
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
    name: String,
}

/// A pre-configured response from the mock provider.
#[derive(Clone)]
pub struct MockResponse {
    pub text: String,
    pub usage: Usage,
    /// If set, the provider will return this error instead.
    pub error: Option<String>,
}

impl Default for MockResponse {
    fn default() -> Self {
        Self {
            text: String::new(),
            usage: Usage {
                input_tokens: 100,
                output_tokens: 50,
            },
            error: None,
        }
    }
}

impl MockProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(vec![])),
            requests: Arc::new(Mutex::new(vec![])),
            name: name.into(),
        }
    }

    /// Queue a simple text response.
    pub fn with_response(self, text: &str) -> Self {
        self.responses.lock().unwrap().push(MockResponse {
            text: text.to_string(),
            ..Default::default()
        });
        self
    }

    /// Queue an error response.
    pub fn with_error(self, error: &str) -> Self {
        self.responses.lock().unwrap().push(MockResponse {
            error: Some(error.to_string()),
            ..Default::default()
        });
        self
    }

    /// Get all requests that were made to this provider.
    pub fn recorded_requests(&self) -> Arc<Mutex<Vec<GenerationRequest>>> {
        Arc::clone(&self.requests)
    }

    /// Number of completion calls this provider has received.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Pop the next queued response, or return a default "no response queued" message.
    fn next_response(&self) -> MockResponse {
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            MockResponse {
                text: "(mock: no more queued responses)".to_string(),
                ..Default::default()
            }
        } else {
            responses.remove(0)
        }
    }
}

#[async_trait]
impl GenerationProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let mock = self.next_response();

        if let Some(error) = mock.error {
            return Err(HydroError::Provider(error));
        }

        Ok(GenerationResponse {
            text: mock.text,
            usage: mock.usage,
        })
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
