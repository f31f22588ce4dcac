//! Mock provider implementation for testing.

use super::{FinishReason, GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock text provider for testing.
///
/// Returns a canned reply (or a forced failure) and counts how many times
/// `generate` was invoked, so tests can assert that invalid input never
/// reaches the provider.
pub struct MockTextProvider {
    reply: Result<String, String>,
    calls: Arc<AtomicUsize>,
}

impl MockTextProvider {
    /// A provider that always answers with the given text.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A provider whose calls always fail with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared handle to the call counter; survives moving the provider
    /// into an `Arc<dyn TextProvider>`.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.reply {
            Ok(text) => Ok(ProviderResponse {
                text: Some(text.clone()),
                input_tokens: prompt.len() as i32 / 4,
                output_tokens: text.len() as i32 / 4,
                finish_reason: FinishReason::Complete,
            }),
            Err(message) => Err(ProviderError::ApiError(message.clone())),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        match &self.reply {
            Ok(_) => Ok(()),
            Err(message) => Err(ProviderError::ApiError(message.clone())),
        }
    }
}
