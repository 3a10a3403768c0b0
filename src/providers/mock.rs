/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockProvider::fixed()` - Always answers with the same text
 * - `MockProvider::scripted()` - Replays a list of answers and failures in order
 * - `MockProvider::intermittent()` - Fails every Nth request
 * - `MockProvider::failing()` - Always fails with an error
 */

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::providers::{GenerationRequest, GenerationResponse, Provider};

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always answers with the given text
    Fixed(String),
    /// Answers with the given text but fails every Nth request
    Intermittent { answer: String, fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Replays queued outcomes; `None` entries simulate a network failure
    Scripted,
}

/// Mock provider for testing labeling behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter, shared between clones
    request_count: Arc<AtomicUsize>,
    /// Queued outcomes for `Scripted`
    script: Arc<Mutex<VecDeque<Option<String>>>>,
    /// Prompts received, in order
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            script: Arc::new(Mutex::new(VecDeque::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that always answers `answer`
    pub fn fixed(answer: impl Into<String>) -> Self {
        Self::new(MockBehavior::Fixed(answer.into()))
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(answer: impl Into<String>, fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent {
            answer: answer.into(),
            fail_every: fail_every.max(1),
        })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock replaying `outcomes` in order; `None` is a failure.
    /// Once the script runs out every request fails.
    pub fn scripted<I, S>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let provider = Self::new(MockBehavior::Scripted);
        if let Ok(mut script) = provider.script.lock() {
            script.extend(outcomes.into_iter().map(|o| o.map(Into::into)));
        }
        provider
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Prompts received so far, in order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    fn simulated_failure(count: usize) -> ProviderError {
        ProviderError::ConnectionError(format!("Simulated network failure (request #{})", count + 1))
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior.clone(),
            request_count: Arc::clone(&self.request_count),
            script: Arc::clone(&self.script),
            prompts: Arc::clone(&self.prompts),
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, request: GenerationRequest) -> Result<GenerationResponse, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(request.prompt.clone());
        }

        match &self.behavior {
            MockBehavior::Fixed(answer) => Ok(GenerationResponse::from_text(answer.clone())),

            MockBehavior::Intermittent { answer, fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(Self::simulated_failure(count))
                } else {
                    Ok(GenerationResponse::from_text(answer.clone()))
                }
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            }),

            MockBehavior::Scripted => {
                let next = self.script.lock().ok().and_then(|mut s| s.pop_front());
                match next {
                    Some(Some(answer)) => Ok(GenerationResponse::from_text(answer)),
                    _ => Err(Self::simulated_failure(count)),
                }
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError("Simulated provider offline".to_string())),
            _ => Ok(()),
        }
    }
}
