/*!
 * Inference providers.
 *
 * - `ollama`: HTTP client for a local Ollama server
 * - `mock`: scripted provider for tests and dry runs
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for inference providers
///
/// The labeler only depends on this trait, so the HTTP client can be swapped
/// for the mock provider in tests.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Generate a completion for a single prompt
    ///
    /// # Arguments
    /// * `request` - Model name and prompt
    ///
    /// # Returns
    /// * `Result<GenerationResponse, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: GenerationRequest) -> Result<GenerationResponse, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Extract text from the provider response
    fn extract_text(response: &GenerationResponse) -> String
    where
        Self: Sized,
    {
        response.response.clone()
    }
}

pub mod ollama;
pub mod mock;

pub use ollama::{GenerationRequest, GenerationResponse, Ollama};
pub use mock::{MockBehavior, MockProvider};
