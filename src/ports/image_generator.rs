//! Image Generator Port - provider-side image generation.
//!
//! The diffusion model itself is an external service; this port only carries
//! a prompt out and PNG bytes back.

use async_trait::async_trait;

use super::ModelError;

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate one image for the prompt and return the encoded bytes.
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, ModelError>;
}
