//! OpenAI-compatible model provider.

mod openai;

pub use openai::OpenAiProvider;
