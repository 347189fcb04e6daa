//! Generative AI integration: HTTP client, prompt building, and output parsing.

pub mod client;
pub mod extract;
pub mod fallback;
pub mod prompts;

pub use client::{AiError, GenerativeClient};
