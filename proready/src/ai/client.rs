//! HTTP client for a Gemini-shaped `generateContent` API.

use crate::config::AiConfig;
use crate::errors::Error;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use tracing::instrument;
use url::Url;

/// Errors from the generative backend.
///
/// All variants surface to the API as 502; the distinction is for logs.
#[derive(ThisError, Debug)]
pub enum AiError {
    #[error("no API key configured for the generative backend")]
    MissingApiKey,

    #[error("could not build generative backend endpoint from base url: {0}")]
    InvalidEndpoint(url::ParseError),

    #[error("request to generative backend failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generative backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("generative backend returned a response with no candidate text")]
    EmptyResponse,
}

impl From<AiError> for Error {
    fn from(err: AiError) -> Self {
        Error::Upstream { message: err.to_string() }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Client for the `models/{model}:generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GenerativeClient {
    http: reqwest::Client,
    base_url: Url,
    model: String,
    api_key: Option<String>,
}

impl GenerativeClient {
    pub fn new(config: &AiConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self) -> Result<Url, AiError> {
        let api_key = self.api_key.as_deref().ok_or(AiError::MissingApiKey)?;

        let mut url = self
            .base_url
            .join(&format!("v1beta/models/{}:generateContent", self.model))
            .map_err(AiError::InvalidEndpoint)?;
        url.query_pairs_mut().append_pair("key", api_key);
        Ok(url)
    }

    /// Send a prompt and return the first candidate's text.
    #[instrument(skip_all, fields(model = %self.model, prompt_chars = prompt.len()))]
    pub async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        let url = self.endpoint()?;
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self.http.post(url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.is_empty())
            .ok_or(AiError::EmptyResponse)?;

        Ok(text)
    }
}
