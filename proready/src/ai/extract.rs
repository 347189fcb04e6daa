//! Extraction of JSON documents from model output.
//!
//! Models frequently wrap JSON in markdown code fences or surround it with
//! prose. We strip the fences, then take the span from the first `{` to the
//! last `}` before parsing.

use anyhow::{Context, bail};
use serde::de::DeserializeOwned;

/// Parse a typed value out of raw model output.
pub fn parse_model_json<T: DeserializeOwned>(raw: &str) -> anyhow::Result<T> {
    let cleaned = raw.replace("```json", "").replace("```", "");

    let start = cleaned.find('{').context("no JSON object in model output")?;
    let end = cleaned.rfind('}').context("unterminated JSON object in model output")?;
    if end < start {
        bail!("no JSON object in model output");
    }

    serde_json::from_str(&cleaned[start..=end]).context("model output is not valid JSON")
}
