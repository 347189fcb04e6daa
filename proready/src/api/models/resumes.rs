//! API models for resume generation.
//!
//! [`ResumePayload`] doubles as the request body (the user's raw details) and
//! the structured document the model returns; every field is defaulted so a
//! partially filled payload still parses. Aliases accept the camelCase keys
//! the model is prompted to emit.

use crate::db::models::resumes::ResumeDBResponse;
use crate::errors::Error;
use crate::types::ResumeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub portfolio: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub year: String,
    pub cgpa: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub role: String,
    pub company: String,
    pub duration: String,
    pub highlights: Vec<String>,
}

/// A complete resume document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumePayload {
    #[serde(alias = "personalInfo")]
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub education: Vec<Education>,
    pub skills: Skills,
    pub projects: Vec<Project>,
    pub experience: Vec<Experience>,
    pub certifications: Vec<String>,
    pub achievements: Vec<String>,
}

/// Public representation of a stored resume
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeResponse {
    pub id: ResumeId,
    pub payload: ResumePayload,
    /// Where the rendered PDF can be downloaded
    pub pdf_url: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ResumeDBResponse> for ResumeResponse {
    type Error = Error;

    fn try_from(resume: ResumeDBResponse) -> Result<Self, Error> {
        let payload = serde_json::from_value(resume.payload).map_err(|e| Error::Internal {
            operation: format!("decode stored resume payload: {e}"),
        })?;

        Ok(Self {
            id: resume.id,
            pdf_url: format!("/api/ai/resume/{}/pdf", resume.id),
            payload,
            created_at: resume.created_at,
        })
    }
}
