//! Deterministic resume assembly used when the model is unavailable.
//!
//! Resume generation must always produce a document, so when the backend
//! errors or returns unparseable output we fall back to the user's own
//! details with a templated summary.

use crate::api::models::resumes::ResumePayload;

/// Build a resume directly from the submitted details.
pub fn resume_from_details(details: &ResumePayload) -> ResumePayload {
    let mut resume = details.clone();

    if resume.summary.trim().is_empty() {
        resume.summary = template_summary(details);
    }

    resume
}

fn template_summary(details: &ResumePayload) -> String {
    let name = if details.personal_info.name.trim().is_empty() {
        "Motivated candidate".to_string()
    } else {
        details.personal_info.name.trim().to_string()
    };

    let skills = details
        .skills
        .technical
        .iter()
        .take(3)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    if skills.is_empty() {
        format!("{name} is a motivated student seeking opportunities to apply and grow their technical skills.")
    } else {
        format!("{name} is a motivated student with hands-on experience in {skills}, seeking opportunities to apply and grow these skills.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_submitted_details() {
        let mut details = ResumePayload::default();
        details.personal_info.name = "Asha Rao".to_string();
        details.certifications = vec!["AWS CCP".to_string()];

        let resume = resume_from_details(&details);
        assert_eq!(resume.personal_info.name, "Asha Rao");
        assert_eq!(resume.certifications, vec!["AWS CCP".to_string()]);
    }

    #[test]
    fn test_fills_summary_with_skills() {
        let mut details = ResumePayload::default();
        details.personal_info.name = "Asha Rao".to_string();
        details.skills.technical = vec!["Rust".to_string(), "SQL".to_string(), "Docker".to_string(), "Go".to_string()];

        let resume = resume_from_details(&details);
        assert!(resume.summary.contains("Asha Rao"));
        assert!(resume.summary.contains("Rust, SQL, Docker"));
        assert!(!resume.summary.contains("Go"));
    }

    #[test]
    fn test_keeps_existing_summary() {
        let mut details = ResumePayload::default();
        details.summary = "Already written.".to_string();

        let resume = resume_from_details(&details);
        assert_eq!(resume.summary, "Already written.");
    }

    #[test]
    fn test_empty_details_still_produce_summary() {
        let resume = resume_from_details(&ResumePayload::default());
        assert!(!resume.summary.is_empty());
    }
}
