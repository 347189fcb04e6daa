//! Prompt builders for the generative endpoints.
//!
//! Each prompt instructs the model to answer with a single JSON object whose
//! keys match what [`crate::ai::extract::parse_model_json`] will parse.

use crate::api::models::resumes::ResumePayload;
use crate::api::models::roadmaps::RoadmapGenerateRequest;

/// Prompt to polish raw user details into a professional resume document.
pub fn resume_prompt(details: &ResumePayload) -> String {
    let details_json = serde_json::to_string_pretty(details).unwrap_or_else(|_| "{}".to_string());

    format!(
        "You are a professional resume writer for students preparing for placements.\n\
         Rewrite the following candidate details into a polished, ATS-friendly resume.\n\
         Improve wording, keep every claim truthful to the input, and write a concise\n\
         professional summary.\n\n\
         Candidate details:\n{details_json}\n\n\
         Respond with ONLY a JSON object, no markdown, using exactly this structure:\n\
         {{\n\
           \"personalInfo\": {{\"name\": \"\", \"email\": \"\", \"phone\": \"\", \"linkedin\": \"\", \"github\": \"\", \"portfolio\": \"\"}},\n\
           \"summary\": \"\",\n\
           \"education\": [{{\"degree\": \"\", \"institution\": \"\", \"year\": \"\", \"cgpa\": \"\"}}],\n\
           \"skills\": {{\"technical\": [], \"soft\": []}},\n\
           \"projects\": [{{\"name\": \"\", \"description\": \"\", \"technologies\": [], \"link\": \"\"}}],\n\
           \"experience\": [{{\"role\": \"\", \"company\": \"\", \"duration\": \"\", \"highlights\": []}}],\n\
           \"certifications\": [],\n\
           \"achievements\": []\n\
         }}"
    )
}

/// Prompt to summarize raw study notes.
pub fn notes_prompt(text: &str) -> String {
    format!(
        "Summarize the following study notes for a student revising for technical\n\
         interviews. Be concise and keep technical terms intact.\n\n\
         Notes:\n{text}\n\n\
         Respond with ONLY a JSON object, no markdown, using exactly this structure:\n\
         {{\n\
           \"summary\": \"2-3 sentence summary\",\n\
           \"keyPoints\": [\"the most important takeaways\"],\n\
           \"importantConcepts\": [\"terms and concepts worth revising\"]\n\
         }}"
    )
}

/// Prompt to generate a week-by-week preparation roadmap.
pub fn roadmap_prompt(request: &RoadmapGenerateRequest) -> String {
    let focus_areas = if request.focus_areas.is_empty() {
        "no specific preference".to_string()
    } else {
        request.focus_areas.join(", ")
    };

    format!(
        "Create a week-by-week placement preparation roadmap.\n\
         Target role: {role}\n\
         Duration: {weeks} weeks\n\
         Available time: {hours} hours per week\n\
         Current level: {level}\n\
         Focus areas: {focus_areas}\n\n\
         Cover exactly {weeks} weeks, ordered from fundamentals to interview practice,\n\
         and keep each week achievable within the available hours.\n\n\
         Respond with ONLY a JSON object, no markdown, using exactly this structure:\n\
         {{\n\
           \"weeklyPlan\": [\n\
             {{\"week\": 1, \"title\": \"\", \"focus\": [], \"topics\": [], \"resources\": [], \"estimatedHours\": {hours}}}\n\
           ],\n\
           \"overallStrategy\": \"2-3 sentence summary of the approach\"\n\
         }}",
        role = request.target_role,
        weeks = request.duration_weeks,
        hours = request.hours_per_week,
        level = request.current_level,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_prompt_embeds_details() {
        let mut details = ResumePayload::default();
        details.personal_info.name = "Asha Rao".to_string();
        let prompt = resume_prompt(&details);

        assert!(prompt.contains("Asha Rao"));
        assert!(prompt.contains("personalInfo"));
    }

    #[test]
    fn test_notes_prompt_embeds_text() {
        let prompt = notes_prompt("B-trees keep data sorted");
        assert!(prompt.contains("B-trees keep data sorted"));
        assert!(prompt.contains("keyPoints"));
    }

    #[test]
    fn test_roadmap_prompt_embeds_parameters() {
        let request = RoadmapGenerateRequest {
            target_role: "SDE-1".to_string(),
            duration_weeks: 8,
            hours_per_week: 12,
            current_level: "intermediate".to_string(),
            focus_areas: vec!["DSA".to_string(), "System Design".to_string()],
        };
        let prompt = roadmap_prompt(&request);

        assert!(prompt.contains("SDE-1"));
        assert!(prompt.contains("8 weeks"));
        assert!(prompt.contains("DSA, System Design"));
        assert!(prompt.contains("weeklyPlan"));
    }

    #[test]
    fn test_roadmap_prompt_empty_focus_areas() {
        let request = RoadmapGenerateRequest {
            target_role: "SDE-1".to_string(),
            duration_weeks: 8,
            hours_per_week: 12,
            current_level: "beginner".to_string(),
            focus_areas: vec![],
        };
        assert!(roadmap_prompt(&request).contains("no specific preference"));
    }
}
