//! Resume PDF rendering.
//!
//! Draws the structured resume onto A4 pages with a downward cursor,
//! starting a new page when the cursor reaches the bottom margin.

use crate::api::models::resumes::ResumePayload;
use crate::errors::Error;
use printpdf::{BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Point, Rgb};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 18.0;
// Line width before wrapping, tuned for Helvetica at body size
const WRAP_COLUMNS: usize = 92;

struct Renderer {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl Renderer {
    fn new() -> Result<Self, Error> {
        let (doc, page, layer) = PdfDocument::new("Resume", Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "content");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT_MM - MARGIN_MM,
        })
    }

    fn ensure_space(&mut self, needed_mm: f32) {
        if self.y - needed_mm < MARGIN_MM {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "content");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT_MM - MARGIN_MM;
        }
    }

    fn line(&mut self, text: &str, size_pt: f32, bold: bool) {
        // Point size to line advance in mm, with a little leading
        let advance = size_pt * 0.3528 * 1.35;
        let font = if bold { self.bold.clone() } else { self.regular.clone() };

        for wrapped in wrap(text, WRAP_COLUMNS) {
            self.ensure_space(advance);
            self.layer.use_text(wrapped, size_pt, Mm(MARGIN_MM), Mm(self.y - advance), &font);
            self.y -= advance;
        }
    }

    fn heading(&mut self, text: &str) {
        self.spacer(3.0);
        self.line(text, 13.0, true);
        self.rule();
        self.spacer(1.5);
    }

    fn rule(&mut self) {
        self.ensure_space(2.0);
        self.layer.set_outline_color(Color::Rgb(Rgb::new(0.3, 0.3, 0.3, None)));
        self.layer.set_outline_thickness(0.4);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(MARGIN_MM), Mm(self.y)), false),
                (Point::new(Mm(PAGE_WIDTH_MM - MARGIN_MM), Mm(self.y)), false),
            ],
            is_closed: false,
        });
        self.y -= 1.5;
    }

    fn spacer(&mut self, mm: f32) {
        self.ensure_space(mm);
        self.y -= mm;
    }

    fn finish(self) -> Result<Vec<u8>, Error> {
        self.doc.save_to_bytes().map_err(pdf_error)
    }
}

fn pdf_error<E: std::fmt::Display>(e: E) -> Error {
    Error::Internal {
        operation: format!("render resume PDF: {e}"),
    }
}

/// Greedy word wrap at `columns` characters; never splits a word.
fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= columns {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Render a resume document to PDF bytes.
pub fn render_resume(resume: &ResumePayload) -> Result<Vec<u8>, Error> {
    let mut r = Renderer::new()?;

    let name = if resume.personal_info.name.trim().is_empty() {
        "Resume"
    } else {
        resume.personal_info.name.trim()
    };
    r.line(name, 20.0, true);

    let contact: Vec<&str> = [
        Some(resume.personal_info.email.as_str()).filter(|s| !s.is_empty()),
        Some(resume.personal_info.phone.as_str()).filter(|s| !s.is_empty()),
        resume.personal_info.linkedin.as_deref().filter(|s| !s.is_empty()),
        resume.personal_info.github.as_deref().filter(|s| !s.is_empty()),
        resume.personal_info.portfolio.as_deref().filter(|s| !s.is_empty()),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !contact.is_empty() {
        r.line(&contact.join("  |  "), 9.5, false);
    }

    if !resume.summary.trim().is_empty() {
        r.heading("Summary");
        r.line(&resume.summary, 10.5, false);
    }

    if !resume.education.is_empty() {
        r.heading("Education");
        for edu in &resume.education {
            r.line(&format!("{} - {}", edu.degree, edu.institution), 10.5, true);
            let mut detail = edu.year.clone();
            if let Some(cgpa) = edu.cgpa.as_deref().filter(|s| !s.is_empty()) {
                detail = format!("{detail}  |  CGPA: {cgpa}");
            }
            r.line(&detail, 9.5, false);
            r.spacer(1.5);
        }
    }

    if !resume.skills.technical.is_empty() || !resume.skills.soft.is_empty() {
        r.heading("Skills");
        if !resume.skills.technical.is_empty() {
            r.line(&format!("Technical: {}", resume.skills.technical.join(", ")), 10.5, false);
        }
        if !resume.skills.soft.is_empty() {
            r.line(&format!("Soft skills: {}", resume.skills.soft.join(", ")), 10.5, false);
        }
    }

    if !resume.projects.is_empty() {
        r.heading("Projects");
        for project in &resume.projects {
            r.line(&project.name, 10.5, true);
            if !project.description.is_empty() {
                r.line(&project.description, 10.0, false);
            }
            if !project.technologies.is_empty() {
                r.line(&format!("Technologies: {}", project.technologies.join(", ")), 9.5, false);
            }
            if let Some(link) = project.link.as_deref().filter(|s| !s.is_empty()) {
                r.line(link, 9.5, false);
            }
            r.spacer(1.5);
        }
    }

    if !resume.experience.is_empty() {
        r.heading("Experience");
        for exp in &resume.experience {
            r.line(&format!("{} - {}", exp.role, exp.company), 10.5, true);
            if !exp.duration.is_empty() {
                r.line(&exp.duration, 9.5, false);
            }
            for highlight in &exp.highlights {
                r.line(&format!("- {highlight}"), 10.0, false);
            }
            r.spacer(1.5);
        }
    }

    if !resume.certifications.is_empty() {
        r.heading("Certifications");
        for cert in &resume.certifications {
            r.line(&format!("- {cert}"), 10.0, false);
        }
    }

    if !resume.achievements.is_empty() {
        r.heading("Achievements");
        for achievement in &resume.achievements {
            r.line(&format!("- {achievement}"), 10.0, false);
        }
    }

    r.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::resumes::{Education, Project};

    fn sample_resume() -> ResumePayload {
        let mut resume = ResumePayload::default();
        resume.personal_info.name = "Asha Rao".to_string();
        resume.personal_info.email = "asha@example.com".to_string();
        resume.summary = "Final-year student focused on backend systems.".to_string();
        resume.education.push(Education {
            degree: "B.Tech CSE".to_string(),
            institution: "NIT Trichy".to_string(),
            year: "2026".to_string(),
            cgpa: Some("8.9".to_string()),
        });
        resume.skills.technical = vec!["Rust".to_string(), "PostgreSQL".to_string()];
        resume.projects.push(Project {
            name: "ProReady".to_string(),
            description: "Placement preparation tracker.".to_string(),
            technologies: vec!["Axum".to_string()],
            link: None,
        });
        resume
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let bytes = render_resume(&sample_resume()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_render_empty_resume() {
        let bytes = render_resume(&ResumePayload::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_long_resume_spans_pages() {
        let mut resume = sample_resume();
        for i in 0..200 {
            resume.achievements.push(format!("Achievement number {i} with a reasonably long description attached to it"));
        }
        let bytes = render_resume(&resume).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_wrap_never_splits_words() {
        let lines = wrap("alpha beta gamma delta", 11);
        assert_eq!(lines, vec!["alpha beta".to_string(), "gamma delta".to_string()]);
    }

    #[test]
    fn test_wrap_empty_text() {
        assert_eq!(wrap("", 80), vec![String::new()]);
    }
}
