//! Document Renderer — turns a presentation document into a self-contained
//! HTML email body.
//!
//! Pure and deterministic: no I/O, and identical input yields byte-identical
//! output. Every interpolated value passes through `escape_html`; candidate
//! and generator text are both untrusted here.

use crate::models::presentation::PresentationContent;

const STYLESHEET: &str = "\
          body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; max-width: 800px; margin: 0 auto; padding: 20px; }\n\
          .header { background: #2563EB; color: white; padding: 20px; border-radius: 8px; margin-bottom: 20px; }\n\
          .section { margin-bottom: 30px; }\n\
          .section h2 { color: #2563EB; border-bottom: 2px solid #2563EB; padding-bottom: 5px; }\n\
          .experience-item { background: #f8f9fa; padding: 15px; margin-bottom: 15px; border-radius: 5px; }\n\
          .skills-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 15px; }\n\
          .skill-category { background: #e3f2fd; padding: 10px; border-radius: 5px; }\n\
          .contact-info { background: #f0f0f0; padding: 15px; border-radius: 5px; }\n\
          ul { padding-left: 20px; }\n\
          li { margin-bottom: 5px; }";

/// HTML-escapes a value for interpolation into element content or a
/// double-quoted attribute.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the full presentation document. Section order is fixed:
/// header, summary, experience, skills, achievements, education,
/// recommendations, availability/compensation, contact.
pub fn render_presentation(title: &str, content: &PresentationContent) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n<title>Candidate Presentation</title>\n");
    html.push_str("<style>\n");
    html.push_str(STYLESHEET);
    html.push_str("\n</style>\n</head>\n<body>\n");

    html.push_str(&format!(
        "<div class=\"header\">\n<h1>{}</h1>\n<p>{}</p>\n</div>\n",
        escape_html(&content.candidate_name),
        escape_html(title)
    ));

    html.push_str(&format!(
        "<div class=\"section\">\n<h2>Executive Summary</h2>\n<p>{}</p>\n</div>\n",
        escape_html(&content.summary)
    ));

    html.push_str("<div class=\"section\">\n<h2>Professional Experience</h2>\n");
    for item in &content.experience {
        html.push_str(&format!(
            "<div class=\"experience-item\">\n<h3>{} at {}</h3>\n<p><strong>Duration:</strong> {}</p>\n<p>{}</p>\n<ul>\n",
            escape_html(&item.title),
            escape_html(&item.company),
            escape_html(&item.duration),
            escape_html(&item.description)
        ));
        for achievement in &item.achievements {
            html.push_str(&format!("<li>{}</li>\n", escape_html(achievement)));
        }
        html.push_str("</ul>\n</div>\n");
    }
    html.push_str("</div>\n");

    html.push_str("<div class=\"section\">\n<h2>Skills &amp; Expertise</h2>\n<div class=\"skills-grid\">\n");
    for category in &content.skills {
        html.push_str(&format!(
            "<div class=\"skill-category\">\n<h4>{} ({})</h4>\n<ul>\n",
            escape_html(&category.category),
            category.level.as_str()
        ));
        for skill in &category.skills {
            html.push_str(&format!("<li>{}</li>\n", escape_html(skill)));
        }
        html.push_str("</ul>\n</div>\n");
    }
    html.push_str("</div>\n</div>\n");

    html.push_str("<div class=\"section\">\n<h2>Key Achievements</h2>\n<ul>\n");
    for achievement in &content.achievements {
        html.push_str(&format!("<li>{}</li>\n", escape_html(achievement)));
    }
    html.push_str("</ul>\n</div>\n");

    html.push_str("<div class=\"section\">\n<h2>Education</h2>\n");
    for entry in &content.education {
        let gpa = entry
            .gpa
            .as_deref()
            .map(|g| format!(" - GPA: {}", escape_html(g)))
            .unwrap_or_default();
        html.push_str(&format!(
            "<p><strong>{}</strong> - {} ({}){}</p>\n",
            escape_html(&entry.degree),
            escape_html(&entry.institution),
            escape_html(&entry.year),
            gpa
        ));
    }
    html.push_str("</div>\n");

    html.push_str("<div class=\"section\">\n<h2>Why This Candidate?</h2>\n<ul>\n");
    for recommendation in &content.recommendations {
        html.push_str(&format!("<li>{}</li>\n", escape_html(recommendation)));
    }
    html.push_str("</ul>\n</div>\n");

    html.push_str("<div class=\"section\">\n<h2>Availability &amp; Compensation</h2>\n");
    html.push_str(&format!(
        "<p><strong>Availability:</strong> {}</p>\n",
        escape_html(&content.availability)
    ));
    if let Some(salary) = &content.salary_expectation {
        html.push_str(&format!(
            "<p><strong>Salary Expectation:</strong> {}</p>\n",
            escape_html(salary)
        ));
    }
    html.push_str("</div>\n");

    html.push_str("<div class=\"section\">\n<h2>Contact Information</h2>\n<div class=\"contact-info\">\n");
    html.push_str(&format!(
        "<p><strong>Email:</strong> {}</p>\n",
        escape_html(&content.contact_info.email)
    ));
    if let Some(phone) = &content.contact_info.phone {
        html.push_str(&format!(
            "<p><strong>Phone:</strong> {}</p>\n",
            escape_html(phone)
        ));
    }
    if let Some(linkedin) = &content.contact_info.linkedin {
        let escaped = escape_html(linkedin);
        html.push_str(&format!(
            "<p><strong>LinkedIn:</strong> <a href=\"{escaped}\">{escaped}</a></p>\n"
        ));
    }
    html.push_str(&format!(
        "<p><strong>Location:</strong> {}</p>\n",
        escape_html(&content.contact_info.location)
    ));
    html.push_str("</div>\n</div>\n");

    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::presentation::{
        ContactInfo, EducationItem, ExperienceItem, SkillCategory, SkillLevel,
    };

    fn content() -> PresentationContent {
        PresentationContent {
            candidate_name: "Ana Lee".to_string(),
            summary: "Backend engineer with a platform focus.".to_string(),
            experience: vec![ExperienceItem {
                title: "Backend Engineer".to_string(),
                company: "Acme".to_string(),
                duration: "2021 - Present".to_string(),
                description: "Owns the billing services.".to_string(),
                achievements: vec!["Cut p99 latency 40%".to_string()],
            }],
            skills: vec![SkillCategory {
                category: "Languages".to_string(),
                skills: vec!["Go".to_string(), "SQL".to_string()],
                level: SkillLevel::Advanced,
            }],
            achievements: vec!["Led the v2 migration".to_string()],
            education: vec![EducationItem {
                degree: "BSc Computer Science".to_string(),
                institution: "TU Berlin".to_string(),
                year: "2017".to_string(),
                gpa: Some("3.8".to_string()),
            }],
            recommendations: vec!["Strong systems thinker".to_string()],
            salary_expectation: Some("$150,000".to_string()),
            availability: "2 weeks notice".to_string(),
            contact_info: ContactInfo {
                email: "ana@example.com".to_string(),
                phone: Some("+49 30 1234".to_string()),
                linkedin: Some("https://linkedin.com/in/analee".to_string()),
                location: "Berlin, DE".to_string(),
            },
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let c = content();
        let first = render_presentation("Ana Lee - Staff Engineer", &c);
        let second = render_presentation("Ana Lee - Staff Engineer", &c);
        assert_eq!(first, second);
    }

    #[test]
    fn test_sections_appear_in_fixed_order() {
        let html = render_presentation("Ana Lee - Staff Engineer", &content());
        let order = [
            "Executive Summary",
            "Professional Experience",
            "Skills &amp; Expertise",
            "Key Achievements",
            "Education",
            "Why This Candidate?",
            "Availability &amp; Compensation",
            "Contact Information",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|section| html.find(section).unwrap_or_else(|| panic!("missing section {section}")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_user_supplied_markup_is_escaped() {
        let mut c = content();
        c.candidate_name = "<script>alert('x')</script>".to_string();
        c.summary = "1 < 2 && \"quotes\"".to_string();
        let html = render_presentation("title", &c);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(html.contains("1 &lt; 2 &amp;&amp; &quot;quotes&quot;"));
    }

    #[test]
    fn test_linkedin_href_is_attribute_escaped() {
        let mut c = content();
        c.contact_info.linkedin = Some("https://x.com/\"><script>".to_string());
        let html = render_presentation("title", &c);
        assert!(!html.contains("href=\"https://x.com/\"><script>"));
        assert!(html.contains("href=\"https://x.com/&quot;&gt;&lt;script&gt;\""));
    }

    #[test]
    fn test_optional_fields_render_only_when_present() {
        let mut c = content();
        c.salary_expectation = None;
        c.contact_info.phone = None;
        c.contact_info.linkedin = None;
        let html = render_presentation("title", &c);

        assert!(!html.contains("Salary Expectation"));
        assert!(!html.contains("Phone"));
        assert!(!html.contains("LinkedIn"));
        assert!(html.contains("Availability:"));
        assert!(html.contains("Email:"));
        assert!(html.contains("Location:"));
    }

    #[test]
    fn test_gpa_line_present_only_when_set() {
        let mut c = content();
        let html = render_presentation("title", &c);
        assert!(html.contains("GPA: 3.8"));

        c.education[0].gpa = None;
        let html = render_presentation("title", &c);
        assert!(!html.contains("GPA:"));
    }

    #[test]
    fn test_skill_level_is_rendered_beside_category() {
        let html = render_presentation("title", &content());
        assert!(html.contains("<h4>Languages (Advanced)</h4>"));
    }

    #[test]
    fn test_document_is_self_contained_html() {
        let html = render_presentation("title", &content());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<style>"));
        assert!(html.trim_end().ends_with("</html>"));
    }
}
