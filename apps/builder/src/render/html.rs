//! HTML projections of the session for the browser.
//!
//! One page endpoint serves two views: the edit form while the session is
//! Editing, and the read-only preview sheet once it is Previewing. The
//! preview markup is built from the same `PreviewDocument` the rasterizer
//! consumes.

use std::fmt::Write as _;

use uuid::Uuid;

use crate::models::resume::ResumeRecord;
use crate::render::preview::{Block, PreviewDocument};

/// Minimal HTML text escaping for values interpolated into markup.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

// ────────────────────────────────────────────────────────────────────────────
// Preview view
// ────────────────────────────────────────────────────────────────────────────

/// The Previewing view: the rendered resume sheet plus the download control.
/// While an export is in flight the control is not emitted at all, so it can
/// never appear in a rasterized capture and re-entrant exports have nothing
/// to click.
pub fn preview_page(session_id: Uuid, doc: &PreviewDocument, exporting: bool) -> String {
    let mut sheet = String::new();
    let _ = write!(
        sheet,
        "<header class=\"rb-header\"><h1>{}</h1><p>{}</p>\
         <p><a href=\"{}\">LinkedIn</a> | <a href=\"{}\">GitHub</a></p></header>",
        escape(&doc.header.name),
        escape(&doc.header.contact_line),
        escape(&doc.header.linkedin_url),
        escape(&doc.header.github_url),
    );
    sheet.push_str("<div class=\"rb-columns\"><aside class=\"rb-narrow\">");
    for block in &doc.narrow {
        sheet.push_str(&block_html(block));
    }
    sheet.push_str("</aside><section class=\"rb-wide\">");
    for block in &doc.wide {
        sheet.push_str(&block_html(block));
    }
    sheet.push_str("</section></div>");

    let download = if exporting {
        "<p class=\"rb-exporting\">Preparing PDF…</p>".to_string()
    } else {
        format!(
            "<form method=\"post\" action=\"/api/v1/sessions/{session_id}/export\">\
             <button type=\"submit\">Download Resume</button></form>"
        )
    };

    page_shell(
        "Resume Preview",
        &format!("<div class=\"rb-sheet\">{sheet}</div><div class=\"rb-actions\">{download}</div>"),
    )
}

fn block_html(block: &Block) -> String {
    match block {
        Block::SectionHeading(text) => format!("<h2>{}</h2>", escape(text)),
        Block::Paragraph(text) => format!("<p>{}</p>", escape(text)),
        Block::TitleLine { title, detail } => {
            let mut out = format!("<p class=\"rb-title\"><strong>{}</strong></p>", escape(title));
            if !detail.is_empty() {
                let _ = write!(out, "<p>{}</p>", escape(detail));
            }
            out
        }
        Block::SkillGroup { heading, bullets } => {
            let items: String = bullets
                .iter()
                .map(|b| format!("<li>{}</li>", escape(b)))
                .collect();
            format!(
                "<p class=\"rb-title\"><strong>{}</strong></p><ul>{items}</ul>",
                escape(heading)
            )
        }
        Block::Bullets(items) => {
            let items: String = items
                .iter()
                .map(|b| format!("<li>{}</li>", escape(b)))
                .collect();
            format!("<ul>{items}</ul>")
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Edit view
// ────────────────────────────────────────────────────────────────────────────

/// The Editing view: the multi-section form. Inputs PATCH their field on
/// change via the typed-path API; the add/submit buttons POST and reload.
pub fn form_page(session_id: Uuid, record: &ResumeRecord) -> String {
    let mut body = format!("<form id=\"rb-form\" data-session=\"{session_id}\">");
    body.push_str("<h2>Resume Builder</h2>");

    for (label, field, value, required, multiline) in [
        ("Name", "name", &record.name, true, false),
        ("Email", "email", &record.email, true, false),
        ("Phone no", "phone", &record.phone, true, false),
        ("LinkedIn", "linkedin", &record.linkedin, true, false),
        ("GitHub", "github", &record.github, true, false),
        ("Objectives", "objectives", &record.objectives, true, true),
    ] {
        body.push_str(&scalar_input(label, field, value, required, multiline));
    }

    body.push_str("<h3>Technical Skills</h3>");
    for (i, skill) in record.skills.iter().enumerate() {
        let _ = write!(
            body,
            "<input data-path='{{\"kind\":\"skill\",\"index\":{i}}}' \
             placeholder=\"Main Heading\" value=\"{}\" required>",
            escape(&skill.main_heading)
        );
        for (j, sub) in skill.sub_headings.iter().enumerate() {
            let _ = write!(
                body,
                "<input data-path='{{\"kind\":\"skillSub\",\"index\":{i},\"subIndex\":{j}}}' \
                 placeholder=\"Subheading\" value=\"{}\">",
                escape(sub)
            );
        }
        let _ = write!(
            body,
            "<button type=\"button\" data-subheading=\"{i}\">Add Subheading</button>"
        );
    }
    body.push_str(&add_more_button("skills", "Add More Skills"));

    body.push_str("<h3>Education</h3>");
    for (i, edu) in record.education.iter().enumerate() {
        for (placeholder, field, value) in [
            ("College Name", "collegeName", &edu.college_name),
            ("Degree", "degree", &edu.degree),
            ("Percentage/CGPA", "percentage", &edu.percentage),
            ("Year of Passout", "passoutYear", &edu.passout_year),
            ("Location", "location", &edu.location),
        ] {
            let _ = write!(
                body,
                "<input data-path='{{\"kind\":\"education\",\"index\":{i},\"field\":\"{field}\"}}' \
                 placeholder=\"{placeholder}\" value=\"{}\" required>",
                escape(value)
            );
        }
    }
    body.push_str(&add_more_button("education", "Add More Education"));

    for (title, section, placeholder, items) in [
        ("Responsibilities", "responsibilities", "Responsibility", &record.responsibilities),
        ("Achievements", "achievements", "Achievement", &record.achievements),
        ("Hobbies", "hobbies", "Hobby", &record.hobbies),
    ] {
        let _ = write!(body, "<h3>{title}</h3>");
        for (i, item) in items.iter().enumerate() {
            let _ = write!(
                body,
                "<input data-path='{{\"kind\":\"item\",\"section\":\"{section}\",\"index\":{i}}}' \
                 placeholder=\"{placeholder}\" value=\"{}\">",
                escape(item)
            );
        }
        body.push_str(&add_more_button(section, &format!("Add More {title}")));
    }

    body.push_str("<h3>Projects</h3>");
    for (i, project) in record.projects.iter().enumerate() {
        let _ = write!(
            body,
            "<input data-path='{{\"kind\":\"project\",\"index\":{i},\"field\":\"heading\"}}' \
             placeholder=\"Project Heading\" value=\"{}\" required>\
             <textarea data-path='{{\"kind\":\"project\",\"index\":{i},\"field\":\"description\"}}' \
             placeholder=\"Project Description\" required>{}</textarea>",
            escape(&project.heading),
            escape(&project.description)
        );
    }
    body.push_str(&add_more_button("projects", "Add More Projects"));

    body.push_str("<button type=\"submit\">Submit</button></form>");
    body.push_str(FORM_SCRIPT);
    page_shell("Resume Builder", &body)
}

fn scalar_input(label: &str, field: &str, value: &str, required: bool, multiline: bool) -> String {
    let required = if required { " required" } else { "" };
    let path = format!("{{\"kind\":\"scalar\",\"field\":\"{field}\"}}");
    if multiline {
        format!(
            "<label>{label}:</label><textarea data-path='{path}'{required}>{}</textarea>",
            escape(value)
        )
    } else {
        format!(
            "<label>{label}:</label><input data-path='{path}' value=\"{}\"{required}>",
            escape(value)
        )
    }
}

fn add_more_button(section: &str, label: &str) -> String {
    format!("<button type=\"button\" data-section=\"{section}\">{label}</button>")
}

/// Inline driver for the form view: field changes PATCH the typed path,
/// append/submit buttons POST and reload so the server re-renders the view.
const FORM_SCRIPT: &str = r#"<script>
const form = document.getElementById('rb-form');
const base = '/api/v1/sessions/' + form.dataset.session;
const post = (url, body) => fetch(url, {
  method: body === undefined ? 'POST' : 'PATCH',
  headers: {'Content-Type': 'application/json'},
  body: body === undefined ? null : JSON.stringify(body),
});
form.addEventListener('change', (e) => {
  const path = e.target.dataset.path;
  if (path) post(base + '/field', {path: JSON.parse(path), value: e.target.value});
});
form.addEventListener('click', async (e) => {
  if (e.target.dataset.section) {
    await fetch(base + '/entries', {method: 'POST',
      headers: {'Content-Type': 'application/json'},
      body: JSON.stringify({section: e.target.dataset.section})});
    location.reload();
  } else if (e.target.dataset.subheading !== undefined) {
    await fetch(base + '/skills/' + e.target.dataset.subheading + '/subheadings', {method: 'POST'});
    location.reload();
  }
});
form.addEventListener('submit', async (e) => {
  e.preventDefault();
  if (!form.reportValidity()) return;
  const res = await fetch(base + '/submit', {method: 'POST'});
  if (res.ok) location.reload();
  else alert((await res.json()).error.message);
});
</script>"#;

// ────────────────────────────────────────────────────────────────────────────
// Shared shell
// ────────────────────────────────────────────────────────────────────────────

fn page_shell(title: &str, body: &str) -> String {
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{title}</title>\
         <style>{STYLE}</style></head><body>{body}</body></html>"
    )
}

const STYLE: &str = "body{font-family:sans-serif;margin:2rem auto;max-width:52rem}\
input,textarea{display:block;width:100%;margin:.3rem 0;padding:.4rem}\
button{margin:.5rem 0;padding:.4rem 1rem}\
.rb-sheet{width:210mm;min-height:297mm;border:1px solid #ccc;padding:12mm;margin:0 auto}\
.rb-header{text-align:center}\
.rb-columns{display:grid;grid-template-columns:1fr 2fr;gap:8mm}\
h2{border-bottom:2px solid #9cf;padding-bottom:.2rem}\
.rb-actions{text-align:center}";

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::make_filled_record;
    use crate::render::preview::build_preview;

    #[test]
    fn test_escape_neutralizes_markup() {
        assert_eq!(escape("<b>&\"'"), "&lt;b&gt;&amp;&quot;&#39;");
    }

    #[test]
    fn test_preview_page_shows_header_and_sections() {
        let record = make_filled_record();
        let html = preview_page(Uuid::new_v4(), &build_preview(&record), false);
        assert!(html.contains("Jane Doe"));
        assert!(html.contains("jane@x.com | 555-0100"));
        assert!(html.contains("<li>Go</li><li>Rust</li>"));
        assert!(html.contains("B.Tech CSE | 8.9 CGPA | 2023 | Pune"));
        assert!(html.contains("Download Resume"));
    }

    #[test]
    fn test_preview_page_hides_download_control_while_exporting() {
        let record = make_filled_record();
        let html = preview_page(Uuid::new_v4(), &build_preview(&record), true);
        assert!(!html.contains("Download Resume"));
        assert!(html.contains("Preparing PDF"));
    }

    #[test]
    fn test_form_page_renders_existing_values_and_paths() {
        let id = Uuid::new_v4();
        let html = form_page(id, &make_filled_record());
        assert!(html.contains(&id.to_string()));
        assert!(html.contains("value=\"Jane Doe\""));
        assert!(html.contains(r#"{"kind":"skillSub","index":0,"subIndex":1}"#));
        assert!(html.contains("Add More Education"));
        assert!(html.contains("Add Subheading"));
    }

    #[test]
    fn test_form_page_escapes_user_input() {
        let mut record = make_filled_record();
        record.name = "<script>alert(1)</script>".to_string();
        let html = form_page(Uuid::new_v4(), &record);
        assert!(!html.contains("<script>alert(1)"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
