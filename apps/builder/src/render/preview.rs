//! Preview projection from `ResumeRecord` to `PreviewDocument`.
//!
//! A pure field-to-layout mapping with no business logic. The same document
//! feeds the HTML view and the rasterizer, so both always agree on content.

use serde::Serialize;

use crate::models::resume::ResumeRecord;

// ────────────────────────────────────────────────────────────────────────────
// Document model
// ────────────────────────────────────────────────────────────────────────────

/// The rendered resume: a header band plus a narrow and a wide column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewDocument {
    pub header: Header,
    /// Left third: objectives, skills, responsibilities, hobbies.
    pub narrow: Vec<Block>,
    /// Right two thirds: education, projects, achievements.
    pub wide: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub name: String,
    /// "email | phone".
    pub contact_line: String,
    pub linkedin_url: String,
    pub github_url: String,
}

/// One visual block in a column. Empty list entries still produce blocks;
/// an empty bullet or title renders as an empty slot, never disappears.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Block {
    /// Underlined column section heading ("Education", "Technical Skills"…).
    SectionHeading(String),
    /// Free paragraph text (objectives, project descriptions).
    Paragraph(String),
    /// Bold sub-title with an optional detail line below it
    /// (college + "degree | percentage | passoutYear | location").
    TitleLine { title: String, detail: String },
    /// Bold skill heading followed by its bulleted subheadings.
    SkillGroup { heading: String, bullets: Vec<String> },
    /// Plain bulleted list (responsibilities, hobbies, achievements).
    Bullets(Vec<String>),
}

// ────────────────────────────────────────────────────────────────────────────
// Projection
// ────────────────────────────────────────────────────────────────────────────

/// Separator used to join education detail fields, in the fixed order
/// degree | percentage | passoutYear | location.
pub const DETAIL_SEPARATOR: &str = " | ";

/// Projects a record into its preview document. Pure: no I/O, no state.
pub fn build_preview(record: &ResumeRecord) -> PreviewDocument {
    let header = Header {
        name: record.name.clone(),
        contact_line: format!("{}{}{}", record.email, DETAIL_SEPARATOR, record.phone),
        linkedin_url: record.linkedin.clone(),
        github_url: record.github.clone(),
    };

    let mut narrow = Vec::new();
    narrow.push(Block::SectionHeading("Career Objectives".to_string()));
    narrow.push(Block::Paragraph(record.objectives.clone()));
    narrow.push(Block::SectionHeading("Technical Skills".to_string()));
    for skill in &record.skills {
        narrow.push(Block::SkillGroup {
            heading: skill.main_heading.clone(),
            bullets: skill.sub_headings.clone(),
        });
    }
    narrow.push(Block::SectionHeading("Responsibilities".to_string()));
    narrow.push(Block::Bullets(record.responsibilities.clone()));
    narrow.push(Block::SectionHeading("Hobbies".to_string()));
    narrow.push(Block::Bullets(record.hobbies.clone()));

    let mut wide = Vec::new();
    wide.push(Block::SectionHeading("Education".to_string()));
    for edu in &record.education {
        wide.push(Block::TitleLine {
            title: edu.college_name.clone(),
            detail: [
                edu.degree.as_str(),
                edu.percentage.as_str(),
                edu.passout_year.as_str(),
                edu.location.as_str(),
            ]
            .join(DETAIL_SEPARATOR),
        });
    }
    wide.push(Block::SectionHeading("Projects".to_string()));
    for project in &record.projects {
        wide.push(Block::TitleLine {
            title: project.heading.clone(),
            detail: String::new(),
        });
        wide.push(Block::Paragraph(project.description.clone()));
    }
    wide.push(Block::SectionHeading("Achievements".to_string()));
    wide.push(Block::Bullets(record.achievements.clone()));

    PreviewDocument {
        header,
        narrow,
        wide,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{make_filled_record, ResumeRecord};

    #[test]
    fn test_build_preview_is_pure() {
        let record = make_filled_record();
        assert_eq!(build_preview(&record), build_preview(&record));
    }

    #[test]
    fn test_header_carries_name_and_contact_line() {
        let doc = build_preview(&make_filled_record());
        assert_eq!(doc.header.name, "Jane Doe");
        assert_eq!(doc.header.contact_line, "jane@x.com | 555-0100");
        assert_eq!(doc.header.github_url, "https://github.com/janedoe");
    }

    #[test]
    fn test_skill_group_lists_subheadings_in_order() {
        let doc = build_preview(&make_filled_record());
        let skill = doc
            .narrow
            .iter()
            .find_map(|b| match b {
                Block::SkillGroup { heading, bullets } => Some((heading, bullets)),
                _ => None,
            })
            .expect("skill group block");
        assert_eq!(skill.0, "Languages");
        assert_eq!(skill.1, &vec!["Go".to_string(), "Rust".to_string()]);
    }

    #[test]
    fn test_education_detail_joined_in_fixed_order() {
        let doc = build_preview(&make_filled_record());
        let detail = doc
            .wide
            .iter()
            .find_map(|b| match b {
                Block::TitleLine { title, detail } if title == "State University" => Some(detail),
                _ => None,
            })
            .expect("education title line");
        assert_eq!(detail, "B.Tech CSE | 8.9 CGPA | 2023 | Pune");
    }

    #[test]
    fn test_empty_entries_still_render_as_slots() {
        let doc = build_preview(&ResumeRecord::new());
        // The single empty skill renders with its single empty bullet.
        assert!(doc.narrow.iter().any(|b| matches!(
            b,
            Block::SkillGroup { heading, bullets }
                if heading.is_empty() && bullets == &vec![String::new()]
        )));
        // The empty education entry renders a title line of separators only.
        assert!(doc.wide.iter().any(|b| matches!(
            b,
            Block::TitleLine { title, detail } if title.is_empty() && detail == " |  |  | "
        )));
    }

    #[test]
    fn test_column_section_order_matches_layout() {
        let doc = build_preview(&make_filled_record());
        let headings = |blocks: &[Block]| -> Vec<String> {
            blocks
                .iter()
                .filter_map(|b| match b {
                    Block::SectionHeading(h) => Some(h.clone()),
                    _ => None,
                })
                .collect()
        };
        assert_eq!(
            headings(&doc.narrow),
            vec![
                "Career Objectives",
                "Technical Skills",
                "Responsibilities",
                "Hobbies"
            ]
        );
        assert_eq!(
            headings(&doc.wide),
            vec!["Education", "Projects", "Achievements"]
        );
    }
}
