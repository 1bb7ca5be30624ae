//! Typed mutation operations on a `ResumeRecord`.
//!
//! The browser form's string-keyed dispatch ("skills", index, subIndex…)
//! is replaced by tagged path variants, each carrying its own typed payload
//! and dispatched by pattern matching. A path that names a field which does
//! not exist cannot be constructed; a path whose index is out of range is a
//! `Validation` error, never a runtime fault.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::resume::{EducationEntry, ProjectEntry, ResumeRecord, SkillGroup};

// ────────────────────────────────────────────────────────────────────────────
// Field paths
// ────────────────────────────────────────────────────────────────────────────

/// Top-level scalar fields of the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScalarField {
    Name,
    Email,
    Phone,
    Linkedin,
    Github,
    Objectives,
}

/// Fields of one education entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EducationField {
    CollegeName,
    Degree,
    Percentage,
    PassoutYear,
    Location,
}

/// Fields of one project entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectField {
    Heading,
    Description,
}

/// The three flat string-list sections. `Section` (below) additionally
/// covers the structured lists for `append_entry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlatSection {
    Responsibilities,
    Achievements,
    Hobbies,
}

/// Locator for exactly one scalar leaf of the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum FieldPath {
    Scalar { field: ScalarField },
    /// A skill group's main heading.
    Skill { index: usize },
    /// One subheading inside a skill group.
    SkillSub { index: usize, sub_index: usize },
    Education { index: usize, field: EducationField },
    Item { section: FlatSection, index: usize },
    Project { index: usize, field: ProjectField },
}

/// Any section that supports "Add More" appends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Skills,
    Education,
    Responsibilities,
    Achievements,
    Hobbies,
    Projects,
}

// ────────────────────────────────────────────────────────────────────────────
// Operations
// ────────────────────────────────────────────────────────────────────────────

/// Replaces exactly one scalar leaf; everything else is untouched.
pub fn update_field(
    record: &mut ResumeRecord,
    path: FieldPath,
    value: String,
) -> Result<(), AppError> {
    match path {
        FieldPath::Scalar { field } => {
            let slot = match field {
                ScalarField::Name => &mut record.name,
                ScalarField::Email => &mut record.email,
                ScalarField::Phone => &mut record.phone,
                ScalarField::Linkedin => &mut record.linkedin,
                ScalarField::Github => &mut record.github,
                ScalarField::Objectives => &mut record.objectives,
            };
            *slot = value;
        }
        FieldPath::Skill { index } => {
            let skill = get_mut(&mut record.skills, index, "skills")?;
            skill.main_heading = value;
        }
        FieldPath::SkillSub { index, sub_index } => {
            let skill = get_mut(&mut record.skills, index, "skills")?;
            let sub = get_mut(&mut skill.sub_headings, sub_index, "subHeadings")?;
            *sub = value;
        }
        FieldPath::Education { index, field } => {
            let edu = get_mut(&mut record.education, index, "education")?;
            let slot = match field {
                EducationField::CollegeName => &mut edu.college_name,
                EducationField::Degree => &mut edu.degree,
                EducationField::Percentage => &mut edu.percentage,
                EducationField::PassoutYear => &mut edu.passout_year,
                EducationField::Location => &mut edu.location,
            };
            *slot = value;
        }
        FieldPath::Item { section, index } => {
            let list = match section {
                FlatSection::Responsibilities => &mut record.responsibilities,
                FlatSection::Achievements => &mut record.achievements,
                FlatSection::Hobbies => &mut record.hobbies,
            };
            let item = get_mut(list, index, section_name(section))?;
            *item = value;
        }
        FieldPath::Project { index, field } => {
            let project = get_mut(&mut record.projects, index, "projects")?;
            let slot = match field {
                ProjectField::Heading => &mut project.heading,
                ProjectField::Description => &mut project.description,
            };
            *slot = value;
        }
    }
    Ok(())
}

/// Appends a zero-valued entry matching the section's entry shape.
/// Appends only add; no operation removes or reorders entries.
pub fn append_entry(record: &mut ResumeRecord, section: Section) {
    match section {
        Section::Skills => record.skills.push(SkillGroup::empty()),
        Section::Education => record.education.push(EducationEntry::empty()),
        Section::Responsibilities => record.responsibilities.push(String::new()),
        Section::Achievements => record.achievements.push(String::new()),
        Section::Hobbies => record.hobbies.push(String::new()),
        Section::Projects => record.projects.push(ProjectEntry::empty()),
    }
}

/// Appends an empty subheading slot to the skill group at `skill_index`.
pub fn append_sub_heading(record: &mut ResumeRecord, skill_index: usize) -> Result<(), AppError> {
    let skill = get_mut(&mut record.skills, skill_index, "skills")?;
    skill.sub_headings.push(String::new());
    Ok(())
}

fn get_mut<'a, T>(list: &'a mut [T], index: usize, section: &str) -> Result<&'a mut T, AppError> {
    let len = list.len();
    list.get_mut(index).ok_or_else(|| {
        AppError::Validation(format!(
            "Index {index} is out of range for {section} (len {len})"
        ))
    })
}

fn section_name(section: FlatSection) -> &'static str {
    match section {
        FlatSection::Responsibilities => "responsibilities",
        FlatSection::Achievements => "achievements",
        FlatSection::Hobbies => "hobbies",
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
