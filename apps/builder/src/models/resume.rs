use serde::{Deserialize, Serialize};

/// The complete structured resume data for one session.
///
/// JSON field names keep the camelCase spelling the browser form uses.
/// Every list starts with exactly one empty entry so the form always has a
/// slot to type into; appends only ever add entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub objectives: String,
    pub skills: Vec<SkillGroup>,
    pub education: Vec<EducationEntry>,
    pub responsibilities: Vec<String>,
    pub achievements: Vec<String>,
    pub hobbies: Vec<String>,
    pub projects: Vec<ProjectEntry>,
}

/// One skill group: a bold heading plus a bulleted list of subheadings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGroup {
    pub main_heading: String,
    pub sub_headings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub college_name: String,
    pub degree: String,
    pub percentage: String,
    pub passout_year: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub heading: String,
    pub description: String,
}

impl SkillGroup {
    pub fn empty() -> Self {
        SkillGroup {
            main_heading: String::new(),
            sub_headings: vec![String::new()],
        }
    }
}

impl EducationEntry {
    pub fn empty() -> Self {
        EducationEntry {
            college_name: String::new(),
            degree: String::new(),
            percentage: String::new(),
            passout_year: String::new(),
            location: String::new(),
        }
    }
}

impl ProjectEntry {
    pub fn empty() -> Self {
        ProjectEntry {
            heading: String::new(),
            description: String::new(),
        }
    }
}

impl ResumeRecord {
    /// A fresh record: empty scalars, one empty entry per list.
    pub fn new() -> Self {
        ResumeRecord {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            linkedin: String::new(),
            github: String::new(),
            objectives: String::new(),
            skills: vec![SkillGroup::empty()],
            education: vec![EducationEntry::empty()],
            responsibilities: vec![String::new()],
            achievements: vec![String::new()],
            hobbies: vec![String::new()],
            projects: vec![ProjectEntry::empty()],
        }
    }

    /// Returns the first required field that is still blank, or `None` when
    /// the record is ready to submit.
    ///
    /// Required: all six scalars, every skill main heading, every education
    /// field, and both fields of every project: the same set the browser
    /// form marks `required`. Subheadings, responsibilities, achievements,
    /// and hobbies are optional and may stay empty slots.
    pub fn first_required_gap(&self) -> Option<&'static str> {
        let scalars: [(&str, &'static str); 6] = [
            (&self.name, "name"),
            (&self.email, "email"),
            (&self.phone, "phone"),
            (&self.linkedin, "linkedin"),
            (&self.github, "github"),
            (&self.objectives, "objectives"),
        ];
        for (value, label) in scalars {
            if value.trim().is_empty() {
                return Some(label);
            }
        }
        if self.skills.iter().any(|s| s.main_heading.trim().is_empty()) {
            return Some("skills.mainHeading");
        }
        for edu in &self.education {
            let fields: [(&str, &'static str); 5] = [
                (&edu.college_name, "education.collegeName"),
                (&edu.degree, "education.degree"),
                (&edu.percentage, "education.percentage"),
                (&edu.passout_year, "education.passoutYear"),
                (&edu.location, "education.location"),
            ];
            for (value, label) in fields {
                if value.trim().is_empty() {
                    return Some(label);
                }
            }
        }
        for project in &self.projects {
            if project.heading.trim().is_empty() {
                return Some("projects.heading");
            }
            if project.description.trim().is_empty() {
                return Some("projects.description");
            }
        }
        None
    }
}

impl Default for ResumeRecord {
    fn default() -> Self {
        Self::new()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) fn make_filled_record() -> ResumeRecord {
    ResumeRecord {
        name: "Jane Doe".to_string(),
        email: "jane@x.com".to_string(),
        phone: "555-0100".to_string(),
        linkedin: "https://linkedin.com/in/janedoe".to_string(),
        github: "https://github.com/janedoe".to_string(),
        objectives: "Build reliable systems.".to_string(),
        skills: vec![SkillGroup {
            main_heading: "Languages".to_string(),
            sub_headings: vec!["Go".to_string(), "Rust".to_string()],
        }],
        education: vec![EducationEntry {
            college_name: "State University".to_string(),
            degree: "B.Tech CSE".to_string(),
            percentage: "8.9 CGPA".to_string(),
            passout_year: "2023".to_string(),
            location: "Pune".to_string(),
        }],
        responsibilities: vec!["Club lead".to_string()],
        achievements: vec!["Hackathon winner".to_string()],
        hobbies: vec!["Chess".to_string()],
        projects: vec![ProjectEntry {
            heading: "Log shipper".to_string(),
            description: "Streams structured logs to object storage.".to_string(),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_has_one_empty_entry_per_list() {
        let record = ResumeRecord::new();
        assert_eq!(record.skills.len(), 1);
        assert_eq!(record.skills[0].sub_headings.len(), 1);
        assert_eq!(record.education.len(), 1);
        assert_eq!(record.responsibilities.len(), 1);
        assert_eq!(record.achievements.len(), 1);
        assert_eq!(record.hobbies.len(), 1);
        assert_eq!(record.projects.len(), 1);
        assert!(record.skills[0].main_heading.is_empty());
        assert!(record.projects[0].heading.is_empty());
    }

    #[test]
    fn test_json_field_names_are_camel_case() {
        let json = serde_json::to_value(ResumeRecord::new()).unwrap();
        assert!(json["skills"][0].get("mainHeading").is_some());
        assert!(json["skills"][0].get("subHeadings").is_some());
        assert!(json["education"][0].get("collegeName").is_some());
        assert!(json["education"][0].get("passoutYear").is_some());
    }

    #[test]
    fn test_empty_record_reports_first_gap() {
        let record = ResumeRecord::new();
        assert_eq!(record.first_required_gap(), Some("name"));
    }

    #[test]
    fn test_filled_record_has_no_gap() {
        let record = make_filled_record();
        assert_eq!(record.first_required_gap(), None);
    }

    #[test]
    fn test_optional_lists_may_stay_blank() {
        let mut record = make_filled_record();
        record.responsibilities = vec![String::new()];
        record.achievements = vec![String::new()];
        record.hobbies = vec![String::new()];
        record.skills[0].sub_headings = vec![String::new()];
        assert_eq!(record.first_required_gap(), None);
    }

    #[test]
    fn test_blank_education_field_is_a_gap() {
        let mut record = make_filled_record();
        record.education[0].passout_year = "  ".to_string();
        assert_eq!(record.first_required_gap(), Some("education.passoutYear"));
    }
}
