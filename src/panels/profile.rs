use log::{debug, warn};

use crate::PrepVistaError;
use crate::panels::CommitOutcome;
use crate::session::User;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    pub name: String,
    pub email: String,
    pub university: String,
    pub course: String,
    pub graduation_year: String,
    pub location: String,
    pub bio: String,
    pub skills: Vec<String>,
    pub experience: Vec<Experience>,
    pub achievements: Vec<String>,
}

impl ProfileRecord {
    /// The signed-in user's details plus the mock extras.
    pub fn for_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            university: user.university.clone().unwrap_or_default(),
            course: user.course.clone().unwrap_or_default(),
            graduation_year: "2024".to_string(),
            location: "San Francisco, CA".to_string(),
            bio: "Passionate computer science student with a focus on full-stack development \
                  and machine learning. Looking for opportunities to apply my skills in a \
                  dynamic tech environment."
                .to_string(),
            skills: ["JavaScript", "React", "Node.js", "Python", "Machine Learning", "SQL"]
                .map(String::from)
                .to_vec(),
            experience: vec![
                Experience {
                    title: "Software Engineering Intern".to_string(),
                    company: "Tech Startup Inc.".to_string(),
                    duration: "Summer 2023".to_string(),
                    description: "Developed full-stack web applications using React and Node.js"
                        .to_string(),
                },
                Experience {
                    title: "Teaching Assistant".to_string(),
                    company: "Stanford University".to_string(),
                    duration: "2022-2023".to_string(),
                    description:
                        "Assisted in CS101 course, helping students with programming fundamentals"
                            .to_string(),
                },
            ],
            achievements: [
                "Dean's List - Fall 2023",
                "Hackathon Winner - Stanford TreeHacks 2023",
                "Google Code-in Finalist",
                "Published Research Paper on ML Applications",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Email,
    University,
    Course,
    GraduationYear,
    Location,
    Bio,
    Skills,
}

/// Splits a comma list, trimming entries and dropping empty ones.
pub fn parse_skills(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(String::from)
        .collect()
}

pub struct ProfilePanel {
    record: ProfileRecord,
    draft: Option<ProfileRecord>,
}

impl ProfilePanel {
    pub fn new(user: &User) -> Self {
        Self {
            record: ProfileRecord::for_user(user),
            draft: None,
        }
    }

    /// The draft while editing, the committed record otherwise.
    pub fn shown(&self) -> &ProfileRecord {
        self.draft.as_ref().unwrap_or(&self.record)
    }

    pub fn record(&self) -> &ProfileRecord {
        &self.record
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn begin_edit(&mut self) {
        if self.draft.is_none() {
            self.draft = Some(self.record.clone());
        }
    }

    /// Edits the draft. Ignored when not editing.
    pub fn set_field(&mut self, field: ProfileField, value: &str) -> bool {
        let Some(draft) = self.draft.as_mut() else {
            return false;
        };
        let target = match field {
            ProfileField::Name => &mut draft.name,
            ProfileField::Email => &mut draft.email,
            ProfileField::University => &mut draft.university,
            ProfileField::Course => &mut draft.course,
            ProfileField::GraduationYear => &mut draft.graduation_year,
            ProfileField::Location => &mut draft.location,
            ProfileField::Bio => &mut draft.bio,
            ProfileField::Skills => {
                draft.skills = parse_skills(value);
                return true;
            }
        };
        *target = value.to_string();
        true
    }

    pub fn cancel_edit(&mut self) {
        if self.draft.take().is_some() {
            debug!("Profile edit cancelled");
        }
    }

    /// Commits the draft into this panel's record. Nothing is stored beyond
    /// the panel.
    pub fn save(&mut self) -> Result<CommitOutcome, PrepVistaError> {
        let draft = self.draft.take().ok_or_else(|| {
            PrepVistaError::invalid_transition("profile", "save", "not editing")
        })?;
        self.record = draft;
        warn!("Profile changes kept for this session only, they are not persisted");
        Ok(CommitOutcome::NotPersisted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_from_user() {
        let panel = ProfilePanel::new(&User::demo());
        assert_eq!(panel.shown().name, "Alex Johnson");
        assert_eq!(panel.shown().university, "Stanford University");
        assert_eq!(panel.shown().skills.len(), 6);
        assert!(!panel.is_editing());
    }

    #[test]
    fn test_parse_skills() {
        assert_eq!(parse_skills(" Rust, ,Go ,, SQL "), vec!["Rust", "Go", "SQL"]);
        assert!(parse_skills(" , ").is_empty());
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut panel = ProfilePanel::new(&User::demo());
        assert!(!panel.set_field(ProfileField::Name, "Nobody"));
        panel.begin_edit();
        assert!(panel.set_field(ProfileField::Name, "Sam Lee"));
        assert_eq!(panel.shown().name, "Sam Lee");
        panel.cancel_edit();
        assert_eq!(panel.shown().name, "Alex Johnson");
    }

    #[test]
    fn test_save_commits_locally() {
        let mut panel = ProfilePanel::new(&User::demo());
        assert!(panel.save().is_err());

        panel.begin_edit();
        panel.set_field(ProfileField::Skills, "Rust, Tokio");
        panel.set_field(ProfileField::Location, "Berlin");
        assert_eq!(panel.save().unwrap(), CommitOutcome::NotPersisted);
        assert!(!panel.is_editing());
        assert_eq!(panel.record().skills, vec!["Rust", "Tokio"]);
        assert_eq!(panel.record().location, "Berlin");
    }
}
