use serde::{Deserialize, Serialize};

/// Structured answers extracted from one resume.
///
/// Entry order for education and work experience follows the source document
/// and survives persistence round-trips. Empty entry lists are valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeAnswers {
    pub name: String,
    pub phone: String,
    pub education: Vec<EducationEntry>,
    pub work_experience: Vec<WorkEntry>,
    pub skills: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: String,
    pub course: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkEntry {
    pub organization: String,
    pub role: String,
    pub start_date: String,
    pub end_date: String,
}

impl ResumeAnswers {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            education: Vec::new(),
            work_experience: Vec::new(),
            skills: String::new(),
        }
    }

    pub fn with_education(mut self, entries: Vec<EducationEntry>) -> Self {
        self.education = entries;
        self
    }

    pub fn with_work_experience(mut self, entries: Vec<WorkEntry>) -> Self {
        self.work_experience = entries;
        self
    }

    pub fn with_skills(mut self, skills: impl Into<String>) -> Self {
        self.skills = skills.into();
        self
    }
}
