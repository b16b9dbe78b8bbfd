//! The extraction collaborator seam.
//!
//! The pipeline only depends on the [`ResumeExtractor`] contract: given an
//! accepted file, produce a [`ResumeAnswers`] or fail. How the answers are
//! produced is deliberately opaque; the default implementation extracts the
//! document text and applies layout heuristics, and tests substitute mocks.

use std::path::Path;

use tracing::{debug, info};

use crate::error::ExtractError;
use crate::models::{EducationEntry, ResumeAnswers, WorkEntry};

pub trait ResumeExtractor: Send + Sync {
    /// Answer the fixed question set for the document at `path`.
    ///
    /// Fails on unreadable or garbled content; the caller does not retry.
    fn extract(&self, path: &Path) -> Result<ResumeAnswers, ExtractError>;
}

/// Default extractor: text extraction via `pdf-extract` plus section-based
/// layout heuristics.
#[derive(Debug, Default)]
pub struct PdfResumeExtractor;

impl PdfResumeExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl ResumeExtractor for PdfResumeExtractor {
    fn extract(&self, path: &Path) -> Result<ResumeAnswers, ExtractError> {
        info!(path = %path.display(), "Extracting answers from resume");

        let text = pdf_extract::extract_text(path)
            .map_err(|e| ExtractError::failed(format!("could not read document text: {e}")))?;
        if text.trim().is_empty() {
            return Err(ExtractError::failed("document contains no extractable text"));
        }

        let answers = parse_answers(&text);
        debug!(
            name = %answers.name,
            education_entries = answers.education.len(),
            work_entries = answers.work_experience.len(),
            "Extraction complete"
        );
        Ok(answers)
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    Preamble,
    Education,
    Work,
    Skills,
}

/// Turn raw resume text into structured answers.
///
/// The name is the first preamble line without a phone-sized digit run, the
/// phone is searched in the preamble only (dates further down would match a
/// digit scan), and section bodies are split into entries on newlines and
/// semicolons with comma-separated fields. Entry order follows the document.
pub fn parse_answers(text: &str) -> ResumeAnswers {
    let mut section = Section::Preamble;
    let mut name = String::new();
    let mut phone = String::new();
    let mut education = Vec::new();
    let mut work_experience = Vec::new();
    let mut skills: Vec<String> = Vec::new();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(next) = section_heading(line) {
            section = next;
            continue;
        }

        match section {
            Section::Preamble => {
                if phone.is_empty() {
                    if let Some(found) = phone_candidate(line) {
                        phone = found;
                        continue;
                    }
                }
                if name.is_empty() {
                    name = line.to_string();
                }
            }
            Section::Education => {
                for chunk in line.split(';').map(str::trim).filter(|c| !c.is_empty()) {
                    education.push(education_entry(chunk));
                }
            }
            Section::Work => {
                for chunk in line.split(';').map(str::trim).filter(|c| !c.is_empty()) {
                    work_experience.push(work_entry(chunk));
                }
            }
            Section::Skills => {
                skills.push(line.trim_end_matches(',').to_string());
            }
        }
    }

    ResumeAnswers {
        name,
        phone,
        education,
        work_experience,
        skills: skills.join(", "),
    }
}

fn section_heading(line: &str) -> Option<Section> {
    let normalized = line.trim_end_matches(':').trim().to_lowercase();
    match normalized.as_str() {
        "education" => Some(Section::Education),
        "work experience" | "experience" | "employment" | "work history" => Some(Section::Work),
        "skills" => Some(Section::Skills),
        _ => None,
    }
}

/// Fields are comma-separated: institution, course, start date, end date.
/// Missing trailing fields stay empty.
fn education_entry(chunk: &str) -> EducationEntry {
    let mut fields = chunk.splitn(4, ',').map(|f| f.trim().to_string());
    EducationEntry {
        institution: fields.next().unwrap_or_default(),
        course: fields.next().unwrap_or_default(),
        start_date: fields.next().unwrap_or_default(),
        end_date: fields.next().unwrap_or_default(),
    }
}

fn work_entry(chunk: &str) -> WorkEntry {
    let mut fields = chunk.splitn(4, ',').map(|f| f.trim().to_string());
    WorkEntry {
        organization: fields.next().unwrap_or_default(),
        role: fields.next().unwrap_or_default(),
        start_date: fields.next().unwrap_or_default(),
        end_date: fields.next().unwrap_or_default(),
    }
}

/// A line qualifies as the phone number when it carries a run of telephone
/// characters with at least seven digits.
fn phone_candidate(line: &str) -> Option<String> {
    let mut current = String::new();
    let mut best: Option<String> = None;

    let consider = |candidate: &str, best: &mut Option<String>| {
        let digits = candidate.chars().filter(char::is_ascii_digit).count();
        if digits >= 7 && best.is_none() {
            *best = Some(candidate.trim_matches([' ', '.', '-']).to_string());
        }
    };

    for ch in line.chars() {
        if ch.is_ascii_digit() || "+-() .".contains(ch) {
            current.push(ch);
        } else {
            consider(&current, &mut best);
            current.clear();
        }
    }
    consider(&current, &mut best);
    best
}
