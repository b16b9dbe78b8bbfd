//! Unit tests for the intake validator, the answer parser, and the error
//! taxonomy.

mod common;

use std::env;
use std::io::{Cursor, Read, Seek};

use intake::config::Config;
use intake::error::{AppError, ExtractError, StoreError, ValidationError};
use intake::models::UploadAttempt;
use intake::services::validator::{self, IntakePolicy};

use common::make_pdf;

fn policy(dir: &std::path::Path) -> IntakePolicy {
    IntakePolicy {
        max_file_size: 1024 * 1024,
        max_pages: 3,
        upload_dir: dir.to_path_buf(),
    }
}

fn dir_entry_count(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}

#[test]
fn rejects_empty_filename() {
    let dir = tempfile::tempdir().unwrap();
    let mut attempt = UploadAttempt::new("", Cursor::new(make_pdf(1)));

    let err = validator::validate(&mut attempt, &policy(dir.path())).unwrap_err();
    assert!(matches!(err, ValidationError::NoFile));
    assert_eq!(dir_entry_count(dir.path()), 0);
}

#[test]
fn rejects_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["resume.txt", "resume.docx", "resume", "resume.pdf.exe"] {
        let mut attempt = UploadAttempt::new(name, Cursor::new(make_pdf(1)));
        let err = validator::validate(&mut attempt, &policy(dir.path())).unwrap_err();
        assert!(
            matches!(err, ValidationError::UnsupportedType { .. }),
            "{name} should be rejected as unsupported"
        );
    }
    assert_eq!(dir_entry_count(dir.path()), 0);
}

#[test]
fn extension_check_is_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    let mut attempt = UploadAttempt::new("RESUME.PDF", Cursor::new(make_pdf(1)));

    let path = validator::validate(&mut attempt, &policy(dir.path())).unwrap();
    assert!(path.exists());
}

#[test]
fn rejects_oversized_upload_and_restores_stream() {
    let dir = tempfile::tempdir().unwrap();
    let mut small_policy = policy(dir.path());
    small_policy.max_file_size = 1024;

    let content = vec![0u8; 2048];
    let mut attempt = UploadAttempt::new("resume.pdf", Cursor::new(content.clone()));

    let err = validator::validate(&mut attempt, &small_policy).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::TooLarge { size: 2048, limit: 1024 }
    ));

    // The size check must not consume the stream: position back at the start,
    // a full read still sees everything.
    assert_eq!(attempt.stream.stream_position().unwrap(), 0);
    let mut replay = Vec::new();
    attempt.stream.read_to_end(&mut replay).unwrap();
    assert_eq!(replay, content);

    assert_eq!(dir_entry_count(dir.path()), 0);
}

#[test]
fn rejects_document_over_page_ceiling() {
    let dir = tempfile::tempdir().unwrap();
    let mut attempt = UploadAttempt::new("resume.pdf", Cursor::new(make_pdf(4)));

    let err = validator::validate(&mut attempt, &policy(dir.path())).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::TooManyPages { pages: 4, limit: 3 }
    ));
    assert_eq!(dir_entry_count(dir.path()), 0);
}

#[test]
fn accepts_document_at_page_ceiling() {
    let dir = tempfile::tempdir().unwrap();
    let mut attempt = UploadAttempt::new("resume.pdf", Cursor::new(make_pdf(3)));

    let path = validator::validate(&mut attempt, &policy(dir.path())).unwrap();
    assert_eq!(path, dir.path().join("resume.pdf"));
    assert!(path.exists());
}

#[test]
fn rejects_unreadable_document() {
    let dir = tempfile::tempdir().unwrap();
    let garbage = b"this is not a pdf at all".to_vec();
    let mut attempt = UploadAttempt::new("resume.pdf", Cursor::new(garbage));

    let err = validator::validate(&mut attempt, &policy(dir.path())).unwrap_err();
    assert!(matches!(err, ValidationError::Unreadable { .. }));
    assert_eq!(dir_entry_count(dir.path()), 0);
}

#[test]
fn acceptance_writes_content_under_original_filename() {
    let dir = tempfile::tempdir().unwrap();
    let content = make_pdf(2);
    let mut attempt = UploadAttempt::new("jane_doe.pdf", Cursor::new(content.clone()));

    let path = validator::validate(&mut attempt, &policy(dir.path())).unwrap();
    assert_eq!(path, dir.path().join("jane_doe.pdf"));
    assert_eq!(std::fs::read(&path).unwrap(), content);
    assert_eq!(dir_entry_count(dir.path()), 1);
}

#[test]
fn identical_filename_silently_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let first = make_pdf(1);
    let second = make_pdf(2);

    let mut attempt = UploadAttempt::new("resume.pdf", Cursor::new(first));
    validator::validate(&mut attempt, &policy(dir.path())).unwrap();

    let mut attempt = UploadAttempt::new("resume.pdf", Cursor::new(second.clone()));
    let path = validator::validate(&mut attempt, &policy(dir.path())).unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), second);
    assert_eq!(dir_entry_count(dir.path()), 1);
}

#[test]
fn filename_is_reduced_to_its_final_component() {
    let dir = tempfile::tempdir().unwrap();
    let mut attempt = UploadAttempt::new("nested/dir/resume.pdf", Cursor::new(make_pdf(1)));

    let path = validator::validate(&mut attempt, &policy(dir.path())).unwrap();
    assert_eq!(path, dir.path().join("resume.pdf"));
}

#[test]
fn parses_sectioned_resume_text() {
    use intake::services::extractor::parse_answers;

    let text = "Jane Doe\n555-0100\njane@example.com\n\n\
        Education:\n\
        State University, BSc Computer Science, 2015, 2019\n\
        Community College, AS Mathematics, 2013, 2015\n\n\
        Work Experience:\n\
        Acme Corp, Software Engineer, 2019, 2023; Widgets Inc, Intern, 2018, 2019\n\n\
        Skills:\n\
        Python, SQL";

    let answers = parse_answers(text);
    assert_eq!(answers.name, "Jane Doe");
    assert_eq!(answers.phone, "555-0100");

    assert_eq!(answers.education.len(), 2);
    assert_eq!(answers.education[0].institution, "State University");
    assert_eq!(answers.education[0].course, "BSc Computer Science");
    assert_eq!(answers.education[0].start_date, "2015");
    assert_eq!(answers.education[0].end_date, "2019");
    assert_eq!(answers.education[1].institution, "Community College");

    assert_eq!(answers.work_experience.len(), 2);
    assert_eq!(answers.work_experience[0].organization, "Acme Corp");
    assert_eq!(answers.work_experience[0].role, "Software Engineer");
    assert_eq!(answers.work_experience[1].organization, "Widgets Inc");

    assert_eq!(answers.skills, "Python, SQL");
}

#[test]
fn parses_resume_without_sections() {
    use intake::services::extractor::parse_answers;

    let answers = parse_answers("John Smith\n+1 (415) 555-2671\n");
    assert_eq!(answers.name, "John Smith");
    assert_eq!(answers.phone, "+1 (415) 555-2671");
    assert!(answers.education.is_empty());
    assert!(answers.work_experience.is_empty());
    assert_eq!(answers.skills, "");
}

#[test]
fn error_codes_are_stable() {
    assert_eq!(
        AppError::from(ValidationError::NoFile).error_code(),
        "NO_FILE"
    );
    assert_eq!(
        AppError::from(ValidationError::TooLarge { size: 2, limit: 1 }).error_code(),
        "FILE_TOO_LARGE"
    );
    assert_eq!(
        AppError::from(ValidationError::TooManyPages { pages: 5, limit: 3 }).error_code(),
        "TOO_MANY_PAGES"
    );
    assert_eq!(
        AppError::from(ExtractError::failed("bad")).error_code(),
        "EXTRACTION_FAILED"
    );
    assert_eq!(
        AppError::from(StoreError::SubmissionNotFound).error_code(),
        "NO_SUBMISSION"
    );
    assert_eq!(AppError::InvalidCredentials.error_code(), "INVALID_CREDENTIALS");
}

#[test]
fn error_status_codes() {
    use axum::http::StatusCode;

    assert_eq!(
        AppError::from(ValidationError::NoFile).status_code(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        AppError::from(ValidationError::TooLarge { size: 2, limit: 1 }).status_code(),
        StatusCode::PAYLOAD_TOO_LARGE
    );
    assert_eq!(
        AppError::from(ExtractError::failed("bad")).status_code(),
        StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(
        AppError::from(StoreError::Duplicate("a@x.com".into())).status_code(),
        StatusCode::CONFLICT
    );
    assert_eq!(
        AppError::from(StoreError::SubmissionNotFound).status_code(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        AppError::InvalidCredentials.status_code(),
        StatusCode::UNAUTHORIZED
    );
}

#[test]
fn retryable_errors_are_flagged() {
    assert!(AppError::from(ExtractError::failed("bad")).retry_safe());
    assert!(!AppError::from(ValidationError::NoFile).retry_safe());
    assert!(!AppError::InvalidCredentials.retry_safe());
}

#[test]
fn config_defaults_and_overrides() {
    for var in ["SERVER_HOST", "SERVER_PORT", "MAX_FILE_SIZE_MB", "MAX_PAGES"] {
        env::remove_var(var);
    }

    let config = Config::from_env().unwrap();
    assert_eq!(config.max_file_size_mb, 1);
    assert_eq!(config.max_pages, 3);
    assert_eq!(config.server_port, 8080);

    let intake_policy = config.intake_policy();
    assert_eq!(intake_policy.max_file_size, 1024 * 1024);
    assert_eq!(intake_policy.max_pages, 3);

    env::set_var("MAX_FILE_SIZE_MB", "2");
    env::set_var("MAX_PAGES", "5");
    let config = Config::from_env().unwrap();
    assert_eq!(config.max_file_size_mb, 2);
    assert_eq!(config.max_pages, 5);

    env::remove_var("MAX_FILE_SIZE_MB");
    env::remove_var("MAX_PAGES");
}
