//! Intake validator: decides whether an upload may proceed to extraction.

use std::fs;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use lopdf::Document;
use tracing::{debug, info, warn};

use crate::error::ValidationError;
use crate::models::UploadAttempt;

/// The only document type the intake accepts.
pub const ACCEPTED_EXTENSION: &str = "pdf";

/// Acceptance policy for uploaded resumes. Derived from [`crate::Config`] in
/// production; tests construct it directly.
#[derive(Debug, Clone)]
pub struct IntakePolicy {
    /// Byte-length ceiling for one upload.
    pub max_file_size: u64,
    /// Page-count ceiling; a document of exactly this many pages is accepted.
    pub max_pages: usize,
    /// Directory accepted files are written into.
    pub upload_dir: PathBuf,
}

/// Run the acceptance checks in order, short-circuiting on the first failure:
/// filename present, `.pdf` extension (case-insensitive), size ceiling, page
/// ceiling. On acceptance the content is written under `policy.upload_dir`
/// using the original filename and the destination path is returned.
///
/// The size check measures the stream by seeking and restores the read
/// position to the start, so the later full read sees the entire content.
/// Rejection has no side effects; acceptance performs exactly one file write.
///
/// An upload reusing a previously seen filename silently overwrites the
/// stored copy — a known collision hazard when two applicants pick the same
/// filename, accepted for this single-tenant workload.
pub fn validate<R: Read + Seek>(
    attempt: &mut UploadAttempt<R>,
    policy: &IntakePolicy,
) -> Result<PathBuf, ValidationError> {
    if attempt.filename.trim().is_empty() {
        return Err(ValidationError::NoFile);
    }

    if !has_accepted_extension(&attempt.filename) {
        debug!(filename = %attempt.filename, "Rejected upload: unsupported file type");
        return Err(ValidationError::UnsupportedType {
            filename: attempt.filename.clone(),
        });
    }

    let size = measured_len(&mut attempt.stream)?;
    if size > policy.max_file_size {
        debug!(size, limit = policy.max_file_size, "Rejected upload: file too large");
        return Err(ValidationError::TooLarge {
            size,
            limit: policy.max_file_size,
        });
    }

    let mut content = Vec::with_capacity(size as usize);
    attempt.stream.read_to_end(&mut content)?;

    let document = Document::load_mem(&content).map_err(|e| {
        warn!(filename = %attempt.filename, error = %e, "Rejected upload: unreadable document");
        ValidationError::Unreadable {
            message: e.to_string(),
        }
    })?;
    let pages = document.get_pages().len();
    if pages > policy.max_pages {
        debug!(pages, limit = policy.max_pages, "Rejected upload: too many pages");
        return Err(ValidationError::TooManyPages {
            pages,
            limit: policy.max_pages,
        });
    }

    let destination = save_upload(&attempt.filename, &content, &policy.upload_dir)?;
    info!(
        filename = %attempt.filename,
        size,
        pages,
        path = %destination.display(),
        "Upload accepted"
    );
    Ok(destination)
}

fn has_accepted_extension(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(ACCEPTED_EXTENSION))
        .unwrap_or(false)
}

/// Measure the stream length by seeking to the end, then rewind to the start.
fn measured_len<R: Seek>(stream: &mut R) -> std::io::Result<u64> {
    let len = stream.seek(SeekFrom::End(0))?;
    stream.seek(SeekFrom::Start(0))?;
    Ok(len)
}

/// Write the accepted content into `upload_dir` under the original filename,
/// reduced to its final path component so an upload cannot escape the
/// directory.
fn save_upload(filename: &str, content: &[u8], upload_dir: &Path) -> std::io::Result<PathBuf> {
    let name = Path::new(filename)
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(filename));
    fs::create_dir_all(upload_dir)?;
    let destination = upload_dir.join(name);
    fs::write(&destination, content)?;
    Ok(destination)
}
