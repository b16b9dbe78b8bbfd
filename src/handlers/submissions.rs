use std::io::Cursor;

use axum::{
    extract::{Multipart, Path, State},
    response::Json,
};
use bytes::Bytes;
use tracing::{debug, info};

use crate::error::{AppError, AppResult, StoreError, ValidationError};
use crate::models::{ResumeAnswers, SubmissionResponse, UploadAttempt};
use crate::services::validator;
use crate::state::AppState;

/// One resume upload: multipart fields `email` (text) and `resume` (file).
///
/// A returning applicant with `submitted = true` is routed straight to the
/// already-submitted outcome without re-entering validation. Otherwise the
/// upload runs the full pipeline: validate, extract, persist, respond with
/// the extracted answers.
pub async fn submit_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<SubmissionResponse>> {
    let upload = read_upload(multipart).await?;
    debug!(email = %upload.email, filename = %upload.filename, "Received submission request");

    let applicant = state
        .store
        .find_applicant(&upload.email)
        .await?
        .ok_or_else(|| StoreError::ApplicantNotFound(upload.email.clone()))?;

    if applicant.submitted {
        info!(email = %applicant.email, "Submission already received, skipping intake");
        return Ok(Json(SubmissionResponse::already_submitted(applicant.email)));
    }

    let mut attempt = UploadAttempt::new(upload.filename, Cursor::new(upload.content));
    let path = validator::validate(&mut attempt, &state.policy)?;

    let answers = state.coordinator.process(&path, &applicant.email).await?;
    Ok(Json(SubmissionResponse::received(applicant.email, answers)))
}

/// Redisplay the stored answers for an applicant.
pub async fn show_answers(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<ResumeAnswers>> {
    let answers = state.coordinator.retrieve(&email).await?;
    Ok(Json(answers))
}

struct RawUpload {
    email: String,
    filename: String,
    content: Bytes,
}

async fn read_upload(mut multipart: Multipart) -> Result<RawUpload, AppError> {
    let mut email: Option<String> = None;
    let mut file: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::internal(format!("could not read multipart field: {e}")))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("email") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::internal(format!("could not read email field: {e}")))?;
                email = Some(value.trim().to_string());
            }
            Some("resume") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::internal(format!("could not read resume field: {e}")))?;
                file = Some((filename, content));
            }
            _ => {}
        }
    }

    let email = match email {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AppError::missing_field("email")),
    };
    let (filename, content) = file.ok_or(ValidationError::NoFile)?;

    Ok(RawUpload {
        email,
        filename,
        content,
    })
}
