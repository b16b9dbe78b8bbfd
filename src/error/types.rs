use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

pub type AppResult<T> = Result<T, AppError>;

/// Reasons the intake validator refuses an upload, in check order.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("no file selected")]
    NoFile,

    #[error("unsupported file type: {filename}")]
    UnsupportedType { filename: String },

    #[error("file too large: {size} bytes exceeds limit of {limit} bytes")]
    TooLarge { size: u64, limit: u64 },

    #[error("too many pages: {pages} exceeds limit of {limit}")]
    TooManyPages { pages: usize, limit: usize },

    #[error("unreadable document: {message}")]
    Unreadable { message: String },

    #[error("upload could not be stored: {0}")]
    Io(#[from] std::io::Error),
}

/// The extraction collaborator's only failure mode. The coordinator does not
/// retry; a failed extraction is terminal for the request.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("extraction failed: {message}")]
    Failed { message: String },
}

impl ExtractError {
    pub fn failed(message: impl Into<String>) -> Self {
        ExtractError::Failed {
            message: message.into(),
        }
    }
}

/// Failures from the applicant and submission store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("account already exists: {0}")]
    Duplicate(String),

    #[error("no account found for {0}")]
    ApplicantNotFound(String),

    #[error("no submission found")]
    SubmissionNotFound,

    #[error("database error: {0}")]
    Sqlite(#[from] tokio_rusqlite::Error),

    #[error("stored record is corrupt: {0}")]
    Encoding(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Extraction(#[from] ExtractError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("missing field in request: {field}")]
    MissingField { field: String },

    #[error("internal server error: {message}")]
    Internal { message: String },
}

impl AppError {
    pub fn missing_field(field: impl Into<String>) -> Self {
        AppError::MissingField {
            field: field.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(ValidationError::NoFile) => "NO_FILE",
            AppError::Validation(ValidationError::UnsupportedType { .. }) => "UNSUPPORTED_TYPE",
            AppError::Validation(ValidationError::TooLarge { .. }) => "FILE_TOO_LARGE",
            AppError::Validation(ValidationError::TooManyPages { .. }) => "TOO_MANY_PAGES",
            AppError::Validation(ValidationError::Unreadable { .. }) => "UNREADABLE_DOCUMENT",
            AppError::Validation(ValidationError::Io(_)) => "UPLOAD_WRITE_FAILED",
            AppError::Extraction(_) => "EXTRACTION_FAILED",
            AppError::Store(StoreError::Duplicate(_)) => "DUPLICATE_ACCOUNT",
            AppError::Store(StoreError::ApplicantNotFound(_)) => "ACCOUNT_NOT_FOUND",
            AppError::Store(StoreError::SubmissionNotFound) => "NO_SUBMISSION",
            AppError::Store(StoreError::Sqlite(_)) => "DATABASE_ERROR",
            AppError::Store(StoreError::Encoding(_)) => "RECORD_CORRUPT",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::MissingField { .. } => "MISSING_FIELD",
            AppError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(ValidationError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Validation(ValidationError::Io(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Store(StoreError::Duplicate(_)) => StatusCode::CONFLICT,
            AppError::Store(StoreError::ApplicantNotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Store(StoreError::SubmissionNotFound) => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::MissingField { .. } => StatusCode::BAD_REQUEST,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the user may safely retry the same submission. Extraction and
    /// persistence failures leave no state behind, so they are retryable.
    pub fn retry_safe(&self) -> bool {
        matches!(
            self,
            AppError::Extraction(_)
                | AppError::Store(StoreError::Sqlite(_))
                | AppError::Store(StoreError::Encoding(_))
                | AppError::Validation(ValidationError::Io(_))
                | AppError::Internal { .. }
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();
        let request_id = Uuid::new_v4().to_string();

        tracing::error!(
            error_code = error_code,
            status_code = %status,
            request_id = %request_id,
            error_message = %message,
            "request failed"
        );

        let body = Json(json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": message,
                "retry_safe": self.retry_safe(),
                "request_id": request_id,
            },
            "data": null
        }));

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}
