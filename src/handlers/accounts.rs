use axum::{extract::State, response::Json};
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{AccountResponse, CreateAccountRequest, LoginRequest, LoginResponse};
use crate::state::AppState;

/// Register a new applicant. Email uniqueness is enforced by the store; a
/// duplicate registration fails with 409.
pub async fn create_account(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> AppResult<Json<AccountResponse>> {
    if request.email.trim().is_empty() {
        return Err(AppError::missing_field("email"));
    }
    if request.password.is_empty() {
        return Err(AppError::missing_field("password"));
    }

    let applicant = state
        .store
        .create_applicant(request.email.trim(), &request.password)
        .await?;

    info!(email = %applicant.email, "Account created");
    Ok(Json(AccountResponse {
        email: applicant.email,
        submitted: applicant.submitted,
    }))
}

/// Credential check. The response carries the submission state so the client
/// can route an already-submitted applicant straight to the received view.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    match state
        .store
        .authenticate(&request.email, &request.password)
        .await?
    {
        Some(applicant) => {
            info!(email = %applicant.email, submitted = applicant.submitted, "Login succeeded");
            Ok(Json(LoginResponse {
                email: applicant.email,
                submitted: applicant.submitted,
            }))
        }
        None => {
            warn!(email = %request.email, "Login failed");
            Err(AppError::InvalidCredentials)
        }
    }
}
