use serde::{Deserialize, Serialize};

use crate::models::ResumeAnswers;

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateAccountRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login result. `submitted` lets the client route a returning applicant
/// straight to the "submission received" view.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub email: String,
    pub submitted: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccountResponse {
    pub email: String,
    pub submitted: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub email: String,
    pub already_submitted: bool,
    pub answers: Option<ResumeAnswers>,
}

impl SubmissionResponse {
    pub fn received(email: impl Into<String>, answers: ResumeAnswers) -> Self {
        Self {
            email: email.into(),
            already_submitted: false,
            answers: Some(answers),
        }
    }

    pub fn already_submitted(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            already_submitted: true,
            answers: None,
        }
    }
}
