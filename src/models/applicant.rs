use chrono::{DateTime, Utc};
use serde::Serialize;

/// A registered applicant, keyed by email.
///
/// `submitted` flips to true exactly once, after a submission has been
/// durably recorded. The password is stored as given; credential handling
/// beyond an equality check is out of scope for this service.
#[derive(Debug, Clone, Serialize)]
pub struct Applicant {
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub submitted: bool,
    pub created_at: DateTime<Utc>,
}
