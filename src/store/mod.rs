//! Applicant and submission storage backed by a single SQLite file.

pub mod schema;

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::models::{Applicant, ResumeAnswers};
use schema::SCHEMA;

type Result<T> = std::result::Result<T, StoreError>;

/// Durable store for applicants and their extracted submissions.
///
/// Cloning is cheap — the inner connection is reference-counted, so handlers
/// acquire a scoped handle per operation instead of opening the database on
/// every call.
#[derive(Clone)]
pub struct Store {
    conn: tokio_rusqlite::Connection,
}

impl Store {
    /// Open (or create) a store at `path` and run schema initialisation.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        info!("Opening intake database at {}", path.as_ref().display());
        let conn = tokio_rusqlite::Connection::open(path).await?;
        let store = Self { conn };
        store.init_schema().await?;
        Ok(store)
    }

    /// Open an in-memory store — useful for testing.
    pub async fn open_in_memory() -> Result<Self> {
        let conn = tokio_rusqlite::Connection::open_in_memory().await?;
        let store = Self { conn };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<()> {
        self.conn
            .call(|conn| {
                conn.execute_batch(SCHEMA)?;
                Ok(())
            })
            .await?;
        Ok(())
    }

    /// Register a new applicant with `submitted = false`.
    ///
    /// Email uniqueness is enforced by the primary key; a duplicate insert
    /// fails with [`StoreError::Duplicate`].
    pub async fn create_applicant(&self, email: &str, password: &str) -> Result<Applicant> {
        let applicant = Applicant {
            email: email.to_string(),
            password: password.to_string(),
            submitted: false,
            created_at: Utc::now(),
        };

        let row = applicant.clone();
        let result = self
            .conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO applicants (email, password, submitted, created_at)
                     VALUES (?1, ?2, 0, ?3)",
                    rusqlite::params![row.email, row.password, row.created_at.to_rfc3339()],
                )?;
                Ok(())
            })
            .await;

        match result {
            Ok(()) => {
                debug!(email = %applicant.email, "Applicant created");
                Ok(applicant)
            }
            Err(e) if is_unique_violation(&e) => Err(StoreError::Duplicate(email.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    /// Look up an applicant by email.
    pub async fn find_applicant(&self, email: &str) -> Result<Option<Applicant>> {
        let email = email.to_string();
        let applicant = self
            .conn
            .call(move |conn| {
                let row = conn
                    .query_row(
                        "SELECT email, password, submitted, created_at
                         FROM applicants WHERE email = ?1",
                        rusqlite::params![email],
                        applicant_from_row,
                    )
                    .optional()?;
                Ok(row)
            })
            .await?;
        Ok(applicant)
    }

    /// Look up an applicant by email and password. Returns `None` when either
    /// the account is missing or the password does not match.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Option<Applicant>> {
        let email = email.to_string();
        let password = password.to_string();
        let applicant = self
            .conn
            .call(move |conn| {
                let row = conn
                    .query_row(
                        "SELECT email, password, submitted, created_at
                         FROM applicants WHERE email = ?1 AND password = ?2",
                        rusqlite::params![email, password],
                        applicant_from_row,
                    )
                    .optional()?;
                Ok(row)
            })
            .await?;
        Ok(applicant)
    }

    /// Flip the applicant's `submitted` flag.
    ///
    /// The coordinator does not call this directly — [`Store::save_submission`]
    /// updates the flag inside the same transaction that writes the record.
    pub async fn mark_submitted(&self, email: &str) -> Result<()> {
        let key = email.to_string();
        let updated = self
            .conn
            .call(move |conn| {
                let n = conn.execute(
                    "UPDATE applicants SET submitted = 1 WHERE email = ?1",
                    rusqlite::params![key],
                )?;
                Ok(n)
            })
            .await?;
        if updated == 0 {
            return Err(StoreError::ApplicantNotFound(email.to_string()));
        }
        Ok(())
    }

    /// Record a submission for `email` and mark the applicant submitted, in
    /// one transaction. Either both writes land or neither does, so a reader
    /// can never observe `submitted = true` without a retrievable record.
    ///
    /// A re-submission (where the caller permits one) supersedes the prior
    /// record for the same applicant.
    pub async fn save_submission(&self, email: &str, answers: &ResumeAnswers) -> Result<()> {
        let payload = serde_json::to_string(answers)?;
        let key = email.to_string();

        let result = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                tx.execute(
                    "INSERT INTO submissions (email, answers, submitted_at)
                     VALUES (?1, ?2, ?3)
                     ON CONFLICT (email) DO UPDATE SET
                         answers = excluded.answers,
                         submitted_at = excluded.submitted_at",
                    rusqlite::params![key, payload, Utc::now().to_rfc3339()],
                )?;
                let updated = tx.execute(
                    "UPDATE applicants SET submitted = 1 WHERE email = ?1",
                    rusqlite::params![key],
                )?;
                if updated == 0 {
                    // Dropping the transaction rolls the record write back.
                    return Err(rusqlite::Error::QueryReturnedNoRows.into());
                }
                tx.commit()?;
                Ok(())
            })
            .await;

        match result {
            Ok(()) => {
                info!(email = %email, "Submission recorded");
                Ok(())
            }
            Err(e) if is_no_rows(&e) => Err(StoreError::ApplicantNotFound(email.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    /// Read back the stored submission for `email`, if any.
    pub async fn find_submission(&self, email: &str) -> Result<Option<ResumeAnswers>> {
        let key = email.to_string();
        let payload: Option<String> = self
            .conn
            .call(move |conn| {
                let row = conn
                    .query_row(
                        "SELECT answers FROM submissions WHERE email = ?1",
                        rusqlite::params![key],
                        |row| row.get(0),
                    )
                    .optional()?;
                Ok(row)
            })
            .await?;

        match payload {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}

fn applicant_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Applicant> {
    Ok(Applicant {
        email: row.get(0)?,
        password: row.get(1)?,
        submitted: row.get::<_, i64>(2)? != 0,
        created_at: decode_dt(&row.get::<_, String>(3)?)?,
    })
}

fn decode_dt(raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn is_unique_violation(err: &tokio_rusqlite::Error) -> bool {
    matches!(
        err,
        tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

fn is_no_rows(err: &tokio_rusqlite::Error) -> bool {
    matches!(
        err,
        tokio_rusqlite::Error::Rusqlite(rusqlite::Error::QueryReturnedNoRows)
    )
}
