//! Drives an accepted upload through extraction and durable persistence.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{AppError, StoreError};
use crate::models::ResumeAnswers;
use crate::services::extractor::ResumeExtractor;
use crate::store::Store;

/// Coordinates the post-validation half of the pipeline: extract, persist,
/// flip the applicant's submission state, clean up the upload.
///
/// The coordinator is the only writer of submission records.
#[derive(Clone)]
pub struct SubmissionCoordinator {
    store: Store,
    extractor: Arc<dyn ResumeExtractor>,
}

impl SubmissionCoordinator {
    pub fn new(store: Store, extractor: Arc<dyn ResumeExtractor>) -> Self {
        Self { store, extractor }
    }

    /// Extract answers from the accepted file at `path` and record them for
    /// `email`.
    ///
    /// Extraction is not retried; a failure surfaces to the caller and leaves
    /// no state behind. The record write and the `submitted` flag update are
    /// one transaction, so a failure there also leaves the applicant free to
    /// retry. The uploaded file is deleted once the record is durable.
    pub async fn process(&self, path: &Path, email: &str) -> Result<ResumeAnswers, AppError> {
        info!(email = %email, path = %path.display(), "Processing accepted upload");

        let answers = self.extractor.extract(path)?;
        self.store.save_submission(email, &answers).await?;

        if let Err(e) = std::fs::remove_file(path) {
            warn!(
                path = %path.display(),
                error = %e,
                "Could not remove upload after persistence"
            );
        }

        info!(email = %email, "Submission complete");
        Ok(answers)
    }

    /// Read back the stored record for redisplay.
    pub async fn retrieve(&self, email: &str) -> Result<ResumeAnswers, AppError> {
        match self.store.find_submission(email).await? {
            Some(answers) => Ok(answers),
            None => Err(StoreError::SubmissionNotFound.into()),
        }
    }
}
