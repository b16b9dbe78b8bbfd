use std::sync::Arc;

use crate::services::{IntakePolicy, ResumeExtractor, SubmissionCoordinator};
use crate::store::Store;

/// Shared application state injected into route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub coordinator: SubmissionCoordinator,
    pub policy: IntakePolicy,
}

impl AppState {
    pub fn new(store: Store, extractor: Arc<dyn ResumeExtractor>, policy: IntakePolicy) -> Self {
        let coordinator = SubmissionCoordinator::new(store.clone(), extractor);
        Self {
            store,
            coordinator,
            policy,
        }
    }
}
