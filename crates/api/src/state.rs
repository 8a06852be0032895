use std::sync::Arc;

use review_portal_core::ReviewWorkflow;

/// Shared application state, passed to all handlers via Axum's `State` extractor.
/// Holds no request data; every handler goes to the record store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    workflow: ReviewWorkflow,
}

impl AppState {
    pub fn new(workflow: ReviewWorkflow) -> Self {
        Self {
            inner: Arc::new(InnerState { workflow }),
        }
    }

    pub fn workflow(&self) -> &ReviewWorkflow {
        &self.inner.workflow
    }
}
