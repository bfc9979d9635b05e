//! State

use std::sync::Arc;

use storefront_app::{context::AppContext, domain::carts::janitor::JanitorHandle};

/// Shared handler state: the domain services plus the idle cart janitor.
#[derive(Debug, Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) janitor: JanitorHandle,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, janitor: JanitorHandle) -> Arc<Self> {
        Arc::new(Self { app, janitor })
    }
}
