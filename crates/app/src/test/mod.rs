//! Integration test support: one `PostgreSQL` container, one database per test.

mod context;
pub(crate) mod helpers;

pub(crate) use context::TestContext;
