//! Analysis
//!
//! Order analytics over the 30 days leading up to `?at=` (default now).

mod errors;
mod handlers;

pub(crate) use handlers::*;
