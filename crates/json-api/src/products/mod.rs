//! Products

pub(crate) mod characteristics;
mod errors;
mod handlers;

pub(crate) use handlers::*;
