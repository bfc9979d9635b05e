//! Carts
//!
//! Admin view over every session cart, including the idle cart sweep.

mod errors;
mod handlers;

pub(crate) use handlers::*;
