//! Product Characteristics

mod handlers;

pub(crate) use handlers::*;
