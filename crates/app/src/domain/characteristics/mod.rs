//! Characteristics

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::CharacteristicsServiceError;
pub use service::*;
