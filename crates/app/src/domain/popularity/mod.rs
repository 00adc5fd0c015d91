//! Popularity: the same-day "mostly ordered" tag

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::PopularityServiceError;
pub use service::*;
