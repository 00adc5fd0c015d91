//! Carts

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::CartsServiceError;
pub use service::*;

pub(crate) use repository::SqliteCartEntriesRepository;
