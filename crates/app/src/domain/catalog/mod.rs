//! Catalog: restaurants and their menus

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::CatalogServiceError;
pub use service::*;

pub(crate) use repository::SqliteCatalogRepository;
