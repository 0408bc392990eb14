//! Technique catalog loading.

mod file_catalog;

pub use file_catalog::{load_catalog, CatalogFormat};
