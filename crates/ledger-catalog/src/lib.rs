#![deny(unsafe_code)]

pub mod document;
pub mod error;
pub mod loader;

pub use crate::document::{CatalogDocument, CatalogHeader, FieldEntry};
pub use crate::error::CatalogError;
pub use crate::loader::{
    CATALOG_SCHEMA, CATALOG_SCHEMA_VERSION, LoadedCatalog, load_catalog, load_default_catalog,
    parse_catalog,
};
