#![deny(unsafe_code)]

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use ledger_model::{AliasTable, Catalog, DestinationField};

use crate::document::CatalogDocument;
use crate::error::CatalogError;

pub const CATALOG_SCHEMA: &str = "ledger-map.field-catalog";
pub const CATALOG_SCHEMA_VERSION: u32 = 1;

const DEFAULT_CATALOG: &str = include_str!("../data/libro_diario.toml");

/// A validated catalog ready to be shared by import sessions.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub name: String,
    pub catalog: Arc<Catalog>,
}

impl LoadedCatalog {
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }
}

/// Parse and validate a catalog document.
///
/// `origin` names the document in error messages (a path or "<default>").
pub fn parse_catalog(text: &str, origin: &str) -> Result<LoadedCatalog, CatalogError> {
    let document: CatalogDocument = toml::from_str(text).map_err(|e| CatalogError::Toml {
        origin: origin.to_string(),
        source: e,
    })?;
    validate_header(&document, origin)?;

    let name = document.catalog.name.clone();
    let fields: Vec<DestinationField> = document.fields.into_iter().map(Into::into).collect();
    let aliases: AliasTable = document.aliases.into_iter().collect();
    let catalog = Catalog::new(fields, aliases).map_err(|e| CatalogError::Invalid {
        origin: origin.to_string(),
        source: e,
    })?;

    info!(
        catalog = %name,
        fields = catalog.len(),
        required = catalog.required_count(),
        aliases = catalog.aliases().len(),
        "loaded field catalog"
    );

    Ok(LoadedCatalog {
        name,
        catalog: Arc::new(catalog),
    })
}

/// Read and validate a catalog document from disk.
pub fn load_catalog(path: &Path) -> Result<LoadedCatalog, CatalogError> {
    debug!(path = %path.display(), "reading field catalog");
    let contents = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    parse_catalog(&contents, &path.display().to_string())
}

/// The built-in "Libro Diario" catalog for SAP journal exports.
pub fn load_default_catalog() -> Result<LoadedCatalog, CatalogError> {
    parse_catalog(DEFAULT_CATALOG, "<default>")
}

fn validate_header(document: &CatalogDocument, origin: &str) -> Result<(), CatalogError> {
    if document.catalog.schema != CATALOG_SCHEMA {
        return Err(CatalogError::UnsupportedSchema {
            origin: origin.to_string(),
            message: format!("unsupported schema: {}", document.catalog.schema),
        });
    }
    if document.catalog.schema_version != CATALOG_SCHEMA_VERSION {
        return Err(CatalogError::UnsupportedSchema {
            origin: origin.to_string(),
            message: format!(
                "unsupported schema_version: {}",
                document.catalog.schema_version
            ),
        });
    }
    if document.catalog.name.trim().is_empty() {
        return Err(CatalogError::UnsupportedSchema {
            origin: origin.to_string(),
            message: "catalog name must not be empty".to_string(),
        });
    }
    Ok(())
}
