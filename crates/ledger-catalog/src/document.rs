#![deny(unsafe_code)]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use ledger_model::DestinationField;

/// On-disk shape of a catalog document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogDocument {
    pub catalog: CatalogHeader,
    #[serde(default)]
    pub fields: Vec<FieldEntry>,
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogHeader {
    pub schema: String,
    pub schema_version: u32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldEntry {
    pub key: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub required: bool,
    pub confidence: f32,
    #[serde(default)]
    pub description: String,
}

impl From<FieldEntry> for DestinationField {
    fn from(entry: FieldEntry) -> Self {
        let label = entry.label.unwrap_or_else(|| entry.key.clone());
        DestinationField {
            key: entry.key,
            label,
            required: entry.required,
            confidence: entry.confidence,
            description: entry.description,
        }
    }
}
