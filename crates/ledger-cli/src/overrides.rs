//! Manual `SOURCE=KEY` mapping overrides given on the command line.

use std::str::FromStr;

use ledger_map::{FieldMappingModel, MappingError};

/// One manual assignment. An empty key unmaps the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingOverride {
    pub source: String,
    pub destination: Option<String>,
}

impl FromStr for MappingOverride {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        // Split on the last '=' so headers containing '=' still parse.
        let (source, key) = value
            .rsplit_once('=')
            .ok_or_else(|| format!("expected SOURCE=KEY, got '{value}'"))?;
        if source.is_empty() {
            return Err(format!("missing source column in '{value}'"));
        }
        let key = key.trim();
        Ok(Self {
            source: source.to_string(),
            destination: (!key.is_empty()).then(|| key.to_string()),
        })
    }
}

/// Apply overrides in order; a later override may evict an earlier one.
pub fn apply_overrides(
    model: &mut FieldMappingModel,
    overrides: &[MappingOverride],
) -> Result<(), MappingError> {
    for entry in overrides {
        model.set_mapping(&entry.source, entry.destination.as_deref())?;
    }
    Ok(())
}
