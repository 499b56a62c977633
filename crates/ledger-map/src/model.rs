//! Field-mapping reconciliation for a single import.
//!
//! The model keeps a total mapping over the current source columns plus a
//! reverse index from destination key to the source holding it. Every
//! mutation goes through `assign` or `clear`, so at most one source maps to
//! any destination at a time. Assigning a taken destination evicts its holder.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use ledger_model::{Catalog, DestinationField};

use crate::error::MappingError;
use crate::types::{DestinationRow, FieldMapping, MappingSummary};

/// Mapping state for one import session.
#[derive(Debug, Clone)]
pub struct FieldMappingModel {
    catalog: Arc<Catalog>,
    mapping: FieldMapping,
    /// destination key -> position of the source holding it
    holders: BTreeMap<String, usize>,
}

impl FieldMappingModel {
    /// Create an empty model (no source fields) over a shared catalog.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            mapping: FieldMapping::default(),
            holders: BTreeMap::new(),
        }
    }

    /// Create a model and initialize it with `sources` in one step.
    pub fn with_sources<I, S>(catalog: Arc<Catalog>, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut model = Self::new(catalog);
        model.initialize(sources);
        model
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    /// Replace the source fields and seed each from the alias table.
    ///
    /// Any previous mapping is discarded. Repeated source names keep their
    /// first occurrence.
    pub fn initialize<I, S>(&mut self, sources: I) -> &FieldMapping
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut mapping = FieldMapping::default();
        for source in sources {
            let source = source.into();
            if !mapping.push(source.clone()) {
                warn!(source = %source, "duplicate source field ignored");
            }
        }
        self.mapping = mapping;
        self.seed_from_aliases();
        info!(
            sources = self.mapping.len(),
            mapped = self.mapping.mapped_count(),
            "initialized field mapping"
        );
        &self.mapping
    }

    /// Map `source` to `destination`, or unmap it when `destination` is
    /// `None` or empty.
    ///
    /// If another source already holds `destination`, that source is unmapped
    /// in the same update.
    pub fn set_mapping(
        &mut self,
        source: &str,
        destination: Option<&str>,
    ) -> Result<&FieldMapping, MappingError> {
        let position = self
            .mapping
            .position(source)
            .ok_or_else(|| MappingError::UnknownField(source.to_string()))?;

        match destination.filter(|key| !key.is_empty()) {
            Some(key) => {
                if !self.catalog.contains(key) {
                    return Err(MappingError::UnknownDestination(key.to_string()));
                }
                self.assign(position, key.to_string());
            }
            None => self.clear(position),
        }
        Ok(&self.mapping)
    }

    /// Unmap every source field.
    pub fn reset_all(&mut self) -> &FieldMapping {
        for position in 0..self.mapping.len() {
            self.mapping.set(position, None);
        }
        self.holders.clear();
        debug!(sources = self.mapping.len(), "cleared all mappings");
        &self.mapping
    }

    /// Re-seed from the alias table, discarding manual edits.
    pub fn apply_automatic(&mut self) -> &FieldMapping {
        self.seed_from_aliases();
        debug!(
            mapped = self.mapping.mapped_count(),
            "applied automatic mapping"
        );
        &self.mapping
    }

    pub fn mapped_count(&self) -> usize {
        self.mapping.mapped_count()
    }

    /// `(mapped_required, total_required)`, counted over destination keys.
    pub fn required_completion_stats(&self) -> (usize, usize) {
        let total = self.catalog.required_count();
        let mapped = self
            .catalog
            .required_fields()
            .filter(|f| self.holders.contains_key(&f.key))
            .count();
        (mapped, total)
    }

    /// Catalog fields whose key or label contains `term`, case-insensitively.
    pub fn search(&self, term: &str) -> Vec<&DestinationField> {
        self.catalog.search(term)
    }

    /// The source currently mapped to `destination`, if any.
    pub fn source_for(&self, destination: &str) -> Option<&str> {
        self.holders
            .get(destination)
            .map(|&position| self.mapping.source_at(position))
    }

    pub fn destination_for(&self, source: &str) -> Option<&str> {
        self.mapping.get(source).flatten()
    }

    /// Whether `source` can be offered for `destination` without stealing it
    /// from another destination.
    pub fn is_available(&self, source: &str, destination: &str) -> bool {
        match self.mapping.get(source) {
            Some(Some(current)) => current == destination,
            Some(None) => true,
            None => false,
        }
    }

    /// Filtered catalog rows joined with their current source.
    pub fn rows(&self, term: &str) -> Vec<DestinationRow<'_>> {
        self.search(term)
            .into_iter()
            .map(|field| DestinationRow {
                field,
                source: self.source_for(&field.key),
            })
            .collect()
    }

    /// Required destinations that no source maps to yet.
    pub fn missing_required(&self) -> Vec<&DestinationField> {
        self.catalog
            .required_fields()
            .filter(|f| !self.holders.contains_key(&f.key))
            .collect()
    }

    pub fn unmapped_sources(&self) -> Vec<&str> {
        self.mapping
            .iter()
            .filter(|(_, destination)| destination.is_none())
            .map(|(source, _)| source)
            .collect()
    }

    pub fn summary(&self) -> MappingSummary {
        let (required_mapped, required_total) = self.required_completion_stats();
        MappingSummary {
            sources: self.mapping.len(),
            mapped: self.mapped_count(),
            destinations: self.catalog.len(),
            required_total,
            required_mapped,
        }
    }

    fn seed_from_aliases(&mut self) {
        self.reset_all();
        for position in 0..self.mapping.len() {
            let alias = self
                .catalog
                .alias_for(self.mapping.source_at(position))
                .map(str::to_string);
            if let Some(key) = alias {
                self.assign(position, key);
            }
        }
    }

    fn assign(&mut self, position: usize, key: String) {
        if let Some(&holder) = self.holders.get(&key) {
            if holder == position {
                return;
            }
            debug!(
                destination = %key,
                evicted = %self.mapping.source_at(holder),
                source = %self.mapping.source_at(position),
                "destination reassigned"
            );
            self.mapping.set(holder, None);
        }
        if let Some(previous) = self.mapping.set(position, Some(key.clone())) {
            self.holders.remove(&previous);
        }
        self.holders.insert(key, position);
    }

    fn clear(&mut self, position: usize) {
        if let Some(previous) = self.mapping.set(position, None) {
            self.holders.remove(&previous);
        }
    }
}
