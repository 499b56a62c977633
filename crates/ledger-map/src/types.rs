//! Mapping types shared between the model and its callers.
//!
//! [`FieldMapping`] is the session-scoped relation from source column
//! headers to destination keys. It serializes as the opaque "apply" payload:
//! a JSON object keyed by original header, with `""` for unmapped columns.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use ledger_model::DestinationField;

/// Header -> destination key (empty when unmapped), as sent to the backend.
pub type MappingPayload = BTreeMap<String, String>;

/// One source column and its optional destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    pub source: String,
    pub destination: Option<String>,
}

/// Total relation over the current import's source fields, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMapping {
    entries: Vec<MappingEntry>,
    index: BTreeMap<String, usize>,
}

impl FieldMapping {
    /// Append an unmapped source. Returns false if it is already present.
    pub(crate) fn push(&mut self, source: String) -> bool {
        if self.index.contains_key(&source) {
            return false;
        }
        self.index.insert(source.clone(), self.entries.len());
        self.entries.push(MappingEntry {
            source,
            destination: None,
        });
        true
    }

    /// Replace the destination at `position`, returning the previous one.
    pub(crate) fn set(&mut self, position: usize, destination: Option<String>) -> Option<String> {
        std::mem::replace(&mut self.entries[position].destination, destination)
    }

    pub(crate) fn position(&self, source: &str) -> Option<usize> {
        self.index.get(source).copied()
    }

    pub(crate) fn source_at(&self, position: usize) -> &str {
        &self.entries[position].source
    }

    /// `None` if the source is not part of this import, `Some(None)` if unmapped.
    pub fn get(&self, source: &str) -> Option<Option<&str>> {
        self.position(source)
            .map(|position| self.entries[position].destination.as_deref())
    }

    pub fn contains(&self, source: &str) -> bool {
        self.index.contains_key(source)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|e| (e.source.as_str(), e.destination.as_deref()))
    }

    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.source.as_str())
    }

    pub fn mapped_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.destination.is_some())
            .count()
    }

    pub fn to_payload(&self) -> MappingPayload {
        self.entries
            .iter()
            .map(|e| {
                (
                    e.source.clone(),
                    e.destination.clone().unwrap_or_default(),
                )
            })
            .collect()
    }
}

impl Serialize for FieldMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.source, entry.destination.as_deref().unwrap_or(""))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MappingVisitor;

        impl<'de> Visitor<'de> for MappingVisitor {
            type Value = FieldMapping;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from source header to destination key")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut mapping = FieldMapping::default();
                while let Some((source, destination)) = access.next_entry::<String, String>()? {
                    if !mapping.push(source.clone()) {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate source field: {source}"
                        )));
                    }
                    if !destination.is_empty() {
                        let position = mapping.len() - 1;
                        mapping.set(position, Some(destination));
                    }
                }
                Ok(mapping)
            }
        }

        deserializer.deserialize_map(MappingVisitor)
    }
}

/// A catalog field joined with the source currently mapped to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DestinationRow<'a> {
    pub field: &'a DestinationField,
    pub source: Option<&'a str>,
}

/// Summary of mapping counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MappingSummary {
    /// Source columns in the current import.
    pub sources: usize,
    /// Source columns with a destination.
    pub mapped: usize,
    /// Destination fields in the catalog.
    pub destinations: usize,
    /// Required destination fields in the catalog.
    pub required_total: usize,
    /// Required destination fields that currently have a source.
    pub required_mapped: usize,
}

impl MappingSummary {
    pub fn is_complete(&self) -> bool {
        self.required_mapped == self.required_total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_rejects_duplicates() {
        let mut mapping = FieldMapping::default();
        assert!(mapping.push("Pos".to_string()));
        assert!(!mapping.push("Pos".to_string()));
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get("Pos"), Some(None));
        assert_eq!(mapping.get("D/H"), None);
    }

    #[test]
    fn serializes_in_header_order() {
        let mut mapping = FieldMapping::default();
        mapping.push("Pos".to_string());
        mapping.push("Acreedor".to_string());
        mapping.set(0, Some("line_number".to_string()));
        let json = serde_json::to_string(&mapping).unwrap();
        assert_eq!(json, r#"{"Pos":"line_number","Acreedor":""}"#);
    }

    #[test]
    fn deserialize_rejects_duplicate_headers() {
        let err = serde_json::from_str::<FieldMapping>(r#"{"Pos":"","Pos":"line_number"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("duplicate source field: Pos"));
    }
}
