//! The fixed destination-field catalog and its alias table.
//!
//! A [`Catalog`] is validated once at construction and never mutated
//! afterwards. Every import session reads from the same instance.

use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::error::{ModelError, Result};
use crate::field::DestinationField;

/// Default associations from exact source header text to destination key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: BTreeMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an alias, returning the previous target for that source name.
    pub fn insert(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Option<String> {
        self.entries.insert(source.into(), target.into())
    }

    /// Look up the destination key for an exact source header.
    pub fn get(&self, source: &str) -> Option<&str> {
        self.entries.get(source).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(s, t)| (s.as_str(), t.as_str()))
    }
}

impl<S: Into<String>, T: Into<String>> FromIterator<(S, T)> for AliasTable {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut table = AliasTable::new();
        for (source, target) in iter {
            table.insert(source, target);
        }
        table
    }
}

impl<'a> IntoIterator for &'a AliasTable {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Validated catalog of destination fields in declaration order.
#[derive(Debug, Clone)]
pub struct Catalog {
    fields: Vec<DestinationField>,
    index: BTreeMap<String, usize>,
    aliases: AliasTable,
}

impl Catalog {
    /// Build a catalog, rejecting malformed fields and ambiguous aliases.
    pub fn new(fields: Vec<DestinationField>, aliases: AliasTable) -> Result<Self> {
        let mut index = BTreeMap::new();
        for (position, field) in fields.iter().enumerate() {
            if field.key.trim().is_empty() {
                return Err(ModelError::EmptyFieldKey);
            }
            if !(0.0..=1.0).contains(&field.confidence) {
                return Err(ModelError::ConfidenceOutOfRange {
                    key: field.key.clone(),
                    value: field.confidence,
                });
            }
            if index.insert(field.key.clone(), position).is_some() {
                return Err(ModelError::DuplicateFieldKey(field.key.clone()));
            }
        }

        let mut claimed: BTreeMap<&str, &str> = BTreeMap::new();
        for (source, target) in aliases.iter() {
            if source.trim().is_empty() {
                return Err(ModelError::EmptyAliasSource {
                    target: target.to_string(),
                });
            }
            if !index.contains_key(target) {
                return Err(ModelError::UnknownAliasTarget {
                    source_name: source.to_string(),
                    target: target.to_string(),
                });
            }
            if let Some(first) = claimed.insert(target, source) {
                return Err(ModelError::AliasCollision {
                    target: target.to_string(),
                    first: first.to_string(),
                    second: source.to_string(),
                });
            }
        }

        Ok(Self {
            fields,
            index,
            aliases,
        })
    }

    pub fn fields(&self) -> &[DestinationField] {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&DestinationField> {
        self.index.get(key).map(|&position| &self.fields[position])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Declaration position of a field, used to keep catalog order stable.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Destination key the alias table proposes for a source header.
    pub fn alias_for(&self, source: &str) -> Option<&str> {
        self.aliases.get(source)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn required_count(&self) -> usize {
        self.fields.iter().filter(|f| f.required).count()
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &DestinationField> {
        self.fields.iter().filter(|f| f.required)
    }

    /// Fields whose key or label contains `term`, in declaration order.
    pub fn search(&self, term: &str) -> Vec<&DestinationField> {
        self.fields.iter().filter(|f| f.matches(term)).collect()
    }
}
