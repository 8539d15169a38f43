//! Column schema accumulated while parsing a batch of message files.
//!
//! Every timing category gets a path key built from its name: the name is
//! split on whitespace, each token is capitalized and stripped of periods,
//! and the tokens are concatenated. Child paths join the parent key and the
//! child key with [`PATH_SEPARATOR`], e.g. `ElementProcessing/Solids`.

use std::collections::HashMap;

/// Separator between a parent key and a child key.
pub const PATH_SEPARATOR: char = '/';

/// Build the lookup key for a timing category name.
///
/// ```
/// assert_eq!(lsti::schema::normalize("element processing"), "ElementProcessing");
/// assert_eq!(lsti::schema::normalize("K.W. read"), "KWRead");
/// ```
pub fn normalize(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    for token in name.split_whitespace() {
        let mut chars = token.chars().filter(|&c| c != '.');
        if let Some(first) = chars.next() {
            key.extend(first.to_uppercase());
            key.extend(chars);
        }
    }
    key
}

/// Join a parent key and a child key into a child path.
pub fn join(parent: &str, child: &str) -> String {
    format!("{parent}{PATH_SEPARATOR}{child}")
}

/// Incrementally built schema for one parse batch.
///
/// Keys keep the order in which they were first inserted; inserting a key
/// twice is a no-op.
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    keys: Vec<String>,
    labels: HashMap<String, String>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` with its human-readable `label`.
    ///
    /// Returns `true` if the path was not known yet.
    pub fn insert(&mut self, path: &str, label: &str) -> bool {
        if self.labels.contains_key(path) {
            return false;
        }
        self.keys.push(path.to_string());
        self.labels.insert(path.to_string(), label.to_string());
        true
    }

    /// Append the keys of `other` that this builder has not seen yet.
    pub fn merge(&mut self, other: SchemaBuilder) {
        let SchemaBuilder { keys, mut labels } = other;
        for key in keys {
            let label = labels.remove(&key).unwrap_or_default();
            self.insert(&key, &label);
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn finish(self) -> Schema {
        Schema {
            keys: self.keys,
            labels: self.labels,
        }
    }
}

/// Finalized, read-only schema of a parse batch.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    keys: Vec<String>,
    labels: HashMap<String, String>,
}

impl Schema {
    /// Path keys in first-seen order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Original label for a path, e.g. `Element Processing/Solids`.
    pub fn label(&self, path: &str) -> Option<&str> {
        self.labels.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.labels.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keys
            .iter()
            .map(|key| (key.as_str(), self.label(key).unwrap_or_default()))
    }
}
