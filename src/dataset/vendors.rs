//! Item → provider lookup table for the resolver.
//!
//! Source lines are whitespace-separated: the first token is the item, every
//! following token is one provider. Repeated item lines accumulate, and
//! duplicate providers are preserved as given.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::dataset::DatasetError;

/// Immutable provider table, valid for the process lifetime.
#[derive(Debug, Default)]
pub struct VendorTable {
    providers_by_item: HashMap<String, Vec<String>>,
}

impl VendorTable {
    /// Load the table from a dataset file. A missing or unreadable file is
    /// a startup failure; the service must not run without data.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&content))
    }

    /// Build the table from raw line-oriented input.
    pub fn parse(input: &str) -> Self {
        let mut providers_by_item: HashMap<String, Vec<String>> = HashMap::new();

        for line in input.lines() {
            let mut fields = line.split_whitespace();
            let Some(item) = fields.next() else {
                continue;
            };
            let providers: Vec<String> = fields.map(str::to_string).collect();
            if providers.is_empty() {
                tracing::warn!(line, "Vendor line has no providers, skipping");
                continue;
            }
            providers_by_item
                .entry(item.to_string())
                .or_default()
                .extend(providers);
        }

        Self { providers_by_item }
    }

    /// All known providers for an item, in dataset order.
    pub fn providers_for(&self, item: &str) -> Option<&[String]> {
        self.providers_by_item.get(item).map(Vec::as_slice)
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.providers_by_item.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers_by_item.is_empty()
    }
}
