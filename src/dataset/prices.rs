//! Provider → price lookup table for the pricing service.
//!
//! Source lines are exactly `provider item price`. Anything with a different
//! field count is skipped with a diagnostic. Prices stay verbatim strings;
//! the service formats them, it never does arithmetic on them.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::dataset::DatasetError;

/// Immutable two-level price table keyed by item, then provider.
#[derive(Debug, Default)]
pub struct PriceTable {
    prices_by_item: HashMap<String, HashMap<String, String>>,
}

impl PriceTable {
    /// Load the table from a dataset file; unreadable files fail startup.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&content))
    }

    /// Build the table from raw line-oriented input.
    pub fn parse(input: &str) -> Self {
        let mut prices_by_item: HashMap<String, HashMap<String, String>> = HashMap::new();

        for line in input.lines() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }
            if fields.len() != 3 {
                tracing::warn!(line, "Price line is not `provider item price`, skipping");
                continue;
            }
            prices_by_item
                .entry(fields[1].to_string())
                .or_default()
                .insert(fields[0].to_string(), fields[2].to_string());
        }

        Self { prices_by_item }
    }

    /// The provider → price map for one item.
    pub fn prices_for(&self, item: &str) -> Option<&HashMap<String, String>> {
        self.prices_by_item.get(item)
    }

    pub fn price_of(&self, item: &str, provider: &str) -> Option<&str> {
        self.prices_by_item
            .get(item)?
            .get(provider)
            .map(String::as_str)
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.prices_by_item.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices_by_item.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_triples() {
        let table = PriceTable::parse("storeA apple 2\nstoreB apple 3\nstoreB banana 1\n");
        assert_eq!(table.price_of("apple", "storeA"), Some("2"));
        assert_eq!(table.price_of("apple", "storeB"), Some("3"));
        assert_eq!(table.price_of("banana", "storeB"), Some("1"));
        assert_eq!(table.price_of("banana", "storeA"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_wrong_field_count_skipped() {
        let table = PriceTable::parse("storeA apple\nstoreB apple 3 extra\nstoreC apple 4\n");
        assert_eq!(table.prices_for("apple").unwrap().len(), 1);
        assert_eq!(table.price_of("apple", "storeC"), Some("4"));
    }

    #[test]
    fn test_later_line_wins_for_same_pair() {
        let table = PriceTable::parse("storeA apple 2\nstoreA apple 9\n");
        assert_eq!(table.price_of("apple", "storeA"), Some("9"));
    }

    #[test]
    fn test_price_kept_verbatim() {
        let table = PriceTable::parse("storeA apple 2.50\n");
        assert_eq!(table.price_of("apple", "storeA"), Some("2.50"));
    }
}
