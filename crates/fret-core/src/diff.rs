//! Specification diffing across a comparison set.
//!
//! The diff is derived, never stored: it is recomputed from the current
//! products (plus the backend comparison matrix, when one is supplied)
//! every time the comparison set changes.

use crate::ids::ProductId;
use crate::product::{display_value, Product};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// Cap on the number of differences surfaced in the summary display.
pub const TOP_DIFFERENCES_CAP: usize = 6;

/// One row of the backend-precomputed comparison matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixRow {
    pub key: String,
    /// One value per compared product, in request order.
    #[serde(default)]
    pub values: Vec<Value>,
}

/// Backend-precomputed spec matrix from `POST /compare`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonMatrix {
    #[serde(default)]
    pub rows: Vec<MatrixRow>,
}

/// Merged comparison payload from `POST /compare`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonPayload {
    pub products: Vec<Product>,
    /// Spec keys the backend already knows are common to all products.
    #[serde(default)]
    pub common_specs: Vec<String>,
    /// Precomputed spec matrix, when the backend provides one.
    #[serde(default)]
    pub matrix: Option<ComparisonMatrix>,
}

impl ComparisonPayload {
    /// Ids of the returned products, payload order.
    pub fn product_ids(&self) -> Vec<ProductId> {
        self.products.iter().map(|p| p.id).collect()
    }
}

/// Diff entry for a single specification key.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyDiff {
    pub key: String,
    /// Every product has a non-empty value for this key.
    pub present_in_all: bool,
    /// Values are not all equal after case-insensitive normalization.
    pub values_differ: bool,
    /// Display value per product, comparison-set order. Absent values are
    /// empty strings.
    pub values: Vec<String>,
}

/// Derived diff over the full key universe.
///
/// Keys appear in first-seen order: matrix rows first, then each product's
/// own spec keys, then content-only keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecDiff {
    pub keys: Vec<KeyDiff>,
}

impl SpecDiff {
    /// Compute the diff for a set of products.
    ///
    /// A product's own spec value wins; the matrix only widens the key
    /// universe and back-fills values the product record lacks.
    pub fn compute(products: &[Product], matrix: Option<&ComparisonMatrix>) -> Self {
        let mut universe: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        if let Some(matrix) = matrix {
            for row in &matrix.rows {
                if seen.insert(row.key.clone()) {
                    universe.push(row.key.clone());
                }
            }
        }
        for product in products {
            for key in product.spec_keys() {
                if seen.insert(key.to_string()) {
                    universe.push(key.to_string());
                }
            }
        }

        let keys = universe
            .into_iter()
            .map(|key| {
                let values: Vec<String> = products
                    .iter()
                    .enumerate()
                    .map(|(idx, product)| {
                        let own = product.spec_display(&key);
                        if own.is_empty() {
                            matrix_value(matrix, &key, idx)
                        } else {
                            own
                        }
                    })
                    .collect();

                let present_in_all =
                    !products.is_empty() && values.iter().all(|v| !v.is_empty());
                let normalized: Vec<String> =
                    values.iter().map(|v| v.trim().to_lowercase()).collect();
                let values_differ = normalized.windows(2).any(|pair| pair[0] != pair[1]);

                KeyDiff {
                    key,
                    present_in_all,
                    values_differ,
                    values,
                }
            })
            .collect();

        Self { keys }
    }

    /// All keys in the universe, first-seen order.
    pub fn union_keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|k| k.key.as_str())
    }

    /// Keys for which every product has a non-empty value.
    pub fn common_keys(&self) -> impl Iterator<Item = &KeyDiff> {
        self.keys.iter().filter(|k| k.present_in_all)
    }

    /// Keys present in all products whose values nonetheless differ.
    ///
    /// Restricting to present-in-all keys keeps different ⊆ common; a key
    /// missing from some product is never advertised as a difference.
    pub fn different_keys(&self) -> impl Iterator<Item = &KeyDiff> {
        self.keys
            .iter()
            .filter(|k| k.present_in_all && k.values_differ)
    }

    /// The first [`TOP_DIFFERENCES_CAP`] differing keys, for the summary
    /// display. Ordering among ties is stable (first-seen).
    pub fn top_differences(&self) -> Vec<&KeyDiff> {
        self.different_keys().take(TOP_DIFFERENCES_CAP).collect()
    }
}

fn matrix_value(matrix: Option<&ComparisonMatrix>, key: &str, idx: usize) -> String {
    matrix
        .and_then(|m| m.rows.iter().find(|row| row.key == key))
        .and_then(|row| row.values.get(idx))
        .map(display_value)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::Slug;
    use crate::product::{BrandRef, CategoryRef};
    use serde_json::json;

    fn product(id: u64, slug: &str, specs: Value) -> Product {
        let specs = match specs {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        Product {
            id: ProductId::new(id),
            slug: Slug::new(slug),
            name: slug.replace('-', " "),
            brand: BrandRef {
                name: "Brand".to_string(),
                slug: Slug::new("brand"),
            },
            category: CategoryRef {
                name: "Electric Guitars".to_string(),
                slug: Slug::new("electric-guitars"),
            },
            specs,
            content: None,
            prices: None,
            votes: None,
        }
    }

    #[test]
    fn common_but_unequal_key_is_a_difference() {
        // A: red, B: red, C: blue -> "color" is common and differs
        let products = vec![
            product(1, "a", json!({"color": "red"})),
            product(2, "b", json!({"color": "red"})),
            product(3, "c", json!({"color": "blue"})),
        ];
        let diff = SpecDiff::compute(&products, None);

        let color = diff.keys.iter().find(|k| k.key == "color").unwrap();
        assert!(color.present_in_all);
        assert!(color.values_differ);
        assert!(diff.top_differences().iter().any(|k| k.key == "color"));
    }

    #[test]
    fn comparison_is_case_insensitive() {
        let products = vec![
            product(1, "a", json!({"finish": "Sunburst"})),
            product(2, "b", json!({"finish": "sunburst"})),
        ];
        let diff = SpecDiff::compute(&products, None);
        let finish = diff.keys.iter().find(|k| k.key == "finish").unwrap();
        assert!(finish.present_in_all);
        assert!(!finish.values_differ);
    }

    #[test]
    fn partially_present_key_is_never_common() {
        let products = vec![
            product(1, "a", json!({"pickups": "HSS"})),
            product(2, "b", json!({})),
        ];
        let diff = SpecDiff::compute(&products, None);
        let pickups = diff.keys.iter().find(|k| k.key == "pickups").unwrap();
        assert!(!pickups.present_in_all);
        // differs (value vs empty), but excluded from the advertised set
        assert!(pickups.values_differ);
        assert!(!diff.different_keys().any(|k| k.key == "pickups"));
    }

    #[test]
    fn different_is_a_subset_of_common() {
        let products = vec![
            product(1, "a", json!({"color": "red", "frets": 21, "neck": "maple"})),
            product(2, "b", json!({"color": "blue", "frets": 22})),
        ];
        let diff = SpecDiff::compute(&products, None);

        let union: Vec<_> = diff.union_keys().collect();
        let common: Vec<_> = diff.common_keys().map(|k| k.key.as_str()).collect();
        let different: Vec<_> = diff.different_keys().map(|k| k.key.as_str()).collect();

        for key in &common {
            assert!(union.contains(key));
        }
        for key in &different {
            assert!(common.contains(key));
        }
    }

    #[test]
    fn matrix_widens_the_universe_and_back_fills_values() {
        let products = vec![
            product(1, "a", json!({"color": "red"})),
            product(2, "b", json!({"color": "blue"})),
        ];
        let matrix = ComparisonMatrix {
            rows: vec![MatrixRow {
                key: "scale length".to_string(),
                values: vec![json!("25.5\""), json!("24.75\"")],
            }],
        };
        let diff = SpecDiff::compute(&products, Some(&matrix));

        // Matrix keys come first in the universe
        let keys: Vec<_> = diff.union_keys().collect();
        assert_eq!(keys, vec!["scale length", "color"]);

        let scale = &diff.keys[0];
        assert!(scale.present_in_all);
        assert!(scale.values_differ);
        assert_eq!(scale.values, vec!["25.5\"", "24.75\""]);
    }

    #[test]
    fn top_differences_cap_and_order_are_stable() {
        let mut a = serde_json::Map::new();
        let mut b = serde_json::Map::new();
        for i in 0..10 {
            a.insert(format!("key{i:02}"), json!("left"));
            b.insert(format!("key{i:02}"), json!("right"));
        }
        let products = vec![
            product(1, "a", Value::Object(a)),
            product(2, "b", Value::Object(b)),
        ];
        let diff = SpecDiff::compute(&products, None);

        let top = diff.top_differences();
        assert_eq!(top.len(), TOP_DIFFERENCES_CAP);
        let keys: Vec<_> = top.iter().map(|k| k.key.as_str()).collect();
        assert_eq!(keys, vec!["key00", "key01", "key02", "key03", "key04", "key05"]);
    }

    #[test]
    fn empty_set_yields_empty_diff() {
        let diff = SpecDiff::compute(&[], None);
        assert!(diff.keys.is_empty());
        assert_eq!(diff.top_differences().len(), 0);
    }
}
