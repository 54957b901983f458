//! Categories: the fixed set of labels every question is filed under.
//!
//! Categories are seeded when the database is initialised and are read-only
//! from the API's point of view.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub type CategoryId = i64;

/// A single category row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
  pub id:    CategoryId,
  /// Human-readable label, serialised as `type` on the wire.
  #[serde(rename = "type")]
  pub label: String,
}

/// Category id → label, in ascending id order.
///
/// Serialises as a JSON object whose keys are the stringified ids.
pub type CategoryMap = BTreeMap<CategoryId, String>;

/// Collapse a list of categories into a [`CategoryMap`].
pub fn category_map(categories: impl IntoIterator<Item = Category>) -> CategoryMap {
  categories.into_iter().map(|c| (c.id, c.label)).collect()
}
