//! Category domain model.
//!
//! # Invariants
//! - `name` is unique across categories and 1..=50 characters long; both
//!   rules are enforced by the `category` table, not by this type.
//! - A `Category` never changes after construction. Renaming yields a new
//!   value carrying the same key.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Surrogate primary key of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryKey(pub i64);

impl Display for CategoryKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Natural key of a category: its unique name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryName(pub String);

impl CategoryName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for CategoryName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CategoryName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A persisted category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    key: CategoryKey,
    name: String,
}

impl Category {
    pub(crate) fn new(key: CategoryKey, name: impl Into<String>) -> Self {
        Self {
            key,
            name: name.into(),
        }
    }

    pub fn key(&self) -> CategoryKey {
        self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Same category under a different name. Persistence is the caller's job.
    pub(crate) fn with_name(&self, name: impl Into<String>) -> Self {
        Self::new(self.key, name)
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, CategoryKey, CategoryName};

    #[test]
    fn with_name_keeps_key_and_leaves_original_untouched() {
        let original = Category::new(CategoryKey(8), "QA");
        let renamed = original.with_name("Pikachu");

        assert_eq!(renamed.key(), CategoryKey(8));
        assert_eq!(renamed.name(), "Pikachu");
        assert_eq!(original.name(), "QA");
    }

    #[test]
    fn category_serializes_with_transparent_key() {
        let category = Category::new(CategoryKey(4), "API");
        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(json, serde_json::json!({ "key": 4, "name": "API" }));
    }

    #[test]
    fn category_name_conversions_agree() {
        assert_eq!(CategoryName::from("API"), CategoryName::new("API".to_string()));
        assert_eq!(CategoryName::from("API").as_str(), "API");
    }
}
