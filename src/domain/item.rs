//! Item identifiers
//!
//! An item is an opaque name for a node in the dependency graph: a course,
//! a build target, a package. Items compare byte-wise on their text, which
//! is the default root order used by the resolver.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Identifier of a node in the dependency graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(String);

impl Item {
    /// Creates an item from its name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the item name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the item and returns its name
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Item {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Item {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for Item {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Hash and Eq are derived from the inner String, so &str lookups agree.
impl Borrow<str> for Item {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn display_is_raw_name() {
        let item = Item::new("data structures");
        assert_eq!(item.to_string(), "data structures");
        assert_eq!(item.as_str(), "data structures");
    }

    #[test]
    fn ordering_is_lexical() {
        let mut items = vec![Item::from("b"), Item::from("B"), Item::from("a")];
        items.sort();
        assert_eq!(items, vec![Item::from("B"), Item::from("a"), Item::from("b")]);
    }

    #[test]
    fn lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(Item::from("calculus"), 1);
        assert_eq!(map.get("calculus"), Some(&1));
        assert_eq!(map.get("networks"), None);
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&Item::from("networks")).unwrap();
        assert_eq!(json, "\"networks\"");

        let item: Item = serde_json::from_str("\"compilers\"").unwrap();
        assert_eq!(item, Item::from("compilers"));
    }
}
