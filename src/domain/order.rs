//! Root ordering for traversal
//!
//! The resolver never relies on map iteration order. Graph keys are sorted
//! with a [`KeyOrder`] before any traversal starts, which fixes the output
//! for a given graph.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::item::Item;

/// Comparator used to order graph keys before traversal
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum KeyOrder {
    /// Byte-wise ascending order of item names
    #[default]
    Lexical,
    /// Ascending order ignoring case; names equal up to case fall back to
    /// lexical order so the comparison stays total
    CaseInsensitive,
}

impl KeyOrder {
    /// Compares two items under this ordering
    pub fn compare(&self, a: &Item, b: &Item) -> Ordering {
        match self {
            KeyOrder::Lexical => a.cmp(b),
            KeyOrder::CaseInsensitive => a
                .as_str()
                .to_lowercase()
                .cmp(&b.as_str().to_lowercase())
                .then_with(|| a.cmp(b)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyOrder::Lexical => "lexical",
            KeyOrder::CaseInsensitive => "case_insensitive",
        }
    }
}
