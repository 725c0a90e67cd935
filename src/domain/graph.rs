//! Dependency graph data model
//!
//! A graph maps each item to the ordered list of items it depends on.
//! Nothing is validated on construction: self-loops, prerequisites that are
//! never declared as keys, and duplicate edges are all representable and are
//! handled by the resolver.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::item::Item;
use super::order::KeyOrder;

/// Mapping from item to its direct prerequisites
///
/// Serializes as a plain map, so a graph file looks like
/// `{"algorithms": ["data structures"], "data structures": []}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Graph {
    prerequisites: HashMap<Item, Vec<Item>>,
}

impl Graph {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self {
            prerequisites: HashMap::new(),
        }
    }

    /// Sets the prerequisite list of an item, replacing any previous list
    pub fn insert<I, P>(&mut self, item: I, prerequisites: P) -> Option<Vec<Item>>
    where
        I: Into<Item>,
        P: IntoIterator,
        P::Item: Into<Item>,
    {
        let list = prerequisites.into_iter().map(Into::into).collect();
        self.prerequisites.insert(item.into(), list)
    }

    /// Appends one prerequisite to an item, declaring the item if needed
    ///
    /// Duplicates are kept as given.
    pub fn add_prerequisite(&mut self, item: impl Into<Item>, prerequisite: impl Into<Item>) {
        self.prerequisites
            .entry(item.into())
            .or_default()
            .push(prerequisite.into());
    }

    /// Returns the direct prerequisites of an item
    ///
    /// An item that is not a key has no prerequisites.
    pub fn prerequisites(&self, item: &str) -> &[Item] {
        self.prerequisites
            .get(item)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns true if the item is declared as a key
    pub fn contains_key(&self, item: &str) -> bool {
        self.prerequisites.contains_key(item)
    }

    /// Returns true if the item is a key or appears as anyone's prerequisite
    pub fn contains(&self, item: &str) -> bool {
        self.contains_key(item)
            || self
                .prerequisites
                .values()
                .any(|list| list.iter().any(|p| p.as_str() == item))
    }

    /// Returns the declared keys in unspecified order
    pub fn keys(&self) -> impl Iterator<Item = &Item> {
        self.prerequisites.keys()
    }

    /// Returns the declared keys sorted by the given comparator
    pub fn sorted_keys(&self, order: KeyOrder) -> Vec<&Item> {
        let mut keys: Vec<&Item> = self.prerequisites.keys().collect();
        keys.sort_by(|a, b| order.compare(a, b));
        keys
    }

    /// Returns every item in the graph, keys and prerequisites alike, sorted
    pub fn items(&self) -> BTreeSet<&Item> {
        self.prerequisites
            .iter()
            .flat_map(|(item, list)| std::iter::once(item).chain(list.iter()))
            .collect()
    }

    /// Returns prerequisites that are never declared as keys, sorted
    pub fn leaves(&self) -> BTreeSet<&Item> {
        self.prerequisites
            .values()
            .flatten()
            .filter(|p| !self.prerequisites.contains_key(p.as_str()))
            .collect()
    }

    /// Returns the items that list `item` as a direct prerequisite, sorted
    pub fn dependents(&self, item: &str) -> BTreeSet<&Item> {
        self.prerequisites
            .iter()
            .filter(|(_, list)| list.iter().any(|p| p.as_str() == item))
            .map(|(dependent, _)| dependent)
            .collect()
    }

    /// Returns the number of declared keys
    pub fn len(&self) -> usize {
        self.prerequisites.len()
    }

    /// Returns true if the graph has no keys
    pub fn is_empty(&self) -> bool {
        self.prerequisites.is_empty()
    }

    /// Returns the number of edges, counting duplicates
    pub fn edge_count(&self) -> usize {
        self.prerequisites.values().map(Vec::len).sum()
    }
}

impl From<HashMap<Item, Vec<Item>>> for Graph {
    fn from(prerequisites: HashMap<Item, Vec<Item>>) -> Self {
        Self { prerequisites }
    }
}

impl<I, P> FromIterator<(I, P)> for Graph
where
    I: Into<Item>,
    P: IntoIterator,
    P::Item: Into<Item>,
{
    fn from_iter<T: IntoIterator<Item = (I, P)>>(iter: T) -> Self {
        let mut graph = Graph::new();
        for (item, prerequisites) in iter {
            graph.insert(item, prerequisites);
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn courses() -> Graph {
        Graph::from_iter([
            ("algorithms", vec!["data structures"]),
            ("data structures", vec!["discrete math"]),
            ("databases", vec!["data structures"]),
        ])
    }

    fn names<'a>(items: impl IntoIterator<Item = &'a Item>) -> Vec<&'a str> {
        items.into_iter().map(Item::as_str).collect()
    }

    #[test]
    fn empty_graph() {
        let graph = Graph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.len(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.items().is_empty());
    }

    #[test]
    fn absent_key_has_no_prerequisites() {
        let graph = courses();
        assert!(graph.prerequisites("discrete math").is_empty());
        assert!(graph.prerequisites("unknown").is_empty());
        assert_eq!(names(graph.prerequisites("algorithms")), vec!["data structures"]);
    }

    #[test]
    fn items_include_leaves() {
        let graph = courses();
        assert_eq!(graph.len(), 3);
        assert_eq!(
            names(graph.items()),
            vec!["algorithms", "data structures", "databases", "discrete math"]
        );
        assert_eq!(names(graph.leaves()), vec!["discrete math"]);
        assert!(graph.contains("discrete math"));
        assert!(!graph.contains_key("discrete math"));
    }

    #[test]
    fn duplicates_are_kept() {
        let mut graph = Graph::new();
        graph.add_prerequisite("compilers", "formal languages");
        graph.add_prerequisite("compilers", "formal languages");

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.prerequisites("compilers").len(), 2);
        assert_eq!(graph.items().len(), 2);
    }

    #[test]
    fn self_loop_is_representable() {
        let mut graph = Graph::new();
        graph.add_prerequisite("x", "x");
        assert_eq!(names(graph.prerequisites("x")), vec!["x"]);
        assert!(graph.leaves().is_empty());
    }

    #[test]
    fn insert_replaces_list() {
        let mut graph = courses();
        let previous = graph.insert("algorithms", ["discrete math"]);
        assert_eq!(previous, Some(vec![Item::from("data structures")]));
        assert_eq!(names(graph.prerequisites("algorithms")), vec!["discrete math"]);
    }

    #[test]
    fn dependents_are_reverse_edges() {
        let graph = courses();
        assert_eq!(
            names(graph.dependents("data structures")),
            vec!["algorithms", "databases"]
        );
        assert!(graph.dependents("algorithms").is_empty());
    }

    #[test]
    fn sorted_keys_follow_comparator() {
        let graph = Graph::from_iter([("b", Vec::<&str>::new()), ("A", vec![]), ("a", vec![])]);
        assert_eq!(names(graph.sorted_keys(KeyOrder::Lexical)), vec!["A", "a", "b"]);
        assert_eq!(
            names(graph.sorted_keys(KeyOrder::CaseInsensitive)),
            vec!["A", "a", "b"]
        );
    }

    #[test]
    fn deserializes_from_plain_map() {
        let json = r#"{"algorithms": ["data structures"], "discrete math": []}"#;
        let graph: Graph = serde_json::from_str(json).unwrap();
        assert_eq!(graph.len(), 2);
        assert_eq!(names(graph.prerequisites("algorithms")), vec!["data structures"]);
    }
}
