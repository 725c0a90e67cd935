//! Topological ordering and cycle detection
//!
//! Both traversals are depth-first walks over an explicit stack of frames,
//! so recursion depth is never bounded by the call stack. Visitation state
//! lives in a [`Visitation`] record owned by the caller and passed in by
//! reference; a fresh record is used for every call unless the caller
//! supplies one to inspect afterwards.
//!
//! # Ordering
//!
//! Keys are sorted with the resolver's [`KeyOrder`] and visited in that
//! order. An item is marked the first time it is reached, its prerequisites
//! are walked in listed order, and the item is appended once all of them are
//! done. Shared prerequisites are therefore emitted exactly once, and
//! prerequisites that are not keys still appear in the output.
//!
//! On a cyclic graph the walk still terminates, but the order it produces is
//! meaningless for the items on the cycle. Use [`Resolver::resolve`], or
//! check [`Resolver::has_cycle`] first.
//!
//! # Cycle detection
//!
//! An item is `InProgress` while it sits on the current path and `Done` once
//! its whole subtree has been cleared. Reaching an `InProgress` item closes a
//! cycle; reaching a `Done` item is skipped. Every node is explored at most
//! once across all roots, so the check is O(V + E).

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, trace};

use super::graph::Graph;
use super::item::Item;
use super::order::KeyOrder;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("circular dependency detected: {}", format_path(.path))]
    Cycle { path: Vec<Item> },
}

impl ResolveError {
    /// Returns the closed cycle path, first item repeated at the end
    pub fn cycle_path(&self) -> &[Item] {
        match self {
            ResolveError::Cycle { path } => path,
        }
    }
}

/// Renders a path as `a -> b -> a`
pub fn format_path(path: &[Item]) -> String {
    path.iter()
        .map(Item::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Traversal state of a single item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitState {
    /// Not reached yet
    #[default]
    Unvisited,
    /// Reached, and still on the active path
    InProgress,
    /// Fully explored
    Done,
}

/// Visitation record for one traversal
///
/// After a completed ordering every reachable item is `Done`. After a cycle
/// check that found a cycle, the items on the path that closed it are left
/// `InProgress`.
#[derive(Debug, Default)]
pub struct Visitation<'g> {
    states: HashMap<&'g Item, VisitState>,
}

impl<'g> Visitation<'g> {
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
        }
    }

    /// Returns the state of an item
    pub fn state(&self, item: &Item) -> VisitState {
        self.states.get(item).copied().unwrap_or_default()
    }

    /// Returns true if the item has been reached at all
    pub fn is_seen(&self, item: &Item) -> bool {
        self.state(item) != VisitState::Unvisited
    }

    /// Returns true if the item is on the active path
    pub fn on_path(&self, item: &Item) -> bool {
        self.state(item) == VisitState::InProgress
    }

    /// Returns the number of fully explored items
    pub fn done_count(&self) -> usize {
        self.states
            .values()
            .filter(|s| **s == VisitState::Done)
            .count()
    }

    /// Marks an item as entered; returns false if it was already reached
    fn begin(&mut self, item: &'g Item) -> bool {
        if self.is_seen(item) {
            return false;
        }
        self.states.insert(item, VisitState::InProgress);
        true
    }

    fn finish(&mut self, item: &'g Item) {
        self.states.insert(item, VisitState::Done);
    }
}

/// One item on the explicit traversal stack
struct Frame<'g> {
    item: &'g Item,
    prerequisites: &'g [Item],
    next: usize,
}

impl<'g> Frame<'g> {
    fn new(graph: &'g Graph, item: &'g Item) -> Self {
        Self {
            item,
            prerequisites: graph.prerequisites(item.as_str()),
            next: 0,
        }
    }

    fn next_prerequisite(&mut self) -> Option<&'g Item> {
        let prerequisite = self.prerequisites.get(self.next)?;
        self.next += 1;
        Some(prerequisite)
    }
}

/// Computes orders and detects cycles over a [`Graph`]
///
/// Holds no state between calls; the only setting is the comparator that
/// fixes root order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    key_order: KeyOrder,
}

impl Resolver {
    /// Creates a resolver with lexical root order
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the comparator used to order roots
    pub fn with_key_order(mut self, key_order: KeyOrder) -> Self {
        self.key_order = key_order;
        self
    }

    pub fn key_order(&self) -> KeyOrder {
        self.key_order
    }

    /// Returns every item in the graph, each prerequisite before its dependents
    ///
    /// Does not check for cycles.
    pub fn topological_order(&self, graph: &Graph) -> Vec<Item> {
        let mut visitation = Visitation::new();
        self.order_with(graph, &mut visitation)
    }

    /// Same as [`Resolver::topological_order`] with a caller-owned record
    pub fn order_with<'g>(&self, graph: &'g Graph, visitation: &mut Visitation<'g>) -> Vec<Item> {
        let roots = graph.sorted_keys(self.key_order);
        debug!(
            roots = roots.len(),
            edges = graph.edge_count(),
            key_order = self.key_order.as_str(),
            "computing topological order"
        );

        let mut order = Vec::with_capacity(roots.len());
        for root in roots {
            visit(graph, root, visitation, &mut order);
        }
        order
    }

    /// Returns the order restricted to the targets and their transitive
    /// prerequisites
    ///
    /// Targets are used as roots in the order given. A target that is not in
    /// the graph is emitted on its own, like any prerequisite-free item.
    pub fn order_for<'g, T>(&self, graph: &'g Graph, targets: T) -> Vec<Item>
    where
        T: IntoIterator<Item = &'g Item>,
    {
        let mut visitation = Visitation::new();
        let mut order = Vec::new();
        for target in targets {
            visit(graph, target, &mut visitation, &mut order);
        }
        debug!(items = order.len(), "computed order for targets");
        order
    }

    /// Returns true if any directed cycle, self-loops included, exists
    pub fn has_cycle(&self, graph: &Graph) -> bool {
        self.find_cycle(graph).is_some()
    }

    /// Returns the first cycle met by the walk as a closed path
    ///
    /// The path starts and ends with the same item, e.g. `[a, b, a]`, or
    /// `[x, x]` for a self-loop.
    pub fn find_cycle(&self, graph: &Graph) -> Option<Vec<Item>> {
        let mut visitation = Visitation::new();
        self.find_cycle_with(graph, &mut visitation)
    }

    /// Same as [`Resolver::find_cycle`] with a caller-owned record
    pub fn find_cycle_with<'g>(
        &self,
        graph: &'g Graph,
        visitation: &mut Visitation<'g>,
    ) -> Option<Vec<Item>> {
        for root in graph.sorted_keys(self.key_order) {
            if visitation.is_seen(root) {
                continue;
            }
            if let Some(path) = search_cycle(graph, root, visitation) {
                debug!(cycle = %format_path(&path), "cycle detected");
                return Some(path);
            }
        }
        trace!(cleared = visitation.done_count(), "no cycle");
        None
    }

    /// Returns the topological order, or the cycle that makes one impossible
    pub fn resolve(&self, graph: &Graph) -> Result<Vec<Item>, ResolveError> {
        if let Some(path) = self.find_cycle(graph) {
            return Err(ResolveError::Cycle { path });
        }
        Ok(self.topological_order(graph))
    }
}

/// Walks one root, appending each item after its prerequisites
fn visit<'g>(
    graph: &'g Graph,
    root: &'g Item,
    visitation: &mut Visitation<'g>,
    order: &mut Vec<Item>,
) {
    if !visitation.begin(root) {
        return;
    }

    let mut stack = vec![Frame::new(graph, root)];
    while let Some(frame) = stack.last_mut() {
        match frame.next_prerequisite() {
            Some(prerequisite) => {
                if visitation.begin(prerequisite) {
                    stack.push(Frame::new(graph, prerequisite));
                }
            }
            None => {
                let item = frame.item;
                stack.pop();
                visitation.finish(item);
                order.push(item.clone());
            }
        }
    }
}

/// Searches one root for a back edge onto the active path
fn search_cycle<'g>(
    graph: &'g Graph,
    root: &'g Item,
    visitation: &mut Visitation<'g>,
) -> Option<Vec<Item>> {
    visitation.begin(root);

    let mut stack = vec![Frame::new(graph, root)];
    while let Some(frame) = stack.last_mut() {
        match frame.next_prerequisite() {
            Some(prerequisite) => match visitation.state(prerequisite) {
                VisitState::InProgress => {
                    // InProgress items are exactly the frames on the stack.
                    let start = stack
                        .iter()
                        .position(|f| f.item == prerequisite)
                        .unwrap_or(0);
                    let mut path: Vec<Item> =
                        stack[start..].iter().map(|f| f.item.clone()).collect();
                    path.push(prerequisite.clone());
                    return Some(path);
                }
                VisitState::Done => {}
                VisitState::Unvisited => {
                    visitation.begin(prerequisite);
                    stack.push(Frame::new(graph, prerequisite));
                }
            },
            None => {
                let item = frame.item;
                stack.pop();
                visitation.finish(item);
            }
        }
    }
    None
}

/// Returns the topological order of a graph under lexical root order
pub fn topological_order(graph: &Graph) -> Vec<Item> {
    Resolver::new().topological_order(graph)
}

/// Returns true if the graph contains a directed cycle
pub fn has_cycle(graph: &Graph) -> bool {
    Resolver::new().has_cycle(graph)
}
