//! prereq - deterministic dependency-graph resolution
//!
//! Given a map from each item to the items it depends on, prereq produces an
//! order in which every item follows all of its prerequisites, and tells
//! whether the graph has a cycle that makes such an order impossible.
//!
//! ```
//! use prereq::{Graph, Resolver};
//!
//! let graph = Graph::from_iter([
//!     ("algorithms", vec!["data structures"]),
//!     ("data structures", vec!["discrete math"]),
//! ]);
//!
//! let order = Resolver::new().resolve(&graph).unwrap();
//! let names: Vec<&str> = order.iter().map(|i| i.as_str()).collect();
//! assert_eq!(names, ["discrete math", "data structures", "algorithms"]);
//! ```

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{has_cycle, topological_order, Graph, Item, KeyOrder, ResolveError, Resolver};
