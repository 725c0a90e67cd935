//! Domain models for prereq
//!
//! The dependency graph and the resolver that orders it. No I/O happens
//! here; graphs arrive already parsed.

mod item;
mod order;
mod graph;
mod resolver;

pub use item::Item;
pub use order::KeyOrder;
pub use graph::Graph;
pub use resolver::{
    format_path, has_cycle, topological_order, ResolveError, Resolver, VisitState, Visitation,
};
