//! Graph commands (order, check, deps, stats)

use anyhow::{bail, Result};
use tracing::debug;

use super::app::GraphArgs;
use super::output::Output;
use crate::domain::{format_path, Graph, Item, ResolveError, Resolver};
use crate::storage::load_graph;

fn load(args: &GraphArgs) -> Result<Graph> {
    let graph = load_graph(&args.file, args.input_format)?;
    Ok(graph)
}

fn require_item(graph: &Graph, item: &str) -> Result<()> {
    if !graph.contains(item) {
        bail!("Unknown item: {}", item);
    }
    Ok(())
}

/// Print the topological order, refusing cyclic graphs unless allowed
pub fn order(
    output: &Output,
    resolver: &Resolver,
    args: &GraphArgs,
    targets: &[String],
    allow_cycles: bool,
) -> Result<()> {
    let graph = load(args)?;

    let targets: Vec<Item> = targets.iter().map(|t| Item::from(t.as_str())).collect();
    for target in &targets {
        require_item(&graph, target.as_str())?;
    }

    // The whole graph is checked, even when only part of it is ordered.
    let cycle = resolver.find_cycle(&graph);
    if let Some(path) = &cycle {
        if !allow_cycles {
            return Err(ResolveError::Cycle { path: path.clone() }.into());
        }
        output.warn(&format!(
            "circular dependency detected: {}; the order is not valid for these items",
            format_path(path)
        ));
    }

    let order = if targets.is_empty() {
        resolver.topological_order(&graph)
    } else {
        resolver.order_for(&graph, targets.iter())
    };
    debug!(items = order.len(), "order computed");

    if output.is_json() {
        output.data(&serde_json::json!({
            "order": order,
            "cycle": cycle,
        }));
    } else {
        for item in &order {
            output.line(item.as_str());
        }
    }

    Ok(())
}

/// Fail with the cycle path if the graph has a circular dependency
pub fn check(output: &Output, resolver: &Resolver, args: &GraphArgs) -> Result<()> {
    let graph = load(args)?;
    let item_count = graph.items().len();

    match resolver.find_cycle(&graph) {
        None => {
            if output.is_json() {
                output.data(&serde_json::json!({
                    "cyclic": false,
                    "items": item_count,
                }));
            } else {
                output.line(&format!("no cycles ({} items)", item_count));
            }
            Ok(())
        }
        Some(path) => {
            if output.is_json() {
                output.data(&serde_json::json!({
                    "cyclic": true,
                    "cycle": path,
                }));
            }
            Err(ResolveError::Cycle { path }.into())
        }
    }
}

/// Show direct prerequisites and dependents of one item
pub fn deps(output: &Output, args: &GraphArgs, item: &str) -> Result<()> {
    let graph = load(args)?;
    require_item(&graph, item)?;

    let prerequisites = graph.prerequisites(item);
    let dependents: Vec<&Item> = graph.dependents(item).into_iter().collect();

    if output.is_json() {
        output.data(&serde_json::json!({
            "item": item,
            "declared": graph.contains_key(item),
            "prerequisites": prerequisites,
            "dependents": dependents,
        }));
    } else {
        output.line(item);
        output.line(&format!("  prerequisites: {}", join_or_none(prerequisites.iter())));
        output.line(&format!("  dependents:    {}", join_or_none(dependents.into_iter())));
    }

    Ok(())
}

/// Summarize graph size and well-formedness
pub fn stats(output: &Output, resolver: &Resolver, args: &GraphArgs) -> Result<()> {
    let graph = load(args)?;
    let items = graph.items().len();
    let leaves = graph.leaves().len();
    let cycle = resolver.find_cycle(&graph);

    if output.is_json() {
        output.data(&serde_json::json!({
            "keys": graph.len(),
            "items": items,
            "leaves": leaves,
            "edges": graph.edge_count(),
            "cyclic": cycle.is_some(),
        }));
    } else {
        output.line(&format!("Keys:   {}", graph.len()));
        output.line(&format!("Items:  {}", items));
        output.line(&format!("Leaves: {}", leaves));
        output.line(&format!("Edges:  {}", graph.edge_count()));
        match &cycle {
            Some(path) => output.line(&format!("Cycle:  {}", format_path(path))),
            None => output.line("Cycle:  none"),
        }
    }

    Ok(())
}

fn join_or_none<'a>(items: impl Iterator<Item = &'a Item>) -> String {
    let names: Vec<&str> = items.map(Item::as_str).collect();
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}
