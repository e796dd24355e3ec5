//! Task relationship layout.
//!
//! Turns a task list into positioned group/leaf boxes plus `blocks` edges.
//! The computation is pure: the same input list yields the same geometry, and
//! nothing survives between calls.

mod cycles;
mod edges;
mod group;
mod position;
mod types;

use std::collections::{HashMap, HashSet};

use crate::config::LayoutConfig;
use crate::estimate::EstimateAggregator;
use crate::graph::{TaskGraph, TaskKind};
use crate::task::{Task, TaskArena};

pub use cycles::blocking_cycles;
pub use edges::{endpoint_id, synthesize_edges};
pub use group::{contained_leaf_box, group_size, leaf_size};
pub use position::{build_units, place_units, PlacedUnit, Placement, Unit};
pub use types::{
    group_node_id, Layout, LayoutEdge, LayoutNode, LayoutWarning, NodeKind, Position,
    Relationship, Size, GROUP_ID_PREFIX,
};

/// Lay out `tasks` with the given geometry.
pub fn compute_layout(tasks: &[Task], config: &LayoutConfig) -> Layout {
    let arena = TaskArena::from_tasks(tasks);
    layout_arena(&arena, config)
}

/// Lay out an already built arena.
pub fn layout_arena(arena: &TaskArena, config: &LayoutConfig) -> Layout {
    if arena.is_empty() {
        return Layout {
            warnings: arena.warnings().to_vec(),
            ..Layout::default()
        };
    }

    let graph = TaskGraph::build(arena);
    let mut aggregator = EstimateAggregator::new(&graph);
    let totals = aggregator.compute_all();
    let total_of = |id: &str| totals.get(id).copied().unwrap_or(0.0);

    let sizes: HashMap<&str, Size> = graph
        .units()
        .into_iter()
        .map(|id| {
            let size = if graph.is_group(id) {
                group_size(total_of(id), graph.subtasks(id).len(), &config.group)
            } else {
                leaf_size(total_of(id), &config.leaf)
            };
            (id, size)
        })
        .collect();

    let units = build_units(&graph, |id| sizes.get(id).copied().unwrap_or_default());
    let placement = place_units(&units, &config.spacing);
    let task_cycles = blocking_cycles(&graph);
    let on_task_cycle: HashSet<&str> = task_cycles.iter().flatten().copied().collect();

    let mut groups = Vec::new();
    let mut leaves = Vec::new();
    for entry in arena.iter() {
        let id = entry.id.as_str();
        match graph.kind(id) {
            TaskKind::Group | TaskKind::Standalone => {
                let Some(placed) = placement.get(id) else {
                    continue;
                };
                let is_group = graph.is_group(id);
                let node = LayoutNode {
                    id: endpoint_id(&graph, id),
                    kind: if is_group { NodeKind::Group } else { NodeKind::Leaf },
                    position: placed.position,
                    width: placed.size.width,
                    height: placed.size.height,
                    task_id: entry.id.clone(),
                    title: entry.title.clone(),
                    total_estimate: total_of(id),
                    subtask_ids: graph.subtasks(id).iter().map(|s| s.to_string()).collect(),
                    is_subtask: graph.is_subtask(id),
                    parent_group_id: None,
                    circular: placed.circular || on_task_cycle.contains(id),
                };
                if is_group {
                    groups.push(node);
                } else {
                    leaves.push(node);
                }
            }
            TaskKind::NestedLeaf => {
                let Some(owner) = graph.owner(id) else {
                    continue;
                };
                let Some(group_unit) = placement.get(owner) else {
                    continue;
                };
                let Some(slot) = graph.subtasks(owner).iter().position(|child| *child == id) else {
                    continue;
                };
                let (position, size) =
                    contained_leaf_box(slot, total_of(id), group_unit.size, config);
                leaves.push(LayoutNode {
                    id: entry.id.clone(),
                    kind: NodeKind::Leaf,
                    position,
                    width: size.width,
                    height: size.height,
                    task_id: entry.id.clone(),
                    title: entry.title.clone(),
                    total_estimate: total_of(id),
                    subtask_ids: Vec::new(),
                    is_subtask: true,
                    parent_group_id: Some(group_node_id(owner)),
                    circular: group_unit.circular || on_task_cycle.contains(id),
                });
            }
        }
    }

    let mut warnings = arena.warnings().to_vec();
    warnings.extend(aggregator.into_warnings());
    let unit_cycles = placement
        .cycles()
        .iter()
        .filter(|cycle| !task_cycles.contains(*cycle));
    for cycle in task_cycles.iter().chain(unit_cycles) {
        warnings.push(LayoutWarning::CircularDependency {
            task_ids: cycle.iter().map(|id| id.to_string()).collect(),
        });
    }

    let edges = synthesize_edges(&graph);

    tracing::debug!(
        nodes = groups.len() + leaves.len(),
        edges = edges.len(),
        warnings = warnings.len(),
        "layout complete"
    );

    groups.extend(leaves);
    Layout {
        nodes: groups,
        edges,
        warnings,
    }
}
