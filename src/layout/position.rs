//! Dependency-ordered placement of layout units.
//!
//! Units are grouped into strongly connected components and placed in passes:
//! each pass takes every component whose outside blockers are all placed, puts
//! its members right of their blockers and gives each member its own row. A
//! component with a cycle is placed in input order, then corrected once
//! against blockers of the same cycle, before anything it blocks is placed.

use std::collections::HashMap;

use crate::config::SpacingConfig;
use crate::graph::TaskGraph;
use crate::layout::cycles::Components;
use crate::layout::types::{Position, Size};

/// A box to place, with the units it must start after.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit<'a> {
    pub id: &'a str,
    pub size: Size,
    pub blockers: Vec<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedUnit<'a> {
    pub id: &'a str,
    pub position: Position,
    pub size: Size,
    pub circular: bool,
}

impl PlacedUnit<'_> {
    pub fn right_edge(&self) -> f64 {
        self.position.x + self.size.width
    }
}

/// Placement result, in placement order.
#[derive(Debug, Clone, Default)]
pub struct Placement<'a> {
    units: Vec<PlacedUnit<'a>>,
    index: HashMap<&'a str, usize>,
    cycles: Vec<Vec<&'a str>>,
}

impl<'a> Placement<'a> {
    pub fn get(&self, id: &str) -> Option<&PlacedUnit<'a>> {
        self.index.get(id).map(|&idx| &self.units[idx])
    }

    /// Units blocking each other in a cycle, one list per cycle, in input order.
    pub fn cycles(&self) -> &[Vec<&'a str>] {
        &self.cycles
    }
}

/// Collect units with blockers lifted from contained leaves to their groups.
///
/// Blocking between tasks of the same unit never moves the unit and is
/// dropped here; task-level cycles are reported separately.
pub fn build_units<'a>(
    graph: &TaskGraph<'a>,
    mut size_of: impl FnMut(&'a str) -> Size,
) -> Vec<Unit<'a>> {
    graph
        .units()
        .into_iter()
        .map(|id| {
            let mut members = vec![id];
            members.extend(graph.contained_leaves(id).into_iter().map(|(_, leaf)| leaf));

            let mut blockers = Vec::new();
            for member in members {
                for &blocker in graph.blockers(member) {
                    let Some(unit) = graph.unit_of(blocker) else {
                        continue;
                    };
                    if unit != id && !blockers.contains(&unit) {
                        blockers.push(unit);
                    }
                }
            }

            Unit {
                id,
                size: size_of(id),
                blockers,
            }
        })
        .collect()
}

/// Place units so each starts right of its blockers, except blockers on the
/// same cycle.
pub fn place_units<'a>(units: &[Unit<'a>], spacing: &SpacingConfig) -> Placement<'a> {
    let by_id: HashMap<&str, usize> = units
        .iter()
        .enumerate()
        .map(|(idx, unit)| (unit.id, idx))
        .collect();
    let edges: Vec<Vec<usize>> = units
        .iter()
        .map(|unit| {
            unit.blockers
                .iter()
                .filter_map(|blocker| by_id.get(blocker).copied())
                .collect()
        })
        .collect();
    let components = Components::find(&edges);

    let gap = spacing.horizontal_gap;
    let mut placed: Vec<PlacedUnit<'a>> = Vec::with_capacity(units.len());
    let mut right_edges: Vec<Option<f64>> = vec![None; units.len()];
    let mut cycles = Vec::new();
    let mut remaining: Vec<usize> = (0..components.len()).collect();
    let mut current_y = 0.0;
    let mut pass = 0usize;

    while !remaining.is_empty() {
        pass += 1;
        let (ready, waiting): (Vec<usize>, Vec<usize>) =
            remaining.into_iter().partition(|&component| {
                components.members(component).iter().all(|&member| {
                    edges[member].iter().all(|&blocker| {
                        components.component_of(blocker) == component
                            || right_edges[blocker].is_some()
                    })
                })
            });
        remaining = waiting;
        // Components form a DAG, so a non-empty remainder always has a ready one.
        if ready.is_empty() {
            break;
        }
        tracing::debug!(pass, ready = ready.len(), "placing ready components");

        for component in ready {
            let members = components.members(component);
            let circular = components.is_cyclic(component);
            let first = placed.len();

            for &member in members {
                let unit = &units[member];
                let x = start_x(&edges[member], &right_edges, gap);
                right_edges[member] = Some(x + unit.size.width);
                placed.push(PlacedUnit {
                    id: unit.id,
                    position: Position::new(x, current_y),
                    size: unit.size,
                    circular,
                });
                current_y += unit.size.height + spacing.row_height;
            }

            if circular {
                let ids: Vec<&'a str> = members.iter().map(|&member| units[member].id).collect();
                tracing::warn!(units = ?ids, "circular dependency, placing units in input order");
                cycles.push(ids);

                // Members placed before a blocker of the same cycle start left of it.
                for (offset, &member) in members.iter().enumerate() {
                    let unit = &mut placed[first + offset];
                    let required = start_x(&edges[member], &right_edges, gap);
                    if unit.position.x < required {
                        tracing::debug!(
                            unit = unit.id,
                            shift = required - unit.position.x,
                            "shifting unit right of its blockers"
                        );
                        unit.position.x = required;
                        right_edges[member] = Some(unit.right_edge());
                    }
                }
            }
        }
    }

    let index = placed
        .iter()
        .enumerate()
        .map(|(idx, unit)| (unit.id, idx))
        .collect();
    Placement {
        units: placed,
        index,
        cycles,
    }
}

/// Leftmost x allowed by the blockers already placed; 0 without any.
fn start_x(blockers: &[usize], right_edges: &[Option<f64>], gap: f64) -> f64 {
    blockers
        .iter()
        .filter_map(|&blocker| right_edges[blocker])
        .fold(None, |max: Option<f64>, right| {
            Some(max.map_or(right, |current| current.max(right)))
        })
        .map_or(0.0, |right| (right + gap).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit<'a>(id: &'a str, width: f64, blockers: &[&'a str]) -> Unit<'a> {
        Unit {
            id,
            size: Size {
                width,
                height: 100.0,
            },
            blockers: blockers.to_vec(),
        }
    }

    #[test]
    fn chain_is_placed_left_to_right() {
        let units = vec![
            unit("c", 100.0, &["b"]),
            unit("b", 200.0, &["a"]),
            unit("a", 300.0, &[]),
        ];
        let placement = place_units(&units, &SpacingConfig::default());
        let a = placement.get("a").expect("a");
        let b = placement.get("b").expect("b");
        let c = placement.get("c").expect("c");
        assert_eq!(a.position, Position::new(0.0, 0.0));
        assert_eq!(b.position.x, 450.0);
        assert_eq!(c.position.x, 800.0);
        assert_eq!(b.position.y, 300.0);
        assert_eq!(c.position.y, 600.0);
        assert!(placement.cycles().is_empty());
    }

    #[test]
    fn cycle_is_flagged_and_corrected_once() {
        let units = vec![
            unit("x", 100.0, &["y"]),
            unit("y", 100.0, &["x"]),
            unit("free", 100.0, &[]),
        ];
        let placement = place_units(&units, &SpacingConfig::default());
        assert_eq!(placement.cycles(), &[vec!["x", "y"]]);
        assert!(!placement.get("free").expect("free").circular);

        // x starts at 0 and y after it; the single sweep then moves x after
        // y and y after the moved x.
        let x = placement.get("x").expect("x");
        let y = placement.get("y").expect("y");
        assert!(x.circular && y.circular);
        assert_eq!(x.position.x, 500.0);
        assert_eq!(y.position.x, 750.0);
    }

    #[test]
    fn downstream_of_cycle_waits_for_corrected_cycle() {
        let units = vec![
            unit("z", 100.0, &["x"]),
            unit("x", 100.0, &["y"]),
            unit("y", 100.0, &["x"]),
        ];
        let placement = place_units(&units, &SpacingConfig::default());
        let x = placement.get("x").expect("x");
        let z = placement.get("z").expect("z");
        assert!(!z.circular);
        assert_eq!(z.position.x, x.right_edge() + 150.0);
        assert_eq!(placement.cycles(), &[vec!["x", "y"]]);
    }
}
