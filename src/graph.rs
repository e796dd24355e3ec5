//! Relationship maps over a task arena.
//!
//! Built in one pass over the arena and immutable afterwards. All ids borrow
//! from the arena, so the graph lives exactly as long as the layout call.

use std::collections::HashMap;

use serde::Serialize;

use crate::task::{TaskArena, TaskEntry};

/// Layout role of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Has at least one subtask; drawn as a group box.
    Group,
    /// Listed as a subtask and has no subtasks of its own.
    NestedLeaf,
    /// Neither contained nor containing.
    Standalone,
}

#[derive(Debug)]
pub struct TaskGraph<'a> {
    arena: &'a TaskArena,
    subtask_map: HashMap<&'a str, Vec<&'a str>>,
    blocked_by_map: HashMap<&'a str, Vec<&'a str>>,
    blocks_map: HashMap<&'a str, Vec<&'a str>>,
    /// First task (in input order) listing each contained id.
    owner: HashMap<&'a str, &'a str>,
}

impl<'a> TaskGraph<'a> {
    pub fn build(arena: &'a TaskArena) -> Self {
        let mut subtask_map = HashMap::new();
        let mut blocked_by_map = HashMap::new();
        let mut blocks_map: HashMap<&'a str, Vec<&'a str>> = HashMap::new();
        let mut owner = HashMap::new();

        for entry in arena.iter() {
            let id = entry.id.as_str();

            if !entry.subtask_ids.is_empty() {
                let children: Vec<&'a str> = entry.subtask_ids.iter().map(String::as_str).collect();
                for child in &children {
                    owner.entry(*child).or_insert(id);
                }
                subtask_map.insert(id, children);
            }

            if !entry.blocker_ids.is_empty() {
                let blockers: Vec<&'a str> = entry.blocker_ids.iter().map(String::as_str).collect();
                for blocker in &blockers {
                    blocks_map.entry(*blocker).or_default().push(id);
                }
                blocked_by_map.insert(id, blockers);
            }
        }

        tracing::debug!(
            tasks = arena.len(),
            groups = subtask_map.len(),
            blocked = blocked_by_map.len(),
            "built task relationship maps"
        );

        Self {
            arena,
            subtask_map,
            blocked_by_map,
            blocks_map,
            owner,
        }
    }

    pub fn entry(&self, id: &str) -> Option<&'a TaskEntry> {
        self.arena.get(id)
    }

    /// Task ids in input order.
    pub fn ids(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.arena.iter().map(|entry| entry.id.as_str())
    }

    pub fn estimate(&self, id: &str) -> f64 {
        self.entry(id).map(|entry| entry.estimate).unwrap_or(0.0)
    }

    pub fn subtasks(&self, id: &str) -> &[&'a str] {
        self.subtask_map.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn blockers(&self, id: &str) -> &[&'a str] {
        self.blocked_by_map.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Tasks that `id` blocks.
    pub fn blocked(&self, id: &str) -> &[&'a str] {
        self.blocks_map.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_group(&self, id: &str) -> bool {
        self.subtask_map.contains_key(id)
    }

    pub fn is_subtask(&self, id: &str) -> bool {
        self.owner.contains_key(id)
    }

    /// Containing task of a subtask, first parent wins.
    pub fn owner(&self, id: &str) -> Option<&'a str> {
        self.owner.get(id).copied()
    }

    pub fn kind(&self, id: &str) -> TaskKind {
        if self.is_group(id) {
            TaskKind::Group
        } else if self.is_subtask(id) {
            TaskKind::NestedLeaf
        } else {
            TaskKind::Standalone
        }
    }

    /// Independently placed units: groups and standalone tasks, in input order.
    pub fn units(&self) -> Vec<&'a str> {
        self.ids()
            .filter(|id| self.kind(id) != TaskKind::NestedLeaf)
            .collect()
    }

    /// Unit that carries the position of `id`.
    pub fn unit_of(&self, id: &str) -> Option<&'a str> {
        match self.kind(id) {
            TaskKind::NestedLeaf => self.owner(id),
            _ => self.entry(id).map(|entry| entry.id.as_str()),
        }
    }

    /// Leaf subtasks drawn inside `group_id`, with their slot among its subtasks.
    pub fn contained_leaves(&self, group_id: &str) -> Vec<(usize, &'a str)> {
        self.subtasks(group_id)
            .iter()
            .enumerate()
            .filter(|(_, child)| {
                self.kind(child) == TaskKind::NestedLeaf && self.owner(child) == Some(group_id)
            })
            .map(|(slot, child)| (slot, *child))
            .collect()
    }
}
