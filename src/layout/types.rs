use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix of the node id assigned to a group box.
pub const GROUP_ID_PREFIX: &str = "group-";

/// Node id of the group box drawn for `task_id`.
pub fn group_node_id(task_id: &str) -> String {
    format!("{GROUP_ID_PREFIX}{task_id}")
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Group,
    Leaf,
}

/// A positioned box. Contained leaves (`parent_group_id` set) carry a
/// position relative to their group's top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutNode {
    pub id: String,
    pub kind: NodeKind,
    pub position: Position,
    pub width: f64,
    pub height: f64,
    pub task_id: String,
    pub title: String,
    pub total_estimate: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtask_ids: Vec<String>,
    #[serde(default)]
    pub is_subtask: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_group_id: Option<String>,
    /// Placed by the cycle fallback
    #[serde(default)]
    pub circular: bool,
}

impl LayoutNode {
    pub fn right_edge(&self) -> f64 {
        self.position.x + self.width
    }

    pub fn bottom_edge(&self) -> f64 {
        self.position.y + self.height
    }

    pub fn is_contained(&self) -> bool {
        self.parent_group_id.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    Blocks,
}

/// Directed edge: `source` blocks `target`. Endpoints are node ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub relationship: Relationship,
    pub source_task_id: String,
    pub target_task_id: String,
}

/// Recoverable problems found while laying out a task list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum LayoutWarning {
    /// Units placed sequentially because their blockers never became ready.
    CircularDependency { task_ids: Vec<String> },
    /// A task reached again while summing its own subtask estimates.
    CircularSubtasks { task_id: String },
    DanglingBlocker { task_id: String, blocker_id: String },
    DanglingSubtask { task_id: String, subtask_id: String },
    DuplicateTask { task_id: String },
    InvalidEstimate { task_id: String, estimate: f64 },
    MissingTitle { task_id: String },
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutWarning::CircularDependency { task_ids } => {
                write!(f, "circular dependency between {}", task_ids.join(", "))
            }
            LayoutWarning::CircularSubtasks { task_id } => {
                write!(f, "task {task_id} contains itself through its subtasks")
            }
            LayoutWarning::DanglingBlocker {
                task_id,
                blocker_id,
            } => write!(f, "task {task_id} is blocked by unknown task {blocker_id}"),
            LayoutWarning::DanglingSubtask {
                task_id,
                subtask_id,
            } => write!(f, "task {task_id} lists unknown subtask {subtask_id}"),
            LayoutWarning::DuplicateTask { task_id } => {
                write!(f, "task id {task_id} appears more than once")
            }
            LayoutWarning::InvalidEstimate { task_id, estimate } => {
                write!(f, "task {task_id} has invalid estimate {estimate}, using 0")
            }
            LayoutWarning::MissingTitle { task_id } => write!(f, "task {task_id} has no title"),
        }
    }
}

/// Geometry produced by one layout pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Group boxes first, then leaves.
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<LayoutWarning>,
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Position in layout coordinates, resolving group-relative leaves.
    pub fn absolute_position(&self, id: &str) -> Option<Position> {
        let node = self.node(id)?;
        match &node.parent_group_id {
            Some(parent) => {
                let origin = self.absolute_position(parent)?;
                Some(Position::new(
                    origin.x + node.position.x,
                    origin.y + node.position.y,
                ))
            }
            None => Some(node.position),
        }
    }

    pub fn circular_task_ids(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|node| node.circular)
            .map(|node| node.task_id.as_str())
            .collect()
    }
}
