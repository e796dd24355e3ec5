//! Task input records and the id-keyed task arena.
//!
//! Inputs arrive either hydrated (subtasks and blockers embedded as objects)
//! or in the stored reference form (`subtaskIds` / `blockedByIds`). The arena
//! keeps one entry per id and reduces every relationship to an id reference,
//! so an embedded copy can never disagree with the canonical record.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::LayoutWarning;

/// A task as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Effort in man-days
    #[serde(default)]
    pub estimate: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<Task>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocked_by: Vec<TaskRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtask_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocked_by_ids: Vec<String>,
}

/// Reference to another task: a bare id or an embedded copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskRef {
    Id(String),
    Embedded {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        estimate: Option<f64>,
    },
}

impl TaskRef {
    pub fn id(&self) -> &str {
        match self {
            TaskRef::Id(id) => id,
            TaskRef::Embedded { id, .. } => id,
        }
    }
}

impl From<&str> for TaskRef {
    fn from(id: &str) -> Self {
        TaskRef::Id(id.to_string())
    }
}

impl Task {
    pub fn new(id: impl Into<String>, estimate: f64) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            id,
            estimate,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_subtask(mut self, subtask: Task) -> Self {
        self.subtasks.push(subtask);
        self
    }

    pub fn blocked_by(mut self, blocker: &Task) -> Self {
        self.blocked_by.push(TaskRef::Embedded {
            id: blocker.id.clone(),
            estimate: Some(blocker.estimate),
        });
        self
    }

    pub fn blocked_by_id(mut self, blocker_id: &str) -> Self {
        self.blocked_by.push(TaskRef::from(blocker_id));
        self
    }

    fn subtask_refs(&self) -> impl Iterator<Item = &str> {
        self.subtasks
            .iter()
            .map(|subtask| subtask.id.as_str())
            .chain(self.subtask_ids.iter().map(String::as_str))
    }

    fn blocker_refs(&self) -> impl Iterator<Item = &str> {
        self.blocked_by
            .iter()
            .map(TaskRef::id)
            .chain(self.blocked_by_ids.iter().map(String::as_str))
    }
}

/// One task in the arena with resolved relationships.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskEntry {
    pub id: String,
    pub title: String,
    pub description: String,
    pub estimate: f64,
    pub subtask_ids: Vec<String>,
    pub blocker_ids: Vec<String>,
}

/// Tasks keyed by id, in input order.
#[derive(Debug, Clone, Default)]
pub struct TaskArena {
    entries: Vec<TaskEntry>,
    index: HashMap<String, usize>,
    warnings: Vec<LayoutWarning>,
}

impl TaskArena {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut entries: Vec<TaskEntry> = Vec::with_capacity(tasks.len());
        let mut index = HashMap::with_capacity(tasks.len());
        let mut warnings = Vec::new();
        let mut kept = Vec::with_capacity(tasks.len());

        for task in tasks {
            if index.contains_key(&task.id) {
                tracing::warn!(task = %task.id, "duplicate task id, keeping first occurrence");
                warnings.push(LayoutWarning::DuplicateTask {
                    task_id: task.id.clone(),
                });
                continue;
            }

            let estimate = if task.estimate.is_finite() && task.estimate >= 0.0 {
                task.estimate
            } else {
                tracing::warn!(task = %task.id, estimate = task.estimate, "invalid estimate");
                warnings.push(LayoutWarning::InvalidEstimate {
                    task_id: task.id.clone(),
                    estimate: task.estimate,
                });
                0.0
            };

            if task.title.trim().is_empty() {
                warnings.push(LayoutWarning::MissingTitle {
                    task_id: task.id.clone(),
                });
            }

            index.insert(task.id.clone(), entries.len());
            entries.push(TaskEntry {
                id: task.id.clone(),
                title: task.title.clone(),
                description: task.description.clone(),
                estimate,
                subtask_ids: Vec::new(),
                blocker_ids: Vec::new(),
            });
            kept.push(task);
        }

        // References are resolved once every id is known.
        for (entry, task) in entries.iter_mut().zip(kept) {
            entry.subtask_ids = resolve_refs(task.subtask_refs(), &index, |missing| {
                tracing::debug!(task = %task.id, subtask = missing, "dropping dangling subtask");
                warnings.push(LayoutWarning::DanglingSubtask {
                    task_id: task.id.clone(),
                    subtask_id: missing.to_string(),
                });
            });
            entry.blocker_ids = resolve_refs(task.blocker_refs(), &index, |missing| {
                tracing::debug!(task = %task.id, blocker = missing, "dropping dangling blocker");
                warnings.push(LayoutWarning::DanglingBlocker {
                    task_id: task.id.clone(),
                    blocker_id: missing.to_string(),
                });
            });
        }

        Self {
            entries,
            index,
            warnings,
        }
    }

    pub fn get(&self, id: &str) -> Option<&TaskEntry> {
        self.index.get(id).map(|&idx| &self.entries[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Problems found while building the arena.
    pub fn warnings(&self) -> &[LayoutWarning] {
        &self.warnings
    }
}

fn resolve_refs<'t>(
    refs: impl Iterator<Item = &'t str>,
    index: &HashMap<String, usize>,
    mut on_missing: impl FnMut(&str),
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut resolved = Vec::new();
    for id in refs {
        if !seen.insert(id) {
            continue;
        }
        if index.contains_key(id) {
            resolved.push(id.to_string());
        } else {
            on_missing(id);
        }
    }
    resolved
}

/// Accepted shapes of a task input file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TaskFile {
    List(Vec<Task>),
    Wrapped { tasks: Vec<Task> },
}

/// Parse a task list from JSON text: a bare array or `{"tasks": [...]}`.
pub fn parse_tasks(content: &str) -> serde_json::Result<Vec<Task>> {
    let file: TaskFile = serde_json::from_str(content)?;
    Ok(match file {
        TaskFile::List(tasks) => tasks,
        TaskFile::Wrapped { tasks } => tasks,
    })
}

/// Load a task list from a JSON file.
pub fn load_tasks(path: &Path) -> Result<Vec<Task>> {
    if !path.exists() {
        return Err(Error::InputNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    parse_tasks(&content).map_err(|err| Error::InvalidInput {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}
