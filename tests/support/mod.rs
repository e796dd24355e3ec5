#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use taskgraph::layout::{Layout, LayoutNode};
use taskgraph::task::Task;
use tempfile::TempDir;

pub const HORIZONTAL_GAP: f64 = 150.0;
pub const ROW_HEIGHT: f64 = 200.0;
pub const LEAF_BASE_HEIGHT: f64 = 100.0;
pub const GROUP_BASE_HEIGHT: f64 = 120.0;
pub const SUBTASK_ROW_HEIGHT: f64 = 80.0;

pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_file(&self, rel_path: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn write_tasks(&self, rel_path: &str, tasks: &[Task]) -> std::io::Result<PathBuf> {
        let contents = serde_json::to_string_pretty(tasks).expect("serialize tasks");
        self.write_file(rel_path, &contents)
    }
}

/// A small project: two parent tasks, a nested group, cross-group blockers.
pub fn project_tasks() -> Vec<Task> {
    let design = Task::new("design", 3.0).with_title("Design");
    let api = Task::new("api", 2.0).with_title("API");
    let db = Task::new("db", 3.0).with_title("Database").blocked_by(&design);
    let backend = Task::new("backend", 1.0)
        .with_title("Backend")
        .with_subtask(api.clone())
        .with_subtask(db.clone());
    let validation = Task::new("validation", 1.0).with_title("Validation");
    let forms = Task::new("forms", 1.0)
        .with_title("Forms")
        .with_subtask(validation.clone());
    let ui = Task::new("ui", 4.0).with_title("UI");
    let frontend = Task::new("frontend", 2.0)
        .with_title("Frontend")
        .with_subtask(ui.clone())
        .with_subtask(forms.clone())
        .blocked_by(&backend);
    let deploy = Task::new("deploy", 1.0)
        .with_title("Deploy")
        .blocked_by(&frontend)
        .blocked_by(&api);
    let docs = Task::new("docs", 2.0).with_title("Docs");

    vec![
        design, backend, api, db, frontend, ui, forms, validation, deploy, docs,
    ]
}

/// The node that carries a node's absolute placement: itself, or its group.
pub fn placed_node<'l>(layout: &'l Layout, node_id: &str) -> &'l LayoutNode {
    let node = layout.node(node_id).expect("node exists");
    match &node.parent_group_id {
        Some(parent) => layout.node(parent).expect("parent group exists"),
        None => node,
    }
}

pub fn boxes_overlap(a: &LayoutNode, b: &LayoutNode) -> bool {
    a.position.x < b.right_edge()
        && b.position.x < a.right_edge()
        && a.position.y < b.bottom_edge()
        && b.position.y < a.bottom_edge()
}
