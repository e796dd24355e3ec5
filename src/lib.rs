//! taskgraph - Task Relationship Layout Library
//!
//! This library turns a planning workspace's task list into timeline
//! geometry: every task is placed so that it starts after the tasks blocking
//! it, parent tasks become group boxes around their subtasks, and blocking
//! relationships become directed edges.
//!
//! # Core Concepts
//!
//! - **Tasks**: records with an estimate in man-days, subtasks and blockers
//! - **Groups**: boxes drawn for tasks that have subtasks
//! - **Units**: groups and standalone tasks, each placed on its own row
//! - **Blocks edges**: `source` must finish before `target` starts
//! - **Circular dependencies**: flagged and placed in input order, never fatal
//!
//! # Module Organization
//!
//! - `task`: Input records, JSON loading and the id-keyed task arena
//! - `graph`: Subtask / blocked-by / blocks relationship maps
//! - `estimate`: Recursive total estimates
//! - `layout`: Positioning, group geometry and edge synthesis
//! - `config`: Layout geometry loaded from `.taskgraph.toml`
//! - `error`: Error types and result aliases
//! - `output`: Shared JSON/human output for the CLI
//! - `cli`: Command-line interface using clap

pub mod cli;
pub mod config;
pub mod error;
pub mod estimate;
pub mod graph;
pub mod layout;
pub mod output;
pub mod task;

pub use config::LayoutConfig;
pub use error::{Error, Result};
pub use layout::{compute_layout, Layout, LayoutEdge, LayoutNode, LayoutWarning};
pub use task::Task;
