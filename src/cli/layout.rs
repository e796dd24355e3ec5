//! taskgraph layout command implementation

use std::path::{Path, PathBuf};

use crate::config::LayoutConfig;
use crate::error::Result;
use crate::layout::{compute_layout, Layout, NodeKind};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::task::load_tasks;

pub struct LayoutOptions {
    pub file: PathBuf,
    pub all: bool,
    pub config: LayoutConfig,
    pub output: OutputOptions,
}

pub fn run(options: LayoutOptions) -> Result<()> {
    let tasks = load_tasks(&options.file)?;
    let layout = compute_layout(&tasks, &options.config);

    let human = human_report(&options.file, tasks.len(), &layout, options.all);
    emit_success(options.output, "layout", &layout, &human)
}

fn human_report(
    file: &Path,
    task_count: usize,
    layout: &Layout,
    all: bool,
) -> HumanOutput {
    let groups = layout
        .nodes
        .iter()
        .filter(|node| node.kind == NodeKind::Group)
        .count();
    let width = layout
        .nodes
        .iter()
        .filter(|node| !node.is_contained())
        .map(|node| node.right_edge())
        .fold(0.0_f64, f64::max);
    let height = layout
        .nodes
        .iter()
        .filter(|node| !node.is_contained())
        .map(|node| node.bottom_edge())
        .fold(0.0_f64, f64::max);

    let mut human = HumanOutput::new(format!("taskgraph layout: {}", file.display()));
    human.push_summary("tasks", task_count.to_string());
    human.push_summary("nodes", layout.nodes.len().to_string());
    human.push_summary("groups", groups.to_string());
    human.push_summary("edges", layout.edges.len().to_string());
    human.push_summary("extent", format!("{width:.0} x {height:.0}"));

    if all {
        for node in &layout.nodes {
            let origin = layout.absolute_position(&node.id).unwrap_or(node.position);
            let mut line = format!(
                "{} [{}] at ({:.0}, {:.0}) size {:.0} x {:.0}, {} day(s)",
                node.id,
                match node.kind {
                    NodeKind::Group => "group",
                    NodeKind::Leaf => "leaf",
                },
                origin.x,
                origin.y,
                node.width,
                node.height,
                node.total_estimate
            );
            if node.circular {
                line.push_str(", circular");
            }
            human.push_detail(line);
        }
        for edge in &layout.edges {
            human.push_detail(format!("{} blocks {}", edge.source, edge.target));
        }
    }

    for warning in &layout.warnings {
        human.push_warning(warning.to_string());
    }
    human
}
