//! taskgraph check command implementation
//!
//! Runs a full layout and reports every recovered problem.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::LayoutConfig;
use crate::error::{Error, Result};
use crate::layout::{compute_layout, LayoutWarning};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::task::load_tasks;

pub struct CheckOptions {
    pub file: PathBuf,
    pub strict: bool,
    pub config: LayoutConfig,
    pub output: OutputOptions,
}

#[derive(Serialize)]
struct CheckReport {
    file: PathBuf,
    tasks: usize,
    ok: bool,
    problems: Vec<LayoutWarning>,
}

pub fn run(options: CheckOptions) -> Result<()> {
    let tasks = load_tasks(&options.file)?;
    let layout = compute_layout(&tasks, &options.config);

    let report = CheckReport {
        file: options.file.clone(),
        tasks: tasks.len(),
        ok: layout.warnings.is_empty(),
        problems: layout.warnings,
    };

    let header = if report.ok {
        format!("taskgraph check: {} ok", options.file.display())
    } else {
        format!(
            "taskgraph check: {} problem(s) in {}",
            report.problems.len(),
            options.file.display()
        )
    };
    let mut human = HumanOutput::new(header);
    human.push_summary("tasks", report.tasks.to_string());
    human.push_summary("problems", report.problems.len().to_string());
    for problem in &report.problems {
        human.push_detail(problem.to_string());
    }

    emit_success(options.output, "check", &report, &human)?;

    if options.strict && !report.ok {
        return Err(Error::CheckFailed {
            count: report.problems.len(),
        });
    }
    Ok(())
}
