//! taskgraph config command implementation

use std::path::PathBuf;

use crate::config::LayoutConfig;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};

pub struct ConfigOptions {
    pub write: Option<PathBuf>,
    pub config: LayoutConfig,
    pub output: OutputOptions,
}

pub fn run(options: ConfigOptions) -> Result<()> {
    let rendered = options.config.to_toml_string()?;

    let mut human = HumanOutput::new("taskgraph config: effective layout configuration");
    if let Some(path) = &options.write {
        options.config.save(path)?;
        human.push_summary("written", path.display().to_string());
    }
    for line in rendered.lines().filter(|line| !line.trim().is_empty()) {
        human.push_detail(line.to_string());
    }

    emit_success(options.output, "config", &options.config, &human)
}
