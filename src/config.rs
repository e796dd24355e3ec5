//! Configuration loading and management
//!
//! Handles parsing of `.taskgraph.toml` configuration files. Every field has a
//! default, so an empty file (or no file at all) yields the stock geometry.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name looked up by [`LayoutConfig::load_from_dir`]
pub const CONFIG_FILE: &str = ".taskgraph.toml";

/// Layout geometry configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Spacing between placed units
    #[serde(default)]
    pub spacing: SpacingConfig,

    /// Sizing of leaf task boxes
    #[serde(default)]
    pub leaf: LeafConfig,

    /// Sizing of group boxes and their contained subtasks
    #[serde(default)]
    pub group: GroupConfig,
}

/// Spacing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacingConfig {
    /// Vertical space added below every placed unit
    #[serde(default = "default_row_height")]
    pub row_height: f64,

    /// Minimum distance between a blocker's right edge and a blocked unit
    #[serde(default = "default_horizontal_gap")]
    pub horizontal_gap: f64,
}

fn default_row_height() -> f64 {
    200.0
}

fn default_horizontal_gap() -> f64 {
    150.0
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            row_height: default_row_height(),
            horizontal_gap: default_horizontal_gap(),
        }
    }
}

/// Leaf node sizing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafConfig {
    #[serde(default = "default_leaf_base_width")]
    pub base_width: f64,

    #[serde(default = "default_leaf_base_height")]
    pub base_height: f64,

    /// Extra width multiplier reached at a total estimate of 10 days
    #[serde(default = "default_leaf_max_width_scale")]
    pub max_width_scale: f64,
}

fn default_leaf_base_width() -> f64 {
    150.0
}

fn default_leaf_base_height() -> f64 {
    100.0
}

fn default_leaf_max_width_scale() -> f64 {
    3.0
}

impl Default for LeafConfig {
    fn default() -> Self {
        Self {
            base_width: default_leaf_base_width(),
            base_height: default_leaf_base_height(),
            max_width_scale: default_leaf_max_width_scale(),
        }
    }
}

/// Group box sizing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupConfig {
    #[serde(default = "default_group_base_width")]
    pub base_width: f64,

    #[serde(default = "default_group_min_width")]
    pub min_width: f64,

    /// Extra width multiplier reached at a total estimate of 10 days
    #[serde(default = "default_group_max_width_scale")]
    pub max_width_scale: f64,

    /// Height of a group with no subtask rows
    #[serde(default = "default_group_base_height")]
    pub base_height: f64,

    /// Offset of the first contained subtask from the group's top edge
    #[serde(default = "default_group_header_height")]
    pub header_height: f64,

    /// Height added per direct subtask
    #[serde(default = "default_group_subtask_row_height")]
    pub subtask_row_height: f64,

    /// Left indent of contained subtasks
    #[serde(default = "default_group_subtask_margin")]
    pub subtask_margin: f64,
}

fn default_group_base_width() -> f64 {
    300.0
}

fn default_group_min_width() -> f64 {
    350.0
}

fn default_group_max_width_scale() -> f64 {
    2.0
}

fn default_group_base_height() -> f64 {
    120.0
}

fn default_group_header_height() -> f64 {
    120.0
}

fn default_group_subtask_row_height() -> f64 {
    80.0
}

fn default_group_subtask_margin() -> f64 {
    20.0
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            base_width: default_group_base_width(),
            min_width: default_group_min_width(),
            max_width_scale: default_group_max_width_scale(),
            base_height: default_group_base_height(),
            header_height: default_group_header_height(),
            subtask_row_height: default_group_subtask_row_height(),
            subtask_margin: default_group_subtask_margin(),
        }
    }
}

impl LayoutConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        if !path.exists() {
            return Err(crate::error::Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> crate::error::Result<Self> {
        let config: LayoutConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.taskgraph.toml` from a directory, or return defaults
    pub fn load_from_dir(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE);
        if !config_path.exists() {
            return Self::default();
        }
        match Self::load(&config_path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(
                    path = %config_path.display(),
                    "ignoring invalid layout config: {err}"
                );
                Self::default()
            }
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> crate::error::Result<()> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn to_toml_string(&self) -> crate::error::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> crate::error::Result<()> {
        validate_non_negative(self.spacing.row_height, "spacing.row_height")?;
        validate_non_negative(self.spacing.horizontal_gap, "spacing.horizontal_gap")?;

        validate_positive(self.leaf.base_width, "leaf.base_width")?;
        validate_positive(self.leaf.base_height, "leaf.base_height")?;
        validate_non_negative(self.leaf.max_width_scale, "leaf.max_width_scale")?;

        validate_positive(self.group.base_width, "group.base_width")?;
        validate_positive(self.group.min_width, "group.min_width")?;
        validate_non_negative(self.group.max_width_scale, "group.max_width_scale")?;
        validate_positive(self.group.base_height, "group.base_height")?;
        validate_non_negative(self.group.header_height, "group.header_height")?;
        validate_positive(self.group.subtask_row_height, "group.subtask_row_height")?;
        validate_non_negative(self.group.subtask_margin, "group.subtask_margin")?;

        if self.group.header_height > self.group.base_height {
            return Err(crate::error::Error::InvalidConfig(
                "group.header_height must be <= group.base_height".to_string(),
            ));
        }
        if self.group.subtask_margin * 2.0 >= self.group.min_width {
            return Err(crate::error::Error::InvalidConfig(
                "group.subtask_margin leaves no room inside group.min_width".to_string(),
            ));
        }
        if self.group.subtask_margin >= self.group.subtask_row_height {
            return Err(crate::error::Error::InvalidConfig(
                "group.subtask_margin must be < group.subtask_row_height".to_string(),
            ));
        }
        Ok(())
    }
}

fn validate_non_negative(value: f64, field: &str) -> crate::error::Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(crate::error::Error::InvalidConfig(format!(
            "{field} must be a finite number >= 0 (got {value})"
        )));
    }
    Ok(())
}

fn validate_positive(value: f64, field: &str) -> crate::error::Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(crate::error::Error::InvalidConfig(format!(
            "{field} must be a finite number > 0 (got {value})"
        )));
    }
    Ok(())
}
