//! Box geometry for leaves and groups.

use crate::config::{GroupConfig, LayoutConfig, LeafConfig};
use crate::layout::types::{Position, Size};

/// Estimate (in days) at which boxes reach their maximum width.
const FULL_SCALE_ESTIMATE: f64 = 10.0;

fn width_factor(total_estimate: f64, max_scale: f64) -> f64 {
    1.0 + (total_estimate / FULL_SCALE_ESTIMATE).clamp(0.0, 1.0) * max_scale
}

/// Standalone leaf box: width grows with the estimate, height is fixed.
pub fn leaf_size(total_estimate: f64, leaf: &LeafConfig) -> Size {
    Size {
        width: leaf.base_width * width_factor(total_estimate, leaf.max_width_scale),
        height: leaf.base_height,
    }
}

/// Group box: width from the total estimate, height from direct subtasks only.
pub fn group_size(total_estimate: f64, direct_subtasks: usize, group: &GroupConfig) -> Size {
    let scaled = group.base_width * width_factor(total_estimate, group.max_width_scale);
    Size {
        width: scaled.max(group.min_width),
        height: group.base_height + direct_subtasks as f64 * group.subtask_row_height,
    }
}

/// Group-local box of the subtask in `slot`, clamped to stay inside the group.
pub fn contained_leaf_box(
    slot: usize,
    total_estimate: f64,
    group_box: Size,
    config: &LayoutConfig,
) -> (Position, Size) {
    let group = &config.group;
    let natural = leaf_size(total_estimate, &config.leaf);
    let position = Position::new(
        group.subtask_margin,
        group.header_height + slot as f64 * group.subtask_row_height,
    );
    let size = Size {
        width: natural
            .width
            .min(group_box.width - 2.0 * group.subtask_margin),
        height: natural
            .height
            .min(group.subtask_row_height - group.subtask_margin),
    };
    (position, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_width_saturates_at_ten_days() {
        let leaf = LeafConfig::default();
        assert_eq!(leaf_size(0.0, &leaf).width, 150.0);
        assert_eq!(leaf_size(5.0, &leaf).width, 375.0);
        assert_eq!(leaf_size(10.0, &leaf).width, 600.0);
        assert_eq!(leaf_size(40.0, &leaf).width, 600.0);
        assert_eq!(leaf_size(40.0, &leaf).height, 100.0);
    }

    #[test]
    fn group_width_has_floor() {
        let group = GroupConfig::default();
        assert_eq!(group_size(0.0, 1, &group).width, 350.0);
        assert_eq!(group_size(10.0, 1, &group).width, 900.0);
        assert_eq!(group_size(6.0, 3, &group).height, 120.0 + 3.0 * 80.0);
    }

    #[test]
    fn contained_leaf_stays_inside_group() {
        let config = LayoutConfig::default();
        let group_box = group_size(0.0, 2, &config.group);
        let (position, size) = contained_leaf_box(1, 10.0, group_box, &config);
        assert_eq!(position, Position::new(20.0, 200.0));
        assert!(position.x + size.width <= group_box.width);
        assert!(position.y + size.height <= group_box.height);
    }
}
