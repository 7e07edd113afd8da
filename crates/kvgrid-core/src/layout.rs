//! Vertical flow layout for grouped key-value data.
//!
//! The layout is a pure function of the ordered tree contents, the grid's
//! bounding box and the [`GridMetrics`]. Every group with at least one
//! element becomes a framed box holding a title and one row per element;
//! boxes stack top to bottom in tree order. Groups without elements are
//! skipped entirely.
//!
//! ```text
//!   bounds.top + top_offset ──► cursor
//!        ┌─ Title ─────────────────────────────┐
//!        │  key column │ value field           │
//!        │  key column │ value field           │
//!        └─────────────────────────────────────┘
//!                 group_gap
//!        ┌─ Next ──────────────────────────────┐
//! ```

use crate::geometry::Rect;
use crate::logging::targets;
use crate::metrics::GridMetrics;
use crate::model::{GroupedKeyValueTree, KvpGroup};

/// Geometry of one key/value row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    /// The static key label.
    pub key: Rect,
    /// The editable value field.
    pub value: Rect,
}

/// Geometry of one rendered group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupLayout {
    /// Index of the group in [`GroupedKeyValueTree::groups`].
    pub group_index: usize,
    /// Group name, used as the title text.
    pub name: String,
    /// The framed container box.
    pub frame: Rect,
    /// The title label, straddling the top border of the frame.
    pub title: Rect,
    /// One entry per element, index-aligned with the group's elements.
    pub rows: Vec<RowLayout>,
}

/// Complete layout of a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    /// The bounding box the layout was computed for.
    pub bounds: Rect,
    /// Width of the key column shared by all groups.
    pub key_width: i32,
    /// Rendered groups in tree order.
    pub groups: Vec<GroupLayout>,
    /// Vertical cursor after the last group, where the next one would go.
    pub next_y: i32,
}

impl GridLayout {
    /// The layout of a grid with nothing to show.
    pub fn empty(bounds: Rect, metrics: &GridMetrics) -> Self {
        Self {
            bounds,
            key_width: metrics.min_key_width,
            groups: Vec::new(),
            next_y: bounds.top().saturating_add(metrics.top_offset),
        }
    }

    /// Layout of the group with the given name, if it is rendered.
    pub fn group(&self, name: &str) -> Option<&GroupLayout> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Total number of rows across all rendered groups.
    pub fn row_count(&self) -> usize {
        self.groups.iter().map(|g| g.rows.len()).sum()
    }
}

/// Width of the key column for the whole tree.
///
/// Based on the longest key in any group, padded and floored at
/// `min_key_width`. A tree without elements gets exactly the minimum.
pub fn key_column_width(tree: &GroupedKeyValueTree, metrics: &GridMetrics) -> i32 {
    match tree.longest_key() {
        Some(key) => metrics
            .text_width(key)
            .saturating_add(metrics.key_padding)
            .max(metrics.min_key_width),
        None => metrics.min_key_width,
    }
}

/// Height of a group box holding `rows` rows.
pub fn group_box_height(rows: usize, metrics: &GridMetrics) -> i32 {
    let rows = i32::try_from(rows).unwrap_or(i32::MAX);
    (metrics.label_height / 2)
        .saturating_add(rows.saturating_mul(metrics.input_height))
        .saturating_add(rows.saturating_add(1).saturating_mul(metrics.row_padding))
}

/// Compute the layout of every non-empty group in `tree`.
pub fn compute_layout(
    tree: &GroupedKeyValueTree,
    bounds: Rect,
    metrics: &GridMetrics,
) -> GridLayout {
    let mut layout = GridLayout::empty(bounds, metrics);
    layout.key_width = key_column_width(tree, metrics);

    for (group_index, group) in tree.groups.iter().enumerate() {
        if group.is_empty() {
            continue;
        }
        let (group_layout, advance) =
            layout_group(group, group_index, layout.next_y, layout.key_width, bounds, metrics);
        layout.groups.push(group_layout);
        layout.next_y = layout.next_y.saturating_add(advance);
    }

    tracing::trace!(
        target: targets::LAYOUT,
        groups = layout.groups.len(),
        rows = layout.row_count(),
        key_width = layout.key_width,
        next_y = layout.next_y,
        "computed layout"
    );
    layout
}

/// Place one group at cursor `y`, returning its layout and the cursor advance.
///
/// Arithmetic saturates so oversized metrics clamp instead of overflowing.
fn layout_group(
    group: &KvpGroup,
    group_index: usize,
    y: i32,
    key_width: i32,
    bounds: Rect,
    metrics: &GridMetrics,
) -> (GroupLayout, i32) {
    let half_label = metrics.label_height / 2;
    let box_left = bounds.left().saturating_add(metrics.side_margin);
    let box_width = bounds
        .width()
        .saturating_sub(metrics.side_margin.saturating_mul(2));
    let box_height = group_box_height(group.len(), metrics);

    let frame = Rect::new(
        box_left,
        y.saturating_add(metrics.label_height / 4),
        box_width,
        box_height,
    );
    let title = Rect::new(
        box_left.saturating_add(metrics.title_inset),
        y.saturating_sub(metrics.title_rise),
        metrics
            .text_width(&group.name)
            .saturating_add(metrics.title_extra_width),
        metrics.label_height,
    );

    let key_x = box_left.saturating_add(metrics.row_inset);
    let value_x = key_x
        .saturating_add(key_width)
        .saturating_add(metrics.field_gap);
    let value_width =
        box_width.saturating_sub(key_width.saturating_add(metrics.field_trailing));
    let row_step = metrics.input_height.saturating_add(metrics.row_padding);

    let mut row_y = y
        .saturating_add(half_label)
        .saturating_add(metrics.row_padding);
    let mut rows = Vec::with_capacity(group.len());
    for _ in &group.elements {
        rows.push(RowLayout {
            key: Rect::new(key_x, row_y, key_width, metrics.input_height),
            value: Rect::new(value_x, row_y, value_width, metrics.input_height),
        });
        row_y = row_y.saturating_add(row_step);
    }

    let layout = GroupLayout {
        group_index,
        name: group.name.clone(),
        frame,
        title,
        rows,
    };
    let advance = box_height
        .saturating_add(half_label)
        .saturating_add(metrics.group_gap);
    (layout, advance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::KvpElement;

    fn group(name: &str, keys: &[&str]) -> KvpGroup {
        KvpGroup {
            name: name.into(),
            elements: keys.iter().map(|k| KvpElement::new(*k, "")).collect(),
        }
    }

    fn tree(groups: Vec<KvpGroup>) -> GroupedKeyValueTree {
        GroupedKeyValueTree { groups }
    }

    const BOUNDS: Rect = Rect::new(20, 20, 460, 350);

    #[test]
    fn test_key_width_floor() {
        let metrics = GridMetrics::default();
        assert_eq!(key_column_width(&tree(vec![]), &metrics), 70);
        // 4 * 6 + 16 = 40, floored to 70
        assert_eq!(key_column_width(&tree(vec![group("g", &["Name"])]), &metrics), 70);
    }

    #[test]
    fn test_key_width_from_longest_key() {
        let metrics = GridMetrics::default();
        let t = tree(vec![
            group("a", &["Name"]),
            group("b", &["Connection timeout"]),
        ]);
        // 18 * 6 + 16
        assert_eq!(key_column_width(&t, &metrics), 124);
    }

    #[test]
    fn test_key_width_monotonic_in_key_length() {
        let metrics = GridMetrics::default();
        let mut previous = 0;
        for n in 0..40 {
            let key = "k".repeat(n.max(1));
            let width = key_column_width(&tree(vec![group("g", &[key.as_str()])]), &metrics);
            assert!(width >= previous);
            assert!(width >= metrics.min_key_width);
            previous = width;
        }
    }

    #[test]
    fn test_box_height() {
        let metrics = GridMetrics::default();
        // 12 + 2 * 25 + 3 * 4
        assert_eq!(group_box_height(2, &metrics), 74);
        assert_eq!(group_box_height(0, &metrics), 16);
    }

    #[test]
    fn test_single_group_geometry() {
        let metrics = GridMetrics::default();
        let t = tree(vec![group("Settings", &["Theme", "Language"])]);
        let layout = compute_layout(&t, BOUNDS, &metrics);

        assert_eq!(layout.key_width, 70);
        assert_eq!(layout.groups.len(), 1);
        let g = &layout.groups[0];
        // cursor starts at 20 + 15 = 35
        assert_eq!(g.frame, Rect::new(40, 41, 420, 74));
        assert_eq!(g.title, Rect::new(50, 28, 8 * 6 + 20, 24));
        assert_eq!(g.rows[0].key, Rect::new(55, 51, 70, 25));
        assert_eq!(g.rows[0].value, Rect::new(130, 51, 420 - 105, 25));
        assert_eq!(g.rows[1].key.top(), 80);
        // 35 + 74 + 12 + 10
        assert_eq!(layout.next_y, 131);
    }

    #[test]
    fn test_groups_stack_in_tree_order() {
        let metrics = GridMetrics::default();
        let layout = compute_layout(
            &tree(vec![group("First", &["a"]), group("Second", &["b", "c"])]),
            BOUNDS,
            &metrics,
        );
        let names: Vec<_> = layout.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["First", "Second"]);
        assert!(layout.groups[1].frame.top() > layout.groups[0].frame.bottom());
        assert_eq!(layout.groups[1].group_index, 1);
    }

    #[test]
    fn test_empty_groups_skipped() {
        let metrics = GridMetrics::default();
        let with_empty = compute_layout(
            &tree(vec![group("Empty", &[]), group("Full", &["k"])]),
            BOUNDS,
            &metrics,
        );
        let without = compute_layout(&tree(vec![group("Full", &["k"])]), BOUNDS, &metrics);

        assert_eq!(with_empty.groups.len(), 1);
        assert_eq!(with_empty.groups[0].group_index, 1);
        assert_eq!(with_empty.groups[0].frame, without.groups[0].frame);
        assert!(with_empty.group("Empty").is_none());
    }

    #[test]
    fn test_empty_tree_resets_cursor() {
        let metrics = GridMetrics::default();
        let layout = compute_layout(&tree(vec![]), BOUNDS, &metrics);
        assert_eq!(layout, GridLayout::empty(BOUNDS, &metrics));
        assert_eq!(layout.next_y, 35);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let metrics = GridMetrics::default();
        let t = tree(vec![group("A", &["x", "yy"]), group("B", &["zzz"])]);
        assert_eq!(compute_layout(&t, BOUNDS, &metrics), compute_layout(&t, BOUNDS, &metrics));
    }

    #[test]
    fn test_box_width_follows_bounds() {
        let metrics = GridMetrics::default();
        let t = tree(vec![group("A", &["x"])]);
        let narrow = compute_layout(&t, Rect::new(0, 0, 200, 100), &metrics);
        let wide = compute_layout(&t, Rect::new(0, 0, 800, 100), &metrics);
        assert_eq!(narrow.groups[0].frame.width(), 160);
        assert_eq!(wide.groups[0].frame.width(), 760);
        assert_eq!(
            wide.groups[0].rows[0].value.width() - narrow.groups[0].rows[0].value.width(),
            600
        );
    }

    #[test]
    fn test_oversized_metrics_clamp_instead_of_overflowing() {
        let metrics = GridMetrics::from_toml_str("char_width = 1000000000").unwrap();
        let t = tree(vec![group("G", &["abc"]), group("H", &["d", "e"])]);
        let layout = compute_layout(&t, BOUNDS, &metrics);

        assert_eq!(layout.key_width, i32::MAX);
        let row = layout.groups[0].rows[0];
        assert_eq!(row.value.left(), i32::MAX);
        assert!(row.value.width() < 0);
        assert_eq!(layout.groups[0].title.width(), 1_000_000_020);
    }

    #[test]
    fn test_oversized_spacing_saturates_cursor() {
        let metrics = GridMetrics {
            side_margin: i32::MAX,
            group_gap: i32::MAX,
            input_height: i32::MAX,
            ..Default::default()
        };
        assert!(metrics.validate().is_ok());
        let t = tree(vec![group("A", &["x", "y"]), group("B", &["z"])]);
        let layout = compute_layout(&t, BOUNDS, &metrics);

        assert_eq!(layout.groups.len(), 2);
        assert_eq!(layout.next_y, i32::MAX);
        assert_eq!(layout.groups[0].frame.height(), i32::MAX);
        assert_eq!(layout.groups[0].frame.left(), i32::MAX);
    }
}
