//! Logging and debugging facilities for kvgrid.
//!
//! kvgrid uses the `tracing` crate for instrumentation and never installs a
//! subscriber itself. To see logs, install one in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("kvgrid=debug,kvgrid_core=trace")
//!     .init();
//! ```
//!
//! Use [`TreeDebug`] to dump a [`GroupedKeyValueTree`] as an indented tree:
//!
//! ```
//! use kvgrid_core::{GroupedKeyValueTree, KvpElement, KvpGroup};
//! use kvgrid_core::logging::TreeDebug;
//!
//! let mut tree = GroupedKeyValueTree::new();
//! let mut group = KvpGroup::new("Settings");
//! group.elements.push(KvpElement::new("Theme", "Dark"));
//! tree.groups.push(group);
//!
//! let output = TreeDebug::new().format(&tree);
//! assert!(output.contains("Theme = \"Dark\""));
//! ```

use std::fmt::Write as FmtWrite;

use crate::model::GroupedKeyValueTree;

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Layout engine target.
    pub const LAYOUT: &str = "kvgrid_core::layout";
    /// Widget binding target.
    pub const BINDING: &str = "kvgrid::binding";
    /// Grid controller target.
    pub const GRID: &str = "kvgrid::grid";
    /// Performance spans target.
    pub const PERF: &str = "kvgrid::perf";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line-per-node representation.
    Compact,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to print element values next to their keys.
    pub show_values: bool,
    /// Whether to print groups that have no elements.
    pub show_empty_groups: bool,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_values: true,
            show_empty_groups: true,
        }
    }
}

impl TreeFormatOptions {
    /// Keys only, no values, rendered groups only.
    pub fn minimal() -> Self {
        Self {
            show_values: false,
            show_empty_groups: false,
            ..Default::default()
        }
    }
}

/// Debug utility for visualizing a grouped key-value tree.
#[derive(Debug, Clone, Default)]
pub struct TreeDebug {
    options: TreeFormatOptions,
}

impl TreeDebug {
    /// Create a new visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format the whole tree.
    pub fn format(&self, tree: &GroupedKeyValueTree) -> String {
        let mut output = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(
            output,
            "Tree ({} groups, {} elements):",
            tree.len(),
            tree.element_count()
        );

        let groups: Vec<_> = tree
            .iter()
            .filter(|g| self.options.show_empty_groups || !g.is_empty())
            .collect();
        if groups.is_empty() {
            output.push_str("  (empty)\n");
            return output;
        }

        let group_count = groups.len();
        for (gi, group) in groups.into_iter().enumerate() {
            let last_group = gi + 1 == group_count;
            output.push_str(self.connector(last_group));
            let _ = writeln!(output, "{}", group.name);

            let element_count = group.elements.len();
            for (ei, element) in group.elements.iter().enumerate() {
                output.push_str(self.continuation(last_group));
                output.push_str(self.connector(ei + 1 == element_count));
                if self.options.show_values {
                    let _ = writeln!(output, "{} = {:?}", element.key, element.value);
                } else {
                    let _ = writeln!(output, "{}", element.key);
                }
            }
        }
        output
    }

    fn connector(&self, is_last: bool) -> &'static str {
        match (self.options.style, is_last) {
            (TreeStyle::Ascii, false) => "+-- ",
            (TreeStyle::Ascii, true) => "`-- ",
            (TreeStyle::Unicode, false) => "\u{251c}\u{2500}\u{2500} ",
            (TreeStyle::Unicode, true) => "\u{2514}\u{2500}\u{2500} ",
            (TreeStyle::Compact, _) => "- ",
        }
    }

    fn continuation(&self, parent_is_last: bool) -> &'static str {
        match (self.options.style, parent_is_last) {
            (TreeStyle::Ascii, false) => "|   ",
            (TreeStyle::Unicode, false) => "\u{2502}   ",
            (TreeStyle::Compact, _) => "  ",
            (_, true) => "    ",
        }
    }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for measuring how long a refresh takes.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
