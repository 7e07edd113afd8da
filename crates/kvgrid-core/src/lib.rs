//! Core systems for kvgrid.
//!
//! This crate holds everything about an editable key-value grid that does not
//! depend on a widget toolkit:
//!
//! - **Data Model**: [`GroupedKeyValueTree`] of named groups holding ordered key/value pairs
//! - **Geometry**: integer pixel [`Point`], [`Size`] and [`Rect`]
//! - **Metrics**: [`GridMetrics`], the sizing configuration of the layout
//! - **Layout Engine**: [`compute_layout`], a pure vertical flow layout
//! - **Logging**: tracing targets and a [`TreeDebug`](logging::TreeDebug) dump
//!
//! # Layout Example
//!
//! ```
//! use kvgrid_core::{compute_layout, GridMetrics, GroupedKeyValueTree, KvpElement, KvpGroup, Rect};
//!
//! let mut tree = GroupedKeyValueTree::new();
//! let mut group = KvpGroup::new("Network");
//! group.elements.push(KvpElement::new("Timeout", "30s"));
//! tree.groups.push(group);
//!
//! let layout = compute_layout(&tree, Rect::new(20, 20, 460, 350), &GridMetrics::default());
//! assert_eq!(layout.groups.len(), 1);
//! assert_eq!(layout.key_width, 70);
//! ```

mod error;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod model;

pub use error::{GridError, Result};
pub use geometry::{Point, Rect, Size};
pub use layout::{
    compute_layout, group_box_height, key_column_width, GridLayout, GroupLayout, RowLayout,
};
pub use logging::{PerfSpan, TreeDebug, TreeFormatOptions, TreeStyle};
pub use metrics::GridMetrics;
pub use model::{GroupedKeyValueTree, KvpElement, KvpGroup};
