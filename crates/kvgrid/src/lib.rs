//! An editable grid of grouped key-value pairs.
//!
//! kvgrid displays a [`GroupedKeyValueTree`] as a vertical stack of framed
//! groups, one row per key with an editable value field, and reads the user's
//! edits back into the tree on demand.
//!
//! The grid renders through a [`Surface`] supplied by the application, so it
//! works with any toolkit that can create containers, labels and text fields.
//! [`HeadlessSurface`] is an in-memory implementation for tests.
//!
//! - [`KeyValueGrid`]: the controller (`add`, `delete`, `get_data`, `clear_all`, `resize`, `refresh`)
//! - [`binding`]: the rebuild-and-pull-back synchronization between tree and visuals
//! - [`surface`]: the host toolkit abstraction
//!
//! Layout and the data model live in [`kvgrid_core`] and are re-exported here.
//!
//! # Example
//!
//! ```
//! use kvgrid::{HeadlessSurface, KeyValueGrid, Rect};
//!
//! let mut grid = KeyValueGrid::new(HeadlessSurface::new(), Rect::new(20, 20, 460, 350));
//! grid.add("User Account Information", "Name", "Alice");
//! grid.add("Settings", "Theme", "Dark");
//! grid.add("Settings", "Language", "en-US");
//!
//! for group in grid.get_data() {
//!     println!("[{}]", group.name);
//!     for element in &group.elements {
//!         println!("{} = {}", element.key, element.value);
//!     }
//! }
//! ```

pub mod binding;
mod grid;
pub mod headless;
pub mod surface;


pub use binding::{BindingSet, GroupBinding};
pub use grid::{AddOutcome, DeleteOutcome, KeyValueGrid};
pub use headless::{HeadlessSurface, Visual};
pub use surface::{Surface, VisualId, VisualKind};

pub use kvgrid_core::{
    logging, GridError, GridLayout, GridMetrics, GroupLayout, GroupedKeyValueTree, KvpElement,
    KvpGroup, Point, Rect, Result, RowLayout, Size,
};
