//! The grid controller.
//!
//! [`KeyValueGrid`] owns the data tree and is the only way to mutate it. Every
//! accepted mutation ends with a full [`refresh`](KeyValueGrid::refresh), so
//! the rendered visuals mirror the tree as soon as a call returns. Edits the
//! user types into value fields stay on screen until
//! [`get_data`](KeyValueGrid::get_data) pulls them back into the tree.
//!
//! # Example
//!
//! ```
//! use kvgrid::{HeadlessSurface, KeyValueGrid, Rect};
//!
//! let mut grid = KeyValueGrid::new(HeadlessSurface::new(), Rect::new(20, 20, 460, 350));
//! assert!(grid.add("Network", "Timeout", "30s"));
//! assert!(grid.add("Network", "Proxy", ""));
//! assert!(!grid.add("   ", "Key", "value"));
//!
//! assert!(grid.delete("Network", "Proxy"));
//! assert_eq!(grid.get_data().to_string(), "[Network]\nTimeout = 30s\n");
//! ```

use kvgrid_core::logging::targets;
use kvgrid_core::{
    compute_layout, GridError, GridLayout, GridMetrics, GroupedKeyValueTree, KvpElement, KvpGroup,
    PerfSpan, Rect, Result,
};

use crate::binding::BindingSet;
use crate::surface::Surface;

/// What an accepted [`KeyValueGrid::try_add`] did to the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new, empty group was created; no key was given.
    GroupCreated,
    /// The group already existed and no key was given.
    GroupExists,
    /// A new element was appended (the group may also have been created).
    ElementAdded,
    /// An existing element received a new value.
    ValueUpdated,
    /// The element exists and the supplied value was empty, so it was kept.
    ValueKept,
}

/// What an accepted [`KeyValueGrid::try_delete`] removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// A whole group, with the given number of elements.
    Group { elements: usize },
    /// A single element.
    Element,
}

/// An editable grid of grouped key-value pairs rendered onto a [`Surface`].
#[derive(Debug)]
pub struct KeyValueGrid<S: Surface> {
    surface: S,
    tree: GroupedKeyValueTree,
    bindings: BindingSet,
    layout: GridLayout,
    metrics: GridMetrics,
    bounds: Rect,
}

impl<S: Surface> KeyValueGrid<S> {
    /// Create an empty grid occupying `bounds` on `surface`.
    pub fn new(surface: S, bounds: Rect) -> Self {
        Self::with_metrics(surface, bounds, GridMetrics::default())
    }

    /// Create an empty grid with custom sizing, rejecting unusable metrics.
    pub fn try_with_metrics(surface: S, bounds: Rect, metrics: GridMetrics) -> Result<Self> {
        metrics.validate()?;
        Ok(Self::with_metrics(surface, bounds, metrics))
    }

    /// Create an empty grid with custom sizing.
    ///
    /// `metrics` must pass [`GridMetrics::validate`]; use
    /// [`try_with_metrics`](Self::try_with_metrics) for unchecked input.
    pub fn with_metrics(surface: S, bounds: Rect, metrics: GridMetrics) -> Self {
        debug_assert!(
            metrics.validate().is_ok(),
            "invalid grid metrics: {metrics:?}"
        );
        Self {
            surface,
            tree: GroupedKeyValueTree::new(),
            bindings: BindingSet::new(),
            layout: GridLayout::empty(bounds, &metrics),
            metrics,
            bounds,
        }
    }

    /// Insert or update a key/value pair.
    ///
    /// `group` and `key` are trimmed. Returns false only when `group` is
    /// empty. A missing group is created; with an empty `key` nothing else
    /// happens. An existing key is updated unless `value` is empty, in which
    /// case the old value is kept.
    pub fn add(&mut self, group: &str, key: &str, value: &str) -> bool {
        self.try_add(group, key, value).is_ok()
    }

    /// Like [`add`](Self::add), reporting what happened or why it was rejected.
    pub fn try_add(&mut self, group: &str, key: &str, value: &str) -> Result<AddOutcome> {
        let group_name = group.trim();
        let key = key.trim();

        if group_name.is_empty() {
            tracing::debug!(target: targets::GRID, "add rejected: empty group name");
            return Err(GridError::EmptyGroupName);
        }

        let (index, created) = match self.tree.group_position(group_name) {
            Some(index) => (index, false),
            None => {
                self.tree.groups.push(KvpGroup::new(group_name));
                (self.tree.groups.len() - 1, true)
            }
        };
        let target = &mut self.tree.groups[index];

        let outcome = if key.is_empty() {
            if created {
                AddOutcome::GroupCreated
            } else {
                AddOutcome::GroupExists
            }
        } else if let Some(element) = target.element_mut(key) {
            // An empty value never clears an existing one.
            if value.is_empty() {
                AddOutcome::ValueKept
            } else {
                element.value = value.to_string();
                AddOutcome::ValueUpdated
            }
        } else {
            target.elements.push(KvpElement::new(key, value));
            AddOutcome::ElementAdded
        };

        tracing::debug!(
            target: targets::GRID,
            group = group_name,
            key,
            ?outcome,
            "add"
        );
        self.refresh();
        Ok(outcome)
    }

    /// Remove a whole group (empty `key`) or a single element.
    ///
    /// `group` and `key` are trimmed. Returns whether anything was removed.
    pub fn delete(&mut self, group: &str, key: &str) -> bool {
        self.try_delete(group, key).is_ok()
    }

    /// Like [`delete`](Self::delete), reporting what was removed or why not.
    pub fn try_delete(&mut self, group: &str, key: &str) -> Result<DeleteOutcome> {
        let group_name = group.trim();
        let key = key.trim();

        let Some(index) = self.tree.group_position(group_name) else {
            tracing::debug!(target: targets::GRID, group = group_name, "delete: no such group");
            return Err(GridError::group_not_found(group_name));
        };

        let outcome = if key.is_empty() {
            let removed = self.tree.groups.remove(index);
            DeleteOutcome::Group {
                elements: removed.len(),
            }
        } else {
            let target = &mut self.tree.groups[index];
            let Some(position) = target.element_position(key) else {
                tracing::debug!(
                    target: targets::GRID,
                    group = group_name,
                    key,
                    "delete: no such key"
                );
                return Err(GridError::key_not_found(group_name, key));
            };
            target.elements.remove(position);
            DeleteOutcome::Element
        };

        tracing::debug!(
            target: targets::GRID,
            group = group_name,
            key,
            ?outcome,
            "delete"
        );
        self.refresh();
        Ok(outcome)
    }

    /// Copy on-screen edits into the tree and return it.
    ///
    /// This is the only point where typed values reach the model.
    pub fn get_data(&mut self) -> &GroupedKeyValueTree {
        self.bindings.pull_back(&self.surface, &mut self.tree);
        &self.tree
    }

    /// Remove every visual and every group.
    pub fn clear_all(&mut self) {
        self.bindings.detach_all(&mut self.surface);
        self.tree.clear();
        self.layout = GridLayout::empty(self.bounds, &self.metrics);
        self.surface.request_redraw();
        tracing::debug!(target: targets::GRID, "cleared all groups");
    }

    /// Move or resize the grid and lay it out again.
    pub fn resize(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.bounds = Rect::new(x, y, width, height);
        tracing::debug!(target: targets::GRID, x, y, width, height, "resize");
        self.refresh();
    }

    /// Rebuild every visual from the current tree and bounds.
    ///
    /// Edits not yet pulled back with [`get_data`](Self::get_data) are
    /// replaced by the tree's values.
    pub fn refresh(&mut self) {
        let _perf = PerfSpan::new("refresh");
        self.layout = compute_layout(&self.tree, self.bounds, &self.metrics);
        self.bindings
            .rebuild(&mut self.surface, &self.tree, &self.layout, &self.metrics);
    }

    /// The tree as last synchronized, without pulling back edits.
    pub fn tree(&self) -> &GroupedKeyValueTree {
        &self.tree
    }

    /// The layout of the current visuals.
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// The current bindings between groups and visuals.
    pub fn bindings(&self) -> &BindingSet {
        &self.bindings
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn metrics(&self) -> &GridMetrics {
        &self.metrics
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Detach every visual and hand the surface back.
    pub fn into_surface(mut self) -> S {
        self.bindings.detach_all(&mut self.surface);
        self.surface
    }
}
