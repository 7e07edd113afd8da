//! Live association between the data model and rendered visuals.
//!
//! A [`BindingSet`] is a derived cache: it is thrown away and rebuilt from the
//! tree on every refresh, never patched. Bindings hold only handles, a
//! [`VisualId`] per visual and the index of their group in the tree, so no
//! binding ever borrows the model.
//!
//! The rebuild always detaches every existing visual before creating any new
//! one. Both steps run inside a single `&mut` call, so no other code can
//! observe a half-built set.

use kvgrid_core::logging::targets;
use kvgrid_core::{GridLayout, GridMetrics, GroupLayout, GroupedKeyValueTree};

use crate::surface::{Surface, VisualId};

/// Visuals rendered for one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupBinding {
    /// Name of the bound group.
    pub name: String,
    /// Index of the bound group in [`GroupedKeyValueTree::groups`].
    pub group_index: usize,
    /// The framed box holding the rows.
    pub container: VisualId,
    /// The group title, attached next to the container.
    pub title: VisualId,
    /// Key labels, one per element.
    pub key_labels: Vec<VisualId>,
    /// Value fields, index-aligned with the group's elements.
    pub inputs: Vec<VisualId>,
}

impl GroupBinding {
    /// Create the visuals for one laid-out group.
    fn create<S: Surface>(
        surface: &mut S,
        tree: &GroupedKeyValueTree,
        group_layout: &GroupLayout,
        metrics: &GridMetrics,
    ) -> Option<Self> {
        let group = tree.groups.get(group_layout.group_index)?;

        let container = surface.create_container(group_layout.frame);
        let mut key_labels = Vec::with_capacity(group.len());
        let mut inputs = Vec::with_capacity(group.len());
        for (row, element) in group_layout.rows.iter().zip(&group.elements) {
            key_labels.push(surface.create_label(
                Some(container),
                row.key,
                &element.key,
                metrics.key_font_size,
            ));
            inputs.push(surface.create_input(container, row.value, &element.value));
        }
        let title = surface.create_label(
            None,
            group_layout.title,
            &group.name,
            metrics.title_font_size,
        );

        surface.attach(container);
        surface.attach(title);

        Some(Self {
            name: group.name.clone(),
            group_index: group_layout.group_index,
            container,
            title,
            key_labels,
            inputs,
        })
    }

    /// Hide and remove every visual of this group.
    fn detach<S: Surface>(&self, surface: &mut S) {
        for &id in self.inputs.iter().chain(&self.key_labels) {
            surface.detach(id);
        }
        surface.detach(self.title);
        surface.detach(self.container);
    }

    /// Number of visuals owned by this binding.
    pub fn visual_count(&self) -> usize {
        2 + self.key_labels.len() + self.inputs.len()
    }
}

/// Bindings for every rendered group, in tree order.
#[derive(Debug, Clone, Default)]
pub struct BindingSet {
    groups: Vec<GroupBinding>,
}

impl BindingSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binding of the group with the given name.
    pub fn get(&self, name: &str) -> Option<&GroupBinding> {
        self.groups.iter().find(|b| b.name == name)
    }

    /// Iterate over bindings in tree order.
    pub fn iter(&self) -> std::slice::Iter<'_, GroupBinding> {
        self.groups.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of visuals across all bindings.
    pub fn total_visuals(&self) -> usize {
        self.groups.iter().map(GroupBinding::visual_count).sum()
    }

    /// Detach and discard every binding, unconditionally.
    pub fn detach_all<S: Surface>(&mut self, surface: &mut S) {
        let visuals = self.total_visuals();
        for binding in self.groups.drain(..) {
            binding.detach(surface);
        }
        tracing::trace!(target: targets::BINDING, visuals, "detached all visuals");
    }

    /// Replace every binding with fresh visuals for `layout`, then redraw.
    ///
    /// `layout` must have been computed from `tree`.
    pub fn rebuild<S: Surface>(
        &mut self,
        surface: &mut S,
        tree: &GroupedKeyValueTree,
        layout: &GridLayout,
        metrics: &GridMetrics,
    ) {
        self.detach_all(surface);

        for group_layout in &layout.groups {
            match GroupBinding::create(surface, tree, group_layout, metrics) {
                Some(binding) => self.groups.push(binding),
                None => tracing::warn!(
                    target: targets::BINDING,
                    group = %group_layout.name,
                    index = group_layout.group_index,
                    "layout refers to a group missing from the tree"
                ),
            }
        }

        surface.request_redraw();
        tracing::trace!(
            target: targets::BINDING,
            groups = self.groups.len(),
            visuals = self.total_visuals(),
            "rebuilt bindings"
        );
    }

    /// Copy the text of every bound input field into the tree.
    ///
    /// Fields and elements are matched by position. Indices past the end of a
    /// group's elements are skipped; that only happens if the tree changed
    /// without a rebuild.
    pub fn pull_back<S: Surface>(&self, surface: &S, tree: &mut GroupedKeyValueTree) {
        let mut copied = 0usize;
        for binding in &self.groups {
            let Some(group) = tree.groups.get_mut(binding.group_index) else {
                debug_assert!(false, "binding for '{}' outlived its group", binding.name);
                tracing::warn!(
                    target: targets::BINDING,
                    group = %binding.name,
                    "binding outlived its group, skipping"
                );
                continue;
            };

            debug_assert_eq!(
                binding.inputs.len(),
                group.elements.len(),
                "fields and elements of '{}' out of step",
                binding.name
            );
            if binding.inputs.len() != group.elements.len() {
                tracing::warn!(
                    target: targets::BINDING,
                    group = %binding.name,
                    fields = binding.inputs.len(),
                    elements = group.elements.len(),
                    "field/element count mismatch"
                );
            }

            for (&input, element) in binding.inputs.iter().zip(group.elements.iter_mut()) {
                if let Some(text) = surface.input_text(input) {
                    element.value = text;
                    copied += 1;
                }
            }
        }
        tracing::trace!(target: targets::BINDING, copied, "pulled back field values");
    }
}

impl<'a> IntoIterator for &'a BindingSet {
    type Item = &'a GroupBinding;
    type IntoIter = std::slice::Iter<'a, GroupBinding>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}
