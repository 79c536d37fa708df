use crate::store::GraphStore;
use digraph_core::{DiagramItem, LinkId, NodeIndex};

/// Ordered set of selected canvas items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    items: Vec<DiagramItem>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[DiagramItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: DiagramItem) -> bool {
        self.items.contains(&item)
    }

    /// Adds an item; returns `false` if it was already selected.
    pub fn add(&mut self, item: impl Into<DiagramItem>) -> bool {
        let item = item.into();
        if self.contains(item) {
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn remove(&mut self, item: impl Into<DiagramItem>) -> bool {
        let item = item.into();
        let before = self.items.len();
        self.items.retain(|selected| *selected != item);
        self.items.len() != before
    }

    /// Replaces the selection with a single item.
    pub fn select_only(&mut self, item: impl Into<DiagramItem>) {
        self.items.clear();
        self.items.push(item.into());
    }

    pub fn set(&mut self, items: impl IntoIterator<Item = DiagramItem>) {
        self.items.clear();
        for item in items {
            self.add(item);
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Drops items the store no longer holds.
    pub fn prune(&mut self, store: &GraphStore) -> bool {
        let before = self.items.len();
        self.items.retain(|item| store.contains(*item));
        self.items.len() != before
    }

    /// The node, when the selection is exactly one node.
    pub fn selected_node(&self) -> Option<NodeIndex> {
        match self.items.as_slice() {
            [item] => item.as_node(),
            _ => None,
        }
    }

    /// The link, when the selection is exactly one link.
    pub fn selected_link(&self) -> Option<LinkId> {
        match self.items.as_slice() {
            [item] => item.as_link(),
            _ => None,
        }
    }

    /// `(first, second)` in selection order, when exactly two nodes are selected.
    pub fn selected_node_pair(&self) -> Option<(NodeIndex, NodeIndex)> {
        match self.items.as_slice() {
            [first, second] => Some((first.as_node()?, second.as_node()?)),
            _ => None,
        }
    }
}
