use crate::layout::GridLayout;
use crate::link::Link;
use crate::node::Node;
use digraph_core::{DiagramItem, LinkId, NodeIndex, Point};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node {0} already exists")]
    DuplicateNode(NodeIndex),
    #[error("Node {0} does not exist")]
    MissingNode(NodeIndex),
    #[error("Link {0} does not exist")]
    MissingLink(LinkId),
    #[error("Node {0} cannot be linked to itself")]
    SelfLink(NodeIndex),
    #[error("Graph store is inconsistent: {0}")]
    Inconsistent(String),
}

/// How [`GraphStore::add_node`] decides where a node goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Next free slot of the store's [`GridLayout`].
    Auto,
    /// Keep the position the node already carries.
    Explicit,
}

#[derive(Debug, Clone)]
pub struct RemovedNode {
    pub node: Node,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionSummary {
    pub nodes: Vec<NodeIndex>,
    pub links: Vec<LinkId>,
}

impl DeletionSummary {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }
}

/// Arena that owns every node and link of one diagram.
///
/// Links refer to nodes by [`NodeIndex`] and nodes refer back by [`LinkId`];
/// only the store holds values. All mutations keep two invariants:
/// every link endpoint is a stored node, and every node's incident set is
/// exactly the stored links touching it.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    nodes: BTreeMap<NodeIndex, Node>,
    links: BTreeMap<LinkId, Link>,
    next_index_hint: i64,
    next_link_id: u64,
    min_z: i32,
    max_z: i32,
    layout: GridLayout,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(layout: GridLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn set_layout(&mut self, layout: GridLayout) {
        self.layout = layout;
    }

    /// Index to give the next new node.
    pub fn next_index(&self) -> NodeIndex {
        NodeIndex(self.next_index_hint).next()
    }

    pub fn next_index_hint(&self) -> i64 {
        self.next_index_hint
    }

    /// Lowest and highest z handed out so far.
    pub fn z_range(&self) -> (i32, i32) {
        (self.min_z, self.max_z)
    }

    pub fn add_node(&mut self, mut node: Node, placement: Placement) -> Result<NodeIndex, GraphError> {
        let index = node.index();
        if self.nodes.contains_key(&index) {
            return Err(GraphError::DuplicateNode(index));
        }

        node.clear_links();
        if placement == Placement::Auto {
            node.set_position(self.layout.position(self.next_index_hint));
        }
        if self.next_index_hint < index.0 {
            self.next_index_hint = index.0;
        }

        self.max_z += 1;
        node.set_z(self.max_z);

        tracing::debug!(
            "Added node {} at {} (z = {})",
            index,
            node.position(),
            node.z()
        );
        self.nodes.insert(index, node);
        self.debug_check();
        Ok(index)
    }

    pub fn add_link(&mut self, from: NodeIndex, to: NodeIndex) -> Result<LinkId, GraphError> {
        if from == to {
            return Err(GraphError::SelfLink(from));
        }
        let from_node = self.nodes.get(&from).ok_or(GraphError::MissingNode(from))?;
        let to_node = self.nodes.get(&to).ok_or(GraphError::MissingNode(to))?;

        self.next_link_id += 1;
        let id = LinkId(self.next_link_id);
        let link = Link::new(id, from_node, to_node);

        if let Some(node) = self.nodes.get_mut(&from) {
            node.add_link(id);
        }
        if let Some(node) = self.nodes.get_mut(&to) {
            node.add_link(id);
        }
        self.links.insert(id, link);

        tracing::debug!("Added link {} from node {} to node {}", id, from, to);
        self.debug_check();
        Ok(id)
    }

    /// Removes a node together with every link that touches it.
    pub fn remove_node(&mut self, index: NodeIndex) -> Result<RemovedNode, GraphError> {
        let incident: Vec<LinkId> = self
            .nodes
            .get(&index)
            .ok_or(GraphError::MissingNode(index))?
            .incident_links()
            .collect();

        let links: Vec<Link> = incident
            .into_iter()
            .filter_map(|id| self.detach_link(id))
            .collect();

        let node = self
            .nodes
            .remove(&index)
            .ok_or(GraphError::MissingNode(index))?;

        tracing::debug!(
            "Removed node {} and {} incident link(s)",
            index,
            links.len()
        );
        self.debug_check();
        Ok(RemovedNode { node, links })
    }

    pub fn remove_link(&mut self, id: LinkId) -> Result<Link, GraphError> {
        let link = self.detach_link(id).ok_or(GraphError::MissingLink(id))?;
        tracing::debug!("Removed link {}", id);
        self.debug_check();
        Ok(link)
    }

    fn detach_link(&mut self, id: LinkId) -> Option<Link> {
        let link = self.links.remove(&id)?;
        for endpoint in [link.from(), link.to()] {
            if let Some(node) = self.nodes.get_mut(&endpoint) {
                node.remove_link(id);
            }
        }
        Some(link)
    }

    /// Batch delete for a selection. Links go first so a node's cascade never
    /// sees a link the caller also asked to delete; items that are already
    /// gone are skipped.
    pub fn delete_items(&mut self, items: &[DiagramItem]) -> DeletionSummary {
        let mut summary = DeletionSummary::default();

        for id in items.iter().filter_map(DiagramItem::as_link) {
            if self.detach_link(id).is_some() {
                summary.links.push(id);
            }
        }

        for index in items.iter().filter_map(DiagramItem::as_node) {
            match self.remove_node(index) {
                Ok(removed) => {
                    summary.nodes.push(index);
                    summary
                        .links
                        .extend(removed.links.iter().map(|link| link.id()));
                }
                Err(err) => tracing::debug!("Skipping delete of node {}: {}", index, err),
            }
        }

        self.debug_check();
        summary
    }

    /// Drops every link, then every node, and resets the counters.
    pub fn clear(&mut self) {
        let link_ids: Vec<LinkId> = self.links.keys().copied().collect();
        for id in link_ids {
            self.detach_link(id);
        }
        self.nodes.clear();
        self.next_index_hint = 0;
        self.min_z = 0;
        self.max_z = 0;
        tracing::debug!("Cleared graph store");
    }

    /// Moves a node and re-tracks every incident link before returning.
    pub fn move_node(&mut self, index: NodeIndex, position: Point) -> Result<(), GraphError> {
        let node = self
            .nodes
            .get_mut(&index)
            .ok_or(GraphError::MissingNode(index))?;
        node.set_position(position);

        let incident: Vec<LinkId> = node.incident_links().collect();
        for id in incident {
            self.track_link(id)?;
        }
        Ok(())
    }

    /// Recomputes one link's geometry from its endpoints' current positions.
    pub fn track_link(&mut self, id: LinkId) -> Result<(), GraphError> {
        let Self { nodes, links, .. } = self;
        let link = links.get_mut(&id).ok_or(GraphError::MissingLink(id))?;
        let from = nodes
            .get(&link.from())
            .ok_or(GraphError::MissingNode(link.from()))?;
        let to = nodes
            .get(&link.to())
            .ok_or(GraphError::MissingNode(link.to()))?;
        link.track_nodes(from, to);
        Ok(())
    }

    pub fn bring_to_front(&mut self, index: NodeIndex) -> Result<i32, GraphError> {
        let node = self
            .nodes
            .get_mut(&index)
            .ok_or(GraphError::MissingNode(index))?;
        self.max_z += 1;
        node.set_z(self.max_z);
        Ok(self.max_z)
    }

    pub fn send_to_back(&mut self, index: NodeIndex) -> Result<i32, GraphError> {
        let node = self
            .nodes
            .get_mut(&index)
            .ok_or(GraphError::MissingNode(index))?;
        self.min_z -= 1;
        node.set_z(self.min_z);
        Ok(self.min_z)
    }

    pub fn node(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(&index)
    }

    /// Text and colors only; positions change through [`GraphStore::move_node`].
    pub fn node_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        self.nodes.get_mut(&index)
    }

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(&id)
    }

    pub fn link_mut(&mut self, id: LinkId) -> Option<&mut Link> {
        self.links.get_mut(&id)
    }

    /// Nodes in ascending index order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Links in creation order.
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.values()
    }

    pub fn incident_links(&self, index: NodeIndex) -> impl Iterator<Item = &Link> {
        self.nodes
            .get(&index)
            .into_iter()
            .flat_map(|node| node.incident_links())
            .filter_map(|id| self.links.get(&id))
    }

    pub fn contains_node(&self, index: NodeIndex) -> bool {
        self.nodes.contains_key(&index)
    }

    pub fn contains_link(&self, id: LinkId) -> bool {
        self.links.contains_key(&id)
    }

    pub fn contains(&self, item: DiagramItem) -> bool {
        match item {
            DiagramItem::Node(index) => self.contains_node(index),
            DiagramItem::Link(id) => self.contains_link(id),
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }

    /// Full consistency check of the node/link back-references.
    pub fn verify(&self) -> Result<(), GraphError> {
        for link in self.links.values() {
            for endpoint in [link.from(), link.to()] {
                let node = self.nodes.get(&endpoint).ok_or_else(|| {
                    GraphError::Inconsistent(format!(
                        "link {} references missing node {}",
                        link.id(),
                        endpoint
                    ))
                })?;
                if !node.has_link(link.id()) {
                    return Err(GraphError::Inconsistent(format!(
                        "node {} does not list incident link {}",
                        endpoint,
                        link.id()
                    )));
                }
            }
        }

        for node in self.nodes.values() {
            for id in node.incident_links() {
                let touches = self
                    .links
                    .get(&id)
                    .is_some_and(|link| link.touches(node.index()));
                if !touches {
                    return Err(GraphError::Inconsistent(format!(
                        "node {} lists stale link {}",
                        node.index(),
                        id
                    )));
                }
            }
        }
        Ok(())
    }

    fn debug_check(&self) {
        debug_assert!(self.verify().is_ok(), "{:?}", self.verify());
    }
}
