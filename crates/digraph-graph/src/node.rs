use digraph_core::{Color, LinkId, NodeIndex, Point};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The three display colors of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeColors {
    pub text: Color,
    pub outline: Color,
    pub background: Color,
}

impl Default for NodeColors {
    fn default() -> Self {
        Self {
            text: Color::DARK_GREEN,
            outline: Color::DARK_BLUE,
            background: Color::WHITE,
        }
    }
}

/// A diagram vertex.
///
/// Position and stacking are owned by the [`GraphStore`](crate::GraphStore):
/// moving a node has to re-track its links, so those setters are crate-private.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    index: NodeIndex,
    text: String,
    colors: NodeColors,
    position: Point,
    z: i32,
    links: BTreeSet<LinkId>,
}

impl Node {
    pub fn new(index: NodeIndex) -> Self {
        Self {
            index,
            text: String::new(),
            colors: NodeColors::default(),
            position: Point::ORIGIN,
            z: 0,
            links: BTreeSet::new(),
        }
    }

    /// Builder used by loaders and paste: a node that already knows where it goes.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn at(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn with_colors(mut self, colors: NodeColors) -> Self {
        self.colors = colors;
        self
    }

    pub fn index(&self) -> NodeIndex {
        self.index
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn colors(&self) -> NodeColors {
        self.colors
    }

    pub fn set_colors(&mut self, colors: NodeColors) {
        self.colors = colors;
    }

    pub fn text_color(&self) -> Color {
        self.colors.text
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.colors.text = color;
    }

    pub fn outline_color(&self) -> Color {
        self.colors.outline
    }

    pub fn set_outline_color(&mut self, color: Color) {
        self.colors.outline = color;
    }

    pub fn background_color(&self) -> Color {
        self.colors.background
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.colors.background = color;
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn z(&self) -> i32 {
        self.z
    }

    pub(crate) fn set_z(&mut self, z: i32) {
        self.z = z;
    }

    /// Links that reference this node as an endpoint.
    pub fn incident_links(&self) -> impl Iterator<Item = LinkId> + '_ {
        self.links.iter().copied()
    }

    pub fn incident_link_count(&self) -> usize {
        self.links.len()
    }

    pub fn has_link(&self, id: LinkId) -> bool {
        self.links.contains(&id)
    }

    pub(crate) fn add_link(&mut self, id: LinkId) {
        self.links.insert(id);
    }

    pub(crate) fn remove_link(&mut self, id: LinkId) {
        self.links.remove(&id);
    }

    /// Fresh nodes handed to the store must not claim links they don't own.
    pub(crate) fn clear_links(&mut self) {
        self.links.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_defaults() {
        let node = Node::new(NodeIndex(4));
        assert_eq!(node.index(), NodeIndex(4));
        assert_eq!(node.text(), "");
        assert_eq!(node.text_color(), Color::DARK_GREEN);
        assert_eq!(node.outline_color(), Color::DARK_BLUE);
        assert_eq!(node.background_color(), Color::WHITE);
        assert_eq!(node.position(), Point::ORIGIN);
        assert_eq!(node.incident_link_count(), 0);
    }

    #[test]
    fn test_link_registration_is_idempotent() {
        let mut node = Node::new(NodeIndex(1));
        node.add_link(LinkId(1));
        node.add_link(LinkId(1));
        assert_eq!(node.incident_link_count(), 1);

        node.remove_link(LinkId(2));
        assert_eq!(node.incident_link_count(), 1);

        node.remove_link(LinkId(1));
        node.remove_link(LinkId(1));
        assert_eq!(node.incident_link_count(), 0);
    }

    #[test]
    fn test_color_setters() {
        let mut node = Node::new(NodeIndex(1)).with_text("A");
        node.set_text_color(Color::BLACK);
        node.set_outline_color(Color::DARK_RED);
        node.set_background_color(Color::rgb(1, 2, 3));
        assert_eq!(
            node.colors(),
            NodeColors {
                text: Color::BLACK,
                outline: Color::DARK_RED,
                background: Color::rgb(1, 2, 3),
            }
        );
        assert_eq!(node.text(), "A");
    }
}
