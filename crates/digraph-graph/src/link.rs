use crate::node::Node;
use digraph_core::{Color, Line, LinkId, NodeIndex};

/// Links are drawn beneath every node.
pub const LINK_Z_VALUE: i32 = -1;

/// A directed edge between two nodes of the same store.
///
/// The link only keeps the endpoint indices; the nodes themselves live in the
/// store arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    id: LinkId,
    from: NodeIndex,
    to: NodeIndex,
    color: Color,
    line: Line,
}

impl Link {
    pub(crate) fn new(id: LinkId, from: &Node, to: &Node) -> Self {
        let mut link = Self {
            id,
            from: from.index(),
            to: to.index(),
            color: Color::DARK_RED,
            line: Line::default(),
        };
        link.track_nodes(from, to);
        link
    }

    pub fn id(&self) -> LinkId {
        self.id
    }

    pub fn from(&self) -> NodeIndex {
        self.from
    }

    pub fn to(&self) -> NodeIndex {
        self.to
    }

    pub fn endpoints(&self) -> (NodeIndex, NodeIndex) {
        (self.from, self.to)
    }

    pub fn touches(&self, index: NodeIndex) -> bool {
        self.from == index || self.to == index
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn z(&self) -> i32 {
        LINK_Z_VALUE
    }

    /// Current geometry, valid as of the last endpoint move.
    pub fn line(&self) -> Line {
        self.line
    }

    pub(crate) fn track_nodes(&mut self, from: &Node, to: &Node) {
        debug_assert_eq!(from.index(), self.from);
        debug_assert_eq!(to.index(), self.to);
        self.line = Line::new(from.position(), to.position());
    }
}
