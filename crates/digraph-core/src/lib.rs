use serde::{Deserialize, Serialize};
use std::fmt;

pub mod color;

pub use color::{Color, ColorParseError};

/// Identity of a node within one diagram. Indices are assigned monotonically
/// and are the handle written to `.diag` files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeIndex(pub i64);

impl NodeIndex {
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store-local handle of a link. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LinkId(pub u64);

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A straight segment between two canvas points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl Line {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Anything the user can select on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagramItem {
    Node(NodeIndex),
    Link(LinkId),
}

impl DiagramItem {
    pub fn as_node(&self) -> Option<NodeIndex> {
        match self {
            Self::Node(index) => Some(*index),
            Self::Link(_) => None,
        }
    }

    pub fn as_link(&self) -> Option<LinkId> {
        match self {
            Self::Link(id) => Some(*id),
            Self::Node(_) => None,
        }
    }
}

impl From<NodeIndex> for DiagramItem {
    fn from(index: NodeIndex) -> Self {
        Self::Node(index)
    }
}

impl From<LinkId> for DiagramItem {
    fn from(id: LinkId) -> Self {
        Self::Link(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_index_serializes_as_plain_number() {
        let json = serde_json::to_string(&NodeIndex(7)).unwrap();
        assert_eq!(json, "7");
        assert_eq!(NodeIndex(7).next(), NodeIndex(8));
    }

    #[test]
    fn test_line_length() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert!((line.length() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_diagram_item_accessors() {
        let node = DiagramItem::from(NodeIndex(3));
        let link = DiagramItem::from(LinkId(9));
        assert_eq!(node.as_node(), Some(NodeIndex(3)));
        assert_eq!(node.as_link(), None);
        assert_eq!(link.as_link(), Some(LinkId(9)));
        assert_eq!(link.as_node(), None);
    }
}
