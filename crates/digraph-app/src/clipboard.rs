//! Node clipboard format: `Node <text> <outline> <background> <label...>`,
//! colors as `#rrggbb`, label last so it may contain spaces.

use digraph_core::Color;
use digraph_graph::{Node, NodeColors};
use std::fmt;

/// Text clipboard supplied by the host UI.
pub trait Clipboard {
    fn text(&self) -> Option<String>;
    fn set_text(&mut self, text: String);
}

/// Process-local clipboard for headless use and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    text: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn text(&self) -> Option<String> {
        self.text.clone()
    }

    fn set_text(&mut self, text: String) {
        self.text = Some(text);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeClip {
    pub colors: NodeColors,
    pub text: String,
}

impl NodeClip {
    const TAG: &'static str = "Node";

    pub fn from_node(node: &Node) -> Self {
        Self {
            colors: node.colors(),
            text: node.text().to_string(),
        }
    }

    /// `None` unless there are at least five space-separated parts, the
    /// first is `Node` and all three colors parse.
    pub fn parse(raw: &str) -> Option<Self> {
        let parts: Vec<&str> = raw.split(' ').collect();
        if parts.len() < 5 || parts[0] != Self::TAG {
            return None;
        }

        let color = |part: &str| part.parse::<Color>().ok();
        Some(Self {
            colors: NodeColors {
                text: color(parts[1])?,
                outline: color(parts[2])?,
                background: color(parts[3])?,
            },
            text: parts[4..].join(" "),
        })
    }
}

impl fmt::Display for NodeClip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            Self::TAG,
            self.colors.text,
            self.colors.outline,
            self.colors.background,
            self.text
        )
    }
}
