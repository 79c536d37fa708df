use digraph_core::NodeIndex;
use digraph_graph::{GraphError, GraphStore};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Nodes,
    Links,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nodes => write!(f, "nodes"),
            Self::Links => write!(f, "links"),
        }
    }
}

/// Why a single node or link entry was left out of a loaded diagram.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("entry is not a JSON object")]
    NotAnObject,
    #[error("missing `{0}` property")]
    MissingField(&'static str),
    #[error("`{field}` must be a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
    #[error("duplicate node index {0}")]
    DuplicateIndex(NodeIndex),
    #[error("no loaded node has index {0}")]
    UnknownEndpoint(NodeIndex),
    #[error("node {0} cannot be linked to itself")]
    SelfLink(NodeIndex),
    #[error("rejected by graph store: {0}")]
    Rejected(String),
}

impl From<GraphError> for SkipReason {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::DuplicateNode(index) => Self::DuplicateIndex(index),
            GraphError::MissingNode(index) => Self::UnknownEndpoint(index),
            GraphError::SelfLink(index) => Self::SelfLink(index),
            other => Self::Rejected(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub section: Section,
    /// Position of the entry inside its JSON array.
    pub position: usize,
    pub reason: SkipReason,
}

impl fmt::Display for SkippedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.section, self.position, self.reason)
    }
}

/// What a lenient load admitted and what it dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub nodes_loaded: usize,
    pub links_loaded: usize,
    pub skipped: Vec<SkippedEntry>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn skipped_in(&self, section: Section) -> impl Iterator<Item = &SkippedEntry> {
        self.skipped
            .iter()
            .filter(move |entry| entry.section == section)
    }

    pub(crate) fn skip(&mut self, section: Section, position: usize, reason: SkipReason) {
        let entry = SkippedEntry {
            section,
            position,
            reason,
        };
        tracing::warn!("Skipping diagram entry {}", entry);
        self.skipped.push(entry);
    }
}

#[derive(Debug)]
pub struct LoadedDiagram {
    pub store: GraphStore,
    pub report: LoadReport,
}
