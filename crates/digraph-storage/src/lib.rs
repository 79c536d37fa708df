//! Diagram codec: the `.diag` JSON format and its file I/O.
//!
//! Loading is lenient per entry (bad node or link entries are skipped and
//! reported) but strict about the document itself: invalid JSON or a
//! non-object top level fails the whole load.

use std::path::PathBuf;
use thiserror::Error;

mod codec;
mod document;
mod file;
mod report;

pub use codec::{OutputStyle, deserialize, deserialize_into, serialize, to_json_string};
pub use document::{DiagramDocument, LinkRecord, NodeRecord};
pub use file::{DIAGRAM_EXTENSION, has_diagram_extension, load_file, load_file_into, save_file};
pub use report::{LoadReport, LoadedDiagram, Section, SkipReason, SkippedEntry};

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Failed to parse diagram JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("Diagram document must be a JSON object, found {0}")]
    NotAnObject(&'static str),
    #[error("Failed to serialize diagram: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests;
