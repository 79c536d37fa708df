use crate::CodecError;
use crate::codec::{OutputStyle, deserialize_into, to_json_string};
use crate::report::LoadedDiagram;
use digraph_graph::GraphStore;
use std::fs;
use std::path::Path;

pub const DIAGRAM_EXTENSION: &str = "diag";

pub fn has_diagram_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(DIAGRAM_EXTENSION))
}

pub fn load_file(path: impl AsRef<Path>) -> Result<LoadedDiagram, CodecError> {
    load_file_into(path, GraphStore::new())
}

/// Reads the whole file, then decodes it into `store`.
pub fn load_file_into(
    path: impl AsRef<Path>,
    store: GraphStore,
) -> Result<LoadedDiagram, CodecError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| CodecError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let loaded = deserialize_into(&content, store)?;
    tracing::info!(
        "Loaded {:?}: {} node(s), {} link(s), {} entries skipped",
        path,
        loaded.report.nodes_loaded,
        loaded.report.links_loaded,
        loaded.report.skipped.len()
    );
    Ok(loaded)
}

/// Encodes the store fully before opening the file, so an encoding failure
/// never truncates an existing diagram.
pub fn save_file(
    path: impl AsRef<Path>,
    store: &GraphStore,
    style: OutputStyle,
) -> Result<(), CodecError> {
    let path = path.as_ref();
    let mut content = to_json_string(store, style)?;
    content.push('\n');

    fs::write(path, content).map_err(|source| CodecError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        "Saved {:?}: {} node(s), {} link(s)",
        path,
        store.node_count(),
        store.link_count()
    );
    Ok(())
}
