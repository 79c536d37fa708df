use digraph_core::{NodeIndex, Point};
use digraph_graph::{GraphStore, Node, Placement};
use digraph_storage::{OutputStyle, save_file};
use tempfile::TempDir;

/// A chain of `node_count` nodes where each node also links two steps ahead.
pub fn generate_chain_diagram(node_count: usize) -> anyhow::Result<GraphStore> {
    let mut store = GraphStore::new();
    for i in 1..=node_count as i64 {
        let node = Node::new(NodeIndex(i))
            .with_text(format!("Node {}", i))
            .at(Point::new((i % 40) as f64 * 100.0, (i / 40) as f64 * 50.0));
        store.add_node(node, Placement::Explicit)?;
    }
    for i in 1..=node_count as i64 {
        for step in [1, 2] {
            if i + step <= node_count as i64 {
                store.add_link(NodeIndex(i), NodeIndex(i + step))?;
            }
        }
    }
    Ok(store)
}

/// Writes a generated diagram into a fresh temp dir.
pub fn write_chain_diagram(node_count: usize) -> anyhow::Result<(TempDir, std::path::PathBuf)> {
    let temp_dir = tempfile::tempdir()?;
    let path = temp_dir.path().join("bench.diag");
    let store = generate_chain_diagram(node_count)?;
    save_file(&path, &store, OutputStyle::Compact)?;
    Ok((temp_dir, path))
}
