use super::*;
use digraph_core::{Color, NodeIndex, Point};
use digraph_graph::{GraphStore, Node, NodeColors, Placement};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn sample_store() -> GraphStore {
    let mut store = GraphStore::new();
    for (index, text, x, y) in [(1, "A", 10.0, 20.0), (2, "B", 110.0, 20.0), (5, "C", -30.5, 7.9)] {
        store
            .add_node(
                Node::new(NodeIndex(index))
                    .with_text(text)
                    .at(Point::new(x, y)),
                Placement::Explicit,
            )
            .unwrap();
    }
    store.add_link(NodeIndex(1), NodeIndex(2)).unwrap();
    store.add_link(NodeIndex(5), NodeIndex(1)).unwrap();
    store
}

fn link_pairs(store: &GraphStore) -> BTreeSet<(i64, i64)> {
    store
        .links()
        .map(|link| (link.from().0, link.to().0))
        .collect()
}

#[test]
fn test_serialize_shape() {
    let document = serialize(&sample_store());

    assert_eq!(
        document.nodes,
        vec![
            NodeRecord {
                index: 1,
                text: "A".to_string(),
                x: 10,
                y: 20
            },
            NodeRecord {
                index: 2,
                text: "B".to_string(),
                x: 110,
                y: 20
            },
            NodeRecord {
                index: 5,
                text: "C".to_string(),
                x: -30,
                y: 7
            },
        ]
    );
    assert_eq!(
        document.links,
        vec![LinkRecord { from: 1, to: 2 }, LinkRecord { from: 5, to: 1 }]
    );
}

#[test]
fn test_json_has_only_documented_keys() -> Result<(), CodecError> {
    let json = to_json_string(&sample_store(), OutputStyle::Compact)?;
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let root = value.as_object().unwrap();
    assert_eq!(root.len(), 2);
    let node = root["nodes"][0].as_object().unwrap();
    let mut keys: Vec<&str> = node.keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(keys, vec!["index", "text", "x", "y"]);
    assert_eq!(root["links"][0], serde_json::json!({"from": 1, "to": 2}));
    Ok(())
}

#[test]
fn test_round_trip_drops_colors_only() -> Result<(), CodecError> {
    let mut store = sample_store();
    store.node_mut(NodeIndex(1)).unwrap().set_colors(NodeColors {
        text: Color::BLACK,
        outline: Color::BLACK,
        background: Color::BLACK,
    });

    let json = to_json_string(&store, OutputStyle::Pretty)?;
    let loaded = deserialize(&json)?;

    assert!(loaded.report.is_clean());
    assert_eq!(serialize(&loaded.store), serialize(&store));
    assert_eq!(
        loaded.store.node(NodeIndex(1)).unwrap().colors(),
        NodeColors::default()
    );
    Ok(())
}

#[test]
fn test_partial_node_failure_is_not_fatal() -> Result<(), CodecError> {
    let loaded = deserialize(
        r#"{"nodes": [{"index":1,"text":"A","x":0,"y":0}, {"index":2,"text":"B"}]}"#,
    )?;

    assert_eq!(loaded.store.node_count(), 1);
    assert!(loaded.store.contains_node(NodeIndex(1)));
    assert_eq!(loaded.report.nodes_loaded, 1);
    assert_eq!(
        loaded.report.skipped,
        vec![SkippedEntry {
            section: Section::Nodes,
            position: 1,
            reason: SkipReason::MissingField("x"),
        }]
    );
    Ok(())
}

#[test]
fn test_dangling_link_is_skipped() -> Result<(), CodecError> {
    let loaded = deserialize(
        r#"{"nodes": [{"index":1,"text":"A","x":0,"y":0}], "links": [{"from":1,"to":99}]}"#,
    )?;

    assert_eq!(loaded.store.link_count(), 0);
    assert_eq!(
        loaded.report.skipped_in(Section::Links).next().unwrap().reason,
        SkipReason::UnknownEndpoint(NodeIndex(99))
    );
    Ok(())
}

#[test]
fn test_links_may_reference_nodes_listed_later() -> Result<(), CodecError> {
    let loaded = deserialize(
        r#"{
            "links": [{"from": 2, "to": 1}],
            "nodes": [
                {"index": 1, "text": "A", "x": 0, "y": 0},
                {"index": 2, "text": "B", "x": 5, "y": 5}
            ]
        }"#,
    )?;

    assert_eq!(link_pairs(&loaded.store), BTreeSet::from([(2, 1)]));
    Ok(())
}

#[test]
fn test_field_type_validation() -> Result<(), CodecError> {
    let loaded = deserialize(
        r#"{"nodes": [
            {"index": "1", "text": "A", "x": 0, "y": 0},
            {"index": 2, "text": 7, "x": 0, "y": 0},
            {"index": 3, "text": "C", "x": null, "y": 0},
            42,
            {"index": 4.9, "text": "D", "x": 1.5, "y": -2.5}
        ],
        "links": [{"from": "4", "to": 4}, {"from": 4, "to": 4}, []]}"#,
    )?;

    let reasons: Vec<SkipReason> = loaded
        .report
        .skipped
        .iter()
        .map(|entry| entry.reason.clone())
        .collect();
    assert_eq!(
        reasons,
        vec![
            SkipReason::WrongType {
                field: "index",
                expected: "number"
            },
            SkipReason::WrongType {
                field: "text",
                expected: "string"
            },
            SkipReason::WrongType {
                field: "x",
                expected: "number"
            },
            SkipReason::NotAnObject,
            SkipReason::WrongType {
                field: "from",
                expected: "number"
            },
            SkipReason::SelfLink(NodeIndex(4)),
            SkipReason::NotAnObject,
        ]
    );

    let node = loaded.store.node(NodeIndex(4)).unwrap();
    assert_eq!(node.position(), Point::new(1.0, -2.0));
    Ok(())
}

#[test]
fn test_duplicate_index_keeps_first_entry() -> Result<(), CodecError> {
    let loaded = deserialize(
        r#"{"nodes": [
            {"index": 1, "text": "first", "x": 0, "y": 0},
            {"index": 1, "text": "second", "x": 9, "y": 9}
        ]}"#,
    )?;

    assert_eq!(loaded.store.node(NodeIndex(1)).unwrap().text(), "first");
    assert_eq!(
        loaded.report.skipped[0].reason,
        SkipReason::DuplicateIndex(NodeIndex(1))
    );
    Ok(())
}

#[test]
fn test_missing_or_malformed_sections_mean_empty() -> Result<(), CodecError> {
    for text in [r#"{}"#, r#"{"nodes": {}, "links": 3}"#, r#"{"nodes": []}"#] {
        let loaded = deserialize(text)?;
        assert!(loaded.store.is_empty());
        assert!(loaded.report.is_clean());
    }
    Ok(())
}

#[test]
fn test_next_index_after_explicit_load() -> Result<(), CodecError> {
    let loaded = deserialize(
        r#"{"nodes": [
            {"index": 1, "text": "", "x": 0, "y": 0},
            {"index": 7, "text": "", "x": 0, "y": 0},
            {"index": 3, "text": "", "x": 0, "y": 0}
        ]}"#,
    )?;
    assert_eq!(loaded.store.next_index(), NodeIndex(8));
    Ok(())
}

#[test]
fn test_syntax_errors_are_fatal() {
    assert!(matches!(
        deserialize(r#"{"nodes": [}"#),
        Err(CodecError::Parse(_))
    ));
    assert!(matches!(deserialize(""), Err(CodecError::Parse(_))));
    assert!(matches!(
        deserialize("[1, 2]"),
        Err(CodecError::NotAnObject("an array"))
    ));
}

#[test]
fn test_deserialize_into_keeps_store_layout() -> Result<(), CodecError> {
    let layout = digraph_graph::GridLayout {
        columns: 2,
        ..Default::default()
    };
    let loaded = deserialize_into(
        r#"{"nodes": [{"index": 1, "text": "A", "x": 0, "y": 0}]}"#,
        GraphStore::with_layout(layout),
    )?;
    assert_eq!(loaded.store.layout().columns, 2);
    Ok(())
}

#[test]
fn test_file_round_trip() -> Result<(), CodecError> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.diag");
    let store = sample_store();

    save_file(&path, &store, OutputStyle::Compact)?;
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.ends_with('\n'));

    let loaded = load_file(&path)?;
    assert_eq!(serialize(&loaded.store), serialize(&store));
    assert!(has_diagram_extension(&path));
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.diag");
    match load_file(&path) {
        Err(CodecError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("Expected Io error, got {:?}", other.map(|l| l.report)),
    }
}

#[test]
fn test_save_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("out.diag");
    let result = save_file(&path, &sample_store(), OutputStyle::Pretty);
    assert!(matches!(result, Err(CodecError::Io { .. })));
}

#[test]
fn test_large_coordinates_survive_round_trip() -> Result<(), CodecError> {
    let json = r#"{"nodes":[{"index":1,"text":"far","x":16777217,"y":100000001}],"links":[]}"#;
    let loaded = deserialize(json)?;
    let record = &serialize(&loaded.store).nodes[0];
    assert_eq!((record.x, record.y), (16_777_217, 100_000_001));
    Ok(())
}

// Whole numbers in this range survive the trip through `f64` exactly.
const COORDINATE_RANGE: std::ops::Range<i64> = -(1 << 40)..(1 << 40);

fn store_strategy() -> impl Strategy<Value = GraphStore> {
    let nodes = proptest::collection::btree_map(
        1i64..500,
        ("[a-zA-Z0-9 ]{0,12}", COORDINATE_RANGE, COORDINATE_RANGE),
        1..20,
    );
    nodes
        .prop_flat_map(|nodes| {
            let indices: Vec<i64> = nodes.keys().copied().collect();
            let pair = (
                proptest::sample::select(indices.clone()),
                proptest::sample::select(indices),
            );
            (Just(nodes), proptest::collection::vec(pair, 0..25))
        })
        .prop_map(|(nodes, pairs)| {
            let mut store = GraphStore::new();
            for (index, (text, x, y)) in nodes {
                let node = Node::new(NodeIndex(index))
                    .with_text(text)
                    .at(Point::new(x as f64, y as f64));
                store.add_node(node, Placement::Explicit).unwrap();
            }
            for (from, to) in pairs {
                if from != to {
                    store.add_link(NodeIndex(from), NodeIndex(to)).unwrap();
                }
            }
            store
        })
}

proptest! {
    #[test]
    fn prop_round_trip_preserves_nodes_and_link_pairs(store in store_strategy()) {
        let json = to_json_string(&store, OutputStyle::Compact).unwrap();
        let loaded = deserialize(&json).unwrap();

        prop_assert!(loaded.report.is_clean());
        prop_assert_eq!(serialize(&loaded.store).nodes, serialize(&store).nodes);
        prop_assert_eq!(link_pairs(&loaded.store), link_pairs(&store));
        prop_assert_eq!(loaded.store.link_count(), store.link_count());
    }
}
