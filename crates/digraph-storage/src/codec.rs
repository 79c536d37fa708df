use crate::CodecError;
use crate::document::{DiagramDocument, LinkRecord, NodeRecord};
use crate::report::{LoadReport, LoadedDiagram, Section, SkipReason};
use digraph_core::{NodeIndex, Point};
use digraph_graph::{GraphStore, Node, Placement};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputStyle {
    #[default]
    Compact,
    Pretty,
}

/// Snapshot of a store in file form. Node positions are truncated to whole
/// canvas units.
pub fn serialize(store: &GraphStore) -> DiagramDocument {
    let nodes = store
        .nodes()
        .map(|node| NodeRecord {
            index: node.index().0,
            text: node.text().to_string(),
            x: node.position().x as i64,
            y: node.position().y as i64,
        })
        .collect();

    let links = store
        .links()
        .map(|link| LinkRecord {
            from: link.from().0,
            to: link.to().0,
        })
        .collect();

    DiagramDocument { nodes, links }
}

pub fn to_json_string(store: &GraphStore, style: OutputStyle) -> Result<String, CodecError> {
    let document = serialize(store);
    match style {
        OutputStyle::Compact => serde_json::to_string(&document),
        OutputStyle::Pretty => serde_json::to_string_pretty(&document),
    }
    .map_err(CodecError::Serialize)
}

pub fn deserialize(text: &str) -> Result<LoadedDiagram, CodecError> {
    deserialize_into(text, GraphStore::new())
}

/// Loads `text` into `store`, which is expected to be empty.
///
/// All of `nodes` is processed before `links`, so links may name any node of
/// the document. The document is parsed completely before the store is
/// touched.
pub fn deserialize_into(text: &str, mut store: GraphStore) -> Result<LoadedDiagram, CodecError> {
    let value: Value = serde_json::from_str(text).map_err(CodecError::Parse)?;
    let root = match value {
        Value::Object(root) => root,
        other => return Err(CodecError::NotAnObject(json_kind(&other))),
    };

    let mut report = LoadReport::default();

    for (position, entry) in array_entries(&root, Section::Nodes).iter().enumerate() {
        let admitted = parse_node(entry)
            .and_then(|node| store.add_node(node, Placement::Explicit).map_err(Into::into));
        match admitted {
            Ok(_) => report.nodes_loaded += 1,
            Err(reason) => report.skip(Section::Nodes, position, reason),
        }
    }

    for (position, entry) in array_entries(&root, Section::Links).iter().enumerate() {
        let admitted = parse_link(entry, &store)
            .and_then(|(from, to)| store.add_link(from, to).map_err(Into::into));
        match admitted {
            Ok(_) => report.links_loaded += 1,
            Err(reason) => report.skip(Section::Links, position, reason),
        }
    }

    tracing::debug!(
        "Decoded diagram: {} node(s), {} link(s), {} skipped",
        report.nodes_loaded,
        report.links_loaded,
        report.skipped.len()
    );
    Ok(LoadedDiagram { store, report })
}

fn array_entries(root: &Map<String, Value>, section: Section) -> &[Value] {
    let key = match section {
        Section::Nodes => "nodes",
        Section::Links => "links",
    };
    match root.get(key) {
        Some(Value::Array(entries)) => entries.as_slice(),
        Some(other) => {
            tracing::warn!(
                "Ignoring `{}`: expected an array, found {}",
                key,
                json_kind(other)
            );
            &[]
        }
        None => &[],
    }
}

fn parse_node(entry: &Value) -> Result<Node, SkipReason> {
    let object = entry.as_object().ok_or(SkipReason::NotAnObject)?;
    let index = integer_field(object, "index")?;
    let text = string_field(object, "text")?;
    let x = integer_field(object, "x")?;
    let y = integer_field(object, "y")?;

    Ok(Node::new(NodeIndex(index))
        .with_text(text)
        .at(Point::new(x as f64, y as f64)))
}

fn parse_link(entry: &Value, store: &GraphStore) -> Result<(NodeIndex, NodeIndex), SkipReason> {
    let object = entry.as_object().ok_or(SkipReason::NotAnObject)?;
    let from = endpoint_field(object, "from", store)?;
    let to = endpoint_field(object, "to", store)?;
    Ok((from, to))
}

fn endpoint_field(
    object: &Map<String, Value>,
    field: &'static str,
    store: &GraphStore,
) -> Result<NodeIndex, SkipReason> {
    let index = NodeIndex(integer_field(object, field)?);
    if !store.contains_node(index) {
        return Err(SkipReason::UnknownEndpoint(index));
    }
    Ok(index)
}

/// Any JSON number, truncated towards zero.
fn integer_field(object: &Map<String, Value>, field: &'static str) -> Result<i64, SkipReason> {
    let value = object.get(field).ok_or(SkipReason::MissingField(field))?;
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|number| number as i64))
        .ok_or(SkipReason::WrongType {
            field,
            expected: "number",
        })
}

fn string_field<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, SkipReason> {
    let value = object.get(field).ok_or(SkipReason::MissingField(field))?;
    value.as_str().ok_or(SkipReason::WrongType {
        field,
        expected: "string",
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
