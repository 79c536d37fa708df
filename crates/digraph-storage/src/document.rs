use serde::{Deserialize, Serialize};

/// On-disk shape of a node. Colors are not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub index: i64,
    pub text: String,
    pub x: i64,
    pub y: i64,
}

/// On-disk shape of a link: endpoint indices, not object identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub from: i64,
    pub to: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramDocument {
    pub nodes: Vec<NodeRecord>,
    pub links: Vec<LinkRecord>,
}
