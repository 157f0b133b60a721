//! The boundary with the tree-node hierarchy.
//!
//! Nodes themselves live outside this crate; lists of nodes only need a
//! stable identity and the node's interface type.
use super::value_type::{Element, ValueType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Node interfaces, each with at most one direct supertype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    Node,
    Document,
    Element,
    Attr,
    CharacterData,
    Text,
    CdataSection,
    Comment,
    ProcessingInstruction,
}

impl NodeType {
    pub fn supertype(self) -> Option<NodeType> {
        match self {
            NodeType::Node => None,
            NodeType::Text | NodeType::Comment => Some(NodeType::CharacterData),
            NodeType::CdataSection => Some(NodeType::Text),
            NodeType::Document
            | NodeType::Element
            | NodeType::Attr
            | NodeType::CharacterData
            | NodeType::ProcessingInstruction => Some(NodeType::Node),
        }
    }

    /// Walks the supertype chain looking for `other`.
    pub fn is_a(self, other: NodeType) -> bool {
        let mut current = Some(self);
        while let Some(t) = current {
            if t == other {
                return true;
            }
            current = t.supertype();
        }
        false
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeType::Node => "Node",
            NodeType::Document => "Document",
            NodeType::Element => "Element",
            NodeType::Attr => "Attr",
            NodeType::CharacterData => "CharacterData",
            NodeType::Text => "Text",
            NodeType::CdataSection => "CDATASection",
            NodeType::Comment => "Comment",
            NodeType::ProcessingInstruction => "ProcessingInstruction",
        };
        f.write_str(name)
    }
}

/// A handle to a node owned by the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeRef {
    pub id: u64,
    pub node_type: NodeType,
}

impl NodeRef {
    pub fn new(id: u64, node_type: NodeType) -> Self {
        Self { id, node_type }
    }
}

impl Element for NodeRef {
    const LIST_NAME: &'static str = "NodeList";

    fn value_type(&self) -> ValueType { ValueType::Node(self.node_type) }

    // Any node interface may be declared; the subtype walk does the rest.
    fn admits(declared: ValueType) -> bool { matches!(declared, ValueType::Node(_)) }
}
