use super::node::NodeType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The runtime type of a collection element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    DomString,
    NamePair,
    Node(NodeType),
}

impl ValueType {
    /// True if a value of type `self` may be stored where `declared` is
    /// required: the same type, or a subtype of it.
    pub fn conforms_to(self, declared: ValueType) -> bool {
        match (self, declared) {
            (ValueType::Node(actual), ValueType::Node(required)) => actual.is_a(required),
            (actual, required) => actual == required,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::DomString => f.write_str("DOMString"),
            ValueType::NamePair => f.write_str("NamePair"),
            ValueType::Node(node_type) => fmt::Display::fmt(node_type, f),
        }
    }
}

/// A value that can live in a `TypedList`.
pub trait Element: Clone + PartialEq + fmt::Debug {
    /// Interface name of the list specialised to this element.
    const LIST_NAME: &'static str;

    fn value_type(&self) -> ValueType;

    /// True if elements of this Rust type can ever conform to `declared`.
    fn admits(declared: ValueType) -> bool;

    /// A copy sharing nothing with `self`. Owned values are already
    /// independent, so the default is a plain clone.
    fn deep_clone(&self) -> Self {
        self.clone()
    }
}

impl Element for String {
    const LIST_NAME: &'static str = "DOMStringList";

    fn value_type(&self) -> ValueType { ValueType::DomString }

    fn admits(declared: ValueType) -> bool { declared == ValueType::DomString }
}
