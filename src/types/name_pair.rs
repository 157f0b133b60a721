use super::value_type::{Element, ValueType};
use serde::{Deserialize, Serialize};

/// A (namespace URI, local name) pair as stored in a `NameList`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamePair {
    pub namespace_uri: Option<String>,
    pub name: String,
}

impl NamePair {
    pub fn new(namespace_uri: Option<&str>, name: &str) -> Self {
        Self {
            namespace_uri: namespace_uri.map(str::to_string),
            name: name.to_string(),
        }
    }
}

impl Element for NamePair {
    const LIST_NAME: &'static str = "NameList";

    fn value_type(&self) -> ValueType { ValueType::NamePair }

    fn admits(declared: ValueType) -> bool { declared == ValueType::NamePair }
}
