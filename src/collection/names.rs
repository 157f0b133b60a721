//! The list types the tree exposes: strings, name pairs and nodes.
use super::list::{Part, TypedList};
use crate::access::MasterKey;
use crate::error::DomResult;
use crate::types::{NamePair, NodeRef, ValueType};

pub type DomStringList = TypedList<String>;
pub type NameList = TypedList<NamePair>;
pub type NodeList = TypedList<NodeRef>;

impl TypedList<String> {
    /// Builds a string list; the element type is known, so an empty input is fine.
    pub fn from_strings<I, S>(items: I, read_only: bool) -> DomResult<(Self, Option<MasterKey>)>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let parts = items.into_iter().map(|s| Part::One(s.into()));
        Self::create(parts, Some(ValueType::DomString), read_only)
    }

    /// A read-only string list together with its key.
    pub fn locked_strings<I, S>(items: I) -> (Self, MasterKey)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::locked_static(ValueType::DomString, items.into_iter().map(Into::into).collect())
    }
}

impl TypedList<NamePair> {
    pub fn from_pairs(
        items: impl IntoIterator<Item = NamePair>,
        read_only: bool,
    ) -> DomResult<(Self, Option<MasterKey>)> {
        Self::create(items.into_iter().map(Part::One), Some(ValueType::NamePair), read_only)
    }

    /// Local name at `index`.
    pub fn get_name(&self, index: isize) -> Option<&str> {
        self.item(index).map(|pair| pair.name.as_str())
    }

    /// Namespace URI at `index`; `None` both out of range and for a pair
    /// without a namespace.
    pub fn get_namespace_uri(&self, index: isize) -> Option<&str> {
        self.item(index).and_then(|pair| pair.namespace_uri.as_deref())
    }

    /// Membership by local name alone, whatever the namespace.
    pub fn contains_name(&self, name: &str) -> bool {
        self.iter().any(|pair| pair.name == name)
    }

    pub fn contains_ns(&self, namespace_uri: Option<&str>, name: &str) -> bool {
        self.iter()
            .any(|pair| pair.name == name && pair.namespace_uri.as_deref() == namespace_uri)
    }
}
