//! Homogeneous typed collections and their standard specialisations.
pub mod list;
pub mod names;

pub use list::{Part, TypedList, Writer};
pub use names::{DomStringList, NameList, NodeList};
