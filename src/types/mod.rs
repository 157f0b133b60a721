//! Element types stored in typed collections.
//!
//! `ValueType` is the runtime type tag every element reports. Statically typed
//! lists (`DOMStringList`, `NameList`) can only ever hold one tag; node lists
//! are the polymorphic case and rely on the subtype walk in `NodeType`.
pub mod name_pair;
pub mod node;
pub mod value_type;

pub use name_pair::NamePair;
pub use node::{NodeRef, NodeType};
pub use value_type::{Element, ValueType};
