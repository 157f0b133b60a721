//! Invariant-enforcement substrate for the `gdom` document tree.
//!
//! Read-only collections and the parameter store that the tree hands out to
//! callers, with owner-held master keys for the writes the tree itself makes.
//! The optional `python` feature builds the `_core` extension module.

pub mod access;
pub mod collection;
pub mod config;
pub mod error;
pub mod types;

#[cfg(feature = "python")]
mod bindings {
    pub mod python;
}

pub use access::{Guarded, MasterKey};
pub use collection::{DomStringList, NameList, NodeList, Part, TypedList, Writer};
pub use config::{DomConfiguration, DomDiagnostic, DomLocator, ErrorHandler, ParamValue, Severity};
pub use error::{DomError, DomResult};
pub use types::{Element, NamePair, NodeRef, NodeType, ValueType};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Reports the crate version to the Python side.
#[cfg(feature = "python")]
#[pyfunction]
fn rust_core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Defines the `gdom._core` Python module.
#[cfg(feature = "python")]
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(rust_core_version, m)?)?;
    bindings::python::register(m)
}
