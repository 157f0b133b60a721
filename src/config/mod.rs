//! The `DOMConfiguration` parameter store.
//!
//! Parameters are looked up case-insensitively against an advertised,
//! read-only name list. Every `set` applies the full closure of implied
//! changes (aggregate groups, mutual exclusion) in one step.
pub mod diagnostics;
pub mod params;
pub mod store;

pub use diagnostics::{DomDiagnostic, DomLocator, ErrorHandler, Severity};
pub use params::ParamValue;
pub use store::DomConfiguration;
