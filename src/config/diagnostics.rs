//! Diagnostics delivered to the handler installed under `error-handler`.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Warning = 1,
    Error = 2,
    FatalError = 3,
}

/// Where in the source document a diagnostic was raised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomLocator {
    pub line_number: Option<u32>,
    pub column_number: Option<u32>,
    pub byte_offset: Option<u64>,
    pub uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomDiagnostic {
    pub severity: Severity,
    /// Short machine-readable tag, e.g. `"cdata-sections-splitted"`.
    pub kind: String,
    pub message: String,
    pub location: Option<DomLocator>,
}

impl DomDiagnostic {
    pub fn new(severity: Severity, kind: &str, message: &str) -> Self {
        Self {
            severity,
            kind: kind.to_string(),
            message: message.to_string(),
            location: None,
        }
    }

    pub fn at(mut self, location: DomLocator) -> Self {
        self.location = Some(location);
        self
    }
}

/// Receives diagnostics while a document is processed.
///
/// Returning `false` asks the processor to stop.
pub trait ErrorHandler: Send + Sync {
    fn handle_error(&self, diagnostic: &DomDiagnostic) -> bool;
}

impl<F> ErrorHandler for F
where
    F: Fn(&DomDiagnostic) -> bool + Send + Sync,
{
    fn handle_error(&self, diagnostic: &DomDiagnostic) -> bool {
        self(diagnostic)
    }
}
