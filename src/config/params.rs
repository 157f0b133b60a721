//! Parameter values, the default table, and the aggregate dependency groups.
use super::diagnostics::ErrorHandler;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// The value of one configuration parameter.
#[derive(Clone)]
pub enum ParamValue {
    Null,
    Bool(bool),
    /// Schema locators and schema type URIs.
    Text(String),
    Handler(Arc<dyn ErrorHandler>),
}

impl ParamValue {
    /// Whether the value counts as "on" when triggering implied changes.
    pub fn is_truthy(&self) -> bool {
        match self {
            ParamValue::Null => false,
            ParamValue::Bool(b) => *b,
            ParamValue::Text(s) => !s.is_empty(),
            ParamValue::Handler(_) => true,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_handler(&self) -> Option<&Arc<dyn ErrorHandler>> {
        match self {
            ParamValue::Handler(h) => Some(h),
            _ => None,
        }
    }
}

impl PartialEq for ParamValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ParamValue::Null, ParamValue::Null) => true,
            (ParamValue::Bool(a), ParamValue::Bool(b)) => a == b,
            (ParamValue::Text(a), ParamValue::Text(b)) => a == b,
            (ParamValue::Handler(a), ParamValue::Handler(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Null => f.write_str("Null"),
            ParamValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            ParamValue::Text(s) => f.debug_tuple("Text").field(s).finish(),
            ParamValue::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParamValue::Null => serializer.serialize_none(),
            ParamValue::Bool(b) => serializer.serialize_bool(*b),
            ParamValue::Text(s) => serializer.serialize_str(s),
            // Handlers are code, not data.
            ParamValue::Handler(_) => serializer.serialize_str("[error-handler]"),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self { ParamValue::Bool(b) }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self { ParamValue::Text(s.to_string()) }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self { ParamValue::Text(s) }
}

impl From<Arc<dyn ErrorHandler>> for ParamValue {
    fn from(h: Arc<dyn ErrorHandler>) -> Self { ParamValue::Handler(h) }
}

pub(crate) static NULL: ParamValue = ParamValue::Null;

pub(crate) const CANONICAL_FORM: &str = "canonical-form";
pub(crate) const INFOSET: &str = "infoset";
pub(crate) const DATATYPE_NORMALIZATION: &str = "datatype-normalization";
pub(crate) const VALIDATE: &str = "validate";
pub(crate) const VALIDATE_IF_SCHEMA: &str = "validate-if-schema";
pub(crate) const ERROR_HANDLER: &str = "error-handler";

/// Built-in parameters in advertised order. `None` is a null default.
pub(crate) const DEFAULTS: &[(&str, Option<bool>)] = &[
    (CANONICAL_FORM, Some(false)),
    ("cdata-sections", Some(true)),
    ("check-character-normalization", Some(false)),
    ("comments", Some(true)),
    (DATATYPE_NORMALIZATION, Some(false)),
    ("element-content-whitespace", Some(true)),
    ("entities", Some(true)),
    (ERROR_HANDLER, None),
    (INFOSET, None),
    ("namespaces", Some(true)),
    ("namespace-declarations", Some(true)),
    ("normalize-characters", Some(false)),
    ("schema-location", None),
    ("schema-type", None),
    ("split-cdata-sections", Some(true)),
    (VALIDATE, Some(false)),
    (VALIDATE_IF_SCHEMA, Some(false)),
    ("well-formed", Some(true)),
];

/// A flag that is true only while every member of its group holds the
/// required value.
pub(crate) struct Aggregate {
    pub name: &'static str,
    pub group: &'static [(&'static str, bool)],
}

pub(crate) static AGGREGATES: [Aggregate; 2] = [
    Aggregate {
        name: CANONICAL_FORM,
        group: &[
            ("entities", false),
            ("normalize-characters", false),
            ("cdata-sections", false),
            ("namespaces", true),
            ("namespace-declarations", true),
            ("well-formed", true),
            ("element-content-whitespace", true),
        ],
    },
    Aggregate {
        name: INFOSET,
        group: &[
            (VALIDATE_IF_SCHEMA, false),
            ("entities", false),
            (DATATYPE_NORMALIZATION, false),
            ("cdata-sections", false),
            ("namespace-declarations", true),
            ("well-formed", true),
            ("element-content-whitespace", true),
            ("comments", true),
            ("namespaces", true),
        ],
    },
];

pub(crate) fn aggregate(name: &str) -> Option<&'static Aggregate> {
    AGGREGATES.iter().find(|a| a.name == name)
}
