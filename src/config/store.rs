//! The parameter table and the closure applied on every write.
use super::diagnostics::{DomDiagnostic, Severity};
use super::params::{
    aggregate, ParamValue, AGGREGATES, DATATYPE_NORMALIZATION, DEFAULTS, ERROR_HANDLER, NULL,
    VALIDATE, VALIDATE_IF_SCHEMA,
};
use crate::access::MasterKey;
use crate::collection::DomStringList;
use crate::error::{DomError, DomResult};
use serde::ser::{Serialize, Serializer};
use smallvec::SmallVec;
use std::collections::HashMap;

/// Implied writes collected by one `set` before any of them is applied.
type Closure = SmallVec<[(&'static str, ParamValue); 16]>;

/// Parameters governing parsing, serialization, validation and normalization.
#[derive(Debug)]
pub struct DomConfiguration {
    // Read-only to callers; `names_key` is never handed out.
    names: DomStringList,
    names_key: MasterKey,
    values: HashMap<String, ParamValue>,
}

impl Default for DomConfiguration {
    fn default() -> Self {
        Self::new()
    }
}

impl DomConfiguration {
    pub fn new() -> Self {
        let (names, names_key) = DomStringList::locked_strings(DEFAULTS.iter().map(|(name, _)| *name));
        let values = DEFAULTS
            .iter()
            .map(|(name, default)| {
                let value = default.map_or(ParamValue::Null, ParamValue::Bool);
                (name.to_string(), value)
            })
            .collect();
        Self { names, names_key, values }
    }

    /// The advertised parameter names, in advertised order.
    pub fn parameter_names(&self) -> &DomStringList {
        &self.names
    }

    /// True if `name` is advertised. Every advertised parameter is writable.
    pub fn can_set(&self, name: &str) -> bool {
        self.resolve(name).is_ok()
    }

    /// The stored value of `name`.
    pub fn get(&self, name: &str) -> DomResult<&ParamValue> {
        let name = self.resolve(name)?;
        self.values.get(&name).ok_or_else(|| DomError::not_found(&name))
    }

    /// The stored value of `name` read as a flag.
    pub fn get_bool(&self, name: &str) -> DomResult<bool> {
        self.get(name).map(ParamValue::is_truthy)
    }

    /// Sets `name` to `value` together with every change it implies:
    ///
    /// 1. an aggregate (`canonical-form`, `infoset`) set true forces its group;
    /// 2. `datatype-normalization` set true forces `validate` true;
    /// 3. `validate` and `validate-if-schema` set true force the other false;
    /// 4. `name` being a group member written away from its required value
    ///    forces that group's aggregate false;
    /// 5. `name` is written last.
    ///
    /// Nothing is written unless `name` is advertised.
    pub fn set(&mut self, name: &str, value: impl Into<ParamValue>) -> DomResult<()> {
        let value = value.into();
        let name = self.resolve(name)?;

        let mut closure = Closure::new();
        if value.is_truthy() {
            if let Some(agg) = aggregate(&name) {
                closure.extend(agg.group.iter().map(|&(member, required)| (member, ParamValue::Bool(required))));
            } else {
                match name.as_str() {
                    DATATYPE_NORMALIZATION => closure.push((VALIDATE, ParamValue::Bool(true))),
                    VALIDATE => closure.push((VALIDATE_IF_SCHEMA, ParamValue::Bool(false))),
                    VALIDATE_IF_SCHEMA => closure.push((VALIDATE, ParamValue::Bool(false))),
                    _ => {}
                }
            }
        }

        // A member written away from its required value breaks the aggregate,
        // whatever the aggregate held before.
        for agg in &AGGREGATES {
            let breaks = agg
                .group
                .iter()
                .any(|&(member, required)| member == name && value != ParamValue::Bool(required));
            if breaks {
                closure.push((agg.name, ParamValue::Bool(false)));
            }
        }

        for (param, forced) in closure {
            tracing::debug!(parameter = %name, implied = param, value = ?forced, "closure forced parameter");
            self.values.insert(param.to_string(), forced);
        }
        tracing::trace!(parameter = %name, value = ?value, "parameter set");
        self.values.insert(name, value);
        Ok(())
    }

    /// Advertises further parameters and assigns them through [`DomConfiguration::set`],
    /// so they take part in the same closure. Names already advertised only
    /// receive the new value.
    pub fn add_parameters<S, V>(&mut self, params: impl IntoIterator<Item = (S, V)>) -> DomResult<()>
    where
        S: AsRef<str>,
        V: Into<ParamValue>,
    {
        let params: Vec<(String, ParamValue)> = params
            .into_iter()
            .map(|(name, value)| (name.as_ref().to_lowercase(), value.into()))
            .collect();

        let mut fresh: Vec<String> = Vec::new();
        for (name, _) in &params {
            if !self.names.contains(name) && !fresh.contains(name) {
                fresh.push(name.clone());
            }
        }
        if !fresh.is_empty() {
            tracing::info!(added = ?fresh, "advertising new configuration parameters");
            self.names.unlock(&self.names_key)?.extend(fresh.iter().cloned())?;
            for name in fresh {
                self.values.insert(name, ParamValue::Null);
            }
        }

        for (name, value) in params {
            self.set(&name, value)?;
        }
        Ok(())
    }

    /// Hands `diagnostic` to the installed `error-handler`. Without one, only
    /// warnings let processing continue.
    pub fn report(&self, diagnostic: &DomDiagnostic) -> bool {
        match self.values.get(ERROR_HANDLER).and_then(ParamValue::as_handler) {
            Some(handler) => handler.handle_error(diagnostic),
            None => diagnostic.severity == Severity::Warning,
        }
    }

    /// An independent store with the same parameters and values.
    pub fn deep_copy(&self) -> Self {
        let (names, names_key) = DomStringList::locked_strings(self.names.iter().cloned());
        Self {
            names,
            names_key,
            values: self.values.clone(),
        }
    }

    /// The parameter table as a JSON object in advertised order.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    fn resolve(&self, name: &str) -> DomResult<String> {
        let folded = name.to_lowercase();
        if self.names.contains(&folded) {
            Ok(folded)
        } else {
            Err(DomError::NotFound { name: folded })
        }
    }
}

impl Serialize for DomConfiguration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.names
                .iter()
                .map(|name| (name, self.values.get(name).unwrap_or(&NULL))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ErrorHandler, ParamValue};
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn flag(config: &DomConfiguration, name: &str) -> ParamValue {
        config.get(name).unwrap().clone()
    }

    #[rstest]
    #[case("canonical-form", ParamValue::Bool(false))]
    #[case("entities", ParamValue::Bool(true))]
    #[case("infoset", ParamValue::Null)]
    #[case("error-handler", ParamValue::Null)]
    #[case("well-formed", ParamValue::Bool(true))]
    #[case("validate", ParamValue::Bool(false))]
    fn test_defaults(#[case] name: &str, #[case] expected: ParamValue) {
        assert_eq!(flag(&DomConfiguration::new(), name), expected);
    }

    #[test]
    fn test_names_are_case_insensitive() {
        let mut config = DomConfiguration::new();
        config.set("Comments", false).unwrap();
        assert_eq!(config.get("COMMENTS").unwrap(), &ParamValue::Bool(false));
        assert!(config.can_set("Well-Formed"));
    }

    #[test]
    fn test_canonical_form_forces_group_then_member_breaks_it() {
        let mut config = DomConfiguration::new();
        config.set("canonical-form", true).unwrap();
        assert_eq!(flag(&config, "entities"), ParamValue::Bool(false));
        assert_eq!(flag(&config, "namespaces"), ParamValue::Bool(true));
        assert_eq!(flag(&config, "cdata-sections"), ParamValue::Bool(false));
        assert_eq!(flag(&config, "canonical-form"), ParamValue::Bool(true));

        config.set("entities", true).unwrap();
        assert_eq!(flag(&config, "canonical-form"), ParamValue::Bool(false));
        assert_eq!(flag(&config, "entities"), ParamValue::Bool(true));
    }

    #[test]
    fn test_member_write_matching_group_keeps_aggregate() {
        let mut config = DomConfiguration::new();
        config.set("canonical-form", true).unwrap();
        config.set("namespaces", true).unwrap();
        assert_eq!(flag(&config, "canonical-form"), ParamValue::Bool(true));
    }

    #[test]
    fn test_infoset_forces_its_group() {
        let mut config = DomConfiguration::new();
        config.set("infoset", true).unwrap();
        assert_eq!(flag(&config, "validate-if-schema"), ParamValue::Bool(false));
        assert_eq!(flag(&config, "datatype-normalization"), ParamValue::Bool(false));
        assert_eq!(flag(&config, "comments"), ParamValue::Bool(true));
        assert_eq!(flag(&config, "infoset"), ParamValue::Bool(true));

        config.set("comments", false).unwrap();
        assert_eq!(flag(&config, "infoset"), ParamValue::Bool(false));
    }

    #[rstest]
    #[case("entities", ParamValue::Bool(true))]
    #[case("comments", ParamValue::Bool(false))]
    #[case("datatype-normalization", ParamValue::Bool(true))]
    fn test_breaking_member_write_turns_unset_infoset_off(#[case] member: &str, #[case] value: ParamValue) {
        let mut config = DomConfiguration::new();
        assert_eq!(flag(&config, "infoset"), ParamValue::Null);
        config.set(member, value).unwrap();
        assert_eq!(flag(&config, "infoset"), ParamValue::Bool(false));
    }

    #[test]
    fn test_matching_member_write_leaves_unset_infoset_alone() {
        let mut config = DomConfiguration::new();
        config.set("comments", true).unwrap();
        config.set("schema-location", "book.xsd").unwrap();
        assert_eq!(flag(&config, "infoset"), ParamValue::Null);
    }

    #[test]
    fn test_datatype_normalization_implies_validate_and_breaks_infoset() {
        let mut config = DomConfiguration::new();
        config.set("infoset", true).unwrap();
        config.set("datatype-normalization", true).unwrap();
        assert_eq!(flag(&config, "validate"), ParamValue::Bool(true));
        assert_eq!(flag(&config, "infoset"), ParamValue::Bool(false));
    }

    #[test]
    fn test_validate_modes_are_exclusive() {
        let mut config = DomConfiguration::new();
        config.set("validate", true).unwrap();
        assert_eq!(flag(&config, "validate-if-schema"), ParamValue::Bool(false));

        config.set("validate-if-schema", true).unwrap();
        assert_eq!(flag(&config, "validate"), ParamValue::Bool(false));
        assert_eq!(flag(&config, "validate-if-schema"), ParamValue::Bool(true));

        // Turning one off implies nothing about the other.
        config.set("validate-if-schema", false).unwrap();
        assert_eq!(flag(&config, "validate"), ParamValue::Bool(false));
    }

    #[test]
    fn test_unknown_parameter_is_not_found_and_changes_nothing() {
        let mut config = DomConfiguration::new();
        let before = config.to_json().unwrap();

        let err = config.set("bogus-param", true).unwrap_err();
        assert_eq!(err, DomError::NotFound { name: "bogus-param".into() });
        assert!(config.get("Bogus-Param").is_err());
        assert!(!config.can_set("bogus-param"));
        assert_eq!(config.to_json().unwrap(), before);
    }

    #[test]
    fn test_parameter_names_are_read_only_to_callers() {
        let config = DomConfiguration::new();
        let names = config.parameter_names();
        assert!(names.is_read_only());
        assert_eq!(names.len(), 18);
        assert_eq!(names.item(0).map(String::as_str), Some("canonical-form"));

        let (mut copy, _) = names.copy();
        assert!(copy.append("bogus-param".into()).is_err());
    }

    #[test]
    fn test_added_parameters_join_the_closure() {
        let mut config = DomConfiguration::new();
        config.set("canonical-form", true).unwrap();
        config
            .add_parameters(vec![("Pretty-Print", ParamValue::Bool(true)), ("entities", ParamValue::Bool(true))])
            .unwrap();

        assert!(config.can_set("pretty-print"));
        assert_eq!(config.parameter_names().len(), 19);
        assert_eq!(config.parameter_names().index_of(&"pretty-print".to_string()), Some(18));
        assert!(config.parameter_names().is_read_only());
        assert_eq!(flag(&config, "pretty-print"), ParamValue::Bool(true));
        // Re-defaulting an existing member runs through `set` and breaks the aggregate.
        assert_eq!(flag(&config, "canonical-form"), ParamValue::Bool(false));
    }

    #[test]
    fn test_report_without_handler_continues_only_on_warnings() {
        let config = DomConfiguration::new();
        assert!(config.report(&DomDiagnostic::new(Severity::Warning, "w", "minor")));
        assert!(!config.report(&DomDiagnostic::new(Severity::Error, "e", "major")));
    }

    #[test]
    fn test_report_goes_to_installed_handler() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        let handler: Arc<dyn ErrorHandler> = Arc::new(move |d: &DomDiagnostic| {
            counter.fetch_add(1, Ordering::SeqCst);
            d.severity != Severity::FatalError
        });

        let mut config = DomConfiguration::new();
        config.set("error-handler", handler).unwrap();
        assert!(config.report(&DomDiagnostic::new(Severity::Error, "e", "recoverable")));
        assert!(!config.report(&DomDiagnostic::new(Severity::FatalError, "f", "fatal")));
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_deep_copy_is_independent() {
        let mut config = DomConfiguration::new();
        config.add_parameters(vec![("pretty-print", false)]).unwrap();
        let copy = config.deep_copy();

        config.set("comments", false).unwrap();
        assert_eq!(flag(&copy, "comments"), ParamValue::Bool(true));
        assert!(copy.can_set("pretty-print"));
        assert!(copy.parameter_names().is_read_only());
    }

    #[test]
    fn test_json_snapshot_in_advertised_order() {
        let mut config = DomConfiguration::new();
        config.set("schema-location", "http://example.com/book.xsd").unwrap();
        let json = config.to_json().unwrap();
        assert!(json.starts_with("{\"canonical-form\":false,\"cdata-sections\":true"), "Got: {}", json);
        assert!(json.contains("\"schema-location\":\"http://example.com/book.xsd\""));
        assert!(json.contains("\"infoset\":null"));
    }
}
