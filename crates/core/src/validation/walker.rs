//! Depth-first traversal of a record's fields.

use crate::config::ValidatorConfig;
use crate::error::{ErrorKind, ValidationErrors};
use crate::value::{Inspect, Record, Value};

use super::evaluator::evaluate_rule;
use super::rules::{parse_rule, Rule, KNOWN_RULES};

/// Validate `value` with the default configuration.
///
/// Returns `Ok(())` when no annotated field is violated, otherwise every
/// failure found in the whole record tree.
pub fn validate<T: Inspect + ?Sized>(value: &T) -> Result<(), ValidationErrors> {
    Validator::default().validate(value)
}

/// Validation entry point bound to a [`ValidatorConfig`].
///
/// Holds no per-call state; one instance can serve any number of calls.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Build a validator from `TAGCHECK_*` environment variables.
    pub fn from_env() -> Self {
        Self::new(ValidatorConfig::from_env())
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate one top-level value.
    ///
    /// A value that does not inspect as a record yields a single
    /// [`ErrorKind::NotAStruct`] failure with an empty field name.
    pub fn validate<T: Inspect + ?Sized>(&self, value: &T) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        match value.to_value() {
            Value::Record(record) => {
                tracing::debug!(
                    record = record.type_name(),
                    fields = record.fields().len(),
                    "Validating record"
                );
                self.walk(&record, 0, &mut errors);
            }
            other => {
                tracing::debug!(kind = other.kind_name(), "Rejecting non-record input");
                errors.push("", ErrorKind::NotAStruct);
            }
        }

        tracing::debug!(failures = errors.len(), "Validation finished");
        errors.into_result()
    }

    fn walk(&self, record: &Record<'_>, depth: usize, errors: &mut ValidationErrors) {
        for field in record.fields() {
            if field.is_record() {
                if let Value::Record(nested) = field.to_value() {
                    self.descend(field.name(), &nested, depth, errors);
                }
                continue;
            }

            let Some(tag) = field.annotation() else {
                continue;
            };

            if !field.is_exported() {
                errors.push(field.name(), ErrorKind::UnexportedFieldValidation);
                continue;
            }

            let rule = match parse_rule(tag) {
                Ok(rule) => rule,
                Err(kind) => {
                    tracing::trace!(field = field.name(), tag, "Malformed annotation");
                    errors.push(field.name(), kind);
                    continue;
                }
            };

            let value = field.to_value();
            tracing::trace!(
                field = field.name(),
                rule = rule.name(),
                kind = value.kind_name(),
                "Evaluating rule"
            );
            if let Err(kind) = self.dispatch(&rule, &value) {
                errors.push(field.name(), kind);
            }
        }
    }

    fn descend(
        &self,
        name: &str,
        nested: &Record<'_>,
        depth: usize,
        errors: &mut ValidationErrors,
    ) {
        if let Some(max_depth) = self.config.max_depth {
            if depth >= max_depth {
                tracing::warn!(
                    field = name,
                    max_depth,
                    "Nested record exceeds maximum depth"
                );
                errors.push(name, ErrorKind::DepthExceeded);
                return;
            }
        }
        self.walk(nested, depth + 1, errors);
    }

    fn dispatch(&self, rule: &Rule, value: &Value<'_>) -> Result<(), ErrorKind> {
        match rule {
            rule if self.config.strict_rules && !rule.is_known() => {
                tracing::warn!(
                    rule = rule.name(),
                    known = ?KNOWN_RULES,
                    "Rejecting unknown rule"
                );
                Err(ErrorKind::UnknownRule)
            }
            _ => evaluate_rule(rule, value),
        }
    }
}
