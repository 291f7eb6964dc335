//! Failure reasons and the aggregated validation report.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a single field failed validation.
///
/// The set is closed: every failure the engine records carries one of these.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error,
)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    #[error("wrong argument given, should be a struct")]
    NotAStruct,

    #[error("invalid validator syntax")]
    InvalidSyntax,

    #[error("validation for unexported field is not allowed")]
    UnexportedFieldValidation,

    #[error("len validation failed")]
    LengthFailed,

    #[error("in validation failed")]
    MembershipFailed,

    #[error("min validation failed")]
    MinimumFailed,

    #[error("max validation failed")]
    MaximumFailed,

    #[error("not supported type")]
    UnsupportedType,

    /// Only produced when strict rule names are enabled.
    #[error("unknown validator rule")]
    UnknownRule,

    #[error("maximum nesting depth exceeded")]
    DepthExceeded,
}

impl ErrorKind {
    /// Stable machine-readable code, matching the serialized form.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotAStruct => "not_a_struct",
            Self::InvalidSyntax => "invalid_syntax",
            Self::UnexportedFieldValidation => "unexported_field_validation",
            Self::LengthFailed => "length_failed",
            Self::MembershipFailed => "membership_failed",
            Self::MinimumFailed => "minimum_failed",
            Self::MaximumFailed => "maximum_failed",
            Self::UnsupportedType => "unsupported_type",
            Self::UnknownRule => "unknown_rule",
            Self::DepthExceeded => "depth_exceeded",
        }
    }
}

/// A single failure attributed to a field by name.
///
/// Renders as `field: reason`. The reason is exposed as the error source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{field}: {kind}")]
pub struct FieldError {
    field: String,
    #[source]
    kind: ErrorKind,
}

impl FieldError {
    pub fn new(field: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    /// Name of the offending field. Empty for [`ErrorKind::NotAStruct`].
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

// ---------------------------------------------------------------------------
// ValidationErrors
// ---------------------------------------------------------------------------

/// Every failure found during one validation call, in traversal order.
///
/// An empty collection never escapes the engine: [`ValidationErrors::into_result`]
/// turns it into `Ok(())`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a failure for `field`.
    pub fn push(&mut self, field: impl Into<String>, kind: ErrorKind) {
        self.errors.push(FieldError::new(field, kind));
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// Whether any recorded failure has the given reason.
    pub fn contains(&self, kind: ErrorKind) -> bool {
        self.errors.iter().any(|e| e.kind == kind)
    }

    /// All failures attributed to `field`.
    pub fn field_errors<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> {
        self.errors.iter().filter(move |e| e.field == field)
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.errors
    }

    /// `Ok(())` when nothing was recorded, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_error_renders_name_and_reason() {
        let err = FieldError::new("Age", ErrorKind::MinimumFailed);
        assert_eq!(err.to_string(), "Age: min validation failed");
    }

    #[test]
    fn field_error_exposes_reason_as_source() {
        use std::error::Error;

        let err = FieldError::new("code", ErrorKind::UnexportedFieldValidation);
        let source = err.source().expect("reason should be the source");
        assert_eq!(
            source.to_string(),
            "validation for unexported field is not allowed"
        );
    }

    #[test]
    fn not_a_struct_renders_with_empty_field() {
        let err = FieldError::new("", ErrorKind::NotAStruct);
        assert_eq!(err.to_string(), ": wrong argument given, should be a struct");
    }

    #[test]
    fn empty_collection_is_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn display_joins_failures_with_newlines() {
        let mut errors = ValidationErrors::new();
        errors.push("Name", ErrorKind::LengthFailed);
        errors.push("Role", ErrorKind::MembershipFailed);

        let err = errors.into_result().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Name: len validation failed\nRole: in validation failed"
        );
    }

    #[test]
    fn contains_finds_any_recorded_reason() {
        let mut errors = ValidationErrors::new();
        errors.push("a", ErrorKind::LengthFailed);
        errors.push("b", ErrorKind::MaximumFailed);

        assert!(errors.contains(ErrorKind::LengthFailed));
        assert!(errors.contains(ErrorKind::MaximumFailed));
        assert!(!errors.contains(ErrorKind::MinimumFailed));
    }

    #[test]
    fn field_errors_filters_by_name() {
        let mut errors = ValidationErrors::new();
        errors.push("a", ErrorKind::LengthFailed);
        errors.push("b", ErrorKind::MaximumFailed);
        errors.push("a", ErrorKind::InvalidSyntax);

        let kinds: Vec<ErrorKind> = errors.field_errors("a").map(FieldError::kind).collect();
        assert_eq!(kinds, vec![ErrorKind::LengthFailed, ErrorKind::InvalidSyntax]);
    }

    #[test]
    fn code_matches_serialized_form() {
        for kind in [
            ErrorKind::NotAStruct,
            ErrorKind::InvalidSyntax,
            ErrorKind::UnexportedFieldValidation,
            ErrorKind::LengthFailed,
            ErrorKind::MembershipFailed,
            ErrorKind::MinimumFailed,
            ErrorKind::MaximumFailed,
            ErrorKind::UnsupportedType,
            ErrorKind::UnknownRule,
            ErrorKind::DepthExceeded,
        ] {
            let json = serde_json::to_value(kind).expect("serialization should succeed");
            assert_eq!(json, serde_json::Value::String(kind.code().to_string()));
        }
    }

    #[test]
    fn report_serializes_as_array_of_field_errors() {
        let mut errors = ValidationErrors::new();
        errors.push("Age", ErrorKind::MinimumFailed);

        let json = serde_json::to_value(&errors).expect("serialization should succeed");
        assert_eq!(
            json,
            serde_json::json!([{ "field": "Age", "kind": "minimum_failed" }])
        );
    }
}
