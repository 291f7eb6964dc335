//! Validator configuration.

const ENV_MAX_DEPTH: &str = "TAGCHECK_MAX_DEPTH";
const ENV_STRICT_RULES: &str = "TAGCHECK_STRICT_RULES";

/// Knobs for a [`Validator`](crate::Validator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// How many levels of nested records the walker descends into, or
    /// `None` for no limit. A nested record past this depth is reported as
    /// [`ErrorKind::DepthExceeded`](crate::ErrorKind::DepthExceeded).
    pub max_depth: Option<usize>,
    /// Report annotations with unrecognized rule names as
    /// [`ErrorKind::UnknownRule`](crate::ErrorKind::UnknownRule) instead of
    /// ignoring them.
    pub strict_rules: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            strict_rules: false,
        }
    }
}

impl ValidatorConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparseable values fall back to the defaults.
    ///
    /// | Variable                | Default   |
    /// |-------------------------|-----------|
    /// | `TAGCHECK_MAX_DEPTH`    | unlimited |
    /// | `TAGCHECK_STRICT_RULES` | `false`   |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let max_depth = match lookup(ENV_MAX_DEPTH) {
            Some(raw) => raw.trim().parse().map(Some).unwrap_or_else(|_| {
                tracing::warn!(
                    var = ENV_MAX_DEPTH,
                    value = %raw,
                    "Ignoring invalid environment value"
                );
                defaults.max_depth
            }),
            None => defaults.max_depth,
        };

        let strict_rules = match lookup(ENV_STRICT_RULES) {
            Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
                tracing::warn!(
                    var = ENV_STRICT_RULES,
                    value = %raw,
                    "Ignoring invalid environment value"
                );
                defaults.strict_rules
            }),
            None => defaults.strict_rules,
        };

        Self {
            max_depth,
            strict_rules,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
