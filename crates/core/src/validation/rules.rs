//! Annotation parsing into typed rules.

use std::collections::BTreeSet;

use crate::error::ErrorKind;

// ---------------------------------------------------------------------------
// Rule names
// ---------------------------------------------------------------------------

/// Exact character count of text, or of every text element.
pub const RULE_LENGTH: &str = "len";
/// String form must be one of a comma-separated set.
pub const RULE_MEMBERSHIP: &str = "in";
/// Lower bound on an integer or a character count.
pub const RULE_MINIMUM: &str = "min";
/// Upper bound on an integer or a character count.
pub const RULE_MAXIMUM: &str = "max";

/// All rule names the evaluator acts on.
pub const KNOWN_RULES: &[&str] = &[RULE_LENGTH, RULE_MEMBERSHIP, RULE_MINIMUM, RULE_MAXIMUM];

/// A parsed annotation with its argument already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Length(u64),
    Membership(BTreeSet<String>),
    Minimum(i64),
    Maximum(i64),
    /// A syntactically valid annotation whose name no evaluator handles.
    Unknown(String),
}

impl Rule {
    pub fn name(&self) -> &str {
        match self {
            Self::Length(_) => RULE_LENGTH,
            Self::Membership(_) => RULE_MEMBERSHIP,
            Self::Minimum(_) => RULE_MINIMUM,
            Self::Maximum(_) => RULE_MAXIMUM,
            Self::Unknown(name) => name,
        }
    }

    /// Whether the evaluator acts on this rule's name.
    pub fn is_known(&self) -> bool {
        KNOWN_RULES.contains(&self.name())
    }
}

/// Parse a `rule:argument` annotation.
///
/// The tag is split on its first `:`. Integer arguments accept an optional
/// sign; a negative length is rejected. A membership set needs at least one
/// non-blank element, but elements are otherwise kept verbatim. Unknown rule
/// names parse successfully with their argument unchecked.
pub fn parse_rule(tag: &str) -> Result<Rule, ErrorKind> {
    let (name, argument) = tag.split_once(':').ok_or(ErrorKind::InvalidSyntax)?;

    match name {
        RULE_LENGTH => {
            let length = parse_int(argument)?;
            u64::try_from(length)
                .map(Rule::Length)
                .map_err(|_| ErrorKind::InvalidSyntax)
        }
        RULE_MEMBERSHIP => parse_membership(argument).map(Rule::Membership),
        RULE_MINIMUM => parse_int(argument).map(Rule::Minimum),
        RULE_MAXIMUM => parse_int(argument).map(Rule::Maximum),
        _ => Ok(Rule::Unknown(name.to_string())),
    }
}

fn parse_int(argument: &str) -> Result<i64, ErrorKind> {
    argument.parse().map_err(|_| ErrorKind::InvalidSyntax)
}

fn parse_membership(argument: &str) -> Result<BTreeSet<String>, ErrorKind> {
    let items: BTreeSet<String> = argument.split(',').map(str::to_string).collect();
    if items.iter().all(|item| item.trim().is_empty()) {
        return Err(ErrorKind::InvalidSyntax);
    }
    Ok(items)
}
