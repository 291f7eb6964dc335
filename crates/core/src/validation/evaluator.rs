//! Pure rule checks over an inspected field value.

use std::borrow::Cow;
use std::collections::BTreeSet;

use crate::error::ErrorKind;
use crate::value::Value;

use super::rules::Rule;

/// Evaluate a known rule against a value.
///
/// Returns `Ok(())` for [`Rule::Unknown`]; deciding whether unknown names
/// are acceptable is the caller's job.
pub fn evaluate_rule(rule: &Rule, value: &Value<'_>) -> Result<(), ErrorKind> {
    match rule {
        Rule::Length(expected) => check_length(value, *expected),
        Rule::Membership(allowed) => check_membership(value, allowed),
        Rule::Minimum(bound) => check_min(value, *bound),
        Rule::Maximum(bound) => check_max(value, *bound),
        Rule::Unknown(_) => Ok(()),
    }
}

/// Text must have exactly `expected` characters; for a text sequence, every
/// element must.
pub fn check_length(value: &Value<'_>, expected: u64) -> Result<(), ErrorKind> {
    let holds = match value {
        Value::Text(s) => char_count(s) == i128::from(expected),
        Value::TextSeq(items) => items
            .iter()
            .all(|s| char_count(s) == i128::from(expected)),
        _ => return Err(ErrorKind::UnsupportedType),
    };
    ensure(holds, ErrorKind::LengthFailed)
}

/// The value's string form must be one of `allowed`.
///
/// Integers use their base-10 form. Kinds without a string form never match.
pub fn check_membership(value: &Value<'_>, allowed: &BTreeSet<String>) -> Result<(), ErrorKind> {
    let candidate: Cow<'_, str> = match value {
        Value::Int(n) => Cow::Owned(n.to_string()),
        Value::Text(s) => Cow::Borrowed(*s),
        _ => return Err(ErrorKind::MembershipFailed),
    };
    ensure(
        allowed.contains(candidate.as_ref()),
        ErrorKind::MembershipFailed,
    )
}

pub fn check_min(value: &Value<'_>, bound: i64) -> Result<(), ErrorKind> {
    let bound = i128::from(bound);
    check_bound(value, |n| n >= bound, ErrorKind::MinimumFailed)
}

pub fn check_max(value: &Value<'_>, bound: i64) -> Result<(), ErrorKind> {
    let bound = i128::from(bound);
    check_bound(value, |n| n <= bound, ErrorKind::MaximumFailed)
}

/// Integers compare directly, text by character count. Sequences stop at
/// the first element that violates the bound.
fn check_bound(
    value: &Value<'_>,
    holds: impl Fn(i128) -> bool,
    failure: ErrorKind,
) -> Result<(), ErrorKind> {
    let ok = match value {
        Value::Int(n) => holds(*n),
        Value::Text(s) => holds(char_count(s)),
        Value::IntSeq(items) => items.iter().all(|n| holds(*n)),
        Value::TextSeq(items) => items.iter().all(|s| holds(char_count(s))),
        _ => return Err(ErrorKind::UnsupportedType),
    };
    ensure(ok, failure)
}

fn char_count(s: &str) -> i128 {
    s.chars().count() as i128
}

fn ensure(holds: bool, failure: ErrorKind) -> Result<(), ErrorKind> {
    if holds {
        Ok(())
    } else {
        Err(failure)
    }
}
