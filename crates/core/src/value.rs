//! Runtime view of a record's fields.
//!
//! Types opt into validation by implementing [`Inspect`], usually through the
//! [`record!`](crate::record) macro. A record inspects to a [`Record`]: an
//! ordered table of [`Field`]s, each carrying its name, visibility, optional
//! rule annotation, and a borrowed handle to the field's value. Field values
//! are inspected lazily, only when the walker reaches them.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Kind-tagged borrowed view of a value.
#[derive(Debug, Clone)]
pub enum Value<'a> {
    /// Any signed or unsigned integer up to 64 bits.
    Int(i128),
    Text(&'a str),
    IntSeq(Vec<i128>),
    TextSeq(Vec<&'a str>),
    Record(Record<'a>),
    /// `None` in an optional field.
    Absent,
    /// A kind no rule applies to, named for diagnostics (e.g. `"bool"`).
    Other(&'static str),
}

impl Value<'_> {
    /// Short kind name used in log events.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Text(_) => "text",
            Self::IntSeq(_) => "[int]",
            Self::TextSeq(_) => "[text]",
            Self::Record(_) => "record",
            Self::Absent => "absent",
            Self::Other(name) => *name,
        }
    }
}

/// Produces the runtime view of a value.
pub trait Inspect {
    fn to_value(&self) -> Value<'_>;

    /// Whether [`to_value`](Inspect::to_value) yields a [`Value::Record`].
    ///
    /// The walker asks this for every field, annotated or not, so leaf types
    /// answer without building their view. The default builds it.
    fn is_record(&self) -> bool {
        matches!(self.to_value(), Value::Record(_))
    }
}

// ---------------------------------------------------------------------------
// Field metadata
// ---------------------------------------------------------------------------

/// Whether a field may carry a validation annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Exported,
    Private,
}

impl Visibility {
    /// Map a Rust visibility keyword to a field visibility.
    ///
    /// Only bare `pub` is exported; restricted forms such as `pub(crate)`
    /// and inherited visibility are private.
    pub fn from_keyword(keyword: &str) -> Self {
        if keyword == "pub" {
            Self::Exported
        } else {
            Self::Private
        }
    }
}

/// One named slot of a [`Record`].
#[derive(Clone, Copy)]
pub struct Field<'a> {
    name: &'a str,
    visibility: Visibility,
    tag: Option<&'a str>,
    value: &'a dyn Inspect,
}

impl<'a> Field<'a> {
    pub fn new<T: Inspect + 'a>(name: &'a str, visibility: Visibility, value: &'a T) -> Self {
        Self {
            name,
            visibility,
            tag: None,
            value,
        }
    }

    pub fn exported<T: Inspect + 'a>(name: &'a str, value: &'a T) -> Self {
        Self::new(name, Visibility::Exported, value)
    }

    pub fn private<T: Inspect + 'a>(name: &'a str, value: &'a T) -> Self {
        Self::new(name, Visibility::Private, value)
    }

    /// Attach a `rule:argument` annotation, replacing any previous one.
    pub fn tag(mut self, tag: &'a str) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_exported(&self) -> bool {
        self.visibility == Visibility::Exported
    }

    pub fn annotation(&self) -> Option<&'a str> {
        self.tag
    }

    /// Build the view of the field's current value.
    pub fn to_value(&self) -> Value<'a> {
        let value: &'a dyn Inspect = self.value;
        value.to_value()
    }

    pub fn is_record(&self) -> bool {
        self.value.is_record()
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("visibility", &self.visibility)
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

/// Ordered field table of one composite value.
#[derive(Debug, Clone)]
pub struct Record<'a> {
    type_name: &'a str,
    fields: Vec<Field<'a>>,
}

impl<'a> Record<'a> {
    pub fn new(type_name: &'a str) -> Self {
        Self {
            type_name,
            fields: Vec::new(),
        }
    }

    /// Append a field; declaration order is traversal order.
    pub fn field(mut self, field: Field<'a>) -> Self {
        self.fields.push(field);
        self
    }

    /// Annotate the already registered field called `name`.
    ///
    /// Unknown names are ignored.
    pub fn with_tag(mut self, name: &str, tag: &'a str) -> Self {
        if let Some(field) = self.fields.iter_mut().find(|f| f.name == name) {
            field.tag = Some(tag);
        }
        self
    }

    pub fn type_name(&self) -> &'a str {
        self.type_name
    }

    pub fn fields(&self) -> &[Field<'a>] {
        &self.fields
    }
}

// ---------------------------------------------------------------------------
// Scalar and wrapper impls
// ---------------------------------------------------------------------------

macro_rules! impl_inspect_int {
    ($($t:ty),*) => {
        $(
            impl Inspect for $t {
                fn to_value(&self) -> Value<'_> {
                    Value::Int(*self as i128)
                }

                fn is_record(&self) -> bool {
                    false
                }
            }
        )*
    };
}

impl_inspect_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_inspect_other {
    ($($t:ty => $name:literal),*) => {
        $(
            impl Inspect for $t {
                fn to_value(&self) -> Value<'_> {
                    Value::Other($name)
                }

                fn is_record(&self) -> bool {
                    false
                }
            }
        )*
    };
}

impl_inspect_other!(bool => "bool", char => "char", f32 => "f32", f64 => "f64", () => "()");

impl Inspect for str {
    fn to_value(&self) -> Value<'_> {
        Value::Text(self)
    }

    fn is_record(&self) -> bool {
        false
    }
}

impl Inspect for String {
    fn to_value(&self) -> Value<'_> {
        Value::Text(self.as_str())
    }

    fn is_record(&self) -> bool {
        false
    }
}

impl<T: Inspect + ?Sized> Inspect for &T {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }

    fn is_record(&self) -> bool {
        (**self).is_record()
    }
}

impl<T: Inspect + ?Sized> Inspect for Box<T> {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }

    fn is_record(&self) -> bool {
        (**self).is_record()
    }
}

impl<T: Inspect> Inspect for Option<T> {
    fn to_value(&self) -> Value<'_> {
        match self {
            Some(value) => value.to_value(),
            None => Value::Absent,
        }
    }

    fn is_record(&self) -> bool {
        self.as_ref().is_some_and(Inspect::is_record)
    }
}

impl<K, V, S> Inspect for HashMap<K, V, S> {
    fn to_value(&self) -> Value<'_> {
        Value::Other("map")
    }

    fn is_record(&self) -> bool {
        false
    }
}

impl<K, V> Inspect for BTreeMap<K, V> {
    fn to_value(&self) -> Value<'_> {
        Value::Other("map")
    }

    fn is_record(&self) -> bool {
        false
    }
}

// ---------------------------------------------------------------------------
// Sequences
// ---------------------------------------------------------------------------

/// Element types that may appear in an inspectable sequence.
///
/// The element type, not the contents, decides the sequence kind, so an
/// empty `Vec<i64>` is still an integer sequence.
pub trait Element: Sized {
    fn inspect_slice(items: &[Self]) -> Value<'_>;
}

macro_rules! impl_element_int {
    ($($t:ty),*) => {
        $(
            impl Element for $t {
                fn inspect_slice(items: &[Self]) -> Value<'_> {
                    Value::IntSeq(items.iter().map(|n| *n as i128).collect())
                }
            }
        )*
    };
}

impl_element_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_element_other {
    ($($t:ty => $name:literal),*) => {
        $(
            impl Element for $t {
                fn inspect_slice(_items: &[Self]) -> Value<'_> {
                    Value::Other($name)
                }
            }
        )*
    };
}

impl_element_other!(bool => "[bool]", char => "[char]", f32 => "[f32]", f64 => "[f64]");

impl Element for String {
    fn inspect_slice(items: &[Self]) -> Value<'_> {
        Value::TextSeq(items.iter().map(String::as_str).collect())
    }
}

impl Element for &str {
    fn inspect_slice(items: &[Self]) -> Value<'_> {
        Value::TextSeq(items.iter().copied().collect())
    }
}

impl<T: Element> Inspect for [T] {
    fn to_value(&self) -> Value<'_> {
        T::inspect_slice(self)
    }

    fn is_record(&self) -> bool {
        false
    }
}

impl<T: Element, const N: usize> Inspect for [T; N] {
    fn to_value(&self) -> Value<'_> {
        T::inspect_slice(self)
    }

    fn is_record(&self) -> bool {
        false
    }
}

impl<T: Element> Inspect for Vec<T> {
    fn to_value(&self) -> Value<'_> {
        T::inspect_slice(self)
    }

    fn is_record(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    struct Point {
        x: i32,
        label: String,
    }

    impl Inspect for Point {
        fn to_value(&self) -> Value<'_> {
            Value::Record(
                Record::new("Point")
                    .field(Field::exported("x", &self.x).tag("min:0"))
                    .field(Field::private("label", &self.label)),
            )
        }
    }

    #[test]
    fn integers_widen_to_int() {
        assert_matches!(7u8.to_value(), Value::Int(7));
        assert_matches!((-3i64).to_value(), Value::Int(-3));
        assert_matches!(u64::MAX.to_value(), Value::Int(n) if n == u64::MAX as i128);
    }

    #[test]
    fn strings_inspect_as_text() {
        assert_matches!("abc".to_value(), Value::Text("abc"));
        assert_matches!(String::from("héllo").to_value(), Value::Text("héllo"));
    }

    #[test]
    fn sequences_follow_element_type() {
        assert_matches!(vec![1i32, 2].to_value(), Value::IntSeq(v) if v == vec![1, 2]);
        assert_matches!(
            vec!["a".to_string(), "bc".to_string()].to_value(),
            Value::TextSeq(v) if v == vec!["a", "bc"]
        );
        assert_matches!(["x", "y"].to_value(), Value::TextSeq(v) if v == vec!["x", "y"]);
        assert_matches!(vec![true].to_value(), Value::Other("[bool]"));
    }

    #[test]
    fn empty_sequence_keeps_element_kind() {
        assert_matches!(Vec::<i64>::new().to_value(), Value::IntSeq(v) if v.is_empty());
        assert_matches!(Vec::<String>::new().to_value(), Value::TextSeq(v) if v.is_empty());
    }

    #[test]
    fn option_and_box_are_transparent() {
        assert_matches!(Some(5i32).to_value(), Value::Int(5));
        assert_matches!(None::<i32>.to_value(), Value::Absent);
        assert_matches!(Box::new("boxed".to_string()).to_value(), Value::Text("boxed"));
    }

    #[test]
    fn is_record_sees_through_wrappers() {
        let point = Point {
            x: 1,
            label: String::new(),
        };
        assert!(point.is_record());
        assert!(Some(Box::new(&point)).is_record());
        assert!(!None::<Point>.is_record());

        assert!(!5i32.is_record());
        assert!(!"text".is_record());
        assert!(!vec![1u8, 2].is_record());
        assert!(!Some(vec!["a".to_string()]).is_record());
        assert!(!BTreeMap::<i32, i32>::new().is_record());
    }

    #[test]
    fn unsupported_scalars_report_kind_name() {
        assert_eq!(true.to_value().kind_name(), "bool");
        assert_eq!(1.5f64.to_value().kind_name(), "f64");
        assert_eq!(HashMap::<String, i32>::new().to_value().kind_name(), "map");
    }

    #[test]
    fn record_keeps_declaration_order_and_metadata() {
        let point = Point {
            x: 4,
            label: "origin".into(),
        };
        let Value::Record(record) = point.to_value() else {
            panic!("Point should inspect as a record");
        };

        assert_eq!(record.type_name(), "Point");
        let names: Vec<&str> = record.fields().iter().map(Field::name).collect();
        assert_eq!(names, vec!["x", "label"]);

        let x = &record.fields()[0];
        assert!(x.is_exported());
        assert_eq!(x.annotation(), Some("min:0"));
        assert_matches!(x.to_value(), Value::Int(4));

        let label = &record.fields()[1];
        assert_eq!(label.visibility(), Visibility::Private);
        assert_eq!(label.annotation(), None);
    }

    #[test]
    fn with_tag_annotates_matching_field_only() {
        let x = 1i32;
        let y = 2i32;
        let record = Record::new("Pair")
            .field(Field::exported("x", &x))
            .field(Field::exported("y", &y))
            .with_tag("y", "max:1")
            .with_tag("z", "max:9");

        assert_eq!(record.fields()[0].annotation(), None);
        assert_eq!(record.fields()[1].annotation(), Some("max:1"));
    }

    #[test]
    fn visibility_from_keyword() {
        assert_eq!(Visibility::from_keyword("pub"), Visibility::Exported);
        assert_eq!(Visibility::from_keyword(""), Visibility::Private);
        assert_eq!(Visibility::from_keyword("pub(crate)"), Visibility::Private);
    }
}
