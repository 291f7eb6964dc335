/// Declare a struct together with its [`Inspect`](crate::Inspect) impl.
///
/// Fields are registered in declaration order. Rule annotations go in an
/// optional trailing `validate { field => "rule:argument", ... }` block;
/// naming a field that does not exist is a compile error. Only bare `pub`
/// fields count as exported. Every field type must implement `Inspect`.
///
/// ```
/// use tagcheck_core::{record, validate};
///
/// record! {
///     #[derive(Debug, Clone)]
///     pub struct Address {
///         pub zip: String,
///     }
///     validate {
///         zip => "len:5",
///     }
/// }
///
/// record! {
///     pub struct Customer {
///         /// Account role.
///         pub role: String,
///         pub address: Address,
///     }
///     validate {
///         role => "in:admin,stuff",
///     }
/// }
///
/// let customer = Customer {
///     role: "guest".into(),
///     address: Address { zip: "1234".into() },
/// };
/// let err = validate(&customer).unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "role: in validation failed\nzip: len validation failed"
/// );
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
        $(
            validate {
                $( $tagged:ident => $tag:literal ),* $(,)?
            }
        )?
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::Inspect for $name {
            fn to_value(&self) -> $crate::Value<'_> {
                let record = $crate::Record::new(stringify!($name))
                    $(
                        .field($crate::Field::new(
                            stringify!($field),
                            $crate::Visibility::from_keyword(stringify!($field_vis)),
                            &self.$field,
                        ))
                    )*;
                $($(
                    let _ = &self.$tagged;
                    let record = record.with_tag(stringify!($tagged), $tag);
                )*)?
                $crate::Value::Record(record)
            }

            fn is_record(&self) -> bool {
                true
            }
        }
    };
}
