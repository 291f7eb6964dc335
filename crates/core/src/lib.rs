//! Declarative field validation for structured records.
//!
//! A record exposes its fields through [`Inspect`]; each field may carry one
//! `rule:argument` annotation. [`validate`] walks the record depth-first,
//! evaluates every annotation, and returns all violations at once.
//!
//! | Rule      | Applies to                              | Fails when                    |
//! |-----------|-----------------------------------------|-------------------------------|
//! | `len:N`   | text, sequence of text                  | char count != N               |
//! | `in:a,b`  | integer, text                           | string form not in the set    |
//! | `min:N`   | integer, text, sequences of either      | value or char count < N       |
//! | `max:N`   | integer, text, sequences of either      | value or char count > N       |
//!
//! Unrecognized rule names are ignored unless
//! [`ValidatorConfig::strict_rules`] is set.
//!
//! ```
//! use tagcheck_core::{record, validate, ErrorKind};
//!
//! record! {
//!     pub struct Signup {
//!         pub name: String,
//!         pub age: i64,
//!     }
//!     validate {
//!         name => "len:4",
//!         age => "min:18",
//!     }
//! }
//!
//! let signup = Signup { name: "Anna".into(), age: 17 };
//! let err = validate(&signup).unwrap_err();
//! assert_eq!(err.to_string(), "age: min validation failed");
//! assert!(err.contains(ErrorKind::MinimumFailed));
//! ```

mod macros;

pub mod config;
pub mod error;
pub mod validation;
pub mod value;

pub use config::ValidatorConfig;
pub use error::{ErrorKind, FieldError, ValidationErrors};
pub use validation::walker::{validate, Validator};
pub use value::{Element, Field, Inspect, Record, Value, Visibility};
