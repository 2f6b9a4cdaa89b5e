//! `varia-value` provides an in-memory dynamic value type for the JSON data
//! model: null, integers (signed and unsigned kept apart), reals, strings,
//! booleans, arrays and objects.
//!
//! # Features
//!
//! - **One member container**: arrays and objects share a sorted map keyed
//!   by [`Key`] (a `u32` index or a byte-string name), so arrays can be
//!   sparse and objects always iterate in key order
//! - **Checked coercion**: the `to_*` accessors coerce between numeric
//!   kinds, booleans and null, returning [`ValueError`] instead of
//!   asserting when a conversion cannot hold the value
//! - **String economy**: string values and member names either own their
//!   bytes or borrow `'static` text via [`StaticStr`], never copying the
//!   latter
//! - **Parser metadata**: every value can carry up to three comments and a
//!   `[start, limit)` source span without growing the common case
//!
//! # Example
//!
//! ```
//! use varia_value::value;
//!
//! let mut doc = value!({ "tags": ["a", "b"], "count": 2 });
//! doc["tags"].append(value!("c"));
//! assert_eq!(doc["tags"].size(), 3);
//! assert_eq!(doc["count"].to_u64(), Ok(2));
//! ```

#![warn(missing_docs)]

mod macros;

mod value;
pub use value::{CommentPlacement, Value, ValueType};

mod key;
pub use key::{Key, MAX_STRING_LEN, StaticStr};

mod format;
pub use format::{
    DEFAULT_REAL_PRECISION, PrecisionType, bool_to_string, integer_to_string, real_to_string,
    real_to_string_with, unsigned_to_string,
};

mod iter;
pub use iter::{Members, MembersMut};

mod error;
pub use error::{ValueError, ValueErrorKind};

mod features;
pub use features::Features;
