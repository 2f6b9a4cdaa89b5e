//! Error type for value access and conversion.

use core::fmt::{self, Display, Formatter};

use crate::value::ValueType;

/// Error returned by the checked accessors on [`Value`](crate::Value).
///
/// Every condition reported here can be ruled out up front with the
/// corresponding predicate (`is_i32`, `is_numeric`, `is_string`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueError {
    /// The specific kind of error.
    pub kind: ValueErrorKind,
}

/// The specific failure behind a [`ValueError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueErrorKind {
    /// The value's active variant is not usable for the requested operation.
    TypeMismatch {
        /// The variant the operation needs.
        expected: ValueType,
        /// The variant actually held.
        got: ValueType,
    },
    /// A numeric value does not fit the requested target type.
    NumberOutOfRange {
        /// Name of the target type (`"i32"`, `"u64"`, ...).
        target: &'static str,
    },
    /// A string value holds bytes that are not valid UTF-8.
    InvalidUtf8,
}

impl ValueError {
    /// Creates a type-mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: ValueType, got: ValueType) -> Self {
        Self {
            kind: ValueErrorKind::TypeMismatch { expected, got },
        }
    }

    /// Creates an out-of-range error for the named target type.
    #[must_use]
    pub fn out_of_range(target: &'static str) -> Self {
        Self {
            kind: ValueErrorKind::NumberOutOfRange { target },
        }
    }

    /// Creates an invalid-UTF-8 error.
    #[must_use]
    pub fn invalid_utf8() -> Self {
        Self {
            kind: ValueErrorKind::InvalidUtf8,
        }
    }
}

impl Display for ValueError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValueErrorKind::TypeMismatch { expected, got } => {
                write!(f, "expected a {expected:?} value, got {got:?}")
            }
            ValueErrorKind::NumberOutOfRange { target } => {
                write!(f, "number out of range for {target}")
            }
            ValueErrorKind::InvalidUtf8 => f.write_str("string value is not valid UTF-8"),
        }
    }
}

impl core::error::Error for ValueError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let e = ValueError::type_mismatch(ValueType::String, ValueType::Int);
        assert_eq!(e.to_string(), "expected a String value, got Int");

        let e = ValueError::out_of_range("u32");
        assert_eq!(e.to_string(), "number out of range for u32");

        let e = ValueError::invalid_utf8();
        assert_eq!(e.to_string(), "string value is not valid UTF-8");
    }
}
