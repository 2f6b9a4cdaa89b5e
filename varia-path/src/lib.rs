#![warn(missing_docs)]

//! `varia-path` compiles dotted/indexed path expressions like `.a.b[1]`
//! and walks them over [`varia_value::Value`] trees.
//!
//! An expression is compiled once into a [`Path`] and reused. `%`
//! placeholders pull their member name or index from an argument slice at
//! compile time, so callers never splice untrusted text into the
//! expression itself:
//!
//! ```
//! use varia_path::{Path, PathArgument};
//! use varia_value::value;
//!
//! let doc = value!({ "a": { "b": [10, 20, 30] } });
//! let path = Path::compile(".a.b[%]", &[PathArgument::from(1u32)]).unwrap();
//! assert_eq!(path.find(&doc).unwrap().to_i64(), Ok(20));
//! ```

use core::fmt::{self, Display, Formatter, Write as _};

use varia_value::Value;

/// An out-of-line value for one `%` placeholder.
///
/// `[%]` consumes an `Index` argument, a bare `%` in member position
/// consumes a `Key` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathArgument {
    /// An array index, for `[%]`.
    Index(u32),
    /// A member name, for `.%`.
    Key(String),
}

impl From<u32> for PathArgument {
    fn from(index: u32) -> Self {
        PathArgument::Index(index)
    }
}

impl From<&str> for PathArgument {
    fn from(key: &str) -> Self {
        PathArgument::Key(key.to_owned())
    }
}

impl From<String> for PathArgument {
    fn from(key: String) -> Self {
        PathArgument::Key(key)
    }
}

/// A single step in a compiled path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathStep {
    /// Descend into an object member by name.
    Member(String),
    /// Descend into an array slot by index.
    Index(u32),
}

/// A compiled path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    steps: Vec<PathStep>,
}

/// Error from compiling or walking a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathError {
    /// The specific kind of error.
    pub kind: PathErrorKind,
}

/// The specific failure behind a [`PathError`].
///
/// Compile-time kinds carry a byte offset into the expression; walk-time
/// kinds carry the index of the step that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathErrorKind {
    /// The expression is malformed at the given byte offset.
    Syntax {
        /// Byte offset of the offending character.
        offset: usize,
    },
    /// A `%` placeholder had no argument left to consume.
    MissingArgument {
        /// Byte offset of the placeholder.
        offset: usize,
    },
    /// A `%` placeholder was given an argument of the other kind.
    ArgumentMismatch {
        /// Byte offset of the placeholder.
        offset: usize,
    },
    /// A step expected an array or object and found something else.
    KindMismatch {
        /// Index of the failing step.
        step: usize,
    },
    /// A step named a member or index that does not exist.
    NotFound {
        /// Index of the failing step.
        step: usize,
    },
}

impl PathError {
    fn syntax(offset: usize) -> Self {
        PathError {
            kind: PathErrorKind::Syntax { offset },
        }
    }

    fn missing_argument(offset: usize) -> Self {
        PathError {
            kind: PathErrorKind::MissingArgument { offset },
        }
    }

    fn argument_mismatch(offset: usize) -> Self {
        PathError {
            kind: PathErrorKind::ArgumentMismatch { offset },
        }
    }

    fn kind_mismatch(step: usize) -> Self {
        PathError {
            kind: PathErrorKind::KindMismatch { step },
        }
    }

    fn not_found(step: usize) -> Self {
        PathError {
            kind: PathErrorKind::NotFound { step },
        }
    }
}

impl Display for PathError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.kind {
            PathErrorKind::Syntax { offset } => {
                write!(f, "invalid path expression at byte {offset}")
            }
            PathErrorKind::MissingArgument { offset } => {
                write!(f, "no argument left for `%` at byte {offset}")
            }
            PathErrorKind::ArgumentMismatch { offset } => {
                write!(f, "argument kind does not fit the `%` at byte {offset}")
            }
            PathErrorKind::KindMismatch { step } => {
                write!(f, "value kind does not match path step {step}")
            }
            PathErrorKind::NotFound { step } => {
                write!(f, "nothing found at path step {step}")
            }
        }
    }
}

impl core::error::Error for PathError {}

impl Path {
    /// Compiles an expression against its placeholder arguments.
    ///
    /// Grammar: `.name` or a leading bare `name` descends into a member,
    /// `[digits]` into an array slot. `[%]` and `.%` consume the next
    /// argument instead. Dots are separators and may repeat.
    pub fn compile(expr: &str, args: &[PathArgument]) -> Result<Path, PathError> {
        let bytes = expr.as_bytes();
        let mut steps = Vec::new();
        let mut next_arg = args.iter();
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'[' => {
                    i += 1;
                    if bytes.get(i) == Some(&b'%') {
                        match next_arg.next() {
                            Some(PathArgument::Index(index)) => {
                                steps.push(PathStep::Index(*index));
                            }
                            Some(PathArgument::Key(_)) => {
                                return Err(PathError::argument_mismatch(i));
                            }
                            None => return Err(PathError::missing_argument(i)),
                        }
                        i += 1;
                    } else {
                        let digits_at = i;
                        let mut index: u32 = 0;
                        while let Some(digit) = bytes.get(i).filter(|b| b.is_ascii_digit()) {
                            index = index
                                .checked_mul(10)
                                .and_then(|n| n.checked_add(u32::from(digit - b'0')))
                                .ok_or(PathError::syntax(digits_at))?;
                            i += 1;
                        }
                        if i == digits_at {
                            return Err(PathError::syntax(i));
                        }
                        steps.push(PathStep::Index(index));
                    }
                    if bytes.get(i) != Some(&b']') {
                        return Err(PathError::syntax(i));
                    }
                    i += 1;
                }
                b'%' => {
                    match next_arg.next() {
                        Some(PathArgument::Key(key)) => {
                            steps.push(PathStep::Member(key.clone()));
                        }
                        Some(PathArgument::Index(_)) => {
                            return Err(PathError::argument_mismatch(i));
                        }
                        None => return Err(PathError::missing_argument(i)),
                    }
                    i += 1;
                }
                b'.' => i += 1,
                _ => {
                    let start = i;
                    while i < bytes.len() && bytes[i] != b'.' && bytes[i] != b'[' {
                        i += 1;
                    }
                    steps.push(PathStep::Member(expr[start..i].to_owned()));
                }
            }
        }

        Ok(Path { steps })
    }

    /// The compiled steps.
    #[must_use]
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Walks the path, returning `None` on the first step that cannot be
    /// followed for any reason.
    #[must_use]
    pub fn find<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut node = root;
        for step in &self.steps {
            node = match step {
                PathStep::Index(index) => node.get_index(*index)?,
                PathStep::Member(key) => node.get_member(key)?,
            };
        }
        Some(node)
    }

    /// Walks the path, reporting which step failed and how.
    pub fn resolve<'a>(&self, root: &'a Value) -> Result<&'a Value, PathError> {
        let mut node = root;
        for (at, step) in self.steps.iter().enumerate() {
            node = match step {
                PathStep::Index(index) => {
                    if !node.is_array() {
                        return Err(PathError::kind_mismatch(at));
                    }
                    node.get_index(*index).ok_or(PathError::not_found(at))?
                }
                PathStep::Member(key) => {
                    if !node.is_object() {
                        return Err(PathError::kind_mismatch(at));
                    }
                    node.get_member(key).ok_or(PathError::not_found(at))?
                }
            };
        }
        Ok(node)
    }

    /// Walks the path, falling back to `default` if any step misses.
    #[must_use]
    pub fn resolve_or<'a>(&self, root: &'a Value, default: &'a Value) -> &'a Value {
        self.find(root).unwrap_or(default)
    }

    /// Walks the path creating what is missing: null nodes become the
    /// container the step needs, absent slots are created as null. Returns
    /// the (possibly fresh) node at the end.
    ///
    /// Fails without panicking when an existing non-null value is in the
    /// way of a step of the other kind.
    pub fn make<'a>(&self, root: &'a mut Value) -> Result<&'a mut Value, PathError> {
        let mut node = root;
        for (at, step) in self.steps.iter().enumerate() {
            node = match step {
                PathStep::Index(index) => {
                    if !(node.is_null() || node.is_array()) {
                        return Err(PathError::kind_mismatch(at));
                    }
                    &mut node[*index]
                }
                PathStep::Member(key) => {
                    if !(node.is_null() || node.is_object()) {
                        return Err(PathError::kind_mismatch(at));
                    }
                    node.member_mut(key)
                }
            };
        }
        Ok(node)
    }
}

impl Display for Path {
    /// Renders the canonical form of the expression, `a.b[1]` style.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return f.write_str("<root>");
        }
        let mut first = true;
        for step in &self.steps {
            match step {
                PathStep::Member(key) => {
                    if !first {
                        f.write_char('.')?;
                    }
                    f.write_str(key)?;
                }
                PathStep::Index(index) => write!(f, "[{index}]")?,
            }
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_splits_members_and_indexes() {
        let path = Path::compile(".a.b[1]", &[]).unwrap();
        assert_eq!(
            path.steps(),
            [
                PathStep::Member("a".to_owned()),
                PathStep::Member("b".to_owned()),
                PathStep::Index(1),
            ]
        );
    }

    #[test]
    fn leading_dot_is_optional_and_dots_may_repeat() {
        let with = Path::compile(".a.b", &[]).unwrap();
        let without = Path::compile("a.b", &[]).unwrap();
        let doubled = Path::compile("a..b", &[]).unwrap();
        assert_eq!(with, without);
        assert_eq!(with, doubled);
    }

    #[test]
    fn empty_expression_is_the_root() {
        let path = Path::compile("", &[]).unwrap();
        assert!(path.steps().is_empty());
        assert_eq!(path.to_string(), "<root>");
    }

    #[test]
    fn placeholders_consume_arguments_in_order() {
        let args = [PathArgument::from("name"), PathArgument::from(3u32)];
        let path = Path::compile(".%[%]", &args).unwrap();
        assert_eq!(
            path.steps(),
            [PathStep::Member("name".to_owned()), PathStep::Index(3)]
        );
    }

    #[test]
    fn placeholder_errors_carry_the_offset() {
        let err = Path::compile(".a.%", &[]).unwrap_err();
        assert_eq!(err.kind, PathErrorKind::MissingArgument { offset: 3 });

        let err = Path::compile("[%]", &[PathArgument::from("oops")]).unwrap_err();
        assert_eq!(err.kind, PathErrorKind::ArgumentMismatch { offset: 1 });
    }

    #[test]
    fn syntax_errors_carry_the_offset() {
        let err = Path::compile("[12", &[]).unwrap_err();
        assert_eq!(err.kind, PathErrorKind::Syntax { offset: 3 });

        let err = Path::compile("[]", &[]).unwrap_err();
        assert_eq!(err.kind, PathErrorKind::Syntax { offset: 1 });

        let err = Path::compile("[x]", &[]).unwrap_err();
        assert_eq!(err.kind, PathErrorKind::Syntax { offset: 1 });

        // index overflow reports the start of the digit run
        let err = Path::compile("[99999999999]", &[]).unwrap_err();
        assert_eq!(err.kind, PathErrorKind::Syntax { offset: 1 });
    }

    #[test]
    fn display_round_trips_the_canonical_form() {
        let path = Path::compile(".a.b[1].c", &[]).unwrap();
        assert_eq!(path.to_string(), "a.b[1].c");
        let reparsed = Path::compile(&path.to_string(), &[]).unwrap();
        assert_eq!(reparsed, path);
    }
}
