//! Member keys and string payload storage.
//!
//! A [`Key`] addresses one slot in a container value: arrays use index keys,
//! objects use name keys. Both kinds live in the same sorted map, so `Key`
//! carries a total order (index keys first, then name keys by bytes with a
//! shorter-sorts-first tie-break).
//!
//! [`StrBuf`] is the payload storage for string values. A string is either a
//! borrowed `&'static str` (no allocation, lives as long as the program) or
//! an owned heap buffer. Owned buffers keep one extra NUL byte past the
//! logical length so the raw buffer stays usable as a C string; the NUL is
//! never part of the logical content.

use core::cmp::Ordering;
use core::fmt;

/// Longest representable string payload or key name, in bytes.
///
/// Anything longer is silently truncated to this length on construction.
pub const MAX_STRING_LEN: usize = (1 << 30) - 1;

pub(crate) fn clamp_len(len: usize) -> usize {
    len.min(MAX_STRING_LEN)
}

/// A `&'static str` wrapper that requests borrowed storage.
///
/// `Value::from(StaticStr(..))` and object indexing by `StaticStr` store the
/// pointer itself instead of copying the bytes. The caller guarantees the
/// text outlives every value that refers to it, which `'static` makes free.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StaticStr(pub &'static str);

impl StaticStr {
    /// Returns the wrapped string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

/// String payload: borrowed static text or an owned buffer.
#[derive(Clone)]
pub(crate) enum StrBuf {
    Static(&'static str),
    /// Logical bytes plus one trailing NUL.
    Owned(Box<[u8]>),
}

impl StrBuf {
    pub(crate) fn from_static(s: &'static str) -> Self {
        StrBuf::Static(s)
    }

    /// Copies `bytes` into an owned buffer, truncating at [`MAX_STRING_LEN`].
    pub(crate) fn owned(bytes: &[u8]) -> Self {
        let len = clamp_len(bytes.len());
        let mut buf = Vec::with_capacity(len + 1);
        buf.extend_from_slice(&bytes[..len]);
        buf.push(0);
        StrBuf::Owned(buf.into_boxed_slice())
    }

    /// Logical content, without the trailing NUL of owned buffers.
    pub(crate) fn as_bytes(&self) -> &[u8] {
        match self {
            StrBuf::Static(s) => s.as_bytes(),
            StrBuf::Owned(buf) => &buf[..buf.len() - 1],
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for StrBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match core::str::from_utf8(self.as_bytes()) {
            Ok(s) => fmt::Debug::fmt(s, f),
            Err(_) => write!(f, "{:?}", self.as_bytes()),
        }
    }
}

/// One member key: an array index or an object member name.
#[derive(Clone)]
pub struct Key(KeyRepr);

#[derive(Clone)]
enum KeyRepr {
    Index(u32),
    Name(NameBuf),
}

#[derive(Clone)]
enum NameBuf {
    Static(&'static str),
    Owned(Box<str>),
}

impl NameBuf {
    fn as_str(&self) -> &str {
        match self {
            NameBuf::Static(s) => s,
            NameBuf::Owned(s) => s,
        }
    }
}

impl Key {
    /// An array index key.
    #[must_use]
    pub fn index(index: u32) -> Self {
        Key(KeyRepr::Index(index))
    }

    /// An object member key with owned storage.
    ///
    /// The name is copied, truncated at [`MAX_STRING_LEN`].
    #[must_use]
    pub fn name(name: &str) -> Self {
        let end = floor_char_boundary(name, clamp_len(name.len()));
        Key(KeyRepr::Name(NameBuf::Owned(Box::from(&name[..end]))))
    }

    /// An object member key that borrows static text instead of copying.
    #[must_use]
    pub fn static_name(name: StaticStr) -> Self {
        Key(KeyRepr::Name(NameBuf::Static(name.as_str())))
    }

    /// The array index, if this is an index key.
    #[must_use]
    pub fn as_index(&self) -> Option<u32> {
        match self.0 {
            KeyRepr::Index(i) => Some(i),
            KeyRepr::Name(_) => None,
        }
    }

    /// The member name, if this is a name key.
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match &self.0 {
            KeyRepr::Index(_) => None,
            KeyRepr::Name(n) => Some(n.as_str()),
        }
    }

    /// Whether this key borrows static text rather than owning its bytes.
    #[must_use]
    pub fn is_static(&self) -> bool {
        matches!(self.0, KeyRepr::Name(NameBuf::Static(_)))
    }
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Key {}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.0, &other.0) {
            (KeyRepr::Index(a), KeyRepr::Index(b)) => a.cmp(b),
            // One container only ever holds one key kind; the cross-kind
            // order just has to be total and stable.
            (KeyRepr::Index(_), KeyRepr::Name(_)) => Ordering::Less,
            (KeyRepr::Name(_), KeyRepr::Index(_)) => Ordering::Greater,
            // Byte order with shorter-sorts-first on a common prefix, which
            // is exactly what slice ordering does.
            (KeyRepr::Name(a), KeyRepr::Name(b)) => a.as_str().as_bytes().cmp(b.as_str().as_bytes()),
        }
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            KeyRepr::Index(i) => fmt::Debug::fmt(i, f),
            KeyRepr::Name(n) => fmt::Debug::fmt(n.as_str(), f),
        }
    }
}
