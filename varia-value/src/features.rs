//! Parser feature flags.

/// Knobs a document reader consults while building values.
///
/// This type only carries configuration; enforcement belongs to whichever
/// reader is handed the bundle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Features {
    /// Accept `//` and `/* */` comments in the document.
    pub allow_comments: bool,
    /// Require the document root to be an array or an object.
    pub strict_root: bool,
    /// Accept `,,` in arrays as dropped `null` placeholders.
    pub allow_dropped_null_placeholders: bool,
    /// Accept unquoted numeric object keys.
    pub allow_numeric_keys: bool,
}

impl Features {
    /// The permissive configuration: comments allowed, any root accepted.
    /// This is also the [`Default`].
    #[must_use]
    pub fn all() -> Features {
        Features {
            allow_comments: true,
            strict_root: false,
            allow_dropped_null_placeholders: false,
            allow_numeric_keys: false,
        }
    }

    /// The strict JSON configuration: no comments, root must be an array
    /// or object, no recovery extensions.
    #[must_use]
    pub fn strict_mode() -> Features {
        Features {
            allow_comments: false,
            strict_root: true,
            allow_dropped_null_placeholders: false,
            allow_numeric_keys: false,
        }
    }
}

impl Default for Features {
    fn default() -> Self {
        Features::all()
    }
}
