//! Decode failures and the shared error vocabulary.

use std::fmt;

use crate::Path;

/// The kind of failure, independent of where it happened.
///
/// Every error surfaced by parsely maps to exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The document is not well-formed XML.
    Syntax,
    /// A required field is absent.
    KeyNotFound,
    /// A field is present but has the wrong shape or unconvertible text.
    TypeMismatch,
    /// A sequence element was requested past the end.
    ValueExhausted,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::Syntax => "syntax error",
            ErrorKind::KeyNotFound => "key not found",
            ErrorKind::TypeMismatch => "type mismatch",
            ErrorKind::ValueExhausted => "value exhausted",
        })
    }
}

/// A field-level decode failure together with its location.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeError {
    kind: DecodeErrorKind,
    path: Path,
}

/// Detailed classification of field-level decode failures.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum DecodeErrorKind {
    /// A required field's tag is absent.
    KeyNotFound {
        /// The missing tag.
        key: String,
    },
    /// The entry at `key` exists but cannot become the requested kind.
    TypeMismatch {
        /// The tag whose entry mismatched.
        key: String,
        /// What the shape asked for.
        expected: String,
        /// What was found instead.
        got: String,
    },
    /// A sequence element was requested past the end.
    ValueExhausted {
        /// The requested index.
        index: usize,
        /// How many elements were available.
        len: usize,
    },
}

impl DecodeError {
    /// Create an error at the given path.
    pub fn new(kind: DecodeErrorKind, path: Path) -> Self {
        Self { kind, path }
    }

    /// Shorthand for a [`DecodeErrorKind::TypeMismatch`].
    pub fn type_mismatch(
        key: impl Into<String>,
        expected: impl Into<String>,
        got: impl Into<String>,
        path: Path,
    ) -> Self {
        Self::new(
            DecodeErrorKind::TypeMismatch {
                key: key.into(),
                expected: expected.into(),
                got: got.into(),
            },
            path,
        )
    }

    /// The coarse error kind.
    pub fn kind(&self) -> ErrorKind {
        match self.kind {
            DecodeErrorKind::KeyNotFound { .. } => ErrorKind::KeyNotFound,
            DecodeErrorKind::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            DecodeErrorKind::ValueExhausted { .. } => ErrorKind::ValueExhausted,
        }
    }

    /// The detailed error kind.
    pub fn detail(&self) -> &DecodeErrorKind {
        &self.kind
    }

    /// Where in the document the failure happened.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The tag the failure is about, if any.
    pub fn key(&self) -> Option<&str> {
        match &self.kind {
            DecodeErrorKind::KeyNotFound { key } | DecodeErrorKind::TypeMismatch { key, .. } => {
                Some(key)
            }
            DecodeErrorKind::ValueExhausted { .. } => None,
        }
    }
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeErrorKind::KeyNotFound { key } => write!(f, "missing required element <{key}>"),
            DecodeErrorKind::TypeMismatch { key, expected, got } => {
                write!(f, "type mismatch for <{key}>: expected {expected}, got {got}")
            }
            DecodeErrorKind::ValueExhausted { index, len } => write!(
                f,
                "value exhausted: element {index} requested from a sequence of {len}"
            ),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at {})", self.kind, self.path)
    }
}

impl std::error::Error for DecodeError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PathStep;

    #[test]
    fn messages_include_path() {
        let path: Path = ["product", "id"].into_iter().collect();
        let err = DecodeError::type_mismatch("id", "i64", r#"text "abc""#, path);
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.key(), Some("id"));
        insta::assert_snapshot!(err, @r#"type mismatch for <id>: expected i64, got text "abc" (at product.id)"#);

        let err = DecodeError::new(
            DecodeErrorKind::KeyNotFound { key: "price".into() },
            ["product", "price"].into_iter().collect(),
        );
        insta::assert_snapshot!(err, @"missing required element <price> (at product.price)");

        let mut path: Path = ["tags", "tag"].into_iter().collect();
        path.push(PathStep::Index(3));
        let err = DecodeError::new(DecodeErrorKind::ValueExhausted { index: 3, len: 3 }, path);
        assert_eq!(err.key(), None);
        insta::assert_snapshot!(err, @"value exhausted: element 3 requested from a sequence of 3 (at tags.tag[3])");
    }
}
