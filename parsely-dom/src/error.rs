//! Error types for DOM decoding.

use std::fmt;

use parsely_core::{DecodeError, ErrorKind, Path};
#[cfg(feature = "miette")]
use parsely_core::DecodeErrorKind;

/// The event stream does not describe a well-formed single-rooted tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// No element was seen at all.
    EmptyDocument,
    /// A second top-level element after the root closed.
    MultipleRoots {
        /// Tag of the extra element.
        tag: String,
    },
    /// Non-whitespace text before or after the root element.
    TextOutsideRoot,
    /// An end event with no open element.
    UnexpectedEnd,
    /// The input ended with an element still open.
    Unclosed {
        /// Tag of the innermost open element.
        tag: String,
    },
    /// An element is nested deeper than the builder allows.
    TooDeep {
        /// Tag of the element that crossed the limit.
        tag: String,
        /// The configured maximum depth.
        limit: usize,
    },
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDocument => write!(f, "document has no root element"),
            Self::MultipleRoots { tag } => {
                write!(f, "unexpected second root element <{tag}>")
            }
            Self::TextOutsideRoot => write!(f, "text content outside the root element"),
            Self::UnexpectedEnd => write!(f, "end of element with no element open"),
            Self::Unclosed { tag } => write!(f, "unexpected end of input inside <{tag}>"),
            Self::TooDeep { tag, limit } => {
                write!(f, "element <{tag}> is nested deeper than {limit} levels")
            }
        }
    }
}

impl std::error::Error for StructureError {}

/// Error type for DOM decoding.
///
/// `E` is the parser's own error type.
#[derive(Debug)]
pub enum DomDeserializeError<E> {
    /// Parser error.
    Parser(E),

    /// The event stream was not a well-formed tree.
    Structure(StructureError),

    /// The tree did not match the requested shape.
    Decode(DecodeError),
}

impl<E> DomDeserializeError<E> {
    /// The coarse error kind. Parser and structure errors are both `Syntax`.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parser(_) | Self::Structure(_) => ErrorKind::Syntax,
            Self::Decode(e) => e.kind(),
        }
    }

    /// Where in the document a decode failure happened.
    ///
    /// Syntax errors happen before any field is visited and have no path.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Decode(e) => Some(e.path()),
            _ => None,
        }
    }

    /// Returns the decode error, if this is one.
    pub fn as_decode(&self) -> Option<&DecodeError> {
        match self {
            Self::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl<E> From<DecodeError> for DomDeserializeError<E> {
    fn from(e: DecodeError) -> Self {
        Self::Decode(e)
    }
}

impl<E> From<StructureError> for DomDeserializeError<E> {
    fn from(e: StructureError) -> Self {
        Self::Structure(e)
    }
}

impl<E: std::error::Error> fmt::Display for DomDeserializeError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parser(e) => write!(f, "parser error: {e}"),
            Self::Structure(e) => write!(f, "malformed document: {e}"),
            Self::Decode(e) => write!(f, "{e}"),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for DomDeserializeError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parser(e) => Some(e),
            Self::Structure(e) => Some(e),
            Self::Decode(e) => Some(e),
        }
    }
}

#[cfg(feature = "miette")]
impl<E: miette::Diagnostic + 'static> miette::Diagnostic for DomDeserializeError<E> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(match self.kind() {
            ErrorKind::Syntax => "parsely::syntax",
            ErrorKind::KeyNotFound => "parsely::key_not_found",
            ErrorKind::TypeMismatch => "parsely::type_mismatch",
            ErrorKind::ValueExhausted => "parsely::value_exhausted",
        }))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Self::Structure(StructureError::MultipleRoots { .. }) => {
                Some(Box::new("a document must have exactly one root element"))
            }
            Self::Structure(StructureError::TooDeep { .. }) => Some(Box::new(
                "raise `DeserializeOptions::max_depth` if this nesting is expected",
            )),
            Self::Decode(e) => match e.detail() {
                DecodeErrorKind::KeyNotFound { key } => Some(Box::new(format!(
                    "add a non-empty <{key}> element or mark the field optional"
                ))),
                DecodeErrorKind::TypeMismatch { expected, .. } => {
                    Some(Box::new(format!("the shape expects {expected} here")))
                }
                _ => None,
            },
            _ => None,
        }
    }

    fn diagnostic_source(&self) -> Option<&dyn miette::Diagnostic> {
        match self {
            Self::Parser(e) => Some(e),
            _ => None,
        }
    }
}
