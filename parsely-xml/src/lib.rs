//! Decode XML into typed values, guided by a hand-written [`Shape`].
//!
//! The document is first built into a generic tree (repeated sibling tags
//! become sequences, empty elements disappear), then decoded against the
//! shape. Malformed XML always fails with [`ErrorKind::Syntax`] before any
//! field is looked at.
//!
//! # Example
//!
//! ```
//! use parsely_xml::{FieldDef, ScalarType, Shape, Value};
//!
//! let shape = Shape::new("User")
//!     .field(FieldDef::scalar("userId", ScalarType::String))
//!     .field(FieldDef::scalar("age", ScalarType::I64))
//!     .field(FieldDef::scalar("isActive", ScalarType::Bool));
//!
//! let xml = "<user><userId>user123</userId><age>25</age><isActive>true</isActive></user>";
//! let value = parsely_xml::decode(xml, &shape).unwrap();
//!
//! let user = value.as_object().unwrap();
//! assert_eq!(user.get("userId").and_then(Value::as_str), Some("user123"));
//! assert_eq!(user.get("age"), Some(&Value::I64(25)));
//! assert_eq!(user.get("isActive"), Some(&Value::Bool(true)));
//! ```

#![deny(missing_docs, rustdoc::broken_intra_doc_links)]

mod dom_parser;
mod tracing_macros;

pub use dom_parser::{XmlError, XmlParser};

pub use parsely_core::{
    DecodeError, DecodeErrorKind, ElementKind, ErrorKind, FieldDef, FieldKind, FromValue, Object,
    ParselyType, Path, PathStep, ScalarType, SeqCursor, Shape, Value,
};
#[cfg(feature = "tracing")]
pub use parsely_dom::TracingObserver;
pub use parsely_dom::{
    DEFAULT_MAX_DEPTH, DecodeObserver, DeserializeOptions, Document, Entry, Fields, Node,
    NoopObserver, RootPolicy, SequencePolicy, StructureError,
};

use parsely_dom::{DomDeserializeError, DomDeserializer};

/// Error returned by every entry point of this crate.
pub type DeserializeError = DomDeserializeError<XmlError>;

/// Decode an XML string against `shape` into a dynamic [`Value`].
///
/// The result is a `Value::Object` with one entry per field of `shape`, in
/// declaration order; absent optional fields are `Value::Null`.
pub fn decode(input: &str, shape: &Shape) -> Result<Value, DeserializeError> {
    decode_with_options(input, shape, &DeserializeOptions::default())
}

/// Decode an XML string against `shape` with explicit options.
///
/// ```
/// use parsely_xml::{DeserializeOptions, ErrorKind, FieldDef, ScalarType, SequencePolicy, Shape};
///
/// let shape = Shape::new("Tags").field(FieldDef::sequence("tag", ScalarType::String));
/// let strict = DeserializeOptions::new().sequence_policy(SequencePolicy::Strict);
///
/// let err = parsely_xml::decode_with_options("<tags><tag>a</tag></tags>", &shape, &strict)
///     .unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::TypeMismatch);
/// ```
pub fn decode_with_options(
    input: &str,
    shape: &Shape,
    options: &DeserializeOptions,
) -> Result<Value, DeserializeError> {
    let parser = XmlParser::new(input.as_bytes());
    DomDeserializer::with_options(parser, options.clone()).deserialize(shape)
}

/// Decode XML bytes against `shape`. Invalid UTF-8 is a syntax error.
pub fn decode_slice(input: &[u8], shape: &Shape) -> Result<Value, DeserializeError> {
    decode(utf8(input)?, shape)
}

/// Decode an XML string into a [`ParselyType`].
///
/// ```
/// use parsely_xml::{FieldDef, FromValue, Object, ParselyType, Path, ScalarType, Shape, Value};
///
/// #[derive(Debug, PartialEq)]
/// struct Tags {
///     tag: Vec<String>,
/// }
///
/// impl ParselyType for Tags {
///     fn shape() -> Shape {
///         Shape::new("Tags").field(FieldDef::sequence("tag", ScalarType::String))
///     }
/// }
///
/// impl FromValue for Tags {
///     fn from_value(value: Value, path: &mut Path) -> Result<Self, parsely_xml::DecodeError> {
///         let mut object = Object::from_value(value, path)?;
///         Ok(Tags { tag: object.take("tag", path)? })
///     }
/// }
///
/// let tags: Tags = parsely_xml::from_str("<tags><tag>a</tag><tag>b</tag><tag>c</tag></tags>")?;
/// assert_eq!(tags.tag, ["a", "b", "c"]);
/// # Ok::<(), parsely_xml::DeserializeError>(())
/// ```
pub fn from_str<T: ParselyType>(input: &str) -> Result<T, DeserializeError> {
    from_str_with_options(input, &DeserializeOptions::default())
}

/// Decode an XML string into a [`ParselyType`] with explicit options.
pub fn from_str_with_options<T: ParselyType>(
    input: &str,
    options: &DeserializeOptions,
) -> Result<T, DeserializeError> {
    let parser = XmlParser::new(input.as_bytes());
    DomDeserializer::with_options(parser, options.clone()).deserialize_typed::<T>()
}

/// Decode XML bytes into a [`ParselyType`]. Invalid UTF-8 is a syntax error.
pub fn from_slice<T: ParselyType>(input: &[u8]) -> Result<T, DeserializeError> {
    from_str(utf8(input)?)
}

/// Run only the tree builder and return the generic node tree.
///
/// ```
/// use parsely_xml::{Entry, Node};
///
/// let doc = parsely_xml::parse_document("<tags><tag> a </tag><tag>b</tag></tags>")?;
/// assert_eq!(doc.root_tag(), "tags");
///
/// let Some(Entry::Single(Node::Composite(tags))) = doc.root() else {
///     panic!("expected an element");
/// };
/// let texts: Vec<_> = tags.get("tag").unwrap().nodes().iter().filter_map(Node::as_scalar).collect();
/// assert_eq!(texts, ["a", "b"]);
/// # Ok::<(), parsely_xml::DeserializeError>(())
/// ```
pub fn parse_document(input: &str) -> Result<Document, DeserializeError> {
    DomDeserializer::new(XmlParser::new(input.as_bytes())).build_document()
}

fn utf8(input: &[u8]) -> Result<&str, DeserializeError> {
    std::str::from_utf8(input).map_err(|e| DomDeserializeError::Parser(XmlError::InvalidUtf8(e)))
}
