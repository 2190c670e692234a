//! Shape-directed decoding of DOM documents.

use std::marker::PhantomData;

use parsely_core::{DecodeError, DecodeErrorKind, ParselyType, Path, PathStep, Shape, Value};

use crate::error::DomDeserializeError;
use crate::tracing_macros::{trace, trace_span};
use crate::{DeserializeOptions, Document, DomParser, Entry, Fields, Node, RootPolicy, TreeBuilder};

mod engine;

use engine::Decoder;

/// DOM deserializer.
///
/// Drains a [`DomParser`] into a [`Document`] and then decodes that document
/// against a [`Shape`]. Both phases run to completion; syntax errors are
/// reported before any field is looked at.
pub struct DomDeserializer<'de, P> {
    parser: P,
    options: DeserializeOptions,
    _marker: PhantomData<&'de ()>,
}

impl<'de, P> DomDeserializer<'de, P>
where
    P: DomParser<'de>,
{
    /// Create a deserializer with default options.
    pub fn new(parser: P) -> Self {
        Self::with_options(parser, DeserializeOptions::default())
    }

    /// Create a deserializer with the given options.
    pub fn with_options(parser: P, options: DeserializeOptions) -> Self {
        Self {
            parser,
            options,
            _marker: PhantomData,
        }
    }

    /// Run only the tree builder.
    pub fn build_document(self) -> Result<Document, DomDeserializeError<P::Error>> {
        TreeBuilder::with_max_depth(self.options.max_depth).consume(self.parser)
    }

    /// Decode the document into a dynamic [`Value`] shaped by `shape`.
    ///
    /// The result is always a `Value::Object` with one entry per field of
    /// `shape`, in declaration order.
    pub fn deserialize(self, shape: &Shape) -> Result<Value, DomDeserializeError<P::Error>> {
        let options = self.options;
        let document = TreeBuilder::with_max_depth(options.max_depth).consume(self.parser)?;
        Ok(decode_document(&document, shape, &options)?)
    }

    /// Decode the document into a [`ParselyType`].
    pub fn deserialize_typed<T: ParselyType>(self) -> Result<T, DomDeserializeError<P::Error>> {
        let options = self.options;
        let shape = T::shape();
        let document = TreeBuilder::with_max_depth(options.max_depth).consume(self.parser)?;
        let value = decode_document(&document, &shape, &options)?;

        let mut path = Path::new();
        if !is_wrapped(&document, &shape, options.root) {
            path.push(PathStep::Field(document.root_tag().to_string()));
        }
        T::from_value(value, &mut path).map_err(|e| {
            options.observer.failed(&e);
            DomDeserializeError::Decode(e)
        })
    }
}

/// Decode an already-built document against `shape`.
///
/// The document is the mapping `{root_tag: entry}`. Whether `shape` applies
/// to that mapping or to the root element's children is decided by
/// [`RootPolicy`].
pub fn decode_document(
    document: &Document,
    shape: &Shape,
    options: &DeserializeOptions,
) -> Result<Value, DecodeError> {
    trace_span!("decode_document", root = document.root_tag(), shape = shape.name());
    options.observer.document_built(document);

    let mut decoder = Decoder::new(options);
    let result = decode_root(&mut decoder, document, shape, options.root);
    if let Err(e) = &result {
        trace!(error = %e, "decode failed");
        options.observer.failed(e);
    }
    result
}

fn decode_root(
    decoder: &mut Decoder<'_>,
    document: &Document,
    shape: &Shape,
    policy: RootPolicy,
) -> Result<Value, DecodeError> {
    if is_wrapped(document, shape, policy) {
        trace!("applying shape to the document mapping");
        return decoder.decode_fields(document.fields(), shape).map(Value::Object);
    }

    let root_tag = document.root_tag();
    decoder.path_mut().push(PathStep::Field(root_tag.to_string()));
    let empty = Fields::new();
    let fields = match document.root() {
        None => &empty,
        Some(Entry::Single(Node::Composite(fields))) => fields,
        Some(other) => {
            return Err(DecodeError::new(
                DecodeErrorKind::TypeMismatch {
                    key: root_tag.to_string(),
                    expected: format!("object {}", shape.name()),
                    got: other.describe(),
                },
                decoder.path_mut().clone(),
            ));
        }
    };
    decoder.decode_fields(fields, shape).map(Value::Object)
}

fn is_wrapped(document: &Document, shape: &Shape, policy: RootPolicy) -> bool {
    match policy {
        RootPolicy::Auto => match shape.fields() {
            [only] => only.name() == document.root_tag(),
            _ => false,
        },
        RootPolicy::Wrapped => true,
        RootPolicy::Unwrapped => false,
    }
}
