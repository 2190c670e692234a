//! Field-level decoding of a node tree against a shape.

use parsely_core::{
    DecodeError, DecodeErrorKind, ElementKind, FieldDef, FieldKind, Object, Path, PathStep,
    ScalarType, Shape, Value,
};

use crate::tracing_macros::{trace, trace_span};
use crate::{DeserializeOptions, Entry, Fields, Node, SequencePolicy};

/// Walks the tree for one decode call, tracking the current path.
///
/// The first failure aborts the walk; errors carry a copy of the path at the
/// point they were raised.
pub(crate) struct Decoder<'o> {
    options: &'o DeserializeOptions,
    path: Path,
}

impl<'o> Decoder<'o> {
    pub(crate) fn new(options: &'o DeserializeOptions) -> Self {
        Self {
            options,
            path: Path::new(),
        }
    }

    pub(crate) fn path_mut(&mut self) -> &mut Path {
        &mut self.path
    }

    /// Decode every field of `shape` from `fields`, in declaration order.
    pub(crate) fn decode_fields(
        &mut self,
        fields: &Fields,
        shape: &Shape,
    ) -> Result<Object, DecodeError> {
        trace_span!("decode_fields", shape = shape.name());

        let mut object = Object::with_capacity(shape.fields().len());
        for field in shape.fields() {
            self.path.push(PathStep::Field(field.name().to_string()));
            self.options.observer.enter_field(&self.path);
            let value = self.decode_field(fields.get(field.name()), field);
            self.path.pop();
            object.insert(field.name(), value?);
        }
        Ok(object)
    }

    fn decode_field(&mut self, entry: Option<&Entry>, field: &FieldDef) -> Result<Value, DecodeError> {
        let Some(entry) = entry else {
            if field.is_optional() {
                trace!(field = field.name(), "optional field absent");
                self.options.observer.field_absent(&self.path);
                return Ok(Value::Null);
            }
            return Err(DecodeError::new(
                DecodeErrorKind::KeyNotFound {
                    key: field.name().to_string(),
                },
                self.path.clone(),
            ));
        };

        match field.kind() {
            FieldKind::Scalar(ty) => self.decode_scalar(field.name(), entry, *ty),
            FieldKind::Object(shape) => self.decode_nested(field.name(), entry, shape),
            FieldKind::Sequence(element) => self.decode_sequence(field.name(), entry, element),
        }
    }

    fn decode_scalar(&mut self, key: &str, entry: &Entry, ty: ScalarType) -> Result<Value, DecodeError> {
        match entry {
            Entry::Single(node) => self.decode_scalar_node(key, node, ty),
            Entry::Sequence(_) => Err(self.mismatch(key, ty, entry.describe())),
        }
    }

    fn decode_scalar_node(&mut self, key: &str, node: &Node, ty: ScalarType) -> Result<Value, DecodeError> {
        let Node::Scalar(text) = node else {
            return Err(self.mismatch(key, ty, node.describe()));
        };
        let value = ty
            .coerce(text)
            .map_err(|e| self.mismatch(key, ty, format!("{} ({})", node.describe(), e.reason)))?;
        trace!(key, ty = ty.name(), "scalar decoded");
        self.options.observer.scalar_decoded(&self.path, &value);
        Ok(value)
    }

    fn decode_nested(&mut self, key: &str, entry: &Entry, shape: &Shape) -> Result<Value, DecodeError> {
        match entry {
            Entry::Single(node) => self.decode_nested_node(key, node, shape),
            Entry::Sequence(_) => Err(self.mismatch(key, object_name(shape), entry.describe())),
        }
    }

    fn decode_nested_node(&mut self, key: &str, node: &Node, shape: &Shape) -> Result<Value, DecodeError> {
        match node {
            Node::Composite(fields) => self.decode_fields(fields, shape).map(Value::Object),
            Node::Scalar(_) => Err(self.mismatch(key, object_name(shape), node.describe())),
        }
    }

    fn decode_sequence(
        &mut self,
        key: &str,
        entry: &Entry,
        element: &ElementKind,
    ) -> Result<Value, DecodeError> {
        let nodes = match entry {
            Entry::Sequence(nodes) => nodes.as_slice(),
            Entry::Single(_) => match self.options.sequence_policy {
                SequencePolicy::Lenient => entry.nodes(),
                SequencePolicy::Strict => {
                    return Err(self.mismatch(key, format!("sequence of {element}"), entry.describe()));
                }
            },
        };

        let mut items = Vec::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            self.path.push(PathStep::Index(index));
            let item = self.decode_element(key, node, element);
            self.path.pop();
            items.push(item?);
        }
        self.options.observer.sequence_decoded(&self.path, items.len());
        Ok(Value::Array(items))
    }

    fn decode_element(&mut self, key: &str, node: &Node, element: &ElementKind) -> Result<Value, DecodeError> {
        match element {
            ElementKind::Scalar(ty) => self.decode_scalar_node(key, node, *ty),
            ElementKind::Object(shape) => self.decode_nested_node(key, node, shape),
        }
    }

    fn mismatch(&self, key: &str, expected: impl ToString, got: String) -> DecodeError {
        DecodeError::type_mismatch(key, expected.to_string(), got, self.path.clone())
    }
}

fn object_name(shape: &Shape) -> String {
    format!("object {}", shape.name())
}
