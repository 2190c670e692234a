//! Field descriptors: the caller-supplied description of a target type.

use std::borrow::Cow;
use std::fmt;

use crate::ScalarType;

/// The shape of a composite type: a name plus an ordered list of fields.
///
/// ```
/// use parsely_core::{FieldDef, ScalarType, Shape};
///
/// let address = Shape::new("Address").field(FieldDef::scalar("city", ScalarType::String));
/// let customer = Shape::new("Customer")
///     .field(FieldDef::scalar("name", ScalarType::String))
///     .field(FieldDef::object("address", address))
///     .field(FieldDef::scalar("email", ScalarType::String).optional());
///
/// assert_eq!(customer.fields().len(), 3);
/// assert!(customer.get("email").unwrap().is_optional());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    name: Cow<'static, str>,
    fields: Vec<FieldDef>,
}

impl Shape {
    /// Create a shape with no fields.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Create a shape from a list of fields.
    pub fn with_fields(
        name: impl Into<Cow<'static, str>>,
        fields: impl IntoIterator<Item = FieldDef>,
    ) -> Self {
        Self {
            name: name.into(),
            fields: fields.into_iter().collect(),
        }
    }

    /// Append a field.
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// The type name, for diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// One field of a [`Shape`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    name: Cow<'static, str>,
    kind: FieldKind,
    optional: bool,
}

impl FieldDef {
    /// A required field of the given kind.
    pub fn new(name: impl Into<Cow<'static, str>>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            optional: false,
        }
    }

    /// A required scalar field.
    pub fn scalar(name: impl Into<Cow<'static, str>>, ty: ScalarType) -> Self {
        Self::new(name, FieldKind::Scalar(ty))
    }

    /// A required nested object field.
    pub fn object(name: impl Into<Cow<'static, str>>, shape: Shape) -> Self {
        Self::new(name, FieldKind::Object(shape))
    }

    /// A required sequence field.
    pub fn sequence(name: impl Into<Cow<'static, str>>, element: impl Into<ElementKind>) -> Self {
        Self::new(name, FieldKind::Sequence(element.into()))
    }

    /// Mark this field optional: absence decodes to `Value::Null`.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// The element tag this field reads.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// What this field decodes into.
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Whether absence is allowed.
    pub fn is_optional(&self) -> bool {
        self.optional
    }
}

/// What a field decodes into.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// A single scalar.
    Scalar(ScalarType),
    /// A nested object.
    Object(Shape),
    /// A sequence of repeated sibling elements.
    Sequence(ElementKind),
}

/// What each element of a sequence decodes into.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// Each element is a scalar.
    Scalar(ScalarType),
    /// Each element is an object.
    Object(Shape),
}

impl From<ScalarType> for ElementKind {
    fn from(ty: ScalarType) -> Self {
        ElementKind::Scalar(ty)
    }
}

impl From<Shape> for ElementKind {
    fn from(shape: Shape) -> Self {
        ElementKind::Object(shape)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Scalar(ty) => write!(f, "{ty}"),
            ElementKind::Object(shape) => write!(f, "object {}", shape.name()),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Scalar(ty) => write!(f, "{ty}"),
            FieldKind::Object(shape) => write!(f, "object {}", shape.name()),
            FieldKind::Sequence(element) => write!(f, "sequence of {element}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_kinds() {
        let book = Shape::new("Book").field(FieldDef::scalar("title", ScalarType::String));
        let field = FieldDef::sequence("books", book);
        assert_eq!(field.kind().to_string(), "sequence of object Book");
        assert_eq!(
            FieldDef::sequence("tag", ScalarType::String).kind().to_string(),
            "sequence of string"
        );
        assert!(!field.is_optional());
    }

    #[test]
    fn with_fields_keeps_order() {
        let shape = Shape::with_fields(
            "User",
            [
                FieldDef::scalar("userId", ScalarType::String),
                FieldDef::scalar("age", ScalarType::I64),
                FieldDef::scalar("isActive", ScalarType::Bool),
            ],
        );
        let names: Vec<_> = shape.fields().iter().map(FieldDef::name).collect();
        assert_eq!(names, ["userId", "age", "isActive"]);
        assert_eq!(shape.get("age").map(FieldDef::kind), Some(&FieldKind::Scalar(ScalarType::I64)));
        assert!(shape.get("missing").is_none());
    }
}
