//! Conversion from decoded [`Value`]s into caller types.

use crate::{DecodeError, DecodeErrorKind, Object, Path, PathStep, Shape, Value};

/// Types that can be built from a decoded [`Value`].
///
/// `path` is the location of `value` in the document; implementations append
/// to it when descending and restore it before returning.
pub trait FromValue: Sized {
    /// Convert a decoded value.
    fn from_value(value: Value, path: &mut Path) -> Result<Self, DecodeError>;
}

/// A type that knows its own [`Shape`] and can be built from a decoded value.
///
/// This is the usual way to decode straight into a struct:
///
/// ```
/// use parsely_core::{FieldDef, FromValue, Object, ParselyType, Path, ScalarType, Shape, Value};
///
/// struct User {
///     user_id: String,
///     age: i64,
/// }
///
/// impl ParselyType for User {
///     fn shape() -> Shape {
///         Shape::new("User")
///             .field(FieldDef::scalar("userId", ScalarType::String))
///             .field(FieldDef::scalar("age", ScalarType::I64))
///     }
/// }
///
/// impl FromValue for User {
///     fn from_value(value: Value, path: &mut Path) -> Result<Self, parsely_core::DecodeError> {
///         let mut object = Object::from_value(value, path)?;
///         Ok(User {
///             user_id: object.take("userId", path)?,
///             age: object.take("age", path)?,
///         })
///     }
/// }
/// ```
pub trait ParselyType: FromValue {
    /// The shape the decode engine should validate against.
    fn shape() -> Shape;
}

fn mismatch(expected: impl Into<String>, value: &Value, path: &Path) -> DecodeError {
    DecodeError::type_mismatch(
        path.last_field().unwrap_or_default(),
        expected,
        value.kind_name(),
        path.clone(),
    )
}

macro_rules! impl_from_value {
    ($($ty:ty => $variant:ident, $name:literal;)*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Value, path: &mut Path) -> Result<Self, DecodeError> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(mismatch($name, &other, path)),
                    }
                }
            }
        )*
    };
}

impl_from_value! {
    bool => Bool, "bool";
    i8 => I8, "i8";
    i16 => I16, "i16";
    i32 => I32, "i32";
    i64 => I64, "i64";
    isize => ISize, "isize";
    u8 => U8, "u8";
    u16 => U16, "u16";
    u32 => U32, "u32";
    u64 => U64, "u64";
    usize => USize, "usize";
    f32 => F32, "f32";
    f64 => F64, "f64";
    String => String, "string";
    Object => Object, "object";
}

impl FromValue for Value {
    fn from_value(value: Value, _path: &mut Path) -> Result<Self, DecodeError> {
        Ok(value)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value, path: &mut Path) -> Result<Self, DecodeError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other, path).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    /// `Null` (an absent optional sequence) becomes an empty vector.
    fn from_value(value: Value, path: &mut Path) -> Result<Self, DecodeError> {
        match value {
            Value::Null => Ok(Vec::new()),
            Value::Array(items) => {
                let mut cursor = SeqCursor::new(items);
                let mut out = Vec::with_capacity(cursor.len());
                while !cursor.is_at_end() {
                    out.push(cursor.next_value(path)?);
                }
                Ok(out)
            }
            other => Err(mismatch("sequence", &other, path)),
        }
    }
}

impl<T: FromValue, const N: usize> FromValue for [T; N] {
    /// Reads exactly `N` elements: too few is `ValueExhausted`, too many a type mismatch.
    fn from_value(value: Value, path: &mut Path) -> Result<Self, DecodeError> {
        let items = match value {
            Value::Array(items) => items,
            other => return Err(mismatch(format!("sequence of {N}"), &other, path)),
        };
        let len = items.len();
        if len > N {
            return Err(DecodeError::type_mismatch(
                path.last_field().unwrap_or_default(),
                format!("sequence of {N}"),
                format!("sequence of {len}"),
                path.clone(),
            ));
        }

        let mut cursor = SeqCursor::new(items);
        let mut out = Vec::with_capacity(N);
        for _ in 0..N {
            out.push(cursor.next_value(path)?);
        }
        out.try_into().map_err(|_: Vec<T>| {
            DecodeError::new(DecodeErrorKind::ValueExhausted { index: len, len }, path.clone())
        })
    }
}

/// Element-wise reader over a decoded sequence.
///
/// Each successful [`next_value`](Self::next_value) consumes one element;
/// reading past the end fails with `ValueExhausted`.
#[derive(Debug)]
pub struct SeqCursor {
    items: std::vec::IntoIter<Value>,
    index: usize,
    len: usize,
}

impl SeqCursor {
    /// Start reading from the first element.
    pub fn new(items: Vec<Value>) -> Self {
        let len = items.len();
        Self {
            items: items.into_iter(),
            index: 0,
            len,
        }
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the sequence has no elements at all.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index of the next element to be read.
    pub fn position(&self) -> usize {
        self.index
    }

    /// Returns true once every element has been read.
    pub fn is_at_end(&self) -> bool {
        self.index >= self.len
    }

    /// Convert and consume the next element.
    pub fn next_value<T: FromValue>(&mut self, path: &mut Path) -> Result<T, DecodeError> {
        path.push(PathStep::Index(self.index));
        let result = match self.items.next() {
            Some(value) => T::from_value(value, path),
            None => Err(DecodeError::new(
                DecodeErrorKind::ValueExhausted {
                    index: self.index,
                    len: self.len,
                },
                path.clone(),
            )),
        };
        path.pop();
        if result.is_ok() {
            self.index += 1;
        }
        result
    }
}
