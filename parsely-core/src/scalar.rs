//! Scalar kinds and the text coercion table.

use std::borrow::Cow;
use std::fmt;

use crate::Value;

/// The closed set of scalar kinds a field can be decoded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// `String`, taken verbatim.
    String,
    /// `bool`, from `true`/`1`/`yes`/`y` or `false`/`0`/`no`/`n`.
    Bool,
    /// Primitive type `i8`.
    I8,
    /// Primitive type `i16`.
    I16,
    /// Primitive type `i32`.
    I32,
    /// Primitive type `i64`.
    I64,
    /// Primitive type `isize`.
    ISize,
    /// Primitive type `u8`.
    U8,
    /// Primitive type `u16`.
    U16,
    /// Primitive type `u32`.
    U32,
    /// Primitive type `u64`.
    U64,
    /// Primitive type `usize`.
    USize,
    /// Primitive type `f32`.
    F32,
    /// Primitive type `f64`.
    F64,
}

impl ScalarType {
    /// Every scalar kind, in declaration order.
    pub const ALL: [ScalarType; 14] = [
        ScalarType::String,
        ScalarType::Bool,
        ScalarType::I8,
        ScalarType::I16,
        ScalarType::I32,
        ScalarType::I64,
        ScalarType::ISize,
        ScalarType::U8,
        ScalarType::U16,
        ScalarType::U32,
        ScalarType::U64,
        ScalarType::USize,
        ScalarType::F32,
        ScalarType::F64,
    ];

    /// Short lowercase name, as used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            ScalarType::String => "string",
            ScalarType::Bool => "bool",
            ScalarType::I8 => "i8",
            ScalarType::I16 => "i16",
            ScalarType::I32 => "i32",
            ScalarType::I64 => "i64",
            ScalarType::ISize => "isize",
            ScalarType::U8 => "u8",
            ScalarType::U16 => "u16",
            ScalarType::U32 => "u32",
            ScalarType::U64 => "u64",
            ScalarType::USize => "usize",
            ScalarType::F32 => "f32",
            ScalarType::F64 => "f64",
        }
    }

    /// Returns true for the ten integer kinds.
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            ScalarType::I8
                | ScalarType::I16
                | ScalarType::I32
                | ScalarType::I64
                | ScalarType::ISize
                | ScalarType::U8
                | ScalarType::U16
                | ScalarType::U32
                | ScalarType::U64
                | ScalarType::USize
        )
    }

    /// Returns true for `f32` and `f64`.
    pub const fn is_float(self) -> bool {
        matches!(self, ScalarType::F32 | ScalarType::F64)
    }

    /// Coerce already-trimmed text into a value of this kind.
    ///
    /// `String` never fails. Integers accept base-10 digits with an optional
    /// sign and reject overflow; floats accept decimal and exponential
    /// literals; booleans use [`parse_bool`].
    pub fn coerce(self, text: &str) -> Result<Value, CoerceError> {
        let fail = |reason: Cow<'static, str>| CoerceError {
            expected: self,
            input: text.to_string(),
            reason,
        };

        macro_rules! parse_as {
            ($ty:ty, $variant:ident) => {
                text.parse::<$ty>()
                    .map(Value::$variant)
                    .map_err(|e| fail(Cow::Owned(e.to_string())))
            };
        }

        match self {
            ScalarType::String => Ok(Value::String(text.to_string())),
            ScalarType::Bool => parse_bool(text)
                .map(Value::Bool)
                .ok_or_else(|| fail(Cow::Borrowed("not a recognized boolean literal"))),
            ScalarType::I8 => parse_as!(i8, I8),
            ScalarType::I16 => parse_as!(i16, I16),
            ScalarType::I32 => parse_as!(i32, I32),
            ScalarType::I64 => parse_as!(i64, I64),
            ScalarType::ISize => parse_as!(isize, ISize),
            ScalarType::U8 => parse_as!(u8, U8),
            ScalarType::U16 => parse_as!(u16, U16),
            ScalarType::U32 => parse_as!(u32, U32),
            ScalarType::U64 => parse_as!(u64, U64),
            ScalarType::USize => parse_as!(usize, USize),
            ScalarType::F32 => parse_as!(f32, F32),
            ScalarType::F64 => parse_as!(f64, F64),
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a boolean literal, ignoring ASCII case.
///
/// `true`, `1`, `yes` and `y` are true; `false`, `0`, `no` and `n` are false.
/// Anything else is `None`.
pub fn parse_bool(text: &str) -> Option<bool> {
    const TRUE: [&str; 4] = ["true", "1", "yes", "y"];
    const FALSE: [&str; 4] = ["false", "0", "no", "n"];

    if TRUE.iter().any(|t| t.eq_ignore_ascii_case(text)) {
        Some(true)
    } else if FALSE.iter().any(|t| t.eq_ignore_ascii_case(text)) {
        Some(false)
    } else {
        None
    }
}

/// Text could not be coerced into the requested scalar kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoerceError {
    /// The kind that was requested.
    pub expected: ScalarType,
    /// The offending text.
    pub input: String,
    /// Why the conversion failed.
    pub reason: Cow<'static, str>,
}

impl fmt::Display for CoerceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot convert {:?} to {}: {}",
            self.input, self.expected, self.reason
        )
    }
}

impl std::error::Error for CoerceError {}
