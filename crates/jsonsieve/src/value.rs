//! JSON value types.
//!
//! This module defines the [`Value`] enum. The lexer only ever produces the
//! scalar variants; arrays and objects are materialized by the router when a
//! leaf callback asks for a whole subtree.
use alloc::{string::String, vec::Vec};

/// An insertion-ordered JSON object. Members keep document order.
pub type Map = indexmap::IndexMap<String, Value>;
/// A JSON array.
pub type Array = Vec<Value>;

/// The two container shapes a JSON document can nest.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// `[` ... `]`
    Array,
    /// `{` ... `}`
    Object,
}

impl ContainerKind {
    /// The character that opens a container of this kind.
    #[must_use]
    pub fn open_char(self) -> char {
        match self {
            ContainerKind::Array => '[',
            ContainerKind::Object => '{',
        }
    }

    /// The character that closes a container of this kind.
    #[must_use]
    pub fn close_char(self) -> char {
        match self {
            ContainerKind::Array => ']',
            ContainerKind::Object => '}',
        }
    }

    /// An empty value of this container kind.
    #[must_use]
    pub fn empty_value(self) -> Value {
        match self {
            ContainerKind::Array => Value::Array(Array::new()),
            ContainerKind::Object => Value::Object(Map::new()),
        }
    }
}

/// A JSON value as defined by [RFC 8259], plus the `NaN` and `Infinity`
/// extensions accepted by the lexer.
///
/// # Examples
///
/// ```
/// use jsonsieve::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("key".to_string(), Value::String("value".into()));
/// let v = Value::Object(map);
/// assert_eq!(v.to_string(), r#"{"key":"value"}"#);
/// ```
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// `null`
    #[default]
    Null,
    /// `true` or `false`
    Boolean(bool),
    /// Any number, including `NaN` and the infinities.
    Number(f64),
    /// A fully decoded string.
    String(String),
    /// A materialized array.
    Array(Array),
    /// A materialized object.
    Object(Map),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Returns `true` for the scalar variants (everything but arrays and
    /// objects).
    ///
    /// ```
    /// use jsonsieve::Value;
    ///
    /// assert!(Value::Null.is_scalar());
    /// assert!(!Value::Array(vec![]).is_scalar());
    /// ```
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::Array(..) | Self::Object(..))
    }

    /// Returns the container kind of an array or object value.
    #[must_use]
    pub fn container_kind(&self) -> Option<ContainerKind> {
        match self {
            Self::Array(..) => Some(ContainerKind::Array),
            Self::Object(..) => Some(ContainerKind::Object),
            _ => None,
        }
    }

    /// Returns the number if this value is a [`Number`](Value::Number).
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        if let Self::Number(n) = self {
            Some(*n)
        } else {
            None
        }
    }

    /// Returns the string slice if this value is a [`String`](Value::String).
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        if let Self::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    /// Returns the members if this value is an [`Object`](Value::Object).
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        if let Self::Object(m) = self {
            Some(m)
        } else {
            None
        }
    }

    /// Returns the elements if this value is an [`Array`](Value::Array).
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        if let Self::Array(a) = self {
            Some(a)
        } else {
            None
        }
    }
}

/// Escapes a string for inclusion in a JSON string literal.
pub(crate) fn write_escaped_string<W: core::fmt::Write>(src: &str, f: &mut W) -> core::fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{2028}' | '\u{2029}' => write!(f, "\\u{:04X}", c as u32)?,
            c if c.is_control() && (c as u32) <= 0xFFFF => write!(f, "\\u{:04X}", c as u32)?,
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

fn write_number<W: core::fmt::Write>(n: f64, f: &mut W) -> core::fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        write!(f, "{n}")
    }
}

/// Renders the value as JSON text. This exists for diagnostics and tests;
/// non-finite numbers use the same `NaN` / `Infinity` spellings the lexer
/// accepts.
impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Number(n) => write_number(*n, f),
            Value::String(s) => {
                f.write_str("\"")?;
                write_escaped_string(s, f)?;
                f.write_str("\"")
            }
            Value::Array(arr) => {
                f.write_str("[")?;
                for (i, v) in arr.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    f.write_str("\"")?;
                    write_escaped_string(k, f)?;
                    write!(f, "\":{v}")?;
                }
                f.write_str("}")
            }
        }
    }
}
