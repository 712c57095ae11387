//! Dynamic values flowing through resolvers, scalar coercion and defaults.

mod object;

use std::fmt;

use fnv::FnvHashMap;
use itertools::Itertools as _;

use crate::{ast, parser::LexerError};

pub use self::object::Object;

/// Variable values supplied alongside a query, keyed by variable name.
pub type Variables = FnvHashMap<String, Value>;

/// Serializable value returned from query and field execution.
///
/// Also used for the internal representation of enum values, scalar coercion
/// results and default values.
#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Int(i32),
    Float(f64),
    String(String),
    Boolean(bool),
    List(Vec<Value>),
    Object(Object),
}

impl Value {
    /// Construct a null value.
    pub fn null() -> Self {
        Self::Null
    }

    /// Construct a list value.
    pub fn list(l: Vec<Self>) -> Self {
        Self::List(l)
    }

    /// Construct an object value.
    pub fn object(o: Object) -> Self {
        Self::Object(o)
    }

    /// Does this value represent null?
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// View the underlying int value, if present.
    pub fn as_int_value(&self) -> Option<i32> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// View the underlying float value, if present.
    ///
    /// Int values are widened to floats.
    pub fn as_float_value(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(f64::from(*i)),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// View the underlying string value, if present.
    pub fn as_string_value(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// View the underlying boolean value, if present.
    pub fn as_boolean_value(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// View the underlying list value, if present.
    pub fn as_list_value(&self) -> Option<&[Self]> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    /// View the underlying object value, if present.
    pub fn as_object_value(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Converts a parsed literal into a runtime value.
    ///
    /// Variables are substituted from `vars`, the missing ones becoming null.
    /// Enum literals become their name as a string. Int literals not fitting
    /// into an `i32` become floats.
    ///
    /// # Errors
    ///
    /// If a string literal holds an invalid escape sequence.
    pub fn from_literal(literal: &ast::Value<'_>, vars: &Variables) -> Result<Self, LexerError> {
        Ok(match literal {
            ast::Value::Null => Self::Null,
            ast::Value::Int(i) => i.parse::<i32>().map(Self::Int).unwrap_or_else(|_| {
                i.parse::<f64>().map_or(Self::Null, Self::Float)
            }),
            ast::Value::Float(f) => f.parse::<f64>().map_or(Self::Null, Self::Float),
            ast::Value::String(s) => Self::String(s.parse()?.into_owned()),
            ast::Value::Boolean(b) => Self::Boolean(*b),
            ast::Value::Enum(e) => Self::String((*e).into()),
            ast::Value::Variable(name) => vars.get(*name).cloned().unwrap_or_default(),
            ast::Value::List(l) => Self::List(
                l.iter()
                    .map(|v| Self::from_literal(&v.item, vars))
                    .collect::<Result<_, _>>()?,
            ),
            ast::Value::Object(o) => {
                let mut obj = Object::with_capacity(o.len());
                for field in o {
                    let value = Self::from_literal(&field.item.value.item, vars)?;
                    obj.add_field(field.item.name.item, value);
                }
                Self::Object(obj)
            }
        })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::List(l) => write!(f, "[{}]", l.iter().format(", ")),
            Self::Object(o) => write!(
                f,
                "{{{}}}",
                o.iter().format_with(", ", |(k, v), f| f(&format_args!("{k:?}: {v}"))),
            ),
        }
    }
}

impl<T> From<Option<T>> for Value
where
    Self: From<T>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(l: Vec<Value>) -> Self {
        Self::List(l)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::parse_value;

    use super::{Object, Value, Variables};

    fn from_source(source: &str, vars: &Variables) -> Value {
        let literal = parse_value(source, false).unwrap();
        Value::from_literal(&literal.item, vars).unwrap()
    }

    #[test]
    fn display_value() {
        let obj: Object = [
            ("int", Value::from(1)),
            ("str", Value::from("a\"b")),
            ("list", Value::from(vec![Value::from(true), Value::null()])),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            Value::object(obj).to_string(),
            r#"{"int": 1, "str": "a\"b", "list": [true, null]}"#,
        );
    }

    #[test]
    fn literal_to_value() {
        let mut vars = Variables::default();
        vars.insert("given".into(), Value::from(7));

        assert_eq!(
            from_source(
                r#"{a: 1, b: 2.5, c: "x\ny", d: RED, e: $given, f: $missing, g: [null, false]}"#,
                &vars,
            ),
            Value::object(
                [
                    ("a", Value::from(1)),
                    ("b", Value::from(2.5)),
                    ("c", Value::from("x\ny")),
                    ("d", Value::from("RED")),
                    ("e", Value::from(7)),
                    ("f", Value::null()),
                    ("g", Value::from(vec![Value::null(), Value::from(false)])),
                ]
                .into_iter()
                .collect(),
            ),
        );
    }

    #[test]
    fn int_literal_out_of_range_becomes_float() {
        assert_eq!(
            from_source("2147483648", &Variables::default()),
            Value::from(2_147_483_648.0),
        );
        assert_eq!(
            from_source("-2147483648", &Variables::default()),
            Value::from(i32::MIN),
        );
    }
}
