//! Built-in scalar types with their coercion rules.

use std::sync::{Arc, LazyLock};

use crate::schema::meta::Scalar;

/// `Int`: a signed 32-bit integer.
pub static INT: LazyLock<Arc<Scalar>> = LazyLock::new(|| {
    Arc::new(
        Scalar::new("Int")
            .description(
                "The `Int` scalar type represents non-fractional signed whole numeric values. \
                 Int can represent values between -(2^31) and 2^31 - 1.",
            )
            .serialize_with(impl_int_scalar::serialize)
            .parse_value_with(impl_int_scalar::parse_value)
            .parse_literal_with(impl_int_scalar::parse_literal),
    )
});

/// `Float`: a signed double-precision fractional value.
pub static FLOAT: LazyLock<Arc<Scalar>> = LazyLock::new(|| {
    Arc::new(
        Scalar::new("Float")
            .description(
                "The `Float` scalar type represents signed double-precision fractional values \
                 as specified by [IEEE 754](http://en.wikipedia.org/wiki/IEEE_floating_point).",
            )
            .serialize_with(impl_float_scalar::serialize)
            .parse_value_with(impl_float_scalar::parse_value)
            .parse_literal_with(impl_float_scalar::parse_literal),
    )
});

/// `String`: UTF-8 character sequences.
pub static STRING: LazyLock<Arc<Scalar>> = LazyLock::new(|| {
    Arc::new(
        Scalar::new("String")
            .description(
                "The `String` scalar type represents textual data, represented as UTF-8 \
                 character sequences.",
            )
            .serialize_with(impl_string_scalar::serialize)
            .parse_value_with(impl_string_scalar::parse_value)
            .parse_literal_with(impl_string_scalar::parse_literal),
    )
});

/// `Boolean`: `true` or `false`.
pub static BOOLEAN: LazyLock<Arc<Scalar>> = LazyLock::new(|| {
    Arc::new(
        Scalar::new("Boolean")
            .description("The `Boolean` scalar type represents `true` or `false`.")
            .serialize_with(impl_boolean_scalar::serialize)
            .parse_value_with(impl_boolean_scalar::parse_value)
            .parse_literal_with(impl_boolean_scalar::parse_literal),
    )
});

/// `ID`: a unique identifier, serialized as a string.
///
/// Accepts both string and integer inputs.
pub static ID: LazyLock<Arc<Scalar>> = LazyLock::new(|| {
    Arc::new(
        Scalar::new("ID")
            .description(
                "The `ID` scalar type represents a unique identifier, often used to refetch an \
                 object or as key for a cache.",
            )
            .serialize_with(impl_id_scalar::serialize)
            .parse_value_with(impl_id_scalar::parse_value)
            .parse_literal_with(impl_id_scalar::parse_literal),
    )
});

/// All the built-in scalar types, in their conventional order.
pub fn built_in_scalars() -> [Arc<Scalar>; 5] {
    [&INT, &FLOAT, &STRING, &BOOLEAN, &ID].map(|s| Arc::clone(s))
}

mod impl_int_scalar {
    use crate::{ast, value::Value};

    pub(super) fn serialize(v: &Value) -> Option<Value> {
        match v {
            Value::Int(i) => Some(Value::Int(*i)),
            Value::Float(f) if f.fract() == 0.0 => float_to_int(*f).map(Value::Int),
            Value::Boolean(b) => Some(Value::Int(i32::from(*b))),
            Value::String(s) => s.parse::<i32>().ok().map(Value::Int),
            _ => None,
        }
    }

    pub(super) fn parse_value(v: &Value) -> Option<Value> {
        v.as_int_value().map(Value::Int)
    }

    pub(super) fn parse_literal(lit: &ast::Value<'_>) -> Option<Value> {
        match lit {
            ast::Value::Int(i) => i.parse::<i32>().ok().map(Value::Int),
            _ => None,
        }
    }

    fn float_to_int(f: f64) -> Option<i32> {
        (f64::from(i32::MIN)..=f64::from(i32::MAX))
            .contains(&f)
            .then_some(f as i32)
    }
}

mod impl_float_scalar {
    use crate::{ast, value::Value};

    pub(super) fn serialize(v: &Value) -> Option<Value> {
        match v {
            Value::Boolean(b) => Some(Value::Float(if *b { 1.0 } else { 0.0 })),
            Value::String(s) => s.parse::<f64>().ok().map(Value::Float),
            v => v.as_float_value().map(Value::Float),
        }
    }

    pub(super) fn parse_value(v: &Value) -> Option<Value> {
        v.as_float_value().map(Value::Float)
    }

    pub(super) fn parse_literal(lit: &ast::Value<'_>) -> Option<Value> {
        match lit {
            ast::Value::Int(n) | ast::Value::Float(n) => n.parse::<f64>().ok().map(Value::Float),
            _ => None,
        }
    }
}

mod impl_string_scalar {
    use crate::{ast, value::Value};

    pub(super) fn serialize(v: &Value) -> Option<Value> {
        match v {
            Value::String(s) => Some(Value::String(s.clone())),
            Value::Int(_) | Value::Float(_) | Value::Boolean(_) => {
                Some(Value::String(v.to_string()))
            }
            _ => None,
        }
    }

    pub(super) fn parse_value(v: &Value) -> Option<Value> {
        v.as_string_value().map(Value::from)
    }

    pub(super) fn parse_literal(lit: &ast::Value<'_>) -> Option<Value> {
        match lit {
            ast::Value::String(s) => s.parse().ok().map(|s| Value::String(s.into_owned())),
            _ => None,
        }
    }
}

mod impl_boolean_scalar {
    use crate::{ast, value::Value};

    pub(super) fn serialize(v: &Value) -> Option<Value> {
        match v {
            Value::Boolean(b) => Some(Value::Boolean(*b)),
            Value::Int(i) => Some(Value::Boolean(*i != 0)),
            Value::Float(f) if f.is_finite() => Some(Value::Boolean(*f != 0.0)),
            _ => None,
        }
    }

    pub(super) fn parse_value(v: &Value) -> Option<Value> {
        v.as_boolean_value().map(Value::Boolean)
    }

    pub(super) fn parse_literal(lit: &ast::Value<'_>) -> Option<Value> {
        match lit {
            ast::Value::Boolean(b) => Some(Value::Boolean(*b)),
            _ => None,
        }
    }
}

mod impl_id_scalar {
    use crate::{ast, value::Value};

    pub(super) fn serialize(v: &Value) -> Option<Value> {
        match v {
            Value::String(s) => Some(Value::String(s.clone())),
            Value::Int(i) => Some(Value::String(i.to_string())),
            _ => None,
        }
    }

    pub(super) fn parse_value(v: &Value) -> Option<Value> {
        serialize(v)
    }

    pub(super) fn parse_literal(lit: &ast::Value<'_>) -> Option<Value> {
        match lit {
            ast::Value::String(s) => s.parse().ok().map(|s| Value::String(s.into_owned())),
            ast::Value::Int(i) => Some(Value::String((*i).into())),
            _ => None,
        }
    }
}
