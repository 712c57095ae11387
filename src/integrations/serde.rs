use std::fmt;

use serde::{
    Deserialize, Serialize,
    de::{self, Deserializer},
    ser::{SerializeMap, Serializer},
};

use crate::{
    GraphQLError,
    executor::FieldError,
    schema::{
        meta::{
            Argument, DeprecationStatus, Enum, EnumValue, Field, InputField, InputObject,
            Interface, NamedType, Object, Scalar, Type, Union,
        },
        model::Schema,
    },
    value::{Object as ObjectValue, Value},
};

impl Serialize for GraphQLError {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(Some(2))?;

        map.serialize_key("message")?;
        map.serialize_value(&self.message)?;

        map.serialize_key("locations")?;
        map.serialize_value(&self.locations)?;

        map.end()
    }
}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(None)?;

        map.serialize_key("message")?;
        map.serialize_value(self.message())?;

        if !self.extensions().is_null() {
            map.serialize_key("extensions")?;
            map.serialize_value(self.extensions())?;
        }

        map.end()
    }
}

impl Serialize for ObjectValue {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(Some(self.field_count()))?;
        for (f, v) in self.iter() {
            map.serialize_key(f)?;
            map.serialize_value(v)?;
        }
        map.end()
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => ser.serialize_unit(),
            Self::Int(i) => ser.serialize_i32(*i),
            Self::Float(f) => ser.serialize_f64(*f),
            Self::String(s) => ser.serialize_str(s),
            Self::Boolean(b) => ser.serialize_bool(*b),
            Self::List(l) => l.serialize(ser),
            Self::Object(o) => o.serialize(ser),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = Value;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a valid input value")
            }

            fn visit_bool<E: de::Error>(self, b: bool) -> Result<Self::Value, E> {
                Ok(Value::Boolean(b))
            }

            fn visit_i64<E: de::Error>(self, n: i64) -> Result<Self::Value, E> {
                // Integers out of `Int` range are kept as `Float`, as
                // `JSON.stringify()` drops the fractional part of integral
                // numbers.
                Ok(i32::try_from(n).map_or(Value::Float(n as f64), Value::Int))
            }

            fn visit_u64<E: de::Error>(self, n: u64) -> Result<Self::Value, E> {
                Ok(i32::try_from(n).map_or(Value::Float(n as f64), Value::Int))
            }

            fn visit_f64<E: de::Error>(self, f: f64) -> Result<Self::Value, E> {
                Ok(Value::Float(f))
            }

            fn visit_str<E: de::Error>(self, s: &str) -> Result<Self::Value, E> {
                self.visit_string(s.into())
            }

            fn visit_string<E: de::Error>(self, s: String) -> Result<Self::Value, E> {
                Ok(Value::String(s))
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_seq<V>(self, mut visitor: V) -> Result<Self::Value, V::Error>
            where
                V: de::SeqAccess<'de>,
            {
                let mut vals = Vec::with_capacity(visitor.size_hint().unwrap_or(0));
                while let Some(v) = visitor.next_element()? {
                    vals.push(v);
                }
                Ok(Value::list(vals))
            }

            fn visit_map<V>(self, mut visitor: V) -> Result<Self::Value, V::Error>
            where
                V: de::MapAccess<'de>,
            {
                let mut obj = ObjectValue::with_capacity(visitor.size_hint().unwrap_or(0));
                while let Some((key, val)) = visitor.next_entry::<String, Value>()? {
                    obj.add_field(key, val);
                }
                Ok(Value::object(obj))
            }
        }

        de.deserialize_any(Visitor)
    }
}

// Introspection shape of the schema. Type references are written as their
// display form; resolution callbacks and handlers are left out.

impl<CtxT> Serialize for Type<CtxT> {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.collect_str(self)
    }
}

fn serialize_header<M: SerializeMap>(
    map: &mut M,
    kind: &str,
    name: &str,
    description: Option<&str>,
) -> Result<(), M::Error> {
    map.serialize_entry("kind", kind)?;
    map.serialize_entry("name", name)?;
    map.serialize_entry("description", &description)
}

fn serialize_deprecation<M: SerializeMap>(
    map: &mut M,
    status: &DeprecationStatus,
) -> Result<(), M::Error> {
    map.serialize_entry("isDeprecated", &status.is_deprecated())?;
    map.serialize_entry("deprecationReason", &status.reason())
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(Some(3))?;
        serialize_header(&mut map, "SCALAR", &self.name, self.description.as_deref())?;
        map.end()
    }
}

impl<CtxT> Serialize for Argument<CtxT> {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(Some(4))?;
        map.serialize_entry("name", self.name.as_str())?;
        map.serialize_entry("description", &self.description.as_deref())?;
        map.serialize_entry("type", &self.arg_type)?;
        map.serialize_entry("defaultValue", &self.default_value)?;
        map.end()
    }
}

impl<CtxT> Serialize for Field<CtxT> {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(Some(6))?;
        map.serialize_entry("name", self.name.as_str())?;
        map.serialize_entry("description", &self.description.as_deref())?;
        map.serialize_entry("args", &self.arguments.values().collect::<Vec<_>>())?;
        map.serialize_entry("type", &self.field_type)?;
        serialize_deprecation(&mut map, &self.deprecation_status)?;
        map.end()
    }
}

impl<CtxT> Serialize for Object<CtxT> {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let interfaces = self
            .implemented_interfaces()
            .iter()
            .map(|i| i.name.as_str())
            .collect::<Vec<_>>();

        let mut map = ser.serialize_map(Some(5))?;
        serialize_header(&mut map, "OBJECT", &self.name, self.description.as_deref())?;
        map.serialize_entry("fields", &self.field_list().collect::<Vec<_>>())?;
        map.serialize_entry("interfaces", &interfaces)?;
        map.end()
    }
}

impl<CtxT> Serialize for Interface<CtxT> {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(Some(4))?;
        serialize_header(&mut map, "INTERFACE", &self.name, self.description.as_deref())?;
        map.serialize_entry("fields", &self.field_list().collect::<Vec<_>>())?;
        map.end()
    }
}

impl<CtxT> Serialize for Union<CtxT> {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let possible_types = self
            .possible_types()
            .map(|o| o.name.as_str())
            .collect::<Vec<_>>();

        let mut map = ser.serialize_map(Some(4))?;
        serialize_header(&mut map, "UNION", &self.name, self.description.as_deref())?;
        map.serialize_entry("possibleTypes", &possible_types)?;
        map.end()
    }
}

impl Serialize for EnumValue {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(Some(4))?;
        map.serialize_entry("name", self.name.as_str())?;
        map.serialize_entry("description", &self.description.as_deref())?;
        serialize_deprecation(&mut map, &self.deprecation_status)?;
        map.end()
    }
}

impl Serialize for Enum {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(Some(4))?;
        serialize_header(&mut map, "ENUM", &self.name, self.description.as_deref())?;
        map.serialize_entry("enumValues", self.values())?;
        map.end()
    }
}

impl<CtxT> Serialize for InputField<CtxT> {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(Some(4))?;
        map.serialize_entry("name", self.name.as_str())?;
        map.serialize_entry("description", &self.description.as_deref())?;
        map.serialize_entry("type", &self.field_type)?;
        map.serialize_entry("defaultValue", &self.default_value)?;
        map.end()
    }
}

impl<CtxT> Serialize for InputObject<CtxT> {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(Some(4))?;
        serialize_header(&mut map, "INPUT_OBJECT", &self.name, self.description.as_deref())?;
        map.serialize_entry("inputFields", &self.field_list().collect::<Vec<_>>())?;
        map.end()
    }
}

impl<CtxT> Serialize for NamedType<CtxT> {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Scalar(s) => Serialize::serialize(&**s, ser),
            Self::Object(o) => o.serialize(ser),
            Self::Interface(i) => i.serialize(ser),
            Self::Union(u) => u.serialize(ser),
            Self::Enum(e) => e.serialize(ser),
            Self::InputObject(io) => io.serialize(ser),
        }
    }
}

impl<CtxT> Serialize for Schema<CtxT> {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(Some(4))?;
        map.serialize_entry("queryType", &self.query_type().and_then(Type::name))?;
        map.serialize_entry("mutationType", &self.mutation_type().and_then(Type::name))?;
        map.serialize_entry(
            "subscriptionType",
            &self.subscription_type().and_then(Type::name),
        )?;
        map.serialize_entry("types", &self.types())?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use serde_json::{from_str, json, to_string, to_value};

    use crate::{
        GraphQLError, parse,
        executor::FieldError,
        schema::{
            meta::{
                Argument, Enum, EnumValue, Field, InputField, InputObject, Interface, NamedType,
                Object, Scalar, Type, Union,
            },
            model::Schema,
        },
        types::scalars::{INT, STRING},
        value::{Object as ObjectValue, Value},
    };

    #[test]
    fn int() {
        assert_eq!(from_str::<Value>("1235").unwrap(), Value::from(1235));
    }

    #[test]
    fn float() {
        assert_eq!(from_str::<Value>("2.0").unwrap(), Value::from(2.0));
        // large value without a decimal part is also float
        assert_eq!(
            from_str::<Value>("123567890123").unwrap(),
            Value::from(123_567_890_123.0),
        );
    }

    #[test]
    fn nested_value() {
        let value = from_str::<Value>(r#"{"a": [1, null, "x"], "b": {"c": true}}"#).unwrap();

        assert_eq!(
            value,
            Value::object(
                [
                    (
                        "a",
                        Value::list(vec![Value::from(1), Value::null(), Value::from("x")]),
                    ),
                    (
                        "b",
                        Value::object([("c", Value::from(true))].into_iter().collect()),
                    ),
                ]
                .into_iter()
                .collect(),
            ),
        );
        assert_eq!(
            to_string(&value).unwrap(),
            r#"{"a":[1,null,"x"],"b":{"c":true}}"#,
        );
    }

    #[test]
    fn errors() {
        assert_eq!(
            to_string(&parse("{").unwrap_err()).unwrap(),
            concat!(
                r#"{"message":"Syntax Error: Expected Ident, found \"\".","#,
                r#""locations":[{"line":1,"column":2}]}"#,
            ),
        );
        assert_eq!(
            to_string(&GraphQLError::missing_source()).unwrap(),
            r#"{"message":"Must provide Source. Received: undefined.","locations":[]}"#,
        );
    }

    #[test]
    fn error_extensions() {
        let mut obj = ObjectValue::with_capacity(1);
        obj.add_field("foo", Value::from("bar"));

        assert_eq!(
            to_string(&FieldError::new("foo error", Value::Object(obj))).unwrap(),
            r#"{"message":"foo error","extensions":{"foo":"bar"}}"#,
        );
        assert_eq!(
            to_string(&FieldError::from("plain")).unwrap(),
            r#"{"message":"plain"}"#,
        );
    }

    #[test]
    fn named_scalar_shape() {
        let date = NamedType::<()>::Scalar(Arc::new(
            Scalar::new("Date").description("Calendar day"),
        ));

        assert_eq!(
            to_value(&date).unwrap(),
            json!({
                "kind": "SCALAR",
                "name": "Date",
                "description": "Calendar day",
            }),
        );
        assert_eq!(
            to_string(&NamedType::<()>::Scalar(Arc::clone(&*STRING))).unwrap(),
            to_string(&**STRING).unwrap(),
        );
    }

    #[test]
    fn schema_introspection_shape() {
        let node =
            Arc::new(Interface::new("Node").fields([Field::new("id", Type::non_null(&*INT))]));
        let episode = Arc::new(
            Enum::new(
                "Episode",
                [
                    EnumValue::new("JEDI").description("Return of the Jedi"),
                    EnumValue::new("EMPIRE").deprecated(None),
                ],
            )
            .description("One of the films"),
        );
        let review = Arc::new(
            InputObject::new("Review")
                .fields([InputField::new("stars", Type::non_null(&*INT)).default_value(5)]),
        );
        let human = Arc::new(
            Object::new("Human")
                .interfaces([Arc::clone(&node)])
                .fields([
                    Field::new("id", Type::non_null(&*INT)),
                    Field::new("name", &*STRING)
                        .description("Full name")
                        .deprecated(Some("Use `id`".into())),
                    Field::new("appearsIn", Type::list(&episode))
                        .argument(Argument::new("review", &review)),
                ]),
        );
        let search = Union::new("Search", [Arc::clone(&human)]);
        let query = Object::new("Query").fields([Field::new("search", search.into_type())]);

        let schema = Schema::<()>::new().query(query.into_type());

        assert_eq!(
            to_value(&schema).unwrap(),
            json!({
                "queryType": "Query",
                "mutationType": null,
                "subscriptionType": null,
                "types": [
                    {
                        "kind": "OBJECT",
                        "name": "Query",
                        "description": null,
                        "fields": [{
                            "name": "search",
                            "description": null,
                            "args": [],
                            "type": "Search",
                            "isDeprecated": false,
                            "deprecationReason": null,
                        }],
                        "interfaces": [],
                    },
                    {
                        "kind": "UNION",
                        "name": "Search",
                        "description": null,
                        "possibleTypes": ["Human"],
                    },
                    {
                        "kind": "OBJECT",
                        "name": "Human",
                        "description": null,
                        "fields": [
                            {
                                "name": "id",
                                "description": null,
                                "args": [],
                                "type": "Int!",
                                "isDeprecated": false,
                                "deprecationReason": null,
                            },
                            {
                                "name": "name",
                                "description": "Full name",
                                "args": [],
                                "type": "String",
                                "isDeprecated": true,
                                "deprecationReason": "Use `id`",
                            },
                            {
                                "name": "appearsIn",
                                "description": null,
                                "args": [{
                                    "name": "review",
                                    "description": null,
                                    "type": "Review",
                                    "defaultValue": null,
                                }],
                                "type": "[Episode]",
                                "isDeprecated": false,
                                "deprecationReason": null,
                            },
                        ],
                        "interfaces": ["Node"],
                    },
                    {
                        "kind": "INTERFACE",
                        "name": "Node",
                        "description": null,
                        "fields": [{
                            "name": "id",
                            "description": null,
                            "args": [],
                            "type": "Int!",
                            "isDeprecated": false,
                            "deprecationReason": null,
                        }],
                    },
                    {
                        "kind": "SCALAR",
                        "name": "Int",
                        "description": INT.description.as_deref(),
                    },
                    {
                        "kind": "SCALAR",
                        "name": "String",
                        "description": STRING.description.as_deref(),
                    },
                    {
                        "kind": "ENUM",
                        "name": "Episode",
                        "description": "One of the films",
                        "enumValues": [
                            {
                                "name": "JEDI",
                                "description": "Return of the Jedi",
                                "isDeprecated": false,
                                "deprecationReason": null,
                            },
                            {
                                "name": "EMPIRE",
                                "description": null,
                                "isDeprecated": true,
                                "deprecationReason": null,
                            },
                        ],
                    },
                    {
                        "kind": "INPUT_OBJECT",
                        "name": "Review",
                        "description": null,
                        "inputFields": [{
                            "name": "stars",
                            "description": null,
                            "type": "Int!",
                            "defaultValue": 5,
                        }],
                    },
                ],
            }),
        );
    }
}
