//! Conversion of loosely-typed JSON input into values.
//!
//! JSON has no way to tell an `int` from a `long`, or a plain map from an instance of a class.
//! Callers mark those values with an annotation object, such as
//! `{"$class": "long", "$": 5}`, which is converted into a [`Typed`] value.
//!
//! [`Typed`]: crate::Typed

use crate::{Annotation, EncodeError, List, Map, Result, Value, WriterKind};
use serde_json::Value as Json;


impl Value {
    /// Converts a JSON value, reading annotation objects as [`Value::Typed`].
    ///
    /// An annotation object has exactly two fields, named by the [`Annotation`]. Every other
    /// object becomes a [`Map`] with string keys, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::Type`] if the type field of an annotation object is not a string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hessian::{Annotation, Encoder, Value};
    /// use serde_json::json;
    ///
    /// let value = Value::from_json(&json!({"$class": "long", "$": 5}), &Annotation::default())?;
    /// assert_eq!(value, Value::typed("long", 5));
    ///
    /// let mut encoder = Encoder::new();
    /// encoder.write(&value)?;
    /// assert_eq!(&encoder.get()[..], [b'L', 0, 0, 0, 0, 0, 0, 0, 5]);
    /// # Ok::<(), hessian::EncodeError>(())
    /// ```
    pub fn from_json(json: &Json, annotation: &Annotation) -> Result<Self> {
        Ok(match json {
            Json::Null => Self::Null,
            Json::Bool(value) => Self::Bool(*value),
            Json::Number(number) => number_to_value(number),
            Json::String(value) => Self::String(value.clone()),
            Json::Array(elements) => Self::List(
                elements
                    .iter()
                    .map(|element| Self::from_json(element, annotation))
                    .collect::<Result<Vec<_>>>()
                    .map(List::from)?,
            ),
            Json::Object(fields) => {
                if let Some((type_name, payload)) = annotated(fields, annotation) {
                    let Json::String(type_name) = type_name else {
                        return Err(EncodeError::type_error(
                            WriterKind::Map,
                            "string type name",
                            json_kind(type_name),
                        ));
                    };
                    return Ok(Self::typed(
                        type_name.clone(),
                        Self::from_json(payload, annotation)?,
                    ));
                }
                let map = Map::new();
                for (key, value) in fields {
                    _ = map.insert(key.as_str(), Self::from_json(value, annotation)?);
                }
                Self::Map(map)
            }
        })
    }
}

/// Returns the type and payload fields, if the object is an annotation.
fn annotated<'a>(
    fields: &'a serde_json::Map<String, Json>,
    annotation: &Annotation,
) -> Option<(&'a Json, &'a Json)> {
    if fields.len() != 2 {
        return None;
    }
    Some((
        fields.get(annotation.type_field())?,
        fields.get(annotation.payload_field())?,
    ))
}

fn number_to_value(number: &serde_json::Number) -> Value {
    if let Some(value) = number.as_i64() {
        return Value::Int(value);
    }
    // Integers beyond i64 and non-integral numbers.
    number.as_f64().map_or(Value::Null, Value::Double)
}

const fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "list",
        Json::Object(_) => "map",
    }
}
