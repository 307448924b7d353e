// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The leaf-value vocabulary of the wire format.
//!
//! A [`WireField`] is a type that maps directly onto a JSON value without
//! a `$type` discriminator: primitives map to native JSON scalars, lists
//! to JSON arrays, and the engine's vector-like types to their textual
//! literal form inside a JSON string, e.g. `"(0, 1, 2)"` for a
//! [`Vec3`]. The literal grammar is the configuration parsers' grammar, so
//! config files and serialized payloads read identically.

use pyxis_config::parser::{
    IVec2Parser, IVec3Parser, ParseError, QuaternionParser, Vec2Parser, Vec3Parser, Vec4Parser,
};
use pyxis_core::math::{IVec2, IVec3, Quaternion, Vec2, Vec3, Vec4};
use serde_json::Value;

use crate::error::SerializationError;

/// A leaf type with a direct JSON representation.
pub trait WireField: Sized + 'static {
    /// Encodes the value as JSON.
    fn to_wire(&self) -> Result<Value, SerializationError>;

    /// Decodes the value from JSON.
    fn from_wire(value: &Value) -> Result<Self, SerializationError>;
}

fn literal_error(error: ParseError) -> SerializationError {
    SerializationError::InvalidValue {
        reason: error.to_string(),
    }
}

/// Implements [`WireField`] for signed integers as native JSON numbers.
macro_rules! signed_wire_field {
    ($($target:ty),* $(,)?) => {$(
        impl WireField for $target {
            fn to_wire(&self) -> Result<Value, SerializationError> {
                Ok(Value::from(*self))
            }

            fn from_wire(value: &Value) -> Result<Self, SerializationError> {
                value
                    .as_i64()
                    .and_then(|number| <$target>::try_from(number).ok())
                    .ok_or(SerializationError::UnexpectedShape {
                        expected: concat!("a JSON number fitting ", stringify!($target)),
                    })
            }
        }
    )*};
}

/// Implements [`WireField`] for unsigned integers as native JSON numbers.
macro_rules! unsigned_wire_field {
    ($($target:ty),* $(,)?) => {$(
        impl WireField for $target {
            fn to_wire(&self) -> Result<Value, SerializationError> {
                Ok(Value::from(*self))
            }

            fn from_wire(value: &Value) -> Result<Self, SerializationError> {
                value
                    .as_u64()
                    .and_then(|number| <$target>::try_from(number).ok())
                    .ok_or(SerializationError::UnexpectedShape {
                        expected: concat!("a JSON number fitting ", stringify!($target)),
                    })
            }
        }
    )*};
}

signed_wire_field!(i8, i16, i32, i64);
unsigned_wire_field!(u8, u16, u32, u64);

impl WireField for f32 {
    fn to_wire(&self) -> Result<Value, SerializationError> {
        Ok(Value::from(f64::from(*self)))
    }

    fn from_wire(value: &Value) -> Result<Self, SerializationError> {
        value
            .as_f64()
            .map(|number| number as f32)
            .ok_or(SerializationError::UnexpectedShape {
                expected: "a JSON number",
            })
    }
}

impl WireField for f64 {
    fn to_wire(&self) -> Result<Value, SerializationError> {
        Ok(Value::from(*self))
    }

    fn from_wire(value: &Value) -> Result<Self, SerializationError> {
        value.as_f64().ok_or(SerializationError::UnexpectedShape {
            expected: "a JSON number",
        })
    }
}

impl WireField for bool {
    fn to_wire(&self) -> Result<Value, SerializationError> {
        Ok(Value::Bool(*self))
    }

    fn from_wire(value: &Value) -> Result<Self, SerializationError> {
        value.as_bool().ok_or(SerializationError::UnexpectedShape {
            expected: "a JSON boolean",
        })
    }
}

impl WireField for String {
    fn to_wire(&self) -> Result<Value, SerializationError> {
        Ok(Value::String(self.clone()))
    }

    fn from_wire(value: &Value) -> Result<Self, SerializationError> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or(SerializationError::UnexpectedShape {
                expected: "a JSON string",
            })
    }
}

impl WireField for char {
    fn to_wire(&self) -> Result<Value, SerializationError> {
        Ok(Value::String(self.to_string()))
    }

    fn from_wire(value: &Value) -> Result<Self, SerializationError> {
        let text = value.as_str().ok_or(SerializationError::UnexpectedShape {
            expected: "a JSON string",
        })?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(character), None) => Ok(character),
            _ => Err(SerializationError::UnexpectedShape {
                expected: "a single-character JSON string",
            }),
        }
    }
}

/// Implements [`WireField`] for vector-like types as literal strings,
/// parsed back through the configuration grammar.
macro_rules! literal_wire_field {
    ($($target:ty => $parser:ty),* $(,)?) => {$(
        impl WireField for $target {
            fn to_wire(&self) -> Result<Value, SerializationError> {
                Ok(Value::String(self.to_string()))
            }

            fn from_wire(value: &Value) -> Result<Self, SerializationError> {
                let text = value.as_str().ok_or(SerializationError::UnexpectedShape {
                    expected: "a JSON string holding a vector literal",
                })?;
                <$parser>::parse_literal(text).map_err(literal_error)
            }
        }
    )*};
}

literal_wire_field!(
    Vec2 => Vec2Parser,
    Vec3 => Vec3Parser,
    Vec4 => Vec4Parser,
    Quaternion => QuaternionParser,
    IVec2 => IVec2Parser,
    IVec3 => IVec3Parser,
);

impl<F: WireField> WireField for Vec<F> {
    fn to_wire(&self) -> Result<Value, SerializationError> {
        let mut elements = Vec::with_capacity(self.len());
        for item in self {
            elements.push(item.to_wire()?);
        }
        Ok(Value::Array(elements))
    }

    fn from_wire(value: &Value) -> Result<Self, SerializationError> {
        let items = value.as_array().ok_or(SerializationError::UnexpectedShape {
            expected: "a JSON array",
        })?;
        let mut elements = Vec::with_capacity(items.len());
        for item in items {
            elements.push(F::from_wire(item)?);
        }
        Ok(elements)
    }
}

impl<F: WireField> WireField for Option<F> {
    fn to_wire(&self) -> Result<Value, SerializationError> {
        match self {
            Some(inner) => inner.to_wire(),
            None => Ok(Value::Null),
        }
    }

    fn from_wire(value: &Value) -> Result<Self, SerializationError> {
        if value.is_null() {
            Ok(None)
        } else {
            F::from_wire(value).map(Some)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_round_trip_and_range_check() {
        assert_eq!(42_i32.to_wire().unwrap(), Value::from(42));
        assert_eq!(i32::from_wire(&Value::from(42)).unwrap(), 42);
        assert!(u8::from_wire(&Value::from(300)).is_err());
        assert!(i32::from_wire(&Value::from("42")).is_err());
    }

    #[test]
    fn test_float_accepts_integer_numbers() {
        assert_eq!(f32::from_wire(&Value::from(3)).unwrap(), 3.0);
    }

    #[test]
    fn test_vector_encodes_as_literal_string() {
        let encoded = Vec3::new(0.0, 1.0, 2.0).to_wire().unwrap();
        assert_eq!(encoded, Value::from("(0, 1, 2)"));
        assert_eq!(
            Vec3::from_wire(&encoded).unwrap(),
            Vec3::new(0.0, 1.0, 2.0)
        );
    }

    #[test]
    fn test_vector_rejects_malformed_literal() {
        assert!(Vec3::from_wire(&Value::from("(0, 1)")).is_err());
        assert!(Vec3::from_wire(&Value::from(5)).is_err());
    }

    #[test]
    fn test_list_round_trip() {
        let encoded = vec![1, 2, 3].to_wire().unwrap();
        assert_eq!(Vec::<i32>::from_wire(&encoded).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_option_maps_to_null() {
        assert_eq!(Option::<i32>::None.to_wire().unwrap(), Value::Null);
        assert_eq!(Option::<i32>::from_wire(&Value::Null).unwrap(), None);
        assert_eq!(
            Option::<i32>::from_wire(&Value::from(7)).unwrap(),
            Some(7)
        );
    }
}
