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

//! The `$type`-tagged JSON codec.
//!
//! Serialization emits, for every registered object, a JSON object whose
//! first member is the `$type` discriminator (the registered wire type
//! name) followed by the type's properties in declaration order.
//! Deserialization reads the discriminator back: on the open path
//! ([`JsonSerializer::deserialize`]) it is mandatory and resolved through
//! the context; where a concrete type is expected it must be that type
//! (or, for object fields, a registered extension of it); where it is
//! absent the expected type is used directly. Wire fields missing from a
//! payload leave the corresponding property at its default; unknown wire
//! fields are skipped with a warning.

use std::any::{Any, TypeId};
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::context::{SerializationContext, TypeSpec};
use crate::error::SerializationError;

/// Serializes and deserializes registered object graphs as `$type`-tagged
/// JSON.
pub struct JsonSerializer {
    context: Arc<SerializationContext>,
}

impl JsonSerializer {
    /// Creates a serializer over a built context.
    #[must_use]
    pub fn new(context: Arc<SerializationContext>) -> Self {
        Self { context }
    }

    /// The backing context.
    #[must_use]
    pub fn context(&self) -> &SerializationContext {
        &self.context
    }

    /// Serializes a registered value to JSON text.
    ///
    /// The value's runtime type must be registered; a type without a wire
    /// contract is a hard error. For values held as `Box<dyn Any>`, pass
    /// the boxed content (`&*boxed`), not the box itself.
    pub fn serialize<T: Any>(&self, value: &T) -> Result<String, SerializationError> {
        let encoded = self.encode_value(value, std::any::type_name::<T>())?;
        Ok(serde_json::to_string(&encoded)?)
    }

    /// Serializes a homogeneous slice as a root-level JSON array.
    pub fn serialize_list<T: Any>(&self, items: &[T]) -> Result<String, SerializationError> {
        let mut elements = Vec::with_capacity(items.len());
        for item in items {
            elements.push(self.encode_value(item, std::any::type_name::<T>())?);
        }
        Ok(serde_json::to_string(&Value::Array(elements))?)
    }

    /// Deserializes with an open expected type.
    ///
    /// The payload's `$type` tag is mandatory here: it is the only way to
    /// resolve the concrete type, and an unresolvable tag is an error.
    pub fn deserialize(&self, text: &str) -> Result<Box<dyn Any>, SerializationError> {
        let value: Value = serde_json::from_str(text)?;
        let map = as_object(&value)?;
        self.decode_map(map, None)
    }

    /// Deserializes into a concrete expected type.
    ///
    /// A present `$type` tag must name exactly `T`; a value is returned by
    /// value here, so an extension payload cannot be narrowed into it —
    /// polymorphic payloads go through [`JsonSerializer::deserialize`] or
    /// an object field. An absent tag falls back to `T`.
    pub fn deserialize_as<T: Any>(&self, text: &str) -> Result<T, SerializationError> {
        let value: Value = serde_json::from_str(text)?;
        self.decode_exact::<T>(&value)
    }

    /// Deserializes a root-level JSON array of objects of one concrete
    /// type.
    pub fn deserialize_list<T: Any>(&self, text: &str) -> Result<Vec<T>, SerializationError> {
        let value: Value = serde_json::from_str(text)?;
        let items = value.as_array().ok_or(SerializationError::UnexpectedShape {
            expected: "a JSON array",
        })?;
        let mut elements = Vec::with_capacity(items.len());
        for item in items {
            elements.push(self.decode_exact::<T>(item)?);
        }
        Ok(elements)
    }

    /// Encodes a value whose runtime type must be registered.
    ///
    /// `label` names the declared type for the error message when the
    /// runtime type has no wire contract.
    pub(crate) fn encode_value(
        &self,
        value: &dyn Any,
        label: &str,
    ) -> Result<Value, SerializationError> {
        let spec = self.context.spec_by_type_id(value.type_id()).ok_or_else(|| {
            SerializationError::UnregisteredType {
                type_name: label.to_string(),
            }
        })?;

        let mut map = Map::new();
        map.insert(
            "$type".to_string(),
            Value::String(spec.wire_name.clone()),
        );
        for property in &spec.properties {
            let encoded = (property.encode)(value, self).map_err(|source| {
                SerializationError::Property {
                    wire_name: property.wire_name.clone(),
                    source: Box::new(source),
                }
            })?;
            map.insert(property.wire_name.clone(), encoded);
        }
        Ok(Value::Object(map))
    }

    /// Decodes an object payload whose declared type is `expected`,
    /// accepting any registered extension of it.
    pub(crate) fn decode_polymorphic(
        &self,
        value: &Value,
        expected_type_id: TypeId,
        expected_type_name: &'static str,
    ) -> Result<Box<dyn Any>, SerializationError> {
        let map = as_object(value)?;
        self.decode_map(map, Some((expected_type_id, expected_type_name)))
    }

    fn decode_map(
        &self,
        map: &Map<String, Value>,
        expected: Option<(TypeId, &'static str)>,
    ) -> Result<Box<dyn Any>, SerializationError> {
        let tag = map.get("$type").and_then(Value::as_str);

        let spec = match (tag, expected) {
            (Some(tag), None) => {
                self.context
                    .spec_by_wire_name(tag)
                    .ok_or_else(|| SerializationError::UnknownTypeTag {
                        tag: tag.to_string(),
                    })?
            }
            (None, None) => return Err(SerializationError::MissingTypeTag),
            (Some(tag), Some((expected_type_id, expected_type_name))) => {
                let found = self.context.spec_by_wire_name(tag).ok_or_else(|| {
                    SerializationError::UnknownTypeTag {
                        tag: tag.to_string(),
                    }
                })?;
                let expected_spec = self.expected_spec(expected_type_id, expected_type_name)?;
                if !self.context.is_assignable(found, &expected_spec.wire_name) {
                    return Err(SerializationError::TypeMismatch {
                        expected: expected_spec.wire_name.clone(),
                        found: found.wire_name.clone(),
                    });
                }
                found
            }
            (None, Some((expected_type_id, expected_type_name))) => {
                self.expected_spec(expected_type_id, expected_type_name)?
            }
        };

        self.decode_with_spec(spec, map)
    }

    fn decode_exact<T: Any>(&self, value: &Value) -> Result<T, SerializationError> {
        let map = as_object(value)?;
        let spec = self.expected_spec(TypeId::of::<T>(), std::any::type_name::<T>())?;
        if let Some(tag) = map.get("$type").and_then(Value::as_str) {
            if tag != spec.wire_name {
                return Err(SerializationError::TypeMismatch {
                    expected: spec.wire_name.clone(),
                    found: tag.to_string(),
                });
            }
        }
        let decoded = self.decode_with_spec(spec, map)?;
        match decoded.downcast::<T>() {
            Ok(boxed) => Ok(*boxed),
            Err(_) => Err(SerializationError::UnexpectedShape {
                expected: std::any::type_name::<T>(),
            }),
        }
    }

    fn decode_with_spec(
        &self,
        spec: &TypeSpec,
        map: &Map<String, Value>,
    ) -> Result<Box<dyn Any>, SerializationError> {
        let mut object = (spec.instantiate)();
        for property in &spec.properties {
            let Some(value) = map.get(&property.wire_name) else {
                continue;
            };
            (property.decode)(object.as_mut(), value, self).map_err(|source| {
                SerializationError::Property {
                    wire_name: property.wire_name.clone(),
                    source: Box::new(source),
                }
            })?;
        }

        for key in map.keys() {
            if key != "$type"
                && !spec
                    .properties
                    .iter()
                    .any(|property| property.wire_name == *key)
            {
                log::warn!(
                    "Ignoring unknown wire field '{key}' for type '{}'",
                    spec.wire_name
                );
            }
        }

        Ok(object)
    }

    fn expected_spec(
        &self,
        type_id: TypeId,
        type_name: &'static str,
    ) -> Result<&TypeSpec, SerializationError> {
        self.context
            .spec_by_type_id(type_id)
            .ok_or_else(|| SerializationError::UnregisteredType {
                type_name: type_name.to_string(),
            })
    }
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, SerializationError> {
    value.as_object().ok_or(SerializationError::UnexpectedShape {
        expected: "a JSON object",
    })
}
