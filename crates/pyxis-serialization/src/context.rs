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

//! Per-type wire metadata and its registry.
//!
//! A [`SerializationContext`] is the closed set of types that have a wire
//! contract: for each registered type it holds the wire type name (the
//! `$type` discriminator), a factory, an optional `extends` base, and the
//! ordered list of serializable properties keyed by wire name. The context
//! is populated explicitly through [`SerializationContext::builder`] —
//! nothing is discovered — and is immutable once built.
//!
//! Extension replaces subclassing: a type registered with
//! [`TypeRegistration::extends`] may appear wherever its base is expected,
//! which is what lets a base-declared object field round-trip a richer
//! payload. An extending type declares all of its properties itself,
//! including the ones reached through an embedded base value.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::marker::PhantomData;

use serde_json::Value;

use crate::error::SerializationError;
use crate::json::JsonSerializer;
use crate::wire::WireField;

pub(crate) type EncodeFn =
    Box<dyn Fn(&dyn Any, &JsonSerializer) -> Result<Value, SerializationError> + Send + Sync>;
pub(crate) type DecodeFn =
    Box<dyn Fn(&mut dyn Any, &Value, &JsonSerializer) -> Result<(), SerializationError> + Send + Sync>;

/// One serializable property: a wire name plus type-erased accessors.
pub(crate) struct PropertySpec {
    pub(crate) wire_name: String,
    pub(crate) encode: EncodeFn,
    pub(crate) decode: DecodeFn,
}

/// The wire contract of one registered type.
pub(crate) struct TypeSpec {
    pub(crate) wire_name: String,
    pub(crate) type_id: TypeId,
    pub(crate) type_name: &'static str,
    pub(crate) extends: Option<String>,
    pub(crate) instantiate: fn() -> Box<dyn Any>,
    pub(crate) properties: Vec<PropertySpec>,
}

/// The registry of wire contracts, built once and read-only afterwards.
pub struct SerializationContext {
    types: Vec<TypeSpec>,
    by_wire_name: HashMap<String, usize>,
    by_type_id: HashMap<TypeId, usize>,
}

impl SerializationContext {
    /// Starts an empty context builder.
    #[must_use]
    pub fn builder() -> SerializationContextBuilder {
        SerializationContextBuilder { types: Vec::new() }
    }

    /// Returns `true` if the Rust type is registered.
    #[must_use]
    pub fn is_registered(&self, type_id: TypeId) -> bool {
        self.by_type_id.contains_key(&type_id)
    }

    /// Looks up the wire type name registered for a Rust type.
    #[must_use]
    pub fn wire_name_of(&self, type_id: TypeId) -> Option<&str> {
        self.spec_by_type_id(type_id)
            .map(|spec| spec.wire_name.as_str())
    }

    pub(crate) fn spec_by_wire_name(&self, wire_name: &str) -> Option<&TypeSpec> {
        self.by_wire_name
            .get(wire_name)
            .map(|index| &self.types[*index])
    }

    pub(crate) fn spec_by_type_id(&self, type_id: TypeId) -> Option<&TypeSpec> {
        self.by_type_id
            .get(&type_id)
            .map(|index| &self.types[*index])
    }

    /// Walks the `extends` chain of `found` looking for `expected`.
    pub(crate) fn is_assignable(&self, found: &TypeSpec, expected_wire_name: &str) -> bool {
        let mut current = Some(found);
        while let Some(spec) = current {
            if spec.wire_name == expected_wire_name {
                return true;
            }
            current = spec
                .extends
                .as_deref()
                .and_then(|base| self.spec_by_wire_name(base));
        }
        false
    }
}

/// Accumulates type registrations and validates them into a
/// [`SerializationContext`].
pub struct SerializationContextBuilder {
    types: Vec<TypeSpec>,
}

impl SerializationContextBuilder {
    /// Registers a type's wire contract.
    ///
    /// ```ignore
    /// builder.register(
    ///     TypeRegistration::<InnerPayload>::new("demo.InnerPayload")
    ///         .field("testFloat", |o| &o.test_float, |o| &mut o.test_float),
    /// );
    /// ```
    pub fn register<T: Any + Default>(&mut self, registration: TypeRegistration<T>) -> &mut Self {
        self.types.push(registration.spec);
        self
    }

    /// Validates the accumulated registrations and produces the context.
    ///
    /// Construction errors: a wire type name or Rust type registered
    /// twice, duplicate property wire names within a type, or an
    /// `extends` target that is not registered.
    pub fn build(self) -> Result<SerializationContext, SerializationError> {
        let mut by_wire_name = HashMap::new();
        let mut by_type_id = HashMap::new();

        for (index, spec) in self.types.iter().enumerate() {
            if by_wire_name.insert(spec.wire_name.clone(), index).is_some() {
                return Err(SerializationError::DuplicateType {
                    name: spec.wire_name.clone(),
                });
            }
            if by_type_id.insert(spec.type_id, index).is_some() {
                return Err(SerializationError::DuplicateType {
                    name: spec.type_name.to_string(),
                });
            }

            let mut seen = HashSet::new();
            for property in &spec.properties {
                if !seen.insert(property.wire_name.as_str()) {
                    return Err(SerializationError::DuplicateProperty {
                        type_name: spec.wire_name.clone(),
                        wire_name: property.wire_name.clone(),
                    });
                }
            }
        }

        for spec in &self.types {
            if let Some(base) = &spec.extends {
                if !by_wire_name.contains_key(base) {
                    return Err(SerializationError::UnknownBase {
                        wire_name: spec.wire_name.clone(),
                        base: base.clone(),
                    });
                }
            }
        }

        Ok(SerializationContext {
            types: self.types,
            by_wire_name,
            by_type_id,
        })
    }
}

/// Declares the wire contract of one type: its base and its properties.
pub struct TypeRegistration<T> {
    spec: TypeSpec,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any + Default> TypeRegistration<T> {
    /// Starts the wire contract for `T` under a wire type name.
    ///
    /// `T` must be default-constructible; decode starts from
    /// `T::default()` and only overwrites the properties present in the
    /// payload.
    #[must_use]
    pub fn new(wire_name: &str) -> Self {
        let instantiate: fn() -> Box<dyn Any> = || Box::new(T::default());
        Self {
            spec: TypeSpec {
                wire_name: wire_name.to_string(),
                type_id: TypeId::of::<T>(),
                type_name: std::any::type_name::<T>(),
                extends: None,
                instantiate,
                properties: Vec::new(),
            },
            _marker: PhantomData,
        }
    }

    /// Declares this type as an extension of an already-registered base.
    ///
    /// Values of this type then satisfy object fields that expect the
    /// base type.
    #[must_use]
    pub fn extends(mut self, base_wire_name: &str) -> Self {
        self.spec.extends = Some(base_wire_name.to_string());
        self
    }

    /// Declares a leaf property: a [`WireField`] value reached through a
    /// pair of accessors.
    ///
    /// Properties are emitted in declaration order. A property absent from
    /// a payload during decode keeps the field's default value.
    #[must_use]
    pub fn field<F: WireField>(
        mut self,
        wire_name: &str,
        get: fn(&T) -> &F,
        get_mut: fn(&mut T) -> &mut F,
    ) -> Self {
        let encode: EncodeFn = Box::new(move |object, _codec| {
            let target = downcast_ref::<T>(object)?;
            get(target).to_wire()
        });
        let decode: DecodeFn = Box::new(move |object, value, _codec| {
            let target = downcast_mut::<T>(object)?;
            *get_mut(target) = F::from_wire(value)?;
            Ok(())
        });
        self.spec.properties.push(PropertySpec {
            wire_name: wire_name.to_string(),
            encode,
            decode,
        });
        self
    }

    /// Declares an object-valued property with declared type `D`.
    ///
    /// The slot holds `Option<Box<dyn Any>>` so that, at runtime, it can
    /// carry `D` itself or any registered extension of `D`; the payload's
    /// `$type` is checked for assignability to `D` during decode. `None`
    /// encodes as JSON `null`.
    #[must_use]
    pub fn object_field<D: Any>(
        mut self,
        wire_name: &str,
        get: fn(&T) -> &Option<Box<dyn Any>>,
        get_mut: fn(&mut T) -> &mut Option<Box<dyn Any>>,
    ) -> Self {
        let expected_type_id = TypeId::of::<D>();
        let expected_type_name = std::any::type_name::<D>();

        let encode: EncodeFn = Box::new(move |object, codec| {
            let target = downcast_ref::<T>(object)?;
            match get(target) {
                Some(inner) => codec.encode_value(inner.as_ref(), expected_type_name),
                None => Ok(Value::Null),
            }
        });
        let decode: DecodeFn = Box::new(move |object, value, codec| {
            let target = downcast_mut::<T>(object)?;
            if value.is_null() {
                *get_mut(target) = None;
                return Ok(());
            }
            let decoded =
                codec.decode_polymorphic(value, expected_type_id, expected_type_name)?;
            *get_mut(target) = Some(decoded);
            Ok(())
        });
        self.spec.properties.push(PropertySpec {
            wire_name: wire_name.to_string(),
            encode,
            decode,
        });
        self
    }
}

fn downcast_ref<T: Any>(object: &dyn Any) -> Result<&T, SerializationError> {
    object
        .downcast_ref::<T>()
        .ok_or(SerializationError::UnexpectedShape {
            expected: std::any::type_name::<T>(),
        })
}

fn downcast_mut<T: Any>(object: &mut dyn Any) -> Result<&mut T, SerializationError> {
    object
        .downcast_mut::<T>()
        .ok_or(SerializationError::UnexpectedShape {
            expected: std::any::type_name::<T>(),
        })
}
