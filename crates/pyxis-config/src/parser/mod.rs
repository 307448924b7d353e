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

//! The string-to-type parsing subsystem.
//!
//! A [`TypeParser`] converts one raw configuration string into one target
//! value type. Parsers are held by a
//! [`ParserRegistry`](crate::registry::ParserRegistry) which resolves them
//! by the target's [`TypeId`]; the [`FromConfig`] trait is the typed entry
//! point that routes a lookup through the registry so that explicitly
//! registered overrides stay effective.

use std::any::{Any, TypeId};

use thiserror::Error;

pub mod array;
pub mod enums;
pub mod primitives;
pub mod time;
pub mod vector;

pub use self::array::ArrayParser;
pub use self::enums::EnumParser;
pub use self::primitives::{
    BoolParser, CharParser, F32Parser, F64Parser, I16Parser, I32Parser, I64Parser, I8Parser,
    StringParser, U16Parser, U32Parser, U64Parser, U8Parser,
};
pub use self::time::{DateTimeParser, DurationParser, GuidParser, VersionParser};
pub use self::vector::{
    IVec2Parser, IVec3Parser, QuaternionParser, Vec2Parser, Vec3Parser, Vec4Parser,
};

/// An error raised while parsing a raw string into a typed value.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input does not form a valid literal of the target type.
    #[error("cannot parse '{value}' to {target}")]
    InvalidLiteral {
        /// The target type's name.
        target: &'static str,
        /// The rejected input.
        value: String,
    },

    /// A composite literal is missing its enclosing delimiters.
    #[error("value must be enclosed in {open}{close}")]
    MissingDelimiters {
        /// The expected opening delimiter.
        open: char,
        /// The expected closing delimiter.
        close: char,
    },

    /// A composite literal was empty where components were required.
    #[error("value cannot be empty")]
    EmptyValue,

    /// A vector literal carried the wrong number of components.
    #[error("invalid vector value '{value}': size must be {expected}")]
    WrongArity {
        /// The rejected input.
        value: String,
        /// The dimension the target type requires.
        expected: usize,
    },

    /// A numeric enum token does not name a defined variant.
    #[error("cannot parse value to enum type since it is out of range: {value}")]
    UndefinedEnumValue {
        /// The rejected discriminant.
        value: i64,
    },

    /// No parser is registered for the requested target type.
    #[error("no parser registered for type {target}")]
    ParserNotFound {
        /// The requested target type's name.
        target: &'static str,
    },

    /// A parser produced a value of a different type than it declared.
    #[error("parser for {target} produced an unexpected value type")]
    UnexpectedValueType {
        /// The requested target type's name.
        target: &'static str,
    },
}

impl ParseError {
    /// Builds an [`ParseError::InvalidLiteral`] for the target type `T`.
    pub fn invalid_literal<T>(value: &str) -> Self {
        Self::InvalidLiteral {
            target: std::any::type_name::<T>(),
            value: value.to_string(),
        }
    }
}

/// A strategy object converting a raw string literal into one target type.
///
/// Implementations are registered with a
/// [`ParserRegistry`](crate::registry::ParserRegistry), which enforces one
/// parser per target type. The produced value travels as `Box<dyn Any>` and
/// is downcast at the typed call sites.
pub trait TypeParser: Send + Sync {
    /// The [`TypeId`] of the value type this parser produces.
    fn target_type(&self) -> TypeId;

    /// The produced type's name, used in diagnostics.
    fn target_name(&self) -> &'static str;

    /// Whether values of this type may appear as elements of an array
    /// literal. Composite parsers return `false`, which prevents the
    /// registry from synthesizing unsupported array-of-array parsers.
    fn can_be_array_element(&self) -> bool {
        false
    }

    /// Parses the raw string into a boxed value of the target type.
    fn parse(&self, raw: &str) -> Result<Box<dyn Any>, ParseError>;
}

/// A type whose values can be produced from a raw configuration string via
/// the registry.
///
/// This is the typed face of the registry: scalar implementations look up
/// the parser registered for `Self`, and `Vec<E>` routes through the
/// registry's synthesized array parser for `E`.
pub trait FromConfig: Sized + 'static {
    /// Parses `raw` using the parser the registry resolves for `Self`.
    fn from_config(
        raw: &str,
        registry: &crate::registry::ParserRegistry,
    ) -> Result<Self, ParseError>;
}

impl<E: 'static> FromConfig for Vec<E> {
    fn from_config(
        raw: &str,
        registry: &crate::registry::ParserRegistry,
    ) -> Result<Self, ParseError> {
        let parser =
            registry
                .array_parser_for::<E>()
                .ok_or_else(|| ParseError::ParserNotFound {
                    target: std::any::type_name::<Vec<E>>(),
                })?;
        let value = parser.parse(raw)?;
        match value.downcast::<Vec<E>>() {
            Ok(boxed) => Ok(*boxed),
            Err(_) => Err(ParseError::UnexpectedValueType {
                target: std::any::type_name::<Vec<E>>(),
            }),
        }
    }
}

/// Implements [`FromConfig`] by delegating to the parser registered for the
/// type itself.
macro_rules! from_config_via_registry {
    ($($target:ty),* $(,)?) => {$(
        impl FromConfig for $target {
            fn from_config(
                raw: &str,
                registry: &crate::registry::ParserRegistry,
            ) -> Result<Self, ParseError> {
                registry.parse_registered::<$target>(raw)
            }
        }
    )*};
}

from_config_via_registry!(
    String,
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    chrono::DateTime<chrono::Utc>,
    chrono::Duration,
    uuid::Uuid,
    pyxis_core::Version,
    pyxis_core::math::Vec2,
    pyxis_core::math::Vec3,
    pyxis_core::math::Vec4,
    pyxis_core::math::Quaternion,
    pyxis_core::math::IVec2,
    pyxis_core::math::IVec3,
);
