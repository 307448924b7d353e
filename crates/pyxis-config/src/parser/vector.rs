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

//! Parsers for fixed-arity vector literals.
//!
//! The literal grammar is `(c1, c2, ..., cN)`: enclosing parentheses,
//! comma-separated components, whitespace tolerated around each component,
//! and a component count that must match the target dimension exactly.
//! Absent input yields the target's zero value; an empty literal is a
//! format error. Vector values cannot appear as array elements.

use std::any::{Any, TypeId};

use pyxis_core::math::{IVec2, IVec3, Quaternion, Vec2, Vec3, Vec4};

use super::{ParseError, TypeParser};

/// A scalar type usable as a vector component.
pub trait VectorComponent: Sized {
    /// Parses one component token.
    fn parse_component(raw: &str) -> Result<Self, ParseError>;
}

impl VectorComponent for f32 {
    fn parse_component(raw: &str) -> Result<Self, ParseError> {
        raw.trim()
            .parse::<f32>()
            .map_err(|_| ParseError::invalid_literal::<f32>(raw))
    }
}

impl VectorComponent for i32 {
    fn parse_component(raw: &str) -> Result<Self, ParseError> {
        raw.trim()
            .parse::<i32>()
            .map_err(|_| ParseError::invalid_literal::<i32>(raw))
    }
}

/// Splits a `(c1, ..., cN)` literal and parses every component.
pub(crate) fn parse_components<C: VectorComponent>(
    raw: &str,
    dimension: usize,
) -> Result<Vec<C>, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyValue);
    }
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or(ParseError::MissingDelimiters {
            open: '(',
            close: ')',
        })?;

    let parts: Vec<&str> = inner.split(',').collect();
    if parts.len() != dimension {
        return Err(ParseError::WrongArity {
            value: raw.to_string(),
            expected: dimension,
        });
    }

    let mut components = Vec::with_capacity(dimension);
    for part in parts {
        components.push(C::parse_component(part)?);
    }
    Ok(components)
}

/// Stamps a unit-struct parser for one fixed-arity vector type.
macro_rules! vector_parser {
    ($(#[$doc:meta])* $name:ident, $target:ty, $component:ty, $dimension:expr, $assemble:expr) => {
        $(#[$doc])*
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $name;

        impl $name {
            /// Parses an optional literal; absent input yields the zero value.
            pub fn parse_opt(raw: Option<&str>) -> Result<$target, ParseError> {
                match raw {
                    Some(value) => Self::parse_literal(value),
                    None => Ok(<$target>::default()),
                }
            }

            /// Parses a `(c1, ..., cN)` literal.
            pub fn parse_literal(raw: &str) -> Result<$target, ParseError> {
                let components = parse_components::<$component>(raw, $dimension)?;
                let assemble: fn(&[$component]) -> $target = $assemble;
                Ok(assemble(&components))
            }
        }

        impl TypeParser for $name {
            fn target_type(&self) -> TypeId {
                TypeId::of::<$target>()
            }

            fn target_name(&self) -> &'static str {
                stringify!($target)
            }

            fn parse(&self, raw: &str) -> Result<Box<dyn Any>, ParseError> {
                Self::parse_literal(raw).map(|value| Box::new(value) as Box<dyn Any>)
            }
        }
    };
}

vector_parser!(
    /// Parses [`Vec2`] literals such as `(1.0, 2.0)` or `(1, 2)`.
    /// No trailing `f` suffix is accepted on components.
    Vec2Parser, Vec2, f32, 2, |c| Vec2::new(c[0], c[1])
);
vector_parser!(
    /// Parses [`Vec3`] literals such as `(0, 1, 2)`.
    Vec3Parser, Vec3, f32, 3, |c| Vec3::new(c[0], c[1], c[2])
);
vector_parser!(
    /// Parses [`Vec4`] literals such as `(0, 1, 2, 3)`.
    Vec4Parser, Vec4, f32, 4, |c| Vec4::new(c[0], c[1], c[2], c[3])
);
vector_parser!(
    /// Parses [`Quaternion`] literals such as `(0, 0, 0, 1)`.
    QuaternionParser, Quaternion, f32, 4, |c| Quaternion::new(c[0], c[1], c[2], c[3])
);
vector_parser!(
    /// Parses [`IVec2`] literals such as `(3, 4)`.
    IVec2Parser, IVec2, i32, 2, |c| IVec2::new(c[0], c[1])
);
vector_parser!(
    /// Parses [`IVec3`] literals such as `(3, 4, 5)`.
    IVec3Parser, IVec3, i32, 3, |c| IVec3::new(c[0], c[1], c[2])
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_parses_with_whitespace() {
        assert_eq!(
            Vec2Parser::parse_literal(" (1.0,  2.5) ").unwrap(),
            Vec2::new(1.0, 2.5)
        );
    }

    #[test]
    fn test_wrong_arity_names_expected_size() {
        assert!(matches!(
            Vec3Parser::parse_literal("(1, 2)"),
            Err(ParseError::WrongArity { expected: 3, .. })
        ));
    }

    #[test]
    fn test_missing_parentheses_is_format_error() {
        assert!(matches!(
            Vec2Parser::parse_literal("1, 2"),
            Err(ParseError::MissingDelimiters { .. })
        ));
    }

    #[test]
    fn test_empty_literal_is_format_error() {
        assert!(matches!(
            Vec2Parser::parse_literal("   "),
            Err(ParseError::EmptyValue)
        ));
    }

    #[test]
    fn test_absent_input_yields_zero_value() {
        assert_eq!(Vec2Parser::parse_opt(None).unwrap(), Vec2::ZERO);
        assert_eq!(
            QuaternionParser::parse_opt(None).unwrap(),
            Quaternion::IDENTITY
        );
    }

    #[test]
    fn test_component_errors_bubble_up() {
        assert!(Vec2Parser::parse_literal("(1.0, 2.0f)").is_err());
        assert!(IVec2Parser::parse_literal("(1.5, 2)").is_err());
    }

    #[test]
    fn test_quaternion_parses() {
        assert_eq!(
            QuaternionParser::parse_literal("(0, 0, 0, 1)").unwrap(),
            Quaternion::IDENTITY
        );
    }

    #[test]
    fn test_display_round_trip() {
        let vector = Vec3::new(0.5, -1.25, 3.0);
        assert_eq!(
            Vec3Parser::parse_literal(&vector.to_string()).unwrap(),
            vector
        );
    }
}
