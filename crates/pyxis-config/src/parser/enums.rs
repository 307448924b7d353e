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

//! Parser for enum types backed by an explicit variant table.

use std::any::{Any, TypeId};

use super::{ParseError, TypeParser};

/// Parses an enum type from either its variant name or its numeric
/// discriminant.
///
/// The variant table is populated explicitly; there is no discovery. A
/// numeric token must match a defined discriminant (out-of-range is a
/// format error), any other token is matched case-sensitively against the
/// variant names.
///
/// # Example
///
/// ```
/// use pyxis_config::parser::{EnumParser, TypeParser};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Quality { Low, High }
///
/// let parser = EnumParser::new()
///     .variant("Low", 0, Quality::Low)
///     .variant("High", 1, Quality::High);
///
/// let value = parser.parse("High").unwrap();
/// assert_eq!(value.downcast_ref::<Quality>(), Some(&Quality::High));
/// let value = parser.parse("0").unwrap();
/// assert_eq!(value.downcast_ref::<Quality>(), Some(&Quality::Low));
/// ```
#[derive(Debug, Default, Clone)]
pub struct EnumParser<T> {
    variants: Vec<(&'static str, i64, T)>,
}

impl<T: Copy + Send + Sync + 'static> EnumParser<T> {
    /// Creates an empty variant table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            variants: Vec::new(),
        }
    }

    /// Adds one variant under its name and numeric discriminant.
    #[must_use]
    pub fn variant(mut self, name: &'static str, value: i64, variant: T) -> Self {
        self.variants.push((name, value, variant));
        self
    }

    /// Parses a token into a variant.
    pub fn parse_variant(&self, raw: &str) -> Result<T, ParseError> {
        let token = raw.trim();
        if let Ok(number) = token.parse::<i64>() {
            return self
                .variants
                .iter()
                .find(|(_, value, _)| *value == number)
                .map(|(_, _, variant)| *variant)
                .ok_or(ParseError::UndefinedEnumValue { value: number });
        }
        self.variants
            .iter()
            .find(|(name, _, _)| *name == token)
            .map(|(_, _, variant)| *variant)
            .ok_or_else(|| ParseError::invalid_literal::<T>(raw))
    }
}

impl<T: Copy + Send + Sync + 'static> TypeParser for EnumParser<T> {
    fn target_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn target_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn can_be_array_element(&self) -> bool {
        true
    }

    fn parse(&self, raw: &str) -> Result<Box<dyn Any>, ParseError> {
        self.parse_variant(raw)
            .map(|variant| Box::new(variant) as Box<dyn Any>)
    }
}
