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

//! Parsers for the scalar configuration types.
//!
//! All scalar parsers trim their input and delegate to the standard textual
//! parse of the target type. A failed parse is a [`ParseError`], never a
//! silent default. All of them may appear as array elements.

use std::any::{Any, TypeId};

use super::{ParseError, TypeParser};

/// Stamps a unit-struct parser that trims and `str::parse`s its input.
macro_rules! scalar_parser {
    ($(#[$doc:meta])* $name:ident, $target:ty) => {
        $(#[$doc])*
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $name;

        impl TypeParser for $name {
            fn target_type(&self) -> TypeId {
                TypeId::of::<$target>()
            }

            fn target_name(&self) -> &'static str {
                std::any::type_name::<$target>()
            }

            fn can_be_array_element(&self) -> bool {
                true
            }

            fn parse(&self, raw: &str) -> Result<Box<dyn Any>, ParseError> {
                raw.trim()
                    .parse::<$target>()
                    .map(|value| Box::new(value) as Box<dyn Any>)
                    .map_err(|_| ParseError::invalid_literal::<$target>(raw))
            }
        }
    };
}

scalar_parser!(
    /// Parses `i8` values.
    I8Parser, i8
);
scalar_parser!(
    /// Parses `i16` values.
    I16Parser, i16
);
scalar_parser!(
    /// Parses `i32` values.
    I32Parser, i32
);
scalar_parser!(
    /// Parses `i64` values.
    I64Parser, i64
);
scalar_parser!(
    /// Parses `u8` values.
    U8Parser, u8
);
scalar_parser!(
    /// Parses `u16` values.
    U16Parser, u16
);
scalar_parser!(
    /// Parses `u32` values.
    U32Parser, u32
);
scalar_parser!(
    /// Parses `u64` values.
    U64Parser, u64
);
scalar_parser!(
    /// Parses `f32` values. No trailing `f` suffix is accepted.
    F32Parser, f32
);
scalar_parser!(
    /// Parses `f64` values.
    F64Parser, f64
);

/// Parses `bool` values.
///
/// The accepted tokens are case-insensitive `true`/`1` for `true` and
/// `false`/`0` for `false`; anything else is a format error.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoolParser;

impl BoolParser {
    /// Parses the boolean token table.
    pub fn parse_token(raw: &str) -> Result<bool, ParseError> {
        let token = raw.trim();
        if token.eq_ignore_ascii_case("true") || token == "1" {
            return Ok(true);
        }
        if token.eq_ignore_ascii_case("false") || token == "0" {
            return Ok(false);
        }
        Err(ParseError::invalid_literal::<bool>(raw))
    }
}

impl TypeParser for BoolParser {
    fn target_type(&self) -> TypeId {
        TypeId::of::<bool>()
    }

    fn target_name(&self) -> &'static str {
        "bool"
    }

    fn can_be_array_element(&self) -> bool {
        true
    }

    fn parse(&self, raw: &str) -> Result<Box<dyn Any>, ParseError> {
        Self::parse_token(raw).map(|value| Box::new(value) as Box<dyn Any>)
    }
}

/// Parses `char` values: exactly one character after trimming.
#[derive(Debug, Default, Clone, Copy)]
pub struct CharParser;

impl TypeParser for CharParser {
    fn target_type(&self) -> TypeId {
        TypeId::of::<char>()
    }

    fn target_name(&self) -> &'static str {
        "char"
    }

    fn can_be_array_element(&self) -> bool {
        true
    }

    fn parse(&self, raw: &str) -> Result<Box<dyn Any>, ParseError> {
        let mut chars = raw.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(value), None) => Ok(Box::new(value)),
            _ => Err(ParseError::invalid_literal::<char>(raw)),
        }
    }
}

/// Parses `String` values: always succeeds, returning the trimmed input.
#[derive(Debug, Default, Clone, Copy)]
pub struct StringParser;

impl TypeParser for StringParser {
    fn target_type(&self) -> TypeId {
        TypeId::of::<String>()
    }

    fn target_name(&self) -> &'static str {
        "String"
    }

    fn can_be_array_element(&self) -> bool {
        true
    }

    fn parse(&self, raw: &str) -> Result<Box<dyn Any>, ParseError> {
        Ok(Box::new(raw.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_as<T: 'static>(parser: &dyn TypeParser, raw: &str) -> Result<T, ParseError> {
        parser.parse(raw).map(|value| {
            *value
                .downcast::<T>()
                .expect("parser produced its declared type")
        })
    }

    #[test]
    fn test_int_parses_trimmed() {
        assert_eq!(parse_as::<i32>(&I32Parser, " 159 ").unwrap(), 159);
    }

    #[test]
    fn test_int_rejects_garbage() {
        assert!(parse_as::<i32>(&I32Parser, "abc").is_err());
        assert!(parse_as::<i32>(&I32Parser, "1.5").is_err());
    }

    #[test]
    fn test_unsigned_rejects_negative() {
        assert!(parse_as::<u32>(&U32Parser, "-1").is_err());
    }

    #[test]
    fn test_float_parses() {
        assert_eq!(parse_as::<f32>(&F32Parser, "3.14").unwrap(), 3.14);
        assert!(parse_as::<f32>(&F32Parser, "3.14f").is_err());
    }

    #[test]
    fn test_bool_token_table() {
        assert!(BoolParser::parse_token("TRUE").unwrap());
        assert!(BoolParser::parse_token("1").unwrap());
        assert!(!BoolParser::parse_token("false").unwrap());
        assert!(!BoolParser::parse_token("0").unwrap());
        assert!(BoolParser::parse_token("yes").is_err());
    }

    #[test]
    fn test_char_requires_single_character() {
        assert_eq!(parse_as::<char>(&CharParser, " x ").unwrap(), 'x');
        assert!(parse_as::<char>(&CharParser, "xy").is_err());
        assert!(parse_as::<char>(&CharParser, "").is_err());
    }

    #[test]
    fn test_string_returns_trimmed_input() {
        assert_eq!(
            parse_as::<String>(&StringParser, "  TEST_STRING  ").unwrap(),
            "TEST_STRING"
        );
    }
}
