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

//! The parser registry.
//!
//! The registry owns one [`TypeParser`] per target type, populated
//! explicitly through [`ParserRegistry::register`] rather than discovered
//! by scanning. [`ParserRegistry::with_defaults`] installs the built-in
//! parser set. Array parsers are synthesized on demand per element type and
//! cached, which makes "array of any registered scalar type" work without
//! per-type boilerplate.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::parser::array::ArrayParser;
use crate::parser::enums::EnumParser;
use crate::parser::primitives::{
    BoolParser, CharParser, F32Parser, F64Parser, I16Parser, I32Parser, I64Parser, I8Parser,
    StringParser, U16Parser, U32Parser, U64Parser, U8Parser,
};
use crate::parser::time::{DateTimeParser, DurationParser, GuidParser, VersionParser};
use crate::parser::vector::{
    IVec2Parser, IVec3Parser, QuaternionParser, Vec2Parser, Vec3Parser, Vec4Parser,
};
use crate::parser::{FromConfig, ParseError, TypeParser};

/// Owns the set of registered type parsers and resolves them by target
/// type.
///
/// Constructed once; lookups are read-only afterwards. The array-parser
/// cache grows monotonically behind a lock and is keyed by element type.
pub struct ParserRegistry {
    parsers: HashMap<TypeId, Arc<dyn TypeParser>>,
    array_parsers: RwLock<HashMap<TypeId, Arc<dyn TypeParser>>>,
}

impl Default for ParserRegistry {
    /// Returns an empty registry. Use [`ParserRegistry::with_defaults`] for
    /// the built-in parser set.
    fn default() -> Self {
        Self {
            parsers: HashMap::new(),
            array_parsers: RwLock::new(HashMap::new()),
        }
    }
}

impl ParserRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with every built-in parser registered: the
    /// scalar set, the temporal/identity set, and the vector set.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(StringParser), false);
        registry.register(Arc::new(BoolParser), false);
        registry.register(Arc::new(CharParser), false);
        registry.register(Arc::new(I8Parser), false);
        registry.register(Arc::new(I16Parser), false);
        registry.register(Arc::new(I32Parser), false);
        registry.register(Arc::new(I64Parser), false);
        registry.register(Arc::new(U8Parser), false);
        registry.register(Arc::new(U16Parser), false);
        registry.register(Arc::new(U32Parser), false);
        registry.register(Arc::new(U64Parser), false);
        registry.register(Arc::new(F32Parser), false);
        registry.register(Arc::new(F64Parser), false);
        registry.register(Arc::new(DateTimeParser), false);
        registry.register(Arc::new(DurationParser), false);
        registry.register(Arc::new(GuidParser), false);
        registry.register(Arc::new(VersionParser), false);
        registry.register(Arc::new(Vec2Parser), false);
        registry.register(Arc::new(Vec3Parser), false);
        registry.register(Arc::new(Vec4Parser), false);
        registry.register(Arc::new(QuaternionParser), false);
        registry.register(Arc::new(IVec2Parser), false);
        registry.register(Arc::new(IVec3Parser), false);
        registry
    }

    /// Registers a parser for its declared target type.
    ///
    /// The first registration for a type wins: a conflicting registration
    /// is logged and ignored, and `false` is returned. With `overwrite`
    /// set, the existing parser is replaced instead.
    pub fn register(&mut self, parser: Arc<dyn TypeParser>, overwrite: bool) -> bool {
        let target = parser.target_type();
        if self.parsers.contains_key(&target) && !overwrite {
            log::error!(
                "A parser for target type {} is already registered. Ignoring the new registration.",
                parser.target_name()
            );
            return false;
        }
        self.parsers.insert(target, parser);
        true
    }

    /// Registers an [`EnumParser`] variant table for `T`.
    ///
    /// Convenience over [`ParserRegistry::register`] for the common case of
    /// wiring up an enum type.
    pub fn register_enum<T: Copy + Send + Sync + 'static>(
        &mut self,
        parser: EnumParser<T>,
    ) -> bool {
        self.register(Arc::new(parser), false)
    }

    /// Looks up the parser registered for a target type.
    ///
    /// A miss is `None`, never a panic; callers on the ad-hoc parse path
    /// decide whether that is an error.
    #[must_use]
    pub fn parser_for(&self, target: TypeId) -> Option<Arc<dyn TypeParser>> {
        self.parsers.get(&target).cloned()
    }

    /// Returns `true` if a parser is registered for the target type.
    #[must_use]
    pub fn can_locate(&self, target: TypeId) -> bool {
        self.parsers.contains_key(&target)
    }

    /// Resolves the array parser for element type `E`, synthesizing and
    /// caching it on first request.
    ///
    /// Returns `None` when no parser is registered for `E`, or when `E`'s
    /// parser does not allow array membership (nested arrays stay
    /// unsupported).
    #[must_use]
    pub fn array_parser_for<E: 'static>(&self) -> Option<Arc<dyn TypeParser>> {
        let element_id = TypeId::of::<E>();
        if let Ok(cache) = self.array_parsers.read() {
            if let Some(found) = cache.get(&element_id) {
                return Some(found.clone());
            }
        }

        let element = self.parsers.get(&element_id)?.clone();
        if !element.can_be_array_element() {
            log::warn!(
                "Values of type {} cannot be array elements; no array parser synthesized.",
                element.target_name()
            );
            return None;
        }

        let parser: Arc<dyn TypeParser> = Arc::new(ArrayParser::<E>::new(element));
        if let Ok(mut cache) = self.array_parsers.write() {
            cache.insert(element_id, parser.clone());
        }
        Some(parser)
    }

    /// Parses `raw` with the parser registered for `T` and downcasts the
    /// result.
    pub fn parse_registered<T: 'static>(&self, raw: &str) -> Result<T, ParseError> {
        let parser =
            self.parser_for(TypeId::of::<T>())
                .ok_or_else(|| ParseError::ParserNotFound {
                    target: std::any::type_name::<T>(),
                })?;
        let value = parser.parse(raw)?;
        match value.downcast::<T>() {
            Ok(boxed) => Ok(*boxed),
            Err(_) => Err(ParseError::UnexpectedValueType {
                target: std::any::type_name::<T>(),
            }),
        }
    }

    /// Parses `raw` into any [`FromConfig`] type, routing `Vec<E>` through
    /// the synthesized array parser.
    pub fn parse_value<T: FromConfig>(&self, raw: &str) -> Result<T, ParseError> {
        T::from_config(raw, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyxis_core::math::Vec2;
    use std::any::Any;

    struct FixedIntParser(i32);

    impl TypeParser for FixedIntParser {
        fn target_type(&self) -> TypeId {
            TypeId::of::<i32>()
        }

        fn target_name(&self) -> &'static str {
            "i32"
        }

        fn parse(&self, _raw: &str) -> Result<Box<dyn Any>, ParseError> {
            Ok(Box::new(self.0))
        }
    }

    #[test]
    fn test_first_registration_wins() {
        let mut registry = ParserRegistry::with_defaults();
        assert!(!registry.register(Arc::new(FixedIntParser(7)), false));
        assert_eq!(registry.parse_registered::<i32>("42").unwrap(), 42);
    }

    #[test]
    fn test_overwrite_replaces() {
        let mut registry = ParserRegistry::with_defaults();
        assert!(registry.register(Arc::new(FixedIntParser(7)), true));
        assert_eq!(registry.parse_registered::<i32>("42").unwrap(), 7);
    }

    #[test]
    fn test_unregistered_type_is_not_found() {
        struct Unregistered;
        let registry = ParserRegistry::with_defaults();
        assert!(registry.parser_for(TypeId::of::<Unregistered>()).is_none());
        assert!(!registry.can_locate(TypeId::of::<Unregistered>()));
        assert!(registry.can_locate(TypeId::of::<bool>()));
        assert!(matches!(
            registry.parse_registered::<Unregistered>("x"),
            Err(ParseError::ParserNotFound { .. })
        ));
    }

    #[test]
    fn test_array_parser_is_synthesized_and_cached() {
        let registry = ParserRegistry::with_defaults();
        let first = registry.array_parser_for::<i32>().unwrap();
        let second = registry.array_parser_for::<i32>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let parsed = registry.parse_value::<Vec<i32>>("[1,2,3,4,5]").unwrap();
        assert_eq!(parsed, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_no_array_of_vectors() {
        let registry = ParserRegistry::with_defaults();
        assert!(registry.array_parser_for::<Vec2>().is_none());
    }

    #[test]
    fn test_no_array_of_arrays() {
        let registry = ParserRegistry::with_defaults();
        // Vec<i32> has no scalar parser registered, only the synthesized
        // array parser, so Vec<Vec<i32>> resolves to nothing.
        assert!(registry.array_parser_for::<Vec<i32>>().is_none());
    }

    #[test]
    fn test_parse_value_for_scalars_and_vectors() {
        let registry = ParserRegistry::with_defaults();
        assert_eq!(registry.parse_value::<i32>("159").unwrap(), 159);
        assert_eq!(
            registry.parse_value::<Vec2>("(1, 2)").unwrap(),
            Vec2::new(1.0, 2.0)
        );
        assert!(registry.parse_value::<bool>("yes").is_err());
    }
}
