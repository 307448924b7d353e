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

//! Parser for variable-length array literals.
//!
//! The literal grammar is `[e1, e2, ..., eN]`: enclosing square brackets
//! and zero or more comma-separated elements. `[]` and absent input both
//! yield an empty array. Each element is delegated to the element type's
//! parser, so any registered scalar type is implicitly array-capable.

use std::any::{Any, TypeId};
use std::marker::PhantomData;
use std::sync::Arc;

use super::{ParseError, TypeParser};

/// Parses `Vec<E>` in terms of the parser registered for `E`.
///
/// Instances are synthesized and cached by the
/// [`ParserRegistry`](crate::registry::ParserRegistry); the registry is also
/// what enforces that `E`'s parser allows array membership, so nested
/// arrays never get a parser.
pub struct ArrayParser<E: 'static> {
    element: Arc<dyn TypeParser>,
    _marker: PhantomData<fn() -> E>,
}

impl<E: 'static> ArrayParser<E> {
    /// Wraps the element parser. The caller is responsible for checking
    /// that `element` produces `E` and allows array membership.
    pub(crate) fn new(element: Arc<dyn TypeParser>) -> Self {
        Self {
            element,
            _marker: PhantomData,
        }
    }

    /// Parses an optional literal; absent input yields an empty array.
    pub fn parse_opt(&self, raw: Option<&str>) -> Result<Vec<E>, ParseError> {
        match raw {
            Some(value) => self.parse_literal(value),
            None => Ok(Vec::new()),
        }
    }

    /// Parses a `[e1, ..., eN]` literal.
    pub fn parse_literal(&self, raw: &str) -> Result<Vec<E>, ParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }
        let inner = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or(ParseError::MissingDelimiters {
                open: '[',
                close: ']',
            })?;
        if inner.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut elements = Vec::new();
        for element_raw in inner.split(',') {
            let value = self.element.parse(element_raw)?;
            match value.downcast::<E>() {
                Ok(element) => elements.push(*element),
                Err(_) => {
                    return Err(ParseError::UnexpectedValueType {
                        target: std::any::type_name::<E>(),
                    })
                }
            }
        }
        Ok(elements)
    }
}

impl<E: 'static> TypeParser for ArrayParser<E> {
    fn target_type(&self) -> TypeId {
        TypeId::of::<Vec<E>>()
    }

    fn target_name(&self) -> &'static str {
        std::any::type_name::<Vec<E>>()
    }

    fn parse(&self, raw: &str) -> Result<Box<dyn Any>, ParseError> {
        self.parse_literal(raw)
            .map(|elements| Box::new(elements) as Box<dyn Any>)
    }
}
