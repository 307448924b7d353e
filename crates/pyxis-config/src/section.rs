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

//! Declarative binding of config sections onto plain structs.
//!
//! A type implementing [`ConfigSection`] declares which `[section]` it
//! reads and, per field, which key feeds it. The implementation is
//! normally generated by the `ConfigSection` derive:
//!
//! ```ignore
//! #[derive(Default, ConfigSection)]
//! #[section(name = "TestConfig")]
//! struct TestConfig {
//!     #[config(key = "IntValue")]
//!     int_value: i32,
//!     #[config(key = "LongValue", with = LongParser)]
//!     long_value: i64,
//!     #[config(key = "IntArray")]
//!     int_array: Vec<i32>,
//! }
//! ```
//!
//! Binding is tolerant of absence: a missing section or key leaves the
//! field at its default value and logs one warning. A present value that
//! fails to parse is an error; format problems are never swallowed.

use std::any::Any;

use crate::document::SectionData;
use crate::error::ConfigError;
use crate::parser::{FromConfig, ParseError, TypeParser};
use crate::registry::ParserRegistry;

/// A struct that can be populated from one named config section.
///
/// Implementations are normally generated by the `ConfigSection` derive;
/// hand-written implementations just call [`SectionBinder::bind`] once per
/// field.
pub trait ConfigSection: Default {
    /// The `[section]` header this type binds to.
    const SECTION_NAME: &'static str;

    /// Declares the key-to-field bindings by driving the binder.
    fn bind(&mut self, binder: &mut SectionBinder<'_>);
}

/// Walks a resolved section and assigns parsed values onto a target's
/// fields.
///
/// Parse failures are collected and surfaced by [`SectionBinder::finish`];
/// missing keys only warn.
pub struct SectionBinder<'a> {
    section_name: &'a str,
    entries: Option<&'a SectionData>,
    registry: &'a ParserRegistry,
    errors: Vec<ConfigError>,
}

impl<'a> SectionBinder<'a> {
    /// Creates a binder over a resolved section.
    ///
    /// `entries` is `None` when the section is absent from the document;
    /// every bind then keeps its field's default.
    #[must_use]
    pub fn new(
        section_name: &'a str,
        entries: Option<&'a SectionData>,
        registry: &'a ParserRegistry,
    ) -> Self {
        Self {
            section_name,
            entries,
            registry,
            errors: Vec::new(),
        }
    }

    /// Binds the value under `key` onto `slot` using the registry's parser
    /// for `T`.
    ///
    /// A missing key logs one warning and leaves `slot` untouched.
    pub fn bind<T: FromConfig>(&mut self, key: &str, slot: &mut T) {
        let Some(raw) = self.lookup(key) else {
            return;
        };
        match T::from_config(raw, self.registry) {
            Ok(value) => *slot = value,
            Err(source) => self.record(key, source),
        }
    }

    /// Binds the value under `key` onto `slot` using an explicit override
    /// parser instead of the registry's default for `T`.
    pub fn bind_with<T: 'static>(&mut self, key: &str, slot: &mut T, parser: &dyn TypeParser) {
        let Some(raw) = self.lookup(key) else {
            return;
        };
        let parsed = parser.parse(raw).and_then(|value| {
            value
                .downcast::<T>()
                .map(|boxed| *boxed)
                .map_err(|_: Box<dyn Any>| ParseError::UnexpectedValueType {
                    target: std::any::type_name::<T>(),
                })
        });
        match parsed {
            Ok(value) => *slot = value,
            Err(source) => self.record(key, source),
        }
    }

    /// Surfaces the first collected parse error, if any.
    pub fn finish(self) -> Result<(), ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn lookup(&self, key: &str) -> Option<&'a str> {
        let entries = self.entries?;
        let found = entries.get(key).map(String::as_str);
        if found.is_none() {
            log::warn!(
                "No config value found for {}.{}",
                self.section_name,
                key
            );
        }
        found
    }

    fn record(&mut self, key: &str, source: ParseError) {
        self.errors.push(ConfigError::Value {
            section: self.section_name.to_string(),
            key: key.to_string(),
            source,
        });
    }
}
