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

//! The in-memory configuration document.

use indexmap::IndexMap;

/// Ordered `key -> raw value` entries of one `[section]`.
///
/// Keys are case-sensitive and unique within a section.
pub type SectionData = IndexMap<String, String>;

/// An ordered collection of named sections, each mapping keys to raw
/// string values.
///
/// A document is built once by the INI deserializer (or by hand) and is
/// immutable afterwards; [`ConfigDocument::merged_with`] produces a new
/// document rather than mutating in place, so holders of the previous
/// document are never surprised by an overlay.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConfigDocument {
    sections: IndexMap<String, SectionData>,
}

impl ConfigDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a section under its name.
    ///
    /// Returns `false` (and leaves the document unchanged) when the name is
    /// already present; section names are unique within a document.
    pub fn insert_section(&mut self, name: impl Into<String>, entries: SectionData) -> bool {
        let name = name.into();
        if self.sections.contains_key(&name) {
            return false;
        }
        self.sections.insert(name, entries);
        true
    }

    /// Returns `true` if a section with the given name exists.
    #[must_use]
    pub fn contains_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Looks up a section by name.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&SectionData> {
        self.sections.get(name)
    }

    /// Looks up a single raw value.
    #[must_use]
    pub fn value(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
    }

    /// Iterates sections in document order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &SectionData)> {
        self.sections
            .iter()
            .map(|(name, entries)| (name.as_str(), entries))
    }

    /// Returns the number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if the document holds no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Produces a new document with `overlay` applied on top of `self`.
    ///
    /// Keys of sections present in both documents are overridden at the
    /// key level; sections only present in the overlay are appended
    /// wholesale. Neither source document is modified.
    #[must_use]
    pub fn merged_with(&self, overlay: &ConfigDocument) -> ConfigDocument {
        let mut merged = self.clone();
        for (name, entries) in overlay.sections() {
            match merged.sections.get_mut(name) {
                Some(existing) => {
                    for (key, value) in entries {
                        existing.insert(key.clone(), value.clone());
                    }
                }
                None => {
                    merged.sections.insert(name.to_string(), entries.clone());
                }
            }
        }
        merged
    }
}
