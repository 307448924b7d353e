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

//! The configuration provider.
//!
//! A [`ConfigProvider`] pairs an immutable [`ConfigDocument`] with a
//! [`ParserRegistry`] and is the entry point consumers use: ad-hoc typed
//! lookups via [`ConfigProvider::param`], whole-section population via
//! [`ConfigProvider::section`], and session-local overlays via
//! [`ConfigProvider::append_config`]. Reading the underlying bytes is the
//! caller's concern; the provider only ever sees materialized text.

use std::io::Read;

use crate::document::{ConfigDocument, SectionData};
use crate::error::ConfigError;
use crate::ini;
use crate::parser::FromConfig;
use crate::registry::ParserRegistry;
use crate::section::{ConfigSection, SectionBinder};

/// Owns the current configuration document and resolves typed values out
/// of it.
pub struct ConfigProvider {
    document: ConfigDocument,
    registry: ParserRegistry,
}

impl ConfigProvider {
    /// Creates a provider over an already-built document.
    #[must_use]
    pub fn new(document: ConfigDocument, registry: ParserRegistry) -> Self {
        Self { document, registry }
    }

    /// Parses INI text into a provider.
    pub fn from_str(text: &str, registry: ParserRegistry) -> Result<Self, ConfigError> {
        Ok(Self::new(ini::deserialize(text)?, registry))
    }

    /// Parses INI text from a reader into a provider.
    pub fn from_reader(reader: impl Read, registry: ParserRegistry) -> Result<Self, ConfigError> {
        Ok(Self::new(ini::deserialize_reader(reader)?, registry))
    }

    /// The current document.
    #[must_use]
    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    /// The parser registry backing typed lookups.
    #[must_use]
    pub fn registry(&self) -> &ParserRegistry {
        &self.registry
    }

    /// Applies an overlay on top of the current document.
    ///
    /// The overlay text is parsed and merged key-over-key into existing
    /// sections; new sections are appended wholesale. The held document is
    /// replaced with the merged result; it is never mutated in place, so
    /// previously returned references to sections stay consistent with
    /// what their callers saw.
    pub fn append_config(&mut self, text: &str) -> Result<(), ConfigError> {
        let overlay = ini::deserialize(text)?;
        self.document = self.document.merged_with(&overlay);
        Ok(())
    }

    /// Looks up a section's raw entries.
    #[must_use]
    pub fn section_map(&self, name: &str) -> Option<&SectionData> {
        self.document.section(name)
    }

    /// Looks up a single raw value.
    #[must_use]
    pub fn raw_param(&self, section: &str, key: &str) -> Option<&str> {
        self.document.value(section, key)
    }

    /// Looks up and parses a single value.
    ///
    /// Absence is explicit: a missing section or key is `Ok(None)`, a
    /// present value that fails to parse is an error. A returned value is
    /// therefore never ambiguous with a parsed zero.
    pub fn param<T: FromConfig>(
        &self,
        section: &str,
        key: &str,
    ) -> Result<Option<T>, ConfigError> {
        let Some(raw) = self.raw_param(section, key) else {
            return Ok(None);
        };
        self.registry
            .parse_value::<T>(raw)
            .map(Some)
            .map_err(|source| ConfigError::Value {
                section: section.to_string(),
                key: key.to_string(),
                source,
            })
    }

    /// Builds and populates a [`ConfigSection`] target from the document.
    ///
    /// A missing section logs one warning and returns the target with all
    /// fields at their defaults; this is never a hard failure. A value that
    /// fails to parse is.
    pub fn section<S: ConfigSection>(&self) -> Result<S, ConfigError> {
        let entries = self.document.section(S::SECTION_NAME);
        if entries.is_none() {
            log::warn!(
                "No config section found for {} in the config. Fields of {} will keep their defaults.",
                S::SECTION_NAME,
                std::any::type_name::<S>()
            );
        }

        let mut target = S::default();
        let mut binder = SectionBinder::new(S::SECTION_NAME, entries, &self.registry);
        target.bind(&mut binder);
        binder.finish()?;
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(text: &str) -> ConfigProvider {
        ConfigProvider::from_str(text, ParserRegistry::with_defaults()).unwrap()
    }

    #[test]
    fn test_param_present_absent_and_invalid() {
        let provider = provider("[Game]\nLives=3\nSpeed=fast\n");
        assert!(provider.section_map("Game").is_some());
        assert!(provider.section_map("Missing").is_none());
        assert_eq!(provider.param::<i32>("Game", "Lives").unwrap(), Some(3));
        assert_eq!(provider.param::<i32>("Game", "Missing").unwrap(), None);
        assert_eq!(provider.param::<i32>("Missing", "Lives").unwrap(), None);
        assert!(provider.param::<f32>("Game", "Speed").is_err());
    }

    #[test]
    fn test_append_config_overlays_without_mutating_sources() {
        let mut provider = provider("[Game]\nLives=3\nTitle=Base\n");
        provider
            .append_config("[Game]\nLives=5\n[Debug]\nEnabled=true\n")
            .unwrap();

        assert_eq!(provider.param::<i32>("Game", "Lives").unwrap(), Some(5));
        assert_eq!(
            provider.param::<String>("Game", "Title").unwrap(),
            Some("Base".to_string())
        );
        assert_eq!(
            provider.param::<bool>("Debug", "Enabled").unwrap(),
            Some(true)
        );
    }

    #[test]
    fn test_append_config_rejects_malformed_overlay() {
        let mut provider = provider("[Game]\nLives=3\n");
        assert!(provider.append_config("[Game]\nbroken line\n").is_err());
        // The held document is untouched after a failed overlay.
        assert_eq!(provider.param::<i32>("Game", "Lives").unwrap(), Some(3));
    }
}
