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

//! # Pyxis Config
//!
//! INI-based configuration for the engine: the document model, the INI
//! de/serializer, the string-to-type parsing subsystem behind the
//! [`ParserRegistry`], and declarative section binding.
//!
//! The usual flow: raw config text -> [`ini::deserialize`] ->
//! [`ConfigDocument`] -> [`ConfigProvider`] -> typed values, either ad-hoc
//! through [`ConfigProvider::param`] or whole-section through
//! [`ConfigProvider::section`] and the `ConfigSection` derive.

#![warn(missing_docs)]

pub mod document;
pub mod error;
pub mod ini;
pub mod parser;
pub mod provider;
pub mod registry;
pub mod section;

pub use document::{ConfigDocument, SectionData};
pub use error::ConfigError;
pub use parser::{FromConfig, ParseError, TypeParser};
pub use provider::ConfigProvider;
pub use registry::ParserRegistry;
pub use section::{ConfigSection, SectionBinder};

// The derive that generates `ConfigSection` implementations.
pub use pyxis_macros::ConfigSection;
