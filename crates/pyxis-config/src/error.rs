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

//! Error types for configuration loading and binding.

use crate::parser::ParseError;
use thiserror::Error;

/// An error raised while reading, parsing, or binding a configuration
/// document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A line did not match the `key=value` shape, a `[section]` header, a
    /// comment, or a blank line.
    #[error("invalid config format at line {line}: {content}")]
    InvalidFormat {
        /// 1-based line number of the offending line.
        line: usize,
        /// The offending line, trimmed.
        content: String,
    },

    /// A `[section]` header re-declared a name already present in the
    /// document.
    #[error("duplicate section name '{name}' at line {line}")]
    DuplicateSection {
        /// The re-declared section name.
        name: String,
        /// 1-based line number of the second header.
        line: usize,
    },

    /// A raw value could not be parsed into its declared type.
    #[error("failed to parse config value {section}.{key}")]
    Value {
        /// The section the value was read from.
        section: String,
        /// The key the value was read from.
        key: String,
        /// The underlying parse failure.
        #[source]
        source: ParseError,
    },

    /// Reading the configuration source failed.
    #[error("failed to read config source")]
    Io(#[from] std::io::Error),
}
