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

//! The INI text format.
//!
//! The grammar is line-oriented:
//!
//! - lines are trimmed before interpretation,
//! - lines starting with `#` are comments and skipped,
//! - a line of the exact shape `[name]` opens a new section,
//! - any other non-blank line must be `key=value`, split on the first `=`
//!   with both sides trimmed,
//! - blank lines are ignored.
//!
//! Re-declaring a section name is a hard error carrying the line of the
//! second header. Key/value lines before the first section header are
//! dropped. There is no quoting or escaping: values containing `[`, `]`,
//! or newlines do not survive a round trip.

use std::io::{Read, Write};

use crate::document::{ConfigDocument, SectionData};
use crate::error::ConfigError;

/// Deserializes an INI document from text.
pub fn deserialize(text: &str) -> Result<ConfigDocument, ConfigError> {
    let mut document = ConfigDocument::new();
    let mut current_section: Option<String> = None;
    let mut entries = SectionData::new();

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        let trimmed = line.trim();

        // Skip comments
        if trimmed.starts_with('#') {
            continue;
        }

        if trimmed.len() >= 2 && trimmed.starts_with('[') && trimmed.ends_with(']') {
            // Start of a new section; flush the previous one.
            let previous_entries = std::mem::take(&mut entries);
            if let Some(name) = current_section.take() {
                document.insert_section(name, previous_entries);
            }

            let name = trimmed[1..trimmed.len() - 1].to_string();
            if document.contains_section(&name) {
                return Err(ConfigError::DuplicateSection {
                    name,
                    line: line_number,
                });
            }
            current_section = Some(name);
        } else if trimmed.is_empty() {
            continue;
        } else {
            match trimmed.split_once('=') {
                Some((key, value)) => {
                    entries.insert(key.trim().to_string(), value.trim().to_string());
                }
                None => {
                    return Err(ConfigError::InvalidFormat {
                        line: line_number,
                        content: trimmed.to_string(),
                    });
                }
            }
        }
    }

    // Flush the last open section, if any.
    if let Some(name) = current_section {
        document.insert_section(name, entries);
    }

    Ok(document)
}

/// Deserializes an INI document from a reader.
pub fn deserialize_reader(mut reader: impl Read) -> Result<ConfigDocument, ConfigError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    deserialize(&text)
}

/// Serializes a document back to INI text, the literal inverse of
/// [`deserialize`]: a `[name]` header per section in document order, then
/// one `key=value` line per entry. No escaping is performed.
#[must_use]
pub fn serialize(document: &ConfigDocument) -> String {
    let mut result = String::new();
    for (name, entries) in document.sections() {
        result.push_str(&format!("[{name}]\n"));
        for (key, value) in entries {
            result.push_str(&format!("{key}={value}\n"));
        }
    }
    result
}

/// Serializes a document as INI text into a writer.
pub fn serialize_writer(
    document: &ConfigDocument,
    mut writer: impl Write,
) -> Result<(), ConfigError> {
    writer.write_all(serialize(document).as_bytes())?;
    Ok(())
}
