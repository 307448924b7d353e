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

//! Error types for the serialization subsystem.

use thiserror::Error;

/// An error raised while building a serialization context or while
/// encoding/decoding an object graph.
#[derive(Debug, Error)]
pub enum SerializationError {
    /// The type has no registered wire contract and cannot be serialized
    /// or deserialized.
    #[error("type {type_name} has no serialization info registered")]
    UnregisteredType {
        /// The offending type's name.
        type_name: String,
    },

    /// A `$type` discriminator named a wire type the context does not
    /// know.
    #[error("unknown $type tag '{tag}'")]
    UnknownTypeTag {
        /// The unresolvable tag.
        tag: String,
    },

    /// An object carried no `$type` discriminator and no expected type was
    /// available to fall back to.
    #[error("missing $type tag and no expected type to fall back to")]
    MissingTypeTag,

    /// A `$type` discriminator named a type that is not assignable to the
    /// expected type.
    #[error("$type tag '{found}' is not assignable to expected type '{expected}'")]
    TypeMismatch {
        /// The expected wire type name.
        expected: String,
        /// The wire type name found in the payload.
        found: String,
    },

    /// A JSON value had a different shape than the destination requires.
    #[error("expected {expected}")]
    UnexpectedShape {
        /// Description of the expected shape.
        expected: &'static str,
    },

    /// A JSON value was shaped correctly but carried an invalid payload.
    #[error("invalid wire value: {reason}")]
    InvalidValue {
        /// What was wrong with the payload.
        reason: String,
    },

    /// A property failed to encode or decode.
    #[error("failed to process property '{wire_name}'")]
    Property {
        /// The property's wire name.
        wire_name: String,
        /// The underlying failure.
        #[source]
        source: Box<SerializationError>,
    },

    /// Two registrations claimed the same wire type name or the same Rust
    /// type (construction error).
    #[error("duplicate serialization registration for '{name}'")]
    DuplicateType {
        /// The claimed name.
        name: String,
    },

    /// Two properties of one type claimed the same wire name
    /// (construction error).
    #[error("type '{type_name}' declares multiple properties named '{wire_name}'")]
    DuplicateProperty {
        /// The declaring wire type name.
        type_name: String,
        /// The duplicated property wire name.
        wire_name: String,
    },

    /// An `extends` declaration named a wire type that is not registered
    /// (construction error).
    #[error("extends target '{base}' of '{wire_name}' is not registered")]
    UnknownBase {
        /// The extending type's wire name.
        wire_name: String,
        /// The dangling base name.
        base: String,
    },

    /// The underlying JSON text could not be parsed or printed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
