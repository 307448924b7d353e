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

//! # Pyxis Serialization
//!
//! Polymorphic JSON serialization for registered object graphs.
//!
//! Types opt in by registering a wire contract with a
//! [`SerializationContext`]: a wire type name (the `$type` discriminator),
//! the serializable properties keyed by their wire names, and optionally a
//! base type through `extends`, which is what carries polymorphism — a
//! base-declared object field can round-trip a registered extension with
//! its extra properties intact. The [`JsonSerializer`] then encodes and
//! decodes object graphs recursively; leaf values follow the
//! [`wire::WireField`] vocabulary, which shares the configuration
//! grammar's literal forms for vector-like types.

#![warn(missing_docs)]

pub mod context;
pub mod error;
pub mod json;
pub mod wire;

pub use context::{SerializationContext, SerializationContextBuilder, TypeRegistration};
pub use error::SerializationError;
pub use json::JsonSerializer;
pub use wire::WireField;
