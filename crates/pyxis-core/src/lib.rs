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

//! # Pyxis Core
//!
//! Foundational crate containing the engine's core value types: the math
//! primitives targeted by the configuration and serialization grammars,
//! and semantic version management.

#![warn(missing_docs)]

pub mod math;
pub mod version;

pub use version::{PreReleaseField, Version};
