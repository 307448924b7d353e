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

//! End-to-end tests for config loading and section binding.

use std::any::{Any, TypeId};
use std::sync::Arc;

use approx::assert_relative_eq;
use pyxis_config::parser::{ParseError, TypeParser};
use pyxis_config::{ConfigProvider, ConfigSection, ParserRegistry};
use pyxis_core::math::{Quaternion, Vec3};

const TEST_CONFIG: &str = "[TestConfig]\n\
    IntValue=159\n\
    BoolValue=True\n\
    FloatValue=3.14\n\
    StringValue=TEST_STRING\n\
    LongValue=1234523789\n\
    IntArray=[1,2,3,4,5]\n";

/// An override parser that accepts hexadecimal input on top of decimal.
#[derive(Default)]
struct LongParser;

impl TypeParser for LongParser {
    fn target_type(&self) -> TypeId {
        TypeId::of::<i64>()
    }

    fn target_name(&self) -> &'static str {
        "i64"
    }

    fn parse(&self, raw: &str) -> Result<Box<dyn Any>, ParseError> {
        let trimmed = raw.trim();
        let parsed = match trimmed.strip_prefix("0x") {
            Some(digits) => i64::from_str_radix(digits, 16),
            None => trimmed.parse::<i64>(),
        };
        parsed
            .map(|value| Box::new(value) as Box<dyn Any>)
            .map_err(|_| ParseError::invalid_literal::<i64>(raw))
    }
}

#[derive(Default, ConfigSection)]
#[section(name = "TestConfig")]
struct TestConfig {
    #[config(key = "IntValue")]
    some_integer: i32,
    #[config(key = "BoolValue")]
    some_boolean: bool,
    #[config(key = "FloatValue")]
    some_float: f32,
    #[config(key = "StringValue")]
    some_string: String,
    #[config(key = "LongValue", with = LongParser)]
    some_long: i64,
    #[config(key = "IntArray")]
    some_int_array: Vec<i32>,
    #[config(key = "MissingValue")]
    some_missing: i32,
    // Not config-bound on purpose.
    untouched: i32,
}

fn load() -> TestConfig {
    let provider = ConfigProvider::from_str(TEST_CONFIG, ParserRegistry::with_defaults())
        .expect("test config parses");
    provider.section::<TestConfig>().expect("section binds")
}

#[test]
fn test_config_section_primitives() {
    let config = load();
    assert_eq!(config.some_integer, 159);
    assert!(config.some_boolean);
    assert_relative_eq!(config.some_float, 3.14);
    assert_eq!(config.some_string, "TEST_STRING");
}

#[test]
fn test_config_section_array_parsing() {
    let config = load();
    assert_eq!(config.some_int_array, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_override_parser_is_used() {
    let config = load();
    assert_eq!(config.some_long, 1_234_523_789);

    let provider = ConfigProvider::from_str(
        "[TestConfig]\nLongValue=0xff\n",
        ParserRegistry::with_defaults(),
    )
    .unwrap();
    let config = provider.section::<TestConfig>().unwrap();
    assert_eq!(config.some_long, 255);
}

#[test]
fn test_missing_key_and_unbound_field_keep_defaults() {
    let config = load();
    assert_eq!(config.some_missing, 0);
    assert_eq!(config.untouched, 0);
}

#[test]
fn test_missing_section_keeps_defaults_without_failing() {
    let provider =
        ConfigProvider::from_str("[Other]\nx=1\n", ParserRegistry::with_defaults()).unwrap();
    let config = provider.section::<TestConfig>().unwrap();
    assert_eq!(config.some_integer, 0);
    assert!(config.some_int_array.is_empty());
}

#[test]
fn test_unparseable_value_fails_binding() {
    let provider = ConfigProvider::from_str(
        "[TestConfig]\nIntValue=nine\n",
        ParserRegistry::with_defaults(),
    )
    .unwrap();
    assert!(provider.section::<TestConfig>().is_err());
}

#[derive(Default, ConfigSection)]
struct SpawnPoints {
    #[config(key = "Origin")]
    origin: Vec3,
    #[config(key = "Orientation")]
    orientation: Quaternion,
    #[config(key = "Weights")]
    weights: Vec<f64>,
}

#[test]
fn test_section_name_defaults_to_type_name() {
    let provider = ConfigProvider::from_str(
        "[SpawnPoints]\n\
         Origin=(0, 1, 2)\n\
         Orientation=(0, 0, 0, 1)\n\
         Weights=[0.25, 0.75]\n",
        ParserRegistry::with_defaults(),
    )
    .unwrap();
    let spawn = provider.section::<SpawnPoints>().unwrap();
    assert_eq!(spawn.origin, Vec3::new(0.0, 1.0, 2.0));
    assert_eq!(spawn.orientation, Quaternion::IDENTITY);
    assert_eq!(spawn.weights, vec![0.25, 0.75]);
}

#[test]
fn test_appended_overlay_feeds_bindings() {
    let mut provider =
        ConfigProvider::from_str("[TestConfig]\nIntValue=1\n", ParserRegistry::with_defaults())
            .unwrap();
    provider.append_config("[TestConfig]\nIntValue=2\n").unwrap();
    let config = provider.section::<TestConfig>().unwrap();
    assert_eq!(config.some_integer, 2);
}

#[test]
fn test_custom_parser_can_claim_new_type() {
    #[derive(Debug, Default, Clone, Copy, PartialEq)]
    struct Percentage(f32);

    struct PercentageParser;

    impl TypeParser for PercentageParser {
        fn target_type(&self) -> TypeId {
            TypeId::of::<Percentage>()
        }

        fn target_name(&self) -> &'static str {
            "Percentage"
        }

        fn parse(&self, raw: &str) -> Result<Box<dyn Any>, ParseError> {
            let digits = raw
                .trim()
                .strip_suffix('%')
                .ok_or_else(|| ParseError::invalid_literal::<Percentage>(raw))?;
            digits
                .trim()
                .parse::<f32>()
                .map(|value| Box::new(Percentage(value / 100.0)) as Box<dyn Any>)
                .map_err(|_| ParseError::invalid_literal::<Percentage>(raw))
        }
    }

    let mut registry = ParserRegistry::with_defaults();
    assert!(registry.register(Arc::new(PercentageParser), false));

    let provider = ConfigProvider::from_str("[Display]\nScale=150%\n", registry).unwrap();
    let scale = provider
        .registry()
        .parse_registered::<Percentage>(provider.raw_param("Display", "Scale").unwrap())
        .unwrap();
    assert_eq!(scale, Percentage(1.5));
}
