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

//! End-to-end tests for the `$type`-tagged JSON codec, including the
//! base-declared-field-holds-extension round trip.

use std::any::Any;
use std::sync::Arc;

use pyxis_core::math::Vec3;
use pyxis_serialization::{
    JsonSerializer, SerializationContext, SerializationError, TypeRegistration,
};

#[derive(Default)]
struct TestPayload {
    test_int: i32,
    test_list: Vec<i32>,
    test_object: Option<Box<dyn Any>>,
}

struct InnerPayload {
    test_float: f32,
    vector: Vec3,
}

impl Default for InnerPayload {
    fn default() -> Self {
        Self {
            test_float: 6.0,
            vector: Vec3::ZERO,
        }
    }
}

struct ExtendedInnerPayload {
    base: InnerPayload,
    extended_test_float: f32,
}

impl Default for ExtendedInnerPayload {
    fn default() -> Self {
        Self {
            base: InnerPayload::default(),
            extended_test_float: 7.0,
        }
    }
}

#[derive(Default)]
struct UnrelatedPayload {
    name: String,
}

fn codec() -> JsonSerializer {
    let mut builder = SerializationContext::builder();
    builder.register(
        TypeRegistration::<TestPayload>::new("tests.TestPayload")
            .field("testInt", |o| &o.test_int, |o| &mut o.test_int)
            .field("testList", |o| &o.test_list, |o| &mut o.test_list)
            .object_field::<InnerPayload>("testObject", |o| &o.test_object, |o| {
                &mut o.test_object
            }),
    );
    builder.register(
        TypeRegistration::<InnerPayload>::new("tests.InnerPayload")
            .field("testFloat", |o| &o.test_float, |o| &mut o.test_float)
            .field("serializableVector3", |o| &o.vector, |o| &mut o.vector),
    );
    builder.register(
        TypeRegistration::<ExtendedInnerPayload>::new("tests.ExtendedInnerPayload")
            .extends("tests.InnerPayload")
            .field("testFloat", |o| &o.base.test_float, |o| &mut o.base.test_float)
            .field(
                "serializableVector3",
                |o| &o.base.vector,
                |o| &mut o.base.vector,
            )
            .field(
                "extendedTestFloat",
                |o| &o.extended_test_float,
                |o| &mut o.extended_test_float,
            ),
    );
    builder.register(
        TypeRegistration::<UnrelatedPayload>::new("tests.UnrelatedPayload")
            .field("name", |o| &o.name, |o| &mut o.name),
    );
    JsonSerializer::new(Arc::new(builder.build().expect("context builds")))
}

const TEST_JSON: &str = r#"{
    "$type": "tests.TestPayload",
    "testInt": 5,
    "testObject": {
        "$type": "tests.InnerPayload",
        "testFloat": 3.0,
        "serializableVector3": "(0, 1, 2)"
    }
}"#;

#[test]
fn test_deserialization_from_raw_json() {
    let codec = codec();
    let result = codec.deserialize(TEST_JSON).unwrap();
    let payload = result
        .downcast_ref::<TestPayload>()
        .expect("root resolves to TestPayload");
    assert_eq!(payload.test_int, 5);

    let inner = payload
        .test_object
        .as_ref()
        .and_then(|object| object.downcast_ref::<InnerPayload>())
        .expect("inner resolves to InnerPayload");
    assert_eq!(inner.test_float, 3.0);
    assert_eq!(inner.vector, Vec3::new(0.0, 1.0, 2.0));
}

#[test]
fn test_serialization_uses_wire_names() {
    let codec = codec();
    let payload = TestPayload {
        test_int: 5,
        test_list: vec![1, 2, 3, 4, 5],
        test_object: Some(Box::new(InnerPayload {
            test_float: 3.0,
            vector: Vec3::new(0.0, 1.0, 2.0),
        })),
    };
    let serialized = codec.serialize(&payload).unwrap();
    assert!(serialized.contains("\"testInt\":5"));
    assert!(serialized.contains("\"$type\":\"tests.TestPayload\""));
    assert!(serialized.contains("\"serializableVector3\":\"(0, 1, 2)\""));
}

#[test]
fn test_polymorphic_round_trip_keeps_extension_fields() {
    let codec = codec();
    let payload = TestPayload {
        test_int: 5,
        test_list: vec![1, 2, 3, 4, 5],
        test_object: Some(Box::new(ExtendedInnerPayload {
            base: InnerPayload {
                test_float: 3.0,
                vector: Vec3::new(0.0, 1.0, 2.0),
            },
            extended_test_float: 4.0,
        })),
    };

    let serialized = codec.serialize(&payload).unwrap();
    assert!(serialized.contains("\"$type\":\"tests.ExtendedInnerPayload\""));

    let result = codec.deserialize(&serialized).unwrap();
    let decoded = result
        .downcast_ref::<TestPayload>()
        .expect("root resolves to TestPayload");
    assert_eq!(decoded.test_list, vec![1, 2, 3, 4, 5]);

    // The base-declared field came back as the richer extension.
    let inner = decoded
        .test_object
        .as_ref()
        .and_then(|object| object.downcast_ref::<ExtendedInnerPayload>())
        .expect("inner resolves to the extension");
    assert_eq!(inner.base.test_float, 3.0);
    assert_eq!(inner.base.vector, Vec3::new(0.0, 1.0, 2.0));
    assert_eq!(inner.extended_test_float, 4.0);
}

#[test]
fn test_unrelated_tag_in_object_field_is_a_type_mismatch() {
    let codec = codec();
    let text = r#"{
        "$type": "tests.TestPayload",
        "testObject": { "$type": "tests.UnrelatedPayload", "name": "x" }
    }"#;
    let result = codec.deserialize(text);
    assert!(matches!(
        result,
        Err(SerializationError::Property { wire_name, .. }) if wire_name == "testObject"
    ));
}

#[test]
fn test_missing_wire_fields_keep_defaults() {
    let codec = codec();
    let text = r#"{ "$type": "tests.InnerPayload" }"#;
    let result = codec.deserialize(text).unwrap();
    let inner = result.downcast_ref::<InnerPayload>().unwrap();
    assert_eq!(inner.test_float, 6.0);
    assert_eq!(inner.vector, Vec3::ZERO);
}

#[test]
fn test_null_object_field_decodes_to_none() {
    let codec = codec();
    let text = r#"{ "$type": "tests.TestPayload", "testObject": null }"#;
    let result = codec.deserialize(text).unwrap();
    let payload = result.downcast_ref::<TestPayload>().unwrap();
    assert!(payload.test_object.is_none());
}

#[test]
fn test_non_registered_type_cannot_serialize() {
    struct NotRegistered {
        _test_int: i32,
    }
    let codec = codec();
    let result = codec.serialize(&NotRegistered { _test_int: 10 });
    assert!(matches!(
        result,
        Err(SerializationError::UnregisteredType { .. })
    ));
}

#[test]
fn test_root_array_round_trip() {
    let codec = codec();
    let items = vec![
        InnerPayload {
            test_float: 1.0,
            vector: Vec3::new(1.0, 0.0, 0.0),
        },
        InnerPayload {
            test_float: 2.0,
            vector: Vec3::new(0.0, 2.0, 0.0),
        },
        InnerPayload {
            test_float: 3.0,
            vector: Vec3::new(0.0, 0.0, 3.0),
        },
    ];

    let serialized = codec.serialize_list(&items).unwrap();
    let decoded = codec.deserialize_list::<InnerPayload>(&serialized).unwrap();
    assert_eq!(decoded.len(), 3);
    for (original, round_tripped) in items.iter().zip(&decoded) {
        assert_eq!(original.test_float, round_tripped.test_float);
        assert_eq!(original.vector, round_tripped.vector);
    }
}

#[test]
fn test_deserialize_as_rejects_a_different_tag() {
    let codec = codec();
    let serialized = codec
        .serialize(&ExtendedInnerPayload::default())
        .unwrap();
    // A by-value target cannot hold the extension type.
    assert!(matches!(
        codec.deserialize_as::<InnerPayload>(&serialized),
        Err(SerializationError::TypeMismatch { .. })
    ));
    assert!(codec
        .deserialize_as::<ExtendedInnerPayload>(&serialized)
        .is_ok());
}
