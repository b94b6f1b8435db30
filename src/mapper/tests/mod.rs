//! Unit tests for the structural mapper
//!
//! Covers mapping from parsed documents and attribute-bearing objects,
//! missing fields, sequences and the depth ceiling. All in-memory.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, LazyLock, Weak};

use serde_json::json;

use crate::mapper::{
    Attributes, FieldType, MapError, Mapper, Schema, Source, Value, map, map_with_depth,
};

static ADDRESS: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::named("Address")
        .field("street", FieldType::String)
        .field("city", FieldType::String)
        .build()
});

fn person_schema() -> Arc<Schema> {
    Schema::named("Person")
        .field("name", FieldType::String)
        .field("age", FieldType::Integer)
        .build()
}

#[derive(Debug)]
struct Person {
    name: String,
    age: i64,
}

impl Attributes for Person {
    fn attribute(&self, name: &str) -> Option<Source> {
        match name {
            "name" => Some(Source::from(self.name.as_str())),
            "age" => Some(Source::Int(self.age)),
            _ => None,
        }
    }
}

/// Object graph node whose `parent` attribute points back at itself.
#[derive(Debug)]
struct Node {
    name: String,
    me: Weak<Node>,
}

impl Attributes for Node {
    fn attribute(&self, name: &str) -> Option<Source> {
        match name {
            "name" => Some(Source::from(self.name.as_str())),
            "parent" => self.me.upgrade().map(|node| Source::Object(node)),
            _ => None,
        }
    }
}

#[test]
fn maps_flat_document() {
    let source = Source::from(json!({"name": "Alice", "age": 25}));

    let person = map(&source, &person_schema()).unwrap();

    assert_eq!(person.get("name"), Some(&Value::from("Alice")));
    assert_eq!(person.get("age"), Some(&Value::Integer(25)));
}

#[test]
fn maps_attribute_object() {
    let source = Source::object(Person {
        name: "Alice".to_string(),
        age: 25,
    });

    let person = map(&source, &person_schema()).unwrap();

    assert_eq!(person.get("name").and_then(Value::as_str), Some("Alice"));
    assert_eq!(person.get("age").and_then(Value::as_i64), Some(25));
}

#[test]
fn maps_nested_record_from_object_and_mapping_mix() {
    #[derive(Debug)]
    struct Holder;

    impl Attributes for Holder {
        fn attribute(&self, name: &str) -> Option<Source> {
            match name {
                "name" => Some(Source::from("Bob")),
                "address" => Some(Source::from(json!({
                    "street": "456 Oak St",
                    "city": "Springfield"
                }))),
                _ => None,
            }
        }
    }

    let schema = Schema::named("Person")
        .field("name", FieldType::String)
        .field("address", FieldType::record(&ADDRESS))
        .build();

    let person = map(&Source::object(Holder), &schema).unwrap();
    let address = person.get("address").and_then(Value::as_record).unwrap();

    assert_eq!(address.schema_name(), "Address");
    assert_eq!(address.get("street").and_then(Value::as_str), Some("456 Oak St"));
    assert_eq!(address.get("city").and_then(Value::as_str), Some("Springfield"));
}

#[test]
fn maps_sequence_of_primitives() {
    let schema = Schema::named("Person")
        .field("name", FieldType::String)
        .field("hobbies", FieldType::sequence_of(FieldType::String))
        .build();
    let source = Source::from(json!({
        "name": "Charlie",
        "hobbies": ["reading", "cycling", "swimming"]
    }));

    let person = map(&source, &schema).unwrap();

    assert_eq!(
        person.get("hobbies"),
        Some(&Value::Sequence(vec![
            Value::from("reading"),
            Value::from("cycling"),
            Value::from("swimming"),
        ]))
    );
}

#[test]
fn maps_sequence_of_records() {
    let schema = Schema::named("Person")
        .field("name", FieldType::String)
        .field("addresses", FieldType::sequence_of(FieldType::record(&ADDRESS)))
        .build();
    let source = Source::from(json!({
        "name": "Diana",
        "addresses": [
            {"street": "789 Pine St", "city": "Oakville"},
            {"street": "101 Maple Ave", "city": "Mapleton"}
        ]
    }));

    let person = map(&source, &schema).unwrap();
    let addresses = person.get("addresses").and_then(Value::as_sequence).unwrap();

    assert_eq!(addresses.len(), 2);
    let street = |index: usize| {
        addresses[index]
            .as_record()
            .and_then(|address| address.get("street"))
            .and_then(Value::as_str)
    };
    assert_eq!(street(0), Some("789 Pine St"));
    assert_eq!(street(1), Some("101 Maple Ave"));
}

#[test]
fn missing_fields_resolve_to_null() {
    let schema = Schema::named("Person")
        .field("name", FieldType::String)
        .field("age", FieldType::Integer)
        .field("address", FieldType::String)
        .build();
    let source = Source::from(json!({"name": "Eva", "age": 40}));

    let person = map(&source, &schema).unwrap();

    assert_eq!(person.len(), 3);
    assert_eq!(person.get("address"), Some(&Value::Null));
}

#[test]
fn null_entries_count_as_missing() {
    let source = Source::from(json!({"name": null, "age": 3}));

    let person = map(&source, &person_schema()).unwrap();

    assert!(person.get("name").unwrap().is_null());
}

#[test]
fn empty_document_yields_all_null_record() {
    let person = map(&Source::from(json!({})), &person_schema()).unwrap();

    assert!(person.fields().all(|(_, value)| value.is_null()));
}

#[test]
fn empty_sequence_and_mapping_kept() {
    let schema = Schema::named("Person")
        .field("name", FieldType::String)
        .field("hobbies", FieldType::sequence_of(FieldType::String))
        .field("address", FieldType::Mapping)
        .build();
    let source = Source::from(json!({"name": "George", "hobbies": [], "address": {}}));

    let person = map(&source, &schema).unwrap();

    assert_eq!(person.get("hobbies"), Some(&Value::Sequence(Vec::new())));
    assert_eq!(person.get("address"), Some(&Value::mapping::<String, _>([])));
}

#[test]
fn empty_sequence_needs_no_room_for_elements() {
    let schema = Schema::named("Person")
        .field("addresses", FieldType::sequence_of(FieldType::record(&ADDRESS)))
        .build();
    let source = Source::from(json!({"addresses": []}));

    let person = map_with_depth(&source, &schema, 1).unwrap();

    assert_eq!(person.get("addresses"), Some(&Value::Sequence(Vec::new())));
}

fn three_level_schema() -> Arc<Schema> {
    let bla = Schema::named("Bla").field("a", FieldType::String).build();
    let address = Schema::named("Address")
        .field("street", FieldType::String)
        .field("city", FieldType::String)
        .field("bla", FieldType::record(&bla))
        .build();
    Schema::named("Person")
        .field("name", FieldType::String)
        .field("address", FieldType::record(&address))
        .build()
}

fn three_level_source() -> Source {
    Source::from(json!({
        "name": "Frank",
        "address": {
            "street": "123 Elm St",
            "city": "Somewhere",
            "bla": {"a": "blabla"}
        }
    }))
}

#[test]
fn depth_ceiling_exceeded() {
    let err = map_with_depth(&three_level_source(), &three_level_schema(), 2).unwrap_err();

    assert_eq!(
        err,
        MapError::DepthExceeded {
            depth: 3,
            max_depth: 2,
            path: "address.bla.a".to_string(),
        }
    );
}

#[test]
fn depth_within_ceiling() {
    let person = map_with_depth(&three_level_source(), &three_level_schema(), 3).unwrap();

    let bla = person
        .get("address")
        .and_then(Value::as_record)
        .and_then(|address| address.get("bla"))
        .and_then(Value::as_record)
        .unwrap();
    assert_eq!(bla.get("a").and_then(Value::as_str), Some("blabla"));
}

#[test]
fn cyclic_object_graph_terminates() {
    let node = Arc::new_cyclic(|me| Node {
        name: "gw-1".to_string(),
        me: me.clone(),
    });
    let schema = {
        // Self-referential schemas cannot be declared directly; unroll enough
        // levels to run past the ceiling.
        let mut schema = Schema::named("Node").field("name", FieldType::String).build();
        for _ in 0..8 {
            schema = Schema::named("Node")
                .field("name", FieldType::String)
                .field("parent", FieldType::record(&schema))
                .build();
        }
        schema
    };

    let err = Mapper::default()
        .map(&Source::Object(node), &schema)
        .unwrap_err();

    assert!(matches!(err, MapError::DepthExceeded { depth: 5, max_depth: 4, .. }));
}

#[test]
fn mapping_is_repeatable() {
    let source = three_level_source();
    let schema = three_level_schema();

    let first = map(&source, &schema).unwrap();
    let second = map(&source, &schema).unwrap();

    assert_eq!(first, second);
}

#[test]
fn heterogeneous_sequence_rejected() {
    let schema = Schema::named("Person")
        .field("addresses", FieldType::sequence_of(FieldType::record(&ADDRESS)))
        .build();
    let source = Source::from(json!({"addresses": [{"street": "a"}, "b"]}));

    let err = map(&source, &schema).unwrap_err();

    assert_eq!(
        err,
        MapError::HeterogeneousSequence {
            path: "addresses".to_string()
        }
    );
}

#[test]
fn numbers_and_nulls_do_not_break_homogeneity() {
    let schema = Schema::named("Stats")
        .field("samples", FieldType::sequence_of(FieldType::Float))
        .build();
    let source = Source::from(json!({"samples": [1, 2.5, null]}));

    let stats = map(&source, &schema).unwrap();

    assert_eq!(
        stats.get("samples"),
        Some(&Value::Sequence(vec![
            Value::Integer(1),
            Value::Float(2.5),
            Value::Null
        ]))
    );
}

#[test]
fn record_serializes_in_schema_order() {
    let schema = Schema::named("Person")
        .field("name", FieldType::String)
        .field("age", FieldType::Integer)
        .build();
    let source = Source::from(json!({"age": 25, "name": "Alice"}));

    let person = map(&source, &schema).unwrap();

    assert_eq!(
        serde_json::to_string(&person).unwrap(),
        r#"{"name":"Alice","age":25}"#
    );
}
