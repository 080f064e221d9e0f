//! Behavioural properties of the value serializer.

use boundlog::serialize::stringify::ENCODE_FAILURE_KEY;
use boundlog::serialize::{
    encode_pretty, safe_stringify, serialize, ArrayRef, ErrorValue, LogValue, MapRef, ObjectRef,
    SerializeOptions, SetRef, Value,
};
use proptest::prelude::*;
use serde_json::json;

mod common;

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        Just(Value::Undefined),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<f64>().prop_map(Value::from),
        any::<i128>().prop_map(Value::BigInt),
        ".{0,40}".prop_map(Value::from),
        proptest::option::of("[a-z]{0,8}").prop_map(Value::Function),
    ];
    leaf.prop_recursive(5, 96, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::from),
            prop::collection::vec(("[a-z]{1,6}", inner.clone()), 0..8).prop_map(|fields| {
                let object = ObjectRef::new();
                for (key, value) in fields {
                    object.insert(key, value);
                }
                Value::from(object)
            }),
            prop::collection::vec((inner.clone(), inner.clone()), 0..6).prop_map(|entries| {
                let map = MapRef::new();
                for (key, value) in entries {
                    map.insert(key, value);
                }
                Value::from(map)
            }),
            prop::collection::vec(inner, 0..6).prop_map(|members| {
                let set = SetRef::new();
                for member in members {
                    set.add(member);
                }
                Value::from(set)
            }),
        ]
    })
}

fn nesting(value: &LogValue) -> usize {
    match value {
        LogValue::Array(items) => 1 + items.iter().map(nesting).max().unwrap_or(0),
        LogValue::Object(fields) => 1 + fields.values().map(nesting).max().unwrap_or(0),
        _ => 0,
    }
}

fn widest(value: &LogValue) -> usize {
    match value {
        LogValue::Array(items) => items.iter().map(widest).fold(items.len(), usize::max),
        LogValue::Object(fields) => fields.values().map(widest).fold(fields.len(), usize::max),
        _ => 0,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn acyclic_input_stays_in_bounds(value in arb_value()) {
        let options = SerializeOptions::default()
            .with_depth(3)
            .with_max_keys(4)
            .with_max_array_length(4)
            .with_max_string_length(30);

        let out = serialize(&value, &options);

        // Maps add two array levels per composite, sets one.
        prop_assert!(nesting(&out) <= 3 * options.depth);
        // Width limit plus one overflow marker.
        prop_assert!(widest(&out) <= 5);

        let text = serde_json::to_string(&out).unwrap();
        prop_assert!(serde_json::from_str::<LogValue>(&text).is_ok());

        prop_assert_eq!(serialize(&value, &options), out);
    }
}

#[test]
fn self_reference_becomes_circular_marker() {
    let node = ObjectRef::new();
    node.insert("name", "root");
    node.insert("parent", node.clone());

    let out = serialize(&Value::from(node), &SerializeOptions::default());
    assert_eq!(out["parent"], "[Circular]");
    assert_eq!(out["name"], "root");
}

#[test]
fn long_string_is_truncated_with_marker() {
    let options = SerializeOptions::default().with_max_string_length(50);
    let input: String = ('a'..='z').cycle().take(100).collect();

    let out = serialize(&Value::from(input.clone()), &options);
    let expected = format!("{}…(truncated 74 chars)", &input[..26]);
    assert_eq!(out, json!(expected));
}

#[test]
fn long_array_gets_overflow_element() {
    let options = SerializeOptions::default().with_max_array_length(3);
    let input = Value::from(vec!["a", "b", "c", "d", "e"]);
    assert_eq!(serialize(&input, &options), json!(["a", "b", "c", "…(+2 items)"]));
}

#[test]
fn depth_budget_replaces_second_level() {
    let options = SerializeOptions::default().with_depth(1);
    let out = serialize(&common::nested_three(42), &options);
    assert_eq!(out, json!({ "level1": "[Object Object]" }));
}

#[test]
fn map_overflow_reports_more_entries() {
    let options = SerializeOptions::default().with_max_keys(2);
    let map = MapRef::new();
    for (i, key) in ["a", "b", "c", "d", "e"].into_iter().enumerate() {
        map.insert(key, i);
    }

    let out = serialize(&Value::from(map), &options);
    assert_eq!(out["type"], "Map");
    assert_eq!(out["entries"].as_array().map(Vec::len), Some(2));
    assert_eq!(out["more"], "…(+3 entries)");
}

#[test]
fn error_keeps_standard_and_custom_fields() {
    let err = ErrorValue::new("RangeError", "index out of range")
        .with_stack("RangeError: index out of range\n    at lookup")
        .with_field("index", 12);

    let out = serialize(&Value::from(err), &SerializeOptions::default());
    let fields = out.as_object().unwrap();
    for key in ["name", "message", "stack", "index"] {
        assert!(fields.contains_key(key), "missing {key}");
    }
    assert_eq!(out["index"], 12);
}

#[test]
fn rust_error_chain_serializes() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no access");
    let out = serialize(&Value::from_error(&io), &SerializeOptions::default());
    assert_eq!(out["name"], "Error");
    assert_eq!(out["message"], "no access");
}

#[test]
fn mutual_cycle_through_array_and_set() {
    let array = ArrayRef::default();
    let set = SetRef::new();
    set.add(array.clone());
    array.push(set.clone());

    let out = serialize(&Value::from(array), &SerializeOptions::default());
    assert_eq!(out, json!([{ "type": "Set", "values": ["[Circular]"] }]));
}

#[test]
fn host_object_is_rendered_as_text() {
    let counter = common::RenderCounter::new();
    let out = serialize(&counter.value(), &SerializeOptions::default());
    assert_eq!(out, json!("counter"));
    assert_eq!(counter.renders(), 1);
}

#[test]
fn safe_stringify_is_indented_json() {
    let object = ObjectRef::new();
    object.insert("list", vec![1]);
    let text = safe_stringify(&Value::from(object), &SerializeOptions::default());
    assert_eq!(text, "{\n  \"list\": [\n    1\n  ]\n}");
}

#[test]
fn encoder_failure_still_yields_json() {
    struct Hostile;

    impl serde::Serialize for Hostile {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("cannot encode hostile value"))
        }
    }

    let text = encode_pretty(&Hostile);
    let parsed: LogValue = serde_json::from_str(&text).expect("fallback must be valid JSON");
    assert!(parsed.get(ENCODE_FAILURE_KEY).is_some());
}

#[test]
fn concurrent_calls_do_not_interfere() {
    let shared = ObjectRef::new();
    shared.insert("self", shared.clone());
    shared.insert("id", 5);
    let value = Value::from(shared);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let value = value.clone();
            std::thread::spawn(move || serialize(&value, &SerializeOptions::default()))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), json!({ "self": "[Circular]", "id": 5 }));
    }
}
