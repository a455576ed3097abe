use json_config::{CastOptions, Caster, ConfigError, Kind, cast, cast_with_errors};
use serde_json::{Value, json};
use std::collections::{BTreeMap, HashMap, VecDeque};

#[test]
fn test_cast_integer() {
    assert_eq!(cast::<i32>(&json!(1)).unwrap(), 1);
    assert_eq!(cast::<i64>(&json!(-42)).unwrap(), -42);
    assert_eq!(cast::<u64>(&json!(u64::MAX)).unwrap(), u64::MAX);
}

#[test]
fn test_cast_string() {
    assert_eq!(cast::<String>(&json!("test")).unwrap(), "test");
}

#[test]
fn test_cast_bool_and_float() {
    assert!(cast::<bool>(&json!(true)).unwrap());
    assert_eq!(cast::<f64>(&json!(160.5)).unwrap(), 160.5);
    assert_eq!(cast::<f32>(&json!(0.25)).unwrap(), 0.25);
}

#[test]
fn test_matching_scalar_has_no_errors() {
    let (value, errors) = cast_with_errors::<String>(&json!("abc"));
    assert_eq!(value, "abc");
    assert!(errors.is_empty());

    let (value, errors) = cast_with_errors::<i64>(&json!(7));
    assert_eq!(value, 7);
    assert!(errors.is_empty());
}

#[test]
fn test_scalar_mismatch_reports_kinds() {
    let err = cast::<i32>(&json!("1")).unwrap_err();
    assert_eq!(err, ConfigError::type_error("", Kind::Integer, Kind::String));
    assert_eq!(err.to_string(), "Integer is expected, but String is given. ()");
}

#[test]
fn test_scalar_mismatch_collects_default() {
    let (value, errors) = cast_with_errors::<String>(&json!(123));
    assert_eq!(value, "");
    assert_eq!(
        errors,
        vec![ConfigError::type_error("", Kind::String, Kind::Integer)]
    );
}

#[test]
fn test_float_is_not_an_integer() {
    let err = cast::<i64>(&json!(1.5)).unwrap_err();
    assert_eq!(err.expected(), Some(Kind::Integer));
    assert_eq!(err.actual(), Some(Kind::Float));
}

#[test]
fn test_integer_is_not_a_float_by_default() {
    let err = cast::<f64>(&json!(160)).unwrap_err();
    assert_eq!(err, ConfigError::type_error("", Kind::Float, Kind::Integer));
}

#[test]
fn test_integer_as_float_option() {
    let options = CastOptions::builder()
        .integer_as_float(true)
        .build()
        .unwrap();
    let caster = Caster::new(options);
    assert_eq!(caster.cast::<f64>(&json!(160)).unwrap(), 160.0);
    // Strings are still rejected.
    assert!(caster.cast::<f64>(&json!("160")).is_err());
}

#[test]
fn test_integer_overflow() {
    let doc = json!({"port": 70000});
    let err = cast::<HashMap<String, u16>>(&doc).unwrap_err();
    assert_eq!(
        err,
        ConfigError::Overflow {
            path: ".port".into(),
            value: "70000".into(),
            target: "u16",
        }
    );

    let err = cast::<u8>(&json!(-1)).unwrap_err();
    assert_eq!(err.to_string(), "-1 does not fit in u8 ()");
}

#[test]
fn test_float_overflow() {
    let err = cast::<f32>(&json!(1e300)).unwrap_err();
    assert_eq!(
        err,
        ConfigError::Overflow {
            path: String::new(),
            value: "1e300".into(),
            target: "f32",
        }
    );

    let (value, errors) = cast_with_errors::<Vec<f32>>(&json!([1.5, -1e300]));
    assert_eq!(value, vec![1.5, 0.0]);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path(), "[1]");

    // Still representable, just imprecise.
    assert_eq!(cast::<f32>(&json!(3.0e38)).unwrap(), 3.0e38_f64 as f32);
}

#[test]
fn test_cast_vector() {
    let doc = json!([1, 2, 3]);
    assert_eq!(cast::<Vec<i32>>(&doc).unwrap(), vec![1, 2, 3]);
    assert_eq!(
        cast::<VecDeque<i32>>(&doc).unwrap(),
        VecDeque::from(vec![1, 2, 3])
    );
    assert!(cast::<Vec<i32>>(&json!([])).unwrap().is_empty());
}

#[test]
fn test_vector_of_non_array() {
    let err = cast::<Vec<i32>>(&json!({"a": 1})).unwrap_err();
    assert_eq!(err, ConfigError::type_error("", Kind::Array, Kind::Object));

    let (value, errors) = cast_with_errors::<Vec<i32>>(&json!("nope"));
    assert!(value.is_empty());
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_vector_elements_fail_independently() {
    let (value, errors) = cast_with_errors::<Vec<i32>>(&json!([1, "x", 3, null]));
    assert_eq!(value, vec![1, 0, 3, 0]);
    assert_eq!(
        errors,
        vec![
            ConfigError::type_error("[1]", Kind::Integer, Kind::String),
            ConfigError::type_error("[3]", Kind::Integer, Kind::Null),
        ]
    );
}

#[test]
fn test_cast_map() {
    let doc = json!({"height": 160, "weight": 60});
    let expected = BTreeMap::from([("height".to_string(), 160), ("weight".to_string(), 60)]);
    assert_eq!(cast::<BTreeMap<String, i32>>(&doc).unwrap(), expected);
}

#[test]
fn test_cast_unordered_map() {
    let doc = json!({"height": 160, "weight": 60});
    let m = cast::<HashMap<String, i32>>(&doc).unwrap();
    assert_eq!(m.len(), 2);
    assert_eq!(m["height"], 160);
    assert_eq!(m["weight"], 60);
}

#[test]
fn test_map_of_non_object() {
    let err = cast::<HashMap<String, i32>>(&json!([1])).unwrap_err();
    assert_eq!(err, ConfigError::type_error("", Kind::Object, Kind::Array));
}

#[test]
fn test_error_path() {
    let doc = json!({"value": [1, 2, "test"]});
    let err = cast::<BTreeMap<String, Vec<i32>>>(&doc).unwrap_err();
    assert_eq!(err.path(), ".value[2]");
    assert_eq!(err.actual(), Some(Kind::String));
    assert_eq!(err.expected(), Some(Kind::Integer));
}

#[test]
fn test_nested_element_paths() {
    let doc = json!({"groups": [[1], [2, true]]});
    let (value, errors) = cast_with_errors::<HashMap<String, Vec<Vec<u8>>>>(&doc);
    assert_eq!(value["groups"], vec![vec![1], vec![2, 0]]);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path(), ".groups[1][1]");
    assert_eq!(errors[0].actual(), Some(Kind::Bool));
}

#[test]
fn test_cast_optional() {
    assert_eq!(cast::<Option<i32>>(&json!(null)).unwrap(), None);
    assert_eq!(cast::<Option<i32>>(&json!(5)).unwrap(), Some(5));

    let err = cast::<Option<i32>>(&json!("5")).unwrap_err();
    assert_eq!(err.expected(), Some(Kind::Integer));

    // Present but invalid stays present.
    let (value, errors) = cast_with_errors::<Option<i32>>(&json!("5"));
    assert_eq!(value, Some(0));
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_optional_elements() {
    let doc = json!([1, null, 3]);
    assert_eq!(
        cast::<Vec<Option<i32>>>(&doc).unwrap(),
        vec![Some(1), None, Some(3)]
    );
}

#[test]
fn test_value_passthrough() {
    let doc = json!({"raw": {"anything": [1, "two", null]}});
    let m = cast::<HashMap<String, Value>>(&doc).unwrap();
    assert_eq!(m["raw"], json!({"anything": [1, "two", null]}));
}

#[test]
fn test_round_trip() {
    let original: BTreeMap<String, Vec<Option<i64>>> = BTreeMap::from([
        ("a".to_string(), vec![Some(1), None]),
        ("b".to_string(), vec![]),
    ]);
    let doc = serde_json::to_value(&original).unwrap();
    assert_eq!(
        cast::<BTreeMap<String, Vec<Option<i64>>>>(&doc).unwrap(),
        original
    );

    let strings = vec!["x".to_string(), "y".to_string()];
    let doc = serde_json::to_value(&strings).unwrap();
    assert_eq!(cast::<Vec<String>>(&doc).unwrap(), strings);
}

#[test]
fn test_collecting_agrees_with_fail_fast() {
    let docs = [
        json!([1, 2]),
        json!([1, "2"]),
        json!({"a": [1]}),
        json!(null),
        json!("s"),
    ];
    for doc in &docs {
        let fail_fast = cast::<Vec<i64>>(doc);
        let (_, errors) = cast_with_errors::<Vec<i64>>(doc);
        assert_eq!(fail_fast.is_ok(), errors.is_empty(), "document {doc}");
        if let Err(first) = fail_fast {
            assert_eq!(errors[0], first);
        }
    }
}

#[test]
fn test_manual_navigation() {
    let doc = json!({"users": ["abc", "def"]});
    let caster = Caster::default();
    let root = caster.root(&doc);
    let users = root.get("users").unwrap();
    assert_eq!(users.len().unwrap(), 2);
    assert_eq!(users.at(1).unwrap().cast::<String>().unwrap(), "def");

    let err = users.at(5).unwrap_err();
    assert_eq!(err, ConfigError::out_of_range(".users", 2, 5));
    assert_eq!(err.to_string(), "Out of range 0..2: 5 (.users)");

    let err = root.get("groups").unwrap_err();
    assert_eq!(err.to_string(), "\"groups\" is not found ()");
}
