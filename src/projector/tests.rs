use std::{cell::Cell, rc::Rc};

use crate::{
    directive::{BasePath, ChildPath},
    template::Selector,
};

use super::*;

fn doc(json: &str) -> Value {
    Value::from_json_str(json).unwrap()
}

fn run(document: &Value, template: &Template) -> Result<Map, FilterError> {
    project(document.as_hash().unwrap(), template, document)
}

fn template(json: &str) -> Template {
    Template::from_value(&doc(json)).unwrap()
}

fn ints(values: &[i64]) -> Value {
    Value::from(values.iter().map(|value| Value::from(*value)).collect::<Vec<_>>())
}

#[test]
fn pass_through_copies_value() {
    let document = doc(r#"{"a": {"deep": [1, 2]}, "b": 2}"#);
    let output = run(&document, &template(r#"{"a": null}"#)).unwrap();

    assert_eq!(output.len(), 1);
    assert_eq!(output["a"], document.as_hash().unwrap()["a"]);
}

#[test]
fn output_shares_input_nodes() {
    let document = doc(r#"{"a": [1, 2, 3]}"#);
    let output = run(&document, &template(r#"{"a": []}"#)).unwrap();

    let (Value::Array(input), Value::Array(projected)) = (&document.as_hash().unwrap()["a"], &output["a"]) else {
        panic!("expected lists");
    };
    assert!(Rc::ptr_eq(input, projected));
}

#[test]
fn whole_copies_require_matching_shape() {
    let document = doc(r#"{"list": [1], "map": {"x": 1}, "scalar": 4}"#);
    let output = run(&document, &template(r#"{"list": [], "map": {}, "scalar": []}"#)).unwrap();

    assert_eq!(output["list"], ints(&[1]));
    assert_eq!(output["map"], doc(r#"{"x": 1}"#));
    assert!(!output.contains_key("scalar"));
}

#[test]
fn index_selection_keeps_order_and_duplicates() {
    let document = doc(r#"{"c": [3, 4, 5]}"#);
    let output = run(&document, &template(r#"{"c": [2, 0, 0, -1, -3]}"#)).unwrap();
    assert_eq!(output["c"], ints(&[5, 3, 3, 5, 3]));
}

#[test]
fn index_out_of_range_is_error() {
    let document = doc(r#"{"c": [3, 4, 5]}"#);

    let err = run(&document, &template(r#"{"c": [0, 3]}"#)).unwrap_err();
    assert!(matches!(err, FilterError::Index { index: 3, len: 3, .. }));
    assert_eq!(err.to_string(), "index 3 out of range for key 'c' (length 3)");

    let err = run(&document, &template(r#"{"c": [-4]}"#)).unwrap_err();
    assert!(matches!(err, FilterError::Index { index: -4, .. }));
}

#[test]
fn bad_index_list_fails_only_on_list_data() {
    let bad = template(r#"{"c": [0, "x"]}"#);

    let err = run(&doc(r#"{"c": [3, 4, 5]}"#), &bad).unwrap_err();
    assert!(matches!(err, FilterError::Structure { ref key, kind: "list" } if key == "c"));
    assert_eq!(
        err.to_string(),
        "bad template value for key 'c': list must contain integer index values only"
    );

    assert!(run(&doc(r#"{"a": 1}"#), &bad).unwrap().is_empty());
    assert!(run(&doc(r#"{"c": {"x": 1}}"#), &bad).unwrap().is_empty());
    assert!(run(&doc(r#"{"c": "text"}"#), &bad).unwrap().is_empty());
}

#[test]
fn bad_index_tuple_fails_only_on_tuple_data() {
    let bad = Template::new().with("t", Selector::InvalidIndexTuple);

    let mut map = Map::new();
    map.insert("t".to_string(), Value::tuple(vec![Value::from(1)]));
    let document = Value::from(map);
    let err = run(&document, &bad).unwrap_err();
    assert_eq!(
        err.to_string(),
        "bad template value for key 't': tuple must contain integer index values only"
    );

    assert!(run(&doc(r#"{"t": [1]}"#), &bad).unwrap().is_empty());
    assert!(run(&doc(r#"{}"#), &bad).unwrap().is_empty());
}

#[test]
fn huge_index_is_out_of_range() {
    let document = doc(r#"{"c": [3, 4, 5]}"#);
    let err = run(&document, &template(r#"{"c": [18446744073709551615]}"#)).unwrap_err();
    assert!(matches!(err, FilterError::Index { len: 3, .. }));
}

#[test]
fn tuple_selection_builds_tuple() {
    let mut map = Map::new();
    map.insert("b".to_string(), Value::tuple(vec![Value::from(2), Value::from(4), Value::from(8), Value::from(16)]));
    let document = Value::from(map);

    let template = Template::new().with("b", Selector::IndexTuple(vec![-1, 1, 1]));
    let output = run(&document, &template).unwrap();
    assert_eq!(output["b"], Value::tuple(vec![Value::from(16), Value::from(4), Value::from(4)]));

    let template = Template::new().with("b", Selector::WholeTuple);
    let output = run(&document, &template).unwrap();
    assert_eq!(output["b"], document.as_hash().unwrap()["b"]);

    let template = Template::new().with("b", Selector::IndexTuple(vec![4]));
    assert!(matches!(run(&document, &template), Err(FilterError::Index { .. })));
}

#[test]
fn list_and_tuple_templates_do_not_cross() {
    let mut map = Map::new();
    map.insert("t".to_string(), Value::tuple(vec![Value::from(1)]));
    map.insert("l".to_string(), ints(&[1]));
    let document = Value::from(map);

    let template = Template::new()
        .with("t", Selector::IndexArray(vec![0]))
        .with("l", Selector::WholeTuple);
    let output = run(&document, &template).unwrap();
    assert!(output.is_empty());
}

#[test]
fn nested_template_recurses() {
    let document = doc(r#"{"k": {"subk": 1, "other": 2}, "z": 0}"#);
    let output = run(&document, &template(r#"{"k": {"subk": null}}"#)).unwrap();

    assert_eq!(Value::from(output), doc(r#"{"k": {"subk": 1}}"#));
}

#[test]
fn empty_nested_template_copies_mapping() {
    let document = doc(r#"{"k": {"subk": 1}}"#);
    let template = Template::new().with("k", Template::new());
    let output = run(&document, &template).unwrap();

    assert_eq!(Value::from(output), document);
}

#[test]
fn shape_mismatch_skips_key() {
    let document = doc(r#"{"a": 1, "b": [1], "c": {"x": 1}, "d": "text"}"#);
    let output = run(
        &document,
        &template(r#"{"a": [0], "b": {"x": null}, "c": [0], "d": {}}"#),
    )
    .unwrap();
    assert!(output.is_empty());
}

#[test]
fn scalar_template_values_select_nothing() {
    let document = doc(r#"{"a": 1, "b": "x"}"#);
    let output = run(&document, &template(r#"{"a": 1, "b": "x"}"#)).unwrap();
    assert!(output.is_empty());
}

#[test]
fn missing_key_skips_plain_selectors() {
    let document = doc(r#"{"a": 1}"#);
    let output = run(&document, &template(r#"{"x": null, "y": [], "z": {"w": null}, "v": [0]}"#)).unwrap();
    assert!(output.is_empty());
}

#[test]
fn missing_key_still_runs_transform() {
    let document = doc(r#"{"a": 1}"#);
    let template = Template::new().with(
        "missing",
        Selector::transform(|value| Ok(Value::from(value.is_null()))),
    );

    let output = run(&document, &template).unwrap();
    assert_eq!(output["missing"], Value::from(true));
}

#[test]
fn one_arg_transform_gets_value() {
    let document = doc(r#"{"name": "acme", "tags": [1, 2, 3]}"#);
    let template = Template::new()
        .with(
            "name",
            Selector::transform(|value| match value {
                Value::String(name) => Ok(Value::from(name.to_uppercase())),
                other => Err(FilterError::transform(format!("expected string, found {}", other.kind_name()))),
            }),
        )
        .with(
            "tags",
            Selector::transform(|value| match value {
                Value::Array(items) => Ok(Value::from(items.len() as i64)),
                _ => Ok(Value::Null),
            }),
        );

    let output = run(&document, &template).unwrap();
    assert_eq!(Value::from(output), doc(r#"{"name": "ACME", "tags": 3}"#));
}

#[test]
fn two_arg_transform_gets_base() {
    let document = doc(r#"{"price": 10, "rate": 3}"#);
    let template = Template::new().with(
        "price",
        Selector::transform_with_base(|value, base| {
            let (Value::Integer(price), Some(Value::Integer(rate))) = (value, base.as_hash().and_then(|map| map.get("rate")))
            else {
                return Err(FilterError::transform("price and rate must be integers"));
            };
            Ok(Value::from(price * rate))
        }),
    );

    let output = run(&document, &template).unwrap();
    assert_eq!(output["price"], Value::from(30));
}

#[test]
fn transform_error_aborts_projection() {
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();

    let document = doc(r#"{"a": 1, "b": 2}"#);
    let template = Template::new()
        .with("a", Selector::transform(|_| Err(FilterError::transform("boom"))))
        .with(
            "b",
            Selector::transform(move |value| {
                counter.set(counter.get() + 1);
                Ok(value.clone())
            }),
        );

    let err = run(&document, &template).unwrap_err();
    assert_eq!(err.to_string(), "transform failed: boom");
    assert_eq!(calls.get(), 0);
}

#[test]
fn child_path_directive() {
    let document = doc(r#"{"alpha": {"bravo": {"charlie": {"delta": {"zulu": [1, 2, 3]}}}}}"#);
    let template = Template::new().with("alpha", ChildPath::new(["bravo", "charlie", "delta", "zulu"]));

    let output = run(&document, &template).unwrap();
    assert_eq!(Value::from(output), doc(r#"{"alpha": [1, 2, 3]}"#));
}

#[test]
fn base_path_directive_reads_other_subtree() {
    let document = doc(r#"{"k1": {"unrelated": true}, "k2": {"target": "found"}}"#);
    let template = Template::new()
        .with("k1", BasePath::new(["k2", "target"]))
        .with("absent", BasePath::new(["k2", "target"]));

    let output = run(&document, &template).unwrap();
    assert_eq!(output["k1"], Value::from("found"));
    assert_eq!(output["absent"], Value::from("found"));
}

#[test]
fn base_path_inside_nested_template_sees_root() {
    let document = doc(r#"{"order": {"id": 7}, "customer": {"name": "acme"}}"#);
    let template = Template::new().with(
        "order",
        Template::new()
            .with("id", Selector::PassThrough)
            .with("customer", BasePath::new(["customer", "name"])),
    );

    let output = run(&document, &template).unwrap();
    assert_eq!(Value::from(output), doc(r#"{"order": {"id": 7, "customer": "acme"}}"#));
}

#[test]
fn child_path_on_missing_key_is_path_error() {
    let document = doc(r#"{"a": 1}"#);
    let template = Template::new().with("missing", ChildPath::new(["x"]));

    let err = run(&document, &template).unwrap_err();
    assert!(matches!(err, FilterError::Path { .. }));
}

#[test]
fn output_follows_template_order() {
    let document = doc(r#"{"a": 1, "b": 2, "c": 3}"#);
    let output = run(&document, &template(r#"{"c": null, "a": null}"#)).unwrap();

    let keys: Vec<&str> = output.keys().map(|key| key.as_str()).collect();
    assert_eq!(keys, vec!["c", "a"]);
}

#[test]
fn depth_limit() {
    let document = doc(r#"{"a": {"b": {"c": 1}}}"#);
    let template = template(r#"{"a": {"b": {"c": null}}}"#);

    let options = ProjectorOptions { max_depth: 2 };
    let err = project_with_options(document.as_hash().unwrap(), &template, &document, &options).unwrap_err();
    assert_eq!(err.to_string(), "template nesting exceeds the maximum depth of 2");

    let options = ProjectorOptions { max_depth: 3 };
    let output = project_with_options(document.as_hash().unwrap(), &template, &document, &options).unwrap();
    assert_eq!(Value::from(output), document);
}

#[test]
fn end_to_end_index_example() {
    let mut map = Map::new();
    map.insert("a".to_string(), Value::from(1));
    map.insert("b".to_string(), Value::tuple(vec![Value::from(2), Value::from(4), Value::from(8), Value::from(16)]));
    map.insert("c".to_string(), ints(&[3, 4, 5]));
    let document = Value::from(map);

    let output = run(&document, &template(r#"{"a": null, "c": [1, 0, -1]}"#)).unwrap();
    assert_eq!(Value::from(output), doc(r#"{"a": 1, "c": [4, 3, 5]}"#));
}
