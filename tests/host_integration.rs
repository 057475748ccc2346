//! Reading component props/state through a host

use propr::{
    json_unmarshal, to_json, unmarshal_props, unmarshal_state, ClassSet, Component, Error,
    HostError, JsonHost, Map, Record, Snapshot, Value,
};
use serde_json::json;

#[derive(Debug, Default, PartialEq, Record)]
struct ButtonProps {
    #[react("label")]
    label: String,
    #[react("disabled,omitempty")]
    disabled: bool,
    #[react("className")]
    class: ClassSet,
}

#[derive(Debug, Default, PartialEq, Record)]
struct CounterState {
    #[react("count")]
    count: i64,
    #[react("history,omitempty")]
    history: Vec<i64>,
}

fn snapshot(json: &str) -> Snapshot {
    let value = json_unmarshal(&JsonHost, json).expect("valid snapshot");
    Snapshot::from_value(value).expect("snapshot shape")
}

#[test]
fn unmarshal_props_and_state() {
    let this = snapshot(
        r#"{
            "props": {"label": "Go", "className": "btn primary", "onClick": null},
            "state": {"count": 3, "history": [1, 2]}
        }"#,
    );

    let mut props = ButtonProps::default();
    unmarshal_props(&this, &mut props).unwrap();
    assert_eq!(
        props,
        ButtonProps {
            label: "Go".into(),
            disabled: false,
            class: ClassSet::new().with("btn").with("primary"),
        }
    );

    let mut state = CounterState { count: 99, history: vec![9] };
    unmarshal_state(&this, &mut state).unwrap();
    assert_eq!(state, CounterState { count: 3, history: vec![1, 2] });
}

#[test]
#[allow(deprecated)]
fn hydrate_aliases_decode_the_same_sections() {
    let this = snapshot(r#"{"props": {"label": "x"}, "state": {"count": 1}}"#);

    let mut props = ButtonProps::default();
    propr::hydrate_props(&this, &mut props).unwrap();
    assert_eq!(props.label, "x");

    let mut state = CounterState::default();
    propr::hydrate_state(&this, &mut state).unwrap();
    assert_eq!(state.count, 1);
}

#[test]
fn missing_state_decodes_to_defaults() {
    let this = snapshot(r#"{"props": {"label": "only props"}}"#);
    let mut state = CounterState { count: 5, history: vec![] };
    unmarshal_state(&this, &mut state).unwrap();
    assert_eq!(state, CounterState::default());
}

#[test]
fn type_mismatch_is_reported() {
    let this = snapshot(r#"{"state": {"count": "three"}}"#);
    let mut state = CounterState::default();
    let err = unmarshal_state(&this, &mut state).unwrap_err();

    assert!(matches!(err, Error::Decode(_)));
    assert_eq!(
        err.to_string(),
        "Decode failed: field 'count': type mismatch: expected i64, got string"
    );
}

#[test]
fn json_unmarshal_rejects_null_and_garbage() {
    assert!(matches!(
        json_unmarshal(&JsonHost, "null"),
        Err(Error::Host(HostError::NullResult))
    ));
    assert!(matches!(
        json_unmarshal(&JsonHost, "{not json"),
        Err(Error::Host(HostError::Parse(_)))
    ));
}

#[test]
fn converted_state_serializes_for_the_host() {
    let state = CounterState { count: 2, history: vec![] };
    let out = to_json(&Value::Map(state.to_map())).unwrap();
    assert_eq!(out, json!({"count": 2}));

    let props = ButtonProps {
        label: "Save".into(),
        disabled: true,
        class: ClassSet::new().with("wide"),
    };
    let out = to_json(&Value::Map(props.to_map())).unwrap();
    assert_eq!(out, json!({"label": "Save", "disabled": true, "className": "wide"}));
}

#[test]
fn state_round_trips_through_json() {
    let state = CounterState { count: -4, history: vec![7, 8] };
    let text = to_json(&Value::Map(state.to_map())).unwrap().to_string();

    let this = Snapshot::new(Map::new(), json_unmarshal(&JsonHost, &text).unwrap().as_map().cloned().unwrap());
    let mut back = CounterState::default();
    unmarshal_state(&this, &mut back).unwrap();
    assert_eq!(back, state);
}

#[test]
fn components_expose_their_sections() {
    let this = snapshot(r#"{"props": {"a": 1}}"#);
    assert_eq!(this.props().unwrap().get("a"), Some(&Value::S64(1)));
    assert!(this.get("context").is_none());
}
