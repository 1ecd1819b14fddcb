use std::sync::Arc;

use attrkit::test_utils::RecordingGateway;
use attrkit::{opts, AttrType, ClassDef, ClassRef, CoercionError, Instance, Value};

fn base() -> ClassRef {
    ClassDef::builder("Base")
        .attribute("name", AttrType::STRING, opts().default("x").present())
        .build()
}

fn child(base: &ClassRef) -> ClassRef {
    ClassDef::builder("Child")
        .extends(base)
        .attribute("age", AttrType::INT, opts().default(0))
        .build()
}

#[test]
fn test_child_attributes_are_parent_first() {
    let base = base();
    let child = child(&base);

    assert_eq!(child.attributes(), vec!["name", "age"]);
}

#[test]
fn test_child_default_values_merge() {
    let base = base();
    let child = child(&base);

    let defaults = child.default_values();
    assert_eq!(defaults.len(), 2);
    assert_eq!(defaults["name"], Value::from("x"));
    assert_eq!(defaults["age"], Value::Int(0));
}

#[test]
fn test_child_presence_is_local() {
    let base = base();
    let child = child(&base);

    assert_eq!(base.present_attributes(), vec!["name"]);
    assert!(child.present_attributes().is_empty());
}

#[test]
fn test_override_precedence() {
    let base = ClassDef::builder("Base")
        .attribute("x", AttrType::INT, opts().default(1))
        .build();
    let child = ClassDef::builder("Child")
        .extends(&base)
        .attribute("x", AttrType::INT, opts().default(2))
        .build();

    assert_eq!(child.default_values()["x"], Value::Int(2));
    assert_eq!(base.default_values()["x"], Value::Int(1));
}

#[test]
fn test_last_write_wins_regenerates_accessor() {
    let class = ClassDef::builder("Twice")
        .attribute("level", AttrType::INT, opts().default(1))
        .attribute("level", AttrType::SYMBOL, opts().default("high"))
        .build();

    assert_eq!(class.default_values()["level"], Value::from("high"));

    let mut instance = Instance::new(&class).unwrap();
    assert_eq!(instance.get("level"), Some(&Value::symbol("high")));

    instance.set("level", "low").unwrap();
    assert_eq!(instance.get("level"), Some(&Value::symbol("low")));
}

#[test]
fn test_sequence_default_is_empty_sequence() {
    let class = ClassDef::builder("Tagged")
        .attribute("tags", AttrType::Sequence, opts().of(AttrType::STRING))
        .attribute("scores", AttrType::Sequence, opts())
        .build();

    for name in ["tags", "scores"] {
        assert_eq!(class.default_values()[name], Value::Sequence(vec![]));
    }
}

#[test]
fn test_fast_path_stores_value_unchanged() {
    let spy = Arc::new(RecordingGateway::new());
    let class = ClassDef::builder("Fast")
        .gateway(spy.clone())
        .attribute("label", AttrType::STRING, opts())
        .attribute("ratio", AttrType::FLOAT, opts())
        .build();
    let mut instance = Instance::new(&class).unwrap();

    instance.set("label", " kept as is ").unwrap();
    instance.set("ratio", 0.5).unwrap();

    assert_eq!(instance.get("label"), Some(&Value::from(" kept as is ")));
    assert_eq!(instance.attributes()["label"], Value::from(" kept as is "));
    assert_eq!(instance.get("ratio"), Some(&Value::Float(0.5)));
    assert!(spy.calls().is_empty());
}

#[test]
fn test_gateway_never_sees_default_or_present() {
    let spy = Arc::new(RecordingGateway::new());
    let class = ClassDef::builder("Stripped")
        .gateway(spy.clone())
        .attribute(
            "count",
            AttrType::INT,
            opts().default(5).present().allow_nil().option("base", 10),
        )
        .build();
    let mut instance = Instance::new(&class).unwrap();

    instance.set("count", "12").unwrap();

    let calls = spy.calls();
    assert_eq!(calls.len(), 1);
    let options = &calls[0].options;
    assert!(options.allow_nil);
    assert_eq!(options.get("base"), Some(&Value::Int(10)));
    assert_eq!(options.extra.len(), 1);
    assert_eq!(instance.get("count"), Some(&Value::Int(12)));
}

#[test]
fn test_sequence_goes_through_gateway_even_when_already_a_sequence() {
    let spy = Arc::new(RecordingGateway::new());
    let class = ClassDef::builder("Scores")
        .gateway(spy.clone())
        .attribute("scores", AttrType::Sequence, opts().of(AttrType::FLOAT))
        .build();
    let mut instance = Instance::new(&class).unwrap();
    spy.clear();

    instance.set("scores", vec![1, 2]).unwrap();

    assert_eq!(spy.calls().len(), 1);
    assert_eq!(
        instance.get("scores"),
        Some(&Value::from(vec![1.0, 2.0]))
    );
}

#[test]
fn test_end_to_end_default_is_visible_statically_and_on_instances() {
    let base = base();

    assert_eq!(base.default_values()["name"], Value::from("x"));

    let instance = Instance::new(&base).unwrap();
    assert_eq!(instance.get("name"), Some(&Value::from("x")));
    assert!(instance.validate().is_ok());
}

#[test]
fn test_gateway_errors_reach_the_caller_unchanged() {
    let base = base();
    let child = child(&base);
    let mut instance = Instance::new(&child).unwrap();

    let err = instance.set("age", vec!["a"]).unwrap_err();
    assert!(matches!(
        err,
        attrkit::Error::Coercion(CoercionError::Unsupported { kind: "Sequence", .. })
    ));
    assert_eq!(instance.get("age"), Some(&Value::Int(0)));
}
