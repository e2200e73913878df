use model_patch::{Host, MethodError, PatchError, Scope, UpdateMethod};
use serde_json::{json, Value};

fn host_of(value: Value) -> Host {
    value.as_object().expect("host must be an object").clone()
}

#[test]
fn counter_scenario() {
    // update = (old, msg) => msg.type === 'inc' ? {...old, count: old.count+1} : old
    let method = UpdateMethod::pure(|_scope, old, msg| {
        if msg["type"] == json!("inc") {
            let mut next = old.clone();
            next["count"] = json!(old["count"].as_i64().unwrap_or(0) + 1);
            next
        } else {
            old.clone()
        }
    });

    let mut host = host_of(json!({"count": 0}));

    let writes = method.call(&mut host, &[json!({"type": "inc"})]).unwrap();
    assert_eq!(writes, 1);
    assert_eq!(host["count"], json!(1));

    // A message the update function ignores performs no assignment.
    let writes = method.call(&mut host, &[json!({"type": "noop"})]).unwrap();
    assert_eq!(writes, 0);
    assert_eq!(host["count"], json!(1));
}

#[test]
fn scope_variant_matrix() {
    // Plain: the update function gets no extra context.
    let plain = UpdateMethod::pure(|scope, old, _msg| {
        assert!(matches!(scope, Scope::None));
        old.clone()
    });
    let mut host = host_of(json!({"a": 1}));
    plain.call(&mut host, &[]).unwrap();

    // Props: the update function gets a derived view.
    let props = UpdateMethod::pure(|scope, old, _msg| {
        let Scope::Props(view) = scope else {
            panic!("expected props scope");
        };
        assert_eq!(view, &json!({"limit": 10}));
        old.clone()
    })
    .with_props_scope(|_host| json!({"limit": 10}));
    props.call(&mut host, &[]).unwrap();

    // Host: the update function reads the host directly.
    let direct = UpdateMethod::pure(|scope, old, _msg| {
        let Scope::Host(view) = scope else {
            panic!("expected host scope");
        };
        assert_eq!(view["a"], json!(1));
        old.clone()
    })
    .with_host_scope();
    direct.call(&mut host, &[]).unwrap();
}

#[test]
fn message_accessor_collects_all_arguments() {
    let method = UpdateMethod::pure(|_scope, _old, msg| json!({"last": msg.clone()}))
        .with_message(|args| Value::Array(args.to_vec()));

    let mut host = host_of(json!({"last": null}));
    method
        .call(&mut host, &[json!("x"), json!(1), json!(true)])
        .unwrap();
    assert_eq!(host["last"], json!(["x", 1, true]));
}

#[test]
fn shallow_call_leaves_unlisted_fields_alone() {
    let method = UpdateMethod::pure(|_scope, old, _msg| {
        let mut next = old.clone();
        next["count"] = json!(9);
        next
    })
    .with_model(|host| json!({"count": host["count"].clone()}));

    let mut host = host_of(json!({"count": 0, "theme": "dark"}));
    method.call(&mut host, &[]).unwrap();
    assert_eq!(host, host_of(json!({"count": 9, "theme": "dark"})));
}

#[test]
fn nested_call_merges_sub_objects() {
    let method = UpdateMethod::pure(|_scope, old, msg| {
        let mut next = old.clone();
        next["ui"]["open"] = msg.clone();
        next
    })
    .nested();

    let mut host = host_of(json!({"ui": {"open": false, "width": 300}}));
    let writes = method.call(&mut host, &[json!(true)]).unwrap();
    assert_eq!(writes, 1);
    assert_eq!(host, host_of(json!({"ui": {"open": true, "width": 300}})));
}

#[test]
fn repeated_calls_are_idempotent() {
    let method = UpdateMethod::pure(|_scope, old, _msg| {
        let mut next = old.clone();
        next["phase"] = json!("ready");
        next
    });

    let mut host = host_of(json!({"phase": "init"}));
    assert_eq!(method.call(&mut host, &[]).unwrap(), 1);
    // Second call: the update output now equals the old view.
    assert_eq!(method.call(&mut host, &[]).unwrap(), 0);
    assert_eq!(host["phase"], json!("ready"));
}

#[test]
fn update_error_propagates_uncaught() {
    let method =
        UpdateMethod::new(|_scope, _old, _msg| Err("model service unavailable".to_string().into()));
    let mut host = host_of(json!({"a": 1}));

    let err = method.call(&mut host, &[]).unwrap_err();
    assert!(matches!(err, MethodError::Update(_)));
    assert!(err.to_string().contains("model service unavailable"));
    assert_eq!(host, host_of(json!({"a": 1})));
}

#[test]
fn shape_mismatch_propagates_as_patch_error() {
    let method = UpdateMethod::pure(|_scope, _old, _msg| json!({"a": {"x": 1}})).nested();
    let mut host = host_of(json!({"a": 1}));

    let err = method.call(&mut host, &[]).unwrap_err();
    assert!(matches!(
        err,
        MethodError::Patch(PatchError::NotAnObject(_))
    ));
}
