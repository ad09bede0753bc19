//! End-to-end dispatch through views, components, and channels.

use bhv_core::{BehaveError, ErrorKind, Scope};
use bhv_harness::{Fixture, Recorder, failing};
use serde_json::{Value, json};

#[test]
fn extensions_then_components_with_merged_output() {
    let fx = Fixture::new();
    let rec = Recorder::new();
    let (view, _) = fx.mount("cart", &["total", "badge"]).unwrap();

    view.uses(rec.emitter("ext1", json!({"a": 1, "shared": "ext"})))
        .uses(rec.callback("ext2"));
    view.component("total", rec.emitter("total", json!({"b": 2})))
        .unwrap()
        .component("badge", rec.emitter("badge", json!({"shared": "badge"})))
        .unwrap();

    let out = view.stream(json!({"items": [1, 2]})).unwrap();
    assert_eq!(rec.entries(), ["ext1", "ext2", "total", "badge"]);
    assert_eq!(
        Value::Object(out),
        json!({"a": 1, "b": 2, "shared": "badge"})
    );
}

#[test]
fn every_stage_sees_the_same_input() {
    let fx = Fixture::new();
    let rec = Recorder::new();
    let (view, _) = fx.mount("feed", &["list"]).unwrap();
    view.uses(rec.capture("ext"));
    view.component("list", rec.capture("list")).unwrap();

    view.stream(json!({"page": 2})).unwrap();
    assert_eq!(rec.entries(), [r#"ext {"page":2}"#, r#"list {"page":2}"#]);
}

#[test]
fn components_receive_their_element() {
    let fx = Fixture::new();
    let (view, nodes) = fx.mount("cart", &["total"]).unwrap();
    view.component("total", |s| {
        let label = match s.scope() {
            Scope::Element(el) => el.to_string(),
            other => format!("{other:?}"),
        };
        s.ret(json!({ "scope": label }))
    })
    .unwrap();

    let out = view.stream(json!({})).unwrap();
    assert_eq!(out["scope"], json!(format!("total#{}", nodes[0].index())));
}

#[test]
fn unbound_component_aborts_dispatch() {
    let fx = Fixture::new();
    let rec = Recorder::new();
    // "orphan" has no element under the view.
    let (view, _) = fx.mount("cart", &["total"]).unwrap();
    view.component("orphan", rec.callback("orphan"))
        .unwrap()
        .component("total", rec.callback("total"))
        .unwrap();

    let err = view.stream(json!({})).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Reference);
    assert!(rec.entries().is_empty());
}

#[test]
fn failing_extension_stops_before_components() {
    let fx = Fixture::new();
    let rec = Recorder::new();
    let (view, _) = fx.mount("cart", &["total"]).unwrap();
    view.uses(failing("bad cart"));
    view.component("total", rec.callback("total")).unwrap();

    let err = view.stream(json!({})).unwrap_err();
    assert_eq!(err, BehaveError::Callback("bad cart".into()));
    assert!(rec.entries().is_empty());
}

#[test]
fn channel_reaches_subscribed_views_only() {
    let fx = Fixture::new();
    let rec = Recorder::new();
    let (a, _) = fx.mount("a", &[]).unwrap();
    let (b, _) = fx.mount("b", &[]).unwrap();
    let (c, _) = fx.mount("c", &[]).unwrap();
    a.uses(rec.capture("a")).listens("ch1").unwrap();
    b.uses(rec.capture("b")).listens("ch1").unwrap();
    c.uses(rec.capture("c")).listens("ch2").unwrap();

    fx.registry()
        .channel("ch1")
        .unwrap()
        .stream(json!({"n": 1}))
        .unwrap();
    assert_eq!(rec.entries(), [r#"a {"n":1}"#, r#"b {"n":1}"#]);
}

#[test]
fn channel_dispatch_runs_full_pipeline() {
    let fx = Fixture::new();
    let rec = Recorder::new();
    let (view, _) = fx.mount("stats", &["counter"]).unwrap();
    view.uses(rec.callback("ext"))
        .listens("tick")
        .unwrap();
    view.component("counter", rec.callback("counter")).unwrap();

    let channel = fx.registry().channel("tick").unwrap();
    channel.stream(json!({})).unwrap().stream(json!({})).unwrap();
    assert_eq!(rec.entries(), ["ext", "counter", "ext", "counter"]);
}

#[test]
fn lookups_are_range_errors_and_identity_stable() {
    let fx = Fixture::new();
    let (view, _) = fx.mount("cart", &["total"]).unwrap();
    view.component("total", |_| Ok(())).unwrap();

    let reg = fx.registry();
    assert_eq!(reg.views("nope").unwrap_err().kind(), ErrorKind::Range);
    assert_eq!(view.components("nope").unwrap_err().kind(), ErrorKind::Range);
    assert!(bhv_runtime::View::ptr_eq(&reg.views("cart").unwrap(), &view));
    assert!(bhv_runtime::Component::ptr_eq(
        &view.components("total").unwrap(),
        &reg.views("cart").unwrap().components("total").unwrap()
    ));
}

#[test]
fn duplicate_components_per_view_only() {
    let fx = Fixture::new();
    let (a, _) = fx.mount("a", &["x"]).unwrap();
    let (b, _) = fx.mount("b", &["x"]).unwrap();
    a.component("x", |_| Ok(())).unwrap();
    b.component("x", |_| Ok(())).unwrap();
    assert_eq!(
        a.component("x", |_| Ok(())).unwrap_err().kind(),
        ErrorKind::Syntax
    );
}

#[test]
fn dsl_inside_components() {
    let fx = Fixture::new();
    let (view, _) = fx.mount("auth", &["banner"]).unwrap();
    view.component("banner", |s| {
        s.has("user")
            .and("admin")
            .then(|s| s.ret(json!({"banner": "admin"})))?
            .otherwise(|s| s.ret(json!({"banner": "guest"})))
    })
    .unwrap();

    let admin = view.stream(json!({"user": "ana", "admin": true})).unwrap();
    assert_eq!(admin["banner"], json!("admin"));
    let user = view.stream(json!({"user": "ana"})).unwrap();
    assert_eq!(user["banner"], json!("guest"));
}
