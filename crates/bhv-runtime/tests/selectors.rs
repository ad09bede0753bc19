//! Selector façade against a page-like element layout.

use bhv_core::{BehaveError, ErrorKind};
use bhv_harness::{Fixture, Recorder};
use bhv_runtime::{Component, Registry, SelectorKind, SelectorNames, Selectors, View};
use serde_json::json;

#[test]
fn component_selector_from_nested_target() {
    let fx = Fixture::new();
    let rec = Recorder::new();
    let (view, nodes) = fx.mount("cart", &["checkout"]).unwrap();
    view.component("checkout", rec.callback("checkout")).unwrap();

    // A button nested inside the component element.
    let button = fx.child(nodes[0]).unwrap();
    let sel = fx.selectors();
    let cmp = sel.component(Some(button), "checkout").unwrap();
    assert!(Component::ptr_eq(&cmp, &view.components("checkout").unwrap()));

    cmp.stream(json!({"clicked": true})).unwrap();
    assert_eq!(rec.entries(), ["checkout"]);
}

#[test]
fn nearest_enclosing_view_wins() {
    let fx = Fixture::new();
    let (outer, outer_nodes) = fx.mount("outer", &["slot"]).unwrap();
    outer.component("slot", |_| Ok(())).unwrap();

    let inner_el = fx.child(outer_nodes[0]).unwrap();
    fx.elements().mark_view(inner_el, "inner");
    let target = fx.child(inner_el).unwrap();
    let inner = fx.registry().view("inner").unwrap();
    inner.component("slot", |_| Ok(())).unwrap();

    let cmp = fx.selectors().component(Some(target), "slot").unwrap();
    assert_eq!(cmp.view_name(), "inner");
}

#[test]
fn component_selector_errors() {
    let fx = Fixture::new();
    let (_, nodes) = fx.mount("cart", &["checkout"]).unwrap();
    let sel = fx.selectors();

    assert_eq!(
        sel.component(None, "checkout").unwrap_err(),
        BehaveError::NoEnclosingView
    );
    assert_eq!(
        sel.component(Some(nodes[0]), "checkout").unwrap_err().kind(),
        ErrorKind::Range
    );
}

#[test]
fn view_and_channel_selectors() {
    let fx = Fixture::new();
    let rec = Recorder::new();
    let (view, _) = fx.mount("news", &[]).unwrap();
    view.uses(rec.capture("news")).listens("headlines").unwrap();

    let sel = fx.selectors();
    assert!(View::ptr_eq(&sel.view("news").unwrap(), &view));
    assert_eq!(sel.view("sports").unwrap_err().kind(), ErrorKind::Range);

    sel.channel("headlines")
        .unwrap()
        .stream(json!({"id": 7}))
        .unwrap();
    assert_eq!(rec.entries(), [r#"news {"id":7}"#]);
}

#[test]
fn custom_names() {
    let fx = Fixture::new();
    let names = SelectorNames {
        view: "vm".into(),
        component: "cmp".into(),
        channel: "bus".into(),
    };
    let sel = Selectors::with_names(fx.registry().clone(), fx.elements().clone(), names).unwrap();
    assert_eq!(sel.kind_of("bus"), Some(SelectorKind::Channel));
    assert_eq!(sel.kind_of("$b"), None);

    let empty = SelectorNames {
        view: String::new(),
        ..SelectorNames::default()
    };
    let err = Selectors::with_names(fx.registry().clone(), fx.elements().clone(), empty)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
}

#[test]
fn global_selectors_share_the_global_registry() {
    let sel = Selectors::global();
    assert!(Registry::ptr_eq(sel.registry(), &Registry::global()));

    let view = Registry::global().view("global-selectors-test").unwrap();
    assert!(View::ptr_eq(&sel.view("global-selectors-test").unwrap(), &view));
}
