#![forbid(unsafe_code)]

//! Components: named callbacks bound to one view and one resolved element.

use std::fmt;
use std::rc::Rc;

use bhv_core::{BehaveError, ElementHandle, Record, Result, Scope, Stream};
use serde_json::Value;

use crate::resolve::ScopeResolver;

/// A pipeline callback: extension or component behavior.
pub type Callback = Rc<dyn Fn(&mut Stream) -> Result<()>>;

/// Handle to a registered component.
///
/// Cloning shares the same component; use [`Component::ptr_eq`] to compare
/// identity.
#[derive(Clone)]
pub struct Component {
    inner: Rc<ComponentInner>,
}

struct ComponentInner {
    name: Rc<str>,
    view: Rc<str>,
    callback: Callback,
    resolver: Rc<dyn ScopeResolver>,
    trace: bool,
}

impl Component {
    pub(crate) fn new(
        name: &str,
        view: Rc<str>,
        callback: Callback,
        resolver: Rc<dyn ScopeResolver>,
        trace: bool,
    ) -> Self {
        Self {
            inner: Rc::new(ComponentInner {
                name: name.into(),
                view,
                callback,
                resolver,
                trace,
            }),
        }
    }

    /// Component name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Name of the view this component belongs to.
    #[must_use]
    pub fn view_name(&self) -> &str {
        &self.inner.view
    }

    /// Resolve the element this component is bound to.
    pub fn resolve(&self) -> Result<ElementHandle> {
        self.inner
            .resolver
            .resolve(&self.inner.view, &self.inner.name)
            .ok_or_else(|| BehaveError::UnresolvedScope {
                view: self.inner.view.to_string(),
                component: self.inner.name.to_string(),
            })
    }

    /// Stream `input` through this component alone.
    ///
    /// The element is resolved before the input is validated, so an
    /// unbound component reports a reference error even for bad input.
    pub fn stream(&self, input: Value) -> Result<Record> {
        let element = self.resolve()?;
        let mut stream = Stream::new(input)?;
        self.run(&mut stream, element)?;
        Ok(stream.returned())
    }

    /// Stream an existing [`Stream`] through this component.
    ///
    /// Output accumulates on `stream`; read it with [`Stream::returned`].
    pub fn stream_into(&self, stream: &mut Stream) -> Result<()> {
        let element = self.resolve()?;
        self.run(stream, element)
    }

    fn run(&self, stream: &mut Stream, element: ElementHandle) -> Result<()> {
        if self.inner.trace {
            tracing::trace!(
                view = %self.inner.view,
                component = %self.inner.name,
                element = %element,
                "component stream"
            );
        }
        stream.rescope(Scope::Element(element));
        (self.inner.callback)(stream)
    }

    /// Whether both handles refer to the same component.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("name", &self.inner.name)
            .field("view", &self.inner.view)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bhv_core::ErrorKind;
    use serde_json::json;

    fn always(view: &str, component: &str) -> Option<ElementHandle> {
        (view == "cart").then(|| ElementHandle::new(3, component))
    }

    fn noop() -> Callback {
        Rc::new(|_: &mut Stream| -> Result<()> { Ok(()) })
    }

    fn component(view: &str, callback: Callback) -> Component {
        Component::new("total", view.into(), callback, Rc::new(always), false)
    }

    #[test]
    fn stream_runs_with_element_scope() {
        let cmp = component(
            "cart",
            Rc::new(|s: &mut Stream| {
                let id = s.scope().element().map(ElementHandle::id);
                s.ret(json!({ "element": id }))
            }),
        );
        let out = cmp.stream(json!({})).unwrap();
        assert_eq!(out["element"], json!(3));
    }

    #[test]
    fn unresolved_scope_is_reference_error() {
        let cmp = component("profile", noop());
        let err = cmp.stream(json!({})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Reference);
    }

    #[test]
    fn resolution_precedes_input_validation() {
        let cmp = component("profile", noop());
        let err = cmp.stream(json!(5)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Reference);

        let bound = component("cart", noop());
        assert_eq!(bound.stream(json!(5)).unwrap_err().kind(), ErrorKind::Type);
    }

    #[test]
    fn stream_into_accumulates() {
        let cmp = component(
            "cart",
            Rc::new(|s: &mut Stream| s.ret(json!({"b": 2}))),
        );
        let mut stream = Stream::new(json!({})).unwrap();
        stream.ret(json!({"a": 1})).unwrap();
        cmp.stream_into(&mut stream).unwrap();
        assert_eq!(Value::Object(stream.returned()), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn clones_share_identity() {
        let a = component("cart", noop());
        let b = a.clone();
        let c = component("cart", noop());
        assert!(Component::ptr_eq(&a, &b));
        assert!(!Component::ptr_eq(&a, &c));
    }
}
