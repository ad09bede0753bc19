#![forbid(unsafe_code)]

//! Test harness and reference fixtures for bhv.
//!
//! - [`Recorder`]: shared event log with callback factories, for asserting
//!   pipeline order.
//! - [`Fixture`]: a registry wired to its own [`ElementTree`], with helpers
//!   that lay out view and component elements the way a page would.

use std::cell::RefCell;
use std::rc::Rc;

use bhv_core::{BehaveError, Result, Stream};
use bhv_runtime::{ElementTree, NodeId, Registry, RuntimeConfig, Selectors, View};
use serde_json::Value;

/// Shared, clonable log of pipeline events.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    entries: Rc<RefCell<Vec<String>>>,
}

impl Recorder {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn log(&self, entry: impl Into<String>) {
        self.entries.borrow_mut().push(entry.into());
    }

    /// Snapshot of all entries.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    /// Drop all entries.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    /// Callback that logs `label` and does nothing else.
    pub fn callback(&self, label: &str) -> impl Fn(&mut Stream) -> Result<()> + 'static {
        let recorder = self.clone();
        let label = label.to_string();
        move |_| {
            recorder.log(label.clone());
            Ok(())
        }
    }

    /// Callback that logs `label` and returns `output`.
    pub fn emitter(
        &self,
        label: &str,
        output: Value,
    ) -> impl Fn(&mut Stream) -> Result<()> + 'static {
        let recorder = self.clone();
        let label = label.to_string();
        move |stream| {
            recorder.log(label.clone());
            stream.ret(output.clone())
        }
    }

    /// Callback that logs `label` followed by the input it received.
    pub fn capture(&self, label: &str) -> impl Fn(&mut Stream) -> Result<()> + 'static {
        let recorder = self.clone();
        let label = label.to_string();
        move |stream| {
            let data = Value::Object(stream.data().clone());
            recorder.log(format!("{label} {data}"));
            Ok(())
        }
    }
}

/// Callback that always fails with a callback error carrying `message`.
pub fn failing(message: &str) -> impl Fn(&mut Stream) -> Result<()> + 'static {
    let message = message.to_string();
    move |_| Err(BehaveError::callback(message.clone()))
}

/// A registry with its own element tree.
#[derive(Debug, Clone)]
pub struct Fixture {
    elements: Rc<ElementTree>,
    registry: Registry,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Fixture with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    /// Fixture with an explicit configuration.
    #[must_use]
    pub fn with_config(config: RuntimeConfig) -> Self {
        let elements = Rc::new(ElementTree::new());
        let registry = Registry::with_config(elements.clone(), config);
        Self { elements, registry }
    }

    /// The registry under test.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The element tree the registry resolves against.
    #[must_use]
    pub fn elements(&self) -> &Rc<ElementTree> {
        &self.elements
    }

    /// Selector façade over this fixture.
    #[must_use]
    pub fn selectors(&self) -> Selectors {
        Selectors::new(self.registry.clone(), Rc::clone(&self.elements))
    }

    /// Add a root view element with one child element per component, and
    /// register the view.
    ///
    /// Returns the view and the component element ids in `components` order.
    pub fn mount(&self, view: &str, components: &[&str]) -> Result<(View, Vec<NodeId>)> {
        let view_el = self.elements.insert(None)?;
        self.elements.mark_view(view_el, view);
        let nodes = components
            .iter()
            .map(|name| {
                let el = self.elements.insert(Some(view_el))?;
                self.elements.mark_component(el, name);
                Ok(el)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok((self.registry.view(view)?, nodes))
    }

    /// Add an unmarked element under `parent`, e.g. a button inside a
    /// component.
    pub fn child(&self, parent: NodeId) -> Result<NodeId> {
        self.elements.insert(Some(parent))
    }
}
