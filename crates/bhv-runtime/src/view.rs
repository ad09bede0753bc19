#![forbid(unsafe_code)]

//! Views: named aggregates of extensions and components.
//!
//! # Dispatch
//!
//! [`View::stream`] builds one [`Stream`], scopes it to the view, runs every
//! extension in declaration order, then hands the same stream to every
//! component in declaration order. Output accumulates across all stages.
//!
//! # Invariants
//!
//! 1. Component names are unique within a view.
//! 2. Extensions always run before any component.
//! 3. The first failing stage aborts the rest of the dispatch.
//! 4. No internal borrow is held while user callbacks run, so callbacks may
//!    register components, extensions, or subscriptions re-entrantly. Stages
//!    added during a dispatch take effect on the next one.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use ahash::AHashMap;
use bhv_core::value::{self, Record};
use bhv_core::{BehaveError, Result, Scope, Stream};
use serde_json::Value;

use crate::component::{Callback, Component};
use crate::config::RuntimeConfig;
use crate::registry::{Shared, require_name};
use crate::resolve::ScopeResolver;

/// Handle to a registered view.
///
/// Cloning shares the same view; use [`View::ptr_eq`] to compare identity.
#[derive(Clone)]
pub struct View {
    inner: Rc<ViewInner>,
}

struct ViewInner {
    name: Rc<str>,
    components: RefCell<ComponentTable>,
    extensions: RefCell<Vec<Callback>>,
    model: RefCell<Record>,
    registry: Weak<Shared>,
    resolver: Rc<dyn ScopeResolver>,
    config: RuntimeConfig,
}

#[derive(Default)]
struct ComponentTable {
    order: Vec<Component>,
    by_name: AHashMap<String, usize>,
}

impl View {
    pub(crate) fn new(
        name: &str,
        registry: Weak<Shared>,
        resolver: Rc<dyn ScopeResolver>,
        config: RuntimeConfig,
    ) -> Self {
        Self {
            inner: Rc::new(ViewInner {
                name: name.into(),
                components: RefCell::new(ComponentTable::default()),
                extensions: RefCell::new(Vec::new()),
                model: RefCell::new(Record::new()),
                registry,
                resolver,
                config,
            }),
        }
    }

    /// View name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Declare a component.
    ///
    /// Fails with a type error on an empty name and a syntax error when the
    /// view already has a component of that name.
    pub fn component<F>(&self, name: &str, f: F) -> Result<&Self>
    where
        F: Fn(&mut Stream) -> Result<()> + 'static,
    {
        require_name(name, "component name")?;
        let mut table = self.inner.components.borrow_mut();
        if table.by_name.contains_key(name) {
            return Err(BehaveError::DuplicateComponent {
                view: self.name().to_string(),
                component: name.to_string(),
            });
        }
        let component = Component::new(
            name,
            Rc::clone(&self.inner.name),
            Rc::new(f),
            Rc::clone(&self.inner.resolver),
            self.inner.config.trace_dispatch,
        );
        let idx = table.order.len();
        table.order.push(component);
        table.by_name.insert(name.to_string(), idx);
        Ok(self)
    }

    /// Append an extension. Extensions run before components on every
    /// dispatch, with the view as scope.
    pub fn uses<F>(&self, f: F) -> &Self
    where
        F: Fn(&mut Stream) -> Result<()> + 'static,
    {
        self.inner.extensions.borrow_mut().push(Rc::new(f));
        self
    }

    /// Subscribe this view to `channel`.
    ///
    /// Subscribing twice delivers every broadcast twice.
    pub fn listens(&self, channel: &str) -> Result<&Self> {
        require_name(channel, "channel name")?;
        let shared = self
            .inner
            .registry
            .upgrade()
            .ok_or_else(|| BehaveError::DetachedView(self.name().to_string()))?;
        shared.subscribe(channel, self.clone());
        Ok(self)
    }

    /// Merge `shape` into the advisory model.
    ///
    /// `shape` must be an object or `null`. Declaring a model on a view
    /// that already has one logs a warning and merges anyway.
    pub fn expects(&self, shape: Value) -> Result<&Self> {
        let shape = value::as_record(shape, "model shape")?;
        let mut model = self.inner.model.borrow_mut();
        if !model.is_empty() && self.inner.config.model_warnings {
            tracing::warn!(
                view = %self.inner.name,
                "multiple 'expects' declarations under view-model '{}'",
                self.inner.name
            );
        }
        if let Some(shape) = shape {
            value::merge_into(&mut model, shape);
        }
        Ok(self)
    }

    /// Copy of the advisory model.
    #[must_use]
    pub fn model(&self) -> Record {
        self.inner.model.borrow().clone()
    }

    /// Stream `input` through every extension, then every component.
    pub fn stream(&self, input: Value) -> Result<Record> {
        let mut stream = Stream::new(input)?;
        let _span = self
            .inner
            .config
            .trace_dispatch
            .then(|| tracing::debug_span!("view_stream", view = %self.inner.name).entered());

        stream.rescope(Scope::View(Rc::clone(&self.inner.name)));

        let extensions = self.inner.extensions.borrow().clone();
        for extension in &extensions {
            extension(&mut stream)?;
        }

        let components = self.inner.components.borrow().order.clone();
        for component in &components {
            component.stream_into(&mut stream)?;
        }

        Ok(stream.returned())
    }

    /// Look up a component by name.
    pub fn components(&self, name: &str) -> Result<Component> {
        require_name(name, "component name")?;
        let table = self.inner.components.borrow();
        table
            .by_name
            .get(name)
            .and_then(|&idx| table.order.get(idx).cloned())
            .ok_or_else(|| BehaveError::UnknownComponent {
                view: self.name().to_string(),
                component: name.to_string(),
            })
    }

    /// Component names in declaration order.
    #[must_use]
    pub fn component_names(&self) -> Vec<String> {
        self.inner
            .components
            .borrow()
            .order
            .iter()
            .map(|c| c.name().to_string())
            .collect()
    }

    /// Number of extensions.
    #[must_use]
    pub fn extension_count(&self) -> usize {
        self.inner.extensions.borrow().len()
    }

    /// Whether both handles refer to the same view.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("name", &self.inner.name)
            .field("components", &self.component_names())
            .field("extensions", &self.extension_count())
            .finish()
    }
}
