#![forbid(unsafe_code)]

//! The view and channel-listener registry.
//!
//! A [`Registry`] owns two tables: view name → [`View`], and channel name →
//! subscribed views in subscription order. Both are populated lazily and
//! never shrink; a registry lives as long as any handle to it.
//!
//! [`Registry::global`] is a per-thread default instance backed by
//! [`global_elements`], standing in for process-wide state in the
//! single-threaded model. Everything else takes an explicit registry.
//!
//! # Invariants
//!
//! 1. `view(name)` returns the same view for the same name, every time.
//! 2. Listener lists preserve subscription order and keep duplicates.
//! 3. Views hold only a weak reference back to their registry, so the
//!    registry is freed when its last [`Registry`] handle drops.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use ahash::AHashMap;
use bhv_core::{BehaveError, Result};

use crate::channel::Channel;
use crate::config::RuntimeConfig;
use crate::resolve::{ScopeResolver, global_elements};
use crate::view::View;

thread_local! {
    static GLOBAL_REGISTRY: Registry =
        Registry::with_config(global_elements(), RuntimeConfig::from_env());
}

/// Reject empty names with a type error naming `what`.
pub(crate) fn require_name(name: &str, what: &'static str) -> Result<()> {
    if name.is_empty() {
        return Err(BehaveError::InvalidArgument {
            what,
            expected: "a non-empty string",
        });
    }
    Ok(())
}

pub(crate) struct Shared {
    views: RefCell<AHashMap<String, View>>,
    listeners: RefCell<AHashMap<String, Vec<View>>>,
    resolver: Rc<dyn ScopeResolver>,
    config: RuntimeConfig,
}

impl Shared {
    pub(crate) fn subscribe(&self, channel: &str, view: View) {
        tracing::debug!(view = view.name(), channel, "view subscribed to channel");
        self.listeners
            .borrow_mut()
            .entry(channel.to_string())
            .or_default()
            .push(view);
    }

    fn listeners(&self, channel: &str) -> Vec<View> {
        self.listeners
            .borrow()
            .get(channel)
            .cloned()
            .unwrap_or_default()
    }
}

/// Handle to a view registry. Cloning shares the same tables.
#[derive(Clone)]
pub struct Registry {
    shared: Rc<Shared>,
}

impl Registry {
    /// Create a registry with the default configuration.
    #[must_use]
    pub fn new(resolver: Rc<dyn ScopeResolver>) -> Self {
        Self::with_config(resolver, RuntimeConfig::default())
    }

    /// Create a registry with an explicit configuration.
    #[must_use]
    pub fn with_config(resolver: Rc<dyn ScopeResolver>, config: RuntimeConfig) -> Self {
        Self {
            shared: Rc::new(Shared {
                views: RefCell::new(AHashMap::new()),
                listeners: RefCell::new(AHashMap::new()),
                resolver,
                config,
            }),
        }
    }

    /// The per-thread default registry.
    ///
    /// Configured from the environment on first use.
    #[must_use]
    pub fn global() -> Self {
        GLOBAL_REGISTRY.with(Clone::clone)
    }

    /// Configuration shared by every view of this registry.
    #[must_use]
    pub fn config(&self) -> RuntimeConfig {
        self.shared.config
    }

    /// The resolver components of this registry use.
    #[must_use]
    pub fn resolver(&self) -> Rc<dyn ScopeResolver> {
        Rc::clone(&self.shared.resolver)
    }

    /// Return the view called `name`, creating it on first use.
    pub fn view(&self, name: &str) -> Result<View> {
        require_name(name, "view name")?;
        let mut views = self.shared.views.borrow_mut();
        if let Some(view) = views.get(name) {
            return Ok(view.clone());
        }
        let view = View::new(
            name,
            Rc::downgrade(&self.shared),
            Rc::clone(&self.shared.resolver),
            self.shared.config,
        );
        views.insert(name.to_string(), view.clone());
        tracing::debug!(view = name, "view-model created");
        Ok(view)
    }

    /// Look up an existing view. Unknown names are a range error.
    pub fn views(&self, name: &str) -> Result<View> {
        require_name(name, "view name")?;
        self.shared
            .views
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| BehaveError::UnknownView(name.to_string()))
    }

    /// Shallow copy of the whole view table.
    #[must_use]
    pub fn all_views(&self) -> AHashMap<String, View> {
        self.shared.views.borrow().clone()
    }

    /// Build a broadcast handle for `name`.
    pub fn channel(&self, name: &str) -> Result<Channel> {
        Channel::new(self, name)
    }

    /// Views subscribed to `channel`, in subscription order.
    #[must_use]
    pub fn listeners(&self, channel: &str) -> Vec<View> {
        self.shared.listeners(channel)
    }

    /// Whether both handles refer to the same registry.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.shared, &b.shared)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("views", &self.shared.views.borrow().len())
            .field("channels", &self.shared.listeners.borrow().len())
            .field("config", &self.shared.config)
            .finish()
    }
}
