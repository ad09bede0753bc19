#![forbid(unsafe_code)]

//! The three public selectors: view, component, and channel.
//!
//! [`Selectors`] is a thin façade over a [`Registry`]. Instead of inferring
//! the "current view" from an ambient event, the component selector takes
//! the target element explicitly and walks up the [`ElementTree`] to find
//! the enclosing view.
//!
//! The façade's public names default to `$v`, `$c`, `$b` and can be
//! changed with [`SelectorNames`]; names must be non-empty and distinct.

use std::rc::Rc;

use bhv_core::{BehaveError, Result};

use crate::channel::Channel;
use crate::component::Component;
use crate::registry::{Registry, require_name};
use crate::resolve::{ElementTree, NodeId, global_elements};
use crate::view::View;

/// Which selector a public name is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorKind {
    View,
    Component,
    Channel,
}

/// Public names of the three selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorNames {
    pub view: String,
    pub component: String,
    pub channel: String,
}

impl Default for SelectorNames {
    fn default() -> Self {
        Self {
            view: "$v".into(),
            component: "$c".into(),
            channel: "$b".into(),
        }
    }
}

impl SelectorNames {
    fn validate(&self) -> Result<()> {
        require_name(&self.view, "view selector name")?;
        require_name(&self.component, "component selector name")?;
        require_name(&self.channel, "channel selector name")?;
        if self.view == self.component || self.view == self.channel {
            return Err(BehaveError::SelectorCollision(self.view.clone()));
        }
        if self.component == self.channel {
            return Err(BehaveError::SelectorCollision(self.component.clone()));
        }
        Ok(())
    }
}

/// Selector façade over one registry and its element tree.
#[derive(Debug, Clone)]
pub struct Selectors {
    registry: Registry,
    elements: Rc<ElementTree>,
    names: SelectorNames,
}

impl Selectors {
    /// Façade with the default names.
    #[must_use]
    pub fn new(registry: Registry, elements: Rc<ElementTree>) -> Self {
        Self {
            registry,
            elements,
            names: SelectorNames::default(),
        }
    }

    /// Façade with custom names. Empty or colliding names are type errors.
    pub fn with_names(
        registry: Registry,
        elements: Rc<ElementTree>,
        names: SelectorNames,
    ) -> Result<Self> {
        names.validate()?;
        Ok(Self {
            registry,
            elements,
            names,
        })
    }

    /// Façade over [`Registry::global`] and [`global_elements`].
    #[must_use]
    pub fn global() -> Self {
        Self::new(Registry::global(), global_elements())
    }

    /// The public names in use.
    #[must_use]
    pub fn names(&self) -> &SelectorNames {
        &self.names
    }

    /// The selector a public name is bound to, if any.
    #[must_use]
    pub fn kind_of(&self, name: &str) -> Option<SelectorKind> {
        if name == self.names.view {
            Some(SelectorKind::View)
        } else if name == self.names.component {
            Some(SelectorKind::Component)
        } else if name == self.names.channel {
            Some(SelectorKind::Channel)
        } else {
            None
        }
    }

    /// The registry behind this façade.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// View selector: look up a registered view.
    pub fn view(&self, name: &str) -> Result<View> {
        self.registry.views(name)
    }

    /// Component selector: find `name` in the view enclosing `target`.
    ///
    /// Checks run in this order: reference error when `target` is `None`
    /// or has no enclosing view; type error on an empty name; range error
    /// when the enclosing view or the component is not registered.
    pub fn component(&self, target: Option<NodeId>, name: &str) -> Result<Component> {
        let view_name = target
            .and_then(|node| self.elements.enclosing_view(node))
            .ok_or(BehaveError::NoEnclosingView)?;
        require_name(name, "component name")?;
        self.registry.views(&view_name)?.components(name)
    }

    /// Channel selector: build a broadcast handle.
    pub fn channel(&self, name: &str) -> Result<Channel> {
        self.registry.channel(name)
    }
}
