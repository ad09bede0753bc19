//! Execution receivers for pipeline callbacks.

use core::fmt;
use std::rc::Rc;

/// Opaque handle to the host element a component is bound to.
///
/// Produced by a scope resolver. `id` identifies the element within its
/// resolver; `label` is a human-readable tag for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementHandle {
    id: u64,
    label: Rc<str>,
}

impl ElementHandle {
    /// Create a handle.
    #[must_use]
    pub fn new(id: u64, label: impl Into<Rc<str>>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }

    /// Resolver-local element identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Diagnostic label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.label, self.id)
    }
}

/// The receiver active while a callback runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Scope {
    /// Not yet handed to any pipeline stage.
    #[default]
    Detached,
    /// A view's extensions are running.
    View(Rc<str>),
    /// A component is running against its resolved element.
    Element(ElementHandle),
}

impl Scope {
    /// Name of the view, when the scope is a view.
    #[must_use]
    pub fn view_name(&self) -> Option<&str> {
        match self {
            Self::View(name) => Some(name),
            _ => None,
        }
    }

    /// The element handle, when the scope is a component element.
    #[must_use]
    pub fn element(&self) -> Option<&ElementHandle> {
        match self {
            Self::Element(handle) => Some(handle),
            _ => None,
        }
    }
}
