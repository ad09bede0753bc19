//! Error taxonomy shared by every bhv crate.
//!
//! Errors are raised synchronously at the call site and never recovered
//! internally. Each variant belongs to exactly one [`ErrorKind`].
//!
//! # Failure Modes
//!
//! | Kind | Cause |
//! |------|-------|
//! | `Type` | Empty name, non-object input/output/shape, selector name collision |
//! | `Syntax` | Component declared twice in one view |
//! | `Range` | Lookup of an unregistered view or component, element id outside its tree, full element tree |
//! | `Reference` | Unresolvable component scope, no enclosing view, detached view |
//! | `Callback` | Failure raised by a user callback |

use core::fmt;

/// Result alias used across bhv.
pub type Result<T> = std::result::Result<T, BehaveError>;

/// Coarse classification of a [`BehaveError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong argument shape or type.
    Type,
    /// Declaration conflicts with an existing one.
    Syntax,
    /// Lookup of something that was never registered.
    Range,
    /// A required collaborator or context could not be found.
    Reference,
    /// Raised by user code running inside the pipeline.
    Callback,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type => write!(f, "type error"),
            Self::Syntax => write!(f, "syntax error"),
            Self::Range => write!(f, "range error"),
            Self::Reference => write!(f, "reference error"),
            Self::Callback => write!(f, "callback error"),
        }
    }
}

/// Errors from registration and dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BehaveError {
    /// An argument did not have the expected form (e.g. an empty name).
    InvalidArgument {
        what: &'static str,
        expected: &'static str,
    },
    /// A value that must be a key-value mapping was something else.
    NotAnObject { what: &'static str, found: &'static str },
    /// Two selector façade entries share a public name.
    SelectorCollision(String),
    /// A component of the same name already exists in the view.
    DuplicateComponent { view: String, component: String },
    /// No view registered under this name.
    UnknownView(String),
    /// The view has no component of this name.
    UnknownComponent { view: String, component: String },
    /// The element id does not belong to this element tree.
    UnknownElement(u32),
    /// The element tree has used up its id space.
    ElementTreeFull,
    /// The resolver has no element bound to this view/component pair.
    UnresolvedScope { view: String, component: String },
    /// The target element is missing or sits outside any view.
    NoEnclosingView,
    /// The view outlived the registry that created it.
    DetachedView(String),
    /// Failure reported by a user callback.
    Callback(String),
}

impl BehaveError {
    /// Shorthand for [`BehaveError::Callback`].
    pub fn callback(message: impl Into<String>) -> Self {
        Self::Callback(message.into())
    }

    /// The kind this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } | Self::NotAnObject { .. } | Self::SelectorCollision(_) => {
                ErrorKind::Type
            }
            Self::DuplicateComponent { .. } => ErrorKind::Syntax,
            Self::UnknownView(_)
            | Self::UnknownComponent { .. }
            | Self::UnknownElement(_)
            | Self::ElementTreeFull => ErrorKind::Range,
            Self::UnresolvedScope { .. } | Self::NoEnclosingView | Self::DetachedView(_) => {
                ErrorKind::Reference
            }
            Self::Callback(_) => ErrorKind::Callback,
        }
    }
}

impl fmt::Display for BehaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { what, expected } => {
                write!(f, "{what} expected to be {expected}")
            }
            Self::NotAnObject { what, found } => {
                write!(f, "{what} expected to be a key-value mapping, found {found}")
            }
            Self::SelectorCollision(name) => {
                write!(f, "selector name '{name}' is bound more than once")
            }
            Self::DuplicateComponent { view, component } => write!(
                f,
                "view-model '{view}' already contains a component named '{component}'"
            ),
            Self::UnknownView(name) => write!(f, "'{name}' is not a registered view-model"),
            Self::UnknownComponent { view, component } => write!(
                f,
                "view-model '{view}' does not include the component '{component}'"
            ),
            Self::UnknownElement(id) => write!(f, "element #{id} is not part of this tree"),
            Self::ElementTreeFull => write!(f, "element tree has no ids left"),
            Self::UnresolvedScope { view, component } => write!(
                f,
                "unable to resolve the element of component '{component}' in view-model '{view}'"
            ),
            Self::NoEnclosingView => write!(
                f,
                "unable to determine parent view-model; the component selector must be used within a view-model scope"
            ),
            Self::DetachedView(name) => {
                write!(f, "view-model '{name}' is no longer attached to a registry")
            }
            Self::Callback(msg) => write!(f, "callback failed: {msg}"),
        }
    }
}

impl std::error::Error for BehaveError {}
