#![forbid(unsafe_code)]

//! Scope resolution: mapping a `(view, component)` pair to a host element.
//!
//! The runtime only needs the [`ScopeResolver`] trait. [`ElementTree`] is an
//! in-memory element hierarchy that implements it with descendant-selector
//! semantics, and also answers "which view encloses this element", which
//! the component selector needs.
//!
//! # Invariants
//!
//! 1. `resolve(v, c)` returns the first element, in insertion order, that is
//!    marked as component `c` and has a strict ancestor marked as view `v`.
//! 2. `enclosing_view(n)` only looks at strict ancestors of `n`.
//! 3. Ancestor walks stop at unknown node ids; they never panic.
//! 4. A node's parent always has a smaller id than the node itself, so
//!    every ancestor walk terminates.
//!
//! # Failure Modes
//!
//! - `insert` under a parent id this tree never handed out: range error.
//! - `insert` once the `u32` id space is used up: range error.

use std::cell::RefCell;
use std::rc::Rc;

use bhv_core::{BehaveError, ElementHandle, Result};

/// Locates the element a component is bound to.
pub trait ScopeResolver {
    /// The element for `component` inside `view`, if one exists.
    fn resolve(&self, view: &str, component: &str) -> Option<ElementHandle>;
}

impl<F> ScopeResolver for F
where
    F: Fn(&str, &str) -> Option<ElementHandle>,
{
    fn resolve(&self, view: &str, component: &str) -> Option<ElementHandle> {
        self(view, component)
    }
}

/// Identifier of a node in an [`ElementTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Raw index value.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Id of the next node in a tree holding `len` nodes.
    fn for_len(len: usize) -> Result<Self> {
        u32::try_from(len)
            .map(Self)
            .map_err(|_| BehaveError::ElementTreeFull)
    }
}

#[derive(Debug, Default)]
struct Node {
    parent: Option<NodeId>,
    view: Option<Rc<str>>,
    component: Option<Rc<str>>,
}

/// In-memory element hierarchy with view and component markers.
///
/// Uses interior mutability so a tree shared with a registry can still be
/// extended afterwards.
#[derive(Debug, Default)]
pub struct ElementTree {
    nodes: RefCell<Vec<Node>>,
}

thread_local! {
    static GLOBAL_ELEMENTS: Rc<ElementTree> = Rc::new(ElementTree::new());
}

/// The element tree backing [`Registry::global`](crate::Registry::global).
#[must_use]
pub fn global_elements() -> Rc<ElementTree> {
    GLOBAL_ELEMENTS.with(Rc::clone)
}

impl ElementTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node under `parent`, or a root when `parent` is `None`.
    ///
    /// `parent` must already belong to this tree.
    pub fn insert(&self, parent: Option<NodeId>) -> Result<NodeId> {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(unknown) = parent.filter(|p| p.0 as usize >= nodes.len()) {
            return Err(BehaveError::UnknownElement(unknown.0));
        }
        let id = NodeId::for_len(nodes.len())?;
        nodes.push(Node {
            parent,
            ..Node::default()
        });
        Ok(id)
    }

    /// Mark `node` as the element of view `name`.
    pub fn mark_view(&self, node: NodeId, name: &str) {
        if let Some(n) = self.nodes.borrow_mut().get_mut(node.0 as usize) {
            n.view = Some(name.into());
        }
    }

    /// Mark `node` as the element of component `name`.
    pub fn mark_component(&self, node: NodeId, name: &str) {
        if let Some(n) = self.nodes.borrow_mut().get_mut(node.0 as usize) {
            n.component = Some(name.into());
        }
    }

    /// Name of the nearest strict ancestor of `node` marked as a view.
    #[must_use]
    pub fn enclosing_view(&self, node: NodeId) -> Option<String> {
        let nodes = self.nodes.borrow();
        let mut cursor = nodes.get(node.0 as usize)?.parent;
        while let Some(id) = cursor {
            let current = nodes.get(id.0 as usize)?;
            if let Some(view) = &current.view {
                return Some(view.to_string());
            }
            cursor = current.parent;
        }
        None
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    /// Whether the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.borrow().is_empty()
    }

    fn has_view_ancestor(nodes: &[Node], node: &Node, view: &str) -> bool {
        let mut cursor = node.parent;
        while let Some(id) = cursor {
            let Some(current) = nodes.get(id.0 as usize) else {
                return false;
            };
            if current.view.as_deref() == Some(view) {
                return true;
            }
            cursor = current.parent;
        }
        false
    }
}

impl ScopeResolver for ElementTree {
    fn resolve(&self, view: &str, component: &str) -> Option<ElementHandle> {
        let nodes = self.nodes.borrow();
        nodes
            .iter()
            .enumerate()
            .find(|(_, node)| {
                node.component.as_deref() == Some(component)
                    && Self::has_view_ancestor(&nodes, node, view)
            })
            .map(|(idx, _)| ElementHandle::new(idx as u64, component))
    }
}
