#![forbid(unsafe_code)]

//! View, component, and channel runtime for bhv.
//!
//! # Architecture
//!
//! A [`Registry`] owns named [`View`]s and the channel listener table. Views
//! own ordered extensions and [`Component`]s. A dispatch builds one
//! [`Stream`](bhv_core::Stream) and pipes it through the view's extensions,
//! then its components; a [`Channel`] repeats that for every subscribed view.
//!
//! All state is single-threaded (`Rc<RefCell<..>>`) and every dispatch runs
//! to completion before returning.
//!
//! ```
//! use std::rc::Rc;
//! use bhv_runtime::{ElementTree, Registry};
//! use serde_json::json;
//!
//! let elements = Rc::new(ElementTree::new());
//! let view_el = elements.insert(None)?;
//! elements.mark_view(view_el, "cart");
//! let total_el = elements.insert(Some(view_el))?;
//! elements.mark_component(total_el, "total");
//!
//! let registry = Registry::new(elements.clone());
//! registry
//!     .view("cart")?
//!     .component("total", |s| {
//!         let n = s.get("items").and_then(|v| v.as_array()).map_or(0, Vec::len);
//!         s.ret(json!({ "count": n }))
//!     })?;
//!
//! let out = registry.view("cart")?.stream(json!({"items": [1, 2, 3]}))?;
//! assert_eq!(out["count"], json!(3));
//! # Ok::<(), bhv_core::BehaveError>(())
//! ```

pub mod channel;
pub mod component;
pub mod config;
pub mod registry;
pub mod resolve;
pub mod selectors;
pub mod view;

pub use channel::Channel;
pub use component::{Callback, Component};
pub use config::RuntimeConfig;
pub use registry::Registry;
pub use resolve::{ElementTree, NodeId, ScopeResolver, global_elements};
pub use selectors::{SelectorKind, SelectorNames, Selectors};
pub use view::View;
