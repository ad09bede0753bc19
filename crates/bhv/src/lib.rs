#![forbid(unsafe_code)]

//! bhv public facade.
//!
//! This crate provides:
//! - re-exports of [`bhv_core`] and [`bhv_runtime`]
//! - a [`prelude`] with everything a page script needs
//! - the test harness behind the `harness` feature
//!
//! ```
//! use bhv::prelude::*;
//!
//! let registry = Registry::new(std::rc::Rc::new(ElementTree::new()));
//! let feed = registry.view("feed")?;
//! feed.uses(|s| {
//!     s.has("user")
//!         .then(|s| s.ret(json!({ "greeting": "welcome back" })))?
//!         .otherwise(|s| s.ret(json!({ "greeting": "sign in" })))
//! });
//!
//! let out = feed.stream(json!({ "user": "ana" }))?;
//! assert_eq!(out["greeting"], json!("welcome back"));
//! # Ok::<(), BehaveError>(())
//! ```

pub use bhv_core as core;
pub use bhv_runtime as runtime;

#[cfg(feature = "harness")]
pub use bhv_harness as harness;

pub use bhv_core::{
    BehaveError, Condition, ElementHandle, ElseBranch, ErrorKind, Query, Record, Result, Scope,
    Stream, is_truthy,
};
pub use bhv_runtime::{
    Callback, Channel, Component, ElementTree, NodeId, Registry, RuntimeConfig, ScopeResolver,
    SelectorKind, SelectorNames, Selectors, View, global_elements,
};

/// Common imports.
pub mod prelude {
    pub use bhv_core::{BehaveError, ErrorKind, Record, Result, Scope, Stream};
    pub use bhv_runtime::{
        Channel, Component, ElementTree, Registry, RuntimeConfig, Selectors, View,
    };
    pub use serde_json::{Value, json};
}
