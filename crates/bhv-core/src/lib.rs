#![forbid(unsafe_code)]

//! Core primitives for bhv.
//!
//! This crate provides:
//! - [`Stream`] and its conditional [`Query`] DSL
//! - [`Scope`] and [`ElementHandle`] for callback receivers
//! - [`BehaveError`], the error type shared by every bhv crate
//! - [`Record`] helpers for shallow key-value mappings

pub mod error;
pub mod scope;
pub mod stream;
pub mod value;

pub use error::{BehaveError, ErrorKind, Result};
pub use scope::{ElementHandle, Scope};
pub use stream::{Condition, ElseBranch, Query, Stream};
pub use value::{Record, is_truthy};
