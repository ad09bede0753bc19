//! The per-dispatch message object and its conditional query DSL.
//!
//! A [`Stream`] carries an immutable input record, an output record that
//! callbacks append to with [`Stream::ret`], and the [`Scope`] of the stage
//! currently running.
//!
//! # Query DSL
//!
//! [`Stream::has`] starts a [`Query`], which is a two-state machine:
//!
//! | State | `then(f)` | `otherwise(g)` after `then` | `and(k)` | `or(k)` |
//! |-------|-----------|-----------------------------|----------|---------|
//! | `Satisfied` | runs `f` | skipped | re-evaluates `k` | stays `Satisfied` |
//! | `Unsatisfied` | skipped | runs `g` | stays `Unsatisfied` | re-evaluates `k` |
//!
//! The most recently evaluated condition alone decides which branch fires.
//! Presence means the key exists in the input, whatever its value.
//!
//! ```
//! use bhv_core::Stream;
//! use serde_json::json;
//!
//! let mut stream = Stream::new(json!({"user": "ada"})).unwrap();
//! stream
//!     .has("user")
//!     .then(|s| s.ret(json!({"greeting": "hello"})))
//!     .unwrap()
//!     .otherwise(|s| s.ret(json!({"greeting": "who?"})))
//!     .unwrap();
//! assert_eq!(stream.returned()["greeting"], json!("hello"));
//! ```
//!
//! # Invariants
//!
//! 1. `data` never changes after construction.
//! 2. `returned()` is a copy; mutating it does not touch the stream.
//! 3. At most one of `then`/`otherwise` runs per query.
//!
//! # Failure Modes
//!
//! - Non-object, non-null constructor input: type error.
//! - Non-object, non-null argument to `ret`: type error.
//! - A branch callback error aborts the chain and is returned as-is.

use serde_json::Value;

use crate::error::Result;
use crate::scope::Scope;
use crate::value::{self, Record};

/// Message object routed through a view's pipeline.
#[derive(Debug, Clone, Default)]
pub struct Stream {
    data: Record,
    output: Record,
    scope: Scope,
}

impl Stream {
    /// Build a stream from a JSON value.
    ///
    /// `null` produces an empty input. Objects are shallow-copied. Any
    /// other value is a type error.
    pub fn new(input: Value) -> Result<Self> {
        let data = value::as_record(input, "stream input")?.unwrap_or_default();
        Ok(Self::from_record(data))
    }

    /// Build a stream from an already validated record.
    #[must_use]
    pub fn from_record(data: Record) -> Self {
        Self {
            data,
            output: Record::new(),
            scope: Scope::Detached,
        }
    }

    /// Read an input field.
    ///
    /// Returns `None` when the key is absent **or** its value is falsy
    /// (`null`, `false`, `0`, `""`). Use [`lookup`](Self::lookup) to tell
    /// the two apart.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key).filter(|v| value::is_truthy(v))
    }

    /// Read an input field without the falsy conflation of [`get`](Self::get).
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Whether the input contains `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// The input record.
    #[must_use]
    pub fn data(&self) -> &Record {
        &self.data
    }

    /// Begin a conditional query on the presence of `key`.
    pub fn has(&mut self, key: &str) -> Query<'_> {
        let condition = Condition::of(self.contains(key));
        Query {
            stream: self,
            condition,
        }
    }

    /// Append a mapping to the output. Later keys overwrite earlier ones.
    ///
    /// `null` is accepted and merges nothing.
    pub fn ret(&mut self, obj: Value) -> Result<()> {
        if let Some(record) = value::as_record(obj, "return value")? {
            self.ret_record(record);
        }
        Ok(())
    }

    /// Append an already validated record to the output.
    pub fn ret_record(&mut self, record: Record) {
        value::merge_into(&mut self.output, record);
    }

    /// Copy of the output accumulated so far.
    #[must_use]
    pub fn returned(&self) -> Record {
        self.output.clone()
    }

    /// The receiver of the stage currently running.
    #[must_use]
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Hand the stream to a new pipeline stage.
    ///
    /// Called by views and components during dispatch; user callbacks have
    /// no reason to call it.
    #[doc(hidden)]
    pub fn rescope(&mut self, scope: Scope) {
        self.scope = scope;
    }
}

impl From<Record> for Stream {
    fn from(data: Record) -> Self {
        Self::from_record(data)
    }
}

/// Truth value of the most recently evaluated query link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Satisfied,
    Unsatisfied,
}

impl Condition {
    fn of(present: bool) -> Self {
        if present {
            Self::Satisfied
        } else {
            Self::Unsatisfied
        }
    }
}

/// A link in a `has(..).and(..).or(..)` chain.
#[must_use = "a query does nothing until `then` is called"]
#[derive(Debug)]
pub struct Query<'s> {
    stream: &'s mut Stream,
    condition: Condition,
}

impl<'s> Query<'s> {
    /// Current state of the chain.
    pub fn condition(&self) -> Condition {
        self.condition
    }

    /// Run `f` if the chain is satisfied.
    pub fn then<F>(self, f: F) -> Result<ElseBranch<'s>>
    where
        F: FnOnce(&mut Stream) -> Result<()>,
    {
        let Query { stream, condition } = self;
        let fires = match condition {
            Condition::Satisfied => {
                f(&mut *stream)?;
                false
            }
            Condition::Unsatisfied => true,
        };
        Ok(ElseBranch { stream, fires })
    }

    /// Satisfied: evaluate `key` as a fresh `has`. Unsatisfied: stay so.
    pub fn and(self, key: &str) -> Query<'s> {
        match self.condition {
            Condition::Satisfied => {
                let Query { stream, .. } = self;
                stream.has(key)
            }
            Condition::Unsatisfied => self,
        }
    }

    /// Unsatisfied: evaluate `key` as a fresh `has`. Satisfied: stay so.
    pub fn or(self, key: &str) -> Query<'s> {
        match self.condition {
            Condition::Satisfied => self,
            Condition::Unsatisfied => {
                let Query { stream, .. } = self;
                stream.has(key)
            }
        }
    }
}

/// The `else` half of a query, returned by [`Query::then`].
#[derive(Debug)]
pub struct ElseBranch<'s> {
    stream: &'s mut Stream,
    fires: bool,
}

impl ElseBranch<'_> {
    /// Run `f` if the `then` branch did not.
    pub fn otherwise<F>(self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Stream) -> Result<()>,
    {
        let ElseBranch { stream, fires } = self;
        if fires {
            f(stream)?;
        }
        Ok(())
    }

    /// Whether `otherwise` would run its callback.
    #[must_use]
    pub fn fires(&self) -> bool {
        self.fires
    }
}
