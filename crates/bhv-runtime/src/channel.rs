#![forbid(unsafe_code)]

//! Channels: named broadcasts into every subscribed view.

use std::fmt;
use std::rc::Rc;

use bhv_core::Result;
use serde_json::Value;

use crate::registry::{Registry, require_name};

/// Broadcast handle for one channel name.
///
/// Channels are not stored anywhere; the listener list is read from the
/// registry each time [`Channel::stream`] runs.
#[derive(Clone)]
pub struct Channel {
    name: Rc<str>,
    registry: Registry,
}

impl Channel {
    /// Create a handle for `name` on `registry`.
    pub fn new(registry: &Registry, name: &str) -> Result<Self> {
        require_name(name, "channel name")?;
        Ok(Self {
            name: name.into(),
            registry: registry.clone(),
        })
    }

    /// Channel name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of subscriptions (duplicates counted).
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.registry.listeners(&self.name).len()
    }

    /// Stream `input` into every subscribed view, in subscription order.
    ///
    /// Each view's output is discarded. The first failing view aborts the
    /// broadcast.
    pub fn stream(&self, input: Value) -> Result<&Self> {
        let views = self.registry.listeners(&self.name);
        tracing::debug!(channel = %self.name, listeners = views.len(), "channel broadcast");
        for view in &views {
            view.stream(input.clone())?;
        }
        Ok(self)
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bhv_core::{BehaveError, ElementHandle, ErrorKind};
    use serde_json::json;
    use std::cell::RefCell;

    fn everywhere(_: &str, component: &str) -> Option<ElementHandle> {
        Some(ElementHandle::new(0, component))
    }

    #[test]
    fn empty_name_is_type_error() {
        let reg = Registry::new(Rc::new(everywhere));
        assert_eq!(reg.channel("").unwrap_err().kind(), ErrorKind::Type);
    }

    #[test]
    fn broadcast_reaches_only_subscribers() {
        let reg = Registry::new(Rc::new(everywhere));
        let seen = Rc::new(RefCell::new(Vec::new()));

        for name in ["a", "b"] {
            let s = Rc::clone(&seen);
            let view = reg.view(name).unwrap();
            view.uses(move |stream| {
                s.borrow_mut()
                    .push((name, stream.get("n").cloned()));
                Ok(())
            });
        }
        reg.view("a").unwrap().listens("ch1").unwrap();

        let channel = reg.channel("ch1").unwrap();
        channel.stream(json!({"n": 1})).unwrap();

        assert_eq!(*seen.borrow(), [("a", Some(json!(1)))]);
    }

    #[test]
    fn unsubscribed_channel_is_silent() {
        let reg = Registry::new(Rc::new(everywhere));
        let channel = reg.channel("nobody").unwrap();
        assert_eq!(channel.listener_count(), 0);
        assert_eq!(channel.stream(json!({})).unwrap().name(), "nobody");
    }

    #[test]
    fn double_subscription_delivers_twice() {
        let reg = Registry::new(Rc::new(everywhere));
        let count = Rc::new(RefCell::new(0));
        let c = Rc::clone(&count);
        let view = reg.view("a").unwrap();
        view.uses(move |_| {
            *c.borrow_mut() += 1;
            Ok(())
        });
        view.listens("ch").unwrap().listens("ch").unwrap();

        reg.channel("ch").unwrap().stream(json!({})).unwrap();
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn failing_listener_aborts_broadcast() {
        let reg = Registry::new(Rc::new(everywhere));
        let reached = Rc::new(RefCell::new(false));

        let first = reg.view("first").unwrap();
        first.uses(|_| Err(BehaveError::callback("down")));
        first.listens("ch").unwrap();

        let r = Rc::clone(&reached);
        let second = reg.view("second").unwrap();
        second.uses(move |_| {
            *r.borrow_mut() = true;
            Ok(())
        });
        second.listens("ch").unwrap();

        let err = reg.channel("ch").unwrap().stream(json!({})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Callback);
        assert!(!*reached.borrow());
    }

    #[test]
    fn subscription_after_channel_creation_is_seen() {
        let reg = Registry::new(Rc::new(everywhere));
        let channel = reg.channel("late").unwrap();
        reg.view("a").unwrap().listens("late").unwrap();
        assert_eq!(channel.listener_count(), 1);
    }
}
