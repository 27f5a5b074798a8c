//! Observable sign-in state.
//!
//! Views attach a listener with [`IdentityHub::subscribe`] and keep the
//! returned [`Subscription`] for as long as they are mounted. Dropping the
//! subscription detaches the listener, so teardown never leaves a callback
//! pointing at a dead component.

use std::sync::{Arc, Mutex, MutexGuard};

type Listener<T> = Arc<dyn Fn(Option<&T>) + Send + Sync>;

struct Inner<T> {
    next_id: u64,
    listeners: Vec<(u64, Listener<T>)>,
    /// `None` until the first publish; then the last published identity.
    current: Option<Option<T>>,
}

pub struct IdentityHub<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for IdentityHub<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Default for IdentityHub<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                next_id: 0,
                listeners: Vec::new(),
                current: None,
            })),
        }
    }
}

fn lock<T>(inner: &Mutex<Inner<T>>) -> MutexGuard<'_, Inner<T>> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<T: Clone + Send + 'static> IdentityHub<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. If an identity has already been published the
    /// listener is invoked once immediately with it.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(Option<&T>) + Send + Sync + 'static,
    {
        let listener: Listener<T> = Arc::new(listener);
        let (id, snapshot) = {
            let mut inner = lock(&self.inner);
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, listener.clone()));
            (id, inner.current.clone())
        };
        if let Some(current) = snapshot {
            listener(current.as_ref());
        }

        let weak = Arc::downgrade(&self.inner);
        Subscription {
            detach: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    lock(&inner).listeners.retain(|(lid, _)| *lid != id);
                }
            })),
        }
    }

    /// Record a new identity (or sign-out) and notify every listener.
    pub fn publish(&self, identity: Option<T>) {
        let listeners: Vec<Listener<T>> = {
            let mut inner = lock(&self.inner);
            inner.current = Some(identity.clone());
            inner.listeners.iter().map(|(_, l)| l.clone()).collect()
        };
        for listener in listeners {
            listener(identity.as_ref());
        }
    }

    /// Last published identity; `None` while still unknown.
    pub fn current(&self) -> Option<Option<T>> {
        lock(&self.inner).current.clone()
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.inner).listeners.len()
    }
}

/// Handle returned by [`IdentityHub::subscribe`]; detaches on drop.
pub struct Subscription {
    detach: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn cancel(mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn listener_sees_published_identity() {
        let hub: IdentityHub<String> = IdentityHub::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _sub = hub.subscribe(move |who| sink.lock().unwrap().push(who.cloned()));

        hub.publish(Some("asha@example.org".to_string()));
        hub.publish(None);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![Some("asha@example.org".to_string()), None]
        );
    }

    #[test]
    fn late_subscriber_gets_current_state_immediately() {
        let hub: IdentityHub<String> = IdentityHub::new();
        hub.publish(Some("ngo@example.org".to_string()));

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let _sub = hub.subscribe(move |who| {
            assert_eq!(who.map(String::as_str), Some("ngo@example.org"));
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropping_subscription_detaches_listener() {
        let hub: IdentityHub<u32> = IdentityHub::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let sub = hub.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(hub.listener_count(), 1);

        drop(sub);
        assert_eq!(hub.listener_count(), 0);

        hub.publish(Some(7));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn cancel_detaches_only_its_own_listener() {
        let hub: IdentityHub<u32> = IdentityHub::new();
        let first = hub.subscribe(|_| {});
        let _second = hub.subscribe(|_| {});
        first.cancel();
        assert_eq!(hub.listener_count(), 1);
    }

    #[test]
    fn current_is_unknown_until_first_publish() {
        let hub: IdentityHub<u32> = IdentityHub::new();
        assert_eq!(hub.current(), None);
        hub.publish(None);
        assert_eq!(hub.current(), Some(None));
    }
}
