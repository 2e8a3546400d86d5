//! Observable stores
//!
//! A [`Store`] owns a value and a set of subscribers. Every write notifies each
//! subscriber synchronously, in registration order, before the write returns.

use std::fmt;

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Subscription Key
    pub struct SubscriptionKey;
}

/// Callback invoked with the current store value.
pub type Subscriber<T> = Box<dyn FnMut(&T) + Send>;

/// Writable observable value.
pub struct Store<T> {
    value: T,
    subscribers: SlotMap<SubscriptionKey, Subscriber<T>>,
}

impl<T> Store<T> {
    /// Create a new store holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            value,
            subscribers: SlotMap::with_key(),
        }
    }

    /// Returns the current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value and notify subscribers.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.notify();
    }

    /// Mutate the value in place and notify subscribers.
    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.value);
        self.notify();
    }

    /// Register a subscriber.
    ///
    /// The subscriber is called immediately with the current value, then after
    /// every write until it is removed with [`Store::unsubscribe`].
    pub fn subscribe<F>(&mut self, mut subscriber: F) -> SubscriptionKey
    where
        F: FnMut(&T) + Send + 'static,
    {
        subscriber(&self.value);

        self.subscribers.insert(Box::new(subscriber))
    }

    /// Register a subscriber to a value derived from the store.
    ///
    /// The subscriber receives the derived value immediately and afterwards only
    /// when a write changes it.
    pub fn derive<U, M, F>(&mut self, map: M, mut subscriber: F) -> SubscriptionKey
    where
        U: PartialEq + Send + 'static,
        M: Fn(&T) -> U + Send + 'static,
        F: FnMut(&U) + Send + 'static,
    {
        let mut last: Option<U> = None;

        self.subscribe(move |value| {
            let next = map(value);

            if last.as_ref() != Some(&next) {
                subscriber(&next);
                last = Some(next);
            }
        })
    }

    /// Remove a subscriber. Returns `false` if the key was not registered.
    pub fn unsubscribe(&mut self, key: SubscriptionKey) -> bool {
        self.subscribers.remove(key).is_some()
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn notify(&mut self) {
        for subscriber in self.subscribers.values_mut() {
            subscriber(&self.value);
        }
    }
}

impl<T: Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("value", &self.value)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn recorder<T: Clone + Send + 'static>() -> (Arc<Mutex<Vec<T>>>, impl FnMut(&T) + Send + 'static)
    {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        (seen, move |value: &T| {
            if let Ok(mut seen) = sink.lock() {
                seen.push(value.clone());
            }
        })
    }

    fn snapshot<T: Clone>(seen: &Arc<Mutex<Vec<T>>>) -> Vec<T> {
        seen.lock().map(|seen| seen.clone()).unwrap_or_default()
    }

    #[test]
    fn subscribe_receives_current_value_then_writes() {
        let mut store = Store::new(1);
        let (seen, subscriber) = recorder();

        store.subscribe(subscriber);
        store.set(2);
        store.update(|value| *value += 10);

        assert_eq!(snapshot(&seen), vec![1, 2, 12]);
        assert_eq!(*store.get(), 12);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut store = Store::new(0);
        let (seen, subscriber) = recorder();

        let key = store.subscribe(subscriber);

        assert!(store.unsubscribe(key), "first unsubscribe should remove");
        assert!(!store.unsubscribe(key), "second unsubscribe should be a no-op");

        store.set(5);

        assert_eq!(snapshot(&seen), vec![0]);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn derive_only_notifies_on_change() {
        let mut store = Store::new(0_u32);
        let (seen, subscriber) = recorder();

        store.derive(|value| *value > 2, subscriber);

        store.set(1);
        store.set(2);
        store.set(3);
        store.set(4);
        store.set(0);

        assert_eq!(snapshot(&seen), vec![false, true, false]);
    }
}
