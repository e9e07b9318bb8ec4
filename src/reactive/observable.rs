//! Observable properties and change notification
//!
//! [`ObservableProperty<T>`] is a shared, mutable value that synchronously
//! notifies its subscribers on every write. Writes are never deduplicated:
//! setting a property to its current value still notifies.
//!
//! [`ChangeNotifier`] is the object-level counterpart: a viewmodel owns one
//! and every property created with [`ObservableProperty::owned_by`] raises it
//! (with the property name) after the property's own subscribers have run.
//! Subscribing to a notifier therefore means "tell me when anything on this
//! object changes", which is what dependency registration needs.
//!
//! # Invariants
//!
//! 1. Subscribers run in registration order, depth-first, before `set`
//!    returns.
//! 2. No internal borrow is held while a callback runs, so callbacks may
//!    read or write any property (including the one that notified).
//! 3. A subscription removed during a notification cycle does not fire for
//!    the remainder of that cycle.
//! 4. Dropping a [`Subscription`] removes its callback.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Identifier of one subscription on one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle returned by every `subscribe`/`watch` call.
///
/// Dropping the handle (or calling [`Subscription::unsubscribe`]) removes the
/// callback from its source. If the source is already gone this is a no-op.
#[must_use = "dropping a Subscription immediately unsubscribes its callback"]
pub struct Subscription {
    id: SubscriptionId,
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Identifier of this subscription on its source
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Remove the callback from its source now
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.detach.is_some())
            .finish()
    }
}

struct SubscriberList<A: ?Sized> {
    next_id: u64,
    entries: Vec<(SubscriptionId, Rc<dyn Fn(&A)>)>,
}

/// Ordered callback list shared by properties and notifiers.
struct Subscribers<A: ?Sized + 'static> {
    list: Rc<RefCell<SubscriberList<A>>>,
}

impl<A: ?Sized + 'static> Subscribers<A> {
    fn new() -> Self {
        Self {
            list: Rc::new(RefCell::new(SubscriberList {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    fn add(&self, callback: Rc<dyn Fn(&A)>) -> Subscription {
        let id = {
            let mut list = self.list.borrow_mut();
            let id = SubscriptionId(list.next_id);
            list.next_id += 1;
            list.entries.push((id, callback));
            id
        };

        let weak: Weak<RefCell<SubscriberList<A>>> = Rc::downgrade(&self.list);
        Subscription {
            id,
            detach: Some(Box::new(move || {
                if let Some(list) = weak.upgrade() {
                    list.borrow_mut().entries.retain(|(entry, _)| *entry != id);
                }
            })),
        }
    }

    fn remove(&self, id: SubscriptionId) -> bool {
        let mut list = self.list.borrow_mut();
        let before = list.entries.len();
        list.entries.retain(|(entry, _)| *entry != id);
        list.entries.len() != before
    }

    fn contains(&self, id: SubscriptionId) -> bool {
        self.list.borrow().entries.iter().any(|(entry, _)| *entry == id)
    }

    fn len(&self) -> usize {
        self.list.borrow().entries.len()
    }

    fn notify(&self, arg: &A) {
        // Snapshot so callbacks can subscribe, unsubscribe or write freely.
        let snapshot: Vec<(SubscriptionId, Rc<dyn Fn(&A)>)> =
            self.list.borrow().entries.clone();
        for (id, callback) in snapshot {
            if self.contains(id) {
                callback(arg);
            }
        }
    }
}

/// Anything whose changes can be watched without caring about the value.
///
/// Implemented by properties, notifiers and the viewmodels, this is the
/// "influencing object" seam used by
/// [`DependencyRegistrar`](super::DependencyRegistrar) and by binding
/// endpoints.
pub trait ObservableSource {
    /// Human-readable name used in logs and dependency listings
    fn label(&self) -> String;

    /// Invoke `callback` after every change of this source
    fn watch(&self, callback: Rc<dyn Fn()>) -> Subscription;
}

struct NotifierInner {
    label: String,
    subscribers: Subscribers<str>,
}

/// Object-level "property changed" event.
///
/// Clones share the same subscriber list.
#[derive(Clone)]
pub struct ChangeNotifier {
    inner: Rc<NotifierInner>,
}

impl ChangeNotifier {
    /// Create a notifier for the object called `label`
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(NotifierInner {
                label: label.into(),
                subscribers: Subscribers::new(),
            }),
        }
    }

    /// Subscribe to change events; the callback receives the property name
    pub fn subscribe(&self, callback: impl Fn(&str) + 'static) -> Subscription {
        self.inner.subscribers.add(Rc::new(callback))
    }

    /// Remove a subscription by id. Returns whether it was present.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.subscribers.remove(id)
    }

    /// Raise a change event for `property`
    pub fn raise(&self, property: &str) {
        self.inner.subscribers.notify(property);
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.len()
    }

    /// Name of the owning object
    pub fn name(&self) -> &str {
        &self.inner.label
    }
}

impl ObservableSource for ChangeNotifier {
    fn label(&self) -> String {
        self.inner.label.clone()
    }

    fn watch(&self, callback: Rc<dyn Fn()>) -> Subscription {
        self.subscribe(move |_| callback())
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("label", &self.inner.label)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

struct PropertyInner<T: 'static> {
    name: String,
    value: RefCell<T>,
    subscribers: Subscribers<T>,
    owner: Option<ChangeNotifier>,
}

/// A named value that notifies subscribers synchronously on every write.
///
/// Clones are handles to the same property.
pub struct ObservableProperty<T: 'static> {
    inner: Rc<PropertyInner<T>>,
}

impl<T: 'static> Clone for ObservableProperty<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> ObservableProperty<T> {
    /// Create a free-standing property
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self::build(name.into(), value, None)
    }

    /// Create a property that also raises `owner` after each write
    pub fn owned_by(owner: &ChangeNotifier, name: impl Into<String>, value: T) -> Self {
        Self::build(name.into(), value, Some(owner.clone()))
    }

    fn build(name: String, value: T, owner: Option<ChangeNotifier>) -> Self {
        Self {
            inner: Rc::new(PropertyInner {
                name,
                value: RefCell::new(value),
                subscribers: Subscribers::new(),
                owner,
            }),
        }
    }

    /// Current value
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Run `f` on a snapshot of the current value. `f` may write the
    /// property; it keeps seeing the snapshot.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let value = self.get();
        f(&value)
    }

    /// Store `value` and notify every subscriber, then the owner
    pub fn set(&self, value: T) {
        let notified = value.clone();
        *self.inner.value.borrow_mut() = value;
        self.inner.subscribers.notify(&notified);
        if let Some(owner) = &self.inner.owner {
            owner.raise(&self.inner.name);
        }
    }

    /// Modify the value in place, then notify as [`set`](Self::set) does
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut value = self.get();
        f(&mut value);
        self.set(value);
    }

    /// Subscribe to value changes
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.inner.subscribers.add(Rc::new(callback))
    }

    /// Remove a subscription by id. Returns whether it was present.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.subscribers.remove(id)
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.len()
    }

    /// Property name
    pub fn name(&self) -> &str {
        &self.inner.name
    }
}

impl<T: Clone + 'static> ObservableSource for ObservableProperty<T> {
    fn label(&self) -> String {
        match &self.inner.owner {
            Some(owner) => format!("{}.{}", owner.name(), self.inner.name),
            None => self.inner.name.clone(),
        }
    }

    fn watch(&self, callback: Rc<dyn Fn()>) -> Subscription {
        self.subscribe(move |_| callback())
    }
}

impl<T: Clone + fmt::Debug + 'static> fmt::Debug for ObservableProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableProperty")
            .field("name", &self.inner.name)
            .field("value", &*self.inner.value.borrow())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
