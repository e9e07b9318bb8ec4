//! Declarative two-way bindings
//!
//! A [`Binding`] is a standing rule made of one or more equality
//! [`Constraint`]s, each tying two [`Endpoint`]s together. An endpoint is a
//! small typed description of a value: how to read it, how to write it and
//! how to watch it for changes. Typical cursor binding:
//!
//! ```text
//! cursor.position.x == converter.derived   &&   converter.original == vm.value
//! ```
//!
//! # Propagation
//!
//! On creation every constraint is evaluated right-to-left once, last
//! constraint first, so a chain settles in a single pass. Afterwards a
//! change notification on either endpoint of a constraint writes the
//! changed side's value into the other side.
//!
//! # Cycle guard
//!
//! The binding remembers which endpoint started the current propagation pass
//! (the *origin*). Within that pass it never writes into the origin. Any
//! other endpoint is written whenever it does not already hold the value,
//! so echoes of a binding's own writes stop at the first comparison while a
//! value changed by someone else mid-pass (a clamp, say) still propagates.
//! There is no global lock: writes cascade freely into other constraints
//! and other bindings, and each binding applies the same rule
//! independently.
//!
//! # State machine
//!
//! `Uninitialized -> Established -> Propagating(origin) -> Established`,
//! until [`Binding::dispose`] (or drop) moves it to `Disposed` and releases
//! every subscription.

use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::converter::{ConverterSide, ValueConverter};
use super::observable::{ObservableProperty, ObservableSource, Subscription};
use crate::error::{Result, ScopeError};

type Watcher = Rc<dyn Fn(Rc<dyn Fn()>) -> Subscription>;

/// A readable, writable, watchable value taking part in a constraint.
pub struct Endpoint<T: 'static> {
    label: String,
    getter: Rc<dyn Fn() -> T>,
    setter: Rc<dyn Fn(T)>,
    watcher: Watcher,
}

impl<T: 'static> Clone for Endpoint<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            getter: Rc::clone(&self.getter),
            setter: Rc::clone(&self.setter),
            watcher: Rc::clone(&self.watcher),
        }
    }
}

impl<T: Clone + 'static> Endpoint<T> {
    /// Build an endpoint from accessor functions and the source whose
    /// changes affect the value.
    pub fn new<S>(
        label: impl Into<String>,
        getter: impl Fn() -> T + 'static,
        setter: impl Fn(T) + 'static,
        source: S,
    ) -> Self
    where
        S: ObservableSource + 'static,
    {
        Self {
            label: label.into(),
            getter: Rc::new(getter),
            setter: Rc::new(setter),
            watcher: Rc::new(move |callback| source.watch(callback)),
        }
    }

    /// Endpoint reading and writing a whole property
    pub fn property(property: &ObservableProperty<T>) -> Self {
        let get = property.clone();
        let set = property.clone();
        Self::new(
            property.label(),
            move || get.get(),
            move |value| set.set(value),
            property.clone(),
        )
    }

    /// Endpoint on a converter's derived value
    pub fn derived<O>(converter: &ValueConverter<O, T>) -> Self
    where
        O: Clone + Default + 'static,
    {
        Self::converter_side(converter.clone(), ConverterSide::Derived, move |conv| {
            let get = conv.clone();
            let set = conv;
            (
                Rc::new(move || get.derived()) as Rc<dyn Fn() -> T>,
                Rc::new(move |value| set.set_derived(value)) as Rc<dyn Fn(T)>,
            )
        })
    }

    fn converter_side<O, D, F>(converter: ValueConverter<O, D>, side: ConverterSide, accessors: F) -> Self
    where
        O: Clone + Default + 'static,
        D: Clone + 'static,
        F: FnOnce(ValueConverter<O, D>) -> (Rc<dyn Fn() -> T>, Rc<dyn Fn(T)>),
    {
        let watched = converter.clone();
        let label = format!("converter{:?}.{}", converter.id(), side);
        let (getter, setter) = accessors(converter);
        Self {
            label,
            getter,
            setter,
            watcher: Rc::new(move |callback| watched.watch_side(side, callback)),
        }
    }

    /// Current value
    pub fn get(&self) -> T {
        (self.getter)()
    }

    /// Write a value
    pub fn set(&self, value: T) {
        (self.setter)(value)
    }

    /// Name used in logs
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<T: Clone + Default + 'static> Endpoint<T> {
    /// Endpoint on a converter's original value
    pub fn original<D>(converter: &ValueConverter<T, D>) -> Self
    where
        D: Clone + 'static,
    {
        Self::converter_side(converter.clone(), ConverterSide::Original, move |conv| {
            let get = conv.clone();
            let set = conv;
            (
                Rc::new(move || get.original()) as Rc<dyn Fn() -> T>,
                Rc::new(move |value| set.set_original(value)) as Rc<dyn Fn(T)>,
            )
        })
    }
}

impl<T: 'static> fmt::Debug for Endpoint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint").field("label", &self.label).finish()
    }
}

/// One side of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Identifies one endpoint within a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointRef {
    /// Index of the constraint within its binding
    pub constraint: usize,
    /// Which side of that constraint
    pub side: Side,
}

/// Type-erased equality between two endpoints of the same value type.
pub struct Constraint {
    left_label: String,
    right_label: String,
    assign_left: Rc<dyn Fn()>,
    assign_right: Rc<dyn Fn()>,
    watch_left: Watcher,
    watch_right: Watcher,
}

impl Constraint {
    /// `left == right`
    pub fn equal<T: Clone + PartialEq + 'static>(left: Endpoint<T>, right: Endpoint<T>) -> Self {
        let (l, r) = (left.clone(), right.clone());
        let assign_left = Rc::new(move || assign_if_changed(&l, r.get()));
        let (l, r) = (left.clone(), right.clone());
        let assign_right = Rc::new(move || assign_if_changed(&r, l.get()));
        Self {
            left_label: left.label,
            right_label: right.label,
            assign_left,
            assign_right,
            watch_left: left.watcher,
            watch_right: right.watcher,
        }
    }

    fn assign_from(&self, changed: Side) {
        match changed {
            Side::Left => (self.assign_right)(),
            Side::Right => (self.assign_left)(),
        }
    }

    fn label(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.left_label,
            Side::Right => &self.right_label,
        }
    }
}

fn assign_if_changed<T: Clone + PartialEq + 'static>(target: &Endpoint<T>, value: T) {
    if !same_value(&target.get(), &value) {
        target.set(value);
    }
}

/// `==`, except that two values unequal to themselves (NaN) count as the same
#[allow(clippy::eq_op)]
fn same_value<T: PartialEq>(a: &T, b: &T) -> bool {
    a == b || (a != a && b != b)
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} == {}", self.left_label, self.right_label)
    }
}

/// Lifecycle of a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    Uninitialized,
    Established,
    Propagating(EndpointRef),
    Disposed,
}

struct BindingCore {
    label: String,
    constraints: Vec<Constraint>,
    state: Cell<BindingState>,
}

/// Enters a propagation pass; restores `Established` when the outermost
/// pass ends, including on unwind.
struct PassGuard<'a> {
    state: &'a Cell<BindingState>,
    outermost: bool,
}

impl<'a> PassGuard<'a> {
    fn enter(state: &'a Cell<BindingState>, origin: EndpointRef) -> Self {
        let outermost = state.get() == BindingState::Established;
        if outermost {
            state.set(BindingState::Propagating(origin));
        }
        Self { state, outermost }
    }
}

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        if self.outermost && matches!(self.state.get(), BindingState::Propagating(_)) {
            self.state.set(BindingState::Established);
        }
    }
}

impl BindingCore {
    fn on_changed(&self, index: usize, changed: Side) {
        let target = EndpointRef {
            constraint: index,
            side: changed.opposite(),
        };
        let constraint = &self.constraints[index];

        match self.state.get() {
            BindingState::Uninitialized | BindingState::Disposed => return,
            BindingState::Propagating(origin) if origin == target => {
                tracing::trace!(
                    binding = %self.label,
                    endpoint = constraint.label(target.side),
                    "Suppressed write-back into propagation origin"
                );
                return;
            }
            _ => {}
        }

        let _pass = PassGuard::enter(
            &self.state,
            EndpointRef {
                constraint: index,
                side: changed,
            },
        );
        tracing::trace!(
            binding = %self.label,
            from = constraint.label(changed),
            to = constraint.label(target.side),
            "Propagating"
        );
        constraint.assign_from(changed);
    }

    /// Evaluate every constraint right-to-left, last constraint first.
    fn assert_all(&self) {
        for index in (0..self.constraints.len()).rev() {
            let _pass = PassGuard::enter(
                &self.state,
                EndpointRef {
                    constraint: index,
                    side: Side::Right,
                },
            );
            self.constraints[index].assign_from(Side::Right);
        }
    }
}

/// A standing equality rule between endpoints.
///
/// Dropping the binding disposes it.
pub struct Binding {
    core: Rc<BindingCore>,
    subscriptions: Vec<Subscription>,
}

impl Binding {
    /// Create and establish a binding from a conjunction of constraints
    pub fn create(label: impl Into<String>, constraints: Vec<Constraint>) -> Self {
        let label = label.into();
        let core = Rc::new(BindingCore {
            label,
            constraints,
            state: Cell::new(BindingState::Uninitialized),
        });

        // Initial evaluation runs before any subscription exists, so it
        // cannot re-enter this binding.
        core.state.set(BindingState::Established);
        core.assert_all();

        let mut subscriptions = Vec::with_capacity(core.constraints.len() * 2);
        for (index, constraint) in core.constraints.iter().enumerate() {
            for (side, watch) in [
                (Side::Left, &constraint.watch_left),
                (Side::Right, &constraint.watch_right),
            ] {
                let weak: Weak<BindingCore> = Rc::downgrade(&core);
                subscriptions.push(watch(Rc::new(move || {
                    if let Some(core) = weak.upgrade() {
                        core.on_changed(index, side);
                    }
                })));
            }
        }

        tracing::debug!(
            binding = %core.label,
            constraints = ?core.constraints,
            "Binding established"
        );
        Self {
            core,
            subscriptions,
        }
    }

    /// Shorthand for a binding with a single constraint
    pub fn equate<T: Clone + PartialEq + 'static>(
        label: impl Into<String>,
        left: Endpoint<T>,
        right: Endpoint<T>,
    ) -> Self {
        Self::create(label, vec![Constraint::equal(left, right)])
    }

    /// Re-evaluate every constraint right-to-left with the subscriptions live
    pub fn reassert(&self) -> Result<()> {
        if self.is_disposed() {
            return Err(ScopeError::BindingDisposed);
        }
        self.core.assert_all();
        Ok(())
    }

    /// Current lifecycle state
    pub fn state(&self) -> BindingState {
        self.core.state.get()
    }

    /// Whether the binding has been disposed
    pub fn is_disposed(&self) -> bool {
        self.state() == BindingState::Disposed
    }

    /// Name used in logs
    pub fn label(&self) -> &str {
        &self.core.label
    }

    /// Number of constraints in the binding
    pub fn constraint_count(&self) -> usize {
        self.core.constraints.len()
    }

    /// Number of live subscriptions held by the binding
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Unsubscribe from every endpoint. Idempotent.
    pub fn dispose(&mut self) {
        if self.is_disposed() {
            return;
        }
        self.core.state.set(BindingState::Disposed);
        self.subscriptions.clear();
        tracing::debug!(binding = %self.core.label, "Binding disposed");
    }
}

impl Drop for Binding {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("label", &self.core.label)
            .field("state", &self.state())
            .field("constraints", &self.core.constraints)
            .finish()
    }
}
