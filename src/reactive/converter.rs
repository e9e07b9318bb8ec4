//! Bidirectional value conversion with lazy, invalidatable caching
//!
//! A [`ValueConverter<O, D>`] pairs a forward function (`O -> D`, e.g. volts
//! to screen pixels) with its inverse. Exactly one side is authoritative at
//! any time: writing one side marks the other stale, and the stale side is
//! recomputed on its next read.
//!
//! The conversion functions usually close over *live* parameters (scale
//! factor, reference position) that the converter cannot see. When one of
//! those changes, [`ValueConverter::invalidate`] (or
//! [`ValueConverter::invalidate_side`]) forces a recompute even though
//! neither stored value changed, and notifies listeners of the recomputed
//! side so bindings can re-assert themselves.
//!
//! Both sides are observable through [`ValueConverter::original_source`] and
//! [`ValueConverter::derived_source`].

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use super::observable::{ChangeNotifier, ObservableSource, Subscription};

/// One of the two values held by a converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConverterSide {
    /// The domain value (volts, seconds)
    Original,
    /// The converted value (screen coordinate)
    Derived,
}

impl ConverterSide {
    /// The other side
    pub fn opposite(self) -> Self {
        match self {
            ConverterSide::Original => ConverterSide::Derived,
            ConverterSide::Derived => ConverterSide::Original,
        }
    }
}

impl fmt::Display for ConverterSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConverterSide::Original => write!(f, "OriginalValue"),
            ConverterSide::Derived => write!(f, "DerivedValue"),
        }
    }
}

/// Process-unique converter identity, used to scope dependency registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConverterId(u64);

thread_local! {
    static NEXT_CONVERTER_ID: Cell<u64> = const { Cell::new(0) };
}

fn next_converter_id() -> ConverterId {
    NEXT_CONVERTER_ID.with(|next| {
        let id = next.get();
        next.set(id + 1);
        ConverterId(id)
    })
}

struct ConverterState<O, D> {
    original: O,
    derived: Option<D>,
    original_stale: bool,
    derived_stale: bool,
    last_written: ConverterSide,
}

type Acceptor<T> = Box<dyn Fn(&T) -> bool>;

struct ConverterInner<O: 'static, D: 'static> {
    id: ConverterId,
    forward: Box<dyn Fn(&O) -> D>,
    inverse: Box<dyn Fn(&D) -> O>,
    accept_derived: Option<Acceptor<D>>,
    accept_original: Option<Acceptor<O>>,
    state: RefCell<ConverterState<O, D>>,
    original_changed: ChangeNotifier,
    derived_changed: ChangeNotifier,
}

/// Bidirectional converter between an original and a derived value.
///
/// Clones are handles to the same converter.
pub struct ValueConverter<O: 'static, D: 'static> {
    inner: Rc<ConverterInner<O, D>>,
}

impl<O: 'static, D: 'static> Clone for ValueConverter<O, D> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Non-owning converter handle.
pub struct WeakValueConverter<O: 'static, D: 'static> {
    inner: Weak<ConverterInner<O, D>>,
}

impl<O: 'static, D: 'static> WeakValueConverter<O, D> {
    /// Get a strong handle if the converter is still alive
    pub fn upgrade(&self) -> Option<ValueConverter<O, D>> {
        self.inner.upgrade().map(|inner| ValueConverter { inner })
    }
}

impl<O, D> ValueConverter<O, D>
where
    O: Clone + Default + 'static,
    D: Clone + 'static,
{
    /// Create a converter from a forward and an inverse function.
    ///
    /// The original value starts at `O::default()`; the derived value is
    /// computed on first read.
    pub fn new(
        forward: impl Fn(&O) -> D + 'static,
        inverse: impl Fn(&D) -> O + 'static,
    ) -> Self {
        Self::build(Box::new(forward), Box::new(inverse), None, None)
    }

    /// Create a converter that rejects recomputed values failing the
    /// acceptors, holding the previous value instead.
    ///
    /// A rejected value is only held back when a previous value exists.
    pub fn guarded(
        forward: impl Fn(&O) -> D + 'static,
        inverse: impl Fn(&D) -> O + 'static,
        accept_derived: impl Fn(&D) -> bool + 'static,
        accept_original: impl Fn(&O) -> bool + 'static,
    ) -> Self {
        Self::build(
            Box::new(forward),
            Box::new(inverse),
            Some(Box::new(accept_derived)),
            Some(Box::new(accept_original)),
        )
    }

    fn build(
        forward: Box<dyn Fn(&O) -> D>,
        inverse: Box<dyn Fn(&D) -> O>,
        accept_derived: Option<Acceptor<D>>,
        accept_original: Option<Acceptor<O>>,
    ) -> Self {
        Self {
            inner: Rc::new(ConverterInner {
                id: next_converter_id(),
                forward,
                inverse,
                accept_derived,
                accept_original,
                state: RefCell::new(ConverterState {
                    original: O::default(),
                    derived: None,
                    original_stale: false,
                    derived_stale: true,
                    last_written: ConverterSide::Original,
                }),
                original_changed: ChangeNotifier::new(ConverterSide::Original.to_string()),
                derived_changed: ChangeNotifier::new(ConverterSide::Derived.to_string()),
            }),
        }
    }

    /// Identity of this converter
    pub fn id(&self) -> ConverterId {
        self.inner.id
    }

    /// Non-owning handle, for callbacks that must not keep the converter alive
    pub fn downgrade(&self) -> WeakValueConverter<O, D> {
        WeakValueConverter {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Store a new original value and mark the derived value stale
    pub fn set_original(&self, value: O) {
        {
            let mut state = self.inner.state.borrow_mut();
            state.original = value;
            state.original_stale = false;
            state.derived_stale = true;
            state.last_written = ConverterSide::Original;
        }
        self.notify(ConverterSide::Original);
        self.notify(ConverterSide::Derived);
    }

    /// Store a new derived value and mark the original value stale
    pub fn set_derived(&self, value: D) {
        {
            let mut state = self.inner.state.borrow_mut();
            state.derived = Some(value);
            state.derived_stale = false;
            state.original_stale = true;
            state.last_written = ConverterSide::Derived;
        }
        self.notify(ConverterSide::Derived);
        self.notify(ConverterSide::Original);
    }

    /// Current original value, recomputed through the inverse function if stale
    pub fn original(&self) -> O {
        let derived = {
            let state = self.inner.state.borrow();
            if !state.original_stale {
                return state.original.clone();
            }
            match &state.derived {
                Some(derived) => derived.clone(),
                None => return state.original.clone(),
            }
        };

        // No borrow is held while user code runs.
        let computed = (self.inner.inverse)(&derived);

        let rejected = self
            .inner
            .accept_original
            .as_ref()
            .is_some_and(|accept| !accept(&computed));

        let mut state = self.inner.state.borrow_mut();
        if rejected {
            tracing::warn!(
                converter = ?self.inner.id,
                "Rejected recomputed original value, holding previous value"
            );
        } else {
            state.original = computed;
        }
        state.original_stale = false;
        state.original.clone()
    }

    /// Current derived value, recomputed through the forward function if stale
    pub fn derived(&self) -> D {
        let original = {
            let state = self.inner.state.borrow();
            if !state.derived_stale {
                if let Some(derived) = &state.derived {
                    return derived.clone();
                }
            }
            debug_assert!(!state.original_stale, "both converter sides are stale");
            state.original.clone()
        };

        let computed = (self.inner.forward)(&original);

        let rejected = self
            .inner
            .accept_derived
            .as_ref()
            .is_some_and(|accept| !accept(&computed));

        let mut state = self.inner.state.borrow_mut();
        let value = match state.derived.take() {
            Some(previous) if rejected => {
                tracing::warn!(
                    converter = ?self.inner.id,
                    "Rejected recomputed derived value, holding previous value"
                );
                previous
            }
            _ => computed,
        };
        state.derived = Some(value.clone());
        state.derived_stale = false;
        value
    }

    /// Side written most recently through `set_original`/`set_derived`
    pub fn last_written(&self) -> ConverterSide {
        self.inner.state.borrow().last_written
    }

    /// Whether the next read of `side` will recompute it
    pub fn is_stale(&self, side: ConverterSide) -> bool {
        let state = self.inner.state.borrow();
        match side {
            ConverterSide::Original => state.original_stale,
            ConverterSide::Derived => state.derived_stale,
        }
    }

    /// Force the side that was not just written to recompute on its next
    /// read, and notify its listeners.
    pub fn invalidate(&self) {
        let side = self.last_written().opposite();
        self.invalidate_side(side);
    }

    /// Force `side` to recompute on its next read, and notify its listeners.
    ///
    /// If the other side is itself stale it is materialized first, so the
    /// recompute starts from a current value.
    pub fn invalidate_side(&self, side: ConverterSide) {
        match side {
            ConverterSide::Derived => {
                if self.is_stale(ConverterSide::Original) {
                    self.original();
                }
                self.inner.state.borrow_mut().derived_stale = true;
            }
            ConverterSide::Original => {
                if self.is_stale(ConverterSide::Derived) {
                    self.derived();
                }
                self.inner.state.borrow_mut().original_stale = true;
            }
        }
        tracing::trace!(converter = ?self.inner.id, %side, "Converter invalidated");
        self.notify(side);
    }

    /// Change notifications for the original value
    pub fn original_source(&self) -> &ChangeNotifier {
        &self.inner.original_changed
    }

    /// Change notifications for the derived value
    pub fn derived_source(&self) -> &ChangeNotifier {
        &self.inner.derived_changed
    }

    /// Watch one side of the converter
    pub fn watch_side(&self, side: ConverterSide, callback: Rc<dyn Fn()>) -> Subscription {
        match side {
            ConverterSide::Original => self.inner.original_changed.watch(callback),
            ConverterSide::Derived => self.inner.derived_changed.watch(callback),
        }
    }

    fn notify(&self, side: ConverterSide) {
        let notifier = match side {
            ConverterSide::Original => &self.inner.original_changed,
            ConverterSide::Derived => &self.inner.derived_changed,
        };
        notifier.raise(notifier.name());
    }
}

impl<O: 'static, D: 'static> fmt::Debug for ValueConverter<O, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("ValueConverter")
            .field("id", &self.inner.id)
            .field("original_stale", &state.original_stale)
            .field("derived_stale", &state.derived_stale)
            .field("last_written", &state.last_written)
            .finish()
    }
}
