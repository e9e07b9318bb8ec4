//! Multi-source invalidation for converters
//!
//! A converter's forward function reads parameters (scale factor, reference
//! position) that live on other objects. [`DependencyRegistrar`] keeps an
//! explicit, enumerable list of those *influencing objects* per converter
//! and subscribes each one so that any change invalidates the converter's
//! derived value. The invalidation notifies the converter's derived-side
//! listeners, which makes every binding on it re-assert its constraint.
//!
//! Registrations are independent: the same influencing object registered for
//! two converters gets two subscriptions, and unregistering one converter
//! leaves the other's in place.

use std::fmt;
use std::rc::Rc;

use super::converter::{ConverterId, ConverterSide, ValueConverter};
use super::observable::{ObservableSource, Subscription};

struct Registration {
    converter: ConverterId,
    source: String,
    _subscription: Subscription,
}

/// Owns the influencing-object subscriptions of one or more converters.
#[derive(Default)]
pub struct DependencyRegistrar {
    registrations: Vec<Registration>,
}

impl DependencyRegistrar {
    /// Create an empty registrar
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate `converter` whenever any of `sources` changes
    pub fn register<O, D>(&mut self, converter: &ValueConverter<O, D>, sources: &[&dyn ObservableSource])
    where
        O: Clone + Default + 'static,
        D: Clone + 'static,
    {
        for source in sources {
            let weak = converter.downgrade();
            let subscription = source.watch(Rc::new(move || {
                if let Some(converter) = weak.upgrade() {
                    converter.invalidate_side(ConverterSide::Derived);
                }
            }));
            self.registrations.push(Registration {
                converter: converter.id(),
                source: source.label(),
                _subscription: subscription,
            });
        }

        tracing::debug!(
            converter = ?converter.id(),
            sources = ?sources.iter().map(|s| s.label()).collect::<Vec<_>>(),
            "Registered converter dependencies"
        );
    }

    /// Remove every subscription registered for `converter`.
    /// Returns how many were removed.
    pub fn unregister<O, D>(&mut self, converter: &ValueConverter<O, D>) -> usize
    where
        O: Clone + Default + 'static,
        D: Clone + 'static,
    {
        let id = converter.id();
        let before = self.registrations.len();
        self.registrations.retain(|r| r.converter != id);
        let removed = before - self.registrations.len();
        tracing::debug!(converter = ?id, removed, "Unregistered converter dependencies");
        removed
    }

    /// Remove every subscription
    pub fn unregister_all(&mut self) {
        if !self.registrations.is_empty() {
            tracing::debug!(
                count = self.registrations.len(),
                "Unregistering all converter dependencies"
            );
        }
        self.registrations.clear();
    }

    /// Labels of the registered influencing objects, in registration order
    pub fn sources(&self) -> Vec<&str> {
        self.registrations.iter().map(|r| r.source.as_str()).collect()
    }

    /// Number of live subscriptions
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl fmt::Debug for DependencyRegistrar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyRegistrar")
            .field("sources", &self.sources())
            .finish()
    }
}
