//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use std::cell::Cell;
use std::rc::Rc;

use scopeview_rs::reactive::{ObservableSource, Subscription};

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}

/// Counts change notifications of a source
pub struct NotificationCounter {
    count: Rc<Cell<usize>>,
    _subscription: Subscription,
}

impl NotificationCounter {
    pub fn watch(source: &dyn ObservableSource) -> Self {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let subscription = source.watch(Rc::new(move || c.set(c.get() + 1)));
        Self {
            count,
            _subscription: subscription,
        }
    }

    pub fn count(&self) -> usize {
        self.count.get()
    }
}
