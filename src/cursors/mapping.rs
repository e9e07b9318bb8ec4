//! Linear value-to-screen mapping
//!
//! ```text
//! position = (value - reference_value) * scale + reference_position
//! value    = (position - reference_position) / scale + reference_value
//! ```
//!
//! All three parameters are read through providers on every evaluation, so
//! the mapping always reflects the current viewmodel state.

use std::fmt;
use std::rc::Rc;

use super::ValueProvider;
use crate::config::InvalidValuePolicy;
use crate::reactive::ValueConverter;

#[derive(Clone)]
pub struct LinearMapping {
    scale: ValueProvider,
    reference_position: ValueProvider,
    reference_value: ValueProvider,
}

impl LinearMapping {
    pub fn new(
        scale: impl Fn() -> f64 + 'static,
        reference_position: impl Fn() -> f64 + 'static,
        reference_value: impl Fn() -> f64 + 'static,
    ) -> Self {
        Self::from_providers(Rc::new(scale), Rc::new(reference_position), Rc::new(reference_value))
    }

    pub fn from_providers(
        scale: ValueProvider,
        reference_position: ValueProvider,
        reference_value: ValueProvider,
    ) -> Self {
        Self {
            scale,
            reference_position,
            reference_value,
        }
    }

    /// Domain value to screen position
    pub fn forward(&self, value: f64) -> f64 {
        (value - (self.reference_value)()) * (self.scale)() + (self.reference_position)()
    }

    /// Screen position to domain value
    pub fn inverse(&self, position: f64) -> f64 {
        ((position - (self.reference_position)()) / (self.scale)()) + (self.reference_value)()
    }

    /// Converter running this mapping. With [`InvalidValuePolicy::HoldLast`]
    /// non-finite results are rejected in both directions.
    pub fn into_converter(self, policy: InvalidValuePolicy) -> ValueConverter<f64, f64> {
        let forward = self.clone();
        let inverse = self;
        match policy {
            InvalidValuePolicy::Propagate => ValueConverter::new(
                move |v: &f64| forward.forward(*v),
                move |p: &f64| inverse.inverse(*p),
            ),
            InvalidValuePolicy::HoldLast => ValueConverter::guarded(
                move |v: &f64| forward.forward(*v),
                move |p: &f64| inverse.inverse(*p),
                |p: &f64| p.is_finite(),
                |v: &f64| v.is_finite(),
            ),
        }
    }
}

impl fmt::Debug for LinearMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinearMapping")
            .field("scale", &(self.scale)())
            .field("reference_position", &(self.reference_position)())
            .field("reference_value", &(self.reference_value)())
            .finish()
    }
}
