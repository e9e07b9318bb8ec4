//! Reactive binding kernel
//!
//! The pieces, leaf-first:
//!
//! - [`ObservableProperty`] / [`ChangeNotifier`]: values and objects that
//!   notify subscribers synchronously on every write
//! - [`ValueConverter`]: forward/inverse function pair with lazy,
//!   invalidatable caching of both sides
//! - [`Binding`]: standing equality constraints between [`Endpoint`]s with
//!   last-writer suppression
//! - [`DependencyRegistrar`]: explicit influencing-object lists that
//!   invalidate converters
//!
//! Everything here is single-threaded (`Rc`/`Cell`/`RefCell`) and meant to
//! live on the UI thread. A write returns only after its whole cascade has
//! settled.

pub mod binding;
pub mod converter;
pub mod dependency;
pub mod observable;

pub use binding::{Binding, BindingState, Constraint, Endpoint, EndpointRef, Side};
pub use converter::{ConverterId, ConverterSide, ValueConverter, WeakValueConverter};
pub use dependency::DependencyRegistrar;
pub use observable::{
    ChangeNotifier, ObservableProperty, ObservableSource, Subscription, SubscriptionId,
};
