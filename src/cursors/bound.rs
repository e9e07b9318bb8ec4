//! Cursor lifetime
//!
//! A [`BoundCursor`] owns a cursor together with its bindings and its
//! converter dependency registrations, and releases all of them at once.

use std::fmt;

use crate::display::{Cursor, CursorSnapshot};
use crate::reactive::{Binding, DependencyRegistrar};

/// A cursor together with everything that keeps it in sync.
///
/// This is the unit handed to the rendering layer and the unit that is torn
/// down when the cursor goes away: disposing (or dropping) it disposes every
/// binding and unregisters every converter dependency.
pub struct BoundCursor {
    label: String,
    cursor: Cursor,
    bindings: Vec<Binding>,
    dependencies: DependencyRegistrar,
    disposed: bool,
}

impl BoundCursor {
    pub fn new(
        label: impl Into<String>,
        cursor: Cursor,
        bindings: Vec<Binding>,
        dependencies: DependencyRegistrar,
    ) -> Self {
        Self {
            label: label.into(),
            cursor,
            bindings,
            dependencies,
            disposed: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Influencing objects of the cursor's converters
    pub fn dependencies(&self) -> &DependencyRegistrar {
        &self.dependencies
    }

    /// Evaluate the cursor for one redraw
    pub fn snapshot(&self) -> CursorSnapshot {
        self.cursor.snapshot()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Release every subscription. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        for binding in &mut self.bindings {
            binding.dispose();
        }
        self.dependencies.unregister_all();
        self.disposed = true;
        tracing::debug!(cursor = %self.label, "Cursor disposed");
    }
}

impl Drop for BoundCursor {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for BoundCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundCursor")
            .field("label", &self.label)
            .field("bindings", &self.bindings)
            .field("dependencies", &self.dependencies)
            .field("disposed", &self.disposed)
            .finish()
    }
}
