//! Lock-protected attribute values.
//!
//! Rows and sections are shared through `Arc`, so their mutable attributes
//! (heights, flags, titles, element counts) live in a [`Property`] and are
//! changed through `&self`. [`Property::set`] reports whether the value moved,
//! which lets callers skip logging and notifications for no-op writes.
//!
//! ```
//! use terrace_core::Property;
//!
//! let element_count = Property::new(1usize);
//! assert!(!element_count.set(1));
//! assert!(element_count.set(4));
//! assert_eq!(element_count.get(), 4);
//! ```

use parking_lot::RwLock;

/// A value readable and writable through a shared reference.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Wraps `value`.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// A clone of the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Overwrites the value without comparing.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Stores `value`, returning `true` if it differs from the old one.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current == value {
            return false;
        }
        *current = value;
        true
    }
}
