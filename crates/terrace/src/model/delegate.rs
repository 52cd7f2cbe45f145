//! The notification protocol between the form model and its observer.
//!
//! Every structural edit on a [`Form`] or [`Section`](super::Section) ends
//! with exactly one call into the form's [`FormDelegate`] (or none, when no
//! delegate is attached). Calls are synchronous: the delegate has returned
//! before the edit returns.
//!
//! # Re-entrancy
//!
//! No lock is held while a delegate method runs, so reading the form from a
//! notification is safe. Mutating the form or one of its sections from inside
//! a notification is not supported; the widget would receive index paths
//! computed against a layout that no longer exists.

use std::ops::Range;
use std::sync::Arc;

use terrace_core::Signal;

use super::form::Form;
use super::index::IndexPath;
use super::row::Row;

/// Receives structural-change notifications from a [`Form`].
///
/// Section payloads are contiguous ranges of section indexes. Row payloads
/// are flat index paths: insertions are reported against the layout after
/// the edit, removals against the layout before it.
pub trait FormDelegate: Send + Sync {
    /// Sections were inserted at these indexes.
    fn sections_added(&self, form: &Form, sections: Range<usize>);

    /// Sections were removed from these indexes.
    fn sections_removed(&self, form: &Form, sections: Range<usize>);

    /// Sections at these indexes changed in a way that needs a full reload
    /// of each section, such as a dynamic row being added or removed.
    fn sections_updated(&self, form: &Form, sections: Range<usize>);

    /// Flat rows were inserted.
    fn rows_added(&self, form: &Form, paths: &[IndexPath]);

    /// Flat rows were removed.
    fn rows_removed(&self, form: &Form, paths: &[IndexPath]);

    /// Flat rows were replaced in place.
    fn rows_updated(&self, form: &Form, paths: &[IndexPath]);

    /// The model cannot describe the change; reload everything.
    fn needs_full_reload(&self, form: &Form);

    /// A dynamic row entered the tree and its element kind must be
    /// registered with the widget under its reuse key.
    fn dynamic_row_needs_registration(&self, form: &Form, row: &Arc<Row>);
}

/// A [`FormDelegate`] that re-emits every notification through a [`Signal`].
///
/// Useful for observers that are not widgets, and for tests.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use parking_lot::Mutex;
/// use terrace::model::{Form, FormSignals, Section};
///
/// let form = Form::new();
/// let signals = Arc::new(FormSignals::new());
/// form.set_delegate(&signals);
///
/// let added = Arc::new(Mutex::new(Vec::new()));
/// let added_clone = added.clone();
/// signals.sections_added.connect(move |range| added_clone.lock().push(range.clone()));
///
/// form.append(Section::new());
/// assert_eq!(*added.lock(), vec![0..1]);
/// ```
pub struct FormSignals {
    /// Emitted after sections are inserted.
    pub sections_added: Signal<Range<usize>>,
    /// Emitted after sections are removed.
    pub sections_removed: Signal<Range<usize>>,
    /// Emitted after sections change wholesale.
    pub sections_updated: Signal<Range<usize>>,
    /// Emitted after flat rows are inserted.
    pub rows_added: Signal<Vec<IndexPath>>,
    /// Emitted after flat rows are removed.
    pub rows_removed: Signal<Vec<IndexPath>>,
    /// Emitted after flat rows are replaced.
    pub rows_updated: Signal<Vec<IndexPath>>,
    /// Emitted when the whole form must be reloaded.
    pub needs_full_reload: Signal<()>,
    /// Emitted when a dynamic row enters the tree.
    pub dynamic_row_needs_registration: Signal<Arc<Row>>,
}

impl Default for FormSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSignals {
    /// Creates a new set of form signals.
    pub fn new() -> Self {
        Self {
            sections_added: Signal::new(),
            sections_removed: Signal::new(),
            sections_updated: Signal::new(),
            rows_added: Signal::new(),
            rows_removed: Signal::new(),
            rows_updated: Signal::new(),
            needs_full_reload: Signal::new(),
            dynamic_row_needs_registration: Signal::new(),
        }
    }

    /// Blocks or unblocks every signal at once.
    pub fn set_blocked(&self, blocked: bool) {
        self.sections_added.set_blocked(blocked);
        self.sections_removed.set_blocked(blocked);
        self.sections_updated.set_blocked(blocked);
        self.rows_added.set_blocked(blocked);
        self.rows_removed.set_blocked(blocked);
        self.rows_updated.set_blocked(blocked);
        self.needs_full_reload.set_blocked(blocked);
        self.dynamic_row_needs_registration.set_blocked(blocked);
    }
}

impl FormDelegate for FormSignals {
    fn sections_added(&self, _form: &Form, sections: Range<usize>) {
        self.sections_added.emit(sections);
    }

    fn sections_removed(&self, _form: &Form, sections: Range<usize>) {
        self.sections_removed.emit(sections);
    }

    fn sections_updated(&self, _form: &Form, sections: Range<usize>) {
        self.sections_updated.emit(sections);
    }

    fn rows_added(&self, _form: &Form, paths: &[IndexPath]) {
        self.rows_added.emit(paths.to_vec());
    }

    fn rows_removed(&self, _form: &Form, paths: &[IndexPath]) {
        self.rows_removed.emit(paths.to_vec());
    }

    fn rows_updated(&self, _form: &Form, paths: &[IndexPath]) {
        self.rows_updated.emit(paths.to_vec());
    }

    fn needs_full_reload(&self, _form: &Form) {
        self.needs_full_reload.emit(());
    }

    fn dynamic_row_needs_registration(&self, _form: &Form, row: &Arc<Row>) {
        self.dynamic_row_needs_registration.emit(row.clone());
    }
}
