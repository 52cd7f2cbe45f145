//! The form: root of the section/row tree.
//!
//! A [`Form`] owns an ordered list of [`Section`]s and a weak reference to
//! its [`FormDelegate`]. Every structural edit on the form, or on one of its
//! sections, is reported to the delegate once the edit is complete.

use std::fmt;
use std::ops::Range;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use terrace_core::logging::targets;

use super::debug::FormTreeDebug;
use super::delegate::FormDelegate;
use super::index::section_run;
use super::iter::AllRows;
use super::row::Row;
use super::section::Section;

/// Supplies a form's initial content.
///
/// [`Form::with_layout`] calls [`initial_sections`](FormLayout::initial_sections)
/// and then [`prepare_targets`](FormLayout::prepare_targets) exactly once,
/// before any delegate can be attached.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use terrace::model::{Element, Form, FormLayout, Row, Section};
///
/// struct Label;
/// impl Element for Label {}
///
/// struct Settings;
///
/// impl FormLayout for Settings {
///     fn initial_sections(&self) -> Vec<Arc<Section>> {
///         vec![
///             Section::with_rows([Row::with_element(Label)]).with_header_title("General"),
///             Section::with_rows([Row::with_element(Label)]).with_header_title("About"),
///         ]
///     }
///
///     fn prepare_targets(&self, form: &Form) {
///         if let Some(row) = form.resolve(1, 0).map(|(row, _)| row) {
///             row.on_select(|| println!("about"));
///         }
///     }
/// }
///
/// let form = Form::with_layout(&Settings);
/// assert_eq!(form.len(), 2);
/// ```
pub trait FormLayout {
    /// A single section to start with. `None` by default.
    fn default_section(&self) -> Option<Arc<Section>> {
        None
    }

    /// The sections the form starts with. Defaults to the default section.
    fn initial_sections(&self) -> Vec<Arc<Section>> {
        self.default_section().into_iter().collect()
    }

    /// Wires callbacks once the initial sections are in place.
    fn prepare_targets(&self, _form: &Form) {}
}

/// The empty layout.
impl FormLayout for () {}

/// Root container of sections.
///
/// Forms are always shared (`Arc<Form>`); sections keep a weak reference
/// back to the form that holds them.
///
/// # Example
///
/// ```
/// use terrace::model::{Element, Form, Row, Section};
///
/// struct Label;
/// impl Element for Label {}
///
/// let form = Form::new();
/// form.append(Section::with_rows([Row::with_element(Label)]));
/// form.append(Section::with_rows([Row::dynamic::<Label>("items")]));
///
/// assert_eq!(form.len(), 2);
/// assert_eq!(form.all_dynamic_rows().len(), 1);
/// assert_eq!(form.rows().count(), 2);
/// ```
pub struct Form {
    this: Weak<Form>,
    sections: RwLock<Vec<Arc<Section>>>,
    delegate: RwLock<Option<Weak<dyn FormDelegate>>>,
}

impl Form {
    /// Creates an empty form.
    pub fn new() -> Arc<Self> {
        Self::with_layout(&())
    }

    /// Creates a form populated by `layout`.
    pub fn with_layout<L: FormLayout + ?Sized>(layout: &L) -> Arc<Self> {
        let form = Arc::new_cyclic(|this: &Weak<Form>| Self {
            this: this.clone(),
            sections: RwLock::new(Vec::new()),
            delegate: RwLock::new(None),
        });
        form.setup(layout);
        form
    }

    fn setup<L: FormLayout + ?Sized>(&self, layout: &L) {
        let sections = layout.initial_sections();
        for section in &sections {
            section.attach(self.this.clone());
        }
        tracing::debug!(target: targets::FORM, sections = sections.len(), "form setup");
        *self.sections.write() = sections;
        layout.prepare_targets(self);
    }

    // -------------------------------------------------------------------------
    // Delegate
    // -------------------------------------------------------------------------

    /// The attached delegate, if it is still alive.
    pub fn delegate(&self) -> Option<Arc<dyn FormDelegate>> {
        self.delegate.read().as_ref().and_then(Weak::upgrade)
    }

    /// Attaches `delegate`. The form keeps only a weak reference.
    pub fn set_delegate<D: FormDelegate + 'static>(&self, delegate: &Arc<D>) {
        let delegate: Arc<dyn FormDelegate> = delegate.clone();
        *self.delegate.write() = Some(Arc::downgrade(&delegate));
    }

    /// Detaches the delegate. Later edits are not reported.
    pub fn clear_delegate(&self) {
        *self.delegate.write() = None;
    }

    /// Calls `f` with the live delegate, or drops the notification.
    pub(crate) fn notify<F>(&self, kind: &'static str, f: F)
    where
        F: FnOnce(&dyn FormDelegate, &Form),
    {
        match self.delegate() {
            Some(delegate) => {
                tracing::trace!(target: targets::FORM, kind, "notifying delegate");
                f(delegate.as_ref(), self);
            }
            None => {
                tracing::debug!(target: targets::FORM, kind, "no delegate, notification dropped");
            }
        }
    }

    /// Announces every dynamic row in `rows` to the delegate.
    pub(crate) fn register_dynamic_rows(&self, rows: &[Arc<Row>]) {
        for row in rows.iter().filter(|row| row.is_dynamic()) {
            self.notify("dynamic_row_needs_registration", |delegate, form| {
                delegate.dynamic_row_needs_registration(form, row)
            });
        }
    }

    fn register_sections(&self, sections: &[Arc<Section>]) {
        for section in sections {
            self.register_dynamic_rows(&section.dynamic_rows());
        }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.read().len()
    }

    /// Returns `true` if the form has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.read().is_empty()
    }

    /// The section at `index`.
    pub fn section(&self, index: usize) -> Option<Arc<Section>> {
        self.sections.read().get(index).cloned()
    }

    /// A snapshot of the sections in display order.
    pub fn sections(&self) -> Vec<Arc<Section>> {
        self.sections.read().clone()
    }

    /// Index of `section` in this form, compared by identity.
    pub fn index_of(&self, section: &Section) -> Option<usize> {
        self.sections
            .read()
            .iter()
            .position(|candidate| std::ptr::eq(Arc::as_ptr(candidate), section))
    }

    /// Resolves a flat index path into the row and the offset inside it.
    pub fn resolve(&self, section: usize, flat: usize) -> Option<(Arc<Row>, usize)> {
        self.section(section)?.row_at_flat(flat)
    }

    /// Every dynamic row, in section-then-row order.
    pub fn all_dynamic_rows(&self) -> Vec<Arc<Row>> {
        self.sections()
            .iter()
            .flat_map(|section| section.dynamic_rows())
            .collect()
    }

    /// A lazy traversal of every row, in section-then-row order.
    ///
    /// Each call starts a fresh traversal.
    pub fn rows(&self) -> AllRows<'_> {
        AllRows::new(self)
    }

    /// A printable view of the section/row tree.
    pub fn debug_tree(&self) -> FormTreeDebug<'_> {
        FormTreeDebug::new(self)
    }

    // -------------------------------------------------------------------------
    // Section edits
    // -------------------------------------------------------------------------

    /// Inserts `section` at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&self, index: usize, section: Arc<Section>) {
        self.insert_all(index, [section]);
    }

    /// Inserts `sections` in order, starting at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_all(&self, index: usize, sections: impl IntoIterator<Item = Arc<Section>>) {
        let sections: Vec<Arc<Section>> = sections.into_iter().collect();
        if sections.is_empty() {
            return;
        }
        let len = self.len();
        assert!(index <= len, "insertion index (is {index}) should be <= len (is {len})");

        for section in &sections {
            section.attach(self.this.clone());
        }
        self.register_sections(&sections);
        self.sections
            .write()
            .splice(index..index, sections.iter().cloned());

        let count = sections.len();
        self.notify("sections_added", |delegate, form| {
            delegate.sections_added(form, section_run(index, count))
        });
    }

    /// Appends `section` at the end.
    pub fn append(&self, section: Arc<Section>) {
        self.append_all([section]);
    }

    /// Appends `sections` in order at the end.
    pub fn append_all(&self, sections: impl IntoIterator<Item = Arc<Section>>) {
        let index = self.len();
        self.insert_all(index, sections);
    }

    /// Replaces the section at `index`, returning the old one.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn update(&self, index: usize, section: Arc<Section>) -> Arc<Section> {
        let len = self.len();
        assert!(index < len, "index (is {index}) should be < len (is {len})");

        section.attach(self.this.clone());
        self.register_sections(std::slice::from_ref(&section));
        let old = std::mem::replace(&mut self.sections.write()[index], section.clone());
        if !Arc::ptr_eq(&old, &section) {
            old.detach();
        }

        self.notify("sections_updated", |delegate, form| {
            delegate.sections_updated(form, index..index + 1)
        });
        old
    }

    /// Replaces the sections in `range` with `sections`, returning the
    /// removed ones.
    ///
    /// The remainder past the overlapping prefix is reported as added or
    /// removed first, then the prefix as updated.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    pub fn replace_range(
        &self,
        range: Range<usize>,
        sections: impl IntoIterator<Item = Arc<Section>>,
    ) -> Vec<Arc<Section>> {
        let sections: Vec<Arc<Section>> = sections.into_iter().collect();
        let len = self.len();
        assert!(
            range.start <= range.end && range.end <= len,
            "range {range:?} out of bounds for length {len}"
        );
        let start = range.start;

        for section in &sections {
            section.attach(self.this.clone());
        }
        self.register_sections(&sections);
        let removed: Vec<Arc<Section>> = self
            .sections
            .write()
            .splice(range, sections.iter().cloned())
            .collect();
        for old in &removed {
            if !sections.iter().any(|section| Arc::ptr_eq(section, old)) {
                old.detach();
            }
        }

        let common = removed.len().min(sections.len());
        if sections.len() > common {
            self.notify("sections_added", |delegate, form| {
                delegate.sections_added(form, section_run(start + common, sections.len() - common))
            });
        }
        if removed.len() > common {
            self.notify("sections_removed", |delegate, form| {
                delegate.sections_removed(form, section_run(start + common, removed.len() - common))
            });
        }
        if common > 0 {
            self.notify("sections_updated", |delegate, form| {
                delegate.sections_updated(form, section_run(start, common))
            });
        }
        removed
    }

    /// Removes and returns the section at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&self, index: usize) -> Arc<Section> {
        let section = self.sections.write().remove(index);
        section.detach();
        self.notify("sections_removed", |delegate, form| {
            delegate.sections_removed(form, index..index + 1)
        });
        section
    }

    /// Removes and returns the last section, if any.
    pub fn remove_last(&self) -> Option<Arc<Section>> {
        let index = self.len().checked_sub(1)?;
        Some(self.remove(index))
    }

    /// Removes and returns the sections in `range`.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    pub fn remove_range(&self, range: Range<usize>) -> Vec<Arc<Section>> {
        let removed: Vec<Arc<Section>> = self.sections.write().drain(range.clone()).collect();
        if removed.is_empty() {
            return removed;
        }
        for section in &removed {
            section.detach();
        }
        self.notify("sections_removed", |delegate, form| {
            delegate.sections_removed(form, range)
        });
        removed
    }

    /// Removes and returns every section.
    pub fn remove_all(&self) -> Vec<Arc<Section>> {
        let len = self.len();
        self.remove_range(0..len)
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("sections", &self.len())
            .field("has_delegate", &self.delegate().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Element;

    struct Cell;
    impl Element for Cell {}

    struct OneSection;

    impl FormLayout for OneSection {
        fn default_section(&self) -> Option<Arc<Section>> {
            Some(Section::with_rows([Row::with_element(Cell)]))
        }
    }

    #[test]
    fn test_empty_layout() {
        let form = Form::new();
        assert!(form.is_empty());
        assert!(form.delegate().is_none());
    }

    #[test]
    fn test_default_section_layout() {
        let form = Form::with_layout(&OneSection);
        assert_eq!(form.len(), 1);
        let section = form.section(0).unwrap();
        assert!(Arc::ptr_eq(&section.form().unwrap(), &form));
        assert_eq!(section.index_in_form(), Some(0));
    }

    #[test]
    fn test_remove_clears_back_reference() {
        let form = Form::with_layout(&OneSection);
        let section = form.remove(0);
        assert!(section.form().is_none());
        assert!(form.is_empty());
    }

    #[test]
    fn test_resolve() {
        let form = Form::new();
        let dynamic = Row::dynamic::<Cell>("K");
        dynamic.set_element_count(2);
        form.append(Section::with_rows([Row::with_element(Cell), dynamic, Row::with_element(Cell)]));

        let (row, offset) = form.resolve(0, 2).unwrap();
        assert!(row.is_dynamic());
        assert_eq!(offset, 1);
        assert!(form.resolve(0, 4).is_none());
        assert!(form.resolve(1, 0).is_none());
    }

    #[test]
    fn test_update_swaps_back_references() {
        let form = Form::with_layout(&OneSection);
        let replacement = Section::new();
        let old = form.update(0, replacement.clone());
        assert!(old.form().is_none());
        assert!(replacement.form().is_some());
    }

    #[test]
    fn test_dropped_delegate_is_tolerated() {
        let form = Form::new();
        {
            let signals = Arc::new(crate::model::FormSignals::new());
            form.set_delegate(&signals);
            assert!(form.delegate().is_some());
        }
        assert!(form.delegate().is_none());
        form.append(Section::new());
        assert_eq!(form.len(), 1);
    }

    #[test]
    #[should_panic(expected = "insertion index")]
    fn test_insert_out_of_range_panics() {
        Form::new().insert(2, Section::new());
    }
}
