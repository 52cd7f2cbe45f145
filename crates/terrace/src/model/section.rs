//! Sections: ordered groups of rows.
//!
//! A [`Section`] owns its rows and translates between two coordinate
//! systems: the *form row index* (position in the row sequence) and the
//! *flat index* a list widget sees once every dynamic row is expanded to its
//! element count. The translation is a linear scan because dynamic rows can
//! sit anywhere and each one has its own width.
//!
//! Every edit follows the same order: mutate the row sequence, register any
//! new dynamic rows with the owning form, then notify. Edits that add or
//! remove a dynamic row are reported as a whole-section update, since the
//! widget cannot be told precisely where the flat layout shifted. Edits that
//! touch only static rows are reported as precise flat index paths.

use std::fmt;
use std::ops::Range;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use terrace_core::Property;
use terrace_core::logging::targets;

use super::delegate::FormDelegate;
use super::form::Form;
use super::index::{IndexPath, RowPosition};
use super::row::{Element, Row};
use crate::error::{FormError, Result};

/// An ordered, mutable group of rows.
///
/// Sections are always shared (`Arc<Section>`) so that edits through any
/// handle reach the same rows and the same owning form.
///
/// # Example
///
/// ```
/// use terrace::model::{Element, Row, Section};
///
/// struct Label;
/// impl Element for Label {}
///
/// let section = Section::with_rows([
///     Row::with_element(Label),
///     Row::dynamic::<Label>("items"),
///     Row::with_element(Label),
/// ]);
/// section.row(1).unwrap().set_element_count(2);
///
/// assert_eq!(section.flat_len(), 4);
/// assert_eq!(section.flat_index(2), 3);
///
/// let position = section.row_position(2).unwrap();
/// assert_eq!((position.index, position.offset), (1, 1));
/// ```
pub struct Section {
    this: Weak<Section>,
    rows: RwLock<Vec<Arc<Row>>>,
    form: RwLock<Weak<Form>>,
    header_title: Property<Option<String>>,
    footer_title: Property<Option<String>>,
    header_view: RwLock<Option<Arc<dyn Element>>>,
    footer_view: RwLock<Option<Arc<dyn Element>>>,
}

impl Section {
    /// Creates an empty, detached section.
    pub fn new() -> Arc<Self> {
        Self::with_rows(std::iter::empty::<Row>())
    }

    /// Creates a detached section holding `rows` in order.
    pub fn with_rows<I, R>(rows: I) -> Arc<Self>
    where
        I: IntoIterator<Item = R>,
        R: Into<Arc<Row>>,
    {
        Arc::new_cyclic(|this: &Weak<Section>| {
            let rows: Vec<Arc<Row>> = rows
                .into_iter()
                .map(|row| {
                    let row = row.into();
                    row.attach(this.clone());
                    row
                })
                .collect();
            Self {
                this: this.clone(),
                rows: RwLock::new(rows),
                form: RwLock::new(Weak::new()),
                header_title: Property::new(None),
                footer_title: Property::new(None),
                header_view: RwLock::new(None),
                footer_view: RwLock::new(None),
            }
        })
    }

    /// Sets the header title, for use while building a section.
    pub fn with_header_title(self: Arc<Self>, title: impl Into<String>) -> Arc<Self> {
        self.set_header_title(Some(title.into()));
        self
    }

    /// Sets the footer title, for use while building a section.
    pub fn with_footer_title(self: Arc<Self>, title: impl Into<String>) -> Arc<Self> {
        self.set_footer_title(Some(title.into()));
        self
    }

    // -------------------------------------------------------------------------
    // Header and footer
    // -------------------------------------------------------------------------

    /// The header title.
    pub fn header_title(&self) -> Option<String> {
        self.header_title.get()
    }

    /// Sets the header title. Call [`Section::reload_data`] to refresh the widget.
    pub fn set_header_title(&self, title: Option<String>) {
        self.header_title.set(title);
    }

    /// The footer title.
    pub fn footer_title(&self) -> Option<String> {
        self.footer_title.get()
    }

    /// Sets the footer title. Call [`Section::reload_data`] to refresh the widget.
    pub fn set_footer_title(&self, title: Option<String>) {
        self.footer_title.set(title);
    }

    /// The header view override. When set, the header title is not shown.
    pub fn header_view(&self) -> Option<Arc<dyn Element>> {
        self.header_view.read().clone()
    }

    /// Sets the header view override.
    pub fn set_header_view(&self, view: Option<Arc<dyn Element>>) {
        *self.header_view.write() = view;
    }

    /// The footer view override. When set, the footer title is not shown.
    pub fn footer_view(&self) -> Option<Arc<dyn Element>> {
        self.footer_view.read().clone()
    }

    /// Sets the footer view override.
    pub fn set_footer_view(&self, view: Option<Arc<dyn Element>>) {
        *self.footer_view.write() = view;
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Number of rows, counting each dynamic row once.
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    /// Returns `true` if the section holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    /// The row at form row index `index`.
    pub fn row(&self, index: usize) -> Option<Arc<Row>> {
        self.rows.read().get(index).cloned()
    }

    /// A snapshot of the rows in display order.
    pub fn rows(&self) -> Vec<Arc<Row>> {
        self.rows.read().clone()
    }

    /// The dynamic rows, in display order.
    pub fn dynamic_rows(&self) -> Vec<Arc<Row>> {
        self.rows
            .read()
            .iter()
            .filter(|row| row.is_dynamic())
            .cloned()
            .collect()
    }

    /// Form row index of `row`, compared by identity.
    pub fn position_of(&self, row: &Arc<Row>) -> Option<usize> {
        self.rows
            .read()
            .iter()
            .position(|candidate| Arc::ptr_eq(candidate, row))
    }

    /// Form row index of the first dynamic row registered under `reuse_key`.
    pub fn first_row_with_key(&self, reuse_key: &str) -> Option<usize> {
        self.rows
            .read()
            .iter()
            .position(|row| row.reuse_key() == Some(reuse_key))
    }

    /// Total number of flat slots in the section.
    pub fn flat_len(&self) -> usize {
        self.rows.read().iter().map(|row| row.flat_len()).sum()
    }

    /// The flat index at which the row at form row index `index` begins.
    ///
    /// Indexes past the end return [`Section::flat_len`].
    pub fn flat_index(&self, index: usize) -> usize {
        flat_index_in(&self.rows.read(), index)
    }

    /// Translates a flat index into the owning row and the offset inside it.
    ///
    /// Rows that currently expand to zero elements are skipped. Returns
    /// `None` if `flat` lies past the last slot.
    pub fn row_position(&self, flat: usize) -> Option<RowPosition> {
        let rows = self.rows.read();
        let mut consumed = 0;
        for (index, row) in rows.iter().enumerate() {
            let width = row.flat_len();
            if flat < consumed + width {
                return Some(RowPosition::new(index, flat - consumed));
            }
            consumed += width;
        }
        tracing::trace!(target: targets::SECTION, flat, consumed, "flat index past end of section");
        None
    }

    /// The row occupying flat index `flat`, with the offset inside it.
    pub fn row_at_flat(&self, flat: usize) -> Option<(Arc<Row>, usize)> {
        let position = self.row_position(flat)?;
        let row = self.row(position.index)?;
        Some((row, position.offset))
    }

    /// The form holding this section, if any.
    pub fn form(&self) -> Option<Arc<Form>> {
        self.form.read().upgrade()
    }

    /// Index of this section in its form.
    pub fn index_in_form(&self) -> Option<usize> {
        self.form()?.index_of(self)
    }

    // -------------------------------------------------------------------------
    // Row edits
    // -------------------------------------------------------------------------

    /// Inserts `row` at form row index `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&self, index: usize, row: impl Into<Arc<Row>>) {
        self.insert_all(index, [row.into()]);
    }

    /// Inserts `rows` in order, starting at form row index `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_all<I, R>(&self, index: usize, rows: I)
    where
        I: IntoIterator<Item = R>,
        R: Into<Arc<Row>>,
    {
        let rows = self.adopt(rows);
        if rows.is_empty() {
            return;
        }

        let first_flat = {
            let mut current = self.rows.write();
            current.splice(index..index, rows.iter().cloned());
            flat_index_in(&current, index)
        };

        self.register(&rows);
        if rows.iter().any(|row| row.is_dynamic()) {
            self.notify_section_updated();
        } else {
            self.notify_rows("rows_added", first_flat, rows.len(), |delegate, form, paths| {
                delegate.rows_added(form, paths)
            });
        }
    }

    /// Appends `row` at the end of the section.
    pub fn append(&self, row: impl Into<Arc<Row>>) {
        self.append_all([row.into()]);
    }

    /// Appends `rows` in order at the end of the section.
    pub fn append_all<I, R>(&self, rows: I)
    where
        I: IntoIterator<Item = R>,
        R: Into<Arc<Row>>,
    {
        let index = self.len();
        self.insert_all(index, rows);
    }

    /// Replaces the row at `index` with `row`, returning the old row.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn update(&self, index: usize, row: impl Into<Arc<Row>>) -> Arc<Row> {
        let row = row.into();
        row.attach(self.this.clone());

        let (old, flat) = {
            let mut current = self.rows.write();
            let old = std::mem::replace(&mut current[index], row.clone());
            (old, flat_index_in(&current, index))
        };
        if !Arc::ptr_eq(&old, &row) {
            old.detach();
        }

        self.register(std::slice::from_ref(&row));
        if old.is_dynamic() || row.is_dynamic() {
            self.notify_section_updated();
        } else {
            self.notify_rows("rows_updated", flat, 1, |delegate, form, paths| {
                delegate.rows_updated(form, paths)
            });
        }
        old
    }

    /// Replaces the rows in `range` with `rows`, returning the removed rows.
    ///
    /// With static rows only, the remainder past the overlapping prefix is
    /// reported as added or removed first, then the prefix as updated, so
    /// the row count is settled before any reload.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    pub fn replace_range<I, R>(&self, range: Range<usize>, rows: I) -> Vec<Arc<Row>>
    where
        I: IntoIterator<Item = R>,
        R: Into<Arc<Row>>,
    {
        let start = range.start;
        let rows = self.adopt(rows);

        let (removed, first_flat) = {
            let mut current = self.rows.write();
            let removed: Vec<Arc<Row>> = current.splice(range, rows.iter().cloned()).collect();
            (removed, flat_index_in(&current, start))
        };
        for old in &removed {
            if !rows.iter().any(|row| Arc::ptr_eq(row, old)) {
                old.detach();
            }
        }
        if removed.is_empty() && rows.is_empty() {
            return removed;
        }

        self.register(&rows);
        if removed.iter().chain(rows.iter()).any(|row| row.is_dynamic()) {
            self.notify_section_updated();
            return removed;
        }

        let common = removed.len().min(rows.len());
        if rows.len() > common {
            self.notify_rows(
                "rows_added",
                first_flat + common,
                rows.len() - common,
                |delegate, form, paths| delegate.rows_added(form, paths),
            );
        }
        if removed.len() > common {
            self.notify_rows(
                "rows_removed",
                first_flat + common,
                removed.len() - common,
                |delegate, form, paths| delegate.rows_removed(form, paths),
            );
        }
        if common > 0 {
            self.notify_rows("rows_updated", first_flat, common, |delegate, form, paths| {
                delegate.rows_updated(form, paths)
            });
        }
        removed
    }

    /// Removes and returns the row at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&self, index: usize) -> Arc<Row> {
        let (row, flat) = {
            let mut current = self.rows.write();
            let flat = flat_index_in(&current, index);
            (current.remove(index), flat)
        };
        row.detach();

        if row.is_dynamic() {
            self.notify_section_updated();
        } else {
            self.notify_rows("rows_removed", flat, 1, |delegate, form, paths| {
                delegate.rows_removed(form, paths)
            });
        }
        row
    }

    /// Removes and returns the last row, if any.
    pub fn remove_last(&self) -> Option<Arc<Row>> {
        let index = self.len().checked_sub(1)?;
        Some(self.remove(index))
    }

    /// Removes and returns the rows in `range`.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    pub fn remove_range(&self, range: Range<usize>) -> Vec<Arc<Row>> {
        let start = range.start;
        let (removed, first_flat) = {
            let mut current = self.rows.write();
            let flat = flat_index_in(&current, start);
            (current.drain(range).collect::<Vec<_>>(), flat)
        };
        if removed.is_empty() {
            return removed;
        }
        for row in &removed {
            row.detach();
        }

        if removed.iter().any(|row| row.is_dynamic()) {
            self.notify_section_updated();
        } else {
            self.notify_rows("rows_removed", first_flat, removed.len(), |delegate, form, paths| {
                delegate.rows_removed(form, paths)
            });
        }
        removed
    }

    /// Removes and returns every row. Reported as a section update.
    pub fn remove_all(&self) -> Vec<Arc<Row>> {
        let removed = std::mem::take(&mut *self.rows.write());
        if removed.is_empty() {
            return removed;
        }
        for row in &removed {
            row.detach();
        }
        self.notify_section_updated();
        removed
    }

    /// Asks the widget to reload this section.
    ///
    /// A detached section has nobody to notify and does nothing. That
    /// includes a section that was removed from its form: removal clears the
    /// back-reference, so reloading it afterwards never reaches the form's
    /// delegate.
    ///
    /// A section whose form cannot list it yet requests a full reload
    /// instead. This only happens while the form is still registering the
    /// section's dynamic rows, before the section is inserted.
    pub fn reload_data(&self) {
        let Some(form) = self.form() else {
            tracing::debug!(target: targets::SECTION, "reload requested on detached section");
            return;
        };
        match form.index_of(self) {
            Some(index) => form.notify("sections_updated", |delegate, form| {
                delegate.sections_updated(form, index..index + 1)
            }),
            None => {
                tracing::debug!(target: targets::SECTION, "section missing from its form, requesting full reload");
                form.notify("needs_full_reload", |delegate, form| {
                    delegate.needs_full_reload(form)
                });
            }
        }
    }

    // -------------------------------------------------------------------------
    // Dynamic elements
    // -------------------------------------------------------------------------

    /// Inserts one element into the first dynamic row using `reuse_key`,
    /// at `offset` inside that row (`0..=element_count`).
    ///
    /// Notifies one added flat path and returns it.
    pub fn insert_element(&self, reuse_key: &str, offset: usize) -> Result<IndexPath> {
        let index = self.index_for_key(reuse_key)?;
        self.insert_element_at(index, offset)
    }

    /// Inserts one element into `row` at `offset`.
    pub fn insert_element_for_row(&self, row: &Arc<Row>, offset: usize) -> Result<IndexPath> {
        let index = self.position_of(row).ok_or(FormError::RowNotInSection)?;
        self.insert_element_at(index, offset)
    }

    /// Appends one element after the current run of the first dynamic row
    /// using `reuse_key`.
    pub fn append_element(&self, reuse_key: &str) -> Result<IndexPath> {
        let index = self.index_for_key(reuse_key)?;
        self.append_element_at(index)
    }

    /// Appends one element after the current run of `row`.
    pub fn append_element_for_row(&self, row: &Arc<Row>) -> Result<IndexPath> {
        let index = self.position_of(row).ok_or(FormError::RowNotInSection)?;
        self.append_element_at(index)
    }

    /// Removes the element at `offset` from the first dynamic row using
    /// `reuse_key`.
    ///
    /// Notifies one removed flat path and returns it.
    pub fn remove_element(&self, reuse_key: &str, offset: usize) -> Result<IndexPath> {
        let index = self.index_for_key(reuse_key)?;
        self.remove_element_at(index, offset)
    }

    /// Removes the element at `offset` from `row`.
    pub fn remove_element_for_row(&self, row: &Arc<Row>, offset: usize) -> Result<IndexPath> {
        let index = self.position_of(row).ok_or(FormError::RowNotInSection)?;
        self.remove_element_at(index, offset)
    }

    fn index_for_key(&self, reuse_key: &str) -> Result<usize> {
        self.first_row_with_key(reuse_key).ok_or_else(|| {
            tracing::debug!(target: targets::SECTION, reuse_key, "no dynamic row for reuse key");
            FormError::unknown_reuse_key(reuse_key)
        })
    }

    fn append_element_at(&self, index: usize) -> Result<IndexPath> {
        let count = self.row(index).map_or(0, |row| row.element_count());
        self.insert_element_at(index, count)
    }

    fn insert_element_at(&self, index: usize, offset: usize) -> Result<IndexPath> {
        let (row, base) = self.dynamic_row_at(index)?;
        let count = row.element_count();
        if offset > count {
            return Err(FormError::OffsetOutOfRange { offset, count });
        }
        let (form, section) = self.locate()?;

        row.set_element_count(count + 1);
        let path = IndexPath::new(section, base + offset);
        form.notify("rows_added", |delegate, form| {
            delegate.rows_added(form, std::slice::from_ref(&path))
        });
        Ok(path)
    }

    fn remove_element_at(&self, index: usize, offset: usize) -> Result<IndexPath> {
        let (row, base) = self.dynamic_row_at(index)?;
        let count = row.element_count();
        if offset >= count {
            return Err(FormError::OffsetOutOfRange { offset, count });
        }
        let (form, section) = self.locate()?;

        row.set_element_count(count - 1);
        let path = IndexPath::new(section, base + offset);
        form.notify("rows_removed", |delegate, form| {
            delegate.rows_removed(form, std::slice::from_ref(&path))
        });
        Ok(path)
    }

    /// The dynamic row at `index` and the flat index where its run begins.
    fn dynamic_row_at(&self, index: usize) -> Result<(Arc<Row>, usize)> {
        let rows = self.rows.read();
        let row = rows.get(index).ok_or(FormError::RowNotInSection)?;
        if !row.is_dynamic() {
            return Err(FormError::NotDynamic);
        }
        Ok((row.clone(), flat_index_in(&rows, index)))
    }

    fn locate(&self) -> Result<(Arc<Form>, usize)> {
        let form = self.form().ok_or(FormError::Detached)?;
        let index = form.index_of(self).ok_or(FormError::SectionNotInForm)?;
        Ok((form, index))
    }

    // -------------------------------------------------------------------------
    // Ownership and notification
    // -------------------------------------------------------------------------

    pub(crate) fn attach(&self, form: Weak<Form>) {
        let mut current = self.form.write();
        if current.strong_count() > 0 && !current.ptr_eq(&form) {
            tracing::warn!(target: targets::SECTION, "section moved into a second form while still attached");
        }
        *current = form;
    }

    pub(crate) fn detach(&self) {
        *self.form.write() = Weak::new();
    }

    /// Converts incoming rows and points them at this section.
    fn adopt<I, R>(&self, rows: I) -> Vec<Arc<Row>>
    where
        I: IntoIterator<Item = R>,
        R: Into<Arc<Row>>,
    {
        rows.into_iter()
            .map(|row| {
                let row = row.into();
                if !row.is_valid() {
                    tracing::warn!(target: targets::SECTION, "inserting a row with neither element nor reuse key");
                }
                row.attach(self.this.clone());
                row
            })
            .collect()
    }

    fn register(&self, rows: &[Arc<Row>]) {
        if let Some(form) = self.form() {
            form.register_dynamic_rows(rows);
        }
    }

    fn notify_section_updated(&self) {
        self.notify_in_form("sections_updated", |delegate, form, section| {
            delegate.sections_updated(form, section..section + 1)
        });
    }

    fn notify_rows<F>(&self, kind: &'static str, first: usize, count: usize, f: F)
    where
        F: FnOnce(&dyn FormDelegate, &Form, &[IndexPath]),
    {
        self.notify_in_form(kind, |delegate, form, section| {
            let paths = IndexPath::run(section, first, count);
            f(delegate, form, &paths)
        });
    }

    fn notify_in_form<F>(&self, kind: &'static str, f: F)
    where
        F: FnOnce(&dyn FormDelegate, &Form, usize),
    {
        let Some(form) = self.form() else {
            tracing::trace!(target: targets::SECTION, kind, "detached section, notification dropped");
            return;
        };
        let Some(section) = form.index_of(self) else {
            tracing::debug!(target: targets::SECTION, kind, "section missing from its form, notification dropped");
            return;
        };
        form.notify(kind, |delegate, form| f(delegate, form, section));
    }
}

impl fmt::Debug for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Section")
            .field("rows", &self.len())
            .field("flat_len", &self.flat_len())
            .field("header_title", &self.header_title())
            .field("attached", &self.form().is_some())
            .finish()
    }
}

/// Sum of flat widths of `rows[..index]`.
fn flat_index_in(rows: &[Arc<Row>], index: usize) -> usize {
    rows.iter().take(index).map(|row| row.flat_len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Cell;
    impl Element for Cell {}

    fn fixed() -> Row {
        Row::with_element(Cell)
    }

    fn dynamic(key: &str, count: usize) -> Row {
        let row = Row::dynamic::<Cell>(key);
        row.set_element_count(count);
        row
    }

    #[test]
    fn test_static_flat_index_is_identity() {
        let section = Section::with_rows([fixed(), fixed(), fixed()]);
        for i in 0..=3 {
            assert_eq!(section.flat_index(i), i);
        }
        section.insert(1, fixed());
        section.remove(0);
        section.append(fixed());
        for i in 0..=section.len() {
            assert_eq!(section.flat_index(i), i);
        }
    }

    #[test]
    fn test_row_position_inside_dynamic_run() {
        let section = Section::with_rows([fixed(), dynamic("K", 2), fixed()]);
        assert_eq!(section.row_position(0), Some(RowPosition::new(0, 0)));
        assert_eq!(section.row_position(1), Some(RowPosition::new(1, 0)));
        assert_eq!(section.row_position(2), Some(RowPosition::new(1, 1)));
        assert_eq!(section.row_position(3), Some(RowPosition::new(2, 0)));
        assert_eq!(section.row_position(4), None);
    }

    #[test]
    fn test_row_position_skips_empty_dynamic_rows() {
        let section = Section::with_rows([dynamic("A", 0), fixed(), dynamic("B", 0), fixed()]);
        assert_eq!(section.flat_len(), 2);
        assert_eq!(section.row_position(0), Some(RowPosition::new(1, 0)));
        assert_eq!(section.row_position(1), Some(RowPosition::new(3, 0)));
    }

    #[test]
    fn test_round_trip_through_row_position() {
        let section = Section::with_rows([dynamic("A", 3), fixed(), dynamic("B", 2), fixed()]);
        for flat in 0..section.flat_len() {
            let position = section.row_position(flat).unwrap();
            assert_eq!(section.flat_index(position.index) + position.offset, flat);
        }
    }

    #[test]
    fn test_rows_point_back_to_section() {
        let section = Section::with_rows([fixed()]);
        let row = section.row(0).unwrap();
        assert!(Arc::ptr_eq(&row.section().unwrap(), &section));

        let removed = section.remove(0);
        assert!(removed.section().is_none());
    }

    #[test]
    fn test_update_returns_old_row() {
        let section = Section::with_rows([fixed(), fixed()]);
        let first = section.row(0).unwrap();
        let old = section.update(0, dynamic("K", 1));
        assert!(Arc::ptr_eq(&old, &first));
        assert!(old.section().is_none());
        assert!(section.row(0).unwrap().is_dynamic());
    }

    #[test]
    fn test_remove_all_and_remove_last() {
        let section = Section::with_rows([fixed(), fixed()]);
        assert!(section.remove_last().is_some());
        assert_eq!(section.len(), 1);
        assert_eq!(section.remove_all().len(), 1);
        assert!(section.is_empty());
        assert!(section.remove_last().is_none());
    }

    #[test]
    fn test_first_row_with_key() {
        let section = Section::with_rows([fixed(), dynamic("K", 1), dynamic("K", 1)]);
        assert_eq!(section.first_row_with_key("K"), Some(1));
        assert_eq!(section.first_row_with_key("missing"), None);
        assert_eq!(section.dynamic_rows().len(), 2);
    }

    #[test]
    fn test_element_helpers_on_detached_section() {
        let section = Section::with_rows([dynamic("K", 1)]);
        assert_eq!(section.append_element("K"), Err(FormError::Detached));
        assert_eq!(
            section.append_element("other"),
            Err(FormError::unknown_reuse_key("other"))
        );
        assert_eq!(section.row(0).unwrap().element_count(), 1);
    }

    #[test]
    fn test_element_helper_rejects_static_rows() {
        let section = Section::with_rows([fixed()]);
        let row = section.row(0).unwrap();
        assert_eq!(section.insert_element_for_row(&row, 0), Err(FormError::NotDynamic));
    }

    #[test]
    fn test_header_and_footer() {
        let section = Section::new()
            .with_header_title("Account")
            .with_footer_title("Signed in");
        assert_eq!(section.header_title().as_deref(), Some("Account"));
        assert_eq!(section.footer_title().as_deref(), Some("Signed in"));

        section.set_header_view(Some(Arc::new(Cell)));
        assert!(section.header_view().is_some());
        assert!(section.footer_view().is_none());
    }

    #[test]
    #[should_panic]
    fn test_insert_out_of_range_panics() {
        let section = Section::new();
        section.insert(1, fixed());
    }
}
