//! The adapter between a [`Form`] and a [`ListWidget`].

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use parking_lot::Mutex;
use terrace_core::PerfSpan;
use terrace_core::logging::targets;

use super::config::ControllerConfig;
use super::widget::{DynamicRowSource, EditingStyle, ListWidget};
use crate::model::{Element, Form, FormDelegate, FormLayout, IndexPath, Row, RowHeight};

/// Drives a [`ListWidget`] from a [`Form`].
///
/// The controller plays both sides of the binding. As the form's
/// [`FormDelegate`] it turns structural notifications into batched widget
/// updates. As the widget's data source it answers count, content, height
/// and selection queries by resolving flat index paths through the form.
///
/// # Example
///
/// ```
/// use std::ops::Range;
/// use terrace::controller::{FormController, ListWidget, RowAnimation};
/// use terrace::model::{Element, ElementKind, Form, IndexPath, Row, Section};
///
/// struct NullWidget;
///
/// impl ListWidget for NullWidget {
///     fn insert_sections(&mut self, _: Range<usize>, _: RowAnimation) {}
///     fn delete_sections(&mut self, _: Range<usize>, _: RowAnimation) {}
///     fn reload_sections(&mut self, _: Range<usize>, _: RowAnimation) {}
///     fn insert_rows(&mut self, _: &[IndexPath], _: RowAnimation) {}
///     fn delete_rows(&mut self, _: &[IndexPath], _: RowAnimation) {}
///     fn reload_rows(&mut self, _: &[IndexPath], _: RowAnimation) {}
///     fn reload_data(&mut self) {}
///     fn register_element(&mut self, _: ElementKind, _: &str) {}
/// }
///
/// struct Label;
/// impl Element for Label {}
///
/// let controller = FormController::new(Form::new(), NullWidget, ());
/// controller.load();
/// controller.form().append(Section::with_rows([Row::with_element(Label)]));
///
/// assert_eq!(controller.number_of_sections(), 1);
/// assert_eq!(controller.number_of_rows(0), 1);
/// ```
pub struct FormController<W, S = ()> {
    form: Arc<Form>,
    widget: Mutex<W>,
    source: S,
    config: ControllerConfig,
}

impl<W, S> FormController<W, S>
where
    W: ListWidget + 'static,
    S: DynamicRowSource + 'static,
{
    /// Creates a controller with the default configuration.
    pub fn new(form: Arc<Form>, widget: W, source: S) -> Arc<Self> {
        Self::with_config(form, widget, source, ControllerConfig::default())
    }

    /// Creates a controller for a form built from `layout`.
    pub fn from_layout<L: FormLayout + ?Sized>(layout: &L, widget: W, source: S) -> Arc<Self> {
        Self::new(Form::with_layout(layout), widget, source)
    }

    /// Creates a controller with a custom configuration.
    pub fn with_config(form: Arc<Form>, widget: W, source: S, config: ControllerConfig) -> Arc<Self> {
        Arc::new(Self {
            form,
            widget: Mutex::new(widget),
            source,
            config,
        })
    }

    /// Attaches the controller to its form and registers every dynamic row
    /// kind with the widget.
    ///
    /// Call once, before the widget's first render.
    pub fn load(self: &Arc<Self>) {
        self.form.set_delegate(self);

        let _span = PerfSpan::new("register_dynamic_rows");
        let rows = self.form.all_dynamic_rows();
        tracing::debug!(target: targets::CONTROLLER, count = rows.len(), "registering dynamic rows");
        let mut widget = self.widget.lock();
        for row in &rows {
            register(&mut *widget, row);
        }
    }

    /// The bound form.
    pub fn form(&self) -> &Arc<Form> {
        &self.form
    }

    /// The dynamic row source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Runs `f` with exclusive access to the widget.
    pub fn with_widget<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut *self.widget.lock())
    }

    fn batch(&self, f: impl FnOnce(&mut W)) {
        let mut widget = self.widget.lock();
        widget.begin_updates();
        f(&mut *widget);
        widget.end_updates();
    }

    // -------------------------------------------------------------------------
    // Data source
    // -------------------------------------------------------------------------

    /// Number of sections.
    pub fn number_of_sections(&self) -> usize {
        self.form.len()
    }

    /// Number of flat rows in `section`.
    ///
    /// Refreshes every dynamic row's element count from the source first.
    pub fn number_of_rows(&self, section: usize) -> usize {
        let Some(section) = self.form.section(section) else {
            return 0;
        };
        section
            .rows()
            .iter()
            .map(|row| {
                if let Some(key) = row.reuse_key() {
                    row.set_element_count(self.source.number_of_elements(key));
                }
                row.flat_len()
            })
            .sum()
    }

    /// The element to display at `path`.
    ///
    /// Static rows return their bound element. Dynamic rows obtain an element
    /// from `dequeue` (given the reuse key) and let the source configure it.
    pub fn element_at<F>(&self, path: IndexPath, dequeue: F) -> Option<Arc<dyn Element>>
    where
        F: FnOnce(&str, IndexPath) -> Arc<dyn Element>,
    {
        let (row, offset) = self.resolve(path)?;
        if let Some(key) = row.reuse_key() {
            let element = dequeue(key, path);
            self.source.configure(&element, key, offset);
            return Some(element);
        }
        let element = row.element();
        if element.is_none() {
            tracing::warn!(target: targets::CONTROLLER, ?path, "invalid row has nothing to render");
        }
        element
    }

    /// Header title of `section`, unless a header view replaces it.
    pub fn header_title(&self, section: usize) -> Option<String> {
        let section = self.form.section(section)?;
        if section.header_view().is_some() {
            return None;
        }
        section.header_title()
    }

    /// Footer title of `section`, unless a footer view replaces it.
    pub fn footer_title(&self, section: usize) -> Option<String> {
        let section = self.form.section(section)?;
        if section.footer_view().is_some() {
            return None;
        }
        section.footer_title()
    }

    /// Header view of `section`.
    pub fn header_view(&self, section: usize) -> Option<Arc<dyn Element>> {
        self.form.section(section)?.header_view()
    }

    /// Footer view of `section`.
    pub fn footer_view(&self, section: usize) -> Option<Arc<dyn Element>> {
        self.form.section(section)?.footer_view()
    }

    // -------------------------------------------------------------------------
    // Layout
    // -------------------------------------------------------------------------

    /// Height of the row at `path`.
    pub fn row_height(&self, path: IndexPath) -> Option<RowHeight> {
        self.resolve(path).map(|(row, _)| row.height())
    }

    /// Estimated height of the row at `path`.
    pub fn estimated_row_height(&self, path: IndexPath) -> Option<f32> {
        self.resolve(path).map(|(row, _)| row.estimated_height())
    }

    /// Section header height.
    pub fn header_height(&self, _section: usize) -> RowHeight {
        self.config.header_height
    }

    /// Estimated section header height.
    pub fn estimated_header_height(&self, _section: usize) -> f32 {
        self.config.estimated_header_height
    }

    // -------------------------------------------------------------------------
    // Editing and selection
    // -------------------------------------------------------------------------

    /// Whether the row at `path` may be edited (deleted).
    pub fn can_edit_row(&self, path: IndexPath) -> bool {
        self.resolve(path).is_some_and(|(row, _)| row.can_delete())
    }

    /// Editing affordance for the row at `path`.
    pub fn editing_style(&self, path: IndexPath) -> EditingStyle {
        if self.can_edit_row(path) {
            EditingStyle::Delete
        } else {
            EditingStyle::None
        }
    }

    /// Returns `path` if the row there can be selected.
    pub fn will_select(&self, path: IndexPath) -> Option<IndexPath> {
        let (row, _) = self.resolve(path)?;
        row.can_select().then_some(path)
    }

    /// Dispatches a selection at `path`.
    ///
    /// Dynamic rows report to the source; static rows run their own handler.
    pub fn did_select(&self, path: IndexPath) {
        let Some((row, offset)) = self.resolve(path) else {
            return;
        };
        match row.reuse_key() {
            Some(key) => self.source.did_select_dynamic(key, offset),
            None => {
                row.select();
            }
        }
    }

    /// Deletes the row at `path`, if it allows deletion.
    ///
    /// A dynamic element is announced to the source and then removed from
    /// its row. A static row is removed from its section. Either way the
    /// model notifies the widget.
    pub fn commit_delete(&self, path: IndexPath) {
        let Some(section) = self.form.section(path.section) else {
            return;
        };
        let Some(position) = section.row_position(path.row) else {
            return;
        };
        let Some(row) = section.row(position.index) else {
            return;
        };
        if !row.can_delete() {
            tracing::debug!(target: targets::CONTROLLER, ?path, "delete ignored, row is not deletable");
            return;
        }

        match row.reuse_key() {
            Some(key) => {
                self.source.will_delete_dynamic(key, position.offset);
                if let Err(error) = section.remove_element_for_row(&row, position.offset) {
                    tracing::debug!(target: targets::CONTROLLER, ?path, %error, "dynamic delete failed");
                }
            }
            None => {
                section.remove(position.index);
            }
        }
    }

    fn resolve(&self, path: IndexPath) -> Option<(Arc<Row>, usize)> {
        let resolved = self.form.resolve(path.section, path.row);
        if resolved.is_none() {
            tracing::debug!(target: targets::CONTROLLER, ?path, "index path does not resolve");
        }
        resolved
    }
}

fn register<W: ListWidget + ?Sized>(widget: &mut W, row: &Row) {
    if let (Some(kind), Some(key)) = (row.element_kind(), row.reuse_key()) {
        tracing::trace!(target: targets::CONTROLLER, reuse_key = key, kind = kind.name(), "registering element kind");
        widget.register_element(kind, key);
    }
}

impl<W, S> FormDelegate for FormController<W, S>
where
    W: ListWidget + 'static,
    S: DynamicRowSource + 'static,
{
    fn sections_added(&self, _form: &Form, sections: Range<usize>) {
        let animation = self.config.animations.sections_inserted;
        self.batch(|widget| widget.insert_sections(sections, animation));
    }

    fn sections_removed(&self, _form: &Form, sections: Range<usize>) {
        let animation = self.config.animations.sections_deleted;
        self.batch(|widget| widget.delete_sections(sections, animation));
    }

    fn sections_updated(&self, _form: &Form, sections: Range<usize>) {
        let animation = self.config.animations.sections_reloaded;
        self.batch(|widget| widget.reload_sections(sections, animation));
    }

    fn rows_added(&self, _form: &Form, paths: &[IndexPath]) {
        let animation = self.config.animations.rows_inserted;
        self.batch(|widget| widget.insert_rows(paths, animation));
    }

    fn rows_removed(&self, _form: &Form, paths: &[IndexPath]) {
        let animation = self.config.animations.rows_deleted;
        self.batch(|widget| widget.delete_rows(paths, animation));
    }

    fn rows_updated(&self, _form: &Form, paths: &[IndexPath]) {
        let animation = self.config.animations.rows_reloaded;
        self.batch(|widget| widget.reload_rows(paths, animation));
    }

    fn needs_full_reload(&self, _form: &Form) {
        self.widget.lock().reload_data();
    }

    fn dynamic_row_needs_registration(&self, _form: &Form, row: &Arc<Row>) {
        register(&mut *self.widget.lock(), row);
    }
}

impl<W, S> fmt::Debug for FormController<W, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormController")
            .field("form", &self.form)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
