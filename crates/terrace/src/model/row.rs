//! Rows: the leaves of the form tree.
//!
//! A [`Row`] binds either one concrete UI element (a *static* row) or an
//! element kind plus reuse key (a *dynamic* row). A static row always
//! occupies one flat slot in its section; a dynamic row occupies
//! [`Row::element_count`] slots, a number the widget adapter refreshes
//! before every count query.

use std::any::{type_name, TypeId};
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use terrace_core::Property;
use terrace_core::logging::targets;

use super::section::Section;

/// Estimated height used by rows whose element declares no defaults.
pub const DEFAULT_ESTIMATED_HEIGHT: f32 = 48.0;

/// Row height as reported to the widget.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RowHeight {
    /// Let the widget size the row from its content.
    #[default]
    Automatic,
    /// A fixed height in widget units.
    Fixed(f32),
}

/// Height defaults an element type can declare.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightDefaults {
    /// Row height.
    pub height: RowHeight,
    /// Estimated row height, used before the row is measured.
    pub estimated_height: f32,
}

impl HeightDefaults {
    /// Collects the defaults declared by `T`.
    pub fn of<T: StandardHeights + ?Sized>() -> Self {
        Self {
            height: T::DEFAULT_HEIGHT,
            estimated_height: T::DEFAULT_ESTIMATED_HEIGHT,
        }
    }
}

/// Capability for element types with standard heights.
///
/// Implementing this trait alone changes nothing; the element advertises the
/// capability through [`Element::height_defaults`]:
///
/// ```
/// use terrace::model::{Element, HeightDefaults, Row, RowHeight, StandardHeights};
///
/// struct TextCell;
///
/// impl StandardHeights for TextCell {
///     const DEFAULT_HEIGHT: RowHeight = RowHeight::Fixed(100.0);
/// }
///
/// impl Element for TextCell {
///     fn height_defaults(&self) -> Option<HeightDefaults> {
///         Some(HeightDefaults::of::<Self>())
///     }
/// }
///
/// let row = Row::with_element(TextCell);
/// assert_eq!(row.height(), RowHeight::Fixed(100.0));
/// assert_eq!(row.estimated_height(), 44.0);
/// ```
pub trait StandardHeights {
    /// Default row height for this element type.
    const DEFAULT_HEIGHT: RowHeight = RowHeight::Automatic;
    /// Default estimated row height for this element type.
    const DEFAULT_ESTIMATED_HEIGHT: f32 = 44.0;
}

/// A visual element a widget can display in one flat slot.
///
/// The core never renders elements; it only stores them and forwards the
/// selection affordance.
pub trait Element: Send + Sync {
    /// Updates the element's interactive affordance (highlight on select).
    fn set_selectable(&self, _selectable: bool) {}

    /// Height defaults declared by the element's type, if any.
    fn height_defaults(&self) -> Option<HeightDefaults> {
        None
    }
}

/// The type of element a dynamic row produces.
///
/// Registered with the widget under the row's reuse key so the widget can
/// create and recycle elements of that type.
#[derive(Clone, Copy)]
pub struct ElementKind {
    type_id: TypeId,
    name: &'static str,
}

impl ElementKind {
    /// The kind for element type `T`.
    pub fn of<T: Element + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// The element type's `TypeId`.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The element type's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if this kind describes element type `T`.
    pub fn is<T: Element + 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl PartialEq for ElementKind {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ElementKind {}

impl fmt::Debug for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementKind({})", self.name)
    }
}

/// Callback invoked when a static row is selected.
pub type SelectHandler = Arc<dyn Fn() + Send + Sync>;

enum Binding {
    Unbound,
    Static(Arc<dyn Element>),
    Dynamic {
        kind: ElementKind,
        reuse_key: String,
    },
}

/// A leaf of the form tree.
///
/// Rows are built by value and become shared (`Arc<Row>`) when inserted into
/// a [`Section`]. Attributes use interior mutability so they can still be
/// changed through the shared handle.
///
/// # Example
///
/// ```
/// use terrace::model::{Element, Row};
///
/// struct Label;
/// impl Element for Label {}
///
/// let row = Row::with_element(Label)
///     .with_can_delete(true)
///     .with_on_select(|| println!("selected"));
/// assert!(!row.is_dynamic());
/// assert_eq!(row.flat_len(), 1);
///
/// let list = Row::dynamic::<Label>("contacts");
/// assert!(list.is_dynamic());
/// assert_eq!(list.reuse_key(), Some("contacts"));
/// ```
pub struct Row {
    binding: Binding,
    can_select: Property<bool>,
    can_delete: Property<bool>,
    height: Property<RowHeight>,
    estimated_height: Property<f32>,
    element_count: Property<usize>,
    on_select: RwLock<Option<SelectHandler>>,
    section: RwLock<Weak<Section>>,
}

impl Default for Row {
    /// An unbound row; [`Row::is_valid`] is `false` for it.
    fn default() -> Self {
        Self {
            binding: Binding::Unbound,
            can_select: Property::new(true),
            can_delete: Property::new(false),
            height: Property::new(RowHeight::Automatic),
            estimated_height: Property::new(DEFAULT_ESTIMATED_HEIGHT),
            element_count: Property::new(1),
            on_select: RwLock::new(None),
            section: RwLock::new(Weak::new()),
        }
    }
}

impl Row {
    /// Creates a static row owning `element`.
    ///
    /// If the element declares [`HeightDefaults`], the row adopts them.
    pub fn with_element<E: Element + 'static>(element: E) -> Self {
        Self::with_shared_element(Arc::new(element))
    }

    /// Creates a static row from an already shared element.
    pub fn with_shared_element(element: Arc<dyn Element>) -> Self {
        let row = Self::default();
        if let Some(defaults) = element.height_defaults() {
            row.height.set_silent(defaults.height);
            row.estimated_height.set_silent(defaults.estimated_height);
        }
        Self {
            binding: Binding::Static(element),
            ..row
        }
    }

    /// Creates a dynamic row producing elements of type `E` under `reuse_key`.
    pub fn dynamic<E: Element + 'static>(reuse_key: impl Into<String>) -> Self {
        Self::dynamic_with_kind(ElementKind::of::<E>(), reuse_key)
    }

    /// Creates a dynamic row for an explicit element kind.
    pub fn dynamic_with_kind(kind: ElementKind, reuse_key: impl Into<String>) -> Self {
        Self {
            binding: Binding::Dynamic {
                kind,
                reuse_key: reuse_key.into(),
            },
            ..Self::default()
        }
    }

    // -------------------------------------------------------------------------
    // Builder methods
    // -------------------------------------------------------------------------

    /// Sets whether the row can be selected.
    pub fn with_can_select(self, can_select: bool) -> Self {
        self.set_can_select(can_select);
        self
    }

    /// Sets whether the row can be deleted.
    pub fn with_can_delete(self, can_delete: bool) -> Self {
        self.can_delete.set(can_delete);
        self
    }

    /// Sets the row height.
    pub fn with_height(self, height: RowHeight) -> Self {
        self.height.set(height);
        self
    }

    /// Sets the estimated row height.
    pub fn with_estimated_height(self, height: f32) -> Self {
        self.estimated_height.set(height);
        self
    }

    /// Sets the selection callback.
    pub fn with_on_select<F>(self, handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_select(handler);
        self
    }

    // -------------------------------------------------------------------------
    // Binding
    // -------------------------------------------------------------------------

    /// Returns `true` if the row is bound to an element kind and reuse key.
    pub fn is_dynamic(&self) -> bool {
        matches!(self.binding, Binding::Dynamic { .. })
    }

    /// Returns `true` if the row has a static element or is dynamic.
    ///
    /// Advisory only: invalid rows are accepted everywhere, but an adapter
    /// must never render one.
    pub fn is_valid(&self) -> bool {
        !matches!(self.binding, Binding::Unbound)
    }

    /// The bound element of a static row.
    pub fn element(&self) -> Option<Arc<dyn Element>> {
        match &self.binding {
            Binding::Static(element) => Some(element.clone()),
            _ => None,
        }
    }

    /// The element kind of a dynamic row.
    pub fn element_kind(&self) -> Option<ElementKind> {
        match &self.binding {
            Binding::Dynamic { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// The reuse key of a dynamic row.
    pub fn reuse_key(&self) -> Option<&str> {
        match &self.binding {
            Binding::Dynamic { reuse_key, .. } => Some(reuse_key),
            _ => None,
        }
    }

    // -------------------------------------------------------------------------
    // Attributes
    // -------------------------------------------------------------------------

    /// Whether the row can be selected.
    pub fn can_select(&self) -> bool {
        self.can_select.get()
    }

    /// Sets whether the row can be selected.
    ///
    /// A static row's element is updated immediately.
    pub fn set_can_select(&self, can_select: bool) {
        self.can_select.set(can_select);
        if let Binding::Static(element) = &self.binding {
            element.set_selectable(can_select);
        }
    }

    /// Whether the row can be deleted.
    pub fn can_delete(&self) -> bool {
        self.can_delete.get()
    }

    /// Sets whether the row can be deleted.
    pub fn set_can_delete(&self, can_delete: bool) {
        self.can_delete.set(can_delete);
    }

    /// The row height.
    pub fn height(&self) -> RowHeight {
        self.height.get()
    }

    /// Sets the row height.
    pub fn set_height(&self, height: RowHeight) {
        self.height.set(height);
    }

    /// The estimated row height.
    pub fn estimated_height(&self) -> f32 {
        self.estimated_height.get()
    }

    /// Sets the estimated row height.
    pub fn set_estimated_height(&self, height: f32) {
        self.estimated_height.set(height);
    }

    /// Number of elements a dynamic row expands to. Defaults to 1.
    pub fn element_count(&self) -> usize {
        self.element_count.get()
    }

    /// Sets the number of elements a dynamic row expands to.
    ///
    /// Called by the adapter before each count query. Has no effect on the
    /// layout of static rows.
    pub fn set_element_count(&self, count: usize) {
        if self.element_count.set(count) {
            tracing::trace!(target: targets::ROW, reuse_key = ?self.reuse_key(), count, "element count changed");
        }
    }

    /// Number of flat slots this row occupies.
    pub fn flat_len(&self) -> usize {
        if self.is_dynamic() {
            self.element_count()
        } else {
            1
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Registers the selection callback, replacing any previous one.
    pub fn on_select<F>(&self, handler: F) -> &Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        *self.on_select.write() = Some(Arc::new(handler));
        self
    }

    /// Returns `true` if a selection callback is registered.
    pub fn has_select_handler(&self) -> bool {
        self.on_select.read().is_some()
    }

    /// Invokes the selection callback of a static row.
    ///
    /// Returns `true` if a callback ran. Dynamic rows never run their
    /// callback; their selection is routed through the adapter.
    pub fn select(&self) -> bool {
        if self.is_dynamic() {
            return false;
        }
        let handler = self.on_select.read().clone();
        match handler {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    // -------------------------------------------------------------------------
    // Ownership
    // -------------------------------------------------------------------------

    /// The section currently holding this row.
    pub fn section(&self) -> Option<Arc<Section>> {
        self.section.read().upgrade()
    }

    pub(crate) fn attach(&self, section: Weak<Section>) {
        let mut current = self.section.write();
        if current.strong_count() > 0 && !current.ptr_eq(&section) {
            tracing::warn!(target: targets::ROW, "row moved into a second section while still attached");
        }
        *current = section;
    }

    pub(crate) fn detach(&self) {
        *self.section.write() = Weak::new();
    }
}

impl fmt::Debug for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Row");
        match &self.binding {
            Binding::Unbound => s.field("binding", &"unbound"),
            Binding::Static(_) => s.field("binding", &"static"),
            Binding::Dynamic { kind, reuse_key } => s
                .field("kind", kind)
                .field("reuse_key", reuse_key)
                .field("element_count", &self.element_count()),
        };
        s.field("can_select", &self.can_select())
            .field("can_delete", &self.can_delete())
            .finish()
    }
}
