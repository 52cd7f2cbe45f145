//! Interfaces the controller consumes: the list widget and the dynamic row
//! data source.

use std::ops::Range;
use std::sync::Arc;

use crate::model::{Element, ElementKind, IndexPath};

/// Animation hint attached to a widget update.
///
/// The controller never interprets these; the widget maps them to whatever
/// transitions it supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RowAnimation {
    /// Cross-fade.
    Fade,
    /// Slide in from or out to the right.
    Right,
    /// Slide in from or out to the left.
    Left,
    /// Slide from the top.
    Top,
    /// Slide from the bottom.
    Bottom,
    /// No animation.
    None,
    /// Keep the surrounding rows in place.
    Middle,
    /// Let the widget pick.
    #[default]
    Automatic,
}

/// Editing affordance reported for a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditingStyle {
    /// Not editable.
    #[default]
    None,
    /// Can be deleted.
    Delete,
}

/// A list widget able to apply batched structural updates.
///
/// All indexes are flat: a dynamic row of `n` elements occupies `n`
/// consecutive widget rows. Implementations must not call back into the
/// controller's update path from these methods; count and element queries
/// are fine.
pub trait ListWidget: Send {
    /// Starts a batch of updates.
    fn begin_updates(&mut self) {}

    /// Ends a batch of updates.
    fn end_updates(&mut self) {}

    /// Inserts sections.
    fn insert_sections(&mut self, sections: Range<usize>, animation: RowAnimation);

    /// Deletes sections.
    fn delete_sections(&mut self, sections: Range<usize>, animation: RowAnimation);

    /// Reloads sections.
    fn reload_sections(&mut self, sections: Range<usize>, animation: RowAnimation);

    /// Inserts rows.
    fn insert_rows(&mut self, paths: &[IndexPath], animation: RowAnimation);

    /// Deletes rows.
    fn delete_rows(&mut self, paths: &[IndexPath], animation: RowAnimation);

    /// Reloads rows.
    fn reload_rows(&mut self, paths: &[IndexPath], animation: RowAnimation);

    /// Discards all cached layout and requeries everything.
    fn reload_data(&mut self);

    /// Registers an element kind for creation and reuse under `reuse_key`.
    fn register_element(&mut self, kind: ElementKind, reuse_key: &str);
}

/// Application hooks backing the dynamic rows of a form.
///
/// Every method has a default, so an application without dynamic rows can
/// use `()`.
pub trait DynamicRowSource: Send + Sync {
    /// Number of elements the dynamic row registered under `reuse_key`
    /// currently expands to.
    fn number_of_elements(&self, _reuse_key: &str) -> usize {
        0
    }

    /// Fills a dequeued element with the content for `offset`.
    fn configure(&self, _element: &Arc<dyn Element>, _reuse_key: &str, _offset: usize) {}

    /// The element at `offset` was selected.
    fn did_select_dynamic(&self, _reuse_key: &str, _offset: usize) {}

    /// The element at `offset` is about to be deleted; drop it from the
    /// backing data so the next count query agrees.
    fn will_delete_dynamic(&self, _reuse_key: &str, _offset: usize) {}
}

impl DynamicRowSource for () {}
