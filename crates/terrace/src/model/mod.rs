//! The form model: sections of rows bound to a list widget.
//!
//! This module provides a mutable, observable tree that a list widget can be
//! driven from:
//!
//! - [`Form`]: root container, owns the sections and the delegate reference
//! - [`Section`]: ordered rows, translates between row and flat indexes
//! - [`Row`]: one static element, or one dynamic run of elements
//! - [`FormDelegate`]: receives structural-change notifications
//! - [`FormSignals`]: a delegate that re-emits notifications as signals
//!
//! # Static and dynamic rows
//!
//! A static row binds exactly one [`Element`] and occupies one flat slot. A
//! dynamic row binds an [`ElementKind`] plus a reuse key and occupies
//! [`Row::element_count`] flat slots, a count the widget adapter refreshes
//! before each read.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use terrace::model::{Element, Form, FormSignals, IndexPath, Row, Section};
//!
//! struct Label;
//! impl Element for Label {}
//!
//! let form = Form::new();
//! let signals = Arc::new(FormSignals::new());
//! form.set_delegate(&signals);
//!
//! let removed = Arc::new(Mutex::new(Vec::new()));
//! let removed_clone = removed.clone();
//! signals.rows_removed.connect(move |paths| removed_clone.lock().extend(paths.iter().copied()));
//!
//! form.append(Section::with_rows([
//!     Row::with_element(Label),
//!     Row::with_element(Label),
//!     Row::with_element(Label),
//! ]));
//! form.section(0).unwrap().remove(1);
//!
//! assert_eq!(*removed.lock(), vec![IndexPath::new(0, 1)]);
//! ```
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────┐  edits   ┌─────────────┐  notifications  ┌──────────────┐
//! │ Application │────────> │ Form        │───────────────> │ FormDelegate │
//! └─────────────┘          │  Section    │                 │ (controller) │
//!                          │   Row       │ <───────────────│              │
//!                          └─────────────┘  count/resolve  └──────────────┘
//! ```

mod debug;
mod delegate;
mod form;
mod index;
mod iter;
mod row;
mod section;

pub use debug::FormTreeDebug;
pub use delegate::{FormDelegate, FormSignals};
pub use form::{Form, FormLayout};
pub use index::{IndexPath, RowPosition};
pub use iter::AllRows;
pub use row::{
    Element, ElementKind, HeightDefaults, Row, RowHeight, SelectHandler, StandardHeights,
    DEFAULT_ESTIMATED_HEIGHT,
};
pub use section::Section;
