//! Terrace - declarative data binding between forms and list widgets.
//!
//! A form is a tree of sections holding rows. Static rows bind one element
//! each; dynamic rows expand to a variable number of elements resolved when
//! the widget asks for them. Every structural edit is translated into flat
//! index-path notifications that a list widget can apply directly.
//!
//! # Example
//!
//! ```
//! use terrace::prelude::*;
//!
//! struct Label;
//! impl Element for Label {}
//!
//! let form = Form::new();
//! form.append(Section::with_rows([
//!     Row::with_element(Label),
//!     Row::dynamic::<Label>("messages"),
//! ]));
//!
//! let section = form.section(0).unwrap();
//! section.row(1).unwrap().set_element_count(3);
//! assert_eq!(section.flat_len(), 4);
//! ```

pub use terrace_core::*;

pub mod controller;
pub mod error;
pub mod model;
pub mod prelude;

pub use error::{FormError, Result};

static_assertions::assert_impl_all!(model::Form: Send, Sync);
static_assertions::assert_impl_all!(model::Section: Send, Sync);
static_assertions::assert_impl_all!(model::Row: Send, Sync);
static_assertions::assert_impl_all!(model::FormSignals: Send, Sync);
