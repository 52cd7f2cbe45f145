//! Binding a form to a list widget.
//!
//! [`FormController`] is the adapter between the form model and a concrete
//! list widget. The widget is abstracted by [`ListWidget`], which only needs
//! batched insert/delete/reload operations by flat index. The content of
//! dynamic rows comes from a [`DynamicRowSource`].
//!
//! Animation hints and header metrics live in [`ControllerConfig`].

mod config;
mod form_controller;
mod widget;

pub use config::{ControllerConfig, UpdateAnimations};
pub use form_controller::FormController;
pub use widget::{DynamicRowSource, EditingStyle, ListWidget, RowAnimation};
