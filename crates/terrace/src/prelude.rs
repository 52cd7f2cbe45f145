//! Prelude module for Terrace.
//!
//! ```ignore
//! use terrace::prelude::*;
//! ```
//!
//! This provides access to:
//! - The form model (`Form`, `Section`, `Row`, `IndexPath`)
//! - Element capabilities (`Element`, `StandardHeights`)
//! - The delegate protocol (`FormDelegate`, `FormSignals`)
//! - The widget adapter (`FormController`, `ListWidget`, `DynamicRowSource`)

// ============================================================================
// Form Model
// ============================================================================

pub use crate::model::{
    Element, ElementKind, Form, FormLayout, HeightDefaults, IndexPath, Row, RowHeight, Section,
    StandardHeights,
};

// ============================================================================
// Notifications
// ============================================================================

pub use crate::model::{FormDelegate, FormSignals};
pub use terrace_core::{Property, Signal};

// ============================================================================
// Widget Adapter
// ============================================================================

pub use crate::controller::{
    ControllerConfig, DynamicRowSource, EditingStyle, FormController, ListWidget, RowAnimation,
};

pub use crate::error::FormError;
