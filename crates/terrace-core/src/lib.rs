//! Core primitives for Terrace.
//!
//! This crate provides the observer plumbing the form model is built on:
//!
//! - [`Signal`]: synchronous fan-out of form notifications
//! - [`Property`]: attribute values shared behind `Arc` with change detection
//! - [`logging`]: `tracing` targets, tree formatting options, perf spans

pub mod logging;
pub mod property;
pub mod signal;

pub use logging::{PerfSpan, TreeFormatOptions, TreeStyle};
pub use property::Property;
pub use signal::{ConnectionId, Signal};
