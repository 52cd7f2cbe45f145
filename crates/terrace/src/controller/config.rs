//! Configuration for the form controller.

use super::widget::RowAnimation;
use crate::model::RowHeight;

/// Animation hints passed to the widget for each kind of update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpdateAnimations {
    /// Used when sections are inserted.
    pub sections_inserted: RowAnimation,
    /// Used when sections are deleted.
    pub sections_deleted: RowAnimation,
    /// Used when sections are reloaded.
    pub sections_reloaded: RowAnimation,
    /// Used when rows are inserted.
    pub rows_inserted: RowAnimation,
    /// Used when rows are deleted.
    pub rows_deleted: RowAnimation,
    /// Used when rows are reloaded.
    pub rows_reloaded: RowAnimation,
}

impl Default for UpdateAnimations {
    fn default() -> Self {
        Self {
            sections_inserted: RowAnimation::Fade,
            sections_deleted: RowAnimation::Fade,
            sections_reloaded: RowAnimation::Automatic,
            rows_inserted: RowAnimation::Middle,
            rows_deleted: RowAnimation::Top,
            rows_reloaded: RowAnimation::Automatic,
        }
    }
}

impl UpdateAnimations {
    /// The same hint for every update.
    pub fn uniform(animation: RowAnimation) -> Self {
        Self {
            sections_inserted: animation,
            sections_deleted: animation,
            sections_reloaded: animation,
            rows_inserted: animation,
            rows_deleted: animation,
            rows_reloaded: animation,
        }
    }
}

/// Configuration for a [`FormController`](super::FormController).
///
/// # Example
///
/// ```
/// use terrace::controller::{ControllerConfig, RowAnimation};
///
/// let config = ControllerConfig::new()
///     .rows_inserted(RowAnimation::Fade)
///     .estimated_header_height(24.0);
/// assert_eq!(config.animations.rows_deleted, RowAnimation::Top);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ControllerConfig {
    /// Animation hints per update kind.
    pub animations: UpdateAnimations,
    /// Section header height.
    pub header_height: RowHeight,
    /// Estimated section header height.
    pub estimated_header_height: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            animations: UpdateAnimations::default(),
            header_height: RowHeight::Automatic,
            estimated_header_height: 10.0,
        }
    }
}

impl ControllerConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every animation hint.
    pub fn animations(mut self, animations: UpdateAnimations) -> Self {
        self.animations = animations;
        self
    }

    /// Pass [`RowAnimation::None`] for every update.
    pub fn no_animations(self) -> Self {
        self.animations(UpdateAnimations::uniform(RowAnimation::None))
    }

    /// Set the hint for inserted sections.
    pub fn sections_inserted(mut self, animation: RowAnimation) -> Self {
        self.animations.sections_inserted = animation;
        self
    }

    /// Set the hint for deleted sections.
    pub fn sections_deleted(mut self, animation: RowAnimation) -> Self {
        self.animations.sections_deleted = animation;
        self
    }

    /// Set the hint for reloaded sections.
    pub fn sections_reloaded(mut self, animation: RowAnimation) -> Self {
        self.animations.sections_reloaded = animation;
        self
    }

    /// Set the hint for inserted rows.
    pub fn rows_inserted(mut self, animation: RowAnimation) -> Self {
        self.animations.rows_inserted = animation;
        self
    }

    /// Set the hint for deleted rows.
    pub fn rows_deleted(mut self, animation: RowAnimation) -> Self {
        self.animations.rows_deleted = animation;
        self
    }

    /// Set the hint for reloaded rows.
    pub fn rows_reloaded(mut self, animation: RowAnimation) -> Self {
        self.animations.rows_reloaded = animation;
        self
    }

    /// Set the section header height.
    pub fn header_height(mut self, height: RowHeight) -> Self {
        self.header_height = height;
        self
    }

    /// Set the estimated section header height.
    pub fn estimated_header_height(mut self, height: f32) -> Self {
        self.estimated_header_height = height;
        self
    }
}
