//! Error types for the form model.

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;

/// Errors returned by the dynamic-element helpers.
///
/// Structural edits never return errors: out-of-range indexes panic like the
/// corresponding `Vec` operation, and missing delegates are tolerated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// The section is not attached to a form.
    #[error("section is not attached to a form")]
    Detached,

    /// The section's form no longer lists it.
    #[error("section could not be located in its form")]
    SectionNotInForm,

    /// No row in the section uses the reuse key.
    #[error("no dynamic row with reuse key '{0}'")]
    UnknownReuseKey(String),

    /// The row does not belong to the section.
    #[error("row does not belong to this section")]
    RowNotInSection,

    /// The row is static.
    #[error("row is not dynamic")]
    NotDynamic,

    /// The element offset lies outside the row's expansion.
    #[error("element offset {offset} out of range for a row with {count} elements")]
    OffsetOutOfRange { offset: usize, count: usize },
}

impl FormError {
    /// Create an unknown reuse key error.
    pub fn unknown_reuse_key(key: impl Into<String>) -> Self {
        Self::UnknownReuseKey(key.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FormError::unknown_reuse_key("K").to_string(),
            "no dynamic row with reuse key 'K'"
        );
        assert_eq!(
            FormError::OffsetOutOfRange { offset: 4, count: 2 }.to_string(),
            "element offset 4 out of range for a row with 2 elements"
        );
    }
}
