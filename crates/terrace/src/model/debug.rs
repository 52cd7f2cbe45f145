//! Tree visualization for forms.
//!
//! ```
//! use terrace::model::{Element, Form, Row, Section};
//! use terrace::logging::{TreeFormatOptions, TreeStyle};
//!
//! struct Label;
//! impl Element for Label {}
//!
//! let form = Form::new();
//! form.append(Section::with_rows([Row::with_element(Label)]).with_header_title("General"));
//!
//! let dump = form
//!     .debug_tree()
//!     .with_options(TreeFormatOptions::minimal().with_style(TreeStyle::Ascii))
//!     .to_string();
//! assert_eq!(dump, "Form (1 sections)\n`-- Section 0 \"General\"\n   `-- static\n");
//! ```

use std::fmt::{self, Write as _};

use terrace_core::logging::{TreeFormatOptions, TreeStyle};

use super::form::Form;
use super::row::Row;
use super::section::Section;

/// Printable view of a form's section/row tree.
///
/// Created by [`Form::debug_tree`].
pub struct FormTreeDebug<'a> {
    form: &'a Form,
    options: TreeFormatOptions,
}

impl<'a> FormTreeDebug<'a> {
    pub(crate) fn new(form: &'a Form) -> Self {
        Self {
            form,
            options: TreeFormatOptions::default(),
        }
    }

    /// Use custom format options.
    pub fn with_options(mut self, options: TreeFormatOptions) -> Self {
        self.options = options;
        self
    }

    fn depth_allowed(&self, depth: usize) -> bool {
        self.options.max_depth.is_none_or(|max| depth <= max)
    }

    fn write_section(
        &self,
        f: &mut fmt::Formatter<'_>,
        index: usize,
        section: &Section,
        is_last: bool,
    ) -> fmt::Result {
        f.write_str(&self.options.prefix(1, is_last))?;
        write!(f, "Section {index}")?;
        if let Some(title) = section.header_title() {
            write!(f, " {title:?}")?;
        }
        if self.options.show_details {
            write!(f, " [rows={}, flat={}]", section.len(), section.flat_len())?;
        }
        self.end_line(f)?;

        if !self.depth_allowed(2) {
            return Ok(());
        }
        let rows = section.rows();
        let last = rows.len().saturating_sub(1);
        for (i, row) in rows.iter().enumerate() {
            self.write_row(f, row, i == last, is_last)?;
        }
        Ok(())
    }

    fn write_row(
        &self,
        f: &mut fmt::Formatter<'_>,
        row: &Row,
        is_last: bool,
        parent_is_last: bool,
    ) -> fmt::Result {
        let mut prefix = self.options.prefix(2, is_last);
        if parent_is_last && self.options.style != TreeStyle::Compact {
            // No sibling section follows, so the branch line is blank.
            let branch_width = prefix.len() - self.options.prefix(1, is_last).len();
            prefix.replace_range(..branch_width, &" ".repeat(self.options.indent_size + 1));
        }
        f.write_str(&prefix)?;

        match (row.reuse_key(), row.is_valid()) {
            (Some(key), _) => write!(f, "dynamic {key:?} x{}", row.element_count())?,
            (None, true) => f.write_str("static")?,
            (None, false) => f.write_str("invalid")?,
        }
        if self.options.show_details {
            let mut flags = String::new();
            if row.can_select() {
                flags.push_str(" selectable");
            }
            if row.can_delete() {
                flags.push_str(" deletable");
            }
            write!(f, " [{}]", flags.trim_start())?;
        }
        self.end_line(f)
    }

    fn end_line(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.options.style == TreeStyle::Compact {
            f.write_char(' ')
        } else {
            f.write_char('\n')
        }
    }
}

impl fmt::Display for FormTreeDebug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sections = self.form.sections();
        write!(f, "Form ({} sections)", sections.len())?;
        self.end_line(f)?;

        if !self.depth_allowed(1) {
            return Ok(());
        }
        let last = sections.len().saturating_sub(1);
        for (i, section) in sections.iter().enumerate() {
            self.write_section(f, i, section, i == last)?;
        }
        Ok(())
    }
}
