//! Lazy traversal over every row of a form.

use std::sync::Arc;

use super::form::Form;
use super::row::Row;

/// Iterator over every row of a [`Form`], section by section.
///
/// Created by [`Form::rows`]. Rows are looked up one at a time, so no
/// intermediate list is built. The iterator borrows the form and cannot
/// outlive it.
#[derive(Debug, Clone)]
pub struct AllRows<'a> {
    form: &'a Form,
    section: usize,
    row: usize,
}

impl<'a> AllRows<'a> {
    pub(crate) fn new(form: &'a Form) -> Self {
        Self {
            form,
            section: 0,
            row: 0,
        }
    }
}

impl Iterator for AllRows<'_> {
    type Item = Arc<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let section = self.form.section(self.section)?;
            if let Some(row) = section.row(self.row) {
                self.row += 1;
                return Some(row);
            }
            self.section += 1;
            self.row = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Element, Section};

    struct Cell;
    impl Element for Cell {}

    #[test]
    fn test_walks_sections_in_order_and_skips_empty_ones() {
        let form = Form::new();
        form.append(Section::with_rows([Row::with_element(Cell)]));
        form.append(Section::new());
        form.append(Section::with_rows([
            Row::dynamic::<Cell>("a"),
            Row::with_element(Cell),
        ]));

        let rows: Vec<_> = form.rows().collect();
        assert_eq!(rows.len(), 3);
        assert!(!rows[0].is_dynamic());
        assert!(rows[1].is_dynamic());
        assert!(!rows[2].is_dynamic());
    }

    #[test]
    fn test_each_call_restarts() {
        let form = Form::new();
        form.append(Section::with_rows([Row::with_element(Cell), Row::with_element(Cell)]));

        let mut first = form.rows();
        assert!(first.next().is_some());

        assert_eq!(form.rows().count(), 2);
        assert_eq!(first.count(), 1);
    }

    #[test]
    fn test_empty_form() {
        assert_eq!(Form::new().rows().count(), 0);
    }
}
