//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::ops::Range;
use std::sync::Arc;

use parking_lot::Mutex;
use terrace::model::{Element, Form, FormDelegate, IndexPath, Row, Section};

/// A notification as seen by the delegate.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    SectionsAdded(Range<usize>),
    SectionsRemoved(Range<usize>),
    SectionsUpdated(Range<usize>),
    RowsAdded(Vec<IndexPath>),
    RowsRemoved(Vec<IndexPath>),
    RowsUpdated(Vec<IndexPath>),
    FullReload,
    Register(String),
}

/// Records every notification in arrival order.
#[derive(Default)]
pub struct Recorder {
    events: Mutex<Vec<Event>>,
}

impl Recorder {
    pub fn attach(form: &Form) -> Arc<Self> {
        let recorder = Arc::new(Self::default());
        form.set_delegate(&recorder);
        recorder
    }

    pub fn take(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.lock())
    }

    fn push(&self, event: Event) {
        self.events.lock().push(event);
    }
}

impl FormDelegate for Recorder {
    fn sections_added(&self, _form: &Form, sections: Range<usize>) {
        self.push(Event::SectionsAdded(sections));
    }

    fn sections_removed(&self, _form: &Form, sections: Range<usize>) {
        self.push(Event::SectionsRemoved(sections));
    }

    fn sections_updated(&self, _form: &Form, sections: Range<usize>) {
        self.push(Event::SectionsUpdated(sections));
    }

    fn rows_added(&self, _form: &Form, paths: &[IndexPath]) {
        self.push(Event::RowsAdded(paths.to_vec()));
    }

    fn rows_removed(&self, _form: &Form, paths: &[IndexPath]) {
        self.push(Event::RowsRemoved(paths.to_vec()));
    }

    fn rows_updated(&self, _form: &Form, paths: &[IndexPath]) {
        self.push(Event::RowsUpdated(paths.to_vec()));
    }

    fn needs_full_reload(&self, _form: &Form) {
        self.push(Event::FullReload);
    }

    fn dynamic_row_needs_registration(&self, _form: &Form, row: &Arc<Row>) {
        self.push(Event::Register(row.reuse_key().unwrap_or_default().to_string()));
    }
}

pub struct Cell;

impl Element for Cell {}

pub fn fixed() -> Row {
    Row::with_element(Cell)
}

pub fn dynamic(key: &str, count: usize) -> Row {
    let row = Row::dynamic::<Cell>(key);
    row.set_element_count(count);
    row
}

pub fn paths(section: usize, rows: &[usize]) -> Vec<IndexPath> {
    rows.iter().map(|&row| IndexPath::new(section, row)).collect()
}

/// A form holding one section with `rows`, plus a recorder with no events yet.
pub fn single_section(rows: Vec<Row>) -> (Arc<Form>, Arc<Section>, Arc<Recorder>) {
    let form = Form::new();
    let section = Section::with_rows(rows);
    form.append(section.clone());
    let recorder = Recorder::attach(&form);
    (form, section, recorder)
}
