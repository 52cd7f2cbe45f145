//! Terrace demo: a settings-style form driven through a console widget.
//!
//! Builds a form from a layout, binds it to a widget that prints every
//! update it receives, then edits the form and answers a few widget queries.
//!
//! Run with: RUST_LOG=terrace=debug cargo run -p terrace --example root_form

use std::ops::Range;
use std::sync::Arc;

use parking_lot::Mutex;
use terrace::prelude::*;
use tracing_subscriber::EnvFilter;

/// A cell with a title and a detail line.
struct DetailCell {
    title: String,
    detail: String,
}

impl DetailCell {
    fn row(title: impl Into<String>, detail: impl Into<String>) -> Row {
        Row::with_element(Self {
            title: title.into(),
            detail: detail.into(),
        })
    }
}

impl Element for DetailCell {
    fn set_selectable(&self, selectable: bool) {
        tracing::info!(title = %self.title, detail = %self.detail, selectable, "selection affordance changed");
    }
}

/// A tall multi-line text cell.
struct TextCell;

impl StandardHeights for TextCell {
    const DEFAULT_HEIGHT: RowHeight = RowHeight::Fixed(100.0);
}

impl Element for TextCell {
    fn height_defaults(&self) -> Option<HeightDefaults> {
        Some(HeightDefaults::of::<Self>())
    }
}

/// Cells for the "recent" dynamic row.
struct RecentCell;

impl Element for RecentCell {}

struct RootForm;

impl FormLayout for RootForm {
    fn default_section(&self) -> Option<Arc<Section>> {
        Some(Section::with_rows([
            DetailCell::row("First", "first detail"),
            DetailCell::row("Section", "second detail"),
        ]))
    }

    fn initial_sections(&self) -> Vec<Arc<Section>> {
        let mut sections: Vec<Arc<Section>> = self.default_section().into_iter().collect();
        sections.push(
            Section::with_rows((0..=10).map(|n| DetailCell::row(n.to_string(), "details")))
                .with_header_title("Numbers"),
        );
        sections.push(Section::with_rows([Row::with_element(TextCell)]));
        sections.push(
            Section::with_rows([Row::dynamic::<RecentCell>("recent").with_can_delete(true)])
                .with_header_title("Recent"),
        );
        sections
    }

    fn prepare_targets(&self, form: &Form) {
        if let Some((row, _)) = form.resolve(0, 0) {
            row.on_select(|| tracing::info!("first row selected"));
        }
    }
}

/// Prints each update instead of drawing it.
struct ConsoleWidget;

impl ListWidget for ConsoleWidget {
    fn begin_updates(&mut self) {
        println!("  begin updates");
    }

    fn end_updates(&mut self) {
        println!("  end updates");
    }

    fn insert_sections(&mut self, sections: Range<usize>, animation: RowAnimation) {
        println!("    insert sections {sections:?} ({animation:?})");
    }

    fn delete_sections(&mut self, sections: Range<usize>, animation: RowAnimation) {
        println!("    delete sections {sections:?} ({animation:?})");
    }

    fn reload_sections(&mut self, sections: Range<usize>, animation: RowAnimation) {
        println!("    reload sections {sections:?} ({animation:?})");
    }

    fn insert_rows(&mut self, paths: &[IndexPath], animation: RowAnimation) {
        println!("    insert rows {paths:?} ({animation:?})");
    }

    fn delete_rows(&mut self, paths: &[IndexPath], animation: RowAnimation) {
        println!("    delete rows {paths:?} ({animation:?})");
    }

    fn reload_rows(&mut self, paths: &[IndexPath], animation: RowAnimation) {
        println!("    reload rows {paths:?} ({animation:?})");
    }

    fn reload_data(&mut self) {
        println!("  reload data");
    }

    fn register_element(&mut self, kind: ElementKind, reuse_key: &str) {
        println!("  register {} as {reuse_key:?}", kind.name());
    }
}

/// Recent items backing the dynamic row.
#[derive(Default)]
struct Recent {
    items: Mutex<Vec<String>>,
}

impl DynamicRowSource for Recent {
    fn number_of_elements(&self, _reuse_key: &str) -> usize {
        self.items.lock().len()
    }

    fn did_select_dynamic(&self, _reuse_key: &str, offset: usize) {
        if let Some(item) = self.items.lock().get(offset) {
            tracing::info!(item = %item, "recent item selected");
        }
    }

    fn will_delete_dynamic(&self, _reuse_key: &str, offset: usize) {
        let mut items = self.items.lock();
        if offset < items.len() {
            items.remove(offset);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let controller = FormController::from_layout(&RootForm, ConsoleWidget, Recent::default());
    println!("load:");
    controller.load();

    println!("{}", controller.form().debug_tree());

    let numbers = controller.form().section(1).map(|s| s.len()).unwrap_or_default();
    println!("numbers section holds {numbers} rows");

    println!("append a row to the first section:");
    if let Some(section) = controller.form().section(0) {
        section.append(DetailCell::row("Third", "appended"));
    }

    println!("add two recent items:");
    controller.number_of_rows(3);
    if let Some(section) = controller.form().section(3) {
        for item in ["alpha", "beta"] {
            controller.source().items.lock().push(item.to_string());
            if let Err(error) = section.append_element("recent") {
                tracing::warn!(%error, "could not append recent item");
            }
        }
    }
    println!("recent rows: {}", controller.number_of_rows(3));

    println!("select and delete:");
    controller.did_select(IndexPath::new(0, 0));
    controller.did_select(IndexPath::new(3, 1));
    controller.commit_delete(IndexPath::new(3, 0));
    println!("recent rows: {}", controller.number_of_rows(3));

    let text = IndexPath::new(2, 0);
    println!(
        "text cell height {:?}, estimated {:?}",
        controller.row_height(text),
        controller.estimated_row_height(text)
    );

    println!("drop the numbers section:");
    controller.form().remove(1);

    println!("{}", controller.form().debug_tree());

    if let Some((row, _)) = controller.form().resolve(0, 2) {
        row.set_can_select(false);
        println!("appended row selectable: {:?}", controller.will_select(IndexPath::new(0, 2)));
    }
}
