//! Tests for section edits and the notifications they produce.

mod support;

use std::sync::Arc;

use terrace::FormError;
use terrace::model::{Form, FormSignals, IndexPath, RowPosition, Section};

use support::{Event, dynamic, fixed, paths, single_section};

// =========================================================================
// Index translation
// =========================================================================

#[test]
fn test_static_only_flat_index_tracks_row_index() {
    let (_form, section, _recorder) = single_section(vec![fixed(), fixed()]);

    section.insert(0, fixed());
    section.append_all([fixed(), fixed()]);
    section.remove(2);
    section.insert_all(1, [fixed(), fixed()]);
    section.remove_range(0..2);

    for i in 0..=section.len() {
        assert_eq!(section.flat_index(i), i);
    }
}

#[test]
fn test_dynamic_run_maps_back_to_its_row() {
    let section = Section::with_rows([fixed(), fixed(), dynamic("K", 4), fixed()]);
    let start = section.flat_index(2);
    assert_eq!(start, 2);

    for t in start..start + 4 {
        assert_eq!(section.row_position(t), Some(RowPosition::new(2, t - start)));
    }
    assert_eq!(section.row_position(start + 4), Some(RowPosition::new(3, 0)));
}

#[test]
fn test_scenario_second_slot_of_dynamic_row() {
    let section = Section::with_rows([fixed(), dynamic("K", 2), fixed()]);
    assert_eq!(section.row_position(2), Some(RowPosition::new(1, 1)));
}

// =========================================================================
// Static edits
// =========================================================================

#[test]
fn test_insert_reports_post_insert_flat_index() {
    let (_form, section, recorder) = single_section(vec![dynamic("K", 2), fixed()]);
    recorder.take();

    section.insert(1, fixed());

    assert_eq!(section.flat_index(1), 2);
    assert_eq!(recorder.take(), vec![Event::RowsAdded(paths(0, &[2]))]);
}

#[test]
fn test_insert_all_reports_consecutive_paths() {
    let (_form, section, recorder) = single_section(vec![fixed(), fixed()]);

    section.insert_all(1, [fixed(), fixed(), fixed()]);

    assert_eq!(recorder.take(), vec![Event::RowsAdded(paths(0, &[1, 2, 3]))]);
}

#[test]
fn test_append_reports_in_second_section() {
    let form = Form::new();
    form.append_all([Section::new(), Section::with_rows([fixed()])]);
    let recorder = support::Recorder::attach(&form);

    form.section(1).unwrap().append(fixed());

    assert_eq!(recorder.take(), vec![Event::RowsAdded(paths(1, &[1]))]);
}

#[test]
fn test_scenario_remove_middle_static_row() {
    let (_form, section, recorder) = single_section(vec![fixed(), fixed(), fixed()]);
    let former_third = section.row(2).unwrap();

    section.remove(1);

    assert_eq!(recorder.take(), vec![Event::RowsRemoved(paths(0, &[1]))]);
    let position = section.row_position(section.flat_index(1)).unwrap();
    assert!(Arc::ptr_eq(&section.row(position.index).unwrap(), &former_third));
}

#[test]
fn test_remove_reports_pre_removal_flat_index() {
    let (_form, section, recorder) = single_section(vec![dynamic("K", 3), fixed(), fixed()]);

    section.remove(2);

    assert_eq!(recorder.take(), vec![Event::RowsRemoved(paths(0, &[4]))]);
}

#[test]
fn test_remove_range_static() {
    let (_form, section, recorder) = single_section(vec![fixed(), fixed(), fixed(), fixed()]);

    let removed = section.remove_range(1..3);

    assert_eq!(removed.len(), 2);
    assert!(removed.iter().all(|row| row.section().is_none()));
    assert_eq!(recorder.take(), vec![Event::RowsRemoved(paths(0, &[1, 2]))]);

    section.remove_range(1..1);
    assert!(recorder.take().is_empty());
}

#[test]
fn test_update_static_row() {
    let (_form, section, recorder) = single_section(vec![dynamic("K", 2), fixed()]);
    recorder.take();

    section.update(1, fixed());

    assert_eq!(recorder.take(), vec![Event::RowsUpdated(paths(0, &[2]))]);
}

#[test]
fn test_replace_range_growing() {
    let (_form, section, recorder) = single_section(vec![fixed(), fixed()]);

    let removed = section.replace_range(1..2, [fixed(), fixed(), fixed()]);

    assert_eq!(removed.len(), 1);
    assert_eq!(section.len(), 4);
    assert_eq!(
        recorder.take(),
        vec![
            Event::RowsAdded(paths(0, &[2, 3])),
            Event::RowsUpdated(paths(0, &[1])),
        ]
    );
}

#[test]
fn test_replace_range_shrinking() {
    let (_form, section, recorder) = single_section(vec![fixed(), fixed(), fixed(), fixed()]);

    section.replace_range(0..3, [fixed()]);

    assert_eq!(section.len(), 2);
    assert_eq!(
        recorder.take(),
        vec![
            Event::RowsRemoved(paths(0, &[1, 2])),
            Event::RowsUpdated(paths(0, &[0])),
        ]
    );
}

// =========================================================================
// Dynamic edits
// =========================================================================

#[test]
fn test_inserting_dynamic_row_updates_section() {
    let (_form, section, recorder) = single_section(vec![fixed(), fixed()]);

    section.insert(1, dynamic("K", 3));

    let events = recorder.take();
    assert_eq!(
        events,
        vec![
            Event::Register("K".to_string()),
            Event::SectionsUpdated(0..1),
        ]
    );
    assert!(!events.iter().any(|e| matches!(e, Event::RowsAdded(_))));
}

#[test]
fn test_scenario_append_dynamic_registers_once() {
    let (_form, section, recorder) = single_section(vec![fixed()]);

    section.append(dynamic("K", 1));

    assert_eq!(
        recorder.take(),
        vec![
            Event::Register("K".to_string()),
            Event::SectionsUpdated(0..1),
        ]
    );
}

#[test]
fn test_removing_dynamic_row_updates_section() {
    let (_form, section, recorder) = single_section(vec![fixed(), dynamic("K", 2)]);
    recorder.take();

    section.remove(1);

    assert_eq!(recorder.take(), vec![Event::SectionsUpdated(0..1)]);
}

#[test]
fn test_mixed_batch_falls_back_to_section_update() {
    let (_form, section, recorder) = single_section(vec![fixed()]);

    section.append_all([fixed(), dynamic("A", 1), fixed(), dynamic("B", 1)]);

    assert_eq!(
        recorder.take(),
        vec![
            Event::Register("A".to_string()),
            Event::Register("B".to_string()),
            Event::SectionsUpdated(0..1),
        ]
    );
}

#[test]
fn test_update_to_or_from_dynamic_updates_section() {
    let (_form, section, recorder) = single_section(vec![fixed(), fixed()]);

    section.update(0, dynamic("K", 1));
    assert_eq!(
        recorder.take(),
        vec![
            Event::Register("K".to_string()),
            Event::SectionsUpdated(0..1),
        ]
    );

    section.update(0, fixed());
    assert_eq!(recorder.take(), vec![Event::SectionsUpdated(0..1)]);
}

#[test]
fn test_replace_range_with_dynamic_updates_section() {
    let (_form, section, recorder) = single_section(vec![fixed(), fixed()]);

    section.replace_range(0..1, [dynamic("K", 2)]);

    assert_eq!(
        recorder.take(),
        vec![
            Event::Register("K".to_string()),
            Event::SectionsUpdated(0..1),
        ]
    );
}

#[test]
fn test_remove_all_updates_section() {
    let (_form, section, recorder) = single_section(vec![fixed(), fixed()]);

    assert_eq!(section.remove_all().len(), 2);
    assert_eq!(recorder.take(), vec![Event::SectionsUpdated(0..1)]);

    section.remove_all();
    assert!(recorder.take().is_empty());
}

#[test]
fn test_detached_section_edits_are_silent() {
    let form = Form::new();
    let recorder = support::Recorder::attach(&form);
    let section = Section::new();

    section.append(fixed());
    section.append(dynamic("K", 1));
    section.remove(0);

    assert_eq!(section.len(), 1);
    assert!(recorder.take().is_empty());
}

// =========================================================================
// Reload
// =========================================================================

#[test]
fn test_reload_attached_section() {
    let form = Form::new();
    form.append_all([Section::new(), Section::new()]);
    let recorder = support::Recorder::attach(&form);

    form.section(1).unwrap().reload_data();

    assert_eq!(recorder.take(), vec![Event::SectionsUpdated(1..2)]);
}

#[test]
fn test_reload_detached_section_is_noop() {
    let form = Form::new();
    form.append(Section::new());
    let recorder = support::Recorder::attach(&form);

    let section = form.remove(0);
    recorder.take();
    assert!(section.form().is_none());
    section.reload_data();

    // Neither a section update nor a full reload.
    assert!(recorder.take().is_empty());
}

#[test]
fn test_reload_before_section_is_listed_requests_full_reload() {
    let form = Form::new();
    let signals = Arc::new(FormSignals::new());
    form.set_delegate(&signals);

    let reloads = Arc::new(parking_lot::Mutex::new(0));
    let reloads_clone = reloads.clone();
    signals.needs_full_reload.connect(move |_| *reloads_clone.lock() += 1);

    // Registration runs after the back-reference is set but before the
    // section is listed in the form.
    signals.dynamic_row_needs_registration.connect(|row| {
        if let Some(section) = row.section() {
            section.reload_data();
        }
    });

    form.append(Section::with_rows([dynamic("K", 1)]));

    assert_eq!(*reloads.lock(), 1);
}

// =========================================================================
// Dynamic element helpers
// =========================================================================

#[test]
fn test_append_element_after_current_run() {
    let (_form, section, recorder) = single_section(vec![fixed(), dynamic("K", 2), fixed()]);
    recorder.take();

    let path = section.append_element("K").unwrap();

    assert_eq!(path, IndexPath::new(0, 3));
    assert_eq!(section.row(1).unwrap().element_count(), 3);
    assert_eq!(recorder.take(), vec![Event::RowsAdded(vec![path])]);
}

#[test]
fn test_insert_element_at_offset() {
    let (_form, section, recorder) = single_section(vec![fixed(), dynamic("K", 2)]);
    recorder.take();

    assert_eq!(section.insert_element("K", 0), Ok(IndexPath::new(0, 1)));
    assert_eq!(section.insert_element("K", 3), Ok(IndexPath::new(0, 4)));
    assert_eq!(
        section.insert_element("K", 9),
        Err(FormError::OffsetOutOfRange { offset: 9, count: 4 })
    );
    assert_eq!(recorder.take().len(), 2);
}

#[test]
fn test_remove_element() {
    let (_form, section, recorder) = single_section(vec![fixed(), dynamic("K", 2)]);
    recorder.take();

    assert_eq!(section.remove_element("K", 1), Ok(IndexPath::new(0, 2)));
    assert_eq!(section.row(1).unwrap().element_count(), 1);
    assert_eq!(recorder.take(), vec![Event::RowsRemoved(paths(0, &[2]))]);

    assert_eq!(
        section.remove_element("K", 1),
        Err(FormError::OffsetOutOfRange { offset: 1, count: 1 })
    );
}

#[test]
fn test_duplicate_keys_resolve_to_first_row() {
    let (_form, section, _recorder) =
        single_section(vec![dynamic("K", 1), fixed(), dynamic("K", 1)]);

    assert_eq!(section.append_element("K"), Ok(IndexPath::new(0, 1)));
    assert_eq!(section.row(0).unwrap().element_count(), 2);
    assert_eq!(section.row(2).unwrap().element_count(), 1);

    let second = section.row(2).unwrap();
    assert_eq!(section.append_element_for_row(&second), Ok(IndexPath::new(0, 4)));
    assert_eq!(second.element_count(), 2);
}

#[test]
fn test_element_helper_errors() {
    let (_form, section, _recorder) = single_section(vec![fixed(), dynamic("K", 1)]);

    assert_eq!(
        section.append_element("missing"),
        Err(FormError::UnknownReuseKey("missing".to_string()))
    );

    let foreign = Section::with_rows([dynamic("K", 1)]).row(0).unwrap();
    assert_eq!(
        section.remove_element_for_row(&foreign, 0),
        Err(FormError::RowNotInSection)
    );

    let static_row = section.row(0).unwrap();
    assert_eq!(
        section.append_element_for_row(&static_row),
        Err(FormError::NotDynamic)
    );
}
