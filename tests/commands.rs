//! Command tests
//!
//! Tests for inserting today's date and opening the picker under the cursor.

mod common;

use common::{date, settings_with, view_with_cursor};
use inline_date_picker::commands::{
    insert_todays_date, insert_todays_date_link, open_date_picker, CommandId, CommandOutcome,
    Notice, NO_PICKER_NOTICE,
};
use inline_date_picker::date::DateFormat;
use inline_date_picker::decoration::{HeadlessDateInput, PickerLayer, PickerState};
use inline_date_picker::host::Editor;
use inline_date_picker::model::Position;
use inline_date_picker::plugin::DatePickerViewPlugin;

fn notice() -> CommandOutcome {
    CommandOutcome::Notice(Notice(NO_PICKER_NOTICE.to_string()))
}

// ========================================================================
// Insert commands
// ========================================================================

#[test]
fn test_insert_link_on_empty_line() {
    let mut view = view_with_cursor("", 0);
    let outcome = insert_todays_date_link(
        &mut view,
        &DateFormat::parse("YYYY-MM-DD"),
        date(2024, 3, 9),
    );

    assert_eq!(outcome, CommandOutcome::Inserted("[[2024-03-09]]".into()));
    assert_eq!(view.document.to_string(), "[[2024-03-09]]");
    assert_eq!(view.get_cursor(), Position::new(0, 14));
}

#[test]
fn test_insert_date_uses_configured_format() {
    let mut view = view_with_cursor("Due: ", 5);
    insert_todays_date(
        &mut view,
        &DateFormat::parse("MMMM Do, YYYY"),
        date(2024, 3, 9),
    );
    assert_eq!(view.document.to_string(), "Due: March 9th, 2024");
    assert_eq!(view.cursor_offset(), view.document.len_bytes());
}

#[test]
fn test_insert_mid_line_keeps_tail() {
    let mut view = view_with_cursor("one\ntwo three", 0);
    view.set_cursor(Position::new(1, 4));
    insert_todays_date_link(
        &mut view,
        &DateFormat::parse("YYYY-MM-DD"),
        date(2025, 12, 31),
    );
    assert_eq!(view.document.to_string(), "one\ntwo [[2025-12-31]]three");
    assert_eq!(view.get_cursor(), Position::new(1, 18));
}

#[test]
fn test_insert_after_multibyte_counts_chars() {
    let mut view = view_with_cursor("ü ", 0);
    view.set_cursor(Position::new(0, 2));
    insert_todays_date(
        &mut view,
        &DateFormat::parse("DD.MM.YYYY"),
        date(2024, 1, 5),
    );
    assert_eq!(view.document.to_string(), "ü 05.01.2024");
    assert_eq!(view.get_cursor(), Position::new(0, 12));
}

#[test]
fn test_inserted_link_is_decorated() {
    let mut settings = settings_with("YYYY-MM-DD");
    let mut view = view_with_cursor("", 0);
    let mut plugin = DatePickerViewPlugin::new(&view, &mut settings);

    insert_todays_date_link(&mut view, &settings.date_format(), date(2024, 3, 9));
    let update = view.take_update();
    plugin.update(&update, &view, &settings);

    assert_eq!(plugin.widgets().len(), 1);
    assert_eq!(plugin.widgets()[0].date(), date(2024, 3, 9));
}

// ========================================================================
// Open date picker
// ========================================================================

#[test]
fn test_open_picker_at_cursor() {
    let mut settings = settings_with("YYYY-MM-DD");
    let view = view_with_cursor("See [[2024-01-15]] now", 8);
    let plugin = DatePickerViewPlugin::new(&view, &mut settings);
    let mut layer = PickerLayer::new();
    layer.sync(&plugin.decorations(), HeadlessDateInput::default);

    let outcome = open_date_picker(&view, Some(&plugin), &mut layer);

    assert_eq!(outcome, CommandOutcome::PickerOpened { from: 4, to: 18 });
    let picker = &layer.pickers()[0];
    assert_eq!(picker.state(), PickerState::Open);
    assert!(picker.control().picker_open);
    assert!(picker.control().prevented_scroll);
    assert_eq!(view.document.to_string(), "See [[2024-01-15]] now");
}

#[test]
fn test_open_picker_at_range_boundary() {
    let mut settings = settings_with("YYYY-MM-DD");
    let view = view_with_cursor("See [[2024-01-15]] now", 18);
    let plugin = DatePickerViewPlugin::new(&view, &mut settings);
    let mut layer = PickerLayer::new();
    layer.sync(&plugin.decorations(), HeadlessDateInput::default);

    assert_eq!(
        open_date_picker(&view, Some(&plugin), &mut layer),
        CommandOutcome::PickerOpened { from: 4, to: 18 }
    );
}

#[test]
fn test_open_picker_off_widget_shows_notice() {
    let mut settings = settings_with("YYYY-MM-DD");
    let view = view_with_cursor("See [[2024-01-15]] now", 1);
    let plugin = DatePickerViewPlugin::new(&view, &mut settings);
    let mut layer = PickerLayer::new();
    layer.sync(&plugin.decorations(), HeadlessDateInput::default);

    assert_eq!(open_date_picker(&view, Some(&plugin), &mut layer), notice());
    assert_eq!(layer.pickers()[0].state(), PickerState::Idle);
}

#[test]
fn test_open_picker_without_plugin_shows_notice() {
    let view = view_with_cursor("[[2024-01-15]]", 3);
    let mut layer: PickerLayer<HeadlessDateInput> = PickerLayer::new();
    assert_eq!(open_date_picker(&view, None, &mut layer), notice());
}

#[test]
fn test_open_picker_with_unrendered_widget_shows_notice() {
    let mut settings = settings_with("YYYY-MM-DD");
    let view = view_with_cursor("[[2024-01-15]]", 3);
    let plugin = DatePickerViewPlugin::new(&view, &mut settings);
    let mut layer: PickerLayer<HeadlessDateInput> = PickerLayer::new();
    assert_eq!(open_date_picker(&view, Some(&plugin), &mut layer), notice());
}

// ========================================================================
// Registry
// ========================================================================

#[test]
fn test_command_keys() {
    assert_eq!(
        CommandId::from_key("insert-todays-date"),
        Some(CommandId::InsertTodaysDate)
    );
    assert_eq!(
        CommandId::from_key("open-date-picker"),
        Some(CommandId::OpenDatePicker)
    );
}
