//! Editor commands
//!
//! - Insert today's date as text
//! - Insert today's date as a wiki link
//! - Open the date picker of the widget under the cursor

use chrono::NaiveDate;

use crate::date::DateFormat;
use crate::decoration::{PickerLayer, PickerOutcome};
use crate::host::{DateControl, Editor};
use crate::model::Position;
use crate::plugin::DatePickerViewPlugin;

/// Message shown when the cursor is not on a date widget
pub const NO_PICKER_NOTICE: &str = "No date picker found at cursor position.";

/// Identifies a command that can be executed via the command palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    InsertTodaysDate,
    InsertTodaysDateLink,
    OpenDatePicker,
}

/// A command definition for the command palette
#[derive(Debug, Clone)]
pub struct CommandDef {
    pub id: CommandId,
    /// Stable identifier used by key bindings
    pub key: &'static str,
    pub label: &'static str,
}

/// All registered commands
pub static COMMANDS: &[CommandDef] = &[
    CommandDef {
        id: CommandId::InsertTodaysDate,
        key: "insert-todays-date",
        label: "Insert today's date",
    },
    CommandDef {
        id: CommandId::InsertTodaysDateLink,
        key: "insert-todays-date-link",
        label: "Insert today's date as link",
    },
    CommandDef {
        id: CommandId::OpenDatePicker,
        key: "open-date-picker",
        label: "Open date picker",
    },
];

impl CommandId {
    pub fn from_key(key: &str) -> Option<Self> {
        COMMANDS.iter().find(|def| def.key == key).map(|def| def.id)
    }

    pub fn def(self) -> &'static CommandDef {
        COMMANDS
            .iter()
            .find(|def| def.id == self)
            .unwrap_or(&COMMANDS[0])
    }
}

/// A transient message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Text was inserted; the cursor now sits after it
    Inserted(String),
    /// The picker bound to this range was opened
    PickerOpened { from: usize, to: usize },
    Notice(Notice),
}

/// Insert `text` at the cursor and move the cursor past it
fn insert_at_cursor<E: Editor + ?Sized>(editor: &mut E, text: &str) {
    let cursor = editor.get_cursor();
    editor.replace_range(text, cursor);
    editor.set_cursor(Position::new(
        cursor.line,
        cursor.column + text.chars().count(),
    ));
}

pub fn insert_todays_date<E: Editor + ?Sized>(
    editor: &mut E,
    format: &DateFormat,
    today: NaiveDate,
) -> CommandOutcome {
    let text = format.format(today);
    insert_at_cursor(editor, &text);
    CommandOutcome::Inserted(text)
}

pub fn insert_todays_date_link<E: Editor + ?Sized>(
    editor: &mut E,
    format: &DateFormat,
    today: NaiveDate,
) -> CommandOutcome {
    let text = crate::decoration::Wrapping::Link.wrap(&format.format(today));
    insert_at_cursor(editor, &text);
    CommandOutcome::Inserted(text)
}

/// Open the picker of the widget containing the cursor.
///
/// `plugin` is `None` when the view has no date picker plugin attached; that
/// is logged as an error and reported to the user like a miss.
pub fn open_date_picker<E: Editor + ?Sized, C: DateControl>(
    editor: &E,
    plugin: Option<&DatePickerViewPlugin>,
    layer: &mut PickerLayer<C>,
) -> CommandOutcome {
    let Some(plugin) = plugin else {
        tracing::error!("Date picker view plugin not found");
        return CommandOutcome::Notice(Notice(NO_PICKER_NOTICE.to_string()));
    };

    let offset = editor.pos_to_offset(editor.get_cursor());
    let opened = plugin.widget_at(offset).and_then(|widget| {
        let picker = layer.picker_for_mut(widget)?;
        (picker.show_picker() == PickerOutcome::Opened).then(|| CommandOutcome::PickerOpened {
            from: widget.from(),
            to: widget.to(),
        })
    });

    opened.unwrap_or_else(|| {
        tracing::debug!(offset, "no date widget at cursor");
        CommandOutcome::Notice(Notice(NO_PICKER_NOTICE.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_keys_resolve() {
        assert_eq!(
            CommandId::from_key("insert-todays-date-link"),
            Some(CommandId::InsertTodaysDateLink)
        );
        assert_eq!(CommandId::from_key("nope"), None);
    }

    #[test]
    fn test_every_command_has_a_def() {
        for id in [
            CommandId::InsertTodaysDate,
            CommandId::InsertTodaysDateLink,
            CommandId::OpenDatePicker,
        ] {
            assert_eq!(id.def().id, id);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(CommandId::OpenDatePicker.def().label, "Open date picker");
    }
}
