//! Rendering and interaction for date widgets
//!
//! A [`RenderedPicker`] owns one native control built from a [`DateWidget`].
//! Direct typing into the control is suppressed: pointer interaction opens
//! the calendar overlay, and focus returns to the editor as soon as an
//! interaction ends.
//!
//! ## State machine
//!
//! ```text
//! Idle ──PointerUp / show_picker──▶ Open ──Change──▶ Committed
//!  ▲                                 │
//!  └──────────── Dismiss ────────────┘
//! ```
//!
//! `Committed` is terminal: the edit has been submitted and the next rebuild
//! supersedes this picker.

use crate::date;
use crate::host::{DateControl, EditorView, FocusOptions};

use super::widget::DateWidget;
use super::DecorationSet;

/// CSS class applied to every rendered control
pub const INPUT_CLASS: &str = "inline-date-picker-input";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerState {
    /// Rendered, overlay closed
    Idle,
    /// Calendar overlay is showing
    Open,
    /// A value was committed; further events are ignored
    Committed,
}

/// Interaction events delivered by the host for one control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerEvent {
    /// Pointer released over the control
    PointerUp,
    Blur,
    KeyDown,
    /// The control's value changed; read it from [`DateControl::value`]
    Change,
    /// The overlay closed without a new value
    Dismiss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerOutcome {
    /// The event did nothing (picker already committed)
    Ignored,
    /// Focus was handed back to the editor
    Refocused,
    /// The overlay was opened
    Opened,
    /// Exactly one transaction was dispatched
    Committed,
    /// A change arrived but no edit was made (empty value or stale range)
    Skipped,
}

pub struct RenderedPicker<C: DateControl> {
    widget: DateWidget,
    control: C,
    state: PickerState,
}

impl<C: DateControl> RenderedPicker<C> {
    /// Render `widget` into `control`
    pub fn render(widget: DateWidget, mut control: C) -> Self {
        control.set_input_type("date");
        control.set_value(&widget.calendar_value());
        control.add_class(INPUT_CLASS);
        Self {
            widget,
            control,
            state: PickerState::Idle,
        }
    }

    pub fn widget(&self) -> &DateWidget {
        &self.widget
    }

    pub fn control(&self) -> &C {
        &self.control
    }

    pub fn control_mut(&mut self) -> &mut C {
        &mut self.control
    }

    pub fn state(&self) -> PickerState {
        self.state
    }

    /// Focus the control without scrolling and open the overlay
    pub fn show_picker(&mut self) -> PickerOutcome {
        if self.state == PickerState::Committed {
            return PickerOutcome::Ignored;
        }
        self.control.focus(FocusOptions {
            prevent_scroll: true,
        });
        self.control.show_picker();
        self.state = PickerState::Open;
        PickerOutcome::Opened
    }

    pub fn handle_event<V: EditorView>(
        &mut self,
        event: PickerEvent,
        view: &mut V,
    ) -> PickerOutcome {
        if self.state == PickerState::Committed {
            return PickerOutcome::Ignored;
        }

        match event {
            PickerEvent::PointerUp => {
                // Keep the raw input from taking text focus
                self.control.blur();
                self.control.show_picker();
                self.state = PickerState::Open;
                view.focus();
                PickerOutcome::Opened
            }
            PickerEvent::Blur | PickerEvent::KeyDown => {
                view.focus();
                PickerOutcome::Refocused
            }
            PickerEvent::Dismiss => {
                self.state = PickerState::Idle;
                view.focus();
                PickerOutcome::Refocused
            }
            PickerEvent::Change => {
                let outcome = self.commit(view);
                view.focus();
                outcome
            }
        }
    }

    fn commit<V: EditorView>(&mut self, view: &mut V) -> PickerOutcome {
        let value = self.control.value();
        let Some(picked) = date::parse_calendar_value(&value) else {
            tracing::debug!(value = %value, "ignoring empty or malformed picker value");
            return PickerOutcome::Skipped;
        };

        if !self.widget.matches(view.state()) {
            tracing::debug!(
                from = self.widget.from(),
                to = self.widget.to(),
                "bound range no longer holds a date token, skipping commit"
            );
            self.state = PickerState::Idle;
            return PickerOutcome::Skipped;
        }

        let tx = self.widget.commit(view.state(), picked);
        tracing::debug!(
            from = tx.changes.from,
            to = tx.changes.to,
            insert = %tx.changes.insert,
            moves_cursor = tx.selection.is_some(),
            "committing picked date"
        );
        if let Err(e) = view.dispatch(tx) {
            tracing::warn!("Date picker edit was rejected: {}", e);
        }
        self.state = PickerState::Committed;
        PickerOutcome::Committed
    }
}

/// The renderer's live pickers, kept in step with the latest decoration set.
///
/// Pickers whose widget is unchanged survive a rebuild. Superseded pickers
/// are dropped, except one whose overlay is still open: it stays
/// interactive in `retired` until the user commits or dismisses it.
pub struct PickerLayer<C: DateControl> {
    pickers: Vec<RenderedPicker<C>>,
    retired: Vec<RenderedPicker<C>>,
}

impl<C: DateControl> Default for PickerLayer<C> {
    fn default() -> Self {
        Self {
            pickers: Vec::new(),
            retired: Vec::new(),
        }
    }
}

impl<C: DateControl> PickerLayer<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile with `decorations`, creating controls with `create` as needed
    pub fn sync(&mut self, decorations: &DecorationSet, mut create: impl FnMut() -> C) {
        let mut previous = std::mem::take(&mut self.pickers);
        let mut reused = 0usize;

        for decoration in decorations {
            let existing = previous.iter().position(|p| {
                p.state != PickerState::Committed && p.widget == decoration.widget
            });
            let picker = match existing {
                Some(idx) => {
                    reused += 1;
                    previous.swap_remove(idx)
                }
                None => RenderedPicker::render(decoration.widget.clone(), create()),
            };
            self.pickers.push(picker);
        }

        self.retired.retain(|p| p.state == PickerState::Open);
        self.retired
            .extend(previous.into_iter().filter(|p| p.state == PickerState::Open));

        tracing::trace!(
            live = self.pickers.len(),
            reused,
            retired = self.retired.len(),
            "synced picker layer"
        );
    }

    pub fn pickers(&self) -> &[RenderedPicker<C>] {
        &self.pickers
    }

    /// Superseded pickers whose overlay is still open
    pub fn retired(&self) -> &[RenderedPicker<C>] {
        &self.retired
    }

    pub fn retired_mut(&mut self) -> &mut [RenderedPicker<C>] {
        &mut self.retired
    }

    /// The live picker bound to exactly `widget`
    pub fn picker_for_mut(&mut self, widget: &DateWidget) -> Option<&mut RenderedPicker<C>> {
        self.pickers.iter_mut().find(|p| &p.widget == widget)
    }

    /// The live picker whose bound range contains `offset`
    pub fn picker_at_mut(&mut self, offset: usize) -> Option<&mut RenderedPicker<C>> {
        self.pickers.iter_mut().find(|p| p.widget.contains(offset))
    }
}

/// In-memory date control for headless hosts and tests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessDateInput {
    pub input_type: String,
    pub classes: Vec<String>,
    pub value: String,
    pub focused: bool,
    pub picker_open: bool,
    /// Whether the last focus call asked not to scroll
    pub prevented_scroll: bool,
}

impl HeadlessDateInput {
    /// Simulate the user choosing `value` in the overlay
    pub fn pick(&mut self, value: &str) {
        self.value = value.to_string();
        self.picker_open = false;
    }
}

impl DateControl for HeadlessDateInput {
    fn set_input_type(&mut self, input_type: &str) {
        self.input_type = input_type.to_string();
    }

    fn add_class(&mut self, class: &str) {
        if !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.to_string());
        }
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }

    fn value(&self) -> String {
        self.value.clone()
    }

    fn focus(&mut self, options: FocusOptions) {
        self.focused = true;
        self.prevented_scroll = options.prevent_scroll;
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn show_picker(&mut self) {
        self.picker_open = true;
    }
}
