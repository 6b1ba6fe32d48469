//! View plugin: keeps the date decorations in step with the view
//!
//! Rebuilds on document, viewport or focus changes reported through
//! [`ViewUpdate`], and when the settings store announces a new date format.
//! Each rebuild produces a fresh [`DecorationSet`] that replaces the previous
//! one in a single swap.

use std::rc::Rc;
use std::sync::mpsc::Receiver;

use crate::config::{SettingsChanged, SettingsStore};
use crate::decoration::{self, DateWidget, DecorationSet};
use crate::host::EditorView;
use crate::view::ViewUpdate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginState {
    Active,
    Disposed,
}

pub struct DatePickerViewPlugin {
    decorations: Rc<DecorationSet>,
    widgets: Rc<[DateWidget]>,
    settings_rx: Receiver<SettingsChanged>,
    state: PluginState,
    rebuilds: u64,
}

impl DatePickerViewPlugin {
    /// Subscribe to `settings` and perform the initial build
    pub fn new<V: EditorView>(view: &V, settings: &mut SettingsStore) -> Self {
        let settings_rx = settings.subscribe();
        let mut plugin = Self {
            decorations: Rc::new(DecorationSet::empty()),
            widgets: Rc::from(Vec::new()),
            settings_rx,
            state: PluginState::Active,
            rebuilds: 0,
        };
        plugin.rebuild(view, settings);
        plugin
    }

    /// React to a view update. Returns whether the decorations were rebuilt.
    pub fn update<V: EditorView>(
        &mut self,
        update: &ViewUpdate,
        view: &V,
        settings: &SettingsStore,
    ) -> bool {
        if self.state == PluginState::Disposed {
            return false;
        }

        // Drain every pending notification; one rebuild covers them all
        let settings_changed = self.settings_rx.try_iter().count() > 0;

        if update.any() || settings_changed {
            self.rebuild(view, settings);
            true
        } else {
            false
        }
    }

    fn rebuild<V: EditorView>(&mut self, view: &V, settings: &SettingsStore) {
        let format = settings.date_format();
        let visible = view.visible_ranges();
        let output = decoration::build(view.state(), &visible, &format);

        self.decorations = Rc::new(output.decorations);
        self.widgets = Rc::from(output.widgets);
        self.rebuilds += 1;

        tracing::trace!(
            rebuild = self.rebuilds,
            widgets = self.widgets.len(),
            ranges = visible.len(),
            "rebuilt date picker decorations"
        );
    }

    /// The current decoration set; stays valid after later rebuilds
    pub fn decorations(&self) -> Rc<DecorationSet> {
        Rc::clone(&self.decorations)
    }

    pub fn widgets(&self) -> &[DateWidget] {
        &self.widgets
    }

    /// The widget whose bound range contains `offset` (ends inclusive)
    pub fn widget_at(&self, offset: usize) -> Option<&DateWidget> {
        self.widgets.iter().find(|w| w.contains(offset))
    }

    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    pub fn state(&self) -> PluginState {
        self.state
    }

    /// Stop reacting to updates. Holds no resources beyond its decorations.
    pub fn destroy(&mut self) {
        self.state = PluginState::Disposed;
    }
}
