//! Theme preference persistence.

use crate::model::theme::Theme;
use crate::storage::{KeyValueBackend, SafeStorage};
use log::debug;

/// Storage key of the theme preference.
pub const THEME_KEY: &str = "theme";

/// Reads and writes the theme preference through the storage facade.
pub struct ThemeService<'s, B> {
    storage: &'s SafeStorage<B>,
}

impl<'s, B: KeyValueBackend> ThemeService<'s, B> {
    pub fn new(storage: &'s SafeStorage<B>) -> Self {
        Self { storage }
    }

    /// Stored theme, or the system-derived one when nothing usable is stored.
    pub fn load(&self, system_prefers_dark: bool) -> Theme {
        self.storage
            .get_item(THEME_KEY, Theme::from_system(system_prefers_dark))
    }

    pub fn set(&self, theme: Theme) {
        self.storage.set_item(THEME_KEY, &theme);
        debug!(
            "event=theme_set module=theme status=ok theme={}",
            theme.as_str()
        );
    }

    /// Flips `current`, persists the result and returns it.
    pub fn toggle(&self, current: Theme) -> Theme {
        let next = current.toggled();
        self.set(next);
        next
    }
}
