//! Light/dark display theme.

use crate::models::Theme;
use crate::storage::{self, keys, Effect, KeyValueStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    Toggle,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeState {
    pub theme: Theme,
}

impl ThemeState {
    pub fn apply(&mut self, action: ThemeAction) -> Vec<Effect> {
        match action {
            ThemeAction::Toggle => {
                self.theme = self.theme.toggled();
                vec![
                    Effect::persist(keys::THEME, self.theme.as_str()),
                    Effect::ApplyTheme(self.theme),
                ]
            }
        }
    }
}

/// Owner of the active theme
#[derive(Debug, Default)]
pub struct ThemeStore {
    state: ThemeState,
}

impl ThemeStore {
    /// Resolves the starting theme: persisted value, then `os_preference`,
    /// then light. Never fails; unreadable storage means light.
    pub fn initialize(storage: &dyn KeyValueStore, os_preference: Option<Theme>) -> Self {
        let theme = match storage.get(keys::THEME) {
            Ok(saved) => match saved.as_deref().and_then(Theme::from_str) {
                Some(theme) => theme,
                None => {
                    if let Some(invalid) = saved {
                        log::debug!("Ignoring invalid stored theme '{}'", invalid);
                    }
                    let resolved = os_preference.unwrap_or_default();
                    if let Err(e) = storage.set(keys::THEME, resolved.as_str()) {
                        log::warn!("Could not persist theme: {}", e);
                    }
                    resolved
                }
            },
            Err(e) => {
                log::error!("Error accessing theme storage: {}", e);
                Theme::Light
            }
        };

        log::debug!("Theme initialized to {}", theme);
        Self {
            state: ThemeState { theme },
        }
    }

    pub fn theme(&self) -> Theme {
        self.state.theme
    }

    /// Flips the theme, persists it and returns the effects for the view
    pub fn toggle_theme(&mut self, storage: &dyn KeyValueStore) -> Vec<Effect> {
        let effects = self.state.apply(ThemeAction::Toggle);
        storage::run_effects(storage, effects)
    }
}

/// Reads the desktop color-scheme hint (`GTK_THEME=Adwaita:dark`)
pub fn detect_os_theme() -> Option<Theme> {
    std::env::var("GTK_THEME")
        .ok()
        .and_then(|value| theme_from_gtk(&value))
}

fn theme_from_gtk(value: &str) -> Option<Theme> {
    let value = value.trim().to_ascii_lowercase();
    if value.is_empty() {
        None
    } else if value.ends_with(":dark") || value.ends_with("-dark") {
        Some(Theme::Dark)
    } else {
        Some(Theme::Light)
    }
}
