//! Light/dark theme preference, persisted through a [`ThemeStore`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Storage key holding the preference.
pub const THEME_KEY: &str = "theme";

/// Document root attribute the theme is applied to.
pub const THEME_ATTRIBUTE: &str = "data-bs-theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Toggle button text: offers the other theme.
    pub fn button_label(self) -> &'static str {
        match self {
            Theme::Light => "Dark Mode",
            Theme::Dark => "Light Mode",
        }
    }

    /// Bootstrap icon classes shown next to the label.
    pub fn icon_class(self) -> &'static str {
        match self {
            Theme::Light => "bi bi-moon-stars",
            Theme::Dark => "bi bi-sun",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

/// Key/value persistence for UI preferences (browser local storage on the web).
pub trait ThemeStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str);
}

/// In-memory store. Also stands in for storage on targets without one.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl ThemeStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Current theme plus the store it persists to.
#[derive(Debug, Clone)]
pub struct ThemeState<S> {
    current: Theme,
    store: S,
}

impl<S: ThemeStore> ThemeState<S> {
    /// Read the saved preference. Missing or unrecognized values fall back to light.
    pub fn load(store: S) -> Self {
        let current = store.load(THEME_KEY).and_then(|v| v.parse().ok()).unwrap_or_default();
        Self { current, store }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flip the theme and persist the new value.
    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.toggled();
        self.store.save(THEME_KEY, self.current.as_str());
        tracing::debug!(theme = self.current.as_str(), "Theme toggled");
        self.current
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
