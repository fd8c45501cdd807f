use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::storage::{BrowserStore, PreferenceStore};

/// Attribute on `<html>` that stylesheets key off.
pub const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
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

    /// Icon on the toggle button; shows the theme a click switches to.
    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀️",
        }
    }

    /// Label on the toggle button.
    pub fn toggle_label(&self) -> &'static str {
        match self {
            Theme::Light => "Dark",
            Theme::Dark => "Light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(()),
        }
    }
}

/// Theme preference backed by a [`PreferenceStore`].
pub struct ThemeController {
    store: Arc<dyn PreferenceStore>,
    key: String,
    current: Theme,
}

impl ThemeController {
    /// Read the stored preference once; missing or unknown values mean light.
    pub fn load(store: Arc<dyn PreferenceStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let current = match store.get(&key) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("[Theme] ignoring stored theme '{raw}'");
                Theme::default()
            }),
            None => Theme::default(),
        };
        Self { store, key, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flip the theme and persist it. The in-memory theme flips even if
    /// persisting fails.
    pub fn toggle(&mut self) -> Result<Theme, ClientError> {
        self.current = self.current.toggled();
        self.store.set(&self.key, self.current.as_str())?;
        Ok(self.current)
    }
}

#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub theme: RwSignal<Theme>,
    controller: StoredValue<ThemeController>,
}

impl ThemeContext {
    pub fn toggle(&self) {
        let mut next = None;
        self.controller.update_value(|controller| {
            let result = controller.toggle();
            if let Err(e) = result {
                log::warn!("[Theme] {e}");
            }
            next = Some(controller.current());
        });
        if let Some(theme) = next {
            self.theme.set(theme);
        }
    }
}

/// Load the stored theme, keep `<html data-theme>` in sync, and provide
/// [`ThemeContext`] to children.
pub fn provide_theme_context(key: &str) -> ThemeContext {
    let controller = ThemeController::load(Arc::new(BrowserStore), key);
    let theme = RwSignal::new(controller.current());

    Effect::new(move |_| {
        let current = theme.get();
        if let Some(root) = document().document_element() {
            let _ = root.set_attribute(THEME_ATTRIBUTE, current.as_str());
        }
    });

    let ctx = ThemeContext {
        theme,
        controller: StoredValue::new(controller),
    };
    provide_context(ctx);
    ctx
}
