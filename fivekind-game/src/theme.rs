//! Theme catalog and the persisted theme preference.
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::PreferenceStore;
use crate::constants::THEME_PREFERENCE_KEY;
use crate::error::ParseThemeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeId {
    DarkWarm,
    DarkCool,
    #[default]
    DarkVibrant,
    LightSoft,
    LightWarm,
    LightCool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeInfo {
    pub id: ThemeId,
    pub label: &'static str,
    pub background: &'static str,
    pub accent: &'static str,
}

/// Picker order: dark row first, then light.
pub static THEMES: [ThemeInfo; 6] = [
    ThemeInfo {
        id: ThemeId::DarkWarm,
        label: "Warm",
        background: "#1a1710",
        accent: "#d49e2e",
    },
    ThemeInfo {
        id: ThemeId::DarkCool,
        label: "Cool",
        background: "#0f1a1d",
        accent: "#0eb4b4",
    },
    ThemeInfo {
        id: ThemeId::DarkVibrant,
        label: "Vibrant",
        background: "#1a1a2e",
        accent: "#8b5cf6",
    },
    ThemeInfo {
        id: ThemeId::LightWarm,
        label: "Warm",
        background: "#faf7f2",
        accent: "#c48a1a",
    },
    ThemeInfo {
        id: ThemeId::LightCool,
        label: "Cool",
        background: "#f0f8f8",
        accent: "#0a9e9e",
    },
    ThemeInfo {
        id: ThemeId::LightSoft,
        label: "Soft",
        background: "#f5f3f0",
        accent: "#7c5cbf",
    },
];

impl ThemeId {
    pub const ALL: [Self; 6] = [
        Self::DarkWarm,
        Self::DarkCool,
        Self::DarkVibrant,
        Self::LightSoft,
        Self::LightWarm,
        Self::LightCool,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DarkWarm => "dark-warm",
            Self::DarkCool => "dark-cool",
            Self::DarkVibrant => "dark-vibrant",
            Self::LightSoft => "light-soft",
            Self::LightWarm => "light-warm",
            Self::LightCool => "light-cool",
        }
    }

    #[must_use]
    pub const fn is_light(self) -> bool {
        matches!(self, Self::LightSoft | Self::LightWarm | Self::LightCool)
    }

    #[must_use]
    pub fn info(self) -> &'static ThemeInfo {
        THEMES
            .iter()
            .find(|theme| theme.id == self)
            .unwrap_or(&THEMES[2])
    }

    /// Background color used for platform chrome such as the status bar.
    #[must_use]
    pub fn chrome_color(self) -> &'static str {
        self.info().background
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeId {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str() == s)
            .ok_or_else(|| ParseThemeError(s.to_string()))
    }
}

/// Read the stored theme, falling back to the default when the value is
/// missing, unknown or the store fails.
pub fn load_theme<S: PreferenceStore>(store: &S) -> ThemeId {
    match store.get(THEME_PREFERENCE_KEY) {
        Ok(Some(raw)) => raw.parse::<ThemeId>().unwrap_or_else(|err| {
            warn!("{err}; using default theme");
            ThemeId::default()
        }),
        Ok(None) => ThemeId::default(),
        Err(err) => {
            warn!("theme preference unavailable: {err}");
            ThemeId::default()
        }
    }
}

/// Persist the chosen theme.
///
/// # Errors
///
/// Returns the store's error if the value cannot be written.
pub fn save_theme<S: PreferenceStore>(store: &S, theme: ThemeId) -> Result<(), S::Error> {
    store.set(THEME_PREFERENCE_KEY, theme.as_str())
}
