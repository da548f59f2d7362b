// ── Light/dark theme detection ─────────────────────────────────────────────────
//
// The OS-level "apps use light theme" preference, behind a small
// `PreferenceSource` interface so the registry can be swapped out in tests
// and on platforms that have no registry.
//
// Lookup failures are never surfaced: a source that cannot tell answers
// `ThemePreference::Unknown`, and `default_theme` falls back to light.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What a preference source reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemePreference {
    Light,
    Dark,
    /// The preference could not be determined.
    Unknown,
}

/// The theme an application should start with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Theme> for ThemePreference {
    fn from(t: Theme) -> Self {
        match t {
            Theme::Light => Self::Light,
            Theme::Dark => Self::Dark,
        }
    }
}

/// Anything that can answer "does the user prefer a dark theme?".
pub trait PreferenceSource {
    fn preference(&self) -> ThemePreference;
}

/// A source that always gives the same answer.
#[derive(Debug, Clone, Copy)]
pub struct FixedPreference(pub ThemePreference);

impl PreferenceSource for FixedPreference {
    fn preference(&self) -> ThemePreference {
        self.0
    }
}

/// Backend for platforms with no theme preference store.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPreference;

impl PreferenceSource for NoPreference {
    fn preference(&self) -> ThemePreference {
        ThemePreference::Unknown
    }
}

/// Registry location of the per-user app theme flag.
pub const PERSONALIZE_KEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Themes\Personalize";

/// `REG_DWORD`: `0` means apps use the dark theme.
pub const APPS_USE_LIGHT_THEME: &str = "AppsUseLightTheme";

/// Map the raw `AppsUseLightTheme` value onto a preference.
pub fn preference_from_dword(value: u32) -> ThemePreference {
    if value == 0 {
        ThemePreference::Dark
    } else {
        ThemePreference::Light
    }
}

/// Reads `AppsUseLightTheme` from `HKEY_CURRENT_USER`.
#[cfg(windows)]
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistryPreference;

#[cfg(windows)]
impl PreferenceSource for RegistryPreference {
    fn preference(&self) -> ThemePreference {
        match crate::platform::win32::registry::read_hkcu_dword(
            PERSONALIZE_KEY,
            APPS_USE_LIGHT_THEME,
        ) {
            Ok(v) => preference_from_dword(v),
            Err(e) => {
                // Windows 7 and older have no such value.
                tracing::debug!(error = %e, "theme preference unavailable");
                ThemePreference::Unknown
            }
        }
    }
}

/// The preference backend for the host platform.
pub fn system_preference_source() -> Box<dyn PreferenceSource + Send + Sync> {
    #[cfg(windows)]
    return Box::new(RegistryPreference);

    #[cfg(not(windows))]
    return Box::new(NoPreference);
}

/// `true` only when `source` positively reports a dark preference.
pub fn is_dark_mode(source: &dyn PreferenceSource) -> bool {
    source.preference() == ThemePreference::Dark
}

/// `Dark` when the user prefers it, `Light` otherwise (including unknown).
pub fn default_theme(source: &dyn PreferenceSource) -> Theme {
    if is_dark_mode(source) {
        Theme::Dark
    } else {
        Theme::Light
    }
}
