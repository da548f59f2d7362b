// ── Process-scoped adapter ────────────────────────────────────────────────────
//
// A single `Adapter` is created at startup and passed to whatever needs the
// process-wide pieces: the UTF-8 console, the configuration switches, and the
// theme preference backend.  Stateless path operations live in `fs` and `env`
// and do not need it.

use std::{fmt, sync::Arc};

use crate::{
    config::AdapterConfig,
    console::{Console, StdStream},
    error::Result,
    fs::{Dir, File, LockMode},
    theme::{self, PreferenceSource, Theme},
};

pub struct Adapter {
    config: AdapterConfig,
    console: Arc<Console>,
    preferences: Box<dyn PreferenceSource + Send + Sync>,
}

impl fmt::Debug for Adapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapter")
            .field("config", &self.config)
            .field("console", &self.console)
            .finish_non_exhaustive()
    }
}

impl Adapter {
    /// Build an adapter around `config` with the host's preference backend.
    pub fn new(config: AdapterConfig) -> Self {
        Self::with_preference_source(config, theme::system_preference_source())
    }

    /// Build an adapter with an explicit preference backend.
    pub fn with_preference_source(
        config: AdapterConfig,
        preferences: Box<dyn PreferenceSource + Send + Sync>,
    ) -> Self {
        let console = Console::init(config.console_utf8);
        Self {
            config,
            console,
            preferences,
        }
    }

    /// Build an adapter from the on-disk configuration, or the defaults if
    /// there is none.
    pub fn from_config_file() -> Self {
        Self::new(AdapterConfig::load().unwrap_or_default())
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn console(&self) -> &Arc<Console> {
        &self.console
    }

    /// Open `path` with a C-style mode string.
    ///
    /// `lock` is only acted on when the configuration enables locking.
    pub fn open(&self, path: &str, mode: &str, lock: LockMode) -> Result<File> {
        let lock = if self.config.locking {
            lock
        } else {
            LockMode::None
        };
        File::open(path, mode, lock)
    }

    /// A handle that writes to standard output through the console.
    pub fn stdout(&self) -> File {
        File::console(self.console.clone(), StdStream::Stdout)
    }

    /// A handle that writes to standard error through the console.
    pub fn stderr(&self) -> File {
        File::console(self.console.clone(), StdStream::Stderr)
    }

    pub fn open_dir(&self, path: &str) -> Result<Dir> {
        Dir::open(path)
    }

    /// Whether the dark theme should be used.  A configured override wins
    /// over the OS preference.
    pub fn is_dark_mode(&self) -> bool {
        self.default_theme() == Theme::Dark
    }

    pub fn default_theme(&self) -> Theme {
        match self.config.theme_override {
            Some(t) => t,
            None => theme::default_theme(self.preferences.as_ref()),
        }
    }
}
