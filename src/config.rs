// ── Adapter configuration ─────────────────────────────────────────────────────
//
// Reads and writes `config.json` under the per-user configuration directory:
//   Windows: `%APPDATA%\utf8sys\config.json`
//   others:  `$XDG_CONFIG_HOME/utf8sys/config.json`
//            (or `$HOME/.config/utf8sys/config.json`)
// No `unsafe`: pure safe Rust + serde_json.

use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    env,
    error::{Error, Result},
    theme::Theme,
};

// ── On-disk type ──────────────────────────────────────────────────────────────

/// Root of the JSON configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterConfig {
    pub version: u32,
    /// Honour lock requests passed to `open`.  When `false` they are
    /// accepted and ignored.
    #[serde(default = "default_true")]
    pub locking: bool,
    /// Switch the console to the UTF-8 code page at startup.
    #[serde(default = "default_true")]
    pub console_utf8: bool,
    /// Use this theme instead of asking the OS.
    #[serde(default)]
    pub theme_override: Option<Theme>,
}

fn default_true() -> bool {
    true
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            locking: true,
            console_utf8: true,
            theme_override: None,
        }
    }
}

// ── Format version ────────────────────────────────────────────────────────────

pub const CONFIG_VERSION: u32 = 1;

const APP_DIR: &str = "utf8sys";
const FILE_NAME: &str = "config.json";

// ── Path ──────────────────────────────────────────────────────────────────────

/// Return the path to the configuration file.
///
/// Returns `None` if none of the environment variables that locate the
/// configuration directory are set.
pub fn config_path() -> Option<PathBuf> {
    let mut p = config_dir()?;
    p.push(APP_DIR);
    p.push(FILE_NAME);
    Some(p)
}

#[cfg(windows)]
fn config_dir() -> Option<PathBuf> {
    env_path("APPDATA")
}

#[cfg(not(windows))]
fn config_dir() -> Option<PathBuf> {
    env_path("XDG_CONFIG_HOME").or_else(|| {
        let mut home = env_path("HOME")?;
        home.push(".config");
        Some(home)
    })
}

fn env_path(name: &str) -> Option<PathBuf> {
    env::get_env(name)
        .ok()
        .flatten()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

// ── Save ──────────────────────────────────────────────────────────────────────

impl AdapterConfig {
    /// Write the configuration to [`config_path`].
    pub fn save(&self) -> Result<()> {
        let path = config_path().ok_or(Error::Unsupported {
            op: "locate configuration directory",
        })?;
        self.save_to(&path)
    }

    /// Write the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        let shown = path.display().to_string();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| Error::io("save config", shown.as_str(), e))?;
        }
        let json = serde_json::to_vec_pretty(self)
            .map_err(|e| Error::io("save config", shown.as_str(), e.into()))?;
        fs::write(path, json).map_err(|e| Error::io("save config", shown, e))
    }

    // ── Load ──────────────────────────────────────────────────────────────────

    /// Read and parse [`config_path`].
    ///
    /// Returns `None` on any error: file missing, JSON parse failure, or an
    /// unrecognised version number.  Callers fall back to the defaults.
    pub fn load() -> Option<AdapterConfig> {
        Self::load_from(&config_path()?)
    }

    pub fn load_from(path: &std::path::Path) -> Option<AdapterConfig> {
        let data = fs::read(path).ok()?;
        Self::parse(&data)
    }

    fn parse(data: &[u8]) -> Option<AdapterConfig> {
        let cfg: AdapterConfig = serde_json::from_slice(data).ok()?;
        if cfg.version != CONFIG_VERSION {
            tracing::warn!(version = cfg.version, "ignoring config with unknown version");
            return None;
        }
        Some(cfg)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_with_override() {
        let cfg = AdapterConfig {
            locking: false,
            theme_override: Some(Theme::Dark),
            ..AdapterConfig::default()
        };
        let json = serde_json::to_vec(&cfg).expect("serialize");
        let back = AdapterConfig::parse(&json).expect("parse");
        assert_eq!(back, cfg);
    }

    /// Files that only carry a version parse with every flag at its default.
    #[test]
    fn missing_fields_take_defaults() {
        let cfg = AdapterConfig::parse(br#"{"version":1}"#).expect("parse minimal");
        assert_eq!(cfg, AdapterConfig::default());
    }

    #[test]
    fn wrong_version_is_rejected() {
        assert!(AdapterConfig::parse(br#"{"version":99}"#).is_none());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(AdapterConfig::parse(b"not json").is_none());
    }

    #[test]
    fn save_to_then_load_from() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("nested").join("config.json");
        let cfg = AdapterConfig {
            theme_override: Some(Theme::Light),
            ..AdapterConfig::default()
        };
        cfg.save_to(&path).expect("save");
        assert_eq!(AdapterConfig::load_from(&path), Some(cfg));
    }

    #[test]
    fn load_from_missing_file_is_none() {
        let tmp = tempfile::tempdir().expect("tempdir");
        assert!(AdapterConfig::load_from(&tmp.path().join("absent.json")).is_none());
    }
}
