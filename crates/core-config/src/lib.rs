//! Configuration loading and parsing.
//!
//! Parses `boxwood.toml` (or an override path provided by the binary). Every
//! section is optional and unknown fields are ignored, so an empty or missing
//! file yields the defaults:
//!
//! ```toml
//! [border]
//! style = "single"   # single | double | rounded | ascii
//!
//! [log]
//! file = "boxwood.log"
//!
//! [demo]
//! pause_ms = 1500    # clamped to MAX_PAUSE_MS
//! ```
//!
//! A file that fails to parse falls back to defaults with a warning rather
//! than aborting startup.

use anyhow::Result;
use core_render::{BorderGlyphs, BorderStyle};
use serde::Deserialize;
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE: &str = "boxwood.toml";
pub const MAX_PAUSE_MS: u64 = 60_000;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct BorderConfig {
    #[serde(default)]
    pub style: BorderStyle,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    #[serde(default = "LogConfig::default_file")]
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: Self::default_file(),
        }
    }
}

impl LogConfig {
    fn default_file() -> PathBuf {
        PathBuf::from("boxwood.log")
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DemoConfig {
    #[serde(default = "DemoConfig::default_pause_ms")]
    pub pause_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            pause_ms: Self::default_pause_ms(),
        }
    }
}

impl DemoConfig {
    const fn default_pause_ms() -> u64 {
        1500
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub border: BorderConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
    pub source: Option<PathBuf>,
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("boxwood").join(CONFIG_FILE);
    }
    PathBuf::from(CONFIG_FILE)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => Ok(Config {
            raw: Some(content),
            file,
            source: Some(path),
        }),
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed");
            Ok(Config::default())
        }
    }
}

impl Config {
    pub fn glyphs(&self) -> BorderGlyphs {
        BorderGlyphs::for_style(self.file.border.style)
    }

    pub fn log_file(&self) -> &PathBuf {
        &self.file.log.file
    }

    /// Pause between demo frames, clamped to `MAX_PAUSE_MS`.
    pub fn demo_pause(&self) -> Duration {
        let raw = self.file.demo.pause_ms;
        let clamped = raw.min(MAX_PAUSE_MS);
        if clamped != raw {
            info!(target: "config", raw, clamped, "demo_pause_clamped");
        }
        Duration::from_millis(clamped)
    }
}
