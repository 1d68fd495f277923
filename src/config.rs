// Startup settings, read once from `sketchpad.toml` (or $SKETCHPAD_CONFIG).
// Every field has a default so an absent or partial file still works.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Error;
use crate::history::DEFAULT_CAPACITY;
use crate::types::Color;

pub const CONFIG_ENV: &str = "SKETCHPAD_CONFIG";
const DEFAULT_FILE: &str = "sketchpad.toml";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub width: usize,          // canvas pixels, toolbar not included
    pub height: usize,
    pub toolbar_height: usize,
    pub history_capacity: usize,
    pub background: String,    // #RRGGBB
    pub pen_width: u32,
    pub eraser_width: u32,
    pub min_width: u32,
    pub max_width: u32,
    pub initial_color: String, // #RRGGBB
    pub export_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 640,
            toolbar_height: 48,
            history_capacity: DEFAULT_CAPACITY,
            background: "#ffffff".into(),
            pen_width: 10,
            eraser_width: 10,
            min_width: 1,
            max_width: 50,
            initial_color: "#f44336".into(),
            export_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load from $SKETCHPAD_CONFIG, else `./sketchpad.toml`, else defaults.
    pub fn load() -> Result<Self, Error> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE));
        Self::load_from(&path)
    }

    /// A missing file means defaults; a malformed one is fatal.
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(Error::Config { path: path.to_owned(), reason: e.to_string() });
            }
        };
        let config = Self::parse(&text).map_err(|reason| Error::Config { path: path.to_owned(), reason })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn parse(text: &str) -> Result<Self, String> {
        let config: Config = toml::from_str(text).map_err(|e| e.to_string())?;
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }

    /// Reject settings the program cannot run with.
    pub fn validate(&self) -> Result<(), Error> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidSize { width: self.width, height: self.height });
        }
        if self.history_capacity <= 1 {
            return Err(Error::InvalidCapacity(self.history_capacity));
        }
        if self.min_width == 0 || self.min_width > self.max_width {
            return Err(Error::InvalidWidthRange { min: self.min_width, max: self.max_width });
        }
        self.background_color()?;
        self.initial_color()?;
        Ok(())
    }

    pub fn background_color(&self) -> Result<Color, Error> {
        Color::from_hex(&self.background)
    }

    pub fn initial_color(&self) -> Result<Color, Error> {
        Color::from_hex(&self.initial_color)
    }

    /// Clamp a width into the configured slider range.
    pub fn clamp_width(&self, width: u32) -> u32 {
        width.clamp(self.min_width, self.max_width)
    }
}
