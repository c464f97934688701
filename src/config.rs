use anyhow::Context;
use log::warn;
use serde::Deserialize;
use std::{fs, path::Path};

/// Front-end settings. The rules themselves are fixed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window_width: f32,
    pub window_height: f32,
    /// Delay between replayed gravity frames, in milliseconds.
    pub gravity_frame_ms: u64,
    pub show_legal_moves: bool,
    /// Slots in the legal-move memo table.
    pub legal_cache_entries: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_width: 900.0,
            window_height: 760.0,
            gravity_frame_ms: 15,
            show_legal_moves: true,
            legal_cache_entries: 1 << 16,
        }
    }
}

impl Config {
    /// Loads the YAML file at `path`; a missing file falls back to defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let p = match path {
            Some(p) => p,
            None => return Ok(Self::default()),
        };
        if !p.exists() {
            warn!("config file {} not found, using defaults", p.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(p).with_context(|| format!("failed to read {}", p.display()))?;
        Self::from_yaml(&content).with_context(|| format!("failed to parse {}", p.display()))
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}
