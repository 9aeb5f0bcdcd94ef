use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be at least 1")]
    ZeroDimension { field: &'static str },
}

/// Board shape: how many category columns and how many clues per column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardDimensions {
    categories_num: u32,
    clues_num: u32,
}

impl BoardDimensions {
    pub fn new(categories_num: u32, clues_num: u32) -> Result<Self, ConfigError> {
        if categories_num == 0 {
            return Err(ConfigError::ZeroDimension {
                field: "categories_num",
            });
        }
        if clues_num == 0 {
            return Err(ConfigError::ZeroDimension { field: "clues_num" });
        }
        Ok(Self {
            categories_num,
            clues_num,
        })
    }

    pub fn categories_num(&self) -> u32 {
        self.categories_num
    }

    pub fn clues_num(&self) -> u32 {
        self.clues_num
    }
}

impl Default for BoardDimensions {
    fn default() -> Self {
        Self {
            categories_num: default_categories_num(),
            clues_num: default_clues_num(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_categories_num")]
    pub categories_num: u32,
    #[serde(default = "default_clues_num")]
    pub clues_num: u32,
    #[serde(default = "default_clue_source")]
    pub clue_source: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub start_offset: u32,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_categories_num() -> u32 {
    6
}
fn default_clues_num() -> u32 {
    5
}
fn default_clue_source() -> String {
    "http://jservice.io/api/clues".to_string()
}
fn default_request_timeout_secs() -> u64 {
    10
}
fn default_theme() -> String {
    "classic".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            categories_num: default_categories_num(),
            clues_num: default_clues_num(),
            clue_source: default_clue_source(),
            request_timeout_secs: default_request_timeout_secs(),
            start_offset: 0,
            theme: default_theme(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("trivia-board")
            .join("config.toml")
    }

    /// Reset zero-sized board dimensions to their defaults. A board with no
    /// columns or no rows cannot be played.
    pub fn normalize(&mut self) {
        if self.categories_num == 0 {
            self.categories_num = default_categories_num();
        }
        if self.clues_num == 0 {
            self.clues_num = default_clues_num();
        }
    }

    pub fn dimensions(&self) -> Result<BoardDimensions, ConfigError> {
        BoardDimensions::new(self.categories_num, self.clues_num)
    }
}
