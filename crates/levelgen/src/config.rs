//! Generator settings with serde-backed JSON loading.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::mapgen::{GRID_COLUMNS, GRID_ROWS};

pub const DEFAULT_WIDTH: usize = 80;
pub const DEFAULT_HEIGHT: usize = 24;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;
pub const DEFAULT_MAX_LOCKED_DOORS: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub width: usize,
    pub height: usize,
    pub max_attempts: u32,
    pub max_locked_doors: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_locked_doors: DEFAULT_MAX_LOCKED_DOORS,
        }
    }
}

impl GeneratorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < GRID_COLUMNS || self.height < GRID_ROWS {
            return Err(ConfigError::BoardTooSmall { width: self.width, height: self.height });
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        Ok(())
    }
}
