use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::game::{Difficulty, Mark};

pub const DEFAULT_THINK_DELAY_MS: u64 = 600;

const MAX_THINK_DELAY_MS: u64 = 10_000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub computer_opponent: bool,
    pub difficulty: Difficulty,
    pub computer_mark: Mark,
    pub think_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            computer_opponent: true,
            difficulty: Difficulty::Medium,
            computer_mark: Mark::O,
            think_delay_ms: DEFAULT_THINK_DELAY_MS,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.computer_mark == Mark::Empty {
            return Err(ConfigError::InvalidComputerMark);
        }
        if self.think_delay_ms > MAX_THINK_DELAY_MS {
            return Err(ConfigError::InvalidThinkDelay(self.think_delay_ms));
        }
        Ok(())
    }
}

/// A missing file yields the defaults; unreadable or invalid content is an
/// error.
pub fn load_config(path: impl AsRef<Path>) -> Result<GameConfig, ConfigError> {
    let path = path.as_ref();

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(GameConfig::default());
        }
        Err(err) => {
            return Err(ConfigError::FileRead {
                path: path.to_path_buf(),
                source: err,
            });
        }
    };

    let config: GameConfig = serde_yaml_ng::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

pub fn save_config(path: impl AsRef<Path>, config: &GameConfig) -> Result<(), ConfigError> {
    config.validate()?;

    let content = serde_yaml_ng::to_string(config)?;
    std::fs::write(path.as_ref(), &content).map_err(|err| ConfigError::FileWrite {
        path: path.as_ref().to_path_buf(),
        source: err,
    })
}
