use std::time::Duration;

use serde::{Deserialize, Serialize};
use tictactoe_common::config::{
    ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer,
};
use tictactoe_common::tictactoe::{Difficulty, Mark};

pub const CONFIG_FILE: &str = "tictactoe_config.yaml";
pub const MAX_THINKING_DELAY_MS: u64 = 5000;

pub fn get_config_manager(
    file_path: &str,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(file_path)
}

/// Who sits across the board from the player at the keyboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Opponent {
    #[default]
    Bot,
    /// Two people take turns at the same terminal.
    Human,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub opponent: Opponent,
    pub difficulty: Difficulty,
    pub human_mark: Mark,
    pub thinking_delay: ThinkingDelayConfig,
    pub log_prefix: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            opponent: Opponent::Bot,
            difficulty: Difficulty::Medium,
            human_mark: Mark::X,
            thinking_delay: ThinkingDelayConfig::default(),
            log_prefix: None,
        }
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        if self.human_mark == Mark::Empty {
            return Err("human_mark must be X or O".to_string());
        }
        self.thinking_delay.validate()?;
        Ok(())
    }
}

/// How long the bot pretends to think before each move.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ThinkingDelayConfig {
    pub easy_ms: u64,
    pub medium_ms: u64,
    pub hard_ms: u64,
}

impl Default for ThinkingDelayConfig {
    fn default() -> Self {
        Self {
            easy_ms: 400,
            medium_ms: 600,
            hard_ms: 800,
        }
    }
}

impl ThinkingDelayConfig {
    pub fn delay_for(&self, difficulty: Difficulty) -> Duration {
        let millis = match difficulty {
            Difficulty::Easy => self.easy_ms,
            Difficulty::Medium => self.medium_ms,
            Difficulty::Hard => self.hard_ms,
        };
        Duration::from_millis(millis)
    }
}

impl Validate for ThinkingDelayConfig {
    fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("easy_ms", self.easy_ms),
            ("medium_ms", self.medium_ms),
            ("hard_ms", self.hard_ms),
        ] {
            if value > MAX_THINKING_DELAY_MS {
                return Err(format!(
                    "thinking_delay.{} must be at most {} ms",
                    name, MAX_THINKING_DELAY_MS
                ));
            }
        }
        Ok(())
    }
}
