use common::config::Validate;
use common::tictactoe::Difficulty;
use serde::{Deserialize, Serialize};

use super::{ConfigManager, FileContentConfigProvider, YamlConfigSerializer};

const CONFIG_FILE_NAME: &str = "tictactoe_config.yaml";
const MAX_BOT_MOVE_DELAY_MS: u64 = 10_000;

pub type ClientConfigManager = ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer>;

pub fn default_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub fn get_config_manager(config_path: &str) -> ClientConfigManager {
    ConfigManager::from_yaml_file(config_path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    pub difficulty: Difficulty,
    pub bot_move_delay_ms: u64,
    #[serde(default = "default_remember_difficulty")]
    pub remember_difficulty: bool,
}

fn default_remember_difficulty() -> bool {
    true
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        if self.bot_move_delay_ms > MAX_BOT_MOVE_DELAY_MS {
            return Err(format!(
                "bot_move_delay_ms must not exceed {}",
                MAX_BOT_MOVE_DELAY_MS
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::None,
            bot_move_delay_ms: 500,
            remember_difficulty: default_remember_difficulty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::{ConfigContentProvider, ConfigSerializer};

    fn get_temp_file_path() -> String {
        use std::env;
        let mut path = env::temp_dir();
        let random_number: u32 = rand::random();
        let file_name = format!("temp_tictactoe_config_{}.yaml", random_number);
        path.push(file_name);
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = Config::default();
        let serializer = YamlConfigSerializer::new();
        let serialized_string = serializer.serialize(&default_config).unwrap();
        let deserialized_config: Config = serializer.deserialize(&serialized_string).unwrap();
        assert_eq!(default_config, deserialized_config);
    }

    #[test]
    fn test_config_round_trips_through_manager() {
        let config = Config {
            difficulty: Difficulty::Hard,
            bot_move_delay_ms: 250,
            remember_difficulty: false,
        };
        let manager = get_config_manager(&get_temp_file_path());

        assert!(manager.set_config(&config).is_ok());
        assert_eq!(manager.get_config().unwrap(), config);

        let reloaded = get_config_manager(manager.content_provider().path().to_str().unwrap());
        assert_eq!(reloaded.get_config().unwrap(), config);
    }

    #[test]
    fn test_config_file_does_not_exist_returns_default_config() {
        let manager = get_config_manager("this_tictactoe_config_does_not_exist.yaml");
        assert_eq!(manager.get_config().unwrap(), Config::default());
    }

    #[test]
    fn test_missing_remember_flag_defaults_to_true() {
        let file_path = get_temp_file_path();
        let content_provider = FileContentConfigProvider::new(file_path.clone());
        content_provider
            .set_config_content("difficulty: Medium\nbot_move_delay_ms: 0\n")
            .unwrap();

        let config = get_config_manager(&file_path).get_config().unwrap();
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert_eq!(config.bot_move_delay_ms, 0);
        assert!(config.remember_difficulty);
    }

    #[test]
    fn test_invalid_config_cant_be_read() {
        let file_path = get_temp_file_path();
        let content_provider = FileContentConfigProvider::new(file_path.clone());
        content_provider
            .set_config_content("difficulty: Easy\nbot_move_delay_ms: 60000\n")
            .unwrap();

        assert!(get_config_manager(&file_path).get_config().is_err());
    }

    #[test]
    fn test_unknown_difficulty_cant_be_read() {
        let file_path = get_temp_file_path();
        let content_provider = FileContentConfigProvider::new(file_path.clone());
        content_provider
            .set_config_content("difficulty: Impossible\nbot_move_delay_ms: 100\n")
            .unwrap();

        assert!(get_config_manager(&file_path).get_config().is_err());
    }
}
