mod main_config;

pub(crate) use common::config::{ConfigManager, FileContentConfigProvider, YamlConfigSerializer};

pub use main_config::{ClientConfigManager, Config, default_config_path, get_config_manager};
