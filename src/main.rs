use std::env;

use log::{error, info};

use chessopponent::config::EngineConfig;
use chessopponent::uci::UciHandler;

/// Environment variable naming a TOML config file
const CONFIG_ENV: &str = "CHESS_ENGINE_CONFIG";

fn load_config() -> EngineConfig {
    let Ok(path) = env::var(CONFIG_ENV) else {
        return EngineConfig::default();
    };
    match EngineConfig::load(&path) {
        Ok(config) => {
            info!("loaded config from {}", path);
            config
        }
        Err(e) => {
            error!("{}, using defaults", e);
            EngineConfig::default()
        }
    }
}

fn main() {
    // UCI owns stdout; logs go to stderr
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut handler = UciHandler::new(load_config());
    handler.run();
}
