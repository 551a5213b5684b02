use serde::Deserialize;
use crate::config::env::{self, EnvKey};

pub const SERVICE_NAME: &str = "channel4-render";

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_APP_ENV: &str = "production";

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub server_port: u16,
    pub app_env: String,
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            server_port: env::get_parsed(EnvKey::ServerPort, DEFAULT_PORT),
            app_env: env::get_or(EnvKey::AppEnv, DEFAULT_APP_ENV),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: DEFAULT_PORT,
            app_env: DEFAULT_APP_ENV.to_string(),
        }
    }
}
