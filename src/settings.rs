use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_path: String,
    pub host: String,
    pub port: u16,
}

impl Settings {
    /// Defaults, then an optional `trivia.toml`, then `TRIVIA_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::builder()?
            .add_source(File::with_name("trivia").required(false))
            .add_source(Environment::with_prefix("TRIVIA").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("database_path", "trivia.db")?
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080_i64)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
