use crate::error::AppError;
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub log_level: String,
    pub results_file: Option<String>,
    pub pretty_json: bool,
}

impl AppConfig {
    /// Built-in defaults, then `config/default`, `config/{RUN_MODE}` and
    /// `config/local` when present, then `IMGMETA_*` environment variables.
    pub fn new() -> Result<Self, AppError> {
        let env = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .set_default("log_level", "info")?
            .set_default("pretty_json", false)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("IMGMETA"))
            .build()?;

        Ok(s.try_deserialize()?)
    }
}
