use anyhow::{Context, Result};
use env_logger::Builder;
use log::LevelFilter;
use std::env;

/// Everything the importer reads from the environment, resolved once at
/// startup. A missing variable fails here, before any network call.
#[derive(Debug, Clone)]
pub struct Config {
    pub developer_key: String,
    pub algolia_app_id: String,
    pub algolia_api_key: String,
    pub algolia_index_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            developer_key: require_var("DEVELOPER_KEY")?,
            algolia_app_id: require_var("ALGOLIA_APP_ID")?,
            algolia_api_key: require_var("ALGOLIA_API_KEY")?,
            algolia_index_name: require_var("ALGOLIA_INDEX_NAME")?,
        })
    }
}

fn require_var(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("{name} environment variable must be set"))
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}

pub fn init_logger() {
    Builder::new().filter_level(LevelFilter::Info).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variable_is_an_error() {
        let err = require_var("YT_ALGOLIA_IMPORT_UNSET_VAR").unwrap_err();
        assert!(err
            .to_string()
            .contains("YT_ALGOLIA_IMPORT_UNSET_VAR environment variable must be set"));
    }
}
