use std::{env, path::PathBuf};

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_STATIC_DIR: &str = "./resources/www/";

#[derive(Debug, Clone)]
pub struct WebConfig {
    pub bind_address: String,
    /// Directory of the browser front end.
    pub static_dir: PathBuf,
}

impl WebConfig {
    /// Reads `WEB_BIND_ADDRESS` and `WEB_STATIC_DIR`, falling back to the
    /// defaults for unset variables.
    pub fn from_env() -> Self {
        Self {
            bind_address: env::var("WEB_BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_owned()),
            static_dir: env::var("WEB_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATIC_DIR)),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_owned(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}
