use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
const DEFAULT_CHAT_MODEL: &str = "gpt-4.1-mini";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_LOG_DIR: &str = "logs";

const CONFIG_PATH_ENV: &str = "STRATA_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "strata-backend.toml";

/// Optional on-disk settings. Every field can also come from the
/// environment, which wins over the file.
#[derive(Debug, Clone, Default, Deserialize)]
struct FileSettings {
    api_key: Option<String>,
    base_url: Option<String>,
    embedding_model: Option<String>,
    chat_model: Option<String>,
    port: Option<u16>,
    log_dir: Option<PathBuf>,
}

/// Resolved service settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
    pub embedding_model: String,
    pub chat_model: String,
    pub port: u16,
    pub log_dir: PathBuf,
}

impl Settings {
    /// Load the optional TOML config file, apply environment overrides,
    /// and fail when no provider API key is configured.
    pub fn load() -> anyhow::Result<Self> {
        let file = load_file_settings()?;

        let api_key = env_string("OPENAI_API_KEY")
            .or(file.api_key)
            .context("OPENAI_API_KEY is not set and the config file has no api_key")?;

        let base_url = env_string("OPENAI_BASE_URL")
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let embedding_model = env_string("STRATA_EMBEDDING_MODEL")
            .or(file.embedding_model)
            .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string());

        let chat_model = env_string("STRATA_CHAT_MODEL")
            .or(file.chat_model)
            .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|val| val.parse::<u16>().ok())
            .or(file.port)
            .unwrap_or(DEFAULT_PORT);

        let log_dir = env_string("STRATA_LOG_DIR")
            .map(PathBuf::from)
            .or(file.log_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));

        Ok(Settings {
            api_key,
            base_url,
            embedding_model,
            chat_model,
            port,
            log_dir,
        })
    }
}

fn env_string(key: &str) -> Option<String> {
    env::var(key).ok().filter(|val| !val.is_empty())
}

fn load_file_settings() -> anyhow::Result<FileSettings> {
    let path = env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

    if !path.exists() {
        return Ok(FileSettings::default());
    }

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_file_settings(&raw).with_context(|| format!("Invalid config file {}", path.display()))
}

fn parse_file_settings(raw: &str) -> Result<FileSettings, toml::de::Error> {
    toml::from_str(raw)
}
