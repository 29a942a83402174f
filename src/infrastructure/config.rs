use crate::domain::error::CraftyError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub naver: NaverConfig,
    #[serde(default)]
    pub youtube: YouTubeConfig,
    #[serde(default)]
    pub kakao: KakaoConfig,
    #[serde(default)]
    pub google: GoogleConfig,
    #[serde(default)]
    pub pexels: PexelsConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_rate_limit")]
    pub rate_limit_per_minute: u32,
    /// Behind a reverse proxy: take the client from the last `X-Forwarded-For` hop.
    #[serde(default)]
    pub trust_proxy: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Memory,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    pub path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NaverConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    #[serde(default = "default_naver_base")]
    pub base_url: String,
    /// Shopping category used when the caller does not name one.
    #[serde(default = "default_category")]
    pub default_category: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct YouTubeConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_youtube_base")]
    pub base_url: String,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct KakaoConfig {
    pub rest_api_key: Option<String>,
    #[serde(default = "default_kakao_base")]
    pub base_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GoogleConfig {
    pub api_key: Option<String>,
    pub cse_id: Option<String>,
    #[serde(default = "default_google_base")]
    pub base_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PexelsConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_pexels_base")]
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            rate_limit_per_minute: default_rate_limit(),
            trust_proxy: false,
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: "INFO".to_string(),
        }
    }
}

impl Default for NaverConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            base_url: default_naver_base(),
            default_category: default_category(),
        }
    }
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_youtube_base(),
            max_results: default_max_results(),
        }
    }
}

impl Default for KakaoConfig {
    fn default() -> Self {
        Self {
            rest_api_key: None,
            base_url: default_kakao_base(),
        }
    }
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            cse_id: None,
            base_url: default_google_base(),
        }
    }
}

impl Default for PexelsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_pexels_base(),
        }
    }
}

// Defaults
fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}
fn default_rate_limit() -> u32 {
    30
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "INFO".to_string()
}
fn default_naver_base() -> String {
    "https://openapi.naver.com".to_string()
}
fn default_category() -> String {
    // 디지털/가전
    "50000003".to_string()
}
fn default_youtube_base() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}
fn default_max_results() -> u32 {
    10
}
fn default_kakao_base() -> String {
    "https://dapi.kakao.com".to_string()
}
fn default_google_base() -> String {
    "https://www.googleapis.com".to_string()
}
fn default_pexels_base() -> String {
    "https://api.pexels.com".to_string()
}

impl Config {
    /// Credentials from the environment win over the file.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let set = |slot: &mut Option<String>, name: &str| {
            if let Some(v) = lookup(name).filter(|v| !v.is_empty()) {
                *slot = Some(v);
            }
        };
        set(&mut self.naver.client_id, "NAVER_CLIENT_ID");
        set(&mut self.naver.client_secret, "NAVER_CLIENT_SECRET");
        set(&mut self.youtube.api_key, "YOUTUBE_API_KEY");
        set(&mut self.kakao.rest_api_key, "KAKAO_REST_API_KEY");
        set(&mut self.google.api_key, "GOOGLE_API_KEY");
        set(&mut self.google.cse_id, "GOOGLE_CSE_ID");
        set(&mut self.pexels.api_key, "PEXELS_API_KEY");
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("craftylink").join("config.toml"))
}

/// Database path: `[storage] path` or ~/.config/craftylink/cache.db
pub fn get_database_path(config: &Config) -> PathBuf {
    if let Some(path) = config.storage.path.as_deref().filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("craftylink")
        .join("cache.db")
}

pub fn parse_config(content: &str) -> Result<Config, CraftyError> {
    Ok(toml::from_str::<Config>(content)?)
}

pub fn load_config() -> Result<Config, CraftyError> {
    let mut config = Config::default();

    if let Some(path) = get_config_path() {
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            match parse_config(&content) {
                Ok(parsed) => config = parsed,
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse config file: {}. Using defaults.",
                        e
                    );
                }
            }
        }
    }

    config.apply_env_overrides();
    Ok(config)
}

pub fn generate_config_sample() -> Result<(), CraftyError> {
    let Some(path) = get_config_path() else {
        return Err(CraftyError::Config(
            "Cannot determine config directory".to_string(),
        ));
    };

    if path.exists() {
        eprintln!("Config file already exists at: {}", path.display());
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let sample = Config::default();
    let toml_content = toml::to_string_pretty(&sample)
        .map_err(|e| CraftyError::Config(format!("Failed to serialize config: {}", e)))?;
    fs::write(&path, toml_content)
        .map_err(|e| CraftyError::Config(format!("Failed to write config file: {}", e)))?;
    println!("Generated config file at: {}", path.display());

    Ok(())
}
