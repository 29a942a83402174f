//! Config parsing and store selection

use craftylink::domain::cache::Collection;
use craftylink::domain::traits::CacheStore;
use craftylink::infrastructure::config::{get_database_path, parse_config, Config, StorageBackend};
use craftylink::infrastructure::storage::open_store;

#[test]
fn test_logging_defaults() {
    let config = Config::default();
    assert!(config.logging.enable);
    assert_eq!(config.logging.level, "INFO");
    assert!(config.logging.path.is_none());
}

#[test]
fn test_config_toml_format() {
    let toml_content = r#"
[server]
bind = "127.0.0.1:9000"
rate_limit_per_minute = 60
trust_proxy = true

[storage]
backend = "sqlite"
path = "/tmp/craftylink-test.db"

[logging]
enable = true
path = "/tmp/craftylink.log"
level = "DEBUG"

[naver]
client_id = "naver-id"
client_secret = "naver-secret"
default_category = "50000000"

[youtube]
api_key = "yt"
max_results = 25

[kakao]
rest_api_key = "kakao"

[google]
api_key = "g"
cse_id = "cx"

[pexels]
api_key = "px"
base_url = "http://localhost:8081"
"#;

    let config = parse_config(toml_content).unwrap();
    assert_eq!(config.server.bind, "127.0.0.1:9000");
    assert_eq!(config.server.rate_limit_per_minute, 60);
    assert!(config.server.trust_proxy);
    assert_eq!(config.logging.level, "DEBUG");
    assert_eq!(config.naver.default_category, "50000000");
    assert_eq!(config.youtube.max_results, 25);
    assert_eq!(config.youtube.base_url, "https://www.googleapis.com/youtube/v3");
    assert_eq!(config.kakao.rest_api_key.as_deref(), Some("kakao"));
    assert_eq!(config.google.cse_id.as_deref(), Some("cx"));
    assert_eq!(config.pexels.base_url, "http://localhost:8081");
    assert_eq!(
        get_database_path(&config).to_string_lossy(),
        "/tmp/craftylink-test.db"
    );
}

#[test]
fn test_unknown_backend_is_rejected() {
    assert!(parse_config("[storage]\nbackend = \"mongo\"\n").is_err());
}

#[tokio::test]
async fn test_open_memory_store() {
    let mut config = Config::default();
    config.storage.backend = StorageBackend::Memory;
    let store = open_store(&config).await.unwrap();
    for collection in Collection::ALL {
        assert_eq!(store.count(collection).await.unwrap(), 0);
    }
}

#[tokio::test]
async fn test_open_sqlite_store_creates_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("cache.db");

    let mut config = Config::default();
    config.storage.path = Some(path.to_string_lossy().into_owned());
    let store = open_store(&config).await.unwrap();

    assert!(path.exists());
    assert_eq!(store.count(Collection::NaverNews).await.unwrap(), 0);
}
