use thiserror::Error;

#[derive(Error, Debug)]
pub enum CraftyError {
    #[error("Database error: {0}")]
    Database(#[from] tokio_rusqlite::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Non-2xx status or an explicit error payload from a third-party API.
    #[error("{api} API error {status}: {body}")]
    Upstream {
        api: &'static str,
        status: u16,
        body: String,
    },
}

impl CraftyError {
    pub fn upstream(api: &'static str, status: u16, body: impl Into<String>) -> Self {
        Self::Upstream {
            api,
            status,
            body: body.into(),
        }
    }

    /// Status code reported by the upstream API, if this error came from one.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
