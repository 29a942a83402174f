// HTTP client utilities
use crate::domain::error::CraftyError;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::warn;

/// Create the shared HTTP client used by every upstream integration.
pub fn create_client() -> Result<Client, CraftyError> {
    Ok(Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(std::time::Duration::from_secs(30))
        .timeout(std::time::Duration::from_secs(30))
        .user_agent(concat!("craftylink/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Decode a JSON body, turning non-2xx answers into `CraftyError::Upstream`.
pub async fn read_json<T: DeserializeOwned>(
    api: &'static str,
    response: Response,
) -> Result<T, CraftyError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(api, status = status.as_u16(), body = %body, "upstream request failed");
        return Err(CraftyError::upstream(api, status.as_u16(), body));
    }
    Ok(response.json::<T>().await?)
}

/// Fail with a configuration error when a credential is absent or blank.
pub fn require<'a>(value: &'a Option<String>, what: &str) -> Result<&'a str, CraftyError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CraftyError::Config(format!("{} not configured", what))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_credentials_are_config_errors() {
        assert!(matches!(
            require(&None, "Naver client id"),
            Err(CraftyError::Config(_))
        ));
        assert!(require(&Some(String::new()), "key").is_err());
        assert_eq!(require(&Some("k".into()), "key").unwrap(), "k");
    }
}
