//! Outbound config fetch seam.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::TenantConfig;

/// Error type for fetch operations.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Request error: {0}")]
    Request(String),
}

/// Source of raw config bytes.
///
/// The Spin-backed implementation lives behind the `spin` feature; tests
/// use an in-memory source, so resolution and merge logic never need a
/// WASM runtime.
#[async_trait(?Send)]
pub trait ConfigSource {
    /// Fetch the raw bytes at `url`. Non-success statuses are errors.
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Typed config fetch client over a `ConfigSource`.
pub struct ConfigClient<S: ConfigSource> {
    source: S,
}

impl<S: ConfigSource> ConfigClient<S> {
    /// Create a new config client.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetch and deserialize a JSON document.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let bytes = self.source.fetch_bytes(url).await?;
        serde_json::from_slice(&bytes).map_err(|e| FetchError::Deserialization(e.to_string()))
    }

    /// Fetch a tenant config file.
    pub async fn fetch_config(&self, url: &str) -> Result<TenantConfig, FetchError> {
        self.fetch_json(url).await
    }
}

/// Config source backed by Spin's outbound HTTP host capability.
#[cfg(feature = "spin")]
pub struct SpinConfigSource;

#[cfg(feature = "spin")]
#[async_trait(?Send)]
impl ConfigSource for SpinConfigSource {
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let req = spin_sdk::http::Request::get(url);
        let resp: spin_sdk::http::Response = spin_sdk::http::send(req)
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = *resp.status();
        if status >= 400 {
            return Err(FetchError::Http {
                status,
                url: url.to_string(),
            });
        }

        Ok(resp.body().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct StaticSource {
        files: HashMap<String, Vec<u8>>,
    }

    #[async_trait(?Send)]
    impl ConfigSource for StaticSource {
        async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            self.files
                .get(url)
                .cloned()
                .ok_or_else(|| FetchError::Http {
                    status: 404,
                    url: url.to_string(),
                })
        }
    }

    fn client_with(url: &str, body: &str) -> ConfigClient<StaticSource> {
        let mut files = HashMap::new();
        files.insert(url.to_string(), body.as_bytes().to_vec());
        ConfigClient::new(StaticSource { files })
    }

    #[test]
    fn test_fetch_config_parses_json() {
        let client = client_with(
            "https://x.test/configs/summit.json",
            r#"{"companyName": "Summit Roofing", "city": "Denver"}"#,
        );
        let config = futures::executor::block_on(
            client.fetch_config("https://x.test/configs/summit.json"),
        )
        .unwrap();
        assert_eq!(config.company_name.as_deref(), Some("Summit Roofing"));
        assert_eq!(config.city.as_deref(), Some("Denver"));
    }

    #[test]
    fn test_missing_config_is_an_http_error() {
        let client = client_with("https://x.test/configs/summit.json", "{}");
        let err = futures::executor::block_on(
            client.fetch_config("https://x.test/configs/other.json"),
        )
        .unwrap_err();
        assert!(matches!(err, FetchError::Http { status: 404, .. }));
    }

    #[test]
    fn test_malformed_json_is_a_deserialization_error() {
        let client = client_with("https://x.test/configs/summit.json", "{not json");
        let err = futures::executor::block_on(
            client.fetch_config("https://x.test/configs/summit.json"),
        )
        .unwrap_err();
        assert!(matches!(err, FetchError::Deserialization(_)));
    }
}
