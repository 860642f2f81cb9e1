use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::LocaleSource;
use crate::config::{checked_timeout, PantryConfig};
use crate::error::ImportError;
use crate::format::Locale;

const API_KEY_HEADER: &str = "GROCY-API-KEY";

/// Minimal Grocy API client: connection check and configured locale
pub struct GrocyClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SystemInfo {
    pub grocy_version: GrocyVersion,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GrocyVersion {
    pub version: String,
    pub release_date: String,
}

#[derive(Debug, Deserialize)]
struct SystemConfig {
    #[serde(rename = "LOCALE")]
    locale: String,
}

impl GrocyClient {
    pub fn new(config: &PantryConfig) -> Result<Self, ImportError> {
        let timeout = checked_timeout("pantry.timeout_ms", config.timeout())?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ImportError::HttpClient)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ImportError> {
        let url = format!("{}/api{}", self.base_url, path);
        debug!("Pantry request: GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| ImportError::fetch(&url, e))?;

        response
            .json::<T>()
            .await
            .map_err(|e| ImportError::Pantry(format!("unexpected response from {path}: {e}")))
    }

    /// Version information, used to verify the connection
    pub async fn system_info(&self) -> Result<SystemInfo, ImportError> {
        self.get("/system/info").await
    }

    /// The locale configured in the pantry service
    pub async fn configured_locale(&self) -> Result<Locale, ImportError> {
        let config: SystemConfig = self.get("/system/config").await?;
        debug!("Pantry locale: {}", config.locale);
        Ok(Locale::from_tag(&config.locale))
    }
}

#[async_trait]
impl LocaleSource for GrocyClient {
    async fn locale(&self) -> Result<Locale, ImportError> {
        self.configured_locale().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use std::time::{Duration, Instant};
    use tokio::net::TcpListener;

    fn client(server: &Server) -> GrocyClient {
        GrocyClient::new(&PantryConfig {
            base_url: format!("{}/", server.url()),
            api_key: "test-key".to_string(),
            timeout_ms: 5000,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_configured_locale() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/system/config")
            .match_header("GROCY-API-KEY", "test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"LOCALE": "de", "CURRENCY": "EUR"}"#)
            .create_async()
            .await;

        let locale = client(&server).locale().await.unwrap();
        assert_eq!(locale, Locale::De);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_system_info() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/system/info")
            .match_header("GROCY-API-KEY", Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"grocy_version": {"Version": "4.2.0", "ReleaseDate": "2024-03-08"}, "php_version": "8.3"}"#,
            )
            .create_async()
            .await;

        let info = client(&server).system_info().await.unwrap();
        assert_eq!(info.grocy_version.version, "4.2.0");
        assert_eq!(info.grocy_version.release_date, "2024-03-08");
    }

    #[tokio::test]
    async fn test_unauthorized_is_fetch_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/system/config")
            .with_status(401)
            .create_async()
            .await;

        let result = client(&server).configured_locale().await;
        assert!(matches!(result, Err(ImportError::Fetch { .. })));
    }

    #[tokio::test]
    async fn test_unexpected_body_is_pantry_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/system/config")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"CURRENCY": "EUR"}"#)
            .create_async()
            .await;

        let result = client(&server).configured_locale().await;
        assert!(matches!(result, Err(ImportError::Pantry(_))));
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        // accepts connections but never answers
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let client = GrocyClient::new(&PantryConfig {
            base_url: format!("http://{addr}"),
            api_key: "test-key".to_string(),
            timeout_ms: 200,
        })
        .unwrap();

        let started = Instant::now();
        let result = client.configured_locale().await;
        assert!(matches!(result, Err(ImportError::Fetch { .. })));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_zero_timeout_is_config_error() {
        let result = GrocyClient::new(&PantryConfig {
            base_url: "http://grocy.local".to_string(),
            api_key: "test-key".to_string(),
            timeout_ms: 0,
        });
        assert!(matches!(result, Err(ImportError::Config(_))));
    }
}
