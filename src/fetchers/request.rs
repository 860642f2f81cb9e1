use log::{debug, warn};
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;

use crate::config::{checked_timeout, FetchConfig};
use crate::error::ImportError;

/// Plain HTTP(S) document fetcher with a timeout and optional retries.
///
/// Non-2xx responses count as failures. Retries are off by default.
pub struct RequestFetcher {
    client: Client,
    retry_attempts: u32,
    retry_delay_ms: u64,
}

impl RequestFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, ImportError> {
        let timeout = checked_timeout("fetch.timeout_ms", config.timeout())?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(ImportError::HttpClient)?;

        Ok(Self {
            client,
            retry_attempts: config.retry_attempts,
            retry_delay_ms: config.retry_delay_ms,
        })
    }

    pub async fn fetch(&self, url: &str) -> Result<String, ImportError> {
        let mut attempt = 0;
        loop {
            debug!("Fetching {} (attempt {})", url, attempt + 1);
            match self.fetch_once(url).await {
                Ok(html) => return Ok(html),
                Err(e) if attempt < self.retry_attempts => {
                    attempt += 1;
                    warn!(
                        "Fetching {} failed (retry {}/{}): {}",
                        url, attempt, self.retry_attempts, e
                    );
                    let delay = self.retry_delay(attempt);
                    debug!("Waiting {:?} before retry", delay);
                    sleep(delay).await;
                }
                Err(e) => return Err(ImportError::fetch(url, e)),
            }
        }
    }

    /// Linear backoff, saturating for very large configured delays
    fn retry_delay(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_delay_ms.saturating_mul(u64::from(attempt)))
    }

    async fn fetch_once(&self, url: &str) -> Result<String, reqwest::Error> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        response.text().await
    }
}
