//! HTTP Source
//!
//! `reqwest` implementation of [`DashboardSource`] used by the terminal
//! dashboard.

use async_trait::async_trait;
use reqwest::Client;

use crate::config::ApiConfig;
use crate::error::{DashboardError, DashboardResult};
use crate::model::Section;
use crate::source::DashboardSource;

/// Fetches dashboard sections over HTTP
pub struct HttpSource {
    client: Client,
    api: ApiConfig,
}

impl HttpSource {
    /// Create a new source with the given API configuration
    pub fn new(api: ApiConfig) -> DashboardResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(api.request_timeout_secs))
            .build()
            .map_err(|e| DashboardError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, api })
    }

    /// Full URL of a section's endpoint
    pub fn url(&self, section: Section) -> String {
        self.api.url(&section.path())
    }
}

#[async_trait(?Send)]
impl DashboardSource for HttpSource {
    async fn fetch(&self, section: Section) -> DashboardResult<serde_json::Value> {
        let url = self.url(section);

        let response = self
            .client
            .get(&url)
            .header("X-Requested-With", "XMLHttpRequest")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DashboardError::Network(format!("{} timed out", url))
                } else {
                    DashboardError::Network(e.to_string())
                }
            })?;

        let status = response.status();

        // Failing endpoints still answer with a JSON envelope
        // (`success: false`), so the body wins over the status code.
        match response.json::<serde_json::Value>().await {
            Ok(body) => Ok(body),
            Err(_) if !status.is_success() => Err(DashboardError::Status {
                section,
                status: status.as_u16(),
            }),
            Err(e) => Err(DashboardError::Parse {
                section,
                message: e.to_string(),
            }),
        }
    }
}
