use crate::config::AppConfig;
use crate::transport::{HttpTransport, RequestOptions};
use crate::types::{AnalysisResult, ListingSubmission, ManualListing};
use crate::{Error, ErrorContext, Result};
use serde_json::json;
use std::time::Duration;
use tracing::info;

pub const HEALTH_PATH: &str = "/";
pub const CHECK_LISTING_PATH: &str = "/check_listing";
pub const CHECK_MANUAL_LISTING_PATH: &str = "/check_manual_listing";

/// Client for the anomaly detection service.
///
/// Every call is bounded by the transport deadline and fails with a classified
/// [`Error`]. Nothing is retried.
pub struct ApiClient {
    pub(crate) config: AppConfig,
    pub(crate) transport: HttpTransport,
}

impl ApiClient {
    /// Build a client from configuration with default settings.
    pub fn new(config: AppConfig) -> Result<Self> {
        crate::client::ApiClientBuilder::new().config(config).build()
    }

    pub fn builder() -> crate::client::ApiClientBuilder {
        crate::client::ApiClientBuilder::new()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    pub fn timeout(&self) -> Duration {
        self.transport.timeout()
    }

    /// Check that the service answers on its root path with a success status.
    pub async fn health_check(&self) -> Result<()> {
        self.transport
            .execute(HEALTH_PATH, RequestOptions::get())
            .await
            .map(|_| ())
    }

    /// Submit a listing URL for analysis.
    pub async fn check_listing(&self, url: &str) -> Result<AnalysisResult> {
        self.check_listing_with_headers(url, Vec::new()).await
    }

    /// Same as [`check_listing`](Self::check_listing); `headers` replace the defaults of the same name.
    pub async fn check_listing_with_headers(
        &self,
        url: &str,
        headers: Vec<(String, String)>,
    ) -> Result<AnalysisResult> {
        let url = url.trim();
        if url.is_empty() {
            return Err(Error::validation_with_context(
                "listing URL must not be empty",
                ErrorContext::new()
                    .with_field_path("url")
                    .with_source("check_listing"),
            ));
        }

        info!(listing_url = url, "checking listing");
        let options = headers
            .into_iter()
            .fold(RequestOptions::post(json!({ "url": url })), |opts, (name, value)| {
                opts.header(name, value)
            });
        self.transport.request(CHECK_LISTING_PATH, options).await
    }

    /// Submit manually entered listing details for analysis.
    pub async fn check_manual_listing(&self, listing: &ManualListing) -> Result<AnalysisResult> {
        let submission = ListingSubmission::new(listing);
        info!(listing_id = %submission.listing_id, "checking manual listing");
        let body = serde_json::to_value(&submission)?;
        self.transport
            .request(CHECK_MANUAL_LISTING_PATH, RequestOptions::post(body))
            .await
    }
}
