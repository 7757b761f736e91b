//! Page controller: form state, the loading guard and result presentation.
//!
//! The controller owns no network code. It drives a [`DetectionService`],
//! which [`ApiClient`] implements, so the same state machine can run against
//! a fake service in tests.

use crate::client::ApiClient;
use crate::error::FailureCategory;
use crate::types::{AnalysisResult, ListingQuery, ManualListing};
use crate::validation::{self, ListingField};
use crate::Result;
use async_trait::async_trait;
use std::fmt::Write as _;
use std::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

/// The three calls a page can make to the detection service.
#[async_trait]
pub trait DetectionService: Send + Sync {
    async fn health_check(&self) -> Result<()>;
    async fn check_listing(&self, url: &str) -> Result<AnalysisResult>;
    async fn check_manual_listing(&self, listing: &ManualListing) -> Result<AnalysisResult>;
}

#[async_trait]
impl DetectionService for ApiClient {
    async fn health_check(&self) -> Result<()> {
        ApiClient::health_check(self).await
    }

    async fn check_listing(&self, url: &str) -> Result<AnalysisResult> {
        ApiClient::check_listing(self, url).await
    }

    async fn check_manual_listing(&self, listing: &ManualListing) -> Result<AnalysisResult> {
        ApiClient::check_manual_listing(self, listing).await
    }
}

/// Snapshot of everything the page renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageState {
    pub url: String,
    pub listing: ManualListing,
    pub loading: bool,
    pub result: Option<AnalysisResult>,
    pub error: Option<String>,
    /// `None` until the health check has run.
    pub backend_connected: Option<bool>,
}

/// What happened to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Completed,
    Failed(FailureCategory),
    /// Another request is still in flight.
    Busy,
    /// Nothing to submit.
    Empty,
}

pub struct PageController<S: DetectionService> {
    service: S,
    state: Mutex<PageState>,
}

impl<S: DetectionService> PageController<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: Mutex::new(PageState::default()),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    fn lock(&self) -> MutexGuard<'_, PageState> {
        lock_state(&self.state)
    }

    pub fn state(&self) -> PageState {
        self.lock().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// Run the health check once and record the result. Failure is informational.
    pub async fn check_backend(&self) -> bool {
        let connected = match self.service.health_check().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "backend health check failed");
                false
            }
        };
        self.lock().backend_connected = Some(connected);
        connected
    }

    /// Edits are ignored while a request is in flight.
    pub fn set_url(&self, text: &str) -> bool {
        let mut state = self.lock();
        if state.loading {
            return false;
        }
        state.url = text.to_string();
        true
    }

    /// Apply one form edit. Returns `false` when the value is rejected or input is disabled.
    pub fn set_field(&self, field: ListingField, raw: &str) -> bool {
        let mut state = self.lock();
        if state.loading {
            return false;
        }
        match validation::apply_field(&mut state.listing, field, raw) {
            Ok(()) => true,
            Err(e) => {
                info!(%field, error = %e, "rejected form input");
                false
            }
        }
    }

    pub async fn submit_url(&self) -> SubmitOutcome {
        let url = self.lock().url.trim().to_string();
        if url.is_empty() {
            return SubmitOutcome::Empty;
        }
        self.submit(ListingQuery::Url(url)).await
    }

    pub async fn submit_manual(&self) -> SubmitOutcome {
        let listing = self.lock().listing.clone();
        self.submit(ListingQuery::Manual(listing)).await
    }

    /// Issue one analysis request. Only one may be in flight at a time.
    pub async fn submit(&self, query: ListingQuery) -> SubmitOutcome {
        {
            let mut state = self.lock();
            if state.loading {
                return SubmitOutcome::Busy;
            }
            state.loading = true;
            state.result = None;
            state.error = None;
        }
        let reset = LoadingReset::arm(&self.state);

        let outcome = match &query {
            ListingQuery::Url(url) => {
                info!(listing_url = %url, "submitting listing URL");
                self.service.check_listing(url).await
            }
            ListingQuery::Manual(listing) => {
                info!(listing_name = %listing.name, "submitting manual listing");
                self.service.check_manual_listing(listing).await
            }
        };

        reset.disarm();
        let mut state = self.lock();
        state.loading = false;
        match outcome {
            Ok(result) => {
                state.result = Some(result);
                SubmitOutcome::Completed
            }
            Err(e) => {
                let category = e.category();
                state.error = Some(e.to_string());
                SubmitOutcome::Failed(category)
            }
        }
    }

    /// One-line verdict for the last result, if any.
    pub fn result_message(&self) -> Option<String> {
        self.lock().result.as_ref().map(verdict_message)
    }

    /// Plain-text result panel.
    pub fn render(&self) -> String {
        let state = self.lock();
        if state.loading {
            return "Checking the listing...".to_string();
        }
        if let Some(error) = &state.error {
            return format!("Error: {}", error);
        }
        match &state.result {
            Some(result) => render_result(result),
            None => String::new(),
        }
    }
}

fn lock_state(state: &Mutex<PageState>) -> MutexGuard<'_, PageState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Clears `loading` if a submission is dropped before its request finishes.
struct LoadingReset<'a> {
    state: &'a Mutex<PageState>,
    armed: bool,
}

impl<'a> LoadingReset<'a> {
    fn arm(state: &'a Mutex<PageState>) -> Self {
        Self { state, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for LoadingReset<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!("submission cancelled before the response arrived");
            lock_state(self.state).loading = false;
        }
    }
}

/// `Analysis of '<name>': <VERDICT> (Model confidence: <n>%)`
pub fn verdict_message(result: &AnalysisResult) -> String {
    let name = result.name.as_deref().unwrap_or("Unnamed listing");
    let verdict = if result.is_suspicious {
        "FLAGGED AS ANOMALY"
    } else {
        "NO ANOMALY DETECTED"
    };
    format!(
        "Analysis of '{}': {} (Model confidence: {}%)",
        name,
        verdict,
        result.confidence_percent()
    )
}

fn render_result(result: &AnalysisResult) -> String {
    let mut out = verdict_message(result);

    if let Some(score) = result.anomaly_score {
        let _ = write!(out, "\nAnomaly score: {:.4}", score);
    }
    if let Some(predictions) = &result.model_predictions {
        out.push_str("\nModel predictions:");
        for (model, prediction) in predictions {
            let _ = write!(out, "\n  {}: {}", model, display_value(prediction));
        }
    }
    if let Some(analysis) = &result.analysis {
        render_section(&mut out, "Feature analysis", analysis);
    }
    if let Some(data) = &result.scraped_data {
        render_section(&mut out, "Listing data", data);
    }
    out
}

fn render_section(out: &mut String, title: &str, value: &serde_json::Value) {
    let _ = write!(out, "\n{}:", title);
    match value.as_object() {
        Some(map) => {
            for (key, v) in map {
                let _ = write!(out, "\n  {}: {}", key, display_value(v));
            }
        }
        None => {
            let _ = write!(out, " {}", display_value(value));
        }
    }
}

fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
