use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A listing to analyze.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingQuery {
    Url(String),
    Manual(ManualListing),
}

/// Property details entered by hand. Numeric fields stay `None` until entered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManualListing {
    pub name: String,
    pub price: Option<f64>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<f64>,
    #[serde(rename = "square_feet")]
    pub square_footage: Option<f64>,
    pub description: String,
}

/// Payload posted to `/check_manual_listing`.
///
/// Coordinates are not collected by the form and are always sent as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingSubmission {
    pub listing_id: String,
    #[serde(flatten)]
    pub listing: ManualListing,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl ListingSubmission {
    pub fn new(listing: &ManualListing) -> Self {
        Self::with_timestamp(listing, Utc::now())
    }

    pub fn with_timestamp(listing: &ManualListing, timestamp: DateTime<Utc>) -> Self {
        Self {
            listing_id: format!("manual-{}", uuid::Uuid::new_v4()),
            listing: listing.clone(),
            latitude: None,
            longitude: None,
            timestamp,
        }
    }
}
