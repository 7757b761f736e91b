//! Data types exchanged with the detection service.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ListingQuery`] | What the user submits: a listing URL or a manual entry |
//! | [`ManualListing`] | Manually entered property details |
//! | [`ListingSubmission`] | Wire payload for a manual entry (adds id, timestamp, coordinates) |
//! | [`AnalysisResult`] | Service verdict, passed through to presentation |

pub mod listing;
pub mod result;

pub use listing::{ListingQuery, ListingSubmission, ManualListing};
pub use result::AnalysisResult;
