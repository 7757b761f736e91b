//! Form input validation for manual listing entry.
//!
//! Each edit is validated on its own. A rejected edit leaves the listing
//! untouched; an empty value clears the field.

use crate::types::ManualListing;
use crate::{Error, ErrorContext, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Longest accepted postal code, e.g. `32801-1234`.
pub const MAX_POSTAL_CODE_LEN: usize = 10;

static SCRIPT_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<\s*(script|style)\b[^>]*>.*?<\s*/\s*(script|style)\s*>")
        .expect("script block pattern is valid")
});

static TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern is valid"));

static POSTAL_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9][0-9 -]*$").expect("postal code pattern is valid"));

/// Editable fields of a [`ManualListing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingField {
    Name,
    Price,
    Address,
    City,
    State,
    PostalCode,
    Bedrooms,
    Bathrooms,
    SquareFootage,
    Description,
}

impl ListingField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingField::Name => "name",
            ListingField::Price => "price",
            ListingField::Address => "address",
            ListingField::City => "city",
            ListingField::State => "state",
            ListingField::PostalCode => "postal_code",
            ListingField::Bedrooms => "bedrooms",
            ListingField::Bathrooms => "bathrooms",
            ListingField::SquareFootage => "square_footage",
            ListingField::Description => "description",
        }
    }
}

impl fmt::Display for ListingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate `raw` for `field` and store it in `listing`.
pub fn apply_field(listing: &mut ManualListing, field: ListingField, raw: &str) -> Result<()> {
    match field {
        ListingField::Name => listing.name = sanitize_text(raw),
        ListingField::Address => listing.address = sanitize_text(raw),
        ListingField::City => listing.city = sanitize_text(raw),
        ListingField::State => listing.state = sanitize_text(raw),
        ListingField::Description => listing.description = sanitize_text(raw),
        ListingField::Price => listing.price = parse_non_negative(field, raw)?,
        ListingField::Bathrooms => listing.bathrooms = parse_non_negative(field, raw)?,
        ListingField::SquareFootage => listing.square_footage = parse_non_negative(field, raw)?,
        ListingField::Bedrooms => listing.bedrooms = parse_count(field, raw)?,
        ListingField::PostalCode => listing.postal_code = parse_postal_code(raw)?,
    }
    Ok(())
}

/// Remove markup from free text. Script and style blocks go with their contents.
pub fn sanitize_text(raw: &str) -> String {
    let without_blocks = SCRIPT_BLOCK.replace_all(raw, "");
    let without_tags = TAG.replace_all(&without_blocks, "");
    without_tags.trim().to_string()
}

fn parse_non_negative(field: ListingField, raw: &str) -> Result<Option<f64>> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => Ok(Some(n)),
        _ => Err(rejected(field, value, "expected a non-negative number")),
    }
}

fn parse_count(field: ListingField, raw: &str) -> Result<Option<u32>> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<u32>()
        .map(Some)
        .map_err(|_| rejected(field, value, "expected a non-negative whole number"))
}

fn parse_postal_code(raw: &str) -> Result<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(String::new());
    }
    if value.len() > MAX_POSTAL_CODE_LEN {
        return Err(rejected(
            ListingField::PostalCode,
            value,
            "at most 10 characters",
        ));
    }
    if !POSTAL_CODE.is_match(value) {
        return Err(rejected(
            ListingField::PostalCode,
            value,
            "digits with optional hyphen or space",
        ));
    }
    Ok(value.to_string())
}

fn rejected(field: ListingField, value: &str, expected: &str) -> Error {
    Error::validation_with_context(
        format!("invalid value for {}: {:?}", field, value),
        ErrorContext::new()
            .with_field_path(format!("listing.{}", field))
            .with_details(expected)
            .with_source("form_validation"),
    )
}
