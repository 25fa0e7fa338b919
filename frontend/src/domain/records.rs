//! Catalogue records as returned by the backend.
//!
//! Records are decoded leniently: unknown fields are ignored, optional
//! fields default to `None`, and display-only values (`price`, `rating`,
//! `reviews`) accept either JSON strings or numbers. Missing values are not
//! validation errors; renderers substitute display defaults.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A value shown verbatim, whether the backend sent text or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisplayValue {
    /// Pre-formatted text such as `"$299"` or `"2.1k"`.
    Text(String),
    /// A raw JSON number such as `4.8`.
    Number(serde_json::Number),
}

impl DisplayValue {
    /// Whether the value would render as an empty string.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }

    /// Whether the value is the number zero, which displays as "no data".
    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Number(number) if number.as_f64() == Some(0.0))
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text.trim()),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

/// One service type (hotels, flights, visas, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// Display name; also drives category classification.
    pub name: String,
    /// Marketing blurb.
    #[serde(default)]
    pub description: Option<String>,
    /// Image URL.
    #[serde(default, alias = "image_url")]
    pub image: Option<String>,
}

/// One travel destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationRecord {
    /// Display name.
    pub name: String,
    /// Marketing blurb.
    #[serde(default)]
    pub description: Option<String>,
    /// Image URL.
    #[serde(default, alias = "image_url")]
    pub image: Option<String>,
    /// Starting price, e.g. `"$299"`.
    #[serde(default)]
    pub price: Option<DisplayValue>,
    /// Average rating, e.g. `4.8`.
    #[serde(default)]
    pub rating: Option<DisplayValue>,
    /// Review count, e.g. `"2.1k"`.
    #[serde(default)]
    pub reviews: Option<DisplayValue>,
    /// Adds the "Featured" badge. `null` reads as not featured.
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    /// Number of live deals for the destination.
    #[serde(default)]
    pub deals_count: Option<u32>,
}

impl DestinationRecord {
    pub fn is_featured(&self) -> bool {
        self.featured.unwrap_or(false)
    }

    /// `"City, Country"` when either part is known.
    pub fn location(&self) -> Option<String> {
        let parts = [self.city.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// A booking belonging to the signed-in user.
///
/// Only the count reaches the page today; the remaining fields are decoded
/// so logs and future views have them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub check_in_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub check_out_date: Option<DateTime<Utc>>,
}

/// Treat blank strings as missing.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}
