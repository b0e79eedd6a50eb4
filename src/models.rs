// =============================================================================
// models.rs - ONE RECORD TO RULE THEM ALL
// =============================================================================
//
// The whole program revolves around a single flat struct with ten fields.
// Field order matters: it is the key order in the line-record file and the
// column order of the CSV table.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder for text fields whose pattern did not match.
pub const NOT_AVAILABLE: &str = "N/A";

/// Column names of the CSV table, in record order.
pub const PRODUCT_FIELDS: [&str; 10] = [
    "title",
    "brand",
    "deal_price",
    "mrp",
    "url",
    "thumbnail_url",
    "reviews",
    "rating",
    "product_details",
    "meta_breadcrumbs",
];

/// One product page, flattened.
///
/// Every field except `url` comes from a pattern match against the raw page
/// and falls back to a default when the pattern finds nothing. `url` is
/// always the address we fetched, never something scraped from the body.
///
/// Deserialization is strict: a line missing any of the ten keys, or
/// carrying one more, is a broken intermediate file, not a product with gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductRecord {
    pub title: String,
    pub brand: String,
    pub deal_price: f64,
    pub mrp: f64,
    pub url: String,
    pub thumbnail_url: String,
    pub reviews: u64,
    pub rating: f64,
    pub product_details: String,
    pub meta_breadcrumbs: String,
}

impl ProductRecord {
    /// A record with every extracted field at its default.
    pub fn empty(url: impl Into<String>) -> Self {
        Self {
            title: NOT_AVAILABLE.to_string(),
            brand: NOT_AVAILABLE.to_string(),
            deal_price: 0.0,
            mrp: 0.0,
            url: url.into(),
            thumbnail_url: NOT_AVAILABLE.to_string(),
            reviews: 0,
            rating: 0.0,
            product_details: NOT_AVAILABLE.to_string(),
            meta_breadcrumbs: NOT_AVAILABLE.to_string(),
        }
    }

    /// Names of the fields currently holding their default value.
    ///
    /// A page can legitimately have no rating, so this is a hint, not a
    /// verdict. Nine entries means the page markup probably changed.
    pub fn defaulted_fields(&self) -> Vec<&'static str> {
        let checks = [
            ("title", self.title == NOT_AVAILABLE),
            ("brand", self.brand == NOT_AVAILABLE),
            ("deal_price", self.deal_price == 0.0),
            ("mrp", self.mrp == 0.0),
            ("thumbnail_url", self.thumbnail_url == NOT_AVAILABLE),
            ("reviews", self.reviews == 0),
            ("rating", self.rating == 0.0),
            ("product_details", self.product_details == NOT_AVAILABLE),
            ("meta_breadcrumbs", self.meta_breadcrumbs == NOT_AVAILABLE),
        ];

        checks
            .into_iter()
            .filter_map(|(name, is_default)| is_default.then_some(name))
            .collect()
    }
}

impl fmt::Display for ProductRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {} - {:.2} (MRP {:.2}), {} reviews, rated {:.1} [{}]",
            self.title, self.brand, self.deal_price, self.mrp, self.reviews, self.rating, self.url
        )
    }
}
