// =============================================================================
// extractor.rs - NINE REGEXES AND A DREAM
// =============================================================================
//
// This is where a page of raw HTML turns into a ProductRecord. We do not parse
// the document. We run nine independent regular expressions over the raw text
// and take the first capture group of each. The patterns are tied to one
// site's markup and inline JSON at one point in time; when the site changes,
// fields quietly become "N/A".
//
// Every field has its own named function returning Option<T>. The
// "no match → default" rule lives in exactly one place: extract_product.
// =============================================================================

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::models::{ProductRecord, NOT_AVAILABLE};

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("field pattern must compile")
}

// `.` stops at newlines except in the two `(?s)` block patterns.
static TITLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| pattern(r"<h1.*?>(.*?)</h1>"));
static BRAND_PATTERN: LazyLock<Regex> = LazyLock::new(|| pattern(r#""brand":"(.*?)""#));
static DEAL_PRICE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| pattern(r#""dealPrice":"([0-9.]+)""#));
static MRP_PATTERN: LazyLock<Regex> = LazyLock::new(|| pattern(r#""mrp":"([0-9.]+)""#));
static THUMBNAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| pattern(r#""thumbnail":"(.*?)""#));
static REVIEWS_PATTERN: LazyLock<Regex> = LazyLock::new(|| pattern(r#""reviewCount":(\d+)"#));
static RATING_PATTERN: LazyLock<Regex> = LazyLock::new(|| pattern(r#""ratingValue":([0-9.]+)"#));
static PRODUCT_DETAILS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| pattern(r#"(?s)<div class="product-details">(.*?)</div>"#));
static BREADCRUMBS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| pattern(r#"(?s)<div class="breadcrumbs">(.*?)</div>"#));

/// First capture group of the first match, if any.
fn first_capture<'h>(re: &Regex, html: &'h str) -> Option<&'h str> {
    re.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parse a numeric capture. `[0-9.]+` happily matches "1.2.3" or a lone ".",
/// neither of which is a number; those count as "not found". So does a
/// review count too large for u64.
fn parse_capture<T: std::str::FromStr>(field: &'static str, raw: &str) -> Option<T> {
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            debug!(field = field, raw = raw, "Pattern matched but value is not numeric");
            None
        }
    }
}

/// Like [`parse_capture`], but a digit run long enough to overflow to
/// infinity is also "not found". JSON has no way to write it back.
fn parse_finite(field: &'static str, raw: &str) -> Option<f64> {
    parse_capture::<f64>(field, raw).filter(|value| {
        let finite = value.is_finite();
        if !finite {
            debug!(field = field, digits = raw.len(), "Pattern matched but value overflows f64");
        }
        finite
    })
}

pub fn extract_title(html: &str) -> Option<String> {
    first_capture(&TITLE_PATTERN, html).map(str::to_string)
}

pub fn extract_brand(html: &str) -> Option<String> {
    first_capture(&BRAND_PATTERN, html).map(str::to_string)
}

pub fn extract_deal_price(html: &str) -> Option<f64> {
    first_capture(&DEAL_PRICE_PATTERN, html).and_then(|raw| parse_finite("deal_price", raw))
}

pub fn extract_mrp(html: &str) -> Option<f64> {
    first_capture(&MRP_PATTERN, html).and_then(|raw| parse_finite("mrp", raw))
}

pub fn extract_thumbnail_url(html: &str) -> Option<String> {
    first_capture(&THUMBNAIL_PATTERN, html).map(str::to_string)
}

pub fn extract_reviews(html: &str) -> Option<u64> {
    first_capture(&REVIEWS_PATTERN, html).and_then(|raw| parse_capture("reviews", raw))
}

pub fn extract_rating(html: &str) -> Option<f64> {
    first_capture(&RATING_PATTERN, html).and_then(|raw| parse_finite("rating", raw))
}

/// Contents of `<div class="product-details">`, trimmed. Stops at the first
/// `</div>`, so nested divs get cut short.
pub fn extract_product_details(html: &str) -> Option<String> {
    first_capture(&PRODUCT_DETAILS_PATTERN, html).map(|s| s.trim().to_string())
}

/// Contents of `<div class="breadcrumbs">`, trimmed.
pub fn extract_meta_breadcrumbs(html: &str) -> Option<String> {
    first_capture(&BREADCRUMBS_PATTERN, html).map(|s| s.trim().to_string())
}

/// Build a record from raw page text.
///
/// Never fails. A page where nothing matches comes back as
/// [`ProductRecord::empty`] with `url` set.
pub fn extract_product(html: &str, url: &str) -> ProductRecord {
    let na = || NOT_AVAILABLE.to_string();

    let record = ProductRecord {
        title: extract_title(html).unwrap_or_else(na),
        brand: extract_brand(html).unwrap_or_else(na),
        deal_price: extract_deal_price(html).unwrap_or(0.0),
        mrp: extract_mrp(html).unwrap_or(0.0),
        url: url.to_string(),
        thumbnail_url: extract_thumbnail_url(html).unwrap_or_else(na),
        reviews: extract_reviews(html).unwrap_or(0),
        rating: extract_rating(html).unwrap_or(0.0),
        product_details: extract_product_details(html).unwrap_or_else(na),
        meta_breadcrumbs: extract_meta_breadcrumbs(html).unwrap_or_else(na),
    };

    let defaulted = record.defaulted_fields();
    if !defaulted.is_empty() {
        debug!(
            url = url,
            defaulted = ?defaulted,
            "{} of 9 fields fell back to defaults",
            defaulted.len()
        );
    }

    record
}
