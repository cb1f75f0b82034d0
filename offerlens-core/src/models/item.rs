//! Normalized item types.
//!
//! This module contains the flattened item representation both upstream
//! schemas converge on:
//! - [`NormalizedItem`] - One catalog item, sparsely populated
//! - [`OfferLine`] - One offer listing
//! - [`PriceSummary`] + [`build_price_summary`] - Derived price aggregate
//! - [`ImageSet`], [`ProductInfo`], [`ByLineInfo`], [`ManufactureInfo`],
//!   [`TechnicalInfo`], [`Category`], [`CustomerReviews`] - Item fragments
//!
//! Every field is optional and serialized only when present: a field the
//! provider did not return is absent from the output, never null or
//! empty-string.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Normalized Item
// ============================================================================

/// A flattened catalog item projected from either upstream schema.
///
/// Sparse by design: providers populate response fields based on the
/// requested resources, so most fields are frequently absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NormalizedItem {
    /// Item identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asin: Option<String>,
    /// Link to the item's detail page.
    #[serde(rename = "detailPageURL", skip_serializing_if = "Option::is_none")]
    pub detail_page_url: Option<String>,
    /// Title display value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Feature bullet list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    /// Primary image in up to four sizes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_image: Option<ImageSet>,
    /// Variant images.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_images: Option<Vec<ImageSet>>,
    /// Offer listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offers: Option<Vec<OfferLine>>,
    /// Derived price aggregate over the offer listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_summary: Option<PriceSummary>,
    /// Provider-computed per-condition summaries (legacy schema only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_summaries: Option<Vec<ConditionSummary>>,
    /// Product attributes (color, size, unit count).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_info: Option<ProductInfo>,
    /// Brand and manufacturer names (new schema).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_line_info: Option<ByLineInfo>,
    /// Model and part number (new schema).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacture_info: Option<ManufactureInfo>,
    /// Brand, manufacturer and model (legacy schema).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_info: Option<TechnicalInfo>,
    /// Browse-node categories the item belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
    /// Customer review aggregate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_reviews: Option<CustomerReviews>,
    /// Parent ASIN for variation families.
    #[serde(rename = "parentASIN", skip_serializing_if = "Option::is_none")]
    pub parent_asin: Option<String>,
}

impl NormalizedItem {
    /// Creates an item carrying only an identifier.
    pub fn with_asin(asin: impl Into<String>) -> Self {
        Self {
            asin: Some(asin.into()),
            ..Self::default()
        }
    }
}

// ============================================================================
// Offer Line
// ============================================================================

/// One offer listing, projected to display values and flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OfferLine {
    /// Display price, e.g. "$49.99".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Currency code, e.g. "USD".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Display savings amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings: Option<String>,
    /// Display saving-basis (strike-through) amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saving_basis: Option<String>,
    /// Availability message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    /// Condition value, e.g. "New".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Merchant name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    /// Whether this listing holds the buy box.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_buy_box_winner: Option<bool>,
    /// Offer type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_type: Option<String>,
    /// Whether this listing violates minimum-advertised-price rules.
    #[serde(rename = "violatesMAP", skip_serializing_if = "Option::is_none")]
    pub violates_map: Option<bool>,
    /// Prime eligibility flag (legacy schema).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_prime: Option<bool>,
}

// ============================================================================
// Price Summary
// ============================================================================

/// Derived price aggregate over an item's offer listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSummary {
    /// Total listing count, priced or not.
    pub offer_count: usize,
    /// Lowest raw price among priced listings.
    pub lowest_price: f64,
    /// Highest raw price among priced listings.
    pub highest_price: f64,
}

/// Derives a [`PriceSummary`] from per-listing raw price amounts.
///
/// `amounts` holds one entry per listing, `None` for listings without a
/// numeric price. Listings without a price still count toward
/// `offer_count` but are ignored for the min/max; when no listing carries
/// a price the summary is absent entirely, distinguishing "no priced
/// offers" from "offers all priced at zero".
pub fn build_price_summary(amounts: &[Option<f64>]) -> Option<PriceSummary> {
    let priced: Vec<f64> = amounts.iter().filter_map(|amount| *amount).collect();
    if priced.is_empty() {
        return None;
    }

    let lowest = priced.iter().copied().fold(f64::INFINITY, f64::min);
    let highest = priced.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(PriceSummary {
        offer_count: amounts.len(),
        lowest_price: lowest,
        highest_price: highest,
    })
}

/// Provider-computed per-condition price summary (legacy schema).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConditionSummary {
    /// Condition this summary covers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Display value of the lowest price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lowest_price: Option<String>,
    /// Display value of the highest price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highest_price: Option<String>,
    /// Number of offers in this condition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_count: Option<u64>,
}

// ============================================================================
// Item Fragments
// ============================================================================

/// Image URLs in up to four sizes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageSet {
    /// Small image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small: Option<String>,
    /// Medium image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    /// Large image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
    /// Hi-res image URL (new schema only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hi_res: Option<String>,
}

impl ImageSet {
    /// Returns true if no size is populated.
    pub fn is_empty(&self) -> bool {
        self.small.is_none() && self.medium.is_none() && self.large.is_none() && self.hi_res.is_none()
    }
}

/// Product attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductInfo {
    /// Color display value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Size display value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Unit count display value (numeric upstream, passed through).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_count: Option<Value>,
}

/// Brand and manufacturer names (new schema).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ByLineInfo {
    /// Brand display value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Manufacturer display value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
}

/// Model and part number (new schema).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManufactureInfo {
    /// Model display value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Part number display value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_part_number: Option<String>,
}

/// Brand, manufacturer and model (legacy schema).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TechnicalInfo {
    /// Brand display value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Manufacturer display value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    /// Model display value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// One browse-node category an item belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Category {
    /// Browse node identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Browse node display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Sales rank within this node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_rank: Option<u64>,
}

/// Customer review aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerReviews {
    /// Total review count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    /// Star rating value (e.g. 4.5).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub star_rating: Option<f64>,
}

// ============================================================================
// Tests
// ============================================================================
