//! Response projection for the legacy PA-API schema.
//!
//! The upstream schema is PascalCase. Projection mirrors the camelCase
//! projector's degradation rules: a malformed result list degrades the
//! envelope with `processing_error` set, malformed nested blocks leave the
//! field absent, and no operation carries search meta in this schema.

use serde_json::Value;

use offerlens_core::{
    build_price_summary, BrowseNode, Category, ConditionSummary, CustomerReviews, ImageSet,
    NormalizedEnvelope, NormalizedItem, NormalizedRecord, OfferLine, Operation, ProductInfo,
    TechnicalInfo,
};

use crate::json::{json_type, present, string_at, strings_at};

/// Projects a PA-API response body into the normalized envelope.
///
/// Bodies occasionally arrive as JSON text rather than structured JSON;
/// those are parsed first and the parsed value becomes the envelope's raw
/// response. Unparsable text degrades the envelope.
pub(crate) fn normalize_response(operation: Operation, response: Value) -> NormalizedEnvelope {
    if !present(&response) {
        return NormalizedEnvelope::empty(operation, response);
    }

    let response = match response {
        Value::String(text) => match serde_json::from_str::<Value>(&text) {
            Ok(parsed) => parsed,
            Err(_) => {
                return NormalizedEnvelope::degraded(
                    operation,
                    Value::String(text),
                    "Failed to process API response: response body is not valid JSON",
                );
            }
        },
        other => other,
    };

    match project_result_block(operation, &response) {
        Ok(records) => NormalizedEnvelope::new(operation, records, response),
        Err(detail) => NormalizedEnvelope::degraded(operation, response, detail),
    }
}

fn project_result_block(
    operation: Operation,
    response: &Value,
) -> Result<Vec<NormalizedRecord>, String> {
    let block = match operation {
        Operation::GetItems => response.pointer("/ItemsResult/Items"),
        Operation::SearchItems => response.pointer("/SearchResult/Items"),
        Operation::GetBrowseNodes => response.pointer("/BrowseNodesResult/BrowseNodes"),
    };

    let entries = match block {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            return Err(format!(
                "Failed to process API response: result list is {}",
                json_type(other)
            ));
        }
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            if !entry.is_object() {
                return Err(format!(
                    "Failed to process API response: entry {index} is not an object"
                ));
            }
            Ok(match operation {
                Operation::GetBrowseNodes => NormalizedRecord::Node(project_browse_node(entry)),
                Operation::GetItems | Operation::SearchItems => {
                    NormalizedRecord::Item(project_item(entry))
                }
            })
        })
        .collect()
}

fn project_item(item: &Value) -> NormalizedItem {
    let mut projected = NormalizedItem {
        asin: string_at(item, "/ASIN"),
        detail_page_url: string_at(item, "/DetailPageURL"),
        ..NormalizedItem::default()
    };

    projected.title = string_at(item, "/ItemInfo/Title/DisplayValue");
    projected.features = strings_at(item, "/ItemInfo/Features/DisplayValues");

    if let Some(primary) = item.pointer("/Images/Primary").filter(|block| present(block)) {
        projected.primary_image = Some(image_set(primary));
    }
    if let Some(variants) = item.pointer("/Images/Variants").and_then(Value::as_array) {
        projected.additional_images = Some(variants.iter().map(image_set).collect());
    }

    if let Some(listings) = item.pointer("/Offers/Listings").and_then(Value::as_array) {
        projected.offers = Some(listings.iter().map(offer_line).collect());
        let amounts: Vec<Option<f64>> = listings
            .iter()
            .map(|listing| listing.pointer("/Price/Amount").and_then(Value::as_f64))
            .collect();
        projected.price_summary = build_price_summary(&amounts);
    }

    if let Some(summaries) = item.pointer("/Offers/Summaries").and_then(Value::as_array) {
        projected.offer_summaries = Some(summaries.iter().map(condition_summary).collect());
    }

    if let Some(info) = item
        .pointer("/ItemInfo/ProductInfo")
        .filter(|block| present(block))
    {
        projected.product_info = Some(ProductInfo {
            color: string_at(info, "/Color/DisplayValue"),
            size: string_at(info, "/Size/DisplayValue"),
            unit_count: info.pointer("/UnitCount/DisplayValue").cloned(),
        });
    }

    if let Some(info) = item
        .pointer("/ItemInfo/TechnicalInfo")
        .filter(|block| present(block))
    {
        projected.technical_info = Some(TechnicalInfo {
            brand: string_at(info, "/Brand/DisplayValue"),
            manufacturer: string_at(info, "/Manufacturer/DisplayValue"),
            model: string_at(info, "/Model/DisplayValue"),
        });
    }

    if let Some(nodes) = item
        .pointer("/BrowseNodeInfo/BrowseNodes")
        .and_then(Value::as_array)
    {
        projected.categories = Some(
            nodes
                .iter()
                .map(|node| Category {
                    id: string_at(node, "/Id"),
                    name: string_at(node, "/DisplayName"),
                    sales_rank: node.pointer("/SalesRank").and_then(Value::as_u64),
                })
                .collect(),
        );
    }

    if let Some(reviews) = item
        .pointer("/CustomerReviews")
        .filter(|block| present(block))
    {
        projected.customer_reviews = Some(CustomerReviews {
            count: reviews.pointer("/Count").and_then(Value::as_u64),
            star_rating: reviews.pointer("/StarRating/Value").and_then(Value::as_f64),
        });
    }

    projected.parent_asin = string_at(item, "/ParentASIN");

    projected
}

fn project_browse_node(node: &Value) -> BrowseNode {
    BrowseNode {
        id: string_at(node, "/Id"),
        display_name: string_at(node, "/DisplayName"),
        context_free_name: string_at(node, "/ContextFreeName"),
        is_root: node.pointer("/IsRoot").and_then(Value::as_bool),
        sales_rank: node.pointer("/SalesRank").and_then(Value::as_u64),
        ancestor: node.pointer("/Ancestor").cloned(),
        children: node.pointer("/Children").cloned(),
    }
}

fn offer_line(listing: &Value) -> OfferLine {
    OfferLine {
        price: string_at(listing, "/Price/DisplayAmount"),
        currency: string_at(listing, "/Price/Currency"),
        savings: string_at(listing, "/SavingBasis/DisplayAmount"),
        saving_basis: None,
        availability: string_at(listing, "/Availability/Message"),
        condition: string_at(listing, "/Condition/Value"),
        merchant: string_at(listing, "/MerchantInfo/Name"),
        is_buy_box_winner: None,
        offer_type: None,
        violates_map: None,
        is_prime: listing
            .pointer("/DeliveryInfo/IsPrimePantryEligible")
            .and_then(Value::as_bool),
    }
}

fn condition_summary(summary: &Value) -> ConditionSummary {
    ConditionSummary {
        condition: string_at(summary, "/Condition/Value"),
        lowest_price: string_at(summary, "/LowestPrice/DisplayAmount"),
        highest_price: string_at(summary, "/HighestPrice/DisplayAmount"),
        offer_count: summary.pointer("/OfferCount").and_then(Value::as_u64),
    }
}

fn image_set(block: &Value) -> ImageSet {
    ImageSet {
        small: string_at(block, "/Small/URL"),
        medium: string_at(block, "/Medium/URL"),
        large: string_at(block, "/Large/URL"),
        hi_res: None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item_fixture() -> Value {
        json!({
            "ASIN": "B07XJ8C8F5",
            "DetailPageURL": "https://www.amazon.com/dp/B07XJ8C8F5?tag=mytag-20",
            "ParentASIN": "B07XJ8C8F4",
            "ItemInfo": {
                "Title": { "DisplayValue": "Fire TV Stick 4K" },
                "Features": { "DisplayValues": ["4K Ultra HD", "Alexa Voice Remote"] },
                "ProductInfo": {
                    "Color": { "DisplayValue": "Black" },
                    "UnitCount": { "DisplayValue": 1 }
                },
                "TechnicalInfo": {
                    "Brand": { "DisplayValue": "Amazon" },
                    "Manufacturer": { "DisplayValue": "Amazon.com" },
                    "Model": { "DisplayValue": "E9L29Y" }
                }
            },
            "Images": {
                "Primary": {
                    "Small": { "URL": "https://m.media-amazon.com/images/I/s.jpg" },
                    "Medium": { "URL": "https://m.media-amazon.com/images/I/m.jpg" },
                    "Large": { "URL": "https://m.media-amazon.com/images/I/l.jpg" }
                },
                "Variants": [
                    { "Large": { "URL": "https://m.media-amazon.com/images/I/v1.jpg" } }
                ]
            },
            "Offers": {
                "Listings": [
                    {
                        "Price": { "DisplayAmount": "$39.99", "Amount": 39.99, "Currency": "USD" },
                        "SavingBasis": { "DisplayAmount": "$49.99" },
                        "Availability": { "Message": "In Stock" },
                        "Condition": { "Value": "New" },
                        "MerchantInfo": { "Name": "Amazon.com" },
                        "DeliveryInfo": { "IsPrimePantryEligible": false }
                    },
                    {
                        "Condition": { "Value": "Renewed" }
                    }
                ],
                "Summaries": [
                    {
                        "Condition": { "Value": "New" },
                        "LowestPrice": { "DisplayAmount": "$39.99" },
                        "HighestPrice": { "DisplayAmount": "$44.99" },
                        "OfferCount": 7
                    }
                ]
            },
            "BrowseNodeInfo": {
                "BrowseNodes": [
                    { "Id": "172659", "DisplayName": "Streaming Media Players", "SalesRank": 1 }
                ]
            },
            "CustomerReviews": {
                "Count": 412388,
                "StarRating": { "Value": 4.6 }
            }
        })
    }

    fn only_item(envelope: &NormalizedEnvelope) -> &NormalizedItem {
        assert_eq!(envelope.item_count, 1);
        match &envelope.items[0] {
            NormalizedRecord::Item(item) => item,
            NormalizedRecord::Node(_) => panic!("expected an item record"),
        }
    }

    #[test]
    fn test_get_items_projects_pascal_case_item() {
        let response = json!({ "ItemsResult": { "Items": [item_fixture()] } });
        let envelope = normalize_response(Operation::GetItems, response);

        assert!(envelope.processing_error.is_none());
        assert!(envelope.meta.is_none());
        let item = only_item(&envelope);
        assert_eq!(item.asin.as_deref(), Some("B07XJ8C8F5"));
        assert_eq!(
            item.detail_page_url.as_deref(),
            Some("https://www.amazon.com/dp/B07XJ8C8F5?tag=mytag-20")
        );
        assert_eq!(item.title.as_deref(), Some("Fire TV Stick 4K"));
        assert_eq!(item.parent_asin.as_deref(), Some("B07XJ8C8F4"));

        let image = item.primary_image.as_ref().unwrap();
        assert_eq!(
            image.small.as_deref(),
            Some("https://m.media-amazon.com/images/I/s.jpg")
        );
        assert!(image.hi_res.is_none());

        let offers = item.offers.as_ref().unwrap();
        assert_eq!(offers[0].price.as_deref(), Some("$39.99"));
        assert_eq!(offers[0].currency.as_deref(), Some("USD"));
        assert_eq!(offers[0].savings.as_deref(), Some("$49.99"));
        assert_eq!(offers[0].is_prime, Some(false));
        assert!(offers[0].is_buy_box_winner.is_none());
        assert!(offers[0].saving_basis.is_none());

        let info = item.technical_info.as_ref().unwrap();
        assert_eq!(info.brand.as_deref(), Some("Amazon"));
        assert_eq!(info.model.as_deref(), Some("E9L29Y"));
        assert!(item.by_line_info.is_none());

        let categories = item.categories.as_ref().unwrap();
        assert_eq!(categories[0].id.as_deref(), Some("172659"));
        assert_eq!(categories[0].sales_rank, Some(1));

        let reviews = item.customer_reviews.as_ref().unwrap();
        assert_eq!(reviews.count, Some(412_388));
        assert_eq!(reviews.star_rating, Some(4.6));
    }

    #[test]
    fn test_derived_and_provider_summaries_coexist() {
        let response = json!({ "ItemsResult": { "Items": [item_fixture()] } });
        let envelope = normalize_response(Operation::GetItems, response);
        let item = only_item(&envelope);

        let summary = item.price_summary.as_ref().unwrap();
        assert_eq!(summary.offer_count, 2);
        assert!((summary.lowest_price - 39.99).abs() < f64::EPSILON);

        let provider = item.offer_summaries.as_ref().unwrap();
        assert_eq!(provider[0].condition.as_deref(), Some("New"));
        assert_eq!(provider[0].lowest_price.as_deref(), Some("$39.99"));
        assert_eq!(provider[0].offer_count, Some(7));
    }

    #[test]
    fn test_search_items_never_carries_meta() {
        let response = json!({
            "SearchResult": { "Items": [{ "ASIN": "B01" }], "TotalResultCount": 99 }
        });
        let envelope = normalize_response(Operation::SearchItems, response);
        assert_eq!(envelope.item_count, 1);
        assert!(envelope.meta.is_none());
    }

    #[test]
    fn test_string_body_parses_into_envelope() {
        let text = json!({ "ItemsResult": { "Items": [{ "ASIN": "B02" }] } }).to_string();
        let envelope = normalize_response(Operation::GetItems, Value::String(text));

        assert_eq!(envelope.item_count, 1);
        assert!(envelope.processing_error.is_none());
        // The parsed value, not the original text, becomes the raw response.
        assert!(envelope.raw_response.is_object());
    }

    #[test]
    fn test_unparsable_string_body_degrades() {
        let envelope =
            normalize_response(Operation::GetItems, Value::String("<html>503</html>".to_string()));
        assert_eq!(envelope.item_count, 0);
        assert_eq!(
            envelope.processing_error.as_deref(),
            Some("Failed to process API response: response body is not valid JSON")
        );
        assert_eq!(envelope.raw_response, json!("<html>503</html>"));
    }

    #[test]
    fn test_unset_or_blockless_response_is_empty() {
        let envelope = normalize_response(Operation::GetItems, Value::Null);
        assert_eq!(envelope.item_count, 0);
        assert!(envelope.processing_error.is_none());

        let envelope = normalize_response(Operation::GetItems, json!({ "SearchResult": {} }));
        assert_eq!(envelope.item_count, 0);
        assert!(envelope.processing_error.is_none());
    }

    #[test]
    fn test_malformed_entry_degrades_with_index() {
        let response = json!({ "SearchResult": { "Items": [null] } });
        let envelope = normalize_response(Operation::SearchItems, response);
        assert_eq!(
            envelope.processing_error.as_deref(),
            Some("Failed to process API response: entry 0 is not an object")
        );
    }

    #[test]
    fn test_browse_nodes_project_pascal_case() {
        let response = json!({
            "BrowseNodesResult": {
                "BrowseNodes": [{
                    "Id": "283155",
                    "DisplayName": "Books",
                    "ContextFreeName": "Books",
                    "IsRoot": false,
                    "SalesRank": 12,
                    "Ancestor": { "Id": "1000" },
                    "Children": [{ "Id": "1", "DisplayName": "Arts" }]
                }]
            }
        });
        let envelope = normalize_response(Operation::GetBrowseNodes, response);
        let NormalizedRecord::Node(node) = &envelope.items[0] else {
            panic!("expected a node record");
        };
        assert_eq!(node.id.as_deref(), Some("283155"));
        assert_eq!(node.context_free_name.as_deref(), Some("Books"));
        assert_eq!(node.is_root, Some(false));
        assert_eq!(node.sales_rank, Some(12));
        assert_eq!(node.ancestor.as_ref().unwrap()["Id"], "1000");
    }
}
