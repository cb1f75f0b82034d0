//! Response projection for the Creators API schema.
//!
//! The upstream schema is camelCase with deeply nested display-value
//! wrappers. Projection never fails the record: a malformed result list
//! degrades the envelope to zero items with `processing_error` set, while
//! malformed nested blocks simply leave the corresponding field absent.

use serde_json::Value;

use offerlens_core::{
    build_price_summary, BrowseNode, ByLineInfo, Category, CustomerReviews, ImageSet,
    ManufactureInfo, NormalizedEnvelope, NormalizedItem, NormalizedRecord, OfferLine, Operation,
    ProductInfo, SearchMeta,
};

use crate::json::{json_type, present, string_at, strings_at};

/// Projects a Creators API response body into the normalized envelope.
///
/// `searchItems` envelopes always carry `meta`, even when the result block
/// is missing; other operations never do. An unset response body yields an
/// empty envelope without meta.
pub(crate) fn normalize_response(operation: Operation, response: Value) -> NormalizedEnvelope {
    if !present(&response) {
        return NormalizedEnvelope::empty(operation, response);
    }

    let meta = (operation == Operation::SearchItems).then(|| search_meta(&response));
    let projected = project_result_block(operation, &response);

    let envelope = match projected {
        Ok(records) => NormalizedEnvelope::new(operation, records, response),
        Err(detail) => NormalizedEnvelope::degraded(operation, response, detail),
    };
    match meta {
        Some(meta) => envelope.with_meta(meta),
        None => envelope,
    }
}

fn project_result_block(
    operation: Operation,
    response: &Value,
) -> Result<Vec<NormalizedRecord>, String> {
    let block = match operation {
        Operation::GetItems => response.pointer("/itemsResult/items"),
        Operation::SearchItems => response.pointer("/searchResult/items"),
        Operation::GetBrowseNodes => response.pointer("/browseNodesResult/browseNodes"),
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

fn search_meta(response: &Value) -> SearchMeta {
    SearchMeta {
        total_result_count: response
            .pointer("/searchResult/totalResultCount")
            .and_then(Value::as_u64),
        search_url: string_at(response, "/searchResult/searchURL"),
        search_refinements: response.pointer("/searchResult/searchRefinements").cloned(),
    }
}

fn project_item(item: &Value) -> NormalizedItem {
    let mut projected = NormalizedItem {
        asin: string_at(item, "/asin"),
        detail_page_url: string_at(item, "/detailPageURL"),
        ..NormalizedItem::default()
    };

    projected.title = string_at(item, "/itemInfo/title/displayValue");
    projected.features = strings_at(item, "/itemInfo/features/displayValues");

    if let Some(primary) = item.pointer("/images/primary").filter(|block| present(block)) {
        projected.primary_image = Some(image_set(primary));
    }
    if let Some(variants) = item.pointer("/images/variants").and_then(Value::as_array) {
        projected.additional_images = Some(variants.iter().map(image_set).collect());
    }

    if let Some(listings) = item.pointer("/offersV2/listings").and_then(Value::as_array) {
        projected.offers = Some(listings.iter().map(offer_line).collect());
        let amounts: Vec<Option<f64>> = listings
            .iter()
            .map(|listing| listing.pointer("/price/money/amount").and_then(Value::as_f64))
            .collect();
        projected.price_summary = build_price_summary(&amounts);
    }

    if let Some(info) = item
        .pointer("/itemInfo/productInfo")
        .filter(|block| present(block))
    {
        projected.product_info = Some(ProductInfo {
            color: string_at(info, "/color/displayValue"),
            size: string_at(info, "/size/displayValue"),
            unit_count: info.pointer("/unitCount/displayValue").cloned(),
        });
    }

    if let Some(info) = item
        .pointer("/itemInfo/byLineInfo")
        .filter(|block| present(block))
    {
        projected.by_line_info = Some(ByLineInfo {
            brand: string_at(info, "/brand/displayValue"),
            manufacturer: string_at(info, "/manufacturer/displayValue"),
        });
    }

    if let Some(info) = item
        .pointer("/itemInfo/manufactureInfo")
        .filter(|block| present(block))
    {
        projected.manufacture_info = Some(ManufactureInfo {
            model: string_at(info, "/model/displayValue"),
            item_part_number: string_at(info, "/itemPartNumber/displayValue"),
        });
    }

    if let Some(nodes) = item
        .pointer("/browseNodeInfo/browseNodes")
        .and_then(Value::as_array)
    {
        projected.categories = Some(
            nodes
                .iter()
                .map(|node| Category {
                    id: string_at(node, "/id"),
                    name: string_at(node, "/displayName"),
                    sales_rank: node.pointer("/salesRank").and_then(Value::as_u64),
                })
                .collect(),
        );
    }

    if let Some(reviews) = item
        .pointer("/customerReviews")
        .filter(|block| present(block))
    {
        projected.customer_reviews = Some(CustomerReviews {
            count: reviews.pointer("/count").and_then(Value::as_u64),
            star_rating: reviews.pointer("/starRating/value").and_then(Value::as_f64),
        });
    }

    projected.parent_asin = string_at(item, "/parentASIN").filter(|asin| !asin.is_empty());

    projected
}

fn project_browse_node(node: &Value) -> BrowseNode {
    BrowseNode {
        id: string_at(node, "/id"),
        display_name: string_at(node, "/displayName"),
        context_free_name: string_at(node, "/contextFreeName"),
        is_root: node.pointer("/isRoot").and_then(Value::as_bool),
        sales_rank: node.pointer("/salesRank").and_then(Value::as_u64),
        ancestor: node.pointer("/ancestor").cloned(),
        children: node.pointer("/children").cloned(),
    }
}

fn offer_line(listing: &Value) -> OfferLine {
    OfferLine {
        price: string_at(listing, "/price/money/displayAmount"),
        currency: string_at(listing, "/price/money/currency"),
        savings: string_at(listing, "/price/savings/money/displayAmount"),
        saving_basis: string_at(listing, "/price/savingBasis/money/displayAmount"),
        availability: string_at(listing, "/availability/message"),
        condition: string_at(listing, "/condition/value"),
        merchant: string_at(listing, "/merchantInfo/name"),
        is_buy_box_winner: listing.pointer("/isBuyBoxWinner").and_then(Value::as_bool),
        offer_type: string_at(listing, "/type"),
        violates_map: listing.pointer("/violatesMAP").and_then(Value::as_bool),
        is_prime: None,
    }
}

fn image_set(block: &Value) -> ImageSet {
    ImageSet {
        small: string_at(block, "/small/url"),
        medium: string_at(block, "/medium/url"),
        large: string_at(block, "/large/url"),
        hi_res: string_at(block, "/hiRes/url"),
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
            "asin": "B08N5WRWNW",
            "detailPageURL": "https://www.amazon.com/dp/B08N5WRWNW?tag=mytag-20",
            "itemInfo": {
                "title": { "displayValue": "Echo Dot (4th Gen)" },
                "features": { "displayValues": ["Smart speaker", "Voice control"] },
                "productInfo": {
                    "color": { "displayValue": "Charcoal" },
                    "unitCount": { "displayValue": 1 }
                },
                "byLineInfo": {
                    "brand": { "displayValue": "Amazon" },
                    "manufacturer": { "displayValue": "Amazon.com" }
                },
                "manufactureInfo": {
                    "model": { "displayValue": "C78MP8" },
                    "itemPartNumber": { "displayValue": "53-024544" }
                }
            },
            "images": {
                "primary": {
                    "small": { "url": "https://m.media-amazon.com/images/I/s.jpg" },
                    "medium": { "url": "https://m.media-amazon.com/images/I/m.jpg" },
                    "large": { "url": "https://m.media-amazon.com/images/I/l.jpg" }
                },
                "variants": [
                    { "medium": { "url": "https://m.media-amazon.com/images/I/v1.jpg" } }
                ]
            },
            "offersV2": {
                "listings": [
                    {
                        "price": {
                            "money": { "amount": 49.99, "displayAmount": "$49.99", "currency": "USD" },
                            "savings": { "money": { "displayAmount": "$10.00" } },
                            "savingBasis": { "money": { "displayAmount": "$59.99" } }
                        },
                        "availability": { "message": "In Stock" },
                        "condition": { "value": "New" },
                        "merchantInfo": { "name": "Amazon.com" },
                        "isBuyBoxWinner": true,
                        "type": "NEW",
                        "violatesMAP": false
                    },
                    {
                        "condition": { "value": "Used" }
                    }
                ]
            },
            "browseNodeInfo": {
                "browseNodes": [
                    { "id": "172541", "displayName": "Smart Speakers", "salesRank": 3 }
                ]
            },
            "customerReviews": {
                "count": 801277,
                "starRating": { "value": 4.7 }
            },
            "parentASIN": "B084J4KNDS"
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
    fn test_get_items_projects_full_item() {
        let response = json!({ "itemsResult": { "items": [item_fixture()] } });
        let envelope = normalize_response(Operation::GetItems, response);

        assert!(envelope.processing_error.is_none());
        assert!(envelope.meta.is_none());
        let item = only_item(&envelope);
        assert_eq!(item.asin.as_deref(), Some("B08N5WRWNW"));
        assert_eq!(item.title.as_deref(), Some("Echo Dot (4th Gen)"));
        assert_eq!(
            item.features.as_deref(),
            Some(&["Smart speaker".to_string(), "Voice control".to_string()][..])
        );
        assert_eq!(item.parent_asin.as_deref(), Some("B084J4KNDS"));

        let image = item.primary_image.as_ref().unwrap();
        assert_eq!(
            image.medium.as_deref(),
            Some("https://m.media-amazon.com/images/I/m.jpg")
        );
        assert!(image.hi_res.is_none());
        assert_eq!(item.additional_images.as_ref().unwrap().len(), 1);

        let offers = item.offers.as_ref().unwrap();
        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0].price.as_deref(), Some("$49.99"));
        assert_eq!(offers[0].currency.as_deref(), Some("USD"));
        assert_eq!(offers[0].savings.as_deref(), Some("$10.00"));
        assert_eq!(offers[0].saving_basis.as_deref(), Some("$59.99"));
        assert_eq!(offers[0].merchant.as_deref(), Some("Amazon.com"));
        assert_eq!(offers[0].is_buy_box_winner, Some(true));
        assert_eq!(offers[0].offer_type.as_deref(), Some("NEW"));
        assert_eq!(offers[0].violates_map, Some(false));
        assert_eq!(offers[1].condition.as_deref(), Some("Used"));
        assert!(offers[1].price.is_none());

        let info = item.product_info.as_ref().unwrap();
        assert_eq!(info.color.as_deref(), Some("Charcoal"));
        assert_eq!(info.unit_count, Some(json!(1)));
        assert_eq!(
            item.by_line_info.as_ref().unwrap().brand.as_deref(),
            Some("Amazon")
        );
        assert_eq!(
            item.manufacture_info.as_ref().unwrap().model.as_deref(),
            Some("C78MP8")
        );

        let categories = item.categories.as_ref().unwrap();
        assert_eq!(categories[0].id.as_deref(), Some("172541"));
        assert_eq!(categories[0].name.as_deref(), Some("Smart Speakers"));
        assert_eq!(categories[0].sales_rank, Some(3));

        let reviews = item.customer_reviews.as_ref().unwrap();
        assert_eq!(reviews.count, Some(801_277));
        assert_eq!(reviews.star_rating, Some(4.7));
    }

    #[test]
    fn test_price_summary_counts_unpriced_listings() {
        let envelope = normalize_response(
            Operation::GetItems,
            json!({ "itemsResult": { "items": [item_fixture()] } }),
        );
        let summary = only_item(&envelope).price_summary.as_ref().unwrap();
        assert_eq!(summary.offer_count, 2);
        assert!((summary.lowest_price - 49.99).abs() < f64::EPSILON);
        assert!((summary.highest_price - 49.99).abs() < f64::EPSILON);
    }

    #[test]
    fn test_price_summary_absent_when_nothing_is_priced() {
        let response = json!({
            "itemsResult": {
                "items": [{
                    "asin": "B000000000",
                    "offersV2": { "listings": [{ "condition": { "value": "New" } }] }
                }]
            }
        });
        let envelope = normalize_response(Operation::GetItems, response);
        let item = only_item(&envelope);
        assert_eq!(item.offers.as_ref().unwrap().len(), 1);
        assert!(item.price_summary.is_none());
    }

    #[test]
    fn test_empty_image_block_projects_empty_set() {
        let response = json!({
            "itemsResult": { "items": [{ "asin": "B0", "images": { "primary": {} } }] }
        });
        let envelope = normalize_response(Operation::GetItems, response);
        let image = only_item(&envelope).primary_image.as_ref().unwrap();
        assert!(image.is_empty());
    }

    #[test]
    fn test_search_items_always_carries_meta() {
        let response = json!({
            "searchResult": {
                "items": [{ "asin": "B01" }],
                "totalResultCount": 412,
                "searchURL": "https://www.amazon.com/s?k=usb+charger",
                "searchRefinements": { "categories": [] }
            }
        });
        let envelope = normalize_response(Operation::SearchItems, response);
        let meta = envelope.meta.as_ref().unwrap();
        assert_eq!(meta.total_result_count, Some(412));
        assert_eq!(
            meta.search_url.as_deref(),
            Some("https://www.amazon.com/s?k=usb+charger")
        );
        assert!(meta.search_refinements.is_some());

        // Meta stays attached even when the result block is missing.
        let envelope = normalize_response(Operation::SearchItems, json!({ "unrelated": true }));
        assert_eq!(envelope.item_count, 0);
        assert!(envelope.meta.as_ref().is_some_and(SearchMeta::is_empty));
    }

    #[test]
    fn test_unset_response_is_empty_without_meta() {
        for body in [json!(null), json!(""), json!(false)] {
            let envelope = normalize_response(Operation::SearchItems, body.clone());
            assert_eq!(envelope.item_count, 0);
            assert!(envelope.meta.is_none());
            assert!(envelope.processing_error.is_none());
            assert_eq!(envelope.raw_response, body);
        }
    }

    #[test]
    fn test_missing_result_block_is_empty_not_degraded() {
        let envelope = normalize_response(Operation::GetItems, json!({ "searchResult": {} }));
        assert_eq!(envelope.item_count, 0);
        assert!(envelope.processing_error.is_none());

        let envelope =
            normalize_response(Operation::GetItems, json!({ "itemsResult": { "items": null } }));
        assert_eq!(envelope.item_count, 0);
        assert!(envelope.processing_error.is_none());
    }

    #[test]
    fn test_malformed_result_list_degrades() {
        let response = json!({ "itemsResult": { "items": "definitely not a list" } });
        let envelope = normalize_response(Operation::GetItems, response.clone());
        assert_eq!(envelope.item_count, 0);
        assert_eq!(
            envelope.processing_error.as_deref(),
            Some("Failed to process API response: result list is a string")
        );
        assert_eq!(envelope.raw_response, response);
    }

    #[test]
    fn test_malformed_entry_degrades_with_index() {
        let response = json!({ "itemsResult": { "items": [{ "asin": "B01" }, 42] } });
        let envelope = normalize_response(Operation::GetItems, response);
        assert_eq!(envelope.item_count, 0);
        assert_eq!(
            envelope.processing_error.as_deref(),
            Some("Failed to process API response: entry 1 is not an object")
        );
    }

    #[test]
    fn test_browse_nodes_project_taxonomy_fields() {
        let response = json!({
            "browseNodesResult": {
                "browseNodes": [{
                    "id": "283155",
                    "displayName": "Books",
                    "contextFreeName": "Books",
                    "isRoot": true,
                    "ancestor": { "id": "1000", "displayName": "Subjects" },
                    "children": [{ "id": "1", "displayName": "Arts" }]
                }]
            }
        });
        let envelope = normalize_response(Operation::GetBrowseNodes, response);
        assert_eq!(envelope.item_count, 1);
        let NormalizedRecord::Node(node) = &envelope.items[0] else {
            panic!("expected a node record");
        };
        assert_eq!(node.id.as_deref(), Some("283155"));
        assert_eq!(node.display_name.as_deref(), Some("Books"));
        assert_eq!(node.is_root, Some(true));
        assert_eq!(node.ancestor.as_ref().unwrap()["id"], "1000");
        assert_eq!(node.children.as_ref().unwrap()[0]["displayName"], "Arts");
    }
}
