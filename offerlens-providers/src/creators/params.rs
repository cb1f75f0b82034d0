//! Request body assembly for Creators API catalog operations.
//!
//! Bodies use camelCase keys. Optional fields that were not supplied are
//! left out entirely rather than sent as empty strings or empty lists.

use serde_json::{json, Map, Value};

use offerlens_core::{normalize_list_values, Operation, OperationInput};

use super::credentials::CreatorsCredentials;

/// Resources requested when the caller supplies none.
pub const DEFAULT_RESOURCES: [&str; 1] = ["itemInfo.title"];

/// Search index used when the caller supplies none.
pub const DEFAULT_SEARCH_INDEX: &str = "All";

/// Result page size used when the caller supplies none.
pub const DEFAULT_ITEM_COUNT: u32 = 10;

/// Catalog path for an operation.
pub fn endpoint_path(operation: Operation) -> &'static str {
    match operation {
        Operation::GetItems => "/catalog/v1/getItems",
        Operation::SearchItems => "/catalog/v1/searchItems",
        Operation::GetBrowseNodes => "/catalog/v1/getBrowseNodes",
    }
}

/// Assembles the request body for a validated input.
pub fn build_request_body(credentials: &CreatorsCredentials, input: &OperationInput) -> Value {
    let mut body = Map::new();
    body.insert("partnerTag".to_string(), json!(credentials.partner_tag));

    if let Some(condition) = trimmed(&input.options.condition) {
        body.insert("condition".to_string(), json!(condition));
    }
    if let Some(currency) = trimmed(&input.options.currency_of_preference) {
        body.insert("currencyOfPreference".to_string(), json!(currency));
    }
    if let Some(languages) = &input.options.languages_of_preference {
        let languages = languages.normalize();
        if !languages.is_empty() {
            body.insert("languagesOfPreference".to_string(), json!(languages));
        }
    }

    match input.operation() {
        Operation::GetItems => {
            body.insert("itemIds".to_string(), json!(input.normalized_item_ids()));
            body.insert("resources".to_string(), json!(resources_or_default(input)));
        }
        Operation::SearchItems => {
            body.insert(
                "keywords".to_string(),
                json!(input.trimmed_keywords().unwrap_or_default()),
            );
            let search_index = trimmed(&input.search_index)
                .unwrap_or_else(|| DEFAULT_SEARCH_INDEX.to_string());
            body.insert("searchIndex".to_string(), json!(search_index));
            body.insert(
                "itemCount".to_string(),
                json!(input.item_count.unwrap_or(DEFAULT_ITEM_COUNT)),
            );
            if let Some(page) = input.options.item_page.filter(|page| *page > 0) {
                body.insert("itemPage".to_string(), json!(page));
            }
            body.insert("resources".to_string(), json!(resources_or_default(input)));
        }
        Operation::GetBrowseNodes => {
            body.insert(
                "browseNodeIds".to_string(),
                json!(input.normalized_browse_node_ids()),
            );
            if let Some(resources) = &input.resources {
                let resources = normalize_list_values(resources);
                if !resources.is_empty() {
                    body.insert("resources".to_string(), json!(resources));
                }
            }
        }
    }

    Value::Object(body)
}

fn resources_or_default(input: &OperationInput) -> Vec<String> {
    let resources = input
        .resources
        .as_deref()
        .map(normalize_list_values)
        .unwrap_or_default();
    if resources.is_empty() {
        DEFAULT_RESOURCES.iter().map(ToString::to_string).collect()
    } else {
        resources
    }
}

fn trimmed(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}

// ============================================================================
// Tests
// ============================================================================
