//! Browse-node types.
//!
//! `getBrowseNodes` responses are mapped through their own projector, not
//! the item projector: a browse node is a taxonomy entry, not a product.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A normalized catalog taxonomy node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrowseNode {
    /// Browse node identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Context-free name (unambiguous across the hierarchy).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_free_name: Option<String>,
    /// Whether this node is a hierarchy root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_root: Option<bool>,
    /// Sales rank of this node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_rank: Option<u64>,
    /// Ancestor subtree, passed through as returned by the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ancestor: Option<Value>,
    /// Children subtree, passed through as returned by the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Value>,
}
