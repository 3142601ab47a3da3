use serde::{Deserialize, Serialize};

/// A single inventory item as reported by the pricing upstream.
///
/// `prices` maps provider name to price in minor units; `null` or `0`
/// both mean "this provider has no price for the item". Key order is
/// preserved so first-seen provider order is well defined. Any other
/// fields on the wire are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInventoryItem {
    #[serde(default)]
    pub prices: serde_json::Map<String, serde_json::Value>,
}

/// The priced-item listing returned by the stage-2 upstream call.
/// Stored in the cache verbatim as JSON and re-parsed on the way out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryPayload {
    pub items: Vec<RawInventoryItem>,
}
