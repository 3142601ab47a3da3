use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::identity::AccountId;

/// Per-provider valuation of an inventory.
///
/// `total_value` is kept at full precision (minor units / 100); two-decimal
/// rounding happens only at presentation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSummary {
    pub provider: String,
    pub total_value: Decimal,
    pub items_priced: usize,
    pub items_missing: usize,
}

/// Result of aggregating a raw item list. Providers appear in the order
/// they first reported a present price; a provider that never priced any
/// item is omitted entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventorySummary {
    Empty,
    Priced {
        providers: Vec<ProviderSummary>,
        total_items: usize,
    },
}

/// The complete answer for one resolved account: whose inventory, how stale
/// the underlying payload is, and what it is worth per provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryReport {
    pub account_id: AccountId,
    pub age_seconds: u64,
    pub summary: InventorySummary,
}
