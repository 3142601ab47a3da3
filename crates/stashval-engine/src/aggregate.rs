use std::collections::HashMap;

use rust_decimal::Decimal;

use stashval_models::{InventorySummary, ProviderSummary, RawInventoryItem};

/// Collapse a raw item list into per-provider totals.
///
/// A price is present when it is a non-zero integer; `null` and `0` both
/// mean the provider did not price the item. Providers appear in the order
/// they first produced a present price; a provider that never priced any
/// item is omitted entirely. Totals are minor units divided by 100, kept
/// at full precision.
pub fn aggregate(items: &[RawInventoryItem]) -> InventorySummary {
    if items.is_empty() {
        return InventorySummary::Empty;
    }

    let total_items = items.len();
    let mut order: Vec<String> = Vec::new();
    let mut collected: HashMap<String, Vec<i64>> = HashMap::new();

    for item in items {
        for (provider, value) in &item.prices {
            let Some(price) = present_price(value) else {
                continue;
            };
            if !collected.contains_key(provider) {
                order.push(provider.clone());
            }
            collected.entry(provider.clone()).or_default().push(price);
        }
    }

    let providers = order
        .into_iter()
        .map(|provider| {
            let prices = collected.remove(&provider).unwrap_or_default();
            let sum: i64 = prices.iter().sum();
            ProviderSummary {
                total_value: Decimal::from(sum) / Decimal::from(100),
                items_priced: prices.len(),
                items_missing: total_items - prices.len(),
                provider,
            }
        })
        .collect();

    InventorySummary::Priced {
        providers,
        total_items,
    }
}

fn present_price(value: &serde_json::Value) -> Option<i64> {
    value.as_i64().filter(|price| *price != 0)
}
