use stashval_models::{InventoryReport, InventorySummary};

/// Render a report as the chat reply text.
///
/// One header line naming the account and the payload age, then one line
/// per provider. The missing-price count is appended only when some items
/// lack a price; totals are shown rounded to two decimals.
pub fn format_report(report: &InventoryReport) -> String {
    let mut msg = if report.age_seconds == 0 {
        format!("{}, updated just now", report.account_id)
    } else {
        format!("{}, updated {} seconds ago", report.account_id, report.age_seconds)
    };

    match &report.summary {
        InventorySummary::Empty => {
            msg.push_str("\nInventory is empty");
        }
        InventorySummary::Priced { providers, .. } => {
            for summary in providers {
                msg.push_str(&format!(
                    "\n{}: ${:.2}",
                    capitalize(&summary.provider),
                    summary.total_value
                ));
                if summary.items_missing > 0 {
                    msg.push_str(&format!(" (Missing prices: {})", summary.items_missing));
                }
            }
        }
    }

    msg
}

/// Python-style capitalize: first character upper, the rest lower.
fn capitalize(provider: &str) -> String {
    let mut chars = provider.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
