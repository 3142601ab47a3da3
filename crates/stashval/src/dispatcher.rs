use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use stashval_engine::{aggregate, classify, IdentityResolver};
use stashval_models::{
    InputIdentifier, InventoryPayload, InventoryReport, QueryResponse,
};

use crate::format::format_report;
use crate::query::InventoryQuery;

pub const GREETING: &str =
    "Hello! Send a Steam ID, profile URL, or trade-offer URL to value an inventory.";
pub const ACK_TRADE_OFFER: &str = "Got a trade-offer URL, working on it.";
pub const ACK_RAW_ID: &str = "Got a Steam ID, working on it.";
pub const ACK_PROFILE: &str = "Got a profile URL, working on it.";
pub const REJECTION: &str =
    "Unrecognized input.\nSend a Steam ID, profile URL, or trade-offer URL.";

/// Classifies chat input, runs the pipeline, and renders text replies.
///
/// Failures never escape: every error becomes reply text, relayed
/// verbatim after the acknowledgement for the recognized shape.
pub struct RequestDispatcher {
    resolver: IdentityResolver,
    query: Arc<dyn InventoryQuery>,
}

impl RequestDispatcher {
    pub fn new(resolver: IdentityResolver, query: Arc<dyn InventoryQuery>) -> Self {
        Self { resolver, query }
    }

    /// Handle one chat message; returns the replies to send, in order.
    pub async fn dispatch(&self, message: &str) -> Vec<String> {
        let message = message.trim();
        if message == "/start" {
            return vec![GREETING.to_string()];
        }

        let identifier = classify(message);
        let ack = match &identifier {
            InputIdentifier::TradeOffer { .. } => ACK_TRADE_OFFER,
            InputIdentifier::RawId64 { .. } => ACK_RAW_ID,
            InputIdentifier::Profile { .. } => ACK_PROFILE,
            InputIdentifier::Invalid => return vec![REJECTION.to_string()],
        };

        let request_id = Uuid::new_v4();
        info!(%request_id, "Dispatching inventory request");

        match self.run_pipeline(&identifier).await {
            Ok(report) => {
                info!(
                    %request_id,
                    account_id = %report.account_id,
                    age_seconds = report.age_seconds,
                    "Request complete"
                );
                vec![ack.to_string(), format_report(&report)]
            }
            Err(message) => {
                warn!(%request_id, error = %message, "Request failed");
                vec![ack.to_string(), message]
            }
        }
    }

    /// The linear request lifecycle: resolve, query, aggregate. Any step's
    /// failure terminates the pipeline with its message.
    async fn run_pipeline(&self, identifier: &InputIdentifier) -> Result<InventoryReport, String> {
        let account_id = self
            .resolver
            .resolve(identifier)
            .await
            .map_err(|e| e.to_string())?;

        let response = self
            .query
            .get_inventory(&account_id)
            .await
            .map_err(|e| e.to_string())?;

        let (data, updated) = match response {
            QueryResponse::Data { data, updated } => (data, updated),
            // The service's message is relayed verbatim.
            QueryResponse::Error { error } => return Err(error),
        };

        let payload: InventoryPayload = serde_json::from_value(data)
            .map_err(|e| format!("unexpected upstream response: {e}"))?;

        Ok(InventoryReport {
            account_id,
            age_seconds: updated,
            summary: aggregate(&payload.items),
        })
    }
}
