pub mod config;
pub mod identity;
pub mod inventory;
pub mod report;
pub mod wire;

pub use config::{load_or_init, ConfigError, FrontendConfig, ServerConfig, UpstreamConfig};
pub use identity::{AccountId, InputIdentifier, InvalidAccountId};
pub use inventory::{InventoryPayload, RawInventoryItem};
pub use report::{InventoryReport, InventorySummary, ProviderSummary};
pub use wire::QueryResponse;
