pub mod aggregate;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod resolver;
pub mod upstream;

pub mod test_support;

pub use aggregate::aggregate;
pub use error::EngineError;
pub use http::{HttpPricingApi, HttpProfileSource};
pub use orchestrator::FetchOrchestrator;
pub use resolver::{classify, resolve_trade_offer, IdentityResolver, ProfileSource};
pub use upstream::{InventorySource, PricingApi, UpstreamInventoryClient};
