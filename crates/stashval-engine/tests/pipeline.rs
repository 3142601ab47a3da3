//! Integration tests for the full resolution → fetch → aggregation
//! pipeline, using the in-memory TTL store and pricing-API doubles so no
//! network or Redis instance is required.

use std::sync::Arc;

use rust_decimal_macros::dec;
use stashval_cache::InMemoryTtlStore;
use stashval_engine::test_support::{MockPricingApi, StaticProfileSource};
use stashval_engine::{
    aggregate, classify, EngineError, FetchOrchestrator, IdentityResolver, UpstreamInventoryClient,
};
use stashval_models::{InputIdentifier, InventoryPayload, InventorySummary};

fn sample_payload() -> serde_json::Value {
    serde_json::json!({
        "items": [
            {"prices": {"buff": 100, "skinport": null}},
            {"prices": {"buff": 200, "skinport": null}},
            {"prices": {"buff": null, "skinport": 300}},
        ]
    })
}

fn orchestrator_with(api: Arc<MockPricingApi>, ttl_seconds: u64) -> FetchOrchestrator {
    let store = Arc::new(InMemoryTtlStore::new());
    let source = Arc::new(UpstreamInventoryClient::new(api));
    FetchOrchestrator::new(store, source, ttl_seconds)
}

#[tokio::test]
async fn trade_offer_to_summary() {
    let input = "https://steamcommunity.com/tradeoffer/new/?partner=226042536&token=AbCd1234";
    let identifier = classify(input);
    let resolver = IdentityResolver::new(Arc::new(StaticProfileSource::new("")));
    let account_id = resolver.resolve(&identifier).await.unwrap();
    assert_eq!(account_id.as_str(), "76561198186308264");

    let api = Arc::new(MockPricingApi::ok(account_id.as_str(), sample_payload()));
    let orchestrator = orchestrator_with(api.clone(), 1200);

    let (payload, age) = orchestrator.fetch_inventory(&account_id).await.unwrap();
    assert_eq!(age, 0);
    assert_eq!(api.stage1_calls(), 1);
    assert_eq!(api.stage2_calls(), 1);

    let parsed: InventoryPayload = serde_json::from_value(payload).unwrap();
    let InventorySummary::Priced {
        providers,
        total_items,
    } = aggregate(&parsed.items)
    else {
        panic!("expected a priced summary");
    };

    assert_eq!(total_items, 3);
    assert_eq!(providers[0].provider, "buff");
    assert_eq!(providers[0].total_value, dec!(3.00));
    assert_eq!(providers[0].items_missing, 1);
    assert_eq!(providers[1].provider, "skinport");
    assert_eq!(providers[1].items_priced, 1);
}

#[tokio::test]
async fn second_request_is_served_from_cache() {
    let account_id = {
        let resolver = IdentityResolver::new(Arc::new(StaticProfileSource::new("")));
        resolver.resolve(&classify("76561198186308264")).await.unwrap()
    };

    let api = Arc::new(MockPricingApi::ok(account_id.as_str(), sample_payload()));
    let orchestrator = orchestrator_with(api.clone(), 1200);

    orchestrator.fetch_inventory(&account_id).await.unwrap();
    let (_, age) = orchestrator.fetch_inventory(&account_id).await.unwrap();

    // One upstream round trip total; the repeat is a cache hit with an age
    // bounded by the elapsed wall clock.
    assert_eq!(api.stage1_calls(), 1);
    assert_eq!(api.stage2_calls(), 1);
    assert!(age <= 1, "age = {age}");
}

#[tokio::test]
async fn profile_resolution_feeds_the_pipeline() {
    let document = r#"{"url":"...","steamid":"76561197960265728","persona":"x"}"#;
    let resolver = IdentityResolver::new(Arc::new(StaticProfileSource::new(document)));

    let identifier = classify("https://steamcommunity.com/id/foo/inventory/extra");
    assert_eq!(
        identifier,
        InputIdentifier::Profile {
            canonical_url: "https://steamcommunity.com/id/foo".to_string(),
        }
    );

    let account_id = resolver.resolve(&identifier).await.unwrap();
    assert_eq!(account_id.as_str(), "76561197960265728");
}

#[tokio::test]
async fn stage1_failure_surfaces_and_caches_nothing() {
    let account_id = {
        let resolver = IdentityResolver::new(Arc::new(StaticProfileSource::new("")));
        resolver.resolve(&classify("76561198186308264")).await.unwrap()
    };

    let api = Arc::new(MockPricingApi::stage1_failing());
    let orchestrator = orchestrator_with(api.clone(), 1200);

    let result = orchestrator.fetch_inventory(&account_id).await;
    assert!(matches!(result, Err(EngineError::Network(_))));
    assert_eq!(api.stage2_calls(), 0);

    // The failure was not cached: a retry fetches again.
    let _ = orchestrator.fetch_inventory(&account_id).await;
    assert_eq!(api.stage1_calls(), 2);
}

#[tokio::test]
async fn empty_inventory_aggregates_to_empty() {
    let account_id = {
        let resolver = IdentityResolver::new(Arc::new(StaticProfileSource::new("")));
        resolver.resolve(&classify("76561198186308264")).await.unwrap()
    };

    let api = Arc::new(MockPricingApi::ok(
        account_id.as_str(),
        serde_json::json!({"items": []}),
    ));
    let orchestrator = orchestrator_with(api, 1200);

    let (payload, _) = orchestrator.fetch_inventory(&account_id).await.unwrap();
    let parsed: InventoryPayload = serde_json::from_value(payload).unwrap();
    assert_eq!(aggregate(&parsed.items), InventorySummary::Empty);
}
