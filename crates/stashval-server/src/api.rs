use std::sync::Arc;

use actix_web::{get, web, HttpResponse};
use serde::Deserialize;
use tracing::warn;

use stashval_engine::FetchOrchestrator;
use stashval_models::{AccountId, QueryResponse};

/// Shared state behind the query endpoint.
pub struct AppState {
    pub orchestrator: Arc<FetchOrchestrator>,
}

#[derive(Debug, Deserialize)]
pub struct GetDataParams {
    steam_id: String,
}

/// The identity query endpoint.
///
/// Every outcome is HTTP 200: either `{"data": ..., "updated": N}` or
/// `{"error": "..."}`, so callers treat the body uniformly.
#[get("/get_data")]
pub async fn get_data(
    state: web::Data<AppState>,
    params: web::Query<GetDataParams>,
) -> HttpResponse {
    let account_id = match AccountId::parse(&params.steam_id) {
        Ok(id) => id,
        Err(e) => return HttpResponse::Ok().json(QueryResponse::error(e.to_string())),
    };

    match state.orchestrator.fetch_inventory(&account_id).await {
        Ok((payload, age_seconds)) => {
            HttpResponse::Ok().json(QueryResponse::data(payload, age_seconds))
        }
        Err(e) => {
            warn!(account_id = %account_id, error = %e, "Inventory fetch failed");
            HttpResponse::Ok().json(QueryResponse::error(e.to_string()))
        }
    }
}
