//! Catalog listing endpoint for the funnel UI.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use catalog::PricingCatalog;
use serde::Serialize;
use session_store::SessionStore;

use super::sessions::AppState;

#[derive(Serialize)]
pub struct CatalogResponse {
    pub packages: Vec<PackageResponse>,
    pub addons: Vec<AddonResponse>,
}

#[derive(Serialize)]
pub struct PackageResponse {
    pub key: String,
    pub name: String,
    pub prices: Vec<TierPriceResponse>,
}

#[derive(Serialize)]
pub struct TierPriceResponse {
    pub tier: String,
    pub price: i64,
}

#[derive(Serialize)]
pub struct AddonResponse {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub price_type: catalog::AddonPriceType,
}

/// GET /catalog — the full package and addon price table.
#[tracing::instrument(skip(state))]
pub async fn get<S: SessionStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Json<CatalogResponse> {
    let catalog = state.funnel.catalog();

    let packages = catalog
        .packages()
        .into_iter()
        .map(|p| PackageResponse {
            key: p.key.to_string(),
            name: p.name,
            prices: p
                .prices
                .into_iter()
                .map(|tp| TierPriceResponse {
                    tier: tp.tier.to_string(),
                    price: tp.price.dollars(),
                })
                .collect(),
        })
        .collect();

    let addons = catalog
        .addons()
        .into_iter()
        .map(|a| AddonResponse {
            id: a.id.to_string(),
            name: a.name,
            price: a.price.dollars(),
            price_type: a.price_type,
        })
        .collect();

    Json(CatalogResponse { packages, addons })
}
