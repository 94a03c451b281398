use leptos::prelude::*;
use leptos::server;

use booking_types::{Campaign, Contract, Creator, License};

#[cfg(feature = "ssr")]
use crate::db::brand_repository;

#[cfg(feature = "ssr")]
fn extract_brand_id(token: &str) -> Result<i64, ServerFnError> {
    crate::server::decode_account_id(token, &crate::config::config().jwt_secret, "brand")
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[server]
pub async fn list_brand_campaigns(token: String) -> Result<Vec<Campaign>, ServerFnError> {
    let brand_id = extract_brand_id(&token)?;
    brand_repository::list_campaigns(brand_id)
        .await
        .map_err(|e| ServerFnError::new(format!("Failed to load campaigns: {}", e)))
}

#[server]
pub async fn list_brand_contracts(token: String) -> Result<Vec<Contract>, ServerFnError> {
    let brand_id = extract_brand_id(&token)?;
    brand_repository::list_contracts(brand_id)
        .await
        .map_err(|e| ServerFnError::new(format!("Failed to load contracts: {}", e)))
}

#[server]
pub async fn list_brand_licenses(token: String) -> Result<Vec<License>, ServerFnError> {
    let brand_id = extract_brand_id(&token)?;
    brand_repository::list_licenses(brand_id)
        .await
        .map_err(|e| ServerFnError::new(format!("Failed to load licenses: {}", e)))
}

#[server]
pub async fn list_marketplace_creators(token: String) -> Result<Vec<Creator>, ServerFnError> {
    extract_brand_id(&token)?;
    brand_repository::list_creators()
        .await
        .map_err(|e| ServerFnError::new(format!("Failed to load creators: {}", e)))
}
