use leptos::prelude::*;
use leptos::server;
use leptos::server_fn::codec::Json;

use booking_types::{BookingError, Client, NewClient};

#[cfg(feature = "ssr")]
use crate::db::client_repository;
#[cfg(feature = "ssr")]
use crate::server::{extract_agency_id, storage_error};

#[server]
pub async fn get_agency_clients(token: String) -> Result<Vec<Client>, ServerFnError> {
    let agency_id =
        extract_agency_id(&token).map_err(|e| ServerFnError::new(e.to_string()))?;

    client_repository::list_clients(agency_id)
        .await
        .map_err(|e| ServerFnError::new(format!("Failed to load clients: {}", e)))
}

#[server(input = Json)]
pub async fn create_agency_client(
    token: String,
    client: NewClient,
) -> Result<Client, ServerFnError<BookingError>> {
    let agency_id = extract_agency_id(&token).map_err(ServerFnError::WrappedServerError)?;
    client.validate().map_err(ServerFnError::WrappedServerError)?;

    let created = client_repository::insert_client(agency_id, &client)
        .await
        .map_err(|e| ServerFnError::WrappedServerError(storage_error(e)))?;

    tracing::info!(agency_id, client_id = created.id, "client created");
    Ok(created)
}

#[server(input = Json)]
pub async fn update_agency_client(
    token: String,
    client_id: i64,
    client: NewClient,
) -> Result<Client, ServerFnError<BookingError>> {
    let agency_id = extract_agency_id(&token).map_err(ServerFnError::WrappedServerError)?;
    client.validate().map_err(ServerFnError::WrappedServerError)?;

    let updated = client_repository::update_client(agency_id, client_id, &client)
        .await
        .map_err(|e| ServerFnError::WrappedServerError(storage_error(e)))?
        .ok_or(ServerFnError::WrappedServerError(BookingError::NotFound))?;

    tracing::info!(agency_id, client_id, "client updated");
    Ok(updated)
}

/// Folds `source_id` into `target_id` and returns the surviving client.
#[server]
pub async fn merge_agency_clients(
    token: String,
    source_id: i64,
    target_id: i64,
) -> Result<Client, ServerFnError<BookingError>> {
    let agency_id = extract_agency_id(&token).map_err(ServerFnError::WrappedServerError)?;
    if source_id == target_id {
        return Err(ServerFnError::WrappedServerError(BookingError::validation(
            "cannot merge a client into itself",
        )));
    }

    let merged = client_repository::merge_clients(agency_id, source_id, target_id)
        .await
        .map_err(|e| ServerFnError::WrappedServerError(storage_error(e)))?
        .ok_or(ServerFnError::WrappedServerError(BookingError::NotFound))?;

    tracing::info!(agency_id, source_id, target_id, "clients merged");
    Ok(merged)
}
