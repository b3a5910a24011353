use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use service::address::Address;

use crate::errors::ApiError;
use crate::routes::AppState;

/// List every stored address. Order is unspecified.
pub async fn list_addresses(State(state): State<AppState>) -> Result<Json<Vec<Address>>, ApiError> {
    let list = state.addresses.list_all().await?;
    Ok(Json(list))
}

/// Create or replace an address. A payload without an id gets one assigned;
/// a payload carrying a stored id fully replaces that record. Malformed JSON
/// is rejected by the `Json` extractor before this handler runs.
pub async fn save_address(
    State(state): State<AppState>,
    Json(address): Json<Address>,
) -> Result<Json<Address>, ApiError> {
    let saved = state.addresses.save(address).await?;
    Ok(Json(saved))
}

/// Delete by id. Unknown ids still return 204 so retried deletes stay quiet.
pub async fn delete_address(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.addresses.delete_by_id(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
