use crate::shared::api_utils::{get_data, get_json, post_json};
use contracts::domain::a002_warehouse::{CreateWarehouseRequest, Warehouse, WarehouseStock};
use contracts::shared::api::{ApiEnvelope, ApiError};

pub async fn fetch_warehouses() -> Result<Vec<Warehouse>, ApiError> {
    get_json("/warehouses", &[]).await
}

pub async fn fetch_warehouse(id: &str) -> Result<Warehouse, ApiError> {
    get_data(&format!("/warehouses/{}", id), &[]).await
}

/// Stock lines of a warehouse. An empty answer (204 or `data: null`) is an empty list.
pub async fn fetch_warehouse_stock(id: &str) -> Result<Vec<WarehouseStock>, ApiError> {
    match get_json::<ApiEnvelope<Vec<WarehouseStock>>>(&format!("/warehouse/{}/stock", id), &[])
        .await
    {
        Ok(envelope) => Ok(envelope.data.unwrap_or_default()),
        Err(ApiError::NoContent) => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

pub async fn create_warehouse(
    request: &CreateWarehouseRequest,
) -> Result<serde_json::Value, ApiError> {
    post_json("/warehouses", request).await
}
