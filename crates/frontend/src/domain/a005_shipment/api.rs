use crate::shared::api_utils::get_data;
use contracts::domain::a005_shipment::Shipment;
use contracts::shared::api::ApiError;

pub async fn fetch_upcoming_shipments(client_id: &str) -> Result<Vec<Shipment>, ApiError> {
    get_data(&format!("/mercadolibre/upcoming-shipments/{}", client_id), &[]).await
}
