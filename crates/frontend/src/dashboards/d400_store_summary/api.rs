use crate::shared::api_utils::get_data;
use contracts::dashboards::d400_store_summary::StoreSummary;
use contracts::shared::api::ApiError;

pub async fn fetch_summary(client_id: &str) -> Result<StoreSummary, ApiError> {
    get_data(&format!("/mercadolibre/summary/{}", client_id), &[]).await
}
