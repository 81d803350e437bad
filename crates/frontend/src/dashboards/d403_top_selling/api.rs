use crate::shared::api_utils::get_json;
use contracts::dashboards::d403_top_selling::{
    month_query, TopProduct, TopSellingResponse, TOP_SELLING_FAILED,
};

/// Products ranked by amount for one month. Errors are already user-facing text.
pub async fn fetch_top_selling(
    client_id: &str,
    year: i32,
    month: u32,
) -> Result<Vec<TopProduct>, String> {
    let path = format!("/mercadolibre/top-selling-products/{}", client_id);
    let response: TopSellingResponse = get_json(&path, &month_query(year, month))
        .await
        .map_err(|e| {
            log::error!("top selling for {}: {}", client_id, e);
            e.user_message(TOP_SELLING_FAILED)
        })?;
    response.into_products()
}
