use crate::shared::api_utils::get_data;
use contracts::dashboards::d403_top_selling::month_query;
use contracts::dashboards::d404_category_income::Sale;
use contracts::shared::api::ApiError;

pub async fn fetch_sales_by_month(
    client_id: &str,
    year: i32,
    month: u32,
) -> Result<Vec<Sale>, ApiError> {
    let path = format!("/mercadolibre/sales-by-month/{}", client_id);
    get_data(&path, &month_query(year, month)).await
}
