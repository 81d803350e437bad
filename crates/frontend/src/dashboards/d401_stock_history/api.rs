use crate::shared::api_utils::get_json;
use contracts::dashboards::d401_stock_history::{
    history_query, SalesHistoryCollector, SalesHistoryEntry, SalesHistoryPage,
};
use contracts::shared::api::{ApiEnvelope, ApiError};
use serde_json::Value;

/// Raw stock rows; they are normalized by the caller.
pub async fn fetch_stock(client_id: &str) -> Result<Vec<Value>, ApiError> {
    let envelope: ApiEnvelope<Vec<Value>> =
        get_json(&format!("/mercadolibre/stock/{}", client_id), &[]).await?;
    Ok(envelope.data.unwrap_or_default())
}

/// Every page of a product's sales history.
pub async fn fetch_sales_history(
    client_id: &str,
    product_id: &str,
) -> Result<Vec<SalesHistoryEntry>, ApiError> {
    let path = format!("/mercadolibre/stock-sales-history/{}/{}", client_id, product_id);
    let mut collector = SalesHistoryCollector::new();
    while let Some((page, limit)) = collector.next_page() {
        let body: SalesHistoryPage = get_json(&path, &history_query(page, limit)).await?;
        if !collector.push(body) {
            break;
        }
    }
    Ok(collector.finish())
}
