use crate::shared::api_utils::get_data;
use contracts::dashboards::d402_sales_comparison::{
    ComparisonMode, ComparisonRequest, ComparisonResult, MonthComparison, YearComparison,
};
use contracts::shared::api::ApiError;

pub async fn fetch_comparison(
    client_id: &str,
    request: &ComparisonRequest,
) -> Result<ComparisonResult, ApiError> {
    let path = request.mode.endpoint(client_id);
    let query = request.query();
    match request.mode {
        ComparisonMode::Month => get_data::<MonthComparison>(&path, &query).await.map(Into::into),
        ComparisonMode::Year => get_data::<YearComparison>(&path, &query).await.map(Into::into),
    }
}
