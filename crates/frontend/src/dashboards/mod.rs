pub mod d400_store_summary;
pub mod d401_stock_history;
pub mod d402_sales_comparison;
pub mod d403_top_selling;
pub mod d404_category_income;

pub use d400_store_summary::ui::StoreSummaryDashboard;
pub use d401_stock_history::ui::StockHistoryDashboard;
pub use d402_sales_comparison::ui::SalesComparisonDashboard;
pub use d403_top_selling::ui::TopSellingDashboard;
pub use d404_category_income::ui::CategoryIncomeDashboard;
