pub mod d400_store_summary;
pub mod d401_stock_history;
pub mod d402_sales_comparison;
pub mod d403_top_selling;
pub mod d404_category_income;
