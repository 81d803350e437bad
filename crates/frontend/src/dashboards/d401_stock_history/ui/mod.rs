mod dashboard;
mod detail_modal;

pub use dashboard::StockHistoryDashboard;
