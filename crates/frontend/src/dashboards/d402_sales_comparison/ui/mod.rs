mod dashboard;
mod print_preview;

pub use dashboard::SalesComparisonDashboard;
