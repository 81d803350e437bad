mod dashboard;

pub use dashboard::StoreSummaryDashboard;
