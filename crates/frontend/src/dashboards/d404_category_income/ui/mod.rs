mod dashboard;

pub use dashboard::CategoryIncomeDashboard;
