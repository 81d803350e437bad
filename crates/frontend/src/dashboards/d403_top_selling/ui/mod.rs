mod dashboard;

pub use dashboard::TopSellingDashboard;
