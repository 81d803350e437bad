pub mod error_banner;
pub mod no_connection;
pub mod pagination_controls;

pub use error_banner::{ErrorBanner, InfoBanner};
pub use no_connection::NoConnectionNotice;
pub use pagination_controls::PaginationControls;
