pub mod api;
pub mod format;
pub mod serde_ext;
