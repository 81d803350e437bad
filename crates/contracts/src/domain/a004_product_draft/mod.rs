//! Client-side orchestration of a new marketplace listing.
//!
//! - `dto` - responses of the category/attribute/size-guide endpoints
//! - `payload` - body sent to `crear-producto`
//! - `draft` - wizard state and payload assembly

pub mod draft;
pub mod dto;
pub mod payload;

pub use draft::*;
pub use dto::*;
pub use payload::*;
