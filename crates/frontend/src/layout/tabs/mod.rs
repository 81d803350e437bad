//! Tab management.
//!
//! - `keys` - tab keys used by the sidebar and by cross-page navigation
//! - `page` - `TabPage`, the wrapper around a tab's content
//! - `registry` - tab key → view
//! - `tab_labels` - tab key → title

pub mod keys;
pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::{detail_tab_label, tab_label_for_key};
