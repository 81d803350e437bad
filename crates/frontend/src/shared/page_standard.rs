//! Page categories for tab pages.
//!
//! Every page rendered inside a tab carries an `id` of the form
//! `{entity}--{category}` (e.g. `"a002_warehouse--list"`) and a
//! `data-page-category` with one of the constants below.

/// Table or card list with filters.
pub const PAGE_CAT_LIST: &str = "list";

/// Single record view or form.
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Report page.
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// Multi-step action page (product wizard, point of sale).
pub const PAGE_CAT_USECASE: &str = "usecase";

/// Session, health and navigation pages.
pub const PAGE_CAT_SYSTEM: &str = "system";

/// `{entity}--{category}` with both parts present.
pub fn is_valid_page_id(id: &str) -> bool {
    matches!(id.split_once("--"), Some((entity, category)) if !entity.is_empty() && !category.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_ids() {
        assert!(is_valid_page_id("a002_warehouse--list"));
        assert!(!is_valid_page_id("a002_warehouse"));
        assert!(!is_valid_page_id("--list"));
    }
}
