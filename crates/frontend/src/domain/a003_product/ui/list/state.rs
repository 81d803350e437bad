use contracts::domain::a003_product::{ItemUpdate, PageWindow, Product, ProductQuery};
use contracts::shared::api::Pagination;
use leptos::prelude::*;
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct ProductListState {
    pub items: Vec<Product>,
    pub pagination: Pagination,
    pub query: ProductQuery,
    pub category_names: HashMap<String, String>,
    /// Product whose stock is being edited inline.
    pub editing_stock: Option<String>,
    /// Product shown in the detail modal.
    pub detail: Option<Product>,
    /// Incremented per request; stale responses are dropped.
    pub request_seq: u64,
}

impl ProductListState {
    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.pagination.total, self.query.limit, self.query.offset)
    }

    pub fn category_name(&self, category_id: &str) -> String {
        self.category_names
            .get(category_id)
            .cloned()
            .unwrap_or_else(|| category_id.to_string())
    }

    /// Applies a successful item update to the loaded page.
    pub fn apply_update(&mut self, item_id: &str, update: &ItemUpdate) {
        if let Some(product) = self.items.iter_mut().find(|p| p.id == item_id) {
            match update {
                ItemUpdate::Stock(quantity) => product.available_quantity = i64::from(*quantity),
                ItemUpdate::Status(status) => product.status = status.clone(),
            }
        }
    }
}

pub fn create_state() -> RwSignal<ProductListState> {
    RwSignal::new(ProductListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a003_product::ProductStatus;

    fn state_with_product() -> ProductListState {
        let product: Product = serde_json::from_str(
            r#"{"id": "MLC1", "title": "Polera", "category_id": "MLC123",
                "price": 9990, "available_quantity": 3, "status": "active"}"#,
        )
        .unwrap();
        ProductListState {
            items: vec![product],
            ..Default::default()
        }
    }

    #[test]
    fn updates_are_applied_locally() {
        let mut state = state_with_product();
        state.apply_update("MLC1", &ItemUpdate::Stock(10));
        state.apply_update("MLC1", &ItemUpdate::Status(ProductStatus::Paused));
        assert_eq!(state.items[0].available_quantity, 10);
        assert_eq!(state.items[0].status, ProductStatus::Paused);
    }

    #[test]
    fn unresolved_category_shows_its_id() {
        let mut state = state_with_product();
        assert_eq!(state.category_name("MLC123"), "MLC123");
        state
            .category_names
            .insert("MLC123".to_string(), "Poleras".to_string());
        assert_eq!(state.category_name("MLC123"), "Poleras");
    }

    #[test]
    fn window_follows_query_offset() {
        let mut state = ProductListState::default();
        state.pagination.total = 100;
        state.query.offset = 70;
        let window = state.window();
        assert_eq!(window.current, 2);
        assert!(window.has_next());
    }
}
