use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::shared::api::Pagination;
use crate::shared::serde_ext::{lenient_f64, lenient_i64, opt_string_or_number, string_or_number};

pub const DEFAULT_PAGE_LIMIT: u64 = 35;
const MAX_PAGE_BUTTONS: u64 = 5;

// ============================================================================
// Status
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProductStatus {
    #[default]
    Active,
    Paused,
    Closed,
    UnderReview,
    Inactive,
    PaymentRequired,
    NotYetActive,
    Deleted,
    Other(String),
}

impl ProductStatus {
    pub fn parse(value: &str) -> Self {
        match value {
            "active" => Self::Active,
            "paused" => Self::Paused,
            "closed" => Self::Closed,
            "under_review" => Self::UnderReview,
            "inactive" => Self::Inactive,
            "payment_required" => Self::PaymentRequired,
            "not_yet_active" => Self::NotYetActive,
            "deleted" => Self::Deleted,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Closed => "closed",
            Self::UnderReview => "under_review",
            Self::Inactive => "inactive",
            Self::PaymentRequired => "payment_required",
            Self::NotYetActive => "not_yet_active",
            Self::Deleted => "deleted",
            Self::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Active => "Activo",
            Self::Paused => "Pausado",
            Self::Closed => "Cerrado",
            Self::UnderReview => "En revisión",
            Self::Inactive => "Inactivo",
            Self::PaymentRequired => "Pago requerido",
            Self::NotYetActive => "Aún no activo",
            Self::Deleted => "Eliminado",
            Self::Other(raw) => raw,
        }
    }
}

impl Serialize for ProductStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProductStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

// ============================================================================
// Product
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub site_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub seller_id: Option<String>,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub user_product_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: f64,
    #[serde(default)]
    pub base_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub available_quantity: i64,
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(default)]
    pub status: ProductStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPage {
    #[serde(default)]
    pub data: Vec<Product>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// Body of `GET /categories/{id}` on the marketplace API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryName {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    pub category_id: String,
    pub products: Vec<Product>,
}

/// Groups products by category, keeping first-seen order of categories and items.
pub fn categorize_products(products: &[Product]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    for product in products {
        match groups
            .iter_mut()
            .find(|g| g.category_id == product.category_id)
        {
            Some(group) => group.products.push(product.clone()),
            None => groups.push(CategoryGroup {
                category_id: product.category_id.clone(),
                products: vec![product.clone()],
            }),
        }
    }
    groups
}

pub fn distinct_category_ids(products: &[Product]) -> Vec<String> {
    categorize_products(products)
        .into_iter()
        .map(|g| g.category_id)
        .filter(|id| !id.is_empty())
        .collect()
}

// ============================================================================
// Query and paging
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
    pub query: String,
    pub limit: u64,
    pub offset: u64,
    pub category: String,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
            category: String::new(),
        }
    }
}

impl ProductQuery {
    pub fn is_search(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// Path below the sync API: the search endpoint when a query is present.
    pub fn path(&self, client_id: &str) -> String {
        if self.is_search() {
            format!("/mercadolibre/products/search/{}", client_id)
        } else {
            format!("/mercadolibre/products/{}", client_id)
        }
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if self.is_search() {
            params.push(("q", self.query.trim().to_string()));
        }
        params.push(("limit", self.limit.to_string()));
        params.push(("offset", self.offset.to_string()));
        if !self.category.is_empty() {
            params.push(("category", self.category.clone()));
        }
        params
    }
}

/// Numbered page buttons around the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
    pub total_pages: u64,
    pub current: u64,
    pub start: u64,
    pub end: u64,
}

impl PageWindow {
    pub fn new(total: u64, limit: u64, offset: u64) -> Self {
        let limit = limit.max(1);
        let total_pages = total.div_ceil(limit);
        let current = offset / limit;
        let start = current.saturating_sub(2);
        let end = total_pages.min(start + MAX_PAGE_BUTTONS);
        Self {
            total,
            limit,
            offset,
            total_pages,
            current,
            start,
            end,
        }
    }

    pub fn pages(&self) -> std::ops::Range<u64> {
        self.start..self.end
    }

    pub fn has_previous(&self) -> bool {
        self.offset > 0
    }

    pub fn has_next(&self) -> bool {
        self.offset + self.limit < self.total
    }

    pub fn offset_for(&self, page: u64) -> u64 {
        page * self.limit
    }

    pub fn previous_offset(&self) -> u64 {
        self.offset.saturating_sub(self.limit)
    }

    pub fn next_offset(&self) -> u64 {
        self.offset + self.limit
    }
}

// ============================================================================
// Item updates
// ============================================================================

/// Body of `PUT /items/{id}` on the marketplace API.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemUpdate {
    Stock(u32),
    Status(ProductStatus),
}

impl ItemUpdate {
    pub fn to_body(&self) -> serde_json::Value {
        match self {
            Self::Stock(quantity) => serde_json::json!({ "available_quantity": quantity }),
            Self::Status(status) => serde_json::json!({ "status": status.as_str() }),
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            Self::Stock(_) => "Stock actualizado correctamente",
            Self::Status(ProductStatus::Paused) => "Publicación pausada exitosamente.",
            Self::Status(_) => "Publicación reanudada exitosamente.",
        }
    }

    /// Pausing when active, reactivating otherwise.
    pub fn toggle_status(current: &ProductStatus) -> Self {
        match current {
            ProductStatus::Active => Self::Status(ProductStatus::Paused),
            _ => Self::Status(ProductStatus::Active),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, category: &str) -> Product {
        Product {
            id: id.into(),
            category_id: category.into(),
            title: format!("Producto {id}"),
            ..Default::default()
        }
    }

    #[test]
    fn status_labels() {
        assert_eq!(ProductStatus::parse("under_review").label(), "En revisión");
        assert_eq!(ProductStatus::parse("payment_required").label(), "Pago requerido");
        assert_eq!(ProductStatus::parse("weird").label(), "weird");
    }

    #[test]
    fn product_deserializes_status() {
        let p: Product = serde_json::from_str(
            r#"{"id":"MLC1","title":"Zapatilla","category_id":"MLC1234","price":"19990",
                "available_quantity":4,"status":"paused"}"#,
        )
        .unwrap();
        assert_eq!(p.status, ProductStatus::Paused);
        assert_eq!(p.price, 19990.0);
    }

    #[test]
    fn groups_keep_first_seen_order() {
        let groups = categorize_products(&[
            product("1", "B"),
            product("2", "A"),
            product("3", "B"),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category_id, "B");
        assert_eq!(groups[0].products.len(), 2);
        assert_eq!(groups[1].products[0].id, "2");
        assert_eq!(distinct_category_ids(&[product("1", ""), product("2", "A")]), vec!["A"]);
    }

    #[test]
    fn page_window_bounds() {
        let first = PageWindow::new(350, 35, 0);
        assert_eq!(first.total_pages, 10);
        assert_eq!(first.pages(), 0..5);
        assert!(!first.has_previous());
        assert!(first.has_next());

        let middle = PageWindow::new(350, 35, 35 * 6);
        assert_eq!(middle.current, 6);
        assert_eq!(middle.pages(), 4..9);

        let last = PageWindow::new(350, 35, 35 * 9);
        assert_eq!(last.pages(), 7..10);
        assert!(!last.has_next());
        assert_eq!(last.offset_for(7), 245);
    }

    #[test]
    fn page_window_empty() {
        let w = PageWindow::new(0, 35, 0);
        assert_eq!(w.total_pages, 0);
        assert_eq!(w.pages(), 0..0);
        assert!(!w.has_next());
    }

    #[test]
    fn query_selects_endpoint() {
        let mut q = ProductQuery::default();
        assert_eq!(q.path("77"), "/mercadolibre/products/77");
        assert_eq!(q.params(), vec![("limit", "35".into()), ("offset", "0".into())]);
        q.query = " zapatilla ".into();
        assert_eq!(q.path("77"), "/mercadolibre/products/search/77");
        assert_eq!(q.params()[0], ("q", "zapatilla".to_string()));
    }

    #[test]
    fn item_update_bodies_and_messages() {
        assert_eq!(ItemUpdate::Stock(5).to_body(), serde_json::json!({"available_quantity": 5}));
        let pause = ItemUpdate::toggle_status(&ProductStatus::Active);
        assert_eq!(pause.to_body(), serde_json::json!({"status": "paused"}));
        assert_eq!(pause.success_message(), "Publicación pausada exitosamente.");
        let resume = ItemUpdate::toggle_status(&ProductStatus::Paused);
        assert_eq!(resume.success_message(), "Publicación reanudada exitosamente.");
    }
}
