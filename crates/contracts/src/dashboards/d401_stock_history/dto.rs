use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashSet;

use crate::shared::format::parse_datetime;
use crate::shared::serde_ext::{lenient_i64, opt_string_or_number};

pub const PER_PAGE_OPTIONS: [usize; 4] = [10, 25, 50, 100];
pub const DEFAULT_PER_PAGE: usize = 25;
pub const HISTORY_PAGE_LIMIT: u32 = 100;
pub const NO_TITLE: &str = "Sin título";
pub const NO_SKU: &str = "Sin SKU";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Detail {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub value_id: Option<String>,
    #[serde(default)]
    pub value_name: Option<String>,
}

/// One product line of the stock report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockRow {
    pub id: String,
    pub title: String,
    pub available_quantity: i64,
    pub stock_reload_date: String,
    pub purchase_sale_date: String,
    pub sku: String,
    pub details: Vec<Detail>,
}

fn text_field(item: &Value, key: &str) -> Option<String> {
    match item.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Rows as received from `/mercadolibre/stock/{client_id}`, deduplicated by id.
/// Missing dates take `now`.
pub fn normalize_stock_rows(items: &[Value], now: &str) -> Vec<StockRow> {
    let mut seen = HashSet::new();
    let mut rows = Vec::new();
    for item in items {
        let id = text_field(item, "id").unwrap_or_default();
        if !seen.insert(id.clone()) {
            continue;
        }
        let details = item
            .get("details")
            .cloned()
            .and_then(|d| serde_json::from_value::<Vec<Detail>>(d).ok())
            .unwrap_or_default();
        rows.push(StockRow {
            id,
            title: text_field(item, "title").unwrap_or_else(|| NO_TITLE.to_string()),
            available_quantity: item
                .get("available_quantity")
                .and_then(|q| q.as_i64().or_else(|| q.as_str().and_then(|s| s.parse().ok())))
                .unwrap_or(0),
            stock_reload_date: text_field(item, "stock_reload_date")
                .unwrap_or_else(|| now.to_string()),
            purchase_sale_date: text_field(item, "purchase_sale_date")
                .unwrap_or_else(|| now.to_string()),
            sku: text_field(item, "sku").unwrap_or_else(|| NO_SKU.to_string()),
            details,
        });
    }
    rows
}

// ============================================================================
// Filtering and sorting
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockFilter {
    pub search: String,
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
    pub quantity_min: Option<i64>,
    pub quantity_max: Option<i64>,
}

impl StockFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn matches(&self, row: &StockRow) -> bool {
        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty()
            && !row.title.to_lowercase().contains(&needle)
            && !row.sku.to_lowercase().contains(&needle)
            && !row.id.to_lowercase().contains(&needle)
        {
            return false;
        }

        if self.date_start.is_some() || self.date_end.is_some() {
            let Some(date) = parse_datetime(&row.purchase_sale_date).map(|d| d.date()) else {
                return false;
            };
            if self.date_start.is_some_and(|start| date < start)
                || self.date_end.is_some_and(|end| date > end)
            {
                return false;
            }
        }

        let qty = row.available_quantity;
        if let Some(min) = self.quantity_min.filter(|m| *m != 0) {
            if qty < min {
                return false;
            }
        }
        if let Some(max) = self.quantity_max.filter(|m| *m != 0) {
            if qty > max {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, rows: &[StockRow]) -> Vec<StockRow> {
        rows.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockSortKey {
    Id,
    Sku,
    Title,
    AvailableQuantity,
    PurchaseSaleDate,
}

impl StockSortKey {
    fn compare(self, a: &StockRow, b: &StockRow) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Sku => a.sku.to_lowercase().cmp(&b.sku.to_lowercase()),
            Self::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            Self::AvailableQuantity => a.available_quantity.cmp(&b.available_quantity),
            Self::PurchaseSaleDate => parse_datetime(&a.purchase_sale_date)
                .cmp(&parse_datetime(&b.purchase_sale_date)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    pub key: StockSortKey,
    pub ascending: bool,
}

impl SortConfig {
    /// Clicking the current ascending column flips it; anything else starts ascending.
    pub fn toggle(current: Option<SortConfig>, key: StockSortKey) -> SortConfig {
        match current {
            Some(c) if c.key == key && c.ascending => SortConfig {
                key,
                ascending: false,
            },
            _ => SortConfig {
                key,
                ascending: true,
            },
        }
    }

    pub fn sort(&self, rows: &mut [StockRow]) {
        rows.sort_by(|a, b| {
            let ord = self.key.compare(a, b);
            if self.ascending {
                ord
            } else {
                ord.reverse()
            }
        });
    }

    /// Header suffix for `key`.
    pub fn indicator(current: Option<SortConfig>, key: StockSortKey) -> &'static str {
        match current {
            Some(c) if c.key == key && c.ascending => " ▲",
            Some(c) if c.key == key => " ▼",
            _ => " ⇅",
        }
    }
}

/// Filter, then sort when a sort is active.
pub fn filter_and_sort(
    rows: &[StockRow],
    filter: &StockFilter,
    sort: Option<SortConfig>,
) -> Vec<StockRow> {
    let mut out = filter.apply(rows);
    if let Some(sort) = sort {
        sort.sort(&mut out);
    }
    out
}

pub fn total_pages(len: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    len.div_ceil(per_page)
}

/// 1-based page slice; out-of-range pages are empty.
pub fn paginate<T: Clone>(rows: &[T], page: usize, per_page: usize) -> Vec<T> {
    if page == 0 || per_page == 0 {
        return Vec::new();
    }
    rows.iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .cloned()
        .collect()
}

// ============================================================================
// Sales history
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSale {
    #[serde(default)]
    pub sale_date: Option<String>,
    #[serde(default)]
    pub quantity: Option<Value>,
}

/// Body of `GET /mercadolibre/stock-sales-history/{client_id}/{product_id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesHistoryPage {
    #[serde(default)]
    pub sales: Vec<RawSale>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub sales_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesHistoryEntry {
    pub date: String,
    pub quantity: i64,
}

/// Accumulates the pages of a product's sales history.
#[derive(Debug, Clone)]
pub struct SalesHistoryCollector {
    page: u32,
    sales: Vec<RawSale>,
    done: bool,
}

impl Default for SalesHistoryCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl SalesHistoryCollector {
    pub fn new() -> Self {
        Self {
            page: 1,
            sales: Vec::new(),
            done: false,
        }
    }

    /// Page to request next, `None` once complete.
    pub fn next_page(&self) -> Option<(u32, u32)> {
        (!self.done).then_some((self.page, HISTORY_PAGE_LIMIT))
    }

    /// Returns whether more pages remain.
    pub fn push(&mut self, page: SalesHistoryPage) -> bool {
        let received = page.sales.len();
        self.sales.extend(page.sales);
        let total = page.sales_count.max(0) as usize;
        if self.sales.len() >= total || received < HISTORY_PAGE_LIMIT as usize {
            self.done = true;
        } else {
            self.page += 1;
        }
        !self.done
    }

    pub fn finish(self) -> Vec<SalesHistoryEntry> {
        self.sales
            .into_iter()
            .filter_map(|sale| {
                let date = sale.sale_date.filter(|d| !d.is_empty())?;
                let quantity = match sale.quantity? {
                    Value::Number(n) => n.as_i64()?,
                    Value::String(s) => s.trim().parse().ok()?,
                    _ => return None,
                };
                Some(SalesHistoryEntry { date, quantity })
            })
            .collect()
    }
}

pub fn history_cache_key(client_id: &str, product_id: &str) -> String {
    format!("{}-{}", client_id, product_id)
}

pub fn history_query(page: u32, limit: u32) -> Vec<(&'static str, String)> {
    vec![("page", page.to_string()), ("limit", limit.to_string())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NOW: &str = "2024-06-01T12:00:00Z";

    fn row(id: &str, title: &str, sku: &str, qty: i64, date: &str) -> StockRow {
        StockRow {
            id: id.into(),
            title: title.into(),
            available_quantity: qty,
            stock_reload_date: date.into(),
            purchase_sale_date: date.into(),
            sku: sku.into(),
            details: vec![],
        }
    }

    fn sample() -> Vec<StockRow> {
        vec![
            row("MLC1", "Mochila Azul", "MOCH-1", 5, "2024-05-01T10:00:00Z"),
            row("MLC2", "Polera Roja", "POL-2", 0, "2024-05-15T10:00:00Z"),
            row("MLC3", "Zapatilla", "ZAP-3", 20, "2024-05-31T23:00:00Z"),
        ]
    }

    #[test]
    fn normalizes_and_dedupes() {
        let items = vec![
            json!({"id": "MLC1", "title": "Mochila", "available_quantity": 4, "sku": "M-1",
                   "details": [{"id": "COLOR", "name": "Color", "value_name": "Azul"}]}),
            json!({"id": "MLC1", "title": "Duplicada"}),
            json!({"id": "MLC2"}),
        ];
        let rows = normalize_stock_rows(&items, NOW);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, "Mochila");
        assert_eq!(rows[0].details[0].value_name.as_deref(), Some("Azul"));
        assert_eq!(rows[1].title, NO_TITLE);
        assert_eq!(rows[1].sku, NO_SKU);
        assert_eq!(rows[1].available_quantity, 0);
        assert_eq!(rows[1].purchase_sale_date, NOW);
    }

    #[test]
    fn search_matches_title_sku_or_id() {
        let rows = sample();
        let by = |s: &str| {
            StockFilter {
                search: s.into(),
                ..Default::default()
            }
            .apply(&rows)
            .len()
        };
        assert_eq!(by("polera"), 1);
        assert_eq!(by("zap-"), 1);
        assert_eq!(by("mlc"), 3);
        assert_eq!(by("nada"), 0);
    }

    #[test]
    fn date_range_is_inclusive() {
        let filter = StockFilter {
            date_start: NaiveDate::from_ymd_opt(2024, 5, 15),
            date_end: NaiveDate::from_ymd_opt(2024, 5, 31),
            ..Default::default()
        };
        let ids: Vec<_> = filter.apply(&sample()).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["MLC2", "MLC3"]);
    }

    #[test]
    fn zero_quantity_bounds_are_ignored() {
        let rows = sample();
        let filter = StockFilter {
            quantity_min: Some(0),
            quantity_max: Some(10),
            ..Default::default()
        };
        assert_eq!(filter.apply(&rows).len(), 2);
        let filter = StockFilter {
            quantity_min: Some(5),
            ..Default::default()
        };
        assert_eq!(filter.apply(&rows).len(), 2);
    }

    #[test]
    fn sort_toggles_and_applies() {
        let first = SortConfig::toggle(None, StockSortKey::AvailableQuantity);
        assert!(first.ascending);
        let second = SortConfig::toggle(Some(first), StockSortKey::AvailableQuantity);
        assert!(!second.ascending);
        let third = SortConfig::toggle(Some(second), StockSortKey::AvailableQuantity);
        assert!(third.ascending);
        assert!(SortConfig::toggle(Some(second), StockSortKey::Title).ascending);

        let sorted = filter_and_sort(&sample(), &StockFilter::default(), Some(second));
        let qty: Vec<_> = sorted.iter().map(|r| r.available_quantity).collect();
        assert_eq!(qty, vec![20, 5, 0]);
        assert_eq!(SortConfig::indicator(Some(second), StockSortKey::AvailableQuantity), " ▼");
        assert_eq!(SortConfig::indicator(Some(second), StockSortKey::Id), " ⇅");
    }

    #[test]
    fn pagination() {
        let items: Vec<u32> = (1..=27).collect();
        assert_eq!(total_pages(items.len(), 25), 2);
        assert_eq!(total_pages(0, 25), 0);
        assert_eq!(paginate(&items, 2, 25), vec![26, 27]);
        assert!(paginate(&items, 3, 25).is_empty());
        assert!(paginate(&items, 0, 25).is_empty());
    }

    fn page(n: usize, count: i64) -> SalesHistoryPage {
        SalesHistoryPage {
            sales: (0..n)
                .map(|i| RawSale {
                    sale_date: Some(format!("2024-05-{:02}", i % 28 + 1)),
                    quantity: Some(json!(1)),
                })
                .collect(),
            sales_count: count,
        }
    }

    #[test]
    fn collector_stops_at_sales_count() {
        let mut c = SalesHistoryCollector::new();
        assert_eq!(c.next_page(), Some((1, 100)));
        assert!(c.push(page(100, 150)));
        assert_eq!(c.next_page(), Some((2, 100)));
        assert!(!c.push(page(50, 150)));
        assert_eq!(c.next_page(), None);
        assert_eq!(c.finish().len(), 150);
    }

    #[test]
    fn collector_stops_on_short_page() {
        let mut c = SalesHistoryCollector::new();
        assert!(!c.push(page(3, 0)));
        assert_eq!(c.next_page(), None);
    }

    #[test]
    fn finish_drops_invalid_entries() {
        let mut c = SalesHistoryCollector::new();
        c.push(SalesHistoryPage {
            sales: vec![
                RawSale {
                    sale_date: Some("2024-05-01".into()),
                    quantity: Some(json!("2")),
                },
                RawSale {
                    sale_date: None,
                    quantity: Some(json!(1)),
                },
                RawSale {
                    sale_date: Some("2024-05-02".into()),
                    quantity: None,
                },
            ],
            sales_count: 3,
        });
        let entries = c.finish();
        assert_eq!(
            entries,
            vec![SalesHistoryEntry {
                date: "2024-05-01".into(),
                quantity: 2
            }]
        );
        assert_eq!(history_cache_key("77", "MLC1"), "77-MLC1");
    }
}
