use serde::{Deserialize, Serialize};

use crate::shared::serde_ext::{lenient_f64, lenient_i64};

pub const TABLE_PAGE_SIZE: usize = 10;
pub const CHART_SIZE_OPTIONS: [usize; 5] = [10, 25, 50, 100, 1000];
pub const TOP_SELLING_FAILED: &str = "No se pudieron obtener los productos";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopProduct {
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub quantity: i64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_amount: f64,
}

/// Body of `GET /mercadolibre/top-selling-products/{client_id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopSellingResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub data: Vec<TopProduct>,
}

impl TopSellingResponse {
    pub fn into_products(self) -> Result<Vec<TopProduct>, String> {
        if self.status == "success" {
            Ok(self.data)
        } else {
            Err(TOP_SELLING_FAILED.to_string())
        }
    }
}

/// Highest and lowest product by total amount.
pub fn most_and_least_sold(products: &[TopProduct]) -> Option<(&TopProduct, &TopProduct)> {
    let cmp = |a: &&TopProduct, b: &&TopProduct| a.total_amount.total_cmp(&b.total_amount);
    let most = products.iter().max_by(cmp)?;
    let least = products.iter().min_by(cmp)?;
    Some((most, least))
}

/// 1-based page of the product table.
pub fn page_slice(products: &[TopProduct], page: usize) -> &[TopProduct] {
    let start = page.saturating_sub(1) * TABLE_PAGE_SIZE;
    if start >= products.len() {
        return &[];
    }
    let end = (start + TABLE_PAGE_SIZE).min(products.len());
    &products[start..end]
}

pub fn has_next_page(products: &[TopProduct], page: usize) -> bool {
    page * TABLE_PAGE_SIZE < products.len()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub label: String,
    pub value: f64,
    /// Width relative to the tallest bar, 0..=100.
    pub percent: f64,
}

pub fn chart_bars(products: &[TopProduct], n: usize) -> Vec<ChartBar> {
    let shown = &products[..n.min(products.len())];
    let max = shown.iter().map(|p| p.total_amount).fold(0.0_f64, f64::max);
    shown
        .iter()
        .map(|p| ChartBar {
            label: p.title.clone(),
            value: p.total_amount,
            percent: if max > 0.0 {
                (p.total_amount.max(0.0) / max * 100.0).min(100.0)
            } else {
                0.0
            },
        })
        .collect()
}

/// Splits the `<input type="month">` value `YYYY-MM`.
pub fn parse_month_input(value: &str) -> Option<(i32, u32)> {
    let (year, month) = value.trim().split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    (1..=12).contains(&month).then_some((year, month))
}

pub fn month_query(year: i32, month: u32) -> Vec<(&'static str, String)> {
    vec![("year", year.to_string()), ("month", format!("{:02}", month))]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(title: &str, total: f64) -> TopProduct {
        TopProduct {
            title: title.into(),
            quantity: 1,
            total_amount: total,
        }
    }

    #[test]
    fn status_must_be_success() {
        let ok: TopSellingResponse =
            serde_json::from_str(r#"{"status":"success","data":[{"title":"A","quantity":"3","total_amount":10}]}"#)
                .unwrap();
        assert_eq!(ok.into_products().unwrap()[0].quantity, 3);
        let bad: TopSellingResponse = serde_json::from_str(r#"{"status":"error"}"#).unwrap();
        assert_eq!(bad.into_products().unwrap_err(), TOP_SELLING_FAILED);
    }

    #[test]
    fn most_and_least() {
        assert!(most_and_least_sold(&[]).is_none());
        let list = vec![p("A", 500.0), p("B", 1500.0), p("C", 20.0)];
        let (most, least) = most_and_least_sold(&list).unwrap();
        assert_eq!(most.title, "B");
        assert_eq!(least.title, "C");
    }

    #[test]
    fn paging() {
        let list: Vec<_> = (0..23).map(|i| p(&i.to_string(), i as f64)).collect();
        assert_eq!(page_slice(&list, 1).len(), 10);
        assert_eq!(page_slice(&list, 3).len(), 3);
        assert!(page_slice(&list, 4).is_empty());
        assert!(has_next_page(&list, 2));
        assert!(!has_next_page(&list, 3));
    }

    #[test]
    fn bars_scale_to_max() {
        let list = vec![p("A", 50.0), p("B", 200.0), p("C", 100.0)];
        let bars = chart_bars(&list, 2);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].percent, 25.0);
        assert_eq!(bars[1].percent, 100.0);
        assert_eq!(chart_bars(&list, 1000).len(), 3);
        assert!(chart_bars(&[p("Z", 0.0)], 10)[0].percent == 0.0);
    }

    #[test]
    fn month_input() {
        assert_eq!(parse_month_input("2024-10"), Some((2024, 10)));
        assert_eq!(parse_month_input("2024-13"), None);
        assert_eq!(parse_month_input(""), None);
        assert_eq!(month_query(2024, 3)[1], ("month", "03".to_string()));
    }
}
