use serde::{Deserialize, Serialize};

use crate::shared::serde_ext::{lenient_f64, lenient_i64};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryProduct {
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub quantity: i64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderStatuses {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub paid: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub pending: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub canceled: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethods {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub account_money: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub debit_card: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub credit_card: i64,
}

/// Body of `GET /mercadolibre/summary/{client_id}` (inside the envelope).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSummary {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_sales: f64,
    #[serde(default)]
    pub top_selling_products: Vec<SummaryProduct>,
    #[serde(default)]
    pub order_statuses: OrderStatuses,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub daily_sales: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub weekly_sales: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub monthly_sales: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub annual_sales: f64,
    #[serde(default)]
    pub top_payment_methods: PaymentMethods,
}

/// A report tab that can be opened for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLink {
    /// Tab key prefix; the client id is appended.
    pub key: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

impl ReportLink {
    pub fn tab_key(&self, client_id: &str) -> String {
        format!("{}{}", self.key, client_id)
    }
}

pub const REPORT_COMPARE_MONTH: &str = "d402_compare_month_";
pub const REPORT_COMPARE_YEAR: &str = "d402_compare_year_";
pub const REPORT_TOP_SELLING: &str = "d403_top_selling_";
pub const REPORT_CATEGORY_INCOME: &str = "d404_category_income_";
pub const REPORT_STOCK_HISTORY: &str = "d401_stock_history_";
pub const REPORT_DAILY_SHIPMENTS: &str = "a005_shipments_";

pub fn available_reports() -> &'static [ReportLink] {
    const REPORTS: &[ReportLink] = &[
        ReportLink {
            key: REPORT_COMPARE_MONTH,
            label: "Comparar ventas entre dos meses",
            icon: "calendar",
        },
        ReportLink {
            key: REPORT_COMPARE_YEAR,
            label: "Comparar ventas anuales",
            icon: "calendar",
        },
        ReportLink {
            key: REPORT_TOP_SELLING,
            label: "Productos más vendidos",
            icon: "star",
        },
        ReportLink {
            key: REPORT_CATEGORY_INCOME,
            label: "Ingresos por categoría de producto",
            icon: "tag",
        },
        ReportLink {
            key: REPORT_STOCK_HISTORY,
            label: "Historial Stock",
            icon: "chart",
        },
        ReportLink {
            key: REPORT_DAILY_SHIPMENTS,
            label: "Envíos del día",
            icon: "truck",
        },
    ];
    REPORTS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_numbers_default_to_zero() {
        let s: StoreSummary = serde_json::from_str(
            r#"{"total_sales": "150000", "top_selling_products": [{"title": "Polera", "quantity": 3}],
                "order_statuses": {"paid": 5}, "top_payment_methods": {"debit_card": null}}"#,
        )
        .unwrap();
        assert_eq!(s.total_sales, 150000.0);
        assert_eq!(s.monthly_sales, 0.0);
        assert_eq!(s.top_selling_products[0].total_amount, 0.0);
        assert_eq!(s.order_statuses.paid, 5);
        assert_eq!(s.order_statuses.canceled, 0);
        assert_eq!(s.top_payment_methods.debit_card, 0);
    }

    #[test]
    fn report_keys_are_unique() {
        let reports = available_reports();
        for (i, a) in reports.iter().enumerate() {
            assert!(reports[i + 1..].iter().all(|b| b.key != a.key));
        }
        assert_eq!(reports[4].tab_key("123"), "d401_stock_history_123");
    }
}
