use serde::{Deserialize, Serialize};

use crate::shared::serde_ext::{lenient_f64, lenient_i64, string_or_number};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoldItem {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub quantity: i64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: f64,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total: f64,
}

/// One order of `GET /mercadolibre/sales-by-month/{client_id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    #[serde(default)]
    pub order_date: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub order_id: String,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub products: Vec<SoldItem>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentMethodTotal {
    pub payment_method: String,
    pub quantity: i64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryIncome {
    pub id: String,
    pub category: String,
    pub product_count: i64,
    pub products: Vec<SoldItem>,
    pub total: f64,
}

/// Groups every sold item by category in first-seen order.
pub fn group_by_category(sales: &[Sale]) -> Vec<CategoryIncome> {
    let mut out: Vec<CategoryIncome> = Vec::new();
    for item in sales.iter().flat_map(|s| s.products.iter()) {
        match out.iter_mut().find(|c| c.id == item.category_id) {
            Some(cat) => {
                cat.product_count += item.quantity;
                cat.total += item.total;
                cat.products.push(item.clone());
            }
            None => out.push(CategoryIncome {
                id: item.category_id.clone(),
                category: if item.category.is_empty() {
                    item.category_id.clone()
                } else {
                    item.category.clone()
                },
                product_count: item.quantity,
                products: vec![item.clone()],
                total: item.total,
            }),
        }
    }
    out
}

/// Categories whose id is in `active`; an empty selection keeps all.
pub fn filter_categories(categories: &[CategoryIncome], active: &[String]) -> Vec<CategoryIncome> {
    categories
        .iter()
        .filter(|c| active.is_empty() || active.contains(&c.id))
        .cloned()
        .collect()
}

pub fn grand_total(categories: &[CategoryIncome]) -> f64 {
    categories.iter().map(|c| c.total).sum()
}

/// Orders and amount per payment method, first-seen order.
pub fn payment_method_totals(sales: &[Sale]) -> Vec<PaymentMethodTotal> {
    let mut out: Vec<PaymentMethodTotal> = Vec::new();
    for sale in sales {
        match out.iter_mut().find(|m| m.payment_method == sale.payment_method) {
            Some(m) => {
                m.quantity += 1;
                m.total += sale.total_amount;
            }
            None => out.push(PaymentMethodTotal {
                payment_method: sale.payment_method.clone(),
                quantity: 1,
                total: sale.total_amount,
            }),
        }
    }
    out
}

pub fn payment_method_label(method: &str) -> &str {
    match method {
        "account_money" => "Dinero en cuenta",
        "debit_card" => "Tarjeta de débito",
        "credit_card" => "Tarjeta de crédito",
        "" => "Sin información",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(cat: &str, qty: i64, total: f64) -> SoldItem {
        SoldItem {
            id: format!("{cat}-{qty}"),
            title: "Producto".into(),
            quantity: qty,
            price: total / qty as f64,
            category_id: cat.into(),
            category: format!("Categoría {cat}"),
            total,
        }
    }

    fn sales() -> Vec<Sale> {
        vec![
            Sale {
                order_id: "1".into(),
                payment_method: "credit_card".into(),
                products: vec![item("MLC1", 2, 2000.0), item("MLC2", 1, 500.0)],
                total_amount: 2500.0,
                ..Default::default()
            },
            Sale {
                order_id: "2".into(),
                payment_method: "account_money".into(),
                products: vec![item("MLC1", 3, 3000.0)],
                total_amount: 3000.0,
                ..Default::default()
            },
            Sale {
                order_id: "3".into(),
                payment_method: "credit_card".into(),
                products: vec![],
                total_amount: 100.0,
                ..Default::default()
            },
        ]
    }

    #[test]
    fn groups_in_first_seen_order() {
        let cats = group_by_category(&sales());
        assert_eq!(cats.len(), 2);
        assert_eq!(cats[0].id, "MLC1");
        assert_eq!(cats[0].product_count, 5);
        assert_eq!(cats[0].total, 5000.0);
        assert_eq!(cats[0].products.len(), 2);
        assert_eq!(cats[1].category, "Categoría MLC2");
        assert_eq!(grand_total(&cats), 5500.0);
    }

    #[test]
    fn filter_keeps_all_when_empty() {
        let cats = group_by_category(&sales());
        assert_eq!(filter_categories(&cats, &[]).len(), 2);
        let only = filter_categories(&cats, &["MLC2".to_string()]);
        assert_eq!(only.len(), 1);
        assert_eq!(grand_total(&only), 500.0);
    }

    #[test]
    fn payment_methods() {
        let methods = payment_method_totals(&sales());
        assert_eq!(methods.len(), 2);
        assert_eq!(methods[0].payment_method, "credit_card");
        assert_eq!(methods[0].quantity, 2);
        assert_eq!(methods[0].total, 2600.0);
        assert_eq!(payment_method_label(&methods[1].payment_method), "Dinero en cuenta");
    }
}
