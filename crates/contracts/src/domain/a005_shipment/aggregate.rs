use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::format::{format_schedule, parse_date};
use crate::shared::serde_ext::{lenient_i64, string_or_number};

/// A pending dispatch with its handling deadline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub product: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub quantity: i64,
    #[serde(default)]
    pub receiver_name: String,
    #[serde(default)]
    pub direction: String,
    #[serde(default)]
    pub estimated_handling_limit: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub order_id: String,
}

impl Shipment {
    pub fn schedule_label(&self) -> String {
        format_schedule(self.estimated_handling_limit.as_deref())
    }

    fn handling_date(&self) -> Option<NaiveDate> {
        self.estimated_handling_limit.as_deref().and_then(parse_date)
    }
}

/// Shipments whose handling limit falls on `date`.
pub fn due_on(shipments: Vec<Shipment>, date: NaiveDate) -> Vec<Shipment> {
    shipments
        .into_iter()
        .filter(|s| s.handling_date() == Some(date))
        .collect()
}

pub fn title_for(date: NaiveDate) -> String {
    format!(
        "Envíos con Límite de Despacho Hoy ({})",
        date.format("%Y-%m-%d")
    )
}

pub const NO_SHIPMENTS_TODAY: &str = "No hay envíos con límite de despacho programados para hoy.";

#[cfg(test)]
mod tests {
    use super::*;

    fn shipment(id: &str, limit: Option<&str>) -> Shipment {
        Shipment {
            id: id.into(),
            product: "Mochila".into(),
            quantity: 1,
            estimated_handling_limit: limit.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn keeps_only_today() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let list = vec![
            shipment("1", Some("2024-05-10T18:00:00.000-04:00")),
            shipment("2", Some("2024-05-11 09:00:00")),
            shipment("3", None),
            shipment("4", Some("mañana")),
            shipment("5", Some("2024-05-10")),
        ];
        let ids: Vec<_> = due_on(list, today).into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["1", "5"]);
    }

    #[test]
    fn schedule_and_title() {
        assert_eq!(shipment("1", None).schedule_label(), "N/A");
        assert_eq!(
            shipment("1", Some("2024-05-10 18:30:00")).schedule_label(),
            "2024-05-10 18:30"
        );
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        assert_eq!(title_for(today), "Envíos con Límite de Despacho Hoy (2024-05-10)");
    }

    #[test]
    fn numeric_ids_are_accepted() {
        let s: Shipment = serde_json::from_str(
            r#"{"id": 123, "product": "Polera", "quantity": "2", "order_id": 2000001}"#,
        )
        .unwrap();
        assert_eq!(s.id, "123");
        assert_eq!(s.quantity, 2);
        assert_eq!(s.order_id, "2000001");
    }
}
