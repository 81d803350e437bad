use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::format::parse_datetime;
use crate::shared::serde_ext::{lenient_f64, lenient_i64, opt_string_or_number, string_or_number};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub company: Option<Company>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Warehouse {
    pub fn company_name(&self) -> &str {
        self.company.as_ref().map(|c| c.name.as_str()).unwrap_or("")
    }
}

/// One product line stocked in a warehouse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WarehouseStock {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub id_mlc: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub warehouse_id: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub available_quantity: i64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: f64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateWarehouseRequest {
    pub name: String,
    pub location: String,
    pub assigned_company_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WarehouseValidationError {
    #[error("El nombre de la bodega es obligatorio.")]
    MissingName,
    #[error("La ubicación es obligatoria.")]
    MissingLocation,
    #[error("Debes indicar una empresa válida.")]
    InvalidCompany,
}

impl CreateWarehouseRequest {
    pub fn validate(&self) -> Result<(), WarehouseValidationError> {
        if self.name.trim().is_empty() {
            return Err(WarehouseValidationError::MissingName);
        }
        if self.location.trim().is_empty() {
            return Err(WarehouseValidationError::MissingLocation);
        }
        if self.assigned_company_id <= 0 {
            return Err(WarehouseValidationError::InvalidCompany);
        }
        Ok(())
    }
}

// ============================================================================
// List filtering
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreationOrder {
    #[default]
    None,
    Ascending,
    Descending,
}

impl CreationOrder {
    pub fn parse(value: &str) -> Self {
        match value {
            "asc" => Self::Ascending,
            "desc" => Self::Descending,
            _ => Self::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

/// "Todas" followed by every distinct non-empty company name, first-seen order.
pub fn company_options(warehouses: &[Warehouse]) -> Vec<FilterOption> {
    let mut options = vec![FilterOption {
        value: String::new(),
        label: "Todas".to_string(),
    }];
    for name in warehouses.iter().map(Warehouse::company_name) {
        if !name.is_empty() && !options.iter().skip(1).any(|o| o.value == name) {
            options.push(FilterOption {
                value: name.to_string(),
                label: name.to_string(),
            });
        }
    }
    options
}

pub fn filter_and_sort(
    warehouses: &[Warehouse],
    company_filter: &str,
    order: CreationOrder,
) -> Vec<Warehouse> {
    let mut filtered: Vec<Warehouse> = warehouses
        .iter()
        .filter(|w| company_filter.is_empty() || w.company_name() == company_filter)
        .cloned()
        .collect();

    let created = |w: &Warehouse| w.created_at.as_deref().and_then(parse_datetime);
    match order {
        CreationOrder::None => {}
        CreationOrder::Ascending => filtered.sort_by_key(|w| created(w)),
        CreationOrder::Descending => filtered.sort_by(|a, b| created(b).cmp(&created(a))),
    }
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warehouse(id: u32, company: Option<&str>, created: &str) -> Warehouse {
        Warehouse {
            id: id.to_string(),
            name: format!("Bodega {id}"),
            location: "Santiago".into(),
            company: company.map(|name| Company {
                id: "1".into(),
                name: name.into(),
            }),
            created_at: Some(created.into()),
            updated_at: None,
        }
    }

    fn sample() -> Vec<Warehouse> {
        vec![
            warehouse(1, Some("Acme"), "2024-03-01 10:00:00"),
            warehouse(2, None, "2024-01-15 10:00:00"),
            warehouse(3, Some("Sur Ltda"), "2024-02-10 10:00:00"),
            warehouse(4, Some("Acme"), "2023-12-24 10:00:00"),
        ]
    }

    #[test]
    fn options_start_with_all_and_skip_empty() {
        let labels: Vec<_> = company_options(&sample())
            .into_iter()
            .map(|o| o.label)
            .collect();
        assert_eq!(labels, vec!["Todas", "Acme", "Sur Ltda"]);
    }

    #[test]
    fn filter_by_company() {
        let ids: Vec<_> = filter_and_sort(&sample(), "Acme", CreationOrder::None)
            .into_iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn sort_by_creation_date() {
        let asc: Vec<_> = filter_and_sort(&sample(), "", CreationOrder::parse("asc"))
            .into_iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(asc, vec!["4", "2", "3", "1"]);

        let desc: Vec<_> = filter_and_sort(&sample(), "", CreationOrder::parse("desc"))
            .into_iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(desc, vec!["1", "3", "2", "4"]);
    }

    #[test]
    fn stock_accepts_null_fields() {
        let stock: Vec<WarehouseStock> = serde_json::from_str(
            r#"[{"id": 9, "id_mlc": "MLC55", "title": "Polera", "warehouse_id": 2,
                 "available_quantity": "12", "price": null}]"#,
        )
        .unwrap();
        assert_eq!(stock[0].available_quantity, 12);
        assert_eq!(stock[0].price, 0.0);
        assert_eq!(stock[0].warehouse_id, "2");
    }

    #[test]
    fn create_request_validation() {
        let mut req = CreateWarehouseRequest {
            name: "Central".into(),
            location: "".into(),
            assigned_company_id: 1,
        };
        assert_eq!(req.validate(), Err(WarehouseValidationError::MissingLocation));
        req.location = "Maipú".into();
        assert!(req.validate().is_ok());
        req.assigned_company_id = 0;
        assert_eq!(req.validate(), Err(WarehouseValidationError::InvalidCompany));
    }
}
