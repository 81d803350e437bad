use serde::{Deserialize, Serialize};

pub const SHIPPING_MODE: &str = "me2";
pub const WARRANTY_TYPE_SELLER: &str = "2230279";
pub const DEFAULT_WARRANTY_TIME: &str = "90 días";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PictureSource {
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipping {
    pub mode: String,
    pub local_pick_up: bool,
    pub free_shipping: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeEntry {
    pub id: String,
    pub value_name: String,
}

impl AttributeEntry {
    pub fn new(id: impl Into<String>, value_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value_name: value_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleTerm {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_name: Option<String>,
}

impl SaleTerm {
    /// Seller warranty for the given time (empty → 90 days).
    pub fn seller_warranty(warranty_time: &str) -> Vec<SaleTerm> {
        let time = if warranty_time.trim().is_empty() {
            DEFAULT_WARRANTY_TIME
        } else {
            warranty_time.trim()
        };
        vec![
            SaleTerm {
                id: "WARRANTY_TYPE".into(),
                value_id: Some(WARRANTY_TYPE_SELLER.into()),
                value_name: None,
            },
            SaleTerm {
                id: "WARRANTY_TIME".into(),
                value_id: None,
                value_name: Some(time.to_string()),
            },
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariationPayload {
    pub attribute_combinations: Vec<AttributeEntry>,
    pub attributes: Vec<AttributeEntry>,
    pub price: f64,
    pub available_quantity: u32,
    pub seller_custom_field: String,
    pub picture_ids: Vec<String>,
}

/// Body of `POST /mercadolibre/Products/{client_id}/crear-producto`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateItemPayload {
    pub category_id: String,
    pub condition: String,
    pub price: f64,
    pub currency_id: String,
    pub available_quantity: u32,
    pub listing_type_id: String,
    pub pictures: Vec<PictureSource>,
    pub shipping: Shipping,
    pub seller_custom_field: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variations: Vec<VariationPayload>,
    pub attributes: Vec<AttributeEntry>,
    pub sale_terms: Vec<SaleTerm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_product_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_listing: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
}
