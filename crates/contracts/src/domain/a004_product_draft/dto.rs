use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::shared::serde_ext::{opt_string_or_number, string_or_number};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub sku: Option<String>,
}

/// Body of `GET /mercadolibre/products/{client_id}/catalogo?title=`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryPrediction {
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub domain_id: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub products: Vec<CatalogProduct>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorySettings {
    #[serde(default)]
    pub catalog_domain_required: bool,
    #[serde(default)]
    pub item_conditions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryInfo {
    #[serde(default)]
    pub settings: Option<CategorySettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeTags {
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub catalog_required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeValue {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryAttribute {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tags: AttributeTags,
    #[serde(default)]
    pub values: Vec<AttributeValue>,
}

impl CategoryAttribute {
    pub fn is_required(&self) -> bool {
        self.tags.required || self.tags.catalog_required
    }
}

/// The attributes endpoint returns either a bare list or `{ filtered_attributes }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributesResponse {
    List(Vec<CategoryAttribute>),
    Filtered {
        #[serde(default)]
        filtered_attributes: Vec<CategoryAttribute>,
    },
}

impl AttributesResponse {
    pub fn into_vec(self) -> Vec<CategoryAttribute> {
        match self {
            Self::List(list) => list,
            Self::Filtered {
                filtered_attributes,
            } => filtered_attributes,
        }
    }
}

/// Body of `GET /mercadolibre/specs/{domain_id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainSpecs {
    #[serde(default)]
    pub attributes: Vec<CategoryAttribute>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeGuideRow {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub size: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeGuide {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub names: BTreeMap<String, String>,
    #[serde(default)]
    pub rows: Vec<SizeGuideRow>,
}

impl SizeGuide {
    /// Site name of the chart, the id when the chart is unnamed.
    pub fn display_name(&self) -> &str {
        self.names
            .get("MLC")
            .map(String::as_str)
            .unwrap_or(self.id.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeGuidesResponse {
    #[serde(default)]
    pub size_guides: Vec<SizeGuide>,
}

/// A size offered by at least one guide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeOption {
    pub id: String,
    pub size: String,
    pub name: String,
}

/// Parameters of `GET /mercadolibre/size-guides/{client_id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeGuideQuery {
    pub domain_id: String,
    pub gender: String,
    pub brand: String,
}

impl SizeGuideQuery {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("domain_id", self.domain_id.clone()),
            ("gender", self.gender.clone()),
            ("brand", self.brand.clone()),
        ]
    }
}

/// A listing already published by the seller, used to reuse SKU and pictures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListedProduct {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub sku: Option<String>,
    #[serde(default)]
    pub pictures: Vec<serde_json::Value>,
}

impl ListedProduct {
    /// Pictures arrive as `{secure_url}`, `{url}` or bare strings.
    pub fn picture_urls(&self) -> Vec<String> {
        self.pictures
            .iter()
            .filter_map(|pic| match pic {
                serde_json::Value::String(url) => Some(url.clone()),
                serde_json::Value::Object(map) => map
                    .get("secure_url")
                    .or_else(|| map.get("url"))
                    .and_then(|v| v.as_str())
                    .map(str::to_string),
                _ => None,
            })
            .filter(|url| !url.is_empty())
            .collect()
    }

    pub fn existing_sku(&self) -> Option<&str> {
        self.sku.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Body of `GET /mercadolibre/all-products/{client_id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListedProductsResponse {
    #[serde(default)]
    pub products: Vec<ListedProduct>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuUpdateRequest {
    pub sku: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_accepts_both_shapes() {
        let bare: AttributesResponse =
            serde_json::from_str(r#"[{"id":"BRAND","name":"Marca","tags":{"required":true}}]"#)
                .unwrap();
        let wrapped: AttributesResponse = serde_json::from_str(
            r#"{"filtered_attributes":[{"id":"COLOR","name":"Color"},{"id":"SIZE","name":"Talla"}]}"#,
        )
        .unwrap();
        let bare = bare.into_vec();
        assert_eq!(bare.len(), 1);
        assert!(bare[0].is_required());
        assert_eq!(wrapped.into_vec().len(), 2);
    }

    #[test]
    fn guide_display_name_falls_back_to_id() {
        let named: SizeGuide =
            serde_json::from_str(r#"{"id": 3947, "names": {"MLC": "Zapatillas Hombre"}}"#).unwrap();
        let unnamed: SizeGuide = serde_json::from_str(r#"{"id": "G-2"}"#).unwrap();
        assert_eq!(named.display_name(), "Zapatillas Hombre");
        assert_eq!(unnamed.display_name(), "G-2");
    }

    #[test]
    fn picture_urls_from_mixed_shapes() {
        let p: ListedProduct = serde_json::from_str(
            r#"{"id":"MLC9","title":"Mochila","pictures":[
                {"secure_url":"https://a/1.jpg","url":"http://a/1.jpg"},
                {"url":"http://a/2.jpg"},
                "https://a/3.jpg",
                42]}"#,
        )
        .unwrap();
        assert_eq!(
            p.picture_urls(),
            vec!["https://a/1.jpg", "http://a/2.jpg", "https://a/3.jpg"]
        );
        assert_eq!(p.existing_sku(), None);
    }
}
