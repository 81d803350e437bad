use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

use super::dto::*;
use super::payload::*;

pub const TITLE_MAX_LEN: usize = 60;
pub const TITLE_DEBOUNCE_MS: u32 = 600;
pub const SIZE_GRID_ID: &str = "SIZE_GRID_ID";
pub const SIZE_GRID_ROW_ID: &str = "SIZE_GRID_ROW_ID";
pub const UPLOAD_SUCCESS_MESSAGE: &str = "✅ Producto subido exitosamente";
pub const UPLOAD_FAILED_MESSAGE: &str = "Hubo un error al subir el producto.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DraftError {
    #[error("No se pudo predecir la categoría.")]
    CategoryNotPredicted,

    #[error("Faltan datos clave para crear el producto.")]
    MissingKeyData,

    #[error("Completa todos los campos obligatorios.")]
    IncompleteFields,

    #[error("Debes seleccionar una guía de tallas.")]
    SizeGuideRequired,

    #[error("Debes seleccionar la fila de la guía de tallas en todas las variaciones.")]
    VariationRowsMissing,

    #[error("Esta categoría requiere seleccionar un producto del catálogo.")]
    CatalogProductRequired,

    #[error("Mercado Libre rechazó el producto:\n{}", bullet_list(.0))]
    Rejected(Vec<String>),

    #[error("{0}")]
    Failed(String),
}

fn bullet_list(messages: &[String]) -> String {
    messages
        .iter()
        .map(|m| format!("• {}", m))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Turns the error body of `crear-producto` into a displayable error.
pub fn rejection_from_body(body: &str) -> DraftError {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return DraftError::Failed(UPLOAD_FAILED_MESSAGE.to_string());
    };

    let causes: Vec<String> = value
        .pointer("/ml_error/cause")
        .and_then(|c| c.as_array())
        .map(|causes| {
            causes
                .iter()
                .filter_map(|c| c.get("message").and_then(|m| m.as_str()))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    if !causes.is_empty() {
        return DraftError::Rejected(causes);
    }

    match value.get("message").and_then(|m| m.as_str()) {
        Some(message) if !message.trim().is_empty() => DraftError::Failed(message.to_string()),
        _ => DraftError::Failed(UPLOAD_FAILED_MESSAGE.to_string()),
    }
}

// ============================================================================
// Title and SKU helpers
// ============================================================================

/// Keeps ASCII letters, digits and spaces only.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Sanitized title cut to the marketplace limit; the flag tells whether it was cut.
pub fn validate_title(title: &str) -> (String, bool) {
    let sanitized = sanitize_title(title);
    if sanitized.chars().count() > TITLE_MAX_LEN {
        (sanitized.chars().take(TITLE_MAX_LEN).collect(), true)
    } else {
        (sanitized, false)
    }
}

/// First published listing whose title contains `title` (case-insensitive).
pub fn match_existing_product<'a>(
    products: &'a [ListedProduct],
    title: &str,
) -> Option<&'a ListedProduct> {
    let needle = title.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    products
        .iter()
        .find(|p| p.title.to_lowercase().contains(&needle))
}

pub fn generated_sku(seed: u32) -> String {
    format!("SKU-{}", seed % 1_000_000)
}

// ============================================================================
// Form values
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct DraftForm {
    pub title: String,
    pub condition: String,
    pub price: f64,
    pub currency_id: String,
    pub quantity: u32,
    pub listing_type_id: String,
    pub description: String,
    pub family_name: String,
    pub sku: String,
    pub warranty_time: String,
    pub local_pick_up: bool,
    pub free_shipping: bool,
    pub attributes: BTreeMap<String, String>,
    pub specs: BTreeMap<String, String>,
    pub size_grid_id: String,
    pub catalog_product_id: String,
}

impl Default for DraftForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            condition: String::new(),
            price: 0.0,
            currency_id: "CLP".to_string(),
            quantity: 0,
            listing_type_id: "gold_special".to_string(),
            description: String::new(),
            family_name: String::new(),
            sku: String::new(),
            warranty_time: String::new(),
            local_pick_up: false,
            free_shipping: false,
            attributes: BTreeMap::new(),
            specs: BTreeMap::new(),
            size_grid_id: String::new(),
            catalog_product_id: String::new(),
        }
    }
}

impl DraftForm {
    /// Fresh form that keeps only the typed title.
    pub fn keep_title(&self) -> Self {
        Self {
            title: self.title.clone(),
            ..Self::default()
        }
    }
}

// ============================================================================
// Variations
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Variation {
    pub id: Uuid,
    pub color: String,
    pub size: String,
    pub fabric_design: String,
    pub price: f64,
    pub available_quantity: u32,
    pub pictures: Vec<String>,
    pub seller_sku: String,
    pub size_grid_row_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariationField {
    Color,
    Size,
    FabricDesign,
    Price,
    Quantity,
    Sku,
    SizeGridRow,
}

impl Variation {
    fn set(&mut self, field: VariationField, value: &str) {
        match field {
            VariationField::Color => self.color = value.to_string(),
            VariationField::Size => self.size = value.to_string(),
            VariationField::FabricDesign => self.fabric_design = value.to_string(),
            VariationField::Price => self.price = value.trim().parse().unwrap_or(0.0),
            VariationField::Quantity => self.available_quantity = value.trim().parse().unwrap_or(0),
            VariationField::Sku => self.seller_sku = value.to_string(),
            VariationField::SizeGridRow => self.size_grid_row_id = value.to_string(),
        }
    }

    fn to_payload(&self, first_image: Option<&String>) -> VariationPayload {
        let combinations = [
            ("COLOR", &self.color),
            ("SIZE", &self.size),
            ("FABRIC_DESIGN", &self.fabric_design),
        ]
        .into_iter()
        .filter(|(_, v)| !v.trim().is_empty())
        .map(|(id, v)| AttributeEntry::new(id, v.trim()))
        .collect();

        let mut attributes = Vec::new();
        if !self.size_grid_row_id.is_empty() {
            attributes.push(AttributeEntry::new(SIZE_GRID_ROW_ID, &self.size_grid_row_id));
        }

        VariationPayload {
            attribute_combinations: combinations,
            attributes,
            price: self.price,
            available_quantity: self.available_quantity,
            seller_custom_field: self.seller_sku.clone(),
            picture_ids: first_image.cloned().into_iter().collect(),
        }
    }
}

// ============================================================================
// Wizard state
// ============================================================================

/// What the category prediction tells the form.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionOutcome {
    /// `None` means the user has to type the family name.
    pub family_name: Option<String>,
    /// First catalog product that already carries a SKU.
    pub product_with_sku: Option<CatalogProduct>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub category_id: String,
    pub domain_id: String,
    pub conditions: Vec<String>,
    pub catalog_required_categories: Vec<String>,
    pub attributes: Vec<CategoryAttribute>,
    pub specs: Vec<CategoryAttribute>,
    pub size_guides: Vec<SizeGuide>,
    pub available_sizes: Vec<SizeOption>,
    pub selected_guide: String,
    pub brand: String,
    pub gender: String,
    pub has_variations: bool,
    pub variations: Vec<Variation>,
    pub images: Vec<String>,
    pub catalog_products: Vec<CatalogProduct>,
    pub catalog_product_id: String,
}

impl ProductDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn apply_prediction(
        &mut self,
        prediction: CategoryPrediction,
    ) -> Result<PredictionOutcome, DraftError> {
        let category_id = prediction
            .category_id
            .filter(|c| !c.trim().is_empty())
            .ok_or(DraftError::CategoryNotPredicted)?;

        self.category_id = category_id;
        self.domain_id = prediction.domain_id.unwrap_or_default();
        let product_with_sku = prediction
            .products
            .iter()
            .find(|p| p.sku.as_deref().is_some_and(|s| !s.is_empty()))
            .cloned();
        self.catalog_products = prediction.products;

        Ok(PredictionOutcome {
            family_name: prediction.family_name.filter(|f| !f.trim().is_empty()),
            product_with_sku,
        })
    }

    pub fn apply_category_info(&mut self, category_id: &str, info: &CategoryInfo) {
        let settings = info.settings.clone().unwrap_or_default();
        if settings.catalog_domain_required
            && !self.catalog_required_categories.iter().any(|c| c == category_id)
        {
            self.catalog_required_categories.push(category_id.to_string());
        }
        self.conditions = if settings.item_conditions.is_empty() {
            vec!["new".to_string(), "used".to_string()]
        } else {
            settings.item_conditions
        };
    }

    pub fn set_specs(&mut self, specs: DomainSpecs) {
        self.specs = specs.attributes;
    }

    pub fn set_attributes(&mut self, attributes: AttributesResponse) {
        self.attributes = attributes.into_vec();
    }

    pub fn requires_catalog(&self) -> bool {
        self.catalog_required_categories
            .iter()
            .any(|c| c == &self.category_id)
    }

    fn size_grid_attribute(&self) -> Option<&CategoryAttribute> {
        self.attributes.iter().find(|a| a.id == SIZE_GRID_ID)
    }

    pub fn size_grid_required(&self) -> bool {
        self.size_grid_attribute()
            .is_some_and(CategoryAttribute::is_required)
    }

    /// Static guide choices carried by the SIZE_GRID_ID attribute itself.
    pub fn static_size_grids(&self) -> Vec<AttributeValue> {
        self.size_grid_attribute()
            .map(|a| a.values.clone())
            .unwrap_or_default()
    }

    /// Stores the guides, collects distinct sizes and auto-selects the first guide.
    pub fn apply_size_guides(&mut self, guides: Vec<SizeGuide>) -> Option<String> {
        if guides.is_empty() {
            self.clear_size_guides();
            return None;
        }

        let mut sizes: Vec<SizeOption> = Vec::new();
        for row in guides.iter().flat_map(|g| g.rows.iter()) {
            if !sizes.iter().any(|s| s.size == row.size) {
                sizes.push(SizeOption {
                    id: row.id.clone(),
                    size: row.size.clone(),
                    name: row.size.clone(),
                });
            }
        }

        let first = guides[0].id.clone();
        self.size_guides = guides;
        self.available_sizes = sizes;
        self.selected_guide = first.clone();
        Some(first)
    }

    pub fn clear_size_guides(&mut self) {
        self.size_guides.clear();
        self.available_sizes.clear();
        self.selected_guide.clear();
    }

    pub fn guide_label(&self, guide_id: &str) -> String {
        self.size_guides
            .iter()
            .find(|g| g.id == guide_id)
            .map(|g| g.display_name().to_string())
            .unwrap_or_else(|| guide_id.to_string())
    }

    /// Rows of the selected guide, offered per variation.
    pub fn selected_guide_rows(&self) -> Vec<SizeGuideRow> {
        self.size_guides
            .iter()
            .find(|g| g.id == self.selected_guide)
            .map(|g| g.rows.clone())
            .unwrap_or_default()
    }

    /// Tracks BRAND and GENDER; once domain, brand and gender are known the
    /// size guides have to be (re)loaded with the returned query.
    pub fn on_attribute_change(&mut self, attribute_id: &str, value: &str) -> Option<SizeGuideQuery> {
        match attribute_id {
            "BRAND" => self.brand = value.trim().to_string(),
            "GENDER" => self.gender = value.trim().to_string(),
            _ => return None,
        }
        if self.domain_id.is_empty() || self.brand.is_empty() || self.gender.is_empty() {
            return None;
        }
        Some(SizeGuideQuery {
            domain_id: self.domain_id.clone(),
            gender: self.gender.clone(),
            brand: self.brand.clone(),
        })
    }

    pub fn select_size_guide(&mut self, guide_id: &str) {
        self.selected_guide = guide_id.to_string();
        for variation in &mut self.variations {
            variation.size_grid_row_id.clear();
        }
    }

    pub fn add_variation(&mut self, default_price: f64) -> Uuid {
        let id = Uuid::new_v4();
        self.variations.push(Variation {
            id,
            color: String::new(),
            size: String::new(),
            fabric_design: String::new(),
            price: default_price.max(0.0),
            available_quantity: 1,
            pictures: self.images.first().cloned().into_iter().collect(),
            seller_sku: String::new(),
            size_grid_row_id: String::new(),
        });
        id
    }

    pub fn remove_variation(&mut self, id: Uuid) {
        self.variations.retain(|v| v.id != id);
    }

    pub fn update_variation(&mut self, id: Uuid, field: VariationField, value: &str) {
        if let Some(variation) = self.variations.iter_mut().find(|v| v.id == id) {
            variation.set(field, value);
        }
    }

    pub fn add_image(&mut self, url: &str) -> bool {
        let url = url.trim();
        if url.is_empty() {
            return false;
        }
        self.images.push(url.to_string());
        true
    }

    pub fn remove_image(&mut self, index: usize) {
        if index < self.images.len() {
            self.images.remove(index);
        }
    }

    pub fn set_images(&mut self, urls: Vec<String>) {
        self.images = urls;
    }

    /// Validates the draft and assembles the create body.
    pub fn build_payload(
        &self,
        client_id: &str,
        form: &DraftForm,
    ) -> Result<CreateItemPayload, DraftError> {
        if client_id.trim().is_empty() || self.category_id.is_empty() {
            return Err(DraftError::MissingKeyData);
        }

        if form.condition.is_empty()
            || self.images.is_empty()
            || form.description.trim().is_empty()
            || form.price <= 0.0
            || form.quantity == 0
        {
            return Err(DraftError::IncompleteFields);
        }

        let size_grid_id = if form.size_grid_id.is_empty() {
            self.selected_guide.clone()
        } else {
            form.size_grid_id.clone()
        };
        if (self.size_grid_required() || self.has_variations) && size_grid_id.is_empty() {
            return Err(DraftError::SizeGuideRequired);
        }

        let with_variations = self.has_variations && !self.variations.is_empty();
        if with_variations && self.variations.iter().any(|v| v.size_grid_row_id.is_empty()) {
            return Err(DraftError::VariationRowsMissing);
        }

        let first_image = self.images.first();
        let mut price = form.price;
        let mut variations = Vec::new();
        if with_variations {
            variations = self
                .variations
                .iter()
                .map(|v| v.to_payload(first_image))
                .collect();
            price = self
                .variations
                .iter()
                .map(|v| v.price)
                .fold(f64::INFINITY, f64::min);
        }

        let mut attributes: Vec<AttributeEntry> = form
            .attributes
            .iter()
            .filter(|(id, _)| !(self.has_variations && (*id == "COLOR" || *id == "SIZE")))
            .chain(form.specs.iter())
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(id, value)| AttributeEntry::new(id.as_str(), value.trim()))
            .collect();
        if !size_grid_id.is_empty() && !attributes.iter().any(|a| a.id == SIZE_GRID_ID) {
            attributes.push(AttributeEntry::new(SIZE_GRID_ID, size_grid_id));
        }

        let mut payload = CreateItemPayload {
            category_id: self.category_id.clone(),
            condition: form.condition.clone(),
            price,
            currency_id: form.currency_id.clone(),
            available_quantity: form.quantity,
            listing_type_id: form.listing_type_id.clone(),
            pictures: self
                .images
                .iter()
                .map(|src| PictureSource {
                    source: src.clone(),
                })
                .collect(),
            shipping: Shipping {
                mode: SHIPPING_MODE.to_string(),
                local_pick_up: form.local_pick_up,
                free_shipping: form.free_shipping,
            },
            seller_custom_field: form.sku.clone(),
            variations,
            attributes,
            sale_terms: SaleTerm::seller_warranty(&form.warranty_time),
            catalog_product_id: None,
            catalog_listing: None,
            title: None,
            description: None,
            family_name: None,
        };

        if self.requires_catalog() {
            let mut catalog_id = if form.catalog_product_id.is_empty() {
                self.catalog_product_id.clone()
            } else {
                form.catalog_product_id.clone()
            };
            if catalog_id.is_empty() && self.catalog_products.len() == 1 {
                catalog_id = self.catalog_products[0].id.clone();
            }
            if catalog_id.is_empty() || catalog_id == "undefined" {
                return Err(DraftError::CatalogProductRequired);
            }
            payload.catalog_product_id = Some(catalog_id);
            payload.catalog_listing = Some(true);
        } else {
            let (title, _) = validate_title(&form.title);
            let family_name = if form.family_name.trim().is_empty() {
                title.clone()
            } else {
                form.family_name.trim().to_string()
            };
            payload.title = Some(title);
            payload.description = Some(form.description.clone());
            payload.family_name = Some(family_name);
        }

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attribute(id: &str, required: bool) -> CategoryAttribute {
        CategoryAttribute {
            id: id.into(),
            name: id.into(),
            tags: AttributeTags {
                required,
                catalog_required: false,
            },
            values: vec![],
        }
    }

    fn guide(id: &str, sizes: &[(&str, &str)]) -> SizeGuide {
        SizeGuide {
            id: id.into(),
            names: BTreeMap::from([("MLC".to_string(), format!("Guía {id}"))]),
            rows: sizes
                .iter()
                .map(|(row, size)| SizeGuideRow {
                    id: row.to_string(),
                    size: size.to_string(),
                })
                .collect(),
        }
    }

    fn ready_draft() -> (ProductDraft, DraftForm) {
        let mut draft = ProductDraft::new();
        draft
            .apply_prediction(CategoryPrediction {
                category_id: Some("MLC1234".into()),
                domain_id: Some("MLC-SNEAKERS".into()),
                family_name: None,
                products: vec![],
            })
            .unwrap();
        draft.add_image("https://img/1.jpg");
        draft.add_image("https://img/2.jpg");
        let form = DraftForm {
            title: "Zapatilla Urbana Ñandú 42!".into(),
            condition: "new".into(),
            price: 29990.0,
            quantity: 3,
            description: "Zapatilla cómoda".into(),
            sku: "SKU-1".into(),
            ..DraftForm::default()
        };
        (draft, form)
    }

    #[test]
    fn title_sanitizing_and_truncation() {
        assert_eq!(sanitize_title("  Polera Niño #1 (azul) "), "Polera Nio 1 azul");
        let long = "a".repeat(75);
        let (title, truncated) = validate_title(&long);
        assert_eq!(title.len(), TITLE_MAX_LEN);
        assert!(truncated);
        assert_eq!(validate_title("Mochila"), ("Mochila".to_string(), false));
    }

    #[test]
    fn prediction_requires_category() {
        let mut draft = ProductDraft::new();
        let err = draft.apply_prediction(CategoryPrediction::default()).unwrap_err();
        assert_eq!(err, DraftError::CategoryNotPredicted);
    }

    #[test]
    fn prediction_picks_product_with_sku() {
        let mut draft = ProductDraft::new();
        let outcome = draft
            .apply_prediction(CategoryPrediction {
                category_id: Some("MLC1".into()),
                domain_id: None,
                family_name: Some("Zapatillas".into()),
                products: vec![
                    CatalogProduct {
                        id: "P1".into(),
                        name: None,
                        sku: None,
                    },
                    CatalogProduct {
                        id: "P2".into(),
                        name: None,
                        sku: Some("ABC".into()),
                    },
                ],
            })
            .unwrap();
        assert_eq!(outcome.family_name.as_deref(), Some("Zapatillas"));
        assert_eq!(outcome.product_with_sku.map(|p| p.id), Some("P2".to_string()));
        assert_eq!(draft.catalog_products.len(), 2);
        assert_eq!(draft.domain_id, "");
    }

    #[test]
    fn category_info_defaults_conditions_and_tracks_catalog() {
        let mut draft = ProductDraft::new();
        draft.category_id = "MLC1".into();
        draft.apply_category_info("MLC1", &CategoryInfo { settings: None });
        assert_eq!(draft.conditions, vec!["new", "used"]);
        assert!(!draft.requires_catalog());

        let info = CategoryInfo {
            settings: Some(CategorySettings {
                catalog_domain_required: true,
                item_conditions: vec!["new".into()],
            }),
        };
        draft.apply_category_info("MLC1", &info);
        draft.apply_category_info("MLC1", &info);
        assert_eq!(draft.catalog_required_categories, vec!["MLC1"]);
        assert_eq!(draft.conditions, vec!["new"]);
        assert!(draft.requires_catalog());
    }

    #[test]
    fn size_guides_collect_distinct_sizes_and_select_first() {
        let mut draft = ProductDraft::new();
        let selected = draft.apply_size_guides(vec![
            guide("G1", &[("r1", "40"), ("r2", "41")]),
            guide("G2", &[("r3", "41"), ("r4", "42")]),
        ]);
        assert_eq!(selected.as_deref(), Some("G1"));
        assert_eq!(draft.guide_label("G1"), "Guía G1");
        let sizes: Vec<_> = draft.available_sizes.iter().map(|s| s.size.as_str()).collect();
        assert_eq!(sizes, vec!["40", "41", "42"]);
        assert_eq!(draft.selected_guide_rows().len(), 2);

        assert_eq!(draft.apply_size_guides(vec![]), None);
        assert!(draft.available_sizes.is_empty());
        assert!(draft.selected_guide.is_empty());
    }

    #[test]
    fn brand_and_gender_trigger_guide_query() {
        let mut draft = ProductDraft::new();
        draft.domain_id = "MLC-SNEAKERS".into();
        assert_eq!(draft.on_attribute_change("BRAND", "Nike"), None);
        assert_eq!(draft.on_attribute_change("COLOR", "Rojo"), None);
        let query = draft.on_attribute_change("GENDER", "Hombre").unwrap();
        assert_eq!(query.brand, "Nike");
        assert_eq!(query.gender, "Hombre");
        assert_eq!(query.params()[0], ("domain_id", "MLC-SNEAKERS".to_string()));
    }

    #[test]
    fn selecting_guide_clears_variation_rows() {
        let mut draft = ProductDraft::new();
        let id = draft.add_variation(1000.0);
        draft.update_variation(id, VariationField::SizeGridRow, "r1");
        draft.select_size_guide("G2");
        assert_eq!(draft.selected_guide, "G2");
        assert!(draft.variations[0].size_grid_row_id.is_empty());
    }

    #[test]
    fn new_variation_uses_first_image_and_form_price() {
        let mut draft = ProductDraft::new();
        draft.add_image("https://img/a.jpg");
        draft.add_image("  ");
        let id = draft.add_variation(15990.0);
        let v = &draft.variations[0];
        assert_eq!(v.available_quantity, 1);
        assert_eq!(v.price, 15990.0);
        assert_eq!(v.pictures, vec!["https://img/a.jpg"]);
        draft.update_variation(id, VariationField::Quantity, "7");
        draft.update_variation(id, VariationField::Price, "abc");
        assert_eq!(draft.variations[0].available_quantity, 7);
        assert_eq!(draft.variations[0].price, 0.0);
        draft.remove_variation(id);
        assert!(draft.variations.is_empty());
        assert_eq!(draft.images.len(), 1);
    }

    #[test]
    fn payload_requires_key_data_then_fields() {
        let (mut draft, mut form) = ready_draft();
        assert_eq!(draft.build_payload("", &form).unwrap_err(), DraftError::MissingKeyData);
        form.description.clear();
        assert_eq!(draft.build_payload("77", &form).unwrap_err(), DraftError::IncompleteFields);
        form.description = "ok".into();
        draft.images.clear();
        assert_eq!(draft.build_payload("77", &form).unwrap_err(), DraftError::IncompleteFields);
    }

    #[test]
    fn simple_payload() {
        let (draft, mut form) = ready_draft();
        form.attributes.insert("BRAND".into(), "Nike".into());
        form.attributes.insert("MODEL".into(), " ".into());
        form.specs.insert("MATERIAL".into(), "Cuero".into());
        let payload = draft.build_payload("77", &form).unwrap();

        assert_eq!(payload.title.as_deref(), Some("Zapatilla Urbana and 42"));
        assert_eq!(payload.family_name, payload.title);
        assert_eq!(payload.price, 29990.0);
        assert_eq!(payload.pictures.len(), 2);
        assert_eq!(payload.shipping.mode, "me2");
        assert_eq!(payload.seller_custom_field, "SKU-1");
        let ids: Vec<_> = payload.attributes.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["BRAND", "MATERIAL"]);
        assert_eq!(payload.sale_terms[0].value_id.as_deref(), Some(WARRANTY_TYPE_SELLER));
        assert_eq!(payload.sale_terms[1].value_name.as_deref(), Some(DEFAULT_WARRANTY_TIME));

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("variations").is_none());
        assert!(json.get("catalog_product_id").is_none());
    }

    #[test]
    fn required_size_grid_blocks_payload() {
        let (mut draft, form) = ready_draft();
        draft.attributes = vec![attribute(SIZE_GRID_ID, true)];
        assert_eq!(draft.build_payload("77", &form).unwrap_err(), DraftError::SizeGuideRequired);
        draft.apply_size_guides(vec![guide("G1", &[("r1", "40")])]);
        let payload = draft.build_payload("77", &form).unwrap();
        assert!(payload
            .attributes
            .contains(&AttributeEntry::new(SIZE_GRID_ID, "G1")));
    }

    #[test]
    fn variations_payload() {
        let (mut draft, mut form) = ready_draft();
        form.attributes.insert("COLOR".into(), "Rojo".into());
        form.attributes.insert("BRAND".into(), "Nike".into());
        draft.has_variations = true;
        draft.apply_size_guides(vec![guide("G1", &[("r1", "40"), ("r2", "41")])]);
        let a = draft.add_variation(25990.0);
        let b = draft.add_variation(22990.0);
        draft.update_variation(a, VariationField::Color, "Negro");
        draft.update_variation(a, VariationField::Size, "40");

        assert_eq!(
            draft.build_payload("77", &form).unwrap_err(),
            DraftError::VariationRowsMissing
        );

        draft.update_variation(a, VariationField::SizeGridRow, "r1");
        draft.update_variation(b, VariationField::SizeGridRow, "r2");
        let payload = draft.build_payload("77", &form).unwrap();

        assert_eq!(payload.price, 22990.0);
        assert_eq!(payload.variations.len(), 2);
        let first = &payload.variations[0];
        assert_eq!(
            first.attribute_combinations,
            vec![AttributeEntry::new("COLOR", "Negro"), AttributeEntry::new("SIZE", "40")]
        );
        assert_eq!(first.attributes, vec![AttributeEntry::new(SIZE_GRID_ROW_ID, "r1")]);
        assert_eq!(first.picture_ids, vec!["https://img/1.jpg"]);
        assert!(payload.variations[1].attribute_combinations.is_empty());
        let ids: Vec<_> = payload.attributes.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["BRAND", SIZE_GRID_ID]);
    }

    #[test]
    fn variations_without_guide_need_one() {
        let (mut draft, form) = ready_draft();
        draft.has_variations = true;
        assert_eq!(draft.build_payload("77", &form).unwrap_err(), DraftError::SizeGuideRequired);
    }

    #[test]
    fn catalog_listing_payload() {
        let (mut draft, form) = ready_draft();
        draft.catalog_required_categories.push("MLC1234".into());
        assert_eq!(
            draft.build_payload("77", &form).unwrap_err(),
            DraftError::CatalogProductRequired
        );

        draft.catalog_products = vec![CatalogProduct {
            id: "MLC-CAT-1".into(),
            name: Some("Zapatilla X".into()),
            sku: None,
        }];
        let payload = draft.build_payload("77", &form).unwrap();
        assert_eq!(payload.catalog_product_id.as_deref(), Some("MLC-CAT-1"));
        assert_eq!(payload.catalog_listing, Some(true));
        assert!(payload.title.is_none());
        assert!(payload.description.is_none());
        assert!(payload.family_name.is_none());
    }

    #[test]
    fn rejection_messages() {
        let body = r#"{"message":"error","ml_error":{"cause":[
            {"message":"Title is too long"},{"message":"Invalid price"}]}}"#;
        assert_eq!(
            rejection_from_body(body).to_string(),
            "Mercado Libre rechazó el producto:\n• Title is too long\n• Invalid price"
        );
        assert_eq!(
            rejection_from_body(r#"{"message":"Token inválido"}"#).to_string(),
            "Token inválido"
        );
        assert_eq!(rejection_from_body("<html>").to_string(), UPLOAD_FAILED_MESSAGE);
    }

    #[test]
    fn existing_product_match_and_sku() {
        let products = vec![
            ListedProduct {
                id: "MLC1".into(),
                title: "Mochila Escolar Azul".into(),
                sku: Some("MOCH-1".into()),
                pictures: vec![],
            },
            ListedProduct {
                id: "MLC2".into(),
                title: "Polera Roja".into(),
                sku: None,
                pictures: vec![],
            },
        ];
        assert_eq!(match_existing_product(&products, "escolar").map(|p| p.id.as_str()), Some("MLC1"));
        assert_eq!(match_existing_product(&products, "POLERA").map(|p| p.id.as_str()), Some("MLC2"));
        assert!(match_existing_product(&products, "").is_none());
        assert_eq!(generated_sku(1_234_567), "SKU-234567");
    }

    #[test]
    fn keep_title_resets_other_fields() {
        let (_, form) = ready_draft();
        let fresh = form.keep_title();
        assert_eq!(fresh.title, form.title);
        assert_eq!(fresh.price, 0.0);
        assert_eq!(fresh.currency_id, "CLP");
    }
}
