use crate::domain::a004_product_draft::api;
use crate::shared::list_utils::{begin_request, is_current_request, RequestSeq};
use crate::shared::toast::ToastService;
use contracts::domain::a004_product_draft::{
    generated_sku, match_existing_product, validate_title, CategoryInfo, DraftError, DraftForm,
    ProductDraft, SizeGuideQuery, UPLOAD_FAILED_MESSAGE, UPLOAD_SUCCESS_MESSAGE,
};
use contracts::shared::api::ApiError;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::BTreeMap;

pub fn condition_label(condition: &str) -> &str {
    match condition {
        "new" => "Nuevo",
        "used" => "Usado",
        "not_specified" => "No especificado",
        other => other,
    }
}

/// Number inputs report a dot decimal.
pub fn parse_amount(value: &str) -> f64 {
    value.trim().parse::<f64>().unwrap_or(0.0)
}

pub fn parse_quantity(value: &str) -> u32 {
    value.trim().parse().unwrap_or(0)
}

fn random_seed() -> u32 {
    (js_sys::Math::random() * 1_000_000.0) as u32
}

/// Form fields and wizard state of the product creation tab.
#[derive(Clone, Copy)]
pub struct ProductWizardViewModel {
    pub client_id: RwSignal<String>,
    pub draft: RwSignal<ProductDraft>,
    pub title: RwSignal<String>,
    pub condition: RwSignal<String>,
    pub price: RwSignal<String>,
    pub quantity: RwSignal<String>,
    pub listing_type_id: RwSignal<String>,
    pub description: RwSignal<String>,
    pub family_name: RwSignal<String>,
    pub sku: RwSignal<String>,
    pub warranty_time: RwSignal<String>,
    pub local_pick_up: RwSignal<bool>,
    pub free_shipping: RwSignal<bool>,
    pub attributes: RwSignal<BTreeMap<String, String>>,
    pub specs: RwSignal<BTreeMap<String, String>>,
    pub size_grid_id: RwSignal<String>,
    pub catalog_product_id: RwSignal<String>,
    pub error: RwSignal<Option<String>>,
    /// Label of the request in flight while the category loads.
    pub step: RwSignal<Option<&'static str>>,
    pub submitting: RwSignal<bool>,
    seq: StoredValue<RequestSeq>,
    /// Size guide lookups; a title change or a newer BRAND/GENDER query makes older ones stale.
    guides_seq: StoredValue<RequestSeq>,
}

impl ProductWizardViewModel {
    pub fn new(client_id: String) -> Self {
        let defaults = DraftForm::default();
        Self {
            client_id: RwSignal::new(client_id),
            draft: RwSignal::new(ProductDraft::new()),
            title: RwSignal::new(String::new()),
            condition: RwSignal::new(String::new()),
            price: RwSignal::new(String::new()),
            quantity: RwSignal::new(String::new()),
            listing_type_id: RwSignal::new(defaults.listing_type_id),
            description: RwSignal::new(String::new()),
            family_name: RwSignal::new(String::new()),
            sku: RwSignal::new(String::new()),
            warranty_time: RwSignal::new(String::new()),
            local_pick_up: RwSignal::new(false),
            free_shipping: RwSignal::new(false),
            attributes: RwSignal::new(BTreeMap::new()),
            specs: RwSignal::new(BTreeMap::new()),
            size_grid_id: RwSignal::new(String::new()),
            catalog_product_id: RwSignal::new(String::new()),
            error: RwSignal::new(None),
            step: RwSignal::new(None),
            submitting: RwSignal::new(false),
            seq: StoredValue::new(RequestSeq::default()),
            guides_seq: StoredValue::new(RequestSeq::default()),
        }
    }

    pub fn to_form(&self) -> DraftForm {
        DraftForm {
            title: self.title.get_untracked(),
            condition: self.condition.get_untracked(),
            price: parse_amount(&self.price.get_untracked()),
            quantity: parse_quantity(&self.quantity.get_untracked()),
            listing_type_id: self.listing_type_id.get_untracked(),
            description: self.description.get_untracked(),
            family_name: self.family_name.get_untracked(),
            sku: self.sku.get_untracked(),
            warranty_time: self.warranty_time.get_untracked(),
            local_pick_up: self.local_pick_up.get_untracked(),
            free_shipping: self.free_shipping.get_untracked(),
            attributes: self.attributes.get_untracked(),
            specs: self.specs.get_untracked(),
            size_grid_id: self.size_grid_id.get_untracked(),
            catalog_product_id: self.catalog_product_id.get_untracked(),
            ..DraftForm::default()
        }
    }

    /// Back to defaults; the typed title survives when `keep_title` is set.
    pub fn reset_fields(&self, keep_title: bool) {
        let defaults = DraftForm::default();
        if !keep_title {
            self.title.set(String::new());
        }
        self.condition.set(String::new());
        self.price.set(String::new());
        self.quantity.set(String::new());
        self.listing_type_id.set(defaults.listing_type_id);
        self.description.set(String::new());
        self.family_name.set(String::new());
        self.sku.set(String::new());
        self.warranty_time.set(String::new());
        self.local_pick_up.set(false);
        self.free_shipping.set(false);
        self.attributes.set(BTreeMap::new());
        self.specs.set(BTreeMap::new());
        self.size_grid_id.set(String::new());
        self.catalog_product_id.set(String::new());
        self.error.set(None);
    }

    fn next_seq(&self) -> u64 {
        begin_request(self.seq)
    }

    fn is_current(&self, seq: u64) -> bool {
        is_current_request(self.seq, seq)
    }

    /// Runs once the title stops changing: reset, predict, then load the category.
    pub fn on_title_settled(&self, raw_title: String) {
        let (title, _) = validate_title(&raw_title);
        if title.is_empty() {
            return;
        }
        let client_id = self.client_id.get_untracked();
        if client_id.is_empty() {
            self.error.set(Some(
                "Selecciona una conexión antes de crear un producto.".to_string(),
            ));
            return;
        }

        self.reset_fields(true);
        self.draft.update(ProductDraft::reset);
        self.guides_seq.update_value(RequestSeq::invalidate);
        let seq = self.next_seq();
        let vm = *self;
        spawn_local(async move {
            if let Err(message) = vm.prepare(&client_id, &title, seq).await {
                if vm.is_current(seq) {
                    vm.error.set(Some(message));
                }
            }
            if vm.is_current(seq) {
                vm.step.set(None);
            }
        });
    }

    async fn prepare(self, client_id: &str, title: &str, seq: u64) -> Result<(), String> {
        self.step.set(Some("Prediciendo categoría..."));
        let prediction = api::predict_category(client_id, title)
            .await
            .map_err(|e| e.user_message(&DraftError::CategoryNotPredicted.to_string()))?;
        if !self.is_current(seq) {
            return Ok(());
        }

        let mut draft = self.draft.get_untracked();
        let outcome = draft.apply_prediction(prediction).map_err(|e| e.to_string())?;
        let category_id = draft.category_id.clone();
        let domain_id = draft.domain_id.clone();
        self.draft.set(draft);
        if let Some(family) = outcome.family_name {
            self.family_name.set(family);
        }
        if let Some(sku) = outcome.product_with_sku.and_then(|p| p.sku) {
            self.sku.set(sku);
        }

        self.step.set(Some("Cargando categoría..."));
        let info = api::fetch_category_info(client_id, &category_id)
            .await
            .unwrap_or_else(|e| {
                log::warn!("category info {}: {}", category_id, e);
                CategoryInfo::default()
            });
        if !self.is_current(seq) {
            return Ok(());
        }
        self.draft
            .update(|d| d.apply_category_info(&category_id, &info));

        if !domain_id.is_empty() {
            match api::fetch_domain_specs(client_id, &domain_id).await {
                Ok(specs) if self.is_current(seq) => self.draft.update(|d| d.set_specs(specs)),
                Ok(_) => return Ok(()),
                Err(e) => log::warn!("specs {}: {}", domain_id, e),
            }
        }

        self.step.set(Some("Cargando atributos..."));
        let attributes = api::fetch_attributes(client_id, &category_id)
            .await
            .map_err(|e| e.user_message("Error al cargar los atributos de la categoría."))?;
        if !self.is_current(seq) {
            return Ok(());
        }
        self.draft.update(|d| d.set_attributes(attributes));

        self.step.set(Some("Buscando productos publicados..."));
        match api::fetch_listed_products(client_id).await {
            Ok(products) if self.is_current(seq) => {
                if let Some(existing) = match_existing_product(&products, title) {
                    let sku = match existing.existing_sku() {
                        Some(sku) => sku.to_string(),
                        None => {
                            let sku = generated_sku(random_seed());
                            if let Err(e) = api::update_sku(client_id, &existing.id, &sku).await {
                                log::warn!("sku for {}: {}", existing.id, e);
                            }
                            sku
                        }
                    };
                    self.sku.set(sku);
                    let pictures = existing.picture_urls();
                    if !pictures.is_empty() {
                        self.draft.update(|d| d.set_images(pictures));
                    }
                }
            }
            Ok(_) => {}
            Err(e) => log::warn!("listed products: {}", e),
        }
        Ok(())
    }

    /// Stores an attribute value; BRAND and GENDER may trigger a size guide lookup.
    pub fn set_attribute(&self, attribute_id: String, value: String) {
        self.attributes.update(|a| {
            a.insert(attribute_id.clone(), value.clone());
        });
        let query = self
            .draft
            .try_update(|d| d.on_attribute_change(&attribute_id, &value))
            .flatten();
        if let Some(query) = query {
            self.load_size_guides(query);
        }
    }

    pub fn set_spec(&self, spec_id: String, value: String) {
        self.specs.update(|s| {
            s.insert(spec_id, value);
        });
    }

    fn load_size_guides(&self, query: SizeGuideQuery) {
        let client_id = self.client_id.get_untracked();
        let ticket = begin_request(self.guides_seq);
        let vm = *self;
        spawn_local(async move {
            let result = api::fetch_size_guides(&client_id, &query).await;
            if !is_current_request(vm.guides_seq, ticket) {
                log::info!("dropping stale size guides for {:?}", query);
                return;
            }
            match result {
                Ok(guides) => {
                    let selected = vm
                        .draft
                        .try_update(|d| d.apply_size_guides(guides))
                        .flatten();
                    vm.size_grid_id.set(selected.unwrap_or_default());
                }
                Err(ApiError::Status { code: 404, .. }) => {
                    log::info!("no size guides for {:?}", query);
                    vm.draft.update(|d| d.clear_size_guides());
                }
                Err(e) => {
                    log::warn!("size guides: {}", e);
                    vm.draft.update(|d| d.clear_size_guides());
                }
            }
        });
    }

    pub fn select_size_guide(&self, guide_id: String) {
        self.draft.update(|d| d.select_size_guide(&guide_id));
        self.size_grid_id.set(guide_id);
    }

    pub fn submit(&self, toasts: ToastService) {
        let client_id = self.client_id.get_untracked();
        let form = self.to_form();
        let payload = match self
            .draft
            .with_untracked(|d| d.build_payload(&client_id, &form))
        {
            Ok(payload) => payload,
            Err(e) => {
                self.error.set(Some(e.to_string()));
                toasts.error(e.to_string());
                return;
            }
        };

        self.error.set(None);
        self.submitting.set(true);
        let vm = *self;
        spawn_local(async move {
            match api::create_item(&client_id, &payload).await {
                Ok(()) => {
                    toasts.success(UPLOAD_SUCCESS_MESSAGE);
                    vm.draft.update(ProductDraft::reset);
                    vm.guides_seq.update_value(RequestSeq::invalidate);
                    vm.reset_fields(false);
                }
                Err(e) => {
                    vm.error.set(Some(e.to_string()));
                    toasts.error(UPLOAD_FAILED_MESSAGE);
                }
            }
            vm.submitting.set(false);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_read_the_dot_as_decimal_separator() {
        assert_eq!(parse_amount("19.99"), 19.99);
        assert_eq!(parse_amount(" 1.5 "), 1.5);
        assert_eq!(parse_amount("29990"), 29990.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
    }

    #[test]
    fn quantities_default_to_zero() {
        assert_eq!(parse_quantity(" 4 "), 4);
        assert_eq!(parse_quantity("-1"), 0);
        assert_eq!(parse_quantity("abc"), 0);
    }

    #[test]
    fn conditions_have_spanish_labels() {
        assert_eq!(condition_label("new"), "Nuevo");
        assert_eq!(condition_label("used"), "Usado");
        assert_eq!(condition_label("refurbished"), "refurbished");
    }
}
