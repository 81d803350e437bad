mod attributes;
mod images;
mod variations;
pub mod view_model;

use self::attributes::{AttributeFields, SizeGuideSelector, SpecFields};
use self::images::ImageList;
use self::variations::VariationsEditor;
use self::view_model::{condition_label, ProductWizardViewModel};
use crate::domain::a001_connection::ui::picker::ConnectionPicker;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::ErrorBanner;
use crate::shared::icons::icon;
use crate::shared::list_utils::Debouncer;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_USECASE;
use crate::shared::toast::use_toasts;
use contracts::domain::a004_product_draft::{validate_title, TITLE_DEBOUNCE_MS, TITLE_MAX_LEN};
use leptos::prelude::*;
use thaw::*;

const LISTING_TYPES: [(&str, &str); 2] = [("gold_special", "Clásica"), ("gold_pro", "Premium")];

#[component]
#[allow(non_snake_case)]
pub fn ProductWizard() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let toasts = use_toasts();
    let vm = ProductWizardViewModel::new(ctx.selected_client_id().unwrap_or_default());
    let debouncer = Debouncer::new(TITLE_DEBOUNCE_MS);

    let title_truncated = Memo::new(move |_| validate_title(&vm.title.get()).1);

    let on_title_input = move |value: String| {
        vm.title.set(value.clone());
        debouncer.call(move || vm.on_title_settled(value));
    };

    let on_connection = Callback::new(move |_: String| {
        debouncer.cancel();
        vm.draft.update(|d| d.reset());
        vm.reset_fields(true);
    });

    let catalog_required = move || vm.draft.with(|d| d.requires_catalog());
    let has_category = move || vm.draft.with(|d| !d.category_id.is_empty());

    view! {
        <PageFrame page_id="a004_product_draft--wizard" category=PAGE_CAT_USECASE>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Crear Producto"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| vm.submit(toasts)
                        disabled=Signal::derive(move || vm.submitting.get() || !has_category())
                    >
                        {icon("check")}
                        {move || if vm.submitting.get() { " Publicando..." } else { " Publicar" }}
                    </Button>
                </div>
            </div>

            <div class="page__content wizard">
                <ErrorBanner message=vm.error />

                <Flex vertical=true gap=FlexGap::Medium>
                    <ConnectionPicker value=vm.client_id on_change=on_connection />

                    <div class="form__group">
                        <label class="form__label">"Título *"</label>
                        <input
                            class="form__input"
                            type="text"
                            maxlength=TITLE_MAX_LEN.to_string()
                            placeholder="Ej: Zapatilla urbana de cuero"
                            prop:value=move || vm.title.get()
                            on:input=move |ev| on_title_input(event_target_value(&ev))
                        />
                        <Show when=move || title_truncated.get()>
                            <span class="form__hint">
                                {format!("El título se recortará a {} caracteres.", TITLE_MAX_LEN)}
                            </span>
                        </Show>
                        {move || vm.step.get().map(|step| view! {
                            <Flex gap=FlexGap::Small>
                                <Spinner size=SpinnerSize::Small />
                                <span class="form__hint">{step}</span>
                            </Flex>
                        })}
                    </div>

                    <Show when=has_category>
                        <div class="wizard__category">
                            {move || vm.draft.with(|d| format!("Categoría: {} {}", d.category_id, d.domain_id))}
                        </div>

                        <div class="form-grid">
                            <div class="form__group">
                                <label class="form__label">"Condición *"</label>
                                <select
                                    class="form__select"
                                    prop:value=move || vm.condition.get()
                                    on:change=move |ev| vm.condition.set(event_target_value(&ev))
                                >
                                    <option value="">"Selecciona..."</option>
                                    {move || vm.draft.with(|d| d.conditions.clone()).into_iter().map(|c| {
                                        let label = condition_label(&c).to_string();
                                        view! { <option value=c>{label}</option> }
                                    }).collect_view()}
                                </select>
                            </div>
                            <div class="form__group">
                                <label class="form__label">"Precio *"</label>
                                <Input value=vm.price input_type=InputType::Number placeholder="29990" />
                            </div>
                            <div class="form__group">
                                <label class="form__label">"Cantidad *"</label>
                                <Input value=vm.quantity input_type=InputType::Number placeholder="1" />
                            </div>
                            <div class="form__group">
                                <label class="form__label">"Tipo de publicación"</label>
                                <Select value=vm.listing_type_id>
                                    {LISTING_TYPES.iter().map(|(value, label)| view! {
                                        <option value=*value>{*label}</option>
                                    }).collect_view()}
                                </Select>
                            </div>
                            <div class="form__group">
                                <label class="form__label">"SKU"</label>
                                <Input value=vm.sku />
                            </div>
                            <div class="form__group">
                                <label class="form__label">"Nombre de familia"</label>
                                <Input value=vm.family_name placeholder="Se usa el título si queda vacío" />
                            </div>
                            <div class="form__group">
                                <label class="form__label">"Garantía"</label>
                                <Input value=vm.warranty_time placeholder="90 días" />
                            </div>
                        </div>

                        <div class="form__group">
                            <label class="form__label">"Descripción *"</label>
                            <Textarea value=vm.description attr:rows=5 />
                        </div>

                        <Flex gap=FlexGap::Medium>
                            <Checkbox checked=vm.local_pick_up label="Retiro en persona" />
                            <Checkbox checked=vm.free_shipping label="Envío gratis" />
                        </Flex>

                        <Show when=catalog_required>
                            <div class="form__group">
                                <label class="form__label">"Producto de catálogo *"</label>
                                <select
                                    class="form__select"
                                    prop:value=move || vm.catalog_product_id.get()
                                    on:change=move |ev| vm.catalog_product_id.set(event_target_value(&ev))
                                >
                                    <option value="">"Selecciona un producto"</option>
                                    {move || vm.draft.with(|d| d.catalog_products.clone()).into_iter().map(|p| {
                                        let label = p.name.clone().unwrap_or_else(|| p.id.clone());
                                        view! { <option value=p.id>{label}</option> }
                                    }).collect_view()}
                                </select>
                            </div>
                        </Show>

                        <AttributeFields vm=vm />
                        <SpecFields vm=vm />
                        <SizeGuideSelector vm=vm />
                        <VariationsEditor vm=vm />
                        <ImageList vm=vm />
                    </Show>
                </Flex>
            </div>
        </PageFrame>
    }
}
