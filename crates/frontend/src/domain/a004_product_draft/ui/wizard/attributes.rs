use super::view_model::ProductWizardViewModel;
use contracts::domain::a004_product_draft::{CategoryAttribute, SIZE_GRID_ID};
use leptos::prelude::*;

/// One attribute: a select over its known values, free text otherwise.
#[component]
fn AttributeInput(
    attribute: CategoryAttribute,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
) -> impl IntoView {
    let label = if attribute.is_required() {
        format!("{} *", attribute.name)
    } else {
        attribute.name.clone()
    };

    let input = if attribute.values.is_empty() {
        view! {
            <input
                class="form__input"
                type="text"
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            />
        }
        .into_any()
    } else {
        view! {
            <select
                class="form__select"
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                <option value="">"Selecciona..."</option>
                {attribute.values.iter().map(|v| {
                    let name = v.name.clone();
                    view! { <option value=name.clone()>{name.clone()}</option> }
                }).collect_view()}
            </select>
        }
        .into_any()
    };

    view! {
        <div class="form__group">
            <label class="form__label">{label}</label>
            {input}
        </div>
    }
}

/// Category attributes. SIZE_GRID_ID is handled by the size guide selector.
#[component]
pub fn AttributeFields(vm: ProductWizardViewModel) -> impl IntoView {
    let attributes = Memo::new(move |_| {
        vm.draft.with(|d| {
            d.attributes
                .iter()
                .filter(|a| a.id != SIZE_GRID_ID)
                .cloned()
                .collect::<Vec<_>>()
        })
    });

    view! {
        <Show when=move || !attributes.get().is_empty()>
            <h3 class="wizard__section-title">"Atributos"</h3>
            <div class="form-grid">
                <For
                    each=move || attributes.get()
                    key=|a| a.id.clone()
                    children=move |attribute: CategoryAttribute| {
                        let id = attribute.id.clone();
                        let id_value = id.clone();
                        view! {
                            <AttributeInput
                                attribute=attribute
                                value=Signal::derive(move || {
                                    vm.attributes.with(|a| a.get(&id_value).cloned().unwrap_or_default())
                                })
                                on_change=Callback::new(move |value: String| vm.set_attribute(id.clone(), value))
                            />
                        }
                    }
                />
            </div>
        </Show>
    }
}

/// Technical specs of the predicted domain.
#[component]
pub fn SpecFields(vm: ProductWizardViewModel) -> impl IntoView {
    let specs = Memo::new(move |_| vm.draft.with(|d| d.specs.clone()));

    view! {
        <Show when=move || !specs.get().is_empty()>
            <h3 class="wizard__section-title">"Especificaciones"</h3>
            <div class="form-grid">
                <For
                    each=move || specs.get()
                    key=|s| s.id.clone()
                    children=move |spec: CategoryAttribute| {
                        let id = spec.id.clone();
                        let id_value = id.clone();
                        view! {
                            <AttributeInput
                                attribute=spec
                                value=Signal::derive(move || {
                                    vm.specs.with(|s| s.get(&id_value).cloned().unwrap_or_default())
                                })
                                on_change=Callback::new(move |value: String| vm.set_spec(id.clone(), value))
                            />
                        }
                    }
                />
            </div>
        </Show>
    }
}

/// Guides found for domain, brand and gender, or the static grids of the attribute.
#[component]
pub fn SizeGuideSelector(vm: ProductWizardViewModel) -> impl IntoView {
    let options = Memo::new(move |_| {
        vm.draft.with(|d| {
            if d.size_guides.is_empty() {
                d.static_size_grids()
                    .into_iter()
                    .map(|v| (v.id, v.name))
                    .collect::<Vec<_>>()
            } else {
                d.size_guides
                    .iter()
                    .map(|g| (g.id.clone(), d.guide_label(&g.id)))
                    .collect()
            }
        })
    });
    let required = move || vm.draft.with(|d| d.size_grid_required() || d.has_variations);

    view! {
        <Show when=move || !options.get().is_empty() || required()>
            <div class="form__group">
                <label class="form__label">
                    {move || if required() { "Guía de tallas *" } else { "Guía de tallas" }}
                </label>
                <select
                    class="form__select"
                    prop:value=move || vm.size_grid_id.get()
                    on:change=move |ev| vm.select_size_guide(event_target_value(&ev))
                >
                    <option value="">"Selecciona una guía"</option>
                    {move || options.get().into_iter().map(|(id, label)| view! {
                        <option value=id>{label}</option>
                    }).collect_view()}
                </select>
                <Show when=move || options.get().is_empty()>
                    <span class="form__hint">"Indica marca y género para buscar guías de tallas."</span>
                </Show>
            </div>
        </Show>
    }
}
