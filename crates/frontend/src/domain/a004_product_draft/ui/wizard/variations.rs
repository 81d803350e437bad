use super::view_model::{parse_amount, ProductWizardViewModel};
use crate::shared::icons::icon;
use contracts::domain::a004_product_draft::{Variation, VariationField};
use leptos::prelude::*;
use thaw::*;
use uuid::Uuid;

fn field_input(
    vm: ProductWizardViewModel,
    id: Uuid,
    field: VariationField,
    initial: String,
    input_type: &'static str,
) -> impl IntoView {
    view! {
        <input
            class="form__input"
            type=input_type
            value=initial
            on:change=move |ev| {
                let value = event_target_value(&ev);
                vm.draft.update(|d| d.update_variation(id, field, &value));
            }
        />
    }
}

#[component]
pub fn VariationsEditor(vm: ProductWizardViewModel) -> impl IntoView {
    let enabled = RwSignal::new(vm.draft.with_untracked(|d| d.has_variations));
    Effect::new(move |_| {
        let on = enabled.get();
        vm.draft.update(|d| d.has_variations = on);
    });

    let variations = Memo::new(move |_| vm.draft.with(|d| d.variations.clone()));
    let rows = Memo::new(move |_| vm.draft.with(|d| d.selected_guide_rows()));
    let sizes = Memo::new(move |_| vm.draft.with(|d| d.available_sizes.clone()));

    let add = move |_| {
        let price = parse_amount(&vm.price.get_untracked());
        vm.draft.update(|d| {
            d.add_variation(price);
        });
    };

    view! {
        <h3 class="wizard__section-title">"Variaciones"</h3>
        <Checkbox checked=enabled label="El producto tiene variaciones" />
        <Show when=move || enabled.get()>
            <table class="table__data">
                <thead>
                    <tr>
                        <th>"Color"</th>
                        <th>"Talla"</th>
                        <th>"Diseño de tela"</th>
                        <th>"Precio"</th>
                        <th>"Cantidad"</th>
                        <th>"SKU"</th>
                        <th>"Fila de guía"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || variations.get()
                        key=|v| v.id
                        children=move |v: Variation| {
                            let id = v.id;
                            view! {
                                <tr>
                                    <td>{field_input(vm, id, VariationField::Color, v.color.clone(), "text")}</td>
                                    <td>
                                        <select
                                            class="form__select"
                                            prop:value=v.size.clone()
                                            on:change=move |ev| {
                                                let value = event_target_value(&ev);
                                                vm.draft.update(|d| d.update_variation(id, VariationField::Size, &value));
                                            }
                                        >
                                            <option value="">"-"</option>
                                            {move || sizes.get().into_iter().map(|s| view! {
                                                <option value=s.size.clone()>{s.name}</option>
                                            }).collect_view()}
                                        </select>
                                    </td>
                                    <td>{field_input(vm, id, VariationField::FabricDesign, v.fabric_design.clone(), "text")}</td>
                                    <td>{field_input(vm, id, VariationField::Price, v.price.to_string(), "number")}</td>
                                    <td>{field_input(vm, id, VariationField::Quantity, v.available_quantity.to_string(), "number")}</td>
                                    <td>{field_input(vm, id, VariationField::Sku, v.seller_sku.clone(), "text")}</td>
                                    <td>
                                        <select
                                            class="form__select"
                                            prop:value=move || {
                                                vm.draft.with(|d| {
                                                    d.variations
                                                        .iter()
                                                        .find(|x| x.id == id)
                                                        .map(|x| x.size_grid_row_id.clone())
                                                        .unwrap_or_default()
                                                })
                                            }
                                            on:change=move |ev| {
                                                let value = event_target_value(&ev);
                                                vm.draft.update(|d| d.update_variation(id, VariationField::SizeGridRow, &value));
                                            }
                                        >
                                            <option value="">"Selecciona fila"</option>
                                            {move || rows.get().into_iter().map(|r| view! {
                                                <option value=r.id.clone()>{r.size}</option>
                                            }).collect_view()}
                                        </select>
                                    </td>
                                    <td>
                                        <button
                                            class="button button--icon"
                                            title="Eliminar"
                                            on:click=move |_| vm.draft.update(|d| d.remove_variation(id))
                                        >
                                            {icon("trash")}
                                        </button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            <Button appearance=ButtonAppearance::Secondary on_click=add>
                {icon("plus")}
                " Agregar variación"
            </Button>
        </Show>
    }
}
