pub mod state;

use self::state::create_state;
use crate::domain::a001_connection::ui::picker::ConnectionPicker;
use crate::domain::a003_product::api::{fetch_category_names, fetch_products, update_item};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::modal_service::{Modal, ModalService};
use crate::layout::tabs::keys;
use crate::shared::components::{ErrorBanner, NoConnectionNotice};
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::toast::use_toasts;
use contracts::domain::a003_product::{
    categorize_products, distinct_category_ids, ItemUpdate, Product, ProductStatus,
};
use contracts::shared::format::{format_clp, format_thousands};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

const DETAIL_MODAL: &str = "a003_product_detail";

fn status_color(status: &ProductStatus) -> BadgeColor {
    match status {
        ProductStatus::Active => BadgeColor::Success,
        ProductStatus::Paused => BadgeColor::Warning,
        ProductStatus::UnderReview | ProductStatus::PaymentRequired => BadgeColor::Informative,
        ProductStatus::Closed | ProductStatus::Deleted => BadgeColor::Danger,
        _ => BadgeColor::Subtle,
    }
}

fn toggle_label(status: &ProductStatus) -> &'static str {
    if *status == ProductStatus::Active {
        "Pausar"
    } else {
        "Activar"
    }
}

#[component]
#[allow(non_snake_case)]
pub fn ProductList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let modal = use_context::<ModalService>().expect("ModalService not found in context");
    let toasts = use_toasts();

    let state = create_state();
    let client_id = RwSignal::new(ctx.selected_client_id().unwrap_or_default());
    let stock_input = RwSignal::new(String::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let load = move || {
        let cid = client_id.get_untracked();
        if cid.is_empty() {
            state.update(|s| s.items.clear());
            return;
        }
        let query = state.with_untracked(|s| s.query.clone());
        let seq = state.with_untracked(|s| s.request_seq) + 1;
        state.update(|s| s.request_seq = seq);
        set_loading.set(true);

        spawn_local(async move {
            let result = fetch_products(&cid, &query).await;
            if state.with_untracked(|s| s.request_seq) != seq {
                return;
            }
            match result {
                Ok(page) => {
                    let missing: Vec<String> = state.with_untracked(|s| {
                        distinct_category_ids(&page.data)
                            .into_iter()
                            .filter(|id| !s.category_names.contains_key(id))
                            .collect()
                    });
                    state.update(|s| {
                        s.items = page.data;
                        s.pagination = page.pagination;
                    });
                    set_error.set(None);
                    set_loading.set(false);

                    if !missing.is_empty() {
                        let names = fetch_category_names(missing).await;
                        state.update(|s| s.category_names.extend(names));
                    }
                }
                Err(e) => {
                    log::error!("products for {}: {}", cid, e);
                    state.update(|s| s.items.clear());
                    set_error.set(Some(e.user_message("Error al cargar los productos.")));
                    set_loading.set(false);
                }
            }
        });
    };
    load();

    let on_search = Callback::new(move |q: String| {
        state.update(|s| {
            s.query.query = q;
            s.query.offset = 0;
        });
        load();
    });

    let on_connection = Callback::new(move |_: String| {
        state.update(|s| {
            s.query.offset = 0;
            s.query.category.clear();
            s.category_names.clear();
        });
        load();
    });

    let go_to_offset = move |offset: u64| {
        state.update(|s| s.query.offset = offset);
        load();
    };

    let apply = move |item_id: String, update: ItemUpdate| {
        let cid = client_id.get_untracked();
        spawn_local(async move {
            match update_item(&cid, &item_id, &update).await {
                Ok(()) => {
                    state.update(|s| {
                        s.apply_update(&item_id, &update);
                        s.editing_stock = None;
                    });
                    toasts.success(update.success_message());
                }
                Err(e) => {
                    log::error!("item update {}: {}", item_id, e);
                    toasts.error(e.user_message("Error al actualizar la publicación."));
                }
            }
        });
    };

    let save_stock = move |item_id: String| match stock_input.get_untracked().trim().parse::<u32>() {
        Ok(quantity) => apply(item_id, ItemUpdate::Stock(quantity)),
        Err(_) => toasts.warning("Ingresa una cantidad válida."),
    };

    let start_edit = move |product: &Product| {
        stock_input.set(product.available_quantity.max(0).to_string());
        let id = product.id.clone();
        state.update(|s| s.editing_stock = Some(id));
    };

    let show_detail = move |product: Product| {
        state.update(|s| s.detail = Some(product));
        modal.show(DETAIL_MODAL);
    };

    let groups = Memo::new(move |_| state.with(|s| categorize_products(&s.items)));
    let window = Memo::new(move |_| state.with(|s| s.window()));

    let product_row = move |product: Product| {
        let id = product.id.clone();
        let id_editing = id.clone();
        let id_save = id.clone();
        let id_toggle = id.clone();
        let status = product.status.clone();
        let status_label = status.label().to_string();
        let status_badge_color = status_color(&status);
        let for_edit = product.clone();
        let for_detail = product.clone();
        let is_editing = move || state.with(|s| s.editing_stock.as_deref() == Some(id_editing.as_str()));

        view! {
            <TableRow>
                <TableCell>
                    <TableCellLayout>
                        {product.thumbnail.clone().map(|src| view! {
                            <img class="product-thumb" src=src alt="" />
                        })}
                    </TableCellLayout>
                </TableCell>
                <TableCell>
                    <TableCellLayout truncate=true>
                        <div class="product-title">{product.title.clone()}</div>
                        <div class="product-meta">{id.clone()}</div>
                    </TableCellLayout>
                </TableCell>
                <TableCell>
                    <TableCellLayout>{format_clp(product.price)}</TableCellLayout>
                </TableCell>
                <TableCell>
                    <TableCellLayout>
                        <Show
                            when=is_editing
                            fallback={
                                let quantity = product.available_quantity;
                                move || view! { <span>{format_thousands(quantity)}</span> }
                            }
                        >
                            {
                                let id_save = id_save.clone();
                                view! {
                                    <Flex gap=FlexGap::Small>
                                        <Input value=stock_input input_type=InputType::Number />
                                        <Button
                                            size=ButtonSize::Small
                                            appearance=ButtonAppearance::Primary
                                            on_click={
                                                let id = id_save.clone();
                                                move |_| save_stock(id.clone())
                                            }
                                        >
                                            {icon("check")}
                                        </Button>
                                        <Button
                                            size=ButtonSize::Small
                                            on_click=move |_| state.update(|s| s.editing_stock = None)
                                        >
                                            {icon("x")}
                                        </Button>
                                    </Flex>
                                }
                            }
                        </Show>
                    </TableCellLayout>
                </TableCell>
                <TableCell>
                    <TableCellLayout>
                        <Badge appearance=BadgeAppearance::Tint color=status_badge_color>
                            {status_label}
                        </Badge>
                    </TableCellLayout>
                </TableCell>
                <TableCell>
                    <TableCellLayout>
                        <Flex gap=FlexGap::Small>
                            <Button
                                size=ButtonSize::Small
                                on_click={
                                    let status = status.clone();
                                    move |_| apply(id_toggle.clone(), ItemUpdate::toggle_status(&status))
                                }
                            >
                                {if status == ProductStatus::Active { icon("pause") } else { icon("play") }}
                                {format!(" {}", toggle_label(&status))}
                            </Button>
                            <Button size=ButtonSize::Small on_click=move |_| start_edit(&for_edit)>
                                {icon("edit")}
                            </Button>
                            <Button size=ButtonSize::Small on_click=move |_| show_detail(for_detail.clone())>
                                {icon("eye")}
                            </Button>
                        </Flex>
                    </TableCellLayout>
                </TableCell>
            </TableRow>
        }
    };

    let detail_title = Signal::derive(move || {
        state.with(|s| {
            s.detail
                .as_ref()
                .map(|p| p.title.clone())
                .unwrap_or_default()
        })
    });

    view! {
        <PageFrame page_id="a003_product--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Productos"</h1>
                    <Badge appearance=BadgeAppearance::Tint>
                        {move || state.with(|s| s.pagination.total.to_string())}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| ctx.open_registered(keys::PRODUCT_WIZARD)
                    >
                        {icon("plus")}
                        " Crear Producto"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| load() disabled=loading>
                        {icon("refresh")}
                    </Button>
                </div>
            </div>

            <div class="filter-panel">
                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <ConnectionPicker value=client_id on_change=on_connection />
                    <SearchInput
                        value=Signal::derive(move || state.with(|s| s.query.query.clone()))
                        on_change=on_search
                        placeholder="Buscar por título o código"
                        delay_ms=500
                    />
                    <div class="form__group">
                        <label class="form__label">"Categoría"</label>
                        <select
                            class="form__select"
                            prop:value=move || state.with(|s| s.query.category.clone())
                            on:change=move |ev| {
                                let category = event_target_value(&ev);
                                state.update(|s| {
                                    s.query.category = category;
                                    s.query.offset = 0;
                                });
                                load();
                            }
                        >
                            <option value="">"Todas"</option>
                            {move || state.with(|s| {
                                let mut names: Vec<(String, String)> = s
                                    .category_names
                                    .iter()
                                    .map(|(id, name)| (id.clone(), name.clone()))
                                    .collect();
                                names.sort_by(|a, b| a.1.cmp(&b.1));
                                names
                            })
                            .into_iter()
                            .map(|(id, name)| view! { <option value=id>{name}</option> })
                            .collect_view()}
                        </select>
                    </div>
                </Flex>
            </div>

            <div class="page__content">
                <Show when=move || client_id.get().is_empty()>
                    <NoConnectionNotice />
                </Show>
                <ErrorBanner message=error />
                <Show when=move || loading.get()>
                    <Spinner label="Cargando productos..." />
                </Show>
                <Show when=move || {
                    !loading.get() && error.get().is_none() && !client_id.get().is_empty()
                        && state.with(|s| s.items.is_empty())
                }>
                    <p class="empty-state">"No se encontraron productos."</p>
                </Show>

                <Show when=move || !groups.get().is_empty()>
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>""</TableHeaderCell>
                                <TableHeaderCell>"Producto"</TableHeaderCell>
                                <TableHeaderCell>"Precio"</TableHeaderCell>
                                <TableHeaderCell>"Stock"</TableHeaderCell>
                                <TableHeaderCell>"Estado"</TableHeaderCell>
                                <TableHeaderCell>"Acciones"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || groups.get().into_iter().map(|group| {
                                let name = state.with_untracked(|s| s.category_name(&group.category_id));
                                let category_id = group.category_id.clone();
                                view! {
                                    <tr class="table__group-row">
                                        <td colspan="6">
                                            {move || state.with(|s| s.category_names.get(&category_id).cloned())
                                                .unwrap_or_else(|| name.clone())}
                                        </td>
                                    </tr>
                                    {group.products.into_iter().map(product_row).collect_view()}
                                }
                            }).collect_view()}
                        </TableBody>
                    </Table>
                </Show>

                {move || {
                    let w = window.get();
                    (w.total_pages > 1).then(|| view! {
                        <div class="page-window">
                            <Button
                                size=ButtonSize::Small
                                disabled=!w.has_previous()
                                on_click=move |_| go_to_offset(w.previous_offset())
                            >
                                {icon("chevron-left")}
                                " Anterior"
                            </Button>
                            {w.pages().map(|page| {
                                let appearance = if page == w.current {
                                    ButtonAppearance::Primary
                                } else {
                                    ButtonAppearance::Secondary
                                };
                                view! {
                                    <Button
                                        size=ButtonSize::Small
                                        appearance=appearance
                                        on_click=move |_| go_to_offset(w.offset_for(page))
                                    >
                                        {(page + 1).to_string()}
                                    </Button>
                                }
                            }).collect_view()}
                            <Button
                                size=ButtonSize::Small
                                disabled=!w.has_next()
                                on_click=move |_| go_to_offset(w.next_offset())
                            >
                                "Siguiente "
                                {icon("chevron-right")}
                            </Button>
                        </div>
                    })
                }}
            </div>

            <Modal id=DETAIL_MODAL title=detail_title>
                {move || state.with(|s| s.detail.clone()).map(|p| {
                    let category = state.with_untracked(|s| s.category_name(&p.category_id));
                    view! {
                        <div class="product-detail">
                            {p.thumbnail.clone().map(|src| view! {
                                <img class="product-detail__image" src=src alt="" />
                            })}
                            <table class="info-table">
                                <tbody>
                                    <tr><th>"Código"</th><td>{p.id.clone()}</td></tr>
                                    <tr><th>"Categoría"</th><td>{category}</td></tr>
                                    <tr><th>"Precio"</th><td>{format_clp(p.price)}</td></tr>
                                    <tr>
                                        <th>"Precio base"</th>
                                        <td>{p.base_price.map(format_clp).unwrap_or_else(|| "-".to_string())}</td>
                                    </tr>
                                    <tr><th>"Stock"</th><td>{format_thousands(p.available_quantity)}</td></tr>
                                    <tr><th>"Estado"</th><td>{p.status.label().to_string()}</td></tr>
                                </tbody>
                            </table>
                            {p.permalink.clone().map(|href| view! {
                                <a class="product-detail__link" href=href target="_blank">
                                    "Ver en Mercado Libre"
                                </a>
                            })}
                        </div>
                    }
                })}
            </Modal>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_label_follows_status() {
        assert_eq!(toggle_label(&ProductStatus::Active), "Pausar");
        assert_eq!(toggle_label(&ProductStatus::Paused), "Activar");
        assert_eq!(toggle_label(&ProductStatus::Other("x".into())), "Activar");
    }
}
