use crate::dashboards::d401_stock_history::api::fetch_sales_history;
use crate::layout::modal_service::Modal;
use crate::shared::components::ErrorBanner;
use contracts::dashboards::d401_stock_history::{history_cache_key, SalesHistoryEntry, StockRow};
use contracts::shared::format::{format_datetime_es, format_thousands};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashMap;
use thaw::*;

pub const STOCK_DETAIL_MODAL: &str = "d401_stock_detail";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetailTab {
    Details,
    History,
}

/// Details and paged sales history of one stock row. History is cached per
/// `client_id-product_id` for the lifetime of the dashboard.
#[component]
pub fn StockDetailModal(
    client_id: RwSignal<String>,
    row: RwSignal<Option<StockRow>>,
) -> impl IntoView {
    let tab = RwSignal::new(DetailTab::Details);
    let cache = StoredValue::new(HashMap::<String, Vec<SalesHistoryEntry>>::new());
    let history = RwSignal::new(None::<Vec<SalesHistoryEntry>>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    Effect::new(move |_| {
        row.track();
        tab.set(DetailTab::Details);
        history.set(None);
        set_error.set(None);
    });

    let load_history = move || {
        let Some(product_id) = row.with_untracked(|r| r.as_ref().map(|r| r.id.clone())) else {
            return;
        };
        let client = client_id.get_untracked();
        let key = history_cache_key(&client, &product_id);
        if let Some(cached) = cache.with_value(|c| c.get(&key).cloned()) {
            history.set(Some(cached));
            return;
        }
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match fetch_sales_history(&client, &product_id).await {
                Ok(entries) => {
                    cache.update_value(|c| {
                        c.insert(key, entries.clone());
                    });
                    history.set(Some(entries));
                }
                Err(e) => {
                    log::error!("sales history {}: {}", product_id, e);
                    set_error.set(Some(e.user_message("Error al cargar el historial de ventas.")));
                }
            }
            set_loading.set(false);
        });
    };

    let show_history = move |_| {
        tab.set(DetailTab::History);
        if history.with_untracked(Option::is_none) {
            load_history();
        }
    };

    let title = Signal::derive(move || {
        row.with(|r| r.as_ref().map(|r| r.title.clone()).unwrap_or_default())
    });

    view! {
        <Modal id=STOCK_DETAIL_MODAL title=title>
            <div class="modal-tabs">
                <button
                    class="modal-tabs__tab"
                    class:modal-tabs__tab--active=move || tab.get() == DetailTab::Details
                    on:click=move |_| tab.set(DetailTab::Details)
                >
                    "Detalles"
                </button>
                <button
                    class="modal-tabs__tab"
                    class:modal-tabs__tab--active=move || tab.get() == DetailTab::History
                    on:click=show_history
                >
                    "Historial de ventas"
                </button>
            </div>

            {move || {
                let current = row.get()?;
                Some(match tab.get() {
                    DetailTab::Details => view! {
                        <table class="info-table">
                            <tbody>
                                <tr><th>"ID"</th><td>{current.id.clone()}</td></tr>
                                <tr><th>"SKU"</th><td>{current.sku.clone()}</td></tr>
                                <tr><th>"Stock"</th><td>{format_thousands(current.available_quantity)}</td></tr>
                                {current.details.iter().map(|d| view! {
                                    <tr>
                                        <th>{d.name.clone()}</th>
                                        <td>{d.value_name.clone().unwrap_or_else(|| "-".to_string())}</td>
                                    </tr>
                                }).collect_view()}
                            </tbody>
                        </table>
                    }
                    .into_any(),
                    DetailTab::History => view! {
                        <ErrorBanner message=error />
                        <Show when=move || error.get().is_some()>
                            <Button size=ButtonSize::Small on_click=move |_| load_history()>
                                "Reintentar"
                            </Button>
                        </Show>
                        <Show when=move || loading.get()>
                            <Spinner size=SpinnerSize::Small />
                        </Show>
                        {move || history.get().map(|entries| {
                            if entries.is_empty() {
                                let last = row.with_untracked(|r| {
                                    r.as_ref().map(|r| format_datetime_es(&r.purchase_sale_date))
                                });
                                view! {
                                    <p class="modal-note">
                                        "Sin ventas registradas. Última venta: "
                                        {last.unwrap_or_default()}
                                    </p>
                                }
                                .into_any()
                            } else {
                                view! {
                                    <table class="info-table">
                                        <thead>
                                            <tr><th>"Fecha"</th><th>"Cantidad"</th></tr>
                                        </thead>
                                        <tbody>
                                            {entries.into_iter().map(|e| view! {
                                                <tr>
                                                    <td>{format_datetime_es(&e.date)}</td>
                                                    <td>{format_thousands(e.quantity)}</td>
                                                </tr>
                                            }).collect_view()}
                                        </tbody>
                                    </table>
                                }
                                .into_any()
                            }
                        })}
                    }
                    .into_any(),
                })
            }}
        </Modal>
    }
}
