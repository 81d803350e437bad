use super::detail_modal::{StockDetailModal, STOCK_DETAIL_MODAL};
use crate::dashboards::d401_stock_history::api;
use crate::domain::a001_connection::api::fetch_credential;
use crate::domain::a001_connection::ui::picker::ConnectionPicker;
use crate::layout::modal_service::ModalService;
use crate::shared::components::{ErrorBanner, InfoBanner, PaginationControls};
use crate::shared::date_utils::now_string;
use crate::shared::icons::icon;
use crate::shared::list_utils::{begin_request, is_current_request, RequestSeq};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use contracts::dashboards::d401_stock_history::{
    filter_and_sort, normalize_stock_rows, paginate, total_pages, SortConfig, StockFilter,
    StockRow, StockSortKey, DEFAULT_PER_PAGE, PER_PAGE_OPTIONS,
};
use contracts::shared::format::{format_datetime_es, format_thousands, parse_date};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Filter built from the raw input strings. Unparseable bounds are ignored.
fn build_filter(search: &str, start: &str, end: &str, min: &str, max: &str) -> StockFilter {
    StockFilter {
        search: search.to_string(),
        date_start: parse_date(start.trim()),
        date_end: parse_date(end.trim()),
        quantity_min: min.trim().parse().ok(),
        quantity_max: max.trim().parse().ok(),
    }
}

const COLUMNS: [(StockSortKey, &str); 5] = [
    (StockSortKey::Id, "ID"),
    (StockSortKey::Sku, "SKU"),
    (StockSortKey::Title, "Título"),
    (StockSortKey::AvailableQuantity, "Stock disponible"),
    (StockSortKey::PurchaseSaleDate, "Última venta"),
];

#[component]
pub fn StockHistoryDashboard(client_id: String) -> impl IntoView {
    let modal = use_context::<ModalService>().expect("ModalService not found in context");

    let client = RwSignal::new(client_id);
    let nickname = RwSignal::new(String::new());
    let rows = RwSignal::new(Vec::<StockRow>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let search = RwSignal::new(String::new());
    let date_start = RwSignal::new(String::new());
    let date_end = RwSignal::new(String::new());
    let qty_min = RwSignal::new(String::new());
    let qty_max = RwSignal::new(String::new());
    let per_page = RwSignal::new(DEFAULT_PER_PAGE);
    let page = RwSignal::new(1usize);
    let sort = RwSignal::new(None::<SortConfig>);
    let selected = RwSignal::new(None::<StockRow>);
    let request_seq = StoredValue::new(RequestSeq::default());

    let filter = Memo::new(move |_| {
        build_filter(
            &search.get(),
            &date_start.get(),
            &date_end.get(),
            &qty_min.get(),
            &qty_max.get(),
        )
    });
    let visible = Memo::new(move |_| rows.with(|r| filter_and_sort(r, &filter.get(), sort.get())));
    let pages = Memo::new(move |_| total_pages(visible.with(Vec::len), per_page.get()));
    let page_rows = Memo::new(move |_| visible.with(|v| paginate(v, page.get(), per_page.get())));

    Effect::new(move |_| {
        filter.track();
        per_page.track();
        page.set(1);
    });

    let load = move || {
        let client_id = client.get_untracked();
        if client_id.is_empty() {
            return;
        }
        let ticket = begin_request(request_seq);
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            let (stock, credential) =
                futures::join!(api::fetch_stock(&client_id), fetch_credential(&client_id));
            if !is_current_request(request_seq, ticket) {
                return;
            }
            match credential {
                Ok(c) => nickname.set(c.nickname),
                Err(e) => log::warn!("nickname for {}: {}", client_id, e),
            }
            match stock {
                Ok(items) => rows.set(normalize_stock_rows(&items, &now_string())),
                Err(e) => {
                    log::error!("stock for {}: {}", client_id, e);
                    rows.set(Vec::new());
                    set_error.set(Some(e.user_message("Error al cargar el historial de stock.")));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        if !client.get().is_empty() {
            load();
        }
    });

    let clear_filters = move |_| {
        search.set(String::new());
        date_start.set(String::new());
        date_end.set(String::new());
        qty_min.set(String::new());
        qty_max.set(String::new());
    };

    let open_row = move |row: StockRow| {
        selected.set(Some(row));
        modal.show(STOCK_DETAIL_MODAL);
    };

    view! {
        <PageFrame page_id="d401_stock_history--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Historial de Stock"</h1>
                    <Show when=move || !nickname.get().is_empty()>
                        <Badge appearance=BadgeAppearance::Tint>{move || nickname.get()}</Badge>
                    </Show>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=Signal::derive(move || loading.get())
                        on_click=move |_| load()
                    >
                        {icon("refresh")}
                        " Actualizar"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <ConnectionPicker value=client auto_select_first=true />

                <div class="filter-panel">
                    <Flex gap=FlexGap::Small align=FlexAlign::End>
                        <div class="form__group">
                            <label class="form__label">"Buscar"</label>
                            <Input value=search placeholder="ID, SKU o título" />
                        </div>
                        <div class="form__group">
                            <label class="form__label">"Desde"</label>
                            <input
                                type="date"
                                class="form__input"
                                prop:value=move || date_start.get()
                                on:input=move |ev| date_start.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form__group">
                            <label class="form__label">"Hasta"</label>
                            <input
                                type="date"
                                class="form__input"
                                prop:value=move || date_end.get()
                                on:input=move |ev| date_end.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form__group">
                            <label class="form__label">"Stock mín."</label>
                            <Input value=qty_min input_type=InputType::Number />
                        </div>
                        <div class="form__group">
                            <label class="form__label">"Stock máx."</label>
                            <Input value=qty_max input_type=InputType::Number />
                        </div>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            disabled=Signal::derive(move || filter.with(StockFilter::is_empty))
                            on_click=clear_filters
                        >
                            "Limpiar filtros"
                        </Button>
                    </Flex>
                </div>

                <ErrorBanner message=error />
                <Show when=move || loading.get()>
                    <Spinner label="Cargando stock..." />
                </Show>
                <Show when=move || !loading.get() && error.get().is_none() && visible.with(Vec::is_empty) && !client.get().is_empty()>
                    <InfoBanner text="No hay productos que coincidan con los filtros." />
                </Show>

                <Table>
                    <TableHeader>
                        <TableRow>
                            {COLUMNS.iter().map(|&(key, label)| view! {
                                <TableHeaderCell>
                                    <span
                                        class="table__sortable-header"
                                        on:click=move |_| sort.set(Some(SortConfig::toggle(sort.get_untracked(), key)))
                                    >
                                        {label}
                                        " "
                                        {move || SortConfig::indicator(sort.get(), key)}
                                    </span>
                                </TableHeaderCell>
                            }).collect_view()}
                            <TableHeaderCell>"Recarga de stock"</TableHeaderCell>
                            <TableHeaderCell>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || page_rows.get()
                            key=|row| row.id.clone()
                            children=move |row: StockRow| {
                                let for_modal = row.clone();
                                view! {
                                    <TableRow>
                                        <TableCell>{row.id.clone()}</TableCell>
                                        <TableCell>{row.sku.clone()}</TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{row.title.clone()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>{format_thousands(row.available_quantity)}</TableCell>
                                        <TableCell>{format_datetime_es(&row.purchase_sale_date)}</TableCell>
                                        <TableCell>{format_datetime_es(&row.stock_reload_date)}</TableCell>
                                        <TableCell>
                                            <Button
                                                size=ButtonSize::Small
                                                on_click=move |_| open_row(for_modal.clone())
                                            >
                                                {icon("eye")}
                                            </Button>
                                        </TableCell>
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>

                <PaginationControls
                    current_page=page
                    total_pages=pages
                    total_count=Signal::derive(move || visible.with(Vec::len))
                    page_size=per_page
                    on_page_change=Callback::new(move |p| page.set(p))
                    on_page_size_change=Callback::new(move |s| per_page.set(s))
                    page_size_options=PER_PAGE_OPTIONS.to_vec()
                />
            </div>

            <StockDetailModal client_id=client row=selected />
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn blank_inputs_give_empty_filter() {
        assert!(build_filter("", "", " ", "", "").is_empty());
    }

    #[test]
    fn bounds_are_parsed_and_garbage_ignored() {
        let f = build_filter("polera", "2025-01-10", "no-date", "5", "abc");
        assert_eq!(f.search, "polera");
        assert_eq!(f.date_start, NaiveDate::from_ymd_opt(2025, 1, 10));
        assert_eq!(f.date_end, None);
        assert_eq!(f.quantity_min, Some(5));
        assert_eq!(f.quantity_max, None);
    }
}
