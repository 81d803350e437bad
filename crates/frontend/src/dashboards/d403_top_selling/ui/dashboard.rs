use crate::dashboards::d403_top_selling::api;
use crate::shared::components::{ErrorBanner, InfoBanner};
use crate::shared::date_utils::current_month_input;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use contracts::dashboards::d403_top_selling::{
    chart_bars, has_next_page, most_and_least_sold, page_slice, parse_month_input, TopProduct,
    CHART_SIZE_OPTIONS, TABLE_PAGE_SIZE,
};
use contracts::shared::format::{format_clp, format_thousands};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn highlight(label: &'static str, product: &TopProduct) -> impl IntoView {
    view! {
        <div class="kpi-card">
            <div class="kpi-card__label">{label}</div>
            <div class="kpi-card__value">{format_clp(product.total_amount)}</div>
            <div class="kpi-card__hint">
                {format!("{} ({} u.)", product.title, format_thousands(product.quantity))}
            </div>
        </div>
    }
}

#[component]
pub fn TopSellingDashboard(client_id: String) -> impl IntoView {
    let client_id = StoredValue::new(client_id);
    let month = RwSignal::new(current_month_input());
    let products = RwSignal::new(Vec::<TopProduct>::new());
    let page = RwSignal::new(1usize);
    let chart_size = RwSignal::new(CHART_SIZE_OPTIONS[0]);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let load = move || {
        let Some((year, m)) = parse_month_input(&month.get_untracked()) else {
            set_error.set(Some("Selecciona un mes válido.".to_string()));
            return;
        };
        set_loading.set(true);
        set_error.set(None);
        page.set(1);
        let client = client_id.get_value();
        spawn_local(async move {
            match api::fetch_top_selling(&client, year, m).await {
                Ok(list) => products.set(list),
                Err(message) => {
                    products.set(Vec::new());
                    set_error.set(Some(message));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        month.track();
        load();
    });

    let rank_offset = move || (page.get() - 1) * TABLE_PAGE_SIZE;

    view! {
        <PageFrame page_id="d403_top_selling--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Productos más vendidos"</h1>
                </div>
                <div class="page__header-right">
                    <input
                        type="month"
                        class="form__input"
                        prop:value=move || month.get()
                        on:change=move |ev| month.set(event_target_value(&ev))
                    />
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=Signal::derive(move || loading.get())
                        on_click=move |_| load()
                    >
                        {icon("refresh")}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <ErrorBanner message=error />
                <Show when=move || loading.get()>
                    <Spinner label="Cargando productos..." />
                </Show>
                <Show when=move || !loading.get() && error.get().is_none() && products.with(Vec::is_empty)>
                    <InfoBanner text="No hay ventas registradas en el mes seleccionado." />
                </Show>

                {move || products.with(|list| {
                    most_and_least_sold(list).map(|(most, least)| view! {
                        <div class="kpi-grid">
                            {highlight("Más vendido", most)}
                            {highlight("Menos vendido", least)}
                        </div>
                    })
                })}

                <Show when=move || products.with(|l| !l.is_empty())>
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"#"</TableHeaderCell>
                                <TableHeaderCell>"Producto"</TableHeaderCell>
                                <TableHeaderCell>"Cantidad"</TableHeaderCell>
                                <TableHeaderCell>"Total"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                let offset = rank_offset();
                                products.with(|list| {
                                    page_slice(list, page.get())
                                        .iter()
                                        .enumerate()
                                        .map(|(i, p)| {
                                            let title = p.title.clone();
                                            let quantity = p.quantity;
                                            let total_amount = p.total_amount;
                                            view! {
                                                <TableRow>
                                                    <TableCell>{(offset + i + 1).to_string()}</TableCell>
                                                    <TableCell>
                                                        <TableCellLayout truncate=true>{title}</TableCellLayout>
                                                    </TableCell>
                                                    <TableCell>{format_thousands(quantity)}</TableCell>
                                                    <TableCell>{format_clp(total_amount)}</TableCell>
                                                </TableRow>
                                            }
                                        })
                                        .collect_view()
                                })
                            }}
                        </TableBody>
                    </Table>
                    <Flex gap=FlexGap::Small align=FlexAlign::Center>
                        <Button
                            size=ButtonSize::Small
                            disabled=Signal::derive(move || page.get() <= 1)
                            on_click=move |_| page.update(|p| *p = p.saturating_sub(1).max(1))
                        >
                            {icon("chevron-left")}
                            " Anterior"
                        </Button>
                        <span class="pagination-info">{move || format!("Página {}", page.get())}</span>
                        <Button
                            size=ButtonSize::Small
                            disabled=Signal::derive(move || !products.with(|l| has_next_page(l, page.get())))
                            on_click=move |_| page.update(|p| *p += 1)
                        >
                            "Siguiente "
                            {icon("chevron-right")}
                        </Button>
                    </Flex>

                    <div class="chart">
                        <Flex gap=FlexGap::Small align=FlexAlign::Center>
                            <h3 class="chart__title">"Ventas por producto"</h3>
                            <select
                                class="form__select"
                                prop:value=move || chart_size.get().to_string()
                                on:change=move |ev| {
                                    if let Ok(n) = event_target_value(&ev).parse() {
                                        chart_size.set(n);
                                    }
                                }
                            >
                                {CHART_SIZE_OPTIONS.iter().map(|n| view! {
                                    <option value=n.to_string()>{format!("Top {}", n)}</option>
                                }).collect_view()}
                            </select>
                        </Flex>
                        {move || products.with(|list| {
                            chart_bars(list, chart_size.get())
                                .into_iter()
                                .map(|bar| view! {
                                    <div class="chart__row">
                                        <span class="chart__label" title=bar.label.clone()>{bar.label.clone()}</span>
                                        <div class="chart__track">
                                            <div
                                                class="chart__bar"
                                                style=format!("width: {:.1}%", bar.percent)
                                            ></div>
                                        </div>
                                        <span class="chart__value">{format_clp(bar.value)}</span>
                                    </div>
                                })
                                .collect_view()
                        })}
                    </div>
                </Show>
            </div>
        </PageFrame>
    }
}
