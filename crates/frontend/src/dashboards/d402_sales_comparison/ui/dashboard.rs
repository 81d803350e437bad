use super::print_preview::{PrintPreview, PRINT_PREVIEW_MODAL};
use crate::dashboards::d402_sales_comparison::api;
use crate::domain::a001_connection::api::fetch_credential;
use crate::layout::modal_service::ModalService;
use crate::shared::components::ErrorBanner;
use crate::shared::date_utils::current_year;
use crate::shared::export::export_sheets;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use crate::shared::toast::ToastService;
use contracts::dashboards::d402_sales_comparison::{
    comparison_sheets, printable_report_html, recent_years, summarize, ComparisonMode,
    ComparisonRequest, ComparisonResult, ComparisonSummary, PeriodSales, MONTHS,
};
use contracts::shared::format::{format_clp, format_percentage};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn change_class(summary: &ComparisonSummary) -> &'static str {
    if summary.is_growth() {
        "comparison__change comparison__change--up"
    } else if summary.difference < 0.0 {
        "comparison__change comparison__change--down"
    } else {
        "comparison__change"
    }
}

#[component]
fn PeriodSelect(
    label: &'static str,
    mode: ComparisonMode,
    year: RwSignal<String>,
    month: RwSignal<String>,
) -> impl IntoView {
    let years = recent_years(current_year());

    view! {
        <div class="comparison__period">
            <h3 class="comparison__period-title">{label}</h3>
            <Flex gap=FlexGap::Small>
                <select
                    class="form__select"
                    prop:value=move || year.get()
                    on:change=move |ev| year.set(event_target_value(&ev))
                >
                    <option value="">"Año"</option>
                    {years.into_iter().map(|y| view! {
                        <option value=y.to_string()>{y.to_string()}</option>
                    }).collect_view()}
                </select>
                <Show when=move || mode == ComparisonMode::Month>
                    <select
                        class="form__select"
                        prop:value=move || month.get()
                        on:change=move |ev| month.set(event_target_value(&ev))
                    >
                        <option value="">"Mes"</option>
                        {MONTHS.iter().map(|(code, name)| view! {
                            <option value=*code>{*name}</option>
                        }).collect_view()}
                    </select>
                </Show>
            </Flex>
        </div>
    }
}

fn period_card(label: String, period: PeriodSales) -> impl IntoView {
    view! {
        <div class="comparison__card">
            <h3>{label}</h3>
            <div class="kpi-card__value">{format_clp(period.total_sales)}</div>
            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Producto"</TableHeaderCell>
                        <TableHeaderCell>"Cantidad"</TableHeaderCell>
                        <TableHeaderCell>"Precio"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {period.sold_products.into_iter().map(|p| view! {
                        <TableRow>
                            <TableCell>
                                <TableCellLayout truncate=true>{p.title}</TableCellLayout>
                            </TableCell>
                            <TableCell>{p.quantity.to_string()}</TableCell>
                            <TableCell>{format_clp(p.price)}</TableCell>
                        </TableRow>
                    }).collect_view()}
                </TableBody>
            </Table>
        </div>
    }
}

/// Compares the sales of two months or two years of one seller account.
#[component]
pub fn SalesComparisonDashboard(client_id: String, mode: ComparisonMode) -> impl IntoView {
    let modal = use_context::<ModalService>().expect("ModalService not found in context");
    let toast = use_context::<ToastService>().expect("ToastService not found in context");
    let client_id = StoredValue::new(client_id);

    let year1 = RwSignal::new(String::new());
    let month1 = RwSignal::new(String::new());
    let year2 = RwSignal::new(String::new());
    let month2 = RwSignal::new(String::new());

    let nickname = RwSignal::new(String::new());
    let result = RwSignal::new(None::<ComparisonResult>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    spawn_local(async move {
        match fetch_credential(&client_id.get_value()).await {
            Ok(c) => nickname.set(c.nickname),
            Err(e) => log::warn!("nickname: {}", e),
        }
    });

    let summary = Memo::new(move |_| {
        result.with(|r| r.as_ref().map(|r| summarize(r.mode, &r.first, &r.second)))
    });

    let compare = move |_| {
        let request = ComparisonRequest {
            mode,
            year1: year1.get_untracked(),
            month1: month1.get_untracked(),
            year2: year2.get_untracked(),
            month2: month2.get_untracked(),
        };
        if let Err(e) = request.validate() {
            set_error.set(Some(e.to_string()));
            return;
        }
        set_loading.set(true);
        set_error.set(None);
        result.set(None);
        let client = client_id.get_value();
        spawn_local(async move {
            match api::fetch_comparison(&client, &request).await {
                Ok(r) => result.set(Some(r)),
                Err(e) => {
                    log::error!("comparison for {}: {}", client, e);
                    set_error.set(Some(e.user_message("Error al obtener los datos de comparación.")));
                }
            }
            set_loading.set(false);
        });
    };

    let export = move |_| {
        let (Some(s), Some(r)) = (summary.get_untracked(), result.get_untracked()) else {
            return;
        };
        let (filename, sheets) = comparison_sheets(&s, &r.first, &r.second);
        match export_sheets(&sheets, &filename) {
            Ok(()) => toast.success("Archivo exportado"),
            Err(e) => toast.error(e),
        }
    };

    let report_html = Signal::derive(move || {
        match (summary.get(), result.get()) {
            (Some(s), Some(r)) => printable_report_html(&nickname.get(), &s, &r.first, &r.second),
            _ => String::new(),
        }
    });

    view! {
        <PageFrame page_id="d402_sales_comparison--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{mode.title()}</h1>
                    <Show when=move || !nickname.get().is_empty()>
                        <Badge appearance=BadgeAppearance::Tint>{move || nickname.get()}</Badge>
                    </Show>
                </div>
                <div class="page__header-right">
                    <Show when=move || summary.with(Option::is_some)>
                        <Button appearance=ButtonAppearance::Secondary on_click=export>
                            {icon("download")}
                            " Exportar a Excel"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| modal.show(PRINT_PREVIEW_MODAL)
                        >
                            {icon("printer")}
                            " Generar PDF"
                        </Button>
                    </Show>
                </div>
            </div>

            <div class="page__content">
                <div class="comparison__form">
                    <Flex gap=FlexGap::Large align=FlexAlign::End>
                        <PeriodSelect label="Primer período" mode=mode year=year1 month=month1 />
                        <PeriodSelect label="Segundo período" mode=mode year=year2 month=month2 />
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::derive(move || loading.get())
                            on_click=compare
                        >
                            "Comparar"
                        </Button>
                    </Flex>
                </div>

                <ErrorBanner message=error />
                <Show when=move || loading.get()>
                    <Spinner label="Cargando comparación..." />
                </Show>

                {move || summary.get().map(|s| view! {
                    <div class="comparison__summary">
                        <div class="kpi-grid">
                            <div class="kpi-card">
                                <div class="kpi-card__label">{s.label1.clone()}</div>
                                <div class="kpi-card__value">{format_clp(s.total1)}</div>
                            </div>
                            <div class="kpi-card">
                                <div class="kpi-card__label">{s.label2.clone()}</div>
                                <div class="kpi-card__value">{format_clp(s.total2)}</div>
                            </div>
                            <div class="kpi-card">
                                <div class="kpi-card__label">"Diferencia"</div>
                                <div class=change_class(&s)>{format_clp(s.difference)}</div>
                            </div>
                            <div class="kpi-card">
                                <div class="kpi-card__label">"Cambio porcentual"</div>
                                <div class=change_class(&s)>{format_percentage(s.percentage_value())}</div>
                            </div>
                        </div>
                        <p class="comparison__interpretation">{s.interpretation.clone()}</p>
                    </div>
                })}

                {move || result.get().map(|r| {
                    let label1 = r.first.label(r.mode);
                    let label2 = r.second.label(r.mode);
                    view! {
                        <div class="comparison__cards">
                            {period_card(label1, r.first)}
                            {period_card(label2, r.second)}
                        </div>
                    }
                })}
            </div>

            <PrintPreview html=report_html />
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(year: &str, total: f64) -> PeriodSales {
        PeriodSales {
            year: year.to_string(),
            month: Some("03".to_string()),
            total_sales: total,
            sold_products: vec![],
        }
    }

    #[test]
    fn growth_and_decline_get_their_own_class() {
        let up = summarize(ComparisonMode::Month, &period("2024", 100.0), &period("2025", 150.0));
        assert_eq!(change_class(&up), "comparison__change comparison__change--up");

        let down = summarize(ComparisonMode::Month, &period("2024", 150.0), &period("2025", 100.0));
        assert_eq!(change_class(&down), "comparison__change comparison__change--down");

        let flat = summarize(ComparisonMode::Year, &period("2024", 80.0), &period("2025", 80.0));
        assert_eq!(change_class(&flat), "comparison__change");
    }
}
