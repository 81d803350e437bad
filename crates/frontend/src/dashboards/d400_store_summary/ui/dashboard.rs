use crate::dashboards::d400_store_summary::api;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::{ErrorBanner, NoConnectionNotice};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use contracts::dashboards::d400_store_summary::{available_reports, ReportLink, StoreSummary};
use contracts::shared::format::{format_clp, format_thousands};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn kpi(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="kpi-card">
            <div class="kpi-card__label">{label}</div>
            <div class="kpi-card__value">{value}</div>
        </div>
    }
}

/// Sales summary of the selected connection plus the report catalog.
#[component]
pub fn StoreSummaryDashboard() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let (data, set_data) = signal(None::<StoreSummary>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let client = Memo::new(move |_| {
        ctx.selected_connection
            .with(|s| s.as_ref().map(|s| (s.client_id.clone(), s.nickname.clone())))
    });

    Effect::new(move |_| {
        let Some((client_id, _)) = client.get() else {
            set_data.set(None);
            return;
        };
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_summary(&client_id).await {
                Ok(summary) => set_data.set(Some(summary)),
                Err(e) => {
                    log::error!("summary for {}: {}", client_id, e);
                    set_error.set(Some(e.user_message("Error al cargar el resumen de ventas.")));
                }
            }
            set_loading.set(false);
        });
    });

    let open_report = move |link: &ReportLink| {
        if let Some((client_id, nickname)) = client.get_untracked() {
            ctx.open_tab(
                &link.tab_key(&client_id),
                &format!("{} · {}", link.label, nickname),
            );
        }
    };

    view! {
        <PageFrame page_id="d400_store_summary--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Reportes"</h1>
                    {move || client.get().map(|(_, nickname)| view! {
                        <Badge appearance=BadgeAppearance::Tint>{nickname}</Badge>
                    })}
                </div>
            </div>

            <div class="page__content">
                <Show when=move || client.get().is_none()>
                    <NoConnectionNotice />
                </Show>
                <ErrorBanner message=error />
                <Show when=move || loading.get()>
                    <Spinner label="Cargando resumen..." />
                </Show>

                {move || data.get().map(|s| view! {
                    <div class="kpi-grid">
                        {kpi("Ventas totales", format_clp(s.total_sales))}
                        {kpi("Ventas del día", format_clp(s.daily_sales))}
                        {kpi("Ventas de la semana", format_clp(s.weekly_sales))}
                        {kpi("Ventas del mes", format_clp(s.monthly_sales))}
                        {kpi("Ventas del año", format_clp(s.annual_sales))}
                    </div>
                    <div class="kpi-grid">
                        {kpi("Órdenes pagadas", format_thousands(s.order_statuses.paid))}
                        {kpi("Órdenes pendientes", format_thousands(s.order_statuses.pending))}
                        {kpi("Órdenes canceladas", format_thousands(s.order_statuses.canceled))}
                        {kpi("Dinero en cuenta", format_thousands(s.top_payment_methods.account_money))}
                        {kpi("Tarjeta de débito", format_thousands(s.top_payment_methods.debit_card))}
                        {kpi("Tarjeta de crédito", format_thousands(s.top_payment_methods.credit_card))}
                    </div>
                    <h3 class="dashboard__section-title">"Productos más vendidos"</h3>
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Producto"</TableHeaderCell>
                                <TableHeaderCell>"Cantidad"</TableHeaderCell>
                                <TableHeaderCell>"Total"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {s.top_selling_products.into_iter().map(|p| view! {
                                <TableRow>
                                    <TableCell><TableCellLayout truncate=true>{p.title}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{format_thousands(p.quantity)}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{format_clp(p.total_amount)}</TableCellLayout></TableCell>
                                </TableRow>
                            }).collect_view()}
                        </TableBody>
                    </Table>
                })}

                <Show when=move || client.get().is_some()>
                    <h3 class="dashboard__section-title">"Reportes disponibles"</h3>
                    <div class="card-grid">
                        {available_reports().iter().map(|link| view! {
                            <div class="report-card" on:click=move |_| open_report(link)>
                                <div class="report-card__icon">{icon(link.icon)}</div>
                                <div class="report-card__title">{link.label}</div>
                            </div>
                        }).collect_view()}
                    </div>
                </Show>
            </div>
        </PageFrame>
    }
}
