use crate::dashboards::d404_category_income::api;
use crate::shared::components::{ErrorBanner, InfoBanner};
use crate::shared::date_utils::current_month_input;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use contracts::dashboards::d403_top_selling::parse_month_input;
use contracts::dashboards::d404_category_income::{
    filter_categories, grand_total, group_by_category, payment_method_label,
    payment_method_totals, CategoryIncome, PaymentMethodTotal, Sale,
};
use contracts::shared::api::ApiError;
use contracts::shared::format::{format_clp, format_percentage, format_thousands};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Share of `part` in `total`, 0 when there is nothing to divide.
fn share(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        part / total * 100.0
    } else {
        0.0
    }
}

fn toggle_category(active: &mut Vec<String>, id: &str) {
    match active.iter().position(|a| a == id) {
        Some(i) => {
            active.remove(i);
        }
        None => active.push(id.to_string()),
    }
}

#[component]
pub fn CategoryIncomeDashboard(client_id: String) -> impl IntoView {
    let client_id = StoredValue::new(client_id);
    let month = RwSignal::new(current_month_input());
    let sales = RwSignal::new(Vec::<Sale>::new());
    let active = RwSignal::new(Vec::<String>::new());
    let expanded = RwSignal::new(None::<String>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let categories = Memo::new(move |_| sales.with(|s| group_by_category(s)));
    let visible = Memo::new(move |_| {
        categories.with(|c| active.with(|a| filter_categories(c, a)))
    });
    let total = Memo::new(move |_| visible.with(|v| grand_total(v)));
    let methods = Memo::new(move |_| sales.with(|s| payment_method_totals(s)));

    Effect::new(move |_| {
        let Some((year, m)) = parse_month_input(&month.get()) else {
            set_error.set(Some("Selecciona un mes válido.".to_string()));
            return;
        };
        set_loading.set(true);
        set_error.set(None);
        active.set(Vec::new());
        expanded.set(None);
        let client = client_id.get_value();
        spawn_local(async move {
            match api::fetch_sales_by_month(&client, year, m).await {
                Ok(list) => sales.set(list),
                Err(ApiError::NoContent) => sales.set(Vec::new()),
                Err(e) => {
                    log::error!("sales by month for {}: {}", client, e);
                    sales.set(Vec::new());
                    set_error.set(Some(e.user_message("Error al cargar los ingresos por categoría.")));
                }
            }
            set_loading.set(false);
        });
    });

    view! {
        <PageFrame page_id="d404_category_income--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Ingresos por categoría"</h1>
                </div>
                <div class="page__header-right">
                    <input
                        type="month"
                        class="form__input"
                        prop:value=move || month.get()
                        on:change=move |ev| month.set(event_target_value(&ev))
                    />
                </div>
            </div>

            <div class="page__content">
                <ErrorBanner message=error />
                <Show when=move || loading.get()>
                    <Spinner label="Cargando ventas..." />
                </Show>
                <Show when=move || !loading.get() && error.get().is_none() && sales.with(Vec::is_empty)>
                    <InfoBanner text="No hay ventas registradas en el mes seleccionado." />
                </Show>

                <Show when=move || categories.with(|c| !c.is_empty())>
                    <div class="filter-panel">
                        <Flex gap=FlexGap::Small>
                            <For
                                each=move || categories.get()
                                key=|c| c.id.clone()
                                children=move |c: CategoryIncome| {
                                    let id = c.id.clone();
                                    let id_for_toggle = id.clone();
                                    view! {
                                        <label class="filter-chip">
                                            <input
                                                type="checkbox"
                                                prop:checked=move || active.with(|a| a.contains(&id))
                                                on:change=move |_| active.update(|a| toggle_category(a, &id_for_toggle))
                                            />
                                            {c.category}
                                        </label>
                                    }
                                }
                            />
                        </Flex>
                    </div>

                    <div class="kpi-grid">
                        <div class="kpi-card">
                            <div class="kpi-card__label">"Ingreso total"</div>
                            <div class="kpi-card__value">{move || format_clp(total.get())}</div>
                        </div>
                        <div class="kpi-card">
                            <div class="kpi-card__label">"Órdenes"</div>
                            <div class="kpi-card__value">{move || format_thousands(sales.with(Vec::len) as i64)}</div>
                        </div>
                    </div>

                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Categoría"</TableHeaderCell>
                                <TableHeaderCell>"Unidades"</TableHeaderCell>
                                <TableHeaderCell>"Ingreso"</TableHeaderCell>
                                <TableHeaderCell>"%"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                let sum = total.get();
                                visible.get().into_iter().map(|c| {
                                    let id = c.id.clone();
                                    let id_for_click = id.clone();
                                    let products = c.products.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <span
                                                    class="table__link"
                                                    on:click=move |_| expanded.update(|e| {
                                                        *e = if e.as_deref() == Some(id_for_click.as_str()) {
                                                            None
                                                        } else {
                                                            Some(id_for_click.clone())
                                                        }
                                                    })
                                                >
                                                    {c.category.clone()}
                                                </span>
                                            </TableCell>
                                            <TableCell>{format_thousands(c.product_count)}</TableCell>
                                            <TableCell>{format_clp(c.total)}</TableCell>
                                            <TableCell>{format_percentage(share(c.total, sum))}</TableCell>
                                        </TableRow>
                                        <Show when=move || expanded.with(|e| e.as_deref() == Some(id.as_str()))>
                                            {products.iter().map(|p| view! {
                                                <tr class="table__sub-row">
                                                    <td>{p.title.clone()}</td>
                                                    <td>{format_thousands(p.quantity)}</td>
                                                    <td>{format_clp(p.total)}</td>
                                                    <td></td>
                                                </tr>
                                            }).collect_view()}
                                        </Show>
                                    }
                                }).collect_view()
                            }}
                        </TableBody>
                    </Table>

                    <h3 class="section__title">"Métodos de pago"</h3>
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Método"</TableHeaderCell>
                                <TableHeaderCell>"Órdenes"</TableHeaderCell>
                                <TableHeaderCell>"Total"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || methods.get().into_iter().map(|m: PaymentMethodTotal| view! {
                                <TableRow>
                                    <TableCell>{payment_method_label(&m.payment_method).to_string()}</TableCell>
                                    <TableCell>{format_thousands(m.quantity)}</TableCell>
                                    <TableCell>{format_clp(m.total)}</TableCell>
                                </TableRow>
                            }).collect_view()}
                        </TableBody>
                    </Table>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_of_empty_total_is_zero() {
        assert_eq!(share(50.0, 0.0), 0.0);
        assert_eq!(share(25.0, 100.0), 25.0);
    }

    #[test]
    fn toggling_adds_then_removes() {
        let mut active = vec!["MLC1".to_string()];
        toggle_category(&mut active, "MLC2");
        assert_eq!(active, vec!["MLC1", "MLC2"]);
        toggle_category(&mut active, "MLC1");
        assert_eq!(active, vec!["MLC2"]);
    }
}
