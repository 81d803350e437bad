use crate::domain::a002_warehouse::api::{fetch_warehouse, fetch_warehouse_stock};
use crate::shared::components::ErrorBanner;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use contracts::domain::a002_warehouse::{Warehouse, WarehouseStock};
use contracts::shared::format::{format_clp, format_datetime_es, format_thousands};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Warehouse header plus the stock lines stored in it.
#[component]
#[allow(non_snake_case)]
pub fn WarehouseDetail(id: String, on_close: Callback<()>) -> impl IntoView {
    let (warehouse, set_warehouse) = signal::<Option<Warehouse>>(None);
    let (stock, set_stock) = signal::<Vec<WarehouseStock>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(true);

    spawn_local(async move {
        let (header, lines) = futures::join!(fetch_warehouse(&id), fetch_warehouse_stock(&id));
        match header {
            Ok(w) => set_warehouse.set(Some(w)),
            Err(e) => {
                log::error!("warehouse {}: {}", id, e);
                set_error.set(Some(e.user_message("Error al cargar la bodega.")));
            }
        }
        match lines {
            Ok(lines) => set_stock.set(lines),
            Err(e) => {
                log::error!("warehouse {} stock: {}", id, e);
                set_error.set(Some(e.user_message("Error al cargar el stock de la bodega.")));
            }
        }
        set_loading.set(false);
    });

    let total_units = move || stock.with(|s| s.iter().map(|l| l.available_quantity).sum::<i64>());

    view! {
        <PageFrame page_id="a002_warehouse--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">
                        {move || warehouse.get().map(|w| w.name).unwrap_or_else(|| "Bodega".to_string())}
                    </h1>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        {icon("x")}
                        " Cerrar"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <ErrorBanner message=error />
                <Show when=move || loading.get()>
                    <Spinner label="Cargando bodega..." />
                </Show>

                {move || warehouse.get().map(|w| view! {
                    <div class="detail-header">
                        <div class="detail-header__item">
                            <span class="detail-header__label">"Ubicación"</span>
                            <span>{w.location.clone()}</span>
                        </div>
                        <div class="detail-header__item">
                            <span class="detail-header__label">"Empresa"</span>
                            <span>{w.company_name().to_string()}</span>
                        </div>
                        <div class="detail-header__item">
                            <span class="detail-header__label">"Actualizada"</span>
                            <span>{w.updated_at.as_deref().map(format_datetime_es).unwrap_or_default()}</span>
                        </div>
                        <div class="detail-header__item">
                            <span class="detail-header__label">"Unidades"</span>
                            <span>{format_thousands(total_units())}</span>
                        </div>
                    </div>
                })}

                <Show
                    when=move || !stock.get().is_empty()
                    fallback=move || view! {
                        <Show when=move || !loading.get()>
                            <p class="empty-state">"Esta bodega no tiene productos."</p>
                        </Show>
                    }
                >
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Código ML"</TableHeaderCell>
                                <TableHeaderCell>"Producto"</TableHeaderCell>
                                <TableHeaderCell>"Disponible"</TableHeaderCell>
                                <TableHeaderCell>"Precio"</TableHeaderCell>
                                <TableHeaderCell>"Actualizado"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || stock.get()
                                key=|line| line.id.clone()
                                children=move |line: WarehouseStock| view! {
                                    <TableRow>
                                        <TableCell>
                                            <TableCellLayout>{line.id_mlc.clone().unwrap_or_else(|| "-".to_string())}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{line.title.clone().unwrap_or_default()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{format_thousands(line.available_quantity)}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{format_clp(line.price)}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                {line.updated_at.as_deref().map(format_datetime_es).unwrap_or_default()}
                                            </TableCellLayout>
                                        </TableCell>
                                    </TableRow>
                                }
                            />
                        </TableBody>
                    </Table>
                </Show>
            </div>
        </PageFrame>
    }
}
