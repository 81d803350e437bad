use crate::domain::a005_shipment::api::fetch_upcoming_shipments;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::{ErrorBanner, NoConnectionNotice};
use crate::shared::date_utils::today;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::domain::a005_shipment::{due_on, title_for, Shipment, NO_SHIPMENTS_TODAY};
use contracts::shared::format::format_thousands;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Shipments whose handling limit is today.
///
/// Without an explicit `client_id` the selected connection is used.
#[component]
#[allow(non_snake_case)]
pub fn ShipmentList(client_id: Option<String>) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let fixed_client = client_id;
    let client = Memo::new(move |_| {
        fixed_client.clone().or_else(|| {
            ctx.selected_connection
                .with(|s| s.as_ref().map(|s| s.client_id.clone()))
        })
    });

    let date = today();
    let (items, set_items) = signal::<Vec<Shipment>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);

    let load = move |client_id: String| {
        set_loading.set(true);
        spawn_local(async move {
            match fetch_upcoming_shipments(&client_id).await {
                Ok(list) => {
                    set_items.set(due_on(list, date));
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("shipments for {}: {}", client_id, e);
                    set_items.set(Vec::new());
                    set_error.set(Some(e.report_message()));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        if let Some(client_id) = client.get() {
            load(client_id);
        }
    });

    view! {
        <PageFrame page_id="a005_shipment--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{title_for(date)}</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=loading
                        on_click=move |_| {
                            if let Some(client_id) = client.get_untracked() {
                                load(client_id);
                            }
                        }
                    >
                        {icon("refresh")}
                        " Actualizar"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <Show when=move || client.get().is_none()>
                    <NoConnectionNotice />
                </Show>
                <ErrorBanner message=error />
                <Show when=move || loading.get()>
                    <Spinner label="Cargando envíos..." />
                </Show>
                <Show when=move || {
                    !loading.get() && error.get().is_none() && client.get().is_some() && items.get().is_empty()
                }>
                    <p class="empty-state">{NO_SHIPMENTS_TODAY}</p>
                </Show>

                <Show when=move || !items.get().is_empty()>
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Envío"</TableHeaderCell>
                                <TableHeaderCell>"Producto"</TableHeaderCell>
                                <TableHeaderCell>"Cantidad"</TableHeaderCell>
                                <TableHeaderCell>"Destinatario"</TableHeaderCell>
                                <TableHeaderCell>"Dirección"</TableHeaderCell>
                                <TableHeaderCell>"Límite de despacho"</TableHeaderCell>
                                <TableHeaderCell>"Orden"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || items.get()
                                key=|s| s.id.clone()
                                children=move |s: Shipment| {
                                    let schedule = s.schedule_label();
                                    let Shipment { id, product, quantity, receiver_name, direction, order_id, .. } = s;
                                    view! {
                                        <TableRow>
                                            <TableCell><TableCellLayout>{id}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout truncate=true>{product}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{format_thousands(quantity)}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout truncate=true>{receiver_name}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout truncate=true>{direction}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{schedule}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{order_id}</TableCellLayout></TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </Show>
            </div>
        </PageFrame>
    }
}
