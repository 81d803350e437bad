use crate::domain::a002_warehouse::api::fetch_warehouses;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_tab_label, keys};
use crate::shared::components::ErrorBanner;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::domain::a002_warehouse::{
    company_options, filter_and_sort, CreationOrder, Warehouse,
};
use contracts::shared::format::format_datetime_es;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[derive(Clone, Debug, PartialEq)]
pub struct WarehouseRow {
    pub id: String,
    pub name: String,
    pub location: String,
    pub company: String,
    pub updated_at: String,
}

impl From<Warehouse> for WarehouseRow {
    fn from(w: Warehouse) -> Self {
        Self {
            company: w.company_name().to_string(),
            updated_at: w
                .updated_at
                .as_deref()
                .map(format_datetime_es)
                .unwrap_or_else(|| "-".to_string()),
            id: w.id,
            name: w.name,
            location: w.location,
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn WarehouseList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let (warehouses, set_warehouses) = signal::<Vec<Warehouse>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let company_filter = RwSignal::new(String::new());
    let order = RwSignal::new(String::new());

    let fetch = move || {
        set_loading.set(true);
        spawn_local(async move {
            match fetch_warehouses().await {
                Ok(list) => {
                    set_warehouses.set(list);
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("warehouses: {}", e);
                    set_error.set(Some(e.user_message("Error al cargar las bodegas.")));
                }
            }
            set_loading.set(false);
        });
    };
    fetch();

    let options = Memo::new(move |_| warehouses.with(|w| company_options(w)));
    let rows = Memo::new(move |_| {
        let filter = company_filter.get();
        let order = CreationOrder::parse(&order.get());
        warehouses.with(|w| {
            filter_and_sort(w, &filter, order)
                .into_iter()
                .map(WarehouseRow::from)
                .collect::<Vec<_>>()
        })
    });

    let open_detail = move |row: &WarehouseRow| {
        let key = format!("{}{}", keys::WAREHOUSE_DETAIL, row.id);
        ctx.open_tab(&key, &detail_tab_label("Bodega", &row.name));
    };

    view! {
        <PageFrame page_id="a002_warehouse--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Bodegas"</h1>
                    <Badge appearance=BadgeAppearance::Tint>{move || rows.get().len().to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| ctx.open_registered(keys::WAREHOUSE_NEW)
                    >
                        {icon("plus")}
                        " Crear Bodega"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch() disabled=loading>
                        {icon("refresh")}
                    </Button>
                </div>
            </div>

            <div class="filter-panel">
                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <div class="form__group">
                        <label class="form__label">"Empresa"</label>
                        <Select value=company_filter>
                            {move || options.get().into_iter().map(|o| view! {
                                <option value=o.value>{o.label}</option>
                            }).collect_view()}
                        </Select>
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Fecha de creación"</label>
                        <Select value=order>
                            <option value=CreationOrder::None.as_str()>"Sin orden"</option>
                            <option value=CreationOrder::Ascending.as_str()>"Más antiguas primero"</option>
                            <option value=CreationOrder::Descending.as_str()>"Más recientes primero"</option>
                        </Select>
                    </div>
                </Flex>
            </div>

            <div class="page__content">
                <ErrorBanner message=error />
                <Show when=move || loading.get()>
                    <Spinner label="Cargando bodegas..." />
                </Show>
                <Show when=move || !loading.get() && error.get().is_none() && rows.get().is_empty()>
                    <p class="empty-state">"No hay bodegas para mostrar."</p>
                </Show>
                <div class="card-grid">
                    <For
                        each=move || rows.get()
                        key=|row| row.id.clone()
                        children=move |row: WarehouseRow| {
                            let row_click = row.clone();
                            view! {
                                <div class="warehouse-card" on:click=move |_| open_detail(&row_click)>
                                    <div class="warehouse-card__icon">{icon("warehouse")}</div>
                                    <div class="warehouse-card__title">{row.name.clone()}</div>
                                    <div class="warehouse-card__meta">{format!("Actualizada: {}", row.updated_at)}</div>
                                    <div class="warehouse-card__meta">{format!("Ubicación: {}", row.location)}</div>
                                    <Show when={
                                        let company = row.company.clone();
                                        move || !company.is_empty()
                                    }>
                                        <div class="warehouse-card__meta">{row.company.clone()}</div>
                                    </Show>
                                </div>
                            }
                        }
                    />
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_formats_update_date() {
        let w: Warehouse = serde_json::from_str(
            r#"{"id": 4, "name": "Central", "location": "Santiago",
                "company": {"id": 1, "name": "Andes SpA"},
                "updated_at": "2024-05-02 09:30:00"}"#,
        )
        .unwrap();
        let row = WarehouseRow::from(w);
        assert_eq!(row.id, "4");
        assert_eq!(row.company, "Andes SpA");
        assert_eq!(row.updated_at, "02/05/2024 09:30");
    }

    #[test]
    fn missing_update_date_shows_dash() {
        let w: Warehouse = serde_json::from_str(r#"{"id": "7", "name": "Norte"}"#).unwrap();
        assert_eq!(WarehouseRow::from(w).updated_at, "-");
    }
}
