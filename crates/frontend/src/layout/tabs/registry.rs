//! Tab key → view. Every tab key the application opens is resolved here.

use super::keys;
use crate::dashboards::{
    CategoryIncomeDashboard, SalesComparisonDashboard, StockHistoryDashboard,
    StoreSummaryDashboard, TopSellingDashboard,
};
use crate::domain::a001_connection::ui::list::ConnectionList;
use crate::domain::a002_warehouse::ui::details::WarehouseDetail;
use crate::domain::a002_warehouse::ui::list::WarehouseList;
use crate::domain::a002_warehouse::ui::new::WarehouseNew;
use crate::domain::a003_product::ui::list::ProductList;
use crate::domain::a004_product_draft::ui::wizard::ProductWizard;
use crate::domain::a005_shipment::ui::list::ShipmentList;
use crate::layout::global_context::AppGlobalContext;
use crate::system::pages::home::HomePage;
use crate::system::pages::information::InformationPage;
use crate::usecases::u501_point_of_sale::PointOfSaleView;
use contracts::dashboards::d400_store_summary::{
    REPORT_CATEGORY_INCOME, REPORT_COMPARE_MONTH, REPORT_COMPARE_YEAR, REPORT_DAILY_SHIPMENTS,
    REPORT_STOCK_HISTORY, REPORT_TOP_SELLING,
};
use contracts::dashboards::d402_sales_comparison::ComparisonMode;
use leptos::logging::log;
use leptos::prelude::*;

/// Content of the tab with the given key, or a placeholder for unknown keys.
pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let key_for_close = key.to_string();
    let close = Callback::new(move |_: ()| tabs_store.close_tab(&key_for_close));

    // Keys with a suffix: `<prefix><id>`.
    if let Some((prefix, id)) = split_suffixed(key) {
        log!("✅ Creating '{}' for id: {}", prefix, id);
        return match prefix {
            keys::WAREHOUSE_DETAIL => {
                view! { <WarehouseDetail id=id on_close=close /> }.into_any()
            }
            REPORT_STOCK_HISTORY => view! { <StockHistoryDashboard client_id=id /> }.into_any(),
            REPORT_COMPARE_MONTH => view! {
                <SalesComparisonDashboard client_id=id mode=ComparisonMode::Month />
            }
            .into_any(),
            REPORT_COMPARE_YEAR => view! {
                <SalesComparisonDashboard client_id=id mode=ComparisonMode::Year />
            }
            .into_any(),
            REPORT_TOP_SELLING => view! { <TopSellingDashboard client_id=id /> }.into_any(),
            REPORT_CATEGORY_INCOME => {
                view! { <CategoryIncomeDashboard client_id=id /> }.into_any()
            }
            _ => view! { <ShipmentList client_id=Some(id) /> }.into_any(),
        };
    }

    match key {
        // Sincronización
        keys::HOME => view! { <HomePage /> }.into_any(),
        keys::CONNECTIONS => view! { <ConnectionList /> }.into_any(),

        // Catálogo
        keys::PRODUCTS => view! { <ProductList /> }.into_any(),
        keys::PRODUCT_WIZARD => view! { <ProductWizard /> }.into_any(),
        keys::WAREHOUSES => view! { <WarehouseList /> }.into_any(),
        keys::WAREHOUSE_NEW => view! { <WarehouseNew on_close=close /> }.into_any(),

        // Reportes / Operación
        keys::REPORTS => view! { <StoreSummaryDashboard /> }.into_any(),
        keys::SHIPMENTS => view! { <ShipmentList client_id=None /> }.into_any(),
        keys::POINT_OF_SALE => view! { <PointOfSaleView /> }.into_any(),

        // Sistema
        keys::INFORMATION => view! { <InformationPage /> }.into_any(),

        _ => {
            log!("⚠️ Unknown tab type: {}", key);
            view! { <div class="placeholder">"Página no disponible"</div> }.into_any()
        }
    }
}

/// Splits `<prefix><id>` for every prefixed key family.
fn split_suffixed(key: &str) -> Option<(&'static str, String)> {
    const PREFIXES: [&str; 7] = [
        keys::WAREHOUSE_DETAIL,
        REPORT_STOCK_HISTORY,
        REPORT_COMPARE_MONTH,
        REPORT_COMPARE_YEAR,
        REPORT_TOP_SELLING,
        REPORT_CATEGORY_INCOME,
        REPORT_DAILY_SHIPMENTS,
    ];
    PREFIXES.iter().find_map(|prefix| {
        key.strip_prefix(prefix)
            .filter(|id| !id.is_empty())
            .map(|id| (*prefix, id.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_report_and_detail_keys() {
        assert_eq!(
            split_suffixed("d402_compare_year_556"),
            Some((REPORT_COMPARE_YEAR, "556".to_string()))
        );
        assert_eq!(
            split_suffixed("a002_warehouse_detail_12"),
            Some((keys::WAREHOUSE_DETAIL, "12".to_string()))
        );
        assert_eq!(split_suffixed(keys::SHIPMENTS), None);
        assert_eq!(split_suffixed("a005_shipments_"), None);
        assert_eq!(split_suffixed(keys::WAREHOUSE_NEW), None);
    }
}
