//! Tab titles, one place for every key.

use super::keys;
use contracts::dashboards::d400_store_summary::available_reports;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_point_of_sale::PointOfSale;

/// Readable title for a tab key. Report keys carry a client id suffix and
/// resolve through the report catalog. Unknown keys give `""`.
pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        // ── Sincronización ───────────────────────────────────────────────
        keys::HOME => "Inicio",
        keys::CONNECTIONS => "Conexiones a ML",

        // ── Catálogo ─────────────────────────────────────────────────────
        keys::PRODUCTS => "Productos",
        keys::PRODUCT_WIZARD => "Crear Producto",
        keys::WAREHOUSES => "Bodegas",
        keys::WAREHOUSE_NEW => "Crear Bodega",

        // ── Reportes / Operación ─────────────────────────────────────────
        keys::REPORTS => "Reportes",
        keys::SHIPMENTS => "Envíos del día",
        keys::POINT_OF_SALE => PointOfSale::display_name(),

        // ── Sistema ──────────────────────────────────────────────────────
        keys::INFORMATION => "Información",

        k if k.starts_with(keys::WAREHOUSE_DETAIL) => "Bodega",
        k => available_reports()
            .iter()
            .find(|r| k.starts_with(r.key))
            .map(|r| r.label)
            .unwrap_or(""),
    }
}

/// Title of a detail tab: «<entity> · <identifier>».
pub fn detail_tab_label(entity_label: &str, identifier: &str) -> String {
    format!("{} · {}", entity_label, identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_keys_resolve_through_catalog() {
        assert_eq!(tab_label_for_key("d403_top_selling_998877"), "Productos más vendidos");
        assert_eq!(tab_label_for_key("a005_shipments_1"), "Envíos del día");
        assert_eq!(tab_label_for_key(keys::SHIPMENTS), "Envíos del día");
        assert_eq!(tab_label_for_key("a002_warehouse_detail_4"), "Bodega");
        assert_eq!(tab_label_for_key("nope"), "");
    }

    #[test]
    fn detail_label_joins_entity_and_id() {
        assert_eq!(detail_tab_label("Bodega", "Central"), "Bodega · Central");
    }
}
