pub const HOME: &str = "sys_home";
pub const INFORMATION: &str = "sys_information";

pub const CONNECTIONS: &str = "a001_connection";
pub const WAREHOUSES: &str = "a002_warehouse";
pub const WAREHOUSE_NEW: &str = "a002_warehouse_new";
pub const WAREHOUSE_DETAIL: &str = "a002_warehouse_detail_";
pub const PRODUCTS: &str = "a003_product";
pub const PRODUCT_WIZARD: &str = "a004_product_draft";
/// Daily shipments of the selected connection. Report links append a client id.
pub const SHIPMENTS: &str = "a005_shipments";

pub const REPORTS: &str = "d400_store_summary";

pub const POINT_OF_SALE: &str = "u501_point_of_sale";

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::usecases::common::UseCaseMetadata;
    use contracts::usecases::u501_point_of_sale::PointOfSale;

    #[test]
    fn usecase_key_matches_metadata() {
        assert_eq!(POINT_OF_SALE, PointOfSale::full_name());
    }
}
