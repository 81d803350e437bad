pub mod a001_connection;
pub mod a002_warehouse;
pub mod a003_product;
pub mod a004_product_draft;
pub mod a005_shipment;
