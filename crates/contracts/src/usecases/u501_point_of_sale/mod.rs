pub mod client;

pub use client::*;

use crate::usecases::common::UseCaseMetadata;

pub struct PointOfSale;

impl UseCaseMetadata for PointOfSale {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "point_of_sale"
    }

    fn display_name() -> &'static str {
        "Punto de Venta"
    }

    fn description() -> &'static str {
        "Clientes de la empresa asociada a la conexión seleccionada"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name() {
        assert_eq!(PointOfSale::full_name(), "u501_point_of_sale");
    }
}
