mod client_form;
mod view;

pub use view::PointOfSaleView;
