pub mod common;
pub mod u501_point_of_sale;
