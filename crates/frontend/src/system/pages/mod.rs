pub mod home;
pub mod information;
pub mod login;
