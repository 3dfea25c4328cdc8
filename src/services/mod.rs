pub mod api;
pub mod customers;
pub mod seed;
pub mod state;
pub mod store;
pub mod suggestion;
