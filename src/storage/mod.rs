pub mod bus;
pub mod medium;
pub mod store;
