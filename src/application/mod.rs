pub mod aggregate;
pub mod dto;
pub mod ports;
pub mod services;
pub mod store;
