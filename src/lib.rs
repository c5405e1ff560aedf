pub mod config;
pub mod dto;
pub mod http;
pub mod logic;
pub mod store;
