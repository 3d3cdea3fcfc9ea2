pub mod audit;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod dto;
pub mod error;
pub mod export;
pub mod middleware;
pub mod models;
pub mod pricing;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
