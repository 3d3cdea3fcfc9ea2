pub mod cart_service;
pub mod export_service;
