pub mod cart;
pub mod checkout;
pub mod export;
pub mod pricing;
