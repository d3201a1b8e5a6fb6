pub mod cashier;
pub mod generator;
