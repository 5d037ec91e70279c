pub mod comparison;
pub mod pricing;
