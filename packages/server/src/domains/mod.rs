// Business domains
pub mod analysis;
