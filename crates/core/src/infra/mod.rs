pub mod identifier;
pub mod metrics;
