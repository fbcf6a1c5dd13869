pub mod metrics;
pub mod providers;
