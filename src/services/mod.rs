pub mod metrics;

pub use metrics::annual_equivalent_full_load_hrs;
