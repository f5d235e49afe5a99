pub mod exporter;
pub mod middleware;
pub mod prometheus;
