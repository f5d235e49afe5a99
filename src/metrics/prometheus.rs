use prometheus::{
    exponential_buckets, histogram_opts, register_counter, register_histogram, register_int_gauge,
    Counter, Histogram, IntGauge,
};

pub static REQUESTS_TOTAL: once_cell::sync::Lazy<Counter> = once_cell::sync::Lazy::new(|| {
    register_counter!("starwars_api_requests_total", "Total number of HTTP requests").unwrap()
});

pub static ERRORS_TOTAL: once_cell::sync::Lazy<Counter> = once_cell::sync::Lazy::new(|| {
    register_counter!(
        "starwars_api_errors_total",
        "Total number of error responses"
    )
    .unwrap()
});

pub static ACTIVE_REQUESTS: once_cell::sync::Lazy<IntGauge> = once_cell::sync::Lazy::new(|| {
    register_int_gauge!("starwars_api_active_requests", "Current active requests").unwrap()
});

pub static LATENCY: once_cell::sync::Lazy<Histogram> = once_cell::sync::Lazy::new(|| {
    let opts = histogram_opts!(
        "starwars_api_latency_seconds",
        "End-to-end latency in seconds",
        exponential_buckets(0.001, 2.0, 15).unwrap()
    );
    register_histogram!(opts).unwrap()
});
