//! Metrics module for the application.
//!
//! - This module contains the global Prometheus registry.
//! - Defines specific metrics for the application.

pub mod middleware;
use lazy_static::lazy_static;
use prometheus::{CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};

lazy_static! {
    // Global Prometheus registry.
    pub static ref REGISTRY: Registry = Registry::new();

    // Counter: Total HTTP requests.
    pub static ref REQUEST_COUNTER: CounterVec = {
        let opts = Opts::new("requests_total", "Total number of HTTP requests");
        let counter_vec = CounterVec::new(opts, &["endpoint", "method", "status"]).unwrap();
        REGISTRY.register(Box::new(counter_vec.clone())).unwrap();
        counter_vec
    };

    // Counter: Mint transactions built, by flow and outcome.
    pub static ref MINT_TRANSACTIONS: CounterVec = {
        let opts = Opts::new("mint_transactions_total", "Total number of mint transaction requests");
        let counter_vec = CounterVec::new(opts, &["flow", "outcome"]).unwrap();
        REGISTRY.register(Box::new(counter_vec.clone())).unwrap();
        counter_vec
    };

    // Histogram for the time spent assembling a transaction, collaborator calls included.
    pub static ref MINT_BUILD_SECONDS: HistogramVec = {
      let histogram_opts = HistogramOpts::new("mint_build_seconds", "Time spent building a mint transaction in seconds")
          .buckets(vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]);
      let histogram_vec = HistogramVec::new(histogram_opts, &["flow"]).unwrap();
      REGISTRY.register(Box::new(histogram_vec.clone())).unwrap();
      histogram_vec
    };
}

/// Gather all metrics and encode into the provided format.
pub fn gather_metrics() -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(buffer)
}

/// Records the outcome of one mint request.
pub fn observe_mint(flow: &str, success: bool, elapsed_seconds: f64) {
    let outcome = if success { "success" } else { "failure" };
    MINT_TRANSACTIONS.with_label_values(&[flow, outcome]).inc();
    MINT_BUILD_SECONDS
        .with_label_values(&[flow])
        .observe(elapsed_seconds);
}
