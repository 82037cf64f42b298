//! This module provides HTTP endpoints for interacting with service metrics.
//!
//! # Endpoints
//!
//! - `/metrics`: Returns every metric in Prometheus text format.
//! - `/metrics/{metric_name}`: Returns a single metric in Prometheus text format.

use crate::metrics::{gather_metrics, REGISTRY};
use actix_web::{get, web, HttpResponse, Responder};
use prometheus::{Encoder, TextEncoder};

/// Returns all metrics for a Prometheus scrape.
#[get("/metrics")]
async fn scrape_metrics() -> impl Responder {
    match gather_metrics() {
        Ok(body) => HttpResponse::Ok()
            .content_type(TextEncoder::new().format_type())
            .body(body),
        Err(e) => HttpResponse::InternalServerError().body(format!("Error: {}", e)),
    }
}

/// Returns the details of a specific metric in plain text format, or `404`
/// when no metric has that name.
#[get("/metrics/{metric_name}")]
async fn metric_detail(path: web::Path<String>) -> impl Responder {
    let metric_name = path.into_inner();
    let metric_families = REGISTRY.gather();

    for mf in metric_families {
        if mf.get_name() == metric_name {
            let encoder = TextEncoder::new();
            let mut buffer = Vec::new();
            if let Err(e) = encoder.encode(&[mf], &mut buffer) {
                return HttpResponse::InternalServerError().body(format!("Encoding error: {}", e));
            }
            return HttpResponse::Ok()
                .content_type(encoder.format_type())
                .body(buffer);
        }
    }
    HttpResponse::NotFound().body("Metric not found")
}

/// Initializes the HTTP services for the metrics module.
pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(scrape_metrics);
    cfg.service(metric_detail);
}
