//! # API Routes Module
//!
//! Configures HTTP routes for the mint service.
//!
//! ## Routes
//!
//! * `/health` - Health check endpoint
//! * `/metrics` - Prometheus metrics
//! * `/api/mint-gasless`, `/api/mint-self-paid`, `/api/mint` - Transaction-request endpoints

pub mod health;
pub mod metrics;
pub mod mint;

use actix_web::web;
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::init)
        .configure(mint::init)
        .configure(metrics::init);
}
