//! # Dino Mint Service
//!
//! Serves Solana Pay transaction requests that mint NFTs from a candy machine
//! template. Each POST returns a transaction signed by the service and left
//! open for the requester's signature.
//!
//! ## Modules
//!
//! * `api` - HTTP routes and controllers
//! * `config` - Environment configuration
//! * `constants` - Defaults and fixed protocol values
//! * `domain` - Instruction building, composition, signing and encoding
//! * `logging` - Logger setup
//! * `metrics` - Prometheus metrics
//! * `models` - Request, response and error types
//! * `services` - Ledger RPC, keys, template registry and token accounts

pub mod api;
pub mod config;
pub mod constants;
pub mod domain;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
