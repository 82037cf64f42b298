//! # API Module
//!
//! Contains the HTTP API of the mint service.
//!
//! ## Structure
//!
//! * `controllers` - Request validation and orchestration
//! * `routes` - API endpoint definitions and routing

pub mod controllers;

pub mod routes;
