//! # API Controllers Module
//!
//! Request validation and orchestration behind the HTTP routes.

pub mod mint;
