//! Configuration read from the process environment.
//!
//! A `.env` file is loaded by `main` before any of these are read.

mod error;
pub use error::*;

mod server_config;
pub use server_config::*;

mod mint_config;
pub use mint_config::*;
