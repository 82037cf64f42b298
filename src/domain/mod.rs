//! # Domain Module
//!
//! Core domain logic of the mint service: building, composing, partially
//! signing and encoding mint transactions.

mod mint;
pub use mint::*;
