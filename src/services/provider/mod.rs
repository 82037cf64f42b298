//! RPC providers for the ledger the service mints on.

mod solana;
pub use solana::*;
