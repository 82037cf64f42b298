//! # Services Module
//!
//! External collaborators of the mint pipeline: the Solana RPC provider, the
//! service signers, the mint template registry and associated token account
//! resolution.

mod provider;
pub use provider::*;

mod signer;
pub use signer::*;

mod template_registry;
pub use template_registry::*;

mod token;
pub use token::*;
