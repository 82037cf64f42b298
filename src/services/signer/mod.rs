//! Signer service module
//!
//! Key material the service holds. The payer keypair is loaded exactly once
//! at startup and shared read-only between requests through [`ServiceKeys`].
use std::sync::Arc;

use log::info;
use solana_sdk::pubkey::Pubkey;

use crate::{constants::PAYER_PRIVATE_KEY_ENV, models::SignerError};

mod solana;
pub use solana::*;

/// Long-lived service keys.
#[derive(Debug, Clone)]
pub struct ServiceKeys {
    payer: Arc<LocalSigner>,
}

impl ServiceKeys {
    pub fn new(payer: LocalSigner) -> Self {
        Self {
            payer: Arc::new(payer),
        }
    }

    /// Loads the payer keypair from `PAYER_PRIVATE_KEY`.
    ///
    /// Fails when the variable is unset, empty or not a valid base58 keypair.
    pub fn from_env() -> Result<Self, SignerError> {
        let secret = std::env::var(PAYER_PRIVATE_KEY_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                SignerError::Configuration(format!("{PAYER_PRIVATE_KEY_ENV} must be set"))
            })?;

        let payer = LocalSigner::from_base58(&secret)?;
        info!("Loaded service payer {}", payer.pubkey());
        Ok(Self::new(payer))
    }

    pub fn payer(&self) -> &LocalSigner {
        &self.payer
    }

    pub fn payer_pubkey(&self) -> Pubkey {
        self.payer.pubkey()
    }
}
