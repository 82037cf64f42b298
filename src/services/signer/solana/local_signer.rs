//! # Solana Local Signer Implementation
//!
//! Holds the service payer keypair in memory. The secret is read once from a
//! base58 string (the 64-byte `secret || public` layout produced by the
//! Solana CLI and wallets) and the decoded bytes are zeroized after parsing.
use async_trait::async_trait;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer as SdkSigner},
};
use zeroize::Zeroizing;

use crate::models::SignerError;

use super::SolanaSignTrait;

const KEYPAIR_LENGTH: usize = 64;

pub struct LocalSigner {
    keypair: Keypair,
}

impl LocalSigner {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }

    pub fn from_base58(secret: &str) -> Result<Self, SignerError> {
        let bytes = Zeroizing::new(
            bs58::decode(secret.trim())
                .into_vec()
                .map_err(|e| SignerError::KeyError(format!("Invalid base58 secret: {e}")))?,
        );

        if bytes.len() != KEYPAIR_LENGTH {
            return Err(SignerError::KeyError(format!(
                "Keypair must be {KEYPAIR_LENGTH} bytes, got {}",
                bytes.len()
            )));
        }

        let keypair = Keypair::try_from(bytes.as_slice())
            .map_err(|e| SignerError::KeyError(format!("Invalid keypair bytes: {e}")))?;

        Ok(Self { keypair })
    }

    pub fn pubkey(&self) -> Pubkey {
        SdkSigner::pubkey(&self.keypair)
    }
}

impl std::fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSigner")
            .field("pubkey", &self.pubkey())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SolanaSignTrait for LocalSigner {
    fn address(&self) -> Pubkey {
        self.pubkey()
    }

    async fn sign(&self, message: &[u8]) -> Result<Signature, SignerError> {
        SolanaSignTrait::sign(&self.keypair, message).await
    }
}
