use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use super::SignerError;

/// Errors raised while assembling a mint transaction.
///
/// Only [`MintError::InvalidQuantity`] is caused by the caller; every other
/// variant is an internal failure whose details stay in the server log.
#[derive(Error, Debug)]
pub enum MintError {
    #[error("quantity must be a positive integer no greater than {max}")]
    InvalidQuantity { max: u8 },

    #[error("Mint template not found: {0}")]
    TemplateNotFound(String),

    #[error("Associated token account resolution failed: {0}")]
    AccountResolutionFailed(String),

    #[error("Payment token unavailable: {0}")]
    PaymentTokenUnavailable(String),

    #[error("Failed to fetch recent blockhash: {0}")]
    BlockhashUnavailable(String),

    #[error("Cannot compose a transaction without instructions")]
    EmptyInstructionSet,

    #[error("Failed to build instruction: {0}")]
    InstructionBuild(String),

    #[error("Signing failed: {0}")]
    Signing(#[from] SignerError),

    #[error("Required signer {0} was left unsigned")]
    UnsignedRequiredSigner(Pubkey),

    #[error("Requester slot {0} was signed by the service")]
    UnexpectedRequesterSignature(Pubkey),

    #[error("Requester {0} is not a required signer of the transaction")]
    RequesterNotSigner(Pubkey),

    #[error("Failed to serialize transaction: {0}")]
    Serialization(String),

    #[error("Transaction is {size} bytes, above the {limit} byte packet limit")]
    TransactionTooLarge { size: usize, limit: usize },
}

impl MintError {
    /// Whether the error stems from caller input rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, MintError::InvalidQuantity { .. })
    }
}
