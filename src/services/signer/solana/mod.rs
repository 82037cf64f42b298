//! Solana signer implementation for the keys the service holds.
//!
//! Provides:
//! - The long-lived service payer, loaded once at startup
//! - Ephemeral mint identities generated per request
//!
//! # Architecture
//!
//! ```text
//! SolanaSignTrait
//!   ├── LocalSigner (service payer, base58 secret from the environment)
//!   └── Keypair     (ephemeral mint identity, dropped after the request)
//! ```
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer as SdkSigner},
    transaction::Transaction,
};

mod local_signer;
pub use local_signer::*;

use crate::models::SignerError;

#[async_trait]
#[cfg_attr(test, automock)]
/// Trait defining Solana-specific signing operations
pub trait SolanaSignTrait: Sync + Send {
    /// Returns the public key of the signer
    fn address(&self) -> Pubkey;

    /// Signs a message using the Solana signing scheme
    ///
    /// # Arguments
    ///
    /// * `message` - The message bytes to sign
    async fn sign(&self, message: &[u8]) -> Result<Signature, SignerError>;
}

#[async_trait]
impl SolanaSignTrait for Keypair {
    fn address(&self) -> Pubkey {
        SdkSigner::pubkey(self)
    }

    async fn sign(&self, message: &[u8]) -> Result<Signature, SignerError> {
        self.try_sign_message(message)
            .map_err(|e| SignerError::SigningError(e.to_string()))
    }
}

/// Signs a Solana SDK transaction by finding the signer's position and adding the signature
///
/// This helper function:
/// 1. Finds the signer's position in the transaction's account_keys
/// 2. Validates it's marked as a required signer
/// 3. Signs the transaction message
/// 4. Inserts the signature at the correct position, leaving other slots untouched
///
/// # Returns
///
/// A Result containing either a tuple of (signed Transaction, Signature) or a SignerError
pub async fn sign_sdk_transaction<T: SolanaSignTrait + ?Sized>(
    signer: &T,
    mut transaction: Transaction,
) -> Result<(Transaction, Signature), SignerError> {
    let signer_pubkey = signer.address();

    let signer_index = transaction
        .message
        .account_keys
        .iter()
        .position(|key| *key == signer_pubkey)
        .ok_or_else(|| {
            SignerError::SigningError(format!(
                "Signer {signer_pubkey} not found in transaction account keys"
            ))
        })?;

    let num_required = transaction.message.header.num_required_signatures as usize;
    if signer_index >= num_required {
        return Err(SignerError::SigningError(format!(
            "Signer {signer_pubkey} is not marked as a required signer in the transaction (position {signer_index} >= {num_required})"
        )));
    }

    let signature = signer.sign(&transaction.message_data()).await?;

    // Keep exactly one slot per required signer; existing signatures survive.
    transaction
        .signatures
        .resize(num_required, Signature::default());
    transaction.signatures[signer_index] = signature;

    Ok((transaction, signature))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::{
        hash::Hash,
        instruction::{AccountMeta, Instruction},
        message::Message,
    };

    fn two_signer_transaction(first: &Pubkey, second: &Pubkey) -> Transaction {
        let ix = Instruction::new_with_bytes(
            Pubkey::new_unique(),
            &[0],
            vec![AccountMeta::new(*second, true)],
        );
        let message = Message::new_with_blockhash(&[ix], Some(first), &Hash::new_unique());
        Transaction::new_unsigned(message)
    }

    #[tokio::test]
    async fn test_sign_sdk_transaction_fills_only_own_slot() {
        let payer = Keypair::new();
        let other = Pubkey::new_unique();
        let tx = two_signer_transaction(&payer.address(), &other);

        let (signed, signature) = sign_sdk_transaction(&payer, tx).await.unwrap();

        assert_eq!(signed.signatures.len(), 2);
        assert_eq!(signed.signatures[0], signature);
        assert_eq!(signed.signatures[1], Signature::default());
        assert!(signature.verify(payer.address().as_ref(), &signed.message_data()));
    }

    #[tokio::test]
    async fn test_sign_sdk_transaction_preserves_existing_signatures() {
        let payer = Keypair::new();
        let second = Keypair::new();
        let tx = two_signer_transaction(&payer.address(), &second.address());

        let (tx, first_sig) = sign_sdk_transaction(&payer, tx).await.unwrap();
        let (tx, second_sig) = sign_sdk_transaction(&second, tx).await.unwrap();

        assert_eq!(tx.signatures, vec![first_sig, second_sig]);
        assert!(tx.verify().is_ok());
    }

    #[tokio::test]
    async fn test_sign_sdk_transaction_signer_not_in_transaction() {
        let stranger = Keypair::new();
        let tx = two_signer_transaction(&Pubkey::new_unique(), &Pubkey::new_unique());

        match sign_sdk_transaction(&stranger, tx).await {
            Err(SignerError::SigningError(msg)) => assert!(msg.contains("not found")),
            other => panic!("Expected SigningError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_sign_sdk_transaction_signer_not_required() {
        let fee_payer = Pubkey::new_unique();
        let readonly = Keypair::new();
        let ix = Instruction::new_with_bytes(
            Pubkey::new_unique(),
            &[0],
            vec![AccountMeta::new_readonly(readonly.address(), false)],
        );
        let message = Message::new_with_blockhash(&[ix], Some(&fee_payer), &Hash::new_unique());
        let tx = Transaction::new_unsigned(message);

        match sign_sdk_transaction(&readonly, tx).await {
            Err(SignerError::SigningError(msg)) => {
                assert!(msg.contains("not marked as a required signer"))
            }
            other => panic!("Expected SigningError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_sign_sdk_transaction_propagates_signer_failure() {
        let address = Pubkey::new_unique();
        let mut signer = MockSolanaSignTrait::new();
        signer.expect_address().return_const(address);
        signer
            .expect_sign()
            .returning(|_| Box::pin(async { Err(SignerError::SigningError("hsm offline".into())) }));

        let tx = two_signer_transaction(&address, &Pubkey::new_unique());
        let result = sign_sdk_transaction(&signer, tx).await;
        assert!(matches!(result, Err(SignerError::SigningError(msg)) if msg == "hsm offline"));
    }
}
