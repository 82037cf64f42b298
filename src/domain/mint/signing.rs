//! Partial signing of composed mint transactions.
//!
//! The service signs for every key it holds and leaves the requester's slot
//! empty. The result is checked before it leaves this module: a transaction
//! with an unsigned service slot, or a filled requester slot, is an error.
use log::debug;
use solana_sdk::{pubkey::Pubkey, signature::Signature, transaction::Transaction};

use super::required_signers;
use crate::{
    models::{MintError, SignerError},
    services::{sign_sdk_transaction, SolanaSignTrait},
};

/// Signs `transaction` with each of `signers`, leaving `requester` unsigned.
pub async fn sign_partial(
    mut transaction: Transaction,
    signers: &[&dyn SolanaSignTrait],
    requester: &Pubkey,
) -> Result<Transaction, MintError> {
    for signer in signers {
        if signer.address() == *requester {
            return Err(MintError::UnexpectedRequesterSignature(*requester));
        }
        let (signed, _) = sign_sdk_transaction(*signer, transaction).await?;
        transaction = signed;
    }

    verify_partial_signatures(&transaction, requester)?;
    debug!(
        "Signed {} of {} required slots",
        signers.len(),
        transaction.message.header.num_required_signatures
    );
    Ok(transaction)
}

/// Checks that only the requester's slot is empty and every filled slot
/// holds a valid signature.
pub fn verify_partial_signatures(
    transaction: &Transaction,
    requester: &Pubkey,
) -> Result<(), MintError> {
    let required = required_signers(transaction);
    if !required.contains(requester) {
        return Err(MintError::RequesterNotSigner(*requester));
    }

    let message = transaction.message_data();
    for (index, address) in required.iter().enumerate() {
        let signature = transaction
            .signatures
            .get(index)
            .copied()
            .unwrap_or_default();

        if address == requester {
            if signature != Signature::default() {
                return Err(MintError::UnexpectedRequesterSignature(*address));
            }
            continue;
        }

        if signature == Signature::default() {
            return Err(MintError::UnsignedRequiredSigner(*address));
        }
        if !signature.verify(address.as_ref(), &message) {
            return Err(MintError::Signing(SignerError::SigningError(format!(
                "signature for {address} does not verify"
            ))));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::compose,
        models::InstructionSequence,
        services::MockSolanaSignTrait,
    };
    use solana_sdk::{
        hash::Hash,
        instruction::{AccountMeta, Instruction},
        signature::{Keypair, Signer},
    };

    fn transaction(payer: &Pubkey, others: &[Pubkey]) -> Transaction {
        let accounts = others.iter().map(|key| AccountMeta::new(*key, true)).collect();
        let ix = Instruction::new_with_bytes(Pubkey::new_unique(), &[0], accounts);
        compose(
            vec![InstructionSequence::single(ix)],
            payer,
            Hash::new_unique(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_sign_partial_leaves_requester_slot_empty() {
        let payer = Keypair::new();
        let mint = Keypair::new();
        let requester = Pubkey::new_unique();
        let tx = transaction(&payer.pubkey(), &[mint.pubkey(), requester]);

        let signed = sign_partial(tx, &[&payer, &mint], &requester).await.unwrap();

        let index = required_signers(&signed)
            .iter()
            .position(|key| *key == requester)
            .unwrap();
        assert_eq!(signed.signatures[index], Signature::default());
        assert_eq!(
            signed
                .signatures
                .iter()
                .filter(|sig| **sig != Signature::default())
                .count(),
            2
        );
    }

    #[tokio::test]
    async fn test_sign_partial_fails_when_service_key_missing() {
        let payer = Keypair::new();
        let mint = Keypair::new();
        let requester = Pubkey::new_unique();
        let tx = transaction(&payer.pubkey(), &[mint.pubkey(), requester]);

        let result = sign_partial(tx, &[&payer], &requester).await;
        assert!(matches!(
            result,
            Err(MintError::UnsignedRequiredSigner(key)) if key == mint.pubkey()
        ));
    }

    #[tokio::test]
    async fn test_sign_partial_rejects_requester_as_signer() {
        let requester = Keypair::new();
        let tx = transaction(&Pubkey::new_unique(), &[requester.pubkey()]);

        let result = sign_partial(tx, &[&requester], &requester.pubkey()).await;
        assert!(matches!(result, Err(MintError::UnexpectedRequesterSignature(_))));
    }

    #[tokio::test]
    async fn test_sign_partial_requires_requester_slot() {
        let payer = Keypair::new();
        let tx = transaction(&payer.pubkey(), &[]);

        let result = sign_partial(tx, &[&payer], &Pubkey::new_unique()).await;
        assert!(matches!(result, Err(MintError::RequesterNotSigner(_))));
    }

    #[tokio::test]
    async fn test_sign_partial_rejects_forged_signature() {
        let address = Pubkey::new_unique();
        let requester = Pubkey::new_unique();
        let mut signer = MockSolanaSignTrait::new();
        signer.expect_address().return_const(address);
        signer
            .expect_sign()
            .returning(|_| Box::pin(async { Ok(Signature::new_unique()) }));

        let tx = transaction(&address, &[requester]);
        let result = sign_partial(tx, &[&signer], &requester).await;
        assert!(matches!(result, Err(MintError::Signing(_))));
    }

    #[tokio::test]
    async fn test_sign_partial_propagates_signer_error() {
        let address = Pubkey::new_unique();
        let requester = Pubkey::new_unique();
        let mut signer = MockSolanaSignTrait::new();
        signer.expect_address().return_const(address);
        signer.expect_sign().returning(|_| {
            Box::pin(async { Err(SignerError::SigningError("key unavailable".into())) })
        });

        let tx = transaction(&address, &[requester]);
        let result = sign_partial(tx, &[&signer], &requester).await;
        assert!(matches!(
            result,
            Err(MintError::Signing(SignerError::SigningError(_)))
        ));
    }
}
