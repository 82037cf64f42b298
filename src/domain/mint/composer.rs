//! Transaction composition.
use std::collections::BTreeSet;

use solana_sdk::{hash::Hash, message::Message, pubkey::Pubkey, transaction::Transaction};

use crate::models::{InstructionSequence, MintError};

/// Concatenates `sequences` in order into an unsigned transaction paid by
/// `fee_payer`.
///
/// Every required signer gets an empty signature slot. Instructions are
/// neither reordered nor deduplicated.
pub fn compose<I>(sequences: I, fee_payer: &Pubkey, blockhash: Hash) -> Result<Transaction, MintError>
where
    I: IntoIterator<Item = InstructionSequence>,
{
    let instructions: InstructionSequence = sequences.into_iter().collect();
    if instructions.is_empty() {
        return Err(MintError::EmptyInstructionSet);
    }

    let message = Message::new_with_blockhash(instructions.as_slice(), Some(fee_payer), &blockhash);
    Ok(Transaction::new_unsigned(message))
}

/// Addresses that must sign `transaction`, in slot order.
pub fn required_signers(transaction: &Transaction) -> Vec<Pubkey> {
    let num_required = transaction.message.header.num_required_signatures as usize;
    transaction
        .message
        .account_keys
        .iter()
        .take(num_required)
        .copied()
        .collect()
}

/// Signer set of a transaction: the fee payer plus every signer flag.
pub fn signer_set(transaction: &Transaction) -> BTreeSet<Pubkey> {
    required_signers(transaction).into_iter().collect()
}
