//! Associated token account resolution and SPL token instructions.
//!
//! The gated flow charges the requester in an SPL token, which requires both
//! parties to own an associated token account (ATA) for the payment mint.
//! Resolution has create-if-absent semantics: a missing ATA is created in a
//! standalone transaction funded and signed by the service payer before the
//! mint transaction is composed.
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
#[cfg(test)]
use mockall::automock;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, transaction::Transaction};
use spl_associated_token_account::{
    get_associated_token_address, instruction::create_associated_token_account_idempotent,
};
use spl_token::instruction as spl_token_instruction;
use thiserror::Error;

use super::{sign_sdk_transaction, ServiceKeys, SolanaProviderError, SolanaProviderTrait};
use crate::models::SignerError;

#[derive(Error, Debug)]
pub enum TokenAccountError {
    #[error("Provider error: {0}")]
    Provider(#[from] SolanaProviderError),

    #[error("Signer error: {0}")]
    Signer(#[from] SignerError),

    #[error("Account {address} exists but is not a token account for mint {mint}")]
    UnexpectedOwner { address: Pubkey, mint: Pubkey },

    #[error("Instruction error: {0}")]
    InstructionError(String),
}

/// Resolves associated token accounts, creating them when absent.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait AssociatedAccountResolverTrait: Send + Sync {
    /// Returns the ATA of `owner` for `mint`, creating it first if needed.
    async fn resolve(&self, owner: &Pubkey, mint: &Pubkey) -> Result<Pubkey, TokenAccountError>;
}

/// Resolver backed by the Solana RPC provider.
pub struct RpcAssociatedAccountResolver {
    provider: Arc<dyn SolanaProviderTrait>,
    keys: ServiceKeys,
}

impl RpcAssociatedAccountResolver {
    pub fn new(provider: Arc<dyn SolanaProviderTrait>, keys: ServiceKeys) -> Self {
        Self { provider, keys }
    }

    async fn create(&self, owner: &Pubkey, mint: &Pubkey) -> Result<(), TokenAccountError> {
        let payer = self.keys.payer_pubkey();
        let instruction =
            create_associated_token_account_idempotent(&payer, owner, mint, &spl_token::id());
        let blockhash = self.provider.get_latest_blockhash().await?;

        let mut transaction = Transaction::new_with_payer(&[instruction], Some(&payer));
        transaction.message.recent_blockhash = blockhash;
        let (transaction, _) = sign_sdk_transaction(self.keys.payer(), transaction).await?;

        let signature = self
            .provider
            .send_and_confirm_transaction(&transaction)
            .await?;
        info!("Created associated token account for {owner} (mint {mint}): {signature}");
        Ok(())
    }
}

#[async_trait]
impl AssociatedAccountResolverTrait for RpcAssociatedAccountResolver {
    async fn resolve(&self, owner: &Pubkey, mint: &Pubkey) -> Result<Pubkey, TokenAccountError> {
        let address = get_associated_token_address(owner, mint);

        match self.provider.get_account_from_pubkey(&address).await? {
            Some(account) if account.owner == spl_token::id() => {
                debug!("Associated token account {address} already exists");
            }
            Some(_) => {
                return Err(TokenAccountError::UnexpectedOwner {
                    address,
                    mint: *mint,
                })
            }
            None => self.create(owner, mint).await?,
        }

        Ok(address)
    }
}

/// Builds an SPL `TransferChecked` instruction signed by `authority`.
pub fn create_transfer_checked_instruction(
    source: &Pubkey,
    mint: &Pubkey,
    destination: &Pubkey,
    authority: &Pubkey,
    amount: u64,
    decimals: u8,
) -> Result<Instruction, TokenAccountError> {
    spl_token_instruction::transfer_checked(
        &spl_token::id(),
        source,
        mint,
        destination,
        authority,
        &[],
        amount,
        decimals,
    )
    .map_err(|e| TokenAccountError::InstructionError(e.to_string()))
}
