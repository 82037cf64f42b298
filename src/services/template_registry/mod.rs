//! Mint template registry.
//!
//! Every mint instruction is issued against an on-chain template (a candy
//! machine account) that owns the collection configuration. The registry
//! looks the template up once per request and exposes the addresses the
//! mint instruction needs.
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
#[cfg(test)]
use mockall::automock;
use sha2::{Digest, Sha256};
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use super::{SolanaProviderError, SolanaProviderTrait};
use crate::constants::{TEMPLATE_ACCOUNT_SIGHASH, TEMPLATE_CREATOR_SEED};

const DISCRIMINATOR_LEN: usize = 8;
const AUTHORITY_OFFSET: usize = DISCRIMINATOR_LEN;
const WALLET_OFFSET: usize = AUTHORITY_OFFSET + 32;
const MIN_TEMPLATE_LEN: usize = WALLET_OFFSET + 32;

#[derive(Error, Debug)]
pub enum TemplateRegistryError {
    #[error("Template {0} does not exist")]
    NotFound(Pubkey),

    #[error("Template {address} is owned by {owner}, expected {expected}")]
    WrongOwner {
        address: Pubkey,
        owner: Pubkey,
        expected: Pubkey,
    },

    #[error("Template {0} has malformed account data")]
    InvalidData(Pubkey),

    #[error("Provider error: {0}")]
    Provider(#[from] SolanaProviderError),
}

/// Resolved mint template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintTemplate {
    pub address: Pubkey,
    pub program_id: Pubkey,
    pub authority: Pubkey,
    /// Treasury receiving the template's mint price.
    pub wallet: Pubkey,
    pub creator: Pubkey,
    pub creator_bump: u8,
}

impl MintTemplate {
    /// Parses raw template account data owned by `program_id`.
    pub fn from_account_data(
        address: Pubkey,
        program_id: Pubkey,
        data: &[u8],
    ) -> Result<Self, TemplateRegistryError> {
        if data.len() < MIN_TEMPLATE_LEN || data[..DISCRIMINATOR_LEN] != template_discriminator() {
            return Err(TemplateRegistryError::InvalidData(address));
        }

        let read_key = |offset: usize| {
            <[u8; 32]>::try_from(&data[offset..offset + 32])
                .map(Pubkey::new_from_array)
                .map_err(|_| TemplateRegistryError::InvalidData(address))
        };
        let authority = read_key(AUTHORITY_OFFSET)?;
        let wallet = read_key(WALLET_OFFSET)?;
        let (creator, creator_bump) = find_template_creator(&address, &program_id);

        Ok(Self {
            address,
            program_id,
            authority,
            wallet,
            creator,
            creator_bump,
        })
    }
}

/// Account discriminator of a template account.
pub fn template_discriminator() -> [u8; DISCRIMINATOR_LEN] {
    let digest = Sha256::digest(TEMPLATE_ACCOUNT_SIGHASH.as_bytes());
    let mut discriminator = [0u8; DISCRIMINATOR_LEN];
    discriminator.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
    discriminator
}

/// PDA that signs as creator for every token minted from `template`.
pub fn find_template_creator(template: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[TEMPLATE_CREATOR_SEED, template.as_ref()], program_id)
}

#[async_trait]
#[cfg_attr(test, automock)]
pub trait TemplateRegistryTrait: Send + Sync {
    async fn get_template(&self) -> Result<MintTemplate, TemplateRegistryError>;
}

/// Registry reading the configured template from the ledger.
pub struct CandyMachineRegistry {
    provider: Arc<dyn SolanaProviderTrait>,
    template: Pubkey,
    program_id: Pubkey,
}

impl CandyMachineRegistry {
    pub fn new(provider: Arc<dyn SolanaProviderTrait>, template: Pubkey, program_id: Pubkey) -> Self {
        Self {
            provider,
            template,
            program_id,
        }
    }
}

#[async_trait]
impl TemplateRegistryTrait for CandyMachineRegistry {
    async fn get_template(&self) -> Result<MintTemplate, TemplateRegistryError> {
        let account = self
            .provider
            .get_account_from_pubkey(&self.template)
            .await?
            .ok_or(TemplateRegistryError::NotFound(self.template))?;

        if account.owner != self.program_id {
            return Err(TemplateRegistryError::WrongOwner {
                address: self.template,
                owner: account.owner,
                expected: self.program_id,
            });
        }

        let template =
            MintTemplate::from_account_data(self.template, self.program_id, &account.data)?;
        debug!(
            "Resolved template {} (treasury {})",
            template.address, template.wallet
        );
        Ok(template)
    }
}
