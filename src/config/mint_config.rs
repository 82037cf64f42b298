use std::str::FromStr;

use solana_sdk::pubkey::Pubkey;

use crate::{
    constants::{
        DEFAULT_MAX_MINT_QUANTITY, DEFAULT_MINT_ICON, DEFAULT_MINT_LABEL, DEFAULT_MINT_PROGRAM_ID,
        DEFAULT_MINT_TEMPLATE_ADDRESS, DEFAULT_PAYMENT_PRICE_PER_UNIT, DEFAULT_PAYMENT_TOKEN_MINT,
    },
    models::MintMetadataResponse,
};

use super::{env_or, parse_env_or, ConfigError};

/// Addresses and limits of the mint flows.
#[derive(Debug, Clone, PartialEq)]
pub struct MintConfig {
    pub program_id: Pubkey,
    pub template: Pubkey,
    pub payment_token_mint: Pubkey,
    /// Whole payment tokens charged per gated mint.
    pub price_per_unit: u64,
    pub max_quantity: u8,
    pub label: String,
    pub icon: String,
}

impl MintConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let max_quantity = parse_env_or("MAX_MINT_QUANTITY", DEFAULT_MAX_MINT_QUANTITY)?;
        if max_quantity == 0 {
            return Err(ConfigError::invalid(
                "MAX_MINT_QUANTITY",
                "must be at least 1",
            ));
        }

        Ok(Self {
            program_id: parse_env_or("MINT_PROGRAM_ID", default_pubkey(DEFAULT_MINT_PROGRAM_ID)?)?,
            template: parse_env_or(
                "MINT_TEMPLATE_ADDRESS",
                default_pubkey(DEFAULT_MINT_TEMPLATE_ADDRESS)?,
            )?,
            payment_token_mint: parse_env_or(
                "PAYMENT_TOKEN_MINT",
                default_pubkey(DEFAULT_PAYMENT_TOKEN_MINT)?,
            )?,
            price_per_unit: parse_env_or("PAYMENT_PRICE_PER_UNIT", DEFAULT_PAYMENT_PRICE_PER_UNIT)?,
            max_quantity,
            label: env_or("MINT_LABEL", DEFAULT_MINT_LABEL),
            icon: env_or("MINT_ICON", DEFAULT_MINT_ICON),
        })
    }

    /// Metadata served on GET by every mint endpoint.
    pub fn metadata(&self) -> MintMetadataResponse {
        MintMetadataResponse {
            label: self.label.clone(),
            icon: self.icon.clone(),
        }
    }
}

fn default_pubkey(value: &str) -> Result<Pubkey, ConfigError> {
    Pubkey::from_str(value).map_err(|e| ConfigError::invalid(value, e.to_string()))
}

impl Default for MintConfig {
    fn default() -> Self {
        Self {
            program_id: Pubkey::default(),
            template: Pubkey::default(),
            payment_token_mint: Pubkey::default(),
            price_per_unit: DEFAULT_PAYMENT_PRICE_PER_UNIT,
            max_quantity: DEFAULT_MAX_MINT_QUANTITY,
            label: DEFAULT_MINT_LABEL.to_string(),
            icon: DEFAULT_MINT_ICON.to_string(),
        }
    }
}
