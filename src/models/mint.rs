use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::fmt;

use crate::constants::{DELEGATED_MINT_MESSAGE, GATED_MINT_MESSAGE, SELF_PAID_MINT_MESSAGE};

use super::MintError;

/// The mint flows exposed over the transaction-request protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MintFlow {
    /// The service pays the network fee; the requester only co-signs.
    Delegated,
    /// The requester pays the network fee.
    SelfPaid,
    /// The requester pays for `quantity` mints with an SPL token transfer.
    Gated,
}

impl MintFlow {
    pub const ALL: [MintFlow; 3] = [MintFlow::Delegated, MintFlow::SelfPaid, MintFlow::Gated];

    /// HTTP path of the flow's transaction-request endpoint.
    pub fn path(&self) -> &'static str {
        match self {
            MintFlow::Delegated => "/api/mint-gasless",
            MintFlow::SelfPaid => "/api/mint-self-paid",
            MintFlow::Gated => "/api/mint",
        }
    }

    /// Message shown by the wallet next to the transaction.
    pub fn message(&self) -> &'static str {
        match self {
            MintFlow::Delegated => DELEGATED_MINT_MESSAGE,
            MintFlow::SelfPaid => SELF_PAID_MINT_MESSAGE,
            MintFlow::Gated => GATED_MINT_MESSAGE,
        }
    }

    /// Whether the flow reads the `quantity` query parameter.
    pub fn requires_quantity(&self) -> bool {
        matches!(self, MintFlow::Gated)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MintFlow::Delegated => "delegated",
            MintFlow::SelfPaid => "self-paid",
            MintFlow::Gated => "gated",
        }
    }
}

impl fmt::Display for MintFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of tokens minted by one request, bounded by `1..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MintQuantity(u8);

impl MintQuantity {
    pub fn new(value: u64, max: u8) -> Result<Self, MintError> {
        if value == 0 || value > u64::from(max) {
            return Err(MintError::InvalidQuantity { max });
        }
        Ok(Self(value as u8))
    }

    /// Parses the raw `quantity` query value. Signs, fractions and
    /// surrounding whitespace are rejected.
    pub fn parse(raw: &str, max: u8) -> Result<Self, MintError> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MintError::InvalidQuantity { max });
        }
        let value = raw
            .parse::<u64>()
            .map_err(|_| MintError::InvalidQuantity { max })?;
        Self::new(value, max)
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for MintQuantity {
    fn default() -> Self {
        Self(1)
    }
}

/// Validated input of one mint request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintRequest {
    pub account: Pubkey,
    pub quantity: MintQuantity,
}

/// JSON body posted by the wallet.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MintAccountRequest {
    pub account: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MintResponse {
    pub transaction: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MintMetadataResponse {
    pub label: String,
    pub icon: String,
}
