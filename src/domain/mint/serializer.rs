//! Wire encoding of partially signed transactions.
//!
//! Transactions are bincode encoded with every signature slot kept in place,
//! then base64 encoded for the JSON response.
use base64::{engine::general_purpose::STANDARD, Engine};
use solana_sdk::{packet::PACKET_DATA_SIZE, transaction::Transaction};

use crate::models::{MintError, MintFlow, MintResponse};

pub fn serialize_transaction(transaction: &Transaction) -> Result<String, MintError> {
    let bytes =
        bincode::serialize(transaction).map_err(|e| MintError::Serialization(e.to_string()))?;

    if bytes.len() > PACKET_DATA_SIZE {
        return Err(MintError::TransactionTooLarge {
            size: bytes.len(),
            limit: PACKET_DATA_SIZE,
        });
    }

    Ok(STANDARD.encode(bytes))
}

pub fn decode_transaction(encoded: &str) -> Result<Transaction, MintError> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| MintError::Serialization(format!("invalid base64: {e}")))?;
    bincode::deserialize(&bytes).map_err(|e| MintError::Serialization(e.to_string()))
}

/// Pairs the encoded transaction with the flow's wallet message.
pub fn into_mint_response(
    transaction: &Transaction,
    flow: MintFlow,
) -> Result<MintResponse, MintError> {
    Ok(MintResponse {
        transaction: serialize_transaction(transaction)?,
        message: flow.message().to_string(),
    })
}
