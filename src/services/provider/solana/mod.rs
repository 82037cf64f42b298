//! Solana Provider Module
//!
//! This module provides an abstraction layer over the Solana RPC client,
//! offering the handful of ledger queries the mint pipeline depends on:
//! fetching the latest blockhash, reading accounts and token mints, and
//! sending a transaction through to confirmation.
//!
//! Every call is issued exactly once. Failures surface to the caller, which
//! aborts the request; the wallet is expected to retry the whole POST.
use async_trait::async_trait;
use log::debug;
#[cfg(test)]
use mockall::automock;
use serde::Serialize;
use solana_client::{
    client_error::{ClientError, ClientErrorKind},
    nonblocking::rpc_client::RpcClient,
};
use solana_sdk::{
    account::Account,
    commitment_config::CommitmentConfig,
    hash::Hash,
    program_pack::Pack,
    pubkey::Pubkey,
    signature::Signature,
    transaction::{Transaction, TransactionError},
};
use spl_token::state::Mint;
use std::time::Duration;
use thiserror::Error;

/// Utility function to match error patterns by normalizing both strings.
/// Removes spaces and converts to lowercase for flexible matching.
fn matches_error_pattern(error_msg: &str, pattern: &str) -> bool {
    let normalized_msg = error_msg.to_lowercase().replace(' ', "");
    let normalized_pattern = pattern.to_lowercase().replace(' ', "");
    normalized_msg.contains(&normalized_pattern)
}

/// Errors that can occur when interacting with the Solana provider.
#[derive(Error, Debug, Serialize)]
pub enum SolanaProviderError {
    /// Network/IO error (connection issues, timeouts)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// RPC protocol error
    #[error("RPC error: {0}")]
    RpcError(String),

    /// HTTP request error with status code
    #[error("Request error (HTTP {status_code}): {error}")]
    RequestError { error: String, status_code: u16 },

    /// Network configuration error (bad URL, missing data)
    #[error("Network configuration error: {0}")]
    NetworkConfiguration(String),

    /// Blockhash not found or expired
    #[error("Blockhash not found or expired: {0}")]
    BlockhashNotFound(String),

    /// Insufficient funds for transaction
    #[error("Insufficient funds for transaction: {0}")]
    InsufficientFunds(String),

    /// Invalid transaction structure or execution
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    /// Account does not exist
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Account exists but its data is not what the caller expected
    #[error("Invalid account data: {0}")]
    InvalidAccountData(String),
}

impl SolanaProviderError {
    /// Classifies a Solana RPC client error into the appropriate error variant.
    pub fn from_rpc_error(error: ClientError) -> Self {
        match error.kind() {
            ClientErrorKind::Io(_) => SolanaProviderError::NetworkError(error.to_string()),

            ClientErrorKind::Reqwest(reqwest_err) => match reqwest_err.status() {
                Some(status) => SolanaProviderError::RequestError {
                    error: error.to_string(),
                    status_code: status.as_u16(),
                },
                None => SolanaProviderError::NetworkError(error.to_string()),
            },

            ClientErrorKind::TransactionError(tx_error) => match tx_error {
                TransactionError::BlockhashNotFound => {
                    SolanaProviderError::BlockhashNotFound(error.to_string())
                }
                TransactionError::InsufficientFundsForFee
                | TransactionError::InsufficientFundsForRent { .. } => {
                    SolanaProviderError::InsufficientFunds(error.to_string())
                }
                _ => SolanaProviderError::InvalidTransaction(error.to_string()),
            },

            ClientErrorKind::RpcError(rpc_err) => {
                Self::from_error_message(&rpc_err.to_string(), &error)
            }

            ClientErrorKind::Custom(msg) => Self::from_error_message(msg, &error),

            _ => SolanaProviderError::RpcError(error.to_string()),
        }
    }

    fn from_error_message(message: &str, full_error: &ClientError) -> Self {
        if matches_error_pattern(message, "blockhash not found") {
            SolanaProviderError::BlockhashNotFound(full_error.to_string())
        } else if matches_error_pattern(message, "insufficient funds") {
            SolanaProviderError::InsufficientFunds(full_error.to_string())
        } else if message.contains("-32002") || message.contains("-32003") {
            SolanaProviderError::InvalidTransaction(full_error.to_string())
        } else {
            SolanaProviderError::RpcError(full_error.to_string())
        }
    }
}

/// A trait that abstracts the Solana provider operations used by the mint pipeline.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait SolanaProviderTrait: Send + Sync {
    /// Retrieves the latest blockhash.
    async fn get_latest_blockhash(&self) -> Result<Hash, SolanaProviderError>;

    /// Retrieves an account, or `None` if it does not exist.
    async fn get_account_from_pubkey(
        &self,
        pubkey: &Pubkey,
    ) -> Result<Option<Account>, SolanaProviderError>;

    /// Retrieves the decimals of an SPL token mint.
    async fn get_token_decimals(&self, mint: &Pubkey) -> Result<u8, SolanaProviderError>;

    /// Sends a fully signed transaction and waits for its confirmation.
    async fn send_and_confirm_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<Signature, SolanaProviderError>;
}

pub struct SolanaProvider {
    client: RpcClient,
    timeout: Duration,
    commitment: CommitmentConfig,
}

impl std::fmt::Debug for SolanaProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolanaProvider")
            .field("url", &self.client.url())
            .field("timeout", &self.timeout)
            .field("commitment", &self.commitment)
            .finish()
    }
}

impl SolanaProvider {
    pub fn new(url: &str, timeout_seconds: u64) -> Result<Self, SolanaProviderError> {
        Self::new_with_commitment(url, timeout_seconds, CommitmentConfig::confirmed())
    }

    /// Creates a new SolanaProvider for a single RPC endpoint.
    ///
    /// # Arguments
    ///
    /// * `url` - HTTP(S) URL of the JSON-RPC endpoint
    /// * `timeout_seconds` - Timeout applied to each request
    /// * `commitment` - Commitment level for reads and confirmations
    pub fn new_with_commitment(
        url: &str,
        timeout_seconds: u64,
        commitment: CommitmentConfig,
    ) -> Result<Self, SolanaProviderError> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(SolanaProviderError::NetworkConfiguration(format!(
                "Invalid URL format: {url}"
            )));
        }
        if timeout_seconds == 0 {
            return Err(SolanaProviderError::NetworkConfiguration(
                "RPC timeout must be greater than zero".to_string(),
            ));
        }

        let timeout = Duration::from_secs(timeout_seconds);
        let client = RpcClient::new_with_timeout_and_commitment(url.to_string(), timeout, commitment);

        Ok(Self {
            client,
            timeout,
            commitment,
        })
    }
}

#[async_trait]
impl SolanaProviderTrait for SolanaProvider {
    async fn get_latest_blockhash(&self) -> Result<Hash, SolanaProviderError> {
        debug!("Fetching latest blockhash");
        self.client
            .get_latest_blockhash()
            .await
            .map_err(SolanaProviderError::from_rpc_error)
    }

    async fn get_account_from_pubkey(
        &self,
        pubkey: &Pubkey,
    ) -> Result<Option<Account>, SolanaProviderError> {
        self.client
            .get_account_with_commitment(pubkey, self.commitment)
            .await
            .map(|response| response.value)
            .map_err(SolanaProviderError::from_rpc_error)
    }

    async fn get_token_decimals(&self, mint: &Pubkey) -> Result<u8, SolanaProviderError> {
        let account = self
            .get_account_from_pubkey(mint)
            .await?
            .ok_or_else(|| SolanaProviderError::AccountNotFound(mint.to_string()))?;

        if account.owner != spl_token::id() {
            return Err(SolanaProviderError::InvalidAccountData(format!(
                "{mint} is not owned by the token program"
            )));
        }

        Mint::unpack(&account.data)
            .map(|state| state.decimals)
            .map_err(|e| SolanaProviderError::InvalidAccountData(format!("{mint}: {e}")))
    }

    async fn send_and_confirm_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<Signature, SolanaProviderError> {
        self.client
            .send_and_confirm_transaction(transaction)
            .await
            .map_err(SolanaProviderError::from_rpc_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_http_urls() {
        assert!(SolanaProvider::new("https://api.devnet.solana.com", 30).is_ok());
        assert!(SolanaProvider::new("http://127.0.0.1:8899", 5).is_ok());
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        match SolanaProvider::new("not-a-valid-url", 30) {
            Err(SolanaProviderError::NetworkConfiguration(msg)) => {
                assert!(msg.contains("Invalid URL format"))
            }
            other => panic!("Expected NetworkConfiguration error, got {other:?}"),
        }
    }

    #[test]
    fn test_new_rejects_zero_timeout() {
        assert!(matches!(
            SolanaProvider::new("https://api.devnet.solana.com", 0),
            Err(SolanaProviderError::NetworkConfiguration(_))
        ));
    }

    #[test]
    fn test_matches_error_pattern() {
        assert!(matches_error_pattern("BLOCKHASH NOT FOUND", "blockhash not found"));
        assert!(matches_error_pattern("blockhashnotfound", "blockhash not found"));
        assert!(matches_error_pattern(
            "error: insufficient funds for transaction",
            "insufficient funds"
        ));
        assert!(!matches_error_pattern("account in use", "blockhash not found"));
    }

    #[test]
    fn test_custom_error_classification() {
        let blockhash = ClientError::from(ClientErrorKind::Custom(
            "Blockhash not found".to_string(),
        ));
        assert!(matches!(
            SolanaProviderError::from_rpc_error(blockhash),
            SolanaProviderError::BlockhashNotFound(_)
        ));

        let other = ClientError::from(ClientErrorKind::Custom("node is behind".to_string()));
        assert!(matches!(
            SolanaProviderError::from_rpc_error(other),
            SolanaProviderError::RpcError(_)
        ));
    }

    #[test]
    fn test_transaction_error_classification() {
        let err = ClientError::from(ClientErrorKind::TransactionError(
            TransactionError::InsufficientFundsForFee,
        ));
        assert!(matches!(
            SolanaProviderError::from_rpc_error(err),
            SolanaProviderError::InsufficientFunds(_)
        ));
    }
}
