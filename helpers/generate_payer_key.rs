//! Payer Key Generation Tool
//!
//! Generates a fresh Solana keypair and prints it in the base58 format read
//! from `PAYER_PRIVATE_KEY`, together with its public address. Fund the
//! address before pointing the service at it.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example generate_payer_key
//! ```
use eyre::{eyre, Result};
use solana_sdk::signature::{Keypair, Signer};

/// Main entry point for payer key generation tool
fn main() -> Result<()> {
    let (secret, address) = generate_payer_key()?;
    println!("Payer address: {}", address);
    println!("PAYER_PRIVATE_KEY={}", secret);
    Ok(())
}

/// Generates a keypair and returns its base58 secret and address
fn generate_payer_key() -> Result<(String, String)> {
    let keypair = Keypair::new();
    let secret = keypair.to_base58_string();

    let decoded = bs58::decode(&secret)
        .into_vec()
        .map_err(|e| eyre!("Failed to decode generated secret: {}", e))?;
    if decoded.len() != 64 {
        return Err(eyre!("Generated secret is not a 64-byte keypair"));
    }

    Ok((secret, keypair.pubkey().to_string()))
}
