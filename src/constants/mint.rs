//! Constants for mint transaction assembly.
//!
//! Defaults mirror the devnet deployment the service was first run against.

/// Default template program id. Must expose the reduced 11-account `mint_nft`
/// interface built in `domain::mint::builders`; the deployed Candy Machine v2
/// program at this address takes a larger account list.
pub const DEFAULT_MINT_PROGRAM_ID: &str = "cndy3Z4yapfJBmL3ShUp5exZKqR3z33thTzeNMm2gRZ";

/// Template (candy machine) minted from by every flow.
pub const DEFAULT_MINT_TEMPLATE_ADDRESS: &str = "3vNpTMWAVLYo8XbKmcnH7BPQyjWc2eHfowuUuYvhCLja";

/// SPL token charged by the gated multi-mint flow.
pub const DEFAULT_PAYMENT_TOKEN_MINT: &str = "Gh9ZwEmdLJ8DscKNTkTqPbNwLNNBjuSzaG9Vp2KGtKJr";

/// Price of one mint in whole payment tokens.
pub const DEFAULT_PAYMENT_PRICE_PER_UNIT: u64 = 1;

/// Largest gated mint that still fits in a single packet.
pub const DEFAULT_MAX_MINT_QUANTITY: u8 = 3;

pub const DEFAULT_MINT_LABEL: &str = "Dinos 'R' Us 🦖";
pub const DEFAULT_MINT_ICON: &str = "https://freesvg.org/img/DINO-01.png";

/// PDA seed of the template creator account.
pub const TEMPLATE_CREATOR_SEED: &[u8] = b"candy_machine";

/// Anchor sighash preimage of the template mint instruction.
pub const MINT_INSTRUCTION_SIGHASH: &str = "global:mint_nft";

/// Anchor discriminator preimage of the template account.
pub const TEMPLATE_ACCOUNT_SIGHASH: &str = "account:CandyMachine";

pub const DELEGATED_MINT_MESSAGE: &str = "Mint a DINO! 🦖";
pub const SELF_PAID_MINT_MESSAGE: &str =
    "Approve the transaction to mint your DINO and pay the network fee 🦖";
pub const GATED_MINT_MESSAGE: &str = "Please approve the transaction to mint your golden ticket!";

/// Generic message returned for every internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "error creating transaction";
