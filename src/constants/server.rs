/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default Solana JSON-RPC endpoint (devnet).
pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";

/// Default timeout applied to every RPC request, in seconds.
pub const DEFAULT_RPC_TIMEOUT_SECONDS: u64 = 30;

/// Time the server waits for in-flight requests on shutdown.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECONDS: u64 = 5;

/// Environment variable holding the base58-encoded service payer keypair.
pub const PAYER_PRIVATE_KEY_ENV: &str = "PAYER_PRIVATE_KEY";
