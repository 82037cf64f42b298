use crate::constants::{
    DEFAULT_HOST, DEFAULT_PORT, DEFAULT_RPC_TIMEOUT_SECONDS, DEFAULT_RPC_URL,
    DEFAULT_SHUTDOWN_TIMEOUT_SECONDS,
};

use super::{env_or, parse_env_or, ConfigError};

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rpc_url: String,
    pub rpc_timeout_seconds: u64,
    pub shutdown_timeout_seconds: u64,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let rpc_timeout_seconds =
            parse_env_or("RPC_TIMEOUT_SECONDS", DEFAULT_RPC_TIMEOUT_SECONDS)?;
        if rpc_timeout_seconds == 0 {
            return Err(ConfigError::invalid(
                "RPC_TIMEOUT_SECONDS",
                "must be greater than zero",
            ));
        }

        Ok(Self {
            host: env_or("HOST", DEFAULT_HOST),
            port: parse_env_or("PORT", DEFAULT_PORT)?,
            rpc_url: env_or("RPC_URL", DEFAULT_RPC_URL),
            rpc_timeout_seconds,
            shutdown_timeout_seconds: parse_env_or(
                "SHUTDOWN_TIMEOUT_SECONDS",
                DEFAULT_SHUTDOWN_TIMEOUT_SECONDS,
            )?,
        })
    }
}
