use std::path::PathBuf;

use starknet::core::types::Felt;
use url::Url;

use crate::error::ConfigError;

// Devnet defaults. Every value can be overridden through the environment so
// the same binaries run against a public testnet without code edits.
const DEFAULT_RPC: &str = "http://127.0.0.1:5050";
const PREFUNDED_ACCOUNT_ADDRESS: &str =
    "0x127fd5f1fe78a71f8bcd1fec63e3fe2f0486b6ecd5c86a0466c3a21fa5cfcec";
const PREFUNDED_PRIVATE_KEY: &str =
    "0xc5b2fcab997346f3ea1c00b002ecf6f382c5f9c9659a3894eb783c5320f912";
const DEFAULT_ADMIN_ADDRESS: &str =
    "0x7cb66e9ed0af79cda533c96221ae8e2651dd7d49a52bdc4d7c2c54f1b66901a";

/// Paths to the compiled class files for one contract.
#[derive(Debug, Clone)]
pub struct ClassPaths {
    pub sierra: PathBuf,
    pub casm: PathBuf,
}

impl ClassPaths {
    pub fn new(sierra: impl Into<PathBuf>, casm: impl Into<PathBuf>) -> Self {
        Self {
            sierra: sierra.into(),
            casm: casm.into(),
        }
    }
}

/// Compiled artifacts consumed by the workflow. All are produced by an
/// external contract build; none are parsed beyond what declaration and
/// interface binding require.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub proxy: ClassPaths,
    pub implementation: ClassPaths,
    pub upgrade: ClassPaths,
    pub token: ClassPaths,
    /// Standalone interface description used to rebind the proxy after
    /// deployment.
    pub implementation_abi: PathBuf,
}

/// Configuration for one workflow run.
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    pub rpc_url: Url,
    pub account_address: Felt,
    pub private_key: Felt,
    pub admin_address: Felt,
    pub deploy_salt: Felt,
    /// Entry point invoked by the proxy constructor via delegate call.
    pub initializer: String,
    pub artifacts: ArtifactPaths,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            rpc_url: Url::parse(DEFAULT_RPC).expect("default RPC URL is valid"),
            account_address: Felt::from_hex_unchecked(PREFUNDED_ACCOUNT_ADDRESS),
            private_key: Felt::from_hex_unchecked(PREFUNDED_PRIVATE_KEY),
            admin_address: Felt::from_hex_unchecked(DEFAULT_ADMIN_ADDRESS),
            deploy_salt: Felt::from(rand::random::<u64>()),
            initializer: "initialize".to_string(),
            artifacts: ArtifactPaths {
                proxy: ClassPaths::new(
                    "contracts/target/dev/contracts_Proxy.contract_class.json",
                    "contracts/target/dev/contracts_Proxy.compiled_contract_class.json",
                ),
                implementation: ClassPaths::new(
                    "contracts/target/dev/contracts_Exchange.contract_class.json",
                    "contracts/target/dev/contracts_Exchange.compiled_contract_class.json",
                ),
                upgrade: ClassPaths::new(
                    "contracts/target/dev/contracts_ExchangeV2.contract_class.json",
                    "contracts/target/dev/contracts_ExchangeV2.compiled_contract_class.json",
                ),
                token: ClassPaths::new(
                    "contracts/target/dev/contracts_ERC721.contract_class.json",
                    "contracts/target/dev/contracts_ERC721.compiled_contract_class.json",
                ),
                implementation_abi: PathBuf::from("artifacts/abis/exchange.json"),
            },
        }
    }
}

impl WorkflowConfig {
    /// Build a configuration from the environment, falling back to the local
    /// devnet defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = env_var("STARKNET_RPC") {
            config.rpc_url = parse_url("STARKNET_RPC", &value)?;
        }
        if let Some(value) = env_var("ACCOUNT_ADDRESS") {
            config.account_address = parse_felt("ACCOUNT_ADDRESS", &value)?;
        }
        if let Some(value) = env_var("ACCOUNT_PRIVATE_KEY") {
            config.private_key = parse_felt("ACCOUNT_PRIVATE_KEY", &value)?;
        }
        if let Some(value) = env_var("PROXY_ADMIN") {
            config.admin_address = parse_felt("PROXY_ADMIN", &value)?;
        }
        if let Some(value) = env_var("DEPLOY_SALT") {
            config.deploy_salt = parse_felt("DEPLOY_SALT", &value)?;
        }
        if let Some(value) = env_var("INITIALIZER") {
            config.initializer = value;
        }

        let artifacts = &mut config.artifacts;
        override_path(&mut artifacts.proxy.sierra, "PROXY_SIERRA_PATH");
        override_path(&mut artifacts.proxy.casm, "PROXY_CASM_PATH");
        override_path(&mut artifacts.implementation.sierra, "IMPL_SIERRA_PATH");
        override_path(&mut artifacts.implementation.casm, "IMPL_CASM_PATH");
        override_path(&mut artifacts.upgrade.sierra, "UPGRADE_SIERRA_PATH");
        override_path(&mut artifacts.upgrade.casm, "UPGRADE_CASM_PATH");
        override_path(&mut artifacts.token.sierra, "TOKEN_SIERRA_PATH");
        override_path(&mut artifacts.token.casm, "TOKEN_CASM_PATH");
        override_path(&mut artifacts.implementation_abi, "IMPL_ABI_PATH");

        Ok(config)
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn override_path(path: &mut PathBuf, name: &str) {
    if let Some(value) = env_var(name) {
        *path = PathBuf::from(value);
    }
}

fn parse_felt(name: &'static str, value: &str) -> Result<Felt, ConfigError> {
    Felt::from_hex(value).map_err(|e| ConfigError {
        name,
        reason: e.to_string(),
    })
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError {
        name,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_local_devnet() {
        let config = WorkflowConfig::default();
        assert_eq!(config.rpc_url.as_str(), "http://127.0.0.1:5050/");
        assert_eq!(
            config.admin_address,
            Felt::from_hex_unchecked(
                "0x7cb66e9ed0af79cda533c96221ae8e2651dd7d49a52bdc4d7c2c54f1b66901a"
            )
        );
        assert_eq!(config.initializer, "initialize");
    }

    #[test]
    fn felt_values_are_parsed_as_hex() {
        assert_eq!(parse_felt("DEPLOY_SALT", "0x10").unwrap(), Felt::from(16u64));

        let err = parse_felt("DEPLOY_SALT", "not-a-felt").unwrap_err();
        assert_eq!(err.name, "DEPLOY_SALT");
    }

    #[test]
    fn malformed_urls_name_the_variable() {
        let err = parse_url("STARKNET_RPC", "127.0.0.1:5050").unwrap_err();
        assert_eq!(err.name, "STARKNET_RPC");
    }
}
