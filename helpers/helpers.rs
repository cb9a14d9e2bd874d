//! Common helper functions for the proxy deployment scripts and tests.

use std::sync::Arc;

use starknet::{
    accounts::{ExecutionEncoding, SingleOwnerAccount},
    providers::{
        jsonrpc::{HttpTransport, JsonRpcClient},
        Provider,
    },
    signers::{LocalWallet, SigningKey},
};
use url::Url;

mod abi;
mod artifact;
mod binding;
mod calldata;
mod config;
mod declare;
mod deploy;
mod error;
mod upgrade;
mod verify;
mod waiter;

pub use abi::{
    AbiDeclaration, AbiEntry, AbiFunction, AbiInput, AbiInterface, AbiOutput, ContractInterface,
};
pub use artifact::ContractArtifact;
pub use binding::ContractBinding;
pub use calldata::{short_string, to_uint256};
pub use config::{ArtifactPaths, ClassPaths, WorkflowConfig};
pub use declare::{declare_class, DeclaredClass};
pub use deploy::{deploy_contract, deploy_proxy, DeployedContract, ProxyConstructorArgs};
pub use error::{ConfigError, WaitError, WorkflowError};
pub use upgrade::upgrade_proxy;
pub use verify::{verify_admin, verify_call_result};
pub use waiter::TransactionWaiter;

pub type RpcProvider = Arc<JsonRpcClient<HttpTransport>>;
pub type DeployerAccount = SingleOwnerAccount<RpcProvider, LocalWallet>;

/// Provider and signing account shared by every workflow step.
pub struct WorkflowSetup {
    pub provider: RpcProvider,
    pub account: DeployerAccount,
}

pub fn build_provider(rpc_url: &Url) -> RpcProvider {
    Arc::new(JsonRpcClient::new(HttpTransport::new(rpc_url.clone())))
}

/// Initialize the RPC connection and the deployer account from the configuration.
///
/// The chain id is fetched from the node so the same configuration works
/// against a local devnet and a public testnet.
pub async fn setup_workflow(config: &WorkflowConfig) -> Result<WorkflowSetup, WorkflowError> {
    let provider = build_provider(&config.rpc_url);

    let signer = LocalWallet::from_signing_key(SigningKey::from_secret_scalar(config.private_key));
    let chain_id = provider.chain_id().await?;
    let account = SingleOwnerAccount::new(
        provider.clone(),
        signer,
        config.account_address,
        chain_id,
        ExecutionEncoding::New,
    );

    Ok(WorkflowSetup { provider, account })
}
