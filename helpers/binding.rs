use starknet::{
    accounts::{Account, ConnectedAccount},
    core::types::{BlockId, BlockTag, Call, Felt, FunctionCall},
    providers::Provider,
};

use crate::abi::ContractInterface;
use crate::error::WorkflowError;
use crate::waiter::TransactionWaiter;
use crate::DeployerAccount;

/// A deployed contract address bound to an interface and a signing account.
///
/// The address and account never change after construction; `rebind` swaps
/// only the interface, which is how the proxy handle is switched from the
/// proxy's own minimal function set to the implementation's.
#[derive(Debug, Clone)]
pub struct ContractBinding {
    address: Felt,
    interface: ContractInterface,
    account: DeployerAccount,
}

impl ContractBinding {
    pub fn new(address: Felt, interface: ContractInterface, account: DeployerAccount) -> Self {
        Self {
            address,
            interface,
            account,
        }
    }

    pub fn address(&self) -> Felt {
        self.address
    }

    pub fn interface(&self) -> &ContractInterface {
        &self.interface
    }

    pub fn account(&self) -> &DeployerAccount {
        &self.account
    }

    /// Replace the bound interface, keeping address and account.
    pub fn rebind(self, interface: ContractInterface) -> Self {
        Self { interface, ..self }
    }

    /// Read-only call against the pending state.
    pub async fn call(
        &self,
        entry_point: &str,
        calldata: Vec<Felt>,
    ) -> Result<Vec<Felt>, WorkflowError> {
        let selector = self.interface.selector(entry_point)?;

        let result = self
            .account
            .provider()
            .call(
                FunctionCall {
                    contract_address: self.address,
                    entry_point_selector: selector,
                    calldata,
                },
                BlockId::Tag(BlockTag::Pending),
            )
            .await?;

        Ok(result)
    }

    /// Read-only call expected to return a single felt.
    pub async fn call_one(
        &self,
        entry_point: &str,
        calldata: Vec<Felt>,
    ) -> Result<Felt, WorkflowError> {
        let result = self.call(entry_point, calldata).await?;
        result
            .first()
            .copied()
            .ok_or_else(|| WorkflowError::EmptyCallResult {
                entry_point: entry_point.to_string(),
            })
    }

    /// Submit a signed execution of a named entry point and wait for it to
    /// be accepted. Returns the transaction hash.
    pub async fn invoke(
        &self,
        entry_point: &str,
        calldata: Vec<Felt>,
    ) -> Result<Felt, WorkflowError> {
        let selector = self.interface.selector(entry_point)?;

        let result = self
            .account
            .execute_v3(vec![Call {
                to: self.address,
                selector,
                calldata,
            }])
            .send()
            .await
            .map_err(WorkflowError::Account)?;

        tracing::debug!(
            entry_point,
            transaction_hash = format!("{:#x}", result.transaction_hash),
            "Invoked entry point."
        );

        TransactionWaiter::new(result.transaction_hash, self.account.provider())
            .wait()
            .await?;

        Ok(result.transaction_hash)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use starknet::{
        accounts::{ExecutionEncoding, SingleOwnerAccount},
        macros::felt,
        providers::jsonrpc::{HttpTransport, JsonRpcClient},
        signers::{LocalWallet, SigningKey},
    };
    use url::Url;

    use super::*;

    // An account that never issues a request; chain id is passed directly.
    fn offline_account() -> DeployerAccount {
        let url = Url::parse("http://127.0.0.1:5050").unwrap();
        let provider = Arc::new(JsonRpcClient::new(HttpTransport::new(url)));
        let signer = LocalWallet::from_signing_key(SigningKey::from_secret_scalar(felt!("0x1")));
        SingleOwnerAccount::new(
            provider,
            signer,
            felt!("0x2"),
            felt!("0x534e5f5345504f4c4941"),
            ExecutionEncoding::New,
        )
    }

    fn interface(abi: &str) -> ContractInterface {
        ContractInterface::from_json_str(abi).unwrap()
    }

    const PROXY_ABI: &str = r#"[
        {"type": "function", "name": "upgrade", "inputs": [], "outputs": []},
        {"type": "function", "name": "getAdmin", "inputs": [], "outputs": []}
    ]"#;
    const IMPL_ABI: &str = r#"[
        {"type": "function", "name": "get_erc20_count", "inputs": [], "outputs": []}
    ]"#;

    #[test]
    fn rebinding_keeps_the_address() {
        let binding = ContractBinding::new(felt!("0xdead"), interface(PROXY_ABI), offline_account());
        let address = binding.address();

        let rebound = binding.rebind(interface(IMPL_ABI));

        assert_eq!(rebound.address(), address);
        assert!(rebound.interface().contains("get_erc20_count"));
        assert!(!rebound.interface().contains("upgrade"));
    }

    #[tokio::test]
    async fn unknown_entry_point_fails_without_network() {
        let binding = ContractBinding::new(felt!("0x1"), interface(PROXY_ABI), offline_account());

        // No devnet is listening; a local lookup failure must come back
        // before any request is attempted.
        match binding.call("get_erc20_count", vec![]).await {
            Err(WorkflowError::UnknownEntryPoint { name }) => {
                assert_eq!(name, "get_erc20_count");
            }
            other => panic!("expected UnknownEntryPoint, got {other:?}"),
        }
    }
}
