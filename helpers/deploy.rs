use starknet::{
    accounts::ConnectedAccount,
    contract::ContractFactory,
    core::{types::Felt, utils::get_selector_from_name},
};

use crate::declare::DeclaredClass;
use crate::error::WorkflowError;
use crate::waiter::TransactionWaiter;
use crate::DeployerAccount;

/// Constructor arguments for the proxy. The proxy constructor performs a
/// delegate call into the implementation's initializer, so the whole setup
/// lands in one atomic transaction.
#[derive(Debug, Clone)]
pub struct ProxyConstructorArgs {
    pub admin: Felt,
    pub implementation: Felt,
    pub initializer_selector: Felt,
    pub initializer_calldata: Vec<Felt>,
}

impl ProxyConstructorArgs {
    pub fn new(
        admin: Felt,
        implementation: &DeclaredClass,
        initializer: &str,
        initializer_calldata: Vec<Felt>,
    ) -> Result<Self, WorkflowError> {
        Ok(Self {
            admin,
            implementation: implementation.class_hash,
            initializer_selector: get_selector_from_name(initializer)?,
            initializer_calldata,
        })
    }

    /// Flatten into calldata. The initializer arguments are a Cairo array,
    /// so their length precedes them on the wire.
    pub fn to_calldata(&self) -> Vec<Felt> {
        let mut calldata = vec![
            self.admin,
            self.implementation,
            self.initializer_selector,
            Felt::from(self.initializer_calldata.len() as u64),
        ];
        calldata.extend_from_slice(&self.initializer_calldata);
        calldata
    }
}

/// A contract instance created by the deployment step.
#[derive(Debug, Clone, Copy)]
pub struct DeployedContract {
    pub address: Felt,
    pub transaction_hash: Felt,
}

/// Deploy an instance of a declared class through the Universal Deployer and
/// wait for acceptance. The address is deterministic in the salt.
pub async fn deploy_contract(
    account: &DeployerAccount,
    class: &DeclaredClass,
    constructor_calldata: Vec<Felt>,
    salt: Felt,
) -> Result<DeployedContract, WorkflowError> {
    let factory = ContractFactory::new(class.class_hash, account.clone());
    let deployment = factory.deploy_v3(constructor_calldata, salt, false);
    let address = deployment.deployed_address();

    let result = deployment.send().await.map_err(WorkflowError::Account)?;

    tracing::debug!(
        address = format!("{:#x}", address),
        transaction_hash = format!("{:#x}", result.transaction_hash),
        "Deployment submitted."
    );

    TransactionWaiter::new(result.transaction_hash, account.provider())
        .wait()
        .await?;

    Ok(DeployedContract {
        address,
        transaction_hash: result.transaction_hash,
    })
}

/// Deploy the proxy, self-initializing against its implementation.
pub async fn deploy_proxy(
    account: &DeployerAccount,
    proxy_class: &DeclaredClass,
    args: &ProxyConstructorArgs,
    salt: Felt,
) -> Result<DeployedContract, WorkflowError> {
    deploy_contract(account, proxy_class, args.to_calldata(), salt).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declared(class_hash: Felt) -> DeclaredClass {
        DeclaredClass {
            class_hash,
            transaction_hash: None,
        }
    }

    #[test]
    fn constructor_calldata_layout() {
        let admin = Felt::from(0xabcu64);
        let implementation = declared(Felt::from(0x123u64));
        let args =
            ProxyConstructorArgs::new(admin, &implementation, "initialize", vec![admin]).unwrap();

        assert_eq!(
            args.to_calldata(),
            vec![
                admin,
                Felt::from(0x123u64),
                get_selector_from_name("initialize").unwrap(),
                Felt::ONE,
                admin,
            ]
        );
    }

    #[test]
    fn empty_initializer_arguments_still_carry_a_length() {
        let implementation = declared(Felt::from(7u64));
        let args =
            ProxyConstructorArgs::new(Felt::ONE, &implementation, "initialize", vec![]).unwrap();

        let calldata = args.to_calldata();
        assert_eq!(calldata.len(), 4);
        assert_eq!(calldata[3], Felt::ZERO);
    }

    #[test]
    fn non_ascii_initializer_names_are_rejected() {
        let implementation = declared(Felt::ONE);
        assert!(matches!(
            ProxyConstructorArgs::new(Felt::ONE, &implementation, "initialisé", vec![]),
            Err(WorkflowError::Selector(_))
        ));
    }
}
