use starknet::{
    accounts::{Account, ConnectedAccount},
    core::types::{BlockId, BlockTag, Felt, StarknetError},
    providers::{Provider, ProviderError},
};

use crate::artifact::ContractArtifact;
use crate::error::WorkflowError;
use crate::waiter::TransactionWaiter;
use crate::DeployerAccount;

/// Class code registered on the network. Deployment and upgrade reference a
/// class hash only through a value of this type, so neither can run before
/// the declaration that produced it.
#[derive(Debug, Clone, Copy)]
pub struct DeclaredClass {
    pub class_hash: Felt,
    /// `None` when the class was already known to the node.
    pub transaction_hash: Option<Felt>,
}

/// Declare a compiled class through the deployer account and wait for the
/// declaration to be accepted.
///
/// A class the node already knows is not redeclared; any other failure
/// propagates immediately.
pub async fn declare_class(
    account: &DeployerAccount,
    artifact: &ContractArtifact,
) -> Result<DeclaredClass, WorkflowError> {
    let provider = account.provider();

    match provider
        .get_class(BlockId::Tag(BlockTag::Pending), artifact.class_hash)
        .await
    {
        Ok(_) => {
            tracing::debug!(
                class_hash = format!("{:#x}", artifact.class_hash),
                "Class already declared."
            );
            return Ok(DeclaredClass {
                class_hash: artifact.class_hash,
                transaction_hash: None,
            });
        }
        Err(ProviderError::StarknetError(StarknetError::ClassHashNotFound)) => {}
        Err(e) => return Err(WorkflowError::Provider(e)),
    }

    let result = account
        .declare_v3(artifact.class.clone(), artifact.compiled_class_hash)
        .send()
        .await
        .map_err(WorkflowError::Account)?;

    tracing::debug!(
        class_hash = format!("{:#x}", result.class_hash),
        transaction_hash = format!("{:#x}", result.transaction_hash),
        "Declared class."
    );

    TransactionWaiter::new(result.transaction_hash, provider)
        .wait()
        .await?;

    Ok(DeclaredClass {
        class_hash: result.class_hash,
        transaction_hash: Some(result.transaction_hash),
    })
}
