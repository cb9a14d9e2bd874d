//! Read-only checks against a bound contract.

use starknet::core::types::Felt;

use crate::binding::ContractBinding;
use crate::error::WorkflowError;

/// Read the proxy admin and require it to match the expected account.
///
/// Returns the reported admin on success so callers can log it.
pub async fn verify_admin(
    proxy: &ContractBinding,
    accessor: &str,
    expected: Felt,
) -> Result<Felt, WorkflowError> {
    let actual = proxy.call_one(accessor, vec![]).await?;
    if actual != expected {
        return Err(WorkflowError::AdminMismatch { expected, actual });
    }
    Ok(actual)
}

/// Read a single-felt accessor and require a specific value.
pub async fn verify_call_result(
    contract: &ContractBinding,
    accessor: &str,
    expected: Felt,
) -> Result<(), WorkflowError> {
    let actual = contract.call_one(accessor, vec![]).await?;
    if actual != expected {
        return Err(WorkflowError::UnexpectedValue {
            entry_point: accessor.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}
