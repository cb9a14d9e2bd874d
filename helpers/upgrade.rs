use crate::artifact::ContractArtifact;
use crate::binding::ContractBinding;
use crate::declare::{declare_class, DeclaredClass};
use crate::error::WorkflowError;

/// Declare a new implementation and point the proxy at it.
///
/// The proxy address and storage are untouched; only the stored
/// implementation class hash changes. Storage layout compatibility between
/// the two implementations is the caller's responsibility, as is rebinding
/// the handle if the new implementation's interface differs.
pub async fn upgrade_proxy(
    proxy: &ContractBinding,
    new_implementation: &ContractArtifact,
) -> Result<DeclaredClass, WorkflowError> {
    let declared = declare_class(proxy.account(), new_implementation).await?;

    let transaction_hash = proxy.invoke("upgrade", vec![declared.class_hash]).await?;

    tracing::debug!(
        proxy = format!("{:#x}", proxy.address()),
        new_class_hash = format!("{:#x}", declared.class_hash),
        transaction_hash = format!("{:#x}", transaction_hash),
        "Upgraded proxy."
    );

    Ok(declared)
}
