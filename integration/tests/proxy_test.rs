use helpers::{
    declare_class, deploy_proxy, setup_workflow, upgrade_proxy, verify_admin, ContractArtifact,
    ContractBinding, ContractInterface, ProxyConstructorArgs, WorkflowConfig, WorkflowError,
    WorkflowSetup,
};
use integration::test_config;

/// End-to-end flow against a running devnet: declare the implementation,
/// deploy the proxy with the initializer, rebind, verify, upgrade, and check
/// that the address and storage survive the swap.
#[tokio::test]
#[ignore = "requires a running starknet devnet and compiled contract artifacts"]
async fn test_proxy_deploy_and_upgrade() -> anyhow::Result<()> {
    let config = test_config()?;
    let WorkflowSetup { account, .. } = setup_workflow(&config).await?;

    let proxy_artifact = ContractArtifact::load(&config.artifacts.proxy)?;
    let impl_artifact = ContractArtifact::load(&config.artifacts.implementation)?;

    // Declaration precedes any deployment that references the class.
    let implementation = declare_class(&account, &impl_artifact).await?;
    let proxy_class = declare_class(&account, &proxy_artifact).await?;

    let args = ProxyConstructorArgs::new(
        config.admin_address,
        &implementation,
        &config.initializer,
        vec![config.admin_address],
    )?;
    let deployed = deploy_proxy(&account, &proxy_class, &args, config.deploy_salt).await?;

    // Rebinding swaps the interface only; the address must not move.
    let proxy = ContractBinding::new(deployed.address, proxy_artifact.interface()?, account);
    let proxy = proxy.rebind(ContractInterface::from_file(
        &config.artifacts.implementation_abi,
    )?);
    assert_eq!(proxy.address(), deployed.address);

    // The admin read back through the proxy is the constructor argument.
    let admin = verify_admin(&proxy, "getAdmin", config.admin_address).await?;
    assert_eq!(admin, config.admin_address);

    let count_before = proxy.call_one("get_erc20_count", vec![]).await?;

    // Upgrade: new class behind the same address, storage intact.
    let upgraded_artifact = ContractArtifact::load(&config.artifacts.upgrade)?;
    let new_class = upgrade_proxy(&proxy, &upgraded_artifact).await?;
    assert_ne!(new_class.class_hash, implementation.class_hash);
    assert_eq!(proxy.address(), deployed.address);

    let count_after = proxy.call_one("get_erc20_count", vec![]).await?;
    assert_eq!(count_before, count_after, "storage must persist across the swap");

    Ok(())
}

/// Artifact problems must surface before any network interaction: a config
/// pointing at missing files fails locally even with no devnet running.
#[tokio::test]
async fn test_missing_artifacts_fail_before_any_network_call() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;

    let mut config = WorkflowConfig::default();
    config.artifacts.proxy.sierra = dir.path().join("nope.contract_class.json");
    config.artifacts.proxy.casm = dir.path().join("nope.compiled_contract_class.json");

    match ContractArtifact::load(&config.artifacts.proxy) {
        Err(WorkflowError::ArtifactIo { .. }) => {}
        other => panic!("expected ArtifactIo, got {other:?}"),
    }

    // Same for a malformed interface description file.
    let abi_path = dir.path().join("exchange.json");
    std::fs::write(&abi_path, "][")?;
    match ContractInterface::from_file(&abi_path) {
        Err(WorkflowError::ArtifactParse { .. }) => {}
        other => panic!("expected ArtifactParse, got {other:?}"),
    }

    Ok(())
}
