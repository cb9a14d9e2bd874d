//! Deploys the upgradeable proxy, verifies it, then upgrades it in place.
//!
//! Expects a running devnet (or a testnet endpoint via `STARKNET_RPC`) and
//! compiled contract artifacts at the configured paths. Every step is
//! sequential; the first failure aborts the run.

use std::fmt::Display;

use helpers::{
    declare_class, deploy_proxy, setup_workflow, upgrade_proxy, verify_admin, ContractArtifact,
    ContractBinding, ContractInterface, ProxyConstructorArgs, WorkflowConfig, WorkflowSetup,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = WorkflowConfig::from_env()?;

    section("Configuration");
    info("RPC", &config.rpc_url);
    info("Account", format!("{:#x}", config.account_address));
    info("Admin", format!("{:#x}", config.admin_address));
    info("Deploy salt", format!("{:#x}", config.deploy_salt));

    let WorkflowSetup { account, .. } = setup_workflow(&config).await?;

    section("Artifacts");
    let proxy_artifact = ContractArtifact::load(&config.artifacts.proxy)?;
    let impl_artifact = ContractArtifact::load(&config.artifacts.implementation)?;
    info("Proxy class hash", format!("{:#x}", proxy_artifact.class_hash));
    info("Impl class hash", format!("{:#x}", impl_artifact.class_hash));

    section("Declaration");
    let implementation = declare_class(&account, &impl_artifact).await?;
    let proxy_class = declare_class(&account, &proxy_artifact).await?;
    info("Implementation", format!("{:#x}", implementation.class_hash));

    section("Deployment");
    // The proxy constructor delegate-calls the implementation's initializer,
    // so storage is bootstrapped in the same transaction.
    let args = ProxyConstructorArgs::new(
        config.admin_address,
        &implementation,
        &config.initializer,
        vec![config.admin_address],
    )?;
    let deployed = deploy_proxy(&account, &proxy_class, &args, config.deploy_salt).await?;
    info("Proxy address", format!("{:#x}", deployed.address));
    info("Deploy tx", format!("{:#x}", deployed.transaction_hash));

    // Rebind the handle so calls resolve against the implementation's
    // function set instead of the proxy's own.
    let proxy = ContractBinding::new(deployed.address, proxy_artifact.interface()?, account);
    let proxy = proxy.rebind(ContractInterface::from_file(
        &config.artifacts.implementation_abi,
    )?);

    section("Verification");
    let admin = verify_admin(&proxy, "getAdmin", config.admin_address).await?;
    info("Proxy admin", format!("{admin:#x}"));
    let count = proxy.call_one("get_erc20_count", vec![]).await?;
    info("Count", count);

    section("Upgrade");
    let upgraded_artifact = ContractArtifact::load(&config.artifacts.upgrade)?;
    let new_class = upgrade_proxy(&proxy, &upgraded_artifact).await?;
    info("New class hash", format!("{:#x}", new_class.class_hash));

    // Same address, same storage, new logic behind it.
    let count = proxy.call_one("get_erc20_count", vec![]).await?;
    info("Count after upgrade", count);

    section("Summary");
    println!("Proxy deployed at {:#x} and upgraded", proxy.address());
    Ok(())
}

fn section(title: &str) {
    println!("\n=== {title} ===");
}

fn info(label: &str, value: impl Display) {
    println!("{label:>24}: {value}");
}
