//! Deploys a token contract directly (no proxy) and reads its metadata back.

use std::fmt::Display;

use helpers::{
    declare_class, deploy_contract, setup_workflow, short_string, verify_call_result,
    ContractArtifact, ContractBinding, WorkflowConfig, WorkflowSetup,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = WorkflowConfig::from_env()?;

    let name = short_string(&env_or("TOKEN_NAME", "testNft"))?;
    let symbol = short_string(&env_or("TOKEN_SYMBOL", "tNFT"))?;

    section("Configuration");
    info("RPC", &config.rpc_url);
    info("Owner", format!("{:#x}", config.admin_address));

    let WorkflowSetup { account, .. } = setup_workflow(&config).await?;

    section("Declaration");
    let token_artifact = ContractArtifact::load(&config.artifacts.token)?;
    let token_class = declare_class(&account, &token_artifact).await?;
    info("Token class hash", format!("{:#x}", token_class.class_hash));

    section("Deployment");
    let deployed = deploy_contract(
        &account,
        &token_class,
        vec![name, symbol, config.admin_address],
        config.deploy_salt,
    )
    .await?;
    info("Token address", format!("{:#x}", deployed.address));

    section("Verification");
    let token = ContractBinding::new(deployed.address, token_artifact.interface()?, account);
    verify_call_result(&token, "name", name).await?;
    verify_call_result(&token, "symbol", symbol).await?;
    println!("Token metadata matches the constructor arguments");

    Ok(())
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn section(title: &str) {
    println!("\n=== {title} ===");
}

fn info(label: &str, value: impl Display) {
    println!("{label:>24}: {value}");
}
