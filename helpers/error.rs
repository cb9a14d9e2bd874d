use std::path::PathBuf;
use std::time::Duration;

use starknet::{
    accounts::{Account, AccountError},
    core::types::Felt,
    core::utils::NonAsciiNameError,
    providers::ProviderError,
};
use thiserror::Error;

use crate::DeployerAccount;

type SignError = <DeployerAccount as Account>::SignError;

/// Errors surfaced by the deployment workflow steps.
///
/// Every failure is fatal to the running workflow; nothing here is retried.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("reading artifact {path}")]
    ArtifactIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing artifact {path}")]
    ArtifactParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("computing class hash for {path}: {reason}")]
    ClassHash { path: PathBuf, reason: String },
    #[error("no entry point named `{name}` in the bound interface")]
    UnknownEntryPoint { name: String },
    #[error("invalid entry point name")]
    Selector(#[from] NonAsciiNameError),
    #[error("cannot encode `{value}` as a Cairo short string: {reason}")]
    ShortString { value: String, reason: String },
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("account rejected the transaction")]
    Account(#[source] AccountError<SignError>),
    #[error(transparent)]
    Wait(#[from] WaitError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("proxy admin is {actual:#x}, expected {expected:#x}")]
    AdminMismatch { expected: Felt, actual: Felt },
    #[error("call to `{entry_point}` returned {actual:#x}, expected {expected:#x}")]
    UnexpectedValue {
        entry_point: String,
        expected: Felt,
        actual: Felt,
    },
    #[error("call to `{entry_point}` returned an empty result")]
    EmptyCallResult { entry_point: String },
}

/// Failure while waiting for a submitted transaction to be accepted.
#[derive(Debug, Error)]
pub enum WaitError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("transaction {transaction_hash:#x} reverted: {reason}")]
    Reverted { transaction_hash: Felt, reason: String },
    #[error("transaction {transaction_hash:#x} not accepted after {timeout:?}")]
    Timeout {
        transaction_hash: Felt,
        timeout: Duration,
    },
}

/// A configuration value that could not be parsed.
#[derive(Debug, Error)]
#[error("invalid configuration value for {name}: {reason}")]
pub struct ConfigError {
    pub name: &'static str,
    pub reason: String,
}
