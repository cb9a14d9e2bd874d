//! Shared setup for the devnet integration tests.

use helpers::WorkflowConfig;

/// Configuration for a test run: environment overrides on top of the local
/// devnet defaults.
pub fn test_config() -> anyhow::Result<WorkflowConfig> {
    Ok(WorkflowConfig::from_env()?)
}
