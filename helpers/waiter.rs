use std::time::Duration;

use starknet::{
    core::types::{ExecutionResult, Felt, StarknetError},
    providers::{Provider, ProviderError},
};
use tokio::time::{sleep, Instant};

use crate::error::WaitError;
use crate::RpcProvider;

const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Polls a transaction receipt until the node reports acceptance.
///
/// Blocks the workflow until the transaction is accepted, reverted, or the
/// timeout elapses; there is no recovery beyond surfacing the failure.
pub struct TransactionWaiter<'p> {
    transaction_hash: Felt,
    provider: &'p RpcProvider,
    interval: Duration,
    timeout: Duration,
}

impl<'p> TransactionWaiter<'p> {
    pub fn new(transaction_hash: Felt, provider: &'p RpcProvider) -> Self {
        Self {
            transaction_hash,
            provider,
            interval: DEFAULT_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn wait(self) -> Result<(), WaitError> {
        let started = Instant::now();

        loop {
            match self.provider.get_transaction_receipt(self.transaction_hash).await {
                Ok(receipt) => match receipt.receipt.execution_result() {
                    ExecutionResult::Succeeded => {
                        tracing::debug!(
                            transaction_hash = format!("{:#x}", self.transaction_hash),
                            "Transaction accepted."
                        );
                        return Ok(());
                    }
                    ExecutionResult::Reverted { reason } => {
                        return Err(WaitError::Reverted {
                            transaction_hash: self.transaction_hash,
                            reason: reason.clone(),
                        });
                    }
                },
                // Not yet in a block; keep polling.
                Err(ProviderError::StarknetError(StarknetError::TransactionHashNotFound)) => {}
                Err(e) => return Err(WaitError::Provider(e)),
            }

            if started.elapsed() >= self.timeout {
                return Err(WaitError::Timeout {
                    transaction_hash: self.transaction_hash,
                    timeout: self.timeout,
                });
            }
            sleep(self.interval).await;
        }
    }
}
