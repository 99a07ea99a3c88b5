use std::sync::Arc;

use mailshift_domain::GrantAction;
use tracing::{info, warn};

use crate::migration_ports::{ExecutionMode, ExecutionSummary, GrantExecutor};

/// Hands computed grant actions to a grant executor.
#[derive(Clone)]
pub struct GrantExecutionService {
    executor: Arc<dyn GrantExecutor>,
    mode: ExecutionMode,
}

impl GrantExecutionService {
    /// Creates an execution service.
    #[must_use]
    pub fn new(executor: Arc<dyn GrantExecutor>, mode: ExecutionMode) -> Self {
        Self { executor, mode }
    }

    /// Returns the configured mode.
    #[must_use]
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Executes each executable action once, in order.
    ///
    /// An executor failure is logged and counted; later actions still run.
    pub async fn execute_all(&self, actions: &[GrantAction]) -> ExecutionSummary {
        let mut summary = ExecutionSummary::default();

        for action in actions {
            if self.mode == ExecutionMode::ReportOnly || !action.is_executable() {
                summary.skipped = summary.skipped.saturating_add(1);
                continue;
            }

            match self.executor.execute_grant(action).await {
                Ok(()) => summary.applied = summary.applied.saturating_add(1),
                Err(error) => {
                    summary.failed = summary.failed.saturating_add(1);
                    warn!(
                        mailbox = action.mailbox(),
                        target = action.resolved_target_id(),
                        principal = action.principal(),
                        error = %error,
                        "grant execution failed"
                    );
                }
            }
        }

        info!(
            mode = ?self.mode,
            applied = summary.applied,
            skipped = summary.skipped,
            failed = summary.failed,
            "grant execution finished"
        );

        summary
    }
}
