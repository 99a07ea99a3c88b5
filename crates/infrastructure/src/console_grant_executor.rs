//! Console grant executor. Logs grant actions to tracing output instead of
//! calling the mail administration service.

use async_trait::async_trait;
use mailshift_application::GrantExecutor;
use mailshift_core::{AppError, AppResult};
use mailshift_domain::GrantAction;
use tracing::info;

/// Grant executor that records actions in the log.
#[derive(Clone)]
pub struct ConsoleGrantExecutor;

impl ConsoleGrantExecutor {
    /// Creates a new console grant executor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleGrantExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GrantExecutor for ConsoleGrantExecutor {
    async fn execute_grant(&self, action: &GrantAction) -> AppResult<()> {
        if !action.is_executable() {
            return Err(AppError::Validation(format!(
                "action for mailbox '{}' is not executable: {}",
                action.mailbox(),
                action.action_description()
            )));
        }

        info!(
            mailbox = action.mailbox(),
            target = action.resolved_target_id(),
            principal = action.principal(),
            perms = %action.perms_display(),
            "{}",
            action.action_description()
        );

        Ok(())
    }
}
