use async_trait::async_trait;
use mailshift_core::AppResult;
use mailshift_domain::GrantAction;

/// Whether computed grant actions are applied or only reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Report actions without touching the target system.
    #[default]
    ReportOnly,
    /// Hand every executable action to the grant executor.
    Apply,
}

/// Counters for one execution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecutionSummary {
    /// Actions the executor accepted.
    pub applied: u32,
    /// Actions not sent to the executor (report-only, unsupported or
    /// unresolved).
    pub skipped: u32,
    /// Actions the executor rejected.
    pub failed: u32,
}

/// Port performing grant actions against the target mail system.
#[async_trait]
pub trait GrantExecutor: Send + Sync {
    /// Performs one executable grant action.
    async fn execute_grant(&self, action: &GrantAction) -> AppResult<()>;
}
