mod folder_resolver;
mod grant_executor;

pub use folder_resolver::WellKnownFolderResolver;
pub use grant_executor::{ExecutionMode, ExecutionSummary, GrantExecutor};
