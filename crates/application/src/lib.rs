//! Application services and ports.

#![forbid(unsafe_code)]

mod batch_eligibility_service;
mod grant_execution_service;
mod migration_ports;
mod permission_mapping_service;

pub use batch_eligibility_service::BatchEligibilityService;
pub use grant_execution_service::GrantExecutionService;
pub use migration_ports::{
    ExecutionMode, ExecutionSummary, GrantExecutor, WellKnownFolderResolver,
};
pub use permission_mapping_service::PermissionMappingService;
