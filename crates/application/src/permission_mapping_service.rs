use std::sync::Arc;

use mailshift_core::AppError;
use mailshift_domain::{
    CalendarSharingOptions, FolderTarget, GrantAction, GrantOutcome, MigrationBatch,
    PermissionRecord, WellKnownFolder, classify, match_well_known,
};
use tracing::{info, warn};

use crate::migration_ports::WellKnownFolderResolver;

/// Maps exported ACL records to target-system grant actions.
#[derive(Clone)]
pub struct PermissionMappingService {
    folder_resolver: Arc<dyn WellKnownFolderResolver>,
    calendar_options: CalendarSharingOptions,
}

impl PermissionMappingService {
    /// Creates a mapping service using the given folder resolver.
    #[must_use]
    pub fn new(folder_resolver: Arc<dyn WellKnownFolderResolver>) -> Self {
        Self {
            folder_resolver,
            calendar_options: CalendarSharingOptions::default(),
        }
    }

    /// Sets the notification and sharing flags attached to calendar grants.
    #[must_use]
    pub fn with_calendar_options(mut self, calendar_options: CalendarSharingOptions) -> Self {
        self.calendar_options = calendar_options;
        self
    }

    /// Maps every record touching a batch user, in input order.
    ///
    /// Records whose mailbox and delegate are both outside the batch are
    /// dropped before mapping and not reported.
    pub async fn map_batch(
        &self,
        records: &[PermissionRecord],
        batch: &MigrationBatch,
    ) -> Vec<GrantAction> {
        if batch.is_empty() {
            warn!("migration batch lists no users, nothing to map");
        }

        let mut actions = Vec::new();

        for record in records.iter().filter(|record| batch.is_relevant(record)) {
            actions.push(self.map_record(record).await);
        }

        let executable = actions
            .iter()
            .filter(|action| action.is_executable())
            .count();
        info!(
            records = records.len(),
            mapped = actions.len(),
            executable,
            not_mapped = actions.len() - executable,
            "permission mapping finished"
        );

        actions
    }

    /// Maps one record. Never fails: unsupported combinations and folder
    /// lookup failures become explicit outcomes on the returned action.
    pub async fn map_record(&self, record: &PermissionRecord) -> GrantAction {
        let target = match self.resolve_target(record).await {
            Ok(target) => target,
            Err((folder, error)) => {
                warn!(
                    mailbox = record.mailbox(),
                    path = record.path(),
                    scope = folder.scope(),
                    error = %error,
                    "failed to resolve well-known folder"
                );
                return GrantAction::unresolved(record, folder, error.to_string());
            }
        };

        let kind = classify(
            record.item_type(),
            record.assignment_kind(),
            record.permission_letters(),
        );
        let action =
            GrantAction::from_classification(record, &target, kind, &self.calendar_options);

        if let GrantOutcome::Unsupported(level) = action.outcome() {
            warn!(
                mailbox = record.mailbox(),
                item_type = record.item_type(),
                kind = record.assignment_kind().as_str(),
                perms = record.permission_letters(),
                level = level.as_str(),
                "unsupported permission combination"
            );
        }

        action
    }

    async fn resolve_target(
        &self,
        record: &PermissionRecord,
    ) -> Result<FolderTarget, (WellKnownFolder, AppError)> {
        if record.is_mailbox_level() {
            return Ok(FolderTarget::mailbox_scope(record.mailbox()));
        }

        let Some(matched) = match_well_known(record.path()) else {
            return Ok(FolderTarget::verbatim(record.mailbox(), record.path()));
        };

        let stored_name = self
            .folder_resolver
            .resolve_folder_name(record.mailbox(), matched.folder)
            .await
            .map_err(|error| (matched.folder, error))?;

        if stored_name.trim().is_empty() {
            return Err((
                matched.folder,
                AppError::NotFound(format!(
                    "no {} folder name returned for mailbox '{}'",
                    matched.folder,
                    record.mailbox()
                )),
            ));
        }

        Ok(FolderTarget::well_known(
            record.mailbox(),
            &matched,
            stored_name.as_str(),
        ))
    }
}
