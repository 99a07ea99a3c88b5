//! CSV report sinks for scored mailboxes and grant actions.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use mailshift_core::{AppError, AppResult, RunId};
use mailshift_domain::{GrantAction, GrantOutcome, ScoredMailbox};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ScoredMailboxRow<'a> {
    run_id: String,
    email_address: &'a str,
    total_perms: u64,
    total_weight: u64,
    in_batch_perms: u64,
    in_batch_weight: u64,
    percentage: u8,
    is_excluded: bool,
    eligible: bool,
}

#[derive(Debug, Serialize)]
struct GrantActionRow<'a> {
    run_id: String,
    mailbox: &'a str,
    path: &'a str,
    item_type: &'a str,
    perms: String,
    principal: &'a str,
    target: &'a str,
    status: &'static str,
    action: String,
    notify: Option<bool>,
    sharing_flags: Option<String>,
}

/// Writes reports as CSV with a header row.
#[derive(Debug, Clone, Copy)]
pub struct CsvReportWriter {
    run_id: RunId,
}

impl CsvReportWriter {
    /// Creates a writer tagging every row with the run identifier.
    #[must_use]
    pub fn new(run_id: RunId) -> Self {
        Self { run_id }
    }

    /// Writes the scored mailbox report to a file.
    pub fn write_scored_mailboxes_file(
        &self,
        path: &Path,
        scored: &[ScoredMailbox],
    ) -> AppResult<()> {
        self.write_scored_mailboxes(create(path)?, scored)
    }

    /// Writes the grant action report to a file.
    pub fn write_grant_actions_file(&self, path: &Path, actions: &[GrantAction]) -> AppResult<()> {
        self.write_grant_actions(create(path)?, actions)
    }

    /// Writes one row per scored mailbox.
    pub fn write_scored_mailboxes<W: Write>(
        &self,
        writer: W,
        scored: &[ScoredMailbox],
    ) -> AppResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        for mailbox in scored {
            csv_writer
                .serialize(ScoredMailboxRow {
                    run_id: self.run_id.to_string(),
                    email_address: mailbox.email_address.as_str(),
                    total_perms: mailbox.total_perms,
                    total_weight: mailbox.total_weight,
                    in_batch_perms: mailbox.in_batch_perms,
                    in_batch_weight: mailbox.in_batch_weight,
                    percentage: mailbox.percentage,
                    is_excluded: mailbox.is_excluded,
                    eligible: mailbox.eligible,
                })
                .map_err(csv_error)?;
        }

        csv_writer.flush().map_err(io_error)
    }

    /// Writes one row per grant action, including unsupported and
    /// unresolved ones.
    pub fn write_grant_actions<W: Write>(
        &self,
        writer: W,
        actions: &[GrantAction],
    ) -> AppResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        for action in actions {
            let calendar_sharing = action.calendar_sharing();
            csv_writer
                .serialize(GrantActionRow {
                    run_id: self.run_id.to_string(),
                    mailbox: action.mailbox(),
                    path: action.path(),
                    item_type: action.item_type(),
                    perms: action.perms_display(),
                    principal: action.principal(),
                    target: action.resolved_target_id(),
                    status: status(action.outcome()),
                    action: action.action_description(),
                    notify: calendar_sharing.map(|options| options.send_notification),
                    sharing_flags: calendar_sharing.map(|options| options.flags_display()),
                })
                .map_err(csv_error)?;
        }

        csv_writer.flush().map_err(io_error)
    }
}

fn status(outcome: &GrantOutcome) -> &'static str {
    match outcome {
        GrantOutcome::Mailbox(_) | GrantOutcome::Folder(_) => "grant",
        GrantOutcome::Unsupported(_) => "unsupported",
        GrantOutcome::Unresolved { .. } => "unresolved",
    }
}

fn create(path: &Path) -> AppResult<File> {
    File::create(path).map_err(|error| {
        AppError::Internal(format!(
            "failed to create report file '{}': {error}",
            path.display()
        ))
    })
}

fn csv_error(error: csv::Error) -> AppError {
    AppError::Internal(format!("failed to write CSV row: {error}"))
}

fn io_error(error: std::io::Error) -> AppError {
    AppError::Internal(format!("failed to flush CSV report: {error}"))
}

#[cfg(test)]
mod tests {
    use mailshift_core::RunId;
    use mailshift_domain::{
        CalendarSharingOptions, FolderTarget, GrantAction, PermissionRecord, ScoredMailbox,
        SharingFlag, classify, match_well_known,
    };

    use super::CsvReportWriter;

    fn run_id() -> RunId {
        serde_json::from_str("\"00000000-0000-0000-0000-000000000000\"")
            .unwrap_or_else(|error| panic!("nil run id should deserialize: {error}"))
    }

    #[test]
    fn scored_report_has_header_and_one_row_per_mailbox() {
        let scored = vec![ScoredMailbox {
            email_address: "shared@x.com".to_owned(),
            total_perms: 2,
            total_weight: 4,
            in_batch_perms: 1,
            in_batch_weight: 2,
            percentage: 50,
            is_excluded: false,
            eligible: false,
        }];
        let mut output = Vec::new();

        let result = CsvReportWriter::new(run_id()).write_scored_mailboxes(&mut output, &scored);
        assert!(result.is_ok());

        let text = String::from_utf8(output).unwrap_or_default();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "run_id,email_address,total_perms,total_weight,in_batch_perms,in_batch_weight,percentage,is_excluded,eligible",
                "00000000-0000-0000-0000-000000000000,shared@x.com,2,4,1,2,50,false,false",
            ]
        );
    }

    #[test]
    fn calendar_grant_row_includes_sharing_columns() {
        let record = PermissionRecord::from_fields(&[
            "shared@x.com",
            "/Calendar",
            "calendar",
            "b@x.com",
            "usr",
            "r",
        ]);
        let matched = match_well_known(record.path()).unwrap_or_else(|| unreachable!());
        let action = GrantAction::from_classification(
            &record,
            &FolderTarget::well_known(record.mailbox(), &matched, "Calendar"),
            classify(
                record.item_type(),
                record.assignment_kind(),
                record.permission_letters(),
            ),
            &CalendarSharingOptions {
                send_notification: false,
                sharing_flags: vec![SharingFlag::CanViewPrivateItems],
            },
        );
        let mut output = Vec::new();

        let result = CsvReportWriter::new(run_id()).write_grant_actions(&mut output, &[action]);
        assert!(result.is_ok());

        let text = String::from_utf8(output).unwrap_or_default();
        let row = text.lines().nth(1).unwrap_or_default();
        assert!(row.contains("r (Reviewer)"));
        assert!(row.contains(",grant,"));
        assert!(row.ends_with(",false,CanViewPrivateItems"));
    }
}
