use std::str::FromStr;

use mailshift_core::AppError;
use serde::{Deserialize, Serialize};

use crate::{
    FolderRole, FolderTarget, GrantActionKind, GrantLevel, GrantRecipient, MailboxRight,
    PermissionRecord, WellKnownFolder,
};

/// Sharing flag attached to calendar folder grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SharingFlag {
    /// Recipient acts as a calendar delegate.
    Delegate,
    /// Recipient may read items marked private.
    CanViewPrivateItems,
}

impl SharingFlag {
    /// Returns the target-system flag name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delegate => "Delegate",
            Self::CanViewPrivateItems => "CanViewPrivateItems",
        }
    }
}

impl FromStr for SharingFlag {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "Delegate" => Ok(Self::Delegate),
            "CanViewPrivateItems" => Ok(Self::CanViewPrivateItems),
            other => Err(AppError::Validation(format!(
                "unknown calendar sharing flag '{other}'"
            ))),
        }
    }
}

/// Caller-chosen settings applied to calendar Reviewer and Editor grants for
/// named users and groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarSharingOptions {
    /// Whether the recipient is notified about the new grant.
    pub send_notification: bool,
    /// Sharing flags set on the grant.
    pub sharing_flags: Vec<SharingFlag>,
}

impl CalendarSharingOptions {
    /// Renders the flags as a comma-separated list, `None` when empty.
    #[must_use]
    pub fn flags_display(&self) -> String {
        if self.sharing_flags.is_empty() {
            return "None".to_owned();
        }

        self.sharing_flags
            .iter()
            .map(SharingFlag::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Result of mapping one source grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrantOutcome {
    /// Grant a mailbox-level right.
    Mailbox(MailboxRight),
    /// Set a folder role.
    Folder(FolderRole),
    /// No target-system equivalent.
    Unsupported(GrantLevel),
    /// The well-known folder could not be resolved.
    Unresolved {
        /// Folder that failed to resolve.
        folder: WellKnownFolder,
        /// Collaborator error message.
        error: String,
    },
}

/// Target-system permission operation derived from one source grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantAction {
    mailbox: String,
    path: String,
    item_type: String,
    assignment_kind: String,
    permission_letters: String,
    principal: String,
    resolved_target_id: String,
    outcome: GrantOutcome,
    calendar_sharing: Option<CalendarSharingOptions>,
}

impl GrantAction {
    /// Builds the action for a classified record and its resolved target.
    ///
    /// Calendar options are attached only to Reviewer and Editor grants for
    /// the record's own delegate on a calendar-related target. A grant meant
    /// for the delegate of a record without one becomes unsupported.
    #[must_use]
    pub fn from_classification(
        record: &PermissionRecord,
        target: &FolderTarget,
        kind: GrantActionKind,
        calendar_options: &CalendarSharingOptions,
    ) -> Self {
        let kind = match kind {
            GrantActionKind::Mailbox(_) if record.delegate().is_empty() => {
                GrantActionKind::Unsupported(GrantLevel::Mailbox)
            }
            GrantActionKind::Folder {
                recipient: GrantRecipient::Delegate,
                ..
            } if record.delegate().is_empty() => GrantActionKind::Unsupported(GrantLevel::Folder),
            kind => kind,
        };

        let (outcome, recipient) = match kind {
            GrantActionKind::Mailbox(right) => {
                (GrantOutcome::Mailbox(right), GrantRecipient::Delegate)
            }
            GrantActionKind::Folder { role, recipient } => (GrantOutcome::Folder(role), recipient),
            GrantActionKind::Unsupported(level) => {
                (GrantOutcome::Unsupported(level), GrantRecipient::Delegate)
            }
        };

        let calendar_sharing = match kind {
            GrantActionKind::Folder {
                role: FolderRole::Reviewer | FolderRole::Editor,
                recipient: GrantRecipient::Delegate,
            } if target.is_calendar_related() => Some(calendar_options.clone()),
            _ => None,
        };

        Self {
            principal: recipient
                .builtin_name()
                .unwrap_or(record.delegate())
                .to_owned(),
            resolved_target_id: target.resolved_target_id().to_owned(),
            outcome,
            calendar_sharing,
            ..Self::base(record)
        }
    }

    /// Builds the action for a record whose well-known folder failed to
    /// resolve.
    #[must_use]
    pub fn unresolved(
        record: &PermissionRecord,
        folder: WellKnownFolder,
        error: impl Into<String>,
    ) -> Self {
        Self {
            resolved_target_id: format!("{}:{}", record.mailbox(), record.path()),
            outcome: GrantOutcome::Unresolved {
                folder,
                error: error.into(),
            },
            ..Self::base(record)
        }
    }

    fn base(record: &PermissionRecord) -> Self {
        Self {
            mailbox: record.mailbox().to_owned(),
            path: record.path().to_owned(),
            item_type: record.item_type().to_owned(),
            assignment_kind: record.assignment_kind().as_str().to_owned(),
            permission_letters: record.permission_letters().to_owned(),
            principal: record.delegate().to_owned(),
            resolved_target_id: String::new(),
            outcome: GrantOutcome::Unsupported(GrantLevel::Folder),
            calendar_sharing: None,
        }
    }

    /// Returns the source mailbox.
    #[must_use]
    pub fn mailbox(&self) -> &str {
        self.mailbox.as_str()
    }

    /// Returns the source folder path.
    #[must_use]
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Returns the source item type.
    #[must_use]
    pub fn item_type(&self) -> &str {
        self.item_type.as_str()
    }

    /// Returns the source assignment kind text.
    #[must_use]
    pub fn assignment_kind(&self) -> &str {
        self.assignment_kind.as_str()
    }

    /// Returns the source permission letters.
    #[must_use]
    pub fn permission_letters(&self) -> &str {
        self.permission_letters.as_str()
    }

    /// Returns the receiving principal: the delegate or a built-in name.
    #[must_use]
    pub fn principal(&self) -> &str {
        self.principal.as_str()
    }

    /// Returns `mailbox` or `mailbox:folder` the grant applies to.
    #[must_use]
    pub fn resolved_target_id(&self) -> &str {
        self.resolved_target_id.as_str()
    }

    /// Returns the mapping outcome.
    #[must_use]
    pub fn outcome(&self) -> &GrantOutcome {
        &self.outcome
    }

    /// Returns calendar sharing settings, if attached.
    #[must_use]
    pub fn calendar_sharing(&self) -> Option<&CalendarSharingOptions> {
        self.calendar_sharing.as_ref()
    }

    /// Returns whether the action can be handed to a grant executor.
    #[must_use]
    pub fn is_executable(&self) -> bool {
        matches!(
            self.outcome,
            GrantOutcome::Mailbox(_) | GrantOutcome::Folder(_)
        )
    }

    /// Returns the source letters annotated with what they became.
    #[must_use]
    pub fn perms_display(&self) -> String {
        let letters = if self.permission_letters.is_empty() {
            "-"
        } else {
            self.permission_letters.as_str()
        };

        let detail = match &self.outcome {
            GrantOutcome::Mailbox(right) => right.as_str().to_owned(),
            GrantOutcome::Folder(role) => role.as_str().to_owned(),
            GrantOutcome::Unsupported(level) => format!("unsupported {} grant", level.as_str()),
            GrantOutcome::Unresolved { folder, .. } => format!("unresolved {folder} folder"),
        };

        format!("{letters} ({detail})")
    }

    /// Returns a one-line human-readable summary.
    #[must_use]
    pub fn action_description(&self) -> String {
        match &self.outcome {
            GrantOutcome::Mailbox(MailboxRight::FullAccessAndSendAs) => format!(
                "grant FullAccess and SendAs on {} to {}",
                self.resolved_target_id, self.principal
            ),
            GrantOutcome::Mailbox(MailboxRight::ReadPermission) => format!(
                "grant ReadPermission on {} to {}",
                self.resolved_target_id, self.principal
            ),
            GrantOutcome::Folder(role) => {
                let mut description = format!(
                    "set {role} on {} for {}",
                    self.resolved_target_id, self.principal
                );
                if let Some(options) = &self.calendar_sharing {
                    description.push_str(&format!(
                        " (notify={}, sharing flags={})",
                        options.send_notification,
                        options.flags_display()
                    ));
                }
                description
            }
            GrantOutcome::Unsupported(level) => format!(
                "unsupported {} grant: mailbox={} type={} kind={} perms={} delegate={}",
                level.as_str(),
                self.mailbox,
                self.item_type,
                self.assignment_kind,
                self.permission_letters,
                self.principal
            ),
            GrantOutcome::Unresolved { folder, error } => format!(
                "unresolved {folder} folder for mailbox {} path {}: {error}",
                self.mailbox, self.path
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CalendarSharingOptions, GrantAction, GrantOutcome, SharingFlag};
    use crate::{
        AssignmentKind, FolderRole, FolderTarget, GrantActionKind, GrantLevel, GrantRecipient,
        MailboxRight, PermissionRecord, WellKnownFolder, classify, match_well_known,
    };

    fn options() -> CalendarSharingOptions {
        CalendarSharingOptions {
            send_notification: true,
            sharing_flags: vec![SharingFlag::Delegate],
        }
    }

    fn calendar_target() -> FolderTarget {
        let matched = match_well_known("/Calendar").unwrap_or_else(|| unreachable!());
        FolderTarget::well_known("shared@x.com", &matched, "Calendar")
    }

    fn map(record: &PermissionRecord, target: &FolderTarget) -> GrantAction {
        let kind = classify(
            record.item_type(),
            record.assignment_kind(),
            record.permission_letters(),
        );
        GrantAction::from_classification(record, target, kind, &options())
    }

    #[test]
    fn mailbox_grant_describes_full_access() {
        let record = PermissionRecord::from_fields(&[
            "shared@x.com",
            "/",
            "ROOT",
            "b@x.com",
            "usr",
            "rwidxa",
        ]);
        let action = map(&record, &FolderTarget::mailbox_scope("shared@x.com"));

        assert_eq!(
            action.outcome(),
            &GrantOutcome::Mailbox(MailboxRight::FullAccessAndSendAs)
        );
        assert_eq!(
            action.action_description(),
            "grant FullAccess and SendAs on shared@x.com to b@x.com"
        );
        assert_eq!(action.perms_display(), "rwidxa (FullAccess+SendAs)");
        assert!(action.is_executable());
    }

    #[test]
    fn calendar_reviewer_carries_sharing_options() {
        let record = PermissionRecord::from_fields(&[
            "shared@x.com",
            "/Calendar",
            "calendar",
            "b@x.com",
            "usr",
            "r",
        ]);
        let action = map(&record, &calendar_target());

        assert_eq!(action.calendar_sharing(), Some(&options()));
        assert_eq!(
            action.action_description(),
            "set Reviewer on shared@x.com:\\Calendar for b@x.com (notify=true, sharing flags=Delegate)"
        );
    }

    #[test]
    fn calendar_owner_has_no_sharing_options() {
        let record = PermissionRecord::from_fields(&[
            "shared@x.com",
            "/Calendar",
            "calendar",
            "b@x.com",
            "usr",
            "rwidxa",
        ]);
        let action = map(&record, &calendar_target());

        assert_eq!(action.outcome(), &GrantOutcome::Folder(FolderRole::Owner));
        assert!(action.calendar_sharing().is_none());
    }

    #[test]
    fn calendar_builtin_recipient_has_no_sharing_options() {
        let record = PermissionRecord::from_fields(&[
            "shared@x.com",
            "/Calendar",
            "calendar",
            "",
            "all",
            "r",
        ]);
        let action = map(&record, &calendar_target());

        assert_eq!(action.principal(), "Default");
        assert!(action.calendar_sharing().is_none());
    }

    #[test]
    fn non_calendar_editor_has_no_sharing_options() {
        let record = PermissionRecord::from_fields(&[
            "shared@x.com",
            "/Projects",
            "mail",
            "b@x.com",
            "grp",
            "rwidx",
        ]);
        let action = map(&record, &FolderTarget::verbatim("shared@x.com", "/Projects"));

        assert_eq!(action.outcome(), &GrantOutcome::Folder(FolderRole::Editor));
        assert!(action.calendar_sharing().is_none());
    }

    #[test]
    fn unsupported_action_keeps_diagnostic_context() {
        let record = PermissionRecord::from_fields(&[
            "shared@x.com",
            "/",
            "ROOT",
            "b@x.com",
            "usr",
            "rw",
        ]);
        let action = map(&record, &FolderTarget::mailbox_scope("shared@x.com"));

        assert_eq!(
            action.outcome(),
            &GrantOutcome::Unsupported(GrantLevel::Mailbox)
        );
        assert!(!action.is_executable());
        assert_eq!(action.perms_display(), "rw (unsupported mailbox grant)");
        let description = action.action_description();
        assert!(description.contains("mailbox=shared@x.com"));
        assert!(description.contains("type=ROOT"));
        assert!(description.contains("perms=rw"));
    }

    #[test]
    fn guest_grant_targets_anonymous() {
        let record = PermissionRecord::new(
            "shared@x.com",
            "/Calendar",
            "calendar",
            "",
            AssignmentKind::Guest,
            "r",
        );
        let action = GrantAction::from_classification(
            &record,
            &calendar_target(),
            GrantActionKind::Folder {
                role: FolderRole::AvailabilityOnly,
                recipient: GrantRecipient::Anonymous,
            },
            &CalendarSharingOptions::default(),
        );

        assert_eq!(action.principal(), "Anonymous");
        assert_eq!(action.perms_display(), "r (AvailabilityOnly)");
    }

    #[test]
    fn unresolved_action_is_not_executable() {
        let record = PermissionRecord::from_fields(&[
            "shared@x.com",
            "/Inbox/Sub",
            "mail",
            "b@x.com",
            "usr",
            "r",
        ]);
        let action = GrantAction::unresolved(&record, WellKnownFolder::Inbox, "lookup failed");

        assert!(!action.is_executable());
        assert_eq!(action.resolved_target_id(), "shared@x.com:/Inbox/Sub");
        assert_eq!(
            action.action_description(),
            "unresolved Inbox folder for mailbox shared@x.com path /Inbox/Sub: lookup failed"
        );
    }

    #[test]
    fn empty_letters_display_as_dash() {
        let record = PermissionRecord::from_fields(&["shared@x.com", "/Tasks", "task", "b@x.com"]);
        let action = map(&record, &FolderTarget::verbatim("shared@x.com", "/Tasks"));

        assert_eq!(action.outcome(), &GrantOutcome::Folder(FolderRole::None));
        assert_eq!(action.perms_display(), "- (None)");
    }

    #[test]
    fn delegate_grant_without_delegate_is_unsupported() {
        let folder = PermissionRecord::from_fields(&["shared@x.com", "/Archive", "mail"]);
        let action = map(&folder, &FolderTarget::verbatim("shared@x.com", "/Archive"));

        assert_eq!(
            action.outcome(),
            &GrantOutcome::Unsupported(GrantLevel::Folder)
        );
        assert!(!action.is_executable());
        assert!(action.action_description().contains("delegate="));

        let mailbox =
            PermissionRecord::from_fields(&["shared@x.com", "/", "ROOT", "", "usr", "rwidxa"]);
        let action = map(&mailbox, &FolderTarget::mailbox_scope("shared@x.com"));

        assert_eq!(
            action.outcome(),
            &GrantOutcome::Unsupported(GrantLevel::Mailbox)
        );
    }

    #[test]
    fn calendar_subfolder_carries_sharing_options() {
        let matched = match_well_known("/Calendar/Team").unwrap_or_else(|| unreachable!());
        let target = FolderTarget::well_known("shared@x.com", &matched, "Kalender");
        let record = PermissionRecord::from_fields(&[
            "shared@x.com",
            "/Calendar/Team",
            "calendar",
            "b@x.com",
            "grp",
            "r",
        ]);
        let action = map(&record, &target);

        assert!(target.is_calendar_related());
        assert_eq!(action.resolved_target_id(), "shared@x.com:\\Kalender\\Team");
        assert_eq!(action.calendar_sharing(), Some(&options()));
    }

    #[test]
    fn sharing_flag_parses_target_names() {
        assert!(matches!(
            "CanViewPrivateItems".parse::<SharingFlag>(),
            Ok(SharingFlag::CanViewPrivateItems)
        ));
        assert!("Everything".parse::<SharingFlag>().is_err());
    }
}
