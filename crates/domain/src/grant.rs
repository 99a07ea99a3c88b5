use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::AssignmentKind;
use crate::permission::ROOT_ITEM_TYPE;

/// Mailbox-level access granted to a delegate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MailboxRight {
    /// Full mailbox access plus the right to send as the mailbox.
    FullAccessAndSendAs,
    /// Read access to mailbox properties.
    ReadPermission,
}

impl MailboxRight {
    /// Returns the target-system name of the right.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullAccessAndSendAs => "FullAccess+SendAs",
            Self::ReadPermission => "ReadPermission",
        }
    }
}

/// Folder-level access role in the target system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FolderRole {
    /// Explicit no-access entry.
    None,
    /// Free/busy plus subject and location.
    LimitedDetails,
    /// Free/busy only.
    AvailabilityOnly,
    /// Read items.
    Reviewer,
    /// Read, create, modify and delete items.
    Editor,
    /// Everything, including folder permission management.
    Owner,
}

impl FolderRole {
    /// Returns the target-system name of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::LimitedDetails => "LimitedDetails",
            Self::AvailabilityOnly => "AvailabilityOnly",
            Self::Reviewer => "Reviewer",
            Self::Editor => "Editor",
            Self::Owner => "Owner",
        }
    }
}

impl Display for FolderRole {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Who receives a folder grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrantRecipient {
    /// The record's delegate.
    Delegate,
    /// The built-in principal standing for all authenticated users.
    Default,
    /// The built-in principal standing for unauthenticated and external users.
    Anonymous,
}

impl GrantRecipient {
    /// Returns the target-system name of a built-in principal.
    #[must_use]
    pub fn builtin_name(&self) -> Option<&'static str> {
        match self {
            Self::Delegate => None,
            Self::Default => Some("Default"),
            Self::Anonymous => Some("Anonymous"),
        }
    }
}

/// Level of the source grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrantLevel {
    /// Mailbox-level (`ROOT`) grant.
    Mailbox,
    /// Folder-level grant.
    Folder,
}

impl GrantLevel {
    /// Returns a lowercase label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mailbox => "mailbox",
            Self::Folder => "folder",
        }
    }
}

/// Target-system equivalent of one source grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrantActionKind {
    /// Mailbox-level right for the delegate.
    Mailbox(MailboxRight),
    /// Folder role for a recipient.
    Folder {
        /// Granted role.
        role: FolderRole,
        /// Receiving principal.
        recipient: GrantRecipient,
    },
    /// No equivalent exists.
    Unsupported(GrantLevel),
}

/// Classifies one source grant.
///
/// Mailbox-level grants depend on the letters only. Folder grants depend on
/// the assignment kind first and on the letters only for user and group
/// principals (any unrecognized kind is treated like a user).
#[must_use]
pub fn classify(
    item_type: &str,
    assignment_kind: &AssignmentKind,
    permission_letters: &str,
) -> GrantActionKind {
    if item_type == ROOT_ITEM_TYPE {
        return match permission_letters {
            "rwidx" | "rwidxa" => GrantActionKind::Mailbox(MailboxRight::FullAccessAndSendAs),
            "r" => GrantActionKind::Mailbox(MailboxRight::ReadPermission),
            _ => GrantActionKind::Unsupported(GrantLevel::Mailbox),
        };
    }

    let folder = |role, recipient| GrantActionKind::Folder { role, recipient };

    match assignment_kind {
        AssignmentKind::Absent => folder(FolderRole::None, GrantRecipient::Delegate),
        AssignmentKind::Public => folder(FolderRole::LimitedDetails, GrantRecipient::Default),
        AssignmentKind::Guest => folder(FolderRole::AvailabilityOnly, GrantRecipient::Anonymous),
        AssignmentKind::AllAuthenticated | AssignmentKind::Domain => {
            folder(FolderRole::Reviewer, GrantRecipient::Default)
        }
        AssignmentKind::User | AssignmentKind::Group | AssignmentKind::Unrecognized(_) => {
            match permission_letters {
                "r" => folder(FolderRole::Reviewer, GrantRecipient::Delegate),
                "rwidx" => folder(FolderRole::Editor, GrantRecipient::Delegate),
                "rwidxa" | "rwidxp" => folder(FolderRole::Owner, GrantRecipient::Delegate),
                _ => GrantActionKind::Unsupported(GrantLevel::Folder),
            }
        }
    }
}
