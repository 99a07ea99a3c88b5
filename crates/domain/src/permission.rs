use std::fmt::{Display, Formatter};
use std::str::FromStr;

use mailshift_core::AppError;
use serde::{Deserialize, Serialize};

/// Item type used by the export for mailbox-level grants.
pub const ROOT_ITEM_TYPE: &str = "ROOT";

/// Number of fields in one permission export row.
pub const PERMISSION_FIELD_COUNT: usize = 6;

/// Principal class a source grant was assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentKind {
    /// Single user principal (`usr`).
    User,
    /// Group principal (`grp`).
    Group,
    /// Whole-domain principal (`dom`).
    Domain,
    /// All authenticated users (`all`).
    AllAuthenticated,
    /// Public, unauthenticated access (`pub`).
    Public,
    /// External guest access (`guest`).
    Guest,
    /// No assignment kind was exported.
    Absent,
    /// Any text outside the known set, kept verbatim for diagnostics.
    Unrecognized(String),
}

impl AssignmentKind {
    /// Parses an export value. Never fails: unknown text is kept as
    /// [`AssignmentKind::Unrecognized`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" => Self::Absent,
            "usr" => Self::User,
            "grp" => Self::Group,
            "dom" => Self::Domain,
            "all" => Self::AllAuthenticated,
            "pub" => Self::Public,
            "guest" => Self::Guest,
            other => Self::Unrecognized(other.to_owned()),
        }
    }

    /// Returns the export value for this kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "usr",
            Self::Group => "grp",
            Self::Domain => "dom",
            Self::AllAuthenticated => "all",
            Self::Public => "pub",
            Self::Guest => "guest",
            Self::Absent => "",
            Self::Unrecognized(value) => value.as_str(),
        }
    }
}

impl Display for AssignmentKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for AssignmentKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match Self::parse(value) {
            Self::Unrecognized(other) => Err(AppError::Validation(format!(
                "unknown assignment kind '{other}'"
            ))),
            kind => Ok(kind),
        }
    }
}

/// One exported ACL entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRecord {
    mailbox: String,
    path: String,
    item_type: String,
    delegate: String,
    assignment_kind: AssignmentKind,
    permission_letters: String,
}

impl PermissionRecord {
    /// Creates a record from already separated values.
    #[must_use]
    pub fn new(
        mailbox: impl Into<String>,
        path: impl Into<String>,
        item_type: impl Into<String>,
        delegate: impl Into<String>,
        assignment_kind: AssignmentKind,
        permission_letters: impl Into<String>,
    ) -> Self {
        Self {
            mailbox: mailbox.into().trim().to_owned(),
            path: path.into().trim().to_owned(),
            item_type: item_type.into().trim().to_owned(),
            delegate: delegate.into().trim().to_owned(),
            assignment_kind,
            permission_letters: permission_letters.into().trim().to_owned(),
        }
    }

    /// Creates a record from one export row in the fixed field order
    /// `mailbox, path, type, delegate, assignmentKind, permissionLetters`.
    ///
    /// Short rows are accepted: missing fields become empty strings. Fields
    /// past the sixth are ignored.
    #[must_use]
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Self {
        let field = |index: usize| fields.get(index).map_or("", |value| value.as_ref());

        Self::new(
            field(0),
            field(1),
            field(2),
            field(3),
            AssignmentKind::parse(field(4)),
            field(5),
        )
    }

    /// Returns the owning mailbox identity.
    #[must_use]
    pub fn mailbox(&self) -> &str {
        self.mailbox.as_str()
    }

    /// Returns the folder path inside the mailbox.
    #[must_use]
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Returns the exported item type.
    #[must_use]
    pub fn item_type(&self) -> &str {
        self.item_type.as_str()
    }

    /// Returns the principal receiving the grant, possibly empty.
    #[must_use]
    pub fn delegate(&self) -> &str {
        self.delegate.as_str()
    }

    /// Returns the principal class.
    #[must_use]
    pub fn assignment_kind(&self) -> &AssignmentKind {
        &self.assignment_kind
    }

    /// Returns the raw permission letters.
    #[must_use]
    pub fn permission_letters(&self) -> &str {
        self.permission_letters.as_str()
    }

    /// Returns whether this is a mailbox-level grant.
    #[must_use]
    pub fn is_mailbox_level(&self) -> bool {
        self.item_type == ROOT_ITEM_TYPE
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{AssignmentKind, PermissionRecord};

    #[test]
    fn assignment_kind_parses_known_values() {
        assert_eq!(AssignmentKind::parse("usr"), AssignmentKind::User);
        assert_eq!(AssignmentKind::parse("grp"), AssignmentKind::Group);
        assert_eq!(AssignmentKind::parse(" guest "), AssignmentKind::Guest);
        assert_eq!(AssignmentKind::parse(""), AssignmentKind::Absent);
    }

    #[test]
    fn unknown_assignment_kind_is_kept_verbatim() {
        let kind = AssignmentKind::parse("role");
        assert_eq!(kind, AssignmentKind::Unrecognized("role".to_owned()));
        assert_eq!(kind.as_str(), "role");
        assert!(AssignmentKind::from_str("role").is_err());
    }

    #[test]
    fn short_row_defaults_missing_fields_to_empty() {
        let record = PermissionRecord::from_fields(&["shared@example.com", "/Inbox", "mail"]);

        assert_eq!(record.mailbox(), "shared@example.com");
        assert_eq!(record.item_type(), "mail");
        assert_eq!(record.delegate(), "");
        assert_eq!(record.assignment_kind(), &AssignmentKind::Absent);
        assert_eq!(record.permission_letters(), "");
    }

    #[test]
    fn root_item_type_marks_mailbox_level_grant() {
        let record = PermissionRecord::from_fields(&[
            "shared@example.com",
            "/",
            "ROOT",
            "user@example.com",
            "usr",
            "rwidxa",
            "trailing",
        ]);

        assert!(record.is_mailbox_level());
        assert_eq!(record.permission_letters(), "rwidxa");
    }
}
