//! Folder path normalization for exported ACL paths.
//!
//! Exported paths use `/` separators and English names for special folders.
//! The target system stores special folders under localized names and uses
//! `\` separators, so a path such as `/Inbox/Projects` becomes
//! `mailbox:\Posteingang\Projects` once the localized name is known.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Special-purpose folders whose stored name may be localized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WellKnownFolder {
    /// Default inbox.
    Inbox,
    /// Default calendar.
    Calendar,
    /// Default task list.
    Tasks,
    /// Default contacts folder.
    Contacts,
    /// Sent items.
    SentItems,
}

impl WellKnownFolder {
    /// Returns every well-known folder.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[WellKnownFolder] = &[
            WellKnownFolder::Inbox,
            WellKnownFolder::Calendar,
            WellKnownFolder::Tasks,
            WellKnownFolder::Contacts,
            WellKnownFolder::SentItems,
        ];

        ALL
    }

    /// Returns the export path prefix naming this folder.
    #[must_use]
    pub fn export_prefix(&self) -> &'static str {
        match self {
            Self::Inbox => "/Inbox",
            Self::Calendar => "/Calendar",
            Self::Tasks => "/Tasks",
            Self::Contacts => "/Contacts",
            Self::SentItems => "/Sent",
        }
    }

    /// Returns the folder scope keyword understood by the folder resolver.
    #[must_use]
    pub fn scope(&self) -> &'static str {
        match self {
            Self::Inbox => "Inbox",
            Self::Calendar => "Calendar",
            Self::Tasks => "Tasks",
            Self::Contacts => "Contacts",
            Self::SentItems => "SentItems",
        }
    }

    /// Returns the unlocalized folder name.
    #[must_use]
    pub fn default_name(&self) -> &'static str {
        match self {
            Self::Inbox => "Inbox",
            Self::Calendar => "Calendar",
            Self::Tasks => "Tasks",
            Self::Contacts => "Contacts",
            Self::SentItems => "Sent Items",
        }
    }

    /// Parses a scope keyword, ignoring ASCII case.
    #[must_use]
    pub fn from_scope(value: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|folder| folder.scope().eq_ignore_ascii_case(value.trim()))
    }
}

impl Display for WellKnownFolder {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.scope())
    }
}

/// A path whose first segment names a well-known folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WellKnownPath<'a> {
    /// The matched folder.
    pub folder: WellKnownFolder,
    /// Everything after the matched prefix, empty or starting with `/`.
    pub remainder: &'a str,
}

/// Matches the leading segment of an export path against the well-known
/// prefixes. Only a whole segment matches: `/Inboxes` is not `/Inbox`.
#[must_use]
pub fn match_well_known(path: &str) -> Option<WellKnownPath<'_>> {
    WellKnownFolder::all().iter().find_map(|folder| {
        let prefix = folder.export_prefix();
        let head = path.get(..prefix.len())?;
        let remainder = path.get(prefix.len()..)?;

        (head.eq_ignore_ascii_case(prefix) && (remainder.is_empty() || remainder.starts_with('/')))
            .then_some(WellKnownPath {
                folder: *folder,
                remainder,
            })
    })
}

/// Resolved location a grant applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderTarget {
    resolved_target_id: String,
    calendar_related: bool,
}

impl FolderTarget {
    /// Targets the mailbox itself.
    #[must_use]
    pub fn mailbox_scope(mailbox: &str) -> Self {
        Self {
            resolved_target_id: mailbox.to_owned(),
            calendar_related: false,
        }
    }

    /// Targets a folder whose path is used exactly as exported.
    #[must_use]
    pub fn verbatim(mailbox: &str, path: &str) -> Self {
        Self {
            resolved_target_id: format!("{mailbox}:{path}"),
            calendar_related: false,
        }
    }

    /// Targets a well-known folder (or a subfolder of it) by its stored name.
    #[must_use]
    pub fn well_known(mailbox: &str, matched: &WellKnownPath<'_>, stored_name: &str) -> Self {
        let stored_name = stored_name.trim().trim_matches(|c| c == '/' || c == '\\');
        let remainder = matched.remainder.replace('/', "\\");

        Self {
            resolved_target_id: format!("{mailbox}:\\{stored_name}{remainder}"),
            calendar_related: matched.folder == WellKnownFolder::Calendar,
        }
    }

    /// Returns the target identifier, `mailbox` or `mailbox:folder`.
    #[must_use]
    pub fn resolved_target_id(&self) -> &str {
        self.resolved_target_id.as_str()
    }

    /// Returns whether the target is the calendar or one of its subfolders.
    #[must_use]
    pub fn is_calendar_related(&self) -> bool {
        self.calendar_related
    }
}
