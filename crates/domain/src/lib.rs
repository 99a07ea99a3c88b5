//! Domain model and rule engines for mailbox migration planning.

#![forbid(unsafe_code)]

mod batch;
mod eligibility;
mod folder_path;
mod grant;
mod grant_action;
mod lookup_index;
mod permission;
mod weights;

pub use batch::MigrationBatch;
pub use eligibility::{
    DEFAULT_ELIGIBILITY_THRESHOLD, EligibilityScorer, ScoredMailbox, ScoringConfig,
    overlap_percentage,
};
pub use folder_path::{FolderTarget, WellKnownFolder, WellKnownPath, match_well_known};
pub use grant::{
    FolderRole, GrantActionKind, GrantLevel, GrantRecipient, MailboxRight, classify,
};
pub use grant_action::{CalendarSharingOptions, GrantAction, GrantOutcome, SharingFlag};
pub use lookup_index::LookupIndex;
pub use permission::{AssignmentKind, PERMISSION_FIELD_COUNT, PermissionRecord, ROOT_ITEM_TYPE};
pub use weights::WeightTable;
