use mailshift_core::same_identity;
use serde::{Deserialize, Serialize};

use crate::PermissionRecord;

/// Users scheduled together in one migration batch.
///
/// Order and duplicates are preserved: a user listed twice is counted twice
/// by the scorer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationBatch {
    users: Vec<String>,
}

impl MigrationBatch {
    /// Creates a batch from email addresses.
    #[must_use]
    pub fn new<I, S>(users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            users: users
                .into_iter()
                .map(|user| user.into().trim().to_owned())
                .collect(),
        }
    }

    /// Returns the number of listed users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Returns whether no users are listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Returns whether the identity belongs to a batch user.
    #[must_use]
    pub fn contains(&self, identity: &str) -> bool {
        self.users.iter().any(|user| same_identity(user, identity))
    }

    /// Counts the batch users touching the record as mailbox or delegate.
    ///
    /// A user matching both fields counts once.
    #[must_use]
    pub fn matching_users(&self, record: &PermissionRecord) -> u64 {
        let count = self
            .users
            .iter()
            .filter(|user| {
                same_identity(user, record.mailbox()) || same_identity(user, record.delegate())
            })
            .count();
        u64::try_from(count).unwrap_or(u64::MAX)
    }

    /// Returns whether the record's mailbox or delegate is a batch user.
    #[must_use]
    pub fn is_relevant(&self, record: &PermissionRecord) -> bool {
        self.contains(record.mailbox()) || self.contains(record.delegate())
    }
}
