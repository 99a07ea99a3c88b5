use serde::{Deserialize, Serialize};

use crate::AssignmentKind;

/// Per-assignment-kind weights used by the eligibility scorer.
///
/// Absent and unrecognized kinds always weigh zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightTable {
    /// Weight of `usr` grants.
    pub usr: u32,
    /// Weight of `grp` grants.
    pub grp: u32,
    /// Weight of `dom` grants.
    pub dom: u32,
    /// Weight of `all` grants.
    pub all: u32,
    /// Weight of `pub` grants.
    #[serde(rename = "pub")]
    pub public: u32,
    /// Weight of `guest` grants.
    pub guest: u32,
}

impl WeightTable {
    /// Returns the weight of one assignment kind.
    #[must_use]
    pub fn weight(&self, kind: &AssignmentKind) -> u64 {
        let weight = match kind {
            AssignmentKind::User => self.usr,
            AssignmentKind::Group => self.grp,
            AssignmentKind::Domain => self.dom,
            AssignmentKind::AllAuthenticated => self.all,
            AssignmentKind::Public => self.public,
            AssignmentKind::Guest => self.guest,
            AssignmentKind::Absent | AssignmentKind::Unrecognized(_) => 0,
        };
        u64::from(weight)
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            usr: 2,
            grp: 5,
            dom: 1,
            all: 1,
            public: 1,
            guest: 1,
        }
    }
}
