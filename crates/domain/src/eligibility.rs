use mailshift_core::{AppError, AppResult, same_identity};
use serde::{Deserialize, Serialize};

use crate::{LookupIndex, MigrationBatch, WeightTable};

/// Default minimum in-batch percentage for a shared mailbox to be eligible.
pub const DEFAULT_ELIGIBILITY_THRESHOLD: u8 = 75;

/// Scorer configuration. Built only through [`ScoringConfig::new`] so the
/// threshold stays within 0 to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringConfig {
    weights: WeightTable,
    threshold: u8,
}

impl ScoringConfig {
    /// Creates a validated scorer configuration.
    pub fn new(weights: WeightTable, threshold: u8) -> AppResult<Self> {
        if threshold > 100 {
            return Err(AppError::Validation(format!(
                "eligibility threshold must be between 0 and 100, got {threshold}"
            )));
        }

        Ok(Self { weights, threshold })
    }

    /// Returns the weight table.
    #[must_use]
    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    /// Returns the eligibility threshold percentage.
    #[must_use]
    pub fn threshold(&self) -> u8 {
        self.threshold
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: WeightTable::default(),
            threshold: DEFAULT_ELIGIBILITY_THRESHOLD,
        }
    }
}

/// Score of one candidate shared mailbox against a migration batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredMailbox {
    /// Candidate shared mailbox address.
    pub email_address: String,
    /// Entries filed under the candidate.
    pub total_perms: u64,
    /// Summed weight of those entries.
    pub total_weight: u64,
    /// Entry matches against batch users, one per matching user.
    pub in_batch_perms: u64,
    /// Summed weight of the in-batch matches.
    pub in_batch_weight: u64,
    /// Truncated in-batch share of `total_perms`, 0 to 100.
    pub percentage: u8,
    /// Whether the candidate is on the exclusion list.
    pub is_excluded: bool,
    /// Whether the candidate should move with the batch.
    pub eligible: bool,
}

/// Truncating percentage of `part` over `whole`, capped at 100.
#[must_use]
pub fn overlap_percentage(part: u64, whole: u64) -> u8 {
    if whole == 0 {
        return 0;
    }

    let percentage = u128::from(part) * 100 / u128::from(whole);
    u8::try_from(percentage.min(100)).unwrap_or(100)
}

/// Scores candidate shared mailboxes by weighted permission overlap with a
/// migration batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityScorer {
    config: ScoringConfig,
}

impl EligibilityScorer {
    /// Creates a scorer from configuration.
    #[must_use]
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Scores every candidate, preserving candidate order.
    #[must_use]
    pub fn score_all<S: AsRef<str>>(
        &self,
        index: &LookupIndex,
        candidates: &[S],
        batch: &MigrationBatch,
        exclusions: &[S],
    ) -> Vec<ScoredMailbox> {
        candidates
            .iter()
            .map(|candidate| {
                let candidate = candidate.as_ref();
                let is_excluded = exclusions
                    .iter()
                    .any(|excluded| same_identity(excluded.as_ref(), candidate));
                self.score(index, candidate, batch, is_excluded)
            })
            .collect()
    }

    /// Scores one candidate.
    #[must_use]
    pub fn score(
        &self,
        index: &LookupIndex,
        candidate: &str,
        batch: &MigrationBatch,
        is_excluded: bool,
    ) -> ScoredMailbox {
        let weights = self.config.weights();
        let mut total_perms = 0_u64;
        let mut total_weight = 0_u64;
        let mut in_batch_perms = 0_u64;
        let mut in_batch_weight = 0_u64;

        for record in index.records_for(candidate) {
            let weight = weights.weight(record.assignment_kind());
            total_perms = total_perms.saturating_add(1);
            total_weight = total_weight.saturating_add(weight);

            let matches = batch.matching_users(record);
            in_batch_perms = in_batch_perms.saturating_add(matches);
            in_batch_weight = in_batch_weight.saturating_add(weight.saturating_mul(matches));
        }

        let percentage = overlap_percentage(in_batch_perms, total_perms);
        let eligible = percentage >= self.config.threshold() && !is_excluded;

        ScoredMailbox {
            email_address: candidate.to_owned(),
            total_perms,
            total_weight,
            in_batch_perms,
            in_batch_weight,
            percentage,
            is_excluded,
            eligible,
        }
    }
}
