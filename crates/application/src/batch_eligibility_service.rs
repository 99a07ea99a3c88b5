use mailshift_domain::{
    EligibilityScorer, LookupIndex, MigrationBatch, PermissionRecord, ScoredMailbox,
    ScoringConfig,
};
use tracing::{info, warn};

/// Scores candidate shared mailboxes for a migration batch.
#[derive(Debug, Clone, Copy)]
pub struct BatchEligibilityService {
    scorer: EligibilityScorer,
}

impl BatchEligibilityService {
    /// Creates the service from scorer configuration.
    #[must_use]
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            scorer: EligibilityScorer::new(config),
        }
    }

    /// Indexes the full permission export and scores every candidate in
    /// candidate order.
    #[must_use]
    pub fn score_candidates(
        &self,
        records: Vec<PermissionRecord>,
        candidates: &[String],
        batch: &MigrationBatch,
        exclusions: &[String],
    ) -> Vec<ScoredMailbox> {
        let index = LookupIndex::build(records);
        let scored = self
            .scorer
            .score_all(&index, candidates, batch, exclusions);

        for mailbox in scored.iter().filter(|mailbox| mailbox.total_perms == 0) {
            let variants = index.case_variants(&mailbox.email_address);
            if !variants.is_empty() {
                warn!(
                    candidate = mailbox.email_address.as_str(),
                    export_spellings = ?variants,
                    "candidate has no entries under its exact spelling"
                );
            }
        }

        let eligible = scored.iter().filter(|mailbox| mailbox.eligible).count();
        let excluded = scored.iter().filter(|mailbox| mailbox.is_excluded).count();
        info!(
            records = index.records().len(),
            identifiers = index.identifier_count(),
            batch_users = batch.len(),
            candidates = scored.len(),
            eligible,
            excluded,
            threshold = self.scorer.config().threshold(),
            "batch eligibility scored"
        );

        scored
    }
}
