use std::collections::HashMap;

use mailshift_core::same_identity;

use crate::PermissionRecord;

/// Permission records filed under every identifier that references them.
///
/// A record is filed under its mailbox and, when present, under its delegate.
/// Keys are the raw identifier text. Positions within a key keep input order
/// and are never deduplicated, so a record delegated to its own mailbox is
/// filed twice under that mailbox.
#[derive(Debug, Clone, Default)]
pub struct LookupIndex {
    records: Vec<PermissionRecord>,
    positions: HashMap<String, Vec<usize>>,
}

impl LookupIndex {
    /// Builds the index from the full ordered record set.
    #[must_use]
    pub fn build(records: Vec<PermissionRecord>) -> Self {
        let mut positions: HashMap<String, Vec<usize>> = HashMap::new();

        for (position, record) in records.iter().enumerate() {
            positions
                .entry(record.mailbox().to_owned())
                .or_default()
                .push(position);

            if !record.delegate().is_empty() {
                positions
                    .entry(record.delegate().to_owned())
                    .or_default()
                    .push(position);
            }
        }

        Self { records, positions }
    }

    /// Returns every record filed under the identifier, in filing order.
    pub fn records_for<'a>(
        &'a self,
        identifier: &str,
    ) -> impl Iterator<Item = &'a PermissionRecord> + use<'a> {
        self.positions
            .get(identifier)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .filter_map(|position| self.records.get(*position))
    }

    /// Returns how many entries are filed under the identifier.
    #[must_use]
    pub fn entry_count(&self, identifier: &str) -> usize {
        self.positions.get(identifier).map_or(0, Vec::len)
    }

    /// Returns keys naming the same identity as `identifier` under a
    /// different spelling, sorted.
    #[must_use]
    pub fn case_variants(&self, identifier: &str) -> Vec<&str> {
        let mut variants: Vec<&str> = self
            .positions
            .keys()
            .map(String::as_str)
            .filter(|key| *key != identifier && same_identity(key, identifier))
            .collect();
        variants.sort_unstable();
        variants
    }

    /// Returns all indexed records in input order.
    #[must_use]
    pub fn records(&self) -> &[PermissionRecord] {
        self.records.as_slice()
    }

    /// Returns the number of distinct identifiers.
    #[must_use]
    pub fn identifier_count(&self) -> usize {
        self.positions.len()
    }
}
