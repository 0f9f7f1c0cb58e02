// ==========================================
// Bulk Label Importer - Heuristic Column Mapper
// ==========================================
// Stage 2: header list -> proposed ColumnMapping
// Pure function over the ordered field/synonym tables.
// ==========================================

use crate::domain::types::{OPTIONAL_FIELDS, REQUIRED_FIELDS};
use crate::domain::ColumnMapping;
use crate::importer::importer_trait::ColumnMapper;
use tracing::debug;

pub struct HeuristicColumnMapper;

impl ColumnMapper for HeuristicColumnMapper {
    /// Scan required fields first (in declared order), then optional
    /// fields, assigning each the first header whose lowercased form
    /// contains any of that field's synonyms.
    ///
    /// Matched headers are intentionally NOT removed from the candidate
    /// pool: a header like "Weight" may back both `weight` and (via the
    /// single-letter "w" synonym) `width`. This mirrors the upstream
    /// detection behavior and is left for the user to correct in the
    /// mapping step rather than silently resolved here.
    fn auto_map(&self, headers: &[String]) -> ColumnMapping {
        let mut mapping = ColumnMapping::new();

        let normalized: Vec<String> = headers
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        for field in REQUIRED_FIELDS.iter().chain(OPTIONAL_FIELDS.iter()) {
            let matched = normalized.iter().position(|header| {
                field
                    .synonyms()
                    .iter()
                    .any(|synonym| header.contains(synonym))
            });

            if let Some(idx) = matched {
                debug!(field = %field, header = %headers[idx], "auto-mapped column");
                mapping.set(*field, headers[idx].clone());
            }
        }

        mapping
    }
}
