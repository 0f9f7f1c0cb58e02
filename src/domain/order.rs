// ==========================================
// Bulk Label Importer - Order Domain Model
// ==========================================
// The in-memory shapes flowing through one import session:
// RawRow -> ColumnMapping -> MappedOrderItem -> BatchResult
// ==========================================

use crate::domain::types::{CanonicalField, REQUIRED_FIELDS};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// RawRow - one spreadsheet row, pre-validation
// ==========================================
// Keyed by the trimmed original header. Column order lives in the
// sibling `headers` vector of ParsedSheet; rows with every value
// empty are dropped by the parser and never become a RawRow.
pub type RawRow = HashMap<String, String>;

/// Output of the spreadsheet parser: header order + usable rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedSheet {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
    /// Parser-level problems that did not prevent parsing (e.g. a
    /// malformed CSV record that was skipped).
    #[serde(default)]
    pub warnings: Vec<String>,
}

// ==========================================
// ColumnMapping - canonical field -> header
// ==========================================
// Produced by auto-detection from the header list, optionally edited
// by the user, then frozen once transformation runs. The same header
// may legitimately back more than one field (the detector does not
// remove matched headers from the candidate pool).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnMapping {
    assignments: HashMap<CanonicalField, String>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Header assigned to `field`, if any.
    pub fn header_for(&self, field: CanonicalField) -> Option<&str> {
        self.assignments.get(&field).map(|h| h.as_str())
    }

    /// Assign (or reassign) a header to a field.
    pub fn set(&mut self, field: CanonicalField, header: impl Into<String>) {
        self.assignments.insert(field, header.into());
    }

    /// Remove an assignment.
    pub fn unset(&mut self, field: CanonicalField) {
        self.assignments.remove(&field);
    }

    pub fn is_mapped(&self, field: CanonicalField) -> bool {
        self.assignments.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Required fields that still have no header assigned.
    pub fn missing_required(&self) -> Vec<CanonicalField> {
        REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|f| !self.is_mapped(*f))
            .collect()
    }
}

// ==========================================
// MappedOrderItem - one validated, defaulted row
// ==========================================
// Created by the row transformer, read-only afterward. An empty
// `errors` list is the sole gate into the batch engine's valid set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedOrderItem {
    /// 1-based spreadsheet row (header row occupies row 1).
    pub row_number: usize,

    // ===== Destination address =====
    pub to_name: String,
    pub to_company: String,
    pub to_street: String,
    pub to_street2: String,
    pub to_city: String,
    pub to_state: String,
    pub to_zip: String,
    pub to_country: String,

    // ===== Package dimensions (lbs / inches) =====
    pub weight: f64,
    pub length: f64,
    pub width: f64,
    pub height: f64,

    /// User-supplied or synthesized order reference.
    pub order_id: String,

    /// Validation messages, in check order. Empty means submittable.
    pub errors: Vec<String>,
}

impl MappedOrderItem {
    pub fn is_submittable(&self) -> bool {
        self.errors.is_empty()
    }
}

// ==========================================
// BatchResult - three-way outcome partition
// ==========================================

/// A submitted item plus the collaborator's created-order identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessfulSubmission {
    pub item: MappedOrderItem,
    pub order_id: String,
    pub tracking_number: String,
}

/// An item that reached the engine but was not submitted successfully.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedSubmission {
    pub item: MappedOrderItem,
    pub error: String,
}

/// Outcome of one batch run. Never mutated after the engine returns.
///
/// Invariant: `successful.len() + failed.len() + skipped_count` equals the
/// number of items handed to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub batch_id: String,
    pub successful: Vec<SuccessfulSubmission>,
    pub failed: Vec<FailedSubmission>,
    /// Items that never entered the batch because they carried
    /// validation errors.
    pub skipped_count: usize,
    /// Last balance reported by the collaborator; the caller should
    /// still refresh authoritative account state afterward.
    pub final_balance: f64,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl BatchResult {
    /// Total number of items accounted for by this result.
    pub fn total(&self) -> usize {
        self.successful.len() + self.failed.len() + self.skipped_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::CanonicalField;

    #[test]
    fn test_mapping_set_and_unset() {
        let mut mapping = ColumnMapping::new();
        mapping.set(CanonicalField::ToName, "Recipient");
        assert_eq!(mapping.header_for(CanonicalField::ToName), Some("Recipient"));

        mapping.unset(CanonicalField::ToName);
        assert_eq!(mapping.header_for(CanonicalField::ToName), None);
    }

    #[test]
    fn test_missing_required_reports_unmapped_fields() {
        let mut mapping = ColumnMapping::new();
        mapping.set(CanonicalField::ToName, "Name");
        mapping.set(CanonicalField::ToStreet, "Street");

        let missing = mapping.missing_required();
        assert_eq!(missing.len(), 4);
        assert!(missing.contains(&CanonicalField::ToCity));
        assert!(!missing.contains(&CanonicalField::ToName));
    }

    #[test]
    fn test_submittable_gate_is_empty_errors() {
        let mut item = MappedOrderItem {
            row_number: 2,
            to_name: "Jo".to_string(),
            to_company: String::new(),
            to_street: "1 Main St".to_string(),
            to_street2: String::new(),
            to_city: "Austin".to_string(),
            to_state: "TX".to_string(),
            to_zip: "78701".to_string(),
            to_country: "US".to_string(),
            weight: 1.0,
            length: 6.0,
            width: 6.0,
            height: 6.0,
            order_id: "BULK-1".to_string(),
            errors: Vec::new(),
        };
        assert!(item.is_submittable());

        item.errors.push("Missing city".to_string());
        assert!(!item.is_submittable());
    }
}
