// ==========================================
// Bulk Label Importer - Domain Layer
// ==========================================
// Entities and enums shared across pipeline stages.
// ==========================================

pub mod catalog;
pub mod order;
pub mod types;

pub use catalog::{FromAddress, LabelType, MaxDimensions};
pub use order::{
    BatchResult, ColumnMapping, FailedSubmission, MappedOrderItem, ParsedSheet, RawRow,
    SuccessfulSubmission,
};
pub use types::{CanonicalField, ImportStage, OPTIONAL_FIELDS, REQUIRED_FIELDS};
