// ==========================================
// Bulk Label Importer - Pipeline Stage Traits
// ==========================================
// One seam per stage, so each stage can be swapped or mocked in
// isolation. Stages are pure transformations over their inputs.
// ==========================================

use crate::domain::{ColumnMapping, MappedOrderItem, ParsedSheet, RawRow};
use crate::importer::error::ImportResult;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// Stage 1: uploaded file -> headers + raw rows.
// Implementors: CsvParser, ExcelParser, UniversalFileParser
pub trait FileParser: Send + Sync {
    /// Parse a spreadsheet file into its header list and usable rows.
    ///
    /// # Arguments
    /// - file_path: path to the uploaded file
    ///
    /// # Returns
    /// - Ok(ParsedSheet): trimmed headers plus non-blank rows
    /// - Err(ImportError): unsupported format, unreadable file, or no data
    fn parse(&self, file_path: &Path) -> ImportResult<ParsedSheet>;
}

// ==========================================
// ColumnMapper Trait
// ==========================================
// Stage 2: header list -> proposed canonical-field mapping.
// Implementor: HeuristicColumnMapper
pub trait ColumnMapper: Send + Sync {
    /// Propose a mapping from canonical fields to spreadsheet headers.
    ///
    /// Deterministic: the same header list always yields the same mapping.
    fn auto_map(&self, headers: &[String]) -> ColumnMapping;
}

// ==========================================
// RowTransformer Trait
// ==========================================
// Stage 3: raw rows + frozen mapping -> validated order items.
// Implementor: StandardRowTransformer
pub trait RowTransformer: Send + Sync {
    /// Produce exactly one MappedOrderItem per raw row, applying
    /// defaults and collecting per-row validation messages.
    ///
    /// Never fails: malformed numeric cells fall back to defaults and
    /// missing required fields become entries in `item.errors`.
    fn transform(&self, rows: &[RawRow], mapping: &ColumnMapping) -> Vec<MappedOrderItem>;
}
