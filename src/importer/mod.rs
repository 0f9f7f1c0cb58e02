// ==========================================
// Bulk Label Importer - Import Layer
// ==========================================
// Stages 1-3 of the pipeline: parse -> map columns -> transform rows.
// All stages are synchronous, pure transformations; the only I/O is
// reading the uploaded file.
// ==========================================

pub mod column_mapper;
pub mod error;
pub mod file_parser;
pub mod importer_trait;
pub mod row_transformer;

// Re-export implementations
pub use column_mapper::HeuristicColumnMapper;
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use row_transformer::{
    StandardRowTransformer, DEFAULT_COUNTRY, DEFAULT_DIMENSION_IN, DEFAULT_WEIGHT_LBS,
};

// Re-export trait seams
pub use importer_trait::{ColumnMapper, FileParser, RowTransformer};
