// ==========================================
// Bulk Label Importer - Import Session Controller
// ==========================================
// Owns the data produced by the pipeline stages and drives the
// linear stage flow: Upload -> Map -> Review -> Processing -> Complete.
// Transitions are guarded; violating the order yields a typed error
// instead of a silent no-op. The only backward edge is reset().
// ==========================================

use crate::domain::{
    BatchResult, CanonicalField, ColumnMapping, ImportStage, MappedOrderItem, ParsedSheet, RawRow,
};
use crate::importer::importer_trait::{ColumnMapper, RowTransformer};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

// ==========================================
// Errors
// ==========================================
#[derive(Error, Debug, PartialEq)]
pub enum SessionError {
    #[error("Invalid stage transition: {from} -> {to}")]
    InvalidTransition { from: ImportStage, to: ImportStage },

    #[error("A default from-address and label type must be selected before processing")]
    MissingDefaults,

    #[error("Column mapping can only be edited in the map stage (current: {0})")]
    MappingLocked(ImportStage),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Everything the batch engine needs from the session for one run.
#[derive(Debug, Clone)]
pub struct BatchInputs {
    pub items: Vec<MappedOrderItem>,
    pub from_address_id: String,
    pub label_type_id: String,
}

// ==========================================
// ImportSession
// ==========================================
#[derive(Debug, Clone)]
pub struct ImportSession {
    session_id: String,
    stage: ImportStage,
    file_name: Option<String>,
    headers: Vec<String>,
    raw_rows: Vec<RawRow>,
    column_mapping: ColumnMapping,
    default_from_address_id: Option<String>,
    default_label_type_id: Option<String>,
    mapped_items: Vec<MappedOrderItem>,
    batch_result: Option<BatchResult>,
}

impl Default for ImportSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportSession {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            stage: ImportStage::Upload,
            file_name: None,
            headers: Vec::new(),
            raw_rows: Vec::new(),
            column_mapping: ColumnMapping::new(),
            default_from_address_id: None,
            default_label_type_id: None,
            mapped_items: Vec::new(),
            batch_result: None,
        }
    }

    // ===== Accessors =====

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn stage(&self) -> ImportStage {
        self.stage
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn raw_rows(&self) -> &[RawRow] {
        &self.raw_rows
    }

    pub fn column_mapping(&self) -> &ColumnMapping {
        &self.column_mapping
    }

    pub fn mapped_items(&self) -> &[MappedOrderItem] {
        &self.mapped_items
    }

    pub fn batch_result(&self) -> Option<&BatchResult> {
        self.batch_result.as_ref()
    }

    // ===== Transitions =====

    /// Upload -> Map. Stores the parsed sheet and seeds the column
    /// mapping by auto-detection.
    pub fn accept_file(
        &mut self,
        file_name: impl Into<String>,
        sheet: ParsedSheet,
        mapper: &dyn ColumnMapper,
    ) -> SessionResult<()> {
        self.guard(ImportStage::Upload, ImportStage::Map)?;

        let file_name = file_name.into();
        self.column_mapping = mapper.auto_map(&sheet.headers);
        self.headers = sheet.headers;
        self.raw_rows = sheet.rows;
        self.file_name = Some(file_name.clone());
        self.stage = ImportStage::Map;

        info!(
            session_id = %self.session_id,
            file = %file_name,
            rows = self.raw_rows.len(),
            auto_mapped = self.column_mapping.len(),
            "file accepted"
        );
        Ok(())
    }

    /// Manual mapping override, allowed only while in the map stage.
    pub fn set_field_mapping(
        &mut self,
        field: CanonicalField,
        header: impl Into<String>,
    ) -> SessionResult<()> {
        if self.stage != ImportStage::Map {
            return Err(SessionError::MappingLocked(self.stage));
        }
        self.column_mapping.set(field, header);
        Ok(())
    }

    pub fn clear_field_mapping(&mut self, field: CanonicalField) -> SessionResult<()> {
        if self.stage != ImportStage::Map {
            return Err(SessionError::MappingLocked(self.stage));
        }
        self.column_mapping.unset(field);
        Ok(())
    }

    /// Select the batch defaults. Permitted any time before processing.
    pub fn set_defaults(
        &mut self,
        from_address_id: impl Into<String>,
        label_type_id: impl Into<String>,
    ) {
        self.default_from_address_id = Some(from_address_id.into());
        self.default_label_type_id = Some(label_type_id.into());
    }

    /// Map -> Review. Freezes the mapping and re-derives every item
    /// from the raw rows; prior per-row state is discarded in full.
    pub fn begin_review(
        &mut self,
        transformer: &dyn RowTransformer,
    ) -> SessionResult<&[MappedOrderItem]> {
        self.guard(ImportStage::Map, ImportStage::Review)?;

        self.mapped_items = transformer.transform(&self.raw_rows, &self.column_mapping);
        self.stage = ImportStage::Review;

        info!(
            session_id = %self.session_id,
            items = self.mapped_items.len(),
            valid = self.mapped_items.iter().filter(|i| i.is_submittable()).count(),
            "rows transformed for review"
        );
        Ok(&self.mapped_items)
    }

    /// Review -> Processing. Requires the batch defaults; hands the
    /// items and defaults to the caller for the batch engine.
    pub fn begin_processing(&mut self) -> SessionResult<BatchInputs> {
        self.guard(ImportStage::Review, ImportStage::Processing)?;

        let (from_address_id, label_type_id) = match (
            self.default_from_address_id.clone(),
            self.default_label_type_id.clone(),
        ) {
            (Some(from), Some(label)) => (from, label),
            _ => return Err(SessionError::MissingDefaults),
        };

        self.stage = ImportStage::Processing;
        info!(session_id = %self.session_id, "batch processing started");

        Ok(BatchInputs {
            items: self.mapped_items.clone(),
            from_address_id,
            label_type_id,
        })
    }

    /// Processing -> Complete, automatic once the batch engine returns.
    pub fn complete(&mut self, result: BatchResult) -> SessionResult<()> {
        self.guard(ImportStage::Processing, ImportStage::Complete)?;

        info!(
            session_id = %self.session_id,
            successful = result.successful.len(),
            failed = result.failed.len(),
            skipped = result.skipped_count,
            "import session complete"
        );
        self.batch_result = Some(result);
        self.stage = ImportStage::Complete;
        Ok(())
    }

    /// Any stage -> Upload. Clears every session field; the session id
    /// is kept so logs for one user sitting stay correlated.
    pub fn reset(&mut self) {
        info!(session_id = %self.session_id, from = %self.stage, "session reset");
        let session_id = std::mem::take(&mut self.session_id);
        *self = Self::new();
        self.session_id = session_id;
    }

    fn guard(&self, expected: ImportStage, to: ImportStage) -> SessionResult<()> {
        if self.stage != expected {
            return Err(SessionError::InvalidTransition {
                from: self.stage,
                to,
            });
        }
        Ok(())
    }
}
