// ==========================================
// Bulk Label Importer - Core Library
// ==========================================
// Bulk shipping-label order import pipeline:
// parse -> map columns -> transform rows -> batch submit
// All session state is in-memory; the order-creation service is an
// external collaborator reached through the OrderService trait.
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - entities and enums
pub mod domain;

// Import layer - file parsing, column mapping, row transformation
pub mod importer;

// Batch layer - sequential submission to the order-creation service
pub mod batch;

// Session layer - stage state machine over one import
pub mod session;

// Logging setup
pub mod logging;

// ==========================================
// Re-exports of core types
// ==========================================

// Domain
pub use domain::{
    BatchResult, CanonicalField, ColumnMapping, FailedSubmission, FromAddress, ImportStage,
    LabelType, MappedOrderItem, MaxDimensions, ParsedSheet, RawRow, SuccessfulSubmission,
    OPTIONAL_FIELDS, REQUIRED_FIELDS,
};

// Import stages
pub use importer::{
    ColumnMapper, CsvParser, ExcelParser, FileParser, HeuristicColumnMapper, ImportError,
    ImportResult, RowTransformer, StandardRowTransformer, UniversalFileParser,
};

// Batch engine + collaborator boundary
pub use batch::{
    BatchConfig, BatchContext, BatchExecutionEngine, CreateOrderRequest, CreateOrderResponse,
    HttpOrderService, OrderService, OrderServiceError, ProgressObserver,
};

// Session controller
pub use session::{BatchInputs, ImportSession, SessionError, SessionResult};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
