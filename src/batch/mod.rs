// ==========================================
// Bulk Label Importer - Batch Layer
// ==========================================
// Stage 4: sequential, balance-gated, rate-limited submission of
// validated items to the order-creation collaborator.
// ==========================================

pub mod engine;
pub mod order_service;

pub use engine::{
    BatchConfig, BatchContext, BatchExecutionEngine, ProgressObserver, MIN_BALANCE_THRESHOLD,
    SUBMIT_DELAY,
};
pub use order_service::{
    CreateOrderRequest, CreateOrderResponse, CreatedOrder, DestinationAddress, HttpOrderService,
    OrderService, OrderServiceError, PackageSpec,
};
