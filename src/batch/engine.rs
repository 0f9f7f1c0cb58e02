// ==========================================
// Bulk Label Importer - Batch Execution Engine
// ==========================================
// Stage 4: submits valid items to the order-creation collaborator,
// strictly one at a time. The running balance is an explicit
// accumulator threaded through the loop; each submission's reported
// balance is observed before the next item's precheck. A fixed delay
// between submissions throttles the downstream API. There is no
// automatic retry of failed items.
// ==========================================

use crate::batch::order_service::{CreateOrderRequest, OrderService, OrderServiceError};
use crate::domain::{BatchResult, FailedSubmission, MappedOrderItem, SuccessfulSubmission};
use chrono::Utc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Balance floor below which submissions are skipped without calling
/// the API. A conservative precheck, not the authoritative label cost.
pub const MIN_BALANCE_THRESHOLD: f64 = 5.0;

/// Pause between consecutive submissions.
pub const SUBMIT_DELAY: Duration = Duration::from_millis(500);

// ==========================================
// Configuration
// ==========================================
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub min_balance: f64,
    pub submit_delay: Duration,
    /// Optional per-item timeout. None preserves the original
    /// behavior where a stalled submission blocks the batch.
    pub item_timeout: Option<Duration>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            min_balance: MIN_BALANCE_THRESHOLD,
            submit_delay: SUBMIT_DELAY,
            item_timeout: None,
        }
    }
}

/// Per-run inputs supplied by the session: the chosen defaults plus
/// the caller's last known account balance.
#[derive(Debug, Clone)]
pub struct BatchContext {
    pub from_address_id: String,
    pub label_type_id: String,
    pub starting_balance: f64,
}

// ==========================================
// Progress observer seam
// ==========================================
// Lets a caller surface per-item progress while the batch runs.
pub trait ProgressObserver: Send + Sync {
    fn on_item_processed(&self, processed: usize, total: usize);
}

struct NoopProgress;

impl ProgressObserver for NoopProgress {
    fn on_item_processed(&self, _processed: usize, _total: usize) {}
}

// ==========================================
// BatchExecutionEngine
// ==========================================
pub struct BatchExecutionEngine<S: OrderService> {
    order_service: S,
    config: BatchConfig,
    cancel: CancellationToken,
    progress: Box<dyn ProgressObserver>,
}

impl<S: OrderService> BatchExecutionEngine<S> {
    pub fn new(order_service: S) -> Self {
        Self {
            order_service,
            config: BatchConfig::default(),
            cancel: CancellationToken::new(),
            progress: Box::new(NoopProgress),
        }
    }

    pub fn with_config(mut self, config: BatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Cancellation is cooperative: the token is checked before each
    /// item's submission, never mid-request.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn with_progress(mut self, observer: Box<dyn ProgressObserver>) -> Self {
        self.progress = observer;
        self
    }

    /// Run one batch to completion.
    ///
    /// Every input item ends up in exactly one bucket:
    /// `successful.len() + failed.len() + skipped_count == items.len()`.
    /// A single bad row never aborts the rest of the batch.
    #[instrument(skip_all, fields(batch_id))]
    pub async fn run(&self, items: &[MappedOrderItem], ctx: &BatchContext) -> BatchResult {
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());
        let started_at = Utc::now();

        // Rows that failed validation never enter the batch.
        let (valid_items, invalid_items): (Vec<&MappedOrderItem>, Vec<&MappedOrderItem>) =
            items.iter().partition(|item| item.is_submittable());
        let skipped_count = invalid_items.len();

        info!(
            total = items.len(),
            valid = valid_items.len(),
            skipped = skipped_count,
            starting_balance = ctx.starting_balance,
            "batch run started"
        );

        let mut successful: Vec<SuccessfulSubmission> = Vec::new();
        let mut failed: Vec<FailedSubmission> = Vec::new();
        let mut balance = ctx.starting_balance;

        let total_valid = valid_items.len();
        for (idx, item) in valid_items.into_iter().enumerate() {
            if self.cancel.is_cancelled() {
                warn!(row = item.row_number, "batch cancelled, marking item failed");
                failed.push(FailedSubmission {
                    item: item.clone(),
                    error: "Import cancelled".to_string(),
                });
                self.progress.on_item_processed(idx + 1, total_valid);
                continue;
            }

            // Balance precheck: skip the API call entirely when the last
            // known balance cannot cover a label.
            if balance < self.config.min_balance {
                warn!(
                    row = item.row_number,
                    balance = balance,
                    threshold = self.config.min_balance,
                    "insufficient balance, skipping submission"
                );
                failed.push(FailedSubmission {
                    item: item.clone(),
                    error: "Insufficient balance".to_string(),
                });
                self.progress.on_item_processed(idx + 1, total_valid);
                continue;
            }

            let request =
                CreateOrderRequest::from_item(item, &ctx.label_type_id, &ctx.from_address_id);

            match self.submit(&request).await {
                Ok(response) => {
                    if let Some(new_balance) = response.new_balance {
                        balance = new_balance;
                    }
                    debug!(
                        row = item.row_number,
                        order_id = %response.order.id,
                        balance = balance,
                        "order created"
                    );
                    successful.push(SuccessfulSubmission {
                        item: item.clone(),
                        order_id: response.order.id,
                        tracking_number: response.order.tracking_number,
                    });
                }
                Err(message) => {
                    warn!(row = item.row_number, error = %message, "submission failed");
                    failed.push(FailedSubmission {
                        item: item.clone(),
                        error: message,
                    });
                }
            }

            self.progress.on_item_processed(idx + 1, total_valid);

            // Throttle between submissions; nothing to wait for after
            // the last one.
            if idx + 1 < total_valid {
                tokio::time::sleep(self.config.submit_delay).await;
            }
        }

        let result = BatchResult {
            batch_id,
            successful,
            failed,
            skipped_count,
            final_balance: balance,
            started_at,
            completed_at: Utc::now(),
        };

        info!(
            successful = result.successful.len(),
            failed = result.failed.len(),
            skipped = result.skipped_count,
            final_balance = result.final_balance,
            "batch run complete"
        );

        result
    }

    /// One submission, with every failure collapsed to the message that
    /// lands in the `failed` bucket.
    async fn submit(&self, request: &CreateOrderRequest) -> Result<crate::batch::order_service::CreateOrderResponse, String> {
        let call = self.order_service.create_order(request);

        let outcome = match self.config.item_timeout {
            Some(timeout) => match tokio::time::timeout(timeout, call).await {
                Ok(outcome) => outcome,
                Err(_) => return Err("Submission timed out".to_string()),
            },
            None => call.await,
        };

        outcome.map_err(|e| match e {
            OrderServiceError::Rejected(message) if !message.is_empty() => message,
            // Transport failures and empty rejections carry no usable
            // message for the user.
            _ => "Unknown error".to_string(),
        })
    }
}
