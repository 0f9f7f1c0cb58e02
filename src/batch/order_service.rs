// ==========================================
// Bulk Label Importer - Order Creation Collaborator
// ==========================================
// The one outbound boundary of the pipeline. The engine only sees the
// OrderService trait; HttpOrderService is the production reqwest
// implementation against the order-creation endpoint.
// ==========================================

use crate::domain::MappedOrderItem;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

// ==========================================
// Wire DTOs (camelCase JSON)
// ==========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationAddress {
    pub name: String,
    pub company: String,
    pub street1: String,
    pub street2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSpec {
    pub weight: f64,
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub label_type_id: String,
    pub from_address_id: String,
    pub to_address: DestinationAddress,
    pub package: PackageSpec,
    /// Caller's order reference, echoed back on the created order.
    pub reference1: String,
}

impl CreateOrderRequest {
    /// Build the wire request for one validated row.
    pub fn from_item(item: &MappedOrderItem, label_type_id: &str, from_address_id: &str) -> Self {
        Self {
            label_type_id: label_type_id.to_string(),
            from_address_id: from_address_id.to_string(),
            to_address: DestinationAddress {
                name: item.to_name.clone(),
                company: item.to_company.clone(),
                street1: item.to_street.clone(),
                street2: item.to_street2.clone(),
                city: item.to_city.clone(),
                state: item.to_state.clone(),
                zip: item.to_zip.clone(),
                country: item.to_country.clone(),
            },
            package: PackageSpec {
                weight: item.weight,
                length: item.length,
                width: item.width,
                height: item.height,
            },
            reference1: item.order_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedOrder {
    pub id: String,
    pub tracking_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order: CreatedOrder,
    /// Account balance after purchase, when the service reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_balance: Option<f64>,
}

/// Error body shape used by the collaborator on rejection.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

// ==========================================
// Error type
// ==========================================

#[derive(Error, Debug)]
pub enum OrderServiceError {
    /// The service processed the request and declined it, with a
    /// user-facing message.
    #[error("{0}")]
    Rejected(String),

    /// Transport-level failure; no message from the service.
    #[error("order service request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for OrderServiceError {
    fn from(err: reqwest::Error) -> Self {
        OrderServiceError::Transport(err.to_string())
    }
}

// ==========================================
// OrderService Trait
// ==========================================
// Implementors: HttpOrderService (production), test mocks
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Submit one order to the order-creation endpoint.
    ///
    /// # Returns
    /// - Ok(CreateOrderResponse): created order + optional new balance
    /// - Err(OrderServiceError): rejection message or transport failure
    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<CreateOrderResponse, OrderServiceError>;
}

// ==========================================
// HttpOrderService - reqwest implementation
// ==========================================
pub struct HttpOrderService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpOrderService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl OrderService for HttpOrderService {
    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<CreateOrderResponse, OrderServiceError> {
        let url = format!("{}/orders", self.base_url.trim_end_matches('/'));
        debug!(reference = %request.reference1, "submitting order");

        let response = self.client.post(&url).json(request).send().await?;

        // Only success vs. failure matters here; specific status codes
        // are not interpreted.
        if response.status().is_success() {
            let created = response.json::<CreateOrderResponse>().await?;
            Ok(created)
        } else {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| "Unknown error".to_string());
            Err(OrderServiceError::Rejected(message))
        }
    }
}
