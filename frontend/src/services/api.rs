use async_trait::async_trait;
use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use shared::{
    CreateTransactionRequest, Transaction, TransactionFilters, TransactionListResponse,
    UpdateTransactionRequest,
};
use thiserror::Error;

/// Failure raised by the remote transaction service.
///
/// `Server` carries the message the server sent (or a generic fallback when
/// the body was empty), so its `Display` text is safe to surface directly
/// to the user.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("Failed to parse server response: {0}")]
    Decode(String),
    #[error("Failed to encode request: {0}")]
    Encode(String),
    #[error("{0}")]
    Validation(String),
}

/// The remote transaction service as the store consumes it.
///
/// `ApiClient` is the production implementation; tests substitute a
/// scripted mock. Futures are `?Send` because browser futures never leave
/// the main thread.
#[async_trait(?Send)]
pub trait TransactionService {
    async fn list_transactions(
        &self,
        filters: &TransactionFilters,
    ) -> Result<TransactionListResponse, ApiError>;

    async fn get_transaction(&self, id: &str) -> Result<Transaction, ApiError>;

    async fn create_transaction(
        &self,
        request: &CreateTransactionRequest,
    ) -> Result<Transaction, ApiError>;

    async fn update_transaction(
        &self,
        id: &str,
        request: &UpdateTransactionRequest,
    ) -> Result<Transaction, ApiError>;

    async fn delete_transaction(&self, id: &str) -> Result<(), ApiError>;

    async fn confirm_transaction(&self, id: &str) -> Result<Transaction, ApiError>;

    async fn cancel_transaction(&self, id: &str) -> Result<Transaction, ApiError>;

    async fn list_categories(&self) -> Result<Vec<String>, ApiError>;

    async fn list_merchants(&self) -> Result<Vec<String>, ApiError>;
}

/// API client for communicating with the backend server
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

/// Shape of an error body the server may attach to a non-2xx response
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Read a successful JSON body, or turn a non-2xx response into
    /// `ApiError::Server` with the server's message when one is present.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        if response.ok() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))
        } else {
            Err(Self::server_error(response).await)
        }
    }

    async fn server_error(response: Response) -> ApiError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        ApiError::Server { status, message }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl TransactionService for ApiClient {
    async fn list_transactions(
        &self,
        filters: &TransactionFilters,
    ) -> Result<TransactionListResponse, ApiError> {
        let query = filters
            .to_query_string()
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        let url = if query.is_empty() {
            self.url("/transactions")
        } else {
            format!("{}?{}", self.url("/transactions"), query)
        };

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn get_transaction(&self, id: &str) -> Result<Transaction, ApiError> {
        let response = Request::get(&self.url(&format!("/transactions/{}", id)))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn create_transaction(
        &self,
        request: &CreateTransactionRequest,
    ) -> Result<Transaction, ApiError> {
        let response = Request::post(&self.url("/transactions"))
            .json(request)
            .map_err(|e| ApiError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn update_transaction(
        &self,
        id: &str,
        request: &UpdateTransactionRequest,
    ) -> Result<Transaction, ApiError> {
        let response = Request::patch(&self.url(&format!("/transactions/{}", id)))
            .json(request)
            .map_err(|e| ApiError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn delete_transaction(&self, id: &str) -> Result<(), ApiError> {
        let response = Request::delete(&self.url(&format!("/transactions/{}", id)))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if response.ok() {
            Ok(())
        } else {
            Err(Self::server_error(response).await)
        }
    }

    async fn confirm_transaction(&self, id: &str) -> Result<Transaction, ApiError> {
        let response = Request::post(&self.url(&format!("/transactions/{}/confirm", id)))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn cancel_transaction(&self, id: &str) -> Result<Transaction, ApiError> {
        let response = Request::post(&self.url(&format!("/transactions/{}/cancel", id)))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn list_categories(&self) -> Result<Vec<String>, ApiError> {
        let response = Request::get(&self.url("/transactions/categories"))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn list_merchants(&self) -> Result<Vec<String>, ApiError> {
        let response = Request::get(&self.url("/transactions/merchants"))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(response).await
    }
}
