use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default page size requested when the caller does not specify a limit
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// A single financial transaction as owned by the server.
///
/// The client never fabricates these; every `Transaction` held locally came
/// out of a server response and is replaced wholesale when the server
/// returns an updated version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Opaque server-assigned identifier
    pub id: String,
    /// Monetary amount in the transaction's currency
    pub amount: f64,
    pub description: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    /// ISO 4217 currency code (e.g. "USD")
    pub currency: String,
    /// Calendar date in YYYY-MM-DD format
    pub date: String,
    /// Optional time-of-day in HH:MM format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: TransactionStatus,
    /// How the transaction entered the system (e.g. "manual", "import")
    pub input_method: String,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    /// Last-update timestamp (RFC 3339)
    pub updated_at: String,
}

impl Transaction {
    /// Parse the transaction's calendar date, if well-formed
    pub fn occurred_on(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Expense,
    Income,
    Transfer,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
            TransactionType::Transfer => "transfer",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expense" => Ok(TransactionType::Expense),
            "income" => Ok(TransactionType::Income),
            "transfer" => Ok(TransactionType::Transfer),
            other => Err(format!("unknown transaction type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Confirmed => "confirmed",
            TransactionStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TransactionStatus::Pending),
            "confirmed" => Ok(TransactionStatus::Confirmed),
            "cancelled" => Ok(TransactionStatus::Cancelled),
            other => Err(format!("unknown transaction status: {}", other)),
        }
    }
}

/// Sort key accepted by the transaction list endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    Date,
    Amount,
    Description,
    CreatedAt,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Date => "date",
            SortBy::Amount => "amount",
            SortBy::Description => "description",
            SortBy::CreatedAt => "createdAt",
        }
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(SortBy::Date),
            "amount" => Ok(SortBy::Amount),
            "description" => Ok(SortBy::Description),
            "createdAt" => Ok(SortBy::CreatedAt),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

/// Criteria controlling which transactions are requested from the server.
///
/// Every field is optional so the same type doubles as a partial update:
/// `merge` lays a partial over a base, with `Some` fields overriding and
/// `None` fields persisting. Absent fields are omitted entirely from the
/// query string, never sent as empty strings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilters {
    /// Inclusive range start, YYYY-MM-DD
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Inclusive range end, YYYY-MM-DD
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_name: Option<String>,
    /// Free-text search over description/merchant/notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<f64>,
    /// 1-based page index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size, must be > 0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

impl TransactionFilters {
    /// Lay `overrides` over `self`: `Some` fields win, `None` fields keep
    /// the base value.
    pub fn merge(&self, overrides: &TransactionFilters) -> TransactionFilters {
        TransactionFilters {
            start_date: overrides.start_date.clone().or_else(|| self.start_date.clone()),
            end_date: overrides.end_date.clone().or_else(|| self.end_date.clone()),
            transaction_type: overrides.transaction_type.or(self.transaction_type),
            status: overrides.status.or(self.status),
            category: overrides.category.clone().or_else(|| self.category.clone()),
            merchant_name: overrides
                .merchant_name
                .clone()
                .or_else(|| self.merchant_name.clone()),
            search: overrides.search.clone().or_else(|| self.search.clone()),
            min_amount: overrides.min_amount.or(self.min_amount),
            max_amount: overrides.max_amount.or(self.max_amount),
            page: overrides.page.or(self.page),
            limit: overrides.limit.or(self.limit),
            sort_by: overrides.sort_by.or(self.sort_by),
            sort_order: overrides.sort_order.or(self.sort_order),
        }
    }

    /// True when any field other than `page`/`limit` is set. A partial with
    /// criteria changes resets pagination to the first page when loaded.
    pub fn has_criteria_changes(&self) -> bool {
        self.start_date.is_some()
            || self.end_date.is_some()
            || self.transaction_type.is_some()
            || self.status.is_some()
            || self.category.is_some()
            || self.merchant_name.is_some()
            || self.search.is_some()
            || self.min_amount.is_some()
            || self.max_amount.is_some()
            || self.sort_by.is_some()
            || self.sort_order.is_some()
    }

    pub fn page_or_default(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub fn limit_or_default(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Serialize to a URL query string, omitting absent fields
    pub fn to_query_string(&self) -> Result<String, serde_urlencoded::ser::Error> {
        serde_urlencoded::to_string(self)
    }
}

/// Server-computed aggregate over the currently filtered result set
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    /// `total_income - total_expenses`
    pub net_amount: f64,
    pub transaction_count: u32,
    #[serde(default)]
    pub category_breakdown: Vec<CategoryBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category: String,
    pub amount: f64,
    pub count: u32,
    /// Share of the filtered total, 0-100
    pub percentage: f64,
}

/// One page of transactions plus pagination bookkeeping and the summary,
/// as returned by `GET /transactions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListResponse {
    pub transactions: Vec<Transaction>,
    /// Count across all pages matching the filters
    pub total: u32,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub summary: TransactionSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub amount: f64,
    pub description: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Calendar date in YYYY-MM-DD format
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_method: Option<String>,
}

impl CreateTransactionRequest {
    pub fn new(
        amount: f64,
        description: impl Into<String>,
        transaction_type: TransactionType,
        date: impl Into<String>,
    ) -> Self {
        CreateTransactionRequest {
            amount,
            description: description.into(),
            transaction_type,
            date: date.into(),
            category: None,
            subcategory: None,
            currency: None,
            time: None,
            merchant_name: None,
            location: None,
            notes: None,
            input_method: None,
        }
    }
}

/// Partial update payload for `PATCH /transactions/{id}`; absent fields are
/// left unchanged server-side
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransactionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Parse a YYYY-MM-DD calendar date
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
