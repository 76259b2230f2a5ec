use shared::{parse_date, SortBy, SortOrder, TransactionFilters, TransactionStatus, TransactionType};

/// Upper bound on the requested page size
pub const MAX_PAGE_SIZE: u32 = 100;

/// Raw, string-typed filter form state as bound to the UI inputs.
///
/// `canonicalize` turns this into a `TransactionFilters` that already
/// satisfies the store's invariants: empty or whitespace-only fields become
/// absent (never empty strings), numbers that fail to parse become absent,
/// and pagination fields are clamped. The store does not re-validate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterForm {
    pub start_date: String,
    pub end_date: String,
    pub transaction_type: String,
    pub status: String,
    pub category: String,
    pub merchant_name: String,
    pub search: String,
    pub min_amount: String,
    pub max_amount: String,
    pub page: String,
    pub limit: String,
    pub sort_by: String,
    pub sort_order: String,
}

impl FilterForm {
    pub fn canonicalize(&self) -> TransactionFilters {
        TransactionFilters {
            start_date: non_empty(&self.start_date).filter(|d| parse_date(d).is_some()),
            end_date: non_empty(&self.end_date).filter(|d| parse_date(d).is_some()),
            transaction_type: self.transaction_type.trim().parse::<TransactionType>().ok(),
            status: self.status.trim().parse::<TransactionStatus>().ok(),
            category: non_empty(&self.category),
            merchant_name: non_empty(&self.merchant_name),
            search: non_empty(&self.search),
            min_amount: parse_amount(&self.min_amount),
            max_amount: parse_amount(&self.max_amount),
            page: self.page.trim().parse::<u32>().ok().map(|p| p.max(1)),
            limit: self
                .limit
                .trim()
                .parse::<u32>()
                .ok()
                .map(|l| l.clamp(1, MAX_PAGE_SIZE)),
            sort_by: self.sort_by.trim().parse::<SortBy>().ok(),
            sort_order: self.sort_order.trim().parse::<SortOrder>().ok(),
        }
    }
}

/// Number of criteria fields set, for the "n filters active" UI badge.
/// Pagination and sort fields do not count.
pub fn active_filter_count(filters: &TransactionFilters) -> usize {
    [
        filters.start_date.is_some(),
        filters.end_date.is_some(),
        filters.transaction_type.is_some(),
        filters.status.is_some(),
        filters.category.is_some(),
        filters.merchant_name.is_some(),
        filters.search.is_some(),
        filters.min_amount.is_some(),
        filters.max_amount.is_some(),
    ]
    .iter()
    .filter(|set| **set)
    .count()
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_amount(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|a| a.is_finite())
}
