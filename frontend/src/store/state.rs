use shared::{
    Transaction, TransactionFilters, TransactionListResponse, TransactionSummary,
    DEFAULT_PAGE_SIZE,
};

/// Closed set of state transitions for the transaction store.
///
/// Every async operation reduces to one or more of these, applied
/// synchronously from the operation's continuation. Mutation variants
/// (`EntityAdded`/`EntityReplaced`/`EntityRemoved`) never touch
/// `is_loading`; only the `Load*` variants drive the Idle/Loading/Error
/// machine.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreAction {
    LoadStarted,
    LoadSucceeded {
        response: TransactionListResponse,
        filters: TransactionFilters,
    },
    LoadFailed(String),
    EntityAdded(Transaction),
    EntityReplaced(Transaction),
    EntityRemoved(String),
    FiltersMerged(TransactionFilters),
    FiltersReset,
    CategoriesLoaded(Vec<String>),
    MerchantsLoaded(Vec<String>),
    MutationFailed(String),
    ErrorCleared,
}

/// Client-side view of the current transaction page plus bookkeeping.
///
/// `transactions` preserves server order. `total` counts matches across all
/// pages; `total_pages` is kept equal to `ceil(total / limit)` whenever
/// `total` changes.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionState {
    pub transactions: Vec<Transaction>,
    pub total: u32,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub filters: TransactionFilters,
    pub summary: TransactionSummary,
    pub is_loading: bool,
    pub error: Option<String>,
    pub categories: Vec<String>,
    pub merchants: Vec<String>,
}

impl Default for TransactionState {
    fn default() -> Self {
        TransactionState {
            transactions: Vec::new(),
            total: 0,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            total_pages: 0,
            filters: TransactionFilters::default(),
            summary: TransactionSummary::default(),
            is_loading: false,
            error: None,
            categories: Vec::new(),
            merchants: Vec::new(),
        }
    }
}

impl TransactionState {
    /// Apply one action. Pure in the sense that the new state depends only
    /// on the old state and the action.
    pub fn apply(&mut self, action: StoreAction) {
        match action {
            StoreAction::LoadStarted => {
                self.is_loading = true;
                self.error = None;
            }
            StoreAction::LoadSucceeded { response, filters } => {
                self.transactions = response.transactions;
                self.total = response.total;
                self.page = response.page;
                self.limit = response.limit;
                self.total_pages = response.total_pages;
                self.summary = response.summary;
                self.filters = filters;
                self.is_loading = false;
                self.error = None;
            }
            StoreAction::LoadFailed(message) => {
                // previous page and summary stay as-is: stale but consistent
                self.is_loading = false;
                self.error = Some(message);
            }
            StoreAction::EntityAdded(transaction) => {
                self.transactions.insert(0, transaction);
                self.total += 1;
                self.total_pages = total_pages(self.total, self.limit);
            }
            StoreAction::EntityReplaced(transaction) => {
                if let Some(slot) = self
                    .transactions
                    .iter_mut()
                    .find(|existing| existing.id == transaction.id)
                {
                    *slot = transaction;
                }
            }
            StoreAction::EntityRemoved(id) => {
                let before = self.transactions.len();
                self.transactions.retain(|existing| existing.id != id);
                if self.transactions.len() < before {
                    self.total = self.total.saturating_sub(1);
                    self.total_pages = total_pages(self.total, self.limit);
                }
            }
            StoreAction::FiltersMerged(partial) => {
                self.filters = self.filters.merge(&partial);
            }
            StoreAction::FiltersReset => {
                self.filters = TransactionFilters::default();
            }
            StoreAction::CategoriesLoaded(categories) => {
                self.categories = categories;
            }
            StoreAction::MerchantsLoaded(merchants) => {
                self.merchants = merchants;
            }
            StoreAction::MutationFailed(message) => {
                self.error = Some(message);
            }
            StoreAction::ErrorCleared => {
                self.error = None;
            }
        }
    }
}

fn total_pages(total: u32, limit: u32) -> u32 {
    if limit == 0 {
        0
    } else {
        total.div_ceil(limit)
    }
}
