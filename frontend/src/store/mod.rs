mod state;

pub use state::{StoreAction, TransactionState};

use std::cell::RefCell;
use std::rc::Rc;

use shared::{CreateTransactionRequest, TransactionFilters, UpdateTransactionRequest};

use crate::services::api::{ApiError, TransactionService};
use crate::services::logging::Logger;

type Listener = Box<dyn Fn(TransactionState)>;

/// Client-side owner of the paginated, filtered transaction list.
///
/// Constructed explicitly by the view that needs it and dropped on
/// unmount; there is no ambient singleton. Each operation awaits the
/// remote service and reconciles the authoritative response into local
/// state through `StoreAction` dispatches. State borrows are never held
/// across an await, so overlapping operations interleave safely on the
/// single-threaded executor (though overlapping loads are not sequenced;
/// the last response to arrive wins).
///
/// All mutations are pessimistic: nothing changes locally until the
/// server confirms. A failed mutation sets `error` and leaves the page
/// exactly as it was.
pub struct TransactionStore<S: TransactionService> {
    service: S,
    state: Rc<RefCell<TransactionState>>,
    listener: Rc<RefCell<Option<Listener>>>,
}

impl<S: TransactionService + Clone> Clone for TransactionStore<S> {
    fn clone(&self) -> Self {
        TransactionStore {
            service: self.service.clone(),
            state: Rc::clone(&self.state),
            listener: Rc::clone(&self.listener),
        }
    }
}

impl<S: TransactionService> TransactionStore<S> {
    pub fn new(service: S) -> Self {
        TransactionStore {
            service,
            state: Rc::new(RefCell::new(TransactionState::default())),
            listener: Rc::new(RefCell::new(None)),
        }
    }

    /// Current state by value, for rendering
    pub fn snapshot(&self) -> TransactionState {
        self.state.borrow().clone()
    }

    /// Register the single observer notified after every state change.
    /// The view layer uses this to trigger re-renders.
    pub fn set_listener(&self, listener: impl Fn(TransactionState) + 'static) {
        *self.listener.borrow_mut() = Some(Box::new(listener));
    }

    pub fn clear_listener(&self) {
        *self.listener.borrow_mut() = None;
    }

    fn dispatch(&self, action: StoreAction) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            state.apply(action);
            state.clone()
        };
        if let Some(listener) = self.listener.borrow().as_ref() {
            listener(snapshot);
        }
    }

    /// Load the page matching the held filters, optionally merged with a
    /// partial override first. A partial that changes any criteria field
    /// (anything other than page/limit) requests page 1.
    ///
    /// On failure the previous page and summary stay visible alongside the
    /// error. Concurrent calls are not deduplicated; see the type docs.
    pub async fn load_transactions(
        &self,
        partial: Option<TransactionFilters>,
    ) -> Result<(), ApiError> {
        let requested = {
            let state = self.state.borrow();
            match partial {
                Some(partial) => {
                    let mut merged = state.filters.merge(&partial);
                    if partial.has_criteria_changes() {
                        merged.page = Some(1);
                    }
                    merged
                }
                None => state.filters.clone(),
            }
        };

        self.dispatch(StoreAction::LoadStarted);
        match self.service.list_transactions(&requested).await {
            Ok(response) => {
                self.dispatch(StoreAction::LoadSucceeded {
                    response,
                    filters: requested,
                });
                Ok(())
            }
            Err(error) => {
                self.dispatch(StoreAction::LoadFailed(error.to_string()));
                Err(error)
            }
        }
    }

    /// Create a transaction and prepend the server-canonical entity to the
    /// current page. The new entity is shown in place even when the active
    /// sort order would put it elsewhere; the next load corrects that.
    pub async fn create_transaction(
        &self,
        request: CreateTransactionRequest,
    ) -> Result<(), ApiError> {
        if let Err(message) = validate_create(&request) {
            self.dispatch(StoreAction::MutationFailed(message.clone()));
            return Err(ApiError::Validation(message));
        }

        self.dispatch(StoreAction::ErrorCleared);
        match self.service.create_transaction(&request).await {
            Ok(created) => {
                self.dispatch(StoreAction::EntityAdded(created));
                Ok(())
            }
            Err(error) => {
                self.dispatch(StoreAction::MutationFailed(error.to_string()));
                Err(error)
            }
        }
    }

    /// Partially update a transaction, swapping the server-returned entity
    /// in at its existing position.
    pub async fn update_transaction(
        &self,
        id: &str,
        request: UpdateTransactionRequest,
    ) -> Result<(), ApiError> {
        self.dispatch(StoreAction::ErrorCleared);
        match self.service.update_transaction(id, &request).await {
            Ok(updated) => {
                self.dispatch(StoreAction::EntityReplaced(updated));
                Ok(())
            }
            Err(error) => {
                self.dispatch(StoreAction::MutationFailed(error.to_string()));
                Err(error)
            }
        }
    }

    /// Delete a transaction. No optimistic pre-removal: the entity stays
    /// visible until the server confirms.
    pub async fn delete_transaction(&self, id: &str) -> Result<(), ApiError> {
        self.dispatch(StoreAction::ErrorCleared);
        match self.service.delete_transaction(id).await {
            Ok(()) => {
                self.dispatch(StoreAction::EntityRemoved(id.to_string()));
                Ok(())
            }
            Err(error) => {
                self.dispatch(StoreAction::MutationFailed(error.to_string()));
                Err(error)
            }
        }
    }

    /// Transition a pending transaction to confirmed
    pub async fn confirm_transaction(&self, id: &str) -> Result<(), ApiError> {
        self.dispatch(StoreAction::ErrorCleared);
        match self.service.confirm_transaction(id).await {
            Ok(confirmed) => {
                self.dispatch(StoreAction::EntityReplaced(confirmed));
                Ok(())
            }
            Err(error) => {
                self.dispatch(StoreAction::MutationFailed(error.to_string()));
                Err(error)
            }
        }
    }

    /// Transition a pending transaction to cancelled
    pub async fn cancel_transaction(&self, id: &str) -> Result<(), ApiError> {
        self.dispatch(StoreAction::ErrorCleared);
        match self.service.cancel_transaction(id).await {
            Ok(cancelled) => {
                self.dispatch(StoreAction::EntityReplaced(cancelled));
                Ok(())
            }
            Err(error) => {
                self.dispatch(StoreAction::MutationFailed(error.to_string()));
                Err(error)
            }
        }
    }

    /// Stage a filter change without touching the network. Does not reset
    /// `page`; callers changing criteria follow up with a page-1 load.
    pub fn set_filters(&self, partial: TransactionFilters) {
        self.dispatch(StoreAction::FiltersMerged(partial));
    }

    /// Drop all held filters. Callers follow up with a load.
    pub fn reset_filters(&self) {
        self.dispatch(StoreAction::FiltersReset);
    }

    /// Best-effort fetch of the category vocabulary for autocomplete.
    /// Failures are logged and swallowed; they never affect the list.
    pub async fn load_categories(&self) {
        match self.service.list_categories().await {
            Ok(categories) => self.dispatch(StoreAction::CategoriesLoaded(categories)),
            Err(error) => Logger::warn_with_component(
                "TransactionStore",
                &format!("Failed to load categories: {}", error),
            ),
        }
    }

    /// Best-effort fetch of the merchant vocabulary for autocomplete
    pub async fn load_merchants(&self) {
        match self.service.list_merchants().await {
            Ok(merchants) => self.dispatch(StoreAction::MerchantsLoaded(merchants)),
            Err(error) => Logger::warn_with_component(
                "TransactionStore",
                &format!("Failed to load merchants: {}", error),
            ),
        }
    }
}

/// Presence-only validation of the required create fields; everything else
/// is the server's call.
fn validate_create(request: &CreateTransactionRequest) -> Result<(), String> {
    if !request.amount.is_finite() {
        return Err("Amount is required".to_string());
    }
    if request.description.trim().is_empty() {
        return Err("Description is required".to_string());
    }
    if request.date.trim().is_empty() {
        return Err("Date is required".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use shared::{
        Transaction, TransactionListResponse, TransactionStatus, TransactionSummary,
        TransactionType,
    };
    use std::collections::VecDeque;

    fn tx(id: &str, amount: f64) -> Transaction {
        Transaction {
            id: id.to_string(),
            amount,
            description: format!("tx {}", id),
            transaction_type: TransactionType::Expense,
            category: None,
            subcategory: None,
            currency: "USD".to_string(),
            date: "2024-01-10".to_string(),
            time: None,
            merchant_name: None,
            location: None,
            notes: None,
            status: TransactionStatus::Confirmed,
            input_method: "manual".to_string(),
            created_at: "2024-01-10T12:00:00Z".to_string(),
            updated_at: "2024-01-10T12:00:00Z".to_string(),
        }
    }

    fn page_response(
        transactions: Vec<Transaction>,
        total: u32,
        page: u32,
        limit: u32,
    ) -> TransactionListResponse {
        let count = transactions.len() as u32;
        TransactionListResponse {
            total_pages: if limit == 0 { 0 } else { total.div_ceil(limit) },
            transactions,
            total,
            page,
            limit,
            summary: TransactionSummary {
                transaction_count: count,
                ..Default::default()
            },
        }
    }

    fn network_error() -> ApiError {
        ApiError::Network("connection refused".to_string())
    }

    /// Scripted service: every call pops the next queued result and
    /// panics if the test did not script one.
    #[derive(Default)]
    struct MockService {
        list_results: RefCell<VecDeque<Result<TransactionListResponse, ApiError>>>,
        create_results: RefCell<VecDeque<Result<Transaction, ApiError>>>,
        update_results: RefCell<VecDeque<Result<Transaction, ApiError>>>,
        delete_results: RefCell<VecDeque<Result<(), ApiError>>>,
        confirm_results: RefCell<VecDeque<Result<Transaction, ApiError>>>,
        cancel_results: RefCell<VecDeque<Result<Transaction, ApiError>>>,
        categories_results: RefCell<VecDeque<Result<Vec<String>, ApiError>>>,
        merchants_results: RefCell<VecDeque<Result<Vec<String>, ApiError>>>,
        seen_list_filters: Rc<RefCell<Vec<TransactionFilters>>>,
    }

    #[async_trait::async_trait(?Send)]
    impl TransactionService for MockService {
        async fn list_transactions(
            &self,
            filters: &TransactionFilters,
        ) -> Result<TransactionListResponse, ApiError> {
            self.seen_list_filters.borrow_mut().push(filters.clone());
            self.list_results
                .borrow_mut()
                .pop_front()
                .expect("unexpected list_transactions call")
        }

        async fn get_transaction(&self, _id: &str) -> Result<Transaction, ApiError> {
            panic!("unexpected get_transaction call")
        }

        async fn create_transaction(
            &self,
            _request: &CreateTransactionRequest,
        ) -> Result<Transaction, ApiError> {
            self.create_results
                .borrow_mut()
                .pop_front()
                .expect("unexpected create_transaction call")
        }

        async fn update_transaction(
            &self,
            _id: &str,
            _request: &UpdateTransactionRequest,
        ) -> Result<Transaction, ApiError> {
            self.update_results
                .borrow_mut()
                .pop_front()
                .expect("unexpected update_transaction call")
        }

        async fn delete_transaction(&self, _id: &str) -> Result<(), ApiError> {
            self.delete_results
                .borrow_mut()
                .pop_front()
                .expect("unexpected delete_transaction call")
        }

        async fn confirm_transaction(&self, _id: &str) -> Result<Transaction, ApiError> {
            self.confirm_results
                .borrow_mut()
                .pop_front()
                .expect("unexpected confirm_transaction call")
        }

        async fn cancel_transaction(&self, _id: &str) -> Result<Transaction, ApiError> {
            self.cancel_results
                .borrow_mut()
                .pop_front()
                .expect("unexpected cancel_transaction call")
        }

        async fn list_categories(&self) -> Result<Vec<String>, ApiError> {
            self.categories_results
                .borrow_mut()
                .pop_front()
                .expect("unexpected list_categories call")
        }

        async fn list_merchants(&self) -> Result<Vec<String>, ApiError> {
            self.merchants_results
                .borrow_mut()
                .pop_front()
                .expect("unexpected list_merchants call")
        }
    }

    fn store_with(service: MockService) -> TransactionStore<MockService> {
        TransactionStore::new(service)
    }

    /// Store pre-loaded with one page of five confirmed transactions
    fn loaded_store(service: MockService) -> TransactionStore<MockService> {
        let page = vec![tx("1", 1.0), tx("2", 2.0), tx("3", 3.0), tx("4", 4.0), tx("5", 5.0)];
        service
            .list_results
            .borrow_mut()
            .push_front(Ok(page_response(page, 5, 1, 20)));
        let store = store_with(service);
        block_on(store.load_transactions(None)).expect("initial load");
        store
    }

    #[test]
    fn test_empty_result_yields_zero_pages() {
        // Scenario A
        let service = MockService::default();
        service
            .list_results
            .borrow_mut()
            .push_back(Ok(page_response(vec![], 0, 1, 20)));
        let store = store_with(service);

        let filters = TransactionFilters {
            page: Some(1),
            limit: Some(20),
            ..Default::default()
        };
        block_on(store.load_transactions(Some(filters))).expect("load");

        let state = store.snapshot();
        assert!(state.transactions.is_empty());
        assert_eq!(state.total, 0);
        assert_eq!(state.total_pages, 0);
        assert_eq!(state.summary.transaction_count, 0);
        assert!(!state.is_loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_successful_load_keeps_page_within_limit() {
        let service = MockService::default();
        service
            .list_results
            .borrow_mut()
            .push_back(Ok(page_response(vec![tx("a", 1.0), tx("b", 2.0)], 47, 1, 20)));
        let store = store_with(service);
        block_on(store.load_transactions(None)).expect("load");

        let state = store.snapshot();
        assert!(state.transactions.len() as u32 <= state.limit);
        assert_eq!(state.total_pages, 3); // ceil(47 / 20)
    }

    #[test]
    fn test_load_failure_keeps_previous_page() {
        // Scenario D
        let service = MockService::default();
        service
            .list_results
            .borrow_mut()
            .push_back(Err(network_error()));
        let store = loaded_store(service);

        let result = block_on(store.load_transactions(None));
        assert!(result.is_err());

        let state = store.snapshot();
        assert_eq!(state.transactions.len(), 5);
        assert_eq!(state.total, 5);
        assert!(!state.is_loading);
        assert!(state.error.is_some());
    }

    #[test]
    fn test_criteria_change_resets_to_first_page() {
        let service = MockService::default();
        let seen = Rc::clone(&service.seen_list_filters);
        {
            let mut list = service.list_results.borrow_mut();
            list.push_back(Ok(page_response(vec![], 0, 3, 20)));
            list.push_back(Ok(page_response(vec![], 0, 1, 20)));
        }
        let store = store_with(service);

        block_on(store.load_transactions(Some(TransactionFilters {
            page: Some(3),
            category: Some("Rent".to_string()),
            ..Default::default()
        })))
        .expect("first load");

        block_on(store.load_transactions(Some(TransactionFilters {
            search: Some("march".to_string()),
            ..Default::default()
        })))
        .expect("second load");

        let seen = seen.borrow();
        assert_eq!(seen[0].page, Some(3));
        // the search partial changed criteria, so the request went to page 1
        assert_eq!(seen[1].page, Some(1));
        // earlier criteria persist through the merge
        assert_eq!(seen[1].category.as_deref(), Some("Rent"));
        assert_eq!(seen[1].search.as_deref(), Some("march"));
    }

    #[test]
    fn test_page_only_change_does_not_reset() {
        let service = MockService::default();
        let seen = Rc::clone(&service.seen_list_filters);
        {
            let mut list = service.list_results.borrow_mut();
            list.push_back(Ok(page_response(vec![], 40, 1, 20)));
            list.push_back(Ok(page_response(vec![], 40, 2, 20)));
        }
        let store = store_with(service);

        block_on(store.load_transactions(Some(TransactionFilters {
            status: Some(TransactionStatus::Pending),
            ..Default::default()
        })))
        .expect("first load");

        block_on(store.load_transactions(Some(TransactionFilters {
            page: Some(2),
            ..Default::default()
        })))
        .expect("page change");

        let seen = seen.borrow();
        assert_eq!(seen[1].page, Some(2));
        assert_eq!(seen[1].status, Some(TransactionStatus::Pending));
    }

    #[test]
    fn test_create_prepends_server_entity() {
        // Scenario C
        let service = MockService::default();
        let mut created = tx("t99", 50.0);
        created.description = "Coffee".to_string();
        service.create_results.borrow_mut().push_back(Ok(created));
        let store = loaded_store(service);

        let request = CreateTransactionRequest::new(
            50.0,
            "Coffee",
            TransactionType::Expense,
            "2024-01-10",
        );
        block_on(store.create_transaction(request)).expect("create");

        let state = store.snapshot();
        assert_eq!(state.transactions[0].id, "t99");
        assert_eq!(state.transactions.len(), 6);
        assert_eq!(state.total, 6);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_create_failure_changes_nothing() {
        let service = MockService::default();
        service
            .create_results
            .borrow_mut()
            .push_back(Err(ApiError::Server {
                status: 422,
                message: "Amount exceeds account limit".to_string(),
            }));
        let store = loaded_store(service);
        let before = store.snapshot();

        let request =
            CreateTransactionRequest::new(50.0, "Coffee", TransactionType::Expense, "2024-01-10");
        let result = block_on(store.create_transaction(request));
        assert!(result.is_err());

        let state = store.snapshot();
        assert_eq!(state.transactions, before.transactions);
        assert_eq!(state.total, before.total);
        // the server's message passes straight through
        assert_eq!(state.error.as_deref(), Some("Amount exceeds account limit"));
    }

    #[test]
    fn test_create_missing_required_fields_never_hits_the_service() {
        let service = MockService::default();
        let store = loaded_store(service);

        let request = CreateTransactionRequest::new(
            50.0,
            "   ",
            TransactionType::Expense,
            "2024-01-10",
        );
        let result = block_on(store.create_transaction(request));
        assert_eq!(
            result,
            Err(ApiError::Validation("Description is required".to_string()))
        );
        assert_eq!(
            store.snapshot().error.as_deref(),
            Some("Description is required")
        );
    }

    #[test]
    fn test_delete_removes_exactly_one_entity() {
        // Scenario B
        let service = MockService::default();
        service.delete_results.borrow_mut().push_back(Ok(()));
        let store = loaded_store(service);

        block_on(store.delete_transaction("3")).expect("delete");

        let state = store.snapshot();
        assert_eq!(state.transactions.len(), 4);
        assert!(state.transactions.iter().all(|t| t.id != "3"));
        assert_eq!(state.total, 4);
    }

    #[test]
    fn test_delete_failure_leaves_entity_present() {
        let service = MockService::default();
        service
            .delete_results
            .borrow_mut()
            .push_back(Err(network_error()));
        let store = loaded_store(service);
        let before = store.snapshot();

        let result = block_on(store.delete_transaction("3"));
        assert!(result.is_err());

        let state = store.snapshot();
        assert_eq!(state.transactions, before.transactions);
        assert_eq!(state.total, 5);
        assert!(state.error.is_some());
    }

    #[test]
    fn test_update_replaces_in_place() {
        let service = MockService::default();
        let mut updated = tx("3", 3.0);
        updated.description = "edited".to_string();
        service.update_results.borrow_mut().push_back(Ok(updated));
        let store = loaded_store(service);

        let request = UpdateTransactionRequest {
            description: Some("edited".to_string()),
            ..Default::default()
        };
        block_on(store.update_transaction("3", request)).expect("update");

        let state = store.snapshot();
        assert_eq!(state.transactions[2].id, "3");
        assert_eq!(state.transactions[2].description, "edited");
        assert_eq!(state.transactions[0].description, "tx 1");
        assert_eq!(state.transactions.len(), 5);
    }

    #[test]
    fn test_update_failure_preserves_state() {
        let service = MockService::default();
        service
            .update_results
            .borrow_mut()
            .push_back(Err(network_error()));
        let store = loaded_store(service);
        let before = store.snapshot();

        let result = block_on(store.update_transaction(
            "3",
            UpdateTransactionRequest {
                amount: Some(99.0),
                ..Default::default()
            },
        ));
        assert!(result.is_err());
        assert_eq!(store.snapshot().transactions, before.transactions);
    }

    #[test]
    fn test_confirm_swaps_in_new_status() {
        // Scenario E
        let service = MockService::default();
        let mut pending_page = vec![tx("6", 1.0), tx("7", 2.0), tx("8", 3.0)];
        for t in &mut pending_page {
            t.status = TransactionStatus::Pending;
        }
        service
            .list_results
            .borrow_mut()
            .push_back(Ok(page_response(pending_page, 3, 1, 20)));

        let mut confirmed = tx("7", 2.0);
        confirmed.status = TransactionStatus::Confirmed;
        service.confirm_results.borrow_mut().push_back(Ok(confirmed));

        let store = store_with(service);
        block_on(store.load_transactions(None)).expect("load");
        block_on(store.confirm_transaction("7")).expect("confirm");

        let state = store.snapshot();
        assert_eq!(state.transactions[1].id, "7");
        assert_eq!(state.transactions[1].status, TransactionStatus::Confirmed);
        assert_eq!(state.transactions[0].status, TransactionStatus::Pending);
        assert_eq!(state.transactions[2].status, TransactionStatus::Pending);
    }

    #[test]
    fn test_cancel_failure_leaves_status_alone() {
        let service = MockService::default();
        service
            .cancel_results
            .borrow_mut()
            .push_back(Err(network_error()));
        let store = loaded_store(service);

        let result = block_on(store.cancel_transaction("2"));
        assert!(result.is_err());
        assert_eq!(
            store.snapshot().transactions[1].status,
            TransactionStatus::Confirmed
        );
    }

    #[test]
    fn test_set_filters_is_idempotent_and_offline() {
        // no list result scripted: a network call would panic the mock
        let service = MockService::default();
        let store = store_with(service);

        let partial = TransactionFilters {
            category: Some("Travel".to_string()),
            ..Default::default()
        };
        store.set_filters(partial.clone());
        let once = store.snapshot().filters;
        store.set_filters(partial);
        assert_eq!(store.snapshot().filters, once);
        assert_eq!(once.category.as_deref(), Some("Travel"));
    }

    #[test]
    fn test_vocabulary_failures_are_swallowed() {
        let service = MockService::default();
        service
            .categories_results
            .borrow_mut()
            .push_back(Err(network_error()));
        service
            .merchants_results
            .borrow_mut()
            .push_back(Ok(vec!["Acme".to_string(), "Cafe Rio".to_string()]));
        let store = store_with(service);

        block_on(store.load_categories());
        block_on(store.load_merchants());

        let state = store.snapshot();
        assert!(state.categories.is_empty());
        assert_eq!(state.merchants.len(), 2);
        // vocabulary failures never reach the user-visible error channel
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_listener_observes_every_transition() {
        let service = MockService::default();
        service
            .list_results
            .borrow_mut()
            .push_back(Ok(page_response(vec![tx("a", 1.0)], 1, 1, 20)));
        let store = store_with(service);

        let observed: Rc<RefCell<Vec<bool>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&observed);
        store.set_listener(move |state| sink.borrow_mut().push(state.is_loading));

        block_on(store.load_transactions(None)).expect("load");

        // LoadStarted then LoadSucceeded
        assert_eq!(*observed.borrow(), vec![true, false]);

        store.clear_listener();
        store.set_filters(TransactionFilters::default());
        assert_eq!(observed.borrow().len(), 2);
    }

    #[test]
    fn test_generic_fallback_message_for_silent_failures() {
        let service = MockService::default();
        service
            .list_results
            .borrow_mut()
            .push_back(Err(ApiError::Server {
                status: 500,
                message: "Request failed with status 500".to_string(),
            }));
        let store = store_with(service);

        let _ = block_on(store.load_transactions(None));
        assert_eq!(
            store.snapshot().error.as_deref(),
            Some("Request failed with status 500")
        );
    }
}
