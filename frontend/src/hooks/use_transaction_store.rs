use shared::{CreateTransactionRequest, TransactionFilters, UpdateTransactionRequest};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::store::{TransactionState, TransactionStore};

pub struct UseTransactionStoreResult {
    pub state: TransactionState,
    pub actions: UseTransactionStoreActions,
}

#[derive(Clone)]
pub struct UseTransactionStoreActions {
    pub load_transactions: Callback<Option<TransactionFilters>>,
    pub create_transaction: Callback<CreateTransactionRequest>,
    pub update_transaction: Callback<(String, UpdateTransactionRequest)>,
    pub delete_transaction: Callback<String>,
    pub confirm_transaction: Callback<String>,
    pub cancel_transaction: Callback<String>,
    pub set_filters: Callback<TransactionFilters>,
    pub reset_filters: Callback<()>,
}

/// Owns a `TransactionStore` for the lifetime of the mounted view and
/// republishes its state into a `use_state` handle so components re-render
/// on every store transition. The store is created on mount, loads the
/// first page plus the autocomplete vocabularies, and stops notifying on
/// unmount.
///
/// Operation errors are not handled here; they land in `state.error` and
/// the components render them.
#[hook]
pub fn use_transaction_store(api_client: &ApiClient) -> UseTransactionStoreResult {
    let store = use_memo((), {
        let api_client = api_client.clone();
        move |_| TransactionStore::new(api_client)
    });
    let snapshot = use_state(TransactionState::default);

    {
        let store = store.clone();
        let snapshot = snapshot.clone();
        use_effect_with((), move |_| {
            {
                let snapshot = snapshot.clone();
                store.set_listener(move |state| snapshot.set(state));
            }
            {
                let store = store.clone();
                spawn_local(async move {
                    Logger::info_with_component(
                        "useTransactionStore",
                        "mounted; loading first page and vocabularies",
                    );
                    if let Err(error) = store.load_transactions(None).await {
                        Logger::error_with_component(
                            "useTransactionStore",
                            &format!("initial load failed: {}", error),
                        );
                    }
                    store.load_categories().await;
                    store.load_merchants().await;
                });
            }
            move || store.clear_listener()
        });
    }

    let load_transactions = {
        let store = store.clone();
        use_callback((), move |partial: Option<TransactionFilters>, _| {
            let store = store.clone();
            spawn_local(async move {
                let _ = store.load_transactions(partial).await;
            });
        })
    };

    let create_transaction = {
        let store = store.clone();
        use_callback((), move |request: CreateTransactionRequest, _| {
            let store = store.clone();
            spawn_local(async move {
                let _ = store.create_transaction(request).await;
            });
        })
    };

    let update_transaction = {
        let store = store.clone();
        use_callback(
            (),
            move |(id, request): (String, UpdateTransactionRequest), _| {
                let store = store.clone();
                spawn_local(async move {
                    let _ = store.update_transaction(&id, request).await;
                });
            },
        )
    };

    let delete_transaction = {
        let store = store.clone();
        use_callback((), move |id: String, _| {
            let store = store.clone();
            spawn_local(async move {
                let _ = store.delete_transaction(&id).await;
            });
        })
    };

    let confirm_transaction = {
        let store = store.clone();
        use_callback((), move |id: String, _| {
            let store = store.clone();
            spawn_local(async move {
                let _ = store.confirm_transaction(&id).await;
            });
        })
    };

    let cancel_transaction = {
        let store = store.clone();
        use_callback((), move |id: String, _| {
            let store = store.clone();
            spawn_local(async move {
                let _ = store.cancel_transaction(&id).await;
            });
        })
    };

    let set_filters = {
        let store = store.clone();
        use_callback((), move |partial: TransactionFilters, _| {
            store.set_filters(partial);
        })
    };

    let reset_filters = {
        let store = store.clone();
        use_callback((), move |_, _| {
            store.reset_filters();
        })
    };

    UseTransactionStoreResult {
        state: (*snapshot).clone(),
        actions: UseTransactionStoreActions {
            load_transactions,
            create_transaction,
            update_transaction,
            delete_transaction,
            confirm_transaction,
            cancel_transaction,
            set_filters,
            reset_filters,
        },
    }
}
