mod components;
mod hooks;
mod services;
mod store;

use shared::TransactionFilters;
use yew::prelude::*;

use components::transactions::{
    FilterBar, PaginationControls, SummaryBar, TransactionForm, TransactionTable,
};
use hooks::use_transaction_store;
use services::api::ApiClient;

#[function_component(App)]
fn app() -> Html {
    let api_client = use_memo((), |_| ApiClient::new());
    let transactions = use_transaction_store(&api_client);
    let state = transactions.state;
    let actions = transactions.actions;

    // Filter edits are staged into the store without a network call; Apply
    // commits them by reloading from page 1.
    let on_apply_filters = {
        let load_transactions = actions.load_transactions.clone();
        Callback::from(move |_| {
            load_transactions.emit(Some(TransactionFilters {
                page: Some(1),
                ..Default::default()
            }));
        })
    };

    let on_reset_filters = {
        let reset_filters = actions.reset_filters.clone();
        let load_transactions = actions.load_transactions.clone();
        Callback::from(move |_| {
            reset_filters.emit(());
            load_transactions.emit(Some(TransactionFilters {
                page: Some(1),
                ..Default::default()
            }));
        })
    };

    let on_page_change = {
        let load_transactions = actions.load_transactions.clone();
        Callback::from(move |page: u32| {
            load_transactions.emit(Some(TransactionFilters {
                page: Some(page),
                ..Default::default()
            }));
        })
    };

    html! {
        <div class="dashboard">
            <header class="dashboard-header">
                <h1>{"Transactions"}</h1>
            </header>

            {if let Some(error) = &state.error {
                html! { <div class="error-banner">{error.clone()}</div> }
            } else {
                html! {}
            }}

            <SummaryBar summary={state.summary.clone()} />

            <TransactionForm on_create={actions.create_transaction.clone()} />

            <FilterBar
                categories={state.categories.clone()}
                merchants={state.merchants.clone()}
                on_stage={actions.set_filters.clone()}
                on_apply={on_apply_filters}
                on_reset={on_reset_filters}
            />

            <TransactionTable
                transactions={state.transactions.clone()}
                loading={state.is_loading}
                on_confirm={actions.confirm_transaction.clone()}
                on_cancel={actions.cancel_transaction.clone()}
                on_delete={actions.delete_transaction.clone()}
                on_update={actions.update_transaction.clone()}
            />

            <PaginationControls
                page={state.page}
                total_pages={state.total_pages}
                on_page_change={on_page_change}
            />
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
