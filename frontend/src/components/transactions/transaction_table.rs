use shared::{Transaction, TransactionStatus, TransactionType, UpdateTransactionRequest};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TransactionTableProps {
    pub transactions: Vec<Transaction>,
    pub loading: bool,
    pub on_confirm: Callback<String>,
    pub on_cancel: Callback<String>,
    pub on_delete: Callback<String>,
    /// Emitted with a partial payload when a row's notes are edited inline
    pub on_update: Callback<(String, UpdateTransactionRequest)>,
}

fn format_amount(transaction: &Transaction) -> String {
    let sign = match transaction.transaction_type {
        TransactionType::Expense => "-",
        TransactionType::Income => "+",
        TransactionType::Transfer => "",
    };
    format!("{}{:.2} {}", sign, transaction.amount, transaction.currency)
}

#[function_component(TransactionTable)]
pub fn transaction_table(props: &TransactionTableProps) -> Html {
    html! {
        <section class="transactions-section">
            {if props.loading {
                html! { <div class="loading">{"Loading transactions..."}</div> }
            } else if props.transactions.is_empty() {
                html! { <div class="empty">{"No transactions match the current filters."}</div> }
            } else {
                html! {
                    <div class="table-container">
                        <table class="transactions-table">
                            <thead>
                                <tr>
                                    <th>{"Date"}</th>
                                    <th>{"Description"}</th>
                                    <th>{"Category"}</th>
                                    <th>{"Merchant"}</th>
                                    <th>{"Amount"}</th>
                                    <th>{"Status"}</th>
                                    <th>{"Notes"}</th>
                                    <th>{"Actions"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                {for props.transactions.iter().map(|transaction| {
                                    let amount_class = match transaction.transaction_type {
                                        TransactionType::Income => "amount positive",
                                        TransactionType::Expense => "amount negative",
                                        TransactionType::Transfer => "amount neutral",
                                    };
                                    let id = transaction.id.clone();
                                    let on_confirm = {
                                        let on_confirm = props.on_confirm.clone();
                                        let id = id.clone();
                                        Callback::from(move |_| on_confirm.emit(id.clone()))
                                    };
                                    let on_cancel = {
                                        let on_cancel = props.on_cancel.clone();
                                        let id = id.clone();
                                        Callback::from(move |_| on_cancel.emit(id.clone()))
                                    };
                                    let on_delete = {
                                        let on_delete = props.on_delete.clone();
                                        let id = id.clone();
                                        Callback::from(move |_| on_delete.emit(id.clone()))
                                    };
                                    let on_notes_change = {
                                        let on_update = props.on_update.clone();
                                        let id = id.clone();
                                        Callback::from(move |e: Event| {
                                            let input: HtmlInputElement = e.target_unchecked_into();
                                            let request = UpdateTransactionRequest {
                                                notes: Some(input.value()),
                                                ..Default::default()
                                            };
                                            on_update.emit((id.clone(), request));
                                        })
                                    };
                                    let is_pending = transaction.status == TransactionStatus::Pending;

                                    html! {
                                        <tr key={transaction.id.clone()}>
                                            <td class="date">{&transaction.date}</td>
                                            <td class="description">{&transaction.description}</td>
                                            <td class="category">{transaction.category.as_deref().unwrap_or("-")}</td>
                                            <td class="merchant">{transaction.merchant_name.as_deref().unwrap_or("-")}</td>
                                            <td class={amount_class}>{format_amount(transaction)}</td>
                                            <td class={format!("status status-{}", transaction.status)}>
                                                {transaction.status.as_str()}
                                            </td>
                                            <td class="notes">
                                                <input
                                                    type="text"
                                                    value={transaction.notes.clone().unwrap_or_default()}
                                                    onchange={on_notes_change}
                                                />
                                            </td>
                                            <td class="actions">
                                                {if is_pending {
                                                    html! {
                                                        <>
                                                            <button class="confirm-btn" onclick={on_confirm}>{"Confirm"}</button>
                                                            <button class="cancel-btn" onclick={on_cancel}>{"Cancel"}</button>
                                                        </>
                                                    }
                                                } else {
                                                    html! {}
                                                }}
                                                <button class="delete-btn" onclick={on_delete}>{"Delete"}</button>
                                            </td>
                                        </tr>
                                    }
                                })}
                            </tbody>
                        </table>
                    </div>
                }
            }}
        </section>
    }
}
