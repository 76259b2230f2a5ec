use shared::{CreateTransactionRequest, TransactionType};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::services::date_utils::current_date;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct TransactionFormProps {
    pub on_create: Callback<CreateTransactionRequest>,
}

/// Minimal entry form for new transactions. Only the required fields plus
/// category; everything else is edited after creation.
#[function_component(TransactionForm)]
pub fn transaction_form(props: &TransactionFormProps) -> Html {
    let description = use_state(String::new);
    let amount = use_state(String::new);
    let transaction_type = use_state(|| "expense".to_string());
    let category = use_state(String::new);
    let date = use_state(current_date);

    let on_description_change = {
        let description = description.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            description.set(input.value());
        })
    };
    let on_amount_change = {
        let amount = amount.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            amount.set(input.value());
        })
    };
    let on_type_change = {
        let transaction_type = transaction_type.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            transaction_type.set(select.value());
        })
    };
    let on_category_change = {
        let category = category.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            category.set(input.value());
        })
    };
    let on_date_change = {
        let date = date.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            date.set(input.value());
        })
    };

    let onsubmit = {
        let description = description.clone();
        let amount = amount.clone();
        let transaction_type = transaction_type.clone();
        let category = category.clone();
        let date = date.clone();
        let on_create = props.on_create.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let parsed_amount = (*amount).trim().parse::<f64>().unwrap_or(0.0);
            let parsed_type = (*transaction_type)
                .parse::<TransactionType>()
                .unwrap_or(TransactionType::Expense);
            let mut request = CreateTransactionRequest::new(
                parsed_amount,
                (*description).clone(),
                parsed_type,
                (*date).clone(),
            );
            let category_value = (*category).trim();
            if !category_value.is_empty() {
                request.category = Some(category_value.to_string());
            }
            request.input_method = Some("manual".to_string());
            Logger::debug_with_component(
                "TransactionForm",
                &format!("submitting new {} transaction", request.transaction_type),
            );
            on_create.emit(request);

            description.set(String::new());
            amount.set(String::new());
            category.set(String::new());
        })
    };

    html! {
        <section class="transaction-form-section">
            <h2>{"Add Transaction"}</h2>
            <form class="transaction-form" {onsubmit}>
                <div class="form-group">
                    <label for="description">{"Description"}</label>
                    <input
                        type="text"
                        id="description"
                        placeholder="Coffee, rent, paycheck..."
                        value={(*description).clone()}
                        onchange={on_description_change}
                    />
                </div>
                <div class="form-group">
                    <label for="amount">{"Amount"}</label>
                    <input
                        type="number"
                        id="amount"
                        step="0.01"
                        placeholder="0.00"
                        value={(*amount).clone()}
                        onchange={on_amount_change}
                    />
                </div>
                <div class="form-group">
                    <label for="type">{"Type"}</label>
                    <select id="type" onchange={on_type_change} value={(*transaction_type).clone()}>
                        <option value="expense">{"Expense"}</option>
                        <option value="income">{"Income"}</option>
                        <option value="transfer">{"Transfer"}</option>
                    </select>
                </div>
                <div class="form-group">
                    <label for="category">{"Category"}</label>
                    <input
                        type="text"
                        id="category"
                        list="category-options"
                        value={(*category).clone()}
                        onchange={on_category_change}
                    />
                </div>
                <div class="form-group">
                    <label for="date">{"Date"}</label>
                    <input
                        type="date"
                        id="date"
                        value={(*date).clone()}
                        onchange={on_date_change}
                    />
                </div>
                <button type="submit" class="btn btn-primary">{"Add"}</button>
            </form>
        </section>
    }
}
