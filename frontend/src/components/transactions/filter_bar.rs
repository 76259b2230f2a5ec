use shared::TransactionFilters;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::services::filters::{active_filter_count, FilterForm};

#[derive(Properties, PartialEq)]
pub struct FilterBarProps {
    /// Autocomplete vocabularies from the store (may be empty while loading)
    pub categories: Vec<String>,
    pub merchants: Vec<String>,
    /// Receives the canonical filter object after every field edit; the
    /// store stages it without a network round-trip
    pub on_stage: Callback<TransactionFilters>,
    /// The user committed the staged filters; the caller reloads page 1
    pub on_apply: Callback<()>,
    pub on_reset: Callback<()>,
}

#[function_component(FilterBar)]
pub fn filter_bar(props: &FilterBarProps) -> Html {
    let form = use_state(FilterForm::default);

    let input_handler = |apply: fn(&mut FilterForm, String)| {
        let form = form.clone();
        let on_stage = props.on_stage.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            apply(&mut next, input.value());
            on_stage.emit(next.canonicalize());
            form.set(next);
        })
    };

    let select_handler = |apply: fn(&mut FilterForm, String)| {
        let form = form.clone();
        let on_stage = props.on_stage.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            apply(&mut next, select.value());
            on_stage.emit(next.canonicalize());
            form.set(next);
        })
    };

    let on_search_change = input_handler(|f, v| f.search = v);
    let on_category_change = input_handler(|f, v| f.category = v);
    let on_merchant_change = input_handler(|f, v| f.merchant_name = v);
    let on_start_date_change = input_handler(|f, v| f.start_date = v);
    let on_end_date_change = input_handler(|f, v| f.end_date = v);
    let on_min_amount_change = input_handler(|f, v| f.min_amount = v);
    let on_max_amount_change = input_handler(|f, v| f.max_amount = v);
    let on_type_change = select_handler(|f, v| f.transaction_type = v);
    let on_status_change = select_handler(|f, v| f.status = v);
    let on_sort_by_change = select_handler(|f, v| f.sort_by = v);
    let on_sort_order_change = select_handler(|f, v| f.sort_order = v);

    let active_count = active_filter_count(&form.canonicalize());

    let apply = {
        let on_apply = props.on_apply.clone();
        Callback::from(move |_| on_apply.emit(()))
    };
    let reset = {
        let form = form.clone();
        let on_reset = props.on_reset.clone();
        Callback::from(move |_| {
            form.set(FilterForm::default());
            on_reset.emit(());
        })
    };

    html! {
        <section class="filter-bar">
            <div class="filter-row">
                <input
                    type="text"
                    placeholder="Search description, merchant, notes"
                    value={form.search.clone()}
                    onchange={on_search_change}
                />
                <select onchange={on_type_change} value={form.transaction_type.clone()}>
                    <option value="">{"Any type"}</option>
                    <option value="expense">{"Expense"}</option>
                    <option value="income">{"Income"}</option>
                    <option value="transfer">{"Transfer"}</option>
                </select>
                <select onchange={on_status_change} value={form.status.clone()}>
                    <option value="">{"Any status"}</option>
                    <option value="pending">{"Pending"}</option>
                    <option value="confirmed">{"Confirmed"}</option>
                    <option value="cancelled">{"Cancelled"}</option>
                </select>
                <input
                    type="text"
                    list="category-options"
                    placeholder="Category"
                    value={form.category.clone()}
                    onchange={on_category_change}
                />
                <datalist id="category-options">
                    {for props.categories.iter().map(|c| html! { <option value={c.clone()} /> })}
                </datalist>
                <input
                    type="text"
                    list="merchant-options"
                    placeholder="Merchant"
                    value={form.merchant_name.clone()}
                    onchange={on_merchant_change}
                />
                <datalist id="merchant-options">
                    {for props.merchants.iter().map(|m| html! { <option value={m.clone()} /> })}
                </datalist>
            </div>
            <div class="filter-row">
                <input type="date" value={form.start_date.clone()} onchange={on_start_date_change} />
                <input type="date" value={form.end_date.clone()} onchange={on_end_date_change} />
                <input
                    type="number"
                    placeholder="Min amount"
                    value={form.min_amount.clone()}
                    onchange={on_min_amount_change}
                />
                <input
                    type="number"
                    placeholder="Max amount"
                    value={form.max_amount.clone()}
                    onchange={on_max_amount_change}
                />
                <select onchange={on_sort_by_change} value={form.sort_by.clone()}>
                    <option value="">{"Sort by"}</option>
                    <option value="date">{"Date"}</option>
                    <option value="amount">{"Amount"}</option>
                    <option value="description">{"Description"}</option>
                    <option value="createdAt">{"Created"}</option>
                </select>
                <select onchange={on_sort_order_change} value={form.sort_order.clone()}>
                    <option value="">{"Order"}</option>
                    <option value="desc">{"Newest first"}</option>
                    <option value="asc">{"Oldest first"}</option>
                </select>
            </div>
            <div class="filter-actions">
                <button class="apply-btn" onclick={apply}>{"Apply"}</button>
                <button class="reset-btn" onclick={reset}>{"Reset"}</button>
                {if active_count > 0 {
                    html! { <span class="filter-badge">{format!("{} active", active_count)}</span> }
                } else {
                    html! {}
                }}
            </div>
        </section>
    }
}
