use shared::TransactionSummary;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SummaryBarProps {
    pub summary: TransactionSummary,
}

/// Income/expense/net cards plus the per-category breakdown for the
/// currently filtered result set.
#[function_component(SummaryBar)]
pub fn summary_bar(props: &SummaryBarProps) -> Html {
    let summary = &props.summary;
    html! {
        <section class="summary-bar">
            <div class="summary-cards">
                <div class="summary-card income">
                    <span class="label">{"Income"}</span>
                    <span class="value">{format!("{:.2}", summary.total_income)}</span>
                </div>
                <div class="summary-card expenses">
                    <span class="label">{"Expenses"}</span>
                    <span class="value">{format!("{:.2}", summary.total_expenses)}</span>
                </div>
                <div class="summary-card net">
                    <span class="label">{"Net"}</span>
                    <span class="value">{format!("{:.2}", summary.net_amount)}</span>
                </div>
                <div class="summary-card count">
                    <span class="label">{"Transactions"}</span>
                    <span class="value">{summary.transaction_count}</span>
                </div>
            </div>
            {if summary.category_breakdown.is_empty() {
                html! {}
            } else {
                html! {
                    <ul class="category-breakdown">
                        {for summary.category_breakdown.iter().map(|entry| html! {
                            <li key={entry.category.clone()}>
                                <span class="category">{&entry.category}</span>
                                <span class="amount">{format!("{:.2}", entry.amount)}</span>
                                <span class="share">{format!("{:.1}%", entry.percentage)}</span>
                            </li>
                        })}
                    </ul>
                }
            }}
        </section>
    }
}
