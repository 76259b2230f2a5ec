use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PaginationControlsProps {
    pub page: u32,
    pub total_pages: u32,
    pub on_page_change: Callback<u32>,
}

#[function_component(PaginationControls)]
pub fn pagination_controls(props: &PaginationControlsProps) -> Html {
    let page = props.page;
    let prev = {
        let on_page_change = props.on_page_change.clone();
        Callback::from(move |_| on_page_change.emit(page.saturating_sub(1).max(1)))
    };
    let next = {
        let on_page_change = props.on_page_change.clone();
        Callback::from(move |_| on_page_change.emit(page + 1))
    };

    html! {
        <nav class="pagination">
            <button disabled={page <= 1} onclick={prev}>{"Previous"}</button>
            <span class="page-indicator">
                {format!("Page {} of {}", page, props.total_pages.max(1))}
            </span>
            <button disabled={page >= props.total_pages} onclick={next}>{"Next"}</button>
        </nav>
    }
}
