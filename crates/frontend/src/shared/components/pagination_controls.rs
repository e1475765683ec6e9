use crate::shared::icons::icon;
use leptos::prelude::*;

/// Pager with first/prev/next/last buttons and a page-size select.
///
/// Pages are 1-based. `total_count` is whatever the server reported.
#[component]
pub fn PaginationControls(
    /// Current page (1-based)
    #[prop(into)]
    current_page: Signal<usize>,
    /// Total number of pages
    #[prop(into)]
    total_pages: Signal<usize>,
    /// Total number of records reported by the server
    #[prop(into)]
    total_count: Signal<usize>,
    /// Current page size
    #[prop(into)]
    page_size: Signal<usize>,
    /// Called with the new page number
    on_page_change: Callback<usize>,
    /// Called with the new page size
    on_page_size_change: Callback<usize>,
    /// Page sizes offered in the select
    page_size_options: Vec<usize>,
    /// Blocks navigation while a request is in flight
    #[prop(optional, into)]
    disabled: Signal<bool>,
) -> impl IntoView {
    let at_first = move || disabled.get() || current_page.get() <= 1;
    let at_last = move || disabled.get() || current_page.get() >= total_pages.get();

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=at_first
                title="First page"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(current_page.get_untracked().saturating_sub(1).max(1))
                disabled=at_first
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || format!("{} / {} ({})", current_page.get(), total_pages.get().max(1), total_count.get())}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(current_page.get_untracked() + 1)
                disabled=at_last
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(total_pages.get_untracked().max(1))
                disabled=at_last
                title="Last page"
            >
                {icon("chevrons-right")}
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse() {
                        on_page_size_change.run(size);
                    }
                }
                prop:value=move || page_size.get().to_string()
            >
                {page_size_options.into_iter().map(|size| {
                    view! {
                        <option value=size.to_string() selected=move || page_size.get() == size>
                            {format!("{} / page", size)}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}
