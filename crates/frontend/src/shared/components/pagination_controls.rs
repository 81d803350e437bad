use crate::shared::icons::icon;
use leptos::prelude::*;

/// First/previous/next/last buttons, `page / total (count)` and a page-size select.
/// Pages are 1-based.
#[component]
pub fn PaginationControls(
    #[prop(into)]
    current_page: Signal<usize>,
    #[prop(into)]
    total_pages: Signal<usize>,
    #[prop(into)]
    total_count: Signal<usize>,
    #[prop(into)]
    page_size: Signal<usize>,
    on_page_change: Callback<usize>,
    on_page_size_change: Callback<usize>,
    page_size_options: Vec<usize>,
) -> impl IntoView {
    let default_size = page_size_options.first().copied().unwrap_or(25);
    let at_first = move || current_page.get() <= 1;
    let at_last = move || current_page.get() >= total_pages.get().max(1);

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=at_first
                title="Primera página"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(current_page.get().saturating_sub(1).max(1))
                disabled=at_first
                title="Página anterior"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || format!(
                    "{} / {} ({})",
                    current_page.get(),
                    total_pages.get().max(1),
                    total_count.get()
                )}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(current_page.get() + 1)
                disabled=at_last
                title="Página siguiente"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(total_pages.get().max(1))
                disabled=at_last
                title="Última página"
            >
                {icon("chevrons-right")}
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    let val = event_target_value(&ev).parse().unwrap_or(default_size);
                    on_page_size_change.run(val);
                }
                prop:value=move || page_size.get().to_string()
            >
                {page_size_options.into_iter().map(|size| {
                    view! {
                        <option value=size.to_string() selected=move || page_size.get() == size>
                            {size.to_string()}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}
