use leptos::prelude::*;

/// `warning-box--error` banner, hidden while `message` is `None`.
#[component]
pub fn ErrorBanner(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        {move || message.get().map(|err| view! {
            <div class="warning-box warning-box--error">
                <span class="warning-box__icon">"⚠"</span>
                <span class="warning-box__text">{err}</span>
            </div>
        })}
    }
}

/// Neutral `warning-box--info` line, e.g. for empty results.
#[component]
pub fn InfoBanner(#[prop(into)] text: String) -> impl IntoView {
    view! {
        <div class="warning-box warning-box--info">
            <span class="warning-box__icon">"ℹ"</span>
            <span class="warning-box__text">{text}</span>
        </div>
    }
}
