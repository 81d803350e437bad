//! TabPage: mounts a tab's content once and hides it while another tab is active.

use super::registry::render_tab_content;
use crate::layout::global_context::{AppGlobalContext, Tab};
use leptos::prelude::*;

#[component]
pub fn TabPage(tab: Tab, tabs_store: AppGlobalContext) -> impl IntoView {
    let key = StoredValue::new(tab.key);
    let hidden = move || {
        tabs_store
            .active
            .with(|active| key.with_value(|k| active.as_deref() != Some(k.as_str())))
    };

    on_cleanup(move || leptos::logging::log!("tab closed: '{}'", key.get_value()));

    let content = key.with_value(|k| render_tab_content(k, tabs_store));

    view! {
        <div class="tabs__item" class:tabs__item--hidden=hidden data-tab-key=key.get_value()>
            {content}
        </div>
    }
}
