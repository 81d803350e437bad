use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use crate::shared::icons::icon;
use leptos::prelude::*;

/// Tab strip plus the area where tab pages are mounted.
#[component]
pub fn Center(children: Children) -> impl IntoView {
    let tabs_store = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    view! {
        <div data-zone="center" class="app-tabs" style="flex: 1; overflow: auto;">
            <div class="tabs__bar">
                <For
                    each=move || tabs_store.opened.get()
                    key=|tab| tab.key.clone()
                    children=move |tab: TabData| view! { <TabHandle tab=tab tabs_store=tabs_store /> }
                />
            </div>
            <div class="tabs__content">
                {children()}
            </div>
        </div>
    }
}

#[component]
fn TabHandle(tab: TabData, tabs_store: AppGlobalContext) -> impl IntoView {
    let key = StoredValue::new(tab.key.clone());
    let is_active = move || {
        tabs_store
            .active
            .with(|active| active.as_deref() == Some(key.get_value().as_str()))
    };
    // Title can change after opening (detail tabs resolve their names late).
    let title = move || {
        tabs_store.opened.with(|tabs| {
            tabs.iter()
                .find(|t| t.key == key.get_value())
                .map(|t| t.title.clone())
                .unwrap_or_default()
        })
    };

    view! {
        <div
            class="tabs__handle"
            class:tabs__handle--active=is_active
            on:click=move |_| tabs_store.activate_tab(&key.get_value())
        >
            <span class="tabs__title">{title}</span>
            <button
                class="tabs__close"
                title="Cerrar"
                on:click=move |e| {
                    e.stop_propagation();
                    tabs_store.close_tab(&key.get_value());
                }
            >
                {icon("x")}
            </button>
        </div>
    }
}
