//! Application shell: the login gate and the tabbed workspace.

use crate::layout::global_context::{AppGlobalContext, Tab};
use crate::layout::left::sidebar::Sidebar;
use crate::layout::tabs::TabPage;
use crate::layout::Shell;
use crate::system::auth::context::use_auth;
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;

#[component]
fn Workspace() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    ctx.init_router_integration();
    if ctx.active.with_untracked(Option::is_none) {
        ctx.open_start_tab();
    }

    let tab_pages = move || {
        view! {
            <For
                each=move || ctx.opened.get()
                key=|tab| tab.key.clone()
                children=move |tab: Tab| view! { <TabPage tab=tab tabs_store=ctx /> }
            />
        }
        .into_any()
    };

    view! { <Shell left=|| view! { <Sidebar /> }.into_any() center=tab_pages /> }
}

#[component]
pub fn AppShell() -> impl IntoView {
    let session = use_auth();

    view! {
        <Show when=move || session.is_authenticated() fallback=|| view! { <LoginPage /> }>
            <Workspace />
        </Show>
    }
}
