//! Top bar: sidebar toggle, brand, selected seller account, user and logout.

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::keys;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let session = use_auth();

    let toggle_sidebar = move |_| {
        ctx.toggle_left();
    };

    let logout = move |_| {
        ctx.clear_connection();
        ctx.close_all_tabs();
        session.logout();
    };

    let is_sidebar_visible = move || ctx.left_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=toggle_sidebar
                    title=move || if is_sidebar_visible() { "Ocultar menú" } else { "Mostrar menú" }
                >
                    {move || if is_sidebar_visible() {
                        icon("panel-left-close")
                    } else {
                        icon("panel-left-open")
                    }}
                </button>
                <span class="top-header__title">"Multi Stock Sync"</span>
            </div>

            <div class="top-header__actions">
                // Selected seller account; click to change it.
                <button
                    class="top-header__connection"
                    title="Cambiar conexión"
                    on:click=move |_| ctx.open_registered(keys::CONNECTIONS)
                >
                    {icon("plug")}
                    <span>
                        {move || ctx.selected_connection.get()
                            .map(|c| c.nickname)
                            .unwrap_or_else(|| "Sin conexión".to_string())}
                    </span>
                </button>

                <div class="top-header__user">
                    {icon("user")}
                    <span>
                        {move || session.user()
                            .map(|u| u.display_name().to_string())
                            .unwrap_or_else(|| "Invitado".to_string())}
                    </span>
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Cerrar sesión">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
