use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::keys;
use leptos::prelude::*;
use thaw::*;

/// Shown by pages that need a seller account when none is selected.
#[component]
pub fn NoConnectionNotice() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <div class="warning-box">
            <span class="warning-box__icon">"⚠"</span>
            <span class="warning-box__text">"Primero selecciona una conexión a Mercado Libre."</span>
            <Button
                appearance=ButtonAppearance::Primary
                on_click=move |_| ctx.open_registered(keys::CONNECTIONS)
            >
                "Seleccionar conexión"
            </Button>
        </div>
    }
}
