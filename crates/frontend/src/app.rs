use crate::app_shell::AppShell;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::ModalService;
use crate::shared::toast::{ToastHost, ToastService};
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Tabs, sidebar state and the selected seller account.
    provide_context(AppGlobalContext::new());

    provide_context(ModalService::new());
    provide_context(ToastService::new());

    view! {
        <AuthProvider>
            <AppShell />
            <ToastHost />
        </AuthProvider>
    }
}
