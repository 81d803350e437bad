use crate::layout::global_context::AppGlobalContext;
use crate::shared::api_utils::api_base;
use crate::shared::components::ErrorBanner;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::system::auth::context::use_auth;
use contracts::system::health::HealthResponse;
use gloo_net::http::Request;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Gateway `GET /health`; the gateway answers without a session.
async fn fetch_health() -> Result<HealthResponse, String> {
    let response = Request::get(&format!("{}/health", api_base()))
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    response
        .json::<HealthResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

#[component]
pub fn InformationPage() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let session = use_auth();

    let (health, set_health) = signal(None::<HealthResponse>);
    let (error, set_error) = signal(None::<String>);
    let (loading, set_loading) = signal(false);

    let load = move || {
        set_loading.set(true);
        spawn_local(async move {
            match fetch_health().await {
                Ok(h) => {
                    set_health.set(Some(h));
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("health check failed: {}", e);
                    set_health.set(None);
                    set_error.set(Some("No se pudo contactar al servicio.".to_string()));
                }
            }
            set_loading.set(false);
        });
    };
    load();

    let status_badge = move |ok: bool, yes: &'static str, no: &'static str| {
        if ok {
            view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>{yes}</Badge> }
        } else {
            view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Danger>{no}</Badge> }
        }
    };

    view! {
        <PageFrame page_id="sys_information--system" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Información"</h1>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| load() disabled=loading>
                        {icon("refresh")}
                        " Actualizar"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <ErrorBanner message=error />
                {move || health.get().map(|h| view! {
                    <table class="info-table">
                        <tbody>
                            <tr><th>"Servicio"</th><td>{status_badge(h.is_ok(), "Operativo", "Con fallas")}</td></tr>
                            <tr><th>"Versión"</th><td>{h.version.clone()}</td></tr>
                            <tr><th>"API de sincronización"</th><td>{h.upstream.api_url.clone()}</td></tr>
                            <tr><th>"Conexión a la API"</th><td>{status_badge(h.upstream.reachable, "Disponible", "Sin conexión a la API")}</td></tr>
                        </tbody>
                    </table>
                })}
                <table class="info-table">
                    <tbody>
                        <tr>
                            <th>"Usuario"</th>
                            <td>{move || session.user().map(|u| u.email).unwrap_or_default()}</td>
                        </tr>
                        <tr>
                            <th>"Conexión seleccionada"</th>
                            <td>{move || ctx.selected_connection.get()
                                .map(|c| format!("{} ({})", c.nickname, c.client_id))
                                .unwrap_or_else(|| "Ninguna".to_string())}</td>
                        </tr>
                    </tbody>
                </table>
            </div>
        </PageFrame>
    }
}
