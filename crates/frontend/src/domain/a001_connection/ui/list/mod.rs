use crate::domain::a001_connection::api::{fetch_connections, token_states};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::keys;
use crate::shared::components::ErrorBanner;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::toast::use_toasts;
use contracts::domain::a001_connection::{validate_selection, Connection, TokenState};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashMap;
use thaw::*;

#[derive(Clone, Debug)]
pub struct ConnectionRow {
    pub client_id: String,
    pub nickname: String,
    pub email: String,
    pub profile_image: Option<String>,
    pub connection: Connection,
}

impl From<Connection> for ConnectionRow {
    fn from(c: Connection) -> Self {
        Self {
            client_id: c.client_id.clone(),
            nickname: c.nickname.clone(),
            email: c.email.clone().unwrap_or_else(|| "-".to_string()),
            profile_image: c.profile_image.clone(),
            connection: c,
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn ConnectionList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let toasts = use_toasts();

    let (items, set_items) = signal::<Vec<ConnectionRow>>(Vec::new());
    let (states, set_states) = signal::<HashMap<String, TokenState>>(HashMap::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);

    let fetch = move || {
        set_loading.set(true);
        spawn_local(async move {
            match fetch_connections().await {
                Ok(list) => {
                    let rows: Vec<ConnectionRow> = list.into_iter().map(Into::into).collect();
                    let ids: Vec<String> = rows.iter().map(|r| r.client_id.clone()).collect();
                    set_states.set(
                        ids.iter()
                            .map(|id| (id.clone(), TokenState::Checking))
                            .collect(),
                    );
                    set_items.set(rows);
                    set_error.set(None);
                    set_loading.set(false);

                    let tested = token_states(ids).await;
                    set_states.update(|s| s.extend(tested));
                }
                Err(e) => {
                    log::error!("connections: {}", e);
                    set_error.set(Some(e.user_message("Error al cargar las conexiones.")));
                    set_loading.set(false);
                }
            }
        });
    };
    fetch();

    let select = move |row: ConnectionRow| {
        let valid = states.with_untracked(|s| {
            s.get(&row.client_id)
                .map(TokenState::is_valid)
                .unwrap_or(false)
        });
        match validate_selection(&row.connection, valid) {
            Ok(selection) => {
                toasts.success(format!("Conexión {} seleccionada", selection.nickname));
                ctx.select_connection(selection);
                ctx.open_registered(keys::HOME);
            }
            Err(e) => toasts.error(e.to_string()),
        }
    };

    let state_of = move |client_id: &str| {
        states.with(|s| s.get(client_id).copied().unwrap_or(TokenState::Checking))
    };

    view! {
        <PageFrame page_id="a001_connection--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Conexiones a Mercado Libre"</h1>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch() disabled=loading>
                        {icon("refresh")}
                        " Actualizar"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <ErrorBanner message=error />
                <Show when=move || loading.get()>
                    <Spinner label="Cargando conexiones..." />
                </Show>
                <Show when=move || !loading.get() && error.get().is_none() && items.get().is_empty()>
                    <p class="empty-state">"No hay conexiones registradas."</p>
                </Show>
                <div class="card-grid">
                    <For
                        each=move || items.get()
                        key=|row| row.client_id.clone()
                        children=move |row: ConnectionRow| {
                            let id = row.client_id.clone();
                            let id_badge = id.clone();
                            let id_button = id.clone();
                            let id_selected = id.clone();
                            let row_click = row.clone();
                            let is_selected = move || {
                                ctx.selected_connection
                                    .with(|s| s.as_ref().map(|s| s.client_id == id_selected).unwrap_or(false))
                            };
                            view! {
                                <div class="connection-card" class:connection-card--selected=is_selected>
                                    <div class="connection-card__header">
                                        {row.profile_image.clone().map(|src| view! {
                                            <img class="connection-card__avatar" src=src alt="" />
                                        })}
                                        <div>
                                            <div class="connection-card__title">{row.nickname.clone()}</div>
                                            <div class="connection-card__meta">{row.email.clone()}</div>
                                            <div class="connection-card__meta">{format!("ID: {}", id)}</div>
                                        </div>
                                    </div>
                                    <div class="connection-card__footer">
                                        {move || match state_of(&id_badge) {
                                            TokenState::Valid => view! {
                                                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>
                                                    {TokenState::Valid.label()}
                                                </Badge>
                                            }.into_any(),
                                            TokenState::Expired => view! {
                                                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Danger>
                                                    {TokenState::Expired.label()}
                                                </Badge>
                                            }.into_any(),
                                            TokenState::Checking => view! {
                                                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>
                                                    {TokenState::Checking.label()}
                                                </Badge>
                                            }.into_any(),
                                        }}
                                        <Button
                                            appearance=ButtonAppearance::Primary
                                            disabled=Signal::derive(move || !state_of(&id_button).is_valid())
                                            on_click=move |_| select(row_click.clone())
                                        >
                                            {icon("check")}
                                            " Seleccionar"
                                        </Button>
                                    </div>
                                </div>
                            }
                        }
                    />
                </div>
            </div>
        </PageFrame>
    }
}
