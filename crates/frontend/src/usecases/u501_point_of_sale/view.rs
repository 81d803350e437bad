use super::client_form::ClientForm;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::{InfoBanner, NoConnectionNotice};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_USECASE;
use crate::shared::toast::ToastService;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_point_of_sale::{
    search_clients, seed_clients, Client, PointOfSale, CLIENT_NOT_FOUND,
};
use leptos::prelude::*;
use thaw::*;

/// Matches for the current query, or the not-found text when a non-blank query finds nothing.
fn search_outcome(clients: &[Client], query: &str) -> Result<Vec<Client>, &'static str> {
    let found: Vec<Client> = search_clients(clients, query).into_iter().cloned().collect();
    if found.is_empty() && !query.trim().is_empty() {
        Err(CLIENT_NOT_FOUND)
    } else {
        Ok(found)
    }
}

/// Point of sale for the company behind the selected connection. Clients live
/// only for the session.
#[component]
pub fn PointOfSaleView() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let toast = use_context::<ToastService>().expect("ToastService not found in context");

    let clients = RwSignal::new(seed_clients());
    let query = RwSignal::new(String::new());
    let selected = RwSignal::new(None::<Client>);
    let show_form = RwSignal::new(false);

    let outcome = Memo::new(move |_| clients.with(|c| search_outcome(c, &query.get())));

    let on_saved = Callback::new(move |client: Client| {
        toast.success(format!("Cliente {} registrado", client.name));
        clients.update(|c| c.push(client.clone()));
        selected.set(Some(client));
        show_form.set(false);
    });

    view! {
        <PageFrame page_id="u501_point_of_sale--usecase" category=PAGE_CAT_USECASE>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{PointOfSale::display_name()}</h1>
                    <span class="page__subtitle">{PointOfSale::description()}</span>
                    {move || ctx.selected_connection.get().map(|s| view! {
                        <Badge appearance=BadgeAppearance::Tint>{s.nickname}</Badge>
                    })}
                </div>
            </div>

            <div class="page__content">
                <Show
                    when=move || ctx.selected_connection.with(Option::is_some)
                    fallback=|| view! { <NoConnectionNotice /> }
                >
                    <div class="modal-tabs">
                        <button class="modal-tabs__tab modal-tabs__tab--active">"Clientes"</button>
                    </div>

                    <Flex gap=FlexGap::Small align=FlexAlign::End>
                        <div class="form__group">
                            <label class="form__label">"Buscar cliente"</label>
                            <Input value=query placeholder="Nombre del cliente" />
                        </div>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| show_form.update(|v| *v = !*v)
                        >
                            {icon("plus")}
                            " Nuevo cliente"
                        </Button>
                    </Flex>

                    {move || match outcome.get() {
                        Err(message) => view! { <InfoBanner text=message /> }.into_any(),
                        Ok(found) => view! {
                            <ul class="client-list">
                                {found.into_iter().map(|c| {
                                    let pick = c.clone();
                                    let id = c.id;
                                    view! {
                                        <li
                                            class="client-list__item"
                                            class:client-list__item--selected=move || {
                                                selected.with(|s| s.as_ref().map(|s| s.id) == Some(id))
                                            }
                                            on:click=move |_| selected.set(Some(pick.clone()))
                                        >
                                            {icon("user")}
                                            " "
                                            {c.name}
                                        </li>
                                    }
                                }).collect_view()}
                            </ul>
                        }
                        .into_any(),
                    }}

                    {move || selected.get().map(|c| view! {
                        <div class="client-summary">
                            <span class="form__label">"Cliente seleccionado: "</span>
                            <strong>{c.name}</strong>
                        </div>
                    })}

                    <Show when=move || show_form.get()>
                        <ClientForm
                            existing=Signal::derive(move || clients.get())
                            on_saved=on_saved
                            on_cancel=Callback::new(move |_| show_form.set(false))
                        />
                    </Show>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_query_is_not_a_miss() {
        assert_eq!(search_outcome(&seed_clients(), "  "), Ok(vec![]));
    }

    #[test]
    fn unknown_name_reports_not_found() {
        assert_eq!(search_outcome(&seed_clients(), "zzz"), Err(CLIENT_NOT_FOUND));
    }

    #[test]
    fn match_is_case_insensitive() {
        let found = search_outcome(&seed_clients(), "ejemplo").unwrap_or_default();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Cliente Ejemplo");
    }
}
