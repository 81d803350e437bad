use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{keys, tab_label_for_key};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use leptos::prelude::*;

struct HomeCard {
    key: &'static str,
    icon: &'static str,
    description: &'static str,
}

const HOME_CARDS: [HomeCard; 5] = [
    HomeCard {
        key: keys::PRODUCTS,
        icon: "package",
        description: "Publicaciones, stock y estado en Mercado Libre.",
    },
    HomeCard {
        key: keys::WAREHOUSES,
        icon: "warehouse",
        description: "Bodegas y el stock guardado en cada una.",
    },
    HomeCard {
        key: keys::CONNECTIONS,
        icon: "plug",
        description: "Cuentas de vendedor vinculadas y vigencia del token.",
    },
    HomeCard {
        key: keys::REPORTS,
        icon: "chart",
        description: "Resumen de ventas y reportes por período.",
    },
    HomeCard {
        key: keys::INFORMATION,
        icon: "info",
        description: "Estado del servicio y de la API de sincronización.",
    },
];

#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    // Nothing on this page works without a seller account.
    Effect::new(move |_| {
        if ctx.selected_connection.get().is_none() {
            ctx.open_registered(keys::CONNECTIONS);
        }
    });

    view! {
        <PageFrame page_id="sys_home--system" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Bienvenido"</h1>
                </div>
                <div class="page__header-right">
                    {move || ctx.selected_connection.get().map(|c| view! {
                        <span class="page__subtitle">{format!("Conexión: {}", c.nickname)}</span>
                    })}
                </div>
            </div>
            <div class="page__content">
                <div class="card-grid">
                    {HOME_CARDS.iter().map(|card| {
                        let key = card.key;
                        view! {
                            <div class="home-card" on:click=move |_| ctx.open_registered(key)>
                                <div class="home-card__icon">{icon(card.icon)}</div>
                                <div class="home-card__title">{tab_label_for_key(key)}</div>
                                <div class="home-card__text">{card.description}</div>
                            </div>
                        }
                    }).collect_view()}
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_open_registered_tabs() {
        let titles: Vec<_> = HOME_CARDS.iter().map(|c| tab_label_for_key(c.key)).collect();
        assert_eq!(
            titles,
            ["Productos", "Bodegas", "Conexiones a ML", "Reportes", "Información"]
        );
    }
}
