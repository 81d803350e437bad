//! Sidebar with collapsible menu groups.

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{keys, tab_label_for_key};
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<(&'static str, &'static str, &'static str)>, // (tab key, label, icon)
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "sync",
            label: "Sincronización",
            icon: "refresh",
            items: vec![
                (keys::HOME, tab_label_for_key(keys::HOME), "home"),
                (keys::CONNECTIONS, tab_label_for_key(keys::CONNECTIONS), "plug"),
            ],
        },
        MenuGroup {
            id: "catalog",
            label: "Catálogo",
            icon: "package",
            items: vec![
                (keys::PRODUCTS, tab_label_for_key(keys::PRODUCTS), "package"),
                (keys::PRODUCT_WIZARD, tab_label_for_key(keys::PRODUCT_WIZARD), "plus"),
                (keys::WAREHOUSES, tab_label_for_key(keys::WAREHOUSES), "warehouse"),
            ],
        },
        MenuGroup {
            id: "reports",
            label: "Reportes",
            icon: "chart",
            items: vec![(keys::REPORTS, tab_label_for_key(keys::REPORTS), "chart")],
        },
        MenuGroup {
            id: "operations",
            label: "Operación",
            icon: "truck",
            items: vec![
                (keys::SHIPMENTS, tab_label_for_key(keys::SHIPMENTS), "truck"),
                (keys::POINT_OF_SALE, tab_label_for_key(keys::POINT_OF_SALE), "cart"),
            ],
        },
        MenuGroup {
            id: "system",
            label: "Sistema",
            icon: "settings",
            items: vec![(keys::INFORMATION, tab_label_for_key(keys::INFORMATION), "info")],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let expanded_groups = RwSignal::new(
        get_menu_groups()
            .iter()
            .map(|g| g.id.to_string())
            .collect::<Vec<_>>(),
    );

    view! {
        <div class="app-sidebar__content">
            {get_menu_groups().into_iter().map(|group| {
                let group_id = group.id.to_string();
                let group_id_for_exp = group_id.clone();
                let group_id_for_show = group_id.clone();
                let items_stored = StoredValue::new(group.items.clone());

                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            style:padding-left="12px"
                            on:click=move |_| {
                                let gid = group_id.clone();
                                expanded_groups.update(move |items| {
                                    if let Some(pos) = items.iter().position(|x| x == &gid) {
                                        items.remove(pos);
                                    } else {
                                        items.push(gid);
                                    }
                                });
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=move || expanded_groups.get().contains(&group_id_for_exp)
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>

                        <Show when=move || expanded_groups.get().contains(&group_id_for_show)>
                            <div class="app-sidebar__children">
                                {items_stored.get_value().into_iter().map(|(id, label, icon_name)| {
                                    view! {
                                        <div
                                            class="app-sidebar__item"
                                            class:app-sidebar__item--active=move || {
                                                ctx.active.get().as_deref() == Some(id)
                                            }
                                            style:padding-left="10px"
                                            on:click=move |_| ctx.open_tab(id, label)
                                        >
                                            <div class="app-sidebar__item-content">
                                                {icon(icon_name)}
                                                <span>{label}</span>
                                            </div>
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_menu_item_has_a_title() {
        for group in get_menu_groups() {
            for (key, label, _) in group.items {
                assert!(!label.is_empty(), "missing label for {key}");
            }
        }
    }
}
