//! Workspace state shared by every page: open tabs, sidebar and the seller
//! account the marketplace pages work with.

use crate::domain::a001_connection::storage as connection_storage;
use crate::layout::tabs::keys;
use crate::layout::tabs::tab_label_for_key;
use contracts::domain::a001_connection::SelectedConnection;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub title: String,
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub opened: RwSignal<Vec<Tab>>,
    pub active: RwSignal<Option<String>>,
    pub left_open: RwSignal<bool>,
    pub selected_connection: RwSignal<Option<SelectedConnection>>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            opened: RwSignal::new(vec![]),
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
            selected_connection: RwSignal::new(connection_storage::load_selected()),
        }
    }

    /// Restores the tab named by `?active=` and keeps the query in sync afterwards.
    pub fn init_router_integration(&self) {
        if let Some(key) = active_param(&current_search()) {
            let title = match tab_label_for_key(&key) {
                "" => key.clone(),
                label => label.to_string(),
            };
            self.open_tab(&key, &title);
        }

        let active = self.active;
        Effect::new(move |_| {
            if let Some(key) = active.get() {
                replace_active_param(&key);
            }
        });
    }

    /// Adds the tab unless it is already open, then activates it.
    pub fn open_tab(&self, key: &str, title: &str) {
        leptos::logging::log!("open_tab: key='{}', title='{}'", key, title);
        self.opened.update(|tabs| {
            push_unique(tabs, key, title);
        });
        self.activate_tab(key);
    }

    pub fn open_registered(&self, key: &str) {
        self.open_tab(key, tab_label_for_key(key));
    }

    /// Home when a seller account is chosen, the connection picker otherwise.
    pub fn open_start_tab(&self) {
        let key = if self.selected_connection.with_untracked(Option::is_some) {
            keys::HOME
        } else {
            keys::CONNECTIONS
        };
        self.open_registered(key);
    }

    pub fn activate_tab(&self, key: &str) {
        self.active.set(Some(key.to_string()));
    }

    pub fn close_tab(&self, key: &str) {
        let mut next = None;
        self.opened.update(|tabs| {
            let active = self.active.get_untracked();
            next = remove_tab(tabs, key, active.as_deref());
        });
        if let Some(next) = next {
            self.active.set(next);
        }
    }

    pub fn close_all_tabs(&self) {
        self.opened.set(vec![]);
        self.active.set(None);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|open| *open = !*open);
    }

    /// Persists the choice and makes it visible to every page.
    pub fn select_connection(&self, selection: SelectedConnection) {
        connection_storage::save_selected(&selection);
        self.selected_connection.set(Some(selection));
    }

    pub fn clear_connection(&self) {
        connection_storage::clear_selected();
        self.selected_connection.set(None);
    }

    pub fn selected_client_id(&self) -> Option<String> {
        self.selected_connection
            .with_untracked(|sel| sel.as_ref().map(|s| s.client_id.clone()))
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns whether the tab was added.
fn push_unique(tabs: &mut Vec<Tab>, key: &str, title: &str) -> bool {
    if tabs.iter().any(|t| t.key == key) {
        return false;
    }
    tabs.push(Tab {
        key: key.to_string(),
        title: title.to_string(),
    });
    true
}

/// Removes `key`. When it was the active tab, returns the new active one
/// (the last remaining tab, or `None` when nothing is left).
fn remove_tab(tabs: &mut Vec<Tab>, key: &str, active: Option<&str>) -> Option<Option<String>> {
    tabs.retain(|t| t.key != key);
    (active == Some(key)).then(|| tabs.last().map(|t| t.key.clone()))
}

fn current_search() -> String {
    window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

fn replace_active_param(key: &str) {
    let query = serde_qs::to_string(&HashMap::from([("active", key)])).unwrap_or_default();
    let new_url = format!("?{}", query);
    if current_search() == new_url {
        return;
    }
    let Some(history) = window().and_then(|w| w.history().ok()) else {
        return;
    };
    if let Err(e) = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&new_url)) {
        log::warn!("history.replaceState failed: {:?}", e);
    }
}

/// Value of `active` in a `?a=b&active=key` query string.
fn active_param(search: &str) -> Option<String> {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params.get("active").filter(|v| !v.is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys_of(tabs: &[Tab]) -> Vec<&str> {
        tabs.iter().map(|t| t.key.as_str()).collect()
    }

    #[test]
    fn reads_active_tab_from_query() {
        assert_eq!(
            active_param("?active=d403_top_selling_123"),
            Some("d403_top_selling_123".to_string())
        );
        assert_eq!(active_param("?foo=1"), None);
        assert_eq!(active_param(""), None);
    }

    #[test]
    fn opening_twice_keeps_one_tab() {
        let mut tabs = vec![];
        assert!(push_unique(&mut tabs, "a003_products", "Productos"));
        assert!(!push_unique(&mut tabs, "a003_products", "Otro título"));
        assert_eq!(tabs.len(), 1);
        assert_eq!(tabs[0].title, "Productos");
    }

    #[test]
    fn closing_active_tab_activates_last_remaining() {
        let mut tabs = vec![];
        for key in ["home", "a002_warehouses", "a003_products"] {
            push_unique(&mut tabs, key, key);
        }
        assert_eq!(
            remove_tab(&mut tabs, "a002_warehouses", Some("a002_warehouses")),
            Some(Some("a003_products".to_string()))
        );
        assert_eq!(keys_of(&tabs), vec!["home", "a003_products"]);

        assert_eq!(remove_tab(&mut tabs, "home", Some("a003_products")), None);
        assert_eq!(
            remove_tab(&mut tabs, "a003_products", Some("a003_products")),
            Some(None)
        );
        assert!(tabs.is_empty());
    }
}
