use crate::domain::a001_connection::api::fetch_credentials;
use contracts::domain::a001_connection::Connection;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Select element over the enveloped credential list.
///
/// `value` holds the chosen `client_id`; an empty string means nothing chosen.
/// With `auto_select_first` an empty value takes the first connection once loaded.
#[component]
pub fn ConnectionPicker(
    value: RwSignal<String>,
    #[prop(optional, into)] on_change: Option<Callback<String>>,
    #[prop(optional)] auto_select_first: bool,
) -> impl IntoView {
    let (items, set_items) = signal::<Vec<Connection>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let choose = move |client_id: String| {
        value.set(client_id.clone());
        if let Some(cb) = on_change {
            cb.run(client_id);
        }
    };

    spawn_local(async move {
        match fetch_credentials().await {
            Ok(list) => {
                let first = list.first().map(|c| c.client_id.clone());
                set_items.set(list);
                if auto_select_first && value.get_untracked().is_empty() {
                    if let Some(first) = first {
                        choose(first);
                    }
                }
            }
            Err(e) => {
                log::error!("credentials: {}", e);
                set_error.set(Some(e.user_message("No se pudieron cargar las conexiones.")));
            }
        }
    });

    view! {
        <div class="connection-picker">
            <label class="form__label">"Conexión"</label>
            <select
                class="form__select"
                prop:value=move || value.get()
                on:change=move |ev| choose(event_target_value(&ev))
            >
                <option value="">"Selecciona una conexión"</option>
                <For
                    each=move || items.get()
                    key=|c| c.client_id.clone()
                    children=move |c: Connection| {
                        let id = c.client_id.clone();
                        view! { <option value=id>{c.display_label()}</option> }
                    }
                />
            </select>
            {move || error.get().map(|e| view! { <span class="form__error">{e}</span> })}
        </div>
    }
}
