use crate::system::auth::storage::get_local_storage;
use contracts::domain::a001_connection::SelectedConnection;

const SELECTED_CONNECTION_KEY: &str = "selected_connection";

pub fn load_selected() -> Option<SelectedConnection> {
    let json = get_local_storage()?
        .get_item(SELECTED_CONNECTION_KEY)
        .ok()??;
    serde_json::from_str(&json).ok()
}

pub fn save_selected(selection: &SelectedConnection) {
    if let (Some(storage), Ok(json)) = (get_local_storage(), serde_json::to_string(selection)) {
        let _ = storage.set_item(SELECTED_CONNECTION_KEY, &json);
    }
}

pub fn clear_selected() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(SELECTED_CONNECTION_KEY);
    }
}
