use contracts::system::auth::UserInfo;
use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "auth_access_token";
const USER_INFO_KEY: &str = "auth_user_info";

pub(crate) fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

pub fn save_access_token(token: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(ACCESS_TOKEN_KEY, token);
    }
}

pub fn get_access_token() -> Option<String> {
    get_local_storage()?
        .get_item(ACCESS_TOKEN_KEY)
        .ok()?
        .filter(|t| !t.is_empty())
}

pub fn save_user_info(user: &UserInfo) {
    if let (Some(storage), Ok(json)) = (get_local_storage(), serde_json::to_string(user)) {
        let _ = storage.set_item(USER_INFO_KEY, &json);
    }
}

pub fn get_user_info() -> Option<UserInfo> {
    let json = get_local_storage()?.get_item(USER_INFO_KEY).ok()??;
    serde_json::from_str(&json).ok()
}

pub fn clear_tokens() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(ACCESS_TOKEN_KEY);
        let _ = storage.remove_item(USER_INFO_KEY);
    }
}
