use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::system::auth::{api, context::use_auth};

/// Client-side check before posting the credentials.
fn credentials_error(email: &str, password: &str) -> Option<&'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Some("Ingresa tu correo y contraseña.");
    }
    let valid_shape = email
        .split_once('@')
        .is_some_and(|(user, domain)| !user.is_empty() && domain.contains('.'));
    (!valid_shape).then_some("El correo no es válido.")
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_auth();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (error, set_error) = signal(None::<String>);
    let (loading, set_loading) = signal(false);

    let submit = move || {
        let (email_val, password_val) = (email.get_untracked(), password.get_untracked());
        if let Some(message) = credentials_error(&email_val, &password_val) {
            set_error.set(Some(message.to_string()));
            return;
        }
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::login(email_val.trim().to_string(), password_val).await {
                Ok(response) => session.complete_login(response),
                Err(e) => {
                    log::warn!("login failed: {}", e);
                    set_error.set(Some(e.user_message("Correo o contraseña incorrectos.")));
                }
            }
            set_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <form
                class="login-box"
                on:submit=move |ev: leptos::ev::SubmitEvent| {
                    ev.prevent_default();
                    submit();
                }
            >
                <h1>"Multi Stock Sync"</h1>
                <h2>"Iniciar sesión"</h2>

                {move || error.get().map(|e| view! { <div class="error-message">{e}</div> })}

                <Flex vertical=true gap=FlexGap::Medium>
                    <div class="form__group">
                        <label class="form__label">"Correo electrónico"</label>
                        <Input value=email placeholder="usuario@empresa.cl" />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Contraseña"</label>
                        <Input value=password input_type=InputType::Password />
                    </div>
                    <button type="submit" class="btn-primary" disabled=move || loading.get()>
                        {move || if loading.get() { "Ingresando..." } else { "Ingresar" }}
                    </button>
                </Flex>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_rejected() {
        assert_eq!(credentials_error(" ", "x"), Some("Ingresa tu correo y contraseña."));
        assert_eq!(credentials_error("a@b.cl", ""), Some("Ingresa tu correo y contraseña."));
    }

    #[test]
    fn email_needs_user_and_domain() {
        assert_eq!(credentials_error("ana", "secret"), Some("El correo no es válido."));
        assert_eq!(credentials_error("@empresa.cl", "secret"), Some("El correo no es válido."));
        assert_eq!(credentials_error("ana@empresa.cl", "secret"), None);
    }
}
