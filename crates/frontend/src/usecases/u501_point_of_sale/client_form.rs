use contracts::usecases::u501_point_of_sale::{
    normalize_rut, Client, ClientFormError, ClientKind, NewClientForm,
};
use leptos::prelude::*;
use thaw::*;

/// Field signals of the new-client form.
#[derive(Clone, Copy)]
pub struct ClientFormState {
    pub kind: RwSignal<String>,
    pub foreign: RwSignal<bool>,
    pub rut: RwSignal<String>,
    pub business_name: RwSignal<String>,
    pub line_of_business: RwSignal<String>,
    pub first_names: RwSignal<String>,
    pub last_names: RwSignal<String>,
    pub address: RwSignal<String>,
    pub commune: RwSignal<String>,
    pub city: RwSignal<String>,
    pub region: RwSignal<String>,
}

impl ClientFormState {
    pub fn new() -> Self {
        Self {
            kind: RwSignal::new(ClientKind::Company.as_str().to_string()),
            foreign: RwSignal::new(false),
            rut: RwSignal::new(String::new()),
            business_name: RwSignal::new(String::new()),
            line_of_business: RwSignal::new(String::new()),
            first_names: RwSignal::new(String::new()),
            last_names: RwSignal::new(String::new()),
            address: RwSignal::new(String::new()),
            commune: RwSignal::new(String::new()),
            city: RwSignal::new(String::new()),
            region: RwSignal::new(String::new()),
        }
    }

    pub fn kind(&self) -> ClientKind {
        self.kind.with(|k| ClientKind::parse(k))
    }

    pub fn to_form(&self) -> NewClientForm {
        NewClientForm {
            kind: self.kind(),
            foreign: self.foreign.get_untracked(),
            rut: normalize_rut(&self.rut.get_untracked()),
            business_name: self.business_name.get_untracked(),
            line_of_business: self.line_of_business.get_untracked(),
            first_names: self.first_names.get_untracked(),
            last_names: self.last_names.get_untracked(),
            address: self.address.get_untracked(),
            commune: self.commune.get_untracked(),
            city: self.city.get_untracked(),
            region: self.region.get_untracked(),
        }
    }

    pub fn reset(&self) {
        for field in [
            self.rut,
            self.business_name,
            self.line_of_business,
            self.first_names,
            self.last_names,
            self.address,
            self.commune,
            self.city,
            self.region,
        ] {
            field.set(String::new());
        }
        self.foreign.set(false);
    }
}

#[component]
fn Field(label: &'static str, value: RwSignal<String>) -> impl IntoView {
    view! {
        <div class="form__group">
            <label class="form__label">{label}</label>
            <Input value=value />
        </div>
    }
}

/// New-client form. `on_saved` receives the registered client.
#[component]
pub fn ClientForm(
    existing: Signal<Vec<Client>>,
    on_saved: Callback<Client>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let state = ClientFormState::new();
    let (error, set_error) = signal(None::<ClientFormError>);

    let save = move |_| {
        let form = state.to_form();
        match existing.with_untracked(|clients| form.into_client(clients)) {
            Ok(client) => {
                set_error.set(None);
                state.reset();
                on_saved.run(client);
            }
            Err(e) => set_error.set(Some(e)),
        }
    };

    view! {
        <div class="form client-form">
            <Flex gap=FlexGap::Small align=FlexAlign::End>
                <div class="form__group">
                    <label class="form__label">"Tipo de cliente"</label>
                    <Select value=state.kind>
                        <option value="empresa">"Empresa"</option>
                        <option value="persona">"Persona"</option>
                    </Select>
                </div>
                <Checkbox checked=state.foreign label="Cliente extranjero" />
            </Flex>

            <Show when=move || !state.foreign.get()>
                <div class="form__group">
                    <label class="form__label">"RUT"</label>
                    <input
                        class="form__input"
                        placeholder="12.345.678-9"
                        prop:value=move || state.rut.get()
                        on:input=move |ev| state.rut.set(event_target_value(&ev))
                        on:blur=move |_| state.rut.update(|r| *r = normalize_rut(r))
                    />
                </div>
            </Show>

            <Show
                when=move || state.kind() == ClientKind::Company
                fallback=move || view! {
                    <Field label="Nombres" value=state.first_names />
                    <Field label="Apellidos" value=state.last_names />
                }
            >
                <Field label="Razón social" value=state.business_name />
                <Field label="Giro" value=state.line_of_business />
            </Show>

            <Field label="Dirección" value=state.address />
            <Flex gap=FlexGap::Small>
                <Field label="Comuna" value=state.commune />
                <Field label="Ciudad" value=state.city />
                <Field label="Región" value=state.region />
            </Flex>

            {move || error.get().map(|e| view! { <span class="form__error">{e.to_string()}</span> })}

            <Flex gap=FlexGap::Small>
                <Button appearance=ButtonAppearance::Primary on_click=save>
                    "Guardar cliente"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    "Cancelar"
                </Button>
            </Flex>
        </div>
    }
}
