use crate::domain::a002_warehouse::api::create_warehouse;
use crate::shared::components::ErrorBanner;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::toast::use_toasts;
use contracts::domain::a002_warehouse::CreateWarehouseRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn build_request(name: &str, location: &str, company_id: &str) -> CreateWarehouseRequest {
    CreateWarehouseRequest {
        name: name.trim().to_string(),
        location: location.trim().to_string(),
        assigned_company_id: company_id.trim().parse().unwrap_or(0),
    }
}

#[component]
#[allow(non_snake_case)]
pub fn WarehouseNew(on_close: Callback<()>) -> impl IntoView {
    let toasts = use_toasts();

    let name = RwSignal::new(String::new());
    let location = RwSignal::new(String::new());
    let company_id = RwSignal::new(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let save = move || {
        let request = build_request(&name.get(), &location.get(), &company_id.get());
        if let Err(e) = request.validate() {
            set_error.set(Some(e.to_string()));
            return;
        }
        set_error.set(None);
        set_saving.set(true);
        spawn_local(async move {
            match create_warehouse(&request).await {
                Ok(_) => {
                    toasts.success(format!("Bodega {} creada correctamente", request.name));
                    on_close.run(());
                }
                Err(e) => {
                    log::error!("create warehouse: {}", e);
                    let message = e.user_message("Error al crear la bodega.");
                    toasts.error(message.clone());
                    set_error.set(Some(message));
                }
            }
            set_saving.set(false);
        });
    };

    view! {
        <PageFrame page_id="a002_warehouse--new" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Nueva Bodega"</h1>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| save() disabled=saving>
                        {icon("check")}
                        " Guardar"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        "Cancelar"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <ErrorBanner message=error />
                <Flex vertical=true gap=FlexGap::Small>
                    <div class="form__group">
                        <label class="form__label">"Nombre"</label>
                        <Input value=name placeholder="Bodega Central" />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Ubicación"</label>
                        <Input value=location placeholder="Santiago" />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"ID de empresa"</label>
                        <Input value=company_id input_type=InputType::Number placeholder="1" />
                    </div>
                </Flex>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_warehouse::WarehouseValidationError;

    #[test]
    fn request_is_trimmed_and_parsed() {
        let req = build_request("  Central ", "Santiago", " 3 ");
        assert_eq!(req.name, "Central");
        assert_eq!(req.assigned_company_id, 3);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn unparsable_company_fails_validation() {
        let req = build_request("Central", "Santiago", "abc");
        assert_eq!(req.validate(), Err(WarehouseValidationError::InvalidCompany));
    }
}
