use super::view_model::ProductWizardViewModel;
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn ImageList(vm: ProductWizardViewModel) -> impl IntoView {
    let url = RwSignal::new(String::new());
    let images = Memo::new(move |_| vm.draft.with(|d| d.images.clone()));

    let add = move |_| {
        let value = url.get_untracked();
        let added = vm.draft.try_update(|d| d.add_image(&value)).unwrap_or(false);
        if added {
            url.set(String::new());
        }
    };

    view! {
        <h3 class="wizard__section-title">"Imágenes *"</h3>
        <Flex gap=FlexGap::Small align=FlexAlign::End>
            <Input value=url placeholder="https://..." />
            <Button appearance=ButtonAppearance::Secondary on_click=add>
                {icon("image")}
                " Agregar imagen"
            </Button>
        </Flex>
        <div class="image-list">
            {move || images.get().into_iter().enumerate().map(|(index, src)| view! {
                <div class="image-list__item">
                    <img src=src alt="" />
                    <button
                        class="image-list__remove"
                        title="Quitar"
                        on:click=move |_| vm.draft.update(|d| d.remove_image(index))
                    >
                        {icon("x")}
                    </button>
                </div>
            }).collect_view()}
        </div>
        <Show when=move || images.get().is_empty()>
            <span class="form__hint">"Agrega al menos una imagen."</span>
        </Show>
    }
}
