use crate::layout::modal_service::Modal;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlIFrameElement;

pub const PRINT_PREVIEW_MODAL: &str = "d402_print_preview";

/// Report rendered into an iframe through `srcdoc`; printing uses the frame's own window.
#[component]
pub fn PrintPreview(#[prop(into)] html: Signal<String>) -> impl IntoView {
    let iframe_element = StoredValue::new_local(None::<HtmlIFrameElement>);
    let (iframe_loaded, set_iframe_loaded) = signal(false);

    let print = move |_| {
        let window = iframe_element.with_value(|f| f.as_ref().and_then(|f| f.content_window()));
        match window {
            Some(w) => {
                if let Err(e) = w.print() {
                    log::error!("print failed: {:?}", e);
                }
            }
            None => log::warn!("print preview not ready"),
        }
    };

    view! {
        <Modal id=PRINT_PREVIEW_MODAL title="Vista previa del reporte">
            <div class="print-preview">
                <Flex justify=FlexJustify::End>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || !iframe_loaded.get())
                        on_click=print
                    >
                        "Imprimir / Guardar PDF"
                    </Button>
                </Flex>
                <iframe
                    class="print-preview__frame"
                    srcdoc=move || html.get()
                    on:load=move |ev| {
                        let iframe = ev
                            .target()
                            .and_then(|t| t.dyn_into::<HtmlIFrameElement>().ok());
                        iframe_element.set_value(iframe);
                        set_iframe_loaded.set(true);
                    }
                ></iframe>
            </div>
        </Modal>
    }
}
