use crate::shared::icons::icon;
use leptos::prelude::*;

/// One modal at a time, addressed by id.
#[derive(Clone, Copy)]
pub struct ModalService {
    open_id: RwSignal<Option<String>>,
}

impl ModalService {
    pub fn new() -> Self {
        Self {
            open_id: RwSignal::new(None),
        }
    }

    pub fn show(&self, id: &str) {
        self.open_id.set(Some(id.to_string()));
    }

    pub fn hide(&self) {
        self.open_id.set(None);
    }

    /// Reactive: re-runs the caller when the open modal changes.
    pub fn is_open(&self, id: &str) -> bool {
        self.open_id.with(|open| open.as_deref() == Some(id))
    }
}

impl Default for ModalService {
    fn default() -> Self {
        Self::new()
    }
}

/// Overlay with a title bar. Renders its children only while `id` is open.
///
/// ```rust
/// let modal = use_context::<ModalService>().expect("ModalService not provided in context");
/// modal.show("a003_product_detail");
///
/// view! {
///     <Modal id="a003_product_detail" title="Detalle">
///         <MyComponent />
///     </Modal>
/// }
/// ```
#[component]
pub fn Modal(
    #[prop(into)] id: String,
    #[prop(into)] title: Signal<String>,
    children: ChildrenFn,
) -> impl IntoView {
    let modal = use_context::<ModalService>().expect("ModalService not provided in context");
    let id = StoredValue::new(id);

    view! {
        {move || {
            if modal.is_open(&id.get_value()) {
                view! {
                    <div
                        class="modal-overlay"
                        on:click=move |_| modal.hide()
                    >
                        <div
                            class="modal-content"
                            on:click=|e| e.stop_propagation()
                        >
                            <div class="modal-header">
                                <h3 class="modal-title">{move || title.get()}</h3>
                                <button class="modal-close" title="Cerrar" on:click=move |_| modal.hide()>
                                    {icon("x")}
                                </button>
                            </div>
                            <div class="modal-body">
                                {children()}
                            </div>
                        </div>
                    </div>
                }.into_any()
            } else {
                view! { <></> }.into_any()
            }
        }}
    }
}
