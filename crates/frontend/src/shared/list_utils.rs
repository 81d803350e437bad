//! Search box, debouncing and sort-header helpers shared by list pages.

use crate::shared::icons::icon;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// Runs only the last of a burst of calls, `delay_ms` after it.
#[derive(Clone, Copy)]
pub struct Debouncer {
    pending: StoredValue<Option<Timeout>, LocalStorage>,
    delay_ms: u32,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            pending: StoredValue::new_local(None),
            delay_ms,
        }
    }

    /// Replacing the pending timeout drops, and so cancels, the previous one.
    pub fn call(&self, f: impl FnOnce() + 'static) {
        self.pending
            .set_value(Some(Timeout::new(self.delay_ms, f)));
    }

    pub fn cancel(&self) {
        self.pending.set_value(None);
    }
}

/// Tickets for async loads. Only the ticket of the latest `begin` is current,
/// so a response that was overtaken is dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestSeq(u64);

impl RequestSeq {
    pub fn begin(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    /// Makes every ticket handed out so far stale.
    pub fn invalidate(&mut self) {
        self.0 += 1;
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0 == ticket
    }
}

/// `begin` on a stored counter.
pub fn begin_request(seq: StoredValue<RequestSeq>) -> u64 {
    let mut current = seq.get_value();
    let ticket = current.begin();
    seq.set_value(current);
    ticket
}

pub fn is_current_request(seq: StoredValue<RequestSeq>, ticket: u64) -> bool {
    seq.get_value().is_current(ticket)
}

/// Text input that reports its value after the user stops typing.
#[component]
pub fn SearchInput(
    /// Current filter value, used for the highlight.
    #[prop(into)]
    value: Signal<String>,
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)]
    placeholder: String,
    #[prop(default = 300)]
    delay_ms: u32,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Buscar...".to_string()
    } else {
        placeholder
    };

    let (input_value, set_input_value) = signal(value.get_untracked());
    let debouncer = Debouncer::new(delay_ms);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        debouncer.call(move || on_change.run(new_value));
    };

    let clear_filter = move |_| {
        debouncer.cancel();
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            {icon("search")}
            <input
                type="text"
                placeholder=placeholder
                class:search-input--active=move || !value.get().trim().is_empty()
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear_filter title="Limpiar">
                    {icon("x")}
                </button>
            </Show>
        </div>
    }
}

pub fn get_sort_class(is_sorted: bool) -> &'static str {
    if is_sorted {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_latest_ticket_is_current() {
        let mut seq = RequestSeq::default();
        let first = seq.begin();
        assert!(seq.is_current(first));
        let second = seq.begin();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn invalidate_drops_the_ticket_in_flight() {
        let mut seq = RequestSeq::default();
        let ticket = seq.begin();
        seq.invalidate();
        assert!(!seq.is_current(ticket));
        let next = seq.begin();
        assert!(seq.is_current(next));
    }
}
