//! Station Picker Component
//!
//! Dropdown selecting which station the board is filtered to.

use leptos::*;

use crate::state::global::GlobalState;

/// Station selection dropdown
#[component]
pub fn StationPicker() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let state_for_change = state.clone();
    let on_change = move |ev| {
        let value = event_target_value(&ev);
        if value.is_empty() {
            state_for_change.selected_station.set(None);
        } else {
            state_for_change.selected_station.set(Some(value));
        }
    };

    view! {
        <select
            class="bg-gray-800 border border-gray-700 rounded-lg px-4 py-2 text-white w-full md:w-auto"
            on:change=on_change
        >
            <option value="">"All stations"</option>
            {move || {
                state
                    .stations
                    .get()
                    .into_iter()
                    .map(|station| {
                        view! {
                            <option value=station.code.clone()>{station.name.clone()}</option>
                        }
                    })
                    .collect_view()
            }}
        </select>
    }
}
