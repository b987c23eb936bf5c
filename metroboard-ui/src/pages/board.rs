//! Board Page
//!
//! Main page: station picker plus the live arrival board.

use leptos::*;

use crate::components::{ArrivalBoard, Loading, StationPicker};
use crate::state::global::GlobalState;

/// Arrival board page component
#[component]
pub fn Board() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // Trains filtered to the selected station, or everything when no
    // station is picked
    let state_for_trains = state.clone();
    let visible_trains = create_memo(move |_| {
        let trains = state_for_trains.trains.get();
        match state_for_trains.selected_station.get() {
            Some(code) => trains
                .into_iter()
                .filter(|t| t.location_code == code)
                .collect::<Vec<_>>(),
            None => trains,
        }
    });

    let state_for_title = state.clone();
    let title = move || {
        let selected = state_for_title.selected_station.get();
        selected
            .and_then(|code| {
                state_for_title
                    .stations
                    .get()
                    .into_iter()
                    .find(|s| s.code == code)
                    .map(|s| s.name)
            })
            .unwrap_or_else(|| "All stations".to_string())
    };

    let state_for_loading = state.clone();
    let state_for_error = state.clone();

    view! {
        <div class="space-y-6">
            // Page header
            <div class="flex flex-col md:flex-row md:items-center md:justify-between gap-4">
                <div>
                    <h1 class="text-3xl font-bold">{title}</h1>
                    <p class="text-gray-400 mt-1">"Next train arrivals"</p>
                </div>

                <StationPicker />
            </div>

            // Error banner
            {move || {
                state_for_error.error.get().map(|message| view! {
                    <div class="bg-red-900/50 border border-red-700 text-red-200 rounded-lg px-4 py-3">
                        {message}
                    </div>
                })
            }}

            // Board
            {move || {
                if state_for_loading.loading.get() {
                    view! { <Loading /> }.into_view()
                } else {
                    view! { <ArrivalBoard trains=visible_trains /> }.into_view()
                }
            }}
        </div>
    }
}
