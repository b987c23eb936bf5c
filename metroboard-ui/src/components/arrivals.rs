//! Arrival Board Component
//!
//! Renders live train predictions as board rows, styled per line.

use leptos::*;

use crate::state::global::Train;

/// Badge color classes for a line code
pub fn line_color(code: &str) -> &'static str {
    match code {
        "RD" => "bg-red-600 text-white",
        "OR" => "bg-orange-500 text-white",
        "YL" => "bg-yellow-400 text-gray-900",
        "GR" => "bg-green-600 text-white",
        "BL" => "bg-blue-600 text-white",
        "SV" => "bg-gray-300 text-gray-900",
        _ => "bg-gray-600 text-white",
    }
}

/// Human label for the upstream Min field, which is a number, "ARR",
/// "BRD", or empty
pub fn arrival_label(min: &str) -> String {
    match min {
        "ARR" => "Arriving".to_string(),
        "BRD" => "Boarding".to_string(),
        "" | "---" => "--".to_string(),
        m => format!("{} min", m),
    }
}

/// Live arrival board for a set of trains
#[component]
pub fn ArrivalBoard(#[prop(into)] trains: Signal<Vec<Train>>) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-xl overflow-hidden">
            // Header row
            <div class="grid grid-cols-12 gap-2 px-4 py-2 text-xs uppercase text-gray-400 border-b border-gray-700">
                <span class="col-span-1">"Line"</span>
                <span class="col-span-1">"Cars"</span>
                <span class="col-span-7">"Destination"</span>
                <span class="col-span-3 text-right">"Arrival"</span>
            </div>

            {move || {
                let trains = trains.get();
                if trains.is_empty() {
                    view! {
                        <div class="px-4 py-8 text-center text-gray-400">
                            "No trains reported for this station"
                        </div>
                    }
                    .into_view()
                } else {
                    trains
                        .into_iter()
                        .map(|train| view! { <ArrivalRow train=train /> })
                        .collect_view()
                }
            }}
        </div>
    }
}

/// A single board row
#[component]
fn ArrivalRow(train: Train) -> impl IntoView {
    let color = line_color(&train.line);
    let label = arrival_label(&train.min);

    view! {
        <div class="grid grid-cols-12 gap-2 px-4 py-3 items-center border-b border-gray-700/50">
            <span class=format!("col-span-1 inline-block text-center rounded font-bold text-sm px-2 py-1 {}", color)>
                {train.line.clone()}
            </span>
            <span class="col-span-1 text-gray-400 text-sm">
                {train.car.clone().unwrap_or_else(|| "-".to_string())}
            </span>
            <span class="col-span-7 font-medium">
                {train.destination_name.clone()}
            </span>
            <span class="col-span-3 text-right font-mono text-amber-300">
                {label}
            </span>
        </div>
    }
}
