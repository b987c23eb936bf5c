//! UI Components
//!
//! Reusable Leptos components for the arrival board.

pub mod arrivals;
pub mod loading;
pub mod nav;
pub mod station_picker;

pub use arrivals::ArrivalBoard;
pub use loading::Loading;
pub use nav::Nav;
pub use station_picker::StationPicker;
