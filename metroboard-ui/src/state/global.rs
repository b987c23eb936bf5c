//! Global Application State
//!
//! Reactive state management using Leptos signals.
//!
//! The station, line, and train types mirror the upstream WMATA payloads,
//! which the backend proxies verbatim; field names keep WMATA's
//! PascalCase on the wire.

use leptos::*;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Stations from the API
    pub stations: RwSignal<Vec<Station>>,
    /// Lines from the API
    pub lines: RwSignal<Vec<Line>>,
    /// Live arrival predictions, replaced wholesale on every update
    pub trains: RwSignal<Vec<Train>>,
    /// Station code the board is filtered to
    pub selected_station: RwSignal<Option<String>>,
    /// WebSocket connection status
    pub ws_connected: RwSignal<bool>,
    /// Timestamp of the last prediction update
    pub last_update: RwSignal<Option<i64>>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
}

/// A rail station
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Station {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "LineCode1", default)]
    pub line_code1: Option<String>,
    #[serde(rename = "LineCode2", default)]
    pub line_code2: Option<String>,
    #[serde(rename = "LineCode3", default)]
    pub line_code3: Option<String>,
    #[serde(rename = "LineCode4", default)]
    pub line_code4: Option<String>,
}

/// A rail line
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Line {
    #[serde(rename = "LineCode")]
    pub code: String,
    #[serde(rename = "DisplayName")]
    pub display_name: String,
    #[serde(rename = "StartStationCode", default)]
    pub start_station_code: Option<String>,
    #[serde(rename = "EndStationCode", default)]
    pub end_station_code: Option<String>,
}

/// A live arrival prediction for one train
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Train {
    /// Number of cars, sometimes missing upstream
    #[serde(rename = "Car", default)]
    pub car: Option<String>,
    #[serde(rename = "Destination", default)]
    pub destination: String,
    #[serde(rename = "DestinationName", default)]
    pub destination_name: String,
    /// Track group ("1" or "2")
    #[serde(rename = "Group", default)]
    pub group: String,
    /// Line code, e.g. "RD"
    #[serde(rename = "Line", default)]
    pub line: String,
    #[serde(rename = "LocationCode", default)]
    pub location_code: String,
    #[serde(rename = "LocationName", default)]
    pub location_name: String,
    /// Minutes to arrival: a number, "ARR", "BRD", or empty
    #[serde(rename = "Min", default)]
    pub min: String,
}

impl GlobalState {
    /// Replace the prediction set and stamp the update time
    pub fn set_trains(&self, trains: Vec<Train>) {
        self.trains.set(trains);
        self.last_update
            .set(Some(chrono::Utc::now().timestamp_millis()));
    }

    /// Trains arriving at the given station, in upstream order
    pub fn trains_at(&self, station_code: &str) -> Vec<Train> {
        self.trains
            .get()
            .into_iter()
            .filter(|t| t.location_code == station_code)
            .collect()
    }

    /// Surface an error message to the UI
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));
    }
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        stations: create_rw_signal(Vec::new()),
        lines: create_rw_signal(Vec::new()),
        trains: create_rw_signal(Vec::new()),
        selected_station: create_rw_signal(None),
        ws_connected: create_rw_signal(false),
        last_update: create_rw_signal(None),
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
    };

    provide_context(state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_train_deserializes_wmata_payload() {
        let json = r#"{
            "Car": "8",
            "Destination": "Shady Gr",
            "DestinationCode": "A15",
            "DestinationName": "Shady Grove",
            "Group": "2",
            "Line": "RD",
            "LocationCode": "A01",
            "LocationName": "Metro Center",
            "Min": "3"
        }"#;

        let train: Train = serde_json::from_str(json).unwrap();
        assert_eq!(train.line, "RD");
        assert_eq!(train.location_code, "A01");
        assert_eq!(train.min, "3");
        assert_eq!(train.car.as_deref(), Some("8"));
    }

    #[test]
    fn test_train_tolerates_missing_fields() {
        let train: Train = serde_json::from_str(r#"{"Line": "GR", "Min": "BRD"}"#).unwrap();
        assert_eq!(train.line, "GR");
        assert_eq!(train.min, "BRD");
        assert!(train.car.is_none());
        assert!(train.location_code.is_empty());
    }

    #[test]
    fn test_station_deserializes() {
        let json = r#"{"Code": "A01", "Name": "Metro Center", "LineCode1": "RD", "LineCode2": null}"#;
        let station: Station = serde_json::from_str(json).unwrap();
        assert_eq!(station.code, "A01");
        assert_eq!(station.line_code1.as_deref(), Some("RD"));
        assert!(station.line_code2.is_none());
    }
}
