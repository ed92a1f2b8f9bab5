use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn maps_link(&self) -> String {
        format!("https://www.google.com/maps?q={},{}", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyAlert {
    pub triggering_user: String,
    pub location: Location,
    pub contacts_notified: usize,
}
