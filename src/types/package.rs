use serde::{Deserialize, Serialize};

/// Row payload for `trip_packages`. Independent of the visa tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTripPackage {
    pub destination: String,
    pub adults: i64,
    pub children: i64,
    pub infants: i64,
    pub departure_airport: String,
    pub budget: f64,
    pub special_requests: String,
    pub contact_phone: String,
}
