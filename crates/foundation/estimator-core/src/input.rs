//! The eight-field housing record sent to both endpoints.

use crate::Feature;
use serde::{Deserialize, Serialize};

/// Housing record. Fields may hold NaN; serde_json writes those as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseInput {
    pub med_inc: f64,
    pub house_age: f64,
    pub ave_rooms: f64,
    pub ave_bedrooms: f64,
    pub population: f64,
    pub ave_occup: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl BaseInput {
    /// Build a record by asking for each feature's value
    pub fn from_fn(mut value: impl FnMut(Feature) -> f64) -> Self {
        Self {
            med_inc: value(Feature::MedInc),
            house_age: value(Feature::HouseAge),
            ave_rooms: value(Feature::AveRooms),
            ave_bedrooms: value(Feature::AveBedrooms),
            population: value(Feature::Population),
            ave_occup: value(Feature::AveOccup),
            latitude: value(Feature::Latitude),
            longitude: value(Feature::Longitude),
        }
    }

    /// A mid-range district in southern California
    pub fn sample() -> Self {
        Self {
            med_inc: 4.0,
            house_age: 20.0,
            ave_rooms: 5.0,
            ave_bedrooms: 1.0,
            population: 1000.0,
            ave_occup: 3.0,
            latitude: 34.0,
            longitude: -118.0,
        }
    }

    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::MedInc => self.med_inc,
            Feature::HouseAge => self.house_age,
            Feature::AveRooms => self.ave_rooms,
            Feature::AveBedrooms => self.ave_bedrooms,
            Feature::Population => self.population,
            Feature::AveOccup => self.ave_occup,
            Feature::Latitude => self.latitude,
            Feature::Longitude => self.longitude,
        }
    }

    pub fn set(&mut self, feature: Feature, value: f64) {
        let slot = match feature {
            Feature::MedInc => &mut self.med_inc,
            Feature::HouseAge => &mut self.house_age,
            Feature::AveRooms => &mut self.ave_rooms,
            Feature::AveBedrooms => &mut self.ave_bedrooms,
            Feature::Population => &mut self.population,
            Feature::AveOccup => &mut self.ave_occup,
            Feature::Latitude => &mut self.latitude,
            Feature::Longitude => &mut self.longitude,
        };
        *slot = value;
    }

    /// Values in backend feature order
    pub fn values(&self) -> [f64; 8] {
        Feature::ALL.map(|feature| self.get(feature))
    }

    pub fn has_non_numeric(&self) -> bool {
        self.values().iter().any(|v| v.is_nan())
    }
}

impl Default for BaseInput {
    fn default() -> Self {
        Self::sample()
    }
}
