//! The eight model inputs, in the order the backend expects them.

use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    #[default]
    MedInc,
    HouseAge,
    AveRooms,
    AveBedrooms,
    Population,
    AveOccup,
    Latitude,
    Longitude,
}

impl Feature {
    pub const ALL: [Feature; 8] = [
        Feature::MedInc,
        Feature::HouseAge,
        Feature::AveRooms,
        Feature::AveBedrooms,
        Feature::Population,
        Feature::AveOccup,
        Feature::Latitude,
        Feature::Longitude,
    ];

    /// Wire name, as used in JSON bodies and `feature_name`
    pub fn name(&self) -> &'static str {
        match self {
            Feature::MedInc => "med_inc",
            Feature::HouseAge => "house_age",
            Feature::AveRooms => "ave_rooms",
            Feature::AveBedrooms => "ave_bedrooms",
            Feature::Population => "population",
            Feature::AveOccup => "ave_occup",
            Feature::Latitude => "latitude",
            Feature::Longitude => "longitude",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Feature::MedInc => "Ingresos medios (decenas de miles $)",
            Feature::HouseAge => "Edad media de las casas",
            Feature::AveRooms => "Habitaciones medias",
            Feature::AveBedrooms => "Dormitorios medios",
            Feature::Population => "Población",
            Feature::AveOccup => "Ocupantes medios",
            Feature::Latitude => "Latitud",
            Feature::Longitude => "Longitud",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Feature::MedInc => 0,
            Feature::HouseAge => 1,
            Feature::AveRooms => 2,
            Feature::AveBedrooms => 3,
            Feature::Population => 4,
            Feature::AveOccup => 5,
            Feature::Latitude => 6,
            Feature::Longitude => 7,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|feature| feature.name() == wanted)
            .ok_or_else(|| CoreError::UnknownFeature(s.to_string()))
    }
}
