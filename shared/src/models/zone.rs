//! Zone Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::util::fold_key;

/// Physical access zone assigned by staff (closed set).
///
/// The stored value is `"Zona N"`; [`Zone::label`] is the text staff see in
/// selectors, exports and emails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(type_name = "access_zone"))]
pub enum Zone {
    #[cfg_attr(feature = "db", sqlx(rename = "Zona 1"))]
    Venue,
    #[cfg_attr(feature = "db", sqlx(rename = "Zona 2"))]
    FieldOfPlay,
    #[cfg_attr(feature = "db", sqlx(rename = "Zona 3"))]
    LocalOrganizingCommittee,
    #[cfg_attr(feature = "db", sqlx(rename = "Zona 4"))]
    Vip,
    #[cfg_attr(feature = "db", sqlx(rename = "Zona 5"))]
    Broadcast,
    #[cfg_attr(feature = "db", sqlx(rename = "Zona 6"))]
    Officials,
    #[cfg_attr(feature = "db", sqlx(rename = "Zona 7"))]
    Media,
    #[cfg_attr(feature = "db", sqlx(rename = "Zona 8"))]
    Volunteers,
    #[cfg_attr(feature = "db", sqlx(rename = "Zona 9"))]
    AllZones,
}

impl Zone {
    pub const ALL: [Zone; 9] = [
        Zone::Venue,
        Zone::FieldOfPlay,
        Zone::LocalOrganizingCommittee,
        Zone::Vip,
        Zone::Broadcast,
        Zone::Officials,
        Zone::Media,
        Zone::Volunteers,
        Zone::AllZones,
    ];

    /// Zone number, 1..=9
    pub const fn number(&self) -> u8 {
        match self {
            Zone::Venue => 1,
            Zone::FieldOfPlay => 2,
            Zone::LocalOrganizingCommittee => 3,
            Zone::Vip => 4,
            Zone::Broadcast => 5,
            Zone::Officials => 6,
            Zone::Media => 7,
            Zone::Volunteers => 8,
            Zone::AllZones => 9,
        }
    }

    /// Stored value
    pub const fn value(&self) -> &'static str {
        match self {
            Zone::Venue => "Zona 1",
            Zone::FieldOfPlay => "Zona 2",
            Zone::LocalOrganizingCommittee => "Zona 3",
            Zone::Vip => "Zona 4",
            Zone::Broadcast => "Zona 5",
            Zone::Officials => "Zona 6",
            Zone::Media => "Zona 7",
            Zone::Volunteers => "Zona 8",
            Zone::AllZones => "Zona 9",
        }
    }

    /// Display label
    pub const fn label(&self) -> &'static str {
        match self {
            Zone::Venue => "Zona 1.Venue",
            Zone::FieldOfPlay => "Zona 2.FOP",
            Zone::LocalOrganizingCommittee => "Zona 3.LOC",
            Zone::Vip => "Zona 4.VIP",
            Zone::Broadcast => "Zona 5.Broadcast",
            Zone::Officials => "Zona 6.Officials",
            Zone::Media => "Zona 7.Media",
            Zone::Volunteers => "Zona 8.Volunteers",
            Zone::AllZones => "Todas las zonas",
        }
    }

    /// Accepts either the stored value or the display label, any casing.
    pub fn parse(value: &str) -> Option<Zone> {
        let key = fold_key(value);
        if key.is_empty() {
            return None;
        }
        Zone::ALL
            .into_iter()
            .find(|z| fold_key(z.value()) == key || fold_key(z.label()) == key)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// Unknown zone value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown zone: {0:?}")]
pub struct ParseZoneError(pub String);

impl FromStr for Zone {
    type Err = ParseZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Zone::parse(s).ok_or_else(|| ParseZoneError(s.to_string()))
    }
}

impl TryFrom<String> for Zone {
    type Error = ParseZoneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Zone> for String {
    fn from(zone: Zone) -> Self {
        zone.value().to_string()
    }
}
