//! Area Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::util::fold_key;

/// Participant area chosen at submission time (closed set).
///
/// Stored and serialized as its display label. Parsing accepts any casing
/// and ignores accents, so `"PRODUCCION"` resolves to [`Area::Production`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(type_name = "accreditation_area"))]
pub enum Area {
    #[cfg_attr(feature = "db", sqlx(rename = "Producción"))]
    Production,
    #[cfg_attr(feature = "db", sqlx(rename = "Voluntarios"))]
    Volunteers,
    #[cfg_attr(feature = "db", sqlx(rename = "Auspiciadores"))]
    Sponsors,
    #[cfg_attr(feature = "db", sqlx(rename = "Proveedores"))]
    Suppliers,
    #[cfg_attr(feature = "db", sqlx(rename = "Fan Fest"))]
    FanFest,
    #[cfg_attr(feature = "db", sqlx(rename = "Prensa"))]
    Press,
}

impl Area {
    /// All areas, in the order the submission form lists them
    pub const ALL: [Area; 6] = [
        Area::Production,
        Area::Volunteers,
        Area::Sponsors,
        Area::Suppliers,
        Area::FanFest,
        Area::Press,
    ];

    /// Canonical label (the stored value)
    pub const fn label(&self) -> &'static str {
        match self {
            Area::Production => "Producción",
            Area::Volunteers => "Voluntarios",
            Area::Sponsors => "Auspiciadores",
            Area::Suppliers => "Proveedores",
            Area::FanFest => "Fan Fest",
            Area::Press => "Prensa",
        }
    }

    /// Resolve free text to an area, ignoring case, accents and
    /// surrounding whitespace.
    pub fn parse(value: &str) -> Option<Area> {
        let key = fold_key(value);
        if key.is_empty() {
            return None;
        }
        Area::ALL.into_iter().find(|a| fold_key(a.label()) == key)
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unknown area label
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown area: {0:?}")]
pub struct ParseAreaError(pub String);

impl FromStr for Area {
    type Err = ParseAreaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Area::parse(s).ok_or_else(|| ParseAreaError(s.to_string()))
    }
}

impl TryFrom<String> for Area {
    type Error = ParseAreaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Area> for String {
    fn from(area: Area) -> Self {
        area.label().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_and_accent_insensitive() {
        assert_eq!(Area::parse("PRODUCCION"), Some(Area::Production));
        assert_eq!(Area::parse("producción"), Some(Area::Production));
        assert_eq!(Area::parse("Producción"), Some(Area::Production));
        assert_eq!(Area::parse("  fan fest "), Some(Area::FanFest));
        assert_eq!(Area::parse("PRENSA"), Some(Area::Press));
    }

    #[test]
    fn test_parse_rejects_unknown_and_empty() {
        assert_eq!(Area::parse(""), None);
        assert_eq!(Area::parse("   "), None);
        assert_eq!(Area::parse("Catering"), None);
        assert_eq!(Area::parse("FanFest"), None);
    }

    #[test]
    fn test_every_label_parses_back() {
        for area in Area::ALL {
            assert_eq!(Area::parse(area.label()), Some(area));
        }
    }

    #[test]
    fn test_serde_uses_label() {
        let json = serde_json::to_string(&Area::Production).unwrap();
        assert_eq!(json, "\"Producción\"");

        let area: Area = serde_json::from_str("\"voluntarios\"").unwrap();
        assert_eq!(area, Area::Volunteers);

        assert!(serde_json::from_str::<Area>("\"Backstage\"").is_err());
    }

    #[test]
    fn test_from_str_error_keeps_input() {
        let err = "Backstage".parse::<Area>().unwrap_err();
        assert_eq!(err, ParseAreaError("Backstage".into()));
    }
}
