//! Kinds of loanable media.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Enumerated media type of a catalog item.
///
/// `Display` renders the variant name exactly (`Book`, `DVD`, `VHS`); error
/// messages depend on this spelling. Deserialization goes through `FromStr`, so
/// catalog seeds may spell the type in any case.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ItemType {
    Book,
    #[allow(clippy::upper_case_acronyms)]
    DVD,
    #[allow(clippy::upper_case_acronyms)]
    VHS,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown item type: {0:?}")]
pub struct ParseItemTypeError(pub String);

impl ItemType {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::Book => "Book",
            ItemType::DVD => "DVD",
            ItemType::VHS => "VHS",
        }
    }
}

impl core::fmt::Display for ItemType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for ItemType {
    type Err = ParseItemTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "book" => Ok(ItemType::Book),
            "dvd" => Ok(ItemType::DVD),
            "vhs" => Ok(ItemType::VHS),
            _ => Err(ParseItemTypeError(s.to_string())),
        }
    }
}

impl TryFrom<String> for ItemType {
    type Error = ParseItemTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_variant_name() {
        assert_eq!(ItemType::Book.to_string(), "Book");
        assert_eq!(ItemType::DVD.to_string(), "DVD");
        assert_eq!(ItemType::VHS.to_string(), "VHS");
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("dvd".parse::<ItemType>(), Ok(ItemType::DVD));
        assert_eq!(" Vhs ".parse::<ItemType>(), Ok(ItemType::VHS));
        assert_eq!(
            "laserdisc".parse::<ItemType>(),
            Err(ParseItemTypeError("laserdisc".to_string()))
        );
    }

    #[test]
    fn json_round_trips_through_variant_name() {
        assert_eq!(serde_json::to_string(&ItemType::DVD).unwrap(), "\"DVD\"");
        let parsed: ItemType = serde_json::from_str("\"book\"").unwrap();
        assert_eq!(parsed, ItemType::Book);
        assert!(serde_json::from_str::<ItemType>("\"Laserdisc\"").is_err());
    }
}
