use serde::{Deserialize, Serialize};

use crate::db::StoreError;

/// Which channel authored a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordSource {
    #[serde(rename = "whatsapp")]
    Whatsapp,
    #[serde(rename = "dashboard")]
    Dashboard,
}

impl RecordSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Whatsapp => "whatsapp",
            Self::Dashboard => "dashboard",
        }
    }
}

impl std::str::FromStr for RecordSource {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "whatsapp" => Ok(Self::Whatsapp),
            "dashboard" => Ok(Self::Dashboard),
            _ => Err(StoreError::InvalidEnum {
                field: "source".into(),
                value: s.into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn source_round_trips_through_str() {
        assert_eq!(
            RecordSource::from_str("whatsapp").unwrap(),
            RecordSource::Whatsapp
        );
        assert_eq!(RecordSource::Dashboard.as_str(), "dashboard");
    }

    #[test]
    fn source_serializes_lowercase() {
        let json = serde_json::to_string(&RecordSource::Whatsapp).unwrap();
        assert_eq!(json, "\"whatsapp\"");
    }

    #[test]
    fn unknown_source_is_invalid_enum() {
        let err = RecordSource::from_str("telegram").unwrap_err();
        assert!(matches!(err, StoreError::InvalidEnum { .. }));
    }
}
