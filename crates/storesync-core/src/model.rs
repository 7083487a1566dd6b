use serde::{Deserialize, Serialize};

/// Deployment mode of the sync job.
///
/// `Dev` additionally bootstraps the destination schema on startup;
/// `Prod` assumes the table already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Prod,
    Dev,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Prod => write!(f, "prod"),
            Mode::Dev => write!(f, "dev"),
        }
    }
}

/// Lifecycle status of a store.
///
/// The source reports free-form status codes; anything outside the known set
/// degrades to `Undefined` during normalization rather than failing the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StoreStatus {
    Dead,
    Closed,
    Refranchised,
    Open,
    New,
    PreOpening,
    #[default]
    Undefined,
}

impl StoreStatus {
    /// Maps a source status code to its canonical variant.
    ///
    /// Returns `None` for unrecognized codes so the caller can decide how to
    /// degrade (the normalizer maps `None` to [`StoreStatus::Undefined`]).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Dead" => Some(StoreStatus::Dead),
            "Closed" => Some(StoreStatus::Closed),
            "Refranchised" => Some(StoreStatus::Refranchised),
            "Open" => Some(StoreStatus::Open),
            "New" => Some(StoreStatus::New),
            "PreOpening" => Some(StoreStatus::PreOpening),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreStatus::Dead => "Dead",
            StoreStatus::Closed => "Closed",
            StoreStatus::Refranchised => "Refranchised",
            StoreStatus::Open => "Open",
            StoreStatus::New => "New",
            StoreStatus::PreOpening => "PreOpening",
            StoreStatus::Undefined => "Undefined",
        }
    }
}

/// Canonical store record.
///
/// Only constructed by the normalizer after `number`, `name`, and `address`
/// pass validation. Optional attributes default to the empty string, never
/// null. Discarded after a successful write; the destination table is the
/// system of record, keyed by `number`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Store {
    pub number: i64,
    pub name: String,
    pub address: String,
    pub mall: String,
    pub company: String,
    pub brand: String,
    pub format: String,
    pub status: StoreStatus,
    pub temporary_closed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_code_maps_known_statuses() {
        assert_eq!(StoreStatus::from_code("Dead"), Some(StoreStatus::Dead));
        assert_eq!(StoreStatus::from_code("Closed"), Some(StoreStatus::Closed));
        assert_eq!(
            StoreStatus::from_code("Refranchised"),
            Some(StoreStatus::Refranchised)
        );
        assert_eq!(StoreStatus::from_code("Open"), Some(StoreStatus::Open));
        assert_eq!(StoreStatus::from_code("New"), Some(StoreStatus::New));
        assert_eq!(
            StoreStatus::from_code("PreOpening"),
            Some(StoreStatus::PreOpening)
        );
    }

    #[test]
    fn from_code_rejects_unknown_codes() {
        assert_eq!(StoreStatus::from_code("Demolished"), None);
        assert_eq!(StoreStatus::from_code(""), None);
        assert_eq!(StoreStatus::from_code("open"), None);
    }

    #[test]
    fn default_status_is_undefined() {
        assert_eq!(StoreStatus::default(), StoreStatus::Undefined);
        assert_eq!(Store::default().status, StoreStatus::Undefined);
    }

    #[test]
    fn as_str_round_trips_known_codes() {
        for status in [
            StoreStatus::Dead,
            StoreStatus::Closed,
            StoreStatus::Refranchised,
            StoreStatus::Open,
            StoreStatus::New,
            StoreStatus::PreOpening,
        ] {
            assert_eq!(StoreStatus::from_code(status.as_str()), Some(status));
        }
    }
}
