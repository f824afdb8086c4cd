use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Error returned when a provider identifier does not match any known backend.
#[derive(Debug, Clone, thiserror::Error)]
#[error("provider {0} is not available")]
pub struct UnknownProvider(pub String);

/// Storage backend providers
///
/// This enum is the closed set of storage backends polycloud can address.
/// Selection happens by matching on a variant, never by looking up a
/// constructor in a string-keyed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProviderId {
    Gcp,
    Huawei,
}

impl FromStr for StorageProviderId {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gcp" => Ok(StorageProviderId::Gcp),
            "huawei" => Ok(StorageProviderId::Huawei),
            _ => Err(UnknownProvider(s.to_string())),
        }
    }
}

impl Display for StorageProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageProviderId::Gcp => write!(f, "gcp"),
            StorageProviderId::Huawei => write!(f, "huawei"),
        }
    }
}

/// Vision backend providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisionProviderId {
    Gcp,
}

impl FromStr for VisionProviderId {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gcp" => Ok(VisionProviderId::Gcp),
            _ => Err(UnknownProvider(s.to_string())),
        }
    }
}

impl Display for VisionProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            VisionProviderId::Gcp => write!(f, "gcp"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_provider_parses_case_insensitively() {
        assert_eq!("gcp".parse::<StorageProviderId>().unwrap(), StorageProviderId::Gcp);
        assert_eq!("GCP".parse::<StorageProviderId>().unwrap(), StorageProviderId::Gcp);
        assert_eq!("Gcp".parse::<StorageProviderId>().unwrap(), StorageProviderId::Gcp);
        assert_eq!(
            "Huawei".parse::<StorageProviderId>().unwrap(),
            StorageProviderId::Huawei
        );
    }

    #[test]
    fn unknown_storage_provider_is_rejected() {
        let err = "abcde".parse::<StorageProviderId>().unwrap_err();
        assert_eq!(err.to_string(), "provider abcde is not available");
    }

    #[test]
    fn vision_provider_parses_case_insensitively() {
        assert_eq!("GCP".parse::<VisionProviderId>().unwrap(), VisionProviderId::Gcp);
        assert!("huawei".parse::<VisionProviderId>().is_err());
    }

    #[test]
    fn identifiers_round_trip_through_display() {
        for id in [StorageProviderId::Gcp, StorageProviderId::Huawei] {
            assert_eq!(id.to_string().parse::<StorageProviderId>().unwrap(), id);
        }
    }
}
