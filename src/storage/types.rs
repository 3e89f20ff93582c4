//! Destination addressing and write modes

use super::error::{StorageError, StorageResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

/// How a write treats whatever already lives at the destination
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum WriteMode {
    /// Replace prior contents entirely
    #[default]
    Overwrite,
    /// Refuse to write if the destination already holds objects
    ErrorIfExists,
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overwrite => write!(f, "overwrite"),
            Self::ErrorIfExists => write!(f, "error-if-exists"),
        }
    }
}

/// Backend-specific location of a result dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Directory on the local filesystem
    File(PathBuf),
    /// Named dataset in an in-process store
    Memory(String),
    /// Key prefix within an S3 bucket
    S3 { bucket: String, prefix: String },
}

/// A parsed output URI
///
/// Accepted forms: a bare filesystem path, `file:///abs/path`,
/// `memory://name`, `s3://bucket/prefix` and `s3a://bucket/prefix`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    uri: String,
    location: Location,
}

impl Destination {
    /// Parse a destination URI
    pub fn parse(uri: &str) -> StorageResult<Self> {
        let trimmed = uri.trim();
        if trimmed.is_empty() {
            return Err(StorageError::invalid_destination("destination is empty"));
        }

        if !trimmed.contains("://") {
            return Ok(Self {
                uri: trimmed.to_string(),
                location: Location::File(PathBuf::from(trimmed)),
            });
        }

        let url = Url::parse(trimmed)
            .map_err(|e| StorageError::invalid_destination(format!("{}: {}", trimmed, e)))?;

        let location = match url.scheme() {
            "file" => Location::File(url.to_file_path().map_err(|_| {
                StorageError::invalid_destination(format!("{} is not an absolute path", trimmed))
            })?),
            "memory" => {
                let name = format!(
                    "{}{}",
                    url.host_str().unwrap_or_default(),
                    url.path().trim_end_matches('/')
                );
                if name.is_empty() {
                    return Err(StorageError::invalid_destination(format!(
                        "{} has no dataset name",
                        trimmed
                    )));
                }
                Location::Memory(name)
            }
            "s3" | "s3a" => {
                let bucket = url
                    .host_str()
                    .filter(|b| !b.is_empty())
                    .ok_or_else(|| {
                        StorageError::invalid_destination(format!("{} has no bucket", trimmed))
                    })?
                    .to_string();
                let prefix = url.path().trim_matches('/').to_string();
                // Overwrite clears everything under the prefix
                if prefix.is_empty() {
                    return Err(StorageError::invalid_destination(format!(
                        "{} names a whole bucket; add a key prefix",
                        trimmed
                    )));
                }
                Location::S3 { bucket, prefix }
            }
            other => {
                return Err(StorageError::invalid_destination(format!(
                    "unsupported scheme '{}' in {}",
                    other, trimmed
                )))
            }
        };

        Ok(Self {
            uri: trimmed.to_string(),
            location,
        })
    }

    /// The URI as given by the user
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Where the backend should put objects
    pub fn location(&self) -> &Location {
        &self.location
    }
}

impl FromStr for Destination {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_s3a() {
        let dest = Destination::parse("s3a://lakehouse/pi_estimation_results").unwrap();
        assert_eq!(
            dest.location(),
            &Location::S3 {
                bucket: "lakehouse".to_string(),
                prefix: "pi_estimation_results".to_string()
            }
        );
        assert_eq!(dest.to_string(), "s3a://lakehouse/pi_estimation_results");
    }

    #[test]
    fn test_parse_s3_nested_prefix() {
        let dest = Destination::parse("s3://bucket/a/b/").unwrap();
        assert_eq!(
            dest.location(),
            &Location::S3 {
                bucket: "bucket".to_string(),
                prefix: "a/b".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_bucket_without_prefix() {
        for uri in ["s3a://lakehouse", "s3://lakehouse/", "s3a://lakehouse//"] {
            let err = Destination::parse(uri).unwrap_err();
            assert!(
                matches!(err, StorageError::InvalidDestination(_)),
                "{uri} accepted"
            );
        }
    }

    #[test]
    fn test_parse_bare_path() {
        let dest = Destination::parse("out/results").unwrap();
        assert_eq!(dest.location(), &Location::File(PathBuf::from("out/results")));
    }

    #[test]
    fn test_parse_file_url() {
        let dest = Destination::parse("file:///tmp/pi").unwrap();
        assert_eq!(dest.location(), &Location::File(PathBuf::from("/tmp/pi")));
    }

    #[test]
    fn test_parse_memory() {
        let dest: Destination = "memory://results/pi".parse().unwrap();
        assert_eq!(dest.location(), &Location::Memory("results/pi".to_string()));
    }

    #[test]
    fn test_rejects_unknown_scheme() {
        let err = Destination::parse("ftp://host/path").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme 'ftp'"));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(Destination::parse("   ").is_err());
    }

    #[test]
    fn test_write_mode_display() {
        assert_eq!(WriteMode::default().to_string(), "overwrite");
        assert_eq!(WriteMode::ErrorIfExists.to_string(), "error-if-exists");
    }
}
