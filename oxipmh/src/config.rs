//! Provider configuration using Figment
//!
//! Configuration is loaded from multiple sources with the following
//! precedence (highest to lowest):
//! 1. Environment variables (prefix: OAI_)
//! 2. Current working directory: ./provider.toml
//! 3. Default values
//!
//! The request core itself only needs an [`IdentifyConfig`], a page-size
//! limit, and a token validity; hosts that assemble those by other means
//! can skip this module entirely.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};

/// How the repository reports withdrawn records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletedRecordPolicy {
    /// Deleted records are not reported; the deleted flag is ignored
    No,
    /// Deletions are reported but not guaranteed to persist
    Transient,
    /// Deletions are reported and persist indefinitely
    Persistent,
}

impl DeletedRecordPolicy {
    /// The policy's wire value, as emitted in the Identify response
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::No => "no",
            Self::Transient => "transient",
            Self::Persistent => "persistent",
        }
    }

    /// Whether a record's deleted flag affects output under this policy
    pub fn honors_deletions(&self) -> bool {
        matches!(self, Self::Transient | Self::Persistent)
    }
}

impl fmt::Display for DeletedRecordPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeletedRecordPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "no" => Ok(Self::No),
            "transient" => Ok(Self::Transient),
            "persistent" => Ok(Self::Persistent),
            other => Err(Error::Identify(format!(
                "deletedRecord must be one of no/transient/persistent, got '{other}'"
            ))),
        }
    }
}

/// Static Identify response content
///
/// An ordered field list emitted verbatim as children of the Identify verb
/// node. Construction validates the one field the core interprets itself:
/// `deletedRecord`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifyConfig {
    fields: Vec<(String, String)>,
    policy: DeletedRecordPolicy,
}

impl IdentifyConfig {
    /// Build from an ordered field list.
    ///
    /// Fails unless the list contains a valid `deletedRecord` entry.
    pub fn from_fields<I, K, V>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields: Vec<(String, String)> = fields
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let policy = fields
            .iter()
            .find(|(k, _)| k == "deletedRecord")
            .ok_or_else(|| Error::Identify("missing required field 'deletedRecord'".to_string()))
            .and_then(|(_, v)| v.parse())?;
        Ok(Self { fields, policy })
    }

    /// Configured fields, in order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The parsed deleted-record policy
    pub fn deleted_record(&self) -> DeletedRecordPolicy {
        self.policy
    }
}

/// Repository identity, rendered into the Identify response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Human-readable repository name
    pub name: String,

    /// Base URL harvesters use to reach this repository
    pub base_url: String,

    /// Administrator contact address
    pub admin_email: String,

    /// Datestamp of the oldest record in the repository
    #[serde(default = "default_earliest_datestamp")]
    pub earliest_datestamp: String,

    /// Deleted-record policy
    #[serde(default = "default_deleted_record")]
    pub deleted_record: DeletedRecordPolicy,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            name: "Repository".to_string(),
            base_url: "http://localhost/oai".to_string(),
            admin_email: "admin@localhost".to_string(),
            earliest_datestamp: default_earliest_datestamp(),
            deleted_record: default_deleted_record(),
        }
    }
}

/// Pagination tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagingConfig {
    /// Maximum items delivered per page
    #[serde(default = "default_limit")]
    pub limit: u64,

    /// Advisory resumption-token validity in seconds; 0 disables the
    /// expiration timestamp
    #[serde(default = "default_token_validity")]
    pub token_validity_secs: u64,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            token_validity_secs: default_token_validity(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Repository identity
    #[serde(default)]
    pub repository: RepositoryConfig,

    /// Pagination tuning
    #[serde(default)]
    pub paging: PagingConfig,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            repository: RepositoryConfig::default(),
            paging: PagingConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl ProviderConfig {
    /// Load configuration from defaults, `./provider.toml`, and
    /// `OAI_`-prefixed environment variables
    pub fn load() -> Result<Self> {
        Self::figment(Path::new("provider.toml")).extract().map_err(Into::into)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::figment(path.as_ref()).extract().map_err(Into::into)
    }

    fn figment(toml_path: &Path) -> Figment {
        Figment::from(Serialized::defaults(ProviderConfig::default()))
            .merge(Toml::file(toml_path))
            .merge(Env::prefixed("OAI_").split("__"))
    }

    /// The Identify field list this configuration describes
    pub fn identify(&self) -> IdentifyConfig {
        let fields = vec![
            ("repositoryName".to_string(), self.repository.name.clone()),
            ("baseURL".to_string(), self.repository.base_url.clone()),
            ("protocolVersion".to_string(), "2.0".to_string()),
            ("adminEmail".to_string(), self.repository.admin_email.clone()),
            (
                "earliestDatestamp".to_string(),
                self.repository.earliest_datestamp.clone(),
            ),
            (
                "deletedRecord".to_string(),
                self.repository.deleted_record.as_str().to_string(),
            ),
            ("granularity".to_string(), "YYYY-MM-DDThh:mm:ssZ".to_string()),
        ];
        IdentifyConfig {
            fields,
            policy: self.repository.deleted_record,
        }
    }
}

fn default_earliest_datestamp() -> String {
    "1970-01-01T00:00:00Z".to_string()
}

fn default_deleted_record() -> DeletedRecordPolicy {
    DeletedRecordPolicy::No
}

fn default_limit() -> u64 {
    100
}

fn default_token_validity() -> u64 {
    0
}

fn default_log_level() -> String {
    "info".to_string()
}
