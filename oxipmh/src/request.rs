//! Request verbs and argument mapping

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ProtocolError;

/// The six OAI-PMH v2.0 request verbs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// Repository self-description
    Identify,
    /// Formats available for an item or the whole repository
    ListMetadataFormats,
    /// The repository's set hierarchy
    ListSets,
    /// Record headers only
    ListIdentifiers,
    /// Full records
    ListRecords,
    /// A single record
    GetRecord,
}

impl Verb {
    /// All verbs, in protocol order
    pub const ALL: [Verb; 6] = [
        Verb::Identify,
        Verb::ListMetadataFormats,
        Verb::ListSets,
        Verb::ListIdentifiers,
        Verb::ListRecords,
        Verb::GetRecord,
    ];

    /// The verb's wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Identify => "Identify",
            Verb::ListMetadataFormats => "ListMetadataFormats",
            Verb::ListSets => "ListSets",
            Verb::ListIdentifiers => "ListIdentifiers",
            Verb::ListRecords => "ListRecords",
            Verb::GetRecord => "GetRecord",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Verb {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verb::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(ProtocolError::bad_verb)
    }
}

/// Request arguments: unique string keys mapped to string values
///
/// The transport layer (query-string parsing, POST bodies) is the hosting
/// application's concern; it hands the parsed mapping over here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments(BTreeMap<String, String>);

impl Arguments {
    /// An empty argument mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Remove a key, returning its value
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no arguments are present
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Argument keys
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Key/value pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
