//! Data-access interface implemented by the hosting application
//!
//! The provider core never talks to a database or filesystem itself; it
//! calls these operations and assembles whatever comes back. Operations are
//! plain blocking calls with no built-in retry, timeout, or cancellation.
//!
//! Listing operations come in count/page pairs because the core always asks
//! for the total match count before fetching one page; together each pair is
//! one logical operation.
//!
//! Returning [`DataError::Protocol`] folds a protocol condition into the
//! current request's error list; [`DataError::Backend`] aborts the request
//! and surfaces to the host unmasked.
//!
//! # Example
//!
//! ```rust,ignore
//! use oxipmh::prelude::*;
//!
//! struct SqlStore { /* connection handle */ }
//!
//! impl DataStore for SqlStore {
//!     fn metadata_formats(
//!         &self,
//!         _identifier: Option<&str>,
//!     ) -> Result<MetadataFormatMap, DataError> {
//!         let mut formats = MetadataFormatMap::new();
//!         formats.insert(
//!             "oai_dc".to_string(),
//!             MetadataFormat::new(
//!                 "http://www.openarchives.org/OAI/2.0/oai_dc.xsd",
//!                 "http://www.openarchives.org/OAI/2.0/oai_dc/",
//!             ),
//!         );
//!         Ok(formats)
//!     }
//!     // ...
//! }
//! ```

use crate::error::DataError;
use crate::model::{MetadataFormatMap, Record, RecordQuery, Set};

/// The four logical data-retrieval operations the core depends on
pub trait DataStore {
    /// Formats available for one item, or for the whole repository when
    /// `identifier` is absent. An empty map means the item has none.
    fn metadata_formats(&self, identifier: Option<&str>) -> Result<MetadataFormatMap, DataError>;

    /// Total number of sets in the repository
    fn set_count(&self) -> Result<u64, DataError>;

    /// One page of sets, at most `limit` starting at `cursor`
    fn sets(&self, cursor: u64, limit: u64) -> Result<Vec<Set>, DataError>;

    /// Total number of records matching `query`
    fn record_count(&self, query: &RecordQuery) -> Result<u64, DataError>;

    /// One page of matching records, at most `limit` starting at `cursor`.
    ///
    /// When `headers_only` is set the caller will discard metadata bodies;
    /// implementations may skip loading them.
    fn records(
        &self,
        query: &RecordQuery,
        headers_only: bool,
        cursor: u64,
        limit: u64,
    ) -> Result<Vec<Record>, DataError>;

    /// A single record in the given format, or `None` when the identifier
    /// is unknown
    fn record(&self, identifier: &str, metadata_prefix: &str) -> Result<Option<Record>, DataError>;
}
