//! # oxipmh
//!
//! The request-handling core of an OAI-PMH v2.0 metadata-harvesting
//! provider. Given a single verb plus verb-specific arguments, the core
//! validates the request, invokes data-retrieval operations supplied by the
//! hosting application, and assembles a response tree the caller serializes.
//!
//! ## What it does
//!
//! - **Verb dispatch** with per-verb argument validation and error
//!   accumulation (`badVerb`, `badArgument`, ...)
//! - **Resumption-token pagination** over large result sets, using the
//!   classic opaque percent-encoded wire format
//! - **Deleted-record semantics** driven by the repository's
//!   `deletedRecord` policy
//! - **Metadata envelope assembly** from plain data-layer values
//!
//! ## What it leaves to the host
//!
//! XML text serialization, HTTP transport and query-string parsing, and the
//! metadata store itself (supplied through the [`DataStore`](store::DataStore)
//! trait).
//!
//! ## Example
//!
//! ```rust,ignore
//! use oxipmh::prelude::*;
//!
//! fn main() -> oxipmh::Result<()> {
//!     // Load configuration
//!     let config = ProviderConfig::load()?;
//!
//!     // Initialize tracing
//!     init_tracing(&config)?;
//!
//!     // Wire up the data layer and build the provider
//!     let provider = Provider::from_config(&config, MyStore::open()?)?;
//!
//!     // Handle one parsed request
//!     let args: Arguments =
//!         [("verb", "ListRecords"), ("metadataPrefix", "oai_dc")].into_iter().collect();
//!     let document = provider.handle(args)?;
//!
//!     // Serialize document.root() with the XML writer of your choice
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod datestamp;
pub mod document;
pub mod error;
pub mod model;
pub mod observability;
pub mod pagination;
pub mod request;
pub mod response;
pub mod store;
pub mod verbs;

pub use error::{Error, Result};

/// Commonly used types
pub mod prelude {
    pub use crate::config::{DeletedRecordPolicy, IdentifyConfig, ProviderConfig};
    pub use crate::document::{Node, NodeContent};
    pub use crate::error::{DataError, Error, ProtocolError, ProtocolErrorKind, Result};
    pub use crate::model::{
        FieldElement, FieldValue, Metadata, MetadataFormat, MetadataFormatMap, Record,
        RecordQuery, Set,
    };
    pub use crate::observability::init_tracing;
    pub use crate::pagination::ResumptionToken;
    pub use crate::request::{Arguments, Verb};
    pub use crate::response::ResponseDocument;
    pub use crate::store::DataStore;
    pub use crate::verbs::Provider;
}
