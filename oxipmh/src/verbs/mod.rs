//! Verb dispatch and request handling
//!
//! [`Provider`] owns the collaborators (Identify configuration, page limit,
//! data store) and routes each request to exactly one verb handler. Handlers
//! accumulate protocol errors instead of short-circuiting: independently
//! checkable problems are each appended, and any non-empty error list turns
//! the response into an error document, discarding partial success content.
//!
//! # Example
//!
//! ```rust,ignore
//! use oxipmh::prelude::*;
//!
//! let config = ProviderConfig::load()?;
//! let provider = Provider::from_config(&config, store)?;
//!
//! let args: Arguments = query_pairs.into_iter().collect();
//! let document = provider.handle(args)?;
//! serialize(document.root()); // host-side XML writer
//! ```

mod formats;
mod identify;
mod records;
mod sets;

use crate::config::{IdentifyConfig, ProviderConfig};
use crate::error::{DataError, Error, ProtocolError, Result};
use crate::request::{Arguments, Verb};
use crate::response::ResponseDocument;
use crate::store::DataStore;

/// The OAI-PMH request-handling core
///
/// One instance serves any number of requests; nothing is shared between
/// them. The only state crossing request boundaries is the resumption
/// token, which is entirely client-held.
pub struct Provider<D> {
    base_url: String,
    identify: IdentifyConfig,
    limit: u64,
    token_validity_secs: u64,
    store: D,
}

impl<D: DataStore> Provider<D> {
    /// Create a provider.
    ///
    /// `limit` is the maximum number of items delivered per page; a zero
    /// limit would never let a paginated listing advance, so it is
    /// rejected.
    pub fn new(
        base_url: impl Into<String>,
        identify: IdentifyConfig,
        limit: u64,
        store: D,
    ) -> Result<Self> {
        if limit == 0 {
            return Err(Error::Paging("page limit must be positive".to_string()));
        }
        Ok(Self {
            base_url: base_url.into(),
            identify,
            limit,
            token_validity_secs: 0,
            store,
        })
    }

    /// Set the advisory resumption-token validity in seconds; 0 (the
    /// default) omits the expiration timestamp
    pub fn with_token_validity(mut self, secs: u64) -> Self {
        self.token_validity_secs = secs;
        self
    }

    /// Create a provider from a loaded configuration
    pub fn from_config(config: &ProviderConfig, store: D) -> Result<Self> {
        Ok(Self::new(
            config.repository.base_url.clone(),
            config.identify(),
            config.paging.limit,
            store,
        )?
        .with_token_validity(config.paging.token_validity_secs))
    }

    /// Handle one request, returning the assembled response document.
    ///
    /// Protocol errors are reported inside the returned document; only
    /// backend faults of the data store surface as `Err`.
    pub fn handle(&self, mut args: Arguments) -> Result<ResponseDocument> {
        let verb = match args.remove("verb").filter(|v| !v.is_empty()) {
            Some(raw) => match raw.parse::<Verb>() {
                Ok(verb) => verb,
                Err(err) => {
                    tracing::debug!(verb = raw, "unknown verb");
                    return Ok(self.error_document(None, &Arguments::new(), &[err]));
                }
            },
            None => {
                tracing::debug!("missing verb");
                return Ok(self.error_document(
                    None,
                    &Arguments::new(),
                    &[ProtocolError::bad_verb()],
                ));
            }
        };

        tracing::debug!(%verb, arguments = args.len(), "dispatching request");

        let mut doc = ResponseDocument::new(&self.base_url, Some(verb.as_str()), &args);
        let mut errors = Vec::new();
        match verb {
            Verb::Identify => identify::handle(self, &args, &mut doc, &mut errors)?,
            Verb::ListMetadataFormats => formats::handle(self, &args, &mut doc, &mut errors)?,
            Verb::ListSets => sets::handle(self, &args, &mut doc, &mut errors)?,
            Verb::ListIdentifiers | Verb::ListRecords => {
                records::list(self, verb, &args, &mut doc, &mut errors)?
            }
            Verb::GetRecord => records::get(self, &args, &mut doc, &mut errors)?,
        }

        if errors.is_empty() {
            Ok(doc)
        } else {
            tracing::warn!(%verb, errors = errors.len(), "request failed validation");
            Ok(self.error_document(Some(verb), &args, &errors))
        }
    }

    /// The configured page limit
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// The data store
    pub fn store(&self) -> &D {
        &self.store
    }

    fn error_document(
        &self,
        verb: Option<Verb>,
        args: &Arguments,
        errors: &[ProtocolError],
    ) -> ResponseDocument {
        let mut doc =
            ResponseDocument::new(&self.base_url, verb.map(|v| v.as_str()), args);
        for error in errors {
            doc.add_error(error);
        }
        doc
    }
}

/// Fold a data-access result into the request's error list.
///
/// Protocol conditions raised by the store become accumulated errors
/// (`Ok(None)`); backend faults propagate.
pub(crate) fn fold<T>(
    result: std::result::Result<T, DataError>,
    errors: &mut Vec<ProtocolError>,
) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(DataError::Protocol(err)) => {
            errors.push(err);
            Ok(None)
        }
        Err(err @ DataError::Backend(_)) => Err(Error::Data(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_protocol_accumulates() {
        let mut errors = Vec::new();
        let result: std::result::Result<u64, DataError> =
            Err(ProtocolError::bad_resumption_token().into());
        let folded = fold(result, &mut errors).unwrap();
        assert!(folded.is_none());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code(), "badResumptionToken");
    }

    #[test]
    fn test_fold_backend_propagates() {
        let mut errors = Vec::new();
        let result: std::result::Result<u64, DataError> = Err(DataError::backend("down"));
        assert!(fold(result, &mut errors).is_err());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_fold_ok_passes_through() {
        let mut errors = Vec::new();
        let folded = fold(Ok(7u64), &mut errors).unwrap();
        assert_eq!(folded, Some(7));
        assert!(errors.is_empty());
    }
}
