//! Resumption-token pagination
//!
//! Large result sets are delivered in pages of at most the configured limit.
//! The cursor travels to the client inside an opaque resumption token and
//! comes back on the next request; the server holds no session state.
//!
//! The wire format is fixed for interoperability with existing harvesters:
//! five positional fields joined with `;`, then percent-encoded. Do not
//! replace it with a structured encoding without a protocol version change.

use crate::error::ProtocolError;
use crate::datestamp;

/// Delimiter between token fields, pre-encoding
const FIELD_SEPARATOR: char = ';';

/// Number of positional fields in a token
const FIELD_COUNT: usize = 5;

/// Decoded resumption token for record listings
///
/// `from` and `set` may legitimately be empty; `until` is always present
/// once encoded (it defaults to the encoding time).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumptionToken {
    /// Number of records already delivered
    pub cursor: u64,
    /// Metadata prefix of the listing
    pub metadata_prefix: String,
    /// Lower datestamp bound; may be empty
    pub from: String,
    /// Upper datestamp bound
    pub until: String,
    /// Set restriction; may be empty
    pub set: String,
}

impl ResumptionToken {
    /// Encode into the opaque wire form.
    ///
    /// An empty `until` is replaced with the current time so the listing
    /// stays stable while the client pages through it.
    pub fn encode(&self) -> String {
        let until = if self.until.is_empty() {
            datestamp::now()
        } else {
            self.until.clone()
        };
        let joined = [
            self.cursor.to_string(),
            self.metadata_prefix.clone(),
            self.from.clone(),
            until,
            self.set.clone(),
        ]
        .join(&FIELD_SEPARATOR.to_string());
        urlencoding::encode(&joined).into_owned()
    }

    /// Decode a client-supplied token.
    ///
    /// Rejects anything that does not percent-decode, does not split into
    /// exactly five fields, or has an empty cursor, metadataPrefix, or
    /// until field. The cursor's string form must round-trip exactly.
    pub fn decode(raw: &str) -> Result<Self, ProtocolError> {
        let decoded = urlencoding::decode(raw)
            .map_err(|_| ProtocolError::bad_resumption_token())?;
        let fields: Vec<&str> = decoded.split(FIELD_SEPARATOR).collect();
        if fields.len() != FIELD_COUNT {
            return Err(ProtocolError::bad_resumption_token());
        }
        if fields[0].is_empty() || fields[1].is_empty() || fields[3].is_empty() {
            return Err(ProtocolError::bad_resumption_token());
        }
        let cursor: u64 = fields[0]
            .parse()
            .map_err(|_| ProtocolError::bad_resumption_token())?;
        if cursor.to_string() != fields[0] {
            return Err(ProtocolError::bad_resumption_token());
        }
        Ok(Self {
            cursor,
            metadata_prefix: fields[1].to_string(),
            from: fields[2].to_string(),
            until: fields[3].to_string(),
            set: fields[4].to_string(),
        })
    }
}

/// What to emit after delivering one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// More matches remain: emit a continuation token for `next_cursor`
    Continue {
        /// Cursor of the next page
        next_cursor: u64,
    },
    /// The request consumed a token and this was the last page: emit a
    /// terminal empty token
    Terminal,
    /// Single-page result with no caller-supplied token: emit no token
    Complete,
}

/// Pagination decision shared by every listing verb.
///
/// `resumed` records whether the caller supplied a resumption token.
pub fn page_outcome(total: u64, cursor: u64, limit: u64, resumed: bool) -> PageOutcome {
    if total.saturating_sub(cursor) > limit {
        PageOutcome::Continue {
            next_cursor: cursor + limit,
        }
    } else if resumed {
        PageOutcome::Terminal
    } else {
        PageOutcome::Complete
    }
}
