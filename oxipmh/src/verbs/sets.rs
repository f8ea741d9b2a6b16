//! ListSets: the repository's set hierarchy, paginated
//!
//! The ListSets resumption token is the bare cursor integer, not the
//! five-field codec used by the record listings; a client echoing it back
//! must present a string whose integer value round-trips exactly.

use crate::document::Node;
use crate::error::{ProtocolError, ProtocolErrorKind, Result};
use crate::pagination::{page_outcome, PageOutcome};
use crate::request::Arguments;
use crate::response::ResponseDocument;
use crate::store::DataStore;

use super::{fold, Provider};

pub(crate) fn handle<D: DataStore>(
    provider: &Provider<D>,
    args: &Arguments,
    doc: &mut ResponseDocument,
    errors: &mut Vec<ProtocolError>,
) -> Result<()> {
    let mut cursor = 0u64;
    let resumed = args.get("resumptionToken").is_some();
    if let Some(raw) = args.get("resumptionToken") {
        if args.len() > 1 {
            errors.push(ProtocolError::bad_argument("resumptionToken"));
        } else {
            match raw.parse::<u64>() {
                Ok(value) if value.to_string() == raw => cursor = value,
                _ => errors.push(ProtocolError::bad_resumption_token()),
            }
        }
    }
    if !errors.is_empty() {
        return Ok(());
    }

    let Some(total) = fold(provider.store.set_count(), errors)? else {
        return Ok(());
    };
    let Some(sets) = fold(provider.store.sets(cursor, provider.limit), errors)? else {
        return Ok(());
    };

    if sets.is_empty() {
        errors.push(ProtocolError::new(ProtocolErrorKind::NoSetHierarchy));
        return Ok(());
    }

    for set in &sets {
        let set_node = doc.add_to_verb_node(Node::new("set"));
        set_node.add_child(Node::with_text("setSpec", &set.spec));
        set_node.add_child(Node::with_text("setName", &set.name));
        if let Some(description) = &set.description {
            let description_node = set_node.add_child(Node::new("setDescription"));
            description_node.add_raw(description);
        }
    }

    match page_outcome(total, cursor, provider.limit, resumed) {
        PageOutcome::Continue { next_cursor } => {
            doc.add_resumption_token(&next_cursor.to_string(), None, total, next_cursor);
        }
        PageOutcome::Terminal => doc.add_resumption_token("", None, total, cursor),
        PageOutcome::Complete => {}
    }
    Ok(())
}
