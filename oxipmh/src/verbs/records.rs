//! GetRecord, ListRecords, and ListIdentifiers
//!
//! ListIdentifiers is ListRecords with metadata bodies suppressed; the two
//! share paging-state resolution, deletion policy, and pagination. GetRecord
//! shares the header and metadata assembly.

use crate::datestamp;
use crate::document::Node;
use crate::error::{ProtocolError, Result};
use crate::model::{FieldValue, Metadata, Record, RecordQuery};
use crate::pagination::{page_outcome, PageOutcome, ResumptionToken};
use crate::request::{Arguments, Verb};
use crate::response::{self, ResponseDocument};
use crate::store::DataStore;

use super::{fold, Provider};

/// Whether deletion is honored for this record under the configured policy
fn status_deleted<D: DataStore>(provider: &Provider<D>, record: &Record) -> bool {
    record.deleted && provider.identify.deleted_record().honors_deletions()
}

/// Assemble a `metadata` envelope: container node, container attributes,
/// one child per field element with scalars treated as one-element
/// sequences
fn metadata_node(metadata: &Metadata) -> Node {
    let mut meta = Node::new("metadata");
    let container = meta.add_child(Node::new(&metadata.container_name));
    for (name, value) in &metadata.container_attributes {
        container.set_attribute(name, value);
    }
    for (name, value) in &metadata.fields {
        match value {
            FieldValue::Scalar(text) => {
                container.add_child(Node::with_text(name, text));
            }
            FieldValue::List(elements) => {
                for element in elements {
                    let child = container.add_child(Node::with_text(name, &element.value));
                    for (attr_name, attr_value) in &element.attributes {
                        child.set_attribute(attr_name, attr_value);
                    }
                }
            }
        }
    }
    meta
}

/// Validate the metadataPrefix argument against the repository's formats.
///
/// Pushes `badArgument` when absent and `cannotDisseminateFormat` when
/// unknown; returns the prefix when present so later checks can proceed
/// independently.
fn checked_prefix<'a, D: DataStore>(
    provider: &Provider<D>,
    args: &'a Arguments,
    errors: &mut Vec<ProtocolError>,
) -> Result<Option<&'a str>> {
    match args.get("metadataPrefix") {
        None => {
            errors.push(ProtocolError::bad_argument("metadataPrefix"));
            Ok(None)
        }
        Some(prefix) => {
            if let Some(formats) = fold(provider.store.metadata_formats(None), errors)? {
                if !formats.contains_key(prefix) {
                    errors.push(ProtocolError::cannot_disseminate_format(prefix));
                }
            }
            Ok(Some(prefix))
        }
    }
}

pub(crate) fn get<D: DataStore>(
    provider: &Provider<D>,
    args: &Arguments,
    doc: &mut ResponseDocument,
    errors: &mut Vec<ProtocolError>,
) -> Result<()> {
    // Both checks run independently so both errors can be reported together
    let prefix = checked_prefix(provider, args, errors)?;
    let identifier = args.get("identifier");
    if identifier.is_none() {
        errors.push(ProtocolError::bad_argument("identifier"));
    }
    if !errors.is_empty() {
        return Ok(());
    }
    let (Some(identifier), Some(prefix)) = (identifier, prefix) else {
        return Ok(());
    };

    let Some(found) = fold(provider.store.record(identifier, prefix), errors)? else {
        return Ok(());
    };
    let Some(record) = found else {
        errors.push(ProtocolError::id_does_not_exist(identifier));
        return Ok(());
    };

    let deleted = status_deleted(provider, &record);
    let record_node = doc.add_to_verb_node(Node::new("record"));
    record_node.add_child(response::header(
        &record.identifier,
        &record.datestamp,
        &record.set_spec,
        deleted,
    ));
    if !deleted {
        if let Some(metadata) = &record.metadata {
            record_node.add_child(metadata_node(metadata));
        }
    }
    Ok(())
}

/// Paging state for a listing request, either fresh or decoded from a
/// resumption token
struct ListingState {
    cursor: u64,
    query: RecordQuery,
}

fn resolve_state<D: DataStore>(
    provider: &Provider<D>,
    args: &Arguments,
    errors: &mut Vec<ProtocolError>,
) -> Result<Option<ListingState>> {
    if let Some(raw) = args.get("resumptionToken") {
        if args.len() > 1 {
            errors.push(ProtocolError::bad_argument("resumptionToken"));
            return Ok(None);
        }
        match ResumptionToken::decode(raw) {
            Ok(token) => {
                return Ok(Some(ListingState {
                    cursor: token.cursor,
                    query: RecordQuery {
                        metadata_prefix: token.metadata_prefix,
                        from: token.from,
                        until: token.until,
                        set: token.set,
                    },
                }))
            }
            Err(err) => {
                errors.push(err);
                return Ok(None);
            }
        }
    }

    let prefix = checked_prefix(provider, args, errors)?;
    let mut from = String::new();
    let mut until = String::new();
    if let Some(value) = args.get("from") {
        if datestamp::is_valid(value) {
            from = value.to_string();
        } else {
            errors.push(ProtocolError::bad_argument("from"));
        }
    }
    if let Some(value) = args.get("until") {
        if datestamp::is_valid(value) {
            until = value.to_string();
        } else {
            errors.push(ProtocolError::bad_argument("until"));
        }
    }
    if !errors.is_empty() {
        return Ok(None);
    }
    Ok(prefix.map(|prefix| ListingState {
        cursor: 0,
        query: RecordQuery {
            metadata_prefix: prefix.to_string(),
            from,
            until,
            set: args.get("set").unwrap_or_default().to_string(),
        },
    }))
}

pub(crate) fn list<D: DataStore>(
    provider: &Provider<D>,
    verb: Verb,
    args: &Arguments,
    doc: &mut ResponseDocument,
    errors: &mut Vec<ProtocolError>,
) -> Result<()> {
    let headers_only = verb == Verb::ListIdentifiers;
    let resumed = args.get("resumptionToken").is_some();

    let Some(state) = resolve_state(provider, args, errors)? else {
        return Ok(());
    };
    if !errors.is_empty() {
        return Ok(());
    }

    let Some(total) = fold(provider.store.record_count(&state.query), errors)? else {
        return Ok(());
    };
    let Some(records) = fold(
        provider
            .store
            .records(&state.query, headers_only, state.cursor, provider.limit),
        errors,
    )?
    else {
        return Ok(());
    };

    tracing::debug!(
        %verb,
        total,
        cursor = state.cursor,
        page = records.len(),
        "delivering listing page"
    );

    for record in &records {
        let deleted = status_deleted(provider, record);
        let header = response::header(
            &record.identifier,
            &record.datestamp,
            &record.set_spec,
            deleted,
        );
        if headers_only {
            doc.add_to_verb_node(header);
        } else {
            let record_node = doc.add_to_verb_node(Node::new("record"));
            record_node.add_child(header);
            if !deleted {
                if let Some(metadata) = &record.metadata {
                    record_node.add_child(metadata_node(metadata));
                }
            }
        }
    }

    match page_outcome(total, state.cursor, provider.limit, resumed) {
        PageOutcome::Continue { next_cursor } => {
            let token = ResumptionToken {
                cursor: next_cursor,
                metadata_prefix: state.query.metadata_prefix.clone(),
                from: state.query.from.clone(),
                until: state.query.until.clone(),
                set: state.query.set.clone(),
            };
            let expiration = (provider.token_validity_secs > 0)
                .then(|| datestamp::expiration(provider.token_validity_secs));
            doc.add_resumption_token(
                &token.encode(),
                expiration.as_deref(),
                total,
                next_cursor,
            );
        }
        PageOutcome::Terminal => doc.add_resumption_token("", None, total, state.cursor),
        PageOutcome::Complete => {}
    }
    Ok(())
}
