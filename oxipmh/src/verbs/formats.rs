//! ListMetadataFormats: formats for one item or the whole repository

use crate::document::Node;
use crate::error::{ProtocolError, ProtocolErrorKind, Result};
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
    for key in args.keys() {
        if key != "identifier" {
            errors.push(ProtocolError::bad_argument(key));
        }
    }
    if !errors.is_empty() {
        return Ok(());
    }

    let identifier = args.get("identifier");
    let Some(formats) = fold(provider.store.metadata_formats(identifier), errors)? else {
        return Ok(());
    };

    if formats.is_empty() {
        errors.push(ProtocolError::new(ProtocolErrorKind::NoMetadataFormats));
        return Ok(());
    }

    for (prefix, format) in &formats {
        let format_node = doc.add_to_verb_node(Node::new("metadataFormat"));
        format_node.add_child(Node::with_text("metadataPrefix", prefix));
        format_node.add_child(Node::with_text("schema", &format.schema));
        format_node.add_child(Node::with_text("metadataNamespace", &format.namespace));
    }
    Ok(())
}
