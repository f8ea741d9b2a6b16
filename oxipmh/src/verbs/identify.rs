//! Identify: repository self-description
//!
//! Takes no arguments; every configured Identify field is emitted verbatim
//! as one child of the verb node, in configuration order.

use crate::document::Node;
use crate::error::{ProtocolError, Result};
use crate::request::Arguments;
use crate::response::ResponseDocument;
use crate::store::DataStore;

use super::Provider;

pub(crate) fn handle<D: DataStore>(
    provider: &Provider<D>,
    args: &Arguments,
    doc: &mut ResponseDocument,
    errors: &mut Vec<ProtocolError>,
) -> Result<()> {
    if !args.is_empty() {
        for key in args.keys() {
            errors.push(ProtocolError::bad_argument(key));
        }
        return Ok(());
    }

    for (key, value) in provider.identify.fields() {
        doc.add_to_verb_node(Node::with_text(key, value));
    }
    Ok(())
}
