//! OAI-PMH envelope assembly
//!
//! Every response, success or error, shares the same envelope: an `OAI-PMH`
//! root carrying the protocol namespaces, a `responseDate`, and a `request`
//! element echoing the base URL and the request's verb and arguments. A
//! success response additionally carries one element named after the verb;
//! an error response carries one `error` element per accumulated error.

use crate::datestamp;
use crate::document::Node;
use crate::error::ProtocolError;
use crate::request::Arguments;

const OAI_NAMESPACE: &str = "http://www.openarchives.org/OAI/2.0/";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str =
    "http://www.openarchives.org/OAI/2.0/ http://www.openarchives.org/OAI/2.0/OAI-PMH.xsd";

/// A response document under assembly
///
/// Handlers append verb-specific content via [`add_to_verb_node`]; the
/// dispatcher appends errors via [`add_error`]. The finished tree is read
/// through [`root`] or taken with [`into_root`] for serialization.
///
/// [`add_to_verb_node`]: ResponseDocument::add_to_verb_node
/// [`add_error`]: ResponseDocument::add_error
/// [`root`]: ResponseDocument::root
/// [`into_root`]: ResponseDocument::into_root
#[derive(Debug, Clone)]
pub struct ResponseDocument {
    root: Node,
    verb: Option<String>,
}

impl ResponseDocument {
    /// Create the envelope for a request.
    ///
    /// `verb` is absent for `badVerb` responses, in which case the
    /// `request` element carries no attributes.
    pub fn new(base_url: &str, verb: Option<&str>, args: &Arguments) -> Self {
        let mut root = Node::new("OAI-PMH");
        root.set_attribute("xmlns", OAI_NAMESPACE);
        root.set_attribute("xmlns:xsi", XSI_NAMESPACE);
        root.set_attribute("xsi:schemaLocation", SCHEMA_LOCATION);

        root.add_child(Node::with_text("responseDate", datestamp::now()));

        let mut request = Node::with_text("request", base_url);
        if let Some(verb) = verb {
            request.set_attribute("verb", verb);
            for (key, value) in args.iter() {
                request.set_attribute(key, value);
            }
        }
        root.add_child(request);

        Self {
            root,
            verb: verb.map(String::from),
        }
    }

    /// Append a child to the verb element and return a mutable reference
    /// to it.
    ///
    /// The verb element is created on first use, so a document that only
    /// ever receives errors never carries one.
    pub fn add_to_verb_node(&mut self, child: Node) -> &mut Node {
        match self.verb.clone() {
            Some(name) => {
                if self.root.child(&name).is_none() {
                    self.root.add_child(Node::new(&name));
                }
                match self.root.child_mut(&name) {
                    Some(verb_node) => verb_node.add_child(child),
                    None => unreachable!("verb element exists after creation"),
                }
            }
            // A verbless document has no verb element; nothing should land
            // here, but attaching at the root keeps the tree well formed.
            None => self.root.add_child(child),
        }
    }

    /// Append a `resumptionToken` element to the verb node.
    ///
    /// An empty `token` produces the terminal empty token. `expiration` is
    /// the advisory expiration timestamp of a continuation token.
    pub fn add_resumption_token(
        &mut self,
        token: &str,
        expiration: Option<&str>,
        complete_list_size: u64,
        cursor: u64,
    ) {
        let mut node = Node::with_text("resumptionToken", token);
        if let Some(expiration) = expiration {
            node.set_attribute("expirationDate", expiration);
        }
        node.set_attribute("completeListSize", complete_list_size.to_string());
        node.set_attribute("cursor", cursor.to_string());
        self.add_to_verb_node(node);
    }

    /// Append an `error` element to the root
    pub fn add_error(&mut self, error: &ProtocolError) {
        let mut node = Node::with_text("error", &error.message);
        node.set_attribute("code", error.code());
        self.root.add_child(node);
    }

    /// The verb element, when present
    pub fn verb_node(&self) -> Option<&Node> {
        self.verb.as_deref().and_then(|name| self.root.child(name))
    }

    /// The assembled tree
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Take ownership of the assembled tree for serialization
    pub fn into_root(self) -> Node {
        self.root
    }
}

/// Build a record header.
///
/// The stored datestamp is rendered canonically; `set_spec` is omitted when
/// empty; `deleted` adds the `status="deleted"` attribute.
pub fn header(identifier: &str, datestamp: &str, set_spec: &str, deleted: bool) -> Node {
    let mut node = Node::new("header");
    if deleted {
        node.set_attribute("status", "deleted");
    }
    node.add_child(Node::with_text("identifier", identifier));
    node.add_child(Node::with_text("datestamp", crate::datestamp::format(datestamp)));
    if !set_spec.is_empty() {
        node.add_child(Node::with_text("setSpec", set_spec));
    }
    node
}
