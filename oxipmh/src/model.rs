//! Data-layer types exchanged with the hosting application
//!
//! These are the shapes a [`DataStore`](crate::store::DataStore)
//! implementation hands back to the provider core. They deliberately carry
//! no XML: the core turns them into response-tree nodes.

use std::collections::BTreeMap;

/// A metadata format offered by the repository, keyed by its prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataFormat {
    /// Location of the XML schema for this format
    pub schema: String,
    /// XML namespace URI of the format
    pub namespace: String,
}

impl MetadataFormat {
    /// Create a format descriptor
    pub fn new(schema: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            namespace: namespace.into(),
        }
    }
}

/// Mapping of metadata prefix to format descriptor
pub type MetadataFormatMap = BTreeMap<String, MetadataFormat>;

/// A provider-defined record grouping used for selective harvesting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Set {
    /// Colon-separated set identifier
    pub spec: String,
    /// Human-readable set name
    pub name: String,
    /// Optional raw XML fragment describing the set; injected unescaped
    pub description: Option<String>,
}

impl Set {
    /// Create a set without a description
    pub fn new(spec: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            spec: spec.into(),
            name: name.into(),
            description: None,
        }
    }

    /// Attach a raw `setDescription` XML fragment
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// One element of a metadata field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldElement {
    /// Text content of the emitted child node
    pub value: String,
    /// Attributes of the emitted child node, in order
    pub attributes: Vec<(String, String)>,
}

impl FieldElement {
    /// An element with no attributes
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            attributes: Vec::new(),
        }
    }

    /// Add an attribute to this element
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }
}

/// Value of a metadata field: a bare scalar or an ordered sequence
///
/// A scalar is normalized to a one-element sequence during assembly;
/// multi-valued fields produce one child node per element, preserving
/// sequence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A single value with no attributes
    Scalar(String),
    /// An ordered sequence of values, each optionally attributed
    List(Vec<FieldElement>),
}

impl FieldValue {
    /// A scalar field value
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::Scalar(value.into())
    }

    /// A multi-valued field from plain strings
    pub fn values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(values.into_iter().map(FieldElement::new).collect())
    }
}

/// Metadata payload of a record
///
/// `fields` preserves mapping order; assembly emits children in exactly
/// this order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Metadata {
    /// Name of the root container node
    pub container_name: String,
    /// Attributes applied to the container node, in order
    pub container_attributes: Vec<(String, String)>,
    /// Ordered field name/value pairs
    pub fields: Vec<(String, FieldValue)>,
}

impl Metadata {
    /// Create an empty metadata container
    pub fn new(container_name: impl Into<String>) -> Self {
        Self {
            container_name: container_name.into(),
            container_attributes: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Add a container attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.container_attributes.push((name.into(), value.into()));
        self
    }

    /// Append a field
    pub fn with_field(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.fields.push((name.into(), value));
        self
    }
}

/// A single item as stored by the hosting application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Unique record identifier
    pub identifier: String,
    /// Timezone-naive stored datestamp, treated as GMT
    pub datestamp: String,
    /// Set membership spec; empty when the record belongs to no set
    pub set_spec: String,
    /// Whether the record's metadata has been withdrawn
    pub deleted: bool,
    /// Metadata payload; absent for deleted records
    pub metadata: Option<Metadata>,
}

impl Record {
    /// Create a live record with no set membership and no metadata
    pub fn new(identifier: impl Into<String>, datestamp: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            datestamp: datestamp.into(),
            set_spec: String::new(),
            deleted: false,
            metadata: None,
        }
    }

    /// Set the record's set membership
    pub fn in_set(mut self, set_spec: impl Into<String>) -> Self {
        self.set_spec = set_spec.into();
        self
    }

    /// Attach a metadata payload
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Mark the record as deleted
    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }
}

/// Selection criteria for record listing and counting
///
/// Empty strings mean "no restriction", mirroring the wire arguments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordQuery {
    /// Requested metadata prefix
    pub metadata_prefix: String,
    /// Lower datestamp bound, inclusive; empty for none
    pub from: String,
    /// Upper datestamp bound, inclusive; empty for none
    pub until: String,
    /// Set restriction; empty for none
    pub set: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder() {
        let record = Record::new("oai:example:1", "2020-01-02")
            .in_set("reports")
            .deleted();
        assert_eq!(record.identifier, "oai:example:1");
        assert_eq!(record.set_spec, "reports");
        assert!(record.deleted);
        assert!(record.metadata.is_none());
    }

    #[test]
    fn test_field_element_attributes_preserve_order() {
        let element = FieldElement::new("value")
            .with_attribute("b", "2")
            .with_attribute("a", "1");
        assert_eq!(
            element.attributes,
            vec![("b".to_string(), "2".to_string()), ("a".to_string(), "1".to_string())]
        );
    }

    #[test]
    fn test_metadata_fields_preserve_order() {
        let metadata = Metadata::new("oai_dc:dc")
            .with_field("title", FieldValue::scalar("A title"))
            .with_field("creator", FieldValue::values(["one", "two"]));
        let names: Vec<&str> = metadata.fields.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["title", "creator"]);
    }
}
