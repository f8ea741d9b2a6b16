//! A tiny self-contained repository, harvested end to end.
//!
//! Shows the three host-side responsibilities: supplying a `DataStore`,
//! parsing query pairs into `Arguments`, and serializing the response tree
//! to XML text.
//!
//! Run with: cargo run --example harvest

use anyhow::Result;
use oxipmh::prelude::*;

struct LocalStore {
    formats: MetadataFormatMap,
    records: Vec<Record>,
}

impl LocalStore {
    fn open() -> Self {
        let mut formats = MetadataFormatMap::new();
        formats.insert(
            "oai_dc".to_string(),
            MetadataFormat::new(
                "http://www.openarchives.org/OAI/2.0/oai_dc.xsd",
                "http://www.openarchives.org/OAI/2.0/oai_dc/",
            ),
        );

        let records = (0..7)
            .map(|i| {
                let metadata = Metadata::new("oai_dc:dc")
                    .with_attribute(
                        "xmlns:oai_dc",
                        "http://www.openarchives.org/OAI/2.0/oai_dc/",
                    )
                    .with_attribute("xmlns:dc", "http://purl.org/dc/elements/1.1/")
                    .with_field("dc:title", FieldValue::scalar(format!("Working paper {i}")))
                    .with_field("dc:creator", FieldValue::values(["Doe, J.", "Roe, R."]));
                Record::new(format!("oai:demo:{i}"), "2024-05-01T12:00:00Z")
                    .in_set("papers")
                    .with_metadata(metadata)
            })
            .collect();

        Self { formats, records }
    }
}

impl DataStore for LocalStore {
    fn metadata_formats(&self, _identifier: Option<&str>) -> Result<MetadataFormatMap, DataError> {
        Ok(self.formats.clone())
    }

    fn set_count(&self) -> Result<u64, DataError> {
        Ok(1)
    }

    fn sets(&self, cursor: u64, _limit: u64) -> Result<Vec<Set>, DataError> {
        if cursor > 0 {
            return Ok(Vec::new());
        }
        Ok(vec![Set::new("papers", "Working Papers")])
    }

    fn record_count(&self, _query: &RecordQuery) -> Result<u64, DataError> {
        Ok(self.records.len() as u64)
    }

    fn records(
        &self,
        _query: &RecordQuery,
        _headers_only: bool,
        cursor: u64,
        limit: u64,
    ) -> Result<Vec<Record>, DataError> {
        Ok(self
            .records
            .iter()
            .skip(cursor as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    fn record(&self, identifier: &str, _metadata_prefix: &str) -> Result<Option<Record>, DataError> {
        Ok(self
            .records
            .iter()
            .find(|r| r.identifier == identifier)
            .cloned())
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Minimal indenting serializer over the response tree
fn write_xml(node: &Node, depth: usize, out: &mut String) {
    let pad = "  ".repeat(depth);
    out.push_str(&pad);
    out.push('<');
    out.push_str(node.name());
    for (name, value) in node.attributes() {
        out.push_str(&format!(" {name}=\"{}\"", escape(value)));
    }

    if node.content().is_empty() {
        out.push_str("/>\n");
        return;
    }

    let only_text = node
        .content()
        .iter()
        .all(|c| matches!(c, NodeContent::Text(_)));
    if only_text {
        out.push_str(&format!(">{}</{}>\n", escape(&node.text()), node.name()));
        return;
    }

    out.push_str(">\n");
    for content in node.content() {
        match content {
            NodeContent::Element(child) => write_xml(child, depth + 1, out),
            NodeContent::Text(text) => {
                out.push_str(&"  ".repeat(depth + 1));
                out.push_str(&escape(text));
                out.push('\n');
            }
            NodeContent::Raw(fragment) => {
                out.push_str(&"  ".repeat(depth + 1));
                out.push_str(fragment);
                out.push('\n');
            }
        }
    }
    out.push_str(&format!("{pad}</{}>\n", node.name()));
}

fn serialize(root: &Node) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    write_xml(root, 0, &mut out);
    out
}

fn respond(provider: &Provider<LocalStore>, pairs: &[(&str, &str)]) -> Result<Node> {
    let args: Arguments = pairs.iter().copied().collect();
    Ok(provider.handle(args)?.into_root())
}

fn main() -> Result<()> {
    let mut config = ProviderConfig::default();
    config.repository.name = "Demo Working Paper Archive".to_string();
    config.repository.base_url = "http://demo.example.org/oai".to_string();
    config.paging.limit = 3;
    init_tracing(&config)?;

    let provider = Provider::from_config(&config, LocalStore::open())?;

    println!("=== Identify ===");
    let root = respond(&provider, &[("verb", "Identify")])?;
    println!("{}", serialize(&root));

    println!("=== ListRecords, followed page by page ===");
    let mut next_token: Option<String> = None;
    loop {
        let args: Arguments = match &next_token {
            Some(token) => [
                ("verb".to_string(), "ListRecords".to_string()),
                ("resumptionToken".to_string(), token.clone()),
            ]
            .into_iter()
            .collect(),
            None => [("verb", "ListRecords"), ("metadataPrefix", "oai_dc")]
                .into_iter()
                .collect(),
        };
        let root = provider.handle(args)?.into_root();
        println!("{}", serialize(&root));

        next_token = root
            .child("ListRecords")
            .and_then(|v| v.child("resumptionToken"))
            .map(|t| t.text())
            .filter(|t| !t.is_empty());
        if next_token.is_none() {
            break;
        }
    }

    println!("=== GetRecord for a missing item ===");
    let root = respond(
        &provider,
        &[
            ("verb", "GetRecord"),
            ("identifier", "oai:demo:404"),
            ("metadataPrefix", "oai_dc"),
        ],
    )?;
    println!("{}", serialize(&root));

    Ok(())
}
