use std::fs;
use std::path::Path;

use quick_xml::events::{BytesCData, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::Writer;
use thiserror::Error;

use crate::tree::{doctype_body, XmlNode};

/// Errors that can occur while writing XML from an [`XmlNode`] tree.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to serialize XML bytes.
    #[error("failed to write XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Failed to write output file.
    #[error("failed to write XML file: {0}")]
    Io(#[from] std::io::Error),
}

/// Serialize an [`XmlNode`] tree into XML bytes.
///
/// Output is unindented: text nodes are comparison subjects here, so the
/// writer must not introduce formatting whitespace of its own.
pub fn write(node: &XmlNode) -> Result<Vec<u8>, WriteError> {
    let mut writer = Writer::new(Vec::new());
    write_node(&mut writer, node)?;
    Ok(writer.into_inner())
}

/// Serialize an [`XmlNode`] tree and write it to `path`.
pub fn write_file(node: &XmlNode, path: &Path) -> Result<(), WriteError> {
    let bytes = write(node)?;
    fs::write(path, bytes)?;
    Ok(())
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &XmlNode) -> Result<(), quick_xml::Error> {
    match node {
        XmlNode::Document { children } => {
            for child in children {
                write_node(writer, child)?;
            }
            Ok(())
        }
        XmlNode::Element {
            name,
            attributes,
            children,
        } => {
            let mut start = BytesStart::new(name.as_str());
            for attr in attributes {
                if let XmlNode::Attribute { name, value } = attr {
                    start.push_attribute((name.as_str(), value.as_str()));
                }
            }

            if children.is_empty() {
                writer.write_event(Event::Empty(start))?;
                return Ok(());
            }

            writer.write_event(Event::Start(start))?;
            for child in children {
                write_node(writer, child)?;
            }
            writer.write_event(Event::End(BytesEnd::new(name.as_str())))
        }
        // A stray attribute outside an element has no serialized form.
        XmlNode::Attribute { .. } => Ok(()),
        XmlNode::Text { value } => writer.write_event(Event::Text(BytesText::new(value))),
        XmlNode::CData { value } => {
            writer.write_event(Event::CData(BytesCData::new(value.as_str())))
        }
        XmlNode::Comment { value } => {
            writer.write_event(Event::Comment(BytesText::from_escaped(value.as_str())))
        }
        XmlNode::ProcessingInstruction { target, data } => {
            let content = if data.is_empty() {
                target.clone()
            } else {
                format!("{target} {data}")
            };
            writer.write_event(Event::PI(BytesPI::new(content)))
        }
        XmlNode::DocumentType {
            name,
            public_id,
            system_id,
            internal_subset,
        } => {
            let body = doctype_body(
                name,
                public_id.as_deref(),
                system_id.as_deref(),
                internal_subset.as_deref(),
            );
            writer.write_event(Event::DocType(BytesText::from_escaped(body.as_str())))
        }
    }
}
