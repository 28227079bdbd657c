use std::fs;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::name::QName;
use quick_xml::Reader;
use thiserror::Error;

use crate::tree::XmlNode;

/// Errors that can occur while parsing XML into an [`XmlNode`] tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input XML could not be decoded or tokenized.
    #[error("failed to parse XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Input bytes were not valid UTF-8 for tag/attribute/text extraction.
    #[error("invalid UTF-8 while parsing XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Failed to decode text entity or bytes.
    #[error("failed to decode XML text: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),
    /// Failed to read input file.
    #[error("failed to read XML file: {0}")]
    Io(#[from] std::io::Error),
    /// Structural issue in XML document.
    #[error("malformed XML: {0}")]
    Malformed(String),
}

/// An element whose end tag has not been seen yet.
struct OpenElement {
    name: String,
    attributes: Vec<XmlNode>,
    children: Vec<XmlNode>,
}

impl OpenElement {
    fn close(self) -> XmlNode {
        XmlNode::Element {
            name: self.name,
            attributes: self.attributes,
            children: self.children,
        }
    }
}

/// Parse XML bytes into a document tree.
///
/// The returned node is always [`XmlNode::Document`]; its children carry the
/// document type declaration, top-level comments and processing instructions,
/// and the single root element. Text (including whitespace-only runs), CDATA
/// sections, comments, and processing instructions inside elements become
/// child nodes, so the tree holds everything the equivalence checker can be
/// asked about.
pub fn parse(xml: &[u8]) -> Result<XmlNode, ParseError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut doc_children: Vec<XmlNode> = Vec::new();
    let mut seen_root = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                stack.push(open_element(&e, &reader)?);
            }
            Event::Empty(e) => {
                let node = open_element(&e, &reader)?.close();
                attach(&mut stack, &mut doc_children, &mut seen_root, node)?;
            }
            Event::End(_) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| {
                        ParseError::Malformed(
                            "encountered closing tag without open tag".to_string(),
                        )
                    })?
                    .close();
                attach(&mut stack, &mut doc_children, &mut seen_root, node)?;
            }
            Event::Text(e) => {
                let text = e.unescape()?.into_owned();
                match stack.last_mut() {
                    Some(open) => {
                        if !text.is_empty() {
                            // Adjacent text events merge into one node.
                            if let Some(XmlNode::Text { value }) = open.children.last_mut() {
                                value.push_str(&text);
                            } else {
                                open.children.push(XmlNode::text(text));
                            }
                        }
                    }
                    None => {
                        if !text.trim().is_empty() {
                            return Err(ParseError::Malformed(
                                "text content outside of root element".to_string(),
                            ));
                        }
                    }
                }
            }
            Event::CData(e) => {
                let value = std::str::from_utf8(e.as_ref())?.to_string();
                match stack.last_mut() {
                    Some(open) => open.children.push(XmlNode::cdata(value)),
                    None => {
                        return Err(ParseError::Malformed(
                            "CDATA section outside of root element".to_string(),
                        ))
                    }
                }
            }
            Event::Comment(e) => {
                let value = std::str::from_utf8(e.as_ref())?.to_string();
                let node = XmlNode::comment(value);
                match stack.last_mut() {
                    Some(open) => open.children.push(node),
                    None => doc_children.push(node),
                }
            }
            Event::PI(e) => {
                let target = std::str::from_utf8(e.target())?.to_string();
                let data = std::str::from_utf8(e.content())?.trim_start().to_string();
                let node = XmlNode::processing_instruction(target, data);
                match stack.last_mut() {
                    Some(open) => open.children.push(node),
                    None => doc_children.push(node),
                }
            }
            Event::DocType(e) => {
                let declaration = std::str::from_utf8(e.as_ref())?.to_string();
                let node = parse_doctype(&declaration);
                match stack.last_mut() {
                    Some(open) => open.children.push(node),
                    None => doc_children.push(node),
                }
            }
            Event::Decl(_) => {}
            Event::Eof => break,
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(ParseError::Malformed(
            "unclosed element(s) at end of document".to_string(),
        ));
    }
    if !seen_root {
        return Err(ParseError::Malformed("no root element found".to_string()));
    }

    Ok(XmlNode::document(doc_children))
}

/// Parse an XML file into a document tree.
pub fn parse_file(path: &Path) -> Result<XmlNode, ParseError> {
    let bytes = fs::read(path)?;
    parse(&bytes)
}

fn attach(
    stack: &mut Vec<OpenElement>,
    doc_children: &mut Vec<XmlNode>,
    seen_root: &mut bool,
    node: XmlNode,
) -> Result<(), ParseError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        return Ok(());
    }
    if *seen_root {
        return Err(ParseError::Malformed(
            "multiple top-level elements found".to_string(),
        ));
    }
    *seen_root = true;
    doc_children.push(node);
    Ok(())
}

fn open_element(
    e: &quick_xml::events::BytesStart<'_>,
    reader: &Reader<&[u8]>,
) -> Result<OpenElement, ParseError> {
    let name = qname_to_string(e.name())?;
    let mut attributes = Vec::new();

    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = qname_to_string(attr.key)?;
        let value = attr
            .decode_and_unescape_value(reader.decoder())?
            .into_owned();
        attributes.push(XmlNode::attribute(key, value));
    }

    Ok(OpenElement {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn qname_to_string(name: QName<'_>) -> Result<String, ParseError> {
    Ok(std::str::from_utf8(name.as_ref())?.to_string())
}

/// Split a raw `<!DOCTYPE ...>` body into name, identifiers, and internal
/// subset. Lenient: anything that does not scan yields absent parts rather
/// than an error.
fn parse_doctype(declaration: &str) -> XmlNode {
    let mut rest = declaration.trim();

    let name_end = rest
        .find(|c: char| c.is_whitespace() || c == '[')
        .unwrap_or(rest.len());
    let name = rest[..name_end].to_string();
    rest = rest[name_end..].trim_start();

    let mut public_id = None;
    let mut system_id = None;
    if let Some(after) = rest.strip_prefix("PUBLIC") {
        let (public, after) = take_quoted(after);
        let (system, after) = take_quoted(after);
        public_id = public;
        system_id = system;
        rest = after;
    } else if let Some(after) = rest.strip_prefix("SYSTEM") {
        let (system, after) = take_quoted(after);
        system_id = system;
        rest = after;
    }

    let internal_subset = rest.find('[').and_then(|start| {
        rest.rfind(']')
            .filter(|&end| end > start)
            .map(|end| rest[start + 1..end].to_string())
    });

    XmlNode::document_type(name, public_id, system_id, internal_subset)
}

/// Read one leading quoted literal, returning it and the remaining input.
fn take_quoted(input: &str) -> (Option<String>, &str) {
    let input = input.trim_start();
    let mut chars = input.char_indices();
    let Some((_, quote @ ('"' | '\''))) = chars.next() else {
        return (None, input);
    };
    match input[1..].find(quote) {
        Some(end) => (Some(input[1..end + 1].to_string()), &input[end + 2..]),
        None => (None, input),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_doctype;
    use crate::XmlNode;

    #[test]
    fn doctype_name_only() {
        let node = parse_doctype("catalog");
        assert_eq!(node.name(), Some("catalog"));
        assert_eq!(node.public_id(), None);
        assert_eq!(node.system_id(), None);
        assert_eq!(node.internal_subset(), None);
    }

    #[test]
    fn doctype_public_and_system() {
        let node = parse_doctype("html PUBLIC \"-//W3C//DTD XHTML 1.0//EN\" 'xhtml1.dtd'");
        assert_eq!(node.name(), Some("html"));
        assert_eq!(node.public_id(), Some("-//W3C//DTD XHTML 1.0//EN"));
        assert_eq!(node.system_id(), Some("xhtml1.dtd"));
    }

    #[test]
    fn doctype_system_with_subset() {
        let node = parse_doctype("catalog SYSTEM \"catalog.dtd\" [<!ENTITY a \"b\">]");
        assert_eq!(
            node,
            XmlNode::document_type(
                "catalog",
                None,
                Some("catalog.dtd".to_string()),
                Some("<!ENTITY a \"b\">".to_string()),
            )
        );
    }

    #[test]
    fn doctype_subset_without_identifiers() {
        let node = parse_doctype("notes [<!ELEMENT note (#PCDATA)>]");
        assert_eq!(node.name(), Some("notes"));
        assert_eq!(node.internal_subset(), Some("<!ELEMENT note (#PCDATA)>"));
    }
}
