use crate::compare::result::Mismatch;
use crate::tree::NodeKind;
use crate::XmlNode;

/// Format a comparison outcome as plain text.
pub fn format_text(result: &Option<Mismatch<'_>>) -> String {
    match result {
        None => "equivalent".to_string(),
        Some(mismatch) => format!(
            "not equivalent\n  left:  {}\n  right: {}",
            side(mismatch.left),
            side(mismatch.right)
        ),
    }
}

fn side(node: Option<&XmlNode>) -> String {
    node.map(node_signature)
        .unwrap_or_else(|| "(missing)".to_string())
}

/// A short one-line identification of a node for mismatch reports.
pub fn node_signature(node: &XmlNode) -> String {
    match node.kind() {
        NodeKind::Document => "document".to_string(),
        NodeKind::Element => format!("element <{}>", node.name().unwrap_or_default()),
        NodeKind::Attribute => format!(
            "attribute {}=\"{}\"",
            node.name().unwrap_or_default(),
            node.value().unwrap_or_default()
        ),
        NodeKind::Text => format!("text {:?}", truncate(node.value().unwrap_or_default())),
        NodeKind::CData => format!("cdata {:?}", truncate(node.value().unwrap_or_default())),
        NodeKind::Comment => format!("comment {:?}", truncate(node.value().unwrap_or_default())),
        NodeKind::ProcessingInstruction => {
            format!("processing instruction <?{}?>", node.target().unwrap_or_default())
        }
        NodeKind::DocumentType => {
            format!("doctype <!DOCTYPE {}>", node.name().unwrap_or_default())
        }
    }
}

fn truncate(value: &str) -> String {
    const LIMIT: usize = 40;
    if value.chars().count() <= LIMIT {
        return value.to_string();
    }
    let head: String = value.chars().take(LIMIT).collect();
    format!("{head}...")
}
