use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// Discriminant for the node kinds of [`XmlNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    Document,
    Element,
    Attribute,
    Text,
    CData,
    Comment,
    ProcessingInstruction,
    DocumentType,
}

/// A generic XML tree node.
///
/// `Document` and `Element` are the only container kinds. Attributes belong
/// to their element's `attributes` list and never appear among `children`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum XmlNode {
    Document {
        children: Vec<XmlNode>,
    },
    Element {
        name: String,
        /// Attribute nodes, in document order. Duplicate names are allowed.
        attributes: Vec<XmlNode>,
        children: Vec<XmlNode>,
    },
    Attribute {
        name: String,
        value: String,
    },
    Text {
        value: String,
    },
    CData {
        value: String,
    },
    Comment {
        value: String,
    },
    ProcessingInstruction {
        target: String,
        data: String,
    },
    DocumentType {
        name: String,
        public_id: Option<String>,
        system_id: Option<String>,
        internal_subset: Option<String>,
    },
}

impl XmlNode {
    /// Create a document node from its top-level children.
    pub fn document(children: Vec<XmlNode>) -> Self {
        XmlNode::Document { children }
    }

    /// Create an element with no attributes or children.
    pub fn element(name: impl Into<String>) -> Self {
        XmlNode::Element {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attribute(name: impl Into<String>, value: impl Into<String>) -> Self {
        XmlNode::Attribute {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        XmlNode::Text {
            value: value.into(),
        }
    }

    pub fn cdata(value: impl Into<String>) -> Self {
        XmlNode::CData {
            value: value.into(),
        }
    }

    pub fn comment(value: impl Into<String>) -> Self {
        XmlNode::Comment {
            value: value.into(),
        }
    }

    pub fn processing_instruction(target: impl Into<String>, data: impl Into<String>) -> Self {
        XmlNode::ProcessingInstruction {
            target: target.into(),
            data: data.into(),
        }
    }

    pub fn document_type(
        name: impl Into<String>,
        public_id: Option<String>,
        system_id: Option<String>,
        internal_subset: Option<String>,
    ) -> Self {
        XmlNode::DocumentType {
            name: name.into(),
            public_id,
            system_id,
            internal_subset,
        }
    }

    /// Append an attribute. Has no effect on kinds other than `Element`.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let XmlNode::Element { attributes, .. } = &mut self {
            attributes.push(XmlNode::attribute(name, value));
        }
        self
    }

    /// Append a child node. Has no effect on non-container kinds.
    pub fn with_child(mut self, child: XmlNode) -> Self {
        if let Some(children) = self.children_mut() {
            children.push(child);
        }
        self
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            XmlNode::Document { .. } => NodeKind::Document,
            XmlNode::Element { .. } => NodeKind::Element,
            XmlNode::Attribute { .. } => NodeKind::Attribute,
            XmlNode::Text { .. } => NodeKind::Text,
            XmlNode::CData { .. } => NodeKind::CData,
            XmlNode::Comment { .. } => NodeKind::Comment,
            XmlNode::ProcessingInstruction { .. } => NodeKind::ProcessingInstruction,
            XmlNode::DocumentType { .. } => NodeKind::DocumentType,
        }
    }

    /// Name of an element, attribute, or document type.
    pub fn name(&self) -> Option<&str> {
        match self {
            XmlNode::Element { name, .. }
            | XmlNode::Attribute { name, .. }
            | XmlNode::DocumentType { name, .. } => Some(name),
            _ => None,
        }
    }

    /// String value of an attribute, text, CDATA, or comment node.
    pub fn value(&self) -> Option<&str> {
        match self {
            XmlNode::Attribute { value, .. }
            | XmlNode::Text { value }
            | XmlNode::CData { value }
            | XmlNode::Comment { value } => Some(value),
            _ => None,
        }
    }

    /// Target of a processing instruction.
    pub fn target(&self) -> Option<&str> {
        match self {
            XmlNode::ProcessingInstruction { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Data of a processing instruction.
    pub fn data(&self) -> Option<&str> {
        match self {
            XmlNode::ProcessingInstruction { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn public_id(&self) -> Option<&str> {
        match self {
            XmlNode::DocumentType { public_id, .. } => public_id.as_deref(),
            _ => None,
        }
    }

    pub fn system_id(&self) -> Option<&str> {
        match self {
            XmlNode::DocumentType { system_id, .. } => system_id.as_deref(),
            _ => None,
        }
    }

    pub fn internal_subset(&self) -> Option<&str> {
        match self {
            XmlNode::DocumentType {
                internal_subset, ..
            } => internal_subset.as_deref(),
            _ => None,
        }
    }

    /// Attribute nodes of an element; empty for every other kind.
    pub fn attributes(&self) -> &[XmlNode] {
        match self {
            XmlNode::Element { attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Child nodes of a container; empty for every other kind.
    pub fn children(&self) -> &[XmlNode] {
        match self {
            XmlNode::Document { children } | XmlNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<XmlNode>> {
        match self {
            XmlNode::Document { children } | XmlNode::Element { children, .. } => Some(children),
            _ => None,
        }
    }

    /// The root element of a document, if any.
    pub fn root_element(&self) -> Option<&XmlNode> {
        self.children()
            .iter()
            .find(|child| child.kind() == NodeKind::Element)
    }

    /// Return the first child element with the provided name.
    pub fn find_child(&self, name: &str) -> Option<&XmlNode> {
        self.children()
            .iter()
            .find(|child| child.kind() == NodeKind::Element && child.name() == Some(name))
    }

    /// Concatenated value of the direct text and CDATA children.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in self.children() {
            if matches!(child.kind(), NodeKind::Text | NodeKind::CData) {
                out.push_str(child.value().unwrap_or_default());
            }
        }
        out
    }
}

/// Render the body of a `<!DOCTYPE ...>` declaration (everything between
/// the keyword and the closing `>`).
pub(crate) fn doctype_body(
    name: &str,
    public_id: Option<&str>,
    system_id: Option<&str>,
    internal_subset: Option<&str>,
) -> String {
    let mut out = String::from(name);
    match (public_id, system_id) {
        (Some(public), system) => {
            out.push_str(" PUBLIC \"");
            out.push_str(public);
            out.push('"');
            if let Some(system) = system {
                out.push_str(" \"");
                out.push_str(system);
                out.push('"');
            }
        }
        (None, Some(system)) => {
            out.push_str(" SYSTEM \"");
            out.push_str(system);
            out.push('"');
        }
        (None, None) => {}
    }
    if let Some(subset) = internal_subset {
        out.push_str(" [");
        out.push_str(subset);
        out.push(']');
    }
    out
}

impl Display for XmlNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            XmlNode::Document { children } => {
                for child in children {
                    write!(f, "{child}")?;
                }
                Ok(())
            }
            XmlNode::Element {
                name,
                attributes,
                children,
            } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    write!(f, " {attr}")?;
                }
                if children.is_empty() {
                    return write!(f, "/>");
                }
                write!(f, ">")?;
                for child in children {
                    write!(f, "{child}")?;
                }
                write!(f, "</{name}>")
            }
            XmlNode::Attribute { name, value } => write!(f, "{name}=\"{value}\""),
            XmlNode::Text { value } => f.write_str(value),
            XmlNode::CData { value } => write!(f, "<![CDATA[{value}]]>"),
            XmlNode::Comment { value } => write!(f, "<!--{value}-->"),
            XmlNode::ProcessingInstruction { target, data } => {
                if data.is_empty() {
                    write!(f, "<?{target}?>")
                } else {
                    write!(f, "<?{target} {data}?>")
                }
            }
            XmlNode::DocumentType {
                name,
                public_id,
                system_id,
                internal_subset,
            } => write!(
                f,
                "<!DOCTYPE {}>",
                doctype_body(
                    name,
                    public_id.as_deref(),
                    system_id.as_deref(),
                    internal_subset.as_deref(),
                )
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::XmlNode;

    #[test]
    fn find_child_and_text_walk_direct_children() {
        let root = XmlNode::element("root")
            .with_child(XmlNode::element("child").with_child(XmlNode::text("value")))
            .with_child(XmlNode::comment("noise"));

        let child = root.find_child("child").expect("child should exist");
        assert_eq!(child.text_content(), "value");
        assert!(root.find_child("missing").is_none());
    }

    #[test]
    fn display_renders_compact_markup() {
        let node = XmlNode::element("e")
            .with_attribute("a", "1")
            .with_child(XmlNode::text("hi"))
            .with_child(XmlNode::element("b"));

        assert_eq!(node.to_string(), "<e a=\"1\">hi<b/></e>");
    }

    #[test]
    fn doctype_display_covers_public_and_subset() {
        let node = XmlNode::document_type(
            "catalog",
            Some("-//EX//DTD Catalog//EN".to_string()),
            Some("catalog.dtd".to_string()),
            Some("<!ENTITY a \"b\">".to_string()),
        );
        assert_eq!(
            node.to_string(),
            "<!DOCTYPE catalog PUBLIC \"-//EX//DTD Catalog//EN\" \"catalog.dtd\" [<!ENTITY a \"b\">]>"
        );
    }
}
