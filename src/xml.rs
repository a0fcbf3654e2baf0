//! Owned XML document tree for MSBuild project files
//!
//! Built on top of the `quick-xml` event reader. MSBuild documents use at most
//! a single default namespace (the 2003 schema), so elements track the default
//! namespace in scope rather than a full prefix table. Lookups are by local
//! name, matching how the converter treats legacy and modern documents alike.

use thiserror::Error;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// XML parse failure; wrapped into `MigrateError::Xml` with the file path by
/// callers that know which file was being read.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct XmlParseError(pub String);

/// A node in the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An element with its attributes (document order) and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    /// Local name, prefix stripped
    pub name: String,
    /// Default namespace in scope for this element
    pub namespace: Option<String>,
    /// Attributes in document order, `xmlns` declarations excluded
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

/// A parsed document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    pub root: XmlElement,
}

/// Child-index path from the document root to an element.
///
/// Reference records carry this as a back-link to their source markup node so
/// the external serializer can rewrite the original item later. Indexes count
/// all child nodes, text included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePath(pub Vec<usize>);

impl NodePath {
    pub fn resolve<'a>(&self, document: &'a XmlDocument) -> Option<&'a XmlElement> {
        let mut current = &document.root;
        for &index in &self.0 {
            match current.children.get(index)? {
                XmlNode::Element(element) => current = element,
                XmlNode::Text(_) => return None,
            }
        }
        Some(current)
    }
}

impl XmlDocument {
    /// Parse a complete document from a string
    pub fn parse(content: &str) -> Result<Self, XmlParseError> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        // Open elements paired with the default namespace their children inherit
        let mut stack: Vec<(XmlElement, Option<String>)> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader
                .read_event()
                .map_err(|e| XmlParseError(e.to_string()))?
            {
                Event::Start(start) => {
                    let inherited = stack.last().and_then(|(_, ns)| ns.clone());
                    let (element, child_ns) = element_from_start(&start, inherited)?;
                    stack.push((element, child_ns));
                }
                Event::Empty(start) => {
                    let inherited = stack.last().and_then(|(_, ns)| ns.clone());
                    let (element, _) = element_from_start(&start, inherited)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let (element, _) = stack
                        .pop()
                        .ok_or_else(|| XmlParseError("unexpected closing tag".to_string()))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    let value = text.unescape().map_err(|e| XmlParseError(e.to_string()))?;
                    if let Some((parent, _)) = stack.last_mut() {
                        if !value.trim().is_empty() {
                            parent.children.push(XmlNode::Text(value.into_owned()));
                        }
                    }
                }
                Event::CData(data) => {
                    let value = String::from_utf8_lossy(&data.into_inner()).into_owned();
                    if let Some((parent, _)) = stack.last_mut() {
                        parent.children.push(XmlNode::Text(value));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(XmlParseError(
                "unclosed element at end of document".to_string(),
            ));
        }
        root.map(|root| XmlDocument { root })
            .ok_or_else(|| XmlParseError("document has no root element".to_string()))
    }
}

fn attach(
    stack: &mut Vec<(XmlElement, Option<String>)>,
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), XmlParseError> {
    match stack.last_mut() {
        Some((parent, _)) => parent.children.push(XmlNode::Element(element)),
        None => {
            if root.is_some() {
                return Err(XmlParseError("multiple root elements".to_string()));
            }
            *root = Some(element);
        }
    }
    Ok(())
}

fn element_from_start(
    start: &BytesStart<'_>,
    inherited_ns: Option<String>,
) -> Result<(XmlElement, Option<String>), XmlParseError> {
    let name = String::from_utf8_lossy(start.name().local_name().as_ref()).into_owned();

    let mut attributes = Vec::new();
    let mut default_ns = inherited_ns;
    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlParseError(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| XmlParseError(e.to_string()))?
            .into_owned();
        if key == "xmlns" {
            // A default namespace declaration applies to the element itself
            default_ns = if value.is_empty() { None } else { Some(value) };
        } else if !key.starts_with("xmlns:") {
            attributes.push((key, value));
        }
    }

    let element = XmlElement {
        name,
        namespace: default_ns.clone(),
        attributes,
        children: Vec::new(),
    };
    Ok((element, default_ns))
}

impl XmlElement {
    /// Attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First attribute in document order
    pub fn first_attribute(&self) -> Option<(&str, &str)> {
        self.attributes
            .first()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Direct element children
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// Direct element children matching a local name
    pub fn elements<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        let name = name.to_string();
        self.child_elements().filter(move |el| el.name == name)
    }

    /// First direct element child matching a local name
    pub fn element(&self, name: &str) -> Option<&XmlElement> {
        self.child_elements().find(|el| el.name == name)
    }

    /// All descendant elements matching a local name, in document order,
    /// excluding this element itself
    pub fn descendants(&self, name: &str) -> Vec<&XmlElement> {
        let mut found = Vec::new();
        collect_descendants(self, name, &mut found);
        found
    }

    /// Concatenated direct text content
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(text) => Some(text.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect::<Vec<_>>()
            .concat()
    }
}

fn collect_descendants<'a>(element: &'a XmlElement, name: &str, found: &mut Vec<&'a XmlElement>) {
    for node in &element.children {
        if let XmlNode::Element(child) = node {
            if child.name == name {
                found.push(child);
            }
            collect_descendants(child, name, found);
        }
    }
}
