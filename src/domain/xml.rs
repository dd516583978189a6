//! Owned XML element tree
//!
//! A small namespace-aware tree built on quick-xml events. Elements keep the
//! qualified name they were written with alongside the namespace URI it
//! resolves to, so documents can be matched by namespace and re-serialized
//! with their original prefixes.

use crate::error::{LiveTaggerError, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// A child of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub(crate) fn is_blank_text(&self) -> bool {
        matches!(self, Node::Text(text) if text.trim().is_empty())
    }
}

/// An XML element with its resolved namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Qualified name as written, e.g. `rdf:Bag`
    pub name: String,
    pub namespace: Option<String>,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>, namespace: &str) -> Self {
        Element {
            name: name.into(),
            namespace: Some(namespace.to_string()),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// The name without its prefix
    pub fn local_name(&self) -> &str {
        split_name(&self.name).1
    }

    /// The prefix the element was written with (empty for the default namespace)
    pub fn prefix(&self) -> &str {
        split_name(&self.name).0
    }

    pub fn is(&self, namespace: &str, local_name: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.local_name() == local_name
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over child elements, skipping text
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    pub fn child(&self, namespace: &str, local_name: &str) -> Option<&Element> {
        self.elements().find(|e| e.is(namespace, local_name))
    }

    pub fn child_mut(&mut self, namespace: &str, local_name: &str) -> Option<&mut Element> {
        self.children.iter_mut().find_map(|node| match node {
            Node::Element(element) if element.is(namespace, local_name) => Some(element),
            _ => None,
        })
    }

    /// Index into `children` of the first matching child element
    pub fn position(&self, namespace: &str, local_name: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|node| matches!(node, Node::Element(e) if e.is(namespace, local_name)))
    }

    /// Concatenated text content of direct text children
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children = vec![Node::Text(text.into())];
    }

    /// Namespace declarations made on this element, as `(prefix, uri)`
    pub fn declarations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().filter_map(|(key, value)| {
            if key == "xmlns" {
                Some(("", value.as_str()))
            } else {
                key.strip_prefix("xmlns:")
                    .map(|prefix| (prefix, value.as_str()))
            }
        })
    }
}

/// Build a qualified name from a prefix and a local name
pub fn qualify(prefix: &str, local_name: &str) -> String {
    if prefix.is_empty() {
        local_name.to_string()
    } else {
        format!("{}:{}", prefix, local_name)
    }
}

fn split_name(name: &str) -> (&str, &str) {
    name.split_once(':').unwrap_or(("", name))
}

fn malformed(message: impl Into<String>) -> LiveTaggerError {
    LiveTaggerError::MalformedDocument(message.into())
}

/// Namespace bindings visible while parsing
struct Scopes {
    frames: Vec<Vec<(String, String)>>,
}

impl Scopes {
    fn resolve(&self, prefix: &str) -> Option<String> {
        if prefix == "xml" {
            return Some(XML_NS.to_string());
        }

        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter())
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.clone())
            .filter(|uri| !uri.is_empty())
    }
}

fn open_element(start: &BytesStart<'_>, scopes: &mut Scopes) -> Result<Element> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute =
            attribute.map_err(|e| malformed(format!("bad attribute on <{}>: {}", name, e)))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| malformed(format!("bad attribute value on <{}>: {}", name, e)))?
            .into_owned();
        attributes.push((key, value));
    }

    let mut element = Element {
        name,
        namespace: None,
        attributes,
        children: Vec::new(),
    };

    let frame: Vec<(String, String)> = element
        .declarations()
        .map(|(prefix, uri)| (prefix.to_string(), uri.to_string()))
        .collect();
    scopes.frames.push(frame);

    element.namespace = scopes.resolve(element.prefix());
    Ok(element)
}

fn close_element(mut element: Element) -> Element {
    if element.elements().next().is_some() {
        element.children.retain(|node| !node.is_blank_text());
    }
    element
}

/// Parse a document into its root element.
pub fn parse(data: &str) -> Result<Element> {
    let data = data.strip_prefix('\u{feff}').unwrap_or(data);
    let mut reader = Reader::from_str(data);
    let mut scopes = Scopes { frames: Vec::new() };
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                return Err(malformed(format!(
                    "XML error at byte {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
        };

        let finished = match event {
            Event::Start(start) => {
                stack.push(open_element(&start, &mut scopes)?);
                None
            }
            Event::Empty(start) => {
                let element = open_element(&start, &mut scopes)?;
                scopes.frames.pop();
                Some(element)
            }
            Event::End(_) => {
                scopes.frames.pop();
                let element = stack
                    .pop()
                    .ok_or_else(|| malformed("unexpected closing tag"))?;
                Some(close_element(element))
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| malformed(format!("bad text content: {}", e)))?;
                push_text(&mut stack, &text)?;
                None
            }
            Event::CData(cdata) => {
                let inner = cdata.into_inner();
                push_text(&mut stack, &String::from_utf8_lossy(&inner))?;
                None
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes
            // carry nothing the document model needs.
            _ => None,
        };

        if let Some(element) = finished {
            match stack.last_mut() {
                Some(parent) => parent.children.push(Node::Element(element)),
                None if root.is_none() => root = Some(element),
                None => return Err(malformed("document has more than one root element")),
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(malformed(format!("unclosed element <{}>", open.name)));
    }

    root.ok_or_else(|| malformed("document has no root element"))
}

fn push_text(stack: &mut [Element], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            match parent.children.last_mut() {
                Some(Node::Text(existing)) => existing.push_str(text),
                _ => parent.children.push(Node::Text(text.to_string())),
            }
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(malformed("text outside of the root element")),
    }
}

/// Serialize a root element with an XML declaration and four-space indentation.
pub fn write(root: &Element) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| LiveTaggerError::Serialize(e.to_string()))?;
    write_element(&mut writer, root)?;

    let mut xml = String::from_utf8(writer.into_inner())
        .map_err(|e| LiveTaggerError::Serialize(e.to_string()))?;
    xml.push('\n');
    Ok(xml)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(|e| LiveTaggerError::Serialize(e.to_string()));
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| LiveTaggerError::Serialize(e.to_string()))?;

    for child in &element.children {
        match child {
            Node::Element(child) => write_element(writer, child)?,
            Node::Text(text) => writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(|e| LiveTaggerError::Serialize(e.to_string()))?,
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(|e| LiveTaggerError::Serialize(e.to_string()))
}
