//! Folder metadata document
//!
//! A `MetadataDocument` is the in-memory form of one folder's XMP sidecar.
//! The fixed envelope (`x:xmpmeta` / `rdf:RDF` / `rdf:Description` /
//! `ablFR:items`) is kept as a tree, while the children of the items
//! container are detached and owned directly by the document. The envelope
//! remembers where the container lives as an index path, and serialization
//! splices the items back in at that spot.

use super::vocabulary::{
    ableton, rdf, xmp, ABLETON_NS, DC_NS, FOLDER_FORMAT, FOLDER_RESOURCE, META_NS, RDF_NS,
    XMP_NS, XMP_TOOLKIT,
};
use super::xml::{self, qualify, Element, Node};
use crate::error::{LiveTaggerError, Result};
use chrono::{DateTime, Utc};

/// One sample file's metadata record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: String,
    pub tags: Vec<String>,
}

/// Ableton Live metadata for a folder.
#[derive(Debug, Clone)]
pub struct MetadataDocument {
    envelope: Element,
    description: Vec<usize>,
    container: Vec<usize>,
    items: Vec<Node>,
    rdf_prefix: String,
    ableton_prefix: String,
    /// Namespace bindings in scope at the items container
    item_scope: Vec<(String, String)>,
    dirty: bool,
}

/// Where the items container sits inside a parsed envelope
#[derive(Debug, PartialEq, Eq)]
struct Anchor {
    description: Vec<usize>,
    container: Vec<usize>,
}

impl Default for MetadataDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        let description = Element::new("rdf:Description", RDF_NS)
            .with_attribute(qualify("rdf", rdf::ABOUT), "")
            .with_attribute("xmlns:dc", DC_NS)
            .with_attribute("xmlns:ablFR", ABLETON_NS)
            .with_attribute("xmlns:xmp", XMP_NS)
            .with_child(Element::new("dc:format", DC_NS).with_text(FOLDER_FORMAT))
            .with_child(
                Element::new(qualify("ablFR", ableton::RESOURCE), ABLETON_NS)
                    .with_text(FOLDER_RESOURCE),
            )
            .with_child(
                Element::new("ablFR:items", ABLETON_NS).with_child(Element::new("rdf:Bag", RDF_NS)),
            );

        let envelope = Element::new("x:xmpmeta", META_NS)
            .with_attribute("xmlns:x", META_NS)
            .with_attribute("x:xmptk", XMP_TOOLKIT)
            .with_child(
                Element::new("rdf:RDF", RDF_NS)
                    .with_attribute("xmlns:rdf", RDF_NS)
                    .with_child(description),
            );

        let container = vec![0, 0, 2, 0];
        let item_scope = scope_at(&envelope, &container);

        MetadataDocument {
            envelope,
            description: vec![0, 0],
            container,
            items: Vec::new(),
            rdf_prefix: "rdf".to_string(),
            ableton_prefix: "ablFR".to_string(),
            item_scope,
            dirty: false,
        }
    }

    /// Reads a document from raw file contents.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(data).map_err(|e| {
            LiveTaggerError::MalformedDocument(format!("metadata is not valid UTF-8: {}", e))
        })?;

        Self::from_xml_str(text)
    }

    /// Reads a document from a `&str`.
    pub fn from_xml_str(data: &str) -> Result<Self> {
        Self::from_envelope(xml::parse(data)?)
    }

    fn from_envelope(mut envelope: Element) -> Result<Self> {
        let anchor = locate(&envelope)?;
        let item_scope = scope_at(&envelope, &anchor.container);

        let ableton_prefix = element_at(&envelope, parent_path(&anchor.container))
            .map(|items| items.prefix().to_string())
            .ok_or_else(|| malformed("ablFR:items is missing"))?;

        let container = element_at_mut(&mut envelope, &anchor.container)
            .ok_or_else(|| malformed("items container is missing"))?;
        let rdf_prefix = container.prefix().to_string();

        let mut items = std::mem::take(&mut container.children);
        items.retain(|node| !node.is_blank_text());

        Ok(MetadataDocument {
            envelope,
            description: anchor.description,
            container: anchor.container,
            items,
            rdf_prefix,
            ableton_prefix,
            item_scope,
            dirty: false,
        })
    }

    /// Outputs the document as XML.
    pub fn to_xml(&self) -> Result<String> {
        let mut root = self.envelope.clone();

        let container = element_at_mut(&mut root, &self.container)
            .ok_or_else(|| malformed("items container is missing"))?;
        container.children = self.items.clone();

        xml::write(&root)
    }

    /// Returns whether the document has changed since it was loaded or last saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// All file entries, in document order.
    pub fn entries(&self) -> impl Iterator<Item = FileEntry> + '_ {
        self.items.iter().filter_map(|node| match node {
            Node::Element(element) => read_entry(element, &self.item_scope),
            Node::Text(_) => None,
        })
    }

    /// Returns the number of items (aka tagged files) in the document.
    pub fn entry_count(&self) -> usize {
        self.entries().count()
    }

    /// Finds the entry for a file, matching the path exactly.
    pub fn lookup(&self, path: &str) -> Option<FileEntry> {
        self.position(path)
            .and_then(|index| self.entry_element(index))
            .and_then(|element| read_entry(element, &self.item_scope))
    }

    /// Sets the 'CreatorTool' property on the document.
    pub fn set_creator_tool(&mut self, value: impl Into<String>) -> Result<()> {
        self.set_description_property(xmp::CREATOR_TOOL, value.into())
    }

    /// Sets the 'CreateDate' property on the document.
    pub fn update_create_date(&mut self, when: DateTime<Utc>) -> Result<()> {
        self.set_description_property(xmp::CREATE_DATE, format_xmp_date(when))
    }

    /// Sets the 'MetadataDate' property on the document.
    pub fn update_metadata_date(&mut self, when: DateTime<Utc>) -> Result<()> {
        self.set_description_property(xmp::METADATA_DATE, format_xmp_date(when))
    }

    /// Reads a top-level XMP property from the description, if present.
    pub fn property(&self, local_name: &str) -> Option<String> {
        element_at(&self.envelope, &self.description)
            .and_then(|description| description.child(XMP_NS, local_name))
            .map(Element::text)
    }

    fn set_description_property(&mut self, local_name: &str, value: String) -> Result<()> {
        let scope = scope_at(&self.envelope, &self.description);
        let bound = bound_prefix(&scope, XMP_NS, true);

        let description = element_at_mut(&mut self.envelope, &self.description)
            .ok_or_else(|| malformed("rdf:Description is missing"))?;

        let prefix = match bound {
            Some(prefix) => prefix,
            None => {
                let prefix = unused_prefix(&scope, "xmp");
                description
                    .attributes
                    .push((format!("xmlns:{}", prefix), XMP_NS.to_string()));
                prefix
            }
        };

        let name = qualify(&prefix, local_name);

        // Simple properties may also be written in attribute form.
        if !prefix.is_empty() {
            description.attributes.retain(|(key, _)| key != &name);
        }

        match description.child_mut(XMP_NS, local_name) {
            Some(existing) => existing.set_text(value),
            None => description
                .children
                .push(Node::Element(Element::new(name, XMP_NS).with_text(value))),
        }

        self.dirty = true;
        Ok(())
    }

    // Item-level access used by the tag engine.

    /// Index into the items of the entry for `path`.
    pub(crate) fn position(&self, path: &str) -> Option<usize> {
        self.items.iter().position(|node| match node {
            Node::Element(element) => {
                entry_path(element, &self.item_scope).as_deref() == Some(path)
            }
            Node::Text(_) => false,
        })
    }

    pub(crate) fn entry_element(&self, index: usize) -> Option<&Element> {
        match self.items.get(index)? {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub(crate) fn push_entry(&mut self, path: &str, tags: &[String]) {
        let mut keywords = Element::new(self.rdf_name(rdf::BAG), RDF_NS);
        for tag in tags {
            keywords.children.push(Node::Element(self.keyword(tag)));
        }

        // Unprefixed attributes have no namespace, so parseType always needs a prefix.
        let mut entry = Element::new(self.rdf_name(rdf::LI), RDF_NS);
        let rdf_attribute_prefix = match bound_prefix(&self.item_scope, RDF_NS, false) {
            Some(prefix) => prefix,
            None => {
                let prefix = unused_prefix(&self.item_scope, "rdf");
                entry = entry.with_attribute(format!("xmlns:{}", prefix), RDF_NS);
                prefix
            }
        };

        let entry = entry
            .with_attribute(qualify(&rdf_attribute_prefix, rdf::PARSE_TYPE), "Resource")
            .with_child(
                Element::new(self.ableton_name(ableton::FILE_PATH), ABLETON_NS).with_text(path),
            )
            .with_child(
                Element::new(self.ableton_name(ableton::KEYWORDS), ABLETON_NS)
                    .with_child(keywords),
            );

        self.items.push(Node::Element(entry));
    }

    pub(crate) fn remove_item(&mut self, index: usize) {
        self.items.remove(index);
    }

    /// New keyword node, in this document's prefixes
    pub(crate) fn keyword(&self, tag: &str) -> Element {
        Element::new(self.rdf_name(rdf::LI), RDF_NS).with_text(tag)
    }

    /// The keyword bag of an entry, created if the entry has none.
    pub(crate) fn keyword_bag_mut(&mut self, index: usize) -> Option<&mut Element> {
        let keywords_name = self.ableton_name(ableton::KEYWORDS);
        let bag_name = self.rdf_name(rdf::BAG);

        let entry = match self.items.get_mut(index)? {
            Node::Element(element) => element,
            Node::Text(_) => return None,
        };

        if entry.child(ABLETON_NS, ableton::KEYWORDS).is_none() {
            entry
                .children
                .push(Node::Element(Element::new(keywords_name, ABLETON_NS)));
        }

        let keywords = entry.child_mut(ABLETON_NS, ableton::KEYWORDS)?;
        if keywords.child(RDF_NS, rdf::BAG).is_none() {
            keywords.children.retain(|node| matches!(node, Node::Element(_)));
            keywords
                .children
                .push(Node::Element(Element::new(bag_name, RDF_NS)));
        }

        keywords.child_mut(RDF_NS, rdf::BAG)
    }

    fn rdf_name(&self, local_name: &str) -> String {
        qualify(&self.rdf_prefix, local_name)
    }

    fn ableton_name(&self, local_name: &str) -> String {
        qualify(&self.ableton_prefix, local_name)
    }
}

/// Reads the `filePath` of an item, if it is a file entry.
///
/// The path may be a child element or, as RDF allows for simple fields, an
/// attribute of the `rdf:li`. `scope` holds the bindings the item inherits.
pub(crate) fn entry_path(item: &Element, scope: &[(String, String)]) -> Option<String> {
    if !item.is(RDF_NS, rdf::LI) {
        return None;
    }

    if let Some(path) = item.child(ABLETON_NS, ableton::FILE_PATH) {
        return Some(path.text());
    }

    item.attributes.iter().find_map(|(key, value)| {
        let (prefix, local_name) = key.split_once(':')?;
        let namespace = item
            .declarations()
            .find(|(declared, _)| *declared == prefix)
            .map(|(_, uri)| uri)
            .or_else(|| resolve(scope, prefix))?;

        (namespace == ABLETON_NS && local_name == ableton::FILE_PATH).then(|| value.clone())
    })
}

/// Reads the keyword strings of an entry, in order.
pub(crate) fn entry_tags(item: &Element) -> Vec<String> {
    item.child(ABLETON_NS, ableton::KEYWORDS)
        .and_then(|keywords| keywords.child(RDF_NS, rdf::BAG))
        .map(|bag| {
            bag.elements()
                .filter(|li| li.is(RDF_NS, rdf::LI))
                .map(Element::text)
                .collect()
        })
        .unwrap_or_default()
}

fn read_entry(item: &Element, scope: &[(String, String)]) -> Option<FileEntry> {
    Some(FileEntry {
        path: entry_path(item, scope)?,
        tags: entry_tags(item),
    })
}

fn format_xmp_date(when: DateTime<Utc>) -> String {
    when.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

fn malformed(message: &str) -> LiveTaggerError {
    LiveTaggerError::MalformedDocument(message.to_string())
}

/// Resolve root → rdf:RDF → rdf:Description → ablFR:items → rdf:Bag.
fn locate(root: &Element) -> Result<Anchor> {
    let (rdf_path, rdf_root) = if root.is(META_NS, "xmpmeta") {
        let index = root
            .position(RDF_NS, rdf::RDF)
            .ok_or_else(|| malformed("x:xmpmeta has no rdf:RDF"))?;
        let rdf_root = element_at(root, &[index]).ok_or_else(|| malformed("rdf:RDF is missing"))?;
        (vec![index], rdf_root)
    } else if root.is(RDF_NS, rdf::RDF) {
        (Vec::new(), root)
    } else {
        return Err(LiveTaggerError::MalformedDocument(format!(
            "unexpected root element <{}>",
            root.name
        )));
    };

    let mut found = Vec::new();
    for (index, node) in rdf_root.children.iter().enumerate() {
        let Node::Element(description) = node else {
            continue;
        };
        if !description.is(RDF_NS, rdf::DESCRIPTION) {
            continue;
        }

        let items: Vec<usize> = indices_of(description, ABLETON_NS, ableton::ITEMS);
        match items.as_slice() {
            [] => {}
            [items_index] => found.push((index, *items_index)),
            _ => return Err(malformed("rdf:Description has more than one ablFR:items")),
        }
    }

    let (description_index, items_index) = match found.as_slice() {
        [] => return Err(malformed("no rdf:Description contains ablFR:items")),
        [single] => *single,
        _ => return Err(malformed("more than one rdf:Description contains ablFR:items")),
    };

    let mut description = rdf_path;
    description.push(description_index);

    let mut items_path = description.clone();
    items_path.push(items_index);

    let items = element_at(root, &items_path).ok_or_else(|| malformed("ablFR:items is missing"))?;
    let bag_index = match indices_of(items, RDF_NS, rdf::BAG).as_slice() {
        [index] => *index,
        [] => return Err(malformed("ablFR:items has no rdf:Bag")),
        _ => return Err(malformed("ablFR:items has more than one rdf:Bag")),
    };

    let mut container = items_path;
    container.push(bag_index);

    Ok(Anchor {
        description,
        container,
    })
}

fn indices_of(parent: &Element, namespace: &str, local_name: &str) -> Vec<usize> {
    parent
        .children
        .iter()
        .enumerate()
        .filter_map(|(index, node)| match node {
            Node::Element(element) if element.is(namespace, local_name) => Some(index),
            _ => None,
        })
        .collect()
}

fn parent_path(path: &[usize]) -> &[usize] {
    &path[..path.len().saturating_sub(1)]
}

fn element_at<'a>(root: &'a Element, path: &[usize]) -> Option<&'a Element> {
    let mut current = root;
    for &index in path {
        current = match current.children.get(index)? {
            Node::Element(element) => element,
            Node::Text(_) => return None,
        };
    }
    Some(current)
}

fn element_at_mut<'a>(root: &'a mut Element, path: &[usize]) -> Option<&'a mut Element> {
    let mut current = root;
    for &index in path {
        current = match current.children.get_mut(index)? {
            Node::Element(element) => element,
            Node::Text(_) => return None,
        };
    }
    Some(current)
}

/// Namespace declarations visible at the element found by following `path`,
/// outermost first. A later binding of a prefix shadows earlier ones.
fn scope_at(root: &Element, path: &[usize]) -> Vec<(String, String)> {
    let mut scope = Vec::new();
    let mut current = Some(root);
    let mut steps = path.iter();

    while let Some(element) = current {
        scope.extend(
            element
                .declarations()
                .map(|(prefix, uri)| (prefix.to_string(), uri.to_string())),
        );

        current = steps
            .next()
            .and_then(|&index| match element.children.get(index) {
                Some(Node::Element(child)) => Some(child),
                _ => None,
            });
    }

    scope
}

fn resolve<'a>(scope: &'a [(String, String)], prefix: &str) -> Option<&'a str> {
    scope
        .iter()
        .rev()
        .find(|(bound, _)| bound == prefix)
        .map(|(_, uri)| uri.as_str())
}

/// A prefix that still resolves to `namespace` in `scope`.
///
/// The default namespace (empty prefix) only applies to element names, so
/// callers naming attributes pass `allow_default = false`.
fn bound_prefix(
    scope: &[(String, String)],
    namespace: &str,
    allow_default: bool,
) -> Option<String> {
    scope
        .iter()
        .rev()
        .map(|(prefix, _)| prefix.as_str())
        .filter(|prefix| allow_default || !prefix.is_empty())
        .find(|prefix| resolve(scope, prefix) == Some(namespace))
        .map(str::to_string)
}

/// `preferred`, or `preferred` followed by a number, whichever is unbound in `scope`.
fn unused_prefix(scope: &[(String, String)], preferred: &str) -> String {
    std::iter::once(preferred.to_string())
        .chain((1..).map(|n| format!("{}{}", preferred, n)))
        .find(|candidate| resolve(scope, candidate).is_none())
        .unwrap_or_else(|| preferred.to_string())
}
