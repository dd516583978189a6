//! Namespaces and names used by Ableton Live folder metadata

/// XMP packet wrapper namespace (`x:`)
pub const META_NS: &str = "adobe:ns:meta/";
/// RDF syntax namespace (`rdf:`)
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// Dublin Core namespace (`dc:`)
pub const DC_NS: &str = "http://purl.org/dc/elements/1.1/";
/// Ableton filesystem resources namespace (`ablFR:`)
pub const ABLETON_NS: &str = "https://ns.ableton.com/xmp/fs-resources/1.0/";
/// XMP basic namespace (`xmp:`)
pub const XMP_NS: &str = "http://ns.adobe.com/xap/1.0/";

pub const XMP_TOOLKIT: &str = "XMP Core 5.6.0";
pub const FOLDER_FORMAT: &str = "application/vnd.ableton.folder";
pub const FOLDER_RESOURCE: &str = "folder";

pub mod rdf {
    pub const RDF: &str = "RDF";
    pub const DESCRIPTION: &str = "Description";
    pub const BAG: &str = "Bag";
    pub const LI: &str = "li";
    pub const PARSE_TYPE: &str = "parseType";
    pub const ABOUT: &str = "about";
}

pub mod ableton {
    pub const RESOURCE: &str = "resource";
    pub const ITEMS: &str = "items";
    pub const FILE_PATH: &str = "filePath";
    pub const KEYWORDS: &str = "keywords";
}

pub mod xmp {
    pub const CREATOR_TOOL: &str = "CreatorTool";
    pub const CREATE_DATE: &str = "CreateDate";
    pub const METADATA_DATE: &str = "MetadataDate";
}
