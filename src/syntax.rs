/*!
Pure syntactic tokens and well-known constants shared across the crate.
*/

// ------------------------------------------------------------------------------------------------
// Markup delimiters
// ------------------------------------------------------------------------------------------------

pub const XML_PI_START: &str = "<?";
pub const XML_PI_END: &str = "?>";

pub const XML_COMMENT_START: &str = "<!--";
pub const XML_COMMENT_END: &str = "-->";

pub const XML_CDATA_START: &str = "<![CDATA[";
pub const XML_CDATA_END: &str = "]]>";

pub const XML_DOCTYPE_START: &str = "<!DOCTYPE";
pub const XML_DOCTYPE_PUBLIC: &str = "PUBLIC";
pub const XML_DOCTYPE_SYSTEM: &str = "SYSTEM";

pub const XML_ELEMENT_START_START: &str = "<";
pub const XML_ELEMENT_START_END: &str = ">";
pub const XML_ELEMENT_END_START: &str = "</";
pub const XML_ELEMENT_END_END: &str = ">";

pub const XML_ENTITY_START: &str = "&";
pub const XML_ENTITY_END: &str = ";";
pub const XML_CHARREF_START: &str = "&#";
pub const XML_CHARREF_HEX_START: &str = "&#x";

// ------------------------------------------------------------------------------------------------
// Namespace support
// ------------------------------------------------------------------------------------------------

pub const XML_NS_ATTRIBUTE: &str = "xml";
pub const XML_NS_URI: &str = "http://www.w3.org/XML/1998/namespace";

pub const XMLNS_NS_ATTRIBUTE: &str = "xmlns";
pub const XMLNS_NS_URI: &str = "http://www.w3.org/2000/xmlns/";

/// The URI used to tag `DOMError`s whose `type_` names a construct defined by
/// the DTD production grammar of the XML 1.0 recommendation.
pub const DTD_TYPE_URI: &str = "http://www.w3.org/TR/REC-xml";

pub const XML_NS_SEPARATOR: &str = ":";

/// Sentinel namespace URI meaning "this node was created through a
/// non-namespace-aware API". Distinct from `None` (which means "no
/// namespace at all").
pub const NO_NAMESPACE: &str = "about:xdom-core/no-namespace";

// ------------------------------------------------------------------------------------------------
// DOM node names
// ------------------------------------------------------------------------------------------------

pub const XML_NAME_CDATA: &str = "#cdata-section";
pub const XML_NAME_COMMENT: &str = "#comment";
pub const XML_NAME_DOCUMENT: &str = "#document";
pub const XML_NAME_DOCUMENT_FRAGMENT: &str = "#document-fragment";
pub const XML_NAME_TEXT: &str = "#text";

// ------------------------------------------------------------------------------------------------
// Synthesized namespace prefixes (namespace fixup)
// ------------------------------------------------------------------------------------------------

pub const SYNTHETIC_PREFIX: &str = "NS";
