/*!
The `(namespaceURI, prefix, localName)` triple carried by every named node, and
the XML `Name`/`NCName` production checks used to validate it.
*/

use crate::error::Error;
use crate::syntax::{
    XML_NAME_CDATA, XML_NAME_COMMENT, XML_NAME_DOCUMENT, XML_NAME_DOCUMENT_FRAGMENT,
    XML_NAME_TEXT, XML_NS_ATTRIBUTE, XML_NS_SEPARATOR, XML_NS_URI, XMLNS_NS_ATTRIBUTE,
    XMLNS_NS_URI,
};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

pub type Result<T> = std::result::Result<T, Error>;

lazy_static! {
    // XML 1.0 Name production, restricted to the common BMP subset;
    // the parser additionally accepts the full Unicode NameStartChar/NameChar
    // ranges via `is_name_start_char`/`is_name_char` below.
    static ref NCNAME_RE: Regex =
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_.\-]*$").expect("static NCName regex");
}

/// True for characters permitted to start an XML `Name` (a conservative,
/// ASCII-plus-common-ranges approximation of the full production; full
/// Unicode coverage is the parser's job via `lexer`).
pub fn is_name_start_char(c: char) -> bool {
    c == ':'
        || c == '_'
        || c.is_ascii_alphabetic()
        || ('\u{C0}'..='\u{D6}').contains(&c)
        || ('\u{D8}'..='\u{F6}').contains(&c)
        || ('\u{F8}'..='\u{2FF}').contains(&c)
        || ('\u{370}'..='\u{37D}').contains(&c)
        || ('\u{37F}'..='\u{1FFF}').contains(&c)
        || ('\u{200C}'..='\u{200D}').contains(&c)
        || ('\u{2070}'..='\u{218F}').contains(&c)
        || ('\u{2C00}'..='\u{2FEF}').contains(&c)
        || ('\u{3001}'..='\u{D7FF}').contains(&c)
        || ('\u{F900}'..='\u{FDCF}').contains(&c)
        || ('\u{FDF0}'..='\u{FFFD}').contains(&c)
        || ('\u{10000}'..='\u{EFFFF}').contains(&c)
}

/// True for characters permitted after the first in an XML `Name`.
pub fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || c == '-'
        || c == '.'
        || c.is_ascii_digit()
        || c == '\u{B7}'
        || ('\u{0300}'..='\u{036F}').contains(&c)
        || ('\u{203F}'..='\u{2040}').contains(&c)
}

/// Validates `s` against the full XML `Name` production (may contain `:`).
pub fn is_valid_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_name_start_char(c) => chars.all(is_name_char),
        _ => false,
    }
}

/// Validates `s` against the Namespaces-in-XML `NCName` production (no `:`).
pub fn is_valid_ncname(s: &str) -> bool {
    !s.is_empty() && is_valid_name(s) && !s.contains(XML_NS_SEPARATOR)
}

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

///
/// Corresponds to the `localName`, `namespaceURI`, and `prefix` attributes
/// shared by every named node. `namespace_uri` is `None` for nodes created
/// through a non-namespace-aware API, distinct from `Some(NO_NAMESPACE)`
/// which the tree algorithms use as an internal "search exhausted" sentinel.
///
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Name {
    pub(crate) namespace_uri: Option<String>,
    pub(crate) prefix: Option<String>,
    pub(crate) local_name: String,
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.prefix {
            Some(prefix) => write!(f, "{}{}{}", prefix, XML_NS_SEPARATOR, self.local_name),
            None => write!(f, "{}", self.local_name),
        }
    }
}

// ------------------------------------------------------------------------------------------------

impl FromStr for Name {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let parts: Vec<&str> = value.split(XML_NS_SEPARATOR).collect();
        match parts.as_slice() {
            [local] => Ok(Name::new(Name::check_part(local)?, None, None)),
            [prefix, local] => Ok(Name::new(
                Name::check_part(local)?,
                Some(Name::check_part(prefix)?),
                None,
            )),
            _ => Err(Error::Namespace),
        }
    }
}

// ------------------------------------------------------------------------------------------------

impl Name {
    fn new(local_name: String, prefix: Option<String>, namespace_uri: Option<String>) -> Self {
        Self {
            namespace_uri,
            prefix,
            local_name,
        }
    }

    /// Parses a non-namespace-aware qualified name: the raw string becomes
    /// `local_name` with no prefix/namespace splitting (used by the Level 1
    /// `createElement`/`createAttribute` style factories).
    pub fn for_qualified_name(qualified_name: &str) -> Result<Self> {
        if !is_valid_name(qualified_name) {
            return Err(Error::InvalidCharacter);
        }
        Ok(Self::new(qualified_name.to_string(), None, None))
    }

    /// Parses a namespace-aware qualified name against the usual rules:
    /// `prefix "xml"` binds only to the XML namespace, `prefix "xmlns"` (or
    /// local name `xmlns`) binds only to the XMLNS namespace, and vice versa.
    pub fn new_ns(namespace_uri: &str, qualified_name: &str) -> Result<Self> {
        let mut parsed = Name::from_str(qualified_name)?;
        parsed.namespace_uri = Some(Self::check_namespace_uri(
            namespace_uri,
            &parsed.prefix,
            &parsed.local_name,
        )?);
        Ok(parsed)
    }

    fn check_part(part: &str) -> Result<String> {
        if is_valid_ncname(part) {
            Ok(part.to_string())
        } else {
            Err(Error::InvalidCharacter)
        }
    }

    fn check_namespace_uri(
        namespace_uri: &str,
        prefix: &Option<String>,
        local_name: &str,
    ) -> Result<String> {
        if namespace_uri.is_empty() {
            return Err(Error::Namespace);
        }
        let prefix_is_xml = prefix.as_deref() == Some(XML_NS_ATTRIBUTE);
        let prefix_is_xmlns = prefix.as_deref() == Some(XMLNS_NS_ATTRIBUTE);
        let local_is_xmlns = local_name == XMLNS_NS_ATTRIBUTE;

        if prefix_is_xml && namespace_uri != XML_NS_URI {
            return Err(Error::Namespace);
        }
        if (prefix_is_xmlns || local_is_xmlns) && namespace_uri != XMLNS_NS_URI {
            return Err(Error::Namespace);
        }
        if namespace_uri == XMLNS_NS_URI && !(prefix_is_xmlns || local_is_xmlns) {
            return Err(Error::Namespace);
        }
        Ok(namespace_uri.to_string())
    }

    pub fn for_cdata() -> Self {
        Self::new(XML_NAME_CDATA.to_string(), None, None)
    }

    pub fn for_comment() -> Self {
        Self::new(XML_NAME_COMMENT.to_string(), None, None)
    }

    pub fn for_document() -> Self {
        Self::new(XML_NAME_DOCUMENT.to_string(), None, None)
    }

    pub fn for_document_fragment() -> Self {
        Self::new(XML_NAME_DOCUMENT_FRAGMENT.to_string(), None, None)
    }

    pub fn for_text() -> Self {
        Self::new(XML_NAME_TEXT.to_string(), None, None)
    }

    pub fn namespace_uri(&self) -> &Option<String> {
        &self.namespace_uri
    }

    pub fn local_name(&self) -> &String {
        &self.local_name
    }

    pub fn prefix(&self) -> &Option<String> {
        &self.prefix
    }

    /// `local:prefix` combined, as returned by `nodeName`/`tagName`.
    pub fn qualified_name(&self) -> String {
        self.to_string()
    }

    /// Implements the `setPrefix` exception rules: requires
    /// the node already have a non-null, non-sentinel namespace URI, and
    /// rejects a `prefix`/URI pairing the xml/xmlns table forbids.
    pub fn set_prefix(&mut self, new_prefix: Option<&str>) -> Result<()> {
        match new_prefix {
            None => {
                self.prefix = None;
                Ok(())
            }
            Some(p) => {
                if !is_valid_ncname(p) {
                    return Err(Error::InvalidCharacter);
                }
                let uri = self
                    .namespace_uri
                    .as_deref()
                    .ok_or(Error::Namespace)?;
                Self::check_namespace_uri(uri, &Some(p.to_string()), &self.local_name)?;
                self.prefix = Some(p.to_string());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_name_roundtrip() {
        let n = Name::from_str("foo:bar").unwrap();
        assert_eq!(n.prefix(), &Some("foo".to_string()));
        assert_eq!(n.local_name(), "bar");
        assert_eq!(n.to_string(), "foo:bar");
    }

    #[test]
    fn xml_prefix_requires_xml_namespace() {
        assert!(Name::new_ns(XML_NS_URI, "xml:lang").is_ok());
        assert!(Name::new_ns("urn:other", "xml:lang").is_err());
    }

    #[test]
    fn xmlns_local_name_requires_xmlns_namespace() {
        assert!(Name::new_ns(XMLNS_NS_URI, "xmlns").is_ok());
        assert!(Name::new_ns("urn:other", "xmlns").is_err());
    }

    #[test]
    fn rejects_invalid_name_start_character() {
        assert!(Name::from_str("1bad").is_err());
    }

    #[test]
    fn rejects_too_many_colons() {
        assert!(Name::from_str("a:b:c").is_err());
    }
}
