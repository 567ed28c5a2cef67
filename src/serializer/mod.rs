/*!
The serializer (`LSSerializer`): walks a node and an `OutputBuffer` together,
turning the tree back into markup. Per-kind emission rules, escaping, and
attribute ordering are all driven off the same [`crate::config::Configuration`]
catalogue the parser consults, so the two ends of the crate read a document
the same way they write one back out.

If `namespaces` is on, the node passed to [`Serializer::write_to_string`] is
cloned first and [`crate::tree::namespace::fixup`] runs on the clone, not the
caller's own tree — serializing a document never mutates it.
*/

pub mod filter;
pub mod output;

pub use filter::{AcceptAllFilter, FilterAction, SerializerFilter};
pub use output::OutputBuffer;

use crate::config::Configuration;
use crate::error::{DOMError, DOMErrorKind, Halt};
use crate::node::{
    Attribute, CharacterData, Document, DocumentType, Element, Node, NodeType, ProcessingInstruction,
    RefNode,
};
use crate::syntax::*;
use crate::tree;
use std::rc::Rc;

struct SerializeState {
    config: Configuration,
    filter: Rc<dyn SerializerFilter>,
}

enum SerializeSignal {
    Interrupt,
    Fatal(DOMError),
}

type SerializeResult<T> = Result<T, SerializeSignal>;

/// Routes a [`DOMError`] through the configured handler, same as the
/// parser's own `raise`: `Ok(())` to keep going, `Err(Fatal)` to unwind.
fn raise(state: &SerializeState, kind: DOMErrorKind, message: impl Into<String>, node: &RefNode) -> SerializeResult<()> {
    let error = DOMError::new(kind, message.into()).with_node(node.clone());
    if crate::error::dispatch_error(&state.config.error_handler(), error.clone()) {
        Ok(())
    } else {
        Err(SerializeSignal::Fatal(error))
    }
}

// ------------------------------------------------------------------------------------------------
// Escaping
// ------------------------------------------------------------------------------------------------

fn numeric_ref(c: char, canonical: bool) -> String {
    if canonical {
        format!("&#x{:X};", c as u32)
    } else {
        format!("&#{};", c as u32)
    }
}

fn escape_text_char(c: char, canonical: bool) -> Option<String> {
    match c {
        '&' => Some("&amp;".to_string()),
        '<' => Some("&lt;".to_string()),
        '>' if canonical => Some("&gt;".to_string()),
        '\r' => Some(numeric_ref('\r', canonical)),
        _ => None,
    }
}

fn escape_attr_char(c: char, canonical: bool) -> Option<String> {
    match c {
        '&' => Some("&amp;".to_string()),
        '<' => Some("&lt;".to_string()),
        '"' => Some("&quot;".to_string()),
        '>' if canonical => Some("&gt;".to_string()),
        '\t' => Some(numeric_ref('\t', canonical)),
        '\n' => Some(numeric_ref('\n', canonical)),
        '\r' => Some(numeric_ref('\r', canonical)),
        _ => None,
    }
}

fn escape_text(data: &str, canonical: bool) -> String {
    let mut out = String::with_capacity(data.len());
    for c in data.chars() {
        match escape_text_char(c, canonical) {
            Some(r) => out.push_str(&r),
            None => out.push(c),
        }
    }
    out
}

/// Text-node escaping plus the out-of-CDATA `]]>` rule: the sequence cannot
/// appear literally in character data outside a CDATA section either, since
/// it would be indistinguishable from a CDATA section's own close.
fn escape_text_content(data: &str, canonical: bool) -> String {
    let escaped = escape_text(data, canonical);
    if canonical {
        escaped
    } else {
        escaped.replace("]]>", "]]&gt;")
    }
}

// ------------------------------------------------------------------------------------------------
// Serializer
// ------------------------------------------------------------------------------------------------

/// The serializer entry point (`LSSerializer`). Carries only the optional
/// filter; configuration and the node to serialize are passed per call.
#[derive(Default)]
pub struct Serializer {
    filter: Option<Rc<dyn SerializerFilter>>,
}

impl std::fmt::Debug for Serializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Serializer")
            .field("has_filter", &self.filter.is_some())
            .finish()
    }
}

impl Serializer {
    pub fn new() -> Self {
        Serializer { filter: None }
    }

    pub fn set_filter(&mut self, filter: Rc<dyn SerializerFilter>) {
        self.filter = Some(filter);
    }

    /// Serializes `node` to a character string. `node` is usually a
    /// `Document`, but any node kind may be serialized on its own.
    pub fn write_to_string(&self, node: &RefNode, config: Configuration) -> Result<String, Halt<String>> {
        let filter = self
            .filter
            .clone()
            .unwrap_or_else(|| Rc::new(AcceptAllFilter) as Rc<dyn SerializerFilter>);

        let target = if config.get_bool("namespaces") {
            let clone = tree::clone::clone_node(node, true);
            tree::namespace::fixup(&clone);
            clone
        } else {
            node.clone()
        };

        let mut state = SerializeState { config, filter };
        let mut buf = OutputBuffer::new();
        match write_node(&mut state, &mut buf, &target, 0) {
            Ok(()) => Ok(buf.into_string()),
            Err(SerializeSignal::Interrupt) => Err(Halt::Interrupted(buf.into_string())),
            Err(SerializeSignal::Fatal(e)) => Err(Halt::Aborted(e)),
        }
    }

    /// Serializes `node` and encodes the result as bytes: `encoding`
    /// (explicit override) → the document's input encoding → its declared
    /// XML encoding → UTF-8. Recognizes `UTF-16`/`UTF-32` with an explicit
    /// `LE`/`BE` suffix (case insensitive, default big-endian); anything
    /// else is written out as UTF-8. Legacy single-byte encodings are out of
    /// scope, the same non-goal that leaves `CharacterDatabase` host-supplied.
    pub fn write_to_bytes(
        &self,
        node: &RefNode,
        config: Configuration,
        encoding: Option<&str>,
    ) -> Result<Vec<u8>, Halt<Vec<u8>>> {
        let doc = crate::convert::as_document(node).or_else(|| node.owner_document());
        let resolved = encoding
            .map(str::to_string)
            .or_else(|| doc.as_ref().and_then(Document::input_encoding))
            .or_else(|| doc.as_ref().and_then(Document::xml_encoding))
            .unwrap_or_else(|| "UTF-8".to_string());

        match self.write_to_string(node, config) {
            Ok(text) => Ok(encode_bytes(&text, &resolved)),
            Err(Halt::Interrupted(text)) => Err(Halt::Interrupted(encode_bytes(&text, &resolved))),
            Err(Halt::Aborted(e)) => Err(Halt::Aborted(e)),
        }
    }
}

fn encode_bytes(text: &str, encoding: &str) -> Vec<u8> {
    match encoding.to_uppercase().as_str() {
        "UTF-16LE" => text.encode_utf16().flat_map(|u| u.to_le_bytes()).collect(),
        "UTF-16" | "UTF-16BE" => text.encode_utf16().flat_map(|u| u.to_be_bytes()).collect(),
        "UTF-32LE" => text.chars().flat_map(|c| (c as u32).to_le_bytes()).collect(),
        "UTF-32" | "UTF-32BE" => text.chars().flat_map(|c| (c as u32).to_be_bytes()).collect(),
        _ => text.as_bytes().to_vec(),
    }
}

// ------------------------------------------------------------------------------------------------
// Per-kind emission
// ------------------------------------------------------------------------------------------------

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

fn has_markup_children(node: &RefNode) -> bool {
    node.child_nodes()
        .iter()
        .any(|c| !matches!(c.node_type(), NodeType::Text | NodeType::EntityReference))
}

fn write_node(state: &mut SerializeState, buf: &mut OutputBuffer, node: &RefNode, depth: usize) -> SerializeResult<()> {
    let node_type = node.node_type();
    if node_type != NodeType::Document && state.filter.interested_in(node_type) {
        match state.filter.accept_node(node) {
            FilterAction::Reject => return Ok(()),
            FilterAction::Interrupt => return Err(SerializeSignal::Interrupt),
            FilterAction::Skip => return write_children(state, buf, node, depth),
            FilterAction::Accept => {}
        }
    }
    match node_type {
        NodeType::Document => write_document(state, buf, node),
        NodeType::DocumentFragment => write_children(state, buf, node, depth),
        NodeType::Element => write_element(state, buf, node, depth),
        NodeType::Text => write_text(state, buf, node),
        NodeType::CData => write_cdata(state, buf, node),
        NodeType::Comment => write_comment(state, buf, node, depth),
        NodeType::ProcessingInstruction => write_pi(state, buf, node),
        NodeType::EntityReference => write_entity_reference(state, buf, node, depth),
        NodeType::DocumentType => write_document_type(state, buf, node),
        NodeType::Attribute
        | NodeType::Entity
        | NodeType::Notation
        | NodeType::ElementDeclaration
        | NodeType::AttributeListDeclaration => Ok(()),
    }
}

fn write_children(state: &mut SerializeState, buf: &mut OutputBuffer, node: &RefNode, depth: usize) -> SerializeResult<()> {
    for child in node.child_nodes() {
        write_node(state, buf, &child, depth)?;
    }
    Ok(())
}

fn resolve_output_encoding(doc: &RefNode) -> String {
    Document::input_encoding(doc)
        .or_else(|| Document::xml_encoding(doc))
        .unwrap_or_else(|| "UTF-8".to_string())
}

fn write_document(state: &mut SerializeState, buf: &mut OutputBuffer, doc: &RefNode) -> SerializeResult<()> {
    let canonical = state.config.get_bool("canonical-form");
    let pretty = state.config.get_bool("format-pretty-print");
    let version = Document::xml_version(doc);
    let standalone = Document::xml_standalone(doc);

    if state.config.get_bool("xml-declaration") {
        let encoding = resolve_output_encoding(doc);
        buf.write_raw(XML_PI_START);
        buf.write_raw("xml version=\"");
        buf.write_raw(&version);
        buf.write_raw("\" encoding=\"");
        buf.write_raw(&encoding);
        buf.write_raw("\"");
        if standalone {
            buf.write_raw(" standalone=\"yes\"");
        }
        buf.write_raw(XML_PI_END);
    } else if version != "1.0" || standalone {
        raise(
            state,
            DOMErrorKind::XmlDeclarationNeeded,
            "an XML declaration is required to represent this document's version/standalone status, but xml-declaration is disabled",
            doc,
        )?;
    }

    let mut first = true;
    for child in doc.child_nodes() {
        if canonical && matches!(child.node_type(), NodeType::Text | NodeType::DocumentType) {
            continue;
        }
        if !first && (canonical || pretty) {
            buf.set_separator("\n");
        }
        write_node(state, buf, &child, 0)?;
        first = false;
    }
    Ok(())
}

fn canonical_attr_key(attr: &RefNode) -> (u8, String, String) {
    let name = attr.name();
    let is_default_xmlns = name.prefix().is_none() && name.local_name() == XMLNS_NS_ATTRIBUTE;
    let is_prefixed_xmlns = name.prefix().as_deref() == Some(XMLNS_NS_ATTRIBUTE);
    if is_default_xmlns {
        (0, String::new(), String::new())
    } else if is_prefixed_xmlns {
        (1, name.local_name().clone(), String::new())
    } else {
        (
            2,
            name.namespace_uri().clone().unwrap_or_default(),
            name.local_name().clone(),
        )
    }
}

fn write_element(state: &mut SerializeState, buf: &mut OutputBuffer, element: &RefNode, depth: usize) -> SerializeResult<()> {
    let canonical = state.config.get_bool("canonical-form");
    let pretty = state.config.get_bool("format-pretty-print");
    let tag_name = Element::tag_name(element);

    buf.write_raw(XML_ELEMENT_START_START);
    buf.write_raw(&tag_name);

    let mut attrs = Element::attributes(element);
    if canonical {
        attrs.sort_by(|a, b| canonical_attr_key(a).cmp(&canonical_attr_key(b)));
    }
    buf.set_separator(" ");
    for attr in &attrs {
        write_attribute(state, buf, element, attr, canonical)?;
    }
    buf.clear_separator();

    let children = element.child_nodes();
    if children.is_empty() && !canonical {
        buf.write_raw("/");
        buf.write_raw(XML_ELEMENT_START_END);
        return Ok(());
    }
    buf.write_raw(XML_ELEMENT_START_END);

    let indent_children = pretty && has_markup_children(element);
    for child in &children {
        if indent_children {
            buf.set_separator(format!("\n{}", indent(depth + 1)));
        }
        write_node(state, buf, child, depth + 1)?;
    }
    if indent_children {
        buf.set_separator(format!("\n{}", indent(depth)));
    }
    buf.write_raw(XML_ELEMENT_END_START);
    buf.write_raw(&tag_name);
    buf.write_raw(XML_ELEMENT_END_END);
    Ok(())
}

fn write_attribute(
    state: &mut SerializeState,
    buf: &mut OutputBuffer,
    owner: &RefNode,
    attr: &RefNode,
    canonical: bool,
) -> SerializeResult<()> {
    let name = attr.name();
    let is_xmlns = (name.prefix().is_none() && name.local_name() == XMLNS_NS_ATTRIBUTE)
        || name.prefix().as_deref() == Some(XMLNS_NS_ATTRIBUTE);

    if is_xmlns {
        if !state.config.get_bool("namespace-declarations") {
            return Ok(());
        }
        if canonical {
            let prefix = if name.prefix().is_none() {
                None
            } else {
                Some(name.local_name().as_str())
            };
            let value = Attribute::value(attr);
            let inherited = owner
                .parent_node()
                .and_then(|p| tree::namespace::lookup_namespace_uri(&p, prefix));
            if inherited.as_deref() == Some(value.as_str()) {
                return Ok(());
            }
        }
    } else {
        if state.config.get_bool("discard-default-content") && !Attribute::specified(attr) {
            return Ok(());
        }
        if state.filter.interested_in(NodeType::Attribute) {
            match state.filter.accept_node(attr) {
                FilterAction::Reject | FilterAction::Skip => return Ok(()),
                FilterAction::Interrupt => return Err(SerializeSignal::Interrupt),
                FilterAction::Accept => {}
            }
        }
    }

    let value = Attribute::value(attr);
    buf.write_raw(&name.qualified_name());
    buf.write_raw("=\"");
    buf.write(&value, &|c| escape_attr_char(c, canonical));
    buf.write_raw("\"");
    buf.set_separator(" ");
    Ok(())
}

fn should_suppress_whitespace(state: &SerializeState, text_node: &RefNode) -> bool {
    if state.config.get_bool("element-content-whitespace") {
        return false;
    }
    if tree::whole_text::is_element_content_whitespace(text_node) {
        return true;
    }
    if !state.config.get_bool("pxdom-assume-element-content") {
        return false;
    }
    let data = CharacterData::data(text_node);
    if !data.chars().all(|c| matches!(c, ' ' | '\t' | '\n' | '\r')) {
        return false;
    }
    match text_node.parent_node() {
        Some(p) if p.node_type() == NodeType::Element => Element::declared_content_model(&p).is_none(),
        _ => false,
    }
}

fn write_text(state: &mut SerializeState, buf: &mut OutputBuffer, text_node: &RefNode) -> SerializeResult<()> {
    if should_suppress_whitespace(state, text_node) {
        return Ok(());
    }
    let canonical = state.config.get_bool("canonical-form");
    let data = CharacterData::data(text_node);
    buf.write_raw(&escape_text_content(&data, canonical));
    Ok(())
}

fn write_cdata(state: &mut SerializeState, buf: &mut OutputBuffer, cdata_node: &RefNode) -> SerializeResult<()> {
    let data = CharacterData::data(cdata_node);
    let canonical = state.config.get_bool("canonical-form");
    if !state.config.get_bool("cdata-sections") {
        buf.write_raw(&escape_text_content(&data, canonical));
        return Ok(());
    }
    if data.contains("]]>") || data.contains('\r') {
        if !state.config.get_bool("split-cdata-sections") {
            raise(
                state,
                DOMErrorKind::WfInvalidCharacterSerialize,
                "CDATA section content contains ']]>' or a bare CR and 'split-cdata-sections' is off",
                cdata_node,
            )?;
        } else {
            raise(
                state,
                DOMErrorKind::CdataSectionSplitted,
                "CDATA section content contains ']]>' or a bare CR and must be split across sections",
                cdata_node,
            )?;
            write_cdata_split(buf, &data);
        }
    } else {
        buf.write_raw(XML_CDATA_START);
        buf.write_raw(&data);
        buf.write_raw(XML_CDATA_END);
    }
    Ok(())
}

/// Splits `data` around every `]]>`/bare-CR occurrence into separate CDATA
/// runs, representing the offending sequence as escaped text in between —
/// the same `]]&gt;`/numeric-CR rule ordinary text content already uses,
/// since neither sequence is representable literally inside a CDATA run.
fn write_cdata_split(buf: &mut OutputBuffer, data: &str) {
    let chars: Vec<char> = data.chars().collect();
    let mut start = 0usize;
    let mut i = 0usize;
    while i < chars.len() {
        let (marker_len, replacement) = if chars[i] == ']' && chars.get(i + 1) == Some(&']') && chars.get(i + 2) == Some(&'>')
        {
            (3, "]]&gt;")
        } else if chars[i] == '\r' {
            (1, "&#13;")
        } else {
            i += 1;
            continue;
        };
        let segment: String = chars[start..i].iter().collect();
        if !segment.is_empty() {
            buf.write_raw(XML_CDATA_START);
            buf.write_raw(&segment);
            buf.write_raw(XML_CDATA_END);
        }
        buf.write_raw(replacement);
        i += marker_len;
        start = i;
    }
    let tail: String = chars[start..].iter().collect();
    buf.write_raw(XML_CDATA_START);
    buf.write_raw(&tail);
    buf.write_raw(XML_CDATA_END);
}

fn write_comment(state: &SerializeState, buf: &mut OutputBuffer, comment_node: &RefNode, depth: usize) -> SerializeResult<()> {
    if !state.config.get_bool("comments") {
        return Ok(());
    }
    let data = CharacterData::data(comment_node);
    if data.contains("--") || data.ends_with('-') {
        raise(
            state,
            DOMErrorKind::WfInvalidCharacterSerialize,
            "a comment cannot contain '--' or end in '-'",
            comment_node,
        )?;
    }
    let pretty = state.config.get_bool("format-pretty-print");
    let body = if pretty && data.contains('\n') {
        data.replace('\n', &format!("\n{}", indent(depth)))
    } else {
        data
    };
    buf.write_raw(XML_COMMENT_START);
    buf.write_raw(&body);
    buf.write_raw(XML_COMMENT_END);
    Ok(())
}

fn write_pi(state: &SerializeState, buf: &mut OutputBuffer, pi_node: &RefNode) -> SerializeResult<()> {
    let target = ProcessingInstruction::target(pi_node);
    let data = ProcessingInstruction::data(pi_node);
    if data.contains("?>") || data.contains('\r') {
        raise(
            state,
            DOMErrorKind::WfInvalidCharacterSerialize,
            "a processing instruction's data cannot contain '?>' or a bare CR",
            pi_node,
        )?;
    }
    buf.write_raw(XML_PI_START);
    buf.write_raw(&target);
    if !data.is_empty() {
        buf.write_raw(" ");
        buf.write_raw(&data);
    }
    buf.write_raw(XML_PI_END);
    Ok(())
}

fn write_entity_reference(
    state: &mut SerializeState,
    buf: &mut OutputBuffer,
    entref_node: &RefNode,
    depth: usize,
) -> SerializeResult<()> {
    if !state.config.get_bool("entities") {
        return write_children(state, buf, entref_node, depth);
    }
    buf.write_raw(XML_ENTITY_START);
    buf.write_raw(&entref_node.name().qualified_name());
    buf.write_raw(XML_ENTITY_END);
    Ok(())
}

fn write_document_type(state: &SerializeState, buf: &mut OutputBuffer, doctype_node: &RefNode) -> SerializeResult<()> {
    let _ = state;
    let name = doctype_node.name().qualified_name();
    let public_id = DocumentType::public_id(doctype_node);
    let system_id = DocumentType::system_id(doctype_node);
    let internal_subset = DocumentType::internal_subset(doctype_node);

    buf.write_raw(XML_DOCTYPE_START);
    buf.write_raw(" ");
    buf.write_raw(&name);
    if let Some(public) = &public_id {
        buf.write_raw(" ");
        buf.write_raw(XML_DOCTYPE_PUBLIC);
        buf.write_raw(" \"");
        buf.write_raw(public);
        buf.write_raw("\"");
        if let Some(system) = &system_id {
            buf.write_raw(" \"");
            buf.write_raw(system);
            buf.write_raw("\"");
        }
    } else if let Some(system) = &system_id {
        buf.write_raw(" ");
        buf.write_raw(XML_DOCTYPE_SYSTEM);
        buf.write_raw(" \"");
        buf.write_raw(system);
        buf.write_raw("\"");
    }
    if let Some(subset) = &internal_subset {
        if !subset.trim().is_empty() {
            buf.write_raw(" [");
            buf.write_raw(subset);
            buf.write_raw("]");
        }
    }
    buf.write_raw(XML_ELEMENT_START_END);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom_impl::get_implementation;

    fn new_doc() -> RefNode {
        get_implementation()
            .create_document(None, Some("root"), None)
            .unwrap()
    }

    fn no_decl_config() -> Configuration {
        let mut config = Configuration::default();
        config.set_parameter("xml-declaration", crate::config::ParamValue::Bool(false));
        config
    }

    #[test]
    fn serializes_element_with_escaped_attribute() {
        use crate::node::{Document, Element};
        let doc = new_doc();
        let mut root = Document::document_element(&doc).unwrap();
        Element::set_attribute(&mut root, "a", "1 < 2 & \"q\"").unwrap();

        let serializer = Serializer::new();
        let out = serializer.write_to_string(&doc, no_decl_config()).unwrap();
        assert!(out.contains("a=\"1 &lt; 2 &amp; &quot;q&quot;\""));
    }

    #[test]
    fn self_closes_empty_elements_outside_canonical_form() {
        let doc = new_doc();
        let serializer = Serializer::new();
        let out = serializer.write_to_string(&doc, no_decl_config()).unwrap();
        assert_eq!(out, "<root/>");
    }

    #[test]
    fn canonical_form_never_self_closes() {
        let doc = new_doc();
        let serializer = Serializer::new();
        let mut config = no_decl_config();
        config.set_parameter("canonical-form", crate::config::ParamValue::Bool(true));
        let out = serializer.write_to_string(&doc, config).unwrap();
        assert_eq!(out, "<root></root>");
    }

    #[test]
    fn escapes_cdata_close_sequence_in_text() {
        use crate::node::{Document, Node};
        let doc = new_doc();
        let mut root = Document::document_element(&doc).unwrap();
        let text = Document::create_text_node(&doc, "a]]>b");
        root.append_child(text).unwrap();

        let serializer = Serializer::new();
        let out = serializer.write_to_string(&doc, no_decl_config()).unwrap();
        assert_eq!(out, "<root>a]]&gt;b</root>");
    }

    #[test]
    fn splits_cdata_section_around_close_sequence() {
        use crate::node::{Document, Node};
        let doc = new_doc();
        let mut root = Document::document_element(&doc).unwrap();
        let cdata = Document::create_cdata_section(&doc, "a]]>b").unwrap();
        root.append_child(cdata).unwrap();

        let serializer = Serializer::new();
        let out = serializer.write_to_string(&doc, no_decl_config()).unwrap();
        assert_eq!(out, "<root><![CDATA[a]]>]]&gt;<![CDATA[b]]></root>");
    }

    #[test]
    fn refuses_to_split_a_cdata_section_when_disallowed() {
        use crate::node::{Document, Node};
        let doc = new_doc();
        let mut root = Document::document_element(&doc).unwrap();
        let cdata = Document::create_cdata_section(&doc, "a]]>b").unwrap();
        root.append_child(cdata).unwrap();

        let serializer = Serializer::new();
        let mut config = no_decl_config();
        config.set_parameter("split-cdata-sections", crate::config::ParamValue::Bool(false));
        let result = serializer.write_to_string(&doc, config);
        assert!(matches!(result, Err(Halt::Aborted(_))));
    }

    #[test]
    fn suppresses_unspecified_default_attributes_by_default() {
        use crate::node::{Attribute, Document, Element};
        let doc = new_doc();
        let mut root = Document::document_element(&doc).unwrap();
        let mut attr = Document::create_attribute(&doc, "a").unwrap();
        Attribute::set_value(&mut attr, "1").unwrap();
        Attribute::set_specified(&mut attr, false);
        Element::set_attribute_node(&mut root, attr).unwrap();

        let serializer = Serializer::new();
        let out = serializer.write_to_string(&doc, no_decl_config()).unwrap();
        assert_eq!(out, "<root/>");
    }
}
