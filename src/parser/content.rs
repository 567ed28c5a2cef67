/*!
The document-level content loop: drives a [`quick_xml::Reader`] over the
decoded source text, builds the element tree via the node-construction API,
and hands every other top-level construct (the XML declaration, the
doctype, comments, processing instructions, text, CDATA sections) to the
right corner of [`crate::node`], driving an outer/inner read loop over an
arbitrarily deep document tree rather than any fixed envelope shape.

Attribute values and text content are read as quick-xml hands them back
*before* its own unescaping (`BytesText`/`Attribute::value` are left
`escaped()`), since quick-xml's notion of entities is "decode them away"
and this crate's is "keep them as `EntityReference` nodes when asked to" —
the hand-rolled scan in [`scan_text_references`] is what actually walks
character and general-entity references.
*/

use quick_xml::events::{BytesDecl, BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::rc::Rc;

use crate::config::Configuration;
use crate::dom_impl::get_implementation;
use crate::error::{DOMErrorKind, Halt};
use crate::node::{Document, DocumentType as DocumentTypeTrait, Element, Node, NodeData, NodeType, RefNode};
use crate::syntax::{XMLNS_NS_ATTRIBUTE, XMLNS_NS_URI, XML_NS_ATTRIBUTE, XML_NS_URI};
use crate::tree;

use super::dtd;
use super::filter::{FilterAction, ParserFilter};
use super::{fatal, predefined_char, raise, structural, ParseResult, ParseSignal, ParseState};

/// One element's namespace bindings declared directly on it (`""` is the
/// default namespace), plus the verdict its opening tag was given so
/// [`finalize_element`] can act on it once the element's children are known.
struct Frame {
    element: RefNode,
    scope: HashMap<String, String>,
    verdict: FilterAction,
}

enum TextPiece {
    Literal(String),
    EntityRef(String),
}

/// Parses `text` (already decoded/BOM-stripped/line-ending-normalized by
/// [`super::source::resolve_encoding`]) into a fresh `Document`.
pub(crate) fn parse_document(
    text: String,
    input_encoding: String,
    config: Configuration,
    filter: Rc<dyn ParserFilter>,
) -> Result<RefNode, Halt<RefNode>> {
    let document = get_implementation()
        .create_document(None, None, None)
        .expect("a document with neither a root element nor a doctype never fails to construct");

    if let NodeData::Document {
        config: doc_config,
        input_encoding: doc_input_encoding,
        ..
    } = &mut document.borrow_mut().data
    {
        *doc_config = Box::new(config.clone());
        *doc_input_encoding = Some(input_encoding);
    }

    let mut state = ParseState {
        config,
        filter,
        source_text: text,
        general_entities: HashMap::new(),
        parameter_entities: HashMap::new(),
        internal_subset_unreliable: false,
    };

    match run(&mut state, &document) {
        Ok(()) => Ok(document),
        Err(ParseSignal::Interrupt) => Err(Halt::Interrupted(document)),
        Err(ParseSignal::Fatal(e)) => Err(Halt::Aborted(e)),
    }
}

fn run(state: &mut ParseState, document: &RefNode) -> ParseResult<()> {
    let xml_text = state.source_text.clone();
    let mut reader = Reader::from_str(&xml_text);
    reader.trim_text(false);
    let mut buf: Vec<u8> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut text_buffer = String::new();

    loop {
        let byte_pos = reader.buffer_position();
        match reader.read_event(&mut buf) {
            Ok(Event::Decl(ref ev)) => {
                trace!("run - Event::Decl ({:?})", ev);
                apply_decl(document, ev);
            }
            Ok(Event::DocType(ref ev)) => {
                trace!("run - Event::DocType ({:?})", ev);
                flush_text(state, document, &stack, &mut text_buffer, byte_pos)?;
                if state.config.get_bool("disallow-doctype") {
                    return Err(fatal(
                        state,
                        DOMErrorKind::DoctypeNotAllowed,
                        "document contains a document type declaration",
                        byte_pos,
                    ));
                }
                let raw = decode_raw(state, ev.escaped(), byte_pos)?;
                let doctype = dtd::parse_doctype(state, &raw, byte_pos)?;
                attach_or_interrupt(state, document, &stack, doctype, NodeType::DocumentType, byte_pos)?;
            }
            Ok(Event::Comment(ref ev)) => {
                trace!("run - Event::Comment ({:?})", ev);
                flush_text(state, document, &stack, &mut text_buffer, byte_pos)?;
                if state.config.get_bool("comments") {
                    let data = decode_raw(state, ev.escaped(), byte_pos)?;
                    let node = document.create_comment(&data);
                    attach_or_interrupt(state, document, &stack, node, NodeType::Comment, byte_pos)?;
                }
            }
            Ok(Event::PI(ref ev)) => {
                trace!("run - Event::PI ({:?})", ev);
                flush_text(state, document, &stack, &mut text_buffer, byte_pos)?;
                let raw = decode_raw(state, ev.escaped(), byte_pos)?;
                let (target, data) = split_pi(&raw);
                let node = document
                    .create_processing_instruction(&target, &data)
                    .map_err(|e| structural(state, e, byte_pos))?;
                attach_or_interrupt(state, document, &stack, node, NodeType::ProcessingInstruction, byte_pos)?;
            }
            Ok(Event::Start(ref ev)) => {
                trace!("run - Event::Start ({:?})", ev);
                flush_text(state, document, &stack, &mut text_buffer, byte_pos)?;
                let (element, scope) = build_element(state, document, &stack, ev, byte_pos)?;
                let verdict = state.filter.start_element(&element);
                if verdict == FilterAction::Interrupt {
                    return Err(ParseSignal::Interrupt);
                }
                append_to_current(state, document, &stack, element.clone(), byte_pos)?;
                stack.push(Frame { element, scope, verdict });
            }
            Ok(Event::Empty(ref ev)) => {
                trace!("run - Event::Empty ({:?})", ev);
                flush_text(state, document, &stack, &mut text_buffer, byte_pos)?;
                let (element, scope) = build_element(state, document, &stack, ev, byte_pos)?;
                let verdict = state.filter.start_element(&element);
                if verdict == FilterAction::Interrupt {
                    return Err(ParseSignal::Interrupt);
                }
                append_to_current(state, document, &stack, element.clone(), byte_pos)?;
                finalize_element(state, document, &stack, Frame { element, scope, verdict }, byte_pos)?;
            }
            Ok(Event::End(ref ev)) => {
                trace!("run - Event::End ({:?})", ev);
                flush_text(state, document, &stack, &mut text_buffer, byte_pos)?;
                if let Some(frame) = stack.pop() {
                    finalize_element(state, document, &stack, frame, byte_pos)?;
                }
            }
            Ok(Event::CData(ref ev)) => {
                trace!("run - Event::CData ({:?})", ev);
                flush_text(state, document, &stack, &mut text_buffer, byte_pos)?;
                let raw = decode_raw(state, ev, byte_pos)?;
                let node = if state.config.get_bool("cdata-sections") {
                    document.create_cdata_section(&raw).map_err(|e| structural(state, e, byte_pos))?
                } else {
                    document.create_text_node(&raw)
                };
                let kind = if state.config.get_bool("cdata-sections") {
                    NodeType::CData
                } else {
                    NodeType::Text
                };
                attach_or_interrupt(state, document, &stack, node, kind, byte_pos)?;
            }
            Ok(Event::Text(ref ev)) => {
                let raw = decode_raw(state, ev.escaped(), byte_pos)?;
                text_buffer.push_str(&raw);
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(fatal(
                    state,
                    DOMErrorKind::PxdomParseError,
                    format!("XML syntax error: {}", err),
                    reader.buffer_position(),
                ));
            }
        }
        buf.clear();
    }
    flush_text(state, document, &stack, &mut text_buffer, reader.buffer_position())?;
    Ok(())
}

fn decode_raw(state: &ParseState, bytes: &[u8], byte_pos: usize) -> ParseResult<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| fatal(state, DOMErrorKind::PxdomParseError, format!("invalid UTF-8 in markup: {}", e), byte_pos))
}

fn split_pi(raw: &str) -> (String, String) {
    match raw.find(|c: char| c == ' ' || c == '\t' || c == '\n' || c == '\r') {
        Some(i) => (raw[..i].to_string(), raw[i..].trim_start().to_string()),
        None => (raw.to_string(), String::new()),
    }
}

fn apply_decl(document: &RefNode, ev: &BytesDecl) {
    let version = ev.version().ok().and_then(|v| std::str::from_utf8(&v).ok().map(str::to_string));
    let encoding = ev
        .encoding()
        .and_then(Result::ok)
        .and_then(|v| std::str::from_utf8(&v).ok().map(str::to_string));
    let standalone = ev
        .standalone()
        .and_then(Result::ok)
        .and_then(|v| std::str::from_utf8(&v).ok().map(|s| s == "yes"));

    if let NodeData::Document {
        xml_version,
        xml_encoding,
        xml_standalone,
        ..
    } = &mut document.borrow_mut().data
    {
        if let Some(v) = version {
            *xml_version = v;
        }
        *xml_encoding = encoding;
        if let Some(s) = standalone {
            *xml_standalone = s;
        }
    }
}

// ------------------------------------------------------------------------------------------------
// Namespace scope
// ------------------------------------------------------------------------------------------------

fn resolve_in_stack(stack: &[Frame], key: &str) -> Option<String> {
    stack.iter().rev().find_map(|frame| frame.scope.get(key).cloned())
}

fn well_known_or_scope(own_scope: &HashMap<String, String>, stack: &[Frame], prefix: &str) -> Option<String> {
    match prefix {
        XML_NS_ATTRIBUTE => Some(XML_NS_URI.to_string()),
        XMLNS_NS_ATTRIBUTE => Some(XMLNS_NS_URI.to_string()),
        _ => own_scope.get(prefix).cloned().or_else(|| resolve_in_stack(stack, prefix)),
    }
}

fn split_qname(s: &str) -> (Option<&str>, &str) {
    match s.find(':') {
        Some(i) => (Some(&s[..i]), &s[i + 1..]),
        None => (None, s),
    }
}

// ------------------------------------------------------------------------------------------------
// Element construction
// ------------------------------------------------------------------------------------------------

fn read_attributes(state: &ParseState, ev: &BytesStart, byte_pos: usize) -> ParseResult<Vec<(String, String)>> {
    let mut out = Vec::new();
    for attr in ev.attributes() {
        let attr = attr.map_err(|e| {
            fatal(state, DOMErrorKind::PxdomParseError, format!("malformed attribute: {}", e), byte_pos)
        })?;
        let key = decode_raw(state, attr.key, byte_pos)?;
        let value = decode_raw(state, attr.value.as_ref(), byte_pos)?;
        out.push((key, value));
    }
    Ok(out)
}

fn build_element(
    state: &mut ParseState,
    document: &RefNode,
    stack: &[Frame],
    ev: &BytesStart,
    byte_pos: usize,
) -> ParseResult<(RefNode, HashMap<String, String>)> {
    let qname = decode_raw(state, ev.name(), byte_pos)?;
    let raw_attrs = read_attributes(state, ev, byte_pos)?;
    let namespaces_enabled = state.config.get_bool("namespaces");
    let keep_ns_decls = state.config.get_bool("namespace-declarations");

    let mut own_scope: HashMap<String, String> = HashMap::new();
    let mut attrs: Vec<(String, String)> = Vec::with_capacity(raw_attrs.len());
    for (name, raw_value) in &raw_attrs {
        let value = expand_attribute_value(state, raw_value, byte_pos)?;
        if name == "xmlns" {
            own_scope.insert(String::new(), value.clone());
        } else if let Some(prefix) = name.strip_prefix("xmlns:") {
            own_scope.insert(prefix.to_string(), value.clone());
        }
        attrs.push((name.clone(), value));
    }

    let element = if namespaces_enabled {
        let (prefix, _local) = split_qname(&qname);
        let uri = match prefix {
            Some(p) => well_known_or_scope(&own_scope, stack, p),
            None => own_scope.get("").cloned().or_else(|| resolve_in_stack(stack, "")),
        };
        match uri {
            Some(u) if !u.is_empty() => document.create_element_ns(&u, &qname).or_else(|_| {
                warn!("element '{}' bound to '{}' is not a valid QName; falling back", qname, u);
                document.create_element(&qname)
            }),
            _ => document.create_element(&qname),
        }
        .map_err(|e| structural(state, e, byte_pos))?
    } else {
        document.create_element(&qname).map_err(|e| structural(state, e, byte_pos))?
    };

    for (name, value) in &attrs {
        let is_ns_decl = name == "xmlns" || name.starts_with("xmlns:");
        if is_ns_decl && !keep_ns_decls {
            continue;
        }
        let mut el = element.clone();
        let outcome = if !namespaces_enabled {
            Element::set_attribute(&mut el, name, value)
        } else if is_ns_decl {
            Element::set_attribute_ns(&mut el, XMLNS_NS_URI, name, value)
        } else {
            match split_qname(name).0 {
                Some(p) => match well_known_or_scope(&own_scope, stack, p) {
                    Some(uri) => Element::set_attribute_ns(&mut el, &uri, name, value),
                    None => {
                        raise(
                            state,
                            DOMErrorKind::UnboundNamespaceInEntity,
                            format!("attribute '{}' has no bound namespace prefix", name),
                            byte_pos,
                        )?;
                        Element::set_attribute(&mut el, name, value)
                    }
                },
                None => Element::set_attribute(&mut el, name, value),
            }
        };
        if outcome.is_err() {
            raise(
                state,
                DOMErrorKind::WfInvalidCharacterInNodeName,
                format!("attribute name '{}' is not a valid QName", name),
                byte_pos,
            )?;
        }
    }

    element.borrow_mut().location = Some(state.location_at_byte(byte_pos));
    materialize_defaults(document, &element);

    Ok((element, own_scope))
}

/// Adds declared-but-unspecified attributes from the owner document's
/// doctype, reusing the same default-attribute-maintenance rule that
/// reinstates a default after an explicit attribute is removed.
fn materialize_defaults(document: &RefNode, element: &RefNode) {
    let doctype = match document.doc_type() {
        Some(d) => d,
        None => return,
    };
    for decl in doctype.get_attribute_declarations(&element.tag_name()) {
        tree::attr_default::remateralize_default(element, &decl.name.qualified_name());
    }
}

fn append_to_current(state: &ParseState, document: &RefNode, stack: &[Frame], node: RefNode, byte_pos: usize) -> ParseResult<()> {
    let mut parent = stack.last().map(|f| f.element.clone()).unwrap_or_else(|| document.clone());
    parent.append_child(node).map(|_| ()).map_err(|e| structural(state, e, byte_pos))
}

fn attach_or_interrupt(
    state: &mut ParseState,
    document: &RefNode,
    stack: &[Frame],
    node: RefNode,
    kind: NodeType,
    byte_pos: usize,
) -> ParseResult<()> {
    if state.filter.interested_in(kind) {
        match state.filter.accept_node(&node) {
            FilterAction::Reject => return Ok(()),
            FilterAction::Interrupt => return Err(ParseSignal::Interrupt),
            FilterAction::Skip | FilterAction::Accept => {}
        }
    }
    append_to_current(state, document, stack, node, byte_pos)
}

fn finalize_element(state: &mut ParseState, document: &RefNode, stack: &[Frame], frame: Frame, _byte_pos: usize) -> ParseResult<()> {
    let decision = match frame.verdict {
        FilterAction::Reject => FilterAction::Reject,
        FilterAction::Skip => FilterAction::Skip,
        FilterAction::Interrupt => FilterAction::Accept, // guarded against at open time
        FilterAction::Accept => {
            if state.filter.interested_in(NodeType::Element) {
                state.filter.accept_node(&frame.element)
            } else {
                FilterAction::Accept
            }
        }
    };

    let mut parent = stack.last().map(|f| f.element.clone()).unwrap_or_else(|| document.clone());
    match decision {
        FilterAction::Interrupt => Err(ParseSignal::Interrupt),
        FilterAction::Reject => {
            let _ = parent.remove_child(&frame.element);
            Ok(())
        }
        FilterAction::Skip => {
            for child in frame.element.child_nodes() {
                let _ = parent.insert_before(child, Some(&frame.element));
            }
            let _ = parent.remove_child(&frame.element);
            Ok(())
        }
        FilterAction::Accept => Ok(()),
    }
}

// ------------------------------------------------------------------------------------------------
// Text and entity/character references
// ------------------------------------------------------------------------------------------------

/// Splits `raw` into literal runs and general-entity references. Character
/// references are always resolved immediately. When `want_nodes` is `false`
/// (attribute values, and nested entity expansion one level down) a general
/// entity's replacement text is inlined directly instead of being kept as a
/// distinct piece.
fn scan_text_references(state: &mut ParseState, raw: &str, byte_pos: usize, want_nodes: bool) -> ParseResult<Vec<TextPiece>> {
    let chars: Vec<char> = raw.chars().collect();
    let mut pieces = Vec::new();
    let mut literal = String::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] != '&' {
            literal.push(chars[i]);
            i += 1;
            continue;
        }
        let end = match chars[i + 1..].iter().position(|&c| c == ';') {
            Some(rel) => i + 1 + rel,
            None => {
                raise(state, DOMErrorKind::PxdomParseError, "unterminated reference", byte_pos)?;
                literal.push(chars[i]);
                i += 1;
                continue;
            }
        };
        let body: String = chars[i + 1..end].iter().collect();
        if let Some(rest) = body.strip_prefix('#') {
            let code = if let Some(h) = rest.strip_prefix('x').or_else(|| rest.strip_prefix('X')) {
                u32::from_str_radix(h, 16).ok()
            } else {
                rest.parse::<u32>().ok()
            };
            match code.and_then(char::from_u32) {
                Some(c) => literal.push(c),
                None => raise(
                    state,
                    DOMErrorKind::WfInvalidCharacter,
                    format!("invalid character reference '&{};'", body),
                    byte_pos,
                )?,
            }
        } else if let Some(c) = predefined_char(&body) {
            literal.push(c);
        } else if state.general_entities.contains_key(&body) {
            if want_nodes {
                if !literal.is_empty() {
                    pieces.push(TextPiece::Literal(std::mem::take(&mut literal)));
                }
                pieces.push(TextPiece::EntityRef(body));
            } else {
                let replacement = state.general_entities.get(&body).cloned().unwrap_or_default();
                literal.push_str(&replacement);
            }
        } else {
            raise(
                state,
                DOMErrorKind::PxdomParseError,
                format!("reference to undeclared entity '&{};'", body),
                byte_pos,
            )?;
        }
        i = end + 1;
    }
    if !literal.is_empty() {
        pieces.push(TextPiece::Literal(literal));
    }
    Ok(pieces)
}

/// Attribute values always flatten fully to a plain string (`Attr`
/// content is never split into `EntityReference` children here), so this
/// ignores the `entities` configuration parameter entirely.
fn expand_attribute_value(state: &mut ParseState, raw: &str, byte_pos: usize) -> ParseResult<String> {
    let folded: String = raw
        .chars()
        .map(|c| if c == '\t' || c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    let pieces = scan_text_references(state, &folded, byte_pos, false)?;
    let mut out = String::new();
    for piece in pieces {
        if let TextPiece::Literal(s) = piece {
            out.push_str(&s);
        }
    }
    Ok(out)
}

fn make_entity_reference(state: &mut ParseState, document: &RefNode, name: &str, byte_pos: usize) -> ParseResult<RefNode> {
    let mut node = document
        .create_entity_reference(name)
        .map_err(|e| structural(state, e, byte_pos))?;
    if let Some(replacement) = state.general_entities.get(name).cloned() {
        for piece in scan_text_references(state, &replacement, byte_pos, false)? {
            if let TextPiece::Literal(text) = piece {
                let child = document.create_text_node(&text);
                let _ = node.append_child(child);
            }
        }
    }
    tree::clone::mark_readonly(&node);
    Ok(node)
}

/// Flushes whatever text has accumulated since the last structural boundary
/// into `Text`/`EntityReference` nodes. A no-op outside the root element,
/// where only whitespace is legal and the node-construction API wouldn't
/// admit a `Text` child of `Document` anyway.
fn flush_text(state: &mut ParseState, document: &RefNode, stack: &[Frame], buffer: &mut String, byte_pos: usize) -> ParseResult<()> {
    if buffer.is_empty() {
        return Ok(());
    }
    let raw = std::mem::take(buffer);
    if stack.is_empty() {
        return Ok(());
    }
    let want_nodes = state.config.get_bool("entities");
    for piece in scan_text_references(state, &raw, byte_pos, want_nodes)? {
        match piece {
            TextPiece::Literal(text) => {
                if text.is_empty() {
                    continue;
                }
                let node = document.create_text_node(&text);
                attach_or_interrupt(state, document, stack, node, NodeType::Text, byte_pos)?;
            }
            TextPiece::EntityRef(name) => {
                let node = make_entity_reference(state, document, &name, byte_pos)?;
                attach_or_interrupt(state, document, stack, node, NodeType::EntityReference, byte_pos)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Document, Element, Node};
    use crate::parser::filter::AcceptAllFilter;
    use crate::parser::Parser;

    fn test_state() -> ParseState {
        ParseState {
            config: Configuration::default(),
            filter: Rc::new(AcceptAllFilter),
            source_text: String::new(),
            general_entities: HashMap::new(),
            parameter_entities: HashMap::new(),
            internal_subset_unreliable: false,
        }
    }

    #[test]
    fn splits_a_prefixed_qname() {
        assert_eq!(split_qname("svg:rect"), (Some("svg"), "rect"));
        assert_eq!(split_qname("rect"), (None, "rect"));
    }

    #[test]
    fn splits_a_processing_instruction_target_from_its_data() {
        assert_eq!(split_pi("xml-stylesheet href=\"a.xsl\""), ("xml-stylesheet".to_string(), "href=\"a.xsl\"".to_string()));
        assert_eq!(split_pi("target"), ("target".to_string(), String::new()));
    }

    #[test]
    fn resolves_a_prefix_through_the_frame_stack() {
        let doc = get_implementation().create_document(None, Some("root"), None).unwrap();
        let root = Document::document_element(&doc).unwrap();
        let mut scope = HashMap::new();
        scope.insert("a".to_string(), "urn:a".to_string());
        let stack = vec![Frame { element: root, scope, verdict: FilterAction::Accept }];

        assert_eq!(resolve_in_stack(&stack, "a"), Some("urn:a".to_string()));
        assert_eq!(resolve_in_stack(&stack, "b"), None);
        let empty_scope = HashMap::new();
        assert_eq!(well_known_or_scope(&empty_scope, &stack, "a"), Some("urn:a".to_string()));
        assert_eq!(well_known_or_scope(&empty_scope, &stack, "xml"), Some(XML_NS_URI.to_string()));
    }

    #[test]
    fn character_and_predefined_references_resolve_to_literal_text() {
        let mut state = test_state();
        let pieces = scan_text_references(&mut state, "a&amp;b&#169;c", 0, true).unwrap();
        assert_eq!(pieces.len(), 1);
        match &pieces[0] {
            TextPiece::Literal(s) => assert_eq!(s, "a&b\u{a9}c"),
            TextPiece::EntityRef(_) => panic!("expected a single literal piece"),
        }
    }

    #[test]
    fn a_declared_general_entity_stays_a_distinct_piece_when_nodes_are_wanted() {
        let mut state = test_state();
        state.general_entities.insert("copy".to_string(), "(c)".to_string());
        let pieces = scan_text_references(&mut state, "a&copy;b", 0, true).unwrap();
        assert_eq!(pieces.len(), 3);
        assert!(matches!(&pieces[0], TextPiece::Literal(s) if s == "a"));
        assert!(matches!(&pieces[1], TextPiece::EntityRef(name) if name == "copy"));
        assert!(matches!(&pieces[2], TextPiece::Literal(s) if s == "b"));
    }

    #[test]
    fn a_declared_general_entity_is_inlined_when_nodes_are_not_wanted() {
        let mut state = test_state();
        state.general_entities.insert("copy".to_string(), "(c)".to_string());
        let pieces = scan_text_references(&mut state, "a&copy;b", 0, false).unwrap();
        assert_eq!(pieces.len(), 1);
        assert!(matches!(&pieces[0], TextPiece::Literal(s) if s == "a(c)b"));
    }

    #[test]
    fn an_undeclared_entity_reference_is_a_fatal_error() {
        let mut state = test_state();
        let result = scan_text_references(&mut state, "&bogus;", 0, true);
        assert!(result.is_err());
    }

    #[test]
    fn attribute_values_fold_whitespace_and_flatten_entities() {
        let mut state = test_state();
        state.general_entities.insert("copy".to_string(), "(c)".to_string());
        let value = expand_attribute_value(&mut state, "line one\tline\ntwo&copy;", 0).unwrap();
        assert_eq!(value, "line one line two(c)");
    }

    #[test]
    fn parses_nested_elements_with_an_inherited_default_namespace() {
        let doc = Parser::new().parse_str("<root xmlns=\"urn:example\"><child/></root>").unwrap();
        let root = Document::document_element(&doc).unwrap();
        assert_eq!(root.name().namespace_uri(), &Some("urn:example".to_string()));
        let child = root.child_nodes().into_iter().next().unwrap();
        assert_eq!(child.name().namespace_uri(), &Some("urn:example".to_string()));
    }

    #[test]
    fn a_declared_general_entity_becomes_an_entity_reference_child() {
        let xml = "<!DOCTYPE root [<!ENTITY greeting \"hello\">]><root>&greeting;</root>";
        let doc = Parser::new().parse_str(xml).unwrap();
        let root = Document::document_element(&doc).unwrap();
        let children = root.child_nodes();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].node_type(), NodeType::EntityReference);
        assert_eq!(tree::text_content(&children[0]), Some("hello".to_string()));
    }

    #[test]
    fn a_cdata_section_is_kept_as_its_own_node_by_default() {
        let doc = Parser::new().parse_str("<root><![CDATA[<not-a-tag>]]></root>").unwrap();
        let root = Document::document_element(&doc).unwrap();
        let children = root.child_nodes();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].node_type(), NodeType::CData);
        assert_eq!(children[0].node_value(), Some("<not-a-tag>".to_string()));
    }

    struct RejectNamed(&'static str);

    impl ParserFilter for RejectNamed {
        fn start_element(&self, element: &RefNode) -> FilterAction {
            if Element::tag_name(element) == self.0 {
                FilterAction::Reject
            } else {
                FilterAction::Accept
            }
        }
    }

    #[test]
    fn a_rejecting_filter_discards_the_element_and_its_children() {
        let mut parser = Parser::new();
        parser.set_filter(Rc::new(RejectNamed("secret")));
        let doc = parser.parse_str("<root><secret><inner/></secret><kept/></root>").unwrap();
        let root = Document::document_element(&doc).unwrap();
        let names: Vec<String> = root.child_nodes().iter().map(Element::tag_name).collect();
        assert_eq!(names, vec!["kept".to_string()]);
    }

    struct SkipNamed(&'static str);

    impl ParserFilter for SkipNamed {
        fn start_element(&self, element: &RefNode) -> FilterAction {
            if Element::tag_name(element) == self.0 {
                FilterAction::Skip
            } else {
                FilterAction::Accept
            }
        }
    }

    #[test]
    fn a_skipping_filter_splices_the_elements_children_into_its_place() {
        let mut parser = Parser::new();
        parser.set_filter(Rc::new(SkipNamed("wrapper")));
        let doc = parser.parse_str("<root><wrapper><a/><b/></wrapper></root>").unwrap();
        let root = Document::document_element(&doc).unwrap();
        let names: Vec<String> = root.child_nodes().iter().map(Element::tag_name).collect();
        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
    }
}
