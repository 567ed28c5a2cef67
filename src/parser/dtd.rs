/*!
DTD internal-subset parsing: entity, notation, element, and attribute-list
declarations, and the parameter-entity splicing rule that threads them
together.

quick-xml hands the whole `<!DOCTYPE ...>` construct over as one opaque
blob (`Event::DocType`), so [`parse_doctype`] first picks the qualified
name, external identifier, and internal-subset span out of that blob by
hand before handing the subset off to [`parse_internal_subset`].
*/

use super::lexer::Cursor;
use super::{fatal, raise, structural, ParseResult, ParseSignal, ParseState};
use crate::dom_impl::get_implementation;
use crate::error::DOMErrorKind;
use crate::name::Name;
use crate::node::{
    AttributeDeclaration, AttributeDefault, AttributeType, ContentGroup, ContentModelKind,
    ContentParticle, NodeData, NodeImpl, NodeType, RefNode,
};

/// The qualified name and external identifier picked out of a `<!DOCTYPE
/// ...>` blob, plus the raw (still textual) internal-subset span if one was
/// present.
struct DoctypeHead {
    qualified_name: String,
    public_id: Option<String>,
    system_id: Option<String>,
    internal_subset: Option<String>,
}

fn parse_external_id(cur: &mut Cursor<'_>) -> Option<(Option<String>, Option<String>)> {
    if cur.eat_literal("PUBLIC") {
        cur.space();
        let public_id = cur.quoted()?;
        cur.space();
        let system_id = cur.quoted();
        Some((Some(public_id), system_id))
    } else if cur.eat_literal("SYSTEM") {
        cur.space();
        let system_id = cur.quoted()?;
        Some((None, Some(system_id)))
    } else {
        None
    }
}

fn parse_doctype_head(raw: &str) -> Option<DoctypeHead> {
    let chars: Vec<char> = raw.chars().collect();
    let mut cur = Cursor::new(&chars);
    cur.space();
    let qualified_name = cur.name()?;
    cur.space();
    let (public_id, system_id) = parse_external_id(&mut cur).unwrap_or((None, None));
    cur.space();
    let internal_subset = if cur.peek() == Some('[') {
        cur.advance();
        Some(scan_balanced(&mut cur))
    } else {
        None
    };
    Some(DoctypeHead {
        qualified_name,
        public_id,
        system_id,
        internal_subset,
    })
}

/// Scans to the `]` that closes the internal subset, skipping over
/// comments, processing instructions, and quoted literals so a `]`
/// appearing inside one of those doesn't end the subset early.
fn scan_balanced(cur: &mut Cursor<'_>) -> String {
    let start = cur.pos;
    loop {
        match cur.peek() {
            None => break,
            Some(']') => break,
            Some('"') | Some('\'') => {
                cur.quoted();
            }
            Some('<') if cur.starts_with("<!--") => {
                cur.pos += 4;
                cur.find("-->");
            }
            Some('<') if cur.starts_with("<?") => {
                cur.pos += 2;
                cur.find("?>");
            }
            _ => {
                cur.advance();
            }
        }
    }
    let text = cur.consumed_since(start);
    if cur.peek() == Some(']') {
        cur.advance();
    }
    text
}

/// Parses a `<!DOCTYPE ...>` blob into a fresh `DocumentType` node, with its
/// entity/notation/element/attlist maps populated from the internal subset
/// (if any).
pub(crate) fn parse_doctype(state: &mut ParseState, raw: &str, byte_pos: usize) -> ParseResult<RefNode> {
    let head = parse_doctype_head(raw)
        .ok_or_else(|| fatal(state, DOMErrorKind::PxdomParseError, "malformed doctype", byte_pos))?;

    let doctype = get_implementation()
        .create_document_type(
            &head.qualified_name,
            head.public_id.as_deref(),
            head.system_id.as_deref(),
        )
        .map_err(|e| structural(state, e, byte_pos))?;

    if let Some(subset) = &head.internal_subset {
        if let NodeData::DocumentType {
            internal_subset, ..
        } = &mut doctype.borrow_mut().data
        {
            *internal_subset = Some(subset.clone());
        }
        parse_internal_subset(state, &doctype, subset)?;
    }

    Ok(doctype)
}

/// `_parseInternalSubset`: loops over declarations, comments, PIs, and
/// `%name;` parameter-entity references, splicing the latter's replacement
/// text directly into the remaining buffer and continuing.
fn parse_internal_subset(state: &mut ParseState, doctype: &RefNode, subset: &str) -> ParseResult<()> {
    let mut buf = subset.to_string();
    loop {
        let trimmed = buf.trim_start();
        let consumed = buf.len() - trimmed.len();
        buf.drain(..consumed);
        if buf.is_empty() {
            break;
        }

        if let Some(rest) = buf.strip_prefix('%') {
            let semi = rest.find(';').ok_or_else(|| {
                fatal(
                    state,
                    DOMErrorKind::PxdomParseError,
                    "unterminated parameter-entity reference",
                    0,
                )
            })?;
            let name = rest[..semi].to_string();
            let remainder = rest[semi + 1..].to_string();
            match state.parameter_entities.get(&name).cloned() {
                Some(replacement) => {
                    buf = format!(" {} {}", replacement, remainder);
                }
                None => {
                    state.internal_subset_unreliable = true;
                    raise(
                        state,
                        DOMErrorKind::PxdomParseError,
                        format!("reference to undeclared parameter entity '%{};'", name),
                        0,
                    )?;
                    buf = remainder;
                }
            }
            continue;
        }

        if buf.starts_with("<!--") {
            let chars: Vec<char> = buf.chars().collect();
            let mut cur = Cursor::new(&chars);
            cur.pos = 4;
            if cur.find("-->").is_none() {
                return Err(fatal(state, DOMErrorKind::PxdomParseError, "unterminated comment", 0));
            }
            buf = cur.remaining().iter().collect();
            continue;
        }
        if buf.starts_with("<?") {
            let chars: Vec<char> = buf.chars().collect();
            let mut cur = Cursor::new(&chars);
            cur.pos = 2;
            if cur.find("?>").is_none() {
                return Err(fatal(
                    state,
                    DOMErrorKind::PxdomParseError,
                    "unterminated processing instruction",
                    0,
                ));
            }
            buf = cur.remaining().iter().collect();
            continue;
        }

        if buf.starts_with("<!") {
            let (decl, rest) = extract_declaration(&buf).ok_or_else(|| {
                fatal(state, DOMErrorKind::PxdomParseError, "unterminated markup declaration", 0)
            })?;
            dispatch_declaration(state, doctype, &decl)?;
            buf = rest;
            continue;
        }

        return Err(fatal(
            state,
            DOMErrorKind::PxdomParseError,
            format!("unexpected content in internal subset: {:?}", &buf[..buf.len().min(20)]),
            0,
        ));
    }
    Ok(())
}

/// Finds the `>` that closes a `<!...>` declaration, honoring quoted
/// literals, and returns `(declaration body without the delimiters, rest of
/// buffer after it)`.
fn extract_declaration(buf: &str) -> Option<(String, String)> {
    let chars: Vec<char> = buf.chars().collect();
    let mut i = 2; // skip "<!"
    let mut in_quote: Option<char> = None;
    while i < chars.len() {
        match in_quote {
            Some(q) => {
                if chars[i] == q {
                    in_quote = None;
                }
            }
            None => match chars[i] {
                '"' | '\'' => in_quote = Some(chars[i]),
                '>' => {
                    let body: String = chars[2..i].iter().collect();
                    let rest: String = chars[i + 1..].iter().collect();
                    return Some((body, rest));
                }
                _ => {}
            },
        }
        i += 1;
    }
    None
}

#[cfg(test)]
fn test_state() -> ParseState {
    use super::filter::AcceptAllFilter;
    use crate::config::Configuration;
    use std::collections::HashMap;
    use std::rc::Rc;

    ParseState {
        config: Configuration::default(),
        filter: Rc::new(AcceptAllFilter),
        source_text: String::new(),
        general_entities: HashMap::new(),
        parameter_entities: HashMap::new(),
        internal_subset_unreliable: false,
    }
}

fn dispatch_declaration(state: &mut ParseState, doctype: &RefNode, decl: &str) -> ParseResult<()> {
    if decl.starts_with("ENTITY") {
        parse_entity_decl(state, doctype, decl)
    } else if decl.starts_with("NOTATION") {
        parse_notation_decl(state, doctype, decl)
    } else if decl.starts_with("ELEMENT") {
        parse_element_decl(state, doctype, decl)
    } else if decl.starts_with("ATTLIST") {
        parse_attlist_decl(state, doctype, decl)
    } else {
        raise(
            state,
            DOMErrorKind::PxdomParseError,
            format!("unrecognized markup declaration '<!{}>'", decl),
            0,
        )
    }
}

/// Resolves character references and nested parameter-entity references
/// inside an entity's literal value; a bare `&name;` general-entity
/// reference is left untouched, to be resolved when the entity is actually
/// referenced in content rather than at declaration time.
fn fold_literal(state: &mut ParseState, text: &str, resolve_pe: bool) -> ParseResult<String> {
    let mut out = String::new();
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '%' && resolve_pe {
            if let Some(end) = chars[i + 1..].iter().position(|&c| c == ';').map(|p| p + i + 1) {
                let name: String = chars[i + 1..end].iter().collect();
                match state.parameter_entities.get(&name).cloned() {
                    Some(replacement) => out.push_str(&replacement),
                    None => {
                        raise(
                            state,
                            DOMErrorKind::PxdomParseError,
                            format!("reference to undeclared parameter entity '%{};'", name),
                            0,
                        )?;
                    }
                }
                i = end + 1;
                continue;
            }
        }
        if chars[i] == '&' {
            if let Some(end) = chars[i + 1..].iter().position(|&c| c == ';').map(|p| p + i + 1) {
                let body: String = chars[i + 1..end].iter().collect();
                if let Some(rest) = body.strip_prefix('#') {
                    let code = if let Some(h) = rest.strip_prefix('x').or_else(|| rest.strip_prefix('X')) {
                        u32::from_str_radix(h, 16).ok()
                    } else {
                        rest.parse::<u32>().ok()
                    };
                    match code.and_then(char::from_u32) {
                        Some(c) => out.push(c),
                        None => raise(
                            state,
                            DOMErrorKind::WfInvalidCharacter,
                            format!("invalid character reference '&{};'", body),
                            0,
                        )?,
                    }
                    i = end + 1;
                    continue;
                } else if let Some(c) = super::predefined_char(&body) {
                    out.push(c);
                    i = end + 1;
                    continue;
                }
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    Ok(out)
}

fn parse_entity_decl(state: &mut ParseState, doctype: &RefNode, decl: &str) -> ParseResult<()> {
    let chars: Vec<char> = decl.chars().collect();
    let mut cur = Cursor::new(&chars);
    cur.eat_literal("ENTITY");
    cur.space();
    let is_parameter = cur.eat_literal("%");
    if is_parameter {
        cur.space();
    }
    let name = match cur.name() {
        Some(n) => n,
        None => return raise(state, DOMErrorKind::PxdomParseError, "entity declaration missing a name", 0),
    };
    cur.space();

    if cur.peek() == Some('"') || cur.peek() == Some('\'') {
        let literal = cur.quoted().unwrap_or_default();
        let resolved = fold_literal(state, &literal, true)?;
        if is_parameter {
            state.parameter_entities.entry(name).or_insert(resolved);
        } else if !state.general_entities.contains_key(&name) {
            state.general_entities.insert(name.clone(), resolved.clone());
            let entity_name = Name::for_qualified_name(&name).map_err(|e| structural(state, e, 0))?;
            let entity = RefNode::new(NodeImpl::new(
                NodeType::Entity,
                entity_name,
                NodeData::Entity {
                    public_id: None,
                    system_id: None,
                    notation_name: None,
                    input_encoding: None,
                },
            ));
            let text_name = Name::for_text();
            let text = RefNode::new(NodeImpl::new(
                NodeType::Text,
                text_name,
                NodeData::CharacterData(resolved),
            ));
            text.borrow_mut().parent = Some(entity.downgrade());
            entity.borrow_mut().children.push(text);
            entity.borrow_mut().readonly = true;
            if let NodeData::DocumentType { entities, .. } = &mut doctype.borrow_mut().data {
                entities.entry(name).or_insert(entity);
            }
        }
        return Ok(());
    }

    let external = parse_external_id(&mut cur);
    cur.space();
    let notation_name = if cur.eat_literal("NDATA") {
        cur.space();
        cur.name()
    } else {
        None
    };

    if is_parameter {
        // External parameter entities are out of scope (no external subset
        // fetching); leave `%name;` unresolved if referenced later.
        return Ok(());
    }

    if let Some((public_id, system_id)) = external {
        if !state.general_entities.contains_key(&name) {
            let entity_name = Name::for_qualified_name(&name).map_err(|e| structural(state, e, 0))?;
            let entity = RefNode::new(NodeImpl::new(
                NodeType::Entity,
                entity_name,
                NodeData::Entity {
                    public_id,
                    system_id,
                    notation_name,
                    input_encoding: None,
                },
            ));
            entity.borrow_mut().readonly = true;
            if let NodeData::DocumentType { entities, .. } = &mut doctype.borrow_mut().data {
                entities.insert(name, entity);
            }
        }
    }
    Ok(())
}

fn parse_notation_decl(state: &mut ParseState, doctype: &RefNode, decl: &str) -> ParseResult<()> {
    let chars: Vec<char> = decl.chars().collect();
    let mut cur = Cursor::new(&chars);
    cur.eat_literal("NOTATION");
    cur.space();
    let name = match cur.name() {
        Some(n) => n,
        None => return raise(state, DOMErrorKind::PxdomParseError, "notation declaration missing a name", 0),
    };
    cur.space();
    let (public_id, system_id) = parse_external_id(&mut cur).unwrap_or((None, None));

    let notation_name = Name::for_qualified_name(&name).map_err(|e| structural(state, e, 0))?;
    let notation = RefNode::new(NodeImpl::new(
        NodeType::Notation,
        notation_name,
        NodeData::Notation { public_id, system_id },
    ));
    notation.borrow_mut().readonly = true;
    if let NodeData::DocumentType { notations, .. } = &mut doctype.borrow_mut().data {
        notations.entry(name).or_insert(notation);
    }
    Ok(())
}

fn occurrence(cur: &mut Cursor<'_>) -> (bool, bool) {
    if cur.eat_literal("?") {
        (true, false)
    } else if cur.eat_literal("*") {
        (true, true)
    } else if cur.eat_literal("+") {
        (false, true)
    } else {
        (false, false)
    }
}

fn parse_content_group(state: &ParseState, cur: &mut Cursor<'_>) -> ParseResult<ContentGroup> {
    if !cur.eat_literal("(") {
        return Err(fatal(state, DOMErrorKind::PxdomParseError, "expected '(' in content model", 0));
    }
    let mut group = ContentGroup {
        is_sequence: None,
        optional: false,
        multiple: false,
        particles: Vec::new(),
    };
    loop {
        cur.space();
        let particle = if cur.peek() == Some('(') {
            ContentParticle::Group(parse_content_group(state, cur)?)
        } else {
            let name = cur
                .name()
                .ok_or_else(|| fatal(state, DOMErrorKind::PxdomParseError, "expected a name in content model", 0))?;
            let (optional, multiple) = occurrence(cur);
            ContentParticle::Name { name, optional, multiple }
        };
        group.particles.push(particle);
        cur.space();
        if cur.eat_literal(",") {
            if group.is_sequence == Some(false) {
                return Err(fatal(
                    state,
                    DOMErrorKind::PxdomParseError,
                    "content model mixes ',' and '|' in one group",
                    0,
                ));
            }
            group.is_sequence = Some(true);
            continue;
        }
        if cur.eat_literal("|") {
            if group.is_sequence == Some(true) {
                return Err(fatal(
                    state,
                    DOMErrorKind::PxdomParseError,
                    "content model mixes ',' and '|' in one group",
                    0,
                ));
            }
            group.is_sequence = Some(false);
            continue;
        }
        break;
    }
    if !cur.eat_literal(")") {
        return Err(fatal(state, DOMErrorKind::PxdomParseError, "expected ')' in content model", 0));
    }
    let (optional, multiple) = occurrence(cur);
    group.optional = optional;
    group.multiple = multiple;
    Ok(group)
}

fn parse_element_decl(state: &mut ParseState, doctype: &RefNode, decl: &str) -> ParseResult<()> {
    let chars: Vec<char> = decl.chars().collect();
    let mut cur = Cursor::new(&chars);
    cur.eat_literal("ELEMENT");
    cur.space();
    let name = match cur.name() {
        Some(n) => n,
        None => return raise(state, DOMErrorKind::PxdomParseError, "element declaration missing a name", 0),
    };
    cur.space();

    let content = if cur.eat_literal("EMPTY") {
        ContentModelKind::Empty
    } else if cur.eat_literal("ANY") {
        ContentModelKind::Any
    } else if cur.starts_with("(#PCDATA") {
        cur.eat_literal("(");
        cur.eat_literal("#PCDATA");
        let mut names = Vec::new();
        cur.space();
        while cur.eat_literal("|") {
            cur.space();
            match cur.name() {
                Some(n) => names.push(n),
                None => break,
            }
            cur.space();
        }
        cur.eat_literal(")");
        cur.eat_literal("*");
        ContentModelKind::Mixed(names)
    } else {
        ContentModelKind::Children(parse_content_group(state, &mut cur)?)
    };

    let decl_name = Name::for_qualified_name(&name).map_err(|e| structural(state, e, 0))?;
    let decl_node = RefNode::new(NodeImpl::new(
        NodeType::ElementDeclaration,
        decl_name,
        NodeData::ElementDeclaration { content },
    ));
    decl_node.borrow_mut().readonly = true;
    if let NodeData::DocumentType { elements, .. } = &mut doctype.borrow_mut().data {
        elements.entry(name).or_insert(decl_node);
    }
    Ok(())
}

fn parse_attribute_type(cur: &mut Cursor<'_>) -> Option<AttributeType> {
    if cur.eat_literal("NOTATION") {
        cur.space();
        cur.enumeration().map(AttributeType::Notation)
    } else if cur.peek() == Some('(') {
        cur.enumeration().map(AttributeType::Enumeration)
    } else if cur.eat_literal("CDATA") {
        Some(AttributeType::CData)
    } else if cur.eat_literal("IDREFS") {
        Some(AttributeType::IdRefs)
    } else if cur.eat_literal("IDREF") {
        Some(AttributeType::IdRef)
    } else if cur.eat_literal("ID") {
        Some(AttributeType::Id)
    } else if cur.eat_literal("ENTITIES") {
        Some(AttributeType::Entities)
    } else if cur.eat_literal("ENTITY") {
        Some(AttributeType::Entity)
    } else if cur.eat_literal("NMTOKENS") {
        Some(AttributeType::NmTokens)
    } else if cur.eat_literal("NMTOKEN") {
        Some(AttributeType::NmToken)
    } else {
        None
    }
}

fn parse_attlist_decl(state: &mut ParseState, doctype: &RefNode, decl: &str) -> ParseResult<()> {
    let chars: Vec<char> = decl.chars().collect();
    let mut cur = Cursor::new(&chars);
    cur.eat_literal("ATTLIST");
    cur.space();
    let element_name = match cur.name() {
        Some(n) => n,
        None => return raise(state, DOMErrorKind::PxdomParseError, "attlist declaration missing an element name", 0),
    };

    let mut declarations = Vec::new();
    loop {
        cur.space();
        let attr_name = match cur.name() {
            Some(n) => n,
            None => break,
        };
        cur.space();
        let attribute_type = match parse_attribute_type(&mut cur) {
            Some(t) => t,
            None => {
                raise(state, DOMErrorKind::PxdomParseError, format!("unrecognized attribute type for '{}'", attr_name), 0)?;
                break;
            }
        };
        cur.space();
        let (default, default_value_children) = if cur.eat_literal("#REQUIRED") {
            (AttributeDefault::Required, Vec::new())
        } else if cur.eat_literal("#IMPLIED") {
            (AttributeDefault::Implied, Vec::new())
        } else {
            let fixed = cur.eat_literal("#FIXED");
            if fixed {
                cur.space();
            }
            let raw = cur
                .quoted()
                .ok_or_else(|| fatal(state, DOMErrorKind::PxdomParseError, "expected a default attribute value", 0))?;
            let folded: String = raw.chars().map(|c| if c == '\t' || c == '\n' { ' ' } else { c }).collect();
            let resolved = fold_literal(state, &folded, false)?;
            let text = RefNode::new(NodeImpl::new(
                NodeType::Text,
                Name::for_text(),
                NodeData::CharacterData(resolved.clone()),
            ));
            let value = if fixed {
                AttributeDefault::Fixed(resolved)
            } else {
                AttributeDefault::Value(resolved)
            };
            (value, vec![text])
        };

        let name = match Name::for_qualified_name(&attr_name) {
            Ok(n) => n,
            Err(e) => return Err(structural(state, e, 0)),
        };
        declarations.push(AttributeDeclaration {
            name,
            attribute_type,
            default,
            default_value_children,
        });
    }

    let decl_name = Name::for_qualified_name(&element_name).map_err(|e| structural(state, e, 0))?;
    if let NodeData::DocumentType { attlists, .. } = &mut doctype.borrow_mut().data {
        let entry = attlists.entry(element_name).or_insert_with(|| {
            RefNode::new(NodeImpl::new(
                NodeType::AttributeListDeclaration,
                decl_name,
                NodeData::AttributeListDeclaration { declarations: Vec::new() },
            ))
        });
        if let NodeData::AttributeListDeclaration { declarations: existing } = &mut entry.borrow_mut().data {
            for decl in declarations {
                if !existing.iter().any(|d| d.name == decl.name) {
                    existing.push(decl);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctype(name: &str) -> RefNode {
        get_implementation().create_document_type(name, None, None).unwrap()
    }

    #[test]
    fn parses_a_sequence_content_group() {
        let state = test_state();
        let chars: Vec<char> = "(a,b,c)".chars().collect();
        let mut cur = Cursor::new(&chars);
        let group = parse_content_group(&state, &mut cur).unwrap();
        assert_eq!(group.is_sequence, Some(true));
        assert_eq!(group.particles.len(), 3);
    }

    #[test]
    fn parses_a_choice_content_group_with_occurrence() {
        let state = test_state();
        let chars: Vec<char> = "(a|b)*".chars().collect();
        let mut cur = Cursor::new(&chars);
        let group = parse_content_group(&state, &mut cur).unwrap();
        assert_eq!(group.is_sequence, Some(false));
        // '*' means zero-or-more: both optional and repeatable.
        assert!(group.optional);
        assert!(group.multiple);
    }

    #[test]
    fn single_particle_group_leaves_is_sequence_undecided() {
        let state = test_state();
        let chars: Vec<char> = "(a)".chars().collect();
        let mut cur = Cursor::new(&chars);
        let group = parse_content_group(&state, &mut cur).unwrap();
        assert_eq!(group.is_sequence, None);
    }

    #[test]
    fn rejects_a_group_mixing_comma_and_pipe() {
        let state = test_state();
        let chars: Vec<char> = "(a,b|c)".chars().collect();
        let mut cur = Cursor::new(&chars);
        assert!(parse_content_group(&state, &mut cur).is_err());
    }

    #[test]
    fn parses_an_empty_element_declaration() {
        let mut state = test_state();
        let dt = doctype("root");
        parse_element_decl(&mut state, &dt, "ELEMENT img EMPTY").unwrap();
        if let NodeData::DocumentType { elements, .. } = &dt.borrow().data {
            let decl = elements.get("img").unwrap();
            if let NodeData::ElementDeclaration { content } = &decl.borrow().data {
                assert_eq!(*content, ContentModelKind::Empty);
            } else {
                panic!("expected an element declaration");
            }
        } else {
            panic!("expected a doctype");
        }
    }

    #[test]
    fn parses_a_mixed_content_element_declaration() {
        let mut state = test_state();
        let dt = doctype("root");
        parse_element_decl(&mut state, &dt, "ELEMENT p (#PCDATA|b|i)*").unwrap();
        if let NodeData::DocumentType { elements, .. } = &dt.borrow().data {
            let decl = elements.get("p").unwrap();
            if let NodeData::ElementDeclaration { content } = &decl.borrow().data {
                assert_eq!(*content, ContentModelKind::Mixed(vec!["b".to_string(), "i".to_string()]));
            } else {
                panic!("expected an element declaration");
            }
        } else {
            panic!("expected a doctype");
        }
    }

    #[test]
    fn parses_an_internal_general_entity() {
        let mut state = test_state();
        let dt = doctype("root");
        parse_entity_decl(&mut state, &dt, "ENTITY copy \"&#169;\"").unwrap();
        assert_eq!(state.general_entities.get("copy"), Some(&"\u{a9}".to_string()));
        if let NodeData::DocumentType { entities, .. } = &dt.borrow().data {
            assert!(entities.contains_key("copy"));
        } else {
            panic!("expected a doctype");
        }
    }

    #[test]
    fn parses_a_parameter_entity_without_adding_a_general_entity() {
        let mut state = test_state();
        let dt = doctype("root");
        parse_entity_decl(&mut state, &dt, "ENTITY % common \"CDATA #IMPLIED\"").unwrap();
        assert_eq!(state.parameter_entities.get("common"), Some(&"CDATA #IMPLIED".to_string()));
        if let NodeData::DocumentType { entities, .. } = &dt.borrow().data {
            assert!(!entities.contains_key("common"));
        } else {
            panic!("expected a doctype");
        }
    }

    #[test]
    fn parses_a_notation_declaration() {
        let mut state = test_state();
        let dt = doctype("root");
        parse_notation_decl(&mut state, &dt, "NOTATION gif SYSTEM \"image/gif\"").unwrap();
        if let NodeData::DocumentType { notations, .. } = &dt.borrow().data {
            let notation = notations.get("gif").unwrap();
            if let NodeData::Notation { system_id, .. } = &notation.borrow().data {
                assert_eq!(system_id.as_deref(), Some("image/gif"));
            } else {
                panic!("expected a notation");
            }
        } else {
            panic!("expected a doctype");
        }
    }

    #[test]
    fn parses_an_attlist_with_required_and_fixed_attributes() {
        let mut state = test_state();
        let dt = doctype("root");
        parse_attlist_decl(&mut state, &dt, "ATTLIST img src CDATA #REQUIRED kind CDATA #FIXED \"icon\"").unwrap();
        if let NodeData::DocumentType { attlists, .. } = &dt.borrow().data {
            let attlist = attlists.get("img").unwrap();
            if let NodeData::AttributeListDeclaration { declarations } = &attlist.borrow().data {
                assert_eq!(declarations.len(), 2);
                assert_eq!(declarations[0].default, AttributeDefault::Required);
                assert_eq!(declarations[1].default, AttributeDefault::Fixed("icon".to_string()));
            } else {
                panic!("expected an attlist declaration");
            }
        } else {
            panic!("expected a doctype");
        }
    }

    #[test]
    fn repeated_attlists_for_one_element_merge_additively() {
        let mut state = test_state();
        let dt = doctype("root");
        parse_attlist_decl(&mut state, &dt, "ATTLIST img src CDATA #REQUIRED").unwrap();
        parse_attlist_decl(&mut state, &dt, "ATTLIST img src CDATA #IMPLIED alt CDATA #IMPLIED").unwrap();
        if let NodeData::DocumentType { attlists, .. } = &dt.borrow().data {
            let attlist = attlists.get("img").unwrap();
            if let NodeData::AttributeListDeclaration { declarations } = &attlist.borrow().data {
                assert_eq!(declarations.len(), 2);
                assert_eq!(declarations[0].default, AttributeDefault::Required);
            } else {
                panic!("expected an attlist declaration");
            }
        } else {
            panic!("expected a doctype");
        }
    }

    #[test]
    fn parses_doctype_head_with_internal_subset() {
        let head = parse_doctype_head("root SYSTEM \"root.dtd\" [<!ENTITY a \"x\">]").unwrap();
        assert_eq!(head.qualified_name, "root");
        assert_eq!(head.system_id.as_deref(), Some("root.dtd"));
        assert_eq!(head.internal_subset.as_deref(), Some("<!ENTITY a \"x\">"));
    }

    #[test]
    fn internal_subset_scan_skips_brackets_inside_comments() {
        let head = parse_doctype_head("root [<!-- a ] b --><!ENTITY a \"x\">]").unwrap();
        assert_eq!(head.internal_subset.as_deref(), Some("<!-- a ] b --><!ENTITY a \"x\">"));
    }

    #[test]
    fn splices_a_whole_declaration_in_from_a_parameter_entity() {
        let mut state = test_state();
        state
            .parameter_entities
            .insert("img-attrs".to_string(), "<!ATTLIST img src CDATA #IMPLIED>".to_string());
        let dt = doctype("root");
        parse_internal_subset(&mut state, &dt, "%img-attrs;").unwrap();
        if let NodeData::DocumentType { attlists, .. } = &dt.borrow().data {
            let attlist = attlists.get("img").unwrap();
            if let NodeData::AttributeListDeclaration { declarations } = &attlist.borrow().data {
                assert_eq!(declarations[0].attribute_type, AttributeType::CData);
                assert_eq!(declarations[0].default, AttributeDefault::Implied);
            } else {
                panic!("expected an attlist declaration");
            }
        } else {
            panic!("expected a doctype");
        }
    }

    #[test]
    fn an_undeclared_parameter_entity_reference_marks_the_subset_unreliable() {
        let mut state = test_state();
        let dt = doctype("root");
        // `pxdom-parse-error` defaults to fatal severity with no handler
        // installed, so this aborts — but only after flagging the subset.
        let result = parse_internal_subset(&mut state, &dt, "%missing;");
        assert!(result.is_err());
        assert!(state.internal_subset_unreliable);
    }
}
