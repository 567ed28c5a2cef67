/*!
The non-validating XML parser: turns a character or byte stream into
a `Document` tree using the node-construction API in [`crate::node`] and
[`crate::dom_impl`].

Top-level markup (elements, comments, processing instructions, the XML
declaration, CDATA sections, the doctype's outer shell) is tokenized by
[`quick_xml`]. quick-xml has no notion of entity/character references,
attribute-value normalization, or DTD internal-subset grammar, so those
are hand-rolled on top in [`lexer`] and [`dtd`].
*/

mod content;
mod dtd;
pub mod filter;
pub mod lexer;
pub mod source;

pub use filter::{AcceptAllFilter, FilterAction, ParserFilter};
pub use source::{resolve_encoding, DecodedInput, InputDescriptor, InputSource};

use crate::config::Configuration;
use crate::error::{DOMError, DOMErrorKind, Halt};
use crate::node::RefNode;
use std::collections::HashMap;
use std::rc::Rc;

/// Internal control-flow signal threaded through every `parse_*` helper: a
/// filter-requested `INTERRUPT`, or a `DOMError` that `dispatch_error`
/// already judged unrecoverable.
pub(crate) enum ParseSignal {
    Interrupt,
    Fatal(DOMError),
}

pub(crate) type ParseResult<T> = Result<T, ParseSignal>;

/// Mutable state threaded through one `parse` call: the resolved
/// configuration, the filter to consult, the decoded source text (kept
/// around for `DOMError` location reporting), and the general/parameter
/// entity replacement-text tables built up as `<!ENTITY ...>` declarations
/// are read.
pub(crate) struct ParseState {
    pub config: Configuration,
    pub filter: Rc<dyn ParserFilter>,
    pub source_text: String,
    pub general_entities: HashMap<String, String>,
    pub parameter_entities: HashMap<String, String>,
    /// Set once an unresolved parameter-entity reference is hit inside the
    /// internal subset while the document isn't `standalone="yes"` — per the
    /// XML recommendation this means an external piece of the DTD might have
    /// changed what the internal subset means, so default-attribute and
    /// entity processing downstream of that point becomes best-effort.
    pub internal_subset_unreliable: bool,
}

impl ParseState {
    pub fn location_at_byte(&self, byte_pos: usize) -> crate::error::Location {
        let mut row = 1u64;
        let mut column = 1u64;
        for &b in self
            .source_text
            .as_bytes()
            .iter()
            .take(byte_pos.min(self.source_text.len()))
        {
            if b == b'\n' {
                row += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        crate::error::Location { row, column }
    }
}

/// Routes a [`DOMError`] through the configured handler and converts its
/// continue/abort verdict into a [`ParseResult`]: `Ok(())` to keep going,
/// `Err(ParseSignal::Fatal)` to unwind.
pub(crate) fn raise(
    state: &ParseState,
    kind: DOMErrorKind,
    message: impl Into<String>,
    byte_pos: usize,
) -> ParseResult<()> {
    let error = DOMError::new(kind, message.into()).with_location(state.location_at_byte(byte_pos));
    if crate::error::dispatch_error(&state.config.error_handler(), error.clone()) {
        Ok(())
    } else {
        Err(ParseSignal::Fatal(error))
    }
}

pub(crate) fn fatal(
    state: &ParseState,
    kind: DOMErrorKind,
    message: impl Into<String>,
    byte_pos: usize,
) -> ParseSignal {
    let error = DOMError::new(kind, message.into()).with_location(state.location_at_byte(byte_pos));
    crate::error::dispatch_error(&state.config.error_handler(), error.clone());
    ParseSignal::Fatal(error)
}

/// Maps a structural [`crate::error::Error`] raised by the node-construction
/// API (always unexpected mid-parse, since the parser only ever asks for
/// admissible insertions) onto a fatal `pxdom-parse-error`.
pub(crate) fn structural(state: &ParseState, err: crate::error::Error, byte_pos: usize) -> ParseSignal {
    fatal(state, DOMErrorKind::PxdomParseError, err.to_string(), byte_pos)
}

const PREDEFINED_ENTITIES: &[(&str, char)] = &[
    ("lt", '<'),
    ("gt", '>'),
    ("amp", '&'),
    ("apos", '\''),
    ("quot", '"'),
];

pub(crate) fn predefined_char(name: &str) -> Option<char> {
    PREDEFINED_ENTITIES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, c)| *c)
}

/// The non-validating XML parser entry point (`LSParser` in the Load-Save
/// recommendation). Carries only the optional filter; everything else
/// (configuration, the input itself) is passed per call.
#[derive(Default)]
pub struct Parser {
    filter: Option<Rc<dyn ParserFilter>>,
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("has_filter", &self.filter.is_some())
            .finish()
    }
}

impl Parser {
    pub fn new() -> Self {
        Parser { filter: None }
    }

    pub fn set_filter(&mut self, filter: Rc<dyn ParserFilter>) {
        self.filter = Some(filter);
    }

    /// Parses `source` into a fresh `Document`, running the
    /// encoding-selection algorithm first. On `INTERRUPT` or an aborting
    /// error, returns [`Halt`] carrying whatever partial tree (or bare
    /// `DOMError`) had been produced so far.
    pub fn parse(
        &self,
        source: InputSource,
        descriptor: InputDescriptor,
        config: Configuration,
    ) -> Result<RefNode, Halt<RefNode>> {
        let decoded = resolve_encoding(
            &source,
            &descriptor,
            config.get_bool("charset-overrides-xml-encoding"),
            None,
        )
        .map_err(|message| Halt::Aborted(DOMError::new(DOMErrorKind::UnsupportedEncoding, message)))?;

        let filter = self
            .filter
            .clone()
            .unwrap_or_else(|| Rc::new(AcceptAllFilter) as Rc<dyn ParserFilter>);

        content::parse_document(decoded.text, decoded.encoding, config, filter)
    }

    /// Convenience entry point over an in-memory string, using a default
    /// configuration.
    pub fn parse_str(&self, xml: &str) -> Result<RefNode, Halt<RefNode>> {
        self.parse(
            InputSource::Characters(xml.to_string()),
            InputDescriptor::default(),
            Configuration::default(),
        )
    }
}
